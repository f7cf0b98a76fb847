//! Geolocation fix followed by a weather lookup for the fixed position.
//!
//! Results come back as host events on the shared queue. Nothing here is
//! cancelled; a late answer is simply applied on the next frame.

use crate::events::SharedQueue;
use field_core::{
    parse_weather, weather_url, CurrentConditions, HostEvent, WeatherError,
    GEO_ENABLE_HIGH_ACCURACY, GEO_MAXIMUM_AGE_MS, GEO_TIMEOUT_MS,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub fn request_location(window: &web::Window, queue: &SharedQueue) {
    let geolocation = match window.navigator().geolocation() {
        Ok(g) => g,
        Err(_) => {
            log::info!("[territory] geolocation not available");
            queue.borrow_mut().push(HostEvent::LocationUnavailable);
            return;
        }
    };

    let options = web::PositionOptions::new();
    options.set_enable_high_accuracy(GEO_ENABLE_HIGH_ACCURACY);
    options.set_timeout(GEO_TIMEOUT_MS);
    options.set_maximum_age(GEO_MAXIMUM_AGE_MS);

    let on_success = {
        let queue = queue.clone();
        Closure::once(move |position: web::GeolocationPosition| {
            let coords = position.coords();
            let (latitude, longitude) = (coords.latitude(), coords.longitude());
            queue.borrow_mut().push(HostEvent::LocationFixed {
                latitude,
                longitude,
            });
            let queue = queue.clone();
            spawn_local(async move {
                let ev = match fetch_weather(latitude, longitude).await {
                    Ok(current) => HostEvent::WeatherArrived(current),
                    Err(e) => {
                        log::warn!("[territory] weather error: {:?}", e);
                        HostEvent::WeatherFailed
                    }
                };
                queue.borrow_mut().push(ev);
            });
        })
    };
    let on_error = {
        let queue = queue.clone();
        Closure::once(move |err: JsValue| {
            log::info!("[territory] geolocation refused or timed out: {:?}", err);
            queue.borrow_mut().push(HostEvent::LocationUnavailable);
        })
    };

    if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
        on_success.as_ref().unchecked_ref(),
        Some(on_error.as_ref().unchecked_ref()),
        &options,
    ) {
        log::warn!("[territory] getCurrentPosition failed: {:?}", e);
        queue.borrow_mut().push(HostEvent::LocationUnavailable);
    }
    on_success.forget();
    on_error.forget();
}

async fn fetch_weather(latitude: f64, longitude: f64) -> anyhow::Result<CurrentConditions> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let url = weather_url(latitude, longitude);
    let resp = JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(|e| anyhow::anyhow!(format!("fetch: {:?}", e)))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("not a Response: {:?}", e)))?;
    if !resp.ok() {
        return Err(WeatherError::Request(format!("status {}", resp.status())).into());
    }
    let text = resp
        .text()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let body = JsFuture::from(text)
        .await
        .map_err(|e| anyhow::anyhow!(format!("body: {:?}", e)))?
        .as_string()
        .unwrap_or_default();
    Ok(parse_weather(&body)?)
}
