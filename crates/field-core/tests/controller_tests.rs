// Host-side tests for event handling and the per-frame controller loop.

use field_core::*;
use glam::Vec2;

fn controller() -> FieldController {
    FieldController::new(FieldConfig::default(), Vec2::new(800.0, 600.0), 42)
}

fn has(cmds: &AudioCommands, wanted: AudioCommand) -> bool {
    cmds.iter().any(|c| *c == wanted)
}

/// Press, resume the audio context, and run the first audible frame.
fn started_with_audio(now: f64) -> FieldController {
    let mut c = controller();
    c.handle(InputEvent::PointerPressed.into(), now);
    assert!(c.frame(now).activate_audio);
    c.handle(HostEvent::AudioResumed.into(), now);
    let snap = c.frame(now);
    assert!(has(&snap.audio, AudioCommand::FadeIn));
    c
}

#[test]
fn keys_map_to_inputs() {
    assert_eq!(input_for_key(" "), Some(InputEvent::TogglePause));
    assert_eq!(input_for_key("r"), Some(InputEvent::Restart));
    assert_eq!(input_for_key("R"), Some(InputEvent::Restart));
    assert_eq!(input_for_key("ArrowUp"), Some(InputEvent::IntensityUp));
    assert_eq!(input_for_key("ArrowDown"), Some(InputEvent::IntensityDown));
    assert_eq!(input_for_key("C"), Some(InputEvent::ToggleChemistry));
    assert_eq!(input_for_key("v"), Some(InputEvent::Reseed));
    assert_eq!(input_for_key("x"), None);
    assert_eq!(input_for_key("Enter"), None);
    assert!(key_prevents_default(" "));
    assert!(key_prevents_default("ArrowDown"));
    assert!(!key_prevents_default("r"));
}

#[test]
fn queue_drains_in_arrival_order() {
    let mut queue = EventQueue::default();
    queue.push(InputEvent::PointerPressed);
    queue.push(HostEvent::VisibilityChanged { hidden: true });
    queue.push(InputEvent::Reseed);
    assert_eq!(queue.len(), 3);
    let drained: Vec<FieldEvent> = queue.drain().into_iter().collect();
    assert_eq!(
        drained,
        vec![
            FieldEvent::Input(InputEvent::PointerPressed),
            FieldEvent::Host(HostEvent::VisibilityChanged { hidden: true }),
            FieldEvent::Input(InputEvent::Reseed),
        ]
    );
    assert!(queue.is_empty());
}

#[test]
fn idle_until_first_press() {
    let mut c = controller();
    let snap = c.frame(0.0);
    assert_eq!(snap.phase, Phase::Idle);
    assert!(!snap.activate_audio);
    assert!(snap.audio.is_empty());
    assert_eq!(snap.cohesion, 0.0);

    c.handle(InputEvent::TogglePause.into(), 1.0);
    assert_eq!(c.frame(1.0).phase, Phase::Idle, "pause needs a started session");
}

#[test]
fn first_press_requests_audio_once() {
    let mut c = controller();
    c.handle(InputEvent::PointerPressed.into(), 2.0);
    let snap = c.frame(2.0);
    assert_eq!(snap.phase, Phase::Running);
    assert!(snap.activate_audio);
    assert!(snap.audio.is_empty(), "nothing sounds before the context runs");
    assert_eq!(c.audio_lifecycle().state(), ResourceState::Activating);

    c.handle(InputEvent::PointerPressed.into(), 2.5);
    assert!(!c.frame(2.5).activate_audio);
}

#[test]
fn resumed_context_builds_graph_and_fades_in() {
    let mut c = controller();
    c.handle(InputEvent::PointerPressed.into(), 0.0);
    c.frame(0.0);
    c.handle(HostEvent::AudioResumed.into(), 0.1);
    assert!(c.audio_lifecycle().is_active());
    let snap = c.frame(0.1);
    assert!(matches!(snap.audio[0], AudioCommand::BuildGraph { .. }));
    assert!(has(&snap.audio, AudioCommand::FadeIn));
}

#[test]
fn failed_resume_allows_another_attempt() {
    let mut c = controller();
    c.handle(InputEvent::PointerPressed.into(), 0.0);
    assert!(c.frame(0.0).activate_audio);
    c.handle(HostEvent::AudioResumeFailed.into(), 0.1);
    assert_eq!(c.audio_lifecycle().state(), ResourceState::Inactive);
    c.handle(InputEvent::PointerPressed.into(), 0.5);
    assert!(c.frame(0.5).activate_audio);
}

#[test]
fn pause_freezes_session_and_silences() {
    let mut c = started_with_audio(0.0);
    c.frame(9.0);
    c.handle(InputEvent::TogglePause.into(), 10.0);
    let paused = c.frame(10.0);
    assert_eq!(paused.phase, Phase::Paused);
    assert!(has(&paused.audio, AudioCommand::FadeOut));
    assert!(has(&paused.audio, AudioCommand::StopProxy));

    let later = c.frame(50.0);
    assert_eq!(later.session_t, paused.session_t);
    assert_eq!(later.cohesion, paused.cohesion);

    c.handle(InputEvent::TogglePause.into(), 50.0);
    let resumed = c.frame(55.0);
    assert_eq!(resumed.phase, Phase::Running);
    assert!((resumed.session_t - 15.0).abs() < 1e-3);
    assert!(has(&resumed.audio, AudioCommand::FadeIn));
}

#[test]
fn press_reseeds_only_while_running() {
    let mut c = started_with_audio(0.0);
    c.frame(30.0);
    let seed = c.variant().seed;

    c.handle(InputEvent::TogglePause.into(), 30.0);
    c.handle(InputEvent::PointerPressed.into(), 31.0);
    assert_eq!(c.variant().seed, seed, "paused press keeps the variant");
    c.handle(InputEvent::TogglePause.into(), 32.0);

    c.handle(InputEvent::PointerPressed.into(), 40.0);
    assert_ne!(c.variant().seed, seed, "running press draws a new variant");
    assert_eq!(c.frame(40.0).session_t, 0.0, "reseed restarts the session");
}

#[test]
fn reseed_key_draws_variant_while_running_and_paused() {
    let mut c = started_with_audio(0.0);
    c.frame(20.0);
    let first = c.variant().seed;
    c.handle(InputEvent::Reseed.into(), 20.0);
    let second = c.variant().seed;
    assert_ne!(second, first);
    let snap = c.frame(20.0);
    assert_eq!(snap.phase, Phase::Running);
    assert_eq!(snap.session_t, 0.0);

    c.frame(30.0);
    c.handle(InputEvent::TogglePause.into(), 30.0);
    c.handle(InputEvent::Reseed.into(), 35.0);
    assert_ne!(c.variant().seed, second);
    let snap = c.frame(50.0);
    assert_eq!(snap.phase, Phase::Paused);
    assert_eq!(snap.session_t, 0.0);
}

#[test]
fn idle_snapshot_reports_a_fresh_session() {
    let mut c = controller();
    let snap = c.frame(60.0);
    assert_eq!(snap.phase, Phase::Idle);
    assert_eq!(snap.session_t, 0.0);
    assert_eq!(snap.progress, 0.0);
    assert_eq!(snap.cohesion, 0.0);
    assert!(!snap.complete);
    assert_eq!(snap.seconds_left, SESSION_SECONDS as u32);
}

#[test]
fn restart_keeps_variant_and_resets_timer() {
    let mut c = started_with_audio(0.0);
    c.frame(60.0);
    let variant = *c.variant();
    c.handle(InputEvent::Restart.into(), 60.0);
    assert_eq!(*c.variant(), variant);
    let snap = c.frame(60.0);
    assert_eq!(snap.session_t, 0.0);
    assert_eq!(snap.cohesion, 0.0);
}

#[test]
fn completion_fades_out_once() {
    let mut c = started_with_audio(0.0);
    let mut fade_outs = 0;
    let mut completed = false;
    for i in 1..=130 {
        let snap = c.frame(i as f64);
        completed |= snap.complete;
        if has(&snap.audio, AudioCommand::FadeOut) {
            fade_outs += 1;
            assert!(snap.complete, "fade out only at completion");
        }
    }
    assert!(completed);
    assert_eq!(fade_outs, 1);
    let snap = c.frame(131.0);
    assert_eq!(snap.seconds_left, 0);
    assert_eq!(snap.cohesion, c.intensity());
}

#[test]
fn hidden_tab_fades_out_and_back_in() {
    let mut c = started_with_audio(0.0);
    c.handle(HostEvent::VisibilityChanged { hidden: true }.into(), 5.0);
    assert!(has(&c.frame(5.0).audio, AudioCommand::FadeOut));
    assert!(c.frame(6.0).audio.is_empty());
    c.handle(HostEvent::VisibilityChanged { hidden: false }.into(), 7.0);
    assert!(has(&c.frame(7.0).audio, AudioCommand::FadeIn));
}

#[test]
fn weather_updates_territory_and_chemistry() {
    let mut c = controller();
    c.handle(
        HostEvent::LocationFixed {
            latitude: 40.4,
            longitude: -3.7,
        }
        .into(),
        0.0,
    );
    assert!(c.territory().has_geolocation);

    let current = CurrentConditions {
        temperature_2m: Some(33.0),
        wind_speed_10m: Some(12.0),
        relative_humidity_2m: Some(20.0),
        shortwave_radiation: Some(800.0),
    };
    c.handle(HostEvent::WeatherArrived(current).into(), 0.0);
    assert_eq!(c.territory().temperature_c, 33.0);
    assert_eq!(c.territory().solar_wm2, 800.0);
    assert_eq!(*c.chemistry(), ChemistryState::derive(c.territory()));

    c.handle(HostEvent::WeatherFailed.into(), 0.0);
    assert_eq!(c.territory().temperature_c, 33.0, "failure keeps current values");
}

#[test]
fn location_unavailable_keeps_defaults() {
    let mut c = controller();
    c.handle(HostEvent::LocationUnavailable.into(), 0.0);
    assert!(!c.territory().has_geolocation);
    assert_eq!(*c.territory(), Territory::default());
}

#[test]
fn intensity_and_chemistry_toggles() {
    let mut c = controller();
    assert_eq!(c.intensity(), DEFAULT_INTENSITY);
    for _ in 0..20 {
        c.handle(InputEvent::IntensityUp.into(), 0.0);
    }
    assert_eq!(c.intensity(), 1.0);
    for _ in 0..40 {
        c.handle(InputEvent::IntensityDown.into(), 0.0);
    }
    assert_eq!(c.intensity(), 0.0);

    assert!(c.chemistry_visible());
    c.handle(InputEvent::ToggleChemistry.into(), 0.0);
    assert!(!c.chemistry_visible());
}

#[test]
fn population_stays_in_range_across_resizes_and_weather() {
    let mut c = started_with_audio(0.0);
    let climates = [(35.0, 90.0, 18.0, 900.0), (-5.0, 10.0, 0.0, 1.0)];
    for (i, (t, h, w, s)) in climates.into_iter().enumerate() {
        c.handle(
            HostEvent::WeatherArrived(CurrentConditions {
                temperature_2m: Some(t),
                relative_humidity_2m: Some(h),
                wind_speed_10m: Some(w),
                shortwave_radiation: Some(s),
            })
            .into(),
            0.0,
        );
        c.handle(
            HostEvent::Resized {
                width: 300.0 + i as f32 * 900.0,
                height: 200.0 + i as f32 * 500.0,
            }
            .into(),
            0.0,
        );
        for f in 0..120 {
            c.frame(f as f64 / 60.0);
            let len = c.field().len();
            assert!((MIN_PARTICLES..=MAX_PARTICLES).contains(&len));
            assert_eq!(c.sprites().len(), len);
        }
    }
    assert_eq!(c.viewport(), Vec2::new(1200.0, 700.0));
}
