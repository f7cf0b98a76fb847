use crate::events::SharedQueue;
use field_core::{
    pink_noise, AudioCommand, ModulationConfig, ToneTargets, CARRIER_AMP_RAMP_SEC,
    CARRIER_FREQ_RAMP_SEC, COMPRESSOR_ATTACK_SEC, COMPRESSOR_RATIO, COMPRESSOR_RELEASE_SEC,
    COMPRESSOR_THRESHOLD_DB, FADE_IN_CARRIER_AMP, FADE_SEC, HostEvent, NOISE_AMP_RAMP_SEC,
    PINK_NOISE_SECONDS, PINK_NOISE_SEED, PROXY_ATTACK_SEC, PROXY_GAIN_RAMP_SEC,
    PROXY_RETUNE_RAMP_SEC, SUB_AMP_RAMP_SEC, SUB_FREQ_RAMP_SEC,
};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> anyhow::Result<web::GainNode> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            anyhow::bail!("{} GainNode error", label)
        }
    }
}

fn create_sine(
    audio_ctx: &web::AudioContext,
    hz: f32,
    label: &str,
) -> anyhow::Result<web::OscillatorNode> {
    let osc = web::OscillatorNode::new(audio_ctx).map_err(|e| {
        log::error!("{} OscillatorNode error: {:?}", label, e);
        anyhow::anyhow!("{} OscillatorNode error", label)
    })?;
    osc.set_type(web::OscillatorType::Sine);
    osc.frequency().set_value(hz);
    Ok(osc)
}

/// Move `param` to `value` linearly over `secs`, starting from where it is now.
fn ramp(param: &web::AudioParam, value: f32, now: f64, secs: f64) {
    let _ = param.cancel_scheduled_values(now);
    let _ = param.set_value_at_time(param.value(), now);
    let _ = param.linear_ramp_to_value_at_time(value, now + secs);
}

struct Proxy {
    osc: web::OscillatorNode,
    gain: web::GainNode,
}

/// Tone layer and proxy nodes. Built once, after the context is running.
pub struct ToneGraph {
    master: web::GainNode,
    carrier: web::OscillatorNode,
    carrier_gain: web::GainNode,
    sub: web::OscillatorNode,
    sub_gain: web::GainNode,
    noise_gain: web::GainNode,
    proxy: Option<Proxy>,
}

pub fn build_graph(
    audio_ctx: &web::AudioContext,
    master_level: f32,
    tone_hz: f32,
    sub_hz: f32,
) -> anyhow::Result<ToneGraph> {
    let master = create_gain(audio_ctx, master_level, "Master")?;
    let comp = web::DynamicsCompressorNode::new(audio_ctx).map_err(|e| {
        log::error!("DynamicsCompressorNode error: {:?}", e);
        anyhow::anyhow!("DynamicsCompressorNode error")
    })?;
    comp.threshold().set_value(COMPRESSOR_THRESHOLD_DB);
    comp.ratio().set_value(COMPRESSOR_RATIO);
    comp.attack().set_value(COMPRESSOR_ATTACK_SEC);
    comp.release().set_value(COMPRESSOR_RELEASE_SEC);
    let _ = master.connect_with_audio_node(&comp);
    let _ = comp.connect_with_audio_node(&audio_ctx.destination());

    let carrier = create_sine(audio_ctx, tone_hz, "carrier")?;
    let carrier_gain = create_gain(audio_ctx, 0.0, "carrier")?;
    let _ = carrier.connect_with_audio_node(&carrier_gain);
    let _ = carrier_gain.connect_with_audio_node(&master);

    let sub = create_sine(audio_ctx, sub_hz, "sub")?;
    let sub_gain = create_gain(audio_ctx, 0.0, "sub")?;
    let _ = sub.connect_with_audio_node(&sub_gain);
    let _ = sub_gain.connect_with_audio_node(&master);

    let noise_gain = create_gain(audio_ctx, 0.0, "noise")?;
    {
        let sr = audio_ctx.sample_rate();
        let len = (sr * PINK_NOISE_SECONDS) as u32;
        let mut samples = pink_noise(len as usize, PINK_NOISE_SEED);
        let buffer = audio_ctx
            .create_buffer(1, len, sr)
            .map_err(|e| anyhow::anyhow!(format!("AudioBuffer error: {:?}", e)))?;
        let _ = buffer.copy_to_channel(&mut samples, 0);
        let src = audio_ctx
            .create_buffer_source()
            .map_err(|e| anyhow::anyhow!(format!("AudioBufferSourceNode error: {:?}", e)))?;
        src.set_buffer(Some(&buffer));
        src.set_loop(true);
        let _ = src.connect_with_audio_node(&noise_gain);
        let _ = noise_gain.connect_with_audio_node(&master);
        let _ = src.start();
    }

    let _ = carrier.start();
    let _ = sub.start();
    log::info!("[audio] graph built tone={:.1}Hz sub={:.1}Hz", tone_hz, sub_hz);

    Ok(ToneGraph {
        master,
        carrier,
        carrier_gain,
        sub,
        sub_gain,
        noise_gain,
        proxy: None,
    })
}

impl ToneGraph {
    fn fade_in(&self, now: f64) {
        ramp(&self.carrier_gain.gain(), FADE_IN_CARRIER_AMP, now, FADE_SEC);
    }

    fn fade_out(&self, now: f64) {
        for g in [&self.carrier_gain, &self.sub_gain, &self.noise_gain] {
            ramp(&g.gain(), 0.0, now, FADE_SEC);
        }
    }

    fn tone(&self, t: &ToneTargets, now: f64) {
        ramp(&self.carrier.frequency(), t.carrier_hz, now, CARRIER_FREQ_RAMP_SEC);
        ramp(&self.sub.frequency(), t.sub_hz, now, SUB_FREQ_RAMP_SEC);
        ramp(&self.carrier_gain.gain(), t.carrier_amp, now, CARRIER_AMP_RAMP_SEC);
        ramp(&self.sub_gain.gain(), t.sub_amp, now, SUB_AMP_RAMP_SEC);
        ramp(&self.noise_gain.gain(), t.noise_amp, now, NOISE_AMP_RAMP_SEC);
    }

    fn start_proxy(&mut self, audio_ctx: &web::AudioContext, config: &ModulationConfig, now: f64) {
        self.stop_proxy(now);
        let osc = match create_sine(audio_ctx, config.carrier_hz, "proxy") {
            Ok(o) => o,
            Err(_) => return,
        };
        let gain = match create_gain(audio_ctx, 0.0, "proxy") {
            Ok(g) => g,
            Err(_) => return,
        };
        let _ = osc.connect_with_audio_node(&gain);
        if gain.connect_with_audio_node(&self.master).is_err() {
            let _ = gain.connect_with_audio_node(&audio_ctx.destination());
        }
        ramp(&gain.gain(), config.base_amplitude, now, PROXY_ATTACK_SEC);
        let _ = osc.start();
        self.proxy = Some(Proxy { osc, gain });
    }

    fn stop_proxy(&mut self, now: f64) {
        if let Some(p) = self.proxy.take() {
            ramp(&p.gain.gain(), 0.0, now, FADE_SEC);
            let _ = p.osc.stop_with_when(now + FADE_SEC);
        }
    }
}

/// Owns the context and, once built, the graph. Applies engine commands.
pub struct AudioOutput {
    pub ctx: web::AudioContext,
    master_level: f32,
    graph: Option<ToneGraph>,
}

impl AudioOutput {
    pub fn new(ctx: web::AudioContext, master_level: f32) -> Self {
        Self {
            ctx,
            master_level,
            graph: None,
        }
    }

    pub fn state_label(&self) -> &'static str {
        match self.ctx.state() {
            web::AudioContextState::Suspended => "suspended",
            web::AudioContextState::Running => "running",
            web::AudioContextState::Closed => "closed",
            _ => "unknown",
        }
    }

    pub fn apply(&mut self, commands: &[AudioCommand]) {
        let now = self.ctx.current_time();
        for cmd in commands {
            if let AudioCommand::BuildGraph { tone_hz, sub_hz } = *cmd {
                match build_graph(&self.ctx, self.master_level, tone_hz, sub_hz) {
                    Ok(g) => self.graph = Some(g),
                    Err(e) => log::error!("[audio] graph error: {:?}", e),
                }
                continue;
            }
            let Some(graph) = self.graph.as_mut() else {
                continue;
            };
            match cmd {
                AudioCommand::BuildGraph { .. } => {}
                AudioCommand::FadeIn => graph.fade_in(now),
                AudioCommand::FadeOut => graph.fade_out(now),
                AudioCommand::StartProxy(config) => graph.start_proxy(&self.ctx, config, now),
                AudioCommand::StopProxy => graph.stop_proxy(now),
                AudioCommand::Tone(t) => graph.tone(t, now),
                AudioCommand::ProxyGain(g) => {
                    if let Some(p) = graph.proxy.as_ref() {
                        ramp(&p.gain.gain(), *g, now, PROXY_GAIN_RAMP_SEC);
                    }
                }
                AudioCommand::RetuneProxy { carrier_hz } => {
                    if let Some(p) = graph.proxy.as_ref() {
                        ramp(&p.osc.frequency(), *carrier_hz, now, PROXY_RETUNE_RAMP_SEC);
                    }
                }
            }
        }
    }

    /// Resume the context after a user gesture and report the outcome.
    pub fn resume(&self, queue: &SharedQueue) {
        if self.ctx.state() == web::AudioContextState::Running {
            queue.borrow_mut().push(HostEvent::AudioResumed);
            return;
        }
        let promise: js_sys::Promise = match self.ctx.resume() {
            Ok(p) => p,
            Err(e) => {
                log::warn!("[audio] resume error: {:?}", e);
                queue.borrow_mut().push(HostEvent::AudioResumeFailed);
                return;
            }
        };
        let queue = queue.clone();
        spawn_local(async move {
            let ev = match JsFuture::from(promise).await {
                Ok(_) => HostEvent::AudioResumed,
                Err(e) => {
                    log::warn!("[audio] resume rejected: {:?}", e);
                    HostEvent::AudioResumeFailed
                }
            };
            queue.borrow_mut().push(ev);
        });
    }
}
