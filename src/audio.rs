use crate::core::{AmbienceModulator, AmbiencePreset, AudioParams, Clock, Teardown};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Audio time as the clock for the ambience loop.
pub struct AudioClock(pub web::AudioContext);

impl Clock for AudioClock {
    fn now_secs(&self) -> f64 {
        self.0.current_time()
    }
}

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

fn create_oscillator(
    audio_ctx: &web::AudioContext,
    kind: web::OscillatorType,
    frequency_hz: f32,
) -> Result<web::OscillatorNode, ()> {
    let osc = web::OscillatorNode::new(audio_ctx)
        .map_err(|e| {
            log::error!("OscillatorNode error: {:?}", e);
        })
        .map_err(|_| ())?;
    osc.set_type(kind);
    osc.frequency().set_value(frequency_hz);
    Ok(osc)
}

/// Oscillators -> low-pass -> gain -> speakers for one preset.
pub struct AmbienceRig {
    audio_ctx: web::AudioContext,
    oscillators: Vec<web::OscillatorNode>,
    gain: web::GainNode,
}

impl AmbienceRig {
    pub fn build(audio_ctx: &web::AudioContext, preset: AmbiencePreset) -> Result<Self, ()> {
        let start = crate::core::params_at(preset, audio_ctx.current_time());

        let filter = web::BiquadFilterNode::new(audio_ctx)
            .map_err(|e| {
                log::error!("BiquadFilterNode error: {:?}", e);
            })
            .map_err(|_| ())?;
        filter.set_type(web::BiquadFilterType::Lowpass);
        filter.frequency().set_value(preset.cutoff_hz());
        let gain = create_gain(audio_ctx, start.gain, "Ambience")?;

        let kinds = [web::OscillatorType::Sine, web::OscillatorType::Triangle];
        let mut oscillators = Vec::with_capacity(preset.oscillator_count());
        for (i, freq) in start.frequencies_hz.iter().enumerate() {
            let osc = create_oscillator(audio_ctx, kinds[i.min(kinds.len() - 1)], *freq)?;
            _ = osc.connect_with_audio_node(&filter);
            oscillators.push(osc);
        }
        _ = filter.connect_with_audio_node(&gain);
        _ = gain.connect_with_audio_node(&audio_ctx.destination());
        for osc in &oscillators {
            _ = osc.start();
        }
        log::info!(
            "[audio] {} rig started with {} oscillator(s)",
            preset.name(),
            oscillators.len()
        );
        Ok(Self {
            audio_ctx: audio_ctx.clone(),
            oscillators,
            gain,
        })
    }

    /// Write the tick's values at the context's current time.
    pub fn apply(&self, params: &AudioParams) {
        let now = self.audio_ctx.current_time();
        for (osc, freq) in self.oscillators.iter().zip(params.frequencies_hz.iter()) {
            _ = osc.frequency().set_value_at_time(*freq, now);
        }
        _ = self.gain.gain().set_value_at_time(params.gain, now);
    }
}

/// The running ambience loop: a `setInterval` gated by the modulator's ticker.
pub struct AmbienceLoop {
    modulator: Rc<RefCell<AmbienceModulator>>,
    interval_id: Option<i32>,
    _closure: Closure<dyn FnMut()>,
}

impl AmbienceLoop {
    pub fn start(rig: AmbienceRig, preset: AmbiencePreset) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let clock = AudioClock(rig.audio_ctx.clone());
        let modulator = Rc::new(RefCell::new(AmbienceModulator::new(preset)));
        let period_ms = modulator
            .borrow()
            .cadence()
            .interval_ms()
            .ok_or_else(|| anyhow::anyhow!("ambience needs an interval cadence"))?;
        modulator.borrow_mut().start(clock.now_secs());

        let modulator_tick = modulator.clone();
        let closure = Closure::wrap(Box::new(move || {
            let params = modulator_tick.borrow_mut().poll(clock.now_secs());
            if let Some(params) = params {
                rig.apply(&params);
            }
        }) as Box<dyn FnMut()>);
        let interval_id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            )
            .map_err(|e| anyhow::anyhow!("setInterval failed: {:?}", e))?;
        Ok(Self {
            modulator,
            interval_id: Some(interval_id),
            _closure: closure,
        })
    }

    pub fn cancel(&mut self) {
        self.modulator.borrow_mut().cancel();
        if let (Some(id), Some(w)) = (self.interval_id.take(), web::window()) {
            w.clear_interval_with_handle(id);
        }
    }
}

impl Teardown for AmbienceLoop {
    fn teardown(&mut self) {
        self.cancel();
    }
}

impl Drop for AmbienceLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
