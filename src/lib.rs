#![cfg(target_arch = "wasm32")]
use crate::camera::OrbitCamera;
use crate::core::{
    build_scene_model, Cadence, SceneAnimator, SceneConfig, SceneSlot, Ticker,
};
use crate::frame::{FrameContext, FrameLoop, InstantClock, LiveScene};
use crate::render::GpuState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod camera;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

/// Page-lifetime state shared by event handlers.
pub(crate) struct App {
    pub document: web::Document,
    pub container: web::Element,
    pub config: RefCell<SceneConfig>,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub slot: RefCell<SceneSlot<LiveScene>>,
    pub ambience: RefCell<SceneSlot<audio::AmbienceLoop>>,
}

fn wire_container_resize(app: &Rc<App>) {
    let app = app.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        if let Some(scene) = app.slot.borrow().active() {
            dom::sync_canvas_backing_size(&scene.canvas);
            app.camera
                .borrow_mut()
                .set_viewport(scene.canvas.width(), scene.canvas.height());
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Build the scene for `ticket`, or `None` if a newer rebuild was requested
/// while the GPU was being acquired.
async fn build_scene(app: &App, ticket: u64) -> anyhow::Result<Option<LiveScene>> {
    let config = app.config.borrow().clone();
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let model = build_scene_model(&config, &mut rng);

    let canvas = dom::create_canvas(&app.document, &app.container)?;
    app.camera
        .borrow_mut()
        .set_viewport(canvas.width(), canvas.height());
    let gpu = match GpuState::new(&canvas, &model).await {
        Ok(gpu) => gpu,
        Err(e) => {
            canvas.remove();
            return Err(e);
        }
    };
    if !app.slot.borrow().is_latest(ticket) {
        canvas.remove();
        return Ok(None);
    }

    log::info!(
        "[scene] built turtle={} seed={} parts={} meshes={} step={}",
        config.turtle.name(),
        seed,
        model.parts.len(),
        model.library.len(),
        config.physics_step.name()
    );
    let ctx = Rc::new(RefCell::new(FrameContext {
        animator: SceneAnimator::new(rng.gen(), config.physics_step),
        model,
        gpu: Some(gpu),
        camera: app.camera.clone(),
        canvas: canvas.clone(),
        ticker: Ticker::new(Cadence::EveryFrame),
        clock: InstantClock::new(),
        distortion_scale: config.distortion_scale,
    }));
    let frame_loop = FrameLoop::start(ctx);
    Ok(Some(LiveScene { canvas, frame_loop }))
}

/// Tear down the live scene and build a new one from the current config.
pub(crate) fn rebuild_scene(app: &Rc<App>) {
    // Free the old loop and GPU resources before acquiring new ones.
    let ticket = app.slot.borrow_mut().request_build();
    let app = app.clone();
    spawn_local(async move {
        match build_scene(&app, ticket).await {
            Ok(Some(scene)) => match app.slot.borrow_mut().install_if_latest(ticket, scene) {
                Some(generation) => {
                    log::info!("[scene] generation {} live", generation);
                    overlay::hide_loading(&app.document);
                }
                None => log::debug!("[scene] build {} superseded", ticket),
            },
            Ok(None) => log::debug!("[scene] build {} superseded", ticket),
            Err(e) => log::error!("scene build error: {:?}", e),
        }
    });
}

fn start_ambience(app: &App) -> anyhow::Result<()> {
    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    _ = audio_ctx.resume();
    let preset = app.config.borrow().ambience;
    let rig = audio::AmbienceRig::build(&audio_ctx, preset)
        .map_err(|_| anyhow::anyhow!("failed to build {} rig", preset.name()))?;
    let ambience = audio::AmbienceLoop::start(rig, preset)?;
    app.ambience.borrow_mut().install(ambience);
    Ok(())
}

fn wire_first_click_audio(app: &Rc<App>) {
    let app_click = app.clone();
    dom::add_click_listener(&app.document, move || {
        // Browsers only allow audio after a gesture; build it once.
        if app_click.ambience.borrow().generation() > 0 {
            return;
        }
        if let Err(e) = start_ambience(&app_click) {
            log::error!("audio init error: {:?}", e);
        }
        overlay::hide(&app_click.document);
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Trace).ok();
    log::info!("turtle-abyss starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container = document
        .get_element_by_id("scene-container")
        .ok_or_else(|| anyhow::anyhow!("missing #scene-container"))?;

    let config = SceneConfig::from_query(&dom::query_string());
    log::set_max_level(config.log_level.to_level_filter());
    log::info!(
        "[config] turtle={} ambience={} step={} debris={}",
        config.turtle.name(),
        config.ambience.name(),
        config.physics_step.name(),
        config.debris_count
    );

    let camera = Rc::new(RefCell::new(OrbitCamera::looking_at(
        constants::CAMERA_START_EYE,
        glam::Vec3::ZERO,
        1.0,
    )));
    let app = Rc::new(App {
        document,
        container,
        config: RefCell::new(config),
        camera,
        slot: RefCell::new(SceneSlot::new()),
        ambience: RefCell::new(SceneSlot::new()),
    });

    events::wire_orbit_controls(&app.container, app.camera.clone());
    events::wire_global_keydown(app.clone());
    wire_container_resize(&app);
    wire_first_click_audio(&app);

    rebuild_scene(&app);
    Ok(())
}
