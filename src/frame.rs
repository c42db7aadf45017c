use crate::camera::OrbitCamera;
use crate::core::{Clock, GroupPoses, SceneAnimator, SceneModel, Teardown, Ticker};
use crate::render::{FrameInputs, GpuState};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Seconds since the clock was created.
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

pub struct FrameContext {
    pub animator: SceneAnimator,
    pub model: SceneModel,
    pub gpu: Option<GpuState>,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub canvas: web::HtmlCanvasElement,
    pub ticker: Ticker,
    pub clock: InstantClock,
    pub distortion_scale: f32,
}

impl FrameContext {
    /// Advance and draw one frame. Returns false once the ticker has stopped.
    pub fn frame(&mut self) -> bool {
        let Some(tick) = self.ticker.tick(self.clock.now_secs()) else {
            return false;
        };
        let t = tick.elapsed;
        let update = self.animator.update(t);
        if let Some(snap) = update.snap {
            log::debug!(
                "[snap] t={:.2} creature=({:.2},{:.2}) kick=({:.2},{:.2}) spin={:.2}",
                t,
                snap.creature_x,
                snap.creature_z,
                snap.figure_velocity.x,
                snap.figure_velocity.y,
                snap.spin
            );
        }
        if update.contact && self.animator.ragdoll.velocity.y > 0.5 {
            log::debug!("[physics] bounce vy={:.3}", self.animator.ragdoll.velocity.y);
        }

        let poses = GroupPoses::from_animator(&self.animator, &self.model, t);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
            let (view_proj, eye) = {
                let cam = self.camera.borrow();
                (cam.view_proj(), cam.eye())
            };
            let inputs = FrameInputs {
                view_proj,
                eye,
                poses: &poses,
                time: t as f32,
                distortion_scale: self.distortion_scale,
            };
            match gpu.render(&inputs) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
        true
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(tick: &TickClosure) -> Option<i32> {
    let window = web::window()?;
    let cb = tick.borrow();
    window
        .request_animation_frame(cb.as_ref()?.as_ref().unchecked_ref())
        .ok()
}

/// requestAnimationFrame loop that can be cancelled.
pub struct FrameLoop {
    ctx: Rc<RefCell<FrameContext>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: TickClosure,
}

impl FrameLoop {
    pub fn start(ctx: Rc<RefCell<FrameContext>>) -> Self {
        {
            let mut c = ctx.borrow_mut();
            let now = c.clock.now_secs();
            c.ticker.start(now);
        }
        let tick: TickClosure = Rc::new(RefCell::new(None));
        let raf_id = Rc::new(Cell::new(None));

        let tick_clone = tick.clone();
        let raf_clone = raf_id.clone();
        let ctx_tick = ctx.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            raf_clone.set(None);
            if !ctx_tick.borrow_mut().frame() {
                return;
            }
            raf_clone.set(request_frame(&tick_clone));
        }) as Box<dyn FnMut()>));
        raf_id.set(request_frame(&tick));

        Self { ctx, raf_id, tick }
    }

    pub fn context(&self) -> &Rc<RefCell<FrameContext>> {
        &self.ctx
    }

    pub fn cancel(&mut self) {
        self.ctx.borrow_mut().ticker.cancel();
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // Drop the closure; it holds a handle to itself.
        self.tick.borrow_mut().take();
    }
}

/// One constructed scene: its canvas and the loop drawing into it.
pub struct LiveScene {
    pub canvas: web::HtmlCanvasElement,
    pub frame_loop: FrameLoop,
}

impl Teardown for LiveScene {
    fn teardown(&mut self) {
        self.frame_loop.cancel();
        self.frame_loop.context().borrow_mut().gpu = None;
        self.canvas.remove();
        log::info!("[scene] torn down");
    }
}
