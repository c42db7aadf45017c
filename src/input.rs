use glam::Vec2;
use web_sys as web;

/// Pointer drag in progress over the canvas.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: Vec2,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, at: Vec2) {
        self.active = true;
        self.pointer_id = pointer_id;
        self.last = at;
    }

    /// Movement since the previous call, or `None` if not dragging with this pointer.
    pub fn drag_to(&mut self, pointer_id: i32, at: Vec2) -> Option<Vec2> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        Some(delta)
    }

    pub fn end(&mut self, pointer_id: i32) -> bool {
        if self.active && pointer_id == self.pointer_id {
            self.active = false;
            return true;
        }
        false
    }
}

/// Actions bound to the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneCommand {
    Rebuild,
    CycleTurtle,
    ToggleStepMode,
    ToggleOverlay,
    ToggleFullscreen,
    ExitFullscreen,
}

#[inline]
pub fn command_for_key(key: &str) -> Option<SceneCommand> {
    match key {
        "r" | "R" => Some(SceneCommand::Rebuild),
        "t" | "T" => Some(SceneCommand::CycleTurtle),
        "p" | "P" => Some(SceneCommand::ToggleStepMode),
        "h" | "H" => Some(SceneCommand::ToggleOverlay),
        "Enter" => Some(SceneCommand::ToggleFullscreen),
        "Escape" => Some(SceneCommand::ExitFullscreen),
        _ => None,
    }
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_client_px(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}
