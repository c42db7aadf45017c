use crate::input::{command_for_key, SceneCommand};
use crate::{overlay, App};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn toggle_fullscreen(app: &App) {
    if app.document.fullscreen_element().is_some() {
        app.document.exit_fullscreen();
    } else {
        _ = app.container.request_fullscreen();
    }
}

pub(crate) fn handle_global_keydown(ev: &web::KeyboardEvent, app: &Rc<App>) {
    let Some(command) = command_for_key(&ev.key()) else {
        return;
    };
    match command {
        SceneCommand::Rebuild => {
            // A pinned seed would rebuild the same scene.
            app.config.borrow_mut().seed = None;
            log::info!("[keys] rebuild scene");
            crate::rebuild_scene(app);
        }
        SceneCommand::CycleTurtle => {
            let turtle = {
                let mut config = app.config.borrow_mut();
                config.turtle = config.turtle.next();
                config.turtle
            };
            log::info!("[keys] turtle={}", turtle.name());
            crate::rebuild_scene(app);
        }
        SceneCommand::ToggleStepMode => {
            let step = {
                let mut config = app.config.borrow_mut();
                config.physics_step = config.physics_step.toggled();
                config.physics_step
            };
            if let Some(scene) = app.slot.borrow().active() {
                scene
                    .frame_loop
                    .context()
                    .borrow_mut()
                    .animator
                    .set_step_mode(step);
            }
            log::info!("[keys] physics step={}", step.name());
        }
        SceneCommand::ToggleOverlay => {
            overlay::toggle(&app.document);
            ev.prevent_default();
        }
        SceneCommand::ToggleFullscreen => {
            toggle_fullscreen(app);
            ev.prevent_default();
        }
        SceneCommand::ExitFullscreen => {
            if app.document.fullscreen_element().is_some() {
                app.document.exit_fullscreen();
            }
        }
    }
}

pub(crate) fn wire_global_keydown(app: Rc<App>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &app);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
