use crate::camera::OrbitCamera;
use crate::input::{self, DragState};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Drag to orbit and wheel to zoom, attached once to the canvas container so
/// rebuilt canvases keep working.
pub fn wire_orbit_controls(container: &web::Element, camera: Rc<RefCell<OrbitCamera>>) {
    let drag = Rc::new(RefCell::new(DragState::default()));
    wire_pointerdown(container, &drag);
    wire_pointermove(container, &drag, &camera);
    wire_pointerup(container, &drag);
    wire_wheel(container, &camera);
}

fn listen<E: FromWasmAbi + 'static>(
    target: &web::Element,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(container: &web::Element, drag: &Rc<RefCell<DragState>>) {
    let drag = drag.clone();
    let target = container.clone();
    listen(container, "pointerdown", move |ev: web::PointerEvent| {
        drag.borrow_mut()
            .begin(ev.pointer_id(), input::pointer_client_px(&ev));
        _ = target.set_pointer_capture(ev.pointer_id());
    });
}

fn wire_pointermove(
    container: &web::Element,
    drag: &Rc<RefCell<DragState>>,
    camera: &Rc<RefCell<OrbitCamera>>,
) {
    let drag = drag.clone();
    let camera = camera.clone();
    listen(container, "pointermove", move |ev: web::PointerEvent| {
        let delta = drag
            .borrow_mut()
            .drag_to(ev.pointer_id(), input::pointer_client_px(&ev));
        if let Some(Vec2 { x, y }) = delta {
            camera.borrow_mut().orbit(x, y);
        }
    });
}

fn wire_pointerup(container: &web::Element, drag: &Rc<RefCell<DragState>>) {
    for event in ["pointerup", "pointercancel"] {
        let drag = drag.clone();
        let target = container.clone();
        listen(container, event, move |ev: web::PointerEvent| {
            if drag.borrow_mut().end(ev.pointer_id()) {
                _ = target.release_pointer_capture(ev.pointer_id());
            }
        });
    }
}

fn wire_wheel(container: &web::Element, camera: &Rc<RefCell<OrbitCamera>>) {
    let camera = camera.clone();
    listen(container, "wheel", move |ev: web::WheelEvent| {
        camera.borrow_mut().zoom(ev.delta_y() as f32);
        ev.prevent_default();
    });
}
