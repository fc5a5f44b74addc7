use super::render::{describe, CanvasSurface};
use crate::animation::Animation;
use crate::canvas::Viewport;
use crate::host::{Host, HostError};
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, MouseEvent, Window};

type SharedAnimation = Weak<RefCell<Animation<WebHost>>>;

/// Browser host: DOM canvas, `window` events and `requestAnimationFrame`.
///
/// Callbacks reach the animation through a weak reference so the closures
/// never keep it alive on their own.
pub struct WebHost {
    window: Window,
    document: Document,
    animation: SharedAnimation,
    // Created once and reused for every frame request.
    frame: Closure<dyn FnMut()>,
    frame_id: Option<i32>,
}

pub struct WebListeners {
    resize: Closure<dyn FnMut()>,
    pointer: Closure<dyn FnMut(MouseEvent)>,
}

impl WebHost {
    pub fn new(window: Window, document: Document, animation: SharedAnimation) -> Self {
        let frame = {
            let animation = animation.clone();
            Closure::wrap(Box::new(move || {
                with_animation(&animation, "frame", Animation::tick);
            }) as Box<dyn FnMut()>)
        };
        Self {
            window,
            document,
            animation,
            frame,
            frame_id: None,
        }
    }
}

impl Drop for WebHost {
    fn drop(&mut self) {
        // the frame closure dies with us, so the browser must not call it
        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("failed to cancel animation frame: {}", describe(&e));
            }
        }
    }
}

impl Host for WebHost {
    type Surface = CanvasSurface;
    type Listeners = WebListeners;

    fn viewport(&self) -> Viewport {
        let px = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
        };
        Viewport::new(px(self.window.inner_width()), px(self.window.inner_height()))
    }

    fn create_surface(&mut self) -> Result<CanvasSurface, HostError> {
        CanvasSurface::create(&self.document)
    }

    fn remove_surface(&mut self, surface: CanvasSurface) {
        surface.detach();
    }

    fn subscribe(&mut self) -> Result<WebListeners, HostError> {
        let resize = {
            let animation = self.animation.clone();
            Closure::wrap(Box::new(move || {
                with_animation(&animation, "resize", Animation::on_resize);
            }) as Box<dyn FnMut()>)
        };
        self.window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            .map_err(|e| HostError::Subscribe {
                event: "resize",
                reason: describe(&e),
            })?;

        let pointer = {
            let animation = self.animation.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                with_animation(&animation, "pointer", |a| {
                    a.on_pointer_move(event.client_x() as f32, event.client_y() as f32)
                });
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        if let Err(e) = self
            .window
            .add_event_listener_with_callback("mousemove", pointer.as_ref().unchecked_ref())
        {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            {
                log::warn!("failed to roll back resize listener: {}", describe(&e));
            }
            return Err(HostError::Subscribe {
                event: "mousemove",
                reason: describe(&e),
            });
        }

        Ok(WebListeners { resize, pointer })
    }

    fn unsubscribe(&mut self, listeners: WebListeners) {
        for (event, f) in [
            ("resize", listeners.resize.as_ref()),
            ("mousemove", listeners.pointer.as_ref()),
        ] {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback(event, f.unchecked_ref())
            {
                log::warn!("failed to remove {event} listener: {}", describe(&e));
            }
        }
    }

    fn request_frame(&mut self) -> Result<(), HostError> {
        let id = self
            .window
            .request_animation_frame(self.frame.as_ref().unchecked_ref())
            .map_err(|e| HostError::Schedule(describe(&e)))?;
        self.frame_id = Some(id);
        Ok(())
    }
}

/// Run `f` on the animation if it is still alive and not already borrowed.
fn with_animation(animation: &SharedAnimation, what: &str, f: impl FnOnce(&mut Animation<WebHost>)) {
    let Some(animation) = animation.upgrade() else {
        return;
    };
    match animation.try_borrow_mut() {
        Ok(mut animation) => f(&mut *animation),
        Err(_) => log::warn!("skipped re-entrant {what} callback"),
    };
}
