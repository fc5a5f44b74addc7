//! Ambient particle background for web pages.
//!
//! A field of drifting points sized to the viewport, pushed away by the
//! cursor and joined by fading lines when close. The simulation and the
//! lifecycle are platform independent:
//! - [`field`] — population, motion and drawing of the particles.
//! - [`grid`] — pair discovery for the connective lines.
//! - [`animation`] — start/stop state machine and frame loop over a [`host::Host`].
//! - [`canvas`] — the 2D drawing interface and a recording implementation.
//!
//! On `wasm32` the crate exports a `ParticleBackground` class and the
//! `startAnimation` / `stopAnimation` functions backed by a `<canvas>`.

pub mod animation;
pub mod canvas;
pub mod config;
pub mod field;
pub mod grid;
pub mod host;
pub mod palette;
pub mod particle;

pub use animation::Animation;
pub use config::{FieldConfig, LinkStrategy};
pub use field::ParticleField;
pub use host::HostError;

#[cfg(target_arch = "wasm32")]
pub use wasm::{start_animation, stop_animation, ParticleBackground};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use crate::{Animation, FieldConfig, HostError, ParticleField};
    use rand::{rngs::SmallRng, SeedableRng};
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    mod host;
    mod render;

    use host::WebHost;

    impl From<HostError> for JsValue {
        fn from(e: HostError) -> Self {
            JsValue::from_str(&e.to_string())
        }
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        Ok(())
    }

    /// Background animation bound to the current page.
    #[wasm_bindgen]
    pub struct ParticleBackground {
        inner: Rc<RefCell<Animation<WebHost>>>,
    }

    #[wasm_bindgen]
    impl ParticleBackground {
        #[wasm_bindgen(constructor)]
        pub fn new() -> Result<ParticleBackground, JsValue> {
            let window = web_sys::window().ok_or(HostError::Unavailable("window"))?;
            let document = window.document().ok_or(HostError::Unavailable("document"))?;

            let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
            let field = ParticleField::new(FieldConfig::default(), SmallRng::seed_from_u64(seed))
                .map_err(|e| JsValue::from_str(&e.to_string()))?;

            let inner = Rc::new_cyclic(|weak| {
                RefCell::new(Animation::new(WebHost::new(window, document, weak.clone()), field))
            });
            Ok(ParticleBackground { inner })
        }

        /// Returns `false` if the animation was already running.
        pub fn start(&self) -> Result<bool, JsValue> {
            Ok(self.inner.borrow_mut().start()?)
        }

        /// Returns `false` if the animation was not running.
        pub fn stop(&self) -> bool {
            self.inner.borrow_mut().stop()
        }

        #[wasm_bindgen(js_name = isRunning)]
        pub fn is_running(&self) -> bool {
            self.inner.borrow().is_running()
        }

        #[wasm_bindgen(js_name = particleCount)]
        pub fn particle_count(&self) -> usize {
            self.inner.borrow().field().particles().len()
        }
    }

    impl Drop for ParticleBackground {
        fn drop(&mut self) {
            // listeners would otherwise outlive their closures
            if let Ok(mut animation) = self.inner.try_borrow_mut() {
                animation.stop();
            }
        }
    }

    thread_local! {
        // The page's single background, used by the free functions below.
        static PAGE: RefCell<Option<ParticleBackground>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(js_name = startAnimation)]
    pub fn start_animation() -> Result<(), JsValue> {
        PAGE.with(|page| {
            let mut page = page.borrow_mut();
            if page.is_none() {
                *page = Some(ParticleBackground::new()?);
            }
            if let Some(bg) = page.as_ref() {
                bg.start()?;
            }
            Ok(())
        })
    }

    #[wasm_bindgen(js_name = stopAnimation)]
    pub fn stop_animation() {
        PAGE.with(|page| {
            if let Some(bg) = page.borrow().as_ref() {
                bg.stop();
            }
        });
    }
}
