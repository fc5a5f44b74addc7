//! What the animation needs from its environment.
//!
//! In the browser these are the DOM, `window` events and
//! `requestAnimationFrame`; tests drive the animation with a fake host.

use crate::canvas::{Canvas2d, Viewport};
use thiserror::Error;

/// Errors that can occur while talking to the host environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// No global window / document to attach to.
    #[error("host environment unavailable: {0}")]
    Unavailable(&'static str),

    /// Failed to create or insert the drawing surface.
    #[error("failed to create surface: {0}")]
    Surface(String),

    /// Failed to register an event listener.
    #[error("failed to subscribe to {event}: {reason}")]
    Subscribe { event: &'static str, reason: String },

    /// Failed to schedule the next animation frame.
    #[error("failed to schedule frame: {0}")]
    Schedule(String),
}

/// A drawing target the host created for the animation.
pub trait Surface: Canvas2d {
    /// Match the backing store to the viewport.
    fn set_size(&mut self, viewport: Viewport);
}

pub trait Host {
    type Surface: Surface;
    /// Handles for registered resize / pointer listeners; handed back to
    /// [`Host::unsubscribe`] on stop.
    type Listeners;

    fn viewport(&self) -> Viewport;

    /// Create a full-viewport, pointer-transparent surface behind the page
    /// content.
    fn create_surface(&mut self) -> Result<Self::Surface, HostError>;

    /// Detach the surface from the page. Must tolerate an already detached one.
    fn remove_surface(&mut self, surface: Self::Surface);

    /// Register viewport-resize and pointer-move listeners.
    fn subscribe(&mut self) -> Result<Self::Listeners, HostError>;

    fn unsubscribe(&mut self, listeners: Self::Listeners);

    /// Ask for [`crate::animation::Animation::tick`] to run on the next
    /// display refresh.
    fn request_frame(&mut self) -> Result<(), HostError>;
}

impl Surface for crate::canvas::Recording {
    fn set_size(&mut self, viewport: Viewport) {
        self.size = viewport;
    }
}
