//! Start/stop lifecycle and the frame loop.

use crate::field::ParticleField;
use crate::host::{Host, HostError, Surface};
use glam::Vec2;

enum State<S, L> {
    Stopped,
    Running { surface: S, listeners: L },
}

/// One page-level background animation.
///
/// Transitions are guarded: `start` while running and `stop` while stopped
/// are both no-ops, and `stop` releases everything `start` acquired.
pub struct Animation<H: Host> {
    host: H,
    field: ParticleField,
    state: State<H::Surface, H::Listeners>,
    /// A frame callback is scheduled and has not run yet.
    frame_pending: bool,
    frames: u64,
}

impl<H: Host> Animation<H> {
    /// Inert until [`Animation::start`]; the field is populated on start.
    pub fn new(host: H, field: ParticleField) -> Self {
        Self {
            host,
            field,
            state: State::Stopped,
            frame_pending: false,
            frames: 0,
        }
    }

    /// Create the surface, seed particles, subscribe to events and begin the
    /// frame loop. Returns `Ok(false)` if already running.
    pub fn start(&mut self) -> Result<bool, HostError> {
        if self.is_running() {
            log::warn!("particle animation already running");
            return Ok(false);
        }

        let mut surface = self.host.create_surface()?;
        let viewport = self.host.viewport();
        surface.set_size(viewport);
        self.field.resize(viewport);

        let listeners = match self.host.subscribe() {
            Ok(listeners) => listeners,
            Err(e) => {
                self.host.remove_surface(surface);
                return Err(e);
            }
        };
        self.state = State::Running { surface, listeners };

        // a frame left over from a previous run picks the loop back up
        if !self.frame_pending {
            if let Err(e) = self.host.request_frame() {
                self.stop();
                return Err(e);
            }
            self.frame_pending = true;
        }

        log::info!(
            "particle animation started: {}x{}, {} particles",
            viewport.width,
            viewport.height,
            self.field.particles().len()
        );
        Ok(true)
    }

    /// Unsubscribe listeners and remove the surface. Returns `false` if the
    /// animation was not running.
    pub fn stop(&mut self) -> bool {
        match std::mem::replace(&mut self.state, State::Stopped) {
            State::Stopped => false,
            State::Running { surface, listeners } => {
                self.host.unsubscribe(listeners);
                self.host.remove_surface(surface);
                log::info!("particle animation stopped after {} frames", self.frames);
                true
            }
        }
    }

    /// Viewport changed: resize the surface and rebuild the population.
    pub fn on_resize(&mut self) {
        let State::Running { surface, .. } = &mut self.state else {
            return;
        };
        let viewport = self.host.viewport();
        surface.set_size(viewport);
        self.field.resize(viewport);
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.field.set_pointer(Vec2::new(x, y));
    }

    /// Frame callback. Draws one frame and reschedules while running; once
    /// stopped it returns without touching the surface. If the next frame
    /// cannot be scheduled the animation stops, so a later `start` begins a
    /// fresh loop.
    pub fn tick(&mut self) {
        self.frame_pending = false;
        let State::Running { surface, .. } = &mut self.state else {
            return;
        };

        self.field.frame(surface);
        self.frames += 1;

        match self.host.request_frame() {
            Ok(()) => self.frame_pending = true,
            Err(e) => {
                log::error!("particle animation loop ended: {e}");
                self.stop();
            }
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// Frames drawn since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn surface(&self) -> Option<&H::Surface> {
        match &self.state {
            State::Running { surface, .. } => Some(surface),
            State::Stopped => None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
