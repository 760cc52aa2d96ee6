//! Two-state render loop.
//!
//! The loop stays `Running` until the window reports a close request, then
//! becomes `Terminated` for good. Every other event is ignored. Drawing is
//! gated on the state, so no frame is issued after termination.

use log::info;
use winit::event::WindowEvent;

/// Where the loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Frames are drawn.
    #[default]
    Running,
    /// The window was closed; nothing else is drawn.
    Terminated,
}

/// Tracks [`LoopState`] and counts the frames drawn.
#[derive(Debug, Default)]
pub struct FrameLoop {
    state: LoopState,
    frames: u64,
}

impl FrameLoop {
    /// A running loop with no frames drawn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one window event. Only `CloseRequested` has an effect.
    pub fn observe(&mut self, event: &WindowEvent) {
        if matches!(event, WindowEvent::CloseRequested) {
            self.terminate();
        }
    }

    /// Move to [`LoopState::Terminated`].
    pub fn terminate(&mut self) {
        if self.state == LoopState::Running {
            info!("close requested after {} frames", self.frames);
            self.state = LoopState::Terminated;
        }
    }

    /// Run `draw` if the loop is still running.
    ///
    /// Returns `Ok(true)` when a frame was drawn and `Ok(false)` once
    /// terminated.
    ///
    /// # Errors
    ///
    /// Propagates the error from `draw`; the frame is not counted.
    pub fn frame<E>(&mut self, draw: impl FnOnce() -> Result<(), E>) -> Result<bool, E> {
        if self.state == LoopState::Terminated {
            return Ok(false);
        }
        draw()?;
        self.frames += 1;
        Ok(true)
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Whether frames are still being drawn.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Frames drawn so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
