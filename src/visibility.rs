use crate::delayable::DelayableState;
use crate::{Config, Error};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::debug;

/// Grace period before controls hide once pointer activity stops.
pub const DEFAULT_GRACE: Duration = Duration::from_millis(2000);

/// Shows the controls immediately on pointer activity and hides them after a
/// grace period without any.
///
/// Moving the pointer while the controls are visible restarts the grace
/// period instead of stacking hide timers. Controls start hidden.
#[derive(Debug)]
pub struct ControlVisibilityController {
    visible: DelayableState<bool>,
    grace: Duration,
}

impl ControlVisibilityController {
    /// Creates a controller bound to the tokio runtime of the caller.
    pub fn new() -> Result<Self, Error> {
        Ok(ControlVisibilityController {
            visible: DelayableState::new(false)?,
            grace: DEFAULT_GRACE,
        })
    }

    /// Creates a controller whose hide timers run on `runtime`.
    pub fn with_handle(runtime: Handle) -> Self {
        ControlVisibilityController {
            visible: DelayableState::with_handle(false, runtime),
            grace: DEFAULT_GRACE,
        }
    }

    /// Creates a controller using the hide delay from `config`.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Ok(Self::new()?.with_grace(config.hide_delay))
    }

    /// Sets the delay between the last activity and hiding the controls.
    pub fn with_grace(self, grace: Duration) -> Self {
        ControlVisibilityController { grace, ..self }
    }

    #[inline(always)]
    pub fn grace(&self) -> Duration {
        self.grace
    }

    pub fn on_pointer_enter(&mut self) {
        debug!("pointer entered, showing controls");
        self.visible.set(true, Duration::ZERO);
    }

    pub fn on_pointer_leave(&mut self) {
        debug!(message = "pointer left, hiding controls", grace = ?self.grace);
        self.visible.set(false, self.grace);
    }

    /// Shows the controls and restarts the hide countdown.
    pub fn on_pointer_move(&mut self) {
        self.visible.set(true, Duration::ZERO);
        self.visible.set(false, self.grace);
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Cancels any pending hide. Must be called when the owner goes away;
    /// dropping the controller does the same.
    pub fn dispose(&mut self) {
        debug!("disposing control visibility");
        self.visible.cancel_pending();
    }

    /// Receive every visibility change, e.g. to schedule a redraw.
    pub fn subscribe(&self) -> kanal::Receiver<bool> {
        self.visible.subscribe()
    }
}
