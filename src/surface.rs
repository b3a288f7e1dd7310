use std::time::Duration;
use tracing::info;

/// A seek request against the media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seek {
    /// Jump to an absolute position.
    To(Duration),
    /// Move forward from the current position.
    Forward(Duration),
    /// Move backward from the current position.
    Backward(Duration),
}

impl From<Duration> for Seek {
    fn from(t: Duration) -> Self {
        Seek::To(t)
    }
}

impl Seek {
    /// Resolve the request against the current position, clamped into
    /// `[0, duration]`.
    ///
    /// Out of range requests are clamped, never rejected. Media reporting a
    /// zero duration (live or not yet loaded) always resolves to zero.
    pub fn resolve(self, position: Duration, duration: Duration) -> Duration {
        let target = match self {
            Seek::To(t) => t,
            Seek::Forward(step) => position.saturating_add(step),
            Seek::Backward(step) => position.saturating_sub(step),
        };
        target.min(duration)
    }
}

/// Which optional controls the media surface can back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Capabilities {
    pub fullscreen: bool,
    pub picture_in_picture: bool,
}

/// The host's media element.
///
/// Decoding, rendering, seeking, fullscreen and picture-in-picture all happen
/// on the host side. Failures are reported through [`MediaSurface::Error`]
/// and handed back to the caller untranslated.
pub trait MediaSurface {
    type Error;

    fn play(&mut self) -> Result<(), Self::Error>;

    fn pause(&mut self) -> Result<(), Self::Error>;

    /// Get if the media is paused or not.
    fn paused(&self) -> bool;

    /// Get the current playback position.
    fn position(&self) -> Duration;

    /// Get the media duration. Live sources report zero.
    fn duration(&self) -> Duration;

    /// Jump to `position`, already clamped by the caller.
    fn set_position(&mut self, position: Duration) -> Result<(), Self::Error>;

    fn capabilities(&self) -> Capabilities;

    fn request_fullscreen(&mut self) -> Result<(), Self::Error>;

    fn in_picture_in_picture(&self) -> bool;

    fn enter_picture_in_picture(&mut self) -> Result<(), Self::Error>;

    fn exit_picture_in_picture(&mut self) -> Result<(), Self::Error>;

    /// Jumps to a position in the media, clamped into `[0, duration]`.
    fn seek(&mut self, seek: impl Into<Seek>) -> Result<(), Self::Error>
    where
        Self: Sized,
    {
        let seek = seek.into();
        let target = seek.resolve(self.position(), self.duration());
        info!(message = "seeking", ?seek, ?target);
        self.set_position(target)
    }

    /// Plays when paused, pauses otherwise.
    fn toggle_playback(&mut self) -> Result<(), Self::Error> {
        if self.paused() {
            info!("resuming playback");
            self.play()
        } else {
            info!("pausing playback");
            self.pause()
        }
    }
}
