use std::fmt;
use tracing::debug;

/// Playback state reported by the media surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    Playing,
    Paused,
    Ended,
}

impl PlaybackState {
    pub fn as_str(self) -> &'static str {
        match self {
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Ended => "ended",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last playback notification received from the media surface.
///
/// A plain mirror used to pick labels; the surface stays authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackMirror {
    last: Option<PlaybackState>,
}

impl PlaybackMirror {
    pub fn notify(&mut self, state: PlaybackState) {
        debug!(message = "playback state changed", %state);
        self.last = Some(state);
    }

    #[inline(always)]
    pub fn state(&self) -> Option<PlaybackState> {
        self.last
    }

    /// Label of the last notification, empty before the first one.
    pub fn label(&self) -> &'static str {
        self.last.map_or("", PlaybackState::as_str)
    }

    #[inline(always)]
    pub fn is_playing(&self) -> bool {
        self.last == Some(PlaybackState::Playing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_empty_before_any_notification() {
        let mirror = PlaybackMirror::default();
        assert_eq!(mirror.label(), "");
        assert_eq!(mirror.state(), None);
        assert!(!mirror.is_playing());
    }

    #[test]
    fn mirror_follows_latest_notification() {
        let mut mirror = PlaybackMirror::default();
        mirror.notify(PlaybackState::Playing);
        assert!(mirror.is_playing());
        assert_eq!(mirror.label(), "playing");

        mirror.notify(PlaybackState::Paused);
        assert_eq!(mirror.label(), "paused");

        mirror.notify(PlaybackState::Ended);
        assert_eq!(mirror.state(), Some(PlaybackState::Ended));
        assert!(!mirror.is_playing());
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(PlaybackState::Ended.to_string(), "ended");
    }
}
