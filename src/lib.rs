//! # Iced Video Controls
//!
//! Auto-hiding playback controls for a video shown in Iced.
//!
//! The host keeps ownership of the media element (decoding, rendering,
//! fullscreen, picture-in-picture) and exposes it through [`MediaSurface`].
//! A [`Player`] wraps that surface, layers play/pause, seek and optional
//! fullscreen/picture-in-picture buttons over the host's video element, and
//! hides them after a grace period without pointer activity.
//!
//! Example:
//! ```ignore
//! use iced_video_controls::{Config, Message as Controls, Player};
//! use iced::{Element, Subscription};
//!
//! struct App {
//!     player: Player<MyVideo>,
//! }
//!
//! #[derive(Debug, Clone)]
//! enum Message {
//!     Controls(Controls),
//! }
//!
//! impl App {
//!     fn update(&mut self, message: Message) {
//!         match message {
//!             Message::Controls(message) => self.player.update(message).unwrap(),
//!         }
//!     }
//!
//!     fn view(&self) -> Element<Message> {
//!         self.player.view(my_video_widget()).map(Message::Controls)
//!     }
//!
//!     fn subscription(&self) -> Subscription<Message> {
//!         Subscription::run_with_id("controls", self.player.visibility_changes())
//!             .map(Message::Controls)
//!     }
//! }
//! ```
//!
//! The timing core, [`DelayableState`] and [`ControlVisibilityController`],
//! can be used on its own from any tokio runtime.

pub mod config;
mod delayable;
mod overlay;
mod playback;
mod player;
mod surface;
mod visibility;

use thiserror::Error;

pub use config::Config;
pub use delayable::DelayableState;
pub use overlay::Overlay;
pub use playback::{PlaybackMirror, PlaybackState};
pub use player::{Message, Player};
pub use surface::{Capabilities, MediaSurface, Seek};
pub use visibility::{ControlVisibilityController, DEFAULT_GRACE};

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("{0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("{key} = {value:?} is not a whole number of milliseconds")]
    Unrepresentable {
        key: &'static str,
        value: std::time::Duration,
    },
    #[error("no tokio runtime to schedule timers on")]
    NoRuntime,
}
