use crate::overlay::Overlay;
use crate::playback::{PlaybackMirror, PlaybackState};
use crate::surface::{MediaSurface, Seek};
use crate::visibility::ControlVisibilityController;
use crate::{Config, Error};
use futures::stream::{self, Stream};
use iced::Element;
use tokio::runtime::Handle;
use tracing::{info, warn};

/// Messages handled by [`Player::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    PointerEntered,
    PointerMoved,
    PointerLeft,
    TogglePlayback,
    SeekBackward,
    SeekForward,
    Fullscreen,
    TogglePictureInPicture,
    /// Notification forwarded from the media surface.
    Playback(PlaybackState),
    /// Controls were shown or hidden, only useful to trigger a redraw.
    VisibilityChanged(bool),
}

/// A media surface together with its auto-hiding controls.
pub struct Player<S> {
    surface: S,
    controls: ControlVisibilityController,
    playback: PlaybackMirror,
    config: Config,
}

impl<S: MediaSurface> Player<S> {
    /// Creates a player whose hide timers run on the caller's tokio runtime.
    pub fn new(surface: S, config: Config) -> Result<Self, Error> {
        let handle = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        Ok(Self::with_handle(surface, config, handle))
    }

    pub fn with_handle(surface: S, config: Config, runtime: Handle) -> Self {
        info!(message = "creating player", ?config);
        Player {
            surface,
            controls: ControlVisibilityController::with_handle(runtime)
                .with_grace(config.hide_delay),
            playback: PlaybackMirror::default(),
            config,
        }
    }

    #[inline(always)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline(always)]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[inline(always)]
    pub fn controls(&self) -> &ControlVisibilityController {
        &self.controls
    }

    #[inline(always)]
    pub fn playback(&self) -> PlaybackMirror {
        self.playback
    }

    #[inline(always)]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handles a message, forwarding control requests to the surface.
    ///
    /// Errors raised by the surface are returned untouched. Requests for a
    /// capability the surface lacks are ignored.
    pub fn update(&mut self, message: Message) -> Result<(), S::Error> {
        match message {
            Message::PointerEntered => self.controls.on_pointer_enter(),
            Message::PointerMoved => self.controls.on_pointer_move(),
            Message::PointerLeft => self.controls.on_pointer_leave(),
            Message::Playback(state) => self.playback.notify(state),
            Message::VisibilityChanged(_) => {}
            Message::TogglePlayback => self.surface.toggle_playback()?,
            Message::SeekBackward => self.surface.seek(Seek::Backward(self.config.seek_step))?,
            Message::SeekForward => self.surface.seek(Seek::Forward(self.config.seek_step))?,
            Message::Fullscreen => {
                if self.surface.capabilities().fullscreen {
                    info!("requesting fullscreen");
                    self.surface.request_fullscreen()?;
                } else {
                    warn!("fullscreen requested but not supported by the surface");
                }
            }
            Message::TogglePictureInPicture => {
                if !self.surface.capabilities().picture_in_picture {
                    warn!("picture-in-picture requested but not supported by the surface");
                } else if self.surface.in_picture_in_picture() {
                    info!("leaving picture-in-picture");
                    self.surface.exit_picture_in_picture()?;
                } else {
                    info!("entering picture-in-picture");
                    self.surface.enter_picture_in_picture()?;
                }
            }
        }
        Ok(())
    }

    /// Layers the controls over `content`, the host's rendering of the video.
    pub fn view<'a>(&'a self, content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
        Overlay::new(content, self.controls.is_visible(), self.playback)
            .capabilities(self.surface.capabilities())
            .in_picture_in_picture(self.surface.in_picture_in_picture())
            .seek_step(self.config.seek_step)
            .on_pointer_enter(Message::PointerEntered)
            .on_pointer_move(Message::PointerMoved)
            .on_pointer_leave(Message::PointerLeft)
            .on_toggle_playback(Message::TogglePlayback)
            .on_seek_backward(Message::SeekBackward)
            .on_seek_forward(Message::SeekForward)
            .on_fullscreen(Message::Fullscreen)
            .on_picture_in_picture(Message::TogglePictureInPicture)
            .into()
    }

    /// Stream of [`Message::VisibilityChanged`], for example to feed
    /// `iced::Subscription::run_with_id` so delayed hides trigger a redraw.
    pub fn visibility_changes(&self) -> impl Stream<Item = Message> + Send + 'static {
        let changes = self.controls.subscribe().to_async();
        stream::unfold(changes, |changes| async move {
            let visible = changes.recv().await.ok()?;
            Some((Message::VisibilityChanged(visible), changes))
        })
    }
}

impl<S> Drop for Player<S> {
    fn drop(&mut self) {
        self.controls.dispose();
    }
}
