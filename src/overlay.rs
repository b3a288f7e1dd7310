use crate::playback::PlaybackMirror;
use crate::surface::Capabilities;
use iced::widget::{button, container, mouse_area, text, Row, Stack};
use iced::{Element, Length};
use std::time::Duration;

/// Control overlay layered on top of a video element.
///
/// Pointer activity over the whole area is reported through the `on_pointer_*`
/// messages; the control row is only part of the tree while `visible` is set.
/// Fullscreen and picture-in-picture buttons are offered only when the
/// surface [`Capabilities`] allow them.
pub struct Overlay<'a, Message> {
    content: Element<'a, Message>,
    visible: bool,
    playback: PlaybackMirror,
    capabilities: Capabilities,
    in_picture_in_picture: bool,
    seek_step: Duration,
    on_pointer_enter: Option<Message>,
    on_pointer_move: Option<Message>,
    on_pointer_leave: Option<Message>,
    on_toggle_playback: Option<Message>,
    on_seek_backward: Option<Message>,
    on_seek_forward: Option<Message>,
    on_fullscreen: Option<Message>,
    on_picture_in_picture: Option<Message>,
}

impl<'a, Message> Overlay<'a, Message>
where
    Message: 'a + Clone,
{
    /// Creates a new overlay for the given video element.
    pub fn new(
        content: impl Into<Element<'a, Message>>,
        visible: bool,
        playback: PlaybackMirror,
    ) -> Self {
        Overlay {
            content: content.into(),
            visible,
            playback,
            capabilities: Capabilities::default(),
            in_picture_in_picture: false,
            seek_step: crate::config::DEFAULT_SEEK_STEP,
            on_pointer_enter: None,
            on_pointer_move: None,
            on_pointer_leave: None,
            on_toggle_playback: None,
            on_seek_backward: None,
            on_seek_forward: None,
            on_fullscreen: None,
            on_picture_in_picture: None,
        }
    }

    pub fn capabilities(self, capabilities: Capabilities) -> Self {
        Overlay {
            capabilities,
            ..self
        }
    }

    /// Whether the surface is currently in picture-in-picture, for the label.
    pub fn in_picture_in_picture(self, in_picture_in_picture: bool) -> Self {
        Overlay {
            in_picture_in_picture,
            ..self
        }
    }

    /// Step shown on the seek buttons.
    pub fn seek_step(self, seek_step: Duration) -> Self {
        Overlay { seek_step, ..self }
    }

    pub fn on_pointer_enter(self, on_pointer_enter: Message) -> Self {
        Overlay {
            on_pointer_enter: Some(on_pointer_enter),
            ..self
        }
    }

    pub fn on_pointer_move(self, on_pointer_move: Message) -> Self {
        Overlay {
            on_pointer_move: Some(on_pointer_move),
            ..self
        }
    }

    pub fn on_pointer_leave(self, on_pointer_leave: Message) -> Self {
        Overlay {
            on_pointer_leave: Some(on_pointer_leave),
            ..self
        }
    }

    pub fn on_toggle_playback(self, on_toggle_playback: Message) -> Self {
        Overlay {
            on_toggle_playback: Some(on_toggle_playback),
            ..self
        }
    }

    pub fn on_seek_backward(self, on_seek_backward: Message) -> Self {
        Overlay {
            on_seek_backward: Some(on_seek_backward),
            ..self
        }
    }

    pub fn on_seek_forward(self, on_seek_forward: Message) -> Self {
        Overlay {
            on_seek_forward: Some(on_seek_forward),
            ..self
        }
    }

    pub fn on_fullscreen(self, on_fullscreen: Message) -> Self {
        Overlay {
            on_fullscreen: Some(on_fullscreen),
            ..self
        }
    }

    pub fn on_picture_in_picture(self, on_picture_in_picture: Message) -> Self {
        Overlay {
            on_picture_in_picture: Some(on_picture_in_picture),
            ..self
        }
    }

    /// Buttons of the control row in display order, with the message each
    /// one publishes when pressed.
    fn buttons(&self) -> Vec<(String, Option<Message>)> {
        let mut buttons = vec![
            (backward_label(self.seek_step), self.on_seek_backward.clone()),
            (
                toggle_label(&self.playback).to_owned(),
                self.on_toggle_playback.clone(),
            ),
            (forward_label(self.seek_step), self.on_seek_forward.clone()),
        ];
        if self.capabilities.fullscreen {
            buttons.push(("Fullscreen".to_owned(), self.on_fullscreen.clone()));
        }
        if self.capabilities.picture_in_picture {
            buttons.push((
                pip_label(self.in_picture_in_picture).to_owned(),
                self.on_picture_in_picture.clone(),
            ));
        }
        buttons
    }

    fn controls(&self) -> Element<'a, Message> {
        let controls = self
            .buttons()
            .into_iter()
            .fold(Row::new().spacing(8), |controls, (label, on_press)| {
                controls.push(button(text(label)).on_press_maybe(on_press))
            });

        container(controls).center(Length::Fill).into()
    }
}

fn backward_label(step: Duration) -> String {
    format!("<- {}s", step.as_secs_f32())
}

fn forward_label(step: Duration) -> String {
    format!("{}s ->", step.as_secs_f32())
}

fn toggle_label(playback: &PlaybackMirror) -> &'static str {
    if playback.is_playing() {
        "Pause"
    } else {
        "Play"
    }
}

fn pip_label(active: bool) -> &'static str {
    if active {
        "Exit PiP"
    } else {
        "PiP"
    }
}

impl<'a, Message> From<Overlay<'a, Message>> for Element<'a, Message>
where
    Message: 'a + Clone,
{
    fn from(overlay: Overlay<'a, Message>) -> Self {
        let controls = overlay.visible.then(|| overlay.controls());

        let mut layers = Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(overlay.content);
        if let Some(controls) = controls {
            layers = layers.push(controls);
        }

        let mut area = mouse_area(layers);
        if let Some(on_pointer_enter) = overlay.on_pointer_enter {
            area = area.on_enter(on_pointer_enter);
        }
        if let Some(on_pointer_move) = overlay.on_pointer_move {
            area = area.on_move(move |_| on_pointer_move.clone());
        }
        if let Some(on_pointer_leave) = overlay.on_pointer_leave {
            area = area.on_exit(on_pointer_leave);
        }
        area.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::PlaybackState;
    use crate::player::Message;
    use iced::widget::Space;

    fn overlay(playback: PlaybackMirror) -> Overlay<'static, Message> {
        Overlay::new(Space::new(Length::Fill, Length::Fill), true, playback)
            .on_toggle_playback(Message::TogglePlayback)
            .on_seek_backward(Message::SeekBackward)
            .on_seek_forward(Message::SeekForward)
            .on_fullscreen(Message::Fullscreen)
            .on_picture_in_picture(Message::TogglePictureInPicture)
    }

    fn labels(overlay: &Overlay<'_, Message>) -> Vec<String> {
        overlay.buttons().into_iter().map(|(label, _)| label).collect()
    }

    #[test]
    fn unsupported_controls_are_not_offered() {
        let buttons = overlay(PlaybackMirror::default()).buttons();
        assert_eq!(
            buttons,
            vec![
                ("<- 5s".to_owned(), Some(Message::SeekBackward)),
                ("Play".to_owned(), Some(Message::TogglePlayback)),
                ("5s ->".to_owned(), Some(Message::SeekForward)),
            ]
        );
    }

    #[test]
    fn supported_controls_are_offered() {
        let buttons = overlay(PlaybackMirror::default())
            .capabilities(Capabilities {
                fullscreen: true,
                picture_in_picture: true,
            })
            .in_picture_in_picture(true)
            .buttons();
        assert_eq!(buttons.len(), 5);
        assert_eq!(
            buttons[3],
            ("Fullscreen".to_owned(), Some(Message::Fullscreen))
        );
        assert_eq!(
            buttons[4],
            ("Exit PiP".to_owned(), Some(Message::TogglePictureInPicture))
        );
    }

    #[test]
    fn only_picture_in_picture_can_be_offered_alone() {
        let overlay = overlay(PlaybackMirror::default()).capabilities(Capabilities {
            fullscreen: false,
            picture_in_picture: true,
        });
        assert_eq!(labels(&overlay), vec!["<- 5s", "Play", "5s ->", "PiP"]);
    }

    #[test]
    fn toggle_label_follows_playback() {
        let mut playback = PlaybackMirror::default();
        playback.notify(PlaybackState::Playing);
        assert_eq!(labels(&overlay(playback))[1], "Pause");

        playback.notify(PlaybackState::Ended);
        assert_eq!(labels(&overlay(playback))[1], "Play");
    }

    #[test]
    fn seek_step_shows_on_buttons() {
        let overlay = overlay(PlaybackMirror::default()).seek_step(Duration::from_millis(2500));
        let labels = labels(&overlay);
        assert_eq!(labels[0], "<- 2.5s");
        assert_eq!(labels[2], "2.5s ->");
    }

    #[test]
    fn buttons_without_a_message_are_disabled() {
        let overlay: Overlay<'_, Message> = Overlay::new(
            Space::new(Length::Fill, Length::Fill),
            true,
            PlaybackMirror::default(),
        );
        assert!(overlay.buttons().iter().all(|(_, on_press)| on_press.is_none()));
    }

    #[test]
    fn converts_into_element_when_hidden_and_visible() {
        for visible in [false, true] {
            let overlay = Overlay::new(
                Space::new(Length::Fill, Length::Fill),
                visible,
                PlaybackMirror::default(),
            )
            .on_pointer_enter(Message::PointerEntered)
            .on_pointer_move(Message::PointerMoved)
            .on_pointer_leave(Message::PointerLeft)
            .on_toggle_playback(Message::TogglePlayback);
            let _element: Element<'_, Message> = overlay.into();
        }
    }
}
