use iced::widget::{Space, container, mouse_area};
use iced::{Element, Length};

use crate::theme::ThemeProps;

/// Events emitted by the drawer overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DrawerOverlayEvent {
    Pressed,
}

/// Props for rendering the layer behind the open mobile drawer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DrawerOverlayProps<'a> {
    pub(crate) theme: ThemeProps<'a>,
}

/// Full-window scrim that reports presses outside the drawer.
pub(crate) fn view<'a>(
    props: DrawerOverlayProps<'a>,
) -> Element<'a, DrawerOverlayEvent> {
    let palette = *props.theme.theme.iced_palette();

    let scrim = container(Space::new())
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| iced::widget::container::Style {
            background: Some(palette.scrim.into()),
            ..Default::default()
        });

    mouse_area(scrim)
        .on_press(DrawerOverlayEvent::Pressed)
        .into()
}
