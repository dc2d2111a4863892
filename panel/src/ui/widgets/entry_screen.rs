use iced::widget::button::Status as ButtonStatus;
use iced::widget::{button, column, container, text};
use iced::{Border, Element, Length, alignment};

use crate::theme::{IcedColorPalette, ThemeProps};

const HEADING_SIZE: f32 = 20.0;
const BODY_SIZE: f32 = 13.0;
const SPACING: f32 = 12.0;
const BUTTON_PADDING: [f32; 2] = [6.0, 16.0];
const HEADING: &str = "Oturum açmanız gerekiyor";
const RETRY_LABEL: &str = "Tekrar dene";

/// Events emitted by the entry screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryScreenEvent {
    Retry,
}

/// Props for rendering the screen shown instead of the shell.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EntryScreenProps<'a> {
    pub(crate) target: &'a str,
    pub(crate) message: Option<&'a str>,
    pub(crate) theme: ThemeProps<'a>,
}

pub(crate) fn view<'a>(
    props: EntryScreenProps<'a>,
) -> Element<'a, EntryScreenEvent> {
    let palette = *props.theme.theme.iced_palette();

    let mut content = column![
        text(HEADING).size(HEADING_SIZE),
        text(props.target).size(BODY_SIZE).style(move |_| {
            iced::widget::text::Style {
                color: Some(palette.dim_foreground),
            }
        }),
    ]
    .spacing(SPACING)
    .align_x(alignment::Horizontal::Center);

    if let Some(message) = props.message {
        content = content.push(text(message).size(BODY_SIZE).style(
            move |_| iced::widget::text::Style {
                color: Some(palette.danger),
            },
        ));
    }

    content = content.push(
        button(text(RETRY_LABEL).size(BODY_SIZE))
            .on_press(EntryScreenEvent::Retry)
            .padding(BUTTON_PADDING)
            .style(move |_, status| retry_style(&palette, status)),
    );

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(move |_| iced::widget::container::Style {
            background: Some(palette.background.into()),
            ..Default::default()
        })
        .into()
}

fn retry_style(
    palette: &IcedColorPalette,
    status: ButtonStatus,
) -> button::Style {
    let background = match status {
        ButtonStatus::Hovered | ButtonStatus::Pressed => palette.dim_accent,
        _ => palette.accent,
    };

    button::Style {
        background: Some(background.into()),
        text_color: palette.sidebar,
        border: Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
