use iced::widget::button::Status as ButtonStatus;
use iced::widget::{Space, button, container, mouse_area, row, text};
use iced::{Border, Element, Length, alignment};

use crate::theme::{IcedColorPalette, ThemeProps};

/// Fixed height of the bar.
pub(crate) const TOP_BAR_HEIGHT: f32 = 48.0;
const BAR_PADDING_X: f32 = 12.0;
const ITEM_SPACING: f32 = 10.0;
const LABEL_SIZE: f32 = 14.0;
const GLYPH_SIZE: f32 = 16.0;
const BUTTON_PADDING: [f32; 2] = [4.0, 10.0];
const MENU_TOGGLE_GLYPH: &str = "☰";
const LOGOUT_LABEL: &str = "Çıkış";

/// Events emitted by the top bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TopBarEvent {
    /// A press on the bar away from its buttons.
    Pressed,
    ToggleMenu,
    ToggleTheme,
    Logout,
}

/// Props for rendering the top bar. `None` hides the matching control.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TopBarProps<'a> {
    pub(crate) title: &'a str,
    pub(crate) username: Option<&'a str>,
    pub(crate) theme_glyph: Option<&'static str>,
    pub(crate) show_menu_toggle: bool,
    pub(crate) show_logout: bool,
    pub(crate) theme: ThemeProps<'a>,
}

pub(crate) fn view<'a>(props: TopBarProps<'a>) -> Element<'a, TopBarEvent> {
    let palette = *props.theme.theme.iced_palette();

    let mut content = row![]
        .spacing(ITEM_SPACING)
        .align_y(alignment::Vertical::Center)
        .height(Length::Fill);

    if props.show_menu_toggle {
        content = content.push(bar_button(
            MENU_TOGGLE_GLYPH,
            TopBarEvent::ToggleMenu,
            palette,
        ));
    }

    content = content.push(text(props.title).size(LABEL_SIZE).style(
        move |_| iced::widget::text::Style {
            color: Some(palette.foreground),
        },
    ));
    content = content.push(Space::new().width(Length::Fill));

    if let Some(username) = props.username {
        content = content.push(text(username).size(LABEL_SIZE).style(
            move |_| iced::widget::text::Style {
                color: Some(palette.dim_foreground),
            },
        ));
    }
    if let Some(glyph) = props.theme_glyph {
        content =
            content.push(bar_button(glyph, TopBarEvent::ToggleTheme, palette));
    }
    if props.show_logout {
        content = content.push(bar_button(
            LOGOUT_LABEL,
            TopBarEvent::Logout,
            palette,
        ));
    }

    let bar = container(content)
        .padding([0.0, BAR_PADDING_X])
        .width(Length::Fill)
        .height(Length::Fixed(TOP_BAR_HEIGHT))
        .style(move |_| iced::widget::container::Style {
            background: Some(palette.sidebar.into()),
            ..Default::default()
        });

    mouse_area(bar).on_press(TopBarEvent::Pressed).into()
}

fn bar_button<'a>(
    label: &'a str,
    on_press: TopBarEvent,
    palette: IcedColorPalette,
) -> Element<'a, TopBarEvent> {
    button(text(label).size(GLYPH_SIZE))
        .on_press(on_press)
        .padding(BUTTON_PADDING)
        .style(move |_, status| bar_button_style(&palette, status))
        .into()
}

fn bar_button_style(
    palette: &IcedColorPalette,
    status: ButtonStatus,
) -> button::Style {
    let background = match status {
        ButtonStatus::Hovered | ButtonStatus::Pressed => {
            Some(palette.overlay.into())
        },
        _ => None,
    };

    button::Style {
        background,
        text_color: palette.foreground,
        border: Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
