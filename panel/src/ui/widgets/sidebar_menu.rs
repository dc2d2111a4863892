use iced::widget::button::Status as ButtonStatus;
use iced::widget::text::Wrapping;
use iced::widget::{Space, button, column, container, row, scrollable, text};
use iced::{Border, Element, Length, alignment};
use panel_shell::menu::MenuItem;

use crate::theme::{IcedColorPalette, ThemeProps};

/// Height of one menu row; scroll offsets are multiples of it.
pub(crate) const MENU_ROW_HEIGHT: f32 = 40.0;
/// Identifier of the menu scrollable.
pub(crate) const SIDEBAR_MENU_SCROLL_ID: &str = "sidebar_menu_scroll";

const LABEL_SIZE: f32 = 14.0;
const ROW_PADDING_X: f32 = 12.0;
const ACTIVE_BORDER_WIDTH: f32 = 3.0;
const PLACEHOLDER_PADDING: f32 = 12.0;

/// Events emitted by the sidebar menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SidebarMenuEvent {
    ItemPressed(usize),
}

/// Props for rendering the sidebar menu list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SidebarMenuProps<'a> {
    pub(crate) items: &'a [MenuItem],
    pub(crate) active: Option<usize>,
    pub(crate) no_results: Option<&'static str>,
    /// Narrow rail showing only the first letter of each label.
    pub(crate) collapsed: bool,
    pub(crate) theme: ThemeProps<'a>,
}

pub(crate) fn view<'a>(
    props: SidebarMenuProps<'a>,
) -> Element<'a, SidebarMenuEvent> {
    let palette = *props.theme.theme.iced_palette();

    let mut list = column![].spacing(0).width(Length::Fill);
    for (index, item) in props.items.iter().enumerate() {
        if !item.is_visible() {
            continue;
        }
        let is_active = props.active == Some(index);
        list = list.push(menu_row(
            index,
            item,
            is_active,
            props.collapsed,
            palette,
        ));
    }

    if let Some(message) = props.no_results {
        list = list.push(
            container(text(message).size(LABEL_SIZE).style(move |_| {
                iced::widget::text::Style {
                    color: Some(palette.dim_foreground),
                }
            }))
            .padding(PLACEHOLDER_PADDING)
            .width(Length::Fill),
        );
    }

    scrollable::Scrollable::with_direction(
        list,
        scrollable::Direction::Vertical(
            scrollable::Scrollbar::new()
                .width(4)
                .margin(0)
                .scroller_width(4),
        ),
    )
    .id(SIDEBAR_MENU_SCROLL_ID)
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn menu_row<'a>(
    index: usize,
    item: &'a MenuItem,
    is_active: bool,
    collapsed: bool,
    palette: IcedColorPalette,
) -> Element<'a, SidebarMenuEvent> {
    let label = if collapsed {
        item.label()
            .chars()
            .next()
            .map(String::from)
            .unwrap_or_default()
    } else {
        item.label().to_string()
    };

    let border_color = if is_active {
        palette.accent
    } else {
        iced::Color::TRANSPARENT
    };
    let border_strip = container(Space::new())
        .width(Length::Fixed(ACTIVE_BORDER_WIDTH))
        .height(Length::Fill)
        .style(move |_| iced::widget::container::Style {
            background: Some(border_color.into()),
            ..Default::default()
        });

    let label = container(
        text(label)
            .size(LABEL_SIZE)
            .wrapping(Wrapping::None)
            .align_x(alignment::Horizontal::Left),
    )
    .padding([0.0, ROW_PADDING_X])
    .height(Length::Fill)
    .align_y(alignment::Vertical::Center);

    let content = row![border_strip, label]
        .spacing(0)
        .width(Length::Fill)
        .height(Length::Fill);

    let mut row_button = button(content)
        .padding(0)
        .width(Length::Fill)
        .height(Length::Fixed(MENU_ROW_HEIGHT))
        .style(move |_, status| row_style(&palette, is_active, status));
    if item.target().is_some() {
        row_button = row_button.on_press(SidebarMenuEvent::ItemPressed(index));
    }

    row_button.into()
}

fn row_style(
    palette: &IcedColorPalette,
    is_active: bool,
    status: ButtonStatus,
) -> button::Style {
    let background = match (is_active, status) {
        (true, _) => Some(palette.dim_accent.into()),
        (false, ButtonStatus::Hovered | ButtonStatus::Pressed) => {
            Some(palette.overlay.into())
        },
        _ => None,
    };

    button::Style {
        background,
        text_color: palette.foreground,
        border: Border::default(),
        ..Default::default()
    }
}
