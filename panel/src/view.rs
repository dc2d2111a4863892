use std::time::Instant;

use iced::widget::{column, container, mouse_area, row, stack};
use iced::{Element, Length, Size, Theme};
use panel_shell::{FrameHost, ShellControls};
use panel_shell::sidebar::SidebarLayout;

use super::{App, AppEvent, PanelShell, Screen};
use crate::theme::ThemeProps;
use crate::ui::widgets::content_frame::{self, ContentFrameProps};
use crate::ui::widgets::drawer_overlay::{self, DrawerOverlayProps};
use crate::ui::widgets::entry_screen::{self, EntryScreenProps};
use crate::ui::widgets::search_box::{self, SearchBoxProps};
use crate::ui::widgets::sidebar_menu::{
    self, MENU_ROW_HEIGHT, SidebarMenuProps,
};
use crate::ui::widgets::top_bar::{self, TOP_BAR_HEIGHT, TopBarProps};

pub(crate) const SIDEBAR_WIDTH: f32 = 260.0;
pub(crate) const COLLAPSED_SIDEBAR_WIDTH: f32 = 56.0;
pub(crate) const DRAWER_WIDTH: f32 = 280.0;
const SEARCH_BOX_HEIGHT: f32 = 46.0;
const DEFAULT_TITLE: &str = "Panel";

/// Number of menu rows that fit in a window of `size`.
pub(crate) fn menu_rows(size: Size) -> usize {
    let available = size.height - TOP_BAR_HEIGHT - SEARCH_BOX_HEIGHT;
    (available / MENU_ROW_HEIGHT).floor().max(1.0) as usize
}

pub(super) fn view(app: &App) -> Element<'_, AppEvent, Theme, iced::Renderer> {
    let theme = ThemeProps::new(&app.theme);

    match &app.screen {
        Screen::Entry { target, message } => {
            entry_screen::view(EntryScreenProps {
                target,
                message: message.as_deref(),
                theme,
            })
            .map(AppEvent::EntryScreen)
        },
        Screen::Shell(shell) => shell_view(shell, app.now, theme),
    }
}

fn shell_view<'a>(
    shell: &'a PanelShell,
    now: Instant,
    theme: ThemeProps<'a>,
) -> Element<'a, AppEvent, Theme, iced::Renderer> {
    let controls = shell.controls();

    let title = shell
        .menu()
        .active_item()
        .map(|item| item.label())
        .unwrap_or(DEFAULT_TITLE);
    let top_bar = top_bar::view(TopBarProps {
        title,
        username: controls
            .contains(ShellControls::USERNAME_DISPLAY)
            .then(|| shell.session().username()),
        theme_glyph: controls
            .contains(ShellControls::THEME_TOGGLE)
            .then(|| shell.theme().glyph()),
        show_menu_toggle: controls.contains(ShellControls::MENU_TOGGLE),
        show_logout: controls.contains(ShellControls::LOGOUT_BUTTON),
        theme,
    })
    .map(AppEvent::TopBar);

    let frame = shell.frame();
    let content = content_frame::view(ContentFrameProps {
        source: frame.source(),
        title: frame.title(),
        document: frame.hosted(),
        cross_origin: frame.is_cross_origin(),
        failure: frame.failure(),
        opacity: frame.opacity_at(now),
        theme,
    })
    .map(AppEvent::ContentFrame);

    let body: Element<'a, AppEvent, Theme, iced::Renderer> =
        match shell.sidebar().layout() {
            SidebarLayout::Expanded => {
                row![sidebar(shell, SIDEBAR_WIDTH, false, theme), content]
                    .into()
            },
            SidebarLayout::Collapsed => row![
                sidebar(shell, COLLAPSED_SIDEBAR_WIDTH, true, theme),
                content
            ]
            .into(),
            SidebarLayout::Closed => content,
            SidebarLayout::Open => {
                let overlay = drawer_overlay::view(DrawerOverlayProps { theme })
                    .map(AppEvent::DrawerOverlay);
                let drawer =
                    row![sidebar(shell, DRAWER_WIDTH, false, theme), overlay];
                stack![content, drawer].into()
            },
        };

    column![top_bar, body]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn sidebar<'a>(
    shell: &'a PanelShell,
    width: f32,
    collapsed: bool,
    theme: ThemeProps<'a>,
) -> Element<'a, AppEvent, Theme, iced::Renderer> {
    let palette = *theme.theme.iced_palette();
    let controls = shell.controls();

    let mut content = column![].width(Length::Fill).height(Length::Fill);
    if controls.contains(ShellControls::SEARCH_INPUT) && !collapsed {
        content = content.push(
            search_box::view(SearchBoxProps {
                value: shell.search().input(),
                theme,
            })
            .map(AppEvent::SearchBox),
        );
    }
    if controls.contains(ShellControls::MENU_LIST) {
        content = content.push(
            sidebar_menu::view(SidebarMenuProps {
                items: shell.menu().items(),
                active: shell.menu().active(),
                no_results: shell.search().placeholder().map(|p| p.text()),
                collapsed,
                theme,
            })
            .map(AppEvent::SidebarMenu),
        );
    }

    let panel = container(content)
        .width(Length::Fixed(width))
        .height(Length::Fill)
        .style(move |_| iced::widget::container::Style {
            background: Some(palette.sidebar.into()),
            ..Default::default()
        });

    mouse_area(panel).on_press(AppEvent::SidebarPressed).into()
}

#[cfg(test)]
mod tests {
    use iced::Size;

    use super::menu_rows;

    #[test]
    fn given_window_height_when_rows_computed_then_full_rows_are_counted() {
        assert_eq!(menu_rows(Size::new(1280.0, 800.0)), 17);
    }

    #[test]
    fn given_tiny_window_when_rows_computed_then_at_least_one_row() {
        assert_eq!(menu_rows(Size::new(300.0, 50.0)), 1);
    }
}
