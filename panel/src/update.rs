use std::time::Instant;

use iced::keyboard::Key;
use iced::keyboard::key::Named;
use iced::widget::operation::{focus, scroll_to};
use iced::widget::scrollable::AbsoluteOffset;
use iced::{Size, Task, window};
use panel_shell::keyboard::{MenuKey, SearchKey};
use panel_shell::sidebar::ClickTarget;
use panel_shell::{ShellEffect, ShellEvent};

use super::{App, AppEvent, FocusZone, Screen, request_pending_page, view};
use crate::theme::AppTheme;
use crate::ui::widgets::content_frame::ContentFrameEvent;
use crate::ui::widgets::drawer_overlay::DrawerOverlayEvent;
use crate::ui::widgets::entry_screen::EntryScreenEvent;
use crate::ui::widgets::search_box::{SEARCH_INPUT_ID, SearchBoxEvent};
use crate::ui::widgets::sidebar_menu::{
    MENU_ROW_HEIGHT, SIDEBAR_MENU_SCROLL_ID, SidebarMenuEvent,
};
use crate::ui::widgets::top_bar::TopBarEvent;

/// Route each event to the shell or the app-level handler owning it.
pub(super) fn update(app: &mut App, event: AppEvent) -> Task<AppEvent> {
    app.now = Instant::now();
    match event {
        AppEvent::IcedReady => app.boot(),
        AppEvent::EntryScreen(EntryScreenEvent::Retry) => app.boot(),
        AppEvent::TopBar(event) => route_top_bar(app, event),
        AppEvent::SidebarMenu(SidebarMenuEvent::ItemPressed(index)) => {
            app.focus = FocusZone::Menu;
            dispatch(app, ShellEvent::ItemPressed(index))
        },
        AppEvent::SidebarPressed => {
            app.focus = FocusZone::Menu;
            dispatch(app, ShellEvent::Clicked(ClickTarget::Sidebar))
        },
        AppEvent::SearchBox(event) => route_search_box(app, event),
        AppEvent::ContentFrame(ContentFrameEvent::Pressed) => {
            dispatch(app, ShellEvent::Clicked(ClickTarget::Outside))
        },
        AppEvent::DrawerOverlay(DrawerOverlayEvent::Pressed) => {
            dispatch(app, ShellEvent::Clicked(ClickTarget::Overlay))
        },
        AppEvent::PageLoaded(page) => {
            let Screen::Shell(shell) = &mut app.screen else {
                return Task::none();
            };
            if shell.frame_mut().accept(page) {
                dispatch(app, ShellEvent::FrameLoaded)
            } else {
                Task::none()
            }
        },
        AppEvent::Tick => {
            let now = app.started.elapsed();
            dispatch(app, ShellEvent::Tick { now })
        },
        AppEvent::Keyboard(event) => route_keyboard(app, event),
        AppEvent::Window(window::Event::Resized(size)) => {
            handle_resize(app, size)
        },
        AppEvent::Window(_) => Task::none(),
    }
}

fn route_top_bar(app: &mut App, event: TopBarEvent) -> Task<AppEvent> {
    dispatch_all(app, top_bar_events(event))
}

/// Shell events for a top bar press. Everything but the menu toggle lies
/// outside the sidebar, so it closes an open drawer first.
fn top_bar_events(event: TopBarEvent) -> Vec<ShellEvent> {
    let outside = ShellEvent::Clicked(ClickTarget::Outside);
    match event {
        TopBarEvent::ToggleMenu => vec![ShellEvent::ToggleSidebar],
        TopBarEvent::Pressed => vec![outside],
        TopBarEvent::ToggleTheme => vec![outside, ShellEvent::ToggleTheme],
        TopBarEvent::Logout => vec![outside, ShellEvent::Logout],
    }
}

fn route_search_box(app: &mut App, event: SearchBoxEvent) -> Task<AppEvent> {
    app.focus = FocusZone::Search;
    match event {
        SearchBoxEvent::Changed(value) => {
            dispatch(app, ShellEvent::SearchInput(value))
        },
        SearchBoxEvent::Submitted => {
            dispatch(app, ShellEvent::SearchKey(SearchKey::Enter))
        },
    }
}

fn route_keyboard(
    app: &mut App,
    event: iced::keyboard::Event,
) -> Task<AppEvent> {
    let iced::keyboard::Event::KeyPressed { key, .. } = event else {
        return Task::none();
    };
    let Key::Named(named) = key else {
        return Task::none();
    };

    match shell_key(app.focus, named) {
        Some(shell_event) => dispatch(app, shell_event),
        None => Task::none(),
    }
}

fn shell_key(focus: FocusZone, named: Named) -> Option<ShellEvent> {
    let shell_event = match (focus, named) {
        (FocusZone::Search, Named::Escape) => {
            ShellEvent::SearchKey(SearchKey::Escape)
        },
        // Enter inside the search input arrives through on_submit.
        (FocusZone::Search, _) => return None,
        (FocusZone::Menu, Named::ArrowDown) => {
            ShellEvent::MenuKey(MenuKey::ArrowDown)
        },
        (FocusZone::Menu, Named::ArrowUp) => {
            ShellEvent::MenuKey(MenuKey::ArrowUp)
        },
        (FocusZone::Menu, Named::Enter) => ShellEvent::MenuKey(MenuKey::Enter),
        (FocusZone::Menu, _) => return None,
    };
    Some(shell_event)
}

fn handle_resize(app: &mut App, size: Size) -> Task<AppEvent> {
    app.window_size = size;
    app.menu_window.rows = view::menu_rows(size);
    dispatch(app, ShellEvent::ViewportResized { width: size.width })
}

fn dispatch(app: &mut App, event: ShellEvent) -> Task<AppEvent> {
    dispatch_all(app, vec![event])
}

/// Feed `events` to the running shell and carry out what it asks for.
///
/// A tick always goes first so timers due by now fire before the events.
fn dispatch_all(app: &mut App, events: Vec<ShellEvent>) -> Task<AppEvent> {
    let now = app.started.elapsed();
    let Screen::Shell(shell) = &mut app.screen else {
        return Task::none();
    };

    let mut effects = shell.handle(ShellEvent::Tick { now });
    for event in events {
        effects.extend(shell.handle(event));
    }

    let mut tasks = vec![request_pending_page(shell)];
    if shell.theme().is_dark() != app.theme.is_dark() {
        app.theme = AppTheme::new(shell.theme().is_dark());
    }

    for effect in effects {
        tasks.push(apply_effect(app, effect));
    }
    Task::batch(tasks)
}

fn apply_effect(app: &mut App, effect: ShellEffect) -> Task<AppEvent> {
    match effect {
        ShellEffect::Navigate { target, replace } => {
            log::info!("leaving shell for {target} (replace: {replace})");
            app.screen = Screen::Entry {
                target,
                message: None,
            };
            Task::none()
        },
        ShellEffect::ScrollIntoView { item, row } => {
            let first = app.menu_window.reveal(row);
            log::debug!("menu item {item} at row {row}, first row {first}");
            scroll_to(
                SIDEBAR_MENU_SCROLL_ID,
                AbsoluteOffset {
                    x: 0.0,
                    y: first as f32 * MENU_ROW_HEIGHT,
                },
            )
        },
        ShellEffect::ClearSearchInput => focus(SEARCH_INPUT_ID),
    }
}

#[cfg(test)]
mod tests {
    use iced::keyboard::key::Named;
    use panel_shell::ShellEvent;
    use panel_shell::keyboard::{MenuKey, SearchKey};
    use panel_shell::sidebar::ClickTarget;

    use super::{shell_key, top_bar_events};
    use crate::app::FocusZone;
    use crate::ui::widgets::top_bar::TopBarEvent;

    #[test]
    fn given_search_focus_when_escape_pressed_then_search_is_cleared() {
        assert_eq!(
            shell_key(FocusZone::Search, Named::Escape),
            Some(ShellEvent::SearchKey(SearchKey::Escape))
        );
        assert_eq!(shell_key(FocusZone::Search, Named::ArrowDown), None);
        assert_eq!(shell_key(FocusZone::Search, Named::Enter), None);
    }

    #[test]
    fn given_menu_focus_when_keys_pressed_then_navigation_keys_route() {
        assert_eq!(
            shell_key(FocusZone::Menu, Named::ArrowUp),
            Some(ShellEvent::MenuKey(MenuKey::ArrowUp))
        );
        assert_eq!(
            shell_key(FocusZone::Menu, Named::Enter),
            Some(ShellEvent::MenuKey(MenuKey::Enter))
        );
        assert_eq!(shell_key(FocusZone::Menu, Named::Escape), None);
    }

    #[test]
    fn given_top_bar_press_when_routed_then_only_toggle_skips_outside_click()
    {
        let outside = ShellEvent::Clicked(ClickTarget::Outside);

        assert_eq!(
            top_bar_events(TopBarEvent::ToggleMenu),
            vec![ShellEvent::ToggleSidebar]
        );
        assert_eq!(
            top_bar_events(TopBarEvent::Pressed),
            vec![outside.clone()]
        );
        assert_eq!(
            top_bar_events(TopBarEvent::ToggleTheme),
            vec![outside, ShellEvent::ToggleTheme]
        );
    }
}
