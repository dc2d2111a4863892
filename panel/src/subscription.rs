use std::time::Duration;

use iced::event::{self, Status};
use iced::keyboard::Key;
use iced::keyboard::key::Named;
use iced::{Subscription, window};

use super::{App, AppEvent, Screen};

/// Timer resolution while the shell has something scheduled.
const SHELL_TICK_MS: u64 = 16;

/// Build the active subscription set from current app state.
pub(super) fn subscription(app: &App) -> Subscription<AppEvent> {
    let win_subs = window::events().map(|(_id, event)| AppEvent::Window(event));
    let key_subs = event::listen_with(keyboard_event);

    let mut subs = vec![win_subs, key_subs];

    // Debounce, adjustment passes and the fade-in run off this tick.
    let timers_pending = match &app.screen {
        Screen::Shell(shell) => {
            shell.next_deadline().is_some() || shell.frame().is_fading(app.now)
        },
        Screen::Entry { .. } => false,
    };
    if timers_pending {
        let tick = iced::time::every(Duration::from_millis(SHELL_TICK_MS))
            .map(|_| AppEvent::Tick);
        subs.push(tick);
    }

    Subscription::batch(subs)
}

/// Keep keyboard events no widget consumed. A focused text input captures
/// Escape, so that key passes through either way.
fn keyboard_event(
    event: event::Event,
    status: Status,
    _window: window::Id,
) -> Option<AppEvent> {
    let event::Event::Keyboard(event) = event else {
        return None;
    };
    match status {
        Status::Ignored => Some(AppEvent::Keyboard(event)),
        Status::Captured if is_escape_press(&event) => {
            Some(AppEvent::Keyboard(event))
        },
        Status::Captured => None,
    }
}

fn is_escape_press(event: &iced::keyboard::Event) -> bool {
    matches!(
        event,
        iced::keyboard::Event::KeyPressed {
            key: Key::Named(Named::Escape),
            ..
        }
    )
}
