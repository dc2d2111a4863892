#[path = "subscription.rs"]
mod subscription;
#[path = "update.rs"]
mod update;
#[path = "view.rs"]
pub(crate) mod view;

use std::time::Instant;

use iced::{Element, Size, Subscription, Task, Theme};
use panel_shell::keyboard::ScrollWindow;
use panel_shell::{Shell, ShellBoot, ShellControls, ShellView};

use crate::config::{PanelConfig, load_config};
use crate::frame_host::{DesktopFrame, LoadedPage, load_page};
use crate::storage::JsonFileStore;
use crate::theme::AppTheme;
use crate::ui::widgets::content_frame::ContentFrameEvent;
use crate::ui::widgets::drawer_overlay::DrawerOverlayEvent;
use crate::ui::widgets::entry_screen::EntryScreenEvent;
use crate::ui::widgets::search_box::SearchBoxEvent;
use crate::ui::widgets::sidebar_menu::SidebarMenuEvent;
use crate::ui::widgets::top_bar::TopBarEvent;

pub(crate) const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;
pub(crate) const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;
pub(crate) const MIN_WINDOW_WIDTH: f32 = 360.0;
pub(crate) const MIN_WINDOW_HEIGHT: f32 = 480.0;

pub(crate) type PanelShell = Shell<JsonFileStore, DesktopFrame>;

/// Which part of the window receives arrow and enter keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FocusZone {
    Search,
    Menu,
}

/// What the window currently shows.
#[derive(Debug)]
pub(crate) enum Screen {
    /// Gate refused or session ended; the shell is not running.
    Entry {
        target: String,
        message: Option<String>,
    },
    Shell(Box<PanelShell>),
}

/// App-wide events that drive the root update loop.
#[derive(Debug, Clone)]
pub(crate) enum AppEvent {
    IcedReady,
    TopBar(TopBarEvent),
    SidebarMenu(SidebarMenuEvent),
    SearchBox(SearchBoxEvent),
    ContentFrame(ContentFrameEvent),
    DrawerOverlay(DrawerOverlayEvent),
    EntryScreen(EntryScreenEvent),
    /// A press landed somewhere on the sidebar.
    SidebarPressed,
    PageLoaded(LoadedPage),
    Tick,
    Keyboard(iced::keyboard::Event),
    Window(iced::window::Event),
}

/// Root application state.
pub(crate) struct App {
    pub(crate) config: PanelConfig,
    pub(crate) window_size: Size,
    pub(crate) started: Instant,
    /// When the last event arrived; the view samples animations here.
    pub(crate) now: Instant,
    pub(crate) screen: Screen,
    pub(crate) theme: AppTheme,
    pub(crate) focus: FocusZone,
    pub(crate) menu_window: ScrollWindow,
}

impl App {
    /// Initialize the application and return the first task.
    pub(crate) fn new() -> (Self, Task<AppEvent>) {
        let config = load_config();
        let window_size = Size {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
        };

        let app = App {
            theme: AppTheme::new(config.prefers_dark),
            config,
            window_size,
            started: Instant::now(),
            now: Instant::now(),
            screen: Screen::Entry {
                target: String::new(),
                message: None,
            },
            focus: FocusZone::Menu,
            menu_window: ScrollWindow::new(view::menu_rows(window_size)),
        };

        (app, Task::done(()).map(|_: ()| AppEvent::IcedReady))
    }

    /// Return the window title.
    pub(crate) fn title(&self) -> String {
        match &self.screen {
            Screen::Shell(shell) => match shell.frame().title() {
                Some(title) => format!("Panel - {title}"),
                None => String::from("Panel"),
            },
            Screen::Entry { .. } => String::from("Panel"),
        }
    }

    /// Return the current iced theme.
    pub(crate) fn theme(&self) -> Theme {
        Theme::from(&self.theme)
    }

    /// Return active subscriptions.
    pub(crate) fn subscription(&self) -> Subscription<AppEvent> {
        subscription::subscription(self)
    }

    /// Handle an incoming event.
    pub(crate) fn update(&mut self, event: AppEvent) -> Task<AppEvent> {
        update::update(self, event)
    }

    /// Render the root view.
    pub(crate) fn view(&self) -> Element<'_, AppEvent, Theme, iced::Renderer> {
        view::view(self)
    }

    /// Run the session gate and start the shell when it passes.
    pub(crate) fn boot(&mut self) -> Task<AppEvent> {
        let width = self.window_size.width;
        let shell_config = match self.config.shell_config(width) {
            Ok(shell_config) => shell_config,
            Err(err) => {
                log::error!("panel configuration unusable: {err}");
                self.screen = Screen::Entry {
                    target: self.config.entry_page.clone(),
                    message: Some(err.to_string()),
                };
                return Task::none();
            },
        };

        let frame = DesktopFrame::new(shell_config.location.clone());
        let store = JsonFileStore::open_default();
        let view = ShellView {
            controls: ShellControls::all(),
            menu: self.config.menu.clone(),
        };

        match Shell::boot(shell_config, view, store, frame) {
            ShellBoot::Ready(mut shell) => {
                log::info!(
                    "shell started for {} ({})",
                    shell.session().username(),
                    shell.session().role().as_str()
                );
                shell.open_active();
                self.theme = AppTheme::new(shell.theme().is_dark());
                self.focus = FocusZone::Menu;
                self.menu_window.first = 0;
                let task = request_pending_page(&mut shell);
                self.screen = Screen::Shell(shell);
                task
            },
            ShellBoot::Redirect { target, .. } => {
                log::info!("no session, redirecting to {target}");
                self.screen = Screen::Entry {
                    target,
                    message: None,
                };
                Task::none()
            },
        }
    }
}

/// Read the page the frame navigated to, off the UI thread.
pub(crate) fn request_pending_page(
    shell: &mut PanelShell,
) -> Task<AppEvent> {
    let Some(url) = shell.frame_mut().take_pending() else {
        return Task::none();
    };
    let origin = shell.frame().origin().clone();

    Task::perform(
        async move { load_page(&origin, &url) },
        AppEvent::PageLoaded,
    )
}
