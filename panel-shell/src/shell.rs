//! The shell state machine: boot, event handling and timer dispatch.

use std::time::Duration;

use bitflags::bitflags;
use url::Url;

use crate::frame::{
    ADJUST_DELAYS, FADE_IN_DELAY, FrameHost, FrameLoader, LoadOutcome,
};
use crate::keyboard::{KeyOutcome, MenuKey, SearchKey, navigate};
use crate::menu::{Menu, MenuEntry};
use crate::search::{SEARCH_DEBOUNCE, SearchFilter};
use crate::session::{ENTRY_PAGE, GateDecision, Session, check_gate};
use crate::sidebar::{ClickTarget, MOBILE_BREAKPOINT, SidebarController};
use crate::store::{PreferenceStore, Preferences};
use crate::theme::ThemeState;
use crate::timer::TimerQueue;

bitflags! {
    /// Controls the front-end actually provides.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShellControls: u16 {
        const MENU_TOGGLE      = 1;
        const SIDEBAR          = 1 << 1;
        const MENU_LIST        = 1 << 2;
        const FRAME            = 1 << 3;
        const SEARCH_INPUT     = 1 << 4;
        const THEME_TOGGLE     = 1 << 5;
        const LOGOUT_BUTTON    = 1 << 6;
        const USERNAME_DISPLAY = 1 << 7;
        /// Controls without which the shell runs degraded.
        const REQUIRED         = Self::MENU_TOGGLE.bits()
                               | Self::SIDEBAR.bits()
                               | Self::MENU_LIST.bits()
                               | Self::FRAME.bits();
    }
}

/// Typed bindings handed to [`Shell::boot`] once at startup.
#[derive(Debug, Clone)]
pub struct ShellView {
    pub controls: ShellControls,
    pub menu: Vec<MenuEntry>,
}

impl ShellView {
    /// A view providing every control.
    pub fn complete(menu: Vec<MenuEntry>) -> Self {
        Self {
            controls: ShellControls::all(),
            menu,
        }
    }
}

/// Boot parameters.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Location the shell itself was loaded from. Menu targets resolve
    /// against it.
    pub location: Url,
    pub entry_page: String,
    pub breakpoint: f32,
    pub search_debounce: Duration,
    pub viewport_width: f32,
    pub system_prefers_dark: bool,
}

impl ShellConfig {
    pub fn new(location: Url, viewport_width: f32) -> Self {
        Self {
            location,
            entry_page: ENTRY_PAGE.to_string(),
            breakpoint: MOBILE_BREAKPOINT,
            search_debounce: SEARCH_DEBOUNCE,
            viewport_width,
            system_prefers_dark: false,
        }
    }
}

/// Input fed to [`Shell::handle`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    ToggleSidebar,
    ViewportResized { width: f32 },
    Clicked(ClickTarget),
    ItemPressed(usize),
    SearchInput(String),
    SearchKey(SearchKey),
    MenuKey(MenuKey),
    /// The frame finished loading its current source.
    FrameLoaded,
    ToggleTheme,
    Logout,
    /// Time elapsed since boot.
    Tick { now: Duration },
}

/// Work the front-end must carry out on the shell's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEffect {
    /// Leave the shell. `replace` drops the shell from history.
    Navigate { target: String, replace: bool },
    /// Bring the visible row `row` (menu item `item`) into view.
    ScrollIntoView { item: usize, row: usize },
    ClearSearchInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellTimer {
    SearchDebounce,
    FrameFadeIn,
    FrameAdjust(u8),
}

/// Result of [`Shell::boot`].
#[derive(Debug)]
pub enum ShellBoot<S, F> {
    Ready(Box<Shell<S, F>>),
    /// No session. The store and frame come back untouched.
    Redirect { target: String, store: S, frame: F },
}

impl<S, F> ShellBoot<S, F> {
    /// Effect the front-end performs for this outcome, if any.
    pub fn effect(&self) -> Option<ShellEffect> {
        match self {
            ShellBoot::Ready(_) => None,
            ShellBoot::Redirect { target, .. } => Some(ShellEffect::Navigate {
                target: target.clone(),
                replace: true,
            }),
        }
    }
}

#[derive(Debug)]
pub struct Shell<S, F> {
    prefs: Preferences<S>,
    frame: F,
    loader: FrameLoader,
    entry_page: String,
    controls: ShellControls,
    session: Session,
    menu: Menu,
    search: SearchFilter,
    search_debounce: Duration,
    sidebar: SidebarController,
    theme: ThemeState,
    timers: TimerQueue<ShellTimer>,
}

impl<S: PreferenceStore, F: FrameHost> Shell<S, F> {
    /// Run the session gate and, when it passes, wire up every component.
    pub fn boot(
        config: ShellConfig,
        view: ShellView,
        store: S,
        frame: F,
    ) -> ShellBoot<S, F> {
        let prefs = Preferences::new(store);
        let session = match check_gate(&prefs, &config.entry_page) {
            GateDecision::Admit(session) => session,
            GateDecision::Redirect { target } => {
                return ShellBoot::Redirect {
                    target,
                    store: prefs.into_inner(),
                    frame,
                };
            },
        };

        let missing = ShellControls::REQUIRED.difference(view.controls);
        if !missing.is_empty() {
            log::warn!("shell controls missing, running degraded: {missing:?}");
        }

        let mut menu = Menu::new(view.menu);
        menu.apply_role(session.role());

        let sidebar = SidebarController::restore(
            config.viewport_width,
            config.breakpoint,
            prefs.sidebar_collapsed(),
        );
        let theme =
            ThemeState::resolve(prefs.theme_dark(), config.system_prefers_dark);

        let mut shell = Self {
            prefs,
            frame,
            loader: FrameLoader::new(config.location),
            entry_page: config.entry_page,
            controls: view.controls,
            session,
            menu,
            search: SearchFilter::new(),
            search_debounce: config.search_debounce,
            sidebar,
            theme,
            timers: TimerQueue::new(),
        };
        shell.apply_theme(theme.is_dark());

        ShellBoot::Ready(Box::new(shell))
    }

    pub fn handle(&mut self, event: ShellEvent) -> Vec<ShellEffect> {
        match event {
            ShellEvent::ToggleSidebar => {
                if self.has(ShellControls::MENU_TOGGLE | ShellControls::SIDEBAR)
                {
                    if let Some(collapsed) = self.sidebar.toggle() {
                        self.prefs.set_sidebar_collapsed(collapsed);
                    }
                }
                Vec::new()
            },
            ShellEvent::ViewportResized { width } => {
                self.sidebar.on_viewport_resize(width);
                Vec::new()
            },
            ShellEvent::Clicked(target) => {
                self.sidebar.on_click(target);
                Vec::new()
            },
            ShellEvent::ItemPressed(index) => {
                self.press_item(index);
                Vec::new()
            },
            ShellEvent::SearchInput(raw) => {
                if self.has(ShellControls::SEARCH_INPUT) {
                    self.search.set_input(raw);
                    let delay = self.search_debounce;
                    self.timers.schedule(ShellTimer::SearchDebounce, delay);
                }
                Vec::new()
            },
            ShellEvent::SearchKey(key) => self.search_key(key),
            ShellEvent::MenuKey(key) => self.menu_key(key),
            ShellEvent::FrameLoaded => {
                self.frame_loaded();
                Vec::new()
            },
            ShellEvent::ToggleTheme => {
                if self.has(ShellControls::THEME_TOGGLE) {
                    self.apply_theme(!self.theme.is_dark());
                }
                Vec::new()
            },
            ShellEvent::Logout => self.logout(),
            ShellEvent::Tick { now } => {
                self.tick(now);
                Vec::new()
            },
        }
    }

    /// Set the theme and persist the choice.
    pub fn apply_theme(&mut self, dark: bool) {
        self.theme.set_dark(dark);
        self.prefs.set_theme_dark(dark);
    }

    /// Load the active item's target, if it has one.
    pub fn open_active(&mut self) -> Option<LoadOutcome> {
        let target = self.menu.active_item()?.target()?.to_string();
        self.load_target(&target)
    }

    /// Clear the session and leave for the entry page.
    pub fn logout(&mut self) -> Vec<ShellEffect> {
        self.prefs.clear_session();
        log::info!("logged out {}", self.session.username());
        vec![ShellEffect::Navigate {
            target: self.entry_page.clone(),
            replace: false,
        }]
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn controls(&self) -> ShellControls {
        self.controls
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn search(&self) -> &SearchFilter {
        &self.search
    }

    pub fn sidebar(&self) -> &SidebarController {
        &self.sidebar
    }

    pub fn theme(&self) -> ThemeState {
        self.theme
    }

    pub fn frame(&self) -> &F {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut F {
        &mut self.frame
    }

    pub fn preferences(&self) -> &Preferences<S> {
        &self.prefs
    }

    pub fn entry_page(&self) -> &str {
        &self.entry_page
    }

    /// Time since boot as last reported by a tick.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Earliest pending timer deadline; `None` when nothing is scheduled.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    fn has(&self, controls: ShellControls) -> bool {
        self.controls.contains(controls)
    }

    fn press_item(&mut self, index: usize) {
        if !self.has(ShellControls::MENU_LIST) {
            return;
        }
        let Some(target) = self
            .menu
            .item(index)
            .filter(|item| item.is_visible())
            .and_then(|item| item.target())
            .map(str::to_string)
        else {
            return;
        };

        self.load_target(&target);
        self.menu.set_active(index);
        self.sidebar.close_mobile();
    }

    fn search_key(&mut self, key: SearchKey) -> Vec<ShellEffect> {
        if !self.has(ShellControls::SEARCH_INPUT) {
            return Vec::new();
        }
        match key {
            SearchKey::Enter => {
                if self.timers.cancel(&ShellTimer::SearchDebounce) {
                    self.search.apply_pending(&mut self.menu);
                }
                if let Some(first) = self.menu.first_visible() {
                    self.select(first);
                }
                Vec::new()
            },
            SearchKey::Escape => {
                self.timers.cancel(&ShellTimer::SearchDebounce);
                self.search.clear(&mut self.menu);
                vec![ShellEffect::ClearSearchInput]
            },
        }
    }

    fn menu_key(&mut self, key: MenuKey) -> Vec<ShellEffect> {
        if !self.has(ShellControls::MENU_LIST) {
            return Vec::new();
        }
        match navigate(&mut self.menu, key) {
            KeyOutcome::Moved { item, row } => {
                vec![ShellEffect::ScrollIntoView { item, row }]
            },
            KeyOutcome::Activate { item } => {
                self.select(item);
                Vec::new()
            },
            KeyOutcome::Ignored => Vec::new(),
        }
    }

    /// Make `index` active, load its target and close the mobile drawer.
    fn select(&mut self, index: usize) {
        if let Some(target) = self
            .menu
            .item(index)
            .and_then(|item| item.target())
            .map(str::to_string)
        {
            self.load_target(&target);
        }
        self.menu.set_active(index);
        self.sidebar.close_mobile();
    }

    fn load_target(&mut self, target: &str) -> Option<LoadOutcome> {
        if !self.has(ShellControls::FRAME) {
            log::debug!("no content frame, {target} not loaded");
            return None;
        }
        Some(self.loader.load(&mut self.frame, target))
    }

    fn frame_loaded(&mut self) {
        if !self.has(ShellControls::FRAME) {
            return;
        }
        FrameLoader::begin_fade(&mut self.frame);
        self.timers.schedule(ShellTimer::FrameFadeIn, FADE_IN_DELAY);

        for (pass, delay) in ADJUST_DELAYS.iter().enumerate() {
            if delay.is_zero() {
                FrameLoader::adjust(&mut self.frame);
            } else {
                self.timers
                    .schedule(ShellTimer::FrameAdjust(pass as u8), *delay);
            }
        }
    }

    fn tick(&mut self, now: Duration) {
        for timer in self.timers.advance_to(now) {
            match timer {
                ShellTimer::SearchDebounce => {
                    self.search.apply_pending(&mut self.menu);
                },
                ShellTimer::FrameFadeIn => {
                    FrameLoader::finish_fade(&mut self.frame);
                },
                ShellTimer::FrameAdjust(_) => {
                    FrameLoader::adjust(&mut self.frame);
                },
            }
        }
    }
}
