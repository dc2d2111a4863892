//! Responsive sidebar: desktop collapse and mobile drawer with overlay.

/// Widths at or below this value use the mobile drawer.
pub const MOBILE_BREAKPOINT: f32 = 900.0;

/// Which side of the breakpoint a viewport width falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl ViewportClass {
    pub fn classify(width: f32, breakpoint: f32) -> Self {
        if width <= breakpoint {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }
}

/// Effective sidebar layout for the current viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarLayout {
    Expanded,
    Collapsed,
    Closed,
    Open,
}

/// Where a pointer press landed, as far as the sidebar cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Sidebar,
    MenuToggle,
    Overlay,
    Outside,
}

/// Full-viewport transparent layer that closes the mobile drawer on click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    id: u64,
}

impl Overlay {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Sidebar state machine.
///
/// The overlay exists exactly while the drawer is open on a mobile viewport.
#[derive(Debug, Clone)]
pub struct SidebarController {
    breakpoint: f32,
    width: f32,
    collapsed: bool,
    mobile_open: bool,
    overlay: Option<Overlay>,
    overlays_created: u64,
}

impl SidebarController {
    /// Build the initial state. The persisted collapsed flag only applies
    /// when starting on a desktop viewport; the drawer always starts closed.
    pub fn restore(
        width: f32,
        breakpoint: f32,
        persisted_collapsed: bool,
    ) -> Self {
        let viewport = ViewportClass::classify(width, breakpoint);
        let desktop = viewport == ViewportClass::Desktop;

        Self {
            breakpoint,
            width,
            collapsed: desktop && persisted_collapsed,
            mobile_open: false,
            overlay: None,
            overlays_created: 0,
        }
    }

    pub fn viewport(&self) -> ViewportClass {
        ViewportClass::classify(self.width, self.breakpoint)
    }

    pub fn is_mobile(&self) -> bool {
        self.viewport() == ViewportClass::Mobile
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn layout(&self) -> SidebarLayout {
        match (self.viewport(), self.mobile_open, self.collapsed) {
            (ViewportClass::Mobile, true, _) => SidebarLayout::Open,
            (ViewportClass::Mobile, false, _) => SidebarLayout::Closed,
            (ViewportClass::Desktop, _, true) => SidebarLayout::Collapsed,
            (ViewportClass::Desktop, _, false) => SidebarLayout::Expanded,
        }
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    /// Number of overlays ever created.
    pub fn overlays_created(&self) -> u64 {
        self.overlays_created
    }

    /// Flip the drawer on mobile or the collapsed flag on desktop.
    ///
    /// Returns the new collapsed flag when it changed and must be persisted.
    pub fn toggle(&mut self) -> Option<bool> {
        if self.is_mobile() {
            if self.mobile_open {
                self.close_mobile();
            } else {
                self.open_mobile();
            }
            None
        } else {
            self.collapsed = !self.collapsed;
            Some(self.collapsed)
        }
    }

    pub fn on_viewport_resize(&mut self, width: f32) {
        self.width = width;
        if !self.is_mobile() {
            self.close_mobile();
        }
    }

    /// Close the drawer for presses outside it and its toggle control.
    pub fn on_click(&mut self, target: ClickTarget) {
        if !self.is_mobile() {
            return;
        }
        match target {
            ClickTarget::Sidebar | ClickTarget::MenuToggle => {},
            ClickTarget::Overlay | ClickTarget::Outside => self.close_mobile(),
        }
    }

    /// Close the drawer if it is open. Desktop state is untouched.
    pub fn close_mobile(&mut self) {
        self.mobile_open = false;
        self.overlay = None;
    }

    fn open_mobile(&mut self) {
        self.mobile_open = true;
        if self.overlay.is_none() {
            self.overlays_created += 1;
            self.overlay = Some(Overlay {
                id: self.overlays_created,
            });
        }
    }
}
