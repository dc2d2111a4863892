pub(crate) mod content_frame;
pub(crate) mod drawer_overlay;
pub(crate) mod entry_screen;
pub(crate) mod search_box;
pub(crate) mod sidebar_menu;
pub(crate) mod top_bar;
