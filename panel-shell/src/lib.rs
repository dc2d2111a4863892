//! Headless state machine for an embedded-application panel shell.
//!
//! The shell hosts other pages inside a content frame next to a sidebar
//! menu. This crate owns every decision the shell makes and none of the
//! rendering:
//! - [`session`] gates startup on a locally cached session marker,
//! - [`sidebar`] tracks the desktop collapse flag and the mobile drawer,
//! - [`menu`], [`search`] and [`keyboard`] maintain the visible items and
//!   the single active item,
//! - [`frame`] resolves targets, suppresses redundant loads and adjusts
//!   hosted documents the host lets it reach.
//!
//! Front-ends inject a [`PreferenceStore`] and a [`FrameHost`], call
//! [`Shell::boot`] once, then feed [`ShellEvent`]s (including clock
//! [`ShellEvent::Tick`]s) to [`Shell::handle`] and carry out the returned
//! [`ShellEffect`]s.

mod error;
pub mod frame;
pub mod keyboard;
pub mod menu;
pub mod search;
pub mod session;
mod shell;
pub mod sidebar;
pub mod store;
pub mod theme;
pub mod timer;

pub use error::{ContentAccessError, StoreError};
pub use frame::{FrameHost, HostedDocument};
pub use shell::{
    Shell, ShellBoot, ShellConfig, ShellControls, ShellEffect, ShellEvent,
    ShellView,
};
pub use store::{MemoryStore, PreferenceStore, Preferences, StoreKey};
