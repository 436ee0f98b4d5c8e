//! WindowSource: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for listing open top-level
//! windows (handle/title/executable/pid). They MUST NOT decide which window is
//! captured; matching and capture updates belong to WindowMatcher.

mod dry_run;
mod wmctrl;
mod xdotool;
mod r#trait;

pub use self::r#trait::{create_window_source, WindowSource};
