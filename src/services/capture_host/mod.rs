mod command;
mod logging;
mod r#trait;

pub use self::r#trait::{create_capture_host, CaptureHost};
