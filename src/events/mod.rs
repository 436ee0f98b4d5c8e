pub mod capture;
pub mod window;

pub use capture::CaptureSettings;
pub use window::{WindowHandle, WindowInfo};
