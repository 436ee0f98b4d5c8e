mod capture_service;
mod r#trait;

pub use self::r#trait::create_capture_service;
