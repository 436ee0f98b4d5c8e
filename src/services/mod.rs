pub mod capture_host;
pub mod capture_service;
pub mod matcher;
pub mod window_source;

#[cfg(test)]
mod test_utils;

pub use capture_service::create_capture_service;
