use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Некорректное правило сопоставления: {0}")]
    InvalidRule(String),

    #[error("Не удалось получить список окон: {0}")]
    Enumeration(String),

    #[error("Не удалось обновить источник захвата: {0}")]
    HostWrite(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl CaptureError {
    pub fn invalid_rule<T>(msg: impl Into<String>) -> Result<T> {
        Err(CaptureError::InvalidRule(msg.into()))
    }
}

pub type Result<T> = std::result::Result<T, CaptureError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! capture_error {
    (enumeration, $($arg:tt)*) => {
        $crate::error::CaptureError::Enumeration(format!($($arg)*))
    };
    (host_write, $($arg:tt)*) => {
        $crate::error::CaptureError::HostWrite(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::CaptureError::Internal(format!($($arg)*))
    };
}
