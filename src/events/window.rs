use std::fmt;

/// Непрозрачный идентификатор окна платформы (X11 window id).
/// Используется только для сравнения, никогда не разыменовывается.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u64);

impl WindowHandle {
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Разбор идентификатора в виде `0x03c00003` (wmctrl) или десятичного (xdotool)
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let value = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16).ok()?,
            None => raw.parse().ok()?,
        };
        Some(Self(value))
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// Снимок одного окна на момент опроса
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub title: String,
    pub executable: String,
    pub pid: Option<u32>,
}

impl WindowInfo {
    pub fn new(handle: WindowHandle, title: String) -> Self {
        Self {
            handle,
            title,
            executable: String::new(),
            pid: None,
        }
    }

    pub fn with_executable(mut self, executable: String) -> Self {
        self.executable = executable;
        self
    }

    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }

    /// Регистронезависимое сравнение имени исполняемого файла.
    /// `filter_lower` должен быть уже приведён к нижнему регистру.
    pub fn executable_matches(&self, filter_lower: &str) -> bool {
        self.executable.to_lowercase() == filter_lower
    }
}

impl fmt::Display for WindowInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.executable.is_empty() {
            write!(f, "\"{}\" [{}]", self.title, self.handle)
        } else {
            write!(f, "\"{}\" ({}) [{}]", self.title, self.executable, self.handle)
        }
    }
}
