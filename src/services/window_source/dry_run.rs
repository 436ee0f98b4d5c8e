use super::r#trait::WindowSource;
use crate::error::Result;
use crate::events::{WindowHandle, WindowInfo};
use tracing::info;

/// Эмулирует набор окон: звонок то появляется, то пропадает,
/// а его окно каждый раз получает новый идентификатор.
pub struct DryRunWindowSource {
    poll_count: u64,
}

const CALL_PERIOD: u64 = 10;

impl DryRunWindowSource {
    pub fn new() -> Self {
        info!("Dry-run режим - WindowSource работает в режиме эмуляции");
        Self { poll_count: 0 }
    }
}

impl WindowSource for DryRunWindowSource {
    fn list_windows(&mut self) -> Result<Vec<WindowInfo>> {
        let poll = self.poll_count;
        self.poll_count += 1;

        let mut windows = vec![
            WindowInfo::new(WindowHandle(0x0100_0001), "Terminal - dry_run".to_string())
                .with_executable("alacritty".to_string()),
            WindowInfo::new(WindowHandle(0x0200_0001), "WhatsApp".to_string())
                .with_executable("whatsapp.exe".to_string()),
        ];

        // Первая половина каждого периода - идёт звонок
        let period = poll / CALL_PERIOD;
        if poll % CALL_PERIOD < CALL_PERIOD / 2 {
            windows.push(
                WindowInfo::new(
                    WindowHandle(0x0300_0000 + period),
                    "Ongoing video call - dry_run".to_string(),
                )
                .with_executable("whatsapp.exe".to_string()),
            );
        }

        Ok(windows)
    }
}
