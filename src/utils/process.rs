use crate::events::WindowInfo;
use sysinfo::{Pid as SysinfoPid, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

/// Имена исполняемых файлов процессов, владеющих окнами.
///
/// Обновляются только PID, увиденные в текущем опросе окон.
pub struct ProcessNames {
    system: System,
}

impl ProcessNames {
    pub fn new() -> Self {
        Self { system: System::new() }
    }

    pub fn refresh(&mut self, pids: &[u32]) {
        let pids: Vec<SysinfoPid> = pids.iter().copied().map(SysinfoPid::from_u32).collect();
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&pids),
            true,
            ProcessRefreshKind::nothing().with_exe(UpdateKind::OnlyIfNotSet),
        );
    }

    /// Заполняет `executable` у окон с известным PID
    pub fn resolve_executables(&mut self, windows: &mut [WindowInfo]) {
        let pids: Vec<u32> = windows.iter().filter_map(|window| window.pid).collect();
        self.refresh(&pids);

        for window in windows.iter_mut() {
            if let Some(executable) = window.pid.and_then(|pid| self.executable(pid)) {
                window.executable = executable;
            }
        }
    }

    /// Имя файла из пути к бинарнику, иначе имя процесса
    pub fn executable(&self, pid: u32) -> Option<String> {
        let process = self.system.process(SysinfoPid::from_u32(pid))?;

        if let Some(name) = process.exe().and_then(|path| path.file_name()) {
            let name = name.to_string_lossy();
            // Удалённый бинарник помечается суффиксом " (deleted)"
            let name = name.trim_end_matches(" (deleted)");
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }

        let name = process.name().to_string_lossy();
        if name.is_empty() {
            None
        } else {
            Some(name.into_owned())
        }
    }
}
