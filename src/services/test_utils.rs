//! Test doubles for the window source and capture host seams.

use crate::error::{CaptureError, Result};
use crate::events::{CaptureSettings, WindowHandle, WindowInfo};
use crate::services::capture_host::CaptureHost;
use crate::services::window_source::WindowSource;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn window(handle: u64, executable: &str, title: &str) -> WindowInfo {
    WindowInfo::new(WindowHandle(handle), title.to_string()).with_executable(executable.to_string())
}

#[derive(Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn load(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Returns pre-recorded enumeration results, one per call.
/// Once the script runs out it keeps returning `fallback`.
pub struct ScriptedWindows {
    script: VecDeque<std::result::Result<Vec<WindowInfo>, &'static str>>,
    fallback: Vec<WindowInfo>,
    calls: CallCounter,
}

impl ScriptedWindows {
    pub fn new(script: Vec<std::result::Result<Vec<WindowInfo>, &'static str>>) -> Self {
        Self {
            script: script.into(),
            fallback: Vec::new(),
            calls: CallCounter::default(),
        }
    }

    pub fn repeating(windows: Vec<WindowInfo>) -> Self {
        Self {
            script: VecDeque::new(),
            fallback: windows,
            calls: CallCounter::default(),
        }
    }

    pub fn calls(&self) -> CallCounter {
        self.calls.clone()
    }
}

impl WindowSource for ScriptedWindows {
    fn list_windows(&mut self) -> Result<Vec<WindowInfo>> {
        self.calls.bump();
        match self.script.pop_front() {
            Some(Ok(windows)) => Ok(windows),
            Some(Err(msg)) => Err(CaptureError::Enumeration(msg.to_string())),
            None => Ok(self.fallback.clone()),
        }
    }
}

#[derive(Default)]
struct HostState {
    writes: Vec<(String, CaptureSettings)>,
    failures_left: usize,
}

/// Records every successful write; can be told to fail the next N writes.
#[derive(Clone, Default)]
pub struct RecordingHost {
    state: Arc<Mutex<HostState>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self, count: usize) {
        self.state.lock().failures_left = count;
    }

    pub fn writes(&self) -> Vec<(String, CaptureSettings)> {
        self.state.lock().writes.clone()
    }
}

impl CaptureHost for RecordingHost {
    fn set_window_target(&mut self, source_name: &str, settings: &CaptureSettings) -> Result<()> {
        let mut state = self.state.lock();
        if state.failures_left > 0 {
            state.failures_left -= 1;
            return Err(CaptureError::HostWrite("source is gone".to_string()));
        }
        state.writes.push((source_name.to_string(), settings.clone()));
        Ok(())
    }
}
