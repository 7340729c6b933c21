use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use podreport_core::ReportOption;

/// The control the user picks a report from.
pub trait SelectionControl: Send + Sync {
    fn clear_options(&self);

    fn add_option(&self, option: ReportOption);
}

/// The area showing the current report or the latest error.
pub trait OutputArea: Send + Sync {
    /// Replaces everything previously shown.
    fn set_text(&self, text: &str);
}

/// Surface that keeps its state in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    options: Mutex<Vec<ReportOption>>,
    text: Mutex<String>,
    writes: AtomicUsize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> Vec<ReportOption> {
        self.options
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn text(&self) -> String {
        self.text
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of times the output area was written.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl SelectionControl for MemorySurface {
    fn clear_options(&self) {
        self.options
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    fn add_option(&self, option: ReportOption) {
        self.options
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(option);
    }
}

impl OutputArea for MemorySurface {
    fn set_text(&self, text: &str) {
        let mut current = self.text.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        current.clear();
        current.push_str(text);
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}
