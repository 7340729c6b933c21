//! TUI Application State Management
//!
//! Holds the report list, the rendered report and the loads waiting to be
//! started. Loaders never touch this state directly: they talk to a
//! [`ChannelSurface`] and the event loop applies the updates in order.

use tokio::sync::mpsc::UnboundedSender;

use podreport_core::ReportOption;
use viewer::{OutputArea, SelectionControl};

/// Lines moved by PageUp/PageDown
const PAGE_LINES: u16 = 20;

/// A change requested by a loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceUpdate {
    ClearOptions,
    AddOption(ReportOption),
    SetText(String),
}

/// Surface handed to the loaders; forwards every change to the UI loop.
#[derive(Debug, Clone)]
pub struct ChannelSurface {
    tx: UnboundedSender<SurfaceUpdate>,
}

impl ChannelSurface {
    pub fn new(tx: UnboundedSender<SurfaceUpdate>) -> Self {
        Self { tx }
    }

    fn send(&self, update: SurfaceUpdate) {
        // Closed only while the UI is shutting down.
        let _ = self.tx.send(update);
    }
}

impl SelectionControl for ChannelSurface {
    fn clear_options(&self) {
        self.send(SurfaceUpdate::ClearOptions);
    }

    fn add_option(&self, option: ReportOption) {
        self.send(SurfaceUpdate::AddOption(option));
    }
}

impl OutputArea for ChannelSurface {
    fn set_text(&self, text: &str) {
        self.send(SurfaceUpdate::SetText(text.to_string()));
    }
}

/// Work the event loop should start
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    Index,
    Report(String),
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the TUI is running
    pub running: bool,
    /// Where reports come from, shown in the header
    pub source_label: String,
    /// Options of the most recently loaded index
    pub options: Vec<ReportOption>,
    /// Index into `options`
    pub selected: usize,
    /// Rendered report or error text
    pub output: String,
    /// First visible output line
    pub scroll: u16,
    /// A requested load has not written the output area yet
    pub loading: bool,
    pending: Vec<LoadRequest>,
}

impl App {
    pub fn new(source_label: impl Into<String>) -> Self {
        Self {
            running: true,
            source_label: source_label.into(),
            options: Vec::new(),
            selected: 0,
            output: String::new(),
            scroll: 0,
            loading: true,
            pending: vec![LoadRequest::Index],
        }
    }

    pub fn apply(&mut self, update: SurfaceUpdate) {
        match update {
            SurfaceUpdate::ClearOptions => {
                self.options.clear();
                self.selected = 0;
            }
            SurfaceUpdate::AddOption(option) => self.options.push(option),
            SurfaceUpdate::SetText(text) => {
                self.output = text;
                self.scroll = 0;
                self.loading = false;
            }
        }
    }

    pub fn selected_option(&self) -> Option<&ReportOption> {
        self.options.get(self.selected)
    }

    /// Moves the selection and, when it changed, asks for that report.
    pub fn select(&mut self, position: usize) {
        if self.options.is_empty() {
            return;
        }
        let position = position.min(self.options.len() - 1);
        if position == self.selected {
            return;
        }
        self.selected = position;
        self.reload_report();
    }

    pub fn select_next(&mut self) {
        self.select(self.selected.saturating_add(1));
    }

    pub fn select_prev(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    pub fn select_first(&mut self) {
        self.select(0);
    }

    pub fn select_last(&mut self) {
        self.select(self.options.len().saturating_sub(1));
    }

    /// Loads the selected report again
    pub fn reload_report(&mut self) {
        if let Some(option) = self.selected_option() {
            let value = option.value.clone();
            self.request(LoadRequest::Report(value));
        }
    }

    pub fn reload_index(&mut self) {
        self.request(LoadRequest::Index);
    }

    fn request(&mut self, request: LoadRequest) {
        self.loading = true;
        self.pending.push(request);
    }

    pub fn scroll_down(&mut self) {
        let max = self.output.lines().count().saturating_sub(1);
        let max = u16::try_from(max).unwrap_or(u16::MAX);
        self.scroll = self.scroll.saturating_add(PAGE_LINES).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(PAGE_LINES);
    }

    pub fn take_requests(&mut self) -> Vec<LoadRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Quits the application
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    fn loaded_app(files: &[&str]) -> App {
        let mut app = App::new("output");
        app.take_requests();
        app.apply(SurfaceUpdate::ClearOptions);
        for file in files {
            app.apply(SurfaceUpdate::AddOption(ReportOption::for_file(file)));
        }
        app
    }

    #[test]
    fn starts_by_requesting_the_index() {
        let mut app = App::new("output");
        assert!(app.running);
        assert_eq!(app.take_requests(), vec![LoadRequest::Index]);
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn clearing_options_drops_stale_entries() {
        let mut app = loaded_app(&["report-a.json", "report-b.json"]);
        app.select_next();
        app.apply(SurfaceUpdate::ClearOptions);
        app.apply(SurfaceUpdate::AddOption(ReportOption::for_file("report-c.json")));

        assert_eq!(app.options.len(), 1);
        assert_eq!(app.selected, 0);
        assert_eq!(app.selected_option().unwrap().label, "c");
    }

    #[test]
    fn selection_change_requests_one_load() {
        let mut app = loaded_app(&["report-a.json", "report-b.json"]);

        app.select_next();
        assert_eq!(
            app.take_requests(),
            vec![LoadRequest::Report("report-b.json".to_string())]
        );

        // Already at the end: no change, no load.
        app.select_next();
        assert!(app.take_requests().is_empty());

        app.select_first();
        assert_eq!(
            app.take_requests(),
            vec![LoadRequest::Report("report-a.json".to_string())]
        );
    }

    #[test]
    fn selection_on_empty_list_does_nothing() {
        let mut app = loaded_app(&[]);
        app.select_next();
        app.reload_report();
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn new_text_resets_scroll() {
        let mut app = loaded_app(&["report-a.json"]);
        app.apply(SurfaceUpdate::SetText("line\n".repeat(100)));
        app.scroll_down();
        assert_eq!(app.scroll, PAGE_LINES);
        app.apply(SurfaceUpdate::SetText("short".to_string()));
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn loading_lasts_until_text_arrives() {
        let mut app = loaded_app(&["report-a.json", "report-b.json"]);
        assert!(app.loading);
        app.apply(SurfaceUpdate::SetText("{}".to_string()));
        assert!(!app.loading);

        app.select_next();
        assert!(app.loading);
        app.apply(SurfaceUpdate::SetText("{}".to_string()));
        app.reload_index();
        assert!(app.loading);
    }

    #[test]
    fn scrolling_stops_at_last_line() {
        let mut app = loaded_app(&[]);
        app.apply(SurfaceUpdate::SetText("a\nb\nc".to_string()));
        app.scroll_down();
        assert_eq!(app.scroll, 2);
        app.scroll_up();
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn channel_surface_forwards_in_order() {
        let (tx, mut rx) = unbounded_channel();
        let surface = ChannelSurface::new(tx);
        surface.clear_options();
        surface.add_option(ReportOption::for_file("report-a.json"));
        surface.set_text("{}");

        let mut app = App::new("output");
        while let Ok(update) = rx.try_recv() {
            app.apply(update);
        }
        assert_eq!(app.options.len(), 1);
        assert_eq!(app.output, "{}");
    }
}
