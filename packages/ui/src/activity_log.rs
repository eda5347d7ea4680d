//! In-app activity log: every load, save and delete outcome a page reports.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

/// Entries beyond this are dropped oldest first.
pub const MAX_ENTRIES: usize = 200;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
    /// Show only failed requests.
    pub errors_only: bool,
    unseen_errors: usize,
}

impl ActivityLog {
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        if level == LogLevel::Error && !self.visible {
            self.unseen_errors += 1;
        }
        self.entries.push(LogEntry {
            timestamp: current_time(),
            level,
            message: message.into(),
        });
        if self.entries.len() > MAX_ENTRIES {
            let excess = self.entries.len() - MAX_ENTRIES;
            self.entries.drain(..excess);
        }
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.level == LogLevel::Error)
            .count()
    }

    /// Failures logged while the panel was closed.
    pub fn unseen_errors(&self) -> usize {
        self.unseen_errors
    }

    /// Opening the panel marks every failure as seen.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if self.visible {
            self.unseen_errors = 0;
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.unseen_errors = 0;
    }

    /// Newest first, narrowed to failures when `errors_only` is set.
    pub fn shown(&self) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| !self.errors_only || e.level == LogLevel::Error)
            .collect()
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

/// Provides the log signal to its children.
#[component]
pub fn ActivityLogProvider(children: Element) -> Element {
    use_context_provider(|| Signal::new(ActivityLog::default()));
    rsx! {
        {children}
    }
}

/// Append to the panel and mirror the message to `tracing`.
pub fn log_activity(log: &mut Signal<ActivityLog>, level: LogLevel, message: &str) {
    match level {
        LogLevel::Error => tracing::error!("{message}"),
        LogLevel::Warning => tracing::warn!("{message}"),
        LogLevel::Info | LogLevel::Success => tracing::info!("{message}"),
    }
    log.write().push(level, message);
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_caps_entries() {
        let mut log = ActivityLog::default();
        for i in 0..MAX_ENTRIES + 5 {
            log.push(LogLevel::Info, format!("entry {i}"));
        }
        assert_eq!(log.entries.len(), MAX_ENTRIES);
        assert_eq!(log.entries[0].message, "entry 5");
    }

    #[test]
    fn test_error_count() {
        let mut log = ActivityLog::default();
        log.push(LogLevel::Error, "Kunne ikke laste ordrer");
        log.push(LogLevel::Success, "Ordre lagret");
        log.push(LogLevel::Error, "Kunne ikke slette");
        assert_eq!(log.error_count(), 2);
        assert_eq!(log.entries[1].timestamp.len(), 8);
    }

    #[test]
    fn test_unseen_errors_reset_when_opened() {
        let mut log = ActivityLog::default();
        log.push(LogLevel::Error, "Kunne ikke laste kunder");
        log.push(LogLevel::Success, "Kunde lagret");
        assert_eq!(log.unseen_errors(), 1);

        log.toggle();
        assert!(log.visible);
        assert_eq!(log.unseen_errors(), 0);
        log.push(LogLevel::Error, "Kunne ikke slette");
        assert_eq!(log.unseen_errors(), 0);

        log.toggle();
        log.push(LogLevel::Error, "Kunne ikke lagre");
        assert_eq!(log.unseen_errors(), 1);
        log.clear();
        assert_eq!(log.unseen_errors(), 0);
        assert!(log.entries.is_empty());
    }

    #[test]
    fn test_errors_only_newest_first() {
        let mut log = ActivityLog::default();
        log.push(LogLevel::Error, "første");
        log.push(LogLevel::Info, "info");
        log.push(LogLevel::Error, "andre");

        assert_eq!(log.shown().len(), 3);
        log.errors_only = true;
        let messages: Vec<_> = log.shown().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["andre", "første"]);
    }
}
