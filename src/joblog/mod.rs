use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod db;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel { Debug, Info, Warn, Error }

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<LogLevel> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub job_id: Uuid,
    pub level: LogLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

// Append-only log handle scoped to one import job. Clones share the same
// buffer; appends are FIFO within the job and never surface a failure to
// the caller.
#[derive(Clone)]
pub struct JobLog {
    job_id: Uuid,
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl JobLog {
    pub fn new(job_id: Uuid) -> Self {
        JobLog { job_id, entries: Arc::new(Mutex::new(Vec::new())) }
    }

    pub fn job_id(&self) -> Uuid { self.job_id }

    pub fn debug(&self, msg: impl Into<String>) { self.append(LogLevel::Debug, msg.into()); }
    pub fn info(&self, msg: impl Into<String>) { self.append(LogLevel::Info, msg.into()); }
    pub fn warn(&self, msg: impl Into<String>) { self.append(LogLevel::Warn, msg.into()); }
    pub fn error(&self, msg: impl Into<String>) { self.append(LogLevel::Error, msg.into()); }

    fn append(&self, level: LogLevel, message: String) {
        match level {
            LogLevel::Debug => tracing::debug!(job = %self.job_id, "{}", message),
            LogLevel::Info => tracing::info!(job = %self.job_id, "{}", message),
            LogLevel::Warn => tracing::warn!(job = %self.job_id, "{}", message),
            LogLevel::Error => tracing::error!(job = %self.job_id, "{}", message),
        }
        let entry = LogEntry { job_id: self.job_id, level, message, created_at: Utc::now() };
        match self.entries.lock() {
            Ok(mut guard) => guard.push(entry),
            // a poisoned buffer drops the entry rather than failing extraction
            Err(_) => tracing::warn!(job = %self.job_id, "job log buffer poisoned, entry dropped"),
        }
    }

    // Drain the buffered entries for persistence, preserving append order.
    pub fn take(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order_within_job() {
        let log = JobLog::new(Uuid::new_v4());
        log.info("first");
        log.warn("second");
        log.info("third");
        let entries = log.take();
        let msgs: Vec<&str> = entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(msgs, ["first", "second", "third"]);
        assert_eq!(entries[1].level, LogLevel::Warn);
    }

    #[test]
    fn clones_share_one_buffer() {
        let log = JobLog::new(Uuid::new_v4());
        let other = log.clone();
        log.info("a");
        other.info("b");
        assert_eq!(log.take().len(), 2);
        assert!(other.take().is_empty());
    }

    #[test]
    fn concurrent_appends_all_land() {
        let log = JobLog::new(Uuid::new_v4());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let l = log.clone();
                std::thread::spawn(move || {
                    for j in 0..50 { l.info(format!("t{i} m{j}")); }
                })
            })
            .collect();
        for h in handles { h.join().unwrap(); }
        assert_eq!(log.take().len(), 8 * 50);
    }

    #[test]
    fn level_parse_roundtrip() {
        for lvl in [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error] {
            assert_eq!(LogLevel::parse(lvl.as_str()), Some(lvl));
        }
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("nope"), None);
    }
}
