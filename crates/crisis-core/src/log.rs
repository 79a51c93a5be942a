//! Event Log
//!
//! In-memory scrolling log held by the world, plus an append-only JSONL sink
//! for exporting entries from the headless runner.

use bevy_ecs::prelude::*;
use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crisis_events::{format_entry_id, LogEntry};

/// Append-only log of world events.
///
/// Keeps the newest `capacity` entries in insertion order; `total` counts
/// every entry ever appended, so it keeps growing after old entries scroll
/// out.
#[derive(Debug, Clone, PartialEq)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    total: u64,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            total: 0,
        }
    }

    /// Identifier the next appended entry should carry.
    pub fn next_id(&self) -> String {
        format_entry_id(self.total + 1)
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        self.total += 1;
    }

    /// Entries currently retained.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ever appended.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Retained entries, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// The newest `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip)
    }

    /// Entries appended after the log held `total_before` entries in total.
    ///
    /// Entries that already scrolled out are skipped.
    pub fn entries_since(&self, total_before: u64) -> impl Iterator<Item = &LogEntry> {
        let new = self.total.saturating_sub(total_before) as usize;
        let skip = self.entries.len().saturating_sub(new);
        self.entries.iter().skip(skip)
    }
}

/// Resource for exporting log entries to a JSONL file
#[derive(Resource)]
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    entry_count: u64,
}

impl EventLogger {
    /// Create a new logger writing to the specified path
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            entry_count: 0,
        })
    }

    /// Create a logger that discards entries
    pub fn null() -> Self {
        Self {
            writer: None,
            entry_count: 0,
        }
    }

    /// Entries written so far
    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }

    /// Write one entry as a JSON line
    pub fn log(&mut self, entry: &LogEntry) -> std::io::Result<()> {
        self.entry_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Write several entries
    pub fn log_batch<'a>(
        &mut self,
        entries: impl IntoIterator<Item = &'a LogEntry>,
    ) -> std::io::Result<()> {
        for entry in entries {
            self.log(entry)?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush event logger: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crisis_events::{ActionKind, ActorId, Outcome, SimTimestamp};
    use std::io::BufRead;

    fn action_entry(log: &EventLog, tick: u64) -> LogEntry {
        LogEntry::action(
            log.next_id(),
            SimTimestamp::at_tick(tick),
            ActorId::UnitedStates,
            ActionKind::Negotiate,
            "United States: Proposes emergency UN Security Council meeting",
        )
    }

    #[test]
    fn test_log_ids_sequential() {
        let mut log = EventLog::new(10);
        assert_eq!(log.next_id(), "evt_00000001");
        let entry = action_entry(&log, 1);
        log.push(entry);
        assert_eq!(log.next_id(), "evt_00000002");
        assert_eq!(log.len(), 1);
        assert_eq!(log.total(), 1);
    }

    #[test]
    fn test_log_scrolls_past_capacity() {
        let mut log = EventLog::new(3);
        for tick in 1..=5 {
            let entry = action_entry(&log, tick);
            log.push(entry);
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.total(), 5);
        let ids: Vec<_> = log.iter().map(|e| e.entry_id.as_str()).collect();
        assert_eq!(ids, vec!["evt_00000003", "evt_00000004", "evt_00000005"]);
    }

    #[test]
    fn test_recent_and_since() {
        let mut log = EventLog::new(10);
        for tick in 1..=4 {
            let entry = action_entry(&log, tick);
            log.push(entry);
        }
        let recent: Vec<_> = log.recent(2).map(|e| e.timestamp.tick).collect();
        assert_eq!(recent, vec![3, 4]);
        assert_eq!(log.recent(50).count(), 4);

        let since: Vec<_> = log.entries_since(3).map(|e| e.timestamp.tick).collect();
        assert_eq!(since, vec![4]);
        assert_eq!(log.entries_since(4).count(), 0);
    }

    #[test]
    fn test_jsonl_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        let mut log = EventLog::new(10);
        let entry = action_entry(&log, 1);
        log.push(entry);
        let outcome = LogEntry::outcome(
            log.next_id(),
            SimTimestamp::at_tick(1),
            Outcome::NuclearEscalation,
        );
        log.push(outcome);

        {
            let mut logger = EventLogger::new(&path).unwrap();
            logger.log_batch(log.iter()).unwrap();
            assert_eq!(logger.entry_count(), 2);
        }

        let file = File::open(&path).unwrap();
        let lines: Vec<String> = std::io::BufReader::new(file)
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        let parsed: LogEntry = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(parsed.entry_id, "evt_00000002");
        assert!(parsed.is_system());
    }

    #[test]
    fn test_null_logger() {
        let log = EventLog::new(4);
        let entry = action_entry(&log, 1);
        let mut logger = EventLogger::null();
        logger.log(&entry).unwrap();
        assert_eq!(logger.entry_count(), 1);
    }
}
