//! Advisory ring-buffer logger. Stands in for the out-of-scope
//! `Log(level, fmt, ...)` transport the firmware would forward to a
//! debug UART; here it's an in-process sink so tests can assert on
//! dispatch decisions (NACK reasons, mute state changes, model
//! activation) without a transport at all.

use core::sync::atomic::{AtomicUsize, Ordering};

const MAX_LOG_ENTRIES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Copy)]
pub struct LogRecord {
    pub level: Level,
    pub target: &'static str,
    pub message: &'static str,
}

struct Slot {
    level: Level,
    target: &'static str,
    message: &'static str,
}

const EMPTY_SLOT: Slot = Slot {
    level: Level::Trace,
    target: "",
    message: "",
};

static mut LOG: [Slot; MAX_LOG_ENTRIES] = [EMPTY_SLOT; MAX_LOG_ENTRIES];
static LOG_HEAD: AtomicUsize = AtomicUsize::new(0);
static LOG_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Appends a record to the ring buffer, overwriting the oldest entry
/// once full. Single-threaded cooperative core: no locking required, the
/// same way the rest of this crate treats the shared RDM buffer.
pub fn log(level: Level, target: &'static str, message: &'static str) {
    let head = LOG_HEAD.load(Ordering::Relaxed);
    // SAFETY: single-threaded cooperative execution, no reentrancy across
    // this call; `head` is only ever advanced by this function.
    unsafe {
        LOG[head] = Slot {
            level,
            target,
            message,
        };
    }
    LOG_HEAD.store((head + 1) % MAX_LOG_ENTRIES, Ordering::Relaxed);
    let count = LOG_COUNT.load(Ordering::Relaxed);
    if count < MAX_LOG_ENTRIES {
        LOG_COUNT.store(count + 1, Ordering::Relaxed);
    }
}

/// Iterates the log from oldest to newest entry currently retained.
pub struct LogIterator {
    remaining: usize,
    index: usize,
}

impl Iterator for LogIterator {
    type Item = LogRecord;

    fn next(&mut self) -> Option<LogRecord> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: read-only snapshot; writers only append via `log`.
        let slot = unsafe { &LOG[self.index] };
        let record = LogRecord {
            level: slot.level,
            target: slot.target,
            message: slot.message,
        };
        self.index = (self.index + 1) % MAX_LOG_ENTRIES;
        self.remaining -= 1;
        Some(record)
    }
}

pub fn iter() -> LogIterator {
    let count = LOG_COUNT.load(Ordering::Relaxed);
    let head = LOG_HEAD.load(Ordering::Relaxed);
    let start = if count < MAX_LOG_ENTRIES {
        0
    } else {
        head
    };
    LogIterator {
        remaining: count,
        index: start,
    }
}

/// Clears the log. Test-only: a real responder never needs to drop its
/// own history.
#[cfg(test)]
pub fn clear() {
    LOG_HEAD.store(0, Ordering::Relaxed);
    LOG_COUNT.store(0, Ordering::Relaxed);
}

#[macro_export]
macro_rules! log_info {
    ($target:expr, $message:expr) => {
        $crate::logger::log($crate::logger::Level::Info, $target, $message)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($target:expr, $message:expr) => {
        $crate::logger::log($crate::logger::Level::Warn, $target, $message)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_round_trip_in_order() {
        clear();
        log(Level::Info, "dispatch", "nack unknown pid");
        log(Level::Warn, "discovery", "muted");
        let records: heapless::Vec<LogRecord, 4> = iter().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "nack unknown pid");
        assert_eq!(records[1].level, Level::Warn);
    }
}
