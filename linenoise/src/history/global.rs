// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The process wide history ring and the free functions that operate on it.
//!
//! A poisoned lock is recovered rather than reported: [`History`] has no invariant that
//! a panic half way through an operation can break.

use super::{History, SafeHistory};
use crate::{ReadlineError, StdMutex};
use std::{path::Path,
          sync::{Arc, LazyLock, MutexGuard, PoisonError}};

static GLOBAL_HISTORY: LazyLock<SafeHistory> =
    LazyLock::new(|| Arc::new(StdMutex::new(History::default())));

/// Handle to the history shared by every [`crate::Editor`] that wasn't given its own.
#[must_use]
pub fn global_history() -> SafeHistory { GLOBAL_HISTORY.clone() }

/// Lock a [`SafeHistory`], recovering from poisoning.
pub fn lock_history(history: &SafeHistory) -> MutexGuard<'_, History> {
    history.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Add `line` to the process wide history. Returns `false` if it was empty or the same
/// as the newest entry.
pub fn history_add(line: &str) -> bool { lock_history(&GLOBAL_HISTORY).add(line) }

/// # Errors
///
/// [`ReadlineError::InvalidArgument`] if `max_len` is `0`.
pub fn history_set_max_len(max_len: usize) -> Result<(), ReadlineError> {
    lock_history(&GLOBAL_HISTORY).set_max_len(max_len)
}

/// # Errors
///
/// [`ReadlineError::Io`] if the file can't be written.
pub fn history_save(path: impl AsRef<Path>) -> Result<(), ReadlineError> {
    lock_history(&GLOBAL_HISTORY).save(path)
}

/// # Errors
///
/// [`ReadlineError::Io`] if the file exists but can't be read.
pub fn history_load(path: impl AsRef<Path>) -> Result<(), ReadlineError> {
    lock_history(&GLOBAL_HISTORY).load(path)
}

pub fn history_clear() { lock_history(&GLOBAL_HISTORY).clear(); }

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_history_add_is_idempotent_for_repeats() {
        history_clear();
        assert!(history_add("make test"));
        assert!(!history_add("make test"));
        assert_eq!(lock_history(&global_history()).len(), 1);
        history_clear();
    }

    #[test]
    #[serial]
    fn test_history_set_max_len_evicts_oldest() {
        history_clear();
        history_set_max_len(4).unwrap();
        for i in 0..9 {
            history_add(&format!("cmd {i}"));
        }
        let history = global_history();
        let entries: Vec<String> =
            lock_history(&history).iter().map(ToOwned::to_owned).collect();
        assert_eq!(entries, vec!["cmd 5", "cmd 6", "cmd 7", "cmd 8"]);

        assert!(history_set_max_len(0).is_err());
        assert_eq!(lock_history(&history).max_len(), 4);

        history_set_max_len(crate::DEFAULT_HISTORY_MAX_LEN).unwrap();
        history_clear();
    }

    #[test]
    #[serial]
    fn test_global_save_and_load() {
        history_clear();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        history_add("first");
        history_add("second\tline");
        history_save(&path).unwrap();
        history_clear();
        history_load(&path).unwrap();
        let history = global_history();
        assert_eq!(lock_history(&history).get(1), Some("second\tline"));
        history_clear();
    }
}
