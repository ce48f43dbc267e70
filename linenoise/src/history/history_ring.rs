// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ReadlineError, StdMutex};
use rustc_hash::FxHashMap;
use std::{collections::VecDeque, sync::Arc};

/// Capacity of a new [`History`].
pub const DEFAULT_HISTORY_MAX_LEN: usize = 100;

pub type SafeHistory = Arc<StdMutex<History>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    /// Up, Ctrl-P.
    Older,
    /// Down, Ctrl-N.
    Newer,
}

/// Bounded list of entered lines, oldest first, with no two equal lines next to each
/// other.
///
/// During navigation the line being edited is kept in a scratch slot and comes back when
/// the user moves past the newest entry. Edits made to a recalled entry are kept in an
/// overlay for the rest of the session and never change the stored entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    max_len: usize,
    /// [`None`] while editing the live line.
    nav_index: Option<usize>,
    scratch: String,
    edits: FxHashMap<usize, String>,
}

impl Default for History {
    fn default() -> Self { Self::new(DEFAULT_HISTORY_MAX_LEN) }
}

impl History {
    /// `max_len` of `0` is bumped to `1`; use [`History::set_max_len`] to validate input.
    #[must_use]
    pub fn new(max_len: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_len: max_len.max(1),
            nav_index: None,
            scratch: String::new(),
            edits: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn new_safe() -> SafeHistory { Arc::new(StdMutex::new(History::default())) }

    /// Append `line`. Returns `false` (and changes nothing) for an empty line or a
    /// repeat of the newest entry. The oldest entry is evicted when full. Ends any
    /// navigation in progress.
    pub fn add(&mut self, line: &str) -> bool {
        self.reset_navigation();
        if line.is_empty() || self.entries.back().is_some_and(|last| last == line) {
            return false;
        }
        self.entries.push_back(line.to_owned());
        while self.entries.len() > self.max_len {
            self.entries.pop_front();
        }
        true
    }

    /// Change the capacity, dropping the oldest entries if there are more than `max_len`.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::InvalidArgument`] for `0`. Nothing changes in that case.
    pub fn set_max_len(&mut self, max_len: usize) -> Result<(), ReadlineError> {
        if max_len == 0 {
            return Err(ReadlineError::InvalidArgument {
                what: "history max length",
                value: max_len.to_string(),
            });
        }
        self.reset_navigation();
        self.max_len = max_len;
        while self.entries.len() > max_len {
            self.entries.pop_front();
        }
        Ok(())
    }

    #[must_use]
    pub fn max_len(&self) -> usize { self.max_len }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Entry by age, `0` is the oldest.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.entries.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.reset_navigation();
        self.entries.clear();
    }

    /// Replace every entry, keeping the invariants: empty lines and adjacent repeats are
    /// skipped, and only the newest `max_len` survive.
    pub fn replace_entries<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.clear();
        for line in lines {
            self.add(line.as_ref());
        }
    }

    #[must_use]
    pub fn is_navigating(&self) -> bool { self.nav_index.is_some() }

    /// Go back to editing the live line and forget scratch and overlay edits.
    pub fn reset_navigation(&mut self) {
        self.nav_index = None;
        self.scratch.clear();
        self.edits.clear();
    }

    /// Move one entry in `direction`. `current_line` is what the buffer holds right now;
    /// it is saved so coming back to this position shows it again.
    ///
    /// Returns the line to show, or [`None`] if there is nowhere to go: older than the
    /// oldest, or newer while not navigating.
    pub fn navigate(
        &mut self,
        direction: HistoryDirection,
        current_line: &str,
    ) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }

        let next_index = match (direction, self.nav_index) {
            (HistoryDirection::Older, None) => Some(self.entries.len() - 1),
            (HistoryDirection::Older, Some(0)) | (HistoryDirection::Newer, None) => {
                return None;
            }
            (HistoryDirection::Older, Some(index)) => Some(index - 1),
            (HistoryDirection::Newer, Some(index)) if index + 1 < self.entries.len() => {
                Some(index + 1)
            }
            (HistoryDirection::Newer, Some(_)) => None,
        };

        // Remember what is being left.
        match self.nav_index {
            None => current_line.clone_into(&mut self.scratch),
            Some(index) => {
                if self.entries.get(index).is_some_and(|it| it == current_line) {
                    self.edits.remove(&index);
                } else {
                    self.edits.insert(index, current_line.to_owned());
                }
            }
        }

        self.nav_index = next_index;
        match next_index {
            Some(index) => Some(
                self.edits
                    .get(&index)
                    .or_else(|| self.entries.get(index))
                    .cloned()
                    .unwrap_or_default(),
            ),
            None => {
                let live = std::mem::take(&mut self.scratch);
                self.edits.clear();
                Some(live)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn history_with(lines: &[&str]) -> History {
        let mut it = History::default();
        for line in lines {
            it.add(line);
        }
        it
    }

    #[test]
    fn test_add_skips_empty_and_adjacent_repeat() {
        let mut it = History::default();
        assert!(it.add("ls"));
        assert!(!it.add("ls"));
        assert!(!it.add(""));
        assert!(it.add("pwd"));
        assert!(it.add("ls"));
        assert_eq!(it.iter().collect::<Vec<_>>(), vec!["ls", "pwd", "ls"]);
    }

    #[test]
    fn test_max_len_evicts_oldest() {
        let mut it = History::default();
        it.set_max_len(3).unwrap();
        for i in 0..8 {
            it.add(&format!("line {i}"));
        }
        assert_eq!(it.iter().collect::<Vec<_>>(), vec!["line 5", "line 6", "line 7"]);
    }

    #[test]
    fn test_set_max_len_rejects_zero() {
        let mut it = history_with(&["a", "b"]);
        assert!(matches!(
            it.set_max_len(0),
            Err(ReadlineError::InvalidArgument { .. })
        ));
        assert_eq!(it.max_len(), DEFAULT_HISTORY_MAX_LEN);
        assert_eq!(it.len(), 2);
    }

    #[test]
    fn test_shrink_keeps_newest() {
        let mut it = history_with(&["a", "b", "c", "d"]);
        it.set_max_len(2).unwrap();
        assert_eq!(it.iter().collect::<Vec<_>>(), vec!["c", "d"]);
    }

    #[test]
    fn test_navigation_restores_scratch() {
        let mut it = history_with(&["one", "two"]);
        assert_eq!(it.navigate(HistoryDirection::Newer, "live"), None);
        assert_eq!(it.navigate(HistoryDirection::Older, "live").as_deref(), Some("two"));
        assert_eq!(it.navigate(HistoryDirection::Older, "two").as_deref(), Some("one"));
        // Past the oldest stays put.
        assert_eq!(it.navigate(HistoryDirection::Older, "one"), None);
        assert_eq!(it.navigate(HistoryDirection::Newer, "one").as_deref(), Some("two"));
        assert_eq!(it.navigate(HistoryDirection::Newer, "two").as_deref(), Some("live"));
        assert!(!it.is_navigating());
    }

    #[test]
    fn test_edits_to_recalled_entry_are_overlaid() {
        let mut it = history_with(&["one", "two"]);
        it.navigate(HistoryDirection::Older, "");
        // User edits "two" into "two!" and moves on.
        assert_eq!(it.navigate(HistoryDirection::Older, "two!").as_deref(), Some("one"));
        assert_eq!(it.navigate(HistoryDirection::Newer, "one").as_deref(), Some("two!"));
        // The stored entry is untouched.
        assert_eq!(it.get(1), Some("two"));
        it.reset_navigation();
        assert_eq!(it.navigate(HistoryDirection::Older, "").as_deref(), Some("two"));
    }

    #[test]
    fn test_replace_entries_enforces_invariants() {
        let mut it = History::new(2);
        it.replace_entries(["a", "a", "", "b", "c"]);
        assert_eq!(it.iter().collect::<Vec<_>>(), vec!["b", "c"]);
    }
}
