// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{EditState, ReadlineError};

/// One round of Tab cycling. Exists from the Tab that produced candidates until the user
/// accepts (any other key), cancels (Escape), or the session ends.
///
/// A candidate replaces the text before the cursor; the text after the cursor is kept
/// and the cursor lands at the end of the candidate. After the last candidate the
/// original line comes back, and the next Tab starts over from the first candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionState {
    candidates: Vec<String>,
    /// Index into `candidates`; `candidates.len()` means the original line is shown.
    selected: usize,
    original_line: String,
    original_cursor: usize,
}

impl CompletionState {
    /// Snapshot `state` and show the first candidate. Returns [`None`] and leaves
    /// `state` alone when there are no candidates.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::OutOfMemory`] if the buffer can't grow.
    pub fn start(
        state: &mut EditState,
        candidates: Vec<String>,
    ) -> Result<Option<Self>, ReadlineError> {
        if candidates.is_empty() {
            return Ok(None);
        }
        let it = Self {
            candidates,
            selected: 0,
            original_line: state.buffer().to_owned(),
            original_cursor: state.cursor(),
        };
        it.show(state)?;
        Ok(Some(it))
    }

    /// Show the next candidate, or the original line after the last one.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::OutOfMemory`] if the buffer can't grow.
    pub fn cycle(&mut self, state: &mut EditState) -> Result<(), ReadlineError> {
        self.selected = (self.selected + 1) % (self.candidates.len() + 1);
        self.show(state)
    }

    /// Put the line back the way it was before the first Tab.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::OutOfMemory`] if the buffer can't grow.
    pub fn cancel(self, state: &mut EditState) -> Result<(), ReadlineError> {
        state.set_line_and_cursor(&self.original_line, self.original_cursor)
    }

    #[must_use]
    pub fn candidates(&self) -> &[String] { &self.candidates }

    /// The candidate on screen, [`None`] while the original line is shown.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.candidates.get(self.selected).map(String::as_str)
    }

    fn show(&self, state: &mut EditState) -> Result<(), ReadlineError> {
        match self.selected() {
            Some(candidate) => {
                let suffix = &self.original_line[self.original_cursor..];
                let mut line = String::new();
                line.try_reserve(candidate.len() + suffix.len())
                    .map_err(|_| ReadlineError::OutOfMemory)?;
                line.push_str(candidate);
                line.push_str(suffix);
                state.set_line_and_cursor(&line, candidate.len())
            }
            None => state.set_line_and_cursor(&self.original_line, self.original_cursor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn candidates() -> Vec<String> {
        ["foo", "foobar", "foobaz"].map(String::from).to_vec()
    }

    #[test]
    fn test_cycle_and_wrap_to_original() {
        let mut state = EditState::new("> ", 80, false);
        let mut completion = CompletionState::start(&mut state, candidates())
            .unwrap()
            .unwrap();
        assert_eq!(state.buffer(), "foo");

        completion.cycle(&mut state).unwrap();
        assert_eq!(state.buffer(), "foobar");
        completion.cycle(&mut state).unwrap();
        assert_eq!(state.buffer(), "foobaz");
        completion.cycle(&mut state).unwrap();
        assert_eq!(state.buffer(), "");
        assert_eq!(completion.selected(), None);

        // And around again.
        completion.cycle(&mut state).unwrap();
        assert_eq!(state.buffer(), "foo");
    }

    #[test]
    fn test_no_candidates_leaves_buffer() {
        let mut state = EditState::new("> ", 80, false);
        state.set_line("fo").unwrap();
        assert_eq!(CompletionState::start(&mut state, vec![]).unwrap(), None);
        assert_eq!(state.buffer(), "fo");
    }

    #[test]
    fn test_suffix_after_cursor_is_kept() {
        let mut state = EditState::new("> ", 80, false);
        state.set_line_and_cursor("git ch origin", 6).unwrap();
        let completion = CompletionState::start(
            &mut state,
            vec!["git checkout".to_owned()],
        )
        .unwrap()
        .unwrap();
        assert_eq!(state.buffer(), "git checkout origin");
        assert_eq!(state.cursor(), 12);

        completion.cancel(&mut state).unwrap();
        assert_eq!(state.buffer(), "git ch origin");
        assert_eq!(state.cursor(), 6);
    }
}
