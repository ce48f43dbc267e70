// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::Hint;

/// Supplies candidates for the text before the cursor. Called on Tab.
///
/// Any closure `FnMut(&str) -> miette::Result<Vec<String>>` is a provider.
///
/// The provider must not block for long and must not start another editing session. An
/// `Err` ends the session with [`crate::ReadlineError::Provider`] after the terminal is
/// restored.
pub trait CompletionProvider {
    /// # Errors
    ///
    /// Any error the host wants to surface from [`crate::Editor::read_line`].
    fn complete(&mut self, partial_line: &str) -> miette::Result<Vec<String>>;
}

impl<F> CompletionProvider for F
where
    F: FnMut(&str) -> miette::Result<Vec<String>>,
{
    fn complete(&mut self, partial_line: &str) -> miette::Result<Vec<String>> {
        self(partial_line)
    }
}

/// Supplies the inline hint for the whole current line. Called on every repaint.
///
/// Any closure `FnMut(&str) -> miette::Result<Option<Hint>>` is a provider. The same
/// rules as [`CompletionProvider`] apply.
pub trait HintProvider {
    /// # Errors
    ///
    /// Any error the host wants to surface from [`crate::Editor::read_line`].
    fn hint(&mut self, current_line: &str) -> miette::Result<Option<Hint>>;
}

impl<F> HintProvider for F
where
    F: FnMut(&str) -> miette::Result<Option<Hint>>,
{
    fn hint(&mut self, current_line: &str) -> miette::Result<Option<Hint>> {
        self(current_line)
    }
}

pub type BoxedCompletionProvider = Box<dyn CompletionProvider + Send>;
pub type BoxedHintProvider = Box<dyn HintProvider + Send>;

/// Completion provider for a fixed word list: every word that starts with the text
/// before the cursor, in list order.
#[derive(Debug, Clone, Default)]
pub struct PrefixCompleter {
    pub words: Vec<String>,
}

impl PrefixCompleter {
    #[must_use]
    pub fn new<S: Into<String>>(words: impl IntoIterator<Item = S>) -> Self {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl CompletionProvider for PrefixCompleter {
    fn complete(&mut self, partial_line: &str) -> miette::Result<Vec<String>> {
        Ok(self
            .words
            .iter()
            .filter(|it| it.starts_with(partial_line))
            .cloned()
            .collect())
    }
}
