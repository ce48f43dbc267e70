// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{CommandContext, CommandOutcome, EditCommand, EditorConfig, KeyBindings,
            apply_command, read_plain_line};
use crate::{BEL, BoxedCompletionProvider, BoxedHintProvider, CompletionProvider,
            CompletionState, EditState, HintProvider, KeyEvent, KeyReader, RawModeGuard,
            ReadlineError, ReadlineEvent, SafeHistory, Terminal, TerminalError,
            clear_screen_sequence, global_history, lock_history, refresh_for_session_end,
            refresh_line};
use std::fmt::{Debug, Formatter};

/// Reads lines from a terminal with editing, history, completion and hints.
///
/// An editor owns its configuration and providers, and shares a history ring. By
/// default that is the process wide [`global_history()`]; use
/// [`Editor::with_history`] to give it a separate one.
///
/// Only one editor may be reading at a time: the terminal can be in raw mode for one
/// session only. Providers must not start another session.
///
/// ```no_run
/// use r3bl_linenoise::{Editor, PrefixCompleter, ReadlineEvent};
///
/// # fn main() -> Result<(), r3bl_linenoise::ReadlineError> {
/// let mut editor = Editor::new();
/// editor.set_completion_provider(PrefixCompleter::new(["start", "stop", "status"]));
/// editor.set_multi_line(true);
/// if let ReadlineEvent::Line(line) = editor.read_line("cmd> ")? {
///     println!("{line}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct Editor {
    config: EditorConfig,
    bindings: KeyBindings,
    history: SafeHistory,
    completion_provider: Option<BoxedCompletionProvider>,
    hint_provider: Option<BoxedHintProvider>,
    /// Last killed text. Outlives sessions, like a shell's kill ring.
    clipboard: String,
}

impl Debug for Editor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("config", &self.config)
            .field("bindings", &self.bindings)
            .field("has_completion_provider", &self.completion_provider.is_some())
            .field("has_hint_provider", &self.hint_provider.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Editor {
    fn default() -> Self { Self::new() }
}

impl Editor {
    #[must_use]
    pub fn new() -> Self { Self::with_config(EditorConfig::default()) }

    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            config,
            bindings: KeyBindings::default_emacs(),
            history: global_history(),
            completion_provider: None,
            hint_provider: None,
            clipboard: String::new(),
        }
    }

    /// Use `history` instead of the process wide ring.
    #[must_use]
    pub fn with_history(mut self, history: SafeHistory) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig { &self.config }

    pub fn config_mut(&mut self) -> &mut EditorConfig { &mut self.config }

    pub fn key_bindings_mut(&mut self) -> &mut KeyBindings { &mut self.bindings }

    #[must_use]
    pub fn history(&self) -> SafeHistory { self.history.clone() }

    pub fn set_multi_line(&mut self, multi_line: bool) { self.config.multi_line = multi_line; }

    pub fn set_mask_mode(&mut self, mask_mode: bool) { self.config.mask_mode = mask_mode; }

    pub fn set_completion_provider(
        &mut self,
        provider: impl CompletionProvider + Send + 'static,
    ) {
        self.completion_provider = Some(Box::new(provider));
    }

    pub fn clear_completion_provider(&mut self) { self.completion_provider = None; }

    pub fn set_hint_provider(&mut self, provider: impl HintProvider + Send + 'static) {
        self.hint_provider = Some(Box::new(provider));
    }

    pub fn clear_hint_provider(&mut self) { self.hint_provider = None; }

    /// Read one line from the process's terminal.
    ///
    /// # Errors
    ///
    /// See [`Editor::read_line_with`].
    #[cfg(unix)]
    pub fn read_line(&mut self, prompt: &str) -> Result<ReadlineEvent, ReadlineError> {
        self.read_line_with(&mut crate::StdTerminal::default(), prompt)
    }

    /// Read one line from `terminal`.
    ///
    /// - Input that is not a terminal is read as a plain line with no prompt.
    /// - A terminal that can't be redrawn gets the prompt and a plain line read.
    /// - Otherwise the terminal is put in raw mode for the session and restored before
    ///   this returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// - [`ReadlineError::Io`] if reading or writing fails.
    /// - [`ReadlineError::Provider`] if a completion or hint provider fails.
    /// - [`ReadlineError::OutOfMemory`] if the line can't grow.
    pub fn read_line_with<T: Terminal + ?Sized>(
        &mut self,
        terminal: &mut T,
        prompt: &str,
    ) -> Result<ReadlineEvent, ReadlineError> {
        let backoff = self.config.would_block_backoff;

        if !terminal.is_interactive() {
            tracing::debug!(message = "input is not a terminal, reading a plain line");
            return read_plain_line(terminal, backoff);
        }

        if terminal.is_unsupported() {
            tracing::debug!(message = "unsupported terminal, reading a plain line");
            terminal.write_raw(prompt.as_bytes())?;
            return read_plain_line(terminal, backoff);
        }

        // The error is moved out of the result so the guard's borrow of `terminal` has
        // ended by the time the plain read needs it again.
        let guard_result = RawModeGuard::new(&mut *terminal);
        let mut guard = match guard_result {
            Ok(guard) => guard,
            Err(TerminalError::NotATerminal) => {
                drop(guard_result);
                return read_plain_line(terminal, backoff);
            }
            Err(err) => return Err(err.into()),
        };

        lock_history(&self.history).reset_navigation();
        let result = self.edit_session(&mut *guard, prompt);
        lock_history(&self.history).reset_navigation();

        match &result {
            Ok(event) => tracing::debug!(message = "session ended", outcome = event.kind()),
            Err(err) => tracing::warn!(message = "session failed", error = %err),
        }
        result
    }

    /// Erase the screen of `terminal` and home the cursor.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::Io`] if the write fails.
    pub fn clear_screen_with<T: Terminal + ?Sized>(
        terminal: &mut T,
    ) -> Result<(), ReadlineError> {
        terminal.write_raw(clear_screen_sequence().as_bytes())?;
        Ok(())
    }

    fn edit_session<T: Terminal + ?Sized>(
        &mut self,
        terminal: &mut T,
        prompt: &str,
    ) -> Result<ReadlineEvent, ReadlineError> {
        let mut state = EditState::new(prompt, terminal.columns(), self.config.multi_line);
        let mut reader = KeyReader::new(self.config.escape_timeout);
        let mut completion: Option<CompletionState> = None;

        self.repaint(terminal, &mut state, "")?;

        loop {
            let key = match reader.next_key(terminal) {
                Ok(key) => key,
                Err(TerminalError::WouldBlock) => {
                    terminal.poll_input(self.config.would_block_backoff)?;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            if !self.config.mask_mode {
                tracing::trace!(message = "key", ?key);
            }

            if completion.is_some() {
                match key {
                    KeyEvent::Tab => {
                        if let Some(active) = completion.as_mut() {
                            active.cycle(&mut state)?;
                        }
                        self.repaint(terminal, &mut state, "")?;
                        continue;
                    }
                    KeyEvent::Escape => {
                        if let Some(active) = completion.take() {
                            active.cancel(&mut state)?;
                        }
                        self.repaint(terminal, &mut state, "")?;
                        continue;
                    }
                    // Keep cycling across a resize.
                    KeyEvent::Resize => {}
                    // Commit what is shown and handle the key as usual.
                    _ => completion = None,
                }
            }

            let outcome = match key {
                KeyEvent::Resize => {
                    state.terminal_columns = usize::from(terminal.columns().max(1));
                    CommandOutcome::Refresh
                }
                KeyEvent::Eof if state.is_empty() => CommandOutcome::EndOfInput,
                KeyEvent::Eof => CommandOutcome::Submit,
                _ => self.dispatch(terminal, &mut state, &mut completion, key)?,
            };

            match outcome {
                CommandOutcome::Ignored => {}
                CommandOutcome::Refresh => self.repaint(terminal, &mut state, "")?,
                CommandOutcome::ClearScreen => {
                    state.rendered_rows = 0;
                    state.rendered_cursor_row = 0;
                    self.repaint(terminal, &mut state, &clear_screen_sequence())?;
                }
                CommandOutcome::Submit => {
                    self.end_session(terminal, &mut state)?;
                    return Ok(ReadlineEvent::Line(state.take_buffer()));
                }
                CommandOutcome::Interrupt => {
                    self.end_session(terminal, &mut state)?;
                    return Ok(ReadlineEvent::Interrupted);
                }
                CommandOutcome::EndOfInput => {
                    self.end_session(terminal, &mut state)?;
                    return Ok(ReadlineEvent::Eof);
                }
            }
        }
    }

    fn dispatch<T: Terminal + ?Sized>(
        &mut self,
        terminal: &mut T,
        state: &mut EditState,
        completion: &mut Option<CompletionState>,
        key: KeyEvent,
    ) -> Result<CommandOutcome, ReadlineError> {
        match self.bindings.command_for(key) {
            Some(EditCommand::Complete) => {
                *completion = self.start_completion(terminal, state)?;
                Ok(completion.is_some().into())
            }
            Some(command) => apply_command(
                command,
                &mut CommandContext {
                    state,
                    clipboard: &mut self.clipboard,
                    history: &self.history,
                },
            ),
            None => match key {
                KeyEvent::Char(ch) => Ok(state.insert_char(ch)?.into()),
                _ => Ok(CommandOutcome::Ignored),
            },
        }
    }

    /// Ask the provider for candidates and show the first. Tab with no provider does
    /// nothing.
    fn start_completion<T: Terminal + ?Sized>(
        &mut self,
        terminal: &mut T,
        state: &mut EditState,
    ) -> Result<Option<CompletionState>, ReadlineError> {
        let Some(provider) = self.completion_provider.as_mut() else {
            return Ok(None);
        };

        let candidates = provider.complete(state.before_cursor()).map_err(|report| {
            tracing::warn!(message = "completion provider failed", error = %report);
            ReadlineError::Provider(report)
        })?;
        tracing::debug!(message = "completion", candidates = candidates.len());

        let completion = CompletionState::start(state, candidates)?;
        if completion.is_none() && self.config.beep_on_no_completion {
            terminal.write_raw(BEL.as_bytes())?;
        }
        Ok(completion)
    }

    /// Write `prefix` followed by a repaint of the line, in one write.
    fn repaint<T: Terminal + ?Sized>(
        &mut self,
        terminal: &mut T,
        state: &mut EditState,
        prefix: &str,
    ) -> Result<(), ReadlineError> {
        let hint = match self.hint_provider.as_mut() {
            Some(provider) if !self.config.mask_mode => {
                provider.hint(state.buffer()).map_err(|report| {
                    tracing::warn!(message = "hint provider failed", error = %report);
                    ReadlineError::Provider(report)
                })?
            }
            _ => None,
        };

        let mut output = prefix.to_owned();
        output.push_str(&refresh_line(state, hint.as_ref(), self.config.mask_mode));
        terminal.write_raw(output.as_bytes())?;
        Ok(())
    }

    fn end_session<T: Terminal + ?Sized>(
        &self,
        terminal: &mut T,
        state: &mut EditState,
    ) -> Result<(), ReadlineError> {
        let output = refresh_for_session_end(state, self.config.mask_mode);
        terminal.write_raw(output.as_bytes())?;
        Ok(())
    }
}

/// Read one line from the process's terminal with a default [`Editor`]: emacs keys and
/// the process wide history, no completion or hints.
///
/// # Errors
///
/// See [`Editor::read_line_with`].
#[cfg(unix)]
pub fn read_line(prompt: &str) -> Result<ReadlineEvent, ReadlineError> {
    Editor::new().read_line(prompt)
}

/// Erase the process's terminal and home the cursor.
///
/// # Errors
///
/// [`ReadlineError::Io`] if the write fails.
#[cfg(unix)]
pub fn clear_screen() -> Result<(), ReadlineError> {
    Editor::clear_screen_with(&mut crate::StdTerminal::default())
}
