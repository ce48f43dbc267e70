// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::EditCommand;
use crate::{EditState, HistoryDirection, ReadlineError, SafeHistory, WordCase,
            lock_history};

/// What the session loop should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The line or cursor changed. Repaint.
    Refresh,
    /// Nothing changed.
    Ignored,
    /// Erase the screen, then repaint at the top.
    ClearScreen,
    /// Enter. End the session with the current line.
    Submit,
    /// Ctrl-C. End the session with nothing.
    Interrupt,
    /// Ctrl-D on an empty line.
    EndOfInput,
}

impl From<bool> for CommandOutcome {
    fn from(changed: bool) -> Self {
        if changed {
            CommandOutcome::Refresh
        } else {
            CommandOutcome::Ignored
        }
    }
}

/// Borrowed pieces of the session a command can touch.
#[derive(Debug)]
pub struct CommandContext<'a> {
    pub state: &'a mut EditState,
    /// Text removed by the last kill, inserted again by [`EditCommand::Yank`].
    pub clipboard: &'a mut String,
    pub history: &'a SafeHistory,
}

/// Run `command` against the session.
///
/// [`EditCommand::Complete`] is [`CommandOutcome::Ignored`] here; the editor handles it
/// since it owns the completion provider.
///
/// # Errors
///
/// [`ReadlineError::OutOfMemory`] if the buffer can't grow.
pub fn apply_command(
    command: EditCommand,
    ctx: &mut CommandContext<'_>,
) -> Result<CommandOutcome, ReadlineError> {
    let state = &mut *ctx.state;
    let outcome = match command {
        EditCommand::AcceptLine => CommandOutcome::Submit,
        EditCommand::Interrupt => CommandOutcome::Interrupt,
        EditCommand::DeleteOrEof => {
            if state.is_empty() {
                CommandOutcome::EndOfInput
            } else {
                state.delete_at_cursor().into()
            }
        }
        EditCommand::Complete => CommandOutcome::Ignored,
        EditCommand::ClearScreen => CommandOutcome::ClearScreen,

        EditCommand::MoveLeft => state.move_left().into(),
        EditCommand::MoveRight => state.move_right().into(),
        EditCommand::MoveWordLeft => state.move_word_left().into(),
        EditCommand::MoveWordRight => state.move_word_right().into(),
        EditCommand::MoveHome => state.move_home().into(),
        EditCommand::MoveEnd => state.move_end().into(),

        EditCommand::HistoryOlder => navigate(ctx, HistoryDirection::Older)?,
        EditCommand::HistoryNewer => navigate(ctx, HistoryDirection::Newer)?,

        EditCommand::Backspace => state.backspace().into(),
        EditCommand::Delete => state.delete_at_cursor().into(),
        EditCommand::KillToEnd => {
            let killed = state.kill_to_end();
            keep_killed(ctx.clipboard, killed)
        }
        EditCommand::KillToStart => {
            let killed = state.kill_to_start();
            keep_killed(ctx.clipboard, killed)
        }
        EditCommand::KillPrevWord => {
            let killed = state.kill_prev_word();
            keep_killed(ctx.clipboard, killed)
        }
        EditCommand::KillNextWord => {
            let killed = state.kill_next_word();
            keep_killed(ctx.clipboard, killed)
        }
        EditCommand::Yank => state.yank(ctx.clipboard.as_str())?.into(),
        EditCommand::TransposeChars => state.transpose_chars().into(),
        EditCommand::UpcaseWord => state.change_word_case(WordCase::Upper).into(),
        EditCommand::DowncaseWord => state.change_word_case(WordCase::Lower).into(),
        EditCommand::CapitalizeWord => state.change_word_case(WordCase::Capitalize).into(),
        EditCommand::SwapCase => state.swap_case().into(),
    };
    Ok(outcome)
}

fn keep_killed(clipboard: &mut String, killed: String) -> CommandOutcome {
    if killed.is_empty() {
        return CommandOutcome::Ignored;
    }
    *clipboard = killed;
    CommandOutcome::Refresh
}

fn navigate(
    ctx: &mut CommandContext<'_>,
    direction: HistoryDirection,
) -> Result<CommandOutcome, ReadlineError> {
    let recalled = lock_history(ctx.history).navigate(direction, ctx.state.buffer());
    match recalled {
        Some(line) => {
            ctx.state.set_line(&line)?;
            Ok(CommandOutcome::Refresh)
        }
        None => Ok(CommandOutcome::Ignored),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::History;
    use pretty_assertions::assert_eq;

    fn run(
        commands: &[EditCommand],
        state: &mut EditState,
        clipboard: &mut String,
        history: &SafeHistory,
    ) -> Vec<CommandOutcome> {
        commands
            .iter()
            .map(|command| {
                let mut ctx = CommandContext {
                    state: &mut *state,
                    clipboard: &mut *clipboard,
                    history,
                };
                apply_command(*command, &mut ctx).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_kill_then_yank_moves_text() {
        let mut state = EditState::new("> ", 80, false);
        state.insert_str("hello world").unwrap();
        let mut clipboard = String::new();
        let history = History::new_safe();

        let outcomes = run(
            &[EditCommand::KillPrevWord, EditCommand::MoveHome, EditCommand::Yank],
            &mut state,
            &mut clipboard,
            &history,
        );

        assert_eq!(outcomes, vec![CommandOutcome::Refresh; 3]);
        assert_eq!(clipboard, "world");
        assert_eq!(state.buffer(), "worldhello ");
    }

    #[test]
    fn test_empty_kill_keeps_clipboard() {
        let mut state = EditState::new("> ", 80, false);
        let mut clipboard = "kept".to_owned();
        let history = History::new_safe();

        let outcomes = run(&[EditCommand::KillToEnd], &mut state, &mut clipboard, &history);

        assert_eq!(outcomes, vec![CommandOutcome::Ignored]);
        assert_eq!(clipboard, "kept");
    }

    #[test]
    fn test_delete_or_eof() {
        let mut state = EditState::new("> ", 80, false);
        let mut clipboard = String::new();
        let history = History::new_safe();

        assert_eq!(
            run(&[EditCommand::DeleteOrEof], &mut state, &mut clipboard, &history),
            vec![CommandOutcome::EndOfInput]
        );

        state.insert_str("ab").unwrap();
        state.move_home();
        assert_eq!(
            run(&[EditCommand::DeleteOrEof], &mut state, &mut clipboard, &history),
            vec![CommandOutcome::Refresh]
        );
        assert_eq!(state.buffer(), "b");
    }

    #[test]
    fn test_history_round_trip_restores_live_line() {
        let history = History::new_safe();
        {
            let mut it = lock_history(&history);
            it.add("first");
            it.add("second");
        }
        let mut state = EditState::new("> ", 80, false);
        state.insert_str("draft").unwrap();
        let mut clipboard = String::new();

        run(&[EditCommand::HistoryOlder], &mut state, &mut clipboard, &history);
        assert_eq!(state.buffer(), "second");
        run(&[EditCommand::HistoryOlder], &mut state, &mut clipboard, &history);
        assert_eq!(state.buffer(), "first");

        let outcomes = run(
            &[EditCommand::HistoryOlder],
            &mut state,
            &mut clipboard,
            &history,
        );
        assert_eq!(outcomes, vec![CommandOutcome::Ignored]);

        run(
            &[EditCommand::HistoryNewer, EditCommand::HistoryNewer],
            &mut state,
            &mut clipboard,
            &history,
        );
        assert_eq!(state.buffer(), "draft");
    }
}
