// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::KeyEvent;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use strum::IntoEnumIterator;

/// Everything a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum EditCommand {
    AcceptLine,
    Interrupt,
    /// Delete under the cursor, or end input when the line is empty.
    DeleteOrEof,
    Complete,
    MoveLeft,
    MoveRight,
    MoveWordLeft,
    MoveWordRight,
    MoveHome,
    MoveEnd,
    HistoryOlder,
    HistoryNewer,
    Backspace,
    Delete,
    KillToEnd,
    KillToStart,
    KillPrevWord,
    KillNextWord,
    Yank,
    TransposeChars,
    UpcaseWord,
    DowncaseWord,
    CapitalizeWord,
    SwapCase,
    ClearScreen,
}

/// Key to command table. [`KeyEvent::Char`] keys that aren't bound insert themselves;
/// any other unbound key is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    map: FxHashMap<KeyEvent, EditCommand>,
}

impl Default for KeyBindings {
    fn default() -> Self { Self::default_emacs() }
}

impl KeyBindings {
    /// No bindings at all. Only typing works.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    /// Emacs style bindings, as found in most shells.
    #[must_use]
    pub fn default_emacs() -> Self {
        let mut it = Self::empty();
        for (key, command) in [
            (KeyEvent::Enter, EditCommand::AcceptLine),
            (KeyEvent::Ctrl('j'), EditCommand::AcceptLine),
            (KeyEvent::CtrlC, EditCommand::Interrupt),
            (KeyEvent::CtrlD, EditCommand::DeleteOrEof),
            (KeyEvent::Tab, EditCommand::Complete),
            (KeyEvent::Ctrl('a'), EditCommand::MoveHome),
            (KeyEvent::Home, EditCommand::MoveHome),
            (KeyEvent::Ctrl('e'), EditCommand::MoveEnd),
            (KeyEvent::End, EditCommand::MoveEnd),
            (KeyEvent::Ctrl('b'), EditCommand::MoveLeft),
            (KeyEvent::ArrowLeft, EditCommand::MoveLeft),
            (KeyEvent::Ctrl('f'), EditCommand::MoveRight),
            (KeyEvent::ArrowRight, EditCommand::MoveRight),
            (KeyEvent::Alt('b'), EditCommand::MoveWordLeft),
            (KeyEvent::CtrlLeft, EditCommand::MoveWordLeft),
            (KeyEvent::Alt('f'), EditCommand::MoveWordRight),
            (KeyEvent::CtrlRight, EditCommand::MoveWordRight),
            (KeyEvent::Ctrl('p'), EditCommand::HistoryOlder),
            (KeyEvent::ArrowUp, EditCommand::HistoryOlder),
            (KeyEvent::Ctrl('n'), EditCommand::HistoryNewer),
            (KeyEvent::ArrowDown, EditCommand::HistoryNewer),
            (KeyEvent::Backspace, EditCommand::Backspace),
            (KeyEvent::Delete, EditCommand::Delete),
            (KeyEvent::Ctrl('k'), EditCommand::KillToEnd),
            (KeyEvent::Ctrl('u'), EditCommand::KillToStart),
            (KeyEvent::Ctrl('w'), EditCommand::KillPrevWord),
            (KeyEvent::AltBackspace, EditCommand::KillPrevWord),
            (KeyEvent::Alt('d'), EditCommand::KillNextWord),
            (KeyEvent::Ctrl('y'), EditCommand::Yank),
            (KeyEvent::Ctrl('t'), EditCommand::TransposeChars),
            (KeyEvent::Alt('u'), EditCommand::UpcaseWord),
            (KeyEvent::Alt('l'), EditCommand::DowncaseWord),
            (KeyEvent::Alt('c'), EditCommand::CapitalizeWord),
            (KeyEvent::Alt('t'), EditCommand::SwapCase),
            (KeyEvent::Ctrl('l'), EditCommand::ClearScreen),
        ] {
            it.bind(key, command);
        }
        it
    }

    /// Returns the command previously bound to `key`.
    pub fn bind(&mut self, key: KeyEvent, command: EditCommand) -> Option<EditCommand> {
        self.map.insert(key, command)
    }

    pub fn unbind(&mut self, key: KeyEvent) -> Option<EditCommand> { self.map.remove(&key) }

    #[must_use]
    pub fn command_for(&self, key: KeyEvent) -> Option<EditCommand> {
        self.map.get(&key).copied()
    }

    /// Keys bound to `command`, in no particular order.
    #[must_use]
    pub fn keys_for(&self, command: EditCommand) -> SmallVec<[KeyEvent; 4]> {
        self.map
            .iter()
            .filter(|(_, it)| **it == command)
            .map(|(key, _)| *key)
            .collect()
    }

    /// Every command with the keys bound to it, in declaration order of
    /// [`EditCommand`]. Commands with no key are included.
    pub fn describe(&self) -> impl Iterator<Item = (EditCommand, SmallVec<[KeyEvent; 4]>)> {
        EditCommand::iter().map(|command| (command, self.keys_for(command)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_command_has_a_default_key() {
        let bindings = KeyBindings::default_emacs();
        for (command, keys) in bindings.describe() {
            assert!(!keys.is_empty(), "{command} has no key");
        }
    }

    #[test]
    fn test_bind_and_unbind() {
        let mut bindings = KeyBindings::default();
        assert_eq!(bindings.command_for(KeyEvent::Ctrl('t')), Some(EditCommand::TransposeChars));
        assert_eq!(
            bindings.bind(KeyEvent::Ctrl('t'), EditCommand::SwapCase),
            Some(EditCommand::TransposeChars)
        );
        assert_eq!(bindings.command_for(KeyEvent::Ctrl('t')), Some(EditCommand::SwapCase));
        assert_eq!(bindings.unbind(KeyEvent::Ctrl('t')), Some(EditCommand::SwapCase));
        assert_eq!(bindings.command_for(KeyEvent::Ctrl('t')), None);
    }

    #[test]
    fn test_display_is_snake_case() {
        assert_eq!(EditCommand::KillPrevWord.to_string(), "kill_prev_word");
    }
}
