// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Byte at a time decoding of terminal input into [`KeyEvent`]s.
//!
//! ```text
//!            0x1B                  '['               final byte
//! Ground ───────────► Escape ─────────────► Csi ─────────────────► Ground
//!   ▲ │                 │ │      'O'               (emit or discard)
//!   │ │ 0xC2..=0xF4     │ └──────────────► Ss3 ──── one byte ────► Ground
//!   │ ▼                 │ printable / DEL
//!   │ Utf8 ─ complete ──┴──────────────────────────────────────────► Ground
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A lone `ESC` can't be told apart from the start of a sequence by looking at bytes
//! alone. The decoder stays in the `Escape` state and the caller decides, using a read
//! timeout, when to give up on the continuation and call [`KeyDecoder::flush`].
//!
//! CSI parameters are bounded to [`MAX_CSI_PARAM_LEN`] bytes. Longer sequences are
//! skipped up to their final byte and never produce an event.

use super::KeyEvent;
use crate::ESC_BYTE;
use smallvec::{SmallVec, smallvec};

/// Longest CSI parameter string that can name a key this decoder knows (`1;5`).
pub const MAX_CSI_PARAM_LEN: usize = 4;

/// Events produced by one byte. Never more than two: a flushed `ESC` and the byte that
/// interrupted it.
pub type DecodedKeys = SmallVec<[KeyEvent; 2]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DecoderState {
    #[default]
    Ground,
    Escape,
    Csi,
    /// Parameters overflowed, discard up to the final byte.
    CsiSkip,
    Ss3,
    Utf8 {
        remaining: u8,
    },
}

#[derive(Debug, Default)]
pub struct KeyDecoder {
    state: DecoderState,
    /// CSI parameter bytes or partial UTF-8 bytes, depending on the state.
    pending: SmallVec<[u8; MAX_CSI_PARAM_LEN]>,
}

impl KeyDecoder {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// `true` while a sequence has started but not finished. The caller should only
    /// wait a short time for the next byte before calling [`KeyDecoder::flush`].
    #[must_use]
    pub fn is_pending(&self) -> bool { self.state != DecoderState::Ground }

    /// Feed one byte. Returns zero, one or two events.
    pub fn advance(&mut self, byte: u8) -> DecodedKeys {
        match self.state {
            DecoderState::Ground => self.advance_ground(byte),
            DecoderState::Escape => self.advance_escape(byte),
            DecoderState::Csi => self.advance_csi(byte),
            DecoderState::CsiSkip => self.advance_csi_skip(byte),
            DecoderState::Ss3 => self.advance_ss3(byte),
            DecoderState::Utf8 { remaining } => self.advance_utf8(byte, remaining),
        }
    }

    /// No more bytes are coming for the current sequence. A lone `ESC` becomes
    /// [`KeyEvent::Escape`], a truncated UTF-8 sequence becomes literal characters, and a
    /// truncated CSI or SS3 sequence is dropped.
    pub fn flush(&mut self) -> DecodedKeys {
        let state = std::mem::take(&mut self.state);
        let pending = std::mem::take(&mut self.pending);
        match state {
            DecoderState::Ground => smallvec![],
            DecoderState::Escape => smallvec![KeyEvent::Escape],
            DecoderState::Utf8 { .. } => pending.iter().copied().map(literal).collect(),
            DecoderState::Csi | DecoderState::CsiSkip | DecoderState::Ss3 => {
                tracing::trace!(message = "discarding truncated sequence", ?pending);
                smallvec![]
            }
        }
    }

    fn reset(&mut self) {
        self.state = DecoderState::Ground;
        self.pending.clear();
    }

    fn advance_ground(&mut self, byte: u8) -> DecodedKeys {
        match byte {
            ESC_BYTE => {
                self.state = DecoderState::Escape;
                smallvec![]
            }
            0x7F => smallvec![KeyEvent::Backspace],
            0x20..=0x7E => smallvec![KeyEvent::Char(char::from(byte))],
            0xC2..=0xDF => self.start_utf8(byte, 1),
            0xE0..=0xEF => self.start_utf8(byte, 2),
            0xF0..=0xF4 => self.start_utf8(byte, 3),
            0x80..=0xFF => smallvec![literal(byte)],
            _ => match KeyEvent::from_control_byte(byte) {
                Some(event) => smallvec![event],
                None => {
                    tracing::trace!(message = "ignoring control byte", byte);
                    smallvec![]
                }
            },
        }
    }

    fn start_utf8(&mut self, byte: u8, remaining: u8) -> DecodedKeys {
        self.pending.clear();
        self.pending.push(byte);
        self.state = DecoderState::Utf8 { remaining };
        smallvec![]
    }

    fn advance_utf8(&mut self, byte: u8, remaining: u8) -> DecodedKeys {
        if !is_continuation(byte) {
            // The sequence was cut short: what we have is literal bytes, and this byte
            // starts over.
            let mut events: DecodedKeys = self.pending.iter().copied().map(literal).collect();
            self.reset();
            events.extend(self.advance(byte));
            return events;
        }

        self.pending.push(byte);
        if remaining > 1 {
            self.state = DecoderState::Utf8 { remaining: remaining - 1 };
            return smallvec![];
        }

        let events = match std::str::from_utf8(&self.pending)
            .ok()
            .and_then(|it| it.chars().next())
        {
            Some(ch) => smallvec![KeyEvent::Char(ch)],
            // Overlong encodings and surrogates.
            None => self.pending.iter().copied().map(literal).collect(),
        };
        self.reset();
        events
    }

    fn advance_escape(&mut self, byte: u8) -> DecodedKeys {
        match byte {
            b'[' => {
                self.state = DecoderState::Csi;
                self.pending.clear();
                smallvec![]
            }
            b'O' => {
                self.state = DecoderState::Ss3;
                smallvec![]
            }
            // Two ESCs in a row: the first one was a lone ESC.
            ESC_BYTE => smallvec![KeyEvent::Escape],
            0x7F | 0x08 => {
                self.reset();
                smallvec![KeyEvent::AltBackspace]
            }
            0x20..=0x7E => {
                self.reset();
                smallvec![KeyEvent::Alt(char::from(byte))]
            }
            _ => {
                self.reset();
                let mut events: DecodedKeys = smallvec![KeyEvent::Escape];
                events.extend(self.advance(byte));
                events
            }
        }
    }

    fn advance_csi(&mut self, byte: u8) -> DecodedKeys {
        match byte {
            // Parameter and intermediate bytes.
            0x20..=0x3F => {
                if self.pending.len() < MAX_CSI_PARAM_LEN {
                    self.pending.push(byte);
                } else {
                    self.state = DecoderState::CsiSkip;
                }
                smallvec![]
            }
            // Final byte.
            0x40..=0x7E => {
                let event = classify_csi(&self.pending, byte);
                if event.is_none() {
                    tracing::trace!(
                        message = "discarding unknown CSI sequence",
                        params = ?self.pending,
                        final_byte = byte
                    );
                }
                self.reset();
                event.into_iter().collect()
            }
            // Not part of a CSI sequence, abandon it and start over with this byte.
            _ => {
                self.reset();
                self.advance(byte)
            }
        }
    }

    fn advance_csi_skip(&mut self, byte: u8) -> DecodedKeys {
        match byte {
            0x20..=0x3F => smallvec![],
            0x40..=0x7E => {
                tracing::trace!(message = "discarding oversized CSI sequence");
                self.reset();
                smallvec![]
            }
            _ => {
                self.reset();
                self.advance(byte)
            }
        }
    }

    fn advance_ss3(&mut self, byte: u8) -> DecodedKeys {
        self.reset();
        match byte {
            b'A' => smallvec![KeyEvent::ArrowUp],
            b'B' => smallvec![KeyEvent::ArrowDown],
            b'C' => smallvec![KeyEvent::ArrowRight],
            b'D' => smallvec![KeyEvent::ArrowLeft],
            b'H' => smallvec![KeyEvent::Home],
            b'F' => smallvec![KeyEvent::End],
            0x20..=0x7E => {
                tracing::trace!(message = "discarding unknown SS3 sequence", byte);
                smallvec![]
            }
            _ => self.advance(byte),
        }
    }
}

fn classify_csi(params: &[u8], final_byte: u8) -> Option<KeyEvent> {
    match (params, final_byte) {
        (b"", b'A') => Some(KeyEvent::ArrowUp),
        (b"", b'B') => Some(KeyEvent::ArrowDown),
        (b"", b'C') => Some(KeyEvent::ArrowRight),
        (b"", b'D') => Some(KeyEvent::ArrowLeft),
        (b"" | b"1", b'H') | (b"1" | b"7", b'~') => Some(KeyEvent::Home),
        (b"" | b"1", b'F') | (b"4" | b"8", b'~') => Some(KeyEvent::End),
        (b"3", b'~') => Some(KeyEvent::Delete),
        // Ctrl and Alt modified arrows both move by word.
        (b"1;5" | b"1;3" | b"5", b'C') => Some(KeyEvent::CtrlRight),
        (b"1;5" | b"1;3" | b"5", b'D') => Some(KeyEvent::CtrlLeft),
        _ => None,
    }
}

fn is_continuation(byte: u8) -> bool { byte & 0xC0 == 0x80 }

/// A byte that isn't part of valid UTF-8 is taken as the Latin-1 character with the
/// same value.
fn literal(byte: u8) -> KeyEvent { KeyEvent::Char(char::from(byte)) }

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn decode_all(bytes: &[u8]) -> Vec<KeyEvent> {
        let mut decoder = KeyDecoder::new();
        let mut events: Vec<KeyEvent> =
            bytes.iter().flat_map(|&b| decoder.advance(b)).collect();
        events.extend(decoder.flush());
        events
    }

    #[test_case(b"\x1b[A", KeyEvent::ArrowUp)]
    #[test_case(b"\x1b[B", KeyEvent::ArrowDown)]
    #[test_case(b"\x1b[C", KeyEvent::ArrowRight)]
    #[test_case(b"\x1b[D", KeyEvent::ArrowLeft)]
    #[test_case(b"\x1b[H", KeyEvent::Home)]
    #[test_case(b"\x1b[F", KeyEvent::End)]
    #[test_case(b"\x1b[1~", KeyEvent::Home)]
    #[test_case(b"\x1b[7~", KeyEvent::Home)]
    #[test_case(b"\x1b[4~", KeyEvent::End)]
    #[test_case(b"\x1b[8~", KeyEvent::End)]
    #[test_case(b"\x1b[3~", KeyEvent::Delete)]
    #[test_case(b"\x1bOH", KeyEvent::Home)]
    #[test_case(b"\x1bOF", KeyEvent::End)]
    #[test_case(b"\x1bOA", KeyEvent::ArrowUp)]
    #[test_case(b"\x1b[1;5C", KeyEvent::CtrlRight)]
    #[test_case(b"\x1b[1;5D", KeyEvent::CtrlLeft)]
    #[test_case(b"\x1bb", KeyEvent::Alt('b'))]
    #[test_case(b"\x1b\x7f", KeyEvent::AltBackspace)]
    fn test_sequences(bytes: &[u8], expected: KeyEvent) {
        assert_eq!(decode_all(bytes), vec![expected]);
    }

    #[test]
    fn test_plain_text_and_controls() {
        assert_eq!(
            decode_all(b"a\x01\x0d\x7f\x09"),
            vec![
                KeyEvent::Char('a'),
                KeyEvent::Ctrl('a'),
                KeyEvent::Enter,
                KeyEvent::Backspace,
                KeyEvent::Tab,
            ]
        );
    }

    #[test]
    fn test_unknown_sequences_are_discarded() {
        // F5 and a mouse report.
        assert_eq!(decode_all(b"\x1b[15~x"), vec![KeyEvent::Char('x')]);
        assert_eq!(decode_all(b"\x1b[<0;12;7Mx"), vec![KeyEvent::Char('x')]);
        assert_eq!(decode_all(b"\x1bOZx"), vec![KeyEvent::Char('x')]);
    }

    #[test]
    fn test_lone_escape_on_flush() {
        let mut decoder = KeyDecoder::new();
        assert!(decoder.advance(0x1b).is_empty());
        assert!(decoder.is_pending());
        assert_eq!(decoder.flush().to_vec(), vec![KeyEvent::Escape]);
        assert!(!decoder.is_pending());
    }

    #[test]
    fn test_escape_then_control_byte() {
        assert_eq!(decode_all(b"\x1b\x0d"), vec![KeyEvent::Escape, KeyEvent::Enter]);
        assert_eq!(decode_all(b"\x1b\x1b[A"), vec![KeyEvent::Escape, KeyEvent::ArrowUp]);
    }

    #[test]
    fn test_truncated_csi_is_dropped() {
        assert_eq!(decode_all(b"\x1b[1;"), vec![]);
        assert_eq!(decode_all(b"\x1b[1\x0d"), vec![KeyEvent::Enter]);
    }

    #[test]
    fn test_multi_byte_utf8() {
        assert_eq!(decode_all("é世🦀".as_bytes()), vec![
            KeyEvent::Char('é'),
            KeyEvent::Char('世'),
            KeyEvent::Char('🦀'),
        ]);
    }

    #[test]
    fn test_invalid_utf8_is_literal() {
        // Lead byte followed by ASCII.
        assert_eq!(decode_all(b"\xc3a"), vec![
            KeyEvent::Char('\u{c3}'),
            KeyEvent::Char('a'),
        ]);
        // Stray continuation byte.
        assert_eq!(decode_all(b"\x80"), vec![KeyEvent::Char('\u{80}')]);
        // Surrogate encoding.
        assert_eq!(decode_all(b"\xed\xa0\x80"), vec![
            KeyEvent::Char('\u{ed}'),
            KeyEvent::Char('\u{a0}'),
            KeyEvent::Char('\u{80}'),
        ]);
        // Truncated at end of input.
        assert_eq!(decode_all(b"\xe4\xb8"), vec![
            KeyEvent::Char('\u{e4}'),
            KeyEvent::Char('\u{b8}'),
        ]);
    }
}
