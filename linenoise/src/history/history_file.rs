// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! History file format. Plain UTF-8 text:
//!
//! ```text
//! #r3bl-linenoise-history v1
//! oldest entry
//! ...
//! newest entry
//! ```
//!
//! Each entry is one line with these escapes, so an entry can never span lines:
//!
//! | Char                | Written as |
//! |---------------------|------------|
//! | `\`                 | `\\`       |
//! | newline             | `\n`       |
//! | carriage return     | `\r`       |
//! | tab                 | `\t`       |
//! | other C0, and `DEL` | `\xHH`     |
//!
//! Loading accepts files without the header line (every line is an entry), and reads an
//! unknown escape as the literal characters.

use super::History;
use crate::ReadlineError;
use std::{fmt::Write as _,
          fs::{File, OpenOptions},
          io::{BufRead, BufReader, BufWriter, ErrorKind, Write},
          path::Path};

pub const HISTORY_FILE_HEADER: &str = "#r3bl-linenoise-history v1";

/// History files may contain anything the user typed, so only the owner can read them.
#[cfg(unix)]
pub const HISTORY_FILE_MODE: u32 = 0o600;

#[must_use]
pub fn escape_history_line(line: &str) -> String {
    let mut escaped = String::with_capacity(line.len());
    for ch in line.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{0}'..='\u{1f}' | '\u{7f}' => {
                _ = write!(escaped, "\\x{:02x}", u32::from(ch));
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[must_use]
pub fn unescape_history_line(line: &str) -> String {
    let mut unescaped = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            unescaped.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some('\\') => push_and_skip(&mut unescaped, &mut chars, '\\'),
            Some('n') => push_and_skip(&mut unescaped, &mut chars, '\n'),
            Some('r') => push_and_skip(&mut unescaped, &mut chars, '\r'),
            Some('t') => push_and_skip(&mut unescaped, &mut chars, '\t'),
            Some('x') => {
                let hex: String = chars.clone().skip(1).take(2).collect();
                match (hex.len() == 2)
                    .then(|| u8::from_str_radix(&hex, 16).ok())
                    .flatten()
                {
                    Some(byte) => {
                        unescaped.push(char::from(byte));
                        // 'x' and two hex digits.
                        chars.nth(2);
                    }
                    None => unescaped.push('\\'),
                }
            }
            _ => unescaped.push('\\'),
        }
    }
    unescaped
}

fn push_and_skip(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    ch: char,
) {
    out.push(ch);
    chars.next();
}

impl History {
    /// Write every entry to `path`, oldest first, after the header line. The file is
    /// created or truncated, with owner-only permissions on Unix.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::Io`] if the file can't be created or written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReadlineError> {
        let path = path.as_ref();
        let file = open_for_save(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{HISTORY_FILE_HEADER}")?;
        for entry in self.iter() {
            writeln!(writer, "{}", escape_history_line(entry))?;
        }
        writer.flush()?;
        tracing::debug!(message = "history saved", path = %path.display(), entries = self.len());
        Ok(())
    }

    /// Replace every entry with the ones in `path`. Only the newest
    /// [`History::max_len`] entries are kept. A missing file loads as an empty history.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::Io`] if the file exists but can't be read, or isn't UTF-8.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), ReadlineError> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(message = "no history file", path = %path.display());
                self.clear();
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let mut lines = vec![];
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if index == 0 && line == HISTORY_FILE_HEADER {
                continue;
            }
            lines.push(unescape_history_line(&line));
        }

        self.replace_entries(lines);
        tracing::debug!(message = "history loaded", path = %path.display(), entries = self.len());
        Ok(())
    }
}

#[cfg(unix)]
fn open_for_save(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(HISTORY_FILE_MODE)
        .open(path)?;
    // `mode` only applies when the file is created.
    file.set_permissions(std::fs::Permissions::from_mode(HISTORY_FILE_MODE))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_for_save(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
