// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Small REPL that exercises the editor: completion and hints for its own commands,
//! persistent history, multi-line and mask modes.
//!
//! ```text
//! cargo run --example linenoise_demo -- --multi-line --history /tmp/demo_history
//! ```

use clap::Parser;
use r3bl_linenoise::{Editor, Hint, ReadlineEvent, TracingConfig, WriterConfig,
                     clear_screen, global_history, history_add, history_load,
                     history_save, lock_history, print_key_codes,
                     try_initialize_logging_global};
use std::{path::PathBuf, str::FromStr};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing_core::LevelFilter;

/// Interactive line editor demo.
#[derive(Debug, Parser)]
#[command(name = "linenoise_demo", version)]
#[allow(clippy::struct_excessive_bools)]
struct CLIArg {
    /// Wrap long lines over several rows
    #[arg(long)]
    multi_line: bool,

    /// Echo `*` instead of the typed characters
    #[arg(long)]
    mask: bool,

    /// Load history from this file on start and save it after every line
    #[arg(long, value_name = "PATH")]
    history: Option<PathBuf>,

    /// Write debug logs to this file
    #[arg(long, value_name = "PATH")]
    log: Option<String>,

    /// Print the bytes each key sends, then exit
    #[arg(long)]
    key_codes: bool,
}

#[derive(Debug, PartialEq, EnumString, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
enum Command {
    #[strum(ascii_case_insensitive)]
    Help,
    #[strum(ascii_case_insensitive)]
    History,
    #[strum(ascii_case_insensitive)]
    Clear,
    #[strum(ascii_case_insensitive)]
    Bindings,
    #[strum(ascii_case_insensitive)]
    Multiline,
    #[strum(ascii_case_insensitive)]
    Mask,
    #[strum(ascii_case_insensitive)]
    Exit,
}

impl Command {
    fn usage(&self) -> &'static str {
        match self {
            Command::Help => "list commands",
            Command::History => "show history, newest last",
            Command::Clear => "clear the screen",
            Command::Bindings => "show key bindings",
            Command::Multiline => "toggle multi-line mode",
            Command::Mask => "toggle mask mode",
            Command::Exit => "quit",
        }
    }
}

fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    if let Some(path) = &cli_arg.log {
        try_initialize_logging_global(TracingConfig {
            writer_config: WriterConfig::File(path.clone()),
            level_filter: LevelFilter::TRACE,
        })?;
    }

    if cli_arg.key_codes {
        print_key_codes()?;
        return Ok(());
    }

    if let Some(path) = &cli_arg.history {
        history_load(path)?;
    }

    let mut editor = Editor::new();
    editor.set_multi_line(cli_arg.multi_line);
    editor.set_mask_mode(cli_arg.mask);
    editor.set_completion_provider(|partial: &str| -> miette::Result<Vec<String>> {
        Ok(Command::iter()
            .map(|it| ToString::to_string(&it))
            .filter(|it| it.starts_with(partial))
            .collect())
    });
    editor.set_hint_provider(|line: &str| -> miette::Result<Option<Hint>> {
        Ok(Command::from_str(line.trim())
            .ok()
            .map(|it| Hint::new(format!("  # {}", it.usage())).with_color(90)))
    });

    loop {
        let line = match editor.read_line("linenoise> ")? {
            ReadlineEvent::Line(line) => line,
            ReadlineEvent::Eof => break,
            ReadlineEvent::Interrupted => {
                println!("^C");
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }
        history_add(&line);
        if let Some(path) = &cli_arg.history {
            history_save(path)?;
        }

        match Command::from_str(line.trim()) {
            Ok(Command::Help) => {
                for it in Command::iter() {
                    println!("{it:<10} {}", it.usage());
                }
            }
            Ok(Command::History) => {
                let history = global_history();
                for (index, entry) in lock_history(&history).iter().enumerate() {
                    println!("{index:>4}  {entry}");
                }
            }
            Ok(Command::Clear) => clear_screen()?,
            Ok(Command::Bindings) => {
                for (command, keys) in editor.key_bindings_mut().describe() {
                    println!("{command:<16} {keys:?}");
                }
            }
            Ok(Command::Multiline) => {
                let multi_line = !editor.config().multi_line;
                editor.set_multi_line(multi_line);
                println!("multi-line: {multi_line}");
            }
            Ok(Command::Mask) => {
                let mask_mode = !editor.config().mask_mode;
                editor.set_mask_mode(mask_mode);
                println!("mask: {mask_mode}");
            }
            Ok(Command::Exit) => break,
            Err(_) => println!("echo: {line}"),
        }
    }

    if let Some(path) = &cli_arg.history {
        history_save(path)?;
    }
    Ok(())
}
