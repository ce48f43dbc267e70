// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`tracing`] setup for hosts that want to see what the editor is doing.
//!
//! The editor owns the terminal while a line is being read, so logging to stdout or
//! stderr garbles the line. Log to a file instead:
//!
//! ```no_run
//! use r3bl_linenoise::{TracingConfig, WriterConfig, try_initialize_logging_global};
//! use tracing_core::LevelFilter;
//!
//! # fn main() -> miette::Result<()> {
//! try_initialize_logging_global(TracingConfig {
//!     writer_config: WriterConfig::File("linenoise.log".to_string()),
//!     level_filter: LevelFilter::DEBUG,
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! [`tracing`]: tracing

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use tracing_config::*;
pub use tracing_init::*;
