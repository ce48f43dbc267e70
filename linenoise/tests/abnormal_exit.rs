// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminating signals that arrive during or after an editing session. Each test runs
//! itself again as a child process with [`CHILD_ENV_VAR`] set and stdin on the slave
//! side of a pseudo terminal, then checks how the child died and what state the terminal
//! was left in.

#![cfg(unix)]

use pretty_assertions::assert_eq;
use r3bl_linenoise::{are_cleanup_handlers_registered, disable_raw_mode,
                     enable_raw_mode, is_raw_mode_active};
use rustix::{fd::OwnedFd,
             pty::{self, OpenptFlags},
             termios::{self, LocalModes}};
use signal_hook::consts::SIGTERM;
use std::{fs::{File, OpenOptions},
          os::{fd::AsFd, unix::process::ExitStatusExt},
          process::{Command, ExitStatus, Stdio}};

const CHILD_ENV_VAR: &str = "R3BL_LINENOISE_SIGNAL_CHILD";

/// Exit code of a child that is still alive after raising `SIGTERM`.
const SURVIVED_EXIT_CODE: i32 = 3;

struct PtyPair {
    /// Held so the slave side stays usable while the child runs.
    _controller: OwnedFd,
    controlled: File,
}

fn open_pty() -> PtyPair {
    let controller = pty::openpt(OpenptFlags::RDWR | OpenptFlags::NOCTTY).unwrap();
    pty::grantpt(&controller).unwrap();
    pty::unlockpt(&controller).unwrap();
    let path = pty::ptsname(&controller, Vec::new())
        .unwrap()
        .into_string()
        .unwrap();
    let controlled = OpenOptions::new().read(true).write(true).open(path).unwrap();
    PtyPair { _controller: controller, controlled }
}

fn is_child() -> bool { std::env::var_os(CHILD_ENV_VAR).is_some() }

/// Run `test_name` alone in a child process reading from the slave side of `pty`.
fn run_child(test_name: &str, pty: &PtyPair) -> ExitStatus {
    Command::new(std::env::current_exe().unwrap())
        .args(["--exact", test_name, "--test-threads", "1", "--nocapture"])
        .env(CHILD_ENV_VAR, "1")
        .stdin(Stdio::from(pty.controlled.try_clone().unwrap()))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .unwrap()
}

fn is_cooked(fd: impl AsFd) -> bool {
    termios::tcgetattr(fd)
        .unwrap()
        .local_modes
        .contains(LocalModes::ICANON | LocalModes::ECHO)
}

#[test]
fn test_sigterm_after_session_still_terminates() {
    if is_child() {
        enable_raw_mode().unwrap();
        assert!(are_cleanup_handlers_registered());
        disable_raw_mode().unwrap();
        signal_hook::low_level::raise(SIGTERM).unwrap();
        std::process::exit(SURVIVED_EXIT_CODE);
    }

    let pty = open_pty();
    let status = run_child("test_sigterm_after_session_still_terminates", &pty);
    assert_eq!(status.signal(), Some(SIGTERM), "child exited with {status:?}");
    assert!(is_cooked(&pty.controlled));
}

#[test]
fn test_sigterm_during_session_restores_terminal() {
    if is_child() {
        enable_raw_mode().unwrap();
        assert!(is_raw_mode_active());
        assert!(!is_cooked(std::io::stdin()));
        signal_hook::low_level::raise(SIGTERM).unwrap();
        std::process::exit(SURVIVED_EXIT_CODE);
    }

    let pty = open_pty();
    assert!(is_cooked(&pty.controlled));

    let status = run_child("test_sigterm_during_session_restores_terminal", &pty);
    assert_eq!(status.signal(), Some(SIGTERM), "child exited with {status:?}");
    assert!(is_cooked(&pty.controlled));
}

#[test]
fn test_sigterm_without_session_terminates() {
    if is_child() {
        signal_hook::low_level::raise(SIGTERM).unwrap();
        std::process::exit(SURVIVED_EXIT_CODE);
    }

    let pty = open_pty();
    let status = run_child("test_sigterm_without_session_terminates", &pty);
    assert_eq!(status.signal(), Some(SIGTERM), "child exited with {status:?}");
}
