//! Leveled logging to stderr.
//!
//! The threshold is set once with [`log_init`]; until then nothing is printed.

use std::{fmt, sync::OnceLock};

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BLACK: &str = "\x1b[30m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Warn = 2,
    Error = 3,
    Off = 4,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Level::Trace => BLACK,
            Level::Debug => CYAN,
            Level::Warn => YELLOW,
            Level::Error => RED,
            Level::Off => "",
        }
    }
}

static THRESHOLD: OnceLock<Level> = OnceLock::new();

fn get_threshold() -> Level {
    THRESHOLD.get().copied().unwrap_or(Level::Off)
}

/// Sets the threshold. Only the first call has an effect, so every test may
/// call this without coordinating with the others.
pub fn log_init(level: Level) {
    let _ = THRESHOLD.set(level);
}

pub fn enabled(level: Level) -> bool {
    level != Level::Off && level >= get_threshold()
}

pub fn log(
    level: Level,
    args: fmt::Arguments<'_>,
    file: &'static str,
    line: u32,
) {
    if !enabled(level) {
        return;
    }
    eprintln!(
        "{}{}\t[{}:{}]\t{}{}",
        level.color_code(),
        level.as_str(),
        file,
        line,
        args,
        RESET,
    );
}

#[macro_export]
macro_rules! trace {
    ($($args:tt)*) => {
        $crate::log::log($crate::log::Level::Trace, format_args!($($args)*), file!(), line!())
    };
}

#[macro_export]
macro_rules! debug {
    ($($args:tt)*) => {
        $crate::log::log($crate::log::Level::Debug, format_args!($($args)*), file!(), line!())
    };
}

#[macro_export]
macro_rules! warn {
    ($($args:tt)*) => {
        $crate::log::log($crate::log::Level::Warn, format_args!($($args)*), file!(), line!())
    };
}

#[macro_export]
macro_rules! error {
    ($($args:tt)*) => {
        $crate::log::log($crate::log::Level::Error, format_args!($($args)*), file!(), line!())
    };
}
