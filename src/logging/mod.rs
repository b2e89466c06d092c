//! # Logging Module
//!
//! Logging utilities for software-dmv:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - Structured `tracing` output controlled by `-v`/`-q` and `RUST_LOG`
//!
//! Verbose logs go to stderr and info logs go to stdout, so `software-dmv list`
//! and `software-dmv header` stay pipeable.
//!
//! ## Example
//!
//! ```rust
//! use software_dmv::logging::{ColorMode, set_verbose};
//! use software_dmv::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Auto.apply();
//!
//! // Goes to stderr
//! verbose_log!("Reading license: {}", "mit");
//!
//! // Goes to stdout
//! info_log!("Wrote LICENSE for: {}", "mit");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// Uses the same format string syntax as the standard [`println!`] macro.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message in yellow when stdout supports color.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
