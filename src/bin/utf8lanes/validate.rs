//! CLI handler for the `validate` command.

use anyhow::{Context, Result};
use clap::Parser;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use utf8lanes::Validator;

use crate::BackendArg;

/// Validate files for UTF-8 compliance.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Input files to validate (reads from stdin if none provided)
    #[arg(trailing_var_arg = true)]
    pub files: Vec<PathBuf>,

    /// Quiet mode: exit code only, no output
    #[arg(short, long)]
    pub quiet: bool,

    /// Validation backend
    #[arg(short, long, default_value = "auto")]
    pub backend: BackendArg,

    /// Force color output even when not a TTY
    #[arg(short = 'C', long = "color")]
    pub color: bool,

    /// Disable color output
    #[arg(short = 'M', long = "no-color")]
    pub no_color: bool,
}

/// Exit codes for the validate command.
pub mod exit_codes {
    /// All input is valid UTF-8.
    pub const SUCCESS: i32 = 0;
    /// At least one input is invalid UTF-8.
    pub const INVALID: i32 = 1;
    /// I/O error (file not found, permission denied, etc.).
    pub const IO_ERROR: i32 = 2;
}

/// ANSI color codes for diagnostics.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const LOCATION: &str = "\x1b[1;34m"; // Bold blue
}

struct ColorScheme {
    error: &'static str,
    location: &'static str,
    reset: &'static str,
}

impl ColorScheme {
    fn new(use_color: bool) -> Self {
        if use_color {
            Self {
                error: colors::ERROR,
                location: colors::LOCATION,
                reset: colors::RESET,
            }
        } else {
            Self {
                error: "",
                location: "",
                reset: "",
            }
        }
    }

    fn report(&self, name: &str, message: &dyn std::fmt::Display) {
        eprintln!(
            "{}error{}: {}{}{}: {}",
            self.error, self.reset, self.location, name, self.reset, message
        );
    }
}

/// Outcome of validating every input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    invalid: bool,
    io_error: bool,
}

impl Tally {
    /// I/O errors take precedence over invalid input.
    fn exit_code(self) -> i32 {
        if self.io_error {
            exit_codes::IO_ERROR
        } else if self.invalid {
            exit_codes::INVALID
        } else {
            exit_codes::SUCCESS
        }
    }
}

/// Run the validate command.
pub fn run(args: ValidateArgs) -> Result<i32> {
    let use_color = if args.no_color {
        false
    } else if args.color {
        true
    } else {
        atty::is(atty::Stream::Stderr)
    };
    let scheme = ColorScheme::new(use_color);

    let validator = args.backend.validator()?;
    debug!(backend = %validator.backend(), "selected backend");

    let mut tally = Tally::default();

    if args.files.is_empty() {
        let mut input = Vec::new();
        io::stdin()
            .read_to_end(&mut input)
            .context("failed to read from stdin")?;

        debug!(bytes = input.len(), "read stdin");
        if !validator.validate(&input) {
            tally.invalid = true;
            if !args.quiet {
                scheme.report("<stdin>", &"invalid UTF-8");
            }
        }
        return Ok(tally.exit_code());
    }

    for path in &args.files {
        let name = path.to_string_lossy();
        match validate_file(path, &validator) {
            Ok(true) => debug!(file = %name, "valid"),
            Ok(false) => {
                tally.invalid = true;
                if !args.quiet {
                    scheme.report(&name, &"invalid UTF-8");
                }
            }
            Err(e) => {
                tally.io_error = true;
                if !args.quiet {
                    scheme.report(&name, &e);
                }
            }
        }
    }

    Ok(tally.exit_code())
}

/// Validate one file through a read-only memory map.
fn validate_file(path: &Path, validator: &Validator) -> io::Result<bool> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }

    // SAFETY: read-only mapping, dropped before returning
    let map = unsafe { Mmap::map(&file)? };
    debug!(file = %path.display(), bytes = len, "mapped");
    Ok(validator.validate(&map))
}
