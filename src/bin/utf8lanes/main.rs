//! utf8lanes CLI: validate, generate and benchmark UTF-8 text.

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use utf8lanes::{Backend, Validator};

mod bench;
mod generators;
mod validate;

use generators::{Corruption, Utf8Pattern};

#[derive(Debug, Parser)]
#[command(name = "utf8lanes")]
#[command(about = "Chunked SIMD UTF-8 validation toolkit", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate files (or stdin) as UTF-8
    Validate(validate::ValidateArgs),
    /// Generate synthetic UTF-8 text for benchmarking and testing
    Generate(GenerateArgs),
    /// Benchmark every supported backend against std
    Bench(BenchArgs),
}

/// Generate synthetic UTF-8 text
#[derive(Debug, Parser)]
struct GenerateArgs {
    /// Size of text to generate (supports b, kb, mb, gb - case insensitive)
    /// Examples: 1024, 1kb, 512MB, 2Gb
    #[arg(value_parser = parse_size)]
    size: usize,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Content pattern to generate
    #[arg(short, long, default_value = "mixed")]
    pattern: PatternArg,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Inject one invalid sequence of this class
    #[arg(long)]
    corrupt: Option<CorruptionArg>,

    /// Check the output with the validator and with std before writing
    #[arg(long)]
    verify: bool,
}

/// Benchmark backends on generated corpora
#[derive(Debug, Parser)]
struct BenchArgs {
    /// Patterns to benchmark (defaults to all)
    #[arg(short, long, value_delimiter = ',')]
    patterns: Vec<PatternArg>,

    /// Corpus sizes (comma separated, e.g. 1kb,64kb,1mb)
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = parse_size,
        default_values_t = [1024usize, 64 * 1024, 1024 * 1024, 16 * 1024 * 1024]
    )]
    sizes: Vec<usize>,

    /// Timed runs per measurement (median is reported)
    #[arg(short, long, default_value = "5")]
    runs: usize,

    /// Untimed runs before measuring
    #[arg(long, default_value = "1")]
    warmup: usize,

    /// Seed for corpus generation
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Stream results as JSON lines to this file
    #[arg(long)]
    jsonl: Option<PathBuf>,

    /// Write a Markdown summary to this file
    #[arg(long)]
    markdown: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BackendArg {
    /// Fastest backend supported by this CPU
    Auto,
    /// AVX2 (x86_64)
    Avx2,
    /// NEON (aarch64)
    Neon,
    /// Portable lane emulation
    Portable,
}

impl BackendArg {
    /// Build a validator for the requested backend.
    pub fn validator(self) -> Result<Validator> {
        let backend = match self {
            BackendArg::Auto => return Ok(Validator::new()),
            BackendArg::Avx2 => Backend::Avx2,
            BackendArg::Neon => Backend::Neon,
            BackendArg::Portable => Backend::Portable,
        };
        Ok(Validator::with_backend(backend)?)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PatternArg {
    /// Pure ASCII prose
    Ascii,
    /// Latin words with diacritics (2-byte sequences)
    Latin,
    /// Greek and Cyrillic words (2-byte sequences)
    GreekCyrillic,
    /// Chinese, Japanese and Korean (3-byte sequences)
    Cjk,
    /// Emoji and astral symbols (4-byte sequences)
    Emoji,
    /// Mostly ASCII prose with scattered non-ASCII words
    Mixed,
    /// Uniform mix of 1 to 4 byte sequences
    AllLengths,
    /// Log lines with occasional non-ASCII names
    LogFile,
    /// Boundary code points only, maximum multi-byte density
    Pathological,
}

impl From<PatternArg> for Utf8Pattern {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::Ascii => Utf8Pattern::Ascii,
            PatternArg::Latin => Utf8Pattern::Latin,
            PatternArg::GreekCyrillic => Utf8Pattern::GreekCyrillic,
            PatternArg::Cjk => Utf8Pattern::Cjk,
            PatternArg::Emoji => Utf8Pattern::Emoji,
            PatternArg::Mixed => Utf8Pattern::Mixed,
            PatternArg::AllLengths => Utf8Pattern::AllLengths,
            PatternArg::LogFile => Utf8Pattern::LogFile,
            PatternArg::Pathological => Utf8Pattern::Pathological,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CorruptionArg {
    /// A continuation byte with no lead byte (80)
    LoneContinuation,
    /// A 3-byte sequence missing its last byte (E2 82)
    Truncated,
    /// Overlong encoding of '/' (C0 AF)
    Overlong,
    /// Encoded surrogate U+D800 (ED A0 80)
    Surrogate,
    /// Code point above U+10FFFF (F4 90 80 80)
    TooLarge,
    /// Lead byte that never starts a sequence (F8 88 80 80)
    InvalidLeader,
}

impl From<CorruptionArg> for Corruption {
    fn from(arg: CorruptionArg) -> Self {
        match arg {
            CorruptionArg::LoneContinuation => Corruption::LoneContinuation,
            CorruptionArg::Truncated => Corruption::Truncated,
            CorruptionArg::Overlong => Corruption::Overlong,
            CorruptionArg::Surrogate => Corruption::Surrogate,
            CorruptionArg::TooLarge => Corruption::TooLarge,
            CorruptionArg::InvalidLeader => Corruption::InvalidLeader,
        }
    }
}

/// Parse size string like "1mb", "512KB", "2GB", "1024" (case insensitive)
fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim().to_lowercase();

    if let Ok(bytes) = s.parse::<usize>() {
        return Ok(bytes);
    }

    let (num_str, unit) = if let Some(n) = s.strip_suffix("gb") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("mb") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("kb") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('b') {
        (n, 1)
    } else {
        return Err(format!(
            "Invalid size format: '{}'. Use format like '1mb', '512KB', or '1024'",
            s
        ));
    };

    num_str
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("Invalid number in size: '{}'", s))?
        .checked_mul(unit)
        .ok_or_else(|| format!("Size too large: '{}'", s))
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let pattern: Utf8Pattern = args.pattern.into();
    let mut data = generators::generate_utf8(args.size, pattern, args.seed);
    info!(pattern = pattern.name(), bytes = data.len(), "generated text");

    if let Some(class) = args.corrupt {
        let class: Corruption = class.into();
        let offset = generators::corrupt(&mut data, class, args.seed);
        info!(class = class.name(), offset, "injected invalid sequence");
    }

    if args.verify {
        let expected = args.corrupt.is_none();
        let ours = utf8lanes::validate_utf8(&data);
        let std_ok = std::str::from_utf8(&data).is_ok();
        if ours != expected || std_ok != expected {
            bail!(
                "verification failed: expected valid={}, utf8lanes={}, std={}",
                expected,
                ours,
                std_ok
            );
        }
        eprintln!("✓ Output verified (valid={})", expected);
    }

    match args.output {
        Some(path) => {
            std::fs::write(&path, &data)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("✓ Wrote {} bytes to {}", data.len(), path.display());
        }
        None => {
            use std::io::Write;
            std::io::stdout()
                .write_all(&data)
                .context("failed to write to stdout")?;
        }
    }

    Ok(())
}

fn run_bench(args: BenchArgs) -> Result<()> {
    let patterns = if args.patterns.is_empty() {
        Utf8Pattern::ALL.to_vec()
    } else {
        args.patterns.into_iter().map(Utf8Pattern::from).collect()
    };

    let config = bench::BenchConfig {
        patterns,
        sizes: args.sizes,
        warmup_runs: args.warmup,
        benchmark_runs: args.runs.max(1),
        seed: args.seed,
    };

    bench::run_benchmark(&config, args.jsonl.as_deref(), args.markdown.as_deref())?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Validate(args) => {
            let code = validate::run(args)?;
            std::process::exit(code);
        }
        Command::Generate(args) => run_generate(args),
        Command::Bench(args) => run_bench(args),
    }
}
