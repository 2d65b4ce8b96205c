//! tableassert - compare an expected table file against an actual one

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, LevelFilter};
use termcolor::ColorChoice;

use tableassert::config::{DiffOptions, OutputFormat};
use tableassert::diff::BuiltinComparator;
use tableassert::output::render_to_stdout;
use tableassert::parser::ParserFactory;
use tableassert::{AssertTable, Error, Table};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Text,
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Same columns, same sequence, same values
    Same,
    /// Same columns in any sequence, same values
    Equal,
    /// Expected columns present with the expected values, extra columns ignored
    ContainsColumns,
}

/// Compare tables (CSV, HTML, pipe tables) and print the differences
#[derive(Parser, Debug)]
#[command(name = "tableassert")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Table with the expected content
    expected: PathBuf,

    /// Table to check
    actual: PathBuf,

    /// Which assertion to run
    #[arg(short, long, value_enum, default_value = "same")]
    mode: Mode,

    /// Accept the expected columns in any order
    #[arg(long)]
    ignore_column_sequence: bool,

    /// Accept extra columns in the actual table
    #[arg(long)]
    ignore_extra_columns: bool,

    /// Compare a column with a named rule, e.g. `Price=numeric-tolerance:0.01`
    #[arg(long = "compare", value_name = "COLUMN=KIND", value_parser = parse_compare)]
    compare: Vec<(String, BuiltinComparator)>,

    /// Keyed options as JSON, e.g. `{"ignoreExtraColumns": true}`
    #[arg(long, value_name = "JSON")]
    options: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: CliOutputFormat,

    /// Text appended to the failure message
    #[arg(long)]
    message: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Options for `assert_comparable`, or `None` when the mode alone decides
    fn comparable_options(&self) -> Result<Option<DiffOptions>> {
        if self.options.is_none()
            && self.compare.is_empty()
            && !self.ignore_column_sequence
            && !self.ignore_extra_columns
        {
            return Ok(None);
        }

        let mut options = match &self.options {
            Some(json) => DiffOptions::from_json_str(json).context("Invalid --options")?,
            None => DiffOptions::new(),
        };
        options.ignore_column_sequence |= self.ignore_column_sequence;
        options.ignore_extra_columns |= self.ignore_extra_columns;

        for (column, comparator) in &self.compare {
            options = options.with_comparator(column.clone(), *comparator);
        }

        Ok(Some(options))
    }
}

fn parse_compare(value: &str) -> std::result::Result<(String, BuiltinComparator), String> {
    let (column, kind) = value
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=KIND, got '{}'", value))?;
    Ok((column.to_string(), kind.parse()?))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(has_differences) => {
            if has_differences {
                ExitCode::from(1) // Differences found
            } else {
                ExitCode::SUCCESS // No differences
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn load(factory: &ParserFactory, path: &Path, role: &str) -> Result<Table> {
    factory
        .parse(path)
        .with_context(|| format!("Failed to parse {} file: {}", role, path.display()))
}

fn run(cli: &Cli) -> Result<bool> {
    let factory = ParserFactory::new();
    let expected = load(&factory, &cli.expected, "expected")?;
    let actual = load(&factory, &cli.actual, "actual")?;
    debug!(
        "comparing {} expected row(s) with {} actual row(s)",
        expected.row_count(),
        actual.row_count()
    );

    let assert = AssertTable::new();
    let message = cli.message.as_deref();
    let outcome = match cli.comparable_options()? {
        Some(options) => assert.assert_comparable(&expected, &actual, &options, message),
        None => match cli.mode {
            Mode::Same => assert.assert_same(&expected, &actual, message),
            Mode::Equal => assert.assert_equal(&expected, &actual, message),
            Mode::ContainsColumns => assert.assert_contains_columns(&expected, &actual, message),
        },
    };

    let format = OutputFormat::from(cli.format);
    match outcome {
        Ok(()) => {
            match format {
                OutputFormat::Json => println!("{}", serde_json::json!({ "differences": [] })),
                OutputFormat::Text | OutputFormat::Terminal => println!("No differences found."),
            }
            Ok(false)
        }
        Err(Error::Assertion(failure)) => {
            let color = match format {
                OutputFormat::Terminal => ColorChoice::Auto,
                OutputFormat::Text | OutputFormat::Json => ColorChoice::Never,
            };
            render_to_stdout(&failure, format, color)?;
            Ok(true)
        }
        Err(e) => Err(e.into()),
    }
}
