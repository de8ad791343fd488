use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fgj_driver::{check_file, read_source, run_file, FgjError};
use fgj_typeck::Warning;

#[derive(Parser)]
#[command(
    name = "fgj",
    version = "0.1.0",
    about = "Type checker and interpreter for Featherweight Generic Java",
    long_about = "Parses an FGJ program, type checks its classes and main expression,\nthen evaluates the expression and prints the resulting value."
)]
struct Cli {
    /// Input FGJ source file
    input: PathBuf,

    /// Stop after type checking and print the main expression's type
    #[arg(long)]
    check: bool,

    /// Show diagnostics as annotated source reports
    #[arg(long)]
    report: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = if cli.check {
        check_file(&cli.input).map(|checked| (checked.ty.to_string(), checked.warnings))
    } else {
        run_file(&cli.input).map(|outcome| (outcome.value.to_string(), outcome.warnings))
    };

    match result {
        Ok((output, warnings)) => {
            for warning in &warnings {
                print_warning(&cli, warning);
            }
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            print_error(&cli, &err);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => return,
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn print_warning(cli: &Cli, warning: &Warning) {
    if cli.report {
        if let Some(source) = source_for_report(&cli.input) {
            let span = warning.span();
            report(
                ReportKind::Warning,
                "W0001",
                "stupid cast",
                &warning.to_string(),
                span.start,
                span.end,
                &cli.input,
                &source,
            );
            return;
        }
    }
    eprintln!("warning: {}", warning);
}

fn print_error(cli: &Cli, err: &FgjError) {
    if cli.report {
        if let (Some(span), Some(source)) = (err.span(), source_for_report(&cli.input)) {
            report(
                ReportKind::Error,
                err.code(),
                &err.to_string(),
                &err.detail(),
                span.start,
                span.end,
                &cli.input,
                &source,
            );
            return;
        }
    }
    eprintln!("{}", err);
}

fn source_for_report(path: &Path) -> Option<String> {
    read_source(path).ok()
}

#[allow(clippy::too_many_arguments)]
fn report(
    kind: ReportKind<'_>,
    code: &str,
    title: &str,
    message: &str,
    start: usize,
    end: usize,
    path: &Path,
    source: &str,
) {
    let filename = path.display().to_string();
    let span = (filename.as_str(), start..end);
    let color = match kind {
        ReportKind::Warning => Color::Yellow,
        _ => Color::Red,
    };
    let printed = Report::build(kind, span.clone())
        .with_code(code)
        .with_message(title)
        .with_label(Label::new(span).with_message(message).with_color(color))
        .finish()
        .eprint((filename.as_str(), Source::from(source)));
    if printed.is_err() {
        eprintln!("{}", title);
    }
}
