#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use viewbind_binder::ListenerRegistry;
use viewbind_cli::args::{CliArgs, DiagnosticsFormat};
use viewbind_cli::{driver, reporter::Reporter};

const EXIT_SUCCESS: i32 = 0;
const EXIT_ERRORS_REPORTED: i32 = 1;

fn main() -> Result<()> {
    // Initialize tracing if VIEWBIND_LOG or RUST_LOG is set.
    viewbind_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let registry = ListenerRegistry::android().context("built-in listener catalog is invalid")?;

    if args.list_listeners {
        print!("{}", driver::describe_listeners(&registry));
        return Ok(());
    }

    let result = driver::run(&args, &registry)?;

    if args.stdout {
        for file in &result.generated {
            print!("{}", file.source);
        }
    }

    match args.diagnostics {
        DiagnosticsFormat::Json => {
            eprintln!("{}", Reporter::render_json(&result.diagnostics)?);
        }
        DiagnosticsFormat::Text if !result.diagnostics.is_empty() => {
            let pretty = args
                .pretty
                .unwrap_or_else(|| std::io::stderr().is_terminal());
            let reporter = Reporter::new(pretty);
            eprintln!("{}", reporter.render(&result.diagnostics));
            eprintln!("{}", reporter.render_summary(&result.diagnostics));
        }
        DiagnosticsFormat::Text => {}
    }

    if result.has_errors() {
        std::process::exit(EXIT_ERRORS_REPORTED);
    }
    std::process::exit(EXIT_SUCCESS);
}
