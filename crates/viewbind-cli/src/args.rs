use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use viewbind_emitter::PrinterOptions;

/// CLI arguments for the viewbind binder generator.
#[derive(Parser, Debug)]
#[command(
    name = "viewbind",
    version,
    about = "Generates view binder classes from binding manifests",
    after_help = "Logging: set VIEWBIND_LOG to a level (e.g. debug) or a filter such as \
                  viewbind_binder=trace; VIEWBIND_LOG_FORMAT selects text, tree or json."
)]
pub struct CliArgs {
    /// Manifest files, or directories searched recursively for `*.json` manifests.
    #[arg(value_name = "INPUT", required_unless_present = "list_listeners")]
    pub inputs: Vec<PathBuf>,

    /// Directory generated sources are written under, one folder per package.
    #[arg(short = 'o', long = "out-dir", default_value = "generated")]
    pub out_dir: PathBuf,

    /// Print generated sources to stdout instead of writing files.
    #[arg(long)]
    pub stdout: bool,

    /// Indentation unit: a number of spaces (1-8) or `tab`.
    #[arg(long, default_value = "2", value_parser = parse_indent)]
    pub indent: String,

    /// Omit the header comment from generated files.
    #[arg(long = "no-header")]
    pub no_header: bool,

    /// Colorize diagnostics (defaults to whether stderr is a terminal).
    #[arg(long)]
    pub pretty: Option<bool>,

    /// How diagnostics are written to stderr.
    #[arg(long = "diagnostics", value_enum, default_value_t = DiagnosticsFormat::Text)]
    pub diagnostics: DiagnosticsFormat,

    /// List the registered listener annotations and exit.
    #[arg(long = "list-listeners")]
    pub list_listeners: bool,
}

impl CliArgs {
    pub fn printer_options(&self) -> PrinterOptions {
        PrinterOptions {
            indent: self.indent.clone(),
            emit_file_comment: !self.no_header,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum DiagnosticsFormat {
    /// One line per diagnostic followed by a count summary.
    Text,
    /// A JSON array of diagnostic objects.
    Json,
}

/// Parse `--indent`: a space count or the literal `tab`.
pub fn parse_indent(value: &str) -> Result<String, String> {
    if value.eq_ignore_ascii_case("tab") {
        return Ok("\t".to_string());
    }
    match value.parse::<usize>() {
        Ok(width @ 1..=8) => Ok(" ".repeat(width)),
        _ => Err(format!(
            "invalid indent '{value}': expected 1-8 spaces or 'tab'"
        )),
    }
}
