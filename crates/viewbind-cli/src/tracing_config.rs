//! Diagnostic logging for the `viewbind` binary.
//!
//! `VIEWBIND_LOG` holds `EnvFilter` directives. A bare level such as `debug`
//! is narrowed to the viewbind crates, so events from dependencies stay out
//! of the log; explicit `target=level` directives pass through unchanged.
//! `RUST_LOG` is used as-is when `VIEWBIND_LOG` is unset, and nothing is
//! installed when neither is set.
//!
//! `VIEWBIND_LOG_FORMAT` picks the layer:
//!
//! - `text` (default): compact lines without timestamps
//! - `tree`: nested `generate` / `target` / `brew_java` spans
//! - `json`: one object per event, tagged with its innermost span
//!
//! ```bash
//! VIEWBIND_LOG=debug VIEWBIND_LOG_FORMAT=tree viewbind bindings.json
//! VIEWBIND_LOG="info,viewbind_binder=trace" viewbind bindings.json
//! ```

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub const LOG_ENV: &str = "VIEWBIND_LOG";
pub const LOG_FORMAT_ENV: &str = "VIEWBIND_LOG_FORMAT";

/// Crates a bare `VIEWBIND_LOG` level applies to.
pub const VIEWBIND_TARGETS: &[&str] = &[
    "viewbind_cli",
    "viewbind_binder",
    "viewbind_emitter",
    "viewbind_common",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Unset or unrecognised values select `Text`.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("tree") => Self::Tree,
            Some("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Rewrite a `VIEWBIND_LOG` value into filter directives, expanding every
/// bare level into one `crate=level` directive per viewbind crate.
pub fn scoped_directives(value: &str) -> String {
    let mut directives = Vec::new();
    for directive in value.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        if directive.parse::<LevelFilter>().is_ok() {
            directives.extend(
                VIEWBIND_TARGETS
                    .iter()
                    .map(|target| format!("{target}={directive}")),
            );
        } else {
            directives.push(directive.to_string());
        }
    }
    directives.join(",")
}

fn build_filter() -> Option<EnvFilter> {
    if let Ok(value) = std::env::var(LOG_ENV) {
        return Some(EnvFilter::builder().parse_lossy(scoped_directives(&value)));
    }
    std::env::var("RUST_LOG")
        .is_ok()
        .then(EnvFilter::from_default_env)
}

/// Install the global subscriber. Output goes to stderr so it never mixes
/// with sources printed by `--stdout`.
pub fn init_tracing() {
    let Some(filter) = build_filter() else {
        return;
    };

    let format = LogFormat::from_env_value(std::env::var(LOG_FORMAT_ENV).ok().as_deref());
    match format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::new(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_bracketed_fields(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            let text_layer = fmt::layer()
                .compact()
                .without_time()
                .with_writer(std::io::stderr);

            Registry::default().with(filter).with(text_layer).init();
        }
    }
}
