use crate::reporter::Reporter;
use viewbind_common::{Diagnostic, diagnostic_messages};

fn sample() -> Vec<Diagnostic> {
    vec![
        Diagnostic::from_message(
            "com.example.Main",
            &diagnostic_messages::UNKNOWN_LISTENER,
            &["OnSwipe", "swiped"],
        ),
        Diagnostic::from_message(
            "com.example.Child",
            &diagnostic_messages::UNKNOWN_PARENT,
            &["com.example.Base", "com.example.Child"],
        ),
    ]
}

#[test]
fn renders_plain_diagnostics() {
    let reporter = Reporter::new(false);
    let output = reporter.render(&sample());
    assert_eq!(
        output,
        "com.example.Main - error VB1002: Unknown listener 'OnSwipe' on method 'swiped'.\n\
         com.example.Child - warning VB1007: Parent 'com.example.Base' of 'com.example.Child' declares no bindings; generating without a parent binder."
    );
}

#[test]
fn renders_unknown_target() {
    let reporter = Reporter::new(false);
    let diagnostic = Diagnostic::from_message(
        "",
        &diagnostic_messages::EMPTY_COLLECTION,
        &["tabs"],
    );
    assert_eq!(
        reporter.render(&[diagnostic]),
        "<unknown> - error VB1009: Collection field 'tabs' must specify at least one ID."
    );
}

#[test]
fn renders_nothing_for_no_diagnostics() {
    let reporter = Reporter::new(false);
    assert_eq!(reporter.render(&[]), "");
    assert_eq!(reporter.render_summary(&[]), "");
}

#[test]
fn summarizes_counts() {
    let reporter = Reporter::new(false);
    assert_eq!(reporter.render_summary(&sample()), "Found 1 error, 1 warning.");

    let mut many = sample();
    many.push(Diagnostic::from_message(
        "com.example.Main",
        &diagnostic_messages::UNKNOWN_LISTENER,
        &["OnFling", "flung"],
    ));
    assert_eq!(reporter.render_summary(&many), "Found 2 errors, 1 warning.");
}

#[test]
fn colored_output_keeps_message_text() {
    colored::control::set_override(true);
    let reporter = Reporter::new(true);
    let output = reporter.render(&sample());
    colored::control::unset_override();

    assert!(output.contains("Unknown listener 'OnSwipe' on method 'swiped'."));
    assert!(output.contains("\u{1b}["));
}

#[test]
fn renders_json_array() {
    let output = Reporter::render_json(&sample()).expect("diagnostics serialize");
    let value: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");

    let entries = value.as_array().expect("array of diagnostics");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["category"], "error");
    assert_eq!(entries[0]["code"], 1002);
    assert_eq!(entries[0]["target"], "com.example.Main");
    assert_eq!(
        entries[0]["messageText"],
        "Unknown listener 'OnSwipe' on method 'swiped'."
    );
    assert_eq!(entries[1]["category"], "warning");
}

#[test]
fn renders_empty_json_array() {
    let output = Reporter::render_json(&[]).expect("diagnostics serialize");
    assert_eq!(output, "[]");
}
