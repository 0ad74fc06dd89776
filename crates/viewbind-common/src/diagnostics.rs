//! Diagnostics reported while turning binding declarations into binders.
//!
//! The core never raises these itself: `add_method` only answers `false` for a
//! rejected claim, and the front end decides how to surface it. Messages are
//! templates with `{0}`-style placeholders filled by `format_message`.

use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const DUPLICATE_LISTENER_METHOD: u32 = 1001;
    pub const UNKNOWN_LISTENER: u32 = 1002;
    pub const UNKNOWN_CALLBACK: u32 = 1003;
    pub const PARAMETER_OUT_OF_RANGE: u32 = 1004;
    pub const INVALID_TYPE_NAME: u32 = 1005;
    pub const CIRCULAR_PARENT_CHAIN: u32 = 1006;
    pub const UNKNOWN_PARENT: u32 = 1007;
    pub const DUPLICATE_TARGET: u32 = 1008;
    pub const EMPTY_COLLECTION: u32 = 1009;
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage, diagnostic_codes};

    pub const DUPLICATE_LISTENER_METHOD: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::DUPLICATE_LISTENER_METHOD,
        category: DiagnosticCategory::Error,
        message: "Multiple listener methods with return value specified for ID {0}. ({1}.{2})",
    };

    pub const UNKNOWN_LISTENER: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::UNKNOWN_LISTENER,
        category: DiagnosticCategory::Error,
        message: "Unknown listener '{0}' on method '{1}'.",
    };

    pub const UNKNOWN_CALLBACK: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::UNKNOWN_CALLBACK,
        category: DiagnosticCategory::Error,
        message: "Listener '{0}' has no callback '{1}' (method '{2}').",
    };

    pub const PARAMETER_OUT_OF_RANGE: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::PARAMETER_OUT_OF_RANGE,
        category: DiagnosticCategory::Error,
        message: "Parameter #{0} of method '{1}' refers to position {2}, but '{3}' has {4} parameters.",
    };

    pub const INVALID_TYPE_NAME: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::INVALID_TYPE_NAME,
        category: DiagnosticCategory::Error,
        message: "Invalid type '{0}' for {1}: {2}.",
    };

    pub const CIRCULAR_PARENT_CHAIN: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::CIRCULAR_PARENT_CHAIN,
        category: DiagnosticCategory::Error,
        message: "Circular parent chain involving '{0}'.",
    };

    pub const UNKNOWN_PARENT: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::UNKNOWN_PARENT,
        category: DiagnosticCategory::Warning,
        message: "Parent '{0}' of '{1}' declares no bindings; generating without a parent binder.",
    };

    pub const DUPLICATE_TARGET: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::DUPLICATE_TARGET,
        category: DiagnosticCategory::Error,
        message: "Target type '{0}' is declared more than once.",
    };

    pub const EMPTY_COLLECTION: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::EMPTY_COLLECTION,
        category: DiagnosticCategory::Error,
        message: "Collection field '{0}' must specify at least one ID.",
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Qualified name of the target type the diagnostic is about.
    pub target: String,
    pub message_text: String,
}

impl Diagnostic {
    /// Instantiate a message template with positional arguments.
    pub fn from_message(
        target: impl Into<String>,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            category: message.category,
            code: message.code,
            target: target.into(),
            message_text: format_message(message.message, args),
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
