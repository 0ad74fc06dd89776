//! Human-readable phrases naming a group of bindings.

use crate::model::MemberViewBinding;

/// `"A"`, `"A and B"`, or `"A, B, and C"`.
pub fn as_human_description(bindings: &[&dyn MemberViewBinding]) -> String {
    match bindings {
        [] => String::new(),
        [only] => only.description(),
        [first, second] => format!("{} and {}", first.description(), second.description()),
        _ => {
            let last = bindings.len() - 1;
            let mut out = String::new();
            for (i, binding) in bindings.iter().enumerate() {
                if i != 0 {
                    out.push_str(", ");
                }
                if i == last {
                    out.push_str("and ");
                }
                out.push_str(&binding.description());
            }
            out
        }
    }
}
