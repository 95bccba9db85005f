//! Command-identifier derivation from raw invocation text.

/// Leading marker identifying a line of input as a workflow command.
pub const TRIGGER_MARKER: char = '/';

/// Namespace separator; only the outer segment names the checklist.
pub const NAMESPACE_SEPARATOR: char = ':';

/// Extract the command id from raw invocation text.
///
/// `"/learn file.pdf"` → `"learn"`, `"/dev:implement x"` → `"dev"`.
/// Input that is empty or does not begin with the trigger marker yields an
/// empty id, which callers treat identically to "no command".
pub fn extract_command_id(raw_text: &str) -> String {
    let first = match raw_text.split_whitespace().next() {
        Some(tok) => tok,
        None => return String::new(),
    };
    let Some(stripped) = first.strip_prefix(TRIGGER_MARKER) else {
        return String::new();
    };
    stripped
        .split(NAMESPACE_SEPARATOR)
        .next()
        .unwrap_or("")
        .to_string()
}
