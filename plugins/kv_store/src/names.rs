//! Turning user-supplied names into safe path segments

/// Last segment of a `/` or `\` separated name, after trimming whitespace
pub fn basename(name: &str) -> &str {
    let name = name.trim();
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// `name` without its final extension.
///
/// Leading dots do not start an extension, so `.env` and `..` are kept whole.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if name[..dot].chars().any(|c| c != '.') => &name[..dot],
        _ => name,
    }
}

/// Whether a file name has a `.json` extension, ignoring case
pub fn is_json_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".json")
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ' ' | '-')
}

/// Make `name` usable as a single path segment.
///
/// Takes the basename, then replaces every run of characters other than
/// ASCII letters, digits, `.`, `_`, space and `-` with one `_`. A result made
/// only of dots has each dot replaced as well, so it can never climb out of
/// its parent directory.
pub fn sanitize_segment(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in basename(name).chars() {
        if is_allowed(c) {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }

    if !out.is_empty() && out.chars().all(|c| c == '.') {
        return "_".repeat(out.len());
    }
    out
}
