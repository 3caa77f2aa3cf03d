//! File name predicate for template discovery.

/// Default template extension.
pub const DEFAULT_EXTENSION: &str = "tmpl";

/// Whether `name` names a template for `suffix`.
///
/// A name matches when it contains `.{suffix}` at a segment boundary: the
/// occurrence is followed by another `.` or by the end of the name. So for
/// suffix `tmpl`, `bashrc.tmpl` and `bashrc.tmpl.bak` match while `bashrctmpl`
/// and `bashrc.tmplx` do not. Any occurrence position may satisfy the rule.
pub fn is_template_name(name: &str, suffix: &str) -> bool {
    let marker = format!(".{suffix}");
    name.match_indices(&marker).any(|(idx, m)| {
        let after = idx + m.len();
        after == name.len() || name[after..].starts_with('.')
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
