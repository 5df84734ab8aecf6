//! Placeholder substitution for bar templates.
//!
//! A template is plain text containing `%name%` placeholders. Each field in
//! the map replaces every occurrence of its placeholder, then `\%` escapes are
//! turned into literal `%` signs:
//!
//! ```rust,ignore
//! let mut fields = Fields::new();
//! fields.insert("curr", "3".to_string());
//! fields.insert("max", "10".to_string());
//! assert_eq!(apply(r"%curr%/%max% (100\%)", &fields), "3/10 (100%)");
//! ```

use indexmap::IndexMap;

/// Placeholder name to substituted value, applied in insertion order.
pub type Fields = IndexMap<&'static str, String>;

/// Substitutes every `%key%` in `template` with its value from `fields`, then
/// unescapes `\%` to `%`.
///
/// Placeholders with no entry in `fields` are left as they are.
pub fn apply(template: &str, fields: &Fields) -> String {
    let mut out = template.to_string();
    for (key, value) in fields {
        let placeholder = format!("%{key}%");
        if out.contains(&placeholder) {
            out = out.replace(&placeholder, value);
        }
    }
    out.replace("\\%", "%")
}

/// Returns `true` if `template` mentions the `%name%` placeholder.
pub(crate) fn has_placeholder(template: &str, name: &str) -> bool {
    template.contains(&format!("%{name}%"))
}
