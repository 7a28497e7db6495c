//! Command template substitution.
//!
//! Command templates are plain strings containing angle-bracket placeholders
//! such as `<root path>` and `<file path>`:
//!
//! ```text
//! git -C <root path> lfs lock <file path>
//! ```
//!
//! Rendering is raw text substitution. Values are inserted verbatim with no
//! quoting or escaping, and a placeholder without a binding is left in the
//! output as-is. Whatever consumes the rendered string (see [`crate::runner`])
//! is responsible for tokenizing it.

/// Placeholder for the absolute repository root.
pub const ROOT_PATH: &str = "<root path>";

/// Placeholder for a repository-relative file path.
pub const FILE_PATH: &str = "<file path>";

/// Render a template by applying each `(token, value)` binding in order.
///
/// Every occurrence of a token is replaced. Inserted values are never
/// rescanned for the token that produced them, so a value containing its own
/// placeholder does not loop.
///
/// # Examples
///
/// ```ignore
/// let cmd = render(
///     "git -C <root path> lfs lock <file path>",
///     &[(ROOT_PATH, "/repo"), (FILE_PATH, "art/hero.psd")],
/// );
/// assert_eq!(cmd, "git -C /repo lfs lock art/hero.psd");
/// ```
pub fn render(template: &str, bindings: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();

    for (token, value) in bindings {
        if token.is_empty() {
            continue;
        }
        rendered = rendered.replace(token, value);
    }

    rendered
}
