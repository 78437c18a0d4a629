use std::sync::LazyLock;

use regex::Regex;

// Double markers must run before their single counterparts, otherwise `*`
// would eat half of every `**`.
static BOLD_ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("valid regex"));
static UNDERLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.*?)__").expect("valid regex"));
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_(.*?)_").expect("valid regex"));

/// Resolve inline emphasis markers to HTML-style tags.
///
/// Supports `**bold italics**`, `*bold*`, `__underline__` and `_italics_`.
/// Unmatched markers are left as they are.
pub fn format_inline(text: &str) -> String {
    let text = BOLD_ITALIC.replace_all(text, "<b><i>${1}</i></b>");
    let text = BOLD.replace_all(&text, "<b>${1}</b>");
    let text = UNDERLINE.replace_all(&text, "<u>${1}</u>");
    ITALIC.replace_all(&text, "<i>${1}</i>").into_owned()
}
