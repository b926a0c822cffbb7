//! Whitespace/comment compaction for HTML payloads.
//!
//! Roughly halves the stored size of a typical rendered page. The passes run
//! in a fixed order; comment stripping is a non-greedy regex, so markup that
//! embeds `-->`-like text inside a comment is compacted approximately rather
//! than tokenized. JSON and XML entries are never passed through here.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_INDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]+").expect("static regex"));
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^//.*\n?").expect("static regex"));
static HTML_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"<!--.*?-->").expect("static regex"));
static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("static regex"));
static BETWEEN_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r">\s+<").expect("static regex"));
static QUOTE_BEFORE_GT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(["'])\s+>"#).expect("static regex"));
static EQ_BEFORE_QUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"=\s+(["'])"#).expect("static regex"));

/// Compact an HTML document by stripping indentation, comments and
/// redundant whitespace. Lossy only with respect to whitespace and
/// comments; visible text content is preserved.
pub fn minify(html: &str) -> String {
    let stripped = LINE_INDENT.replace_all(html, "");
    let stripped = LINE_COMMENT.replace_all(&stripped, "");
    let flat = stripped.replace('\n', " ");
    let flat = HTML_COMMENT.replace_all(&flat, "");
    let flat = SPACE_RUNS.replace_all(&flat, " ");
    let flat = BETWEEN_TAGS.replace_all(&flat, "><");
    let flat = QUOTE_BEFORE_GT.replace_all(&flat, "$1>");
    EQ_BEFORE_QUOTE.replace_all(&flat, "=$1").into_owned()
}
