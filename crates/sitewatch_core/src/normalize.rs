use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Hidden form fields whose values change on every request of server-rendered
/// pages without reflecting a content change.
pub const VOLATILE_FIELD_NAMES: &[&str] =
    &["__VIEWSTATE", "__VIEWSTATEGENERATOR", "__EVENTVALIDATION"];

/// Attributes that survive tag rewriting.
const KEPT_ATTRIBUTES: &[&str] = &["href", "src"];

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?is)<script\b[^>]*>.*?</script\s*>"));

static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?is)<style\b[^>]*>.*?</style\s*>"));

static COMMENT: LazyLock<Regex> = LazyLock::new(|| compile(r"(?s)<!--.*?-->"));

static VOLATILE_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    let names = VOLATILE_FIELD_NAMES
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    compile(&format!(
        r#"(?i)<input\b[^>]*\sname\s*=\s*["'](?:{names})["'][^>]*>"#
    ))
});

static OPENING_TAG: LazyLock<Regex> =
    LazyLock::new(|| compile(r"<([A-Za-z][A-Za-z0-9:-]*)([^>]*)>"));

// One attribute per match, scanned left to right, so a quoted value is
// consumed whole and never searched for nested `name=` text.
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"\s*([^\s=/>]+)(?:\s*=\s*("[^"]*"|'[^']*'|[^\s>]+))?"#)
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| compile(r"\s+"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid normalizer pattern {pattern}: {err}"))
}

/// Reduce raw HTML to a string that only changes when visible content does.
///
/// The output is meant for fingerprinting, not display. Stages, in order:
/// scripts, styles, comments and volatile hidden inputs are removed; every
/// opening tag is rewritten to carry only `href` and `src`; whitespace runs
/// collapse to one space and the result is trimmed. Malformed markup is
/// handled best-effort.
pub fn normalize(html: &str) -> String {
    let text = SCRIPT_BLOCK.replace_all(html, "");
    let text = STYLE_BLOCK.replace_all(&text, "");
    let text = COMMENT.replace_all(&text, "");
    let text = VOLATILE_INPUT.replace_all(&text, "");
    let text = OPENING_TAG.replace_all(&text, rewrite_tag);
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

fn rewrite_tag(caps: &Captures<'_>) -> String {
    let tag = &caps[1];
    let attrs = caps.get(2).map_or("", |m| m.as_str());
    let self_closing = attrs.trim_end().ends_with('/');

    let mut out = String::with_capacity(tag.len() + 2);
    out.push('<');
    out.push_str(tag);
    for attr in ATTRIBUTE.captures_iter(attrs) {
        let name = &attr[1];
        if !KEPT_ATTRIBUTES.iter().any(|kept| name.eq_ignore_ascii_case(kept)) {
            continue;
        }
        // Only quoted values are kept; `href=/x` is dropped with the rest.
        let Some(value) = attr.get(2).map(|m| m.as_str()) else {
            continue;
        };
        if !value.starts_with(['"', '\'']) {
            continue;
        }
        out.push(' ');
        out.push_str(&name.to_ascii_lowercase());
        out.push('=');
        out.push_str(value);
    }
    if self_closing {
        out.push('/');
    }
    out.push('>');
    out
}
