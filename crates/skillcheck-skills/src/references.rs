use once_cell::sync::Lazy;
use regex::Regex;

/// `[link text](target)` Markdown links. The target must not contain
/// whitespace or a closing paren.
static MD_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]\(([^)\s]+)\)").expect("valid regex"));

/// Bare-path mentions after a recognized prose prefix, e.g.
/// "see references/guide.md" or "refer to examples.md". The path must carry
/// a file extension, which keeps prose like "see below" out.
static PROSE_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:see|refer to)\s+`?([A-Za-z0-9_][A-Za-z0-9_./-]*\.[A-Za-z0-9]+)`?")
        .expect("valid regex")
});

/// Extract the distinct relative file paths a skill body references,
/// in first-seen order.
///
/// The matching policy is deliberately conservative: a missed reference
/// only means one fewer existence check, but a URL mistaken for a local
/// file produces an incorrect FAIL. Anything containing `://`, absolute
/// paths, mailto links, and pure `#` anchors are skipped; `#fragment`
/// suffixes on local targets are stripped.
pub fn extract_references(body: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = Vec::new();

    for caps in MD_LINK.captures_iter(body) {
        if let Some(m) = caps.get(1) {
            found.push((m.start(), m.as_str().to_string()));
        }
    }
    for caps in PROSE_REF.captures_iter(body) {
        if let Some(m) = caps.get(1) {
            found.push((m.start(), m.as_str().to_string()));
        }
    }

    found.sort_by_key(|(pos, _)| *pos);

    let mut refs: Vec<String> = Vec::new();
    for (_, raw) in found {
        let Some(path) = normalize(&raw) else {
            continue;
        };
        if !refs.contains(&path) {
            refs.push(path);
        }
    }
    refs
}

/// Reduce a raw link target to a relative local path, or reject it.
fn normalize(raw: &str) -> Option<String> {
    if raw.contains("://") || raw.starts_with("mailto:") {
        return None;
    }
    if raw.starts_with('#') || raw.starts_with('/') {
        return None;
    }
    let path = raw.split('#').next().unwrap_or(raw);
    if path.is_empty() {
        return None;
    }
    Some(path.to_string())
}
