use once_cell::sync::Lazy;
use regex::Regex;

/// Elements whose content is dropped along with the markup.
static SCRIPT_OR_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>")
        .expect("script/style pattern is valid")
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"));

#[inline]
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\r' | '\n' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Strips line breaks and HTML markup from a caller-supplied identity value.
pub fn sanitize(input: &str) -> String {
    let flat: String = input.chars().filter(|c| !is_line_break(*c)).collect();
    let without_scripts = SCRIPT_OR_STYLE.replace_all(&flat, "");
    let without_tags = TAG.replace_all(&without_scripts, "");

    without_tags.replace(['<', '>'], "").trim().to_string()
}
