//! Character-class trimming.
//!
//! A charset is a *set* of removable characters. It is escaped into a regex
//! character class so that every member matches literally, then applied at
//! the start, the end, or both ends of the input.

use regex::Regex;

use crate::error::{Error, Result};

/// BOM, NBSP, space, LF, CR.
pub const DEFAULT_TRIM_CHARS: &str = "\u{FEFF}\u{00A0} \n\r";

/// Characters that must be backslash-escaped inside a character class.
/// `&` and `~` are class set operators in the regex crate (`&&`, `~~`).
const CLASS_META: &[char] = &[
    '-', '/', '\\', '^', '$', '*', '+', '?', '.', '(', ')', '|', '[', ']', '{', '}', '&', '~',
];

/// Escape a charset so it can be embedded between `[` and `]`.
pub fn escape_class(chars: &str) -> String {
    let mut escaped = String::with_capacity(chars.len() * 2);
    for ch in chars.chars() {
        if CLASS_META.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn effective_charset(charset: Option<&str>) -> &str {
    match charset {
        Some(chars) if !chars.is_empty() => chars,
        _ => DEFAULT_TRIM_CHARS,
    }
}

/// Compiled start/end/both patterns for one charset.
#[derive(Debug, Clone)]
pub struct PatternTrimmer {
    charset: String,
    both: Regex,
    start: Regex,
    end: Regex,
}

impl PatternTrimmer {
    /// Compile the trimming patterns. An absent or empty charset selects
    /// [`DEFAULT_TRIM_CHARS`].
    pub fn new(charset: Option<&str>) -> Result<Self> {
        let charset = effective_charset(charset);
        let class = format!("[{}]+", escape_class(charset));

        Ok(Self {
            charset: charset.to_string(),
            both: compile(&format!("^{class}|{class}$"), charset)?,
            start: compile(&format!("^{class}"), charset)?,
            end: compile(&format!("{class}$"), charset)?,
        })
    }

    pub fn whitespace() -> Result<Self> {
        Self::new(None)
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }

    pub fn trim(&self, input: &str) -> String {
        self.both.replace_all(input, "").into_owned()
    }

    pub fn trim_start(&self, input: &str) -> String {
        self.start.replace(input, "").into_owned()
    }

    pub fn trim_end(&self, input: &str) -> String {
        self.end.replace(input, "").into_owned()
    }
}

fn compile(pattern: &str, charset: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        Error::validation_invalid_argument(
            "charset",
            format!("Cannot build trim pattern: {}", e),
            Some(charset.to_string()),
            None,
        )
    })
}

fn fallback_reason(err: &Error) -> &str {
    err.details
        .get("problem")
        .and_then(|problem| problem.as_str())
        .unwrap_or(&err.message)
}

#[derive(Clone, Copy)]
enum Side {
    Both,
    Start,
    End,
}

fn apply(input: &str, charset: Option<&str>, side: Side) -> String {
    match PatternTrimmer::new(charset) {
        Ok(trimmer) => match side {
            Side::Both => trimmer.trim(input),
            Side::Start => trimmer.trim_start(input),
            Side::End => trimmer.trim_end(input),
        },
        Err(err) => {
            crate::log_status!("trim", "Falling back to literal trim: {}", fallback_reason(&err));
            let set: Vec<char> = effective_charset(charset).chars().collect();
            let is_member = |c: char| set.contains(&c);
            match side {
                Side::Both => input.trim_matches(is_member).to_string(),
                Side::Start => input.trim_start_matches(is_member).to_string(),
                Side::End => input.trim_end_matches(is_member).to_string(),
            }
        }
    }
}

/// Remove charset characters from both ends of `input`.
///
/// ```
/// assert_eq!(sundry::trim::trim("#!#!Hey!#!#!", Some("#!")), "Hey");
/// ```
pub fn trim(input: &str, charset: Option<&str>) -> String {
    apply(input, charset, Side::Both)
}

/// Remove charset characters from the start of `input`.
pub fn trim_start(input: &str, charset: Option<&str>) -> String {
    apply(input, charset, Side::Start)
}

/// Remove charset characters from the end of `input`.
pub fn trim_end(input: &str, charset: Option<&str>) -> String {
    apply(input, charset, Side::End)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_both_ends() {
        assert_eq!(trim("#!#!Hey!#!#!", Some("#!")), "Hey");
    }

    #[test]
    fn trims_start_only() {
        assert_eq!(trim_start("#!#!Hey!#!#!", Some("#!")), "Hey!#!#!");
    }

    #[test]
    fn trims_end_only() {
        assert_eq!(trim_end("#!#!Hey!#!#!", Some("#!")), "#!#!Hey");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(trim("", None), "");
        assert_eq!(trim("", Some("abc")), "");
        assert_eq!(trim_start("", Some("-")), "");
        assert_eq!(trim_end("", Some("-")), "");
    }

    #[test]
    fn all_charset_input_becomes_empty() {
        assert_eq!(trim("#!!#", Some("#!")), "");
        assert_eq!(trim_start("#!!#", Some("#!")), "");
        assert_eq!(trim_end("#!!#", Some("#!")), "");
    }

    #[test]
    fn default_charset_covers_bom_and_nbsp() {
        let input = "\u{FEFF}\u{00A0} \r\nvalue\n\r \u{00A0}";
        assert_eq!(trim(input, None), "value");
        assert_eq!(trim(input, Some("")), "value");
    }

    #[test]
    fn default_charset_leaves_tabs() {
        assert_eq!(trim("\t x \t", None), "\t x \t");
    }

    #[test]
    fn interior_is_untouched() {
        assert_eq!(trim("--a--b--", Some("-")), "a--b");
    }

    #[test]
    fn dash_is_not_a_range() {
        assert_eq!(trim("bza-zb", Some("a-z")), "bza-zb");
        assert_eq!(trim("a-zmza-", Some("a-z")), "m");
    }

    #[test]
    fn caret_is_not_negation() {
        assert_eq!(trim("^^x^^", Some("^")), "x");
        assert_eq!(trim("yxy", Some("^x")), "yxy");
    }

    #[test]
    fn metacharacters_match_literally() {
        assert_eq!(trim("a-z^$middle$^z-a", Some("a-z^$")), "middle");
        assert_eq!(trim("[](){}.*+?|/\\core\\/", Some("[](){}.*+?|/\\")), "core");
    }

    #[test]
    fn class_set_operators_match_literally() {
        assert_eq!(trim("&&~~x~~&&", Some("&~")), "x");
        assert_eq!(trim("a&&b", Some("&&")), "a&&b");
    }

    #[test]
    fn escape_class_prefixes_meta_only() {
        assert_eq!(escape_class("a-z"), "a\\-z");
        assert_eq!(escape_class("#!"), "#!");
        assert_eq!(escape_class("^]"), "\\^\\]");
    }

    #[test]
    fn trimmer_reuses_compiled_patterns() {
        let trimmer = PatternTrimmer::new(Some("xy")).unwrap();
        assert_eq!(trimmer.charset(), "xy");
        assert_eq!(trimmer.trim("xyhixy"), "hi");
        assert_eq!(trimmer.trim_start("xyhixy"), "hixy");
        assert_eq!(trimmer.trim_end("xyhixy"), "xyhi");
    }

    #[test]
    fn whitespace_trimmer_uses_default_set() {
        let trimmer = PatternTrimmer::whitespace().unwrap();
        assert_eq!(trimmer.charset(), DEFAULT_TRIM_CHARS);
    }

    #[test]
    fn trim_equals_end_of_start() {
        let cases = [
            ("", "ab"),
            ("abcba", "ab"),
            ("  spaced  ", " "),
            ("-^-x-^-", "^-"),
            ("ééxéé", "é"),
            ("aaaa", "a"),
        ];
        for (input, chars) in cases {
            let both = trim(input, Some(chars));
            let composed = trim_end(&trim_start(input, Some(chars)), Some(chars));
            assert_eq!(both, composed, "input {:?} chars {:?}", input, chars);
            assert!(!both.starts_with(|c: char| chars.contains(c)));
            assert!(!both.ends_with(|c: char| chars.contains(c)));
        }
    }

    #[test]
    fn fallback_reason_reports_the_pattern_problem() {
        let err = compile("[", "[").unwrap_err();
        let reason = fallback_reason(&err);
        assert!(reason.starts_with("Cannot build trim pattern"));
        assert_ne!(reason, err.message);

        let bare = Error::internal_unexpected("boom");
        assert_eq!(fallback_reason(&bare), "Unexpected error");
    }
}
