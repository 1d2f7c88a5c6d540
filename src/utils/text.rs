//! Small string predicates and transforms.

pub fn contains(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}

pub fn ends_with(haystack: &str, needle: &str) -> bool {
    haystack.ends_with(needle)
}

/// Upper-case the first character, leave the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Reverse by characters (not bytes).
pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}
