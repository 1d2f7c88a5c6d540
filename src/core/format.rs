//! `{key}` / `{index}` template formatting.
//!
//! Substitution is a single left-to-right scan of the template, so inserted
//! values are never re-scanned for placeholders. Placeholders without a
//! matching argument are left as literal text.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::sync::LazyLock;

use crate::number::display_number;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").unwrap());

/// How many occurrences of a placeholder are substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occurrences {
    /// Only the first occurrence of each placeholder; later ones stay literal.
    #[default]
    First,
    All,
}

/// Template arguments: an ordered list addressed by index, or a named mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArgs {
    Positional(Vec<String>),
    Named(Vec<(String, String)>),
}

impl FormatArgs {
    pub fn none() -> Self {
        FormatArgs::Positional(Vec::new())
    }

    pub fn positional<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        FormatArgs::Positional(values.into_iter().map(|v| v.to_string()).collect())
    }

    pub fn named<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Display,
    {
        FormatArgs::Named(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }

    /// Positional numbers, rendered without a trailing `.0`.
    pub fn numbers<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        FormatArgs::Positional(values.into_iter().map(display_number).collect())
    }

    /// Named mapping from a JSON object. Strings are inserted without quotes,
    /// numbers the way [`display_number`] renders them, anything else as JSON.
    pub fn from_json_object(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        FormatArgs::Named(
            object
                .iter()
                .map(|(k, v)| (k.clone(), json_scalar_to_string(v)))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match self {
            FormatArgs::Positional(values) => values.len(),
            FormatArgs::Named(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self) -> HashMap<String, &str> {
        let mut map = HashMap::new();
        match self {
            FormatArgs::Positional(values) => {
                for (index, value) in values.iter().enumerate() {
                    map.insert(index.to_string(), value.as_str());
                }
            }
            FormatArgs::Named(entries) => {
                for (key, value) in entries {
                    map.entry(key.clone()).or_insert(value.as_str());
                }
            }
        }
        map
    }
}

fn json_scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(display_number)
            .unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateFormatter {
    occurrences: Occurrences,
}

impl TemplateFormatter {
    pub fn new(occurrences: Occurrences) -> Self {
        Self { occurrences }
    }

    pub fn occurrences(&self) -> Occurrences {
        self.occurrences
    }

    pub fn format(&self, template: &str, args: &FormatArgs) -> String {
        if args.is_empty() {
            return template.to_string();
        }

        let lookup = args.lookup();
        let mut substituted: HashSet<String> = HashSet::new();

        PLACEHOLDER
            .replace_all(template, |caps: &Captures| {
                let whole = caps.get(0).map(|m| m.as_str()).unwrap_or("");
                let key = caps.get(1).map(|m| m.as_str()).unwrap_or("");

                match lookup.get(key) {
                    Some(value)
                        if self.occurrences == Occurrences::All
                            || substituted.insert(key.to_string()) =>
                    {
                        (*value).to_string()
                    }
                    _ => whole.to_string(),
                }
            })
            .into_owned()
    }
}

/// Format with the default first-occurrence behavior.
///
/// ```
/// use sundry::format::{format, FormatArgs};
///
/// assert_eq!(
///     format("Hello {1} {0}!", &FormatArgs::positional(["Doe", "John"])),
///     "Hello John Doe!"
/// );
/// ```
pub fn format(template: &str, args: &FormatArgs) -> String {
    TemplateFormatter::default().format(template, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_arguments_by_index() {
        let args = FormatArgs::positional(["Doe", "John"]);
        assert_eq!(format("Hello {1} {0}!", &args), "Hello John Doe!");
    }

    #[test]
    fn named_arguments_by_key() {
        let args = FormatArgs::named([("first", "John"), ("last", "Doe")]);
        assert_eq!(format("Hello {first} {last}!", &args), "Hello John Doe!");
    }

    #[test]
    fn no_arguments_returns_template() {
        assert_eq!(format("No args", &FormatArgs::none()), "No args");
        assert_eq!(format("Keep {0}", &FormatArgs::none()), "Keep {0}");
        assert_eq!(
            format("Keep {x}", &FormatArgs::Named(Vec::new())),
            "Keep {x}"
        );
    }

    #[test]
    fn unknown_placeholders_stay_literal() {
        let args = FormatArgs::positional(["a"]);
        assert_eq!(format("{0}{1}{name}", &args), "a{1}{name}");
    }

    #[test]
    fn only_first_occurrence_is_replaced() {
        let args = FormatArgs::positional(["x"]);
        assert_eq!(format("{0}-{0}-{0}", &args), "x-{0}-{0}");

        let args = FormatArgs::named([("k", "v")]);
        assert_eq!(format("{k} and {k}", &args), "v and {k}");
    }

    #[test]
    fn all_occurrences_when_requested() {
        let formatter = TemplateFormatter::new(Occurrences::All);
        let args = FormatArgs::positional(["x"]);
        assert_eq!(formatter.format("{0}-{0}-{0}", &args), "x-x-x");
    }

    #[test]
    fn inserted_values_are_not_rescanned() {
        let args = FormatArgs::named([("a", "{b}"), ("b", "x")]);
        assert_eq!(format("{a}", &args), "{b}");

        let args = FormatArgs::positional(["{1}", "y"]);
        assert_eq!(format("{0} {1}", &args), "{1} y");
    }

    #[test]
    fn numbers_render_without_fraction() {
        let args = FormatArgs::numbers([42.0, 1.5, f64::NAN]);
        assert_eq!(format("{0} {1} {2}", &args), "42 1.5 NaN");
    }

    #[test]
    fn json_object_values() {
        let object = serde_json::json!({"name": "Ada", "age": 36, "admin": true});
        let args = FormatArgs::from_json_object(object.as_object().unwrap());
        assert_eq!(
            format("{name} ({age}) admin={admin}", &args),
            "Ada (36) admin=true"
        );
    }

    #[test]
    fn nested_braces_match_innermost() {
        let args = FormatArgs::positional(["v"]);
        assert_eq!(format("{{0}}", &args), "{v}");
    }

    #[test]
    fn unbalanced_braces_left_alone() {
        let args = FormatArgs::positional(["v"]);
        assert_eq!(format("{0 and 0}", &args), "{0 and 0}");
        assert_eq!(format("open {0", &args), "open {0");
    }

    #[test]
    fn empty_key_placeholder() {
        let args = FormatArgs::named([("", "blank")]);
        assert_eq!(format("[{}]", &args), "[blank]");
    }

    #[test]
    fn duplicate_named_keys_keep_first() {
        let args = FormatArgs::Named(vec![
            ("k".to_string(), "one".to_string()),
            ("k".to_string(), "two".to_string()),
        ]);
        assert_eq!(format("{k}", &args), "one");
    }
}
