use clap::{Args, ValueEnum};
use serde::Serialize;

use sundry::defaults;
use sundry::PatternTrimmer;

use super::CmdResult;

#[derive(Args)]
pub struct TrimArgs {
    /// Text to trim
    input: String,

    /// Set of removable characters (default: configured whitespace set)
    #[arg(long, short = 'c', value_name = "CHARS")]
    chars: Option<String>,

    /// Which end(s) to trim
    #[arg(long, value_enum, default_value_t = Side::Both)]
    side: Side,
}

#[derive(Clone, Copy, Debug, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Both,
    Start,
    End,
}

#[derive(Serialize)]
pub struct TrimOutput {
    command: String,
    side: Side,
    chars: String,
    input: String,
    result: String,
}

pub fn run(args: TrimArgs, _global: &super::GlobalArgs) -> CmdResult<TrimOutput> {
    let chars = resolve_chars(args.chars, || defaults::load_defaults().trim.chars);

    let trimmer = PatternTrimmer::new(Some(&chars))?;
    let result = apply(&trimmer, args.side, &args.input);

    Ok((
        TrimOutput {
            command: "trim".to_string(),
            side: args.side,
            chars: trimmer.charset().to_string(),
            input: args.input,
            result,
        },
        0,
    ))
}

/// An absent or empty `--chars` means the configured charset.
fn resolve_chars(chars: Option<String>, configured: impl FnOnce() -> String) -> String {
    match chars {
        Some(chars) if !chars.is_empty() => chars,
        _ => configured(),
    }
}

fn apply(trimmer: &PatternTrimmer, side: Side, input: &str) -> String {
    match side {
        Side::Both => trimmer.trim(input),
        Side::Start => trimmer.trim_start(input),
        Side::End => trimmer.trim_end(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> String {
        "#!".to_string()
    }

    #[test]
    fn explicit_chars_win_over_configuration() {
        assert_eq!(resolve_chars(Some("xy".to_string()), configured), "xy");
    }

    #[test]
    fn missing_or_empty_chars_use_configuration() {
        assert_eq!(resolve_chars(None, configured), "#!");
        assert_eq!(resolve_chars(Some(String::new()), configured), "#!");
    }

    #[test]
    fn configured_charset_drives_each_side() {
        let trimmer = PatternTrimmer::new(Some(&resolve_chars(None, configured))).unwrap();
        assert_eq!(apply(&trimmer, Side::Both, "#!Hey!#"), "Hey");
        assert_eq!(apply(&trimmer, Side::Start, "#!Hey!#"), "Hey!#");
        assert_eq!(apply(&trimmer, Side::End, "#!Hey!#"), "#!Hey");
    }
}
