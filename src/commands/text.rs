use clap::{Args, Subcommand};
use serde::Serialize;

use sundry::text;

use super::CmdResult;

#[derive(Args)]
pub struct TextArgs {
    #[command(subcommand)]
    command: TextCommand,
}

#[derive(Subcommand)]
enum TextCommand {
    /// Upper-case the first character
    Capitalize { input: String },
    /// Reverse the characters
    Reverse { input: String },
    /// Test whether the input contains a substring
    Contains { input: String, needle: String },
    /// Test whether the input ends with a suffix
    EndsWith { input: String, suffix: String },
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum TextResult {
    Text(String),
    Flag(bool),
}

#[derive(Serialize)]
pub struct TextOutput {
    command: String,
    input: String,
    result: TextResult,
}

pub fn run(args: TextArgs, _global: &super::GlobalArgs) -> CmdResult<TextOutput> {
    let (command, input, result) = match args.command {
        TextCommand::Capitalize { input } => {
            let result = TextResult::Text(text::capitalize(&input));
            ("text.capitalize", input, result)
        }
        TextCommand::Reverse { input } => {
            let result = TextResult::Text(text::reverse(&input));
            ("text.reverse", input, result)
        }
        TextCommand::Contains { input, needle } => {
            let result = TextResult::Flag(text::contains(&input, &needle));
            ("text.contains", input, result)
        }
        TextCommand::EndsWith { input, suffix } => {
            let result = TextResult::Flag(text::ends_with(&input, &suffix));
            ("text.ends_with", input, result)
        }
    };

    Ok((
        TextOutput {
            command: command.to_string(),
            input,
            result,
        },
        0,
    ))
}
