use clap::Args;
use serde::Serialize;

use sundry::deep_clone;
use sundry::json::{from_json, to_json};

use super::CmdResult;

#[derive(Args)]
pub struct CloneArgs {
    /// JSON value (inline, @file, or - for stdin). Use {"$date": ...} and
    /// {"$regex": ..., "$flags": ...} for dates and patterns.
    spec: String,
}

#[derive(Serialize)]
pub struct CloneOutput {
    command: String,
    kind: String,
    equal: bool,
    clone: serde_json::Value,
}

pub fn run(args: CloneArgs, _global: &super::GlobalArgs) -> CmdResult<CloneOutput> {
    let json = super::parse_json_spec(&args.spec, "parse clone input")?;
    let source = from_json(&json)?;
    let copy = deep_clone(&source);

    Ok((
        CloneOutput {
            command: "clone".to_string(),
            kind: copy.kind().to_string(),
            equal: copy == source,
            clone: to_json(&copy),
        },
        0,
    ))
}
