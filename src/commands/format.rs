use clap::Args;
use serde::Serialize;

use sundry::defaults;
use sundry::{FormatArgs as TemplateArgs, Occurrences, TemplateFormatter};

use super::CmdResult;

#[derive(Args)]
pub struct FormatArgs {
    /// Template containing {0}/{1}/... or {name} placeholders
    template: String,

    /// Positional values, addressed as {0}, {1}, ...
    values: Vec<String>,

    /// Named values as a JSON object (inline, @file, or - for stdin)
    #[arg(long, value_name = "JSON")]
    named: Option<String>,

    /// Replace every occurrence of a placeholder, not only the first
    #[arg(long)]
    all: bool,
}

#[derive(Serialize)]
pub struct FormatOutput {
    command: String,
    mode: String,
    occurrences: Occurrences,
    template: String,
    result: String,
}

pub fn run(args: FormatArgs, _global: &super::GlobalArgs) -> CmdResult<FormatOutput> {
    let template_args = template_args(args.values, args.named.as_deref())?;
    let occurrences = resolve_occurrences(args.all, defaults::load_defaults().format.occurrences);

    let mode = match template_args {
        TemplateArgs::Positional(_) => "positional",
        TemplateArgs::Named(_) => "named",
    };

    let result = TemplateFormatter::new(occurrences).format(&args.template, &template_args);

    Ok((
        FormatOutput {
            command: "format".to_string(),
            mode: mode.to_string(),
            occurrences,
            template: args.template,
            result,
        },
        0,
    ))
}

fn template_args(values: Vec<String>, named: Option<&str>) -> sundry::Result<TemplateArgs> {
    match named {
        Some(_) if !values.is_empty() => Err(sundry::Error::validation_invalid_argument(
            "named",
            "Positional values and --named cannot be combined",
            None,
            None,
        )),
        Some(spec) => named_args(spec),
        None => Ok(TemplateArgs::Positional(values)),
    }
}

/// `--all` wins over the configured mode.
fn resolve_occurrences(all: bool, configured: Occurrences) -> Occurrences {
    if all {
        Occurrences::All
    } else {
        configured
    }
}

fn named_args(spec: &str) -> sundry::Result<TemplateArgs> {
    let json = super::parse_json_spec(spec, "parse --named")?;
    match json.as_object() {
        Some(object) => Ok(TemplateArgs::from_json_object(object)),
        None => Err(sundry::Error::validation_invalid_argument(
            "named",
            "Named values must be a JSON object",
            None,
            None,
        )),
    }
}
