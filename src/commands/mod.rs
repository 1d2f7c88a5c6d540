use std::io::Read;
use std::path::Path;

pub type CmdResult<T> = sundry::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

// ============================================================================
// JSON Input Parsing (CLI layer)
// ============================================================================

/// Read JSON spec from string, file (@path), or stdin (-).
fn read_json_spec_to_string(spec: &str) -> sundry::Result<String> {
    if spec.trim() == "-" {
        let mut buf = String::new();
        if crate::tty::is_stdin_tty() {
            return Err(sundry::Error::validation_invalid_argument(
                "json",
                "Cannot read JSON from stdin when stdin is a TTY",
                None,
                None,
            ));
        }
        std::io::stdin().read_to_string(&mut buf).map_err(|e| {
            sundry::Error::internal_io(e.to_string(), Some("read stdin".to_string()))
        })?;
        return Ok(buf);
    }

    if let Some(path) = spec.strip_prefix('@') {
        if path.trim().is_empty() {
            return Err(sundry::Error::validation_invalid_argument(
                "json",
                "Invalid JSON spec '@' (missing file path)",
                None,
                None,
            ));
        }
        return std::fs::read_to_string(Path::new(path)).map_err(|e| {
            sundry::Error::internal_io(e.to_string(), Some(format!("read {}", path)))
        });
    }

    Ok(spec.to_string())
}

/// Parse a JSON spec given inline, as @file, or as - for stdin.
pub(crate) fn parse_json_spec(spec: &str, context: &str) -> sundry::Result<serde_json::Value> {
    let raw = read_json_spec_to_string(spec)?;
    serde_json::from_str(&raw).map_err(|e| {
        sundry::Error::validation_invalid_json(
            e,
            Some(context.to_string()),
            Some(raw.chars().take(200).collect::<String>()),
        )
    })
}

pub mod clone;
pub mod config;
pub mod format;
pub mod range;
pub mod text;
pub mod trim;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        sundry::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (sundry::Result<serde_json::Value>, i32) {
    crate::tty::status("sundry is working...");

    match command {
        crate::Commands::Trim(args) => dispatch!(args, global, trim),
        crate::Commands::Format(args) => dispatch!(args, global, format),
        crate::Commands::Clone(args) => dispatch!(args, global, clone),
        crate::Commands::Range(args) => dispatch!(args, global, range),
        crate::Commands::Text(args) => dispatch!(args, global, text),
        crate::Commands::Config(args) => dispatch!(args, global, config),
    }
}
