use clap::{Parser, Subcommand};

use commands::GlobalArgs;
use sundry::output;

mod commands;
mod tty;

use commands::{clone, config, format, range, text, trim};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "sundry")]
#[command(version = VERSION)]
#[command(about = "Trimming, template formatting, deep cloning and other small utilities")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trim a set of characters from one or both ends of a string
    Trim(trim::TrimArgs),
    /// Substitute {key} / {index} placeholders in a template
    Format(format::FormatArgs),
    /// Deep-clone a JSON value graph
    Clone(clone::CloneArgs),
    /// Generate an integer range
    Range(range::RangeArgs),
    /// Small string predicates and transforms
    Text(text::TextArgs),
    /// Manage global sundry configuration
    Config(config::ConfigArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    let (json_result, exit_code) = commands::run_json(cli.command, &global);

    if let Err(err) = output::print_json_result(json_result) {
        eprintln!("{}", err);
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
