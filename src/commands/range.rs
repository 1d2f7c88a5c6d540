use clap::Args;
use serde::Serialize;

use sundry::sequence;

use super::CmdResult;

#[derive(Args)]
pub struct RangeArgs {
    /// Number of values to generate
    count: usize,

    /// Distance between consecutive values
    #[arg(long, allow_hyphen_values = true)]
    step: Option<i64>,

    /// First value
    #[arg(long, allow_hyphen_values = true)]
    start: Option<i64>,
}

#[derive(Serialize)]
pub struct RangeOutput {
    command: String,
    values: Vec<i64>,
}

pub fn run(args: RangeArgs, _global: &super::GlobalArgs) -> CmdResult<RangeOutput> {
    let values = sequence::range(args.count, args.step, args.start)?;

    Ok((
        RangeOutput {
            command: "range".to_string(),
            values,
        },
        0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sundry::output::map_cmd_result_to_json;

    fn args(count: usize, step: Option<i64>, start: Option<i64>) -> RangeArgs {
        RangeArgs { count, step, start }
    }

    #[test]
    fn overflowing_range_maps_to_validation_exit_code() {
        let result = run(args(3, Some(i64::MAX), Some(1)), &crate::commands::GlobalArgs {});
        let (value, exit_code) = map_cmd_result_to_json(result);

        assert!(value.is_err());
        assert_eq!(exit_code, 2);
    }

    #[test]
    fn range_output_lists_values() {
        let (output, exit_code) =
            run(args(3, Some(2), Some(1)), &crate::commands::GlobalArgs {}).unwrap();
        assert_eq!(exit_code, 0);
        assert_eq!(output.values, vec![1, 3, 5]);
    }
}
