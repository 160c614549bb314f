use std::env;
use std::path::PathBuf;

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(CliOptions),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub csv_path: PathBuf,
    pub config: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub readings_out: Option<PathBuf>,
}

pub fn parse_args() -> Result<Command, String> {
    parse_args_from(env::args().skip(1).collect())
}

pub fn parse_args_from(args: Vec<String>) -> Result<Command, String> {
    let mut i = 0usize;
    let mut csv_path = None;
    let mut config = None;
    let mut output_dir = None;
    let mut readings_out = None;

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--config" => {
                i += 1;
                let path = value_at(&args, i, "--config", "a TOML file path")?;
                if config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--output-dir" => {
                i += 1;
                let path = value_at(&args, i, "--output-dir", "a directory path")?;
                if output_dir.replace(PathBuf::from(path)).is_some() {
                    return Err("--output-dir provided more than once".to_string());
                }
            }
            "--readings-out" => {
                i += 1;
                let path = value_at(&args, i, "--readings-out", "a JSON file path")?;
                if readings_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--readings-out provided more than once".to_string());
                }
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown option: {flag}"));
            }
            positional => {
                if csv_path.replace(PathBuf::from(positional)).is_some() {
                    return Err(format!("unexpected extra argument: {positional}"));
                }
            }
        }
        i += 1;
    }

    let csv_path = csv_path.ok_or_else(|| "missing CSV_PATH argument".to_string())?;
    Ok(Command::Run(CliOptions {
        csv_path,
        config,
        output_dir,
        readings_out,
    }))
}

fn value_at<'a>(args: &'a [String], i: usize, flag: &str, expected: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("missing value for {flag} (expected {expected})"))
}

pub fn usage() -> &'static str {
    "Usage: solar-forecast <CSV_PATH> [--config FILE] [--output-dir DIR] [--readings-out FILE]

Trains a simple RNN and an LSTM forecaster on the power column of CSV_PATH,
projects the test predictions onto a nominal panel and writes comparison charts.

Options:
  --config FILE        TOML run configuration (defaults apply to missing keys)
  --output-dir DIR     Directory for charts and experiment records (default: output)
  --readings-out FILE  Also export simulated sensor readings as JSON
  -h, --help           Print this help

Logging is controlled with RUST_LOG (default: info)."
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn csv_path_only() {
        let cmd = parse_args_from(args(&["plant.csv"])).unwrap();
        assert_eq!(
            cmd,
            Command::Run(CliOptions {
                csv_path: PathBuf::from("plant.csv"),
                config: None,
                output_dir: None,
                readings_out: None,
            })
        );
    }

    #[test]
    fn all_options() {
        let cmd = parse_args_from(args(&[
            "--config",
            "run.toml",
            "plant.csv",
            "--output-dir",
            "out",
            "--readings-out",
            "out/readings.json",
        ]))
        .unwrap();
        let Command::Run(opts) = cmd else {
            panic!("expected run command");
        };
        assert_eq!(opts.csv_path, PathBuf::from("plant.csv"));
        assert_eq!(opts.config, Some(PathBuf::from("run.toml")));
        assert_eq!(opts.output_dir, Some(PathBuf::from("out")));
        assert_eq!(opts.readings_out, Some(PathBuf::from("out/readings.json")));
    }

    #[test]
    fn help_wins() {
        assert_eq!(parse_args_from(args(&["plant.csv", "-h"])).unwrap(), Command::Help);
    }

    #[test]
    fn missing_csv_path() {
        let err = parse_args_from(args(&["--output-dir", "out"])).unwrap_err();
        assert!(err.contains("CSV_PATH"));
    }

    #[test]
    fn missing_option_value() {
        let err = parse_args_from(args(&["plant.csv", "--config"])).unwrap_err();
        assert!(err.contains("--config"));
    }

    #[test]
    fn duplicate_and_unknown_options() {
        assert!(parse_args_from(args(&["a.csv", "b.csv"])).is_err());
        assert!(parse_args_from(args(&["a.csv", "--epochs", "3"])).is_err());
        assert!(parse_args_from(args(&["a.csv", "--config", "x", "--config", "y"])).is_err());
    }
}
