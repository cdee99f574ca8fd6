use std::io::{self, Read};
use std::sync::Arc;

use pillarbox::{Context, Options, SetDirectory, parse_from_corpus_with};

fn main() {
    env_logger::init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let ctx = match &config.directory_file {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => Context { directory: Arc::new(SetDirectory::from_lines(&text)) },
            Err(err) => {
                eprintln!("error: failed to read directory file '{path}': {err}");
                std::process::exit(2);
            }
        },
        None => Context::default(),
    };
    let opts = Options { attempt_fix: config.fix, try_all_fix_options: config.all_options };

    let records = match parse_from_corpus_with(&config.input, &ctx, &opts) {
        Ok(records) => records,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    for p in &records {
        println!(
            "{}\toriginal={:?} corrections={} in_directory={}",
            p.postcode,
            p.original,
            p.fix_distance,
            if p.in_directory { "yes" } else { "no" }
        );
    }
    eprintln!("{} postcode(s) found", records.len());
}

struct CliConfig {
    input: String,
    fix: bool,
    all_options: bool,
    directory_file: Option<String>,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut fix = false;
    let mut all_options = false;
    let mut directory_file: Option<String> = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("pillarbox {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--fix" => fix = true,
            "--all-options" => all_options = true,
            "--directory" => {
                let value =
                    args.next().ok_or_else(|| "error: --directory expects a path".to_string())?;
                directory_file = Some(value);
            }
            "--input" | "-i" => {
                let value =
                    args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--directory=") => {
                directory_file = Some(arg.trim_start_matches("--directory=").to_string());
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    if all_options && !fix {
        return Err("error: --all-options requires --fix".to_string());
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, fix, all_options, directory_file })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "pillarbox {version}

Scan text for UK postcodes, optionally repairing letter/digit confusion.

Usage:
  pillarbox [OPTIONS] [--] <text...>
  pillarbox [OPTIONS] --input <text>

Options:
  -i, --input <text>      Text to scan. If omitted, reads remaining args or
                          stdin when no args are provided.
  --fix                   Also match and repair postcodes with 0/O and 1/I
                          confusion.
  --all-options           Keep every plausible reading of an ambiguous
                          postcode instead of a single best guess.
                          Requires --fix.
  --directory <path>      Newline-separated snapshot of real postcodes used
                          to set the in_directory flag.
  -h, --help              Show this help message.
  -V, --version           Print version information.

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
