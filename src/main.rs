//! Sheetcalc - replay cell edits and evaluate formulas from the command line

mod config;
mod error;
mod script;

use anyhow::Context;
use sheetcalc_core::{CellChange, CellSnapshot, CyclePolicy, Sheet};
use sheetcalc_engine::engine::format_number;
use std::env;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: sheetcalc [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Edit script to replay (reads stdin when omitted)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <FORMULA>   Evaluate a formula against the sheet and print it");
    eprintln!("  --cycles <POLICY>         Cycle handling: detect (default) or unguarded");
    eprintln!("  --keep-format-on-clear    Keep formatting when a cell is cleared");
    eprintln!("  --config <FILE>           Load settings from TOML file");
    eprintln!("  --changes                 Print every change while replaying");
    eprintln!("  -h, --help                Print help");
}

struct Options {
    file_path: Option<PathBuf>,
    command: Option<String>,
    cycle_policy: Option<CyclePolicy>,
    keep_format_on_clear: bool,
    config_file: Option<PathBuf>,
    print_changes: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut options = Options {
        file_path: None,
        command: None,
        cycle_policy: None,
        keep_format_on_clear: false,
        config_file: None,
        print_changes: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-c" | "--command" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --command requires a formula");
                    std::process::exit(1);
                }
                options.command = Some(args[i].to_string());
            }
            "--cycles" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --cycles requires a value");
                    std::process::exit(1);
                }
                match args[i].parse::<CyclePolicy>() {
                    Ok(policy) => options.cycle_policy = Some(policy),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
            }
            "--keep-format-on-clear" => options.keep_format_on_clear = true,
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
                options.config_file = Some(PathBuf::from(&args[i]));
            }
            "--changes" => options.print_changes = true,
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                if options.file_path.is_none() {
                    options.file_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }

    match run(options) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns false when a `--command` formula could not be evaluated.
fn run(options: Options) -> anyhow::Result<bool> {
    let (mut sheet_config, warnings) = config::load_config(options.config_file.as_deref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
    if let Some(policy) = options.cycle_policy {
        sheet_config.cycle_policy = policy;
    }
    if options.keep_format_on_clear {
        sheet_config.keep_format_on_clear = true;
    }

    let mut sheet = Sheet::with_config(sheet_config);

    let edits = match (&options.file_path, &options.command) {
        (Some(path), _) => script::parse_script(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        (None, None) => {
            let content = std::io::read_to_string(std::io::stdin())
                .context("Failed to read edit script from stdin")?;
            script::parse_script_content(&content).context("Failed to parse stdin")?
        }
        (None, Some(_)) => Vec::new(),
    };

    let print_changes = options.print_changes;
    let warnings = script::replay(&mut sheet, &edits, |change| {
        if print_changes {
            print_change(change);
        }
    })?;
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    if let Some(formula) = options.command {
        return Ok(match sheet.evaluate_formula(&formula) {
            Ok(value) => {
                println!("{}", format_number(value));
                true
            }
            Err(e) => {
                println!("{}", sheet.config().invalid_formula_text);
                eprintln!("Error: {}", e);
                false
            }
        });
    }

    for cell in sheet.cells() {
        print_cell(&cell);
    }
    Ok(true)
}

fn print_change(change: &CellChange) {
    if change.removed {
        println!("change\t{}\t(removed)", change.reference);
    } else {
        println!("change\t{}\t{}", change.reference, change.display);
    }
}

fn print_cell(cell: &CellSnapshot) {
    let flags: Vec<&str> = cell
        .format
        .iter()
        .filter(|(_, on)| **on)
        .map(|(kind, _)| kind.as_str())
        .collect();

    if flags.is_empty() {
        println!("{}\t{}\t{}", cell.reference, cell.display, cell.raw);
    } else {
        println!(
            "{}\t{}\t{}\t{}",
            cell.reference,
            cell.display,
            cell.raw,
            flags.join(",")
        );
    }
}
