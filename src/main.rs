//! CLI entry point for stratum.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use stratum::loader::load_commands;
use stratum::registry::LayerRegistry;
use stratum::report::render_report;
use stratum::validator::validate;

#[derive(Parser)]
#[command(name = "stratum")]
#[command(version)]
#[command(about = "Validate the layered dependency architecture of command files", long_about = None)]
struct Cli {
    /// Directory containing command files
    #[arg(long, value_name = "PATH", default_value = stratum::paths::COMMANDS_DIR)]
    commands_dir: PathBuf,

    /// Print the full validation report (always exits 0)
    #[arg(long)]
    report: bool,

    /// Print violations as JSON
    #[arg(long, conflicts_with = "report")]
    json: bool,

    /// Suppress informational output; errors still print
    #[arg(long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    match run(&cli) {
        // --report always exits 0, whatever it found.
        Ok(passed) => {
            if !passed && !cli.report {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let registry = LayerRegistry::builtin();
    let scan = load_commands(&cli.commands_dir)?;

    for diagnostic in &scan.diagnostics {
        eprintln!("{} {}", "Warning:".yellow(), diagnostic);
    }

    let violations = validate(&registry, &scan.commands);
    let passed = violations.is_empty();

    if cli.report {
        println!("{}", render_report(&registry, &scan.commands, &violations));
        return Ok(passed);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&violations)?);
        return Ok(passed);
    }

    if passed {
        if !cli.quiet {
            println!("{} All dependency validations passed!", "✓".green());
        }
    } else {
        println!("{} Dependency validation failed!", "✗".red());
        if !cli.quiet {
            for violation in &violations {
                println!("  {} {}", "•".red(), violation);
            }
            println!();
            println!(
                "Run with {} for detailed information.",
                "--report".cyan()
            );
        }
    }

    Ok(passed)
}
