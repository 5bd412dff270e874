use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use pstr::{Regex, render, shell};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log parsed patterns and automata
    #[arg(short = 'd', long, global = true)]
    debug: bool,

    /// Print verdicts without colour
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prompt for patterns and strings until end of input
    Repl,
    /// Check one string against one pattern
    Check {
        /// Pattern to compile
        #[arg(value_name = "REGEX")]
        regex: String,
        /// String to test
        #[arg(value_name = "STRING")]
        string: String,
    },
    /// Print the parsed nodes and the automaton of a pattern
    Dump {
        #[arg(value_name = "REGEX")]
        regex: String,
    },
    /// Answer {"regex", "string"} JSON requests, one per line on stdin
    Json,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let level = if args.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let color = !args.no_color;
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();

    match args.command.unwrap_or(Command::Repl) {
        Command::Repl => {
            shell::run_repl(stdin, &mut stdout, color)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Json => {
            shell::run_json(stdin, &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { regex, string } => match Regex::new(&regex) {
            Ok(re) => {
                let valid = re.is_match(&string);
                writeln!(stdout, "{}", shell::verdict(valid, color))?;
                Ok(if valid {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(1)
                })
            }
            Err(e) => {
                eprintln!("Error while parsing regex: {e}");
                Ok(ExitCode::from(2))
            }
        },
        Command::Dump { regex } => match Regex::new(&regex) {
            Ok(re) => {
                writeln!(stdout, "Pattern: {}", render(re.nodes()))?;
                writeln!(stdout, "Nodes:")?;
                for node in re.nodes() {
                    writeln!(stdout, "  {node:?}")?;
                }
                writeln!(stdout, "Automaton ({} states):", re.automaton().len())?;
                write!(stdout, "{}", re.automaton())?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("Error while parsing regex: {e}");
                Ok(ExitCode::from(2))
            }
        },
    }
}
