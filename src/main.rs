use crate::config::Config;
use crate::ledger::Ledger;
use crate::render::Renderer;
use crate::session::Session;
use clap::{ArgAction, Parser};
use log::info;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::path::{Path, PathBuf};

mod command;
mod config;
mod error;
mod facility;
mod ledger;
mod plate;
mod registry;
mod render;
mod session;
mod tariff;
mod time;
mod vehicle;

#[derive(Parser)]
struct Args {
    /// Path to a JSON file of parkings to register at startup
    #[arg(short, long, value_name = "FILE")]
    facilities: Option<PathBuf>,

    /// Run the commands in FILE instead of reading from the prompt
    #[arg(short, long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Render listings as tables
    #[arg(short, long)]
    table: bool,

    /// Log more; repeat for debug output
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((0, candidates))
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run_script(session: &mut Session, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let script = std::fs::read_to_string(path)?;
    for line in script.lines() {
        if !session.run_line(line)? {
            break;
        }
    }
    Ok(())
}

fn run_prompt(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: command::COMMANDS.iter().map(|c| c.to_string()).collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;
                if !session.run_line(trimmed)? {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut ledger = Ledger::new();
    if let Some(path) = &args.facilities {
        let loaded = Config::load_from_file(path)?.apply(&mut ledger)?;
        info!("loaded {} parkings from {}", loaded, path.display());
    }

    let mut session = Session::new(ledger, Renderer { tables: args.table }, args.script.is_none());

    match &args.script {
        Some(path) => {
            colored::control::set_override(false);
            run_script(&mut session, path)?;
        }
        None => {
            println!(
                "Parking ledger ready with {} parkings. Type ? for help.",
                session.ledger.facilities.len()
            );
            run_prompt(&mut session)?;
        }
    }

    let ledger = &session.ledger;
    match ledger.clock_floor() {
        Some(last) => info!(
            "closing with {} parkings and {} vehicles, last event at {}",
            ledger.facilities.len(),
            ledger.vehicles.len(),
            last
        ),
        None => info!("closing with {} parkings and no events", ledger.facilities.len()),
    }
    Ok(())
}
