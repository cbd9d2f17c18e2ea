use crate::command::{self, Command};
use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::render::Renderer;
use colored::Colorize;
use log::warn;
use std::io::Write;
use std::process::Stdio;

const PAGE_LINES: usize = 20;

fn paginate(content: &str) {
    let pager = std::process::Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| std::process::Command::new("more").stdin(Stdio::piped()).spawn());

    let mut pager = match pager {
        Ok(pager) => pager,
        Err(e) => {
            warn!("no pager available: {}", e);
            println!("{}", content);
            return;
        }
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    let _ = pager.wait();
}

pub struct Session {
    pub ledger: Ledger,
    renderer: Renderer,
    interactive: bool,
}

impl Session {
    pub fn new(ledger: Ledger, renderer: Renderer, interactive: bool) -> Session {
        Session {
            ledger,
            renderer,
            interactive,
        }
    }

    fn execute(&mut self, command: Command) -> Result<String, LedgerError> {
        let ledger = &mut self.ledger;
        let renderer = &self.renderer;

        let output = match command {
            Command::ListFacilities => renderer.facilities(ledger.facilities()),
            Command::AddFacility(spec) => {
                ledger.add_facility(&spec)?;
                String::new()
            }
            Command::Enter {
                facility,
                plate,
                date,
                time,
            } => renderer.entry(&ledger.enter(&facility, &plate, &date, &time)?),
            Command::Exit {
                facility,
                plate,
                date,
                time,
            } => renderer.exit(&ledger.exit(&facility, &plate, &date, &time)?),
            Command::History { plate } => renderer.history(&ledger.history(&plate)?),
            Command::Revenue { facility, date } => {
                renderer.revenue(&ledger.revenue(&facility, date.as_deref())?)
            }
            Command::Remove { facility } => renderer.names(&ledger.remove_facility(&facility)?),
            Command::Help => command::help(),
            Command::Quit => String::new(),
        };
        Ok(output)
    }

    fn emit(&self, output: &str) {
        if output.is_empty() {
            return;
        }
        if self.interactive && output.lines().count() > PAGE_LINES {
            paginate(output);
        } else {
            println!("{}", output);
        }
    }

    fn report(&self, result: Result<String, LedgerError>) -> Result<(), LedgerError> {
        match result {
            Ok(output) => self.emit(&output),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => println!("{}", e.to_string().red()),
        }
        Ok(())
    }

    /// `Ok(false)` once the user asked to quit. `Err` only for errors that
    /// leave the ledger unusable.
    pub fn run_line(&mut self, line: &str) -> Result<bool, LedgerError> {
        let command = match Command::parse(line) {
            Ok(Some(Command::Quit)) => return Ok(false),
            Ok(Some(command)) => command,
            Ok(None) => return Ok(true),
            Err(e) => {
                println!("{}", e.to_string().red());
                return Ok(true);
            }
        };

        let result = self.execute(command);
        self.report(result)?;
        Ok(true)
    }
}
