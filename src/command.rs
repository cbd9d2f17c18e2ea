use crate::registry::FacilitySpec;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ListFacilities,
    AddFacility(FacilitySpec),
    Enter {
        facility: String,
        plate: String,
        date: String,
        time: String,
    },
    Exit {
        facility: String,
        plate: String,
        date: String,
        time: String,
    },
    History {
        plate: String,
    },
    Revenue {
        facility: String,
        date: Option<String>,
    },
    Remove {
        facility: String,
    },
    Help,
    Quit,
}

pub const COMMANDS: [&str; 16] = [
    "p", "park", "e", "enter", "s", "exit", "v", "history", "f", "revenue", "r", "remove",
    "help", "?", "q", "quit",
];

const PARK_USAGE: &str = "p [<name> <capacity> <first-hour> <after-first-hour> <daily-cap>]";
const ENTER_USAGE: &str = "e <name> <plate> <DD-MM-YYYY> <HH:MM>";
const EXIT_USAGE: &str = "s <name> <plate> <DD-MM-YYYY> <HH:MM>";
const HISTORY_USAGE: &str = "v <plate>";
const REVENUE_USAGE: &str = "f <name> [<DD-MM-YYYY>]";
const REMOVE_USAGE: &str = "r <name>";

/// Splits on whitespace; a double-quoted run is a single token with the
/// quotes stripped.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = vec![];
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if has_token {
        tokens.push(current);
    }
    tokens
}

fn stamp_args(args: &[String], usage: &'static str) -> Result<(String, String, String, String), CommandError> {
    match args {
        [facility, plate, rest @ ..] => Ok((
            facility.clone(),
            plate.clone(),
            rest.first().cloned().unwrap_or_default(),
            rest.get(1).cloned().unwrap_or_default(),
        )),
        _ => Err(CommandError::Usage(usage)),
    }
}

impl Command {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let tokens = tokenize(line);
        let Some((name, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match name.as_str() {
            "p" | "park" => match args {
                [] => Command::ListFacilities,
                [name, capacity, x, y, z, ..] => Command::AddFacility(FacilitySpec {
                    name: name.clone(),
                    capacity: capacity.parse().unwrap_or(0),
                    first_hour: x.parse().unwrap_or(0.0),
                    after_first_hour: y.parse().unwrap_or(0.0),
                    daily_cap: z.parse().unwrap_or(0.0),
                }),
                _ => return Err(CommandError::Usage(PARK_USAGE)),
            },
            "e" | "enter" => {
                let (facility, plate, date, time) = stamp_args(args, ENTER_USAGE)?;
                Command::Enter {
                    facility,
                    plate,
                    date,
                    time,
                }
            }
            "s" | "exit" => {
                let (facility, plate, date, time) = stamp_args(args, EXIT_USAGE)?;
                Command::Exit {
                    facility,
                    plate,
                    date,
                    time,
                }
            }
            "v" | "history" => match args {
                [plate, ..] => Command::History {
                    plate: plate.clone(),
                },
                [] => return Err(CommandError::Usage(HISTORY_USAGE)),
            },
            "f" | "revenue" => match args {
                [facility, rest @ ..] => Command::Revenue {
                    facility: facility.clone(),
                    date: rest.first().cloned(),
                },
                [] => return Err(CommandError::Usage(REVENUE_USAGE)),
            },
            "r" | "remove" => match args {
                [facility, ..] => Command::Remove {
                    facility: facility.clone(),
                },
                [] => return Err(CommandError::Usage(REMOVE_USAGE)),
            },
            "help" | "?" => Command::Help,
            "q" | "quit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

pub fn help() -> String {
    [
        "",
        "Available Commands:",
        "  p                          - List parkings: name, capacity, free spaces",
        "  p <name> <cap> <x> <y> <z> - Add a parking; x per 15 min in the first hour, y after, z per day",
        "  e <name> <plate> <date> <time> - Register an entry (date DD-MM-YYYY, time HH:MM)",
        "  s <name> <plate> <date> <time> - Register an exit and charge the stay",
        "  v <plate>                  - List every stay of a vehicle",
        "  f <name> [<date>]          - Daily revenue, or the exits of one day",
        "  r <name>                   - Remove a parking and everything recorded there",
        "  help / ?                   - Show this help menu",
        "  q / quit                   - Exit",
        "",
    ]
    .join("\n")
}
