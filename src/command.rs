use std::fmt;
use std::str::FromStr;

/// A user instruction typed at the prompt.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    /// Bare Enter: start when stopped, pause when running.
    Toggle,
    Start,
    Pause,
    Stop,
    Lap,
    Reset,
    RemoveLap(u64),
    ClearLaps,
    Help,
    Quit,
    Yes,
    No,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ParseCommandError {
    Unknown(String),
    MissingLap,
    BadLap(String),
}

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCommandError::Unknown(s) => write!(f, "unknown command '{s}' (h for help)"),
            ParseCommandError::MissingLap => write!(f, "which lap? e.g. 'rm 3'"),
            ParseCommandError::BadLap(s) => write!(f, "'{s}' is not a lap number"),
        }
    }
}

impl std::error::Error for ParseCommandError {}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim().to_ascii_lowercase();
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(Command::Toggle);
        };

        let cmd = match word {
            "start" | "s" => Command::Start,
            "pause" | "p" => Command::Pause,
            "stop" | "x" => Command::Stop,
            "lap" | "l" => Command::Lap,
            "reset" | "r" => Command::Reset,
            "clear" | "c" => Command::ClearLaps,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" => Command::Quit,
            "yes" | "y" => Command::Yes,
            "no" | "n" => Command::No,
            "rm" | "d" | "del" => {
                let arg = words.next().ok_or(ParseCommandError::MissingLap)?;
                let sequence = arg
                    .trim_start_matches('#')
                    .parse::<u64>()
                    .map_err(|_| ParseCommandError::BadLap(arg.to_string()))?;
                Command::RemoveLap(sequence)
            }
            _ => return Err(ParseCommandError::Unknown(s.trim().to_string())),
        };
        Ok(cmd)
    }
}
