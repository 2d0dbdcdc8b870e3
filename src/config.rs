use std::time::Duration;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ArgMatches, ColorChoice, Command,
};

pub const DEFAULT_TICK_MS: u64 = 16;
pub const DEFAULT_VISIBLE_LAPS: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub tick_interval: Duration,
    pub max_visible_laps: usize,
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            max_visible_laps: DEFAULT_VISIBLE_LAPS,
            verbosity: 0,
        }
    }
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let defaults = Self::default();
        Self {
            tick_interval: matches
                .get_one::<u64>("tick-ms")
                .map(|ms| Duration::from_millis(*ms))
                .unwrap_or(defaults.tick_interval),
            max_visible_laps: matches
                .get_one::<usize>("laps")
                .copied()
                .unwrap_or(defaults.max_visible_laps),
            verbosity: matches.get_one::<u8>("verbose").copied().unwrap_or(0),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

pub fn command() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("stopwatch")
        .about("Terminal stopwatch with lap splits")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("tick-ms")
                .short('t')
                .long("tick-ms")
                .help("Interval between display refreshes while running")
                .default_value("16")
                .value_parser(clap::value_parser!(u64).range(1..=1000))
                .value_name("MS"),
        )
        .arg(
            Arg::new("laps")
                .short('l')
                .long("laps")
                .help("Maximum number of lap rows to show")
                .default_value("10")
                .value_parser(parse_visible_laps)
                .value_name("N"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity, -vv for debug")
                .action(ArgAction::Count),
        )
}

fn parse_visible_laps(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must show at least one lap".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid lap count '{s}': {e}")),
    }
}
