mod command;
mod config;
mod pump;
mod ui;

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::{Context, Result};
use stopwatch_core::{MonotonicClock, Stopwatch, TimerState};

use crate::command::Command;
use crate::config::Config;
use crate::pump::Pump;
use crate::ui::Screen;

#[derive(Debug)]
enum AppOp {
    Redraw,
    Input(String),
    Pump,
    Quit,
}

struct StopwatchApp {
    screen: Screen<io::Stdout>,
    config: Config,
    stopwatch: Stopwatch<MonotonicClock>,
    pump: Pump,

    notice: Option<String>,
    help_visible: bool,
    confirm_exit: bool,
    exiting: bool,
}

impl StopwatchApp {
    fn new(config: Config, main_conn: Sender<AppOp>) -> Result<Self> {
        let pump = Pump::spawn(move || main_conn.send(AppOp::Pump).is_ok())?;
        Ok(Self {
            screen: Screen::stdout(),
            config,
            stopwatch: Stopwatch::new(MonotonicClock::new()),
            pump,
            notice: None,
            help_visible: false,
            confirm_exit: false,
            exiting: false,
        })
    }

    fn redraw(&mut self) -> Result<()> {
        let frame = if self.help_visible {
            ui::draw_help()
        } else if self.confirm_exit {
            ui::draw_confirm_exit()
        } else {
            ui::draw_stopwatch(
                &self.stopwatch,
                self.config.max_visible_laps,
                self.notice.as_deref(),
            )
        };
        self.screen.present(&frame).context("can't write frame")
    }

    fn handle_pump(&mut self) -> Result<()> {
        if !self.stopwatch.is_running() {
            // Late tick after a pause
            self.pump.stop();
            return Ok(());
        }
        self.stopwatch.tick();
        if self.screen.is_live() && !self.help_visible && !self.confirm_exit {
            self.redraw()?;
        }
        Ok(())
    }

    fn handle_input(&mut self, line: &str) -> Result<()> {
        self.notice = None;

        // If help screen is showing, any input dismisses it
        if self.help_visible {
            self.help_visible = false;
            return self.redraw();
        }

        let cmd = match line.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(e) => {
                log::warn!("rejected input {:?}: {}", line, e);
                self.notice = Some(e.to_string());
                return self.redraw();
            }
        };
        log::debug!("command {:?}", cmd);

        if self.confirm_exit {
            match cmd {
                Command::Yes => {
                    self.stop_timer();
                    self.confirm_exit = false;
                    self.exiting = true;
                    return Ok(());
                }
                Command::No | Command::Toggle => {
                    self.confirm_exit = false;
                }
                _ => {}
            }
            return self.redraw();
        }

        match cmd {
            Command::Toggle => match self.stopwatch.state() {
                TimerState::Idle | TimerState::Paused => self.start_timer(),
                TimerState::Running => self.stop_timer(),
            },
            Command::Start => self.start_timer(),
            Command::Pause | Command::Stop => self.stop_timer(),
            Command::Lap => match self.stopwatch.lap() {
                Some(lap) => log::info!("lap {} at {} ms", lap.sequence(), lap.elapsed_ms()),
                None => self.notice = Some("start the stopwatch to record laps".into()),
            },
            Command::Reset => {
                self.stopwatch.reset();
                self.pump.stop();
                log::info!("reset");
            }
            Command::RemoveLap(sequence) => {
                if self.stopwatch.remove_lap(sequence).is_none() {
                    self.notice = Some(format!("no lap {}", sequence));
                }
            }
            Command::ClearLaps => self.stopwatch.clear_laps(),
            Command::Help => self.help_visible = true,
            Command::Quit => {
                if self.stopwatch.is_running() {
                    self.confirm_exit = true;
                } else {
                    self.exiting = true;
                    return Ok(());
                }
            }
            Command::Yes | Command::No => {}
        }
        self.redraw()
    }

    fn start_timer(&mut self) {
        if self.stopwatch.is_running() {
            return;
        }
        self.stopwatch.start();
        self.pump.start(self.config.tick_interval);
        log::info!("started at {} ms", self.stopwatch.elapsed_ms());
    }

    fn stop_timer(&mut self) {
        if !self.stopwatch.is_running() {
            return;
        }
        self.stopwatch.pause();
        self.pump.stop();
        log::info!("paused at {} ms", self.stopwatch.elapsed_ms());
    }
}

fn input_thread(main_conn: Sender<AppOp>) {
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("can't read input: {}", e);
                break;
            }
        };
        if main_conn.send(AppOp::Input(line)).is_err() {
            return;
        }
    }
    main_conn.send(AppOp::Quit).ok();
}

fn run(config: Config, main_conn: Sender<AppOp>, inbox: Receiver<AppOp>) -> Result<()> {
    let mut app = StopwatchApp::new(config, main_conn.clone())?;

    thread::Builder::new()
        .name("input".into())
        .spawn(move || input_thread(main_conn))
        .context("can't spawn input thread")?;

    while !app.exiting {
        let Ok(msg) = inbox.recv() else { break };
        match msg {
            AppOp::Redraw => app.redraw()?,
            AppOp::Input(line) => app.handle_input(&line)?,
            AppOp::Pump => app.handle_pump()?,
            AppOp::Quit => break,
        }
    }

    // Clean up
    app.stop_timer();
    log::info!(
        "exiting at {} with {} laps",
        app.stopwatch.formatted_time(),
        app.stopwatch.laps().len()
    );
    println!();
    Ok(())
}

fn main() -> Result<()> {
    let matches = config::command().get_matches();
    let config = Config::from_matches(&matches);

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .try_init()?;
    log::info!("Stopwatch PID is {}", std::process::id());

    let (main_conn, inbox) = mpsc::channel();
    main_conn.send(AppOp::Redraw).ok();
    run(config, main_conn, inbox)
}
