use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write};

use stopwatch_core::{format_delta, format_lap_time, Clock, Stopwatch, TimerState};

const CLEAR: &str = "\x1b[2J\x1b[H";

/// Terminal output. Frames replace each other on a tty and are appended
/// otherwise, so piped output stays readable.
pub struct Screen<W: Write> {
    out: W,
    clear: bool,
}

impl Screen<io::Stdout> {
    pub fn stdout() -> Self {
        let out = io::stdout();
        let clear = out.is_terminal();
        Self { out, clear }
    }
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, clear: bool) -> Self {
        Self { out, clear }
    }

    pub fn is_live(&self) -> bool {
        self.clear
    }

    pub fn present(&mut self, frame: &str) -> io::Result<()> {
        if self.clear {
            self.out.write_all(CLEAR.as_bytes())?;
        }
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn draw_stopwatch<C: Clock>(
    sw: &Stopwatch<C>,
    max_visible: usize,
    notice: Option<&str>,
) -> String {
    let mut frame = String::new();

    writeln!(frame, "STOPWATCH  [{}]", sw.state().label()).unwrap();
    writeln!(frame).unwrap();

    // Hours block only once the first hour has passed
    let time = sw.formatted_time();
    if time.has_hours() {
        writeln!(frame, "    {}", time).unwrap();
    } else {
        writeln!(frame, "    {}", time.compact()).unwrap();
    }
    writeln!(frame).unwrap();

    let laps = sw.laps();
    writeln!(frame, "Laps ({})", laps.len()).unwrap();
    if laps.is_empty() {
        writeln!(frame, "  Type l to record lap times").unwrap();
    } else {
        for row in laps.rows().take(max_visible) {
            write!(
                frame,
                "  Lap {:>3}   {}",
                row.lap.sequence(),
                format_lap_time(row.lap.elapsed_ms())
            )
            .unwrap();
            if let Some(delta) = row.delta_ms {
                write!(frame, "   {}", format_delta(delta)).unwrap();
            }
            writeln!(frame).unwrap();
        }
        if laps.len() > max_visible {
            writeln!(frame, "  ... {} more", laps.len() - max_visible).unwrap();
        }
    }
    writeln!(frame).unwrap();

    if let Some(notice) = notice {
        writeln!(frame, "! {}", notice).unwrap();
    }

    let toggle = match sw.state() {
        TimerState::Running => "ENTER=pause",
        TimerState::Idle | TimerState::Paused => "ENTER=start",
    };
    writeln!(frame, "{}  l=lap  r=reset  rm N=remove  c=clear  h=help  q=quit", toggle).unwrap();
    write!(frame, "> ").unwrap();
    frame
}

pub fn draw_help() -> String {
    let mut frame = String::new();
    writeln!(
        frame,
        "STOPWATCH HELP\n\n\
         ENTER      Start/Pause\n\
         s, start   Start or resume\n\
         p, pause   Pause\n\
         x, stop    Stop (same as pause)\n\
         l, lap     Record lap\n\
         r, reset   Reset time and laps\n\
         rm N       Remove lap N\n\
         c, clear   Clear all laps\n\
         q, quit    Quit\n"
    )
    .unwrap();
    write!(frame, "Press ENTER to close\n> ").unwrap();
    frame
}

pub fn draw_confirm_exit() -> String {
    "Stopwatch Running\n\n\
     The stopwatch is still running.\n\
     Exit anyway?\n\n  \
     y = Stop & exit\n  \
     n = Cancel\n> "
        .to_string()
}
