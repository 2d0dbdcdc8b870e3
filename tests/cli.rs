use assert_cmd::Command;
use predicates::prelude::*;

fn stopwatch() -> Command {
    Command::cargo_bin("stopwatch").unwrap()
}

#[test]
fn test_help() {
    stopwatch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--tick-ms"))
        .stdout(predicate::str::contains("--laps"));
}

#[test]
fn test_rejects_zero_tick() {
    stopwatch()
        .args(["--tick-ms", "0"])
        .assert()
        .failure();
}

#[test]
fn test_scripted_session() {
    stopwatch()
        .write_stdin("start\nlap\nlap\npause\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("STOPWATCH  [Ready]"))
        .stdout(predicate::str::contains("STOPWATCH  [Paused]"))
        .stdout(predicate::str::contains("Laps (2)"))
        .stdout(predicate::str::contains("  Lap   2   "));
}

#[test]
fn test_removed_lap_number_not_reused() {
    stopwatch()
        .write_stdin("s\nl\nl\nrm 1\nl\np\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("  Lap   3   "))
        .stdout(predicate::str::contains("Laps (2)"));
}

#[test]
fn test_unknown_command_notice() {
    stopwatch()
        .write_stdin("launch\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("! unknown command 'launch' (h for help)"));
}

#[test]
fn test_end_of_input_exits_while_running() {
    stopwatch()
        .write_stdin("start\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("STOPWATCH  [Running]"));
}

#[test]
fn test_quit_while_running_asks_first() {
    stopwatch()
        .write_stdin("start\nq\nn\nq\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exit anyway?"));
}
