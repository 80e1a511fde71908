//! Runs the built `holdem` binary with a controlled environment, so
//! configuration layering is tested without touching this process's env.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::NamedTempFile;

const HOLDEM_VARS: &[&str] = &[
    "HOLDEM_CONFIG",
    "HOLDEM_SEED",
    "HOLDEM_BET_AMOUNT",
    "HOLDEM_BOTS",
    "HOLDEM_BOT_DELAY_MS",
    "HOLDEM_STARTING_STACK",
    "HOLDEM_SMALL_BLIND",
    "HOLDEM_BIG_BLIND",
    "HOLDEM_STARTING_POT",
];

fn holdem(args: &[&str], env: &[(&str, &str)], stdin: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_holdem"));
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for var in HOLDEM_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    for (k, v) in env {
        cmd.env(k, v);
    }
    let mut child = cmd.spawn().expect("spawn holdem");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for holdem")
}

fn cfg_json(env: &[(&str, &str)]) -> Value {
    let out = holdem(&["cfg"], env, "");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).expect("cfg prints JSON")
}

#[test]
fn cfg_defaults() {
    let json = cfg_json(&[]);
    assert_eq!(json["bots"]["value"], 3);
    assert_eq!(json["bet_amount"]["value"], 20);
    assert_eq!(json["small_blind"]["value"], 5);
    assert_eq!(json["big_blind"]["value"], 10);
    assert_eq!(json["starting_stack"]["value"], 1000);
    assert_eq!(json["seed"]["source"], "default");
}

#[test]
fn env_overrides_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "bots = 5\nbet_amount = 40\nseed = 1").unwrap();
    let path = file.path().to_string_lossy().into_owned();

    let json = cfg_json(&[("HOLDEM_CONFIG", path.as_str()), ("HOLDEM_SEED", "99")]);
    assert_eq!(json["bots"]["value"], 5);
    assert_eq!(json["bots"]["source"], "file");
    assert_eq!(json["bet_amount"]["value"], 40);
    assert_eq!(json["seed"]["value"], 99);
    assert_eq!(json["seed"]["source"], "env");
}

#[test]
fn invalid_config_exits_2() {
    let out = holdem(&["cfg"], &[("HOLDEM_BOTS", "12")], "");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error: Configuration error: Invalid configuration"));
}

#[test]
fn deal_honours_configured_bots() {
    let out = holdem(&["deal", "--seed", "3"], &[("HOLDEM_BOTS", "1")], "");
    assert!(out.status.success());
    let json: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["table"]["players"].as_array().unwrap().len(), 2);
}

#[test]
fn piped_session_plays_to_the_end() {
    let input = "call\n".repeat(40);
    let out = holdem(&["play", "--hands", "2", "--seed", "17", "--fast"], &[], &input);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Hand 1"));
    assert!(stdout.contains("Hand 2"));
    assert!(stdout.contains("Session over: 2 hand(s) played"));
}

#[test]
fn quitting_on_eof_is_not_an_error() {
    let out = holdem(&["play", "--hands", "1", "--seed", "17", "--fast"], &[], "");
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Quit."));
}

#[test]
fn logs_go_to_stderr_when_enabled() {
    let out = holdem(
        &["deal", "--seed", "5"],
        &[("RUST_LOG", "holdem_engine=info")],
        "",
    );
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("hand started"));
    let _: Value = serde_json::from_slice(&out.stdout).expect("stdout stays pure JSON");
}

#[test]
fn blinds_from_env_reach_the_table() {
    let out = holdem(
        &["deal", "--seed", "8"],
        &[("HOLDEM_SMALL_BLIND", "20"), ("HOLDEM_BIG_BLIND", "40")],
        "",
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let json: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["table"]["small_blind"], 20);
    assert_eq!(json["table"]["big_blind"], 40);
}
