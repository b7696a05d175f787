//! Integration tests for the np CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Create a temp directory holding a stats file for a test character.
fn stats_file() -> (TempDir, String) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kara.json");
    fs::write(
        &path,
        r#"{
    "Strength": 3,
    "Brawl": 2,
    "Wits": 2,
    "Occult": 1
}
"#,
    )
    .unwrap();
    let path = path.to_str().unwrap().to_string();
    (dir, path)
}

fn np() -> Command {
    Command::cargo_bin("np").unwrap()
}

fn roll_json(args: &[&str]) -> serde_json::Value {
    let output = np().arg("roll").args(args).arg("--json").output().unwrap();
    assert!(output.status.success(), "roll failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_direct_pool_json() {
    let v = roll_json(&["5", "--seed", "1"]);
    assert_eq!(v["request"]["Direct"]["pool_size"], 5);
    assert_eq!(v["pool"]["final_pool"], 5);
    let dice = v["roll"]["die_results"].as_array().unwrap();
    assert!(dice.len() >= 5);
    assert!(dice.iter().all(|d| (1..=10).contains(&d.as_u64().unwrap())));
}

#[test]
fn roll_is_reproducible_with_seed() {
    let first = np()
        .args(["roll", "7", "--seed", "42", "--again", "8"])
        .output()
        .unwrap();
    let second = np()
        .args(["roll", "7", "--seed", "42", "--again", "8"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn roll_with_inline_stats() {
    np().args([
        "roll",
        "Strength + Brawl",
        "--stat",
        "Strength=3",
        "--stat",
        "Brawl=2",
        "--seed",
        "3",
        "--actor",
        "Kara",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Kara rolls strength + brawl (5 dice): ["));
}

#[test]
fn roll_with_stats_file_and_penalty() {
    let (_dir, path) = stats_file();
    let v = roll_json(&["Wits + Occult - 1", "--stats", &path, "--seed", "2"]);
    assert_eq!(v["pool"]["pre_modifier"], 3);
    assert_eq!(v["pool"]["final_pool"], 2);
}

#[test]
fn inline_stat_overrides_file() {
    let (_dir, path) = stats_file();
    let v = roll_json(&["Wits", "--stats", &path, "--stat", "wits=6", "--seed", "2"]);
    assert_eq!(v["pool"]["final_pool"], 6);
}

#[test]
fn negative_pool_rolls_chance_die() {
    np().args(["roll", "--seed", "2", "--", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Player rolls -1 (chance die): ["));
}

#[test]
fn rote_and_again_listed() {
    np().args(["roll", "4", "--rote", "--again", "9", "--no-cost", "--seed", "5"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("(4 dice, 9-again, rote)")
                .and(predicate::str::contains("(no cost)")),
        );
}

#[test]
fn damage_has_no_tier() {
    np().args(["roll", "3", "--damage", "--view", "observer", "--seed", "8"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("damage.")
                .and(predicate::str::contains("Success").not())
                .and(predicate::str::contains("Failure").not()),
        );
}

#[test]
fn observer_view_hides_dice() {
    np().args(["roll", "6", "--view", "observer", "--seed", "11"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Player rolls 6: ")
                .and(predicate::str::contains(", ").not()),
        );
}

#[test]
fn record_view_prints_markdown() {
    np().args(["roll", "3", "--view", "record", "--actor", "Kara", "--seed", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("# Roll Record")
                .and(predicate::str::contains("**Kara** rolls 3")),
        );
}

#[test]
fn batch_prints_summary_table() {
    np().args(["roll", "5", "--times", "4", "--seed", "4"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Successes")
                .and(predicate::str::contains("Outcome"))
                .and(predicate::str::contains("4 rolls")),
        );
}

#[test]
fn batch_json_is_an_array() {
    let v = roll_json(&["2", "--times", "3", "--seed", "6"]);
    assert_eq!(v.as_array().unwrap().len(), 3);
}

#[test]
fn missing_stat_fails() {
    np().args(["roll", "Strength + Firearms", "--stat", "Strength=3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: no such stat: firearms"));
}

#[test]
fn malformed_expression_fails() {
    np().args(["roll", "a + b + c + d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid roll format"));
}

#[test]
fn oversized_number_is_a_format_error() {
    np().args(["roll", "99999999999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid roll format: 99999999999"));
}

#[test]
fn times_out_of_range_rejected() {
    np().args(["roll", "1", "--times", "4294967295", "--seed", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
    np().args(["roll", "1", "--times", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn invalid_again_fails() {
    np().args(["roll", "3", "--again", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid exploding threshold: 7"));
}

#[test]
fn pool_limit_enforced() {
    np().args(["roll", "20", "--max-pool", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum of 10"));
}

#[test]
fn bad_stat_pair_rejected() {
    np().args(["roll", "Wits", "--stat", "Wits"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected NAME=VALUE"));
}

#[test]
fn unreadable_stats_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nobody.json");
    np().args(["roll", "Wits", "--stats", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_two_terms() {
    np().args(["parse", "Strength + Brawl-2"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("two terms")
                .and(predicate::str::contains("strength, brawl"))
                .and(predicate::str::contains("-2")),
        );
}

#[test]
fn parse_direct_chance() {
    np().args(["parse", "--", "-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("direct").and(predicate::str::contains("chance die")));
}

#[test]
fn parse_rejects_empty_term() {
    np().args(["parse", "+ brawl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty term"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_session_rolls_and_quits() {
    let (_dir, path) = stats_file();
    np().args(["play", "--stats", &path, "--actor", "Kara", "--seed", "1"])
        .write_stdin("roll/post Strength + Brawl\nrecord text\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Kara rolls strength + brawl (5 dice)")
                .and(predicate::str::contains("(posted to record)"))
                .and(predicate::str::contains("Roll Record"))
                .and(predicate::str::contains("Goodbye!")),
        );
}

#[test]
fn play_reports_errors_and_continues() {
    np().args(["play", "--seed", "1"])
        .write_stdin("dance\nroll Firearms\nchance\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("unknown command: dance")
                .and(predicate::str::contains("no such stat: firearms"))
                .and(predicate::str::contains("Player rolls 0 (chance die)")),
        );
}

#[test]
fn quit_with_trailing_words_ends_session() {
    np().args(["play", "--seed", "1"])
        .write_stdin("quit now\nroll 3\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Goodbye!")
                .and(predicate::str::contains("Player rolls 3").not()),
        );
}
