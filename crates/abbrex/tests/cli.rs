use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE: &str = "The World Health Organization (WHO) published guidance on \
artificial intelligence (AI). Later the WHO (World Health Organisation) \
repeated it. Research and Development (R&D) budgets grew.";

fn abbrex() -> Command {
    let mut cmd: Command = cargo_bin_cmd!("abbrex").into();
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    for key in [
        "ABBREX_LLM_PROVIDER",
        "ABBREX_LLM_MODEL",
        "ABBREX_LLM_ENDPOINT",
        "ABBREX_LLM_API_KEY",
        "GEMINI_API_KEY",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

/// Writes `content` to `name` inside a fresh tempdir. The guard must be kept
/// alive for the file to exist.
fn write_doc(name: &str, content: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    (tmp, path)
}

fn extract(path: &Path, extra: &[&str]) -> assert_cmd::assert::Assert {
    abbrex()
        .arg("extract")
        .arg(path)
        .args(extra)
        .assert()
}

// --- Binary startup ---

#[test]
fn binary_runs() {
    abbrex()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("abbrex"));
}

#[test]
fn help_lists_subcommands() {
    abbrex()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("ask"));
}

// --- Extract ---

#[test]
fn extract_table() {
    let (_tmp, path) = write_doc("report.txt", SAMPLE);
    extract(&path, &[])
        .success()
        .stdout(predicate::str::contains("Abbreviations found in the document:"))
        .stdout(predicate::str::contains("World Health Organization"))
        .stdout(predicate::str::contains("Artificial Intelligence"))
        .stdout(predicate::str::contains("Research and Development"))
        .stdout(predicate::str::contains("Organisation").not());
}

#[test]
fn extract_raw_case_keeps_text() {
    let (_tmp, path) = write_doc("report.txt", SAMPLE);
    extract(&path, &["--raw-case", "--format", "tsv"])
        .success()
        .stdout(predicate::str::contains("AI\tartificial intelligence"));
}

#[test]
fn extract_tsv() {
    let (_tmp, path) = write_doc("report.txt", SAMPLE);
    extract(&path, &["--format", "tsv"])
        .success()
        .stdout(predicate::str::starts_with("abbreviation\tfull_term\n"))
        .stdout(predicate::str::contains("AI\tArtificial Intelligence\n"))
        .stdout(predicate::str::contains("WHO\tWorld Health Organization\n"));
}

#[test]
fn extract_json() {
    let (_tmp, path) = write_doc("report.txt", SAMPLE);
    let output = extract(&path, &["-f", "json"]).success().get_output().clone();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["abbreviation"], "WHO");
    assert_eq!(entries[0]["full_term"], "World Health Organization");
}

#[test]
fn extract_html() {
    let (_tmp, path) = write_doc(
        "page.html",
        "<html><head><title>Natural Language Processing (NLP)</title></head>\
         <body><p>Optical Character Recognition (OCR) &amp; more.</p></body></html>",
    );
    extract(&path, &["--format", "tsv"])
        .success()
        .stdout(predicate::str::contains("OCR\tOptical Character Recognition"))
        .stdout(predicate::str::contains("NLP").not());
}

#[test]
fn extract_no_matches() {
    let (_tmp, path) = write_doc("plain.txt", "Nothing to see here (really).");
    extract(&path, &[])
        .success()
        .stdout(predicate::str::contains(
            "No abbreviations were found in the document.",
        ));
}

#[test]
fn extract_no_matches_tsv_keeps_header() {
    let (_tmp, path) = write_doc("plain.txt", "");
    extract(&path, &["--format", "tsv"])
        .success()
        .stdout("abbreviation\tfull_term\n")
        .stderr(predicate::str::contains("No abbreviations were found"));
}

#[test]
fn extract_unsupported_format_fails() {
    let (_tmp, path) = write_doc("slides.key", "Artificial Intelligence (AI)");
    extract(&path, &[])
        .failure()
        .stderr(predicate::str::contains("Unsupported format"));
}

#[test]
fn extract_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    extract(&tmp.path().join("missing.txt"), &[])
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

// --- Ask ---

#[test]
fn ask_gemini_without_key_fails() {
    abbrex()
        .args(["ask", "What is AI?", "--provider", "gemini"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing API key"));
}

#[test]
fn ask_unknown_provider_rejected() {
    abbrex()
        .args(["ask", "What is AI?", "--provider", "openai"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown LLM provider"));
}

#[test]
fn ask_empty_question_fails() {
    abbrex()
        .args(["ask", "   ", "--provider", "ollama"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Question is empty"));
}

#[test]
fn ask_unreachable_endpoint_fails() {
    abbrex()
        .args([
            "ask",
            "What is AI?",
            "--provider",
            "ollama",
            "--endpoint",
            "http://127.0.0.1:9",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error while calling the LLM API"));
}
