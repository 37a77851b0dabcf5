use std::path::Path;

use abbrex_core::{AbbreviationIndex, ExtractionPipeline, ExtractorOptions};
use anyhow::{Context, Result};
use console::style;

use super::OutputFormat;

pub const NO_MATCHES: &str = "No abbreviations were found in the document.";

pub async fn run(file: &Path, format: OutputFormat, raw_case: bool) -> Result<()> {
    let options = if raw_case {
        ExtractorOptions::default()
    } else {
        ExtractorOptions::display()
    };

    let pipeline = ExtractionPipeline::new().with_options(options);
    let output = pipeline
        .run_file(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    tracing::debug!(
        characters = output.stats.characters,
        abbreviations = output.stats.abbreviations,
        duration_ms = output.stats.duration_ms,
        "Extraction finished"
    );

    if output.document.is_blank() {
        eprintln!(
            "{} The document contains no extractable text",
            style("!").yellow()
        );
    }

    match format {
        OutputFormat::Table => print_table(&output.index),
        OutputFormat::Tsv => {
            print!("{}", output.index.to_tsv());
            if output.index.is_empty() {
                eprintln!("{NO_MATCHES}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output.index)?);
            if output.index.is_empty() {
                eprintln!("{NO_MATCHES}");
            }
        }
    }

    Ok(())
}

fn print_table(index: &AbbreviationIndex) {
    if index.is_empty() {
        println!("{NO_MATCHES}");
        return;
    }

    let entries = index.sorted();
    let width = entries
        .iter()
        .map(|e| e.abbreviation.chars().count())
        .max()
        .unwrap_or(0)
        .max("Abbreviation".len());

    println!("{}", style("Abbreviations found in the document:").bold());
    println!();
    println!("  {:<width$}  Full term", "Abbreviation");
    for entry in entries {
        // Pad before styling so escape codes don't count toward the width
        let padded = format!("{:<width$}", entry.abbreviation);
        println!("  {}  {}", style(padded).cyan().bold(), entry.full_term);
    }
    println!();
    println!("  {} found", index.len());
}
