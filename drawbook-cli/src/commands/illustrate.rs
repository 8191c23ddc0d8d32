//! Illustrate command implementation

use anyhow::{Context, Result};
use drawbook_core::generate::{DescribeThenStylize, HfTextClient};
use drawbook_core::{GeneratorConfig, IllustrationGenerator};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Generate missing illustrations for a book description
pub async fn illustrate(
    input: &str,
    output_dir: Option<&str>,
    style: Option<&str>,
    describe: bool,
    write: bool,
) -> Result<()> {
    let mut book = super::load_book(input)?;
    if let Some(style) = style {
        book.style = style.into();
    }

    let config = GeneratorConfig::from_env();
    let mut generator = IllustrationGenerator::huggingface(&config)
        .context("Failed to set up the image service")?;
    if describe {
        let describer = HfTextClient::new(&config).context("Failed to set up the text service")?;
        generator = generator.with_prompt_strategy(DescribeThenStylize::new(describer));
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>3}/{len:3} {msg}")?
            .progress_chars("##-"),
    );
    let generator = generator.with_progress(pb);

    let report = generator
        .illustrate(&mut book, output_dir.map(Path::new))
        .await
        .with_context(|| format!("Failed to illustrate {}", input))?;

    println!("\nIllustration complete:");
    println!("  Generated: {}", report.resolved.len());
    println!("  Failed:    {}", report.failed.len());
    println!("  Skipped:   {}", report.skipped);
    if let Some(dir) = &report.output_dir {
        println!("  Saved to:  {}", dir.display());
    }

    if write {
        book.save_json(Path::new(input))
            .with_context(|| format!("Failed to save {}", input))?;
        println!("Updated book written to: {}", input);
    } else {
        println!("{}", serde_json::to_string_pretty(&book)?);
    }

    Ok(())
}
