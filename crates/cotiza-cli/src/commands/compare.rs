use cotiza_core::extract::ExtractorSet;
use cotiza_core::PdfInput;
use std::path::PathBuf;

use crate::commands::{display_name, load_options, InputExtractor};
use crate::output;
use crate::OutputFormat;

pub fn run(
    files: Vec<PathBuf>,
    output_format: OutputFormat,
    output_file: Option<PathBuf>,
    profile_files: Vec<PathBuf>,
    config: Option<PathBuf>,
) -> Result<(), cotiza_core::error::CotizaError> {
    let options = load_options(config.as_deref())?;
    tracing::debug!(
        files = files.len(),
        profiles = profile_files.len(),
        "starting comparison"
    );

    let mut extractors = ExtractorSet::builtin()?;
    for path in &profile_files {
        let profile = cotiza_core::profiles::load_profile(path)?;
        extractors.with_profile(&profile)?;
    }

    let mut inputs = Vec::with_capacity(files.len());
    for path in &files {
        inputs.push(PdfInput {
            name: display_name(path),
            bytes: std::fs::read(path)?,
        });
    }

    let comparison =
        cotiza_core::compare_pdfs(&inputs, &InputExtractor::new(), &extractors, &options)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&comparison)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Compared {} quote(s), written to {}",
                comparison.table.columns.len(),
                path.display()
            );
        }
        None => match output_format {
            OutputFormat::Json => output::json::print(&comparison)?,
            OutputFormat::Table => output::table::print_comparison(&comparison.table),
        },
    }

    for d in &comparison.diagnostics {
        eprintln!("  warning: {d}");
    }

    Ok(())
}
