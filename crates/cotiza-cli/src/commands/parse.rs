use cotiza_core::extract::ExtractorSet;
use cotiza_core::extraction::PdfExtractor;
use std::path::PathBuf;

use crate::commands::{display_name, load_options, InputExtractor};
use crate::output;
use crate::OutputFormat;

pub fn run(
    input_file: PathBuf,
    output_format: OutputFormat,
    config: Option<PathBuf>,
) -> Result<(), cotiza_core::error::CotizaError> {
    let options = load_options(config.as_deref())?;
    let extractors = ExtractorSet::builtin()?;

    let bytes = std::fs::read(&input_file)?;
    let text = InputExtractor::new().extract_text(&bytes)?;
    let outcome = cotiza_core::parse_text(&text, &extractors, &options);

    match output_format {
        OutputFormat::Json => output::json::print(&outcome)?,
        OutputFormat::Table => {
            output::table::print_outcome(&display_name(&input_file), &outcome, &options)
        }
    }

    Ok(())
}
