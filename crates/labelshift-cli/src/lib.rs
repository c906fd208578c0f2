//! CLI logic for the Labelshift gesture replayer.
//!
//! The CLI reads a scenario (a small diagram plus pointer events), replays
//! the events through the label dragging tool, and writes every label's
//! final segment offset as a TOML report.

pub mod error_adapter;
pub mod scenario;

mod args;
mod config;
mod report;

pub use args::Args;
pub use report::OffsetReport;

use std::fs;

use log::info;

use labelshift::LabelShiftError;

use scenario::Scenario;

/// Run the Labelshift CLI application
///
/// This function replays the input scenario and writes the resulting offset
/// report to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `LabelShiftError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed scenarios
/// - Scenario diagrams that refer to unknown or duplicate identifiers
pub fn run(args: &Args) -> Result<(), LabelShiftError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Replaying scenario"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let scenario = Scenario::parse(&source)?;
    let diagram = scenario.replay(app_config.tool())?;

    let report = OffsetReport::from_diagram(&diagram);
    fs::write(&args.output, report.to_toml()?)?;

    info!(output_file = args.output, labels = report.len(); "Offset report written");

    Ok(())
}
