//! Presets command.

use std::process::ExitCode;

use anyhow::Result;
use verbump_config::PresetFactory;

/// Lists every preset with its description.
#[allow(clippy::unnecessary_wraps)]
pub fn run() -> Result<ExitCode> {
    let presets = PresetFactory::new().all();
    let width = presets
        .iter()
        .map(|preset| preset.identifier().len())
        .max()
        .unwrap_or_default();

    for preset in &presets {
        println!(
            "{:<width$}  {}",
            preset.identifier(),
            preset.description()
        );
    }

    Ok(ExitCode::SUCCESS)
}
