use crate::compose::{composite, fit_to, load_foreground, save_targets};
use crate::config::IconConfig;
use crate::error::Result;
use crate::gradient::paint_gradient;
use log::info;
use std::path::PathBuf;

/// Run the whole pipeline: paint the background, load and fit the
/// foreground, composite, then write every output target.
///
/// The foreground is loaded before anything touches the output paths, so a
/// missing asset leaves the filesystem unchanged. Returns the written paths.
pub fn generate_icons(config: &IconConfig) -> Result<Vec<PathBuf>> {
    let spec = &config.gradient;

    info!("Generating background...");
    let background = paint_gradient(spec);

    info!("Loading contents...");
    let foreground = load_foreground(&config.foreground_path())?;
    let foreground = fit_to(foreground, spec.width, spec.height)?;

    info!("Compositing...");
    let combined = composite(&background, &foreground)?;

    let written = save_targets(&combined, &config.outputs, &config.root)?;

    info!("Done!");
    Ok(written)
}
