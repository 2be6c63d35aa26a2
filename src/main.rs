use anyhow::{Context, Result};
use clap::Parser;
use icon_compose::{
    config::{ConfigFile, IconConfig, Overrides},
    icon_gen,
    logging::init_logging,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[clap(
    name = "icon-compose",
    about = "Composite the app logo over a gradient background and write the icon set"
)]
struct Args {
    /// Directory that relative asset and output paths resolve against.
    #[clap(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// JSON file overriding the built-in layout.
    #[clap(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Foreground logo (PNG with transparency).
    #[clap(long, value_name = "FILE")]
    foreground: Option<PathBuf>,

    /// Gradient color at the top edge (CSS color format)
    #[clap(long, value_name = "COLOR")]
    start_color: Option<String>,

    /// Gradient color from the stop row down (CSS color format)
    #[clap(long, value_name = "COLOR")]
    end_color: Option<String>,

    /// Fraction of the height covered by the gradient, in (0, 1]
    #[clap(long, value_name = "RATIO")]
    stop: Option<f64>,

    /// Square canvas size in pixels
    #[clap(long, value_name = "PX")]
    size: Option<u32>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            root: self.root.clone(),
            foreground: self.foreground.clone(),
            start_color: self.start_color.clone(),
            end_color: self.end_color.clone(),
            stop: self.stop,
            size: self.size,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = IconConfig::default();
    if let Some(path) = &args.config {
        let file = ConfigFile::load(path).context("Failed to load config")?;
        config = config.apply_file(file)?;
    }
    let config = config.apply_overrides(args.overrides())?.validate()?;

    icon_gen::generate_icons(&config)?;
    Ok(())
}
