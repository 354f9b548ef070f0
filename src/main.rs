use anyhow::{Context, Result};
use ctnxtract::CtnXtract;
use log::info;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let study = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading study configuration from {path}");
            CtnXtract::try_from(PathBuf::from(&path))
                .with_context(|| format!("Could not set up the study from {path}"))?
        }
        None => {
            info!("Using the bundled CTN-0027 configuration");
            CtnXtract::default_study().context("Could not set up the bundled study")?
        }
    };

    study.run().context("Pipeline failed")?;
    info!("Done");
    Ok(())
}
