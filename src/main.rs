//! `reveal` - replay reveal container scenarios headlessly

use anyhow::Result;
use clap::Parser;

use reveal::cli::{run_scenario, CliArgs, Scenario};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    reveal::tracing::init();

    let frame = args.frame().map_err(anyhow::Error::msg)?;
    let config = args.load_config()?;
    if let Some(path) = args.save_config(&config)? {
        eprintln!("Saved config to {}", path.display());
    }
    let scenario = Scenario::load(&args.scenario)?;

    let report = run_scenario(&scenario, config, frame);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    Ok(())
}
