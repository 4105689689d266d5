//! strava2gpx - CLI entry point

use anyhow::Result;
use clap::Parser;

use strava2gpx::cli::Cli;
use strava2gpx::driver::{self, RunConfig};
use strava2gpx::export::ExportSource;
use strava2gpx::filter::FilterConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_types {
        return cmd_list_types(&cli);
    }
    cmd_convert(cli)
}

fn cmd_list_types(cli: &Cli) -> Result<()> {
    let mut export = ExportSource::open(&cli.input)?;
    let types = driver::list_types(&mut export)?;

    println!("Activity types found in {}:", cli.input.display());
    for activity_type in types {
        println!("- {}", activity_type);
    }

    Ok(())
}

fn cmd_convert(cli: Cli) -> Result<()> {
    let Some(output_dir) = cli.output else {
        // clap's required_unless_present guard keeps this unreachable
        anyhow::bail!("either --output or --list-types must be specified");
    };

    let config = RunConfig {
        export: cli.input,
        output_dir,
        filters: FilterConfig {
            types: cli.filter_types,
            years: cli.filter_years,
        },
        verbose: cli.verbose,
    };

    driver::run_conversion(&config)
}
