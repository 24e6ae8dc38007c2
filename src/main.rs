use std::io::{BufRead, Write};

use log::{info, warn};

mod cli;
mod compute;
mod io;
mod output;
mod plot;
mod types;

fn run<R: BufRead, W: Write>(args: &cli::Args, input: &mut R, out: &mut W) -> anyhow::Result<()> {
    let distances = io::filter_complete(io::load_distances(&args.distance_table)?);
    let lengths = io::load_lengths(&args.length_table)?;

    let metrics = compute::aggregate(&distances, &lengths)?;

    let name = match &args.output {
        Some(name) => name.clone(),
        None => cli::prompt_output_name(&args.outdir, input, out)?,
    };
    let outdir = output::create_output_dir(&args.outdir, &name)?;
    output::write_table(&outdir, &name, &metrics)?;

    if args.no_plot {
        info!("Skipping figure");
    } else if metrics.is_empty() {
        warn!("No strain found in both tables, figure not drawn");
    } else {
        plot::plot_bini(&metrics, output::figure_path(&outdir, &name))?;
    }

    info!("Results in {:?}", outdir);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let args = cli::parse_args();

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    run(&args, &mut input, &mut out)
}
