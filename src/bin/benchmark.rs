//! Performance benchmark comparing the three step engines on one grid

use std::time::Instant;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;

use life_engines::{
    Device, EngineKind, Grid, Retention, Simulation,
    cli::{self, EngineChoice, RunArgs},
    rendering::format_number,
};

#[derive(Parser, Debug)]
#[command(about = "Time every engine on the same seeded grid")]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

fn benchmark_engine(
    kind: EngineKind,
    device: &Device,
    initial: &Grid,
    iterations: usize,
) -> anyhow::Result<(f64, Grid)> {
    let (width, height) = initial.dimensions();
    let mut simulation = Simulation::new(kind.build(device)?).with_retention(Retention::Latest);

    let start = Instant::now();
    let collector = simulation.run_collect(width, height, iterations, initial)?;
    let ms_per_gen = start.elapsed().as_secs_f64() * 1000.0 / iterations.max(1) as f64;

    let last = collector.latest().cloned().unwrap_or_else(|| initial.clone());
    Ok((ms_per_gen, last))
}

fn main() -> anyhow::Result<()> {
    cli::init_tracing();
    let mut cli = Cli::parse();
    if cli.run.seed.is_none() {
        cli.run.seed = Some(0x5EED);
    }

    let config = cli.run.to_config(EngineChoice::Sequential, Retention::Latest);
    config.validate()?;
    let device = Device::select(cli.run.device_selector()).context("selecting device")?;
    let initial = config.initial_grid()?;
    let cells = config.width * config.height;

    println!("=== Game of Life Engine Benchmark ===\n");
    println!(
        "Grid {}x{} ({} cells), {} generations, device: {}\n",
        config.width,
        config.height,
        format_number(cells),
        config.iterations,
        device.name()
    );
    println!("{:>14} {:>12} {:>16}", "Engine", "ms/gen", "cells/sec");
    println!("{:-<44}", "");

    let mut reference: Option<Grid> = None;
    for kind in EngineKind::all(cli.run.tile_edge) {
        let (ms, last) = benchmark_engine(kind, &device, &initial, config.iterations)?;
        let throughput = if ms > 0.0 { cells as f64 / (ms / 1000.0) } else { 0.0 };
        println!("{:>14} {:>12.3} {:>16}", kind.name(), ms, format_number(throughput as usize));

        if reference.as_ref().is_some_and(|expected| *expected != last) {
            bail!("{} diverged from {}", kind.name(), EngineKind::Sequential.name());
        }
        reference.get_or_insert(last);
    }

    info!("All engines produced identical final frames");
    Ok(())
}
