use anyhow::{Context, bail};
use clap::Parser;
use macroquad::prelude::*;
use tracing::{error, info};

use life_engines::{
    Grid, Retention, Simulation, SimulationConfig, presets,
    cli::{self, EngineChoice, RunArgs},
    input::{self, ViewerCommand},
    rendering::{self, FrameTexture, Playback},
};

/// Compute a Game of Life run, then play the frames back.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    #[arg(long, value_enum, default_value_t = EngineChoice::Flat)]
    engine: EngineChoice,

    /// Start from a centered preset instead of random noise
    #[arg(long)]
    pattern: Option<String>,

    /// Delay between displayed frames
    #[arg(long, default_value_t = 5)]
    frame_delay_ms: u64,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Conway's Game of Life".to_owned(),
        window_width: 1920,
        window_height: 1080,
        window_resizable: true,
        ..Default::default()
    }
}

fn initial_grid(cli: &Cli, config: &SimulationConfig) -> anyhow::Result<Grid> {
    match &cli.pattern {
        Some(name) => {
            let Some(pattern) = presets::by_name(name) else {
                bail!("unknown pattern {name:?}");
            };
            let mut grid = Grid::new(config.width, config.height)?;
            pattern.place_centered(&mut grid);
            Ok(grid)
        }
        None => Ok(config.initial_grid()?),
    }
}

fn compute_frames(cli: &Cli) -> anyhow::Result<(Vec<Grid>, &'static str)> {
    let config = cli.run.to_config(cli.engine, Retention::All);
    rendering::texture_size(config.width, config.height).with_context(|| {
        format!(
            "{}x{} grid does not fit in a texture (max {} per side)",
            config.width,
            config.height,
            u16::MAX
        )
    })?;
    let initial = initial_grid(cli, &config)?;
    let mut simulation = Simulation::from_config(&config).context("setting up simulation")?;
    let start = std::time::Instant::now();
    let frames = simulation
        .run(config.width, config.height, config.iterations, &initial)
        .context("running simulation")?;
    info!(elapsed_ms = start.elapsed().as_millis() as u64, frames = frames.len(), "Elapsed time");
    Ok((frames, simulation.engine_name()))
}

#[macroquad::main(window_conf)]
async fn main() {
    cli::init_tracing();
    let cli = Cli::parse();
    let (frames, engine) = match compute_frames(&cli) {
        Ok(result) => result,
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    };
    let Some(first) = frames.first() else {
        info!("No frames to show");
        return;
    };

    let Some(texture) = FrameTexture::new(first) else {
        error!("Frame too large to display");
        std::process::exit(1);
    };
    let mut playback = Playback::new(frames.len(), cli.frame_delay_ms);

    loop {
        if input::process_keyboard_input(&mut playback) == ViewerCommand::Quit {
            break;
        }
        let before = playback.frame;
        playback.tick(get_frame_time());
        if playback.frame != before {
            texture.upload(&frames[playback.frame]);
        }

        clear_background(BLACK);
        texture.draw();
        rendering::draw_overlay(&playback, &frames[playback.frame], engine);

        next_frame().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("life").chain(args.iter().copied()))
    }

    #[test]
    fn test_pattern_grid_uses_given_config() {
        let cli = parse(&["--width", "9", "--height", "7", "--pattern", "blinker"]);
        let config = cli.run.to_config(cli.engine, Retention::All);
        let grid = initial_grid(&cli, &config).unwrap();
        assert_eq!(grid.dimensions(), (9, 7));
        assert_eq!(grid.count_alive(), 3);
    }

    #[test]
    fn test_oversized_grid_rejected_before_running() {
        let cli = parse(&["--width", "70000", "--height", "3", "--iterations", "1000000"]);
        let err = compute_frames(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("does not fit in a texture"));
    }
}
