use anyhow::{Context as _, Result};
use noisefield::{config::VisualizerConfig, frame_loop::FrameLoop, EngineBuilder};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = VisualizerConfig::default();

    println!("{}", config.overlay.diagnostic());

    let mut engine = EngineBuilder::with_dimensions(config.width, config.height)
        .title(config.title.clone())
        .frame_rate(config.frame_rate)
        .build()
        .context("failed to open the display")?;

    let mut frame_loop = FrameLoop::new(&config);
    engine
        .run(|ctx, canvas| frame_loop.frame(ctx, canvas))
        .context("display failed while running")?;

    log::info!("final seed {}", frame_loop.state().seed());

    Ok(())
}
