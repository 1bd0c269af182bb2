use clap::{Parser, Subcommand};
use orbit::carousel::{CarouselEngine, Collaborators};
use orbit::config::{self, Config};
use orbit::services::{LogFeedback, LogNavigator};
use orbit::sys::clock::ManualClock;
use orbit::sys::trace;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "orbit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Replay a recorded input trace (newline-delimited JSON) through the engine
    Replay {
        /// Path to the trace file
        trace: PathBuf,

        /// Config file to use instead of the user config
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
    },
    /// Write the default config file if none exists and print its path
    Init,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Replay { trace, config } => {
            let config = match config {
                Some(path) => config::load_config(Some(&path))?,
                None => config::load_or_default(),
            };
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            rt.block_on(replay(trace, config))
        }
    }
}

async fn replay(trace_path: PathBuf, config: Config) -> anyhow::Result<()> {
    let clock = ManualClock::new();
    let mut engine = CarouselEngine::new(
        config.carousel_items()?,
        config.tuning.clone(),
        Collaborators::new(clock.clone(), LogNavigator, LogFeedback),
    )?;

    let (tx, rx) = async_channel::bounded(64);
    let reader = tokio::spawn(trace::read_trace(trace_path, tx));

    while let Ok(record) = rx.recv().await {
        clock.set(record.at);
        engine.apply(record.input);
    }
    let applied = reader.await??;
    engine.settle();

    log::info!(
        "Replayed {} inputs: angle {:.1}, item {} ('{}'), pull {:.1}",
        applied,
        engine.rotation_angle(),
        engine.current_index(),
        engine.focused_item().title,
        engine.pull_distance()
    );
    Ok(())
}
