mod config;
mod schedule;
mod session;
mod store;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::env;
use std::io;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::Config;
use schedule::ScheduleSet;
use session::Session;
use store::SetStore;

#[derive(Parser)]
#[command(name = "timetable")]
#[command(about = "Enter a weekly class schedule, catch overlaps and view it as a grid")]
#[command(version)]
struct Cli {
    /// Directory holding saved sets (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Do not open the timetable window afterwards
    #[arg(long, global = true)]
    no_window: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a saved set in the timetable window
    Show {
        /// File name inside the data directory, e.g. set1.txt
        file: String,
    },

    /// List saved sets
    List,

    /// Write the current configuration to the config file and print its path
    Config,
}

fn main() -> Result<()> {
    // Logs go to stderr so prompts on stdout stay readable
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    if cli.no_window {
        config.show_window = false;
    }

    let store = SetStore::new(config.resolved_data_dir());
    info!(data_dir = %store.dir().display(), "using saved sets directory");

    match cli.command {
        None => run_interactive(&config, &store),
        Some(Commands::Show { file }) => {
            let set = store
                .load(&file)
                .with_context(|| format!("Failed to load {}", file))?;
            show_window(&config, set)
        }
        Some(Commands::List) => {
            let names = store.list().context("Failed to list saved sets")?;
            if names.is_empty() {
                println!("No saved sets found.");
            }
            for name in names {
                println!("{}", name);
            }
            Ok(())
        }
        Some(Commands::Config) => {
            config.save().context("Failed to write config file")?;
            println!("{}", Config::config_path()?.display());
            Ok(())
        }
    }
}

fn run_interactive(config: &Config, store: &SetStore) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = Session::new(stdin.lock(), stdout.lock()).run(store)?;

    if outcome.set.is_empty() {
        info!("no entries to show");
    }

    if let Some(set_number) = outcome.set_number {
        store
            .save(set_number, &outcome.set)
            .with_context(|| format!("Failed to save set {}", set_number))?;
        println!("Data saved successfully to set {}", set_number);
    }

    show_window(config, outcome.set)
}

fn show_window(config: &Config, set: ScheduleSet) -> Result<()> {
    if !config.show_window {
        return Ok(());
    }

    let viewport = eframe::egui::ViewportBuilder::default()
        .with_inner_size([schedule::WINDOW_WIDTH, schedule::WINDOW_HEIGHT])
        .with_title("Time Table");

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let font_range = config.label_font_range();
    eframe::run_native(
        "Time Table",
        options,
        Box::new(move |cc| Ok(Box::new(ui::TimetableApp::new(cc, &set, font_range)))),
    )
    .map_err(|e| anyhow::anyhow!("Window failed: {}", e))
}
