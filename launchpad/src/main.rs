use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use launchpad::{
    catalog::{select_demo_scenario, ScenarioTree},
    config::ConfigManager,
    geometry::Rect,
    layout::{ReferenceGeometry, SizeMode},
    page_table::PageTable,
    pages::PageId,
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

/// Menu button stack of the stock dialog template
const MENU_BUTTON_LEFT: i32 = 8;
const MENU_BUTTON_TOP: i32 = 76;
const MENU_BUTTON_ROW: i32 = 26;

#[derive(Parser)]
#[command(name = "launchpad")]
#[command(about = "Inspect launch dialog configuration, layout and demo mode")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration
    Config,

    /// Print the dialog geometry for a client size as JSON
    Layout {
        #[arg(short = 'W', long)]
        width: i32,
        #[arg(short = 'H', long)]
        height: i32,
        /// Treat the window as minimized
        #[arg(long)]
        minimized: bool,
    },

    /// Pick demo scenarios from a scenario folder
    Demo {
        /// Scenario folder to scan
        #[arg(short, long)]
        scenarios: PathBuf,
        /// Random seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Number of picks
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Print the page menu after hiding and unhiding pages
    Pages {
        /// Logical index of a page to hide (repeatable)
        #[arg(long)]
        hide: Vec<usize>,
        /// Logical index of a page to unhide after hiding (repeatable)
        #[arg(long)]
        unhide: Vec<usize>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config => cmd_config(cli.config),
        Commands::Layout { width, height, minimized } => cmd_layout(width, height, minimized),
        Commands::Demo { scenarios, seed, count } => cmd_demo(&scenarios, seed, count),
        Commands::Pages { hide, unhide } => cmd_pages(&hide, &unhide),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<ConfigManager> {
    match path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    }
}

fn cmd_config(path: Option<PathBuf>) -> Result<()> {
    let manager = load_config(path)?;
    println!("# {}", manager.path().display());
    print!("{}", manager.config().to_toml()?);
    Ok(())
}

fn cmd_layout(width: i32, height: i32, minimized: bool) -> Result<()> {
    let mode = if minimized { SizeMode::Minimized } else { SizeMode::Restored };
    let reference = ReferenceGeometry::template();

    match reference.layout(width, height, mode) {
        Some(layout) => {
            let json = serde_json::to_string_pretty(&layout).context("Failed to serialize layout")?;
            println!("{}", json);
        }
        None => println!("Minimized: no layout"),
    }
    Ok(())
}

fn cmd_demo(scenarios: &Path, seed: u64, count: usize) -> Result<()> {
    let mut tree = ScenarioTree::scan(scenarios)
        .with_context(|| format!("Failed to scan {}", scenarios.display()))?;
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..count {
        match select_demo_scenario(&mut tree, &mut rng) {
            Some(_) => {
                let node = tree.selected().context("Selection was not recorded")?;
                println!("{}", tree.path(node));
            }
            None => {
                println!("No demo scenarios found");
                break;
            }
        }
    }
    Ok(())
}

fn cmd_pages(hide: &[usize], unhide: &[usize]) -> Result<()> {
    let buttons = (0..PageId::COUNT)
        .map(|i| Rect::from_size(MENU_BUTTON_LEFT, MENU_BUTTON_TOP + i as i32 * MENU_BUTTON_ROW, 110, 24))
        .collect();
    let mut table = PageTable::new(buttons);

    for &index in hide {
        table.hide(index)?;
    }
    for &index in unhide {
        let label = PageId::from_index(index).map(|p| p.display_name()).unwrap_or("");
        table.unhide(index, label)?;
    }

    info!("{} of {} pages visible", table.visible_count(), table.len());
    for logical in table.visible_pages() {
        let Some(entry) = table.entry(logical) else { continue };
        let name = PageId::from_index(logical).map(|p| p.display_name()).unwrap_or("?");
        println!(
            "slot {}  page {} ({})  button y={}",
            entry.slot.unwrap_or_default(),
            logical,
            name,
            entry.button.top
        );
    }
    Ok(())
}
