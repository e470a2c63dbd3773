use clap::{Parser, Subcommand};
use habitree::config::parse_leaves;
use habitree::render::Format;
use habitree::runner::{self, Presentation};
use habitree::settings::Settings;
use habitree::{render_for_stage, ReseedPolicy};
use std::io::{self, Write};

#[derive(Parser)]
#[command(name = "habitree")]
#[command(version)]
#[command(about = "Seed-deterministic terminal trees for habit trackers", long_about = None)]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log growth details to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grow a tree
    Grow {
        /// Show live growth animation
        #[arg(short, long)]
        live: bool,

        /// Keep generating trees infinitely
        #[arg(short, long)]
        infinite: bool,

        /// Live and infinite; any key quits
        #[arg(short = 'S', long)]
        screensaver: bool,

        /// Print tree to stdout (no interactive display)
        #[arg(short, long)]
        print: bool,

        /// Animation step delay in seconds
        #[arg(short, long)]
        time: Option<f32>,

        /// Wait time between trees in infinite mode (seconds)
        #[arg(short, long)]
        wait: Option<f64>,

        /// Initial branch life (1-200, higher = bigger tree)
        #[arg(short = 'L', long)]
        life: Option<u32>,

        /// Branch multiplier (1-20, higher = bushier)
        #[arg(short = 'M', long)]
        multiplier: Option<u32>,

        /// Random seed for reproducibility (0 = from the clock)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Leaf characters (comma-separated)
        #[arg(short = 'c', long)]
        leaf: Option<String>,

        /// Canvas width (defaults to the terminal width when interactive)
        #[arg(long)]
        width: Option<u16>,

        /// Canvas height (defaults to the terminal height when interactive)
        #[arg(long)]
        height: Option<u16>,

        /// Output encoding for print mode
        #[arg(short, long, value_enum, default_value = "ansi")]
        format: Format,

        /// How looping runs pick the next seed
        #[arg(long, value_enum)]
        reseed: Option<ReseedPolicy>,
    },

    /// Render the tree for a habit's seed and growth stage
    Stage {
        /// Seed stored with the habit
        #[arg(short, long)]
        seed: u64,

        /// Growth stage (clamped to the configured range)
        #[arg(long, default_value = "1")]
        stage: u32,

        /// Output encoding
        #[arg(short, long, value_enum, default_value = "ansi")]
        format: Format,
    },
}

fn init_logging(verbose: bool, debug: bool) {
    let log_level = if debug {
        tracing::Level::DEBUG
    } else if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    let settings = Settings::load();

    match cli.command {
        Commands::Grow {
            live,
            infinite,
            screensaver,
            print,
            time,
            wait,
            life,
            multiplier,
            seed,
            leaf,
            width,
            height,
            format,
            reseed,
        } => {
            let mut config = settings.tree_config();
            config.live = live || screensaver;
            config.infinite = infinite || screensaver;
            config.screensaver = screensaver;
            config.seed = seed.unwrap_or(0);
            if let Some(time) = time {
                config.time_step = time;
            }
            if let Some(wait) = wait {
                config.time_wait = wait;
            }
            if let Some(life) = life {
                config.life_start = life.min(200);
            }
            if let Some(multiplier) = multiplier {
                config.multiplier = multiplier.min(20);
            }
            if let Some(leaf) = leaf {
                config.leaves = parse_leaves(&leaf);
            }
            if let Some(reseed) = reseed {
                config.reseed = reseed;
            }
            let explicit_size = width.is_some() || height.is_some()
                || settings.tree.width.is_some()
                || settings.tree.height.is_some();
            config.width = width.unwrap_or(config.width);
            config.height = height.unwrap_or(config.height);

            let presentation = Presentation {
                print,
                format,
                fit_terminal: !explicit_size,
            };
            runner::run(&config, presentation)?;
        }
        Commands::Stage { seed, stage, format } => {
            let tree = render_for_stage(seed, stage, &settings.stage, format.formatter())?;
            let mut out = io::stdout().lock();
            writeln!(out, "{}", tree)?;
        }
    }

    Ok(())
}
