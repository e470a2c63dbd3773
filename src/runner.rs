use crate::animate::{Animator, RunSummary};
use crate::config::TreeConfig;
use crate::error::Result;
use crate::grower::{generate_seeded, Grower, Unobserved};
use crate::render::{render, Format};
use crate::terminal::Terminal;
use std::io::{self, Write};
use tracing::info;

/// Where and how a tree is shown
#[derive(Clone, Copy, Debug)]
pub struct Presentation {
    /// Write finished trees to stdout instead of taking over the terminal
    pub print: bool,
    pub format: Format,
    /// Size the canvas to the terminal (interactive only)
    pub fit_terminal: bool,
}

/// Run the tree generator
pub fn run(config: &TreeConfig, presentation: Presentation) -> Result<()> {
    if presentation.print {
        run_print_mode(config, presentation.format, &mut io::stdout().lock())
    } else {
        let summary = run_interactive(config, presentation.fit_terminal)?;
        info!(
            generations = summary.generations,
            last_seed = summary.last_seed,
            interrupted = summary.interrupted,
            "done"
        );
        Ok(())
    }
}

/// Grow and write trees; loops with a new seed when infinite
pub fn run_print_mode(config: &TreeConfig, format: Format, out: &mut dyn Write) -> Result<()> {
    let grower = Grower::new(config)?;
    let mut seed = config.resolved_seed();

    loop {
        let tree = generate_seeded(&grower, config, seed, &mut Unobserved)?;
        writeln!(out, "{}", render(&tree.canvas, format.formatter()))?;
        out.flush()?;

        if !config.infinite {
            break;
        }

        std::thread::sleep(config.wait_delay());
        seed = config.reseed.next_seed(seed);
    }

    Ok(())
}

fn run_interactive(config: &TreeConfig, fit_terminal: bool) -> Result<RunSummary> {
    config.validate()?;
    let mut term = Terminal::new()?;

    let mut config = config.clone();
    if fit_terminal {
        let (width, height) = term.size();
        config.width = width;
        config.height = height;
    }

    Animator::new(&mut term, &config).run()
}
