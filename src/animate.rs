//! Live growth and looping.
//!
//! The animator grows trees onto a [`Screen`], presenting a frame after each
//! step in live mode, and in infinite mode keeps growing new trees with fresh
//! seeds until the viewer quits.

use crate::canvas::Canvas;
use crate::config::TreeConfig;
use crate::error::Result;
use crate::grower::{generate_seeded, GrowthObserver, GrowthStep, Grower, Unobserved};
use std::ops::ControlFlow;
use std::time::Duration;
use tracing::info;

/// Poll interval while holding a finished tree on screen
const HOLD_POLL: Duration = Duration::from_millis(100);

/// Viewer input, reduced to what the animator cares about
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// q, Esc or Ctrl-C
    Quit,
    /// Any other key
    Key,
}

/// Somewhere frames can be shown and input read from
pub trait Screen {
    fn present(&mut self, canvas: &Canvas) -> Result<()>;

    /// Wait up to `timeout` for input; doubles as frame pacing
    fn poll_input(&mut self, timeout: Duration) -> Result<Option<Input>>;
}

/// What happened during a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub generations: u32,
    pub last_seed: u64,
    /// The viewer quit before the run finished on its own
    pub interrupted: bool,
}

/// Frame-per-step observer
struct LiveFrames<'a, S: Screen> {
    screen: &'a mut S,
    delay: Duration,
    screensaver: bool,
}

impl<S: Screen> GrowthObserver for LiveFrames<'_, S> {
    fn on_step(&mut self, _step: &GrowthStep, canvas: &Canvas) -> Result<ControlFlow<()>> {
        self.screen.present(canvas)?;
        match self.screen.poll_input(self.delay)? {
            Some(input) if aborts(input, self.screensaver) => Ok(ControlFlow::Break(())),
            _ => Ok(ControlFlow::Continue(())),
        }
    }
}

fn aborts(input: Input, screensaver: bool) -> bool {
    screensaver || input == Input::Quit
}

/// Drives one or more generations onto a screen
pub struct Animator<'a, S: Screen> {
    screen: &'a mut S,
    config: &'a TreeConfig,
}

impl<'a, S: Screen> Animator<'a, S> {
    pub fn new(screen: &'a mut S, config: &'a TreeConfig) -> Self {
        Self { screen, config }
    }

    fn live(&self) -> bool {
        self.config.live || self.config.screensaver
    }

    fn infinite(&self) -> bool {
        self.config.infinite || self.config.screensaver
    }

    pub fn run(&mut self) -> Result<RunSummary> {
        let grower = Grower::new(self.config)?;
        let mut seed = self.config.resolved_seed();
        let mut summary = RunSummary::default();

        loop {
            summary.generations += 1;
            summary.last_seed = seed;
            info!(seed, generation = summary.generations, "starting tree");

            let completed = if self.live() {
                let mut frames = LiveFrames {
                    screen: &mut *self.screen,
                    delay: self.config.step_delay(),
                    screensaver: self.config.screensaver,
                };
                generate_seeded(&grower, self.config, seed, &mut frames)?.completed
            } else {
                let tree = generate_seeded(&grower, self.config, seed, &mut Unobserved)?;
                self.screen.present(&tree.canvas)?;
                tree.completed
            };

            if !completed {
                summary.interrupted = true;
                break;
            }

            if !self.infinite() {
                self.hold()?;
                break;
            }

            if let Some(input) = self.screen.poll_input(self.config.wait_delay())? {
                if aborts(input, self.config.screensaver) {
                    summary.interrupted = true;
                    break;
                }
            }

            seed = self.config.reseed.next_seed(seed);
            info!(seed, policy = ?self.config.reseed, "reseeded");
        }

        Ok(summary)
    }

    /// Keep the finished tree up until any key
    fn hold(&mut self) -> Result<()> {
        while self.screen.poll_input(HOLD_POLL)?.is_none() {}
        Ok(())
    }
}
