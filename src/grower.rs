//! Depth-first stochastic tree growth.
//!
//! A branch walks step by step until its life runs out. Before each move it
//! may spawn a child (leaf burst, dying burst, forked trunk or shoot); the
//! child is grown to completion before the parent finishes its step. Growth
//! runs on an explicit work list instead of recursion so deep trees cannot
//! overflow the call stack.

use crate::branch::{BranchType, Glyph};
use crate::canvas::Canvas;
use crate::config::TreeConfig;
use crate::error::{Result, TreeError};
use crate::random::RandomSource;
use std::ops::ControlFlow;
use tracing::debug;

/// Counters for tracking generation progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    pub branches: u32,
    pub shoots: u32,
    /// Decides the side of the next shoot
    pub shoot_parity: u32,
}

/// Mutable state threaded through every growth step of one generation
pub struct GrowthContext {
    pub canvas: Canvas,
    pub counters: Counters,
    pub rng: RandomSource,
}

impl GrowthContext {
    pub fn new(width: u16, height: u16, seed: u64) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            counters: Counters::default(),
            rng: RandomSource::new(seed),
        }
    }
}

/// A child branch about to start growing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchSpawn {
    pub x: i32,
    pub y: i32,
    pub parent: BranchType,
    /// Parent life at the moment of spawning
    pub parent_life: i32,
    pub branch_type: BranchType,
    pub life: i32,
}

/// One completed growth step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthStep {
    pub x: i32,
    pub y: i32,
    pub life: i32,
    pub branch_type: BranchType,
    /// The type the step was drawn as
    pub drawn: BranchType,
    pub dx: i32,
    pub dy: i32,
    /// The step left the growing area and ended its branch
    pub terminated: bool,
}

/// Hook into growth, used for animation and inspection
pub trait GrowthObserver {
    fn on_branch(&mut self, _spawn: &BranchSpawn) {}

    /// Called after every step; `Break` cancels the generation
    fn on_step(&mut self, _step: &GrowthStep, _canvas: &Canvas) -> Result<ControlFlow<()>> {
        Ok(ControlFlow::Continue(()))
    }
}

/// Observer that watches nothing
pub struct Unobserved;

impl GrowthObserver for Unobserved {}

/// A branch segment being grown
struct BranchTask {
    x: i32,
    y: i32,
    branch_type: BranchType,
    life: i32,
    shoot_cooldown: i32,
    /// Direction drawn for a step still waiting on its child
    pending: Option<(i32, i32)>,
}

/// Grows trees for one validated configuration
pub struct Grower {
    life_start: i32,
    multiplier: i32,
    leaves: Vec<String>,
    depth_limit: usize,
}

impl Grower {
    pub fn new(config: &TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            life_start: growth_int("life", config.life_start)?,
            multiplier: growth_int("multiplier", config.multiplier)?,
            leaves: config.normalized_leaves(),
            depth_limit: config.depth_limit(),
        })
    }

    /// Override the work-list depth bound
    pub fn with_depth_limit(mut self, limit: usize) -> Self {
        self.depth_limit = limit;
        self
    }

    /// Grow one tree from the bottom centre of the canvas.
    ///
    /// Returns `false` when the observer cancelled growth.
    pub fn grow(&self, ctx: &mut GrowthContext, observer: &mut dyn GrowthObserver) -> Result<bool> {
        let (width, height) = ctx.canvas.size();
        let mut stack: Vec<BranchTask> = Vec::with_capacity(64);

        ctx.counters.branches += 1;
        stack.push(self.task(width as i32 / 2, height as i32 - 1, BranchType::Trunk, self.life_start));

        loop {
            let Some(task) = stack.last_mut() else {
                break;
            };

            if let Some((dx, dy)) = task.pending.take() {
                let step = self.finish_step(task, dx, dy, ctx);
                if observer.on_step(&step, &ctx.canvas)?.is_break() {
                    return Ok(false);
                }
                continue;
            }

            if task.life <= 0 {
                stack.pop();
                continue;
            }

            task.life -= 1;
            let age = self.life_start - task.life;
            let deltas = task.branch_type.deltas(&mut ctx.rng, task.life, age, self.multiplier);
            let spawn = self.spawn(task, ctx);
            task.pending = Some(deltas);

            if let Some(spawn) = spawn {
                if stack.len() >= self.depth_limit {
                    return Err(TreeError::GrowthLimitExceeded {
                        depth: stack.len() + 1,
                        limit: self.depth_limit,
                    });
                }
                ctx.counters.branches += 1;
                observer.on_branch(&spawn);
                stack.push(self.task(spawn.x, spawn.y, spawn.branch_type, spawn.life));
            }
        }

        Ok(true)
    }

    fn task(&self, x: i32, y: i32, branch_type: BranchType, life: i32) -> BranchTask {
        BranchTask {
            x,
            y,
            branch_type,
            life,
            shoot_cooldown: self.multiplier,
            pending: None,
        }
    }

    /// Decide whether this step forks off a child branch
    fn spawn(&self, task: &mut BranchTask, ctx: &mut GrowthContext) -> Option<BranchSpawn> {
        let m = self.multiplier;
        let child = |branch_type, life| BranchSpawn {
            x: task.x,
            y: task.y,
            parent: task.branch_type,
            parent_life: task.life,
            branch_type,
            life,
        };

        // Near-dead branches burst into leaves
        if task.life < 3 {
            return Some(child(BranchType::Dead, task.life));
        }

        // Dying wood bursts into foliage
        if task.branch_type.is_wood() && task.life < m + 2 {
            return Some(child(BranchType::Dying, task.life));
        }

        if task.branch_type == BranchType::Trunk && (ctx.rng.below(3) == 0 || task.life % m == 0) {
            if ctx.rng.below(8) == 0 && task.life > 7 {
                let life = task.life + ctx.rng.between(-2, 2);
                let spawn = child(BranchType::Trunk, life);
                task.shoot_cooldown = m * 2;
                return Some(spawn);
            } else if task.shoot_cooldown <= 0 {
                ctx.counters.shoots += 1;
                ctx.counters.shoot_parity += 1;
                let spawn = child(BranchType::shoot_for(ctx.counters.shoot_parity), task.life + m);
                task.shoot_cooldown = m * 2;
                return Some(spawn);
            }
        }

        None
    }

    /// Move, draw, and stop the branch if it left the growing area
    fn finish_step(&self, task: &mut BranchTask, dx: i32, dy: i32, ctx: &mut GrowthContext) -> GrowthStep {
        task.shoot_cooldown -= 1;
        task.x += dx;
        task.y += dy;

        let drawn = task.branch_type.drawn_as(task.life);
        match drawn.glyph(dx, dy) {
            Glyph::Wood(glyph) => ctx.canvas.stamp(task.x, task.y, glyph, drawn),
            Glyph::Leaf => {
                if let Some(leaf) = ctx.rng.choose(&self.leaves) {
                    ctx.canvas.stamp(task.x, task.y, leaf, drawn);
                }
            }
        }

        let step = GrowthStep {
            x: task.x,
            y: task.y,
            life: task.life,
            branch_type: task.branch_type,
            drawn,
            dx,
            dy,
            terminated: !in_growing_area(&ctx.canvas, task.x, task.y),
        };
        if step.terminated {
            task.life = 0;
        }
        step
    }
}

/// Branches stop once they reach the outer ring of the canvas
fn in_growing_area(canvas: &Canvas, x: i32, y: i32) -> bool {
    let (width, height) = canvas.size();
    y >= 1 && y < height as i32 && x >= 1 && x <= width as i32 - 2
}

fn growth_int(name: &str, value: u32) -> Result<i32> {
    i32::try_from(value).map_err(|_| TreeError::Config(format!("{name} {value} is out of range")))
}

/// Result of one generation
#[derive(Clone, Debug)]
pub struct Generation {
    pub seed: u64,
    pub canvas: Canvas,
    pub counters: Counters,
    /// False when growth was cancelled part way
    pub completed: bool,
}

/// Grow one tree for the configuration
pub fn generate(config: &TreeConfig) -> Result<Generation> {
    generate_with(config, &mut Unobserved)
}

/// Grow one tree, reporting every step to the observer
pub fn generate_with(config: &TreeConfig, observer: &mut dyn GrowthObserver) -> Result<Generation> {
    let grower = Grower::new(config)?;
    generate_seeded(&grower, config, config.resolved_seed(), observer)
}

/// Grow one tree with an explicit seed and a fresh canvas
pub fn generate_seeded(
    grower: &Grower,
    config: &TreeConfig,
    seed: u64,
    observer: &mut dyn GrowthObserver,
) -> Result<Generation> {
    debug!(
        seed,
        life = config.life_start,
        multiplier = config.multiplier,
        width = config.width,
        height = config.height,
        "growing tree"
    );

    let mut ctx = GrowthContext::new(config.width, config.height, seed);
    let completed = grower.grow(&mut ctx, observer)?;

    debug!(
        branches = ctx.counters.branches,
        shoots = ctx.counters.shoots,
        cells = ctx.canvas.populated_count(),
        completed,
        "tree grown"
    );

    Ok(Generation {
        seed,
        canvas: ctx.canvas,
        counters: ctx.counters,
        completed,
    })
}
