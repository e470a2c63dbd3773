//! Seed-deterministic procedural trees for the terminal and the web.
//!
//! A [`TreeConfig`] seeds a [`Grower`], which walks a trunk upward, forks
//! shoots and bursts into foliage on a bounded [`Canvas`]. The canvas is then
//! spelled out by a [`CellFormatter`]: plain text, terminal escapes or markup.

pub mod animate;
pub mod branch;
pub mod canvas;
pub mod config;
pub mod error;
pub mod grower;
pub mod random;
pub mod render;
pub mod runner;
pub mod settings;
pub mod stage;
pub mod terminal;

pub use branch::BranchType;
pub use canvas::{Canvas, StyledCell};
pub use config::{ReseedPolicy, TreeConfig};
pub use error::{Result, TreeError};
pub use grower::{generate, generate_with, Counters, Generation, GrowthObserver, Grower};
pub use render::{format_rows, rows, CellFormatter, StyledRow};
pub use stage::{render_for_stage, StagePolicy};
