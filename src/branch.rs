//! Branch roles and the per-role tables that drive growth and drawing.
//!
//! Everything that differs between trunk, shoots and foliage lives here as
//! data keyed by [`BranchType`]: where a step may move, which glyph it
//! leaves behind and how that glyph is colored.

use crate::random::{RandomSource, Weights};
use crossterm::style::Color;

/// Below this life every branch draws as foliage
pub const DEGENERATE_LIFE: i32 = 4;

/// Branch types for a growing tree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BranchType {
    Trunk,
    ShootLeft,
    ShootRight,
    Dying,
    Dead,
}

/// Growth phase of a trunk, by age and remaining life
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrunkPhase {
    /// First steps and last gasps: spread sideways only
    Sapling,
    /// Rises on a fixed cadence with a wide sway
    Spreading,
    /// Mostly rises, narrow sway
    Mature,
}

impl TrunkPhase {
    pub fn of(life: i32, age: i32, multiplier: i32) -> Self {
        if age <= 2 || life < DEGENERATE_LIFE {
            TrunkPhase::Sapling
        } else if age < multiplier * 3 {
            TrunkPhase::Spreading
        } else {
            TrunkPhase::Mature
        }
    }
}

/// How the vertical component of a step is decided
#[derive(Clone, Copy, Debug)]
pub enum Rise {
    Level,
    /// Rise one row every `max(multiplier / 2, 1)` steps of age
    Cadence,
    Table(Weights),
}

/// Direction distribution for one step
#[derive(Clone, Copy, Debug)]
pub struct Motion {
    pub dy: Rise,
    pub dx: Weights,
}

const SWAY: Weights = &[(-1, 1), (0, 1), (1, 1)];
const TRUNK_SPREAD: Weights = &[(-2, 1), (-1, 3), (0, 2), (1, 3), (2, 1)];
const TRUNK_RISE: Weights = &[(-1, 7), (0, 3)];
const SHOOT_DRIFT: Weights = &[(-1, 1), (0, 6), (1, 3)];
const SHOOT_LEFT_DX: Weights = &[(-2, 2), (-1, 4), (0, 3), (1, 1)];
const SHOOT_RIGHT_DX: Weights = &[(2, 2), (1, 4), (0, 3), (-1, 1)];
const DYING_DRIFT: Weights = &[(-1, 2), (0, 7), (1, 1)];
const DYING_DX: Weights = &[(-3, 1), (-2, 2), (-1, 3), (0, 3), (1, 3), (2, 2), (3, 1)];
const DEAD_DRIFT: Weights = &[(-1, 2), (0, 4), (1, 4)];

/// Wood glyphs picked by the direction of the step that drew them
#[derive(Clone, Copy, Debug)]
struct GlyphSet {
    falling: Option<&'static str>,
    level: &'static str,
    left: &'static str,
    rising: &'static str,
    right: &'static str,
}

const TRUNK_GLYPHS: GlyphSet = GlyphSet {
    falling: None,
    level: "/~",
    left: "\\|",
    rising: "/|\\",
    right: "|/",
};

const SHOOT_LEFT_GLYPHS: GlyphSet = GlyphSet {
    falling: Some("\\"),
    level: "\\_",
    left: "\\|",
    rising: "/|",
    right: "/",
};

const SHOOT_RIGHT_GLYPHS: GlyphSet = GlyphSet {
    falling: Some("/"),
    level: "_/",
    left: "\\|",
    rising: "/|",
    right: "/",
};

impl GlyphSet {
    fn pick(&self, dx: i32, dy: i32) -> &'static str {
        match self.falling {
            Some(glyph) if dy > 0 => glyph,
            _ if dy == 0 => self.level,
            _ if dx < 0 => self.left,
            _ if dx == 0 => self.rising,
            _ => self.right,
        }
    }
}

/// What a step leaves on the canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Wood(&'static str),
    /// One of the configured leaves, drawn at random
    Leaf,
}

/// Presentation of a branch type, shared by every output encoding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style {
    pub color: Color,
    pub bold: bool,
    /// Markup class name
    pub class: &'static str,
    /// Markup color
    pub hex: &'static str,
}

/// Predefined colors for trees (using standard terminal colors)
pub mod colors {
    use crossterm::style::Color;

    // Wood colors - use yellow/dark yellow for brown-like appearance
    pub const WOOD_DARK: Color = Color::DarkYellow;
    pub const WOOD_LIGHT: Color = Color::Yellow;

    pub const LEAF: Color = Color::Green;
    pub const DEAD: Color = Color::Grey;
}

impl BranchType {
    pub const ALL: [BranchType; 5] = [
        BranchType::Trunk,
        BranchType::ShootLeft,
        BranchType::ShootRight,
        BranchType::Dying,
        BranchType::Dead,
    ];

    /// Trunk or shoot
    pub fn is_wood(self) -> bool {
        matches!(self, BranchType::Trunk | BranchType::ShootLeft | BranchType::ShootRight)
    }

    pub fn is_shoot(self) -> bool {
        matches!(self, BranchType::ShootLeft | BranchType::ShootRight)
    }

    /// The shoot type for the n-th shoot of a generation (1-based)
    pub fn shoot_for(parity: u32) -> BranchType {
        if parity % 2 == 1 {
            BranchType::ShootLeft
        } else {
            BranchType::ShootRight
        }
    }

    /// The type a step is drawn as; low life always draws as foliage
    pub fn drawn_as(self, life: i32) -> BranchType {
        if life < DEGENERATE_LIFE && self != BranchType::Dead {
            BranchType::Dying
        } else {
            self
        }
    }

    pub fn motion(self, life: i32, age: i32, multiplier: i32) -> Motion {
        match self {
            BranchType::Trunk => match TrunkPhase::of(life, age, multiplier) {
                TrunkPhase::Sapling => Motion { dy: Rise::Level, dx: SWAY },
                TrunkPhase::Spreading => Motion { dy: Rise::Cadence, dx: TRUNK_SPREAD },
                TrunkPhase::Mature => Motion { dy: Rise::Table(TRUNK_RISE), dx: SWAY },
            },
            BranchType::ShootLeft => Motion { dy: Rise::Table(SHOOT_DRIFT), dx: SHOOT_LEFT_DX },
            BranchType::ShootRight => Motion { dy: Rise::Table(SHOOT_DRIFT), dx: SHOOT_RIGHT_DX },
            BranchType::Dying => Motion { dy: Rise::Table(DYING_DRIFT), dx: DYING_DX },
            BranchType::Dead => Motion { dy: Rise::Table(DEAD_DRIFT), dx: SWAY },
        }
    }

    /// Draw a step direction; the vertical component is drawn first
    pub fn deltas(self, rng: &mut RandomSource, life: i32, age: i32, multiplier: i32) -> (i32, i32) {
        let motion = self.motion(life, age, multiplier);
        let dy = match motion.dy {
            Rise::Level => 0,
            Rise::Cadence => {
                if age % (multiplier / 2).max(1) == 0 {
                    -1
                } else {
                    0
                }
            }
            Rise::Table(table) => rng.weighted(table),
        };
        let dx = rng.weighted(motion.dx);
        (dx, dy)
    }

    pub fn glyph(self, dx: i32, dy: i32) -> Glyph {
        match self {
            BranchType::Trunk => Glyph::Wood(TRUNK_GLYPHS.pick(dx, dy)),
            BranchType::ShootLeft => Glyph::Wood(SHOOT_LEFT_GLYPHS.pick(dx, dy)),
            BranchType::ShootRight => Glyph::Wood(SHOOT_RIGHT_GLYPHS.pick(dx, dy)),
            BranchType::Dying | BranchType::Dead => Glyph::Leaf,
        }
    }

    pub fn style(self) -> Style {
        match self {
            BranchType::Trunk => Style {
                color: colors::WOOD_LIGHT,
                bold: true,
                class: "tree-trunk",
                hex: "#ccaa44",
            },
            BranchType::ShootLeft | BranchType::ShootRight => Style {
                color: colors::WOOD_DARK,
                bold: false,
                class: "tree-branch",
                hex: "#ccaa44",
            },
            BranchType::Dying => Style {
                color: colors::LEAF,
                bold: true,
                class: "tree-leaves",
                hex: "#44cc44",
            },
            BranchType::Dead => Style {
                color: colors::DEAD,
                bold: false,
                class: "tree-dead",
                hex: "#aaaaaa",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: BranchType, life: i32, age: i32, n: usize) -> Vec<(i32, i32)> {
        let mut rng = RandomSource::new(11);
        (0..n).map(|_| kind.deltas(&mut rng, life, age, 5)).collect()
    }

    #[test]
    fn low_life_draws_as_foliage() {
        for kind in BranchType::ALL {
            let drawn = kind.drawn_as(3);
            assert!(matches!(drawn, BranchType::Dying | BranchType::Dead), "{kind:?} drew as {drawn:?}");
            assert_eq!(kind.drawn_as(0).glyph(1, -1), Glyph::Leaf);
        }
        assert_eq!(BranchType::Dead.drawn_as(1), BranchType::Dead);
        assert_eq!(BranchType::Trunk.drawn_as(4), BranchType::Trunk);
        assert_eq!(BranchType::ShootLeft.drawn_as(10), BranchType::ShootLeft);
    }

    #[test]
    fn shoots_alternate_left_first() {
        let kinds: Vec<BranchType> = (1..=4).map(BranchType::shoot_for).collect();
        assert_eq!(
            kinds,
            vec![
                BranchType::ShootLeft,
                BranchType::ShootRight,
                BranchType::ShootLeft,
                BranchType::ShootRight
            ]
        );
    }

    #[test]
    fn trunk_phases_follow_age_and_life() {
        assert_eq!(TrunkPhase::of(30, 2, 5), TrunkPhase::Sapling);
        assert_eq!(TrunkPhase::of(3, 20, 5), TrunkPhase::Sapling);
        assert_eq!(TrunkPhase::of(20, 10, 5), TrunkPhase::Spreading);
        assert_eq!(TrunkPhase::of(10, 15, 5), TrunkPhase::Mature);
    }

    #[test]
    fn sapling_trunk_never_rises() {
        for (dx, dy) in sample(BranchType::Trunk, 30, 1, 200) {
            assert_eq!(dy, 0);
            assert!((-1..=1).contains(&dx));
        }
    }

    #[test]
    fn spreading_trunk_rises_on_cadence() {
        // multiplier 5 rises every 2 steps of age
        let mut rng = RandomSource::new(5);
        assert_eq!(BranchType::Trunk.deltas(&mut rng, 20, 6, 5).1, -1);
        assert_eq!(BranchType::Trunk.deltas(&mut rng, 20, 7, 5).1, 0);
        // multiplier 3 rises every step
        assert_eq!(BranchType::Trunk.deltas(&mut rng, 20, 5, 3).1, -1);
    }

    #[test]
    fn mature_trunk_mostly_rises() {
        let steps = sample(BranchType::Trunk, 10, 20, 1000);
        let rises = steps.iter().filter(|(_, dy)| *dy == -1).count();
        assert!(steps.iter().all(|(dx, dy)| (-1..=1).contains(dx) && (-1..=0).contains(dy)));
        assert!((600..800).contains(&rises), "rises: {rises}");
    }

    #[test]
    fn shoots_lean_toward_their_side() {
        let left = sample(BranchType::ShootLeft, 10, 5, 1000);
        let right = sample(BranchType::ShootRight, 10, 5, 1000);
        let leftward = left.iter().filter(|(dx, _)| *dx < 0).count();
        let rightward = right.iter().filter(|(dx, _)| *dx > 0).count();
        assert!(leftward > 500, "leftward: {leftward}");
        assert!(rightward > 500, "rightward: {rightward}");
        assert!(left.iter().all(|(dx, dy)| (-2..=1).contains(dx) && (-1..=1).contains(dy)));
        assert!(right.iter().all(|(dx, dy)| (-1..=2).contains(dx) && (-1..=1).contains(dy)));
    }

    #[test]
    fn foliage_spreads_within_bounds() {
        for (dx, dy) in sample(BranchType::Dying, 5, 5, 500) {
            assert!((-3..=3).contains(&dx) && (-1..=1).contains(&dy));
        }
        let dead = sample(BranchType::Dead, 2, 5, 1000);
        assert!(dead.iter().all(|(dx, dy)| (-1..=1).contains(dx) && (-1..=1).contains(dy)));
        let falls = dead.iter().filter(|(_, dy)| *dy > 0).count();
        let rises = dead.iter().filter(|(_, dy)| *dy < 0).count();
        assert!(falls > rises);
    }

    #[test]
    fn glyphs_follow_motion() {
        assert_eq!(BranchType::Trunk.glyph(1, 0), Glyph::Wood("/~"));
        assert_eq!(BranchType::Trunk.glyph(-1, -1), Glyph::Wood("\\|"));
        assert_eq!(BranchType::Trunk.glyph(0, -1), Glyph::Wood("/|\\"));
        assert_eq!(BranchType::Trunk.glyph(1, -1), Glyph::Wood("|/"));
        assert_eq!(BranchType::ShootLeft.glyph(-1, 1), Glyph::Wood("\\"));
        assert_eq!(BranchType::ShootLeft.glyph(-1, 0), Glyph::Wood("\\_"));
        assert_eq!(BranchType::ShootRight.glyph(1, 0), Glyph::Wood("_/"));
        assert_eq!(BranchType::ShootRight.glyph(0, -1), Glyph::Wood("/|"));
        assert_eq!(BranchType::Dying.glyph(0, 0), Glyph::Leaf);
    }

    #[test]
    fn wood_and_foliage_styles_differ() {
        assert_eq!(BranchType::ShootLeft.style(), BranchType::ShootRight.style());
        assert_ne!(BranchType::Trunk.style().class, BranchType::Dying.style().class);
        assert_ne!(BranchType::Dying.style().color, BranchType::Dead.style().color);
    }
}
