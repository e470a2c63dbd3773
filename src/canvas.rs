use crate::branch::BranchType;

/// A single drawn cell; color comes from the branch type at render time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyledCell {
    pub branch_type: BranchType,
    pub glyph: char,
}

/// Bounded grid of drawn cells; anything outside the bounds is dropped
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Vec<Option<StyledCell>>>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![None; width as usize]; height as usize],
        }
    }

    /// Get canvas dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    pub fn get(&self, x: i32, y: i32) -> Option<StyledCell> {
        if !self.contains(x, y) {
            return None;
        }
        self.cells[y as usize][x as usize]
    }

    /// Set a cell; returns false when the position is out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: StyledCell) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        self.cells[y as usize][x as usize] = Some(cell);
        true
    }

    /// Stamp a glyph string starting at position, one cell per char
    pub fn stamp(&mut self, x: i32, y: i32, glyph: &str, branch_type: BranchType) {
        for (i, ch) in glyph.chars().enumerate() {
            self.set(x + i as i32, y, StyledCell { branch_type, glyph: ch });
        }
    }

    pub fn rows(&self) -> &[Vec<Option<StyledCell>>] {
        &self.cells
    }

    /// Populated cells with their coordinates, row by row
    pub fn populated(&self) -> impl Iterator<Item = (i32, i32, StyledCell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, cell)| cell.map(|c| (x as i32, y as i32, c)))
        })
    }

    pub fn populated_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.populated_count() == 0
    }
}
