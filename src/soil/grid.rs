//! The soil grid: a dense 2D store of per-cell marker sets, plus the
//! neighbor-aware tile-variant selection used for rendering tilled soil.
//!
//! Pure state + logic; no entities are touched here. Systems in
//! `events_handler`/`render` react to mutations.

use bevy::prelude::*;

use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Tile variants
// ─────────────────────────────────────────────────────────────────────────────

/// Visual variant of a tilled soil tile, chosen from the `TILLED` state of
/// its eight neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoilVariant {
    Open,
    AllSides,
    LeftCap,
    RightCap,
    Horizontal,
    TopCap,
    BottomCap,
    Vertical,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Tbr,
    Tbl,
    Lrt,
    Lrb,
    TopMiddle,
    BottomMiddle,
    RightMiddle,
    LeftMiddle,
}

impl SoilVariant {
    /// Index into the soil tile atlas (one column per variant).
    pub fn atlas_index(self) -> usize {
        match self {
            SoilVariant::Open => 0,
            SoilVariant::AllSides => 1,
            SoilVariant::LeftCap => 2,
            SoilVariant::RightCap => 3,
            SoilVariant::Horizontal => 4,
            SoilVariant::TopCap => 5,
            SoilVariant::BottomCap => 6,
            SoilVariant::Vertical => 7,
            SoilVariant::TopLeft => 8,
            SoilVariant::TopRight => 9,
            SoilVariant::BottomLeft => 10,
            SoilVariant::BottomRight => 11,
            SoilVariant::Tbr => 12,
            SoilVariant::Tbl => 13,
            SoilVariant::Lrt => 14,
            SoilVariant::Lrb => 15,
            SoilVariant::TopMiddle => 16,
            SoilVariant::BottomMiddle => 17,
            SoilVariant::RightMiddle => 18,
            SoilVariant::LeftMiddle => 19,
        }
    }
}

/// `TILLED` state of the eight cells around one cell. `t` is the row above
/// in world space, `b` the row below. Out-of-grid neighbors are false.
#[derive(Debug, Clone, Copy, Default)]
pub struct Adjacency {
    pub t: bool,
    pub b: bool,
    pub l: bool,
    pub r: bool,
    pub tl: bool,
    pub tr: bool,
    pub bl: bool,
    pub br: bool,
}

/// Select the tile variant for an adjacency pattern.
///
/// This is a precedence chain of sequential overrides: every matching rule
/// overwrites the previous result, so the last matching rule in this fixed
/// order always wins. Some rules are redundant with earlier ones; the order
/// is load-bearing and must not be "simplified" into early returns.
pub fn variant_from_adjacency(adj: Adjacency) -> SoilVariant {
    let Adjacency { t, b, l, r, tl, tr, bl, br } = adj;

    let mut variant = SoilVariant::Open;

    // all sides
    if t && b && r && l {
        variant = SoilVariant::AllSides;
    }

    // horizontal neighbors only
    if l && !t && !b && !r {
        variant = SoilVariant::RightCap;
    }
    if r && !t && !b && !l {
        variant = SoilVariant::LeftCap;
    }
    if r && l && !t && !b {
        variant = SoilVariant::Horizontal;
    }

    // vertical neighbors only
    if t && !r && !l && !b {
        variant = SoilVariant::BottomCap;
    }
    if b && !r && !l && !t {
        variant = SoilVariant::TopCap;
    }
    if b && t && !r && !l {
        variant = SoilVariant::Vertical;
    }

    // corners
    if r && b && !l && !t {
        variant = SoilVariant::TopLeft;
    }
    if l && b && !r && !t {
        variant = SoilVariant::TopRight;
    }
    if r && t && !l && !b {
        variant = SoilVariant::BottomLeft;
    }
    if l && t && !r && !b {
        variant = SoilVariant::BottomRight;
    }

    // T shapes
    if t && b && r && !l {
        variant = SoilVariant::Tbr;
    }
    if t && b && l && !r {
        variant = SoilVariant::Tbl;
    }
    if r && l && b && !t {
        variant = SoilVariant::Lrt;
    }
    if r && l && t && !b {
        variant = SoilVariant::Lrb;
    }

    // middle overrides, three passes over diagonal combinations; later
    // (looser) passes overwrite earlier ones
    if l && r && b && bl && br && !t {
        variant = SoilVariant::TopMiddle;
    }
    if l && r && t && tl && tr && !b {
        variant = SoilVariant::BottomMiddle;
    }
    if t && b && l && tl && bl && !r {
        variant = SoilVariant::RightMiddle;
    }
    if t && b && r && tr && br && !l {
        variant = SoilVariant::LeftMiddle;
    }

    if l && r && b && bl && !t {
        variant = SoilVariant::TopMiddle;
    }
    if l && r && t && tl && !b {
        variant = SoilVariant::BottomMiddle;
    }
    if t && b && l && tl && !r {
        variant = SoilVariant::RightMiddle;
    }
    if t && b && r && tr && !l {
        variant = SoilVariant::LeftMiddle;
    }

    if l && r && b && br && !t {
        variant = SoilVariant::TopMiddle;
    }
    if l && r && t && tr && !b {
        variant = SoilVariant::BottomMiddle;
    }
    if t && b && l && bl && !r {
        variant = SoilVariant::RightMiddle;
    }
    if t && b && r && br && !l {
        variant = SoilVariant::LeftMiddle;
    }

    variant
}

// ─────────────────────────────────────────────────────────────────────────────
// SoilGrid
// ─────────────────────────────────────────────────────────────────────────────

/// Dense row-major grid of `CellFlags`, built once at level load from the
/// farm map's farmable tiles.
///
/// Point-based operations resolve a world-space point to a cell; a point
/// outside the grid or a cell failing its precondition is a silent no-op.
#[derive(Resource, Debug, Clone)]
pub struct SoilGrid {
    width: usize,
    height: usize,
    cells: Vec<CellFlags>,
}

impl SoilGrid {
    pub fn new(
        width: usize,
        height: usize,
        farmable: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut grid = Self {
            width,
            height,
            cells: vec![CellFlags::empty(); width * height],
        };
        for (col, row) in farmable {
            if col < width && row < height {
                grid.cells[row * width + col].insert(CellFlags::FARMABLE);
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn flags(&self, col: usize, row: usize) -> CellFlags {
        self.cells[row * self.width + col]
    }

    fn flags_mut(&mut self, col: usize, row: usize) -> &mut CellFlags {
        &mut self.cells[row * self.width + col]
    }

    pub fn cell_at(&self, point: Vec2) -> Option<(usize, usize)> {
        point_to_cell(point, self.width, self.height)
    }

    fn tilled(&self, col: isize, row: isize) -> bool {
        // Clamp-to-false at the boundary: an out-of-range neighbor is never
        // tilled. Wrap-around would couple opposite map edges.
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return false;
        }
        self.flags(col as usize, row as usize).contains(CellFlags::TILLED)
    }

    /// Till the cell under `point`. Returns true if the cell changed.
    /// Whole-grid sprite regeneration (and rain auto-watering) is the
    /// caller's job.
    pub fn till(&mut self, point: Vec2) -> bool {
        let Some((col, row)) = self.cell_at(point) else {
            return false;
        };
        let cell = self.flags(col, row);
        if !cell.contains(CellFlags::FARMABLE) || cell.contains(CellFlags::TILLED) {
            return false;
        }
        self.flags_mut(col, row).insert(CellFlags::TILLED);
        true
    }

    /// Water the cell under `point`. Returns the cell for the caller to
    /// place a single water overlay, or None if nothing changed.
    pub fn water(&mut self, point: Vec2) -> Option<(usize, usize)> {
        let (col, row) = self.cell_at(point)?;
        let cell = self.flags(col, row);
        if !cell.contains(CellFlags::TILLED) || cell.contains(CellFlags::WATERED) {
            return None;
        }
        self.flags_mut(col, row).insert(CellFlags::WATERED);
        Some((col, row))
    }

    /// Water every tilled, un-watered cell. Returns the newly watered cells
    /// so the caller can emit overlays.
    pub fn water_all(&mut self) -> Vec<(usize, usize)> {
        let mut newly_watered = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = self.flags(col, row);
                if cell.contains(CellFlags::TILLED) && !cell.contains(CellFlags::WATERED) {
                    self.flags_mut(col, row).insert(CellFlags::WATERED);
                    newly_watered.push((col, row));
                }
            }
        }
        newly_watered
    }

    /// Clear `WATERED` from every cell. Called at day end.
    pub fn remove_water(&mut self) {
        for cell in &mut self.cells {
            cell.remove(CellFlags::WATERED);
        }
    }

    /// Mark the cell under `point` as planted. Returns the cell so the
    /// caller can spawn the plant entity bound to it.
    pub fn plant(&mut self, point: Vec2) -> Option<(usize, usize)> {
        let (col, row) = self.cell_at(point)?;
        let cell = self.flags(col, row);
        if !cell.contains(CellFlags::TILLED) || cell.contains(CellFlags::PLANTED) {
            return None;
        }
        self.flags_mut(col, row).insert(CellFlags::PLANTED);
        Some((col, row))
    }

    /// The one query plants make.
    pub fn is_watered(&self, cell: (usize, usize)) -> bool {
        self.flags(cell.0, cell.1).contains(CellFlags::WATERED)
    }

    /// All tilled cells with their render variants, row-major.
    pub fn tilled_variants(&self) -> Vec<((usize, usize), SoilVariant)> {
        let mut variants = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                if self.flags(col, row).contains(CellFlags::TILLED) {
                    variants.push(((col, row), self.variant_for(col, row)));
                }
            }
        }
        variants
    }

    /// Tile variant for one cell from its current neighborhood.
    pub fn variant_for(&self, col: usize, row: usize) -> SoilVariant {
        let c = col as isize;
        let r = row as isize;
        variant_from_adjacency(Adjacency {
            t: self.tilled(c, r + 1),
            b: self.tilled(c, r - 1),
            l: self.tilled(c - 1, r),
            r: self.tilled(c + 1, r),
            tl: self.tilled(c - 1, r + 1),
            tr: self.tilled(c + 1, r + 1),
            bl: self.tilled(c - 1, r - 1),
            br: self.tilled(c + 1, r - 1),
        })
    }

    /// Count of cells carrying a given marker. Test and HUD helper.
    pub fn count(&self, marker: CellFlags) -> usize {
        self.cells.iter().filter(|c| c.contains(marker)).count()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
