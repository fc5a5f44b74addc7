//! Pair discovery for connective lines.
//!
//! [`all_pairs`] is the plain O(n²) scan. [`LinkGrid`] buckets particles into
//! square cells at least one link distance wide, so only the 3x3 neighbourhood
//! of a cell needs checking. Both emit links ordered by `(a, b)` with `a < b`
//! and bit-identical distances, so switching strategy never changes a frame.

use crate::canvas::Viewport;
use glam::Vec2;

/// Upper bound on cells per axis, keeps tiny link distances from allocating
/// huge grids.
const MAX_CELLS_PER_AXIS: f32 = 256.0;

/// Two particles (by index) closer than the link distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
}

pub fn all_pairs(positions: &[Vec2], max_distance: f32, out: &mut Vec<Link>) {
    out.clear();
    for (a, pa) in positions.iter().enumerate() {
        for (b, pb) in positions.iter().enumerate().skip(a + 1) {
            let distance = pa.distance(*pb);
            if distance < max_distance {
                out.push(Link { a, b, distance });
            }
        }
    }
}

/// Reusable bucket grid; buffers survive between frames.
#[derive(Debug, Default)]
pub struct LinkGrid {
    cols: usize,
    rows: usize,
    cell_of: Vec<usize>,
    /// Prefix sums: particles of cell `c` are `entries[cell_start[c]..cell_start[c + 1]]`.
    cell_start: Vec<usize>,
    cursor: Vec<usize>,
    entries: Vec<usize>,
}

impl LinkGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills `out` with every pair closer than `max_distance`.
    ///
    /// Positions outside `bounds` (boundary overshoot) are clamped into the
    /// border cells. Clamping never moves two points more than one cell apart
    /// if they were not already, so no pair is missed.
    pub fn links(&mut self, positions: &[Vec2], bounds: Viewport, max_distance: f32, out: &mut Vec<Link>) {
        out.clear();
        if positions.is_empty() {
            return;
        }

        let extent = bounds.extent();
        let cell = max_distance
            .max(extent.x / MAX_CELLS_PER_AXIS)
            .max(extent.y / MAX_CELLS_PER_AXIS);
        let cols = ((extent.x / cell).ceil() as usize).max(1);
        let rows = ((extent.y / cell).ceil() as usize).max(1);
        self.cols = cols;
        self.rows = rows;

        self.cell_of.clear();
        self.cell_of
            .extend(positions.iter().map(|p| cell_index(*p, cell, cols, rows)));

        // counting sort of particle indices by cell
        let n_cells = cols * rows;
        self.cell_start.clear();
        self.cell_start.resize(n_cells + 1, 0);
        for &c in &self.cell_of {
            self.cell_start[c + 1] += 1;
        }
        for c in 0..n_cells {
            self.cell_start[c + 1] += self.cell_start[c];
        }
        self.cursor.clear();
        self.cursor.extend_from_slice(&self.cell_start[..n_cells]);
        self.entries.clear();
        self.entries.resize(positions.len(), 0);
        for (i, &c) in self.cell_of.iter().enumerate() {
            self.entries[self.cursor[c]] = i;
            self.cursor[c] += 1;
        }

        for (a, pa) in positions.iter().enumerate() {
            let c = self.cell_of[a];
            let (cx, cy) = (c % cols, c / cols);
            for ny in cy.saturating_sub(1)..=(cy + 1).min(rows - 1) {
                for nx in cx.saturating_sub(1)..=(cx + 1).min(cols - 1) {
                    let n = ny * cols + nx;
                    for &b in &self.entries[self.cell_start[n]..self.cell_start[n + 1]] {
                        if b <= a {
                            continue;
                        }
                        let distance = pa.distance(positions[b]);
                        if distance < max_distance {
                            out.push(Link { a, b, distance });
                        }
                    }
                }
            }
        }
        out.sort_unstable_by_key(|l| (l.a, l.b));
    }

    /// Grid dimensions used by the last call to [`LinkGrid::links`].
    #[cfg(test)]
    fn dims(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }
}

fn cell_index(p: Vec2, cell: f32, cols: usize, rows: usize) -> usize {
    // `as` saturates and maps NaN to 0
    let cx = ((p.x / cell).floor().max(0.0) as usize).min(cols - 1);
    let cy = ((p.y / cell).floor().max(0.0) as usize).min(rows - 1);
    cy * cols + cx
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    fn scatter(rng: &mut SmallRng, n: usize, w: f32, h: f32, margin: f32) -> Vec<Vec2> {
        (0..n)
            .map(|_| {
                Vec2::new(
                    rng.random_range(-margin..w + margin),
                    rng.random_range(-margin..h + margin),
                )
            })
            .collect()
    }

    #[test]
    fn grid_matches_all_pairs() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut grid = LinkGrid::new();
        let (mut brute, mut fast) = (Vec::new(), Vec::new());

        for &(w, h, n) in &[(1500u32, 1000u32, 100usize), (300, 200, 4), (2560, 1440, 245), (90, 50, 30)] {
            let positions = scatter(&mut rng, n, w as f32, h as f32, 8.0);
            all_pairs(&positions, 100.0, &mut brute);
            grid.links(&positions, Viewport::new(w, h), 100.0, &mut fast);
            assert_eq!(brute, fast, "{w}x{h} n={n}");
        }
    }

    #[test]
    fn far_outside_points_still_pair() {
        let positions = [Vec2::new(-400.0, -400.0), Vec2::new(-350.0, -400.0), Vec2::new(50.0, 50.0)];
        let mut out = Vec::new();
        LinkGrid::new().links(&positions, Viewport::new(500, 500), 100.0, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].a, out[0].b), (0, 1));
        assert_eq!(out[0].distance, 50.0);
    }

    #[test]
    fn boundary_distance_is_excluded() {
        let positions = [Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), Vec2::new(99.5, 0.0)];
        let mut out = Vec::new();
        all_pairs(&positions, 100.0, &mut out);
        let pairs: Vec<_> = out.iter().map(|l| (l.a, l.b)).collect();
        assert_eq!(pairs, vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn cell_count_is_capped() {
        let mut grid = LinkGrid::new();
        let mut out = Vec::new();
        grid.links(&[Vec2::ZERO], Viewport::new(5120, 100), 0.5, &mut out);
        let (cols, rows) = grid.dims();
        assert!(cols <= 256 && rows >= 1, "{cols}x{rows}");
    }

    #[test]
    fn empty_viewport_does_not_panic() {
        let mut out = Vec::new();
        LinkGrid::new().links(&[Vec2::ZERO, Vec2::ONE], Viewport::new(0, 0), 100.0, &mut out);
        assert_eq!(out.len(), 1);
    }
}
