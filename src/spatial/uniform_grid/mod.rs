//! UniformGrid - flat cell lists for fluid neighbor queries
//!
//! Cells are sized to the smoothing radius and cover the bounds the caller
//! hands in (the fluid passes its particles' bounding box). Bounds that would
//! need more than `MAX_CELLS` cells are refused. The grid is rebuilt from
//! scratch every frame with a counting sort:
//!
//!   cell_start[c]..cell_start[c + 1]  ->  range inside `entries`
//!   entries[k]                        ->  particle index
//!
//! No per-cell allocations, two linear passes over the particles.

mod query;

use glam::Vec3;

/// Smallest accepted cell edge.
const MIN_CELL_SIZE: f32 = 1e-4;

/// Upper limit on cells per grid (128³).
pub const MAX_CELLS: usize = 1 << 21;

pub struct UniformGrid {
    cell_size: f32,
    inv_cell_size: f32,
    origin: Vec3,
    dims: [u32; 3],

    /// Prefix sums of per-cell counts, `cell_count + 1` long.
    cell_start: Vec<u32>,
    /// Particle indices grouped by cell.
    entries: Vec<u32>,
    /// Cell of each particle from the last rebuild.
    particle_cell: Vec<u32>,
    /// Scratch write cursors for the scatter pass.
    cursor: Vec<u32>,
}

impl UniformGrid {
    /// Grid covering `[lower, upper]` with cubic cells of `cell_size`.
    /// `None` when the bounds are not finite or need more than `MAX_CELLS` cells.
    pub fn new(cell_size: f32, lower: Vec3, upper: Vec3) -> Option<Self> {
        let mut grid = Self {
            cell_size: MIN_CELL_SIZE,
            inv_cell_size: 1.0 / MIN_CELL_SIZE,
            origin: lower,
            dims: [1, 1, 1],
            cell_start: Vec::new(),
            entries: Vec::new(),
            particle_cell: Vec::new(),
            cursor: Vec::new(),
        };
        if grid.reshape(cell_size, lower, upper) {
            Some(grid)
        } else {
            None
        }
    }

    /// Refit to `[lower, upper]`, keeping the buffers' allocations.
    ///
    /// Returns false and leaves the grid untouched when the bounds are not
    /// finite or need more than `MAX_CELLS` cells. Binned particles are
    /// stale until the next `rebuild`.
    pub fn reshape(&mut self, cell_size: f32, lower: Vec3, upper: Vec3) -> bool {
        if !lower.is_finite() || !upper.is_finite() {
            return false;
        }
        let cell_size = if cell_size.is_finite() { cell_size.max(MIN_CELL_SIZE) } else { MIN_CELL_SIZE };
        let extent = (upper - lower).max(Vec3::ZERO);

        let (Some(x), Some(y), Some(z)) = (
            axis_cells(extent.x, cell_size),
            axis_cells(extent.y, cell_size),
            axis_cells(extent.z, cell_size),
        ) else {
            return false;
        };
        let Some(cell_count) = x.checked_mul(y).and_then(|n| n.checked_mul(z)) else {
            return false;
        };
        if cell_count > MAX_CELLS {
            return false;
        }

        self.cell_size = cell_size;
        self.inv_cell_size = 1.0 / cell_size;
        self.origin = lower;
        // Each axis is at most MAX_CELLS here.
        self.dims = [x as u32, y as u32, z as u32];
        self.cell_start.clear();
        self.cell_start.resize(cell_count + 1, 0);
        self.cursor.clear();
        self.cursor.resize(cell_count, 0);
        self.particle_cell.clear();
        self.entries.clear();
        true
    }

    // === Dimensions ===
    #[inline]
    pub fn cell_size(&self) -> f32 { self.cell_size }

    #[inline]
    pub fn dims(&self) -> [u32; 3] { self.dims }

    #[inline]
    pub fn cell_count(&self) -> usize { self.cursor.len() }

    #[inline]
    pub fn particle_count(&self) -> usize { self.particle_cell.len() }

    /// Re-bin every particle. `positions` is walked once.
    pub fn rebuild(&mut self, positions: impl Iterator<Item = Vec3>) {
        let cell_count = self.cell_count();

        self.cell_start.iter_mut().for_each(|c| *c = 0);
        self.particle_cell.clear();

        // Count pass: cell_start[c + 1] holds the size of cell c
        for position in positions {
            let cell = self.cell_of(position);
            self.particle_cell.push(cell as u32);
            let slot = cell + 1;
            let count = *fast!(self.cell_start, [slot]);
            fast!(self.cell_start, [slot] = count + 1);
        }

        // Prefix sum: cell_start[c] becomes the first slot of cell c
        for c in 0..cell_count {
            let next = *fast!(self.cell_start, [c]) + *fast!(self.cell_start, [c + 1]);
            fast!(self.cell_start, [c + 1] = next);
        }

        // Scatter pass
        self.cursor.copy_from_slice(&self.cell_start[..cell_count]);
        self.entries.resize(self.particle_cell.len(), 0);
        for (particle, &cell) in self.particle_cell.iter().enumerate() {
            let cell = cell as usize;
            let slot = *fast!(self.cursor, [cell]) as usize;
            fast!(self.entries, [slot] = particle as u32);
            fast!(self.cursor, [cell] = slot as u32 + 1);
        }
    }

    /// Particle indices stored in cell `cell`; empty past the last cell.
    #[inline]
    pub fn cell_members(&self, cell: usize) -> &[u32] {
        if cell >= self.cell_count() {
            return &[];
        }
        let start = *fast!(self.cell_start, [cell]) as usize;
        let end = *fast!(self.cell_start, [cell + 1]) as usize;
        fast!(self.entries, [start..end])
    }
}

/// Cells along one axis, `None` past `MAX_CELLS`.
fn axis_cells(extent: f32, cell_size: f32) -> Option<usize> {
    let cells = (extent / cell_size).ceil();
    if !cells.is_finite() || cells >= MAX_CELLS as f32 {
        return None;
    }
    Some(cells as usize + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dims_cover_the_bounds() {
        let grid = UniformGrid::new(0.5, Vec3::ZERO, Vec3::new(1.0, 2.0, 0.2)).unwrap();
        assert_eq!(grid.dims(), [3, 5, 2]);
        assert_eq!(grid.cell_count(), 30);
    }

    #[test]
    fn rebuild_groups_particles_by_cell() {
        let mut grid = UniformGrid::new(1.0, Vec3::ZERO, Vec3::splat(2.0)).unwrap();
        let positions = [
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(1.5, 0.5, 0.5),
            Vec3::new(0.2, 0.1, 0.9),
        ];
        grid.rebuild(positions.iter().copied());

        assert_eq!(grid.particle_count(), 3);
        let first = grid.cell_of(positions[0]);
        assert_eq!(grid.cell_members(first), &[0, 2]);
        let second = grid.cell_of(positions[1]);
        assert_eq!(grid.cell_members(second), &[1]);

        let total: usize = (0..grid.cell_count()).map(|c| grid.cell_members(c).len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn rebuild_forgets_previous_frame() {
        let mut grid = UniformGrid::new(1.0, Vec3::ZERO, Vec3::splat(2.0)).unwrap();
        grid.rebuild([Vec3::splat(0.5), Vec3::splat(1.5)].into_iter());
        grid.rebuild([Vec3::splat(1.5)].into_iter());

        assert_eq!(grid.particle_count(), 1);
        assert!(grid.cell_members(grid.cell_of(Vec3::splat(0.5))).is_empty());
        assert_eq!(grid.cell_members(grid.cell_of(Vec3::splat(1.5))), &[0]);
    }

    #[test]
    fn out_of_bounds_positions_land_in_edge_cells() {
        let mut grid = UniformGrid::new(1.0, Vec3::ZERO, Vec3::splat(2.0)).unwrap();
        grid.rebuild([Vec3::splat(-5.0), Vec3::splat(50.0)].into_iter());
        assert_eq!(grid.cell_members(0), &[0]);
        assert_eq!(grid.cell_members(grid.cell_count() - 1), &[1]);
    }

    #[test]
    fn oversized_bounds_are_refused() {
        // 2001 cells per axis at h = 0.05.
        assert!(UniformGrid::new(0.05, Vec3::splat(-50.0), Vec3::splat(50.0)).is_none());
        assert!(UniformGrid::new(0.05, Vec3::ZERO, Vec3::new(f32::INFINITY, 1.0, 1.0)).is_none());
        assert!(UniformGrid::new(0.05, Vec3::splat(f32::NAN), Vec3::ONE).is_none());
        assert!(UniformGrid::new(1e-9, Vec3::ZERO, Vec3::splat(1e6)).is_none());
    }

    #[test]
    fn reshape_refits_and_keeps_the_old_fit_on_refusal() {
        let mut grid = UniformGrid::new(1.0, Vec3::ZERO, Vec3::splat(2.0)).unwrap();
        assert!(grid.reshape(0.5, Vec3::ZERO, Vec3::ONE));
        assert_eq!(grid.dims(), [3, 3, 3]);
        assert_eq!(grid.cell_count(), 27);

        assert!(!grid.reshape(0.05, Vec3::splat(-50.0), Vec3::splat(50.0)));
        assert_eq!(grid.cell_count(), 27);

        grid.rebuild([Vec3::splat(0.9)].into_iter());
        assert_eq!(grid.cell_members(grid.cell_of(Vec3::splat(0.9))), &[0]);
        assert!(grid.cell_members(usize::MAX).is_empty());
    }
}
