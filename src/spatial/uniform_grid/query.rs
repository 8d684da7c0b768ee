use glam::Vec3;

use super::UniformGrid;

impl UniformGrid {
    // === Index conversion ===

    /// Cell coordinates of `position`, clamped onto the grid.
    #[inline]
    pub fn cell_coords(&self, position: Vec3) -> [u32; 3] {
        let local = (position - self.origin) * self.inv_cell_size;
        let mut coords = [0u32; 3];
        for axis in 0..3 {
            let max = (self.dims[axis] - 1) as f32;
            // NaN clamps to 0 through the `as` cast.
            coords[axis] = local[axis].floor().clamp(0.0, max) as u32;
        }
        coords
    }

    #[inline]
    pub fn cell_index(&self, coords: [u32; 3]) -> usize {
        let [x, y, z] = coords.map(|c| c as usize);
        let [dx, dy, _] = self.dims.map(|d| d as usize);
        x + dx * (y + dy * z)
    }

    #[inline]
    pub fn cell_of(&self, position: Vec3) -> usize {
        self.cell_index(self.cell_coords(position))
    }

    // === Neighbor queries ===

    /// Visit every particle binned within `radius` of `position`'s cell.
    ///
    /// This is a superset of the true neighbors; callers still test distance.
    pub fn for_each_candidate(&self, position: Vec3, radius: f32, mut visit: impl FnMut(usize)) {
        let reach = (radius * self.inv_cell_size).ceil().max(0.0) as i64;
        let center = self.cell_coords(position);

        let lo = |axis: usize| (center[axis] as i64 - reach).max(0) as u32;
        let hi = |axis: usize| (center[axis] as i64 + reach).min(self.dims[axis] as i64 - 1) as u32;

        for z in lo(2)..=hi(2) {
            for y in lo(1)..=hi(1) {
                for x in lo(0)..=hi(0) {
                    let cell = self.cell_index([x, y, z]);
                    for &particle in self.cell_members(cell) {
                        visit(particle as usize);
                    }
                }
            }
        }
    }
}
