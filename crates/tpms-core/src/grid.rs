//! Voxel sampling grid
//!
//! A [`Grid`] holds the voxel-center coordinates the field generators are
//! evaluated at. Sizes are normalized so the longest physical axis spans
//! `[-1, 1)` in grid coordinates; shorter axes get proportionally fewer
//! sample points, which keeps the voxel pitch identical on every axis.

use crate::{Error, Result};
use glam::Vec3;

/// Physical extent of the sampled volume, uniform or per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Size {
    /// Cube with the given edge length
    Uniform(f32),
    /// Independent edge lengths per axis
    PerAxis([f32; 3]),
}

impl Size {
    /// Edge lengths as a 3-array
    pub fn components(&self) -> [f32; 3] {
        match *self {
            Size::Uniform(s) => [s; 3],
            Size::PerAxis(s) => s,
        }
    }

    /// Longest edge length
    pub fn longest(&self) -> f32 {
        let [sx, sy, sz] = self.components();
        sx.max(sy).max(sz)
    }
}

/// Voxel-center sampling grid in normalized coordinates
///
/// Coordinates are half-open: each axis samples `dims[axis]` points at
/// `-ext + i * pitch`, so the longest axis covers `[-1, 1)` exactly.
/// Downstream plane and cylinder masks compare against these bounds, so
/// the convention is load-bearing.
#[derive(Debug, Clone)]
pub struct Grid {
    dims: [usize; 3],
    coords: [Vec<f32>; 3],
    extents: Vec3,
    size: [f32; 3],
    resolution: u32,
}

impl Grid {
    /// Sample a grid of `resolution` voxels along the longest axis of `size`.
    ///
    /// Fails with [`Error::Config`] when the resolution is zero or any size
    /// component is not strictly positive.
    pub fn sample(resolution: u32, size: Size) -> Result<Self> {
        if resolution == 0 {
            return Err(Error::Config("resolution must be positive".into()));
        }
        let components = size.components();
        if !components.iter().all(|&s| s > 0.0 && s.is_finite()) {
            return Err(Error::Config(format!(
                "size components must be positive, got {components:?}"
            )));
        }

        let longest = size.longest();
        let pitch = 2.0 / resolution as f32;

        let mut dims = [0usize; 3];
        let mut extents = [0.0f32; 3];
        let mut coords: [Vec<f32>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for axis in 0..3 {
            let ext = components[axis] / longest;
            let n = ((resolution as f32 * ext).round() as usize).max(1);
            coords[axis] = (0..n).map(|i| -ext + i as f32 * pitch).collect();
            dims[axis] = n;
            extents[axis] = ext;
        }

        Ok(Self {
            dims,
            coords,
            extents: Vec3::from_array(extents),
            size: components,
            resolution,
        })
    }

    /// Number of sample points per axis
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Total number of sample points
    pub fn len(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coordinate vector along one axis (0 = x, 1 = y, 2 = z)
    pub fn axis(&self, axis: usize) -> &[f32] {
        &self.coords[axis]
    }

    /// Grid coordinate of the voxel at index `(i, j, k)`
    pub fn at(&self, i: usize, j: usize, k: usize) -> Vec3 {
        Vec3::new(self.coords[0][i], self.coords[1][j], self.coords[2][k])
    }

    /// Normalized half-extents per axis (longest axis = 1)
    pub fn extents(&self) -> Vec3 {
        self.extents
    }

    /// Negative corner of the grid in normalized coordinates
    pub fn min(&self) -> Vec3 {
        -self.extents
    }

    /// Voxel pitch in normalized coordinates, identical on all axes
    pub fn pitch(&self) -> f32 {
        2.0 / self.resolution as f32
    }

    /// Physical edge lengths the grid was sampled for
    pub fn size(&self) -> [f32; 3] {
        self.size
    }

    /// Longest physical edge length
    pub fn longest_size(&self) -> f32 {
        let [sx, sy, sz] = self.size;
        sx.max(sy).max(sz)
    }

    /// Physical length of one voxel: `max(size) / resolution`
    ///
    /// The conversion factor between voxel-index space and physical units,
    /// reused by every operator that works in physical distances.
    pub fn size_unit_per_voxel(&self) -> f32 {
        self.longest_size() / self.resolution as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn isotropic_grid_is_cubic_and_half_open() {
        let grid = Grid::sample(32, Size::Uniform(1.0)).expect("valid grid");
        assert_eq!(grid.dims(), [32, 32, 32]);
        for axis in 0..3 {
            let coords = grid.axis(axis);
            assert_relative_eq!(coords[0], -1.0);
            // Half-open: the last sample sits one pitch short of +1
            assert_relative_eq!(coords[31], 1.0 - grid.pitch(), epsilon = 1e-6);
        }
    }

    #[test]
    fn anisotropic_grid_keeps_uniform_pitch() {
        let grid = Grid::sample(64, Size::PerAxis([2.0, 1.0, 1.0])).expect("valid grid");
        assert_eq!(grid.dims(), [64, 32, 32]);
        assert_relative_eq!(grid.extents().x, 1.0);
        assert_relative_eq!(grid.extents().y, 0.5);

        // Same coordinate step on every axis
        for axis in 0..3 {
            let coords = grid.axis(axis);
            assert_relative_eq!(coords[1] - coords[0], grid.pitch(), epsilon = 1e-6);
        }

        // Physical spacing equals size / per-axis resolution on every axis
        let [sx, sy, _] = grid.size();
        assert_relative_eq!(sx / 64.0, sy / 32.0, epsilon = 1e-6);
    }

    #[test]
    fn resolution_ratio_follows_size_ratio() {
        let grid = Grid::sample(60, Size::PerAxis([3.0, 2.0, 1.0])).expect("valid grid");
        let [nx, ny, nz] = grid.dims();
        assert_eq!(nx, 60);
        assert_eq!(ny, 40);
        assert_eq!(nz, 20);
    }

    #[test]
    fn size_unit_per_voxel_uses_longest_axis() {
        let grid = Grid::sample(50, Size::PerAxis([1.0, 5.0, 2.0])).expect("valid grid");
        assert_relative_eq!(grid.size_unit_per_voxel(), 0.1);
    }

    #[test]
    fn zero_resolution_is_rejected() {
        assert!(matches!(
            Grid::sample(0, Size::Uniform(1.0)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn non_positive_size_is_rejected() {
        assert!(matches!(
            Grid::sample(16, Size::PerAxis([1.0, -2.0, 1.0])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Grid::sample(16, Size::Uniform(0.0)),
            Err(Error::Config(_))
        ));
    }
}
