//! Dense scalar fields over a voxel grid
//!
//! A [`ScalarField`] stores one real value per voxel, x-fastest. The sign
//! convention is fixed throughout the crate: negative = inside the solid,
//! positive = outside, zero = the surface. Operators produce new fields
//! (or mutate through the explicit in-place methods) — there is no shared
//! mutable state, so generators can fill fields in parallel.

use crate::grid::Grid;
use rayon::prelude::*;

/// A dense 3D array of field values with negative-inside sign convention
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    values: Vec<f32>,
    dims: [usize; 3],
}

impl ScalarField {
    /// Create a field filled with a constant value
    pub fn filled(dims: [usize; 3], value: f32) -> Self {
        Self {
            values: vec![value; dims[0] * dims[1] * dims[2]],
            dims,
        }
    }

    /// Evaluate `f` at every voxel center of `grid`, in parallel
    pub fn from_fn<F>(grid: &Grid, f: F) -> Self
    where
        F: Fn(glam::Vec3) -> f32 + Sync,
    {
        let [nx, ny, nz] = grid.dims();
        let values: Vec<f32> = (0..nx * ny * nz)
            .into_par_iter()
            .map(|idx| {
                let x = idx % nx;
                let y = (idx / nx) % ny;
                let z = idx / (nx * ny);
                f(grid.at(x, y, z))
            })
            .collect();
        Self {
            values,
            dims: [nx, ny, nz],
        }
    }

    /// Number of voxels per axis
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Total number of voxels
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Linear index of voxel `(x, y, z)`
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.dims[1] + y) * self.dims[0] + x
    }

    /// Value at voxel `(x, y, z)`
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> f32 {
        self.values[self.index(x, y, z)]
    }

    /// Overwrite the value at voxel `(x, y, z)`
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: f32) {
        let idx = self.index(x, y, z);
        self.values[idx] = value;
    }

    /// Raw values, x-fastest
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Apply `f` to every value in place
    pub fn map_in_place<F>(&mut self, f: F)
    where
        F: Fn(f32) -> f32 + Sync + Send,
    {
        self.values.par_iter_mut().for_each(|v| *v = f(*v));
    }

    /// New field with `f` applied to every value
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f32) -> f32 + Sync + Send,
    {
        let mut out = self.clone();
        out.map_in_place(f);
        out
    }

    /// New field combining two fields elementwise; dims must match
    pub fn zip_with<F>(&self, other: &Self, f: F) -> Self
    where
        F: Fn(f32, f32) -> f32 + Sync + Send,
    {
        assert_eq!(self.dims, other.dims, "field shape mismatch");
        let values: Vec<f32> = self
            .values
            .par_iter()
            .zip(other.values.par_iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Self {
            values,
            dims: self.dims,
        }
    }

    /// Elementwise maximum of two fields (intersection, negative-inside)
    pub fn max(&self, other: &Self) -> Self {
        self.zip_with(other, f32::max)
    }

    /// New field with every value negated (inside/outside flipped)
    pub fn negated(&self) -> Self {
        self.map(|v| -v)
    }

    /// Smallest value in the field
    pub fn min_value(&self) -> f32 {
        self.values.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Largest value in the field
    pub fn max_value(&self) -> f32 {
        self.values
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Whether the zero level set passes through the field
    pub fn crosses_zero(&self) -> bool {
        self.min_value() < 0.0 && self.max_value() >= 0.0
    }
}
