//! Grid padding and shift bookkeeping
//!
//! Padding grows the field array, which moves the array origin relative to
//! the sampled grid. Every operation that prepends voxels on the negative
//! side of an axis must therefore contribute `prepended * spacing` to the
//! pipeline's running shift; the extractor subtracts the accumulated shift
//! from the vertices so the mesh lands back in the unpadded frame.

use crate::field::ScalarField;
use glam::Vec3;

/// How padded voxels get their values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadMode {
    /// Replicate the nearest edge value, extending the surface outward
    Edge,
    /// Fill with a constant; `+1.0` forces outside, `-1.0` forces inside
    Constant(f32),
}

/// Pad widths per axis: `[low, high]` voxel counts for x, y, z
pub type PadWidths = [[usize; 2]; 3];

/// Pad a field with the given per-axis widths
pub fn pad(field: &ScalarField, widths: PadWidths, mode: PadMode) -> ScalarField {
    let [nx, ny, nz] = field.dims();
    let dims = [
        nx + widths[0][0] + widths[0][1],
        ny + widths[1][0] + widths[1][1],
        nz + widths[2][0] + widths[2][1],
    ];

    let mut out = ScalarField::filled(dims, 0.0);
    for z in 0..dims[2] {
        for y in 0..dims[1] {
            for x in 0..dims[0] {
                let src = [
                    x as isize - widths[0][0] as isize,
                    y as isize - widths[1][0] as isize,
                    z as isize - widths[2][0] as isize,
                ];
                let inside = src[0] >= 0
                    && src[0] < nx as isize
                    && src[1] >= 0
                    && src[1] < ny as isize
                    && src[2] >= 0
                    && src[2] < nz as isize;
                let value = match (inside, mode) {
                    (true, _) => {
                        field.get(src[0] as usize, src[1] as usize, src[2] as usize)
                    }
                    (false, PadMode::Constant(fill)) => fill,
                    (false, PadMode::Edge) => field.get(
                        src[0].clamp(0, nx as isize - 1) as usize,
                        src[1].clamp(0, ny as isize - 1) as usize,
                        src[2].clamp(0, nz as isize - 1) as usize,
                    ),
                };
                out.set(x, y, z, value);
            }
        }
    }
    out
}

/// Physical translation induced by a pad operation
///
/// Only voxels prepended on the negative side move the array origin.
pub fn pad_shift(widths: PadWidths, spacing: f32) -> Vec3 {
    Vec3::new(
        widths[0][0] as f32 * spacing,
        widths[1][0] as f32 * spacing,
        widths[2][0] as f32 * spacing,
    )
}

/// Close off the field at the grid boundary
///
/// Pads two guaranteed-outside voxels on every side of every axis so the
/// extractor finds a closed boundary even when the raw field is truncated
/// mid-solid at the grid edge. Returns the padded field and the physical
/// shift (`2 * spacing` per axis) to accumulate.
pub fn cap_extremes(field: &ScalarField, spacing: f32) -> (ScalarField, Vec3) {
    let widths: PadWidths = [[2, 2]; 3];
    let padded = pad(field, widths, PadMode::Constant(1.0));
    (padded, pad_shift(widths, spacing))
}
