//! Heat-exchanger lid construction
//!
//! Both builders split the field into an outward- and an inward-offset
//! copy, extend them through directional padding so the channel system
//! stays open on the flow axis, and rejoin them with `max(outer, -inner)`.
//! The rejoined shell separates the two interpenetrating channel networks
//! of the TPMS while the padded lids close the remaining faces.

use crate::field::ScalarField;
use crate::grid::Grid;
use crate::ops;
use crate::pad::{self, PadMode, PadWidths};
use crate::tpms;
use glam::Vec3;

/// Blend sharpness of the cylinder mask seam
const MASK_SHARPNESS: f32 = 8.0;

/// Cuboid heat-exchanger: flat lids on every face, channels open along X and Y
///
/// `distance` is the wall thickness in physical units, `mgm` the mean
/// gradient magnitude used to convert it into a field delta, `spacing` the
/// physical voxel pitch. Returns the new field and the physical shift to
/// accumulate.
pub fn cuboid_heat_exchanger(
    field: &ScalarField,
    distance: f32,
    mgm: f32,
    spacing: f32,
) -> (ScalarField, Vec3) {
    let delta = (distance / 2.0) * mgm;
    tracing::debug!(delta, "offsetting channel surfaces");
    let outer = ops::offset(field, delta);
    let inner = ops::offset(field, -delta);

    let lid = (distance / spacing).round() as usize;
    tracing::debug!(lid, "building lids");

    // Outer channel: extend through the X lids, close Y and Z with inside fill
    let outer = pad::pad(&outer, [[lid, lid], [0, 0], [0, 0]], PadMode::Edge);
    let outer = pad::pad(
        &outer,
        [[0, 0], [lid, lid], [lid, lid]],
        PadMode::Constant(-1.0),
    );

    // Inner channel: extend through the Y lids, close X and Z with outside fill
    let inner = pad::pad(&inner, [[0, 0], [lid, lid], [0, 0]], PadMode::Edge);
    let inner = pad::pad(
        &inner,
        [[lid, lid], [0, 0], [lid, lid]],
        PadMode::Constant(1.0),
    );

    let joined = outer.max(&inner.negated());
    let (capped, cap_shift) = pad::cap_extremes(&joined, spacing);

    (capped, Vec3::splat(lid as f32 * spacing) + cap_shift)
}

/// Cylindrical heat-exchanger: cylindrical jacket, flat lids on Z only
///
/// The outer surface is clipped to the largest cylinder that fits the XY
/// cross-section, the inner one to a cylinder two wall thicknesses
/// smaller, leaving an annular wall between the two channel networks.
pub fn cylinder_heat_exchanger(
    field: &ScalarField,
    grid: &Grid,
    distance: f32,
    mgm: f32,
) -> (ScalarField, Vec3) {
    let spacing = grid.size_unit_per_voxel();
    let delta = (distance / 2.0) * mgm;
    tracing::debug!(delta, "offsetting channel surfaces");
    let mut outer = ops::offset(field, delta);
    let inner = ops::offset(field, -delta);

    // Open the outer channel at top and bottom by pushing the extreme Z
    // slices below the iso-surface
    clamp_z_extremes(&mut outer, -1.0);

    let longest = grid.longest_size();
    let [sx, sy, _] = grid.size();
    let radius = sx.min(sy) / longest;
    // Grid coordinates span 2 units across the longest axis
    let inner_radius = radius - (distance / longest) * 2.0;
    tracing::debug!(radius, inner_radius, "masking cylinder");

    let outer = ops::intersect_with_cylinder(&outer, &tpms::cylinder_xy(grid, radius), MASK_SHARPNESS);
    let inner = ops::intersect_with_cylinder(
        &inner,
        &tpms::cylinder_xy(grid, inner_radius),
        MASK_SHARPNESS,
    );

    // Thicken the Z lids by extending both surfaces through them
    let lid = (distance / spacing).round() as usize;
    let lid_widths: PadWidths = [[0, 0], [0, 0], [lid, lid]];
    let outer = pad::pad(&outer, lid_widths, PadMode::Edge);
    let inner = pad::pad(&inner, lid_widths, PadMode::Edge);

    let joined = outer.max(&inner.negated());

    // Close Z so the inside region crosses the iso-surface at the lids
    let cap_widths: PadWidths = [[0, 0], [0, 0], [2, 2]];
    let capped = pad::pad(&joined, cap_widths, PadMode::Constant(1.0));

    let shift = pad::pad_shift(lid_widths, spacing) + pad::pad_shift(cap_widths, spacing);
    (capped, shift)
}

/// Overwrite the first and last Z slice with a constant
fn clamp_z_extremes(field: &mut ScalarField, value: f32) {
    let [nx, ny, nz] = field.dims();
    for y in 0..ny {
        for x in 0..nx {
            field.set(x, y, 0, value);
            field.set(x, y, nz - 1, value);
        }
    }
}
