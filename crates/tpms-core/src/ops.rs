//! Field operators
//!
//! A small algebra over scalar fields. Every operator preserves the
//! negative-inside sign convention, which fixes the boolean reading of the
//! elementwise combinators: `max` keeps the region inside both fields
//! (intersection), `min` keeps the region inside either (union). The
//! smooth variants approximate those with a controllable blend radius.

use crate::field::ScalarField;
use serde::{Deserialize, Serialize};

/// Voxels closer to the surface than this take part in gradient averaging
const NEAR_SURFACE: f32 = 0.1;

/// Which side of the surface a shell grows toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Centered on the original surface
    #[serde(rename = "sym")]
    Sym,
    /// Shell extends outward only
    #[serde(rename = "+")]
    Outward,
    /// Shell extends inward only
    #[serde(rename = "-")]
    Inward,
}

/// Shift the iso-surface by `distance` in field units
///
/// Positive distances move the surface outward. `offset(field, 0)` is the
/// identity.
pub fn offset(field: &ScalarField, distance: f32) -> ScalarField {
    field.map(|v| v - distance)
}

/// Turn the surface into a shell of the given thickness (field units)
///
/// The shell is the intersection of an outward-offset copy and a negated
/// inward-offset copy, so the two resulting surfaces face each other with
/// negative values in between.
pub fn thicken(field: &ScalarField, distance: f32, direction: Direction) -> ScalarField {
    match direction {
        Direction::Sym => {
            let half = distance / 2.0;
            field.map(move |v| (v - half).max(-(v + half)))
        }
        Direction::Outward => field.map(move |v| (v - distance).max(-v)),
        Direction::Inward => field.map(move |v| v.max(-(v + distance))),
    }
}

/// Numerically stable log-sum-exp smooth maximum of two values
///
/// `k` controls sharpness; larger values approach the true maximum. The
/// running maximum is factored out before exponentiating, so the result
/// stays finite for any `k·value` magnitude.
#[inline]
pub fn smooth_max(a: f32, b: f32, k: f32) -> f32 {
    let m = a.max(b);
    m + ((a.min(b) - m) * k).exp().ln_1p() / k
}

/// Log-sum-exp smooth minimum, the negated-exponent companion of
/// [`smooth_max`]
#[inline]
pub fn smooth_min(a: f32, b: f32, k: f32) -> f32 {
    -smooth_max(-a, -b, k)
}

/// Elementwise [`smooth_max`] of two fields
pub fn smooth_max_lse(a: &ScalarField, b: &ScalarField, k: f32) -> ScalarField {
    let out = a.zip_with(b, |x, y| smooth_max(x, y, k));
    warn_non_finite(&out, "smooth_max_lse");
    out
}

/// Elementwise [`smooth_min`] of two fields
pub fn smooth_min_lse(a: &ScalarField, b: &ScalarField, k: f32) -> ScalarField {
    let out = a.zip_with(b, |x, y| smooth_min(x, y, k));
    warn_non_finite(&out, "smooth_min_lse");
    out
}

/// Polynomial smooth minimum with blend radius `k`
///
/// Experimental: kept for parity with the log-sum-exp blends but not
/// exercised by any pipeline stage. Verify the blend region before relying
/// on it for offset-sensitive geometry.
pub fn smooth_min_poly(a: &ScalarField, b: &ScalarField, k: f32) -> ScalarField {
    a.zip_with(b, |x, y| {
        let h = (0.5 + 0.5 * (y - x) / k).clamp(0.0, 1.0);
        lerp(y, x, h) - k * h * (1.0 - h)
    })
}

/// Polynomial smooth maximum with blend radius `k`
///
/// Experimental, see [`smooth_min_poly`].
pub fn smooth_max_poly(a: &ScalarField, b: &ScalarField, k: f32) -> ScalarField {
    a.zip_with(b, |x, y| {
        let h = (0.5 - 0.5 * (y - x) / k).clamp(0.0, 1.0);
        lerp(y, x, h) + k * h * (1.0 - h)
    })
}

/// Intersect a field with a signed-distance mask, smoothly
///
/// Sign convention: both inputs are negative inside, so the smooth maximum
/// keeps only the region inside both — the field clipped to the mask
/// volume, with a fillet of width ~1/k at the seam.
pub fn intersect_with_cylinder(field: &ScalarField, mask: &ScalarField, k: f32) -> ScalarField {
    smooth_max_lse(field, mask, k)
}

/// Mean gradient magnitude near the surface
///
/// Central differences in the interior, one-sided at the boundary, with
/// physical spacing `size_unit_per_voxel` on all three axes; averaged over
/// voxels with `|field| < 0.1`. Converts a physical offset distance into a
/// field-value delta (`delta = distance * mgm`) for fields that are not
/// true unit-gradient distance fields.
pub fn mean_gradient_magnitude(field: &ScalarField, size_unit_per_voxel: f32) -> f32 {
    let [nx, ny, nz] = field.dims();
    let h = size_unit_per_voxel;

    let diff = |lo: f32, hi: f32, span: f32| (hi - lo) / (span * h);
    let mut sum = 0.0f64;
    let mut count = 0usize;

    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                if field.get(x, y, z).abs() >= NEAR_SURFACE {
                    continue;
                }
                let gx = match (x, nx) {
                    (_, 1) => 0.0,
                    (0, _) => diff(field.get(0, y, z), field.get(1, y, z), 1.0),
                    (x, nx) if x == nx - 1 => {
                        diff(field.get(nx - 2, y, z), field.get(nx - 1, y, z), 1.0)
                    }
                    (x, _) => diff(field.get(x - 1, y, z), field.get(x + 1, y, z), 2.0),
                };
                let gy = match (y, ny) {
                    (_, 1) => 0.0,
                    (0, _) => diff(field.get(x, 0, z), field.get(x, 1, z), 1.0),
                    (y, ny) if y == ny - 1 => {
                        diff(field.get(x, ny - 2, z), field.get(x, ny - 1, z), 1.0)
                    }
                    (y, _) => diff(field.get(x, y - 1, z), field.get(x, y + 1, z), 2.0),
                };
                let gz = match (z, nz) {
                    (_, 1) => 0.0,
                    (0, _) => diff(field.get(x, y, 0), field.get(x, y, 1), 1.0),
                    (z, nz) if z == nz - 1 => {
                        diff(field.get(x, y, nz - 2), field.get(x, y, nz - 1), 1.0)
                    }
                    (z, _) => diff(field.get(x, y, z - 1), field.get(x, y, z + 1), 2.0),
                };
                sum += f64::from((gx * gx + gy * gy + gz * gz).sqrt());
                count += 1;
            }
        }
    }

    if count == 0 {
        tracing::warn!("no voxels near the surface, gradient magnitude defaults to 0");
        return 0.0;
    }
    (sum / count as f64) as f32
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn warn_non_finite(field: &ScalarField, op: &str) {
    if !field.values().iter().copied().all(f32::is_finite) {
        tracing::warn!(op, "smooth blend produced non-finite values");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, Size};
    use crate::tpms::sphere;
    use approx::assert_relative_eq;

    fn unit_grid(res: u32) -> Grid {
        Grid::sample(res, Size::Uniform(1.0)).expect("valid grid")
    }

    /// Zero crossings along the +x center row, by linear interpolation
    fn crossings_along_x(field: &ScalarField, grid: &Grid) -> Vec<f32> {
        let [nx, ny, nz] = field.dims();
        let (j, k) = (ny / 2, nz / 2);
        let xs = grid.axis(0);
        let mut out = Vec::new();
        for i in nx / 2..nx - 1 {
            let (a, b) = (field.get(i, j, k), field.get(i + 1, j, k));
            if (a < 0.0) != (b < 0.0) {
                let t = a / (a - b);
                out.push(xs[i] + t * (xs[i + 1] - xs[i]));
            }
        }
        out
    }

    #[test]
    fn offset_zero_is_identity() {
        let grid = unit_grid(16);
        let field = sphere(&grid, 0.5);
        assert_eq!(offset(&field, 0.0), field);
    }

    #[test]
    fn offset_moves_the_surface_outward() {
        let grid = unit_grid(64);
        let field = offset(&sphere(&grid, 0.5), 0.2);
        let crossings = crossings_along_x(&field, &grid);
        assert_eq!(crossings.len(), 1);
        assert_relative_eq!(crossings[0], 0.7, epsilon = 1e-3);
    }

    #[test]
    fn thicken_shell_thickness_is_direction_independent() {
        let grid = unit_grid(64);
        let field = sphere(&grid, 0.5);
        for direction in [Direction::Sym, Direction::Outward, Direction::Inward] {
            let shell = thicken(&field, 0.2, direction);
            let crossings = crossings_along_x(&shell, &grid);
            assert_eq!(crossings.len(), 2, "{direction:?}");
            assert_relative_eq!(crossings[1] - crossings[0], 0.2, epsilon = 1e-3);
        }
    }

    #[test]
    fn thicken_sym_is_centered_on_the_surface() {
        let grid = unit_grid(64);
        let shell = thicken(&sphere(&grid, 0.5), 0.2, Direction::Sym);
        let crossings = crossings_along_x(&shell, &grid);
        assert_relative_eq!(crossings[0], 0.4, epsilon = 1e-3);
        assert_relative_eq!(crossings[1], 0.6, epsilon = 1e-3);
    }

    #[test]
    fn smooth_max_is_stable_for_large_arguments() {
        let v = smooth_max(1000.0, -1000.0, 50.0);
        assert!(v.is_finite());
        assert_relative_eq!(v, 1000.0);
    }

    #[test]
    fn smooth_max_approaches_max_away_from_the_blend() {
        assert_relative_eq!(smooth_max(2.0, -3.0, 8.0), 2.0, epsilon = 1e-6);
        // At the seam the blend overshoots by ln(2)/k
        assert_relative_eq!(
            smooth_max(1.0, 1.0, 8.0),
            1.0 + std::f32::consts::LN_2 / 8.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn smooth_min_mirrors_smooth_max() {
        assert_relative_eq!(smooth_min(2.0, -3.0, 8.0), -3.0, epsilon = 1e-6);
        assert_relative_eq!(smooth_min(0.5, 0.5, 4.0), -smooth_max(-0.5, -0.5, 4.0));
    }

    #[test]
    fn poly_blends_match_sharp_ops_for_tiny_k() {
        let grid = unit_grid(8);
        let a = sphere(&grid, 0.5);
        let b = offset(&a, 0.3);
        let max_poly = smooth_max_poly(&a, &b, 1e-4);
        let min_poly = smooth_min_poly(&a, &b, 1e-4);
        for i in 0..a.len() {
            assert_relative_eq!(
                max_poly.values()[i],
                a.values()[i].max(b.values()[i]),
                epsilon = 1e-3
            );
            assert_relative_eq!(
                min_poly.values()[i],
                a.values()[i].min(b.values()[i]),
                epsilon = 1e-3
            );
        }
    }

    #[test]
    fn mean_gradient_magnitude_of_distance_field() {
        // The sphere field has unit gradient in grid coordinates; the grid
        // maps a physical edge of 1.0 onto [-1, 1), so the physical-space
        // magnitude is 2.
        let grid = unit_grid(64);
        let field = sphere(&grid, 0.5);
        let mgm = mean_gradient_magnitude(&field, grid.size_unit_per_voxel());
        assert_relative_eq!(mgm, 2.0, epsilon = 0.05);
    }

    #[test]
    fn intersect_with_cylinder_clips_the_field() {
        let grid = unit_grid(32);
        let field = sphere(&grid, 0.9);
        let mask = crate::tpms::cylinder_xy(&grid, 0.4);
        let clipped = intersect_with_cylinder(&field, &mask, 8.0);
        // Inside both: stays inside
        assert!(clipped.get(16, 16, 16) < 0.0);
        // Inside the sphere but outside the cylinder: clipped away
        let far = clipped.get(30, 16, 16);
        assert!(far > 0.0);
    }
}
