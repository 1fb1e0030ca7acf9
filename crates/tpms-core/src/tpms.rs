//! Scalar-field generators
//!
//! Each generator evaluates one implicit surface family over a [`Grid`]
//! and returns a [`ScalarField`] with the crate's negative-inside sign
//! convention. The TPMS generators share the same signature shape, so new
//! families slot in as plain functions.

use crate::field::ScalarField;
use crate::grid::Grid;
use std::f32::consts::PI;

/// Gyroid surface: `sin(πax)·cos(πay) + sin(πay)·cos(πaz) + sin(πaz)·cos(πax) − t`
///
/// `periodicity` sets the number of unit cells across the grid, the strut
/// parameter `t` offsets the iso-level and controls strut thickness.
pub fn gyroid(grid: &Grid, periodicity: f32, strut_param: f32) -> ScalarField {
    let a = PI * periodicity;
    ScalarField::from_fn(grid, move |p| {
        let (sin_x, cos_x) = (a * p.x).sin_cos();
        let (sin_y, cos_y) = (a * p.y).sin_cos();
        let (sin_z, cos_z) = (a * p.z).sin_cos();
        sin_x * cos_y + sin_y * cos_z + sin_z * cos_x - strut_param
    })
}

/// Schwarz-P surface: `cos(πax) + cos(πay) + cos(πaz) − t`
pub fn schwarz_p(grid: &Grid, periodicity: f32, strut_param: f32) -> ScalarField {
    let a = PI * periodicity;
    ScalarField::from_fn(grid, move |p| {
        (a * p.x).cos() + (a * p.y).cos() + (a * p.z).cos() - strut_param
    })
}

/// Schwarz-D (diamond) surface
pub fn schwarz_d(grid: &Grid, periodicity: f32, strut_param: f32) -> ScalarField {
    let a = PI * periodicity;
    ScalarField::from_fn(grid, move |p| {
        let (sin_x, cos_x) = (a * p.x).sin_cos();
        let (sin_y, cos_y) = (a * p.y).sin_cos();
        let (sin_z, cos_z) = (a * p.z).sin_cos();
        sin_x * sin_y * sin_z
            + sin_x * cos_y * cos_z
            + cos_x * sin_y * cos_z
            + cos_x * cos_y * sin_z
            - strut_param
    })
}

/// Sphere of the given radius centered at the grid origin
pub fn sphere(grid: &Grid, radius: f32) -> ScalarField {
    ScalarField::from_fn(grid, move |p| p.length() - radius)
}

/// Infinite cylinder along Z: `sqrt(x² + y²) − radius`
///
/// Used as the signed-distance mask for cylindrical intersections.
pub fn cylinder_xy(grid: &Grid, radius: f32) -> ScalarField {
    ScalarField::from_fn(grid, move |p| (p.x * p.x + p.y * p.y).sqrt() - radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Size;
    use approx::assert_relative_eq;

    #[test]
    fn gyroid_passes_through_origin_at_zero_strut() {
        let grid = Grid::sample(16, Size::Uniform(1.0)).expect("valid grid");
        let field = gyroid(&grid, 2.0, 0.0);
        // The origin-symmetric gyroid vanishes at the grid origin
        assert_relative_eq!(field.get(8, 8, 8), 0.0, epsilon = 1e-5);
        assert!(field.crosses_zero());
    }

    #[test]
    fn gyroid_strut_param_offsets_the_level() {
        let grid = Grid::sample(16, Size::Uniform(1.0)).expect("valid grid");
        let base = gyroid(&grid, 2.0, 0.0);
        let offset = gyroid(&grid, 2.0, 0.3);
        for (a, b) in base.values().iter().zip(offset.values()) {
            assert_relative_eq!(a - 0.3, *b, epsilon = 1e-6);
        }
    }

    #[test]
    fn schwarz_p_is_inside_at_cell_center() {
        let grid = Grid::sample(16, Size::Uniform(1.0)).expect("valid grid");
        // One period across the grid: cos terms all −1 at (±1, ±1, ±1)·(1/1)
        let field = schwarz_p(&grid, 1.0, 0.0);
        // At the origin every cosine is +1
        assert_relative_eq!(field.get(8, 8, 8), 3.0, epsilon = 1e-5);
        assert!(field.crosses_zero());
    }

    #[test]
    fn schwarz_d_crosses_zero() {
        let grid = Grid::sample(16, Size::Uniform(1.0)).expect("valid grid");
        assert!(schwarz_d(&grid, 2.0, 0.0).crosses_zero());
    }

    #[test]
    fn sphere_sign_convention() {
        let grid = Grid::sample(16, Size::Uniform(1.0)).expect("valid grid");
        let field = sphere(&grid, 0.5);
        // Center is inside, corner is outside
        assert!(field.get(8, 8, 8) < 0.0);
        assert!(field.get(0, 0, 0) > 0.0);
    }

    #[test]
    fn cylinder_ignores_z() {
        let grid = Grid::sample(16, Size::Uniform(1.0)).expect("valid grid");
        let field = cylinder_xy(&grid, 0.5);
        for k in 0..16 {
            assert_relative_eq!(field.get(8, 8, k), field.get(8, 8, 0));
        }
    }
}
