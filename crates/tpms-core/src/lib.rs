//! # tpms-core
//!
//! Triply-periodic minimal surface synthesis on voxel grids.
//!
//! The crate samples an implicit surface family (gyroid, Schwarz P/D) over
//! a regular grid, pushes the resulting scalar field through a chain of
//! geometric operators (offset, thicken, smooth booleans, padding, lid
//! construction), then extracts the zero level set as a triangle mesh and
//! exports it.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tpms_core::prelude::*;
//!
//! let grid = Grid::sample(64, Size::Uniform(1.0))?;
//! let field = gyroid(&grid, 2.0, 0.0);
//! let shell = thicken(&field, 0.1, Direction::Sym);
//! let (shell, shift) = cap_extremes(&shell, grid.size_unit_per_voxel());
//!
//! let mut mesh = extract(&shell, grid.size_unit_per_voxel())?;
//! mesh.translate(-shift);
//! mesh.export_stl("gyroid.stl".as_ref())?;
//! ```
//!
//! ## Units and Conventions
//!
//! - **Sign convention**: negative = inside, positive = outside, zero = the
//!   surface; every operator preserves it.
//! - **Grid coordinates**: the longest physical axis spans `[-1, 1)`,
//!   shorter axes scale proportionally so the voxel pitch is uniform.
//! - **Physical units**: `Grid::size_unit_per_voxel` converts voxel-index
//!   space to physical units; operators taking physical distances say so.

pub mod export;
pub mod field;
pub mod grid;
pub mod lids;
pub mod mesh;
pub mod ops;
pub mod pad;
pub mod tpms;

mod error;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    // Grid sampling
    pub use crate::grid::{Grid, Size};

    // Scalar fields and generators
    pub use crate::field::ScalarField;
    pub use crate::tpms::{cylinder_xy, gyroid, schwarz_d, schwarz_p, sphere};

    // Field operators
    pub use crate::ops::{
        Direction, intersect_with_cylinder, mean_gradient_magnitude, offset, smooth_max_lse,
        smooth_min_lse, thicken,
    };

    // Padding and lids
    pub use crate::lids::{cuboid_heat_exchanger, cylinder_heat_exchanger};
    pub use crate::pad::{PadMode, PadWidths, cap_extremes, pad, pad_shift};

    // Mesh extraction and export
    pub use crate::export::MeshExport;
    pub use crate::mesh::{Aabb, Mesh, extract};

    // Math (re-export glam)
    pub use glam::Vec3;

    // Error handling
    pub use crate::{Error, Result};
}
