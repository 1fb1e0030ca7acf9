//! Pipeline driver
//!
//! Sequences the core components for one validated run: sample the grid,
//! generate the field, apply the configured stages while accumulating the
//! padding shift, extract the mesh at the physical voxel pitch and move it
//! back into the unpadded frame.

use crate::config::{Generator, RunPlan, Stage};
use glam::Vec3;
use serde::Serialize;
use tpms_core::grid::Grid;
use tpms_core::lids::{cuboid_heat_exchanger, cylinder_heat_exchanger};
use tpms_core::mesh::{Mesh, extract};
use tpms_core::ops::{mean_gradient_magnitude, thicken};
use tpms_core::pad::cap_extremes;
use tpms_core::tpms::{gyroid, schwarz_d, schwarz_p};
use tpms_core::Result;
use tracing::info;

/// Derived metadata of a finished run, serialized into the JSON report
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub vertices: usize,
    pub faces: usize,
    pub bounding_box_min: [f32; 3],
    pub bounding_box_max: [f32; 3],
    pub shift: [f32; 3],
    pub size_unit_per_voxel: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_gradient_magnitude: Option<f32>,
}

/// Run a validated plan to completion
pub fn run(plan: &RunPlan) -> Result<(Mesh, RunSummary)> {
    let grid = Grid::sample(plan.resolution, plan.size)?;
    let spacing = grid.size_unit_per_voxel();

    let mut field = match plan.generator {
        Generator::Gyroid(p) => {
            info!(periodicity = p.periodicity, strut_param = p.strut_param, "generating gyroid");
            gyroid(&grid, p.periodicity, p.strut_param)
        }
        Generator::SchwarzP(p) => {
            info!(periodicity = p.periodicity, strut_param = p.strut_param, "generating schwarz-p");
            schwarz_p(&grid, p.periodicity, p.strut_param)
        }
        Generator::SchwarzD(p) => {
            info!(periodicity = p.periodicity, strut_param = p.strut_param, "generating schwarz-d");
            schwarz_d(&grid, p.periodicity, p.strut_param)
        }
    };

    let mut shift = Vec3::ZERO;
    let mut reported_mgm = None;

    for stage in &plan.stages {
        match *stage {
            Stage::Thicken { distance, direction } => {
                let mgm = mean_gradient_magnitude(&field, spacing);
                reported_mgm = Some(mgm);
                info!(distance, mgm, ?direction, "thickening");
                field = thicken(&field, distance * mgm, direction);
            }
            Stage::CapExtremes => {
                info!("capping surfaces at bounding box extremes");
                let (capped, delta) = cap_extremes(&field, spacing);
                field = capped;
                shift += delta;
            }
            Stage::CuboidHeatExchanger { distance } => {
                let mgm = mean_gradient_magnitude(&field, spacing);
                reported_mgm = Some(mgm);
                info!(distance, mgm, "building cuboid heat exchanger");
                let (built, delta) = cuboid_heat_exchanger(&field, distance, mgm, spacing);
                field = built;
                shift += delta;
            }
            Stage::CylinderHeatExchanger { distance } => {
                let mgm = mean_gradient_magnitude(&field, spacing);
                reported_mgm = Some(mgm);
                info!(distance, mgm, "building cylinder heat exchanger");
                let (built, delta) = cylinder_heat_exchanger(&field, &grid, distance, mgm);
                field = built;
                shift += delta;
            }
        }
    }

    info!("extracting mesh from voxel grid");
    let mut mesh = extract(&field, spacing)?;
    // Move the mesh back into the unpadded grid frame
    mesh.translate(-shift);

    let bbox = mesh.bounding_box();
    let summary = RunSummary {
        vertices: mesh.vertex_count(),
        faces: mesh.triangle_count(),
        bounding_box_min: bbox.min.to_array(),
        bounding_box_max: bbox.max.to_array(),
        shift: shift.to_array(),
        size_unit_per_voxel: spacing,
        mean_gradient_magnitude: reported_mgm,
    };
    info!(
        vertices = summary.vertices,
        faces = summary.faces,
        "mesh generated"
    );

    Ok((mesh, summary))
}
