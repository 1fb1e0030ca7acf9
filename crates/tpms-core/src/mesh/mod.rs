//! Iso-surface extraction
//!
//! Converts a scalar field plus voxel spacing into a triangle mesh at the
//! zero level set. Each cell is marched through its six-tetrahedra
//! decomposition (see [`tetrahedra`]); crossing vertices are welded
//! through a grid-edge cache, so a field whose inside region is closed
//! off (e.g. by [`crate::pad::cap_extremes`]) extracts to an edge-manifold
//! mesh.
//!
//! Vertices come out at `index * spacing`. The caller owns the coordinate
//! frame: the pipeline passes the physical voxel pitch and afterwards
//! subtracts the accumulated padding shift via [`Mesh::translate`].

mod tetrahedra;

use crate::field::ScalarField;
use crate::{Error, Result};
use glam::Vec3;
use std::collections::HashMap;

pub use tetrahedra::{CORNER_OFFSETS, TETRAHEDRA};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Get the size of the bounding box
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// A triangle mesh: vertex positions plus indexed faces
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Get number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get number of triangles
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Move every vertex by `offset`
    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Axis-aligned bounding box; meaningful only for non-empty meshes
    pub fn bounding_box(&self) -> Aabb {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in &self.vertices {
            min = min.min(*v);
            max = max.max(*v);
        }
        Aabb::new(min, max)
    }
}

/// Extract the zero level set of a field as a triangle mesh
///
/// `spacing` is the edge length of one voxel in the output units.
/// Fails with [`Error::NoSurface`] when the field never crosses zero.
pub fn extract(field: &ScalarField, spacing: f32) -> Result<Mesh> {
    let [nx, ny, nz] = field.dims();
    if nx < 2 || ny < 2 || nz < 2 || !field.crosses_zero() {
        return Err(Error::NoSurface);
    }

    let mut welder = EdgeWelder::new();
    let mut faces: Vec<[u32; 3]> = Vec::new();

    for z in 0..nz - 1 {
        for y in 0..ny - 1 {
            for x in 0..nx - 1 {
                // Corner samples of this cell
                let mut corners = [Corner::default(); 8];
                let mut any_inside = false;
                let mut any_outside = false;
                for (c, corner) in corners.iter_mut().enumerate() {
                    let [dx, dy, dz] = CORNER_OFFSETS[c];
                    let (cx, cy, cz) = (x + dx, y + dy, z + dz);
                    let value = field.get(cx, cy, cz);
                    *corner = Corner {
                        id: ((cz * ny + cy) * nx + cx) as u64,
                        position: Vec3::new(cx as f32, cy as f32, cz as f32) * spacing,
                        value,
                    };
                    if value < 0.0 {
                        any_inside = true;
                    } else {
                        any_outside = true;
                    }
                }
                if !(any_inside && any_outside) {
                    continue;
                }

                for tet in TETRAHEDRA {
                    process_tetrahedron(
                        [corners[tet[0]], corners[tet[1]], corners[tet[2]], corners[tet[3]]],
                        &mut welder,
                        &mut faces,
                    );
                }
            }
        }
    }

    if faces.is_empty() {
        return Err(Error::NoSurface);
    }

    Ok(Mesh {
        vertices: welder.vertices,
        faces,
    })
}

/// One sampled cell corner
#[derive(Debug, Clone, Copy, Default)]
struct Corner {
    id: u64,
    position: Vec3,
    value: f32,
}

impl Corner {
    #[inline]
    fn inside(&self) -> bool {
        self.value < 0.0
    }
}

/// Welds crossing vertices through their grid edge
///
/// A crossing vertex is identified by the pair of grid points whose edge
/// it sits on, so every tetrahedron (and every neighboring cell) touching
/// that edge reuses the same vertex index.
struct EdgeWelder {
    cache: HashMap<(u64, u64), u32>,
    vertices: Vec<Vec3>,
}

impl EdgeWelder {
    fn new() -> Self {
        Self {
            cache: HashMap::new(),
            vertices: Vec::new(),
        }
    }

    fn vertex(&mut self, a: Corner, b: Corner) -> u32 {
        let key = if a.id < b.id { (a.id, b.id) } else { (b.id, a.id) };
        if let Some(&idx) = self.cache.get(&key) {
            return idx;
        }
        let t = if (b.value - a.value).abs() > 1e-5 {
            (0.0 - a.value) / (b.value - a.value)
        } else {
            0.5
        };
        let idx = self.vertices.len() as u32;
        self.vertices.push(a.position.lerp(b.position, t));
        self.cache.insert(key, idx);
        idx
    }
}

/// Triangulate the surface crossing one tetrahedron
fn process_tetrahedron(corners: [Corner; 4], welder: &mut EdgeWelder, faces: &mut Vec<[u32; 3]>) {
    let inside: Vec<usize> = (0..4).filter(|&i| corners[i].inside()).collect();
    let outside: Vec<usize> = (0..4).filter(|&i| !corners[i].inside()).collect();

    match inside.len() {
        0 | 4 => {}
        1 => {
            let a = corners[inside[0]];
            let v0 = welder.vertex(a, corners[outside[0]]);
            let v1 = welder.vertex(a, corners[outside[1]]);
            let v2 = welder.vertex(a, corners[outside[2]]);
            push_oriented(faces, &welder.vertices, [v0, v1, v2], a.position);
        }
        3 => {
            let d = corners[outside[0]];
            let v0 = welder.vertex(corners[inside[0]], d);
            let v1 = welder.vertex(corners[inside[1]], d);
            let v2 = welder.vertex(corners[inside[2]], d);
            let interior = (corners[inside[0]].position
                + corners[inside[1]].position
                + corners[inside[2]].position)
                / 3.0;
            push_oriented(faces, &welder.vertices, [v0, v1, v2], interior);
        }
        2 => {
            let (a, b) = (corners[inside[0]], corners[inside[1]]);
            let (c, d) = (corners[outside[0]], corners[outside[1]]);
            let ac = welder.vertex(a, c);
            let ad = welder.vertex(a, d);
            let bd = welder.vertex(b, d);
            let bc = welder.vertex(b, c);
            let interior = (a.position + b.position) / 2.0;
            push_oriented(faces, &welder.vertices, [ac, ad, bd], interior);
            push_oriented(faces, &welder.vertices, [ac, bd, bc], interior);
        }
        _ => unreachable!(),
    }
}

/// Append a triangle wound so its normal points away from the inside region
fn push_oriented(
    faces: &mut Vec<[u32; 3]>,
    vertices: &[Vec3],
    [i0, i1, i2]: [u32; 3],
    interior: Vec3,
) {
    let p0 = vertices[i0 as usize];
    let p1 = vertices[i1 as usize];
    let p2 = vertices[i2 as usize];
    let normal = (p1 - p0).cross(p2 - p0);
    let centroid = (p0 + p1 + p2) / 3.0;
    if normal.dot(centroid - interior) < 0.0 {
        faces.push([i0, i2, i1]);
    } else {
        faces.push([i0, i1, i2]);
    }
}
