//! STL file export (Binary format)
//!
//! STL (stereolithography) is a simple triangle-soup format commonly used
//! for 3D printing. This implementation exports in binary STL format which
//! is more compact and widely supported than ASCII STL.

use crate::Result;
use crate::mesh::Mesh;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export a mesh to binary STL format
///
/// Binary STL format:
/// - 80 bytes: Header (arbitrary text)
/// - 4 bytes: Number of triangles (u32 little-endian)
/// - For each triangle (50 bytes):
///   - 12 bytes: Normal vector (3 x f32 little-endian)
///   - 36 bytes: 3 vertices (9 x f32 little-endian)
///   - 2 bytes: Attribute byte count (usually 0)
pub fn export_stl(mesh: &Mesh, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    // Header (80 bytes, padded with spaces)
    let header = format!(
        "tpms STL export - {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    let mut header_bytes = [b' '; 80];
    let header_len = header.len().min(80);
    header_bytes[..header_len].copy_from_slice(&header.as_bytes()[..header_len]);
    writer.write_all(&header_bytes)?;

    // Number of triangles (u32 little-endian)
    writer.write_all(&(mesh.triangle_count() as u32).to_le_bytes())?;

    // Write each triangle
    for face in &mesh.faces {
        let v0 = mesh.vertices[face[0] as usize];
        let v1 = mesh.vertices[face[1] as usize];
        let v2 = mesh.vertices[face[2] as usize];

        // STL expects face normals, recomputed from the winding
        let normal = (v1 - v0).cross(v2 - v0);
        let normal = if normal.length() > 0.0 {
            normal.normalize()
        } else {
            glam::Vec3::Z // Default if degenerate
        };

        for value in normal.to_array() {
            writer.write_all(&value.to_le_bytes())?;
        }
        for vertex in [v0, v1, v2] {
            for value in vertex.to_array() {
                writer.write_all(&value.to_le_bytes())?;
            }
        }

        // Attribute byte count (2 bytes, usually 0)
        writer.write_all(&0u16.to_le_bytes())?;
    }

    writer.flush()?;
    Ok(())
}
