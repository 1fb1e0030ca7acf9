//! Export functionality for extracted meshes

mod stl;

pub use stl::export_stl;

use crate::Result;
use crate::mesh::Mesh;
use std::path::Path;

/// Extension trait for exporting meshes
pub trait MeshExport {
    /// Write the mesh as binary STL
    fn export_stl(&self, path: &Path) -> Result<()>;
}

impl MeshExport for Mesh {
    fn export_stl(&self, path: &Path) -> Result<()> {
        export_stl(self, path)
    }
}
