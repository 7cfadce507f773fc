//! Model loading: resolves asset files into named geometry buffers.
//!
//! Meshes are looked up by the node names the compositions expect; a
//! missing node is reported by the composition layer, not here.

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::error::LustreError;

/// Geometry buffers for one named mesh node.
#[derive(Debug, Clone)]
pub struct MeshData {
    /// Node name the mesh was registered under.
    pub name: String,
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals. Empty when the asset carries none.
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices.
    pub indices: Vec<u32>,
}

/// Named-mesh registry populated from model files.
#[derive(Debug, Default)]
pub struct MeshLibrary {
    meshes: FxHashMap<String, MeshData>,
}

impl MeshLibrary {
    /// An empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an OBJ file and register every named model it contains.
    ///
    /// Returns the number of meshes registered. Re-loading a file with the
    /// same node names replaces the previous entries.
    pub fn load_obj(&mut self, path: &Path) -> Result<usize, LustreError> {
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|e| {
            LustreError::ModelLoad(format!("{}: {e}", path.display()))
        })?;

        let mut count = 0;
        for model in models {
            let mesh = model.mesh;
            let positions = mesh
                .positions
                .chunks_exact(3)
                .map(|p| [p[0], p[1], p[2]])
                .collect();
            let normals = mesh
                .normals
                .chunks_exact(3)
                .map(|n| [n[0], n[1], n[2]])
                .collect();
            let data = MeshData {
                name: model.name.clone(),
                positions,
                normals,
                indices: mesh.indices,
            };
            let _ = self.meshes.insert(model.name, data);
            count += 1;
        }

        log::info!("loaded {count} meshes from {}", path.display());
        Ok(count)
    }

    /// Register a mesh directly (procedural geometry, tests).
    pub fn insert(&mut self, mesh: MeshData) {
        let _ = self.meshes.insert(mesh.name.clone(), mesh);
    }

    /// Look up a mesh by node name.
    pub fn mesh(&self, name: &str) -> Option<&MeshData> {
        self.meshes.get(name)
    }

    /// Whether a node name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.meshes.contains_key(name)
    }

    /// Number of registered meshes.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether the library holds no meshes.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::MeshData;

    /// A minimal single-triangle mesh for composition tests.
    pub fn triangle(name: &str) -> MeshData {
        MeshData {
            name: name.to_owned(),
            positions: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            indices: vec![0, 1, 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::triangle;
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut lib = MeshLibrary::new();
        assert!(lib.is_empty());

        lib.insert(triangle("Diamond_1_0"));
        assert!(lib.contains("Diamond_1_0"));
        assert!(!lib.contains("Cylinder_009"));
        assert_eq!(lib.len(), 1);

        let mesh = lib.mesh("Diamond_1_0").unwrap();
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_reinsert_replaces() {
        let mut lib = MeshLibrary::new();
        lib.insert(triangle("crown"));
        let mut bigger = triangle("crown");
        bigger.positions.push([2.0, 2.0, 2.0]);
        lib.insert(bigger);

        assert_eq!(lib.len(), 1);
        assert_eq!(lib.mesh("crown").unwrap().positions.len(), 4);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let mut lib = MeshLibrary::new();
        let err = lib.load_obj(Path::new("definitely/not/here.obj"));
        assert!(matches!(err, Err(LustreError::ModelLoad(_))));
    }
}
