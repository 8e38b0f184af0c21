//! Scene data: geometry, transforms, textures, meshes and the scene graph.
//!
//! - `geometry` is the subdivided plane and its vertex layout
//! - `instance` holds the per-mesh model transform
//! - `mesh` is the animated wave mesh and its clock
//! - `scene` owns the camera and the meshes
//! - `texture` wraps GPU textures

pub mod geometry;
pub mod instance;
pub mod mesh;
pub mod scene;
pub mod texture;
