//! Scene object graph: one camera and the meshes it looks at.

use instant::Duration;

use crate::{camera::CameraResources, data_structures::mesh::AnimatedMesh, render::Render};

#[derive(Debug)]
pub struct Scene {
    pub camera: CameraResources,
    meshes: Vec<AnimatedMesh>,
}

impl Scene {
    pub fn new(camera: CameraResources) -> Self {
        Self {
            camera,
            meshes: Vec::new(),
        }
    }

    pub fn add(&mut self, mesh: AnimatedMesh) {
        self.meshes.push(mesh);
    }

    pub fn meshes(&self) -> &[AnimatedMesh] {
        &self.meshes
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn tick(&mut self, queue: &wgpu::Queue, dt: Duration) {
        for mesh in &mut self.meshes {
            mesh.tick(queue, dt);
        }
    }

    pub fn to_render<'pass>(&self) -> Render<'_, 'pass> {
        if self.meshes.is_empty() {
            return Render::None;
        }
        Render::Shadeds(
            self.meshes
                .iter()
                .map(|mesh| mesh.to_render(&self.camera.bind_group))
                .collect(),
        )
    }
}
