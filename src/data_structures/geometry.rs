//! Subdivided plane geometry.
//!
//! The plane lies in the XY plane centred on the origin and faces +Z. Vertices
//! are laid out row by row starting at the top-left corner; each grid cell is
//! split into two counter-clockwise triangles.

use wgpu::util::DeviceExt;

use crate::config::PlaneConfig;

/// Vertex layout consumed by the wave material.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WaveVertex {
    pub position: [f32; 3],
    /// Texture space coordinates, (0, 0) is the top-left texel.
    pub tex_coords: [f32; 2],
}

impl WaveVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<WaveVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// CPU side description of the plane. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneGeometry {
    config: PlaneConfig,
    vertices: Vec<WaveVertex>,
    indices: Vec<u32>,
}

impl PlaneGeometry {
    pub fn new(config: PlaneConfig) -> Self {
        // A plane needs at least one cell in each direction.
        let grid_x = config.width_segments.max(1);
        let grid_y = config.height_segments.max(1);
        let config = PlaneConfig {
            width_segments: grid_x,
            height_segments: grid_y,
            ..config
        };

        let half_w = config.width / 2.0;
        let half_h = config.height / 2.0;
        let segment_w = config.width / grid_x as f32;
        let segment_h = config.height / grid_y as f32;

        let vertices = (0..=grid_y)
            .flat_map(|iy| {
                (0..=grid_x).map(move |ix| WaveVertex {
                    position: [
                        ix as f32 * segment_w - half_w,
                        half_h - iy as f32 * segment_h,
                        0.0,
                    ],
                    // v grows upward, like the plane's y
                    tex_coords: [ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32],
                })
            })
            .collect();

        let row = grid_x + 1;
        let indices = (0..grid_y)
            .flat_map(|iy| {
                (0..grid_x).flat_map(move |ix| {
                    let a = ix + row * iy;
                    let b = ix + row * (iy + 1);
                    let c = (ix + 1) + row * (iy + 1);
                    let d = (ix + 1) + row * iy;
                    [a, b, d, b, c, d]
                })
            })
            .collect();

        Self {
            config,
            vertices,
            indices,
        }
    }

    pub fn config(&self) -> &PlaneConfig {
        &self.config
    }

    pub fn vertices(&self) -> &[WaveVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Upload to immutable vertex and index buffers.
    pub fn to_buffers(&self, device: &wgpu::Device, label: &str) -> GeometryBuffers {
        let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        GeometryBuffers {
            vertex,
            index,
            num_indices: self.indices.len() as u32,
            num_vertices: self.vertices.len() as u32,
        }
    }
}

impl Default for PlaneGeometry {
    fn default() -> Self {
        Self::new(PlaneConfig::default())
    }
}

/// GPU copy of a [`PlaneGeometry`]. Buffers carry no `COPY_DST` usage so they
/// cannot change after upload.
#[derive(Debug)]
pub struct GeometryBuffers {
    pub vertex: wgpu::Buffer,
    pub index: wgpu::Buffer,
    pub num_indices: u32,
    pub num_vertices: u32,
}
