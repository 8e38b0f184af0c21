#![cfg(feature = "integration-tests")]

use std::time::Duration;

use wave_folio::{data_structures::geometry::PlaneGeometry, noise::simplex3, pipelines::wave::NOISE_FREQ};
use wgpu::util::DeviceExt;

async fn device() -> (wgpu::Device, wgpu::Queue) {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    });
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions::default())
        .await
        .expect("Failed to find an adapter for the noise test.");
    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("noise test device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            trace: wgpu::Trace::Off,
        })
        .await
        .expect("Failed to open the device for the noise test.")
}

/// Run the shader's `snoise3` on the GPU for every point.
async fn gpu_snoise3(points: &[[f32; 3]]) -> Vec<f32> {
    let (device, queue) = device().await;

    let source = format!(
        "{}{}",
        include_str!("../src/pipelines/noise.wgsl"),
        include_str!("common/noise_eval.wgsl")
    );
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("noise eval shader"),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
        label: Some("noise eval pipeline"),
        layout: None,
        module: &module,
        entry_point: Some("cs_main"),
        compilation_options: Default::default(),
        cache: None,
    });

    let padded: Vec<[f32; 4]> = points.iter().map(|&[x, y, z]| [x, y, z, 0.0]).collect();
    let input = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("noise points"),
        contents: bytemuck::cast_slice(&padded),
        usage: wgpu::BufferUsages::STORAGE,
    });
    let size = (points.len() * std::mem::size_of::<f32>()) as wgpu::BufferAddress;
    let output = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("noise values"),
        size,
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
        mapped_at_creation: false,
    });
    let readback = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("noise readback"),
        size,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("noise eval bind group"),
        layout: &pipeline.get_bind_group_layout(0),
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: input.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: output.as_entire_binding(),
            },
        ],
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("noise eval encoder"),
    });
    {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("noise eval pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.dispatch_workgroups(points.len() as u32, 1, 1);
    }
    encoder.copy_buffer_to_buffer(&output, 0, &readback, 0, size);
    queue.submit(std::iter::once(encoder.finish()));

    let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
    let slice = readback.slice(..);
    slice.map_async(wgpu::MapMode::Read, move |result| {
        tx.send(result).unwrap();
    });
    device
        .poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: Some(Duration::from_secs(3)),
        })
        .unwrap();
    rx.receive().await.unwrap().unwrap();
    let data = slice.get_mapped_range();
    bytemuck::cast_slice::<u8, f32>(&data).to_vec()
}

#[tokio::test]
async fn shader_noise_agrees_with_the_cpu_noise() {
    let mut points = vec![
        [0.0, 0.0, 0.0],
        [0.1, 0.2, 0.3],
        [-0.4, 0.3, 0.0],
        [-2.6, -1.3, -0.45],
        [0.5, 0.5, 0.5],
    ];
    // the inputs the vertex stage sees for the default plane at t = 0 and 1
    for time in [0.0_f32, 1.0] {
        points.extend(
            PlaneGeometry::default()
                .vertices()
                .iter()
                .map(|v| [v.position[0] * NOISE_FREQ + time, v.position[1], v.position[2]]),
        );
    }

    let gpu = gpu_snoise3(&points).await;
    assert_eq!(gpu.len(), points.len());
    for (p, g) in points.iter().zip(gpu) {
        let cpu = simplex3(*p);
        assert!((cpu - g).abs() < 5e-3, "snoise3({p:?}): gpu {g}, cpu {cpu}");
    }
}
