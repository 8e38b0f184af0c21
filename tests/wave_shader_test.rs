use wave_folio::{
    data_structures::geometry::PlaneGeometry,
    noise::simplex3,
    pipelines::{
        shader_material::MaterialUniforms,
        wave::{
            NOISE_AMP, NOISE_FREQ, WAVE_UV_SCALE, WaveUniforms, displace, sample_coords, texture_rows,
            wave_material,
        },
    },
};

fn field(time: f32) -> Vec<f32> {
    PlaneGeometry::default()
        .vertices()
        .iter()
        .map(|v| displace(v.position, time).1)
        .collect()
}

#[test]
fn noise_is_deterministic() {
    let points = [[0.0, 0.0, 0.0], [0.13, -0.27, 0.0], [12.5, 3.25, -7.75], [-0.4, 0.3, 0.0]];
    for p in points {
        assert_eq!(simplex3(p), simplex3(p));
    }
}

#[test]
fn noise_stays_in_range() {
    for i in 0..2000 {
        let t = i as f32 * 0.037;
        let p = [t.sin() * 11.0, (t * 1.7).cos() * 5.0, t * 0.5 - 20.0];
        let n = simplex3(p);
        assert!(n.is_finite());
        assert!(n.abs() <= 1.05, "simplex3({p:?}) = {n}");
    }
}

#[test]
fn noise_is_not_constant() {
    let a = simplex3([0.1, 0.2, 0.3]);
    let b = simplex3([1.4, -0.9, 0.3]);
    let c = simplex3([3.7, 2.2, -1.1]);
    assert!(a != b || b != c);
}

/// glsl-noise `simplex/3d` evaluated in single precision.
const SNOISE3_REFERENCE: [([f32; 3], f32); 5] = [
    ([0.0, 0.0, 0.0], -0.412_198_76),
    ([0.1, 0.2, 0.3], -0.475_501_8),
    ([-0.4, 0.3, 0.0], 0.108_268_77),
    ([-2.6, -1.3, -0.45], 0.548_811_6),
    ([0.5, 0.5, 0.5], -0.212_058_84),
];

#[test]
fn noise_matches_the_glsl_reference() {
    for (p, expected) in SNOISE3_REFERENCE {
        let n = simplex3(p);
        assert!((n - expected).abs() < 1e-4, "simplex3({p:?}) = {n}, expected {expected}");
    }
}

#[test]
fn displacement_matches_reference_values() {
    // (position, time, displaced z)
    let cases = [
        ([0.0, 0.0, 0.0], 0.0, -0.412_198_76 * NOISE_AMP),
        ([-0.2, 0.3, 0.0], 0.0, 0.108_268_77 * NOISE_AMP),
        ([-0.7, 0.3, 0.0], 1.0, 0.108_268_77 * NOISE_AMP),
        ([0.05, 0.2, 0.3], 0.0, 0.3 - 0.475_501_8 * NOISE_AMP),
    ];
    for (position, time, expected) in cases {
        let (displaced, wave) = displace(position, time);
        assert_eq!(&displaced[..2], &position[..2]);
        assert!((displaced[2] - expected).abs() < 1e-4, "{position:?} at {time}: {displaced:?}");
        assert_eq!(wave, displaced[2]);
    }
}

#[test]
fn displacement_only_moves_along_z() {
    let (p, _) = displace([0.1, -0.2, 0.0], 3.0);
    assert_eq!(p[0], 0.1);
    assert_eq!(p[1], -0.2);
    assert!(p[2].abs() <= NOISE_AMP * 1.05);
}

#[test]
fn time_changes_the_field() {
    assert_ne!(field(0.0), field(1.0));
    assert_eq!(field(1.0), field(1.0));
}

#[test]
fn sample_coords_shift_both_axes_by_the_same_amount() {
    let uv = [0.25, 0.75];
    for wave in [-0.3_f32, 0.0, 0.12, 0.4] {
        let [u, v] = sample_coords(uv, wave);
        assert_eq!(u, 0.25 + wave * WAVE_UV_SCALE);
        assert_eq!(v, 0.75 + wave * WAVE_UV_SCALE);
    }
    assert_eq!(sample_coords(uv, 0.0), uv);
}

/// Nearest texel at `uv` with wgpu's conventions: row 0 at `v = 0`, clamped
/// to the edge.
fn texel_at(img: &image::RgbaImage, [u, v]: [f32; 2]) -> image::Rgba<u8> {
    let pick = |c: f32, n: u32| ((c.clamp(0.0, 1.0) * n as f32) as u32).min(n - 1);
    *img.get_pixel(pick(u, img.width()), pick(v, img.height()))
}

fn artboard() -> image::DynamicImage {
    image::open("assets/Artboard.png").unwrap()
}

#[test]
fn uploaded_rows_put_the_top_of_the_artwork_at_the_top_of_the_plane() {
    let original = artboard().to_rgba8();
    let uploaded = texture_rows(&artboard()).to_rgba8();
    let (w, h) = original.dimensions();
    assert_eq!(uploaded.dimensions(), (w, h));
    for x in [0, w / 2, w - 1] {
        assert_eq!(uploaded.get_pixel(x, 0), original.get_pixel(x, h - 1));
        assert_eq!(uploaded.get_pixel(x, h - 1), original.get_pixel(x, 0));
    }

    let plane = PlaneGeometry::default();
    let vertices = plane.vertices();
    let top_left = vertices[0].tex_coords;
    let bottom_left = vertices[17 * 16].tex_coords;
    assert_eq!(texel_at(&uploaded, top_left), *original.get_pixel(0, 0));
    assert_eq!(texel_at(&uploaded, bottom_left), *original.get_pixel(0, h - 1));
}

#[test]
fn positive_wave_pulls_the_sample_towards_the_top_of_the_artwork() {
    let original = artboard().to_rgba8();
    let uploaded = texture_rows(&artboard()).to_rgba8();
    let h = original.height();

    // halfway down the artwork, shifted by a wave of 0.4
    let uv = [0.5, 0.5];
    let [u, v] = sample_coords(uv, 0.4);
    assert!(v > uv[1]);
    let row_from_top = h - 1 - ((v * h as f32) as u32).min(h - 1);
    assert!(row_from_top < h / 2);
    assert_eq!(
        texel_at(&uploaded, [u, v]),
        *original.get_pixel((u * original.width() as f32) as u32, row_from_top)
    );
}

#[test]
fn uniform_block_is_32_bytes() {
    assert_eq!(std::mem::size_of::<WaveUniforms>(), 32);
    let u = WaveUniforms::new(1.5, [1.0, 0.5, 0.25]);
    let bytes: &[u8] = bytemuck::bytes_of(&u);
    assert_eq!(&bytes[0..4], &1.5_f32.to_ne_bytes());
    assert_eq!(&bytes[16..20], &1.0_f32.to_ne_bytes());
    assert_eq!(&bytes[24..28], &0.25_f32.to_ne_bytes());
}

#[test]
fn material_declares_its_inputs() {
    let material = wave_material();
    assert_eq!(material.name(), "WaveShaderMaterial");
    assert_eq!(material.defaults().time, 0.0);
    assert_eq!(material.constant("NOISE_FREQ"), Some(NOISE_FREQ));
    assert_eq!(material.constant("NOISE_AMP"), Some(NOISE_AMP));
    assert_eq!(material.constant("WAVE_UV_SCALE"), Some(WAVE_UV_SCALE));
    assert_eq!(material.constant("missing"), None);

    for source in [material.vertex_source(), material.fragment_source()] {
        assert!(source.contains(WaveUniforms::WGSL_STRUCT));
        assert!(source.contains("uTexture"));
        assert!(source.contains("uSampler"));
    }
    assert!(material.vertex_source().contains("fn vs_main"));
    assert!(material.fragment_source().contains("fn fs_main"));
}

fn validate_wgsl(label: &str, source: &str) {
    let module = naga::front::wgsl::parse_str(source)
        .unwrap_or_else(|e| panic!("{label} does not parse:\n{}", e.emit_to_string(source)));
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .unwrap_or_else(|e| panic!("{label} does not validate: {e:?}"));
}

#[test]
fn wave_shaders_validate() {
    let material = wave_material();
    validate_wgsl("wave vertex stage", &material.vertex_source());
    validate_wgsl("wave fragment stage", &material.fragment_source());
}

#[test]
fn noise_module_validates_as_compute_shader() {
    let source = format!(
        "{}{}",
        include_str!("../src/pipelines/noise.wgsl"),
        include_str!("common/noise_eval.wgsl")
    );
    validate_wgsl("noise compute shader", &source);
}

#[test]
fn outline_shader_validates() {
    validate_wgsl(
        "outline shader",
        include_str!("../src/pipelines/outline.wgsl"),
    );
}
