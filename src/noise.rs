//! CPU reference of the 3D simplex noise used by the wave vertex shader.
//!
//! This is the Ashima Arts / Stefan Gustavson formulation shipped by the
//! glsl-noise package (`simplex/3d`). The WGSL port in
//! `pipelines/noise.wgsl` follows it line by line, so the CPU version can
//! be used to reason about (and test) what the GPU computes per vertex.

fn mod289(x: f32) -> f32 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn permute(x: f32) -> f32 {
    mod289((x * 34.0 + 1.0) * x)
}

fn taylor_inv_sqrt(r: f32) -> f32 {
    1.792_842_9 - 0.853_734_7 * r
}

/// GLSL `step(edge, x)`.
fn step(edge: f32, x: f32) -> f32 {
    if x < edge { 0.0 } else { 1.0 }
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// 3D simplex noise, roughly in `[-1, 1]`.
pub fn simplex3(v: [f32; 3]) -> f32 {
    const C: [f32; 2] = [1.0 / 6.0, 1.0 / 3.0];

    // First corner
    let skew = (v[0] + v[1] + v[2]) * C[1];
    let mut i = v.map(|c| (c + skew).floor());
    let unskew = (i[0] + i[1] + i[2]) * C[0];
    let x0 = [v[0] - i[0] + unskew, v[1] - i[1] + unskew, v[2] - i[2] + unskew];

    // Other corners
    let g = [step(x0[1], x0[0]), step(x0[2], x0[1]), step(x0[0], x0[2])];
    let l = g.map(|c| 1.0 - c);
    // l.zxy
    let l_zxy = [l[2], l[0], l[1]];
    let i1 = [g[0].min(l_zxy[0]), g[1].min(l_zxy[1]), g[2].min(l_zxy[2])];
    let i2 = [g[0].max(l_zxy[0]), g[1].max(l_zxy[1]), g[2].max(l_zxy[2])];

    let x1 = [0, 1, 2].map(|k| x0[k] - i1[k] + C[0]);
    let x2 = [0, 1, 2].map(|k| x0[k] - i2[k] + C[1]);
    let x3 = [0, 1, 2].map(|k| x0[k] - 0.5);

    // Permutations
    i = i.map(mod289);
    let p: [f32; 4] = {
        let z = [0.0, i1[2], i2[2], 1.0].map(|o| permute(i[2] + o));
        let y = [0.0, i1[1], i2[1], 1.0];
        let y = [0, 1, 2, 3].map(|k| permute(z[k] + i[1] + y[k]));
        let x = [0.0, i1[0], i2[0], 1.0];
        [0, 1, 2, 3].map(|k| permute(y[k] + i[0] + x[k]))
    };

    // Gradients: 7x7 points over a square, mapped onto an octahedron.
    // The ring size 17*17 = 289 is close to a multiple of 49 (49*6 = 294)
    let n_ = 0.142_857_14_f32;
    let ns = [n_ * 2.0, n_ * 0.5 - 1.0, n_];

    let j = p.map(|p| p - 49.0 * (p * ns[2] * ns[2]).floor());
    let x_ = j.map(|j| (j * ns[2]).floor());
    let y_ = [0, 1, 2, 3].map(|k| (j[k] - 7.0 * x_[k]).floor());

    let x = x_.map(|c| c * ns[0] + ns[1]);
    let y = y_.map(|c| c * ns[0] + ns[1]);
    let h = [0, 1, 2, 3].map(|k| 1.0 - x[k].abs() - y[k].abs());

    let b0 = [x[0], x[1], y[0], y[1]];
    let b1 = [x[2], x[3], y[2], y[3]];

    let s0 = b0.map(|c| c.floor() * 2.0 + 1.0);
    let s1 = b1.map(|c| c.floor() * 2.0 + 1.0);
    let sh = h.map(|c| -step(c, 0.0));

    // a0 = b0.xzyw + s0.xzyw * sh.xxyy
    let a0 = [
        b0[0] + s0[0] * sh[0],
        b0[2] + s0[2] * sh[0],
        b0[1] + s0[1] * sh[1],
        b0[3] + s0[3] * sh[1],
    ];
    // a1 = b1.xzyw + s1.xzyw * sh.zzww
    let a1 = [
        b1[0] + s1[0] * sh[2],
        b1[2] + s1[2] * sh[2],
        b1[1] + s1[1] * sh[3],
        b1[3] + s1[3] * sh[3],
    ];

    let mut p0 = [a0[0], a0[1], h[0]];
    let mut p1 = [a0[2], a0[3], h[1]];
    let mut p2 = [a1[0], a1[1], h[2]];
    let mut p3 = [a1[2], a1[3], h[3]];

    // Normalise gradients
    let norm = [dot(p0, p0), dot(p1, p1), dot(p2, p2), dot(p3, p3)].map(taylor_inv_sqrt);
    p0 = p0.map(|c| c * norm[0]);
    p1 = p1.map(|c| c * norm[1]);
    p2 = p2.map(|c| c * norm[2]);
    p3 = p3.map(|c| c * norm[3]);

    // Mix final noise value
    let m = [dot(x0, x0), dot(x1, x1), dot(x2, x2), dot(x3, x3)].map(|d| {
        let m = (0.6 - d).max(0.0);
        let m = m * m;
        m * m
    });
    42.0 * (m[0] * dot(p0, x0) + m[1] * dot(p1, x1) + m[2] * dot(p2, x2) + m[3] * dot(p3, x3))
}
