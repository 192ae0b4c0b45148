use glam::Vec3;
use rand::Rng;

/// Flat per-particle buffers ready for upload.
///
/// `positions[3*i..3*i+3]` and `colors[3*i..3*i+3]` both describe particle `i`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleField {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
}

impl ParticleField {
    /// Sample `count` particles uniformly inside a box of size `extent`
    /// centred on the origin, each colored `lerp(color_a, color_b, u)` with
    /// its own uniform `u`.
    pub fn generate<R: Rng + ?Sized>(
        count: usize,
        extent: Vec3,
        color_a: [f32; 3],
        color_b: [f32; 3],
        rng: &mut R,
    ) -> Self {
        let mut positions = Vec::with_capacity(count * 3);
        let mut colors = Vec::with_capacity(count * 3);
        let a = Vec3::from_array(color_a);
        let b = Vec3::from_array(color_b);
        for _ in 0..count {
            positions.push((rng.gen::<f32>() - 0.5) * extent.x);
            positions.push((rng.gen::<f32>() - 0.5) * extent.y);
            positions.push((rng.gen::<f32>() - 0.5) * extent.z);

            let u: f32 = rng.gen();
            let c = a.lerp(b, u).clamp(Vec3::ZERO, Vec3::ONE);
            colors.extend_from_slice(&c.to_array());
        }
        Self { positions, colors }
    }

    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[3 * i..3 * i + 3])
    }

    pub fn color(&self, i: usize) -> [f32; 3] {
        [self.colors[3 * i], self.colors[3 * i + 1], self.colors[3 * i + 2]]
    }
}

/// Convert a packed sRGB `0xRRGGBB` color to linear-light components.
pub fn srgb_hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}
