use glam::Vec2;

use crate::types::Color;

// Texel upload layouts: 4 channels per texel, 8-bit in [0,255] or float
// in [0,1], R,G,B,A order.
#[derive(Clone, Copy, Debug)]
pub enum TexelSource<'a> {
    Bytes(&'a [u8]),
    Floats(&'a [f32]),
}

impl TexelSource<'_> {
    pub fn texel_capacity(&self) -> usize {
        match self {
            TexelSource::Bytes(data) => data.len() / 4,
            TexelSource::Floats(data) => data.len() / 4,
        }
    }

    fn texel(&self, i: usize) -> Color {
        match self {
            TexelSource::Bytes(data) => Color::from_bytes(
                data[i * 4],
                data[i * 4 + 1],
                data[i * 4 + 2],
                data[i * 4 + 3],
            ),
            TexelSource::Floats(data) => Color::new(
                data[i * 4],
                data[i * 4 + 1],
                data[i * 4 + 2],
                data[i * 4 + 3],
            ),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Texture {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub(crate) fn upload(&mut self, width: usize, height: usize, data: TexelSource<'_>) {
        let len = width * height;
        self.pixels.clear();
        self.pixels.reserve(len);
        for i in 0..len {
            self.pixels.push(data.texel(i));
        }
        self.width = width;
        self.height = height;
    }

    // Nearest texel with wrap-repeat. The remainder follows the sign of the
    // divisor, so negative coordinates wrap back into range.
    pub fn sample_nearest(&self, uv: Vec2) -> Color {
        if self.width == 0 || self.height == 0 {
            return Color::WHITE;
        }

        let w = self.width as i64;
        let h = self.height as i64;
        let tx = ((uv.x * self.width as f32).floor() as i64).rem_euclid(w);
        let ty = ((uv.y * self.height as f32).floor() as i64).rem_euclid(h);

        self.pixels[(tx + ty * w) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::{TexelSource, Texture};
    use crate::types::Color;
    use glam::Vec2;

    #[test]
    fn upload_bytes_populates_row_major() {
        let mut t = Texture::empty();
        let data: [u8; 16] = [
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            0, 0, 255, 255, //
            255, 255, 255, 255,
        ];
        t.upload(2, 2, TexelSource::Bytes(&data));
        assert_eq!(t.width(), 2);
        assert_eq!(t.height(), 2);
        assert_eq!(t.sample_nearest(Vec2::new(0.0, 0.0)).r, 1.0);
        assert_eq!(t.sample_nearest(Vec2::new(0.5, 0.0)).g, 1.0);
        assert_eq!(t.sample_nearest(Vec2::new(0.0, 0.5)).b, 1.0);
    }

    #[test]
    fn upload_floats_clamps_channels() {
        let mut t = Texture::empty();
        let data: [f32; 4] = [1.5, -0.5, 0.25, 1.0];
        t.upload(1, 1, TexelSource::Floats(&data));
        let c = t.sample_nearest(Vec2::ZERO);
        assert_eq!(c, Color::new(1.0, 0.0, 0.25, 1.0));
    }

    #[test]
    fn negative_uv_wraps_toward_positive_indices() {
        let mut t = Texture::empty();
        // 4x1 strip: red, green, blue, white.
        let data: [u8; 16] = [
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            0, 0, 255, 255, //
            255, 255, 255, 255,
        ];
        t.upload(4, 1, TexelSource::Bytes(&data));
        // u = -0.25 maps to texel floor(-1.0).rem_euclid(4) = 3.
        let c = t.sample_nearest(Vec2::new(-0.25, 0.0));
        assert_eq!(c, Color::from_bytes(255, 255, 255, 255));
    }

    #[test]
    fn empty_texture_samples_white() {
        let t = Texture::empty();
        assert_eq!(t.sample_nearest(Vec2::new(0.3, 0.7)), Color::WHITE);
    }
}
