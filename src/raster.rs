use glam::{Vec2, Vec3};

use crate::{framebuffer::Framebuffer, texture::Texture, types::Color};

#[derive(Clone, Copy, Debug)]
pub(crate) struct Vertex {
    pub pos: Vec3,
    pub uv: Vec2,
    pub color: Color,
}

pub(crate) struct RasterState<'a> {
    pub depth_test: bool,
    pub texture: Option<&'a Texture>,
}

fn shade(fb: &mut Framebuffer, st: &RasterState<'_>, o: i64, z: f32, color: Color, uv: Vec2) {
    let frag = match st.texture {
        Some(tex) => color.modulate(tex.sample_nearest(uv)),
        None => color,
    };
    fb.plot(o, z, st.depth_test, frag);
}

pub(crate) fn draw_point(fb: &mut Framebuffer, st: &RasterState<'_>, v: &Vertex) {
    let x = v.pos.x.floor() as i64;
    let y = v.pos.y.floor() as i64;
    let o = x + y * fb.width() as i64;
    shade(fb, st, o, v.pos.z, v.color, v.uv);
}

// Perspective-correct blend of two endpoints with weights (t, 1-t). When a
// depth is zero the reciprocal sum degenerates; interpolation then falls
// back to the plain screen-space blend.
fn interpolate_pair(a: &Vertex, b: &Vertex, t: f32) -> (f32, Color, Vec2) {
    let u = 1.0 - t;
    let denom = t / a.pos.z + u / b.pos.z;
    if denom.is_finite() && denom != 0.0 {
        let z = 1.0 / denom;
        let mix = |av: f32, bv: f32| (t * av / a.pos.z + u * bv / b.pos.z) * z;
        let color = Color {
            r: mix(a.color.r, b.color.r),
            g: mix(a.color.g, b.color.g),
            b: mix(a.color.b, b.color.b),
            a: mix(a.color.a, b.color.a),
        };
        let uv = Vec2::new(mix(a.uv.x, b.uv.x), mix(a.uv.y, b.uv.y));
        (z, color, uv)
    } else {
        let mix = |av: f32, bv: f32| t * av + u * bv;
        let color = Color {
            r: mix(a.color.r, b.color.r),
            g: mix(a.color.g, b.color.g),
            b: mix(a.color.b, b.color.b),
            a: mix(a.color.a, b.color.a),
        };
        let uv = Vec2::new(mix(a.uv.x, b.uv.x), mix(a.uv.y, b.uv.y));
        (mix(a.pos.z, b.pos.z), color, uv)
    }
}

pub(crate) fn draw_line(fb: &mut Framebuffer, st: &RasterState<'_>, a: &Vertex, b: &Vertex) {
    let x1 = a.pos.x.floor() as i64;
    let y1 = a.pos.y.floor() as i64;
    let x2 = b.pos.x.ceil() as i64;
    let y2 = b.pos.y.ceil() as i64;

    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx - dy;

    let total = dx.max(dy);
    let w = fb.width() as i64;

    let (mut x, mut y) = (x1, y1);
    loop {
        // Weight of the first endpoint is the fraction of the dominant
        // axis still ahead of us.
        let t = if total == 0 {
            1.0
        } else {
            let remaining = if dx > dy { x2 - x } else { y2 - y };
            remaining.abs() as f32 / total as f32
        };

        let (z, color, uv) = interpolate_pair(a, b, t);
        shade(fb, st, x + y * w, z, color, uv);

        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

fn interpolate_tri(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    l0: f32,
    l1: f32,
    l2: f32,
) -> (f32, Color, Vec2) {
    let denom = l0 / v0.pos.z + l1 / v1.pos.z + l2 / v2.pos.z;
    if denom.is_finite() && denom != 0.0 {
        let z = 1.0 / denom;
        let mix =
            |a: f32, b: f32, c: f32| (l0 * a / v0.pos.z + l1 * b / v1.pos.z + l2 * c / v2.pos.z) * z;
        let color = Color {
            r: mix(v0.color.r, v1.color.r, v2.color.r),
            g: mix(v0.color.g, v1.color.g, v2.color.g),
            b: mix(v0.color.b, v1.color.b, v2.color.b),
            a: mix(v0.color.a, v1.color.a, v2.color.a),
        };
        let uv = Vec2::new(mix(v0.uv.x, v1.uv.x, v2.uv.x), mix(v0.uv.y, v1.uv.y, v2.uv.y));
        (z, color, uv)
    } else {
        // Degenerate depths: blend affinely in screen space.
        let mix = |a: f32, b: f32, c: f32| l0 * a + l1 * b + l2 * c;
        let color = Color {
            r: mix(v0.color.r, v1.color.r, v2.color.r),
            g: mix(v0.color.g, v1.color.g, v2.color.g),
            b: mix(v0.color.b, v1.color.b, v2.color.b),
            a: mix(v0.color.a, v1.color.a, v2.color.a),
        };
        let uv = Vec2::new(mix(v0.uv.x, v1.uv.x, v2.uv.x), mix(v0.uv.y, v1.uv.y, v2.uv.y));
        (mix(v0.pos.z, v1.pos.z, v2.pos.z), color, uv)
    }
}

// Bounding-box scan over the integer floors of the projected positions.
// The barycentric test is inclusive: a weight of exactly 0 or 1 still
// covers the pixel.
pub(crate) fn draw_triangle(
    fb: &mut Framebuffer,
    st: &RasterState<'_>,
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
) {
    let x1 = v0.pos.x.floor() as i64;
    let x2 = v1.pos.x.floor() as i64;
    let x3 = v2.pos.x.floor() as i64;
    let y1 = v0.pos.y.floor() as i64;
    let y2 = v1.pos.y.floor() as i64;
    let y3 = v2.pos.y.floor() as i64;

    let min_x = x1.min(x2).min(x3);
    let min_y = y1.min(y2).min(y3);
    let max_x = x1.max(x2).max(x3);
    let max_y = y1.max(y2).max(y3);

    let denom = ((y2 - y3) * (x1 - x3) + (x3 - x2) * (y1 - y3)) as f32;
    if denom == 0.0 {
        return;
    }
    let factor = 1.0 / denom;

    let w = fb.width() as i64;
    for x in min_x..=max_x {
        for y in min_y..=max_y {
            let l0 = ((y2 - y3) * (x - x3) + (x3 - x2) * (y - y3)) as f32 * factor;
            if !(0.0..=1.0).contains(&l0) {
                continue;
            }
            let l1 = ((y3 - y1) * (x - x3) + (x1 - x3) * (y - y3)) as f32 * factor;
            if !(0.0..=1.0).contains(&l1) {
                continue;
            }
            let l2 = 1.0 - l0 - l1;
            if !(0.0..=1.0).contains(&l2) {
                continue;
            }

            let (z, color, uv) = interpolate_tri(v0, v1, v2, l0, l1, l2);
            shade(fb, st, x + y * w, z, color, uv);
        }
    }
}

// A quad is two triangles sharing the v2-v0 diagonal; pixels on the shared
// edge may be written by both, second write winning.
pub(crate) fn draw_quad(
    fb: &mut Framebuffer,
    st: &RasterState<'_>,
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    v3: &Vertex,
) {
    draw_triangle(fb, st, v0, v1, v2);
    draw_triangle(fb, st, v2, v3, v0);
}
