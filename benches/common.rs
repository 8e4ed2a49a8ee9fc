use termgl::consts;
use termgl::{Context, TexelSource};

use glam::Vec3;

pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 180;

pub fn make_context() -> Context {
    let mut gl = Context::new(WIDTH, HEIGHT);
    gl.clear_depth(1.0);

    let ids = gl.gen_textures(1);
    gl.bind_texture(consts::TEXTURE_2D, ids[0]);
    let tex = checkerboard(16, 16);
    gl.tex_image_2d(consts::TEXTURE_2D, 16, 16, TexelSource::Bytes(&tex));

    gl.matrix_mode(consts::PROJECTION);
    gl.perspective(60.0_f32.to_radians(), WIDTH as f32 / HEIGHT as f32, 0.1, 100.0);
    gl.matrix_mode(consts::MODELVIEW);
    gl.look_at(Vec3::new(0.0, 1.5, 4.5), Vec3::ZERO, Vec3::Y);

    gl
}

// A small grid of textured quads, enough raster work to be non-trivial but
// stable from run to run.
pub fn draw_scene(gl: &mut Context) {
    gl.enable(consts::DEPTH_TEST);
    gl.enable(consts::TEXTURE_2D);
    gl.clear(consts::COLOR_BUFFER_BIT | consts::DEPTH_BUFFER_BIT);

    gl.begin(consts::QUADS);
    let grid = 4i32;
    for gy in 0..grid {
        for gx in 0..grid {
            let cx = (gx as f32 - (grid as f32 - 1.0) * 0.5) * 1.1;
            let cy = (gy as f32 - (grid as f32 - 1.0) * 0.5) * 1.1;
            let hue = (gx + gy * grid) as f32 / (grid * grid) as f32;
            gl.color3(hue, 1.0 - hue, 0.5);

            gl.texcoord(0.0, 0.0);
            gl.vertex3(cx - 0.5, cy - 0.5, -1.0);
            gl.texcoord(1.0, 0.0);
            gl.vertex3(cx + 0.5, cy - 0.5, -1.0);
            gl.texcoord(1.0, 1.0);
            gl.vertex3(cx + 0.5, cy + 0.5, -1.0);
            gl.texcoord(0.0, 1.0);
            gl.vertex3(cx - 0.5, cy + 0.5, -1.0);
        }
    }
    gl.end();
}

fn checkerboard(width: usize, height: usize) -> Vec<u8> {
    let mut data = vec![0u8; width * height * 4];
    for y in 0..height {
        for x in 0..width {
            let on = (x / 4 + y / 4) % 2 == 0;
            let v = if on { 255 } else { 64 };
            let i = (x + y * width) * 4;
            data[i] = v;
            data[i + 1] = v;
            data[i + 2] = 255 - v;
            data[i + 3] = 255;
        }
    }
    data
}
