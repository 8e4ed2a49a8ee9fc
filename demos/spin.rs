use termgl::consts;
use termgl::{
    term::{TerminalGuard, TerminalTarget},
    ConsoleCell, Context, TexelSource,
};

use crossterm::event::{self, Event, KeyCode};
use glam::Vec3;
use std::{
    io,
    time::{Duration, Instant},
};

fn main() -> io::Result<()> {
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 40));
    let width = cols as usize;
    let height = rows as usize;

    let _guard = TerminalGuard::new()?;
    let mut target = TerminalTarget::new(width, height);

    let mut gl = Context::new(width, height);
    gl.enable(consts::DEPTH_TEST);
    gl.enable(consts::CULL_FACE);
    gl.enable(consts::TEXTURE_2D);
    gl.clear_color(0.02, 0.02, 0.05, 1.0);
    gl.clear_depth(1.0);

    let ids = gl.gen_textures(1);
    gl.bind_texture(consts::TEXTURE_2D, ids[0]);
    let tex = checkerboard(8, 8);
    gl.tex_image_2d(consts::TEXTURE_2D, 8, 8, TexelSource::Bytes(&tex));

    gl.matrix_mode(consts::PROJECTION);
    // Console cells are roughly twice as tall as they are wide.
    let aspect = width as f32 / (height as f32 * 2.0);
    gl.perspective(60.0_f32.to_radians(), aspect, 0.1, 100.0);
    gl.matrix_mode(consts::MODELVIEW);

    let mut cells = vec![ConsoleCell::default(); width * height];
    let start = Instant::now();

    loop {
        if event::poll(Duration::from_millis(1))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => break,
                    _ => {}
                }
            }
        }

        let angle = start.elapsed().as_secs_f32();
        gl.look_at(Vec3::new(0.0, 1.2, 3.0), Vec3::ZERO, Vec3::Y);
        gl.rotate(angle, Vec3::new(0.3, 1.0, 0.0));

        gl.clear(consts::COLOR_BUFFER_BIT | consts::DEPTH_BUFFER_BIT);
        draw_cube(&mut gl, 0.75);

        gl.read_pixels(
            0,
            0,
            width as i32,
            height as i32,
            consts::CONSOLE_PIXEL_FORMAT,
            termgl::ReadbackTarget::Console(&mut cells),
        );
        target.present(&cells, width, height)?;

        std::thread::sleep(Duration::from_millis(16));
    }

    Ok(())
}

// Six quads wound counter-clockwise seen from outside, so back faces cull.
fn draw_cube(gl: &mut Context, s: f32) {
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([1.0, 0.3, 0.3], [[-s, -s, s], [s, -s, s], [s, s, s], [-s, s, s]]),
        ([0.3, 1.0, 0.3], [[s, -s, -s], [-s, -s, -s], [-s, s, -s], [s, s, -s]]),
        ([0.3, 0.3, 1.0], [[s, -s, s], [s, -s, -s], [s, s, -s], [s, s, s]]),
        ([1.0, 1.0, 0.3], [[-s, -s, -s], [-s, -s, s], [-s, s, s], [-s, s, -s]]),
        ([0.3, 1.0, 1.0], [[-s, s, s], [s, s, s], [s, s, -s], [-s, s, -s]]),
        ([1.0, 0.3, 1.0], [[-s, -s, -s], [s, -s, -s], [s, -s, s], [-s, -s, s]]),
    ];
    let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    gl.begin(consts::QUADS);
    for (color, corners) in faces {
        gl.color3(color[0], color[1], color[2]);
        for (corner, uv) in corners.iter().zip(uvs) {
            gl.texcoord(uv[0], uv[1]);
            gl.vertex3(corner[0], corner[1], corner[2]);
        }
    }
    gl.end();
}

fn checkerboard(width: usize, height: usize) -> Vec<u8> {
    let mut data = vec![0u8; width * height * 4];
    for y in 0..height {
        for x in 0..width {
            let on = (x + y) % 2 == 0;
            let v = if on { 255 } else { 96 };
            let i = (x + y * width) * 4;
            data[i] = v;
            data[i + 1] = v;
            data[i + 2] = v;
            data[i + 3] = 255;
        }
    }
    data
}
