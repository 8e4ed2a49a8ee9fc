use std::mem;

use glam::{Mat4, Vec2, Vec3};

use crate::{
    consts,
    framebuffer::Framebuffer,
    pipeline::{self, BeginMode, PipelineParams},
    raster::{RasterState, Vertex},
    readback::{self, ReadbackTarget},
    texture::{TexelSource, Texture},
    types::Color,
};

const VENDOR_STRING: &str = "termgl";
const RENDERER_STRING: &str = "Software Based (Rust)";
const VERSION_STRING: &str = "OpenGL 1.1 TERM";
const EXTENSIONS_STRING: &str = "EXT_CON";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MatrixSel {
    ModelView,
    Projection,
}

// One rendering context. Intended to be owned by a single thread; nothing
// here is shared, and textures belong to the context that created them.
//
// Errors are latched, never returned: the first error since the last
// `get_error` sticks, later ones are dropped, and the offending call has no
// other observable effect.
pub struct Context {
    fb: Framebuffer,

    modelview: Mat4,
    projection: Mat4,
    matrix_sel: MatrixSel,

    err: u32,

    clear_color: Color,
    clear_depth: f32,

    begin_mode: Option<BeginMode>,
    latch_color: Color,
    latch_uv: Vec2,

    textures: Vec<Texture>,
    bound_texture: Option<usize>,

    depth_test: bool,
    cull_face: bool,
    texture_2d: bool,
    slow_color: bool,

    vertices: Vec<Vertex>,
}

impl Context {
    pub fn new(width: usize, height: usize) -> Self {
        let clear_color = Color::BLACK;
        Self {
            fb: Framebuffer::new(width, height, clear_color),
            modelview: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            matrix_sel: MatrixSel::ModelView,
            err: consts::NO_ERROR,
            clear_color,
            clear_depth: -1.0,
            begin_mode: None,
            latch_color: Color::WHITE,
            latch_uv: Vec2::ZERO,
            textures: Vec::new(),
            bound_texture: None,
            depth_test: false,
            cull_face: false,
            texture_2d: false,
            slow_color: false,
            vertices: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.fb.width()
    }

    pub fn height(&self) -> usize {
        self.fb.height()
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    fn latch(&mut self, code: u32) {
        if self.err == consts::NO_ERROR {
            self.err = code;
        }
    }

    // Most state changes are illegal between begin and end; they latch
    // INVALID_OPERATION and leave everything else untouched.
    fn deny_while_recording(&mut self) -> bool {
        if self.begin_mode.is_some() {
            self.latch(consts::INVALID_OPERATION);
            true
        } else {
            false
        }
    }

    pub fn get_error(&mut self) -> u32 {
        if self.begin_mode.is_some() {
            return consts::NO_ERROR;
        }
        mem::replace(&mut self.err, consts::NO_ERROR)
    }

    pub fn get_string(&mut self, name: u32) -> Option<&'static str> {
        match name {
            consts::VENDOR => Some(VENDOR_STRING),
            consts::RENDERER => Some(RENDERER_STRING),
            consts::VERSION => Some(VERSION_STRING),
            consts::EXTENSIONS => Some(EXTENSIONS_STRING),
            _ => {
                self.latch(consts::INVALID_ENUM);
                None
            }
        }
    }

    pub fn enable(&mut self, capability: u32) {
        self.set_capability(capability, true);
    }

    pub fn disable(&mut self, capability: u32) {
        self.set_capability(capability, false);
    }

    fn set_capability(&mut self, capability: u32, value: bool) {
        if self.deny_while_recording() {
            return;
        }
        match capability {
            consts::DEPTH_TEST => self.depth_test = value,
            consts::CULL_FACE => self.cull_face = value,
            consts::TEXTURE_2D => self.texture_2d = value,
            consts::SLOW_COLOR => self.slow_color = value,
            _ => self.latch(consts::INVALID_ENUM),
        }
    }

    pub fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        if self.deny_while_recording() {
            return;
        }
        self.clear_color = Color::new(r, g, b, a);
    }

    pub fn clear_depth(&mut self, depth: f32) {
        if self.deny_while_recording() {
            return;
        }
        self.clear_depth = depth;
    }

    pub fn clear(&mut self, mask: u32) {
        if self.deny_while_recording() {
            return;
        }
        if mask & !(consts::COLOR_BUFFER_BIT | consts::DEPTH_BUFFER_BIT) != 0 {
            self.latch(consts::INVALID_VALUE);
            return;
        }
        if mask & consts::COLOR_BUFFER_BIT != 0 {
            self.fb.fill_color(self.clear_color);
        }
        if mask & consts::DEPTH_BUFFER_BIT != 0 {
            self.fb.fill_depth(self.clear_depth);
        }
    }

    pub fn begin(&mut self, mode: u32) {
        if self.deny_while_recording() {
            return;
        }
        match BeginMode::from_code(mode) {
            Some(m) => {
                self.begin_mode = Some(m);
                self.vertices.clear();
            }
            None => self.latch(consts::INVALID_ENUM),
        }
    }

    pub fn end(&mut self) {
        let Some(mode) = self.begin_mode else {
            self.latch(consts::INVALID_OPERATION);
            return;
        };

        let mut vertices = mem::take(&mut self.vertices);
        let texture = if self.texture_2d {
            self.bound_texture.and_then(|i| self.textures.get(i))
        } else {
            None
        };

        pipeline::flush(
            mode,
            &mut vertices,
            &mut self.fb,
            PipelineParams {
                modelview: self.modelview,
                projection: self.projection,
                cull_face: self.cull_face,
                state: RasterState {
                    depth_test: self.depth_test,
                    texture,
                },
            },
        );

        vertices.clear();
        self.vertices = vertices;
        self.begin_mode = None;
    }

    // Color and texcoord latches may be set at any time and persist across
    // begin/end boundaries.
    pub fn color3(&mut self, r: f32, g: f32, b: f32) {
        self.latch_color = Color::new(r, g, b, 1.0);
    }

    pub fn color4(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.latch_color = Color::new(r, g, b, a);
    }

    pub fn texcoord(&mut self, u: f32, v: f32) {
        self.latch_uv = Vec2::new(u, v);
    }

    pub fn vertex3(&mut self, x: f32, y: f32, z: f32) {
        if self.begin_mode.is_none() {
            self.latch(consts::INVALID_OPERATION);
            return;
        }
        self.vertices.push(Vertex {
            pos: Vec3::new(x, y, z),
            uv: self.latch_uv,
            color: self.latch_color,
        });
    }

    pub fn vertex2(&mut self, x: f32, y: f32) {
        self.vertex3(x, y, 1.0);
    }

    pub fn matrix_mode(&mut self, mode: u32) {
        if self.deny_while_recording() {
            return;
        }
        match mode {
            consts::MODELVIEW => self.matrix_sel = MatrixSel::ModelView,
            consts::PROJECTION => self.matrix_sel = MatrixSel::Projection,
            _ => self.latch(consts::INVALID_ENUM),
        }
    }

    fn current_matrix_mut(&mut self) -> &mut Mat4 {
        match self.matrix_sel {
            MatrixSel::ModelView => &mut self.modelview,
            MatrixSel::Projection => &mut self.projection,
        }
    }

    pub fn load_identity(&mut self) {
        if self.deny_while_recording() {
            return;
        }
        *self.current_matrix_mut() = Mat4::IDENTITY;
    }

    pub fn translate(&mut self, offset: Vec3) {
        if self.deny_while_recording() {
            return;
        }
        let m = self.current_matrix_mut();
        *m = *m * Mat4::from_translation(offset);
    }

    pub fn scale(&mut self, factors: Vec3) {
        if self.deny_while_recording() {
            return;
        }
        let m = self.current_matrix_mut();
        *m = *m * Mat4::from_scale(factors);
    }

    pub fn rotate(&mut self, angle: f32, axis: Vec3) {
        if self.deny_while_recording() {
            return;
        }
        let rot = Mat4::from_axis_angle(axis.normalize_or_zero(), angle);
        let m = self.current_matrix_mut();
        *m = *m * rot;
    }

    pub fn perspective(&mut self, fov_y: f32, aspect: f32, near: f32, far: f32) {
        *self.current_matrix_mut() = Mat4::perspective_rh_gl(fov_y, aspect, near, far);
    }

    pub fn look_at(&mut self, eye: Vec3, center: Vec3, up: Vec3) {
        *self.current_matrix_mut() = Mat4::look_at_rh(eye, center, up);
    }

    // Ids handed out are 1-based; 0 always means "no texture".
    pub fn gen_textures(&mut self, count: i32) -> Vec<u32> {
        if self.deny_while_recording() {
            return Vec::new();
        }
        if count < 0 {
            self.latch(consts::INVALID_ENUM);
            return Vec::new();
        }
        let mut ids = Vec::with_capacity(count as usize);
        for _ in 0..count {
            self.textures.push(Texture::empty());
            ids.push(self.textures.len() as u32);
        }
        ids
    }

    pub fn bind_texture(&mut self, target: u32, id: u32) {
        if self.deny_while_recording() {
            return;
        }
        if target != consts::TEXTURE_2D {
            self.latch(consts::INVALID_ENUM);
            return;
        }
        if id == 0 {
            self.bound_texture = None;
            return;
        }
        let index = (id - 1) as usize;
        if index >= self.textures.len() {
            self.latch(consts::INVALID_VALUE);
            return;
        }
        self.bound_texture = Some(index);
    }

    pub fn tex_image_2d(&mut self, target: u32, width: i32, height: i32, data: TexelSource<'_>) {
        if self.deny_while_recording() {
            return;
        }
        if target != consts::TEXTURE_2D {
            self.latch(consts::INVALID_ENUM);
            return;
        }
        if width < 0 || height < 0 {
            self.latch(consts::INVALID_VALUE);
            return;
        }
        let Some(index) = self.bound_texture else {
            self.latch(consts::INVALID_OPERATION);
            return;
        };
        let (width, height) = (width as usize, height as usize);
        if data.texel_capacity() < width * height {
            self.latch(consts::INVALID_OPERATION);
            return;
        }
        self.textures[index].upload(width, height, data);
    }

    pub fn read_pixels(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        format: u32,
        dest: ReadbackTarget<'_>,
    ) {
        if self.deny_while_recording() {
            return;
        }
        if let Err(code) = readback::read_pixels(&self.fb, x, y, w, h, format, dest, self.slow_color)
        {
            self.latch(code);
        }
    }
}
