use glam::Vec3;

use crate::{
    consts,
    framebuffer::Framebuffer,
    raster::{self, RasterState, Vertex},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BeginMode {
    Points,
    Lines,
    Triangles,
    Quads,
}

impl BeginMode {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            consts::POINTS => Some(BeginMode::Points),
            consts::LINES => Some(BeginMode::Lines),
            consts::TRIANGLES => Some(BeginMode::Triangles),
            consts::QUADS => Some(BeginMode::Quads),
            _ => None,
        }
    }

    fn face_arity(self) -> Option<usize> {
        match self {
            BeginMode::Triangles => Some(3),
            BeginMode::Quads => Some(4),
            BeginMode::Points | BeginMode::Lines => None,
        }
    }
}

pub(crate) struct PipelineParams<'a> {
    pub modelview: glam::Mat4,
    pub projection: glam::Mat4,
    pub cull_face: bool,
    pub state: RasterState<'a>,
}

// The end-of-recording pipeline: modelview transform, per-face visibility,
// projection with perspective divide, viewport map, primitive dispatch.
// Trailing vertices that do not fill a primitive are dropped.
pub(crate) fn flush(
    mode: BeginMode,
    vertices: &mut [Vertex],
    fb: &mut Framebuffer,
    params: PipelineParams<'_>,
) {
    for v in vertices.iter_mut() {
        v.pos = (params.modelview * v.pos.extend(1.0)).truncate();
    }

    let face_visible = if params.cull_face {
        face_visibility(mode, vertices)
    } else {
        Vec::new()
    };

    let w = fb.width() as f32;
    let h = fb.height() as f32;
    for v in vertices.iter_mut() {
        let clip = params.projection * v.pos.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        v.pos = Vec3::new(
            (ndc.x + 1.0) / 2.0 * w,
            (1.0 - ndc.y) / 2.0 * h,
            ndc.z,
        );
    }

    let st = params.state;
    match mode {
        BeginMode::Points => {
            for v in vertices.iter() {
                raster::draw_point(fb, &st, v);
            }
        }
        BeginMode::Lines => {
            for pair in vertices.chunks_exact(2) {
                raster::draw_line(fb, &st, &pair[0], &pair[1]);
            }
        }
        BeginMode::Triangles => {
            for (i, tri) in vertices.chunks_exact(3).enumerate() {
                if params.cull_face && !face_visible.get(i).copied().unwrap_or(true) {
                    continue;
                }
                raster::draw_triangle(fb, &st, &tri[0], &tri[1], &tri[2]);
            }
        }
        BeginMode::Quads => {
            for (i, quad) in vertices.chunks_exact(4).enumerate() {
                if params.cull_face && !face_visible.get(i).copied().unwrap_or(true) {
                    continue;
                }
                raster::draw_quad(fb, &st, &quad[0], &quad[1], &quad[2], &quad[3]);
            }
        }
    }
}

// A face survives culling when dot(cross(v0-v1, v0-v2), v0) <= 0 in eye
// space. Computed per face leader; points and lines never cull.
fn face_visibility(mode: BeginMode, vertices: &[Vertex]) -> Vec<bool> {
    let Some(arity) = mode.face_arity() else {
        return Vec::new();
    };
    vertices
        .chunks_exact(arity)
        .map(|face| {
            let side1 = face[0].pos - face[1].pos;
            let side2 = face[0].pos - face[2].pos;
            let normal = side1.cross(side2);
            normal.dot(face[0].pos) <= 0.0
        })
        .collect()
}
