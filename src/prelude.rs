pub use crate::{
    classify::{classify_pixel, ConsoleCell},
    consts,
    context::Context,
    framebuffer::Framebuffer,
    readback::ReadbackTarget,
    texture::{TexelSource, Texture},
    types::Color,
};

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
