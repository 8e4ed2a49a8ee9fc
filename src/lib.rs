#![forbid(unsafe_code)]

pub mod classify;
pub mod consts;
pub mod context;
pub mod framebuffer;
pub mod prelude;
pub mod readback;
#[cfg(feature = "terminal")]
pub mod term;
pub mod texture;
pub mod types;

mod pipeline;
mod raster;

pub use crate::{
    classify::ConsoleCell,
    context::Context,
    framebuffer::Framebuffer,
    readback::ReadbackTarget,
    texture::{TexelSource, Texture},
    types::Color,
};
