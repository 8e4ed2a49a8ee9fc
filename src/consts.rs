// Numeric codes shared with the classic fixed-function API so callers can
// substitute this crate for a minimal subset of it.

// Begin modes
pub const POINTS: u32 = 0x0000;
pub const LINES: u32 = 0x0001;
pub const TRIANGLES: u32 = 0x0004;
pub const QUADS: u32 = 0x0007;

// Errors
pub const NO_ERROR: u32 = 0x0000;
pub const INVALID_ENUM: u32 = 0x0500;
pub const INVALID_VALUE: u32 = 0x0501;
pub const INVALID_OPERATION: u32 = 0x0502;

// Capabilities
pub const DEPTH_TEST: u32 = 0x0B71;
pub const CULL_FACE: u32 = 0x0B44;
pub const TEXTURE_2D: u32 = 0x0DE1;

// Data types
pub const BYTE: u32 = 0x1400;
pub const FLOAT: u32 = 0x1406;

// Matrix modes
pub const MODELVIEW: u32 = 0x1700;
pub const PROJECTION: u32 = 0x1707;

// Pixel formats
pub const DEPTH_COMPONENT: u32 = 0x1902;
pub const RGB: u32 = 0x1907;
pub const RGBA: u32 = 0x1908;

// Console extension: pixel format, element type, and the exhaustive
// classifier capability.
pub const CONSOLE_PIXEL_FORMAT: u32 = 0x2000;
pub const CONSOLE_PIXEL: u32 = 0x1500;
pub const SLOW_COLOR: u32 = 0x0C00;

// Buffer bits
pub const DEPTH_BUFFER_BIT: u32 = 0x0100;
pub const COLOR_BUFFER_BIT: u32 = 0x0400;

// String names
pub const VENDOR: u32 = 0x0000;
pub const RENDERER: u32 = 0x0001;
pub const VERSION: u32 = 0x0002;
pub const EXTENSIONS: u32 = 0x0003;
