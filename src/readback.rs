use crate::{
    classify::{classify_pixel, ConsoleCell},
    consts,
    framebuffer::Framebuffer,
    types::color::channel_to_u8,
};

// Readback destinations. The classic (type, pointer) pair becomes a tagged
// slice; the element type is implied by the variant, and format/destination
// mismatches are caught at runtime.
#[derive(Debug)]
pub enum ReadbackTarget<'a> {
    Bytes(&'a mut [u8]),
    Floats(&'a mut [f32]),
    Console(&'a mut [ConsoleCell]),
}

impl ReadbackTarget<'_> {
    fn is_console(&self) -> bool {
        matches!(self, ReadbackTarget::Console(_))
    }

    fn capacity(&self) -> usize {
        match self {
            ReadbackTarget::Bytes(d) => d.len(),
            ReadbackTarget::Floats(d) => d.len(),
            ReadbackTarget::Console(d) => d.len(),
        }
    }
}

// Copies the requested rect, clamped against the framebuffer, into `dest`.
// The destination is addressed with the requested rect's stride, so pixels
// that fall outside the framebuffer leave their slots untouched.
pub(crate) fn read_pixels(
    fb: &Framebuffer,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    format: u32,
    dest: ReadbackTarget<'_>,
    slow_classifier: bool,
) -> Result<(), u32> {
    let channels = match format {
        consts::RGBA => 4,
        consts::RGB => 3,
        consts::DEPTH_COMPONENT => 1,
        consts::CONSOLE_PIXEL_FORMAT => 1,
        _ => return Err(consts::INVALID_ENUM),
    };

    if (format == consts::CONSOLE_PIXEL_FORMAT) != dest.is_console() {
        return Err(consts::INVALID_OPERATION);
    }

    if w <= 0 || h <= 0 {
        return Err(consts::INVALID_VALUE);
    }

    let (w, h) = (w as usize, h as usize);
    if dest.capacity() < w * h * channels {
        return Err(consts::INVALID_OPERATION);
    }

    match dest {
        ReadbackTarget::Bytes(out) => {
            for_each_src(fb, x, y, w, h, |src, di| {
                let base = di * channels;
                match format {
                    consts::RGBA => {
                        let c = fb.color_slice()[src];
                        out[base] = channel_to_u8(c.r);
                        out[base + 1] = channel_to_u8(c.g);
                        out[base + 2] = channel_to_u8(c.b);
                        out[base + 3] = channel_to_u8(c.a);
                    }
                    consts::RGB => {
                        let c = fb.color_slice()[src];
                        out[base] = channel_to_u8(c.r);
                        out[base + 1] = channel_to_u8(c.g);
                        out[base + 2] = channel_to_u8(c.b);
                    }
                    _ => {
                        out[base] = channel_to_u8(fb.depth_slice()[src]);
                    }
                }
            });
        }
        ReadbackTarget::Floats(out) => {
            for_each_src(fb, x, y, w, h, |src, di| {
                let base = di * channels;
                match format {
                    consts::RGBA => {
                        let c = fb.color_slice()[src];
                        out[base] = c.r;
                        out[base + 1] = c.g;
                        out[base + 2] = c.b;
                        out[base + 3] = c.a;
                    }
                    consts::RGB => {
                        let c = fb.color_slice()[src];
                        out[base] = c.r;
                        out[base + 1] = c.g;
                        out[base + 2] = c.b;
                    }
                    _ => {
                        out[base] = fb.depth_slice()[src];
                    }
                }
            });
        }
        ReadbackTarget::Console(out) => {
            for_each_src(fb, x, y, w, h, |src, di| {
                out[di] = classify_pixel(fb.color_slice()[src], slow_classifier);
            });
        }
    }

    Ok(())
}

fn for_each_src(
    fb: &Framebuffer,
    x: i32,
    y: i32,
    w: usize,
    h: usize,
    mut write: impl FnMut(usize, usize),
) {
    let fw = fb.width() as i64;
    let fh = fb.height() as i64;
    for row in 0..h {
        let sy = y as i64 + row as i64;
        if sy < 0 || sy >= fh {
            continue;
        }
        for col in 0..w {
            let sx = x as i64 + col as i64;
            if sx < 0 || sx >= fw {
                continue;
            }
            write((sx + sy * fw) as usize, row * w + col);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{read_pixels, ReadbackTarget};
    use crate::{classify::ConsoleCell, consts, framebuffer::Framebuffer, types::Color};

    fn gradient_fb() -> Framebuffer {
        let mut fb = Framebuffer::new(2, 2, Color::BLACK);
        fb.plot(0, 0.0, false, Color::new(1.0, 0.0, 0.0, 1.0));
        fb.plot(1, 0.0, false, Color::new(0.0, 1.0, 0.0, 1.0));
        fb.plot(2, 0.0, false, Color::new(0.0, 0.0, 1.0, 1.0));
        fb.plot(3, 0.0, false, Color::WHITE);
        fb
    }

    #[test]
    fn rgba_byte_readback_full_frame() {
        let fb = gradient_fb();
        let mut out = [0u8; 16];
        read_pixels(&fb, 0, 0, 2, 2, consts::RGBA, ReadbackTarget::Bytes(&mut out), false)
            .unwrap();
        assert_eq!(&out[0..4], &[255, 0, 0, 255]);
        assert_eq!(&out[4..8], &[0, 255, 0, 255]);
        assert_eq!(&out[8..12], &[0, 0, 255, 255]);
        assert_eq!(&out[12..16], &[255, 255, 255, 255]);
    }

    #[test]
    fn sub_rect_is_honored() {
        let fb = gradient_fb();
        let mut out = [0.0f32; 3];
        read_pixels(&fb, 1, 0, 1, 1, consts::RGB, ReadbackTarget::Floats(&mut out), false)
            .unwrap();
        assert_eq!(out, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn rect_outside_framebuffer_leaves_dest_untouched() {
        let fb = gradient_fb();
        let mut out = [7u8; 8];
        read_pixels(&fb, 1, 1, 2, 1, consts::RGBA, ReadbackTarget::Bytes(&mut out), false)
            .unwrap();
        // (1,1) is white; (2,1) is off the framebuffer.
        assert_eq!(&out[0..4], &[255, 255, 255, 255]);
        assert_eq!(&out[4..8], &[7, 7, 7, 7]);
    }

    #[test]
    fn byte_readback_rounds_fractional_channels() {
        let fb = Framebuffer::new(1, 1, Color::new(0.996, 0.25, 0.5, 1.0));
        let mut out = [0u8; 4];
        read_pixels(&fb, 0, 0, 1, 1, consts::RGBA, ReadbackTarget::Bytes(&mut out), false)
            .unwrap();
        assert_eq!(out, [254, 64, 128, 255]);
    }

    #[test]
    fn depth_readback_floats() {
        let mut fb = Framebuffer::new(2, 1, Color::BLACK);
        fb.fill_depth(0.25);
        let mut out = [0.0f32; 2];
        read_pixels(
            &fb,
            0,
            0,
            2,
            1,
            consts::DEPTH_COMPONENT,
            ReadbackTarget::Floats(&mut out),
            false,
        )
        .unwrap();
        assert_eq!(out, [0.25, 0.25]);
    }

    #[test]
    fn depth_byte_readback_clamps_negative_values() {
        let mut fb = Framebuffer::new(1, 1, Color::BLACK);
        fb.fill_depth(-1.0);
        let mut out = [9u8; 1];
        read_pixels(
            &fb,
            0,
            0,
            1,
            1,
            consts::DEPTH_COMPONENT,
            ReadbackTarget::Bytes(&mut out),
            false,
        )
        .unwrap();
        assert_eq!(out, [0]);
    }

    #[test]
    fn unknown_format_is_invalid_enum() {
        let fb = gradient_fb();
        let mut out = [0u8; 16];
        let err = read_pixels(&fb, 0, 0, 2, 2, 0xBEEF, ReadbackTarget::Bytes(&mut out), false)
            .unwrap_err();
        assert_eq!(err, consts::INVALID_ENUM);
    }

    #[test]
    fn console_format_requires_console_dest() {
        let fb = gradient_fb();
        let mut bytes = [0u8; 16];
        let err = read_pixels(
            &fb,
            0,
            0,
            2,
            2,
            consts::CONSOLE_PIXEL_FORMAT,
            ReadbackTarget::Bytes(&mut bytes),
            false,
        )
        .unwrap_err();
        assert_eq!(err, consts::INVALID_OPERATION);

        let mut cells = [ConsoleCell::default(); 4];
        let err = read_pixels(
            &fb,
            0,
            0,
            2,
            2,
            consts::RGBA,
            ReadbackTarget::Console(&mut cells),
            false,
        )
        .unwrap_err();
        assert_eq!(err, consts::INVALID_OPERATION);
    }

    #[test]
    fn non_positive_extent_is_invalid_value() {
        let fb = gradient_fb();
        let mut out = [0u8; 16];
        for (w, h) in [(0, 2), (2, 0), (-1, 2)] {
            let err = read_pixels(&fb, 0, 0, w, h, consts::RGBA, ReadbackTarget::Bytes(&mut out), false)
                .unwrap_err();
            assert_eq!(err, consts::INVALID_VALUE);
        }
    }

    #[test]
    fn short_destination_is_invalid_operation() {
        let fb = gradient_fb();
        let mut out = [0u8; 15];
        let err = read_pixels(&fb, 0, 0, 2, 2, consts::RGBA, ReadbackTarget::Bytes(&mut out), false)
            .unwrap_err();
        assert_eq!(err, consts::INVALID_OPERATION);
    }

    #[test]
    fn console_readback_classifies_pixels() {
        let fb = gradient_fb();
        let mut cells = [ConsoleCell::default(); 4];
        read_pixels(
            &fb,
            0,
            0,
            2,
            2,
            consts::CONSOLE_PIXEL_FORMAT,
            ReadbackTarget::Console(&mut cells),
            false,
        )
        .unwrap();
        // Pure red classifies into the first hue bucket (red on red).
        assert_eq!(cells[0].fg(), crate::classify::RED);
        // White is unsaturated and lands in the grey ramp's top entry.
        assert_eq!(cells[3].fg(), crate::classify::WHITE);
    }
}
