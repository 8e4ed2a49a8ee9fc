use crate::types::Color;

// Shade glyphs, lightest to solid.
pub const GLYPH_QUARTER: u16 = 0x2591;
pub const GLYPH_HALF: u16 = 0x2592;
pub const GLYPH_THREE_QUARTERS: u16 = 0x2593;
pub const GLYPH_SOLID: u16 = 0x2588;

// 16-color console palette indices.
pub const BLACK: u8 = 0x0;
pub const DARK_BLUE: u8 = 0x1;
pub const DARK_GREEN: u8 = 0x2;
pub const DARK_CYAN: u8 = 0x3;
pub const DARK_RED: u8 = 0x4;
pub const DARK_MAGENTA: u8 = 0x5;
pub const DARK_YELLOW: u8 = 0x6;
pub const GREY: u8 = 0x7;
pub const DARK_GREY: u8 = 0x8;
pub const BLUE: u8 = 0x9;
pub const GREEN: u8 = 0xA;
pub const CYAN: u8 = 0xB;
pub const RED: u8 = 0xC;
pub const MAGENTA: u8 = 0xD;
pub const YELLOW: u8 = 0xE;
pub const WHITE: u8 = 0xF;

pub const PALETTE_RGB: [[u8; 3]; 16] = [
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x80],
    [0x00, 0x80, 0x00],
    [0x00, 0x80, 0x80],
    [0x80, 0x00, 0x00],
    [0x80, 0x00, 0x80],
    [0x80, 0x80, 0x00],
    [0xC0, 0xC0, 0xC0],
    [0x80, 0x80, 0x80],
    [0x00, 0x00, 0xFF],
    [0x00, 0xFF, 0x00],
    [0x00, 0xFF, 0xFF],
    [0xFF, 0x00, 0x00],
    [0xFF, 0x00, 0xFF],
    [0xFF, 0xFF, 0x00],
    [0xFF, 0xFF, 0xFF],
];

// One console cell: a shade glyph code unit and a packed attribute with the
// foreground palette index in the low nibble and the background in the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConsoleCell {
    pub glyph: u16,
    pub attr: u16,
}

impl ConsoleCell {
    pub fn new(glyph: u16, fg: u8, bg: u8) -> Self {
        Self {
            glyph,
            attr: pack_attr(fg, bg),
        }
    }

    pub fn fg(self) -> u8 {
        (self.attr & 0x0F) as u8
    }

    pub fn bg(self) -> u8 {
        ((self.attr >> 4) & 0x0F) as u8
    }
}

impl Default for ConsoleCell {
    fn default() -> Self {
        Self {
            glyph: b' ' as u16,
            attr: 0,
        }
    }
}

pub fn pack_attr(fg: u8, bg: u8) -> u16 {
    (fg & 0x0F) as u16 | (((bg & 0x0F) as u16) << 4)
}

pub fn classify_pixel(c: Color, slow: bool) -> ConsoleCell {
    if slow {
        classify_slow(c)
    } else {
        classify_hsv(c)
    }
}

// Hue wheel red -> yellow -> green -> cyan -> blue -> magenta -> red, four
// shade steps per sextant.
const HUE_TABLE: [(u16, u8, u8); 24] = [
    (GLYPH_SOLID, RED, RED),
    (GLYPH_QUARTER, YELLOW, RED),
    (GLYPH_HALF, YELLOW, RED),
    (GLYPH_THREE_QUARTERS, YELLOW, RED),
    (GLYPH_SOLID, GREEN, YELLOW),
    (GLYPH_QUARTER, GREEN, YELLOW),
    (GLYPH_HALF, GREEN, YELLOW),
    (GLYPH_THREE_QUARTERS, GREEN, YELLOW),
    (GLYPH_SOLID, CYAN, GREEN),
    (GLYPH_QUARTER, CYAN, GREEN),
    (GLYPH_HALF, CYAN, GREEN),
    (GLYPH_THREE_QUARTERS, CYAN, GREEN),
    (GLYPH_SOLID, BLUE, CYAN),
    (GLYPH_QUARTER, BLUE, CYAN),
    (GLYPH_HALF, BLUE, CYAN),
    (GLYPH_THREE_QUARTERS, BLUE, CYAN),
    (GLYPH_SOLID, MAGENTA, BLUE),
    (GLYPH_QUARTER, MAGENTA, BLUE),
    (GLYPH_HALF, MAGENTA, BLUE),
    (GLYPH_THREE_QUARTERS, MAGENTA, BLUE),
    (GLYPH_SOLID, RED, MAGENTA),
    (GLYPH_QUARTER, RED, MAGENTA),
    (GLYPH_HALF, RED, MAGENTA),
    (GLYPH_THREE_QUARTERS, RED, MAGENTA),
];

pub fn classify_hsv(c: Color) -> ConsoleCell {
    let (h, s, _v) = rgb_to_hsv(c.r, c.g, c.b);
    if s <= 0.2 {
        return classify_grey(c);
    }
    let index = ((h / 360.0 * 24.0) as usize).min(HUE_TABLE.len() - 1);
    let (glyph, fg, bg) = HUE_TABLE[index];
    ConsoleCell::new(glyph, fg, bg)
}

const GREY_TABLE: [(u16, u8, u8); 13] = [
    (GLYPH_SOLID, BLACK, BLACK),
    (GLYPH_QUARTER, DARK_GREY, BLACK),
    (GLYPH_HALF, DARK_GREY, BLACK),
    (GLYPH_THREE_QUARTERS, DARK_GREY, BLACK),
    (GLYPH_SOLID, DARK_GREY, BLACK),
    (GLYPH_QUARTER, GREY, DARK_GREY),
    (GLYPH_HALF, GREY, DARK_GREY),
    (GLYPH_THREE_QUARTERS, GREY, DARK_GREY),
    (GLYPH_SOLID, GREY, DARK_GREY),
    (GLYPH_QUARTER, WHITE, GREY),
    (GLYPH_HALF, WHITE, GREY),
    (GLYPH_THREE_QUARTERS, WHITE, GREY),
    (GLYPH_SOLID, WHITE, GREY),
];

pub fn classify_grey(c: Color) -> ConsoleCell {
    let luminance = 0.2987 * c.r + 0.5870 * c.g + 0.1140 * c.b;
    let bucket = ((luminance * 13.0) as i32).clamp(0, 12) as usize;
    let (glyph, fg, bg) = GREY_TABLE[bucket];
    ConsoleCell::new(glyph, fg, bg)
}

const SHADE_GLYPHS: [u16; 4] = [GLYPH_QUARTER, GLYPH_HALF, GLYPH_THREE_QUARTERS, GLYPH_SOLID];

// Exhaustive search over fg x bg x shade, minimizing squared distance in
// 8-bit channel space. Shades strictly between the extremes are skipped
// while the running best is still worse than the fixed threshold.
const SLOW_SKIP_THRESHOLD: f32 = 5000.0;

pub fn classify_slow(c: Color) -> ConsoleCell {
    let pr = c.r * 255.0;
    let pg = c.g * 255.0;
    let pb = c.b * 255.0;

    let mut best = ConsoleCell::new(GLYPH_SOLID, BLACK, BLACK);
    let mut best_dist = f32::INFINITY;

    for (fg, fgc) in PALETTE_RGB.iter().enumerate() {
        for (bg, bgc) in PALETTE_RGB.iter().enumerate() {
            for shade in 1..=4u32 {
                if (shade == 2 || shade == 3) && best_dist > SLOW_SKIP_THRESHOLD {
                    continue;
                }

                let s = shade as f32;
                let t = (4 - shade) as f32;
                let mr = (s * fgc[0] as f32 + t * bgc[0] as f32) / 4.0;
                let mg = (s * fgc[1] as f32 + t * bgc[1] as f32) / 4.0;
                let mb = (s * fgc[2] as f32 + t * bgc[2] as f32) / 4.0;

                let dr = mr - pr;
                let dg = mg - pg;
                let db = mb - pb;
                let dist = dr * dr + dg * dg + db * db;

                if dist < best_dist {
                    best_dist = dist;
                    best = ConsoleCell::new(SHADE_GLYPHS[(shade - 1) as usize], fg as u8, bg as u8);
                }
            }
        }
    }

    best
}

pub(crate) fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let min = r.min(g).min(b);
    let max = r.max(g).max(b);
    let delta = max - min;

    if delta < 1e-5 {
        return (0.0, 0.0, max);
    }

    let s = delta / max;
    let mut h = if r >= max {
        (g - b) / delta
    } else if g >= max {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };

    h *= 60.0;
    if h < 0.0 {
        h += 360.0;
    }

    (h, s, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsv_primaries() {
        let (h, s, v) = rgb_to_hsv(1.0, 0.0, 0.0);
        assert_eq!((h, s, v), (0.0, 1.0, 1.0));
        let (h, _, _) = rgb_to_hsv(0.0, 1.0, 0.0);
        assert_eq!(h, 120.0);
        let (h, _, _) = rgb_to_hsv(0.0, 0.0, 1.0);
        assert_eq!(h, 240.0);
    }

    #[test]
    fn pure_red_lands_in_the_first_hue_bucket() {
        let cell = classify_hsv(Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(cell.glyph, GLYPH_SOLID);
        assert_eq!(cell.fg(), RED);
        assert_eq!(cell.bg(), RED);
    }

    #[test]
    fn low_saturation_routes_to_grey() {
        let cell = classify_hsv(Color::new(0.1, 0.1, 0.1, 1.0));
        // luminance ~ 0.1 -> bucket 1
        assert_eq!(cell.glyph, GLYPH_QUARTER);
        assert_eq!(cell.fg(), DARK_GREY);
        assert_eq!(cell.bg(), BLACK);
    }

    #[test]
    fn grey_buckets_clamp_at_white() {
        let cell = classify_grey(Color::WHITE);
        assert_eq!(cell.glyph, GLYPH_SOLID);
        assert_eq!(cell.fg(), WHITE);
        assert_eq!(cell.bg(), GREY);
    }

    #[test]
    fn grey_black_is_solid_black() {
        let cell = classify_grey(Color::BLACK);
        assert_eq!(cell.glyph, GLYPH_SOLID);
        assert_eq!(cell.fg(), BLACK);
        assert_eq!(cell.bg(), BLACK);
    }

    #[test]
    fn slow_search_is_exact_on_palette_colors() {
        let cell = classify_slow(Color::from_bytes(255, 0, 0, 255));
        assert_eq!(cell.glyph, GLYPH_SOLID);
        assert_eq!(cell.fg(), RED);

        let cell = classify_slow(Color::from_bytes(0, 0, 0, 255));
        assert_eq!(cell.fg(), BLACK);
    }

    #[test]
    fn slow_search_blends_between_palette_entries() {
        // Mid grey between dark grey (0x80) and black should pick a mixed
        // shade rather than a solid extreme.
        let cell = classify_slow(Color::from_bytes(64, 64, 64, 255));
        assert_ne!(cell.glyph, GLYPH_SOLID);
    }

    #[test]
    fn attr_packs_fg_low_bg_high() {
        let cell = ConsoleCell::new(GLYPH_HALF, RED, DARK_BLUE);
        assert_eq!(cell.attr, 0x001C);
        assert_eq!(cell.fg(), RED);
        assert_eq!(cell.bg(), DARK_BLUE);
    }
}
