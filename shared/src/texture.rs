//! Procedural coin face images.
//!
//! Each face is a square RGBA8 (sRGB) image: a warm gold background, a radial
//! gradient from the center outwards, and a block glyph with a raised relief
//! and soft drop shadow.

use crate::orientation::Face;

/// An 8-bit sRGB color with straight alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn hex(rgb: u32) -> Self {
        Self([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255])
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, a])
    }

    fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut out = [0u8; 4];
        for (i, o) in out.iter_mut().enumerate() {
            let a = self.0[i] as f32;
            let b = other.0[i] as f32;
            *o = (a + (b - a) * t).round() as u8;
        }
        Self(out)
    }
}

/// Color scheme for one face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FacePalette {
    pub background: Rgba,
    pub gradient_center: Rgba,
    pub gradient_edge: Rgba,
    pub glyph: Rgba,
    pub relief: Rgba,
    pub shadow: Rgba,
}

impl FacePalette {
    pub fn for_face(face: Face) -> Self {
        let (background, gradient_center, gradient_edge) = match face {
            Face::Heads => (
                Rgba::hex(0xFFD700),
                Rgba::hex(0xFFED4E),
                Rgba::hex(0xDAA520),
            ),
            Face::Tails => (
                Rgba::hex(0xFFA500),
                Rgba::hex(0xFFB347),
                Rgba::hex(0xCC8400),
            ),
        };
        Self {
            background,
            gradient_center,
            gradient_edge,
            glyph: Rgba::hex(0x8B6914),
            relief: Rgba::hex(0xB8860B),
            shadow: Rgba::hex(0x000000).with_alpha(77),
        }
    }
}

/// Square RGBA8 image, row-major, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceImage {
    pub size: u32,
    pub rgba: Vec<u8>,
}

impl FaceImage {
    fn filled(size: u32, color: Rgba) -> Self {
        let rgba = color.0.repeat((size * size) as usize);
        Self { size, rgba }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let i = ((y * self.size + x) * 4) as usize;
        Rgba([
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ])
    }

    /// Source-over blend of `color` onto one pixel.
    fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.size || y >= self.size {
            return;
        }
        let i = ((y * self.size + x) * 4) as usize;
        let a = color.0[3] as f32 / 255.0;
        for c in 0..3 {
            let dst = self.rgba[i + c] as f32;
            let src = color.0[c] as f32;
            self.rgba[i + c] = (src * a + dst * (1.0 - a)).round() as u8;
        }
        let dst_a = self.rgba[i + 3] as f32 / 255.0;
        self.rgba[i + 3] = ((a + dst_a * (1.0 - a)) * 255.0).round() as u8;
    }
}

/// Axis-aligned rectangle in glyph units (`0..GLYPH_W`, `0..GLYPH_H`).
#[derive(Clone, Copy, Debug)]
struct GlyphRect {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

const fn rect(x0: u32, y0: u32, x1: u32, y1: u32) -> GlyphRect {
    GlyphRect { x0, y0, x1, y1 }
}

// Glyph metrics at 512 px; scaled with the image size.
const GLYPH_W: u32 = 160;
const GLYPH_H: u32 = 200;
const RELIEF_OFFSET: u32 = 2;

const GLYPH_H_RECTS: &[GlyphRect] = &[
    rect(0, 0, 40, 200),
    rect(120, 0, 160, 200),
    rect(0, 80, 160, 120),
];
const GLYPH_T_RECTS: &[GlyphRect] = &[rect(0, 0, 160, 40), rect(60, 0, 100, 200)];

fn glyph_rects(label: char) -> &'static [GlyphRect] {
    match label.to_ascii_uppercase() {
        'H' => GLYPH_H_RECTS,
        'T' => GLYPH_T_RECTS,
        _ => &[],
    }
}

fn stamp_glyph(image: &mut FaceImage, rects: &[GlyphRect], offset: u32, color: Rgba) {
    let scale = image.size as f32 / 512.0;
    let px = |v: u32| (v as f32 * scale).round() as u32;
    let left = image.size / 2 - px(GLYPH_W) / 2 + px(offset);
    let top = image.size / 2 - px(GLYPH_H) / 2 + px(offset);

    for r in rects {
        for y in top + px(r.y0)..top + px(r.y1) {
            for x in left + px(r.x0)..left + px(r.x1) {
                image.blend(x, y, color);
            }
        }
    }
}

/// Render a face image with `label` drawn in the middle.
pub fn render_face(label: char, face: Face, size: u32) -> FaceImage {
    let palette = FacePalette::for_face(face);
    let mut image = FaceImage::filled(size, palette.background);

    let center = size as f32 / 2.0;
    let radius = size as f32 / 2.0;
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let t = (dx * dx + dy * dy).sqrt() / radius;
            let color = palette.gradient_center.lerp(palette.gradient_edge, t);
            image.blend(x, y, color);
        }
    }

    let rects = glyph_rects(label);
    stamp_glyph(&mut image, rects, 0, palette.glyph);
    stamp_glyph(&mut image, rects, RELIEF_OFFSET * 2, palette.shadow);
    stamp_glyph(&mut image, rects, RELIEF_OFFSET, palette.relief);

    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_is_square_rgba() {
        let image = render_face('H', Face::Heads, 64);
        assert_eq!(image.size, 64);
        assert_eq!(image.rgba.len(), 64 * 64 * 4);
        assert!(image.rgba.chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn gradient_runs_from_center_to_edge_color() {
        let image = render_face('?', Face::Heads, 512);
        let palette = FacePalette::for_face(Face::Heads);

        let corner = image.pixel(0, 0);
        assert_eq!(corner, palette.gradient_edge);

        let center = image.pixel(256, 256);
        let [r, g, b, _] = center.0;
        let [cr, cg, cb, _] = palette.gradient_center.0;
        assert!(r.abs_diff(cr) <= 1 && g.abs_diff(cg) <= 1 && b.abs_diff(cb) <= 1);
    }

    #[test]
    fn heads_and_tails_differ() {
        let heads = render_face('H', Face::Heads, 128);
        let tails = render_face('T', Face::Tails, 128);
        assert_ne!(heads, tails);
    }

    #[test]
    fn glyph_center_is_relief_colored() {
        // The H crossbar covers the image center after the relief pass.
        let image = render_face('H', Face::Heads, 512);
        let palette = FacePalette::for_face(Face::Heads);
        assert_eq!(image.pixel(256, 256), palette.relief);

        // Below the T bar and left of the stem, the lower-left of the glyph box has no relief.
        let image = render_face('T', Face::Tails, 512);
        let palette = FacePalette::for_face(Face::Tails);
        assert_eq!(image.pixel(256, 256), palette.relief);
        assert_ne!(image.pixel(190, 300), palette.relief);
    }
}
