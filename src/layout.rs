//! Sizing of the text bitmap. Everything here is independent of the
//! canvas API; the rasterizer feeds it a measured width and applies the
//! resulting transform.

/// Number of outline strokes drawn before the fill pass.
pub const OUTLINE_PASSES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapSize {
    pub width: u32,
    pub height: u32,
}

impl BitmapSize {
    /// Bitmap backing a surface of `width`×`height` CSS pixels.
    pub fn for_surface(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1) * 2,
            height: height.max(1) * 2,
        }
    }
}

/// Oversized so the downsampled glyph edges stay crisp.
pub fn font_size_for(bitmap: BitmapSize) -> f64 {
    bitmap.width as f64 * 2.0
}

/// CSS font shorthand understood by `CanvasRenderingContext2D.font`.
pub fn font_shorthand(weight: &str, size_px: f64, family: &str) -> String {
    format!("{weight} {size_px}px {family}")
}

/// Transform applied to the text before it is drawn at the bitmap centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayout {
    pub bitmap: BitmapSize,
    pub font_size: f64,
    pub text_width: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl TextLayout {
    /// `measure` returns the advance width of the text at the given font
    /// size.
    pub fn measure(bitmap: BitmapSize, measure: impl FnOnce(f64) -> f64) -> Self {
        let font_size = font_size_for(bitmap);
        let text_width = measure(font_size);
        let width = bitmap.width as f64;
        let scale = if text_width > 0.0 {
            (width / text_width).min(1.0)
        } else {
            1.0
        };
        let aspect = width / bitmap.height as f64;
        Self {
            bitmap,
            font_size,
            text_width,
            scale_x: scale,
            scale_y: scale / aspect,
        }
    }

    /// Horizontal extent of the drawn text in bitmap pixels.
    pub fn rendered_width(&self) -> f64 {
        self.text_width * self.scale_x
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.bitmap.width as f64 / 2.0,
            self.bitmap.height as f64 / 2.0,
        )
    }

    /// Outline width before scaling.
    pub fn stroke_width(&self) -> f64 {
        self.font_size / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // rough advance for a bold sans face
    fn fake_measure(text: &str) -> impl FnOnce(f64) -> f64 + '_ {
        move |size| text.chars().count() as f64 * size * 0.62
    }

    #[test]
    fn bitmap_doubles_surface() {
        assert_eq!(
            BitmapSize::for_surface(800, 600),
            BitmapSize { width: 1600, height: 1200 }
        );
        assert_eq!(BitmapSize::for_surface(0, 0), BitmapSize { width: 2, height: 2 });
    }

    #[test]
    fn scale_never_exceeds_one() {
        let bitmap = BitmapSize::for_surface(500, 200);
        for text in ["", "i", "HELLO", "a considerably longer headline"] {
            let layout = TextLayout::measure(bitmap, fake_measure(text));
            assert!(layout.scale_x <= 1.0, "{text}: {}", layout.scale_x);
        }
        let tiny = TextLayout::measure(bitmap, |_| 10.0);
        assert_eq!(tiny.scale_x, 1.0);
    }

    #[test]
    fn hello_fits_horizontally() {
        let bitmap = BitmapSize::for_surface(500, 300);
        let layout = TextLayout::measure(bitmap, fake_measure("HELLO"));
        assert_eq!(layout.font_size, 2000.0);
        let (cx, _) = layout.center();
        let half = layout.rendered_width() / 2.0;
        assert!(cx - half >= 0.0);
        assert!(cx + half <= bitmap.width as f64 + 1e-9);
    }

    #[test]
    fn vertical_scale_corrects_aspect() {
        let bitmap = BitmapSize::for_surface(800, 400);
        let layout = TextLayout::measure(bitmap, |_| 3200.0);
        assert_eq!(layout.scale_x, 0.5);
        assert_eq!(layout.scale_y, 0.25);
    }

    #[test]
    fn font_shorthand_format() {
        assert_eq!(font_shorthand("700", 2000.0, "Inter"), "700 2000px Inter");
    }
}
