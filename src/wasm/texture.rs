//! Rasterizes the configured text into an offscreen canvas.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::EffectConfig;
use crate::error::{EffectError, Result};
use crate::layout::{font_shorthand, BitmapSize, TextLayout, OUTLINE_PASSES};

use super::document;

/// Draws `config.text` into a new canvas of `size`. No state survives
/// between calls, so equal inputs give equal pixels.
pub fn rasterize_text(config: &EffectConfig, size: BitmapSize) -> Result<HtmlCanvasElement> {
    let canvas = document()?
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| EffectError::Create("canvas"))?;
    canvas.set_width(size.width);
    canvas.set_height(size.height);

    let ctx = canvas
        .get_context("2d")?
        .ok_or(EffectError::ContextUnavailable("2d"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| EffectError::ContextUnavailable("2d"))?;

    ctx.set_fill_style_str(&config.background);
    ctx.fill_rect(0.0, 0.0, size.width as f64, size.height as f64);

    let layout = TextLayout::measure(size, |font_size| {
        ctx.set_font(&font_shorthand(&config.font_weight, font_size, &config.font_family));
        ctx.measure_text(&config.text)
            .map(|m| m.width())
            .unwrap_or(0.0)
    });

    let (cx, cy) = layout.center();
    ctx.save();
    ctx.translate(cx, cy)?;
    ctx.scale(layout.scale_x, layout.scale_y)?;
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_stroke_style_str(&config.foreground);
    ctx.set_fill_style_str(&config.foreground);
    ctx.set_line_width(layout.stroke_width());
    for _ in 0..OUTLINE_PASSES {
        ctx.stroke_text(&config.text, 0.0, 0.0)?;
    }
    ctx.fill_text(&config.text, 0.0, 0.0)?;
    ctx.restore();

    Ok(canvas)
}
