//! Pixelated text that drags and ripples behind the pointer.
//!
//! The text is rasterized into a texture twice the size of the surface and
//! drawn on a full-surface quad; the fragment shader displaces 40×40 blocks
//! opposite to the pointer's recent movement. Pure state (pointer easing,
//! sizing, distortion math) lives in the top-level modules and builds on
//! any target; the browser glue is only compiled for wasm32.

pub mod config;
pub mod distortion;
pub mod error;
pub mod frame;
pub mod layout;
pub mod pointer;
pub mod viewport;

pub use config::EffectConfig;
pub use error::EffectError;

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, Window};

    use crate::config::EffectConfig;
    use crate::error::{EffectError, Result};
    use crate::layout::BitmapSize;
    use crate::pointer::PointerState;

    mod dom;
    mod effect;
    mod render;
    mod shader;
    mod texture;

    pub use shader::fragment_source;
    pub use texture::rasterize_text;

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
    }

    pub(crate) fn window() -> Result<Window> {
        web_sys::window().ok_or(EffectError::NoWindow)
    }

    pub(crate) fn document() -> Result<Document> {
        window()?.document().ok_or(EffectError::NoDocument)
    }

    /// Construction options. Unset fields fall back to [`EffectConfig`]
    /// defaults.
    #[wasm_bindgen(getter_with_clone)]
    #[derive(Debug, Clone, Default)]
    pub struct PixelTextOptions {
        pub text: Option<String>,
        pub font: Option<String>,
        /// Background colour of the bitmap.
        pub color: Option<String>,
        #[wasm_bindgen(js_name = fontWeight)]
        pub font_weight: Option<String>,
        /// Glyph colour.
        pub foreground: Option<String>,
    }

    #[wasm_bindgen]
    impl PixelTextOptions {
        #[wasm_bindgen(constructor)]
        pub fn new() -> PixelTextOptions {
            PixelTextOptions::default()
        }
    }

    impl From<PixelTextOptions> for EffectConfig {
        fn from(opts: PixelTextOptions) -> Self {
            let mut cfg = EffectConfig::default();
            if let Some(text) = opts.text {
                cfg = cfg.with_text(text);
            }
            if let Some(font) = opts.font {
                cfg = cfg.with_font_family(font);
            }
            if let Some(color) = opts.color {
                cfg = cfg.with_background(color);
            }
            if let Some(weight) = opts.font_weight {
                cfg = cfg.with_font_weight(weight);
            }
            if let Some(foreground) = opts.foreground {
                cfg = cfg.with_foreground(foreground);
            }
            cfg
        }
    }

    /// Handle to a running effect. Dropping or collecting the handle does
    /// not stop the effect; call `destroy()`.
    #[wasm_bindgen]
    pub struct PixelText {
        effect: Rc<effect::Effect>,
    }

    #[wasm_bindgen]
    impl PixelText {
        /// Appends a canvas to `container` and starts rendering. Fonts used
        /// by `options` should already be loaded.
        #[wasm_bindgen(constructor)]
        pub fn new(
            container: HtmlElement,
            options: Option<PixelTextOptions>,
        ) -> std::result::Result<PixelText, JsValue> {
            let config = options.map(EffectConfig::from).unwrap_or_default();
            Ok(PixelText::mount(container, config, false)?)
        }

        pub fn destroy(&self) {
            self.effect.destroy();
        }

        #[wasm_bindgen(getter)]
        pub fn destroyed(&self) -> bool {
            self.effect.is_destroyed()
        }

        #[wasm_bindgen(getter, js_name = textureWidth)]
        pub fn texture_width(&self) -> u32 {
            self.effect.texture_size().map_or(0, |s| s.width)
        }

        #[wasm_bindgen(getter, js_name = textureHeight)]
        pub fn texture_height(&self) -> u32 {
            self.effect.texture_size().map_or(0, |s| s.height)
        }

        #[wasm_bindgen(getter, js_name = framesDrawn)]
        pub fn frames_drawn(&self) -> u32 {
            self.effect.frames_drawn()
        }
    }

    impl PixelText {
        pub fn mount(container: HtmlElement, config: EffectConfig, owned: bool) -> Result<Self> {
            let effect = effect::Effect::mount(container, config, owned)?;
            Ok(PixelText { effect })
        }

        pub fn config(&self) -> &EffectConfig {
            self.effect.config()
        }

        pub fn pointer(&self) -> PointerState {
            self.effect.pointer()
        }

        pub fn canvas(&self) -> HtmlCanvasElement {
            self.effect.canvas().clone()
        }

        pub fn texture_size(&self) -> Option<BitmapSize> {
            self.effect.texture_size()
        }

        pub fn regenerations(&self) -> (u32, u32) {
            self.effect.regenerations()
        }

        pub fn resize_events(&self) -> u32 {
            self.effect.resize_events()
        }
    }

    /// Runs the effect over the element matching `selector`, using its
    /// text unless `options.text` is set.
    #[wasm_bindgen(js_name = applyPixelText)]
    pub fn apply_pixel_text(
        selector: &str,
        options: Option<PixelTextOptions>,
    ) -> std::result::Result<Option<PixelText>, JsValue> {
        Ok(dom::apply_to_selector(selector, options.unwrap_or_default())?)
    }

    /// Same as [`apply_pixel_text`] but waits for `document.fonts.ready`
    /// first so the texture is not drawn with a fallback face.
    #[wasm_bindgen(js_name = applyPixelTextWhenFontsReady)]
    pub async fn apply_pixel_text_when_fonts_ready(
        selector: String,
        options: Option<PixelTextOptions>,
    ) -> std::result::Result<Option<PixelText>, JsValue> {
        dom::fonts_ready().await?;
        apply_pixel_text(&selector, options)
    }
}
