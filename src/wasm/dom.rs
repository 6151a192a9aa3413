//! Mounting the effect over an existing element found by selector.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlElement};

use crate::error::{EffectError, Result};

use super::{document, window, PixelText, PixelTextOptions};

/// Covers `selector`'s element with an overlay running the effect on its
/// text. Returns `None` (after a warning) when nothing matches.
pub fn apply_to_selector(selector: &str, mut options: PixelTextOptions) -> Result<Option<PixelText>> {
    let document = document()?;
    let Some(element) = document.query_selector(selector)? else {
        log::warn!("pixel text: no element matches {selector:?}");
        return Ok(None);
    };
    let target = element
        .dyn_into::<HtmlElement>()
        .map_err(|_| EffectError::Dom(format!("{selector:?} is not an HTML element")))?;

    if options.text.is_none() {
        let text = target.text_content().unwrap_or_default();
        options.text = Some(text.trim().to_string());
    }

    ensure_positioned(&target)?;
    let overlay = create_overlay(&document)?;
    target.append_child(&overlay)?;

    match PixelText::mount(overlay.clone(), options.into(), true) {
        Ok(effect) => Ok(Some(effect)),
        Err(err) => {
            overlay.remove();
            Err(err)
        }
    }
}

/// Absolute children need a positioned ancestor to cover the target.
fn ensure_positioned(target: &HtmlElement) -> Result<()> {
    let position = window()?
        .get_computed_style(target)?
        .map(|style| style.get_property_value("position"))
        .transpose()?
        .unwrap_or_default();
    if position.is_empty() || position == "static" {
        target.style().set_property("position", "relative")?;
    }
    Ok(())
}

fn create_overlay(document: &Document) -> Result<HtmlElement> {
    let overlay = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| EffectError::Create("overlay"))?;
    let style = overlay.style();
    style.set_property("position", "absolute")?;
    style.set_property("inset", "0")?;
    style.set_property("background", "transparent")?;
    style.set_property("overflow", "hidden")?;
    style.set_property("z-index", "10")?;
    Ok(overlay)
}

/// Resolves once `document.fonts` has finished loading.
pub async fn fonts_ready() -> Result<()> {
    let promise = document()?.fonts().ready()?;
    JsFuture::from(promise).await?;
    Ok(())
}
