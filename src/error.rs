use thiserror::Error;

/// Failures while building or driving an effect instance.
#[derive(Debug, Error)]
pub enum EffectError {
    #[error("no global `window`")]
    NoWindow,
    #[error("no `document` on window")]
    NoDocument,
    #[error("{0} context unavailable")]
    ContextUnavailable(&'static str),
    #[error("failed to create {0}")]
    Create(&'static str),
    #[error("shader compile failed: {0}")]
    Shader(String),
    #[error("program link failed: {0}")]
    Link(String),
    #[error("DOM call failed: {0}")]
    Dom(String),
}

pub type Result<T> = std::result::Result<T, EffectError>;

#[cfg(target_arch = "wasm32")]
mod js {
    use wasm_bindgen::JsValue;

    use super::EffectError;

    impl From<JsValue> for EffectError {
        fn from(value: JsValue) -> Self {
            EffectError::Dom(format!("{value:?}"))
        }
    }

    impl From<EffectError> for JsValue {
        fn from(err: EffectError) -> Self {
            js_sys::Error::new(&err.to_string()).into()
        }
    }
}
