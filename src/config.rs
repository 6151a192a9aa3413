//! Effect configuration shared by the constructor and the DOM helper.

pub const DEFAULT_TEXT: &str = "Pixel";
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
pub const DEFAULT_BACKGROUND: &str = "#ffffff";
pub const DEFAULT_FONT_WEIGHT: &str = "700";
pub const DEFAULT_FOREGROUND: &str = "#111111";

/// What gets rasterized into the texture. Fixed for the lifetime of an
/// effect; resize regenerates the bitmap from the same values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectConfig {
    pub text: String,
    pub font_family: String,
    pub background: String,
    pub font_weight: String,
    pub foreground: String,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            font_weight: DEFAULT_FONT_WEIGHT.to_string(),
            foreground: DEFAULT_FOREGROUND.to_string(),
        }
    }
}

impl EffectConfig {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = color.into();
        self
    }

    pub fn with_font_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = weight.into();
        self
    }

    pub fn with_foreground(mut self, color: impl Into<String>) -> Self {
        self.foreground = color.into();
        self
    }
}
