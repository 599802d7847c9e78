#![forbid(unsafe_code)]

//! Visual theme capability.
//!
//! Widgets never hard-code colours or fonts; they read them from a
//! [`MenuTheme`]. [`Theme`] is a plain value implementation with light and
//! dark presets. Hosts with their own styling system implement the trait
//! directly.

/// An 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Same colour with its alpha scaled by `factor` (clamped to `0..=1`).
    #[must_use]
    pub fn with_alpha_scaled(self, factor: f32) -> Self {
        let a = (f32::from(self.a) * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

/// Backdrop blur material behind the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlurStyle {
    None,
    ExtraLight,
    #[default]
    Light,
    Regular,
    Dark,
}

/// Font selection for titles and rows.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
    pub bold: bool,
}

impl FontSpec {
    #[must_use]
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Line height used for single-line labels.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        (self.size * 1.2).ceil()
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("system", 16.0)
    }
}

/// Styling capability consumed by triggers, panels, and item views.
pub trait MenuTheme {
    fn font(&self) -> &FontSpec;
    /// Row and panel text.
    fn text_color(&self) -> Rgba;
    /// Trigger title.
    fn dark_tint_color(&self) -> Rgba;
    /// Fill over the blurred backdrop.
    fn background_tint(&self) -> Rgba;
    fn blur_style(&self) -> BlurStyle;
    fn shadow_color(&self) -> Rgba;
    fn shadow_opacity(&self) -> f32;
    fn shadow_radius(&self) -> f64;
    fn gesture_bar_tint(&self) -> Rgba;
    /// Row highlight fill.
    fn highlight_color(&self) -> Rgba {
        self.dark_tint_color().with_alpha_scaled(0.12)
    }
    fn separator_color(&self) -> Rgba {
        self.text_color().with_alpha_scaled(0.15)
    }
}

/// A plain-value theme.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub font: FontSpec,
    pub text_color: Rgba,
    pub dark_tint_color: Rgba,
    pub background_tint: Rgba,
    pub blur_style: BlurStyle,
    pub shadow_color: Rgba,
    pub shadow_opacity: f32,
    pub shadow_radius: f64,
    pub gesture_bar_tint: Rgba,
}

impl Theme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            font: FontSpec::new("system", 16.0),
            text_color: Rgba::BLACK,
            dark_tint_color: Rgba::rgb(0x22, 0x22, 0x22),
            background_tint: Rgba::new(255, 255, 255, 0x66),
            blur_style: BlurStyle::Light,
            shadow_color: Rgba::BLACK,
            shadow_opacity: 0.25,
            shadow_radius: 12.0,
            gesture_bar_tint: Rgba::new(0, 0, 0, 0x33),
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            font: FontSpec::new("system", 16.0),
            text_color: Rgba::WHITE,
            dark_tint_color: Rgba::rgb(0xEE, 0xEE, 0xEE),
            background_tint: Rgba::new(0x1C, 0x1C, 0x1E, 0x99),
            blur_style: BlurStyle::Dark,
            shadow_color: Rgba::BLACK,
            shadow_opacity: 0.45,
            shadow_radius: 12.0,
            gesture_bar_tint: Rgba::new(255, 255, 255, 0x40),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl MenuTheme for Theme {
    fn font(&self) -> &FontSpec {
        &self.font
    }

    fn text_color(&self) -> Rgba {
        self.text_color
    }

    fn dark_tint_color(&self) -> Rgba {
        self.dark_tint_color
    }

    fn background_tint(&self) -> Rgba {
        self.background_tint
    }

    fn blur_style(&self) -> BlurStyle {
        self.blur_style
    }

    fn shadow_color(&self) -> Rgba {
        self.shadow_color
    }

    fn shadow_opacity(&self) -> f32 {
        self.shadow_opacity
    }

    fn shadow_radius(&self) -> f64 {
        self.shadow_radius
    }

    fn gesture_bar_tint(&self) -> Rgba {
        self.gesture_bar_tint
    }
}
