//! Color representation and interpolation

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self(r, g, b, 1.0)
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self(r, g, b, a)
    }

    pub const fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub const fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    pub fn r(&self) -> f32 {
        self.0
    }

    pub fn g(&self) -> f32 {
        self.1
    }

    pub fn b(&self) -> f32 {
        self.2
    }

    pub fn a(&self) -> f32 {
        self.3
    }

    /// Alpha quantized to 8 bits, truncating like an integer channel would.
    ///
    /// Only a fully opaque color reports 255.
    pub fn alpha_u8(&self) -> u8 {
        (self.3.clamp(0.0, 1.0) * 255.0) as u8
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha_u8() == u8::MAX
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self(self.0, self.1, self.2, alpha.clamp(0.0, 1.0))
    }

    /// Linear interpolation between two colors, channel by channel.
    ///
    /// `fraction` is clamped to [0, 1].
    pub fn lerp(&self, target: &Color, fraction: f32) -> Color {
        let t = fraction.clamp(0.0, 1.0);
        let mix = |from: f32, to: f32| from + (to - from) * t;
        Color(
            mix(self.0, target.0),
            mix(self.1, target.1),
            mix(self.2, target.2),
            mix(self.3, target.3).clamp(0.0, 1.0),
        )
    }

    // Common color constants
    pub const BLACK: Color = Color(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
}
