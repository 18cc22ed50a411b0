/// RGBA color, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(0.86, 0.21, 0.18);
    pub const GREEN: Color = Color::rgb(0.22, 0.7, 0.29);
    pub const BLUE: Color = Color::rgb(0.2, 0.42, 0.85);
    pub const YELLOW: Color = Color::rgb(0.95, 0.82, 0.18);
    pub const ORANGE: Color = Color::rgb(0.95, 0.55, 0.15);
    pub const PURPLE: Color = Color::rgb(0.55, 0.3, 0.75);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const DARK_GRAY: Color = Color::rgb(0.22, 0.22, 0.24);
    /// Warm croissant gold used across menus and HUDs.
    pub const CROISSANT: Color = Color::rgb(0.91, 0.69, 0.33);
    /// Pastel sky used as the default clear color.
    pub const SKY: Color = Color::rgb(0.53, 0.78, 0.92);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_alpha_keeps_rgb() {
        let c = Color::CROISSANT.with_alpha(0.5);
        assert_eq!(c.r, Color::CROISSANT.r);
        assert_eq!(c.a, 0.5);
    }
}
