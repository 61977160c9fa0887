//! RGB565 colors as the display controller expects them.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0xAE, 0x0B);
    pub const YELLOW: Color = Color::rgb(0xFF, 0xEB, 0x3B);
    pub const ORANGE: Color = Color::rgb(0xFF, 0x98, 0x00);
    pub const GREY: Color = Color::rgb(0x9E, 0x9E, 0x9E);
    pub const DARK_GREY: Color = Color::rgb(0x3E, 0x3E, 0x3E);

    /// Packs 8-bit channels into 5/6/5 bits.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        let r = (r as u16 & 0xF8) << 8;
        let g = (g as u16 & 0xFC) << 3;
        let b = (b as u16 & 0xF8) >> 3;
        Color(r | g | b)
    }

    pub const fn r(self) -> u8 {
        ((self.0 >> 8) & 0xF8) as u8
    }

    pub const fn g(self) -> u8 {
        ((self.0 >> 3) & 0xFC) as u8
    }

    pub const fn b(self) -> u8 {
        ((self.0 << 3) & 0xF8) as u8
    }

    /// Mixes `self` towards `other`; `t = 0.0` is `self`, `t = 1.0` is `other`.
    pub fn blend(self, other: Color, t: f32) -> Color {
        Color::rgb(
            lerpi(self.r() as i32, other.r() as i32, t) as u8,
            lerpi(self.g() as i32, other.g() as i32, t) as u8,
            lerpi(self.b() as i32, other.b() as i32, t) as u8,
        )
    }
}

/// Linear interpolation between two integers, truncating towards zero.
pub fn lerpi(a: i32, b: i32, t: f32) -> i32 {
    (a as f32 + t * (b - a) as f32) as i32
}
