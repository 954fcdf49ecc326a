//! Value types produced by the block readers
//!
use derive_more::derive::{Constructor, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Constructor, Display, Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[display("({x}, {y})")]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Constructor, Display, Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[display("({x}, {y}, {z})")]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Constructor, Display, Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[display("({x}, {y}, {z}, {w})")]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// An RGBA colour. Files store colours as hex `AARRGGBB`.
#[derive(Constructor, Display, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[display("#{a:02x}{r:02x}{g:02x}{b:02x}")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0xFF,
    };

    /// Unpack `0xAARRGGBB`
    pub const fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Color { r, g, b, a }
    }

    /// Pack into `0xAARRGGBB`
    pub const fn to_argb(self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }
}
