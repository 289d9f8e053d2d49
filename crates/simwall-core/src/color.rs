//! RGBA colours in the `RRGGBBAA` hex notation used by config and ant files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// An 8-bit-per-channel colour with alpha.
///
/// Parsed from and displayed as eight hex digits, `RRGGBBAA`.
///
/// ```
/// use simwall_core::Rgba;
///
/// let red: Rgba = "FF0000FF".parse().unwrap();
/// assert_eq!(red, Rgba::RED);
/// assert_eq!(red.to_string(), "FF0000FF");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel. `0` is fully transparent.
    pub a: u8,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::opaque(0xFF, 0xFF, 0xFF);
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    /// Opaque mid grey.
    pub const GREY: Rgba = Rgba::opaque(0x80, 0x80, 0x80);
    /// Opaque red.
    pub const RED: Rgba = Rgba::opaque(0xFF, 0, 0);
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Construct from four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Construct an opaque colour.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// An opaque grey with all three colour channels set to `level`.
    pub const fn grey(level: u8) -> Self {
        Self::opaque(level, level, level)
    }

    /// Pack into a `0xRRGGBBAA` integer.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    /// Unpack from a `0xRRGGBBAA` integer.
    pub const fn from_u32(v: u32) -> Self {
        let [r, g, b, a] = v.to_be_bytes();
        Self { r, g, b, a }
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.len() != 8 {
            return Err(ColorError::WrongLength {
                token: token.to_string(),
            });
        }
        if !token.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::NotHex {
                token: token.to_string(),
            });
        }
        u32::from_str_radix(token, 16)
            .map(Rgba::from_u32)
            .map_err(|_| ColorError::NotHex {
                token: token.to_string(),
            })
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> String {
        c.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.to_u32())
    }
}
