//! 24-bit RGB color.

use std::fmt;
use std::str::FromStr;

/// A 24-bit RGB color, stored as `0x00rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);

    /// Build from individual channels.
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    #[must_use]
    pub const fn red(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    #[must_use]
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    #[must_use]
    pub const fn blue(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Serialized form, `#rrggbb` lowercase.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = String;

    /// Parse a `#rrggbb` color token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("color must start with '#': {s}"))?;
        if hex.len() != 6 {
            return Err(format!("color must be 6 hex digits: {s}"));
        }
        let value =
            u32::from_str_radix(hex, 16).map_err(|_| format!("invalid color value: {s}"))?;
        Ok(Color(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let color = Color::from_rgb(0x12, 0xab, 0xef);
        assert_eq!(color.to_hex(), "#12abef");
        assert_eq!("#12abef".parse::<Color>().unwrap(), color);
    }

    #[test]
    fn test_channels() {
        let color = Color(0x336699);
        assert_eq!(color.red(), 0x33);
        assert_eq!(color.green(), 0x66);
        assert_eq!(color.blue(), 0x99);
    }

    #[test]
    fn test_rejects_bad_tokens() {
        assert!("336699".parse::<Color>().is_err());
        assert!("#33669".parse::<Color>().is_err());
        assert!("#33669g".parse::<Color>().is_err());
    }
}
