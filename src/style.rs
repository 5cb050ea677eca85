use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const SILVER: Color = Color::rgb(192, 192, 192);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const TEXT: Color = Color::rgb(51, 51, 51);
    pub const TICK: Color = Color::rgb(128, 128, 128);
    pub const GRID: Color = Color::rgb(238, 238, 238);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear blend towards `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Relative luminance in `[0, 1]`, used to pick readable annotation text.
    pub fn luminance(self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }
}

const FLATUI: [Color; 6] = [
    Color::rgb(0xfe, 0xdd, 0x78),
    Color::rgb(0x34, 0x8d, 0xc1),
    Color::rgb(0xaf, 0x4b, 0x64),
    Color::rgb(0x4f, 0xa4, 0x87),
    Color::rgb(0x9b, 0x59, 0xb6),
    Color::rgb(0x80, 0x80, 0x80),
];

/// Series colours for one figure.
///
/// Slot 0 is the benchmark, slot 1 the strategy, slot 2 drawdowns and the
/// last slot reference lines.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
    /// Reference ("average") lines.
    pub accent: Color,
    /// Heatmap colormap.
    pub colormap: Colormap,
    pub grayscale: bool,
}

impl Palette {
    pub fn flatui() -> Self {
        Self {
            colors: FLATUI.to_vec(),
            accent: Color::RED,
            colormap: Colormap::RdYlGn,
            grayscale: false,
        }
    }

    pub fn grayscale() -> Self {
        let mut colors = vec![Color::BLACK; FLATUI.len()];
        colors.push(Color::WHITE);
        Self {
            colors,
            accent: Color::BLACK,
            colormap: Colormap::Gray,
            grayscale: true,
        }
    }

    pub fn for_mode(grayscale: bool) -> Self {
        if grayscale {
            Self::grayscale()
        } else {
            Self::flatui()
        }
    }

    pub fn get(&self, idx: usize) -> Color {
        self.colors[idx % self.colors.len()]
    }

    pub fn benchmark(&self) -> Color {
        self.get(0)
    }

    pub fn strategy(&self) -> Color {
        self.get(1)
    }

    pub fn drawdown(&self) -> Color {
        self.get(2)
    }

    pub fn last(&self) -> Color {
        self.colors[self.colors.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Colormap {
    RdYlGn,
    Gray,
}

const RDYLGN: [Color; 11] = [
    Color::rgb(0xa5, 0x00, 0x26),
    Color::rgb(0xd7, 0x30, 0x27),
    Color::rgb(0xf4, 0x6d, 0x43),
    Color::rgb(0xfd, 0xae, 0x61),
    Color::rgb(0xfe, 0xe0, 0x8b),
    Color::rgb(0xff, 0xff, 0xbf),
    Color::rgb(0xd9, 0xef, 0x8b),
    Color::rgb(0xa6, 0xd9, 0x6a),
    Color::rgb(0x66, 0xbd, 0x63),
    Color::rgb(0x1a, 0x98, 0x50),
    Color::rgb(0x00, 0x68, 0x37),
];

impl Colormap {
    /// Colour at position `t` in `[0, 1]`.
    pub fn at(self, t: f64) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
        match self {
            Colormap::Gray => Color::BLACK.lerp(Color::WHITE, t),
            Colormap::RdYlGn => {
                let pos = t * (RDYLGN.len() - 1) as f64;
                let idx = (pos.floor() as usize).min(RDYLGN.len() - 2);
                RDYLGN[idx].lerp(RDYLGN[idx + 1], pos - idx as f64)
            }
        }
    }

    /// Colour for `value` on a scale centred at zero and spanning `±max_abs`.
    pub fn centered(self, value: f64, max_abs: f64) -> Color {
        if max_abs <= 0.0 || !max_abs.is_finite() {
            return self.at(0.5);
        }
        self.at(0.5 + value / (2.0 * max_abs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_and_rejects_garbage() {
        assert_eq!(Color::from_hex("#348dc1"), Some(Color::rgb(0x34, 0x8d, 0xc1)));
        assert_eq!(Color::rgb(0xaf, 0x4b, 0x64).to_hex(), "#af4b64");
        assert_eq!(Color::from_hex("348dc1"), None);
        assert_eq!(Color::from_hex("#34zzc1"), None);
    }

    #[test]
    fn grayscale_palette_is_black_with_white_tail() {
        let gray = Palette::grayscale();
        assert_eq!(gray.len(), 7);
        assert_eq!(gray.strategy(), Color::BLACK);
        assert_eq!(gray.last(), Color::WHITE);

        let color = Palette::flatui();
        assert_eq!(color.strategy().to_hex(), "#348dc1");
        assert_eq!(color.benchmark().to_hex(), "#fedd78");
        assert_eq!(color.last().to_hex(), "#808080");
    }

    #[test]
    fn colormap_is_centred_on_zero() {
        assert_eq!(Colormap::RdYlGn.centered(0.0, 5.0), Color::rgb(0xff, 0xff, 0xbf));
        assert_eq!(Colormap::RdYlGn.centered(-5.0, 5.0), RDYLGN[0]);
        assert_eq!(Colormap::RdYlGn.centered(5.0, 5.0), RDYLGN[10]);
        assert_eq!(Colormap::Gray.at(0.0), Color::BLACK);
        assert_eq!(Colormap::Gray.at(1.0), Color::WHITE);
    }
}
