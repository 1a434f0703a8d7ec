//! Display colours for published positions
//!
//! Colours are packed ARGB words that are always fully opaque. Entities without
//! an explicit colour get one derived from their key, so the same key renders
//! in the same colour for the whole session without any assignment state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::EntityKey;

const ALPHA_MASK: u32 = 0xFF00_0000;

/// Fully opaque ARGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Color(u32);

impl Color {
    /// Build a colour from any ARGB word, discarding its alpha channel
    pub fn opaque(argb: u32) -> Self {
        Color(argb | ALPHA_MASK)
    }

    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::opaque(((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    /// Stable colour for a key: its hash with the HSV value replaced by `brightness`
    pub fn derived(key: &EntityKey, brightness: f32) -> Self {
        Self::opaque(with_brightness(key.stable_hash() as u32, brightness))
    }

    pub fn argb(&self) -> u32 {
        self.0
    }

    /// 24-bit RGB part
    pub fn rgb(&self) -> u32 {
        self.0 & !ALPHA_MASK
    }

    pub fn red(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(&self) -> u8 {
        self.0 as u8
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Color::opaque(argb)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.rgb())
    }
}

/// Replace the HSV value of an ARGB colour, keeping hue, saturation and alpha
pub fn with_brightness(argb: u32, brightness: f32) -> u32 {
    let alpha = argb >> 24;
    let red = ((argb >> 16) & 0xFF) as i32;
    let green = ((argb >> 8) & 0xFF) as i32;
    let blue = (argb & 0xFF) as i32;

    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    let range = (max - min) as f32;

    let saturation = if max != 0 { range / max as f32 } else { 0.0 };
    let hue = if saturation == 0.0 {
        0.0
    } else {
        let rc = (max - red) as f32 / range;
        let gc = (max - green) as f32 / range;
        let bc = (max - blue) as f32 / range;

        let sector = if red == max {
            bc - gc
        } else if green == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        let hue = sector / 6.0;
        if hue < 0.0 {
            hue + 1.0
        } else {
            hue
        }
    };

    let (r, g, b) = hsv_to_rgb(hue, saturation, brightness);
    (alpha << 24) | (to_channel(r) << 16) | (to_channel(g) << 8) | to_channel(b)
}

fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> (f32, f32, f32) {
    let scaled = hue * 6.0;
    let sector = scaled.floor();
    let fraction = scaled - sector;

    let p = value * (1.0 - saturation);
    let q = value * (1.0 - fraction * saturation);
    let t = value * (1.0 - (1.0 - fraction) * saturation);

    match (sector as i32).rem_euclid(6) {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    }
}

fn to_channel(component: f32) -> u32 {
    ((component * 255.0 + 0.5) as i32).clamp(0, 255) as u32
}
