//! 颜色模块

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// RGBA 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
            a: 255,
        }
    }

    /// 解析颜色字面量: `#RGB` / `#RRGGBB` / `#AARRGGBB` 或内置颜色常量名
    pub fn parse(s: &str) -> Option<Color> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            // 多字节字符会让字节切片越过字符边界
            if !hex.is_ascii() {
                return None;
            }
            return match hex.len() {
                3 => {
                    let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                    let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                    let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                    Some(Color::rgb(r, g, b))
                }
                6 => {
                    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                    Some(Color::rgb(r, g, b))
                }
                // alpha 在前: #AARRGGBB
                8 => {
                    let a = u8::from_str_radix(&hex[0..2], 16).ok()?;
                    let r = u8::from_str_radix(&hex[2..4], 16).ok()?;
                    let g = u8::from_str_radix(&hex[4..6], 16).ok()?;
                    let b = u8::from_str_radix(&hex[6..8], 16).ok()?;
                    Some(Color::new(r, g, b, a))
                }
                _ => None,
            };
        }

        NAMED_COLORS.get(s.to_ascii_lowercase().as_str()).copied()
    }

    // 预定义颜色
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }
}

/// 内置颜色常量名, 小写查表
static NAMED_COLORS: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    HashMap::from([
        ("clear", Color::TRANSPARENT),
        ("transparent", Color::TRANSPARENT),
        ("black", Color::BLACK),
        ("white", Color::WHITE),
        ("red", Color::RED),
        ("green", Color::GREEN),
        ("blue", Color::BLUE),
        ("yellow", Color::rgb(255, 255, 0)),
        ("orange", Color::rgb(255, 165, 0)),
        ("purple", Color::rgb(128, 0, 128)),
        ("cyan", Color::rgb(0, 255, 255)),
        ("magenta", Color::rgb(255, 0, 255)),
        ("brown", Color::rgb(165, 42, 42)),
        ("gray", Color::rgb(128, 128, 128)),
        ("lightgray", Color::rgb(211, 211, 211)),
        ("darkgray", Color::rgb(85, 85, 85)),
    ])
});
