//! 字体描述
//! 解释器不加载字形, 只把标记中的字体值解码为描述符

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// 字体样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    Regular,
    Light,
    Medium,
    Semibold,
    Bold,
    Heavy,
    Italic,
}

impl FontStyle {
    fn from_token(token: &str) -> Option<FontStyle> {
        match token.to_ascii_lowercase().as_str() {
            "regular" => Some(FontStyle::Regular),
            "light" => Some(FontStyle::Light),
            "medium" => Some(FontStyle::Medium),
            "semibold" => Some(FontStyle::Semibold),
            "bold" => Some(FontStyle::Bold),
            "heavy" => Some(FontStyle::Heavy),
            "italic" => Some(FontStyle::Italic),
            _ => None,
        }
    }

    fn token(&self) -> &'static str {
        match self {
            FontStyle::Regular => "Regular",
            FontStyle::Light => "Light",
            FontStyle::Medium => "Medium",
            FontStyle::Semibold => "Semibold",
            FontStyle::Bold => "Bold",
            FontStyle::Heavy => "Heavy",
            FontStyle::Italic => "Italic",
        }
    }
}

/// 字体描述符; family 为空表示平台默认字族
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: Option<String>,
    pub style: FontStyle,
    pub size: f32,
}

impl Font {
    /// 默认字族
    pub fn system(size: f32) -> Self {
        Self {
            family: None,
            style: FontStyle::Regular,
            size,
        }
    }

    pub fn named(family: &str, style: FontStyle, size: f32) -> Self {
        Self {
            family: Some(family.to_string()),
            style,
            size,
        }
    }

    /// 预设文本样式名
    pub fn text_style(name: &str) -> Option<Font> {
        let (size, style) = *TEXT_STYLES.get(name)?;
        Some(Self {
            family: None,
            style,
            size,
        })
    }

    /// 解析字体值: `<family>-<style>,<size>`、预设文本样式名或纯数字
    pub fn parse(s: &str) -> Option<Font> {
        let s = s.trim();

        if let Some((spec, size)) = s.rsplit_once(',') {
            let size: f32 = size.trim().parse().ok()?;
            if size <= 0.0 {
                return None;
            }
            let spec = spec.trim();
            if spec.is_empty() {
                return None;
            }
            if let Some((family, token)) = spec.rsplit_once('-') {
                if let Some(style) = FontStyle::from_token(token) {
                    return Some(Font::named(family, style, size));
                }
            }
            return Some(Font::named(spec, FontStyle::Regular, size));
        }

        // 纯数字: 默认字族
        if let Ok(size) = s.parse::<f32>() {
            if size <= 0.0 {
                return None;
            }
            return Some(Font::system(size));
        }

        Font::text_style(s)
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.family, self.style) {
            (Some(family), FontStyle::Regular) => write!(f, "{},{}", family, self.size),
            (Some(family), style) => write!(f, "{}-{},{}", family, style.token(), self.size),
            (None, FontStyle::Regular) => write!(f, "{}", self.size),
            (None, style) => write!(f, "System-{},{}", style.token(), self.size),
        }
    }
}

/// 预设文本样式 → (字号, 样式)
static TEXT_STYLES: Lazy<HashMap<&'static str, (f32, FontStyle)>> = Lazy::new(|| {
    HashMap::from([
        ("largeTitle", (34.0, FontStyle::Regular)),
        ("title1", (28.0, FontStyle::Regular)),
        ("title2", (22.0, FontStyle::Regular)),
        ("title3", (20.0, FontStyle::Regular)),
        ("headline", (17.0, FontStyle::Semibold)),
        ("body", (17.0, FontStyle::Regular)),
        ("callout", (16.0, FontStyle::Regular)),
        ("subheadline", (15.0, FontStyle::Regular)),
        ("footnote", (13.0, FontStyle::Regular)),
        ("caption1", (12.0, FontStyle::Regular)),
        ("caption2", (11.0, FontStyle::Regular)),
    ])
});
