//! 值解码器
//! 把标记中的字符串标量解码为类型化运行时值; 无状态, 同一输入恒得同一输出

use std::rc::Rc;

use crate::color::Color;
use crate::error::{BuildError, BuildErrorKind};
use crate::font::Font;
use crate::resource::{ImageRef, Resources};

/// 属性声明的值类别
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyKind {
    Bool,
    Integer,
    Float,
    String,
    Color,
    Font,
    /// 图片资源, 由应用器走资源查找而非解码器
    Image,
    /// 命名常量表: 词元 → 整数值
    Enum(&'static [(&'static str, i64)]),
}

impl PropertyKind {
    pub fn name(&self) -> &'static str {
        match self {
            PropertyKind::Bool => "bool",
            PropertyKind::Integer => "integer",
            PropertyKind::Float => "float",
            PropertyKind::String => "string",
            PropertyKind::Color => "color",
            PropertyKind::Font => "font",
            PropertyKind::Image => "image",
            PropertyKind::Enum(_) => "enum",
        }
    }
}

/// 解码后的类型化值
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Number(f64),
    String(String),
    Color(Color),
    Font(Font),
    Enum(i64),
    Image(ImageRef),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Color(a), Value::Color(b)) => a == b,
            (Value::Font(a), Value::Font(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Image(a), Value::Image(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// 解码标量字符串
pub fn decode(
    raw: &str,
    kind: PropertyKind,
    resources: &dyn Resources,
) -> Result<Value, BuildError> {
    let trimmed = raw.trim();
    let fail = || {
        BuildError::new(BuildErrorKind::Decode {
            raw: raw.to_string(),
            expected: kind.name(),
        })
    };

    match kind {
        PropertyKind::Bool => match trimmed.to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(fail()),
        },
        PropertyKind::Integer => trimmed
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| fail()),
        PropertyKind::Float => trimmed
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| fail()),
        PropertyKind::String => {
            // @key 形式: 本地化字符串表间接
            if let Some(key) = raw.strip_prefix('@') {
                return resources.localized_string(key).map(Value::String);
            }
            Ok(Value::String(raw.to_string()))
        }
        PropertyKind::Color => decode_color(trimmed, resources)
            .map(Value::Color)
            .ok_or_else(fail),
        PropertyKind::Font => Font::parse(trimmed).map(Value::Font).ok_or_else(fail),
        PropertyKind::Enum(table) => table
            .iter()
            .find(|(token, _)| *token == trimmed)
            .map(|(_, value)| Value::Enum(*value))
            .ok_or_else(fail),
        // 图片不经过解码器
        PropertyKind::Image => Err(fail()),
    }
}

/// 颜色解码: 主题间接表优先于字面量
pub fn decode_color(s: &str, resources: &dyn Resources) -> Option<Color> {
    if !s.starts_with('#') {
        if let Some(color) = resources.named_color(s) {
            return Some(color);
        }
    }
    Color::parse(s)
}
