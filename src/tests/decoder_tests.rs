//! 值解码器测试

use crate::color::Color;
use crate::error::BuildErrorKind;
use crate::font::{Font, FontStyle};
use crate::resource::NoResources;
use crate::tests::util::StubResources;
use crate::value::{decode, PropertyKind, Value};
use crate::view::BOX_ALIGNMENTS;

#[test]
fn test_decode_bool() {
    assert_eq!(
        decode("true", PropertyKind::Bool, &NoResources).unwrap(),
        Value::Bool(true)
    );
    // 大小写不敏感
    assert_eq!(
        decode("FALSE", PropertyKind::Bool, &NoResources).unwrap(),
        Value::Bool(false)
    );
    assert!(matches!(
        decode("yes", PropertyKind::Bool, &NoResources)
            .unwrap_err()
            .kind,
        BuildErrorKind::Decode { .. }
    ));
}

#[test]
fn test_decode_numbers() {
    assert_eq!(
        decode(" 42 ", PropertyKind::Integer, &NoResources).unwrap(),
        Value::Integer(42)
    );
    assert_eq!(
        decode("-1.5", PropertyKind::Float, &NoResources).unwrap(),
        Value::Number(-1.5)
    );
    assert!(decode("1.5", PropertyKind::Integer, &NoResources).is_err());
    assert!(decode("abc", PropertyKind::Float, &NoResources).is_err());
}

#[test]
fn test_decode_color_literals() {
    let cases = [
        ("#F00", Color::new(255, 0, 0, 255)),
        ("#00ff00", Color::new(0, 255, 0, 255)),
        ("#80000000", Color::new(0, 0, 0, 128)),
        ("red", Color::new(255, 0, 0, 255)),
    ];
    for (raw, expected) in cases {
        assert_eq!(
            decode(raw, PropertyKind::Color, &NoResources).unwrap(),
            Value::Color(expected),
            "颜色 {:?}",
            raw
        );
    }
    assert!(decode("#12", PropertyKind::Color, &NoResources).is_err());
}

#[test]
fn test_decode_color_multibyte_literal() {
    // 多字节字符凑出 3/6/8 字节长度也只能得到解码错误, 不允许崩溃
    for raw in ["#é4", "#ééé", "#éééé"] {
        assert!(Color::parse(raw).is_none(), "颜色 {:?}", raw);
        assert!(matches!(
            decode(raw, PropertyKind::Color, &NoResources)
                .unwrap_err()
                .kind,
            BuildErrorKind::Decode { .. }
        ));
    }
}

#[test]
fn test_decode_theme_color_indirection() {
    let accent = Color::new(10, 20, 30, 255);
    let resources = StubResources::new().color("accent", accent);

    // 主题表优先于命名颜色字面量
    assert_eq!(
        decode("accent", PropertyKind::Color, &resources).unwrap(),
        Value::Color(accent)
    );
    // 主题表未覆盖时回退到字面量
    assert_eq!(
        decode("blue", PropertyKind::Color, &resources).unwrap(),
        Value::Color(Color::new(0, 0, 255, 255))
    );
}

#[test]
fn test_decode_font_grammars() {
    assert_eq!(
        decode("Helvetica-Bold,16", PropertyKind::Font, &NoResources).unwrap(),
        Value::Font(Font::named("Helvetica", FontStyle::Bold, 16.0))
    );
    assert_eq!(
        decode("17", PropertyKind::Font, &NoResources).unwrap(),
        Value::Font(Font::system(17.0))
    );
    // 预设文本样式
    assert_eq!(
        decode("headline", PropertyKind::Font, &NoResources).unwrap(),
        Value::Font(Font {
            family: None,
            style: FontStyle::Semibold,
            size: 17.0
        })
    );
    assert!(decode("Helvetica,-3", PropertyKind::Font, &NoResources).is_err());
}

#[test]
fn test_decode_enum() {
    let kind = PropertyKind::Enum(BOX_ALIGNMENTS);
    assert_eq!(decode("center", kind, &NoResources).unwrap(), Value::Enum(6));
    assert_eq!(decode("fill", kind, &NoResources).unwrap(), Value::Enum(8));
    assert!(decode("middle", kind, &NoResources).is_err());
}

#[test]
fn test_decode_localized_string() {
    let resources = StubResources::new().string("greeting", "你好");

    assert_eq!(
        decode("@greeting", PropertyKind::String, &resources).unwrap(),
        Value::String("你好".to_string())
    );
    // 缺失的键是硬错误
    assert!(matches!(
        decode("@missing", PropertyKind::String, &resources)
            .unwrap_err()
            .kind,
        BuildErrorKind::ResourceNotFound { .. }
    ));
    // 无 @ 前缀原样保留
    assert_eq!(
        decode("plain text", PropertyKind::String, &NoResources).unwrap(),
        Value::String("plain text".to_string())
    );
}

#[test]
fn test_decode_deterministic() {
    // 同一输入恒得同一输出
    let first = decode("#336699", PropertyKind::Color, &NoResources).unwrap();
    let second = decode("#336699", PropertyKind::Color, &NoResources).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_color_display_round() {
    let color = Color::parse("#336699").unwrap();
    assert_eq!(color.to_string(), "#336699");

    let translucent = Color::parse("#80336699").unwrap();
    assert_eq!(translucent.to_string(), "#80336699");
}
