//! 文本标签
//! 接受文本内容节点, 不接受子视图

use std::any::Any;

use crate::color::Color;
use crate::font::Font;
use crate::property::PropertyDescriptor;
use crate::value::{PropertyKind, Value};

use super::{AppendPolicy, Capabilities, Reflect, View, ViewBase};

/// 文本对齐常量表
pub static TEXT_ALIGNMENTS: &[(&str, i64)] = &[
    ("left", 0),
    ("center", 1),
    ("right", 2),
    ("justified", 3),
    ("natural", 4),
];

#[derive(Debug, Default)]
pub struct Label {
    base: ViewBase,
    pub text: String,
    pub text_color: Option<Color>,
    pub font: Option<Font>,
    pub text_alignment: i64,
    pub number_of_lines: i64,
}

impl Label {
    pub const CAPABILITIES: Capabilities = Capabilities {
        instruction: false,
        raw_element: false,
        text: true,
        append: AppendPolicy::None,
    };

    pub fn new() -> Self {
        Self {
            number_of_lines: 1,
            ..Default::default()
        }
    }
}

static PROPERTIES: &[PropertyDescriptor] = &[
    PropertyDescriptor {
        name: "text",
        kind: PropertyKind::String,
        set: |any, value| {
            if let (Some(label), Value::String(s)) = (any.downcast_mut::<Label>(), value) {
                label.text = s;
            }
        },
        get: |any| {
            any.downcast_ref::<Label>()
                .map(|label| Value::String(label.text.clone()))
        },
    },
    PropertyDescriptor {
        name: "textColor",
        kind: PropertyKind::Color,
        set: |any, value| {
            if let (Some(label), Value::Color(c)) = (any.downcast_mut::<Label>(), value) {
                label.text_color = Some(c);
            }
        },
        get: |any| {
            any.downcast_ref::<Label>()
                .and_then(|label| label.text_color)
                .map(Value::Color)
        },
    },
    PropertyDescriptor {
        name: "font",
        kind: PropertyKind::Font,
        set: |any, value| {
            if let (Some(label), Value::Font(f)) = (any.downcast_mut::<Label>(), value) {
                label.font = Some(f);
            }
        },
        get: |any| {
            any.downcast_ref::<Label>()
                .and_then(|label| label.font.clone())
                .map(Value::Font)
        },
    },
    PropertyDescriptor {
        name: "textAlignment",
        kind: PropertyKind::Enum(TEXT_ALIGNMENTS),
        set: |any, value| {
            if let (Some(label), Value::Enum(v)) = (any.downcast_mut::<Label>(), value) {
                label.text_alignment = v;
            }
        },
        get: |any| {
            any.downcast_ref::<Label>()
                .map(|label| Value::Enum(label.text_alignment))
        },
    },
    PropertyDescriptor {
        name: "numberOfLines",
        kind: PropertyKind::Integer,
        set: |any, value| {
            if let (Some(label), Value::Integer(n)) = (any.downcast_mut::<Label>(), value) {
                label.number_of_lines = n;
            }
        },
        get: |any| {
            any.downcast_ref::<Label>()
                .map(|label| Value::Integer(label.number_of_lines))
        },
    },
];

impl Reflect for Label {
    fn properties(&self) -> &'static [PropertyDescriptor] {
        PROPERTIES
    }

    fn part(&self, name: &str) -> Option<&dyn Reflect> {
        self.base.part(name)
    }

    fn part_mut(&mut self, name: &str) -> Option<&mut dyn Reflect> {
        self.base.part_mut(name)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl View for Label {
    fn type_name(&self) -> &'static str {
        "Label"
    }

    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn append_text(&mut self, text: &str) {
        self.text.push_str(text);
    }
}
