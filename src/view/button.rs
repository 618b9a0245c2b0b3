//! 按钮

use std::any::Any;

use crate::color::Color;
use crate::font::Font;
use crate::property::PropertyDescriptor;
use crate::value::{PropertyKind, Value};

use super::{Capabilities, Reflect, View, ViewBase};

#[derive(Debug)]
pub struct Button {
    base: ViewBase,
    pub title: String,
    pub title_color: Option<Color>,
    pub font: Option<Font>,
    pub enabled: bool,
}

impl Button {
    pub const CAPABILITIES: Capabilities = Capabilities::LEAF;

    pub fn new() -> Self {
        Self {
            base: ViewBase::default(),
            title: String::new(),
            title_color: None,
            font: None,
            enabled: true,
        }
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

static PROPERTIES: &[PropertyDescriptor] = &[
    PropertyDescriptor {
        name: "title",
        kind: PropertyKind::String,
        set: |any, value| {
            if let (Some(button), Value::String(s)) = (any.downcast_mut::<Button>(), value) {
                button.title = s;
            }
        },
        get: |any| {
            any.downcast_ref::<Button>()
                .map(|button| Value::String(button.title.clone()))
        },
    },
    PropertyDescriptor {
        name: "titleColor",
        kind: PropertyKind::Color,
        set: |any, value| {
            if let (Some(button), Value::Color(c)) = (any.downcast_mut::<Button>(), value) {
                button.title_color = Some(c);
            }
        },
        get: |any| {
            any.downcast_ref::<Button>()
                .and_then(|button| button.title_color)
                .map(Value::Color)
        },
    },
    PropertyDescriptor {
        name: "font",
        kind: PropertyKind::Font,
        set: |any, value| {
            if let (Some(button), Value::Font(f)) = (any.downcast_mut::<Button>(), value) {
                button.font = Some(f);
            }
        },
        get: |any| {
            any.downcast_ref::<Button>()
                .and_then(|button| button.font.clone())
                .map(Value::Font)
        },
    },
    PropertyDescriptor {
        name: "enabled",
        kind: PropertyKind::Bool,
        set: |any, value| {
            if let (Some(button), Value::Bool(b)) = (any.downcast_mut::<Button>(), value) {
                button.enabled = b;
            }
        },
        get: |any| {
            any.downcast_ref::<Button>()
                .map(|button| Value::Bool(button.enabled))
        },
    },
];

impl Reflect for Button {
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

impl View for Button {
    fn type_name(&self) -> &'static str {
        "Button"
    }

    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }
}
