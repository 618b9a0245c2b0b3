//! 图片视图
//! image 属性走资源协作者查找, 不可绑定

use std::any::Any;

use crate::property::PropertyDescriptor;
use crate::resource::ImageRef;
use crate::value::{PropertyKind, Value};

use super::{Capabilities, Reflect, View, ViewBase};

/// 内容缩放模式常量表
pub static CONTENT_MODES: &[(&str, i64)] = &[
    ("scaleToFill", 0),
    ("scaleAspectFit", 1),
    ("scaleAspectFill", 2),
    ("center", 3),
];

#[derive(Debug, Default)]
pub struct ImageView {
    base: ViewBase,
    pub image: Option<ImageRef>,
    pub content_mode: i64,
}

impl ImageView {
    pub const CAPABILITIES: Capabilities = Capabilities::LEAF;

    pub fn new() -> Self {
        Self::default()
    }
}

static PROPERTIES: &[PropertyDescriptor] = &[
    PropertyDescriptor {
        name: "image",
        kind: PropertyKind::Image,
        set: |any, value| {
            if let (Some(view), Value::Image(image)) = (any.downcast_mut::<ImageView>(), value) {
                view.image = Some(image);
            }
        },
        get: |any| {
            any.downcast_ref::<ImageView>()
                .and_then(|view| view.image.clone())
                .map(Value::Image)
        },
    },
    PropertyDescriptor {
        name: "contentMode",
        kind: PropertyKind::Enum(CONTENT_MODES),
        set: |any, value| {
            if let (Some(view), Value::Enum(v)) = (any.downcast_mut::<ImageView>(), value) {
                view.content_mode = v;
            }
        },
        get: |any| {
            any.downcast_ref::<ImageView>()
                .map(|view| Value::Enum(view.content_mode))
        },
    },
];

impl Reflect for ImageView {
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

impl View for ImageView {
    fn type_name(&self) -> &'static str {
        "ImageView"
    }

    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }
}
