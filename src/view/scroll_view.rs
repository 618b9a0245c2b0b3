//! 滚动容器
//! 单一内容槽位, 第二个子元素是硬错误

use std::any::Any;

use crate::property::PropertyDescriptor;
use crate::value::{PropertyKind, Value};

use super::{AppendPolicy, Capabilities, Reflect, View, ViewBase, ViewRef};

#[derive(Debug)]
pub struct ScrollView {
    base: ViewBase,
    pub shows_indicators: bool,
    content: Vec<ViewRef>,
}

impl ScrollView {
    pub const CAPABILITIES: Capabilities = Capabilities {
        instruction: false,
        raw_element: false,
        text: false,
        append: AppendPolicy::Single,
    };

    pub fn new() -> Self {
        Self {
            base: ViewBase::default(),
            shows_indicators: true,
            content: Vec::new(),
        }
    }

    pub fn content(&self) -> Option<&ViewRef> {
        self.content.first()
    }
}

impl Default for ScrollView {
    fn default() -> Self {
        Self::new()
    }
}

static PROPERTIES: &[PropertyDescriptor] = &[PropertyDescriptor {
    name: "showsIndicators",
    kind: PropertyKind::Bool,
    set: |any, value| {
        if let (Some(view), Value::Bool(b)) = (any.downcast_mut::<ScrollView>(), value) {
            view.shows_indicators = b;
        }
    },
    get: |any| {
        any.downcast_ref::<ScrollView>()
            .map(|view| Value::Bool(view.shows_indicators))
    },
}];

impl Reflect for ScrollView {
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

impl View for ScrollView {
    fn type_name(&self) -> &'static str {
        "ScrollView"
    }

    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn append_child(&mut self, child: ViewRef) {
        self.content.push(child);
    }

    fn children(&self) -> &[ViewRef] {
        &self.content
    }
}
