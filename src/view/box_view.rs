//! 线性容器
//! row 横向, column 纵向; 子视图按文档顺序追加

use std::any::Any;

use crate::property::PropertyDescriptor;
use crate::value::{PropertyKind, Value};

use super::{AppendPolicy, Capabilities, Reflect, View, ViewBase, ViewRef};

/// 排布主轴
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// 对齐常量表
pub static BOX_ALIGNMENTS: &[(&str, i64)] = &[
    ("top", 0),
    ("bottom", 1),
    ("left", 2),
    ("right", 3),
    ("leading", 4),
    ("trailing", 5),
    ("center", 6),
    ("baseline", 7),
    ("fill", 8),
];

#[derive(Debug)]
pub struct BoxView {
    base: ViewBase,
    pub axis: Axis,
    pub spacing: f64,
    pub alignment: i64,
    children: Vec<ViewRef>,
}

impl BoxView {
    pub const CAPABILITIES: Capabilities = Capabilities {
        instruction: false,
        raw_element: false,
        text: false,
        append: AppendPolicy::Multi,
    };

    pub fn new(axis: Axis) -> Self {
        Self {
            base: ViewBase::default(),
            axis,
            spacing: 0.0,
            alignment: 8, // fill
            children: Vec::new(),
        }
    }

    /// 由元素名选取主轴: row 横向, 其余纵向
    pub fn for_tag(tag: &str) -> Self {
        if tag == "row" {
            Self::new(Axis::Horizontal)
        } else {
            Self::new(Axis::Vertical)
        }
    }
}

static PROPERTIES: &[PropertyDescriptor] = &[
    PropertyDescriptor {
        name: "spacing",
        kind: PropertyKind::Float,
        set: |any, value| {
            if let (Some(view), Value::Number(n)) = (any.downcast_mut::<BoxView>(), value) {
                view.spacing = n;
            }
        },
        get: |any| {
            any.downcast_ref::<BoxView>()
                .map(|view| Value::Number(view.spacing))
        },
    },
    PropertyDescriptor {
        name: "alignment",
        kind: PropertyKind::Enum(BOX_ALIGNMENTS),
        set: |any, value| {
            if let (Some(view), Value::Enum(v)) = (any.downcast_mut::<BoxView>(), value) {
                view.alignment = v;
            }
        },
        get: |any| {
            any.downcast_ref::<BoxView>()
                .map(|view| Value::Enum(view.alignment))
        },
    },
];

impl Reflect for BoxView {
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

impl View for BoxView {
    fn type_name(&self) -> &'static str {
        "BoxView"
    }

    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn append_child(&mut self, child: ViewRef) {
        self.children.push(child);
    }

    fn children(&self) -> &[ViewRef] {
        &self.children
    }
}
