//! 视图组件系统
//! 视图是解释器实例化并配置的不透明叶子, 通过能力集声明自己接受的钩子

mod box_view;
mod button;
mod image_view;
mod label;
mod picker;
mod scroll_view;
mod table_view;

pub use box_view::{Axis, BoxView, BOX_ALIGNMENTS};
pub use button::Button;
pub use image_view::{ImageView, CONTENT_MODES};
pub use label::{Label, TEXT_ALIGNMENTS};
pub use picker::{Picker, PickerComponent, PickerRow};
pub use scroll_view::ScrollView;
pub use table_view::{TableSection, TableView};

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::color::Color;
use crate::error::BuildError;
use crate::property::PropertyDescriptor;
use crate::value::{PropertyKind, Value};

/// 共享的视图实例引用; 父视图持有强引用, outlet 与绑定持弱引用
pub type ViewRef = Rc<RefCell<dyn View>>;
pub type WeakViewRef = Weak<RefCell<dyn View>>;

/// 追加子视图的容量策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendPolicy {
    /// 叶子, 不接受子元素
    None,
    /// 单一内容槽位
    Single,
    /// 有序列表
    Multi,
}

/// 类型声明的能力集, 解释器在调用任何钩子之前检查
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    pub instruction: bool,
    pub raw_element: bool,
    pub text: bool,
    pub append: AppendPolicy,
}

impl Capabilities {
    pub const LEAF: Capabilities = Capabilities {
        instruction: false,
        raw_element: false,
        text: false,
        append: AppendPolicy::None,
    };
}

/// 可反射宿主: 属性描述符表 + 具名子对象
pub trait Reflect: 'static {
    fn properties(&self) -> &'static [PropertyDescriptor];

    fn part(&self, _name: &str) -> Option<&dyn Reflect> {
        None
    }

    fn part_mut(&mut self, _name: &str) -> Option<&mut dyn Reflect> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// 视图实例契约
/// 钩子只在类型声明了对应能力时才会被解释器调用
pub trait View: Reflect + fmt::Debug {
    fn type_name(&self) -> &'static str;

    fn base(&self) -> &ViewBase;

    fn base_mut(&mut self) -> &mut ViewBase;

    /// 处理指令钩子 (capabilities.instruction)
    fn process_instruction(&mut self, _target: &str, _data: &str) {}

    /// 原始元素钩子 (capabilities.raw_element): 解释器不做类型解析也不递归
    fn process_raw_element(
        &mut self,
        _name: &str,
        _attributes: &HashMap<String, String>,
    ) -> Result<(), BuildError> {
        Ok(())
    }

    /// 文本内容钩子 (capabilities.text)
    fn append_text(&mut self, _text: &str) {}

    /// 追加子视图钩子; 子树此时已完整配置, 容量由解释器按策略检查
    fn append_child(&mut self, _child: ViewRef) {}

    fn children(&self) -> &[ViewRef] {
        &[]
    }
}

/// 图层子对象, 经由 `layer.xxx` 嵌套路径访问
#[derive(Debug, Clone, Default)]
pub struct Layer {
    pub corner_radius: f64,
    pub border_width: f64,
    pub border_color: Option<Color>,
    pub shadow_opacity: f64,
}

static LAYER_PROPERTIES: &[PropertyDescriptor] = &[
    PropertyDescriptor {
        name: "cornerRadius",
        kind: PropertyKind::Float,
        set: |any, value| {
            if let (Some(layer), Value::Number(n)) = (any.downcast_mut::<Layer>(), value) {
                layer.corner_radius = n;
            }
        },
        get: |any| {
            any.downcast_ref::<Layer>()
                .map(|layer| Value::Number(layer.corner_radius))
        },
    },
    PropertyDescriptor {
        name: "borderWidth",
        kind: PropertyKind::Float,
        set: |any, value| {
            if let (Some(layer), Value::Number(n)) = (any.downcast_mut::<Layer>(), value) {
                layer.border_width = n;
            }
        },
        get: |any| {
            any.downcast_ref::<Layer>()
                .map(|layer| Value::Number(layer.border_width))
        },
    },
    PropertyDescriptor {
        name: "borderColor",
        kind: PropertyKind::Color,
        set: |any, value| {
            if let (Some(layer), Value::Color(c)) = (any.downcast_mut::<Layer>(), value) {
                layer.border_color = Some(c);
            }
        },
        get: |any| {
            any.downcast_ref::<Layer>()
                .and_then(|layer| layer.border_color)
                .map(Value::Color)
        },
    },
    PropertyDescriptor {
        name: "shadowOpacity",
        kind: PropertyKind::Float,
        set: |any, value| {
            if let (Some(layer), Value::Number(n)) = (any.downcast_mut::<Layer>(), value) {
                layer.shadow_opacity = n;
            }
        },
        get: |any| {
            any.downcast_ref::<Layer>()
                .map(|layer| Value::Number(layer.shadow_opacity))
        },
    },
];

impl Reflect for Layer {
    fn properties(&self) -> &'static [PropertyDescriptor] {
        LAYER_PROPERTIES
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// 所有视图共有的基础状态
#[derive(Debug, Clone)]
pub struct ViewBase {
    pub background_color: Option<Color>,
    pub tint_color: Option<Color>,
    pub alpha: f64,
    pub hidden: bool,
    /// 容器布局权重
    pub weight: f64,
    pub layer: Layer,
}

impl Default for ViewBase {
    fn default() -> Self {
        Self {
            background_color: None,
            tint_color: None,
            alpha: 1.0,
            hidden: false,
            weight: 0.0,
            layer: Layer::default(),
        }
    }
}

/// 公共基础属性表, 类型自身的表查不到时回退到这里
pub static BASE_PROPERTIES: &[PropertyDescriptor] = &[
    PropertyDescriptor {
        name: "backgroundColor",
        kind: PropertyKind::Color,
        set: |any, value| {
            if let (Some(base), Value::Color(c)) = (any.downcast_mut::<ViewBase>(), value) {
                base.background_color = Some(c);
            }
        },
        get: |any| {
            any.downcast_ref::<ViewBase>()
                .and_then(|base| base.background_color)
                .map(Value::Color)
        },
    },
    PropertyDescriptor {
        name: "tintColor",
        kind: PropertyKind::Color,
        set: |any, value| {
            if let (Some(base), Value::Color(c)) = (any.downcast_mut::<ViewBase>(), value) {
                base.tint_color = Some(c);
            }
        },
        get: |any| {
            any.downcast_ref::<ViewBase>()
                .and_then(|base| base.tint_color)
                .map(Value::Color)
        },
    },
    PropertyDescriptor {
        name: "alpha",
        kind: PropertyKind::Float,
        set: |any, value| {
            if let (Some(base), Value::Number(n)) = (any.downcast_mut::<ViewBase>(), value) {
                base.alpha = n;
            }
        },
        get: |any| {
            any.downcast_ref::<ViewBase>()
                .map(|base| Value::Number(base.alpha))
        },
    },
    PropertyDescriptor {
        name: "hidden",
        kind: PropertyKind::Bool,
        set: |any, value| {
            if let (Some(base), Value::Bool(b)) = (any.downcast_mut::<ViewBase>(), value) {
                base.hidden = b;
            }
        },
        get: |any| {
            any.downcast_ref::<ViewBase>()
                .map(|base| Value::Bool(base.hidden))
        },
    },
    PropertyDescriptor {
        name: "weight",
        kind: PropertyKind::Float,
        set: |any, value| {
            if let (Some(base), Value::Number(n)) = (any.downcast_mut::<ViewBase>(), value) {
                base.weight = n;
            }
        },
        get: |any| {
            any.downcast_ref::<ViewBase>()
                .map(|base| Value::Number(base.weight))
        },
    },
];

impl Reflect for ViewBase {
    fn properties(&self) -> &'static [PropertyDescriptor] {
        BASE_PROPERTIES
    }

    fn part(&self, name: &str) -> Option<&dyn Reflect> {
        if name == "layer" {
            Some(&self.layer)
        } else {
            None
        }
    }

    fn part_mut(&mut self, name: &str) -> Option<&mut dyn Reflect> {
        if name == "layer" {
            Some(&mut self.layer)
        } else {
            None
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
