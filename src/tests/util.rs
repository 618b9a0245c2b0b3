//! 测试辅助: 内存资源表与探针视图

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::color::Color;
use crate::error::BuildError;
use crate::property::PropertyDescriptor;
use crate::registry::{TypeDescriptor, TypeRegistry};
use crate::resource::{ImageRef, Resources};
use crate::value::{PropertyKind, Value};
use crate::view::{
    AppendPolicy, Capabilities, Reflect, View, ViewBase, ViewRef,
};

/// 内存资源表
#[derive(Default)]
pub struct StubResources {
    strings: HashMap<String, String>,
    colors: HashMap<String, Color>,
    documents: HashMap<String, String>,
}

impl StubResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string(mut self, key: &str, value: &str) -> Self {
        self.strings.insert(key.to_string(), value.to_string());
        self
    }

    pub fn color(mut self, name: &str, color: Color) -> Self {
        self.colors.insert(name.to_string(), color);
        self
    }

    pub fn document(mut self, name: &str, source: &str) -> Self {
        self.documents.insert(name.to_string(), source.to_string());
        self
    }
}

impl Resources for StubResources {
    fn load_image(&self, name: &str) -> Result<ImageRef, BuildError> {
        Err(crate::resource::NoResources.load_image(name).unwrap_err())
    }

    fn localized_string(&self, key: &str) -> Result<String, BuildError> {
        match self.strings.get(key) {
            Some(value) => Ok(value.clone()),
            None => Err(crate::resource::NoResources
                .localized_string(key)
                .unwrap_err()),
        }
    }

    fn include_document(&self, name: &str) -> Result<String, BuildError> {
        match self.documents.get(name) {
            Some(source) => Ok(source.clone()),
            None => Err(crate::resource::NoResources
                .include_document(name)
                .unwrap_err()),
        }
    }

    fn named_color(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }
}

/// 探针视图: 记录追加子视图时自身 tag 是否已被赋值
#[derive(Debug, Default)]
pub struct Probe {
    base: ViewBase,
    pub tag: String,
    /// 每次 append_child 时自身 tag 的快照
    pub tags_at_append: Vec<String>,
    children: Vec<ViewRef>,
}

impl Probe {
    pub const CAPABILITIES: Capabilities = Capabilities {
        instruction: false,
        raw_element: false,
        text: false,
        append: AppendPolicy::Multi,
    };
}

static PROBE_PROPERTIES: &[PropertyDescriptor] = &[PropertyDescriptor {
    name: "tag",
    kind: PropertyKind::String,
    set: |any, value| {
        if let (Some(probe), Value::String(s)) = (any.downcast_mut::<Probe>(), value) {
            probe.tag = s;
        }
    },
    get: |any| {
        any.downcast_ref::<Probe>()
            .map(|probe| Value::String(probe.tag.clone()))
    },
}];

impl Reflect for Probe {
    fn properties(&self) -> &'static [PropertyDescriptor] {
        PROBE_PROPERTIES
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

impl View for Probe {
    fn type_name(&self) -> &'static str {
        "Probe"
    }

    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn append_child(&mut self, child: ViewRef) {
        self.tags_at_append.push(self.tag.clone());
        self.children.push(child);
    }

    fn children(&self) -> &[ViewRef] {
        &self.children
    }
}

/// 内置类型 + 探针 + 命名空间 `x:probe`
pub fn registry() -> TypeRegistry {
    let probe_descriptor = TypeDescriptor {
        type_name: "Probe",
        capabilities: Probe::CAPABILITIES,
        construct: |_| Rc::new(RefCell::new(Probe::default())),
    };

    let mut registry = TypeRegistry::with_builtins();
    registry.register("probe", probe_descriptor);
    registry.register_namespaced("x", "probe", probe_descriptor);
    registry
}
