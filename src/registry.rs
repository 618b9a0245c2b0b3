//! 类型注册表
//! 元素名 → 类型描述符; 支持 `ns:name` 命名空间前缀

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::view::{
    BoxView, Button, Capabilities, ImageView, Label, Picker, ScrollView, TableView, ViewRef,
};

/// 已注册类型的描述符
/// 构造函数收到元素的本地名, row/column 之类共用一个构造函数时据此分流
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    pub type_name: &'static str,
    pub capabilities: Capabilities,
    pub construct: fn(&str) -> ViewRef,
}

/// 元素名到类型描述符的映射
pub struct TypeRegistry {
    default_ns: HashMap<String, TypeDescriptor>,
    namespaces: HashMap<String, HashMap<String, TypeDescriptor>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            default_ns: HashMap::new(),
            namespaces: HashMap::new(),
        }
    }

    /// 带全部内置类型的注册表
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        let box_descriptor = TypeDescriptor {
            type_name: "BoxView",
            capabilities: BoxView::CAPABILITIES,
            construct: |tag| Rc::new(RefCell::new(BoxView::for_tag(tag))),
        };
        registry.register("row", box_descriptor);
        registry.register("column", box_descriptor);

        registry.register(
            "label",
            TypeDescriptor {
                type_name: "Label",
                capabilities: Label::CAPABILITIES,
                construct: |_| Rc::new(RefCell::new(Label::new())),
            },
        );
        registry.register(
            "button",
            TypeDescriptor {
                type_name: "Button",
                capabilities: Button::CAPABILITIES,
                construct: |_| Rc::new(RefCell::new(Button::new())),
            },
        );
        registry.register(
            "image",
            TypeDescriptor {
                type_name: "ImageView",
                capabilities: ImageView::CAPABILITIES,
                construct: |_| Rc::new(RefCell::new(ImageView::new())),
            },
        );
        registry.register(
            "scroll",
            TypeDescriptor {
                type_name: "ScrollView",
                capabilities: ScrollView::CAPABILITIES,
                construct: |_| Rc::new(RefCell::new(ScrollView::new())),
            },
        );
        registry.register(
            "picker",
            TypeDescriptor {
                type_name: "Picker",
                capabilities: Picker::CAPABILITIES,
                construct: |_| Rc::new(RefCell::new(Picker::new())),
            },
        );
        registry.register(
            "table",
            TypeDescriptor {
                type_name: "TableView",
                capabilities: TableView::CAPABILITIES,
                construct: |_| Rc::new(RefCell::new(TableView::new())),
            },
        );

        registry
    }

    /// 注册到默认命名空间; 同名覆盖旧条目
    pub fn register(&mut self, name: &str, descriptor: TypeDescriptor) {
        self.default_ns.insert(name.to_string(), descriptor);
    }

    pub fn register_namespaced(&mut self, ns: &str, name: &str, descriptor: TypeDescriptor) {
        self.namespaces
            .entry(ns.to_string())
            .or_default()
            .insert(name.to_string(), descriptor);
    }

    /// 解析元素名; `ns:name` 查命名空间表, 其余查默认表
    pub fn resolve(&self, element_name: &str) -> Option<&TypeDescriptor> {
        if let Some((ns, name)) = element_name.split_once(':') {
            return self.namespaces.get(ns).and_then(|table| table.get(name));
        }
        self.default_ns.get(element_name)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
