//! 视图构建器
//! 解释已解析的文档: 解析类型、实例化、应用属性、递归子树, 最后追加到父视图

use std::rc::Rc;

use tracing::{debug, trace};

use crate::binding::{BindingRegistry, Owner};
use crate::error::{BuildError, BuildErrorKind};
use crate::parser::{Document, Element, Instruction, MarkupParser, Node};
use crate::property;
use crate::registry::TypeRegistry;
use crate::resource::{NoResources, Resources};
use crate::view::{AppendPolicy, Capabilities, ViewRef};

/// 全局惰性指令目标, 在任何元素上都直接忽略
const INERT_INSTRUCTIONS: &[&str] = &["xml", "case", "end", "properties"];

static NO_RESOURCES: NoResources = NoResources;

/// 绑定属性的前缀 `bind:viewPath="ownerPath"`
const BIND_PREFIX: &str = "bind:";

/// 文档解释器
/// 属性先于子树, 子树完整后才追加到父视图
pub struct ViewBuilder<'a> {
    registry: &'a TypeRegistry,
    resources: &'a dyn Resources,
    owner: Option<&'a mut Owner>,
    bindings: Option<&'a mut BindingRegistry>,
    root: Option<ViewRef>,
    path: Vec<String>,
}

impl<'a> ViewBuilder<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            resources: &NO_RESOURCES,
            owner: None,
            bindings: None,
            root: None,
            path: Vec::new(),
        }
    }

    pub fn resources(mut self, resources: &'a dyn Resources) -> Self {
        self.resources = resources;
        self
    }

    /// outlet 与绑定的归属方
    pub fn owner(mut self, owner: &'a mut Owner) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn bindings(mut self, bindings: &'a mut BindingRegistry) -> Self {
        self.bindings = Some(bindings);
        self
    }

    /// 复用调用方提供的根实例, 类型必须与文档根元素一致
    pub fn root(mut self, root: ViewRef) -> Self {
        self.root = Some(root);
        self
    }

    /// 从源文本构建视图树
    pub fn build(mut self, source: &str) -> Result<ViewRef, BuildError> {
        let document = MarkupParser::new(source).parse()?;
        self.build_document(&document)
    }

    /// 按名称加载文档并构建
    pub fn build_named(self, name: &str) -> Result<ViewRef, BuildError> {
        let source = self.resources.include_document(name)?;
        self.build(&source)
    }

    fn build_document(&mut self, document: &Document) -> Result<ViewRef, BuildError> {
        let root_element = &document.root;
        debug!(root = %root_element.name, "构建文档");

        let descriptor = self
            .registry
            .resolve(&root_element.name)
            .copied()
            .ok_or_else(|| {
                BuildError::new(BuildErrorKind::UnknownElement(root_element.name.clone()))
                    .at(&root_element.name)
            })?;

        let view = match self.root.take() {
            Some(existing) => {
                let found = existing.borrow().type_name();
                if found != descriptor.type_name {
                    return Err(BuildError::new(BuildErrorKind::RootTypeMismatch {
                        expected: descriptor.type_name.to_string(),
                        found: found.to_string(),
                    })
                    .at(&root_element.name));
                }
                existing
            }
            None => (descriptor.construct)(local_name(&root_element.name)),
        };

        self.path.push(root_element.name.clone());

        // 根元素之前的指令归属根实例
        for instruction in &document.instructions {
            self.deliver_instruction(&view, descriptor.capabilities, instruction)?;
        }

        self.process_element(&view, descriptor.capabilities, root_element)?;
        self.path.pop();

        Ok(view)
    }

    /// 属性在前, 子节点在后
    fn process_element(
        &mut self,
        view: &ViewRef,
        capabilities: Capabilities,
        element: &Element,
    ) -> Result<(), BuildError> {
        self.apply_attributes(view, element)?;
        self.process_children(view, capabilities, element)
    }

    /// 普通属性先应用, 保留属性 (id / bind:) 最后处理
    fn apply_attributes(&mut self, view: &ViewRef, element: &Element) -> Result<(), BuildError> {
        let path = self.current_path();

        let mut outlet: Option<&str> = None;
        let mut binds: Vec<(&str, &str)> = Vec::new();

        for (name, raw) in &element.attributes {
            if name == "id" {
                outlet = Some(raw);
                continue;
            }
            if let Some(view_path) = name.strip_prefix(BIND_PREFIX) {
                binds.push((view_path, raw));
                continue;
            }

            property::apply(&mut *view.borrow_mut(), name, raw, self.resources)
                .map_err(|e| e.at(&path))?;
        }

        if let Some(field) = outlet {
            self.assign_outlet(view, field)?;
        }
        for (view_path, owner_path) in binds {
            self.register_binding(view, view_path, owner_path)?;
        }

        Ok(())
    }

    fn assign_outlet(&mut self, view: &ViewRef, field: &str) -> Result<(), BuildError> {
        let path = self.current_path();
        let owner = match self.owner.as_deref_mut() {
            Some(owner) => owner,
            None => return Err(BuildError::new(BuildErrorKind::MissingOwner).at(&path)),
        };
        trace!(field, "赋值 outlet");
        owner
            .set_outlet(field, Rc::downgrade(view))
            .map_err(|e| e.at(&path))
    }

    fn register_binding(
        &mut self,
        view: &ViewRef,
        view_path: &str,
        owner_path: &str,
    ) -> Result<(), BuildError> {
        let path = self.current_path();
        let owner = match self.owner.as_deref() {
            Some(owner) => owner,
            None => return Err(BuildError::new(BuildErrorKind::MissingOwner).at(&path)),
        };
        let bindings = match self.bindings.as_deref_mut() {
            Some(bindings) => bindings,
            None => return Err(BuildError::new(BuildErrorKind::MissingOwner).at(&path)),
        };
        bindings
            .register(owner, view, view_path, owner_path)
            .map_err(|e| e.at(&path))
    }

    fn process_children(
        &mut self,
        view: &ViewRef,
        capabilities: Capabilities,
        element: &Element,
    ) -> Result<(), BuildError> {
        // 尚未送达的指令, 归属下一个元素实例
        let mut pending: Vec<&Instruction> = Vec::new();

        for node in &element.children {
            match node {
                Node::Text(text) => {
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    if !capabilities.text {
                        let type_name = view.borrow().type_name();
                        return Err(BuildError::new(BuildErrorKind::UnexpectedText {
                            type_name: type_name.to_string(),
                        })
                        .at(&self.current_path()));
                    }
                    view.borrow_mut().append_text(trimmed);
                }

                Node::Instruction(instruction) => pending.push(instruction),

                Node::Element(child) if child.name == "include" && !capabilities.raw_element => {
                    self.build_include(view, capabilities, child, &mut pending)?;
                }

                Node::Element(child) => {
                    // 声明了原始元素能力的类型拥有全部子元素, 不做类型解析
                    if capabilities.raw_element {
                        for instruction in pending.drain(..) {
                            self.deliver_instruction(view, capabilities, instruction)?;
                        }
                        let child_path = format!("{}/{}", self.current_path(), child.name);
                        view.borrow_mut()
                            .process_raw_element(&child.name, &child.attributes)
                            .map_err(|e| e.at(&child_path))?;
                    } else if let Some(descriptor) = self.registry.resolve(&child.name).copied() {
                        let instance = (descriptor.construct)(local_name(&child.name));
                        self.path.push(child.name.clone());
                        trace!(element = %child.name, type_name = descriptor.type_name, "实例化");

                        // 指令归属紧随其后的元素; 该元素不收指令而父实例收时,
                        // 指令流向父实例 (表格分节这类容器微文法依赖这一点)
                        for instruction in pending.drain(..) {
                            if descriptor.capabilities.instruction || !capabilities.instruction {
                                self.deliver_instruction(
                                    &instance,
                                    descriptor.capabilities,
                                    instruction,
                                )?;
                            } else {
                                self.deliver_instruction(view, capabilities, instruction)?;
                            }
                        }

                        self.process_element(&instance, descriptor.capabilities, child)?;
                        self.path.pop();
                        self.append(view, capabilities, instance)?;
                    } else {
                        let child_path = format!("{}/{}", self.current_path(), child.name);
                        return Err(BuildError::new(BuildErrorKind::UnknownElement(
                            child.name.clone(),
                        ))
                        .at(&child_path));
                    }
                }
            }
        }

        // 末尾的挂起指令归属父实例
        for instruction in pending {
            self.deliver_instruction(view, capabilities, instruction)?;
        }

        Ok(())
    }

    fn deliver_instruction(
        &mut self,
        view: &ViewRef,
        capabilities: Capabilities,
        instruction: &Instruction,
    ) -> Result<(), BuildError> {
        if INERT_INSTRUCTIONS.contains(&instruction.target.as_str()) {
            return Ok(());
        }
        if !capabilities.instruction {
            return Err(BuildError::new(BuildErrorKind::UnsupportedInstruction(
                instruction.target.clone(),
            ))
            .at(&self.current_path()));
        }
        view.borrow_mut()
            .process_instruction(&instruction.target, &instruction.data);
        Ok(())
    }

    /// 按追加策略检查容量, 子树完整后才调用
    fn append(
        &mut self,
        parent: &ViewRef,
        capabilities: Capabilities,
        child: ViewRef,
    ) -> Result<(), BuildError> {
        let limit = match capabilities.append {
            AppendPolicy::None => 0,
            AppendPolicy::Single => 1,
            AppendPolicy::Multi => usize::MAX,
        };
        if parent.borrow().children().len() >= limit {
            let type_name = parent.borrow().type_name();
            return Err(BuildError::new(BuildErrorKind::TooManyChildren {
                type_name: type_name.to_string(),
            })
            .at(&self.current_path()));
        }
        parent.borrow_mut().append_child(child);
        Ok(())
    }

    /// 加载片段文档并把它的根拼接为当前元素的子视图
    fn build_include(
        &mut self,
        parent: &ViewRef,
        parent_capabilities: Capabilities,
        element: &Element,
        pending: &mut Vec<&Instruction>,
    ) -> Result<(), BuildError> {
        let path = format!("{}/include", self.current_path());

        let name = element.get_attr("name").ok_or_else(|| {
            BuildError::new(BuildErrorKind::ParseSyntax(
                "include 缺少 name 属性".to_string(),
            ))
            .at(&path)
        })?;

        debug!(name, "拼接片段");
        let source = self.resources.include_document(name)?;
        let document = MarkupParser::new(&source).parse().map_err(|e| e.at(&path))?;

        let descriptor = self
            .registry
            .resolve(&document.root.name)
            .copied()
            .ok_or_else(|| {
                BuildError::new(BuildErrorKind::UnknownElement(document.root.name.clone()))
                    .at(&path)
            })?;

        let instance = (descriptor.construct)(local_name(&document.root.name));
        self.path.push(document.root.name.clone());

        // 挂起指令与片段自身的前导指令都归属片段根实例; 归属规则同普通子元素
        for instruction in pending.drain(..) {
            if descriptor.capabilities.instruction || !parent_capabilities.instruction {
                self.deliver_instruction(&instance, descriptor.capabilities, instruction)?;
            } else {
                self.deliver_instruction(parent, parent_capabilities, instruction)?;
            }
        }
        for instruction in &document.instructions {
            self.deliver_instruction(&instance, descriptor.capabilities, instruction)?;
        }

        self.process_element(&instance, descriptor.capabilities, &document.root)?;
        self.path.pop();
        self.append(parent, parent_capabilities, instance)
    }

    fn current_path(&self) -> String {
        self.path.join("/")
    }
}

/// 去掉命名空间前缀后的本地名
fn local_name(element_name: &str) -> &str {
    match element_name.rsplit_once(':') {
        Some((_, local)) => local,
        None => element_name,
    }
}
