//! 静态内容表格
//! 行是完整构建的子视图; 分节、节名与节头/节尾由处理指令驱动

use std::any::Any;

use crate::color::Color;
use crate::property::PropertyDescriptor;
use crate::value::{PropertyKind, Value};

use super::{AppendPolicy, Capabilities, Reflect, View, ViewBase, ViewRef};

/// 下一个追加的子视图要去的槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionSlot {
    Row,
    Header,
    Footer,
}

/// 表格分节
#[derive(Debug, Default)]
pub struct TableSection {
    pub name: Option<String>,
    pub header: Option<ViewRef>,
    pub footer: Option<ViewRef>,
    pub rows: Vec<ViewRef>,
}

#[derive(Debug)]
pub struct TableView {
    base: ViewBase,
    pub separator_color: Option<Color>,
    pub sections: Vec<TableSection>,
    slot: SectionSlot,
    children: Vec<ViewRef>,
}

impl TableView {
    pub const CAPABILITIES: Capabilities = Capabilities {
        instruction: true,
        raw_element: false,
        text: false,
        append: AppendPolicy::Multi,
    };

    pub fn new() -> Self {
        Self {
            base: ViewBase::default(),
            separator_color: None,
            // 始终存在一个当前分节
            sections: vec![TableSection::default()],
            slot: SectionSlot::Row,
            children: Vec::new(),
        }
    }

    fn current(&mut self) -> &mut TableSection {
        // new() 保证至少一个分节
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// 按名称取分节
    pub fn section_named(&self, name: &str) -> Option<&TableSection> {
        self.sections
            .iter()
            .find(|section| section.name.as_deref() == Some(name))
    }
}

impl Default for TableView {
    fn default() -> Self {
        Self::new()
    }
}

static PROPERTIES: &[PropertyDescriptor] = &[PropertyDescriptor {
    name: "separatorColor",
    kind: PropertyKind::Color,
    set: |any, value| {
        if let (Some(table), Value::Color(c)) = (any.downcast_mut::<TableView>(), value) {
            table.separator_color = Some(c);
        }
    },
    get: |any| {
        any.downcast_ref::<TableView>()
            .and_then(|table| table.separator_color)
            .map(Value::Color)
    },
}];

impl Reflect for TableView {
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

impl View for TableView {
    fn type_name(&self) -> &'static str {
        "TableView"
    }

    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn process_instruction(&mut self, target: &str, data: &str) {
        match target {
            // 结束当前分节, 开启下一个; 槽位回到行
            "sectionBreak" => {
                self.sections.push(TableSection::default());
                self.slot = SectionSlot::Row;
            }
            "sectionName" => {
                let name = data.trim();
                if !name.is_empty() {
                    self.current().name = Some(name.to_string());
                }
            }
            // 下一个追加的子视图成为当前分节的节头/节尾
            "sectionHeaderView" => self.slot = SectionSlot::Header,
            "sectionFooterView" => self.slot = SectionSlot::Footer,
            // 不认识的指令对表格无害
            _ => {}
        }
    }

    fn append_child(&mut self, child: ViewRef) {
        self.children.push(child.clone());
        let slot = self.slot;
        self.slot = SectionSlot::Row;
        match slot {
            SectionSlot::Row => self.current().rows.push(child),
            SectionSlot::Header => self.current().header = Some(child),
            SectionSlot::Footer => self.current().footer = Some(child),
        }
    }

    fn children(&self) -> &[ViewRef] {
        &self.children
    }
}
