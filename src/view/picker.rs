//! 选择器
//! 行与分栏由原始元素和处理指令微文法驱动, 解释器不递归行元素

use std::any::Any;
use std::collections::HashMap;

use crate::error::{BuildError, BuildErrorKind};
use crate::property::PropertyDescriptor;

use super::{AppendPolicy, Capabilities, Reflect, View, ViewBase};

/// 选择器行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerRow {
    pub title: String,
    /// 缺省等于 title
    pub value: String,
}

/// 选择器分栏
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerComponent {
    pub name: Option<String>,
    pub rows: Vec<PickerRow>,
}

#[derive(Debug)]
pub struct Picker {
    base: ViewBase,
    pub components: Vec<PickerComponent>,
}

impl Picker {
    pub const CAPABILITIES: Capabilities = Capabilities {
        instruction: true,
        raw_element: true,
        text: false,
        append: AppendPolicy::None,
    };

    pub fn new() -> Self {
        Self {
            base: ViewBase::default(),
            // 始终存在一个当前分栏
            components: vec![PickerComponent::default()],
        }
    }

    fn current(&mut self) -> &mut PickerComponent {
        // new() 保证至少一个分栏
        let last = self.components.len() - 1;
        &mut self.components[last]
    }
}

impl Default for Picker {
    fn default() -> Self {
        Self::new()
    }
}

static PROPERTIES: &[PropertyDescriptor] = &[];

impl Reflect for Picker {
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

impl View for Picker {
    fn type_name(&self) -> &'static str {
        "Picker"
    }

    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn process_instruction(&mut self, target: &str, data: &str) {
        match target {
            // 结束当前分栏, 开启下一个
            "componentSeparator" => self.components.push(PickerComponent::default()),
            "componentName" => {
                let name = data.trim();
                if !name.is_empty() {
                    self.current().name = Some(name.to_string());
                }
            }
            // 不认识的指令对选择器无害
            _ => {}
        }
    }

    fn process_raw_element(
        &mut self,
        name: &str,
        attributes: &HashMap<String, String>,
    ) -> Result<(), BuildError> {
        if name != "row" {
            return Err(BuildError::new(BuildErrorKind::UnknownElement(
                name.to_string(),
            )));
        }

        let title = attributes.get("title").cloned().unwrap_or_default();
        let value = attributes
            .get("value")
            .cloned()
            .unwrap_or_else(|| title.clone());
        self.current().rows.push(PickerRow { title, value });
        Ok(())
    }
}
