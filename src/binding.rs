//! owner 与数据绑定
//! outlet 是 owner 上的弱引用槽位; 绑定把 owner 数据路径和视图属性路径连起来,
//! 推拉都是显式调用, 没有自动观察

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::color::Color;
use crate::error::{BuildError, BuildErrorKind};
use crate::font::Font;
use crate::property;
use crate::value::{PropertyKind, Value};
use crate::view::{ViewRef, WeakViewRef};

static OWNER_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// owner 的进程内唯一标识, 绑定表以此为键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(pub u64);

impl OwnerId {
    fn next() -> Self {
        Self(OWNER_ID_COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

/// 文档的归属方: 持有数据与声明好的 outlet 槽位
pub struct Owner {
    id: OwnerId,
    data: JsonValue,
    outlets: HashMap<String, Option<WeakViewRef>>,
}

impl Owner {
    pub fn new(data: JsonValue) -> Self {
        Self {
            id: OwnerId::next(),
            data,
            outlets: HashMap::new(),
        }
    }

    /// 预先声明 outlet 槽位; 未声明的槽位在构建时是硬错误
    pub fn with_outlets(data: JsonValue, fields: &[&str]) -> Self {
        let mut owner = Self::new(data);
        for field in fields {
            owner.declare_outlet(field);
        }
        owner
    }

    pub fn id(&self) -> OwnerId {
        self.id
    }

    pub fn declare_outlet(&mut self, field: &str) {
        self.outlets.insert(field.to_string(), None);
    }

    /// 构建器填充槽位; 槽位必须已声明
    pub(crate) fn set_outlet(&mut self, field: &str, view: WeakViewRef) -> Result<(), BuildError> {
        match self.outlets.get_mut(field) {
            Some(slot) => {
                *slot = Some(view);
                Ok(())
            }
            None => Err(BuildError::new(BuildErrorKind::UnknownOutlet(
                field.to_string(),
            ))),
        }
    }

    /// 取 outlet 指向的视图; 视图已释放或未填充时为 None
    pub fn outlet(&self, field: &str) -> Option<ViewRef> {
        self.outlets
            .get(field)
            .and_then(|slot| slot.as_ref())
            .and_then(|weak| weak.upgrade())
    }

    pub fn data(&self) -> &JsonValue {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut JsonValue {
        &mut self.data
    }

    /// 按点路径读数据, 支持 `items[0]` 下标
    pub fn value(&self, path: &str) -> Result<&JsonValue, BuildError> {
        json_path(&self.data, path)
            .ok_or_else(|| BuildError::new(BuildErrorKind::BindingPath(path.to_string())))
    }

    pub fn set_value(&mut self, path: &str, value: JsonValue) -> Result<(), BuildError> {
        let slot = json_path_mut(&mut self.data, path)
            .ok_or_else(|| BuildError::new(BuildErrorKind::BindingPath(path.to_string())))?;
        *slot = value;
        Ok(())
    }
}

fn json_path<'v>(mut current: &'v JsonValue, path: &str) -> Option<&'v JsonValue> {
    for segment in path.split('.') {
        let (key, index) = split_index(segment)?;
        if !key.is_empty() {
            current = current.get(key)?;
        }
        if let Some(index) = index {
            current = current.get(index)?;
        }
    }
    Some(current)
}

fn json_path_mut<'v>(mut current: &'v mut JsonValue, path: &str) -> Option<&'v mut JsonValue> {
    for segment in path.split('.') {
        let (key, index) = split_index(segment)?;
        if !key.is_empty() {
            current = current.get_mut(key)?;
        }
        if let Some(index) = index {
            current = current.get_mut(index)?;
        }
    }
    Some(current)
}

/// `items[2]` → ("items", Some(2)); 无下标时原样返回
fn split_index(segment: &str) -> Option<(&str, Option<usize>)> {
    match segment.find('[') {
        Some(open) => {
            let close = segment.rfind(']')?;
            if close <= open {
                return None;
            }
            let index = segment[open + 1..close].parse::<usize>().ok()?;
            Some((&segment[..open], Some(index)))
        }
        None => Some((segment, None)),
    }
}

/// 已注册的单条绑定
pub struct Binding {
    pub owner_path: String,
    pub view: WeakViewRef,
    pub view_path: String,
    pub kind: PropertyKind,
}

/// 绑定表, 按 owner 分组
#[derive(Default)]
pub struct BindingRegistry {
    bindings: HashMap<OwnerId, Vec<Binding>>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一条绑定; 两侧路径都在此刻校验
    pub(crate) fn register(
        &mut self,
        owner: &Owner,
        view: &ViewRef,
        view_path: &str,
        owner_path: &str,
    ) -> Result<(), BuildError> {
        // owner 侧路径必须当下可达
        owner.value(owner_path)?;

        let kind = {
            let borrowed = view.borrow();
            let descriptor = property::descriptor_of(&*borrowed, view_path).ok_or_else(|| {
                BuildError::new(BuildErrorKind::UnknownProperty {
                    type_name: borrowed.type_name().to_string(),
                    property: view_path.to_string(),
                })
            })?;
            descriptor.kind
        };

        // 图片属性不可绑定
        if matches!(kind, PropertyKind::Image) {
            return Err(BuildError::new(BuildErrorKind::BindingPath(format!(
                "{} (image)",
                view_path
            ))));
        }

        debug!(owner_path, view_path, "注册绑定");
        self.bindings.entry(owner.id()).or_default().push(Binding {
            owner_path: owner_path.to_string(),
            view: std::rc::Rc::downgrade(view),
            view_path: view_path.to_string(),
            kind,
        });
        Ok(())
    }

    /// owner 数据 → 视图属性; 返回实际写入的条数, 已释放的视图跳过
    pub fn push_owner_to_view(&self, owner: &Owner) -> Result<usize, BuildError> {
        let mut pushed = 0;
        let Some(bindings) = self.bindings.get(&owner.id()) else {
            return Ok(0);
        };

        for binding in bindings {
            let Some(view) = binding.view.upgrade() else {
                continue;
            };
            let json = owner.value(&binding.owner_path)?;
            let value = json_to_value(json, binding.kind).ok_or_else(|| {
                BuildError::new(BuildErrorKind::Decode {
                    raw: json.to_string(),
                    expected: binding.kind.name(),
                })
            })?;
            property::write(&mut *view.borrow_mut(), &binding.view_path, value)?;
            pushed += 1;
        }
        Ok(pushed)
    }

    /// 视图属性 → owner 数据; 返回实际回写的条数
    pub fn pull_view_to_owner(&self, owner: &mut Owner) -> Result<usize, BuildError> {
        let mut pulled = 0;
        let Some(bindings) = self.bindings.get(&owner.id()) else {
            return Ok(0);
        };

        for binding in bindings {
            let Some(view) = binding.view.upgrade() else {
                continue;
            };
            let value = property::read(&*view.borrow(), &binding.view_path);
            let Some(value) = value else {
                continue;
            };
            owner.set_value(&binding.owner_path, value_to_json(&value))?;
            pulled += 1;
        }
        Ok(pulled)
    }

    /// 释放该 owner 的全部绑定; 没有绑定时无事发生
    pub fn release_all(&mut self, owner: &Owner) {
        self.bindings.remove(&owner.id());
    }

    pub fn count(&self, owner: &Owner) -> usize {
        self.bindings
            .get(&owner.id())
            .map(|bindings| bindings.len())
            .unwrap_or(0)
    }
}

/// 按声明类别把 JSON 值转为类型化值
fn json_to_value(json: &JsonValue, kind: PropertyKind) -> Option<Value> {
    match kind {
        PropertyKind::Bool => json.as_bool().map(Value::Bool),
        PropertyKind::Integer => json.as_i64().map(Value::Integer),
        PropertyKind::Float => json.as_f64().map(Value::Number),
        PropertyKind::String => json.as_str().map(|s| Value::String(s.to_string())),
        PropertyKind::Color => json.as_str().and_then(Color::parse).map(Value::Color),
        PropertyKind::Font => json.as_str().and_then(Font::parse).map(Value::Font),
        PropertyKind::Enum(table) => match json {
            JsonValue::String(token) => table
                .iter()
                .find(|(t, _)| *t == token.as_str())
                .map(|(_, v)| Value::Enum(*v)),
            JsonValue::Number(n) => n.as_i64().map(Value::Enum),
            _ => None,
        },
        PropertyKind::Image => None,
    }
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Integer(n) => JsonValue::from(*n),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Color(c) => JsonValue::String(c.to_string()),
        Value::Font(f) => JsonValue::String(f.to_string()),
        Value::Enum(v) => JsonValue::from(*v),
        Value::Image(_) => JsonValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_path() {
        let data = json!({"user": {"name": "Ada", "tags": ["a", "b"]}});
        assert_eq!(json_path(&data, "user.name"), Some(&json!("Ada")));
        assert_eq!(json_path(&data, "user.tags[1]"), Some(&json!("b")));
        assert_eq!(json_path(&data, "user.missing"), None);
        assert_eq!(json_path(&data, "user.tags[9]"), None);
    }

    #[test]
    fn test_set_value() {
        let mut owner = Owner::new(json!({"count": 1}));
        owner.set_value("count", json!(2)).unwrap();
        assert_eq!(owner.value("count").unwrap(), &json!(2));

        let err = owner.set_value("missing.path", json!(0)).unwrap_err();
        assert!(matches!(err.kind, BuildErrorKind::BindingPath(_)));
    }
}
