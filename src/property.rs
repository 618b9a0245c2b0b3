//! 属性应用器
//! 按属性描述符表把字符串值解码并赋给目标实例; 表即显式的"反射"

use std::any::Any;

use crate::error::{BuildError, BuildErrorKind};
use crate::resource::Resources;
use crate::value::{decode, PropertyKind, Value};
use crate::view::{Reflect, View, BASE_PROPERTIES};

/// 属性描述符: 名称 → 声明类别 + 取值/赋值函数
/// 赋值函数内部向具体类型下转; 应用器保证传入的值与声明类别一致
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub kind: PropertyKind,
    pub set: fn(&mut dyn Any, Value),
    pub get: fn(&dyn Any) -> Option<Value>,
}

pub(crate) fn find(
    table: &'static [PropertyDescriptor],
    name: &str,
) -> Option<&'static PropertyDescriptor> {
    table.iter().find(|descriptor| descriptor.name == name)
}

fn unknown(type_name: &str, property: &str) -> BuildError {
    BuildError::new(BuildErrorKind::UnknownProperty {
        type_name: type_name.to_string(),
        property: property.to_string(),
    })
}

/// 按声明类别解码; 图片类别走资源查找
fn decode_for(
    descriptor: &PropertyDescriptor,
    raw: &str,
    resources: &dyn Resources,
) -> Result<Value, BuildError> {
    if matches!(descriptor.kind, PropertyKind::Image) {
        return Ok(Value::Image(resources.load_image(raw.trim())?));
    }
    decode(raw, descriptor.kind, resources)
}

/// 把字符串值应用到实例属性
/// 点路径 `outer.inner` 逐级解析子对象, 缺失的中间对象是硬错误
pub fn apply(
    view: &mut dyn View,
    name: &str,
    raw: &str,
    resources: &dyn Resources,
) -> Result<(), BuildError> {
    let type_name = view.type_name();

    if let Some((head, rest)) = name.split_once('.') {
        let part = view
            .part_mut(head)
            .ok_or_else(|| unknown(type_name, name))?;
        return apply_nested(part, rest, raw, resources, type_name, name);
    }

    if let Some(descriptor) = find(view.properties(), name) {
        let value = decode_for(descriptor, raw, resources)?;
        (descriptor.set)(view.as_any_mut(), value);
        return Ok(());
    }

    // 公共基础属性
    if let Some(descriptor) = find(BASE_PROPERTIES, name) {
        let value = decode_for(descriptor, raw, resources)?;
        (descriptor.set)(view.base_mut().as_any_mut(), value);
        return Ok(());
    }

    Err(unknown(type_name, name))
}

fn apply_nested(
    mut host: &mut dyn Reflect,
    path: &str,
    raw: &str,
    resources: &dyn Resources,
    type_name: &str,
    full_name: &str,
) -> Result<(), BuildError> {
    let mut rest = path;
    while let Some((head, tail)) = rest.split_once('.') {
        host = host
            .part_mut(head)
            .ok_or_else(|| unknown(type_name, full_name))?;
        rest = tail;
    }

    let descriptor =
        find(host.properties(), rest).ok_or_else(|| unknown(type_name, full_name))?;
    let value = decode_for(descriptor, raw, resources)?;
    (descriptor.set)(host.as_any_mut(), value);
    Ok(())
}

/// 定位路径上的属性描述符 (绑定注册时校验)
pub fn descriptor_of(view: &dyn View, path: &str) -> Option<&'static PropertyDescriptor> {
    if let Some((head, rest)) = path.split_once('.') {
        let mut host = view.part(head)?;
        let mut rest = rest;
        while let Some((h, tail)) = rest.split_once('.') {
            host = host.part(h)?;
            rest = tail;
        }
        return find(host.properties(), rest);
    }

    find(view.properties(), path).or_else(|| find(BASE_PROPERTIES, path))
}

/// 读取属性当前值 (绑定回拉)
pub fn read(view: &dyn View, path: &str) -> Option<Value> {
    if let Some((head, rest)) = path.split_once('.') {
        let mut host = view.part(head)?;
        let mut rest = rest;
        while let Some((h, tail)) = rest.split_once('.') {
            host = host.part(h)?;
            rest = tail;
        }
        let descriptor = find(host.properties(), rest)?;
        return (descriptor.get)(host.as_any());
    }

    if let Some(descriptor) = find(view.properties(), path) {
        return (descriptor.get)(view.as_any());
    }
    let descriptor = find(BASE_PROPERTIES, path)?;
    (descriptor.get)(view.base().as_any())
}

/// 写入已解码的值 (绑定下推)
pub fn write(view: &mut dyn View, path: &str, value: Value) -> Result<(), BuildError> {
    let type_name = view.type_name();

    if let Some((head, rest)) = path.split_once('.') {
        let mut host = view
            .part_mut(head)
            .ok_or_else(|| unknown(type_name, path))?;
        let mut rest = rest;
        while let Some((h, tail)) = rest.split_once('.') {
            host = host
                .part_mut(h)
                .ok_or_else(|| unknown(type_name, path))?;
            rest = tail;
        }
        let descriptor =
            find(host.properties(), rest).ok_or_else(|| unknown(type_name, path))?;
        (descriptor.set)(host.as_any_mut(), value);
        return Ok(());
    }

    if let Some(descriptor) = find(view.properties(), path) {
        (descriptor.set)(view.as_any_mut(), value);
        return Ok(());
    }
    if let Some(descriptor) = find(BASE_PROPERTIES, path) {
        (descriptor.set)(view.base_mut().as_any_mut(), value);
        return Ok(());
    }
    Err(unknown(type_name, path))
}
