//! Markup View - 标记驱动的视图构建引擎
//! 把声明式标记文档解释为配置完毕的视图树, 支持 outlet 与数据绑定

mod color;
mod error;
mod font;

pub use color::Color;
pub use error::{BuildError, BuildErrorKind};
pub use font::{Font, FontStyle};

// 标记文档解析器
pub mod parser;

// 值解码与属性应用
pub mod property;
pub mod value;

// 视图组件系统
pub mod view;

// 类型注册表
pub mod registry;

// 文档解释器
pub mod builder;

// owner / outlet / 数据绑定
pub mod binding;

// 外部资源协作者
pub mod resource;

pub use binding::{BindingRegistry, Owner, OwnerId};
pub use builder::ViewBuilder;
pub use registry::{TypeDescriptor, TypeRegistry};
pub use resource::{DirResources, ImageRef, NoResources, Resources};
pub use value::{PropertyKind, Value};
pub use view::{AppendPolicy, Capabilities, View, ViewRef, WeakViewRef};

// 单元测试
#[cfg(test)]
mod tests;
