//! 错误类型
//! 任何解析、解码或应用失败都会中止整次构建，不返回部分结果

use std::fmt;
use thiserror::Error;

/// 构建失败的具体类别
#[derive(Debug, Error)]
pub enum BuildErrorKind {
    /// 文档格式错误
    #[error("语法错误: {0}")]
    ParseSyntax(String),

    /// 元素名无法解析为已注册类型
    #[error("未知元素 <{0}>")]
    UnknownElement(String),

    /// 目标类型没有该属性
    #[error("{type_name} 没有属性 {property}")]
    UnknownProperty { type_name: String, property: String },

    /// owner 没有声明该 outlet 槽位
    #[error("owner 没有声明 outlet {0}")]
    UnknownOutlet(String),

    /// 属性值不符合目标类型的文法
    #[error("无法把 {raw:?} 解码为 {expected}")]
    Decode { raw: String, expected: &'static str },

    /// 超出追加策略允许的子视图数量
    #[error("{type_name} 不能再接收子视图")]
    TooManyChildren { type_name: String },

    /// 调用方提供的根实例与文档声明的根类型不一致
    #[error("根视图类型不匹配: 文档要求 {expected}, 实际为 {found}")]
    RootTypeMismatch { expected: String, found: String },

    /// 处理指令既不被目标类型处理, 也不在惰性目标集合内
    #[error("不支持的处理指令 <?{0}?>")]
    UnsupportedInstruction(String),

    /// 元素内出现了非空白文本, 但类型未声明文本能力
    #[error("{type_name} 不接受文本内容")]
    UnexpectedText { type_name: String },

    /// 外部资源协作者无法解析该资源
    #[error("{kind} 资源 {name:?} 未找到")]
    ResourceNotFound { kind: &'static str, name: String },

    /// 绑定路径在注册时校验失败
    #[error("绑定路径 {0:?} 无效")]
    BindingPath(String),

    /// 文档使用了 outlet 或绑定, 但调用方没有提供 owner
    #[error("文档使用了 outlet/绑定, 但未提供 owner")]
    MissingOwner,
}

/// 构建错误, 携带出错位置的元素路径
#[derive(Debug)]
pub struct BuildError {
    /// 以 / 连接的元素路径, 与具体元素无关时为空
    pub path: String,
    pub kind: BuildErrorKind,
}

impl BuildError {
    pub fn new(kind: BuildErrorKind) -> Self {
        Self {
            path: String::new(),
            kind,
        }
    }

    /// 补全元素路径; 已有路径时保持不变 (内层更精确)
    pub fn at(mut self, path: &str) -> Self {
        if self.path.is_empty() {
            self.path = path.to_string();
        }
        self
    }
}

impl From<BuildErrorKind> for BuildError {
    fn from(kind: BuildErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.path, self.kind)
        }
    }
}

impl std::error::Error for BuildError {}
