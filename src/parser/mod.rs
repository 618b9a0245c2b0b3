//! 标记文档解析器

pub mod markup;

pub use markup::{Document, Element, Instruction, MarkupParser, Node};
