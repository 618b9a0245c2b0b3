//! 单元测试模块
//! 覆盖值解码、属性应用、文档构建、绑定与选择器微文法

pub mod util;

pub mod decoder_tests;
pub mod picker_tests;
pub mod table_tests;
