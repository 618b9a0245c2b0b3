//! 标记文档解析器
//! 解析带标签的 UTF-8 文档: 唯一根元素、属性、处理指令、注释与文本

use std::collections::HashMap;

use crate::error::{BuildError, BuildErrorKind};

/// 处理指令 `<?target data?>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub target: String,
    /// 原样传递给接收方的不透明数据
    pub data: String,
}

/// 元素节点
#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attributes: HashMap<String, String>,
    /// 子节点, 插入顺序即屏幕顺序
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// 直接子元素 (跳过指令与文本)
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }
}

/// 子节点
#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Instruction(Instruction),
    Text(String),
}

/// 解析后的文档: 根元素之前的处理指令归属根元素
#[derive(Debug, Clone)]
pub struct Document {
    pub instructions: Vec<Instruction>,
    pub root: Element,
}

/// 标记解析器
pub struct MarkupParser {
    input: Vec<char>,
    pos: usize,
}

impl MarkupParser {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    pub fn parse(mut self) -> Result<Document, BuildError> {
        let mut instructions = Vec::new();
        let mut root: Option<Element> = None;

        while self.pos < self.input.len() {
            self.skip_whitespace();
            if self.pos >= self.input.len() {
                break;
            }

            if self.starts_with("<!--") {
                self.parse_comment()?;
            } else if self.starts_with("<?") {
                let instruction = self.parse_instruction()?;
                if root.is_some() {
                    return Err(self.syntax("根元素之后不允许出现处理指令"));
                }
                instructions.push(instruction);
            } else if self.current_char() == '<' {
                if self.starts_with("</") {
                    return Err(self.syntax("意外的结束标签"));
                }
                if root.is_some() {
                    return Err(self.syntax("文档只允许一个根元素"));
                }
                root = Some(self.parse_element()?);
            } else {
                let text = self.parse_text();
                if !text.trim().is_empty() {
                    return Err(self.syntax("根元素之外不允许出现文本"));
                }
            }
        }

        match root {
            Some(root) => Ok(Document { instructions, root }),
            None => Err(self.syntax("文档没有根元素")),
        }
    }

    fn parse_element(&mut self) -> Result<Element, BuildError> {
        self.expect('<')?;

        let name = self.parse_name();
        if name.is_empty() {
            return Err(self.syntax("空标签名"));
        }

        let mut element = Element::new(&name);

        // 解析属性
        loop {
            self.skip_whitespace();
            if self.pos >= self.input.len() {
                return Err(self.syntax(format!("标签 <{}> 未结束", name)));
            }
            if self.current_char() == '>' || self.starts_with("/>") {
                break;
            }
            let (attr_name, attr_value) = self.parse_attribute()?;
            element.attributes.insert(attr_name, attr_value);
        }

        // 自闭合标签
        if self.starts_with("/>") {
            self.advance();
            self.advance();
            return Ok(element);
        }

        self.expect('>')?;
        element.children = self.parse_children(&name)?;

        Ok(element)
    }

    /// 解析子节点序列, 消耗到匹配的结束标签为止
    fn parse_children(&mut self, parent: &str) -> Result<Vec<Node>, BuildError> {
        let mut children = Vec::new();

        loop {
            if self.pos >= self.input.len() {
                return Err(self.syntax(format!("缺少 </{}>", parent)));
            }

            if self.starts_with("<!--") {
                self.parse_comment()?;
                continue;
            }

            if self.starts_with("<?") {
                children.push(Node::Instruction(self.parse_instruction()?));
                continue;
            }

            if self.starts_with("</") {
                self.advance();
                self.advance();
                let end_name = self.parse_name();
                if end_name != parent {
                    return Err(self.syntax(format!(
                        "标签不匹配: <{}> 对 </{}>",
                        parent, end_name
                    )));
                }
                self.skip_whitespace();
                self.expect('>')?;
                return Ok(children);
            }

            if self.current_char() == '<' {
                children.push(Node::Element(self.parse_element()?));
                continue;
            }

            let text = self.parse_text();
            if !text.is_empty() {
                children.push(Node::Text(unescape(&text)));
            }
        }
    }

    fn parse_instruction(&mut self) -> Result<Instruction, BuildError> {
        // 跳过 <?
        self.advance();
        self.advance();

        let target = self.parse_name();
        if target.is_empty() {
            return Err(self.syntax("处理指令缺少目标"));
        }

        let mut data = String::new();
        while !self.starts_with("?>") {
            if self.pos >= self.input.len() {
                return Err(self.syntax(format!("处理指令 <?{} 未结束", target)));
            }
            data.push(self.current_char());
            self.advance();
        }
        self.advance();
        self.advance();

        Ok(Instruction {
            target,
            data: data.trim().to_string(),
        })
    }

    fn parse_name(&mut self) -> String {
        let mut name = String::new();
        while self.pos < self.input.len() {
            let c = self.current_char();
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ':' {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        name
    }

    fn parse_attribute(&mut self) -> Result<(String, String), BuildError> {
        let name = self.parse_attribute_name();
        if name.is_empty() {
            return Err(self.syntax("无法解析属性名"));
        }

        self.skip_whitespace();

        if self.current_char() != '=' {
            return Ok((name, String::new()));
        }

        self.advance(); // 跳过 '='
        self.skip_whitespace();

        let value = self.parse_attribute_value()?;

        Ok((name, unescape(&value)))
    }

    fn parse_attribute_name(&mut self) -> String {
        let mut name = String::new();
        while self.pos < self.input.len() {
            let c = self.current_char();
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ':' || c == '.' {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        name
    }

    fn parse_attribute_value(&mut self) -> Result<String, BuildError> {
        let quote = self.current_char();
        if quote != '"' && quote != '\'' {
            // 无引号值
            let mut value = String::new();
            while self.pos < self.input.len() {
                let c = self.current_char();
                if c.is_whitespace() || c == '>' || c == '/' {
                    break;
                }
                value.push(c);
                self.advance();
            }
            return Ok(value);
        }

        self.advance(); // 跳过开引号

        let mut value = String::new();
        while self.pos < self.input.len() && self.current_char() != quote {
            value.push(self.current_char());
            self.advance();
        }

        if self.pos >= self.input.len() {
            return Err(self.syntax("属性值未闭合"));
        }
        self.advance(); // 跳过闭引号

        Ok(value)
    }

    fn parse_text(&mut self) -> String {
        let mut text = String::new();
        while self.pos < self.input.len() && self.current_char() != '<' {
            text.push(self.current_char());
            self.advance();
        }
        text
    }

    fn parse_comment(&mut self) -> Result<(), BuildError> {
        // 跳过 <!--
        for _ in 0..4 {
            self.advance();
        }

        while self.pos < self.input.len() && !self.starts_with("-->") {
            self.advance();
        }

        if self.pos >= self.input.len() {
            return Err(self.syntax("注释未结束"));
        }

        // 跳过 -->
        for _ in 0..3 {
            self.advance();
        }

        Ok(())
    }

    fn current_char(&self) -> char {
        if self.pos < self.input.len() {
            self.input[self.pos]
        } else {
            '\0'
        }
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        let chars: Vec<char> = s.chars().collect();
        for (i, c) in chars.iter().enumerate() {
            if self.pos + i >= self.input.len() || self.input[self.pos + i] != *c {
                return false;
            }
        }
        true
    }

    fn expect(&mut self, c: char) -> Result<(), BuildError> {
        if self.current_char() == c {
            self.advance();
            Ok(())
        } else {
            Err(self.syntax(format!(
                "期望 '{}', 实际为 '{}'",
                c,
                self.current_char()
            )))
        }
    }

    fn syntax(&self, message: impl Into<String>) -> BuildError {
        BuildError::new(BuildErrorKind::ParseSyntax(format!(
            "{} (偏移 {})",
            message.into(),
            self.pos
        )))
    }
}

/// 解码五个标准实体, 其余字符原样保留
fn unescape(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let source = r#"<column spacing="8"><label text="Hello"/></column>"#;
        let document = MarkupParser::new(source).parse().unwrap();

        assert_eq!(document.root.name, "column");
        assert_eq!(document.root.get_attr("spacing"), Some("8"));
        assert_eq!(document.root.children.len(), 1);

        match &document.root.children[0] {
            Node::Element(child) => {
                assert_eq!(child.name, "label");
                assert_eq!(child.get_attr("text"), Some("Hello"));
            }
            other => panic!("期望元素节点, 实际为 {:?}", other),
        }
    }

    #[test]
    fn test_parse_instructions() {
        let source = "<?properties theme?><picker><row title=\"A\"/><?componentSeparator?><row title=\"B\"/></picker>";
        let document = MarkupParser::new(source).parse().unwrap();

        assert_eq!(document.instructions.len(), 1);
        assert_eq!(document.instructions[0].target, "properties");
        assert_eq!(document.instructions[0].data, "theme");

        let instructions: Vec<_> = document
            .root
            .children
            .iter()
            .filter(|n| matches!(n, Node::Instruction(_)))
            .collect();
        assert_eq!(instructions.len(), 1);
    }

    #[test]
    fn test_parse_text_and_entities() {
        let source = "<label>Tom &amp; Jerry</label>";
        let document = MarkupParser::new(source).parse().unwrap();

        match &document.root.children[0] {
            Node::Text(text) => assert_eq!(text, "Tom & Jerry"),
            other => panic!("期望文本节点, 实际为 {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_tags() {
        let result = MarkupParser::new("<row><label></row>").parse();
        assert!(matches!(
            result.unwrap_err().kind,
            BuildErrorKind::ParseSyntax(_)
        ));
    }

    #[test]
    fn test_multiple_roots() {
        let result = MarkupParser::new("<row/><row/>").parse();
        assert!(matches!(
            result.unwrap_err().kind,
            BuildErrorKind::ParseSyntax(_)
        ));
    }

    #[test]
    fn test_comment_skipped() {
        let source = "<!-- 页面骨架 --><row><!-- 占位 --><label/></row>";
        let document = MarkupParser::new(source).parse().unwrap();
        assert_eq!(document.root.child_elements().count(), 1);
    }
}
