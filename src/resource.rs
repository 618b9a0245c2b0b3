//! 资源加载
//! 图片、本地化字符串与可复用文档片段由外部协作者同步提供

use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use image::DynamicImage;
use serde::Deserialize;

use crate::color::Color;
use crate::error::{BuildError, BuildErrorKind};

/// 解码后的图片, 多处引用共享同一份数据
pub type ImageRef = Rc<DynamicImage>;

fn not_found(kind: &'static str, name: &str) -> BuildError {
    BuildError::new(BuildErrorKind::ResourceNotFound {
        kind,
        name: name.to_string(),
    })
}

/// 外部资源协作者
pub trait Resources {
    fn load_image(&self, name: &str) -> Result<ImageRef, BuildError>;

    fn localized_string(&self, key: &str) -> Result<String, BuildError>;

    /// 加载可复用文档片段的源文本
    fn include_document(&self, name: &str) -> Result<String, BuildError>;

    /// 主题色间接表, 在字面量解析之前查询
    fn named_color(&self, _name: &str) -> Option<Color> {
        None
    }
}

/// 不提供任何资源的协作者
#[derive(Debug, Default)]
pub struct NoResources;

impl Resources for NoResources {
    fn load_image(&self, name: &str) -> Result<ImageRef, BuildError> {
        Err(not_found("image", name))
    }

    fn localized_string(&self, key: &str) -> Result<String, BuildError> {
        Err(not_found("string", key))
    }

    fn include_document(&self, name: &str) -> Result<String, BuildError> {
        Err(not_found("document", name))
    }
}

/// theme.json 的结构
#[derive(Debug, Default, Deserialize)]
struct Theme {
    #[serde(default)]
    strings: HashMap<String, String>,
    #[serde(default)]
    colors: HashMap<String, String>,
}

/// 目录资源: 图片与文档片段按文件名查找, 字符串/主题色表来自 theme.json
pub struct DirResources {
    root: PathBuf,
    strings: HashMap<String, String>,
    colors: HashMap<String, Color>,
}

impl DirResources {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, BuildError> {
        let root = root.into();
        let mut strings = HashMap::new();
        let mut colors = HashMap::new();

        let theme_path = root.join("theme.json");
        if theme_path.exists() {
            let text = std::fs::read_to_string(&theme_path)
                .map_err(|_| not_found("theme", "theme.json"))?;
            let theme: Theme = serde_json::from_str(&text).map_err(|e| {
                BuildError::new(BuildErrorKind::ParseSyntax(format!("theme.json: {}", e)))
            })?;

            strings = theme.strings;
            for (name, value) in theme.colors {
                let color = Color::parse(&value).ok_or_else(|| {
                    BuildError::new(BuildErrorKind::Decode {
                        raw: value.clone(),
                        expected: "color",
                    })
                })?;
                colors.insert(name, color);
            }
        }

        Ok(Self {
            root,
            strings,
            colors,
        })
    }
}

impl Resources for DirResources {
    fn load_image(&self, name: &str) -> Result<ImageRef, BuildError> {
        let path = self.root.join(name);
        let path = if path.exists() {
            path
        } else {
            self.root.join(format!("{}.png", name))
        };
        image::open(&path)
            .map(Rc::new)
            .map_err(|_| not_found("image", name))
    }

    fn localized_string(&self, key: &str) -> Result<String, BuildError> {
        self.strings
            .get(key)
            .cloned()
            .ok_or_else(|| not_found("string", key))
    }

    fn include_document(&self, name: &str) -> Result<String, BuildError> {
        let path = self.root.join(format!("{}.xml", name));
        let path = if path.exists() {
            path
        } else {
            self.root.join(name)
        };
        std::fs::read_to_string(&path).map_err(|_| not_found("document", name))
    }

    fn named_color(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }
}
