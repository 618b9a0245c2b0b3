//! 选择器微文法测试

use crate::builder::ViewBuilder;
use crate::error::BuildErrorKind;
use crate::tests::util::registry;
use crate::view::{Picker, View};

#[test]
fn test_picker_rows_and_components() {
    let registry = registry();
    let source = r#"
        <picker>
            <?componentName 城市?>
            <row title="北京"/>
            <row title="上海" value="sh"/>
            <?componentSeparator?>
            <?componentName 区县?>
            <row title="海淀"/>
        </picker>
    "#;

    let root = ViewBuilder::new(&registry).build(source).unwrap();
    let root = root.borrow();
    let picker = root.as_any().downcast_ref::<Picker>().unwrap();

    assert_eq!(picker.components.len(), 2);
    // row 虽是注册过的容器名, 在这里走微文法而非类型解析
    assert!(picker.children().is_empty());

    let first = &picker.components[0];
    assert_eq!(first.name.as_deref(), Some("城市"));
    assert_eq!(first.rows.len(), 2);
    // value 缺省等于 title
    assert_eq!(first.rows[0].title, "北京");
    assert_eq!(first.rows[0].value, "北京");
    assert_eq!(first.rows[1].value, "sh");

    let second = &picker.components[1];
    assert_eq!(second.name.as_deref(), Some("区县"));
    assert_eq!(second.rows.len(), 1);
    assert_eq!(second.rows[0].title, "海淀");
}

#[test]
fn test_picker_trailing_separator() {
    // 末尾的分隔指令开启一个空分栏
    let registry = registry();
    let source = r#"<picker><row title="A"/><?componentSeparator?></picker>"#;

    let root = ViewBuilder::new(&registry).build(source).unwrap();
    let root = root.borrow();
    let picker = root.as_any().downcast_ref::<Picker>().unwrap();

    assert_eq!(picker.components.len(), 2);
    assert!(picker.components[1].rows.is_empty());
}

#[test]
fn test_picker_unknown_raw_element() {
    let registry = registry();
    let err = ViewBuilder::new(&registry)
        .build(r#"<picker><cell title="A"/></picker>"#)
        .unwrap_err();
    assert!(matches!(err.kind, BuildErrorKind::UnknownElement(name) if name == "cell"));
    assert_eq!(err.path, "picker/cell");
}

#[test]
fn test_picker_ignores_unknown_instruction() {
    // 选择器声明了指令能力, 不认识的目标由它自行忽略
    let registry = registry();
    let source = r#"<picker><?sectionBreak?><row title="A"/></picker>"#;

    let root = ViewBuilder::new(&registry).build(source).unwrap();
    let root = root.borrow();
    let picker = root.as_any().downcast_ref::<Picker>().unwrap();
    assert_eq!(picker.components.len(), 1);
    assert_eq!(picker.components[0].rows.len(), 1);
}

#[test]
fn test_picker_base_properties_still_apply() {
    let registry = registry();
    let source = r#"<picker alpha="0.5"><row title="A"/></picker>"#;

    let root = ViewBuilder::new(&registry).build(source).unwrap();
    assert_eq!(root.borrow().base().alpha, 0.5);
}
