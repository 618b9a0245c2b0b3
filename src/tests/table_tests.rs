//! 表格分节语义测试

use std::rc::Rc;

use crate::builder::ViewBuilder;
use crate::color::Color;
use crate::error::BuildErrorKind;
use crate::tests::util::registry;
use crate::view::{Label, TableView, View};

#[test]
fn test_table_sections_and_names() {
    let registry = registry();
    let source = r#"
        <table>
            <?sectionName 基本?>
            <label text="名称"/>
            <label text="型号"/>
            <?sectionBreak?>
            <?sectionName 高级?>
            <label text="风速"/>
        </table>
    "#;

    let root = ViewBuilder::new(&registry).build(source).unwrap();
    let root = root.borrow();
    let table = root.as_any().downcast_ref::<TableView>().unwrap();

    assert_eq!(table.sections.len(), 2);
    assert_eq!(table.sections[0].name.as_deref(), Some("基本"));
    assert_eq!(table.sections[0].rows.len(), 2);
    assert_eq!(table.sections[1].name.as_deref(), Some("高级"));
    assert_eq!(table.sections[1].rows.len(), 1);

    // 按名称取分节
    let advanced = table.section_named("高级").unwrap();
    let row = advanced.rows[0].borrow();
    assert_eq!(row.as_any().downcast_ref::<Label>().unwrap().text, "风速");
    assert!(table.section_named("missing").is_none());
}

#[test]
fn test_table_header_footer_slots() {
    let registry = registry();
    let source = r#"
        <table>
            <?sectionHeaderView?>
            <label text="头"/>
            <label text="行一"/>
            <?sectionFooterView?>
            <label text="尾"/>
            <label text="行二"/>
        </table>
    "#;

    let root = ViewBuilder::new(&registry).build(source).unwrap();
    let root = root.borrow();
    let table = root.as_any().downcast_ref::<TableView>().unwrap();

    assert_eq!(table.sections.len(), 1);
    let section = &table.sections[0];

    // 指令只改写紧随其后那一个子视图的槽位
    assert_eq!(section.rows.len(), 2);
    let header = section.header.as_ref().unwrap().borrow();
    assert_eq!(header.as_any().downcast_ref::<Label>().unwrap().text, "头");
    let footer = section.footer.as_ref().unwrap().borrow();
    assert_eq!(footer.as_any().downcast_ref::<Label>().unwrap().text, "尾");

    // 节头在追加时已配置完毕
    assert_eq!(
        section.rows[0].borrow().as_any().downcast_ref::<Label>().unwrap().text,
        "行一"
    );
}

#[test]
fn test_table_header_is_not_a_row() {
    let registry = registry();
    let source = r#"<table><?sectionHeaderView?><label text="头"/></table>"#;

    let root = ViewBuilder::new(&registry).build(source).unwrap();
    let root = root.borrow();
    let table = root.as_any().downcast_ref::<TableView>().unwrap();

    assert!(table.sections[0].rows.is_empty());
    assert!(table.sections[0].header.is_some());
    // 节头仍由表格持有
    assert_eq!(table.children().len(), 1);
    assert!(Rc::ptr_eq(
        table.sections[0].header.as_ref().unwrap(),
        &table.children()[0]
    ));
}

#[test]
fn test_table_section_break_resets_slot() {
    // 分节指令把槽位拨回行, 挂起的节头标记不跨节生效
    let registry = registry();
    let source = r#"
        <table>
            <?sectionHeaderView?>
            <?sectionBreak?>
            <label text="行"/>
        </table>
    "#;

    let root = ViewBuilder::new(&registry).build(source).unwrap();
    let root = root.borrow();
    let table = root.as_any().downcast_ref::<TableView>().unwrap();

    assert_eq!(table.sections.len(), 2);
    assert!(table.sections[1].header.is_none());
    assert_eq!(table.sections[1].rows.len(), 1);
}

#[test]
fn test_table_nested_containers_as_rows() {
    let registry = registry();
    let source = r#"
        <table separatorColor="gray">
            <row spacing="4"><image/><label text="条目"/></row>
        </table>
    "#;

    let root = ViewBuilder::new(&registry).build(source).unwrap();
    let root = root.borrow();
    let table = root.as_any().downcast_ref::<TableView>().unwrap();

    assert_eq!(table.separator_color, Some(Color::rgb(128, 128, 128)));
    // 行是完整递归构建的子树
    let row = table.sections[0].rows[0].borrow();
    assert_eq!(row.children().len(), 2);
}

#[test]
fn test_table_ignores_unknown_instruction() {
    let registry = registry();
    let source = r#"<table><?reloadData?><label text="行"/></table>"#;

    let root = ViewBuilder::new(&registry).build(source).unwrap();
    let root = root.borrow();
    let table = root.as_any().downcast_ref::<TableView>().unwrap();
    assert_eq!(table.sections[0].rows.len(), 1);
}

#[test]
fn test_table_rejects_text() {
    let registry = registry();
    let err = ViewBuilder::new(&registry)
        .build("<table>stray</table>")
        .unwrap_err();
    assert!(matches!(err.kind, BuildErrorKind::UnexpectedText { .. }));
}
