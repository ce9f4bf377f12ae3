use itemtree::{ErrorKind, ItemId, ItemTree, TreeError, Value, Vocabulary, XmlElement};

use crate::utils::{build_tree, chain_schema, try_build, try_build_with};

#[test]
fn builds_nested_schema_with_packed_ids() {
    let tree = build_tree(
        r#"<Schema>
            <Content index="1" name="student">
                <Content index="1" name="age"/>
                <Content index="2" name="score">
                    <Content index="1" name="math"/>
                    <Content index="2" name="physics"/>
                </Content>
            </Content>
            <Content index="2" name="teacher"/>
        </Schema>"#,
    );
    assert_eq!(tree.len(), 6);
    let ids: Vec<(Option<&str>, u32)> = tree.iter().map(|item| (item.name(), item.id().raw())).collect();
    assert_eq!(
        ids,
        vec![
            (None, 0x0),
            (Some("student"), 0x1),
            (Some("age"), 0x11),
            (Some("score"), 0x21),
            (Some("math"), 0x121),
            (Some("physics"), 0x221),
            (Some("teacher"), 0x2),
        ]
    );
}

#[test]
fn sibling_indices_need_not_follow_document_order() {
    let tree = build_tree(
        r#"<Schema>
            <Content index="7" name="seven"/>
            <Content index="3" name="three">
                <Content index="15" name="fifteen"/>
            </Content>
        </Schema>"#,
    );
    assert_eq!(tree.item_name(ItemId::from_raw(0x7)), Some("seven"));
    assert_eq!(tree.item_name(ItemId::from_raw(0x3)), Some("three"));
    assert_eq!(tree.item_name(ItemId::from_raw(0xf3)), Some("fifteen"));
    assert_eq!(tree.item_name(ItemId::from_raw(0x1)), None);
    assert_eq!(tree.item_name(ItemId::from_raw(0xf4)), None);
    assert_eq!(tree.item_name(ItemId::ROOT), None);
    assert!(tree.find_by_id(ItemId::ROOT).is_some());
}

#[test]
fn non_item_children_are_ignored() {
    let tree = build_tree(
        r#"<Schema>
            <Comment>not an item</Comment>
            <Content index="1" name="student"><Note/></Content>
        </Schema>"#,
    );
    assert_eq!(tree.len(), 1);
}

#[test]
fn schema_without_items_fails() {
    let err = try_build("<Schema><Other/></Schema>").unwrap_err();
    assert_eq!(
        err,
        TreeError::NoXmlNode {
            tag: "Content".to_string()
        }
    );
    assert_eq!(err.kind(), ErrorKind::NoXmlNode);
}

#[test]
fn duplicate_sibling_index_fails() {
    let err = try_build(
        r#"<Schema>
            <Content index="1" name="first"/>
            <Content index="1" name="second"/>
        </Schema>"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        TreeError::UsedIndex {
            index: 1,
            owner: "<root>".to_string()
        }
    );
}

#[test]
fn duplicate_index_in_nested_level_fails_whole_build() {
    let err = try_build(
        r#"<Schema>
            <Content index="1" name="good"/>
            <Content index="2" name="parent">
                <Content index="4" name="a"/>
                <Content index="4" name="b"/>
            </Content>
        </Schema>"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UsedIndex);
    assert!(err.to_string().contains("`parent`"));
}

#[test]
fn out_of_range_index_fails() {
    for index in ["0", "16", "x", "-3"] {
        let schema = format!(r#"<Schema><Content index="{index}" name="a"/></Schema>"#);
        assert_eq!(
            try_build(&schema).unwrap_err(),
            TreeError::IllegalIndex {
                index: index.to_string()
            },
            "index {index:?}"
        );
    }
}

#[test]
fn missing_attributes_fail() {
    let err = try_build(r#"<Schema><Content name="a"/></Schema>"#).unwrap_err();
    assert_eq!(
        err,
        TreeError::NoXmlAttr {
            tag: "Content".to_string(),
            attribute: "index".to_string()
        }
    );

    let err = try_build(r#"<Schema><Content index="1"/></Schema>"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoXmlAttr);

    let err = try_build(r#"<Schema><Content index="1" name=""/></Schema>"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoXmlAttr);

    let err = try_build(r#"<Schema><Content index="" name="a"/></Schema>"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoXmlAttr);
}

#[test]
fn more_than_fifteen_children_fail() {
    let mut schema = String::from("<Schema>");
    for index in 1..=16 {
        schema.push_str(&format!(r#"<Content index="{index}" name="item{index}"/>"#));
    }
    schema.push_str("</Schema>");
    assert_eq!(
        try_build(&schema).unwrap_err(),
        TreeError::OverItem {
            parent: "<root>".to_string(),
            count: 16
        }
    );
}

#[test]
fn fifteen_children_are_accepted() {
    let mut schema = String::from("<Schema>");
    for index in 1..=15 {
        schema.push_str(&format!(r#"<Content index="{index}" name="item{index}"/>"#));
    }
    schema.push_str("</Schema>");
    let tree = build_tree(&schema);
    assert_eq!(tree.len(), 15);
    assert_eq!(tree.item_name(ItemId::from_raw(0xf)), Some("item15"));
}

#[test]
fn eight_layers_are_usable() {
    let tree = build_tree(&chain_schema(8, 15));
    assert_eq!(tree.len(), 8);
    assert_eq!(tree.item_name(ItemId::from_raw(0xffff_ffff)), Some("l8"));
}

#[test]
fn ninth_layer_fails() {
    assert_eq!(
        try_build(&chain_schema(9, 1)).unwrap_err(),
        TreeError::OverLayer { layer: 8 }
    );
}

#[test]
fn duplicate_names_are_rejected_by_default() {
    let schema = r#"<Schema>
        <Content index="1" name="name"/>
        <Content index="2" name="group"><Content index="1" name="name"/></Content>
    </Schema>"#;
    assert_eq!(
        try_build(schema).unwrap_err(),
        TreeError::DuplicateName {
            name: "name".to_string()
        }
    );

    let vocabulary = Vocabulary {
        unique_names: false,
        ..Vocabulary::default()
    };
    let tree = try_build_with(schema, vocabulary).unwrap();
    assert_eq!(tree.len(), 3);
}

#[test]
fn custom_vocabulary_changes_tags() {
    let vocabulary = Vocabulary {
        item_tag: "Node".to_string(),
        index_attr: "slot".to_string(),
        name_attr: "label".to_string(),
        ..Vocabulary::default()
    };
    let tree = try_build_with(
        r#"<Schema><Node slot="2" label="city"><Node slot="1" label="zip"/></Node></Schema>"#,
        vocabulary,
    )
    .unwrap();
    assert_eq!(tree.item_name(ItemId::from_raw(0x12)), Some("zip"));
}

#[test]
fn builds_from_elements_assembled_in_memory() {
    let schema = XmlElement::new("Schema").with_child(
        XmlElement::new("Content")
            .with_attribute("index", "3")
            .with_attribute("name", "grade")
            .with_child(
                XmlElement::new("Content")
                    .with_attribute("index", "1")
                    .with_attribute("name", "letter"),
            ),
    );
    let mut tree = ItemTree::build(&schema, Vocabulary::default()).unwrap();
    assert_eq!(tree.item("grade").unwrap().child_count(), 1);
    assert_eq!(tree.item("letter").unwrap().id(), ItemId::from_raw(0x13));

    let batch = XmlElement::new("Batch").with_child(
        XmlElement::new("Member")
            .with_attribute("name", "letter")
            .with_attribute("type", "string")
            .with_text("B+"),
    );
    tree.ingest_batch(7, batch.children.iter()).unwrap();
    assert_eq!(tree.value_of("letter", 7).unwrap(), &Value::Text("B+".into()));
}
