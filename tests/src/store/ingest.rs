use itemtree::{ErrorKind, TreeError, Value};

use crate::utils::{STUDENT_SCHEMA, build_tree, ingest, single_value};

const SCHEMA: &str = r#"<Schema>
    <Content index="1" name="student">
        <Content index="1" name="age"/>
        <Content index="2" name="score"/>
    </Content>
</Schema>"#;

#[test]
fn ingests_typed_values() {
    let mut tree = build_tree(SCHEMA);
    let batches = ingest(
        &mut tree,
        r#"<Values>
            <Batch index="1">
                <Member name="student" type="string">Alice</Member>
                <Member name="age" type="int"> 20 </Member>
                <Member name="score" type="double">92.5</Member>
            </Batch>
        </Values>"#,
    )
    .unwrap();
    assert_eq!(batches, vec![1]);
    assert_eq!(tree.value_of("student", 1).unwrap(), &Value::Text("Alice".into()));
    assert_eq!(tree.value_of("age", 1).unwrap(), &Value::Integer(20));
    assert_eq!(tree.value_of("score", 1).unwrap(), &Value::Float(92.5));
}

#[test]
fn equal_values_are_stored_once() {
    let mut tree = build_tree(STUDENT_SCHEMA);
    ingest(&mut tree, &single_value(1, "student", "Alice")).unwrap();
    ingest(&mut tree, &single_value(2, "student", "Alice")).unwrap();
    ingest(&mut tree, &single_value(3, "student", "Bob")).unwrap();

    let student = tree.item("student").unwrap();
    assert_eq!(student.members().len(), 2);
    let alice = &student.members()[0];
    assert_eq!(alice.value(), &Value::Text("Alice".into()));
    assert!(alice.holds(1) && alice.holds(2) && !alice.holds(3));
}

#[test]
fn every_batch_belongs_to_at_most_one_member() {
    let mut tree = build_tree(STUDENT_SCHEMA);
    for (batch, name) in [(1, "a"), (2, "b"), (3, "a"), (4, "c"), (5, "b")] {
        ingest(&mut tree, &single_value(batch, "student", name)).unwrap();
    }
    let student = tree.item("student").unwrap();
    let mut seen: Vec<u32> = student.members().iter().flat_map(|m| m.batches()).collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
}

#[test]
fn empty_batch_becomes_known() {
    let mut tree = build_tree(STUDENT_SCHEMA);
    ingest(&mut tree, r#"<Values><Batch index="6"/></Values>"#).unwrap();
    assert!(tree.is_known(6));
    assert_eq!(tree.value_of("student", 6), Err(TreeError::UnregisteredIndex { index: 6 }));
}

#[test]
fn unknown_item_rejects_the_batch() {
    let mut tree = build_tree(STUDENT_SCHEMA);
    let err = ingest(
        &mut tree,
        r#"<Values><Batch index="1">
            <Member name="student" type="string">Alice</Member>
            <Member name="principal" type="string">Smith</Member>
        </Batch></Values>"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        TreeError::IllegalId {
            name: "principal".to_string()
        }
    );
    assert!(!tree.is_known(1));
    assert!(tree.item("student").unwrap().members().is_empty());
}

#[test]
fn failing_batch_keeps_earlier_batches() {
    let mut tree = build_tree(STUDENT_SCHEMA);
    let err = ingest(
        &mut tree,
        r#"<Values>
            <Batch index="1"><Member name="student" type="string">Alice</Member></Batch>
            <Batch index="2"><Member name="student" type="bool">yes</Member></Batch>
            <Batch index="3"><Member name="student" type="string">Carol</Member></Batch>
        </Values>"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalValue);
    assert_eq!(tree.batches(), vec![1]);
    assert_eq!(tree.value_of("student", 1).unwrap(), &Value::Text("Alice".into()));
}

#[test]
fn batch_index_zero_or_missing_is_illegal() {
    let mut tree = build_tree(STUDENT_SCHEMA);
    for values in [
        r#"<Values><Batch index="0"/></Values>"#,
        r"<Values><Batch/></Values>",
        r#"<Values><Batch index="first"/></Values>"#,
    ] {
        assert_eq!(
            ingest(&mut tree, values),
            Err(TreeError::IllegalIndex {
                index: "0".to_string()
            })
        );
    }
    assert!(tree.batches().is_empty());
}

#[test]
fn same_item_twice_in_a_batch_is_used_index() {
    let mut tree = build_tree(STUDENT_SCHEMA);
    let err = ingest(
        &mut tree,
        r#"<Values><Batch index="1">
            <Member name="student" type="string">Alice</Member>
            <Member name="student" type="string">Bob</Member>
        </Batch></Values>"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        TreeError::UsedIndex {
            index: 1,
            owner: "student".to_string()
        }
    );
    assert!(!tree.is_known(1));
}

#[test]
fn reusing_a_batch_index_is_used_index() {
    let mut tree = build_tree(STUDENT_SCHEMA);
    ingest(&mut tree, &single_value(1, "student", "Alice")).unwrap();
    let err = ingest(&mut tree, &single_value(1, "student", "Alice")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UsedIndex);
    assert_eq!(tree.item("student").unwrap().members()[0].batch_count(), 1);
}

#[test]
fn bad_payloads_are_illegal_values() {
    for (type_name, raw) in [("int", "twenty"), ("int", "2.5"), ("double", "abc"), ("date", "2024")] {
        let mut tree = build_tree(STUDENT_SCHEMA);
        let values = format!(
            r#"<Values><Batch index="1"><Member name="student" type="{type_name}">{raw}</Member></Batch></Values>"#
        );
        assert_eq!(
            ingest(&mut tree, &values).map_err(|err| err.kind()),
            Err(ErrorKind::IllegalValue),
            "{type_name} {raw}"
        );
    }
}

#[test]
fn member_without_type_is_missing_attribute() {
    let mut tree = build_tree(STUDENT_SCHEMA);
    let err = ingest(
        &mut tree,
        r#"<Values><Batch index="1"><Member name="student">Alice</Member></Batch></Values>"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        TreeError::NoXmlAttr {
            tag: "Member".to_string(),
            attribute: "type".to_string()
        }
    );
}

#[test]
fn document_without_root_is_null_pointer() {
    let mut tree = build_tree(STUDENT_SCHEMA);
    assert_eq!(ingest(&mut tree, ""), Err(TreeError::NullPointer));
}
