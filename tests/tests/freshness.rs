use sofa::{BuildOptions, Model};
use serde_json::json;
use tests::*;

fn animals(t: &Test) -> (Model, Model) {
    let animal = assert_ok!(t.registry.define("Animal"));
    let dog = assert_ok!(animal.subclass("Dog"));
    (animal, dog)
}

#[test]
fn new_documents_carry_their_type() {
    let t = setup();
    let (_animal, dog) = animals(&t);

    let doc = assert_ok!(dog.build(attrs(json!({"type": "Cat"}))));
    assert!(doc.is_new());
    assert!(doc.is_fresh());
    assert_eq!(doc.type_value(), Some("Dog"));
}

#[test]
fn id_without_revision_is_still_new() {
    let t = setup();
    let (_animal, dog) = animals(&t);

    let doc = assert_ok!(dog.new_document(
        attrs(json!({"_id": "rex", "type": "Cat"})),
        BuildOptions::new().directly_set_attributes(true),
    ));

    assert!(doc.is_new());
    assert!(doc.is_fresh());
    assert_eq!(doc.type_value(), Some("Dog"));
}

#[test]
fn stored_documents_keep_their_type() {
    let t = setup();
    let (_animal, dog) = animals(&t);

    let doc = assert_ok!(dog.new_document(
        attrs(json!({"_id": "rex", "_rev": "3-abc", "type": "Cat"})),
        BuildOptions::new().directly_set_attributes(true),
    ));

    assert!(!doc.is_new());
    assert!(!doc.is_fresh());
    assert_eq!(doc.type_value(), Some("Cat"));
}

#[test]
fn untrusted_input_cannot_claim_a_revision() {
    let t = setup();
    let (_animal, dog) = animals(&t);

    let doc = assert_ok!(dog.build(attrs(json!({"_id": "rex", "_rev": "3-abc"}))));

    assert_eq!(doc.id(), Some("rex"));
    assert_none!(doc.rev());
    assert!(doc.is_new_record());
}

#[test]
fn construction_performs_no_io() {
    let t = setup();
    let (animal, dog) = animals(&t);
    dog.use_database(&t.db);

    assert_ok!(dog.build(attrs(json!({"name": "rex"}))));
    assert_ok!(animal.new_document(Default::default(), BuildOptions::new().database(&t.db)));
    assert_ok!(animal.build_from_database(
        attrs(json!({"_id": "a", "_rev": "1-a", "type": "Dog"})),
        BuildOptions::new().database(&t.db),
    ));

    assert!(t.log.is_empty());
}

#[test]
fn initialize_callbacks_see_the_assembled_document() {
    let t = setup();
    let (_animal, dog) = animals(&t);
    dog.on_initialize("check", |doc| {
        assert_eq!(doc.type_value(), Some("Dog"));
        assert_eq!(doc.get("name"), Some(&json!("set in block")));
        Ok(true)
    });

    let doc = assert_ok!(dog.build_with(Default::default(), |doc| {
        assert_ok!(doc.set("name", "set in block"));
    }));
    assert_eq!(doc.get("name"), Some(&json!("set in block")));
}

#[test]
fn documents_bind_to_the_model_database() {
    let t = setup();
    let (animal, dog) = animals(&t);
    animal.use_database(&t.db);

    let cat = assert_ok!(animal.subclass("Cat"));

    assert_eq!(assert_ok!(cat.build(Default::default())).database(), Some(t.db.clone()));
    assert_none!(assert_ok!(dog.build(Default::default())).database());
}
