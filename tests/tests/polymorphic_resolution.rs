use sofa::{BuildOptions, Model, Registry};
use serde_json::json;
use tests::*;

fn animals(t: &Test) -> (Model, Model) {
    let animal = assert_ok!(t.registry.define("Animal"));
    let dog = assert_ok!(animal.subclass("Dog"));
    (animal, dog)
}

#[test]
fn stored_subclass_loads_as_subclass() {
    let t = setup();
    let (animal, dog) = animals(&t);

    let mut rex = assert_ok!(dog.new_document(
        attrs(json!({"name": "rex"})),
        BuildOptions::new().database(&t.db),
    ));
    assert!(assert_ok!(rex.save()));

    let loaded = assert_some!(assert_ok!(animal.get(&t.db, assert_some!(rex.id()))));
    assert_eq!(loaded.model(), &dog);
    assert_eq!(loaded.type_value(), Some("Dog"));
    assert_eq!(loaded, rex);
}

#[test]
fn blank_discriminator_uses_the_caller() {
    let t = setup();
    let (animal, _dog) = animals(&t);

    for type_value in [json!(""), json!(null)] {
        let ack = assert_ok!(t.db.save_doc(attrs(json!({"type": type_value}))));
        let loaded = assert_some!(assert_ok!(animal.get(&t.db, assert_some!(ack.id.as_deref()))));
        assert_eq!(loaded.model(), &animal);
    }

    let ack = assert_ok!(t.db.save_doc(attrs(json!({"name": "untyped"}))));
    let loaded = assert_some!(assert_ok!(animal.get(&t.db, assert_some!(ack.id.as_deref()))));
    assert_eq!(loaded.model(), &animal);
    assert_none!(loaded.type_value());
}

#[test]
fn unknown_discriminator_yields_nothing() {
    let t = setup();
    let (animal, _dog) = animals(&t);

    let ack = assert_ok!(t.db.save_doc(attrs(json!({"type": "Kitten"}))));
    let id = assert_some!(ack.id);

    assert_none!(assert_ok!(animal.get(&t.db, &id)));
    assert!(assert_err!(animal.find(&t.db, &id)).is_record_not_found());
}

#[test]
fn models_of_other_registries_do_not_resolve() {
    let t = setup();
    let (animal, _dog) = animals(&t);

    let elsewhere = Registry::new();
    assert_ok!(elsewhere.define("Ghost"));

    let raw = attrs(json!({"_id": "g", "_rev": "1-a", "type": "Ghost"}));
    assert_none!(assert_ok!(animal.build_from_database(raw, BuildOptions::new())));
}

#[test]
fn resolution_ignores_the_class_hierarchy() {
    let t = setup();
    let (_animal, dog) = animals(&t);
    let cat = assert_ok!(t.registry.define("Cat"));

    let raw = attrs(json!({"_id": "c", "_rev": "1-a", "type": "Cat"}));
    let doc = assert_some!(assert_ok!(dog.build_from_database(raw, BuildOptions::new())));
    assert_eq!(doc.model(), &cat);
}

#[test]
fn loaded_documents_keep_untyped_attributes() {
    let t = setup();
    let (animal, _dog) = animals(&t);

    let raw = attrs(json!({"_id": "a", "_rev": "1-a", "type": "Dog", "colour": "brown"}));
    let doc = assert_some!(assert_ok!(animal.build_from_database(raw, BuildOptions::new())));

    assert_eq!(doc.get("colour"), Some(&json!("brown")));
    assert!(!doc.has_changes());
}

#[test]
fn custom_discriminator_key() {
    let t = setup_with(Registry::builder().model_type_key("model").build());
    let (animal, dog) = animals(&t);

    let doc = assert_ok!(dog.build(Default::default()));
    assert_eq!(doc.get("model"), Some(&json!("Dog")));
    assert_none!(doc.get("type"));

    let raw = attrs(json!({"_id": "a", "_rev": "1-a", "model": "Dog"}));
    let loaded = assert_some!(assert_ok!(animal.build_from_database(raw, BuildOptions::new())));
    assert_eq!(loaded.model(), &dog);
}
