use sofa::{Dependent, HasManyOptions, Model, PropertyTy};
use serde_json::json;
use tests::*;

fn kennel(t: &Test) -> (Model, Model) {
    let dog = assert_ok!(t.registry.define("Dog"));
    assert_ok!(dog.has_many(
        "puppies",
        HasManyOptions::new()
            .foreign_key("dog_id")
            .dependent(Dependent::Nullify),
    ));
    dog.use_database(&t.db);

    let puppy = assert_ok!(t.registry.define("Puppy"));
    assert_ok!(puppy.field("name", PropertyTy::String));
    assert_ok!(puppy.field("dog_id", PropertyTy::String));
    puppy.use_database(&t.db);

    (dog, puppy)
}

#[test]
fn children_outlive_the_owner_without_a_key() {
    let t = setup();
    let (dog, puppy) = kennel(&t);

    let mut fido = assert_ok!(dog.build(Default::default()));
    assert_ok!(fido.set_association(
        "puppies",
        vec![attrs(json!({"name": "Rex"})), attrs(json!({"name": "Bo"}))],
    ));
    assert!(assert_ok!(fido.save()));
    let dog_id = assert_some!(fido.id()).to_string();
    let ids = assert_ok!(fido.has_many("puppies")).ids();

    let mut loaded = assert_ok!(dog.find(&t.db, &dog_id));
    assert!(assert_ok!(loaded.destroy()));

    assert_none!(assert_ok!(t.db.get(&dog_id)));
    for id in &ids {
        let child = assert_ok!(puppy.find(&t.db, id));
        assert_eq!(child.get("dog_id"), Some(&json!(null)));
        assert_eq!(child.get("type"), Some(&json!("Puppy")));
    }

    assert!(!t.log.any(|op| matches!(
        op,
        sofa_core::driver::Operation::DeleteDoc(delete) if ids.contains(&delete.id)
    )));
    assert_empty!(assert_ok!(puppy.by_view(&t.db, "by_dog_id", dog_id)));
}

#[test]
fn failed_nullify_keeps_the_owner() {
    let t = setup();
    let (dog, puppy) = kennel(&t);

    let mut fido = assert_ok!(dog.build(Default::default()));
    assert_ok!(fido.set_association(
        "puppies",
        vec![attrs(json!({"name": "Rex"})), attrs(json!({"name": "Bo"}))],
    ));
    assert!(assert_ok!(fido.save()));
    let dog_id = assert_some!(fido.id()).to_string();

    t.faults.reject_save_when(|doc| {
        doc.get("name") == Some(&json!("Rex")) && doc.get("dog_id") == Some(&json!(null))
    });

    let mut loaded = assert_ok!(dog.find(&t.db, &dog_id));
    assert!(!assert_ok!(loaded.destroy()));

    assert_some!(assert_ok!(t.db.get(&dog_id)));
    let children = assert_ok!(puppy.by_view(&t.db, "by_dog_id", dog_id));
    assert_eq!(children.len(), 2);
}
