use sofa::{Model, PropertyTy};
use serde_json::json;
use tests::*;

fn animals(t: &Test) -> (Model, Model, Model) {
    let animal = assert_ok!(t.registry.define("Animal"));
    assert_ok!(animal.field("name", PropertyTy::String));
    animal.use_database(&t.db);

    let dog = assert_ok!(animal.subclass("Dog"));
    let cat = assert_ok!(animal.subclass("Cat"));
    (animal, dog, cat)
}

#[test]
fn stored_type_changes() {
    let t = setup();
    let (animal, dog, cat) = animals(&t);

    let mut rex = assert_ok!(dog.build(attrs(json!({"name": "rex"}))));
    assert!(assert_ok!(rex.save()));
    dog.before_save("never", |_| panic!("callbacks must not run"));
    dog.validates("never", |_| panic!("validators must not run"));

    let id = assert_some!(rex.id()).to_string();
    assert_ok!(rex.set("name", "tom"));

    assert!(assert_ok!(rex.change_type("Cat")));
    assert!(!rex.has_changes());
    assert_eq!(rex.type_value(), Some("Dog"));

    let stored = assert_some!(assert_ok!(t.db.get(&id)));
    assert_eq!(stored.get("type"), Some(&json!("Cat")));
    assert_eq!(stored.get("name"), Some(&json!("tom")));
    assert_eq!(stored.get("_rev"), rex.get("_rev"));

    let reloaded = assert_some!(assert_ok!(animal.get(&t.db, &id)));
    assert_eq!(reloaded.model(), &cat);
}

#[test]
fn rejection_leaves_the_document_untouched() {
    let t = setup();
    let (_animal, dog, _cat) = animals(&t);

    let mut rex = assert_ok!(dog.build(attrs(json!({"name": "rex"}))));
    assert!(assert_ok!(rex.save()));
    let rev = assert_some!(rex.rev()).to_string();
    assert_ok!(rex.set("name", "tom"));

    t.faults.reject_save_when(|_| true);
    assert!(!assert_ok!(rex.change_type("Cat")));

    assert_eq!(rex.rev(), Some(rev.as_str()));
    assert!(rex.has_changes());

    let stored = assert_some!(assert_ok!(t.db.get(assert_some!(rex.id()))));
    assert_eq!(stored.get("type"), Some(&json!("Dog")));
}

#[test]
fn driver_error_is_returned() {
    let t = setup();
    let (_animal, dog, _cat) = animals(&t);

    let mut rex = assert_ok!(dog.build(Default::default()));
    assert!(assert_ok!(rex.save()));

    t.faults.error_when(|op| op.is_save_doc());
    assert_err!(rex.change_type("Cat"));
}

#[test]
fn unsaved_document_takes_the_stored_id() {
    let t = setup();
    let (animal, dog, cat) = animals(&t);

    let mut max = assert_ok!(dog.build(attrs(json!({"name": "max"}))));
    assert!(assert_ok!(max.change_type("Cat")));

    let id = assert_some!(max.id()).to_string();
    assert!(!max.is_new());
    assert!(!max.has_changes());

    let stored = assert_some!(assert_ok!(animal.get(&t.db, &id)));
    assert_eq!(stored.model(), &cat);

    assert_ok!(max.set("name", "maxine"));
    assert!(assert_ok!(max.save()));
    assert_eq!(max.id(), Some(id.as_str()));
}
