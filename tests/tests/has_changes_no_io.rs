use sofa::{HasManyOptions, Model, PropertyTy};
use serde_json::json;
use tests::*;

fn kennel(t: &Test) -> Model {
    let dog = assert_ok!(t.registry.define("Dog"));
    assert_ok!(dog.field("name", PropertyTy::String));
    assert_ok!(dog.has_many("puppies", HasManyOptions::new().foreign_key("dog_id")));
    dog.use_database(&t.db);

    let puppy = assert_ok!(t.registry.define("Puppy"));
    assert_ok!(puppy.field("name", PropertyTy::String));

    dog
}

fn saved_dog_with_puppy(dog: &Model) -> String {
    let mut fido = assert_ok!(dog.build(attrs(json!({"name": "Fido"}))));
    assert_ok!(fido.set_association("puppies", vec![attrs(json!({"name": "Rex"}))]));
    assert!(assert_ok!(fido.save()));
    assert_some!(fido.id()).to_string()
}

#[test]
fn has_changes_never_loads_children() {
    let mut t = setup();
    let dog = kennel(&t);
    let dog_id = saved_dog_with_puppy(&dog);

    let fido = assert_ok!(dog.find(&t.db, &dog_id));
    t.log.clear();

    assert!(!fido.has_changes());
    assert!(t.log.is_empty());
    assert!(!t.log.has_query_view());
    assert_none!(fido.memoized("puppies"));
}

#[test]
fn own_changes_are_detected_without_io() {
    let mut t = setup();
    let dog = kennel(&t);
    let dog_id = saved_dog_with_puppy(&dog);

    let mut fido = assert_ok!(dog.find(&t.db, &dog_id));
    t.log.clear();

    assert_ok!(fido.set("name", "Spot"));
    assert!(fido.has_changes());
    assert_eq!(fido.changes(), ["name"]);
    assert!(t.log.is_empty());
}

#[test]
fn memoized_child_changes_count() {
    let mut t = setup();
    let dog = kennel(&t);
    let dog_id = saved_dog_with_puppy(&dog);

    let mut fido = assert_ok!(dog.find(&t.db, &dog_id));
    assert_eq!(assert_ok!(fido.association("puppies")).len(), 1);
    assert!(!fido.has_changes());

    t.log.clear();
    assert_ok!(assert_ok!(fido.association_mut("puppies"))[0].set("name", "Max"));

    assert!(fido.has_changes());
    assert_empty!(fido.changes());
    assert!(t.log.is_empty());
}
