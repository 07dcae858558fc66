use sofa::{Phase, Property, PropertyTy};
use pretty_assertions::assert_eq;
use tests::*;

fn property_names(model: &sofa::Model) -> Vec<String> {
    model.properties().names().map(|name| name.to_string()).collect()
}

#[test]
fn subclass_changes_stay_local() {
    let t = setup();
    let animal = assert_ok!(t.registry.define("Animal"));
    assert_ok!(animal.field("name", PropertyTy::String));

    let dog = assert_ok!(animal.subclass("Dog"));
    assert_ok!(dog.field("breed", PropertyTy::String));

    assert_eq!(property_names(&animal), ["name"]);
    assert_eq!(property_names(&dog), ["name", "breed"]);
}

#[test]
fn parent_changes_after_derivation_stay_local() {
    let t = setup();
    let animal = assert_ok!(t.registry.define("Animal"));
    let dog = assert_ok!(animal.subclass("Dog"));

    assert_ok!(animal.field("legs", PropertyTy::Integer));
    animal.validates("legs", |_| Ok(()));

    assert!(!dog.has_property("legs"));
    assert_empty!(dog.validators());
}

#[test]
fn every_level_inherits_from_its_immediate_parent() {
    let t = setup();
    let animal = assert_ok!(t.registry.define("Animal"));
    assert_ok!(animal.field("name", PropertyTy::String));

    let dog = assert_ok!(animal.subclass("Dog"));
    assert_ok!(dog.property(Property::new("breed", PropertyTy::String).default("mutt")));

    let puppy = assert_ok!(dog.subclass("Puppy"));
    assert_ok!(puppy.field("toy", PropertyTy::String));

    assert_eq!(property_names(&animal), ["name"]);
    assert_eq!(property_names(&dog), ["name", "breed"]);
    assert_eq!(property_names(&puppy), ["name", "breed", "toy"]);

    let doc = assert_ok!(puppy.build(attrs(serde_json::json!({"name": "rex"}))));
    assert_eq!(doc.get("breed"), Some(&serde_json::json!("mutt")));
}

#[test]
fn callbacks_declared_before_derivation_are_inherited() {
    let t = setup();
    let animal = assert_ok!(t.registry.define("Animal"));
    animal.before_save("stamp", |_| Ok(true));

    let dog = assert_ok!(animal.subclass("Dog"));
    animal.before_save("late", |_| Ok(true));
    dog.before_save("dog_only", |_| Ok(true));

    assert_eq!(animal.callbacks(Phase::BeforeSave), ["stamp", "late"]);
    assert_eq!(dog.callbacks(Phase::BeforeSave), ["stamp", "dog_only"]);
}

#[test]
fn duplicate_names_are_rejected() {
    let t = setup();
    let animal = assert_ok!(t.registry.define("Animal"));
    assert_ok!(animal.field("name", PropertyTy::String));

    assert!(assert_err!(animal.field("name", PropertyTy::Integer)).is_invalid_schema());
    assert!(assert_err!(t.registry.define("Animal")).is_invalid_schema());
    assert!(assert_err!(animal.subclass("Animal")).is_invalid_schema());
    assert!(assert_err!(t.registry.define(" ")).is_invalid_schema());
}

#[test]
fn registry_lists_every_level() {
    let t = setup();
    let animal = assert_ok!(t.registry.define("Animal"));
    let dog = assert_ok!(animal.subclass("Dog"));
    let puppy = assert_ok!(dog.subclass("Puppy"));
    let cat = assert_ok!(t.registry.define("Cat"));

    assert_eq!(t.registry.models(), [animal.clone(), dog.clone(), puppy.clone(), cat]);
    assert_eq!(t.registry.descendants_of(&animal), [dog, puppy]);
}
