pub mod fixtures;

use std::any::TypeId;

use fixtures::{animals, colliding_shapes, nodes, shapes};
use weft::prelude::*;
use weft::{Configuration, default_registry, validate};

#[test]
fn default_registry_passes_validation() {
    assert!(validate(&Configuration::default(), &default_registry()).is_ok());
    assert!(Format::builder().build().is_ok());
}

#[test]
fn intra_hierarchy_collision_is_rejected() {
    let err = Format::builder().register(colliding_shapes()).build().unwrap_err();

    let WeftError::AmbiguousDiscriminator { hierarchy, tag, subtypes, .. } = &err else {
        panic!("expected an ambiguous discriminator, got {err:?}");
    };
    assert_eq!(hierarchy, "Shape");
    assert_eq!(tag, "blob");
    assert_eq!(subtypes.len(), 2);
    assert!(subtypes[0].ends_with("Circle"));
    assert!(subtypes[1].ends_with("Square"));
    assert!(err.is_configuration_defect());
}

#[test]
fn collision_is_tolerated_under_array_polymorphism() {
    let format = Format::builder()
        .use_array_polymorphism(true)
        .register(colliding_shapes())
        .build();
    assert!(format.is_ok());
}

#[test]
fn cross_hierarchy_tag_reuse_is_tolerated() {
    let registry = Registry::new().register(shapes()).register(animals());
    assert!(Format::builder().registry(&registry).build().is_ok());
}

#[test]
fn distinct_tags_pass() {
    assert!(Format::builder().register(shapes()).build().is_ok());
}

#[test]
fn field_named_like_discriminator_is_rejected() {
    let err = Format::builder().register(nodes()).build().unwrap_err();
    assert!(
        matches!(&err, WeftError::DiscriminatorConflict { key, .. } if key == "type"),
        "unexpected error: {err:?}"
    );

    assert!(Format::builder().class_discriminator("kind").register(nodes()).build().is_ok());
    assert!(Format::builder().use_array_polymorphism(true).register(nodes()).build().is_ok());
}

#[test]
fn later_registration_replaces_colliding_hierarchy() {
    let registry = Registry::new().register(colliding_shapes()).merge(&Registry::new().register(shapes()));
    assert!(Format::builder().registry(&registry).build().is_ok());
}

#[test]
fn validation_runs_only_at_construction() {
    let format = Format::default_instance();
    let text = r#"{"type":"blob","radius":1.0}"#;
    let shape = format.decode_from_str(&colliding_shapes(), text).unwrap();
    assert_eq!(shape, fixtures::Shape::Circle(fixtures::Circle { radius: 1.0 }));
}

#[test]
fn contradicting_options_are_rejected() {
    let cases = [
        Format::builder().indent("\t").build(),
        Format::builder().pretty_print(true).indent("ab").build(),
        Format::builder().use_array_polymorphism(true).class_discriminator("kind").build(),
        Format::builder().class_discriminator("").build(),
    ];
    for result in cases {
        let err = result.unwrap_err();
        assert_eq!(err.code(), "invalid_configuration", "unexpected error: {err}");
    }
}

#[derive(Debug, PartialEq)]
enum Id {
    Number(i64),
    Name(String),
}

impl Polymorphic for Id {
    fn runtime_type(&self) -> TypeId {
        match self {
            Self::Number(_) => TypeId::of::<i64>(),
            Self::Name(_) => TypeId::of::<String>(),
        }
    }
}

fn ids() -> PolymorphicConverter<Id> {
    PolymorphicConverter::builder("Id")
        .subtype(ScalarConverter::<i64>::new(), Id::Number, |id| match id {
            Id::Number(n) => Some(n),
            Id::Name(_) => None,
        })
        .subtype(ScalarConverter::<String>::new(), Id::Name, |id| match id {
            Id::Name(name) => Some(name),
            Id::Number(_) => None,
        })
        .build()
}

#[test]
fn scalar_subtypes_need_array_polymorphism() {
    let err = Format::builder().register(ids()).build().unwrap_err();
    assert_eq!(err.code(), "invalid_configuration");
    assert!(err.to_string().contains("i64"), "unexpected error: {err}");

    let format = Format::builder().use_array_polymorphism(true).register(ids()).build().unwrap();
    let text = format.encode_to_string(&ids(), &Id::Name("ada".into())).unwrap();
    assert_eq!(text, r#"["String","ada"]"#);
    assert_eq!(format.decode_from_str(&ids(), &text).unwrap(), Id::Name("ada".into()));
}
