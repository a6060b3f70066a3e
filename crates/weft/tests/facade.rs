pub mod fixtures;

use std::collections::BTreeMap;

use fixtures::{
    Circle, Color, Empty, EmptyConverter, Pen, PenConverter, Point, PointConverter, Shape, Square,
    shapes,
};
use weft::prelude::*;
use weft::{Literal, Object};

fn point(x: i32, y: i32) -> Point {
    Point { x, y, label: None }
}

#[test]
fn decode_rejects_trailing_data() {
    let format = Format::default_instance();

    let err = format.decode_from_str(&EmptyConverter, "{}garbage").unwrap_err();
    assert!(matches!(err, WeftError::TrailingData { offset: 2, .. }), "unexpected error: {err}");

    assert_eq!(format.decode_from_str(&EmptyConverter, "{}").unwrap(), Empty);
    assert_eq!(format.decode_from_str(&EmptyConverter, " {} \n").unwrap(), Empty);
}

#[test]
fn lenient_mode_still_rejects_trailing_data() {
    let format = Format::builder().is_lenient(true).build().unwrap();
    let err = format.decode_from_str(&EmptyConverter, "{} {}").unwrap_err();
    assert_eq!(err.code(), "trailing_data");
}

#[test]
fn parse_to_element_rejects_trailing_data() {
    let format = Format::default_instance();
    assert!(format.parse_to_element("[1, 2]").is_ok());
    assert_eq!(format.parse_to_element("[1] [2]").unwrap_err().code(), "trailing_data");
}

#[test]
fn composite_round_trip() {
    let format = Format::default_instance();
    let value = Point { x: -3, y: 7, label: Some("origin \"A\"".into()) };

    let text = format.encode_to_string(&PointConverter, &value).unwrap();
    assert_eq!(text, r#"{"x":-3,"y":7,"label":"origin \"A\""}"#);
    assert_eq!(format.decode_from_str(&PointConverter, &text).unwrap(), value);
}

#[test]
fn encode_defaults_controls_default_fields() {
    let with_defaults = Format::default_instance();
    assert_eq!(
        with_defaults.encode_to_string(&PointConverter, &point(1, 0)).unwrap(),
        r#"{"x":1,"y":0,"label":null}"#
    );

    let without = Format::builder().encode_defaults(false).build().unwrap();
    assert_eq!(without.encode_to_string(&PointConverter, &point(1, 0)).unwrap(), r#"{"x":1}"#);
    assert_eq!(without.decode_from_str(&PointConverter, r#"{"x":1}"#).unwrap(), point(1, 0));
}

#[test]
fn unknown_keys_fail_unless_ignored() {
    let input = r#"{"x": 1, "z": 9}"#;

    let err = Format::default_instance().decode_from_str(&PointConverter, input).unwrap_err();
    assert_eq!(err.code(), "malformed_input");
    assert!(err.to_string().contains("'z'"));

    let format = Format::builder().ignore_unknown_keys(true).build().unwrap();
    assert_eq!(format.decode_from_str(&PointConverter, input).unwrap(), point(1, 0));
}

#[test]
fn missing_required_field_names_it() {
    let err = Format::default_instance().decode_from_str(&PointConverter, r#"{"y": 1}"#).unwrap_err();
    assert!(err.to_string().contains("'x'"), "unexpected message: {err}");
}

#[test]
fn coercion_substitutes_defaults() {
    let input = r#"{"color": "purple", "width": null}"#;
    assert!(Format::default_instance().decode_from_str(&PenConverter, input).is_err());

    let format = Format::builder().coerce_input_values(true).build().unwrap();
    assert_eq!(
        format.decode_from_str(&PenConverter, input).unwrap(),
        Pen { color: Color::Red, width: 1 }
    );
    assert_eq!(
        format.decode_from_str(&PenConverter, r#"{"color": "green", "width": 3}"#).unwrap(),
        Pen { color: Color::Green, width: 3 }
    );
}

#[test]
fn coercion_keeps_nulls_for_nullable_fields() {
    let format = Format::builder().coerce_input_values(true).build().unwrap();
    let decoded = format.decode_from_str(&PointConverter, r#"{"x": 2, "label": null}"#).unwrap();
    assert_eq!(decoded, point(2, 0));
}

#[test]
fn strict_mode_requires_json_quoting() {
    let input = r#"{x: 1, "y": "2"}"#;
    assert!(Format::default_instance().decode_from_str(&PointConverter, input).is_err());

    let lenient = Format::builder().is_lenient(true).build().unwrap();
    assert_eq!(lenient.decode_from_str(&PointConverter, input).unwrap(), point(1, 2));
}

#[test]
fn pretty_print_uses_configured_indent() {
    let format = Format::builder().pretty_print(true).indent("  ").build().unwrap();
    let text = format.encode_to_string(&PointConverter, &point(1, 2)).unwrap();
    assert_eq!(text, "{\n  \"x\": 1,\n  \"y\": 2,\n  \"label\": null\n}");
}

#[test]
fn unquoted_print_drops_safe_quotes() {
    let format = Format::builder().unquoted_print(true).build().unwrap();
    let value = Point { x: 1, y: 2, label: Some("north-east".into()) };
    assert_eq!(
        format.encode_to_string(&PointConverter, &value).unwrap(),
        "{x:1,y:2,label:north-east}"
    );
}

#[test]
fn unquoted_output_decodes_with_the_same_format() {
    let format = Format::builder().unquoted_print(true).build().unwrap();

    let text = format.to_text(&"abc".to_owned()).unwrap();
    assert_eq!(text, "abc");
    assert_eq!(format.from_text::<String>(&text).unwrap(), "abc");

    let value = Point { x: -3, y: 0, label: Some("north-east".into()) };
    let text = format.encode_to_string(&PointConverter, &value).unwrap();
    assert_eq!(format.decode_from_str(&PointConverter, &text).unwrap(), value);

    let shape = Shape::Square(Square { side: 2.0 });
    let text = format.encode_to_string(&shapes(), &shape).unwrap();
    assert_eq!(text, "{type:square,side:2.0}");
    assert_eq!(format.decode_from_str(&shapes(), &text).unwrap(), shape);
}

#[test]
fn inline_polymorphism_round_trip() {
    let format = Format::default_instance();
    let shape = Shape::Circle(Circle { radius: 1.5 });

    let text = format.encode_to_string(&shapes(), &shape).unwrap();
    assert_eq!(text, r#"{"type":"circle","radius":1.5}"#);
    assert_eq!(format.decode_from_str(&shapes(), &text).unwrap(), shape);
}

#[test]
fn discriminator_may_appear_after_fields() {
    let decoded = Format::default_instance()
        .decode_from_str(&shapes(), r#"{"side": 2.0, "type": "square"}"#)
        .unwrap();
    assert_eq!(decoded, Shape::Square(Square { side: 2.0 }));
}

#[test]
fn custom_class_discriminator() {
    let format = Format::builder().class_discriminator("kind").build().unwrap();
    let shape = Shape::Square(Square { side: 2.0 });

    let text = format.encode_to_string(&shapes(), &shape).unwrap();
    assert_eq!(text, r#"{"kind":"square","side":2.0}"#);
    assert_eq!(format.decode_from_str(&shapes(), &text).unwrap(), shape);

    let err = format.decode_from_str(&shapes(), r#"{"type":"square","side":2.0}"#).unwrap_err();
    assert!(err.to_string().contains("'kind' is missing"), "unexpected message: {err}");
}

#[test]
fn array_polymorphism_round_trip() {
    let format = Format::builder().use_array_polymorphism(true).build().unwrap();
    let shape = Shape::Square(Square { side: 0.5 });

    let text = format.encode_to_string(&shapes(), &shape).unwrap();
    assert_eq!(text, r#"["square",{"side":0.5}]"#);
    assert_eq!(format.decode_from_str(&shapes(), &text).unwrap(), shape);
}

#[test]
fn unknown_subtype_tag_is_malformed() {
    let err = Format::default_instance()
        .decode_from_str(&shapes(), r#"{"type":"hexagon"}"#)
        .unwrap_err();
    assert_eq!(err.code(), "malformed_input");
    assert!(err.to_string().contains("hexagon"));
}

#[test]
fn special_floats_follow_configuration() {
    let shape = Shape::Circle(Circle { radius: f64::INFINITY });
    let err = Format::default_instance().encode_to_string(&shapes(), &shape).unwrap_err();
    assert_eq!(err.code(), "encoding");

    let format = Format::builder().serialize_special_floating_point_values(true).build().unwrap();
    let text = format.encode_to_string(&shapes(), &shape).unwrap();
    assert_eq!(text, r#"{"type":"circle","radius":Infinity}"#);
    assert_eq!(format.decode_from_str(&shapes(), &text).unwrap(), shape);
}

#[test]
fn registry_dispatch_by_type() {
    let format = Format::builder().register(PointConverter).build().unwrap();

    assert_eq!(format.to_text(&point(4, 5)).unwrap(), r#"{"x":4,"y":5,"label":null}"#);
    assert_eq!(format.from_text::<Point>(r#"{"x":4}"#).unwrap(), point(4, 0));
    assert_eq!(format.to_text(&"plain".to_owned()).unwrap(), r#""plain""#);
    assert_eq!(format.from_text::<u64>("18446744073709551615").unwrap(), u64::MAX);
}

#[test]
fn missing_converter_is_reported() {
    let err = Format::default_instance().to_text(&point(0, 0)).unwrap_err();
    assert!(matches!(err, WeftError::NoConverterFound { .. }));
    assert!(err.to_string().contains("Point"));
}

#[test]
fn user_registry_overrides_defaults() {
    let format = Format::builder()
        .registry(&Registry::new().register(ContextualConverter::<String>::new()))
        .build()
        .unwrap();
    let err = format.to_text(&"x".to_owned()).unwrap_err();
    assert_eq!(err.code(), "internal");

    let restored = format.to_builder().register(ScalarConverter::<String>::new()).build().unwrap();
    assert_eq!(restored.to_text(&"x".to_owned()).unwrap(), r#""x""#);
}

#[test]
fn contextual_fields_resolve_through_registry() {
    let format = Format::builder().register(PointConverter).build().unwrap();
    let points = ListConverter::new(ContextualConverter::<Point>::new());

    let text = format.encode_to_string(&points, &vec![point(1, 1), point(2, 2)]).unwrap();
    assert_eq!(text, r#"[{"x":1,"y":1,"label":null},{"x":2,"y":2,"label":null}]"#);

    let err = Format::default_instance().encode_to_string(&points, &vec![point(1, 1)]).unwrap_err();
    assert_eq!(err.code(), "no_converter_found");
}

#[test]
fn maps_use_string_keys() {
    let format = Format::default_instance();
    let converter = MapConverter::new(ScalarConverter::<i64>::new(), ScalarConverter::<bool>::new());
    let value = BTreeMap::from([(-1, false), (10, true)]);

    let text = format.encode_to_string(&converter, &value).unwrap();
    assert_eq!(text, r#"{"-1":false,"10":true}"#);
    assert_eq!(format.decode_from_str(&converter, &text).unwrap(), value);
}

#[test]
fn tree_element_entry_points() {
    let format = Format::default_instance();
    let element = format.encode_to_element(&PointConverter, &point(1, 2)).unwrap();

    let mut expected = Object::new();
    expected.insert("x", Literal::raw("1"));
    expected.insert("y", Literal::raw("2"));
    expected.insert("label", Element::Null);
    assert_eq!(element, Element::Object(expected));

    assert_eq!(format.decode_from_element(&PointConverter, &element).unwrap(), point(1, 2));
}

#[test]
fn element_converters_round_trip_any_document() {
    let format = Format::default_instance();
    let text = r#"{"a":[1,"two",null,{"b":true}],"c":-0.5e3}"#;
    let element: Element = format.from_text(text).unwrap();
    assert_eq!(format.to_text(&element).unwrap(), text);
}

#[test]
fn default_instance_is_shared() {
    assert!(std::ptr::eq(Format::default_instance(), Format::default_instance()));
    assert_eq!(Format::default().configuration(), Format::default_instance().configuration());
}

#[test]
fn format_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Format>();
    assert_send_sync::<Registry>();

    let format = Format::builder().register(PointConverter).build().unwrap();
    std::thread::scope(|scope| {
        for i in 0..8 {
            let format = format.clone();
            scope.spawn(move || {
                let text = format.to_text(&point(i, i)).unwrap();
                assert_eq!(format.from_text::<Point>(&text).unwrap(), point(i, i));
            });
        }
    });
}
