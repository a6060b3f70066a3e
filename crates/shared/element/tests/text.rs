use weft_element::{
    Array, Element, ElementError, Literal, Object, Reader, ReaderOptions, WriterOptions,
    write_to_string,
};

fn sample() -> Element {
    let mut inner = Object::new();
    inner.insert("enabled", Literal::bool(true));
    inner.insert("ratio", Literal::raw("0.25"));

    let mut root = Object::new();
    root.insert("name", Literal::string("Ada \"the first\""));
    root.insert("tags", ["math", "engines"].into_iter().map(Literal::string).collect::<Array>());
    root.insert("empty", Array::new());
    root.insert("inner", inner);
    root.insert("nothing", Element::Null);
    Element::Object(root)
}

#[test]
fn compact_output_matches_serde_json() {
    let text = write_to_string(&sample(), &WriterOptions::default());
    assert_eq!(
        text,
        r#"{"name":"Ada \"the first\"","tags":["math","engines"],"empty":[],"inner":{"enabled":true,"ratio":0.25},"nothing":null}"#
    );

    let oracle: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(oracle["name"], "Ada \"the first\"");
    assert_eq!(oracle["inner"]["ratio"], 0.25);
}

#[test]
fn pretty_output_uses_indent() {
    let options = WriterOptions { pretty: true, indent: "  ".into(), unquoted: false };
    let text = write_to_string(&sample(), &options);
    let expected = r#"{
  "name": "Ada \"the first\"",
  "tags": [
    "math",
    "engines"
  ],
  "empty": [],
  "inner": {
    "enabled": true,
    "ratio": 0.25
  },
  "nothing": null
}"#;
    assert_eq!(text, expected);

    let reparsed: Element = text.parse().expect("pretty output parses");
    assert_eq!(reparsed, sample());
}

#[test]
fn unquoted_output_reads_back_leniently() {
    let options = WriterOptions { unquoted: true, ..WriterOptions::default() };
    let text = write_to_string(&sample(), &options);
    assert!(text.starts_with(r#"{name:"Ada \"the first\"",tags:[math,engines]"#));

    let mut reader = Reader::new(&text, ReaderOptions { lenient: true });
    let element = reader.read_element().expect("lenient read");
    let object = element.as_object().expect("object");
    let tags = object.get("tags").and_then(Element::as_array).expect("tags");
    assert_eq!(tags.get(0).and_then(Element::as_literal).map(Literal::content), Some("math"));
}

#[test]
fn from_str_rejects_trailing_data() {
    let err = "{} x".parse::<Element>().unwrap_err();
    assert!(matches!(err, ElementError::TrailingData { offset: 3, .. }));
    assert_eq!(err.code(), "trailing_data");
}

#[test]
fn strict_output_is_stable_across_round_trip() {
    let text = write_to_string(&sample(), &WriterOptions::default());
    let parsed: Element = text.parse().expect("parse");
    assert_eq!(write_to_string(&parsed, &WriterOptions::default()), text);
}

#[test]
fn wide_object_parses_with_keys_in_order() {
    let body: Vec<String> = (0..40_000).map(|i| format!("\"k{i}\":{i}")).collect();
    let text = format!("{{{}}}", body.join(","));

    let element: Element = text.parse().expect("parse");
    let object = element.as_object().expect("object");
    assert_eq!(object.len(), 40_000);
    assert_eq!(object.keys().next(), Some("k0"));
    assert_eq!(object.keys().last(), Some("k39999"));
    let value = object.get("k20000").and_then(Element::as_literal).and_then(Literal::as_u64);
    assert_eq!(value, Some(20_000));
}
