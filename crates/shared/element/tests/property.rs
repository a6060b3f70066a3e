use proptest::prelude::*;
use weft_element::{Element, Literal, Object, WriterOptions, write_to_string};

fn element_strategy() -> impl Strategy<Value = Element> {
    let leaf = prop_oneof![
        Just(Element::Null),
        any::<bool>().prop_map(|b| Element::Literal(Literal::bool(b))),
        any::<i64>().prop_map(|n| Element::Literal(Literal::raw(n.to_string()))),
        ".*".prop_map(|s| Element::Literal(Literal::string(s))),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8)
                .prop_map(|items| Element::Array(items.into())),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..8)
                .prop_map(|entries| Element::Object(entries.into_iter().collect::<Object>())),
        ]
    })
}

proptest! {
    #[test]
    fn written_text_parses_back_to_the_same_tree(element in element_strategy(), pretty in any::<bool>()) {
        let options = WriterOptions { pretty, ..WriterOptions::default() };
        let text = write_to_string(&element, &options);
        let parsed: Element = text.parse().unwrap();
        prop_assert_eq!(parsed, element);
    }
}
