use std::collections::BTreeMap;

use jellyfin_codec::prelude::*;
use jellyfin_codec::{QueryParams, record};
use proptest::prelude::*;

record! {
    struct Note {
        title: String => "Title",
        body: String => "Body",
        tags: BTreeMap<String, String> => "Tags",
    }
}

record! {
    struct Reading {
        value: f64 => "Value",
    }
}

fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw).expect("utf-8").into_owned()
}

fn text_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ -~é✓]{0,24}").expect("regex")
}

proptest! {
    #[test]
    fn values_survive_percent_encoding(title in text_strategy()) {
        let note = Note::builder().title(title.clone()).build();
        let query = note.to_query_string(None);
        let (key, value) = query.split_once('=').expect("one pair");
        prop_assert_eq!(key, "Title");
        prop_assert!(!value.contains('&'));
        prop_assert!(!value.contains('='));
        prop_assert_eq!(decode_component(value), title);
    }

    #[test]
    fn unset_fields_never_appear(
        title in proptest::option::of(text_strategy()),
        body in proptest::option::of(text_strategy()),
    ) {
        let note = Note { title: title.clone(), body: body.clone(), tags: None };
        let query = note.to_query_string(Some("Note"));
        let json = note.to_json();

        prop_assert_eq!(query.contains("Note[Title]="), title.is_some());
        prop_assert_eq!(query.contains("Note[Body]="), body.is_some());
        prop_assert!(!query.contains("Tags"));
        prop_assert_eq!(json.get("Title").is_some(), title.is_some());
        prop_assert_eq!(json.get("Body").is_some(), body.is_some());
        prop_assert!(json.get("Tags").is_none());
    }

    #[test]
    fn json_round_trip(
        title in proptest::option::of(text_strategy()),
        tags in proptest::collection::btree_map("[A-Za-z-]{1,8}", text_strategy(), 0..4),
    ) {
        let note = Note { title, body: None, tags: Some(tags) };
        let decoded = Note::from_json(&note.to_json()).expect("decode");
        prop_assert_eq!(decoded, note);
    }

    #[test]
    fn scalar_params_encode_like_fields(limit in 0i32..10_000) {
        let mut params = QueryParams::new();
        params.param("limit", &limit).expect("encode");
        prop_assert_eq!(params.to_query_string(), format!("limit={limit}"));
    }

    #[test]
    fn any_float_round_trips_or_stays_unset(x in proptest::num::f64::ANY) {
        let reading = Reading::builder().value(x).build();
        prop_assert_eq!(reading.value.is_some(), x.is_finite());
        let json = reading.to_json();
        prop_assert!(json.get("Value").is_none_or(|value| value.is_number()));
        prop_assert_eq!(Reading::from_json(&json).expect("decode"), reading.clone());
        let query = reading.to_query_string(None);
        prop_assert!(!query.contains("NaN") && !query.contains("inf"));
    }
}
