//! # Generic Conversion of Telemetry Payloads
//!
//! Exercises the converter the way telemetry and form-body collaborators
//! use it: opaque nested payloads in, generic trees and flat string
//! mappings out.

use paymodel_core::{
    string_coerce, to_flat_string_mapping, to_generic, ConversionError, Converter,
    ConverterConfig, GenericValue, MAX_SUPPORTED_DEPTH,
};
use serde_json::{json, Value};

fn fingerprint_payload() -> Value {
    json!({
        "v2": 1,
        "tag": "8.1.0",
        "src": "android-sdk",
        "a": {
            "c": {"v": "en_US"},
            "d": {"v": "Android 10"},
            "f": {"v": "1080w_2076h_440dpi"},
            "g": {"v": "-5"}
        },
        "b": {
            "d": "com.example.app",
            "e": null,
            "k": "null",
            "l": ["x", "y"]
        }
    })
}

#[test]
fn test_payload_flattens_to_strings() {
    let flat = to_flat_string_mapping(&fingerprint_payload()).unwrap().unwrap();
    assert_eq!(flat["v2"], "1");
    assert_eq!(flat["tag"], "8.1.0");
    assert_eq!(
        flat["a"],
        r#"{"c":{"v":"en_US"},"d":{"v":"Android 10"},"f":{"v":"1080w_2076h_440dpi"},"g":{"v":"-5"}}"#
    );
    // Nested nulls survive inside serialized composites.
    assert_eq!(
        flat["b"],
        r#"{"d":"com.example.app","e":null,"k":null,"l":["x","y"]}"#
    );
}

#[test]
fn test_flat_values_match_string_coerce() {
    let doc = fingerprint_payload();
    let generic = to_generic(&doc).unwrap().unwrap();
    let flat = to_flat_string_mapping(&doc).unwrap().unwrap();
    for (key, value) in generic.as_mapping().unwrap() {
        assert_eq!(flat.get(key).cloned(), string_coerce(value).unwrap());
    }
}

#[test]
fn test_key_order_does_not_change_flat_text() {
    let a: Value = serde_json::from_str(r#"{"outer": {"b": 1, "a": [2, {"z": 0, "y": 1}]}}"#).unwrap();
    let b: Value = serde_json::from_str(r#"{"outer": {"a": [2, {"y": 1, "z": 0}], "b": 1}}"#).unwrap();
    assert_eq!(
        to_flat_string_mapping(&a).unwrap(),
        to_flat_string_mapping(&b).unwrap()
    );
}

#[test]
fn test_float_numbers_keep_their_value() {
    let generic = to_generic(&json!({"ratio": 0.25})).unwrap().unwrap();
    match generic.get("ratio") {
        Some(GenericValue::Number(n)) => assert_eq!(n.as_f64(), Some(0.25)),
        other => panic!("expected number, got {other:?}"),
    }
    let flat = to_flat_string_mapping(&json!({"ratio": 0.25})).unwrap().unwrap();
    assert_eq!(flat["ratio"], "0.25");
}

#[test]
fn test_supported_depth_is_configurable() {
    let mut doc = json!(true);
    for _ in 0..1000 {
        doc = Value::Array(vec![doc]);
    }
    assert!(matches!(
        to_generic(&doc),
        Err(ConversionError::DepthExceeded { max_depth: 512 })
    ));

    let wide = Converter::new(ConverterConfig::with_max_depth(1000).unwrap());
    let mut cursor = &wide.to_generic(&doc).unwrap().unwrap();
    for _ in 0..1000 {
        cursor = &cursor.as_sequence().unwrap()[0];
    }
    assert_eq!(cursor, &GenericValue::Bool(true));
    assert!(ConverterConfig::with_max_depth(MAX_SUPPORTED_DEPTH + 1).is_err());
}

fn nested_objects(depth: usize) -> Value {
    let mut doc = json!("leaf");
    for _ in 0..depth {
        let mut map = serde_json::Map::new();
        map.insert("k".to_string(), doc);
        doc = Value::Object(map);
    }
    doc
}

/// `serde_json::Value` drops recursively; take deep inputs apart by hand.
fn dismantle(doc: Value) {
    let mut pending = vec![doc];
    while let Some(mut value) = pending.pop() {
        match &mut value {
            Value::Array(items) => pending.append(items),
            Value::Object(map) => pending.extend(std::mem::take(map).into_iter().map(|(_, v)| v)),
            _ => {}
        }
    }
}

#[test]
fn test_max_supported_depth_on_default_thread_stack() {
    let handle = std::thread::spawn(|| {
        let converter =
            Converter::new(ConverterConfig::with_max_depth(MAX_SUPPORTED_DEPTH).unwrap());

        let doc = nested_objects(MAX_SUPPORTED_DEPTH);
        let generic = converter.to_generic(&doc).unwrap().unwrap();
        let mut cursor = &generic;
        for _ in 0..MAX_SUPPORTED_DEPTH {
            cursor = cursor.get("k").unwrap();
        }
        assert_eq!(cursor, &GenericValue::from("leaf"));
        drop(generic);

        let flat = converter.to_flat_string_mapping(&doc).unwrap().unwrap();
        let inner = MAX_SUPPORTED_DEPTH - 1;
        assert_eq!(flat["k"].len(), inner * r#"{"k":}"#.len() + r#""leaf""#.len());
        assert!(flat["k"].ends_with(r#"{"k":"leaf"}}}"#));
        dismantle(doc);

        let too_deep = nested_objects(MAX_SUPPORTED_DEPTH + 1);
        assert!(matches!(
            converter.to_generic(&too_deep),
            Err(ConversionError::DepthExceeded { max_depth: MAX_SUPPORTED_DEPTH })
        ));
        assert!(matches!(
            converter.to_flat_string_mapping(&too_deep),
            Err(ConversionError::DepthExceeded { max_depth: MAX_SUPPORTED_DEPTH })
        ));
        dismantle(too_deep);
    });
    handle.join().unwrap();
}

#[test]
fn test_large_integers_stay_exact_in_flat_text() {
    let doc: Value = serde_json::from_str(r#"{"nested":{"n":9007199254740993}}"#).unwrap();
    let flat = to_flat_string_mapping(&doc).unwrap().unwrap();
    assert_eq!(flat["nested"], r#"{"n":9007199254740993}"#);
}

#[test]
fn test_conversion_across_threads() {
    let doc = fingerprint_payload();
    let expected = to_generic(&doc).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| to_generic(&doc).unwrap())).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
