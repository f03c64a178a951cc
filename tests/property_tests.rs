//! Property-based tests for the round-trip law and the coercion rules.
//!
//! Strings may hold backslashes anywhere but at the end: a string ending in
//! `\` is the one string the format cannot read back.

use constfile::coerce::{to_boolean, to_float, to_integer};
use constfile::{from_str, to_string, ConstantStore, ConstfileOptions, Mixed, Value};
use proptest::prelude::*;

fn roundtrip(store: &ConstantStore) -> bool {
    let text = to_string(store);
    match from_str(&text) {
        Ok(back) => {
            let same = back.all_values() == store.all_values()
                && back.all_descriptions() == store.all_descriptions();
            if !same {
                eprintln!("Rendered was: {}", text);
            }
            same
        }
        Err(e) => {
            eprintln!("Parse failed: {}", e);
            eprintln!("Rendered was: {}", text);
            false
        }
    }
}

fn single(value: Value, options: ConstfileOptions) -> ConstantStore {
    let mut store = ConstantStore::with_options(options);
    let result = match value {
        Value::Boolean(b) => store.set_boolean("VALUE", b, None).map(|_| ()),
        Value::Integer(i) => store.set_integer("VALUE", i, None).map(|_| ()),
        Value::Float(f) => store.set_float("VALUE", f, None).map(|_| ()),
        Value::String(s) => store.set_string("VALUE", s, None).map(|_| ()),
        Value::Raw(m) => store.set_value("VALUE", m, None).map(|_| ()),
    };
    result.unwrap();
    store
}

fn options() -> impl Strategy<Value = ConstfileOptions> {
    (any::<bool>(), any::<bool>()).prop_map(|(case_insensitive, check_defined)| {
        ConstfileOptions::new()
            .with_case_insensitive(case_insensitive)
            .with_check_defined(check_defined)
    })
}

fn name() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_ '.-]{0,20}"
}

fn text() -> impl Strategy<Value = String> {
    // Runs of one or two backslashes, each followed by other text
    "[^\\\\]{0,20}(\\\\{1,2}[^\\\\]{1,10}){0,4}"
}

fn description() -> impl Strategy<Value = Option<String>> {
    // Descriptions are trimmed on read and cannot contain `*/`
    prop::option::of("[A-Za-z0-9][A-Za-z0-9 ,.:()-]{0,30}[A-Za-z0-9.]")
}

proptest! {
    #[test]
    fn prop_bool(b in any::<bool>(), opts in options()) {
        prop_assert!(roundtrip(&single(Value::Boolean(b), opts)));
    }

    #[test]
    fn prop_i64(n in any::<i64>(), opts in options()) {
        prop_assert!(roundtrip(&single(Value::Integer(n), opts)));
    }

    #[test]
    fn prop_finite_f64(f in prop::num::f64::NORMAL | prop::num::f64::ZERO | prop::num::f64::SUBNORMAL, opts in options()) {
        prop_assert!(roundtrip(&single(Value::Float(f), opts)));
    }

    #[test]
    fn prop_string(s in text(), opts in options()) {
        prop_assert!(roundtrip(&single(Value::String(s), opts)));
    }

    #[test]
    fn prop_names_and_descriptions(
        entries in prop::collection::vec((name(), any::<i64>(), description()), 1..8)
    ) {
        let mut store = ConstantStore::new();
        for (name, value, description) in &entries {
            store.set_integer(name, *value, description.as_deref()).unwrap();
        }
        prop_assert!(roundtrip(&store));
    }

    #[test]
    fn prop_set_boolean_matches_truthiness(n in any::<i64>()) {
        let mut from_int = ConstantStore::new();
        from_int.set_boolean("B", n, None).unwrap();
        let mut from_bool = ConstantStore::new();
        from_bool.set_boolean("B", n != 0, None).unwrap();
        prop_assert_eq!(from_int, from_bool);
    }

    #[test]
    fn prop_integer_strings_parse_exactly(n in any::<i64>()) {
        prop_assert_eq!(to_integer(&Mixed::from(n.to_string())).unwrap(), n);
    }

    #[test]
    fn prop_float_to_integer_truncates(f in -1.0e15f64..1.0e15) {
        prop_assert_eq!(to_integer(&Mixed::from(f)).unwrap(), f.trunc() as i64);
    }

    #[test]
    fn prop_numeric_strings_match_floats(f in -1.0e9f64..1.0e9) {
        let text = f.to_string();
        prop_assert_eq!(to_float(&Mixed::from(text.as_str())).unwrap(), f);
        prop_assert_eq!(to_boolean(&Mixed::from(f)).unwrap(), f != 0.0);
    }
}
