//! Purity and determinism of binding and key derivation.

use proptest::prelude::*;
use task_lock::{bind, build_key, CallSite, KeySpec, KeyTerm, Signature, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ]
}

fn call_site() -> impl Strategy<Value = CallSite> {
    (
        prop::collection::vec(scalar(), 0..4),
        prop::collection::vec(("[a-d]", scalar()), 0..4),
    )
        .prop_map(|(args, kwargs)| {
            kwargs
                .into_iter()
                .fold(CallSite::from_args(args), |call, (name, value)| call.kwarg(name, value))
        })
}

fn signature() -> Signature {
    Signature::new(["a", "b", "c", "d"])
        .with_defaults(["c-default", "d-default"])
        .unwrap()
}

proptest! {
    #[test]
    fn bind_is_pure(call in call_site(), name in "[a-e]") {
        let sig = signature();
        prop_assert_eq!(bind(&sig, &call, &name), bind(&sig, &call, &name));
    }

    #[test]
    fn keyword_always_wins(call in call_site(), value in scalar()) {
        let sig = signature();
        let call = call.kwarg("a", value.clone());
        prop_assert_eq!(bind(&sig, &call, "a").value(), Some(&value));
    }

    #[test]
    fn build_is_deterministic(call in call_site()) {
        let sig = signature();
        let spec = KeySpec::terms([KeyTerm::priority(["a", "b"]), KeyTerm::from("c"), KeyTerm::from("d")]);
        let first = build_key("f", &sig, &call, Some(&spec));
        let second = build_key("f", &sig, &call, Some(&spec));
        prop_assert_eq!(first, second);

        let auto_first = build_key("f", &sig, &call, None);
        let auto_second = build_key("f", &sig, &call, None);
        prop_assert_eq!(auto_first, auto_second);
    }

    #[test]
    fn ordered_terms_add_one_segment_each(call in call_site()) {
        let sig = signature();
        let call = call.kwarg("a", "x").kwarg("b", "y");
        let key = build_key("f", &sig, &call, Some(&KeySpec::terms(["a", "b", "c", "d"]))).unwrap();
        prop_assert!(key.as_str().starts_with("f:x:y:"));
    }
}
