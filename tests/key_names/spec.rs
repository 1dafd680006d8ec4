//! Keys derived from a key spec.

use serde_json::json;
use task_lock::{build_key, call_site, Accessor, KeyError, KeySpec, KeyTerm, Term, Value};

use crate::support::{checkout_signature, order, order_object};

fn checkout_key(spec: &KeySpec, call: &task_lock::CallSite) -> Result<String, KeyError> {
    build_key("checkout", &checkout_signature(), call, Some(spec)).map(|k| k.into_string())
}

#[test]
fn literal_overrides_everything() {
    let spec = KeySpec::literal("checkout-lock");
    let call = call_site!(order("o-1", 42, "a@x"); coupon = "SAVE");
    assert_eq!(checkout_key(&spec, &call).unwrap(), "checkout-lock");
}

#[test]
fn chain_into_serialized_struct() {
    let spec = KeySpec::terms([Term::chain("order", ["customer", "id"])]);
    let call = call_site!(order("o-1", 42, "a@x"));
    assert_eq!(checkout_key(&spec, &call).unwrap(), "checkout:42");
}

#[test]
fn chain_into_object_fields() {
    let spec = KeySpec::terms([Term::chain("order", ["customer", "id"])]);
    let call = call_site!(order_object("o-2", 7));
    assert_eq!(checkout_key(&spec, &call).unwrap(), "checkout:7");
}

#[test]
fn chain_with_list_index() {
    let spec = KeySpec::terms([Term::chain(
        "order",
        [Accessor::from("lines"), Accessor::Index(-1)],
    )]);
    let call = call_site!(order("o-1", 42, "a@x"));
    assert_eq!(checkout_key(&spec, &call).unwrap(), "checkout:sku-2");
}

#[test]
fn mixed_terms_from_config() {
    let spec = KeySpec::from_json(&json!([
        ["order", "id"],
        { "priority": ["account", ["order", "customer", "email"]] },
        "channel",
    ]))
    .unwrap();

    let anonymous = call_site!(order("o-1", 42, "a@x"));
    assert_eq!(checkout_key(&spec, &anonymous).unwrap(), "checkout:o-1:a@x:web");

    let with_account = call_site!(order("o-1", 42, "a@x"), "acct-9"; channel = "mobile");
    assert_eq!(
        checkout_key(&spec, &with_account).unwrap(),
        "checkout:o-1:acct-9:mobile"
    );
}

#[test]
fn empty_default_still_adds_a_segment() {
    let spec = KeySpec::terms(["coupon", "channel"]);
    let call = call_site!(order("o-1", 42, "a@x"));
    assert_eq!(checkout_key(&spec, &call).unwrap(), "checkout::web");
}

#[test]
fn keyword_overrides_positional_value() {
    let spec = KeySpec::terms(["coupon"]);
    let call = call_site!(order("o-1", 42, "a@x"), Value::Null, "POSITIONAL"; coupon = "KEYWORD");
    assert_eq!(checkout_key(&spec, &call).unwrap(), "checkout:KEYWORD");
}

#[test]
fn priority_group_picks_first_truthy_not_last() {
    let spec = KeySpec::terms([KeyTerm::priority(["account", "coupon", "channel"])]);
    let call = call_site!(order("o-1", 42, "a@x"), "", "x", "y");
    assert_eq!(checkout_key(&spec, &call).unwrap(), "checkout:x");
}

#[test]
fn missing_required_parameter() {
    let spec = KeySpec::terms(["order"]);
    let err = checkout_key(&spec, &call_site!()).unwrap_err();
    assert_eq!(err, KeyError::ParameterNotFound { name: "order".into() });
}

#[test]
fn missing_attribute_names_the_hop() {
    let spec = KeySpec::terms([Term::chain("order", ["customer", "phone"])]);
    let err = checkout_key(&spec, &call_site!(order_object("o-2", 7))).unwrap_err();
    match err {
        KeyError::AttributeNotFound { accessor, value } => {
            assert_eq!(accessor, Accessor::from("phone"));
            assert!(value.starts_with("Customer"), "{}", value);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn error_messages_point_at_configuration() {
    let err = checkout_key(&KeySpec::terms(["nope"]), &call_site!()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "lock is configured incorrectly: could not find parameter \"nope\" in function call or definition"
    );
}
