//! Test domain: a checkout function and the orders it is called with.

use serde::Serialize;
use task_lock::{Object, Signature, Value};

#[derive(Serialize)]
pub struct Customer {
    pub id: u64,
    pub email: String,
}

#[derive(Serialize)]
pub struct Order {
    pub id: String,
    pub customer: Customer,
    pub lines: Vec<String>,
}

pub fn order(id: &str, customer_id: u64, email: &str) -> Value {
    Value::from_serialize(&Order {
        id: id.to_string(),
        customer: Customer {
            id: customer_id,
            email: email.to_string(),
        },
        lines: vec!["sku-1".to_string(), "sku-2".to_string()],
    })
    .unwrap()
}

/// An order modelled as an object with fields rather than a map.
pub fn order_object(id: &str, customer_id: i64) -> Value {
    Object::new("Order")
        .with_field("id", id)
        .with_field("customer", Object::new("Customer").with_field("id", customer_id))
        .into()
}

/// checkout(order, account=None, coupon="", channel="web")
pub fn checkout_signature() -> Signature {
    Signature::new(["order", "account", "coupon", "channel"])
        .with_defaults([Value::Null, Value::from(""), Value::from("web")])
        .unwrap()
}
