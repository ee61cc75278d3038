//! JSON:API request body shaping for update operations

use serde_json::{json, Value};

/// One of the three ways a caller can describe an update body
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadInput {
    /// Full envelope, sent as is
    Payload(Value),
    /// Content of the `data` member
    Data(Value),
    /// Content of `data.attributes`
    Attributes(Value),
}

impl PayloadInput {
    /// Pick one input with precedence payload > data > attributes
    ///
    /// Missing attributes are taken as `null`.
    pub fn from_parts(
        payload: Option<Value>,
        data: Option<Value>,
        attributes: Option<Value>,
    ) -> Self {
        match (payload, data) {
            (Some(payload), _) => PayloadInput::Payload(payload),
            (None, Some(data)) => PayloadInput::Data(data),
            (None, None) => PayloadInput::Attributes(attributes.unwrap_or(Value::Null)),
        }
    }

    /// Canonical request body
    pub fn into_body(self) -> Value {
        match self {
            PayloadInput::Payload(payload) => payload,
            PayloadInput::Data(data) => json!({ "data": data }),
            PayloadInput::Attributes(attributes) => json!({ "data": { "attributes": attributes } }),
        }
    }
}

/// Merge optional payload inputs into one body with precedence payload > data > attributes
///
/// With nothing supplied the result is `{"data": {"attributes": null}}`.
pub fn resolve_payload(
    payload: Option<Value>,
    data: Option<Value>,
    attributes: Option<Value>,
) -> Value {
    PayloadInput::from_parts(payload, data, attributes).into_body()
}
