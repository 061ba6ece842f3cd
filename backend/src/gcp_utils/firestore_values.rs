//! Conversion between plain JSON values and Firestore's typed REST values.
//!
//! Firestore wraps every value in a one-key object naming its type, e.g.
//! `{"stringValue": "a.pdf"}` or `{"integerValue": "3"}` (int64 travels as a string).

use anyhow::Context;
use common::metadata_record::MetadataRecord;
use serde_json::{Map, Value, json};

pub fn to_firestore_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or(0.0) }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({ "arrayValue": { "values": items.iter().map(to_firestore_value).collect::<Vec<_>>() } }),
        Value::Object(obj) => json!({ "mapValue": { "fields": to_firestore_fields(obj.iter()) } }),
    }
}

pub fn to_firestore_fields<'a>(fields: impl IntoIterator<Item = (&'a String, &'a Value)>) -> Map<String, Value> {
    fields.into_iter().map(|(k, v)| (k.clone(), to_firestore_value(v))).collect()
}

pub fn timestamp_value(timestamp: chrono::DateTime<chrono::Utc>) -> Value {
    json!({ "timestampValue": timestamp.to_rfc3339_opts(chrono::SecondsFormat::Micros, true) })
}

pub fn from_firestore_value(value: &Value) -> anyhow::Result<Value> {
    let Value::Object(obj) = value else {
        anyhow::bail!("Invalid Firestore value: {}", value);
    };
    let Some((kind, inner)) = obj.iter().next() else {
        anyhow::bail!("Empty Firestore value");
    };
    let result = match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => inner.clone(),
        "integerValue" => match inner {
            Value::String(s) => Value::from(s.parse::<i64>().with_context(|| format!("Invalid integerValue {}", s))?),
            other => other.clone(),
        },
        "doubleValue" => inner.clone(),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "geoPointValue" => json!({
            "latitude": inner.get("latitude").cloned().unwrap_or(Value::from(0.0)),
            "longitude": inner.get("longitude").cloned().unwrap_or(Value::from(0.0)),
        }),
        "arrayValue" => {
            let values = inner.get("values").and_then(|v| v.as_array()).cloned().unwrap_or_default();
            Value::Array(values.iter().map(from_firestore_value).collect::<anyhow::Result<Vec<_>>>()?)
        }
        "mapValue" => {
            let fields = inner.get("fields").cloned().unwrap_or(Value::Object(Map::new()));
            Value::Object(from_firestore_fields(&fields)?.into_iter().collect())
        }
        other => anyhow::bail!("Unsupported Firestore value type: {}", other),
    };
    Ok(result)
}

pub fn from_firestore_fields(fields: &Value) -> anyhow::Result<MetadataRecord> {
    let Value::Object(fields) = fields else {
        anyhow::bail!("Invalid Firestore fields: {}", fields);
    };
    fields
        .iter()
        .map(|(k, v)| Ok((k.clone(), from_firestore_value(v)?)))
        .collect()
}

/// Field paths that are not plain identifiers must be quoted with backticks.
pub fn quote_field_path(field_name: &str) -> String {
    let mut chars = field_name.chars();
    let is_simple = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    };
    if is_simple {
        field_name.to_string()
    } else {
        format!("`{}`", field_name.replace('\\', "\\\\").replace('`', "\\`"))
    }
}
