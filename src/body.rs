use serde::Serialize;
use serde_json::{Map, Value};

use crate::ErrorInfo;

/// Converts a request body into the generic JSON object the request encoder
/// expects.
///
/// Failures happen before any network call and surface as
/// [`ErrorInfo::Request`]. Non-object bodies (scalars, arrays) are rejected;
/// the API takes key/value payloads only.
pub(crate) fn to_json_object<B: Serialize + ?Sized>(
    body: &B,
) -> Result<Map<String, Value>, ErrorInfo> {
    let value = serde_json::to_value(body).map_err(|err| ErrorInfo::Request {
        message: format!("body encoding failed: {err}"),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ErrorInfo::Request {
            message: format!(
                "body must encode to a JSON object, got {}",
                json_kind(&other)
            ),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
