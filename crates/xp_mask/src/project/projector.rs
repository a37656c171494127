use serde_core::Serialize;
use serde_json::{Map, Value};

use crate::project::ProjectError;
use crate::{Mask, MaskValue};

/// Keeps only what `mask` exposes of `value`.
///
/// Objects keep the keys the mask exposes, arrays are projected element by
/// element with the same mask, and scalars (including `null`) are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use xp_mask::{mask, project::project};
///
/// let doc = json!({
///     "id": 7,
///     "password": "hunter2",
///     "friends": [{ "id": 1, "email": "a@x" }, { "id": 2, "email": "b@x" }],
/// });
/// let m = mask! { "id" => true, "password" => false, "friends" => { "id" => true } };
///
/// assert_eq!(
///     project(&doc, &m),
///     json!({ "id": 7, "friends": [{ "id": 1 }, { "id": 2 }] }),
/// );
/// ```
pub fn project(value: &Value, mask: &Mask) -> Value {
    match value {
        Value::Object(object) => Value::Object(project_object(object, mask)),
        Value::Array(items) => Value::Array(items.iter().map(|item| project(item, mask)).collect()),
        scalar => scalar.clone(),
    }
}

fn project_object(object: &Map<String, Value>, mask: &Mask) -> Map<String, Value> {
    let mut projected = Map::new();
    for (name, rule) in mask {
        let Some(value) = object.get(name) else {
            continue;
        };
        match rule {
            MaskValue::Expose => {
                projected.insert(name.clone(), value.clone());
            }
            MaskValue::Nested(inner) => {
                projected.insert(name.clone(), project(value, inner));
            }
            MaskValue::Hidden => {}
        }
    }
    projected
}

/// Serializes `value` into a document, then [`project`]s it.
pub fn project_value<T: Serialize + ?Sized>(value: &T, mask: &Mask) -> Result<Value, ProjectError> {
    let document = serde_json::to_value(value)?;
    Ok(project(&document, mask))
}
