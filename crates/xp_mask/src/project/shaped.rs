use serde_core::ser::{Error, Serialize, Serializer};

use crate::Mask;
use crate::project::project_value;

/// A response value declared to be shaped by a [`Mask`].
///
/// Serializing a `Shaped` projects the inner value first, so whatever
/// serializer the transport uses only ever sees the exposed attributes.
///
/// # Examples
///
/// ```
/// use serde::Serialize;
/// use xp_mask::{mask, project::Shaped};
///
/// #[derive(Serialize)]
/// struct User {
///     name: String,
///     password: String,
/// }
///
/// let user = User { name: "ada".into(), password: "secret".into() };
/// let returning = mask! { "name" => true };
///
/// let body = serde_json::to_string(&Shaped::new(&user, &returning)).unwrap();
/// assert_eq!(body, r#"{"name":"ada"}"#);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Shaped<'a, T: ?Sized> {
    value: &'a T,
    mask: &'a Mask,
}

impl<'a, T: ?Sized> Shaped<'a, T> {
    #[inline]
    pub const fn new(value: &'a T, mask: &'a Mask) -> Self {
        Self { value, mask }
    }

    #[inline]
    pub const fn value(&self) -> &'a T {
        self.value
    }

    #[inline]
    pub const fn mask(&self) -> &'a Mask {
        self.mask
    }
}

impl<T: Serialize + ?Sized> Serialize for Shaped<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        project_value(self.value, self.mask)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::Shaped;
    use crate::mask;

    #[derive(Serialize)]
    struct Response {
        property_a: bool,
        property_b: &'static str,
        property_c: u32,
    }

    #[test]
    fn serializes_only_exposed_fields() {
        let response = Response {
            property_a: true,
            property_b: "default",
            property_c: 12,
        };
        let returning = mask! { "property_b" => true, "property_c" => true };

        let value = serde_json::to_value(Shaped::new(&response, &returning)).unwrap();
        assert_eq!(value, json!({ "property_b": "default", "property_c": 12 }));
    }

    #[test]
    fn shapes_sequences() {
        let list = [json!({ "a": 1, "b": 2 }), json!({ "a": 3, "b": 4 })];
        let returning = mask! { "a" => true };

        let body = serde_json::to_string(&Shaped::new(&list[..], &returning)).unwrap();
        assert_eq!(body, r#"[{"a":1},{"a":3}]"#);
    }
}
