use alloc::string::String;
use core::fmt;

use serde_core::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, Serializer};

use super::{Mask, MaskValue};

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for MaskValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Expose => serializer.serialize_bool(true),
            Self::Hidden => serializer.serialize_bool(false),
            Self::Nested(mask) => mask.serialize(serializer),
        }
    }
}

impl Serialize for Mask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// -----------------------------------------------------------------------------
// Deserialize

struct MaskVisitor;

impl<'de> Visitor<'de> for MaskVisitor {
    type Value = Mask;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a mask object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut mask = Mask::new();
        while let Some((name, value)) = map.next_entry::<String, MaskValue>()? {
            if mask.insert(name.clone(), value).is_some() {
                return Err(de::Error::custom(format_args!("duplicate mask key `{name}`")));
            }
        }
        Ok(mask)
    }
}

impl<'de> Deserialize<'de> for Mask {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MaskVisitor)
    }
}

struct MaskValueVisitor;

impl<'de> Visitor<'de> for MaskValueVisitor {
    type Value = MaskValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("`true`, `false` or a nested mask object")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(MaskValue::from(v))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        MaskVisitor.visit_map(map).map(MaskValue::Nested)
    }
}

impl<'de> Deserialize<'de> for MaskValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MaskValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Mask, mask};

    #[test]
    fn serializes_as_plain_object() {
        let m = mask! { "a" => true, "b" => false, "c" => { "d" => true } };
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value, json!({ "a": true, "b": false, "c": { "d": true } }));
    }

    #[test]
    fn deserializes_nested_objects() {
        let m: Mask =
            serde_json::from_value(json!({ "a": true, "c": { "d": false, "e": {} } })).unwrap();
        assert_eq!(m, mask! { "a" => true, "c" => { "d" => false, "e" => {} } });
    }

    #[test]
    fn rejects_other_value_kinds() {
        let err = serde_json::from_value::<Mask>(json!({ "a": 1 })).unwrap_err();
        assert!(err.to_string().contains("`true`, `false` or a nested mask object"));

        assert!(serde_json::from_value::<Mask>(json!([true])).is_err());
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = serde_json::from_str::<Mask>(r#"{ "a": true, "a": false }"#).unwrap_err();
        assert!(err.to_string().contains("duplicate mask key `a`"));
    }
}
