//! Serde glue for types that are only ever written as JSON objects.
//!
//! A derived struct deserializer also accepts a sequence and fills the
//! fields by position, so `[]` would read as an empty document. Types
//! declared with [`keyed_serde!`] derive their field handling under
//! `#[serde(remote = "Self")]` and get trait impls that require a map.

use std::fmt;
use std::marker::PhantomData;

use serde::Deserializer;
use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};

/// A type whose derived field deserializer is reachable as an inherent
/// `deserialize` function.
pub(crate) trait Keyed<'de>: Sized {
    const EXPECTING: &'static str;

    fn deserialize_fields<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error>;
}

pub(crate) fn deserialize_keyed<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Keyed<'de>,
{
    deserializer.deserialize_map(KeyedVisitor(PhantomData))
}

struct KeyedVisitor<T>(PhantomData<T>);

impl<'de, T: Keyed<'de>> Visitor<'de> for KeyedVisitor<T> {
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(T::EXPECTING)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<T, A::Error> {
        T::deserialize_fields(MapAccessDeserializer::new(map))
    }
}

/// Implements `Serialize` and a map-only `Deserialize` for a type deriving
/// both under `#[serde(remote = "Self")]`.
macro_rules! keyed_serde {
    ($ty:ident $(<$param:ident: $bound:path>)?, $expecting:literal) => {
        impl<'de $(, $param: $bound)?> $crate::keyed::Keyed<'de> for $ty $(<$param>)? {
            const EXPECTING: &'static str = $expecting;

            fn deserialize_fields<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                <$ty $(<$param>)?>::deserialize(deserializer)
            }
        }

        impl<'de $(, $param: $bound)?> ::serde::Deserialize<'de> for $ty $(<$param>)? {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                $crate::keyed::deserialize_keyed(deserializer)
            }
        }

        impl $(<$param: $bound>)? ::serde::Serialize for $ty $(<$param>)? {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                <$ty $(<$param>)?>::serialize(self, serializer)
            }
        }
    };
}

pub(crate) use keyed_serde;

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::keyed_serde;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(remote = "Self")]
    struct Point {
        #[serde(default)]
        x: i64,
        #[serde(default)]
        y: i64,
    }

    keyed_serde!(Point, "a point object");

    #[test]
    fn test_objects_are_read_by_key() {
        let point: Point = serde_json::from_str(r#"{"y": 2, "x": 1, "z": 3}"#).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
        assert_eq!(serde_json::to_string(&point).unwrap(), r#"{"x":1,"y":2}"#);
    }

    #[test]
    fn test_sequences_are_rejected() {
        let error = serde_json::from_str::<Point>("[1, 2]").unwrap_err();
        assert!(error.to_string().contains("expected a point object"));
        assert!(serde_json::from_str::<Point>("[]").is_err());
        assert!(serde_json::from_value::<Point>(serde_json::json!([1])).is_err());
    }
}
