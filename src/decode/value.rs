// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoding of a single raw value.

use serde::de::value::{BorrowedStrDeserializer, SeqDeserializer};
use serde::de::{self, DeserializeSeed, Error as _, SeqAccess, Visitor};

use crate::domain::config_value::{parse_bool, parse_f32, parse_f64, parse_int, split_list};
use crate::domain::{parse_duration, ConfigError, Result};

const DURATION_NAME: &str = "Duration";
const DURATION_FIELDS: &[&str] = &["secs", "nanos"];

/// Returns `true` for the struct shape `std::time::Duration` asks for.
pub(crate) fn is_duration(name: &str, fields: &[&str]) -> bool {
    name == DURATION_NAME && fields == DURATION_FIELDS
}

macro_rules! deserialize_int {
    ($($method:ident => $visit:ident, $ty:ty;)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                visitor.$visit(parse_int::<$ty>(self.raw, stringify!($ty))?)
            }
        )*
    };
}

/// Deserializer over one raw value.
///
/// Scalars are parsed from the text, sequences are comma-separated lists,
/// and enums are read from the variant name.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ValueDeserializer<'de> {
    raw: &'de str,
}

impl<'de> ValueDeserializer<'de> {
    pub(crate) fn new(raw: &'de str) -> Self {
        ValueDeserializer { raw }
    }

    fn list(self) -> ListAccess<'de> {
        ListAccess {
            items: split_list(self.raw).into_iter(),
        }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer<'de> {
    type Error = ConfigError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.raw)
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_bool(parse_bool(self.raw)?)
    }

    deserialize_int! {
        deserialize_i8 => visit_i8, i8;
        deserialize_i16 => visit_i16, i16;
        deserialize_i32 => visit_i32, i32;
        deserialize_i64 => visit_i64, i64;
        deserialize_i128 => visit_i128, i128;
        deserialize_u8 => visit_u8, u8;
        deserialize_u16 => visit_u16, u16;
        deserialize_u32 => visit_u32, u32;
        deserialize_u64 => visit_u64, u64;
        deserialize_u128 => visit_u128, u128;
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_f32(parse_f32(self.raw)?)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_f64(parse_f64(self.raw)?)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let mut chars = self.raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(ConfigError::conversion(self.raw, "char")),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.raw)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.raw)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(self.raw.as_bytes())
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(self.raw.as_bytes())
    }

    // An empty value is an absent one.
    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.raw.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_seq(self.list())
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_seq(self.list())
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_seq(self.list())
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(ConfigError::invalid_type(de::Unexpected::Str(self.raw), &visitor))
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if !is_duration(name, fields) {
            return Err(ConfigError::invalid_type(de::Unexpected::Str(self.raw), &visitor));
        }
        let duration = parse_duration(self.raw)?;
        let parts = [duration.as_secs(), u64::from(duration.subsec_nanos())];
        let seq: SeqDeserializer<_, ConfigError> = SeqDeserializer::new(parts.into_iter());
        visitor.visit_seq(seq)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_enum(BorrowedStrDeserializer::<ConfigError>::new(self.raw))
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.raw)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

/// The elements of a comma-separated list, each decoded on its own.
pub(crate) struct ListAccess<'de> {
    items: std::vec::IntoIter<&'de str>,
}

impl<'de> SeqAccess<'de> for ListAccess<'de> {
    type Error = ConfigError;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        match self.items.next() {
            Some(item) => seed.deserialize(ValueDeserializer::new(item)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;
    use serde::Deserialize;
    use std::collections::HashMap;
    use std::time::Duration;

    fn decode<'de, T: Deserialize<'de>>(raw: &'de str) -> Result<T> {
        T::deserialize(ValueDeserializer::new(raw))
    }

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    enum Level {
        Debug,
        Info,
    }

    #[test]
    fn test_scalars() {
        assert_eq!(decode::<String>("hello world").unwrap(), "hello world");
        assert_eq!(decode::<&str>("borrowed").unwrap(), "borrowed");
        assert!(decode::<bool>("yes").unwrap());
        assert_eq!(decode::<i16>("-300").unwrap(), -300);
        assert_eq!(decode::<u64>("8080").unwrap(), 8080);
        assert_eq!(decode::<f32>("0.5").unwrap(), 0.5);
        assert_eq!(decode::<char>("x").unwrap(), 'x');
    }

    #[test]
    fn test_integer_overflow() {
        let err = decode::<u8>("256").unwrap_err();
        assert!(err.is_overflow_error());
        assert_eq!(err.to_string(), "can't convert \"256\" to type u8, it overflows the type");
    }

    #[test]
    fn test_char_needs_exactly_one() {
        assert!(decode::<char>("xy").unwrap_err().is_conversion_error());
        assert!(decode::<char>("").unwrap_err().is_conversion_error());
    }

    #[test]
    fn test_lists() {
        assert_eq!(decode::<Vec<String>>("a, b, c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(decode::<Vec<u8>>("1,2 , 3").unwrap(), vec![1, 2, 3]);
        assert_eq!(decode::<(u8, bool)>("7, on").unwrap(), (7, true));
        assert!(decode::<Vec<i32>>("").unwrap().is_empty());
    }

    #[test]
    fn test_list_element_error_aborts() {
        let err = decode::<Vec<u8>>("1, 2, 300").unwrap_err();
        assert!(err.is_overflow_error());
        let err = decode::<Vec<u8>>("1, x").unwrap_err();
        assert!(err.is_conversion_error());
    }

    #[test]
    fn test_durations() {
        assert_eq!(decode::<Duration>("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(
            decode::<Vec<Duration>>("5s, 250ms").unwrap(),
            vec![Duration::from_secs(5), Duration::from_millis(250)]
        );
        assert!(decode::<Duration>("soon").unwrap_err().is_conversion_error());
    }

    #[test]
    fn test_timestamps() {
        let ts = decode::<Timestamp>("2015-05-08").unwrap();
        assert_eq!(ts, Timestamp::parse("2015-05-08").unwrap());
        assert_eq!(decode::<Vec<Timestamp>>("2015-05-08, 2016-01-01").unwrap().len(), 2);

        let err = decode::<Timestamp>("someday").unwrap_err();
        assert!(err.is_conversion_error());
    }

    #[test]
    fn test_options() {
        assert_eq!(decode::<Option<u8>>("").unwrap(), None);
        assert_eq!(decode::<Option<u8>>("4").unwrap(), Some(4));
    }

    #[test]
    fn test_enums() {
        assert_eq!(decode::<Level>("info").unwrap(), Level::Info);
        assert_eq!(decode::<Level>("debug").unwrap(), Level::Debug);
        assert!(decode::<Level>("verbose").is_err());
    }

    #[test]
    fn test_map_is_rejected() {
        let err = decode::<HashMap<String, String>>("a=b").unwrap_err();
        assert!(matches!(err, ConfigError::DeserializeError { .. }));
    }
}
