// SPDX-License-Identifier: MIT OR Apache-2.0

//! Zero values for fields with no matching key.

use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, DeserializeSeed, Error as _, MapAccess, SeqAccess, Visitor};

use crate::domain::{ConfigError, Result};

/// Produces the zero value of whatever type asks for one: `false`, `0`, the
/// empty string, an empty list, `None`, a struct of zero values, or the first
/// variant of an enum.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ZeroDeserializer;

const NO_FIELDS: &[&str] = &[];

macro_rules! deserialize_zero {
    ($($method:ident => $visit:ident($zero:expr);)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                visitor.$visit($zero)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ZeroDeserializer {
    type Error = ConfigError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    deserialize_zero! {
        deserialize_bool => visit_bool(false);
        deserialize_i8 => visit_i8(0);
        deserialize_i16 => visit_i16(0);
        deserialize_i32 => visit_i32(0);
        deserialize_i64 => visit_i64(0);
        deserialize_i128 => visit_i128(0);
        deserialize_u8 => visit_u8(0);
        deserialize_u16 => visit_u16(0);
        deserialize_u32 => visit_u32(0);
        deserialize_u64 => visit_u64(0);
        deserialize_u128 => visit_u128(0);
        deserialize_f32 => visit_f32(0.0);
        deserialize_f64 => visit_f64(0.0);
        deserialize_char => visit_char('\0');
        deserialize_str => visit_borrowed_str("");
        deserialize_string => visit_borrowed_str("");
        deserialize_identifier => visit_borrowed_str("");
        deserialize_bytes => visit_borrowed_bytes(&[]);
        deserialize_byte_buf => visit_borrowed_bytes(&[]);
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_none()
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
        visitor.visit_seq(ZeroSeq { remaining: 0 })
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_seq(ZeroSeq { remaining: len })
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_seq(ZeroSeq { remaining: len })
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(ZeroFields {
            fields: NO_FIELDS.iter(),
        })
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(ZeroFields {
            fields: fields.iter(),
        })
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match variants.first() {
            Some(first) => visitor.visit_enum(BorrowedStrDeserializer::<ConfigError>::new(first)),
            None => Err(ConfigError::custom(format_args!("enum {name} has no variants"))),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

struct ZeroSeq {
    remaining: usize,
}

impl<'de> SeqAccess<'de> for ZeroSeq {
    type Error = ConfigError;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        seed.deserialize(ZeroDeserializer).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}

struct ZeroFields {
    fields: std::slice::Iter<'static, &'static str>,
}

impl<'de> MapAccess<'de> for ZeroFields {
    type Error = ConfigError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.fields.next() {
            Some(field) => seed
                .deserialize(BorrowedStrDeserializer::<ConfigError>::new(field))
                .map(Some),
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        seed.deserialize(ZeroDeserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use std::time::Duration;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Inner {
        name: String,
        port: u16,
        ratio: f64,
        tags: Vec<String>,
        nickname: Option<String>,
        pair: (u8, bool),
        enabled: bool,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    enum Mode {
        Fast,
        Slow,
    }

    fn zero<'de, T: Deserialize<'de>>() -> T {
        T::deserialize(ZeroDeserializer).unwrap()
    }

    #[test]
    fn test_struct_of_zero_values() {
        assert_eq!(zero::<Inner>(), Inner::default());
    }

    #[test]
    fn test_special_types() {
        assert_eq!(zero::<Duration>(), Duration::ZERO);
        assert_eq!(zero::<Timestamp>(), Timestamp::default());
        assert!(zero::<BTreeMap<String, String>>().is_empty());
    }

    #[test]
    fn test_enum_takes_first_variant() {
        assert_eq!(zero::<Mode>(), Mode::Fast);
        assert_ne!(zero::<Mode>(), Mode::Slow);
    }
}
