// SPDX-License-Identifier: MIT OR Apache-2.0

//! The root deserializer over a whole configuration.

use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, DeserializeSeed, Deserializer, Error as _, MapAccess, Visitor};

use std::rc::Rc;

use super::binding::Binding;
use super::section::{SectionDeserializer, StructAccess};
use crate::domain::{ConfigError, Configuration, Result, Section, GLOBAL_SECTION};

macro_rules! reject_root {
    ($($method:ident => $found:expr;)*) => {
        $(
            fn $method<V>(self, _visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                Err(not_a_record($found))
            }
        )*
    };
}

fn not_a_record(found: &str) -> ConfigError {
    ConfigError::bind(format!("expected a struct or map, found {found}"))
}

/// Deserializer over a [`Configuration`].
///
/// A struct binds its scalar fields to keys of the global section and its
/// struct fields to sections. A map receives every section, keyed by name.
/// Any other destination is a bind error.
pub(crate) struct ConfigDeserializer<'a> {
    config: &'a Configuration,
    binding: Rc<Binding>,
}

impl<'a> ConfigDeserializer<'a> {
    pub(crate) fn new(config: &'a Configuration, binding: Binding) -> Self {
        ConfigDeserializer {
            config,
            binding: Rc::new(binding),
        }
    }
}

impl<'de> de::Deserializer<'de> for ConfigDeserializer<'de> {
    type Error = ConfigError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(SectionsAccess {
            config: self.config,
            sections: Box::new(self.config.sections()),
            pending: None,
            binding: self.binding,
        })
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
        visitor.visit_map(StructAccess::new(
            self.config,
            GLOBAL_SECTION,
            self.config.global(),
            name,
            fields,
            self.binding,
        ))
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    reject_root! {
        deserialize_bool => "a bool";
        deserialize_i8 => "an integer";
        deserialize_i16 => "an integer";
        deserialize_i32 => "an integer";
        deserialize_i64 => "an integer";
        deserialize_i128 => "an integer";
        deserialize_u8 => "an integer";
        deserialize_u16 => "an integer";
        deserialize_u32 => "an integer";
        deserialize_u64 => "an integer";
        deserialize_u128 => "an integer";
        deserialize_f32 => "a float";
        deserialize_f64 => "a float";
        deserialize_char => "a char";
        deserialize_str => "a string";
        deserialize_string => "a string";
        deserialize_bytes => "bytes";
        deserialize_byte_buf => "bytes";
        deserialize_option => "an option";
        deserialize_unit => "unit";
        deserialize_seq => "a sequence";
        deserialize_identifier => "an identifier";
        deserialize_ignored_any => "an ignored value";
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(not_a_record(&format!("unit struct {name}")))
    }

    fn deserialize_tuple<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(not_a_record("a tuple"))
    }

    fn deserialize_tuple_struct<V>(
        self,
        name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(not_a_record(&format!("tuple struct {name}")))
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(not_a_record(&format!("enum {name}")))
    }
}

/// Every section of the configuration, keyed by name.
struct SectionsAccess<'a> {
    config: &'a Configuration,
    sections: Box<dyn Iterator<Item = (&'a str, &'a Section)> + 'a>,
    pending: Option<(&'a str, &'a Section)>,
    binding: Rc<Binding>,
}

impl<'de> MapAccess<'de> for SectionsAccess<'de> {
    type Error = ConfigError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.sections.next() {
            Some((name, section)) => {
                self.pending = Some((name, section));
                seed.deserialize(BorrowedStrDeserializer::<ConfigError>::new(name))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        let (name, section) = self
            .pending
            .take()
            .ok_or_else(|| ConfigError::custom("value requested before its key"))?;
        seed.deserialize(SectionDeserializer::new(
            self.config,
            name,
            section,
            Rc::clone(&self.binding),
        ))
    }
}
