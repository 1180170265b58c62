// SPDX-License-Identifier: MIT OR Apache-2.0

//! Binding of sections and their keys to struct fields.

use std::rc::Rc;

use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, DeserializeSeed, Deserializer, Error as _, MapAccess, Visitor};

use super::binding::Binding;
use super::value::{is_duration, ValueDeserializer};
use super::zero::ZeroDeserializer;
use crate::domain::configuration::describe_section;
use crate::domain::{ConfigError, Configuration, FieldName, Result, Section, GLOBAL_SECTION};

/// Returns the first name equal to `field`, or else the first name the
/// heuristic accepts. Exact field names skip the heuristic.
fn find_name<'a, I>(mut names: I, field: &FieldName) -> Option<&'a str>
where
    I: Iterator<Item = &'a str> + Clone,
{
    let exact = field.as_str();
    if let Some(name) = names.clone().find(|name| *name == exact) {
        return Some(name);
    }
    names.find(|name| field.matches(name))
}

/// What one destination field matched.
#[derive(Debug, Clone, Copy)]
struct Entry<'a> {
    /// Key in the current section and its raw value
    value: Option<(&'a str, &'a str)>,
    /// Section, only for fields that take one
    nested: Option<(&'a str, &'a Section)>,
}

impl<'a> Entry<'a> {
    fn lookup(
        config: &'a Configuration,
        section: &'a Section,
        structure: &'static str,
        field: &'static str,
        binding: &Binding,
    ) -> Self {
        let name = FieldName::new(field);
        let value = find_name(section.keys(), &name)
            .and_then(|key| section.get(key).map(|raw| (key, raw)));
        let nested = if binding.takes_section(structure, field) {
            find_name(
                config.section_names().filter(|n| *n != GLOBAL_SECTION),
                &name,
            )
            .and_then(|n| config.section(n).map(|s| (n, s)))
        } else {
            None
        };
        Entry { value, nested }
    }

    fn is_missing(&self) -> bool {
        self.value.is_none() && self.nested.is_none()
    }
}

/// Walks the fields of a destination struct over one section.
///
/// Scalar fields bind to keys of the section. Struct and map fields bind to
/// sections of the configuration.
pub(crate) struct StructAccess<'a> {
    config: &'a Configuration,
    section_name: &'a str,
    section: &'a Section,
    structure: &'static str,
    fields: std::slice::Iter<'static, &'static str>,
    pending: Option<Entry<'a>>,
    binding: Rc<Binding>,
}

impl<'a> StructAccess<'a> {
    pub(crate) fn new(
        config: &'a Configuration,
        section_name: &'a str,
        section: &'a Section,
        structure: &'static str,
        fields: &'static [&'static str],
        binding: Rc<Binding>,
    ) -> Self {
        StructAccess {
            config,
            section_name,
            section,
            structure,
            fields: fields.iter(),
            pending: None,
            binding,
        }
    }
}

impl<'de> MapAccess<'de> for StructAccess<'de> {
    type Error = ConfigError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        for &field in self.fields.by_ref() {
            let entry = Entry::lookup(
                self.config,
                self.section,
                self.structure,
                field,
                &self.binding,
            );
            if entry.is_missing() {
                if !self.binding.options().zeroes_missing_fields() {
                    tracing::trace!(field, "no matching key, leaving field to serde");
                    continue;
                }
                tracing::trace!(
                    field,
                    section = %describe_section(self.section_name),
                    "no matching key, using zero value"
                );
            }
            self.pending = Some(entry);
            return seed
                .deserialize(BorrowedStrDeserializer::<ConfigError>::new(field))
                .map(Some);
        }
        Ok(None)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        let entry = self
            .pending
            .take()
            .ok_or_else(|| ConfigError::custom("value requested before its key"))?;
        seed.deserialize(EntryDeserializer {
            config: self.config,
            section_name: self.section_name,
            entry,
            binding: Rc::clone(&self.binding),
        })
    }
}

/// Deserializer for one matched field. Picks the key's value or the nested
/// section depending on the shape the field asks for.
struct EntryDeserializer<'a> {
    config: &'a Configuration,
    section_name: &'a str,
    entry: Entry<'a>,
    binding: Rc<Binding>,
}

impl<'a> EntryDeserializer<'a> {
    fn wrap(&self, key: &str, error: ConfigError) -> ConfigError {
        error.in_entry(self.section_name, key)
    }

    fn nested(&self) -> Option<SectionDeserializer<'a>> {
        self.entry.nested.map(|(name, section)| {
            SectionDeserializer::new(self.config, name, section, Rc::clone(&self.binding))
        })
    }
}

macro_rules! forward_to_value {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                match self.entry.value {
                    Some((key, raw)) => ValueDeserializer::new(raw)
                        .$method(visitor)
                        .map_err(|e| self.wrap(key, e)),
                    None => ZeroDeserializer.$method(visitor),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for EntryDeserializer<'de> {
    type Error = ConfigError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.entry.value {
            Some((key, raw)) => ValueDeserializer::new(raw)
                .deserialize_any(visitor)
                .map_err(|e| self.wrap(key, e)),
            None => ZeroDeserializer.deserialize_any(visitor),
        }
    }

    forward_to_value! {
        deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_i128 deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
        deserialize_u128 deserialize_f32 deserialize_f64 deserialize_char deserialize_str
        deserialize_string deserialize_bytes deserialize_byte_buf deserialize_unit
        deserialize_seq deserialize_identifier deserialize_ignored_any
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if let Some((key, raw)) = self.entry.value {
            return ValueDeserializer::new(raw)
                .deserialize_option(visitor)
                .map_err(|e| self.wrap(key, e));
        }
        if self.entry.nested.is_some() {
            return visitor.visit_some(self);
        }
        visitor.visit_none()
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.entry.value {
            Some((key, raw)) => ValueDeserializer::new(raw)
                .deserialize_unit_struct(name, visitor)
                .map_err(|e| self.wrap(key, e)),
            None => ZeroDeserializer.deserialize_unit_struct(name, visitor),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.entry.value {
            Some((key, raw)) => ValueDeserializer::new(raw)
                .deserialize_tuple(len, visitor)
                .map_err(|e| self.wrap(key, e)),
            None => ZeroDeserializer.deserialize_tuple(len, visitor),
        }
    }

    fn deserialize_tuple_struct<V>(
        self,
        name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.entry.value {
            Some((key, raw)) => ValueDeserializer::new(raw)
                .deserialize_tuple_struct(name, len, visitor)
                .map_err(|e| self.wrap(key, e)),
            None => ZeroDeserializer.deserialize_tuple_struct(name, len, visitor),
        }
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.nested() {
            Some(section) => section.deserialize_map(visitor),
            None => ZeroDeserializer.deserialize_map(visitor),
        }
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
        if is_duration(name, fields) {
            return match self.entry.value {
                Some((key, raw)) => ValueDeserializer::new(raw)
                    .deserialize_struct(name, fields, visitor)
                    .map_err(|e| self.wrap(key, e)),
                None => ZeroDeserializer.deserialize_struct(name, fields, visitor),
            };
        }
        match self.nested() {
            Some(section) => section.deserialize_struct(name, fields, visitor),
            None => ZeroDeserializer.deserialize_struct(name, fields, visitor),
        }
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
        match self.entry.value {
            Some((key, raw)) => ValueDeserializer::new(raw)
                .deserialize_enum(name, variants, visitor)
                .map_err(|e| self.wrap(key, e)),
            None => ZeroDeserializer.deserialize_enum(name, variants, visitor),
        }
    }
}

/// Deserializer over a whole section, as a struct or as a map of raw values.
pub(crate) struct SectionDeserializer<'a> {
    config: &'a Configuration,
    name: &'a str,
    section: &'a Section,
    binding: Rc<Binding>,
}

impl<'a> SectionDeserializer<'a> {
    pub(crate) fn new(
        config: &'a Configuration,
        name: &'a str,
        section: &'a Section,
        binding: Rc<Binding>,
    ) -> Self {
        SectionDeserializer {
            config,
            name,
            section,
            binding,
        }
    }
}

impl<'de> de::Deserializer<'de> for SectionDeserializer<'de> {
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
        visitor.visit_map(SectionMapAccess {
            name: self.name,
            entries: Box::new(self.section.iter()),
            pending: None,
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
            self.name,
            self.section,
            name,
            fields,
            self.binding,
        ))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct enum identifier
        ignored_any
    }
}

/// A section's raw key-value pairs as a map.
struct SectionMapAccess<'a> {
    name: &'a str,
    entries: Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>,
    pending: Option<(&'a str, &'a str)>,
}

impl<'de> MapAccess<'de> for SectionMapAccess<'de> {
    type Error = ConfigError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.entries.next() {
            Some((key, raw)) => {
                self.pending = Some((key, raw));
                seed.deserialize(BorrowedStrDeserializer::<ConfigError>::new(key))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        let (key, raw) = self
            .pending
            .take()
            .ok_or_else(|| ConfigError::custom("value requested before its key"))?;
        seed.deserialize(ValueDeserializer::new(raw))
            .map_err(|e| e.in_entry(self.name, key))
    }
}
