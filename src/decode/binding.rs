// SPDX-License-Identifier: MIT OR Apache-2.0

//! Which destination fields take a whole section.
//!
//! Before decoding, the destination type is run once against a recording
//! deserializer fed with zero values. Every field that asks for a struct or
//! a map, directly or through `Option` and newtype wrappers, is noted by
//! struct name and field name. Only those fields bind to sections; a scalar
//! field never does, even when a section shares its name.

use std::cell::RefCell;
use std::collections::HashSet;

use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, DeserializeSeed, Deserializer, Error as _, MapAccess, Visitor};
use serde::Deserialize;

use super::value::is_duration;
use super::zero::ZeroDeserializer;
use super::DecodeOptions;
use crate::domain::{ConfigError, Result};

/// Destination fields are named by their struct and serde field name.
type FieldId = (&'static str, &'static str);

/// Upper bound on recording passes; each failed pass skips one more field.
const MAX_PASSES: usize = 64;

/// What the decoder knows about a destination before binding it.
#[derive(Debug, Clone)]
pub(crate) struct Binding {
    options: DecodeOptions,
    section_fields: HashSet<FieldId>,
}

impl Binding {
    /// Records which fields of `T` take a section.
    pub(crate) fn discover<'de, T>(options: DecodeOptions) -> Self
    where
        T: Deserialize<'de>,
    {
        let record = RefCell::new(Record::default());
        for _ in 0..MAX_PASSES {
            let outcome = T::deserialize(Recorder {
                record: &record,
                field: None,
            });
            let mut state = record.borrow_mut();
            state.visiting.clear();
            if outcome.is_ok() {
                break;
            }
            // A zero value was rejected; skip that field and record the rest.
            let Some(field) = state.failed.take() else {
                break;
            };
            if !state.skipped.insert(field) {
                break;
            }
            tracing::trace!(
                structure = field.0,
                field = field.1,
                "zero value rejected, skipping field"
            );
        }
        let section_fields = record.into_inner().section_fields;
        tracing::trace!(fields = section_fields.len(), "recorded section fields");
        Binding {
            options,
            section_fields,
        }
    }

    pub(crate) fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Returns `true` if `field` of `structure` binds to a section.
    pub(crate) fn takes_section(&self, structure: &'static str, field: &'static str) -> bool {
        self.section_fields.contains(&(structure, field))
    }
}

#[derive(Debug, Default)]
struct Record {
    section_fields: HashSet<FieldId>,
    visiting: Vec<&'static str>,
    skipped: HashSet<FieldId>,
    failed: Option<FieldId>,
}

/// Feeds zero values to a destination and notes the shapes it asks for.
struct Recorder<'r> {
    record: &'r RefCell<Record>,
    field: Option<FieldId>,
}

impl Recorder<'_> {
    fn mark(&self) {
        if let Some(field) = self.field {
            self.record.borrow_mut().section_fields.insert(field);
        }
    }
}

macro_rules! zero_value {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                ZeroDeserializer.$method(visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for Recorder<'_> {
    type Error = ConfigError;

    zero_value! {
        deserialize_any deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32
        deserialize_i64 deserialize_i128 deserialize_u8 deserialize_u16 deserialize_u32
        deserialize_u64 deserialize_u128 deserialize_f32 deserialize_f64 deserialize_char
        deserialize_str deserialize_string deserialize_bytes deserialize_byte_buf
        deserialize_unit deserialize_seq deserialize_identifier deserialize_ignored_any
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

    fn deserialize_unit_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        ZeroDeserializer.deserialize_unit_struct(name, visitor)
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        ZeroDeserializer.deserialize_tuple(len, visitor)
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
        ZeroDeserializer.deserialize_tuple_struct(name, len, visitor)
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
        ZeroDeserializer.deserialize_enum(name, variants, visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.mark();
        ZeroDeserializer.deserialize_map(visitor)
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
            return ZeroDeserializer.deserialize_struct(name, fields, visitor);
        }
        self.mark();
        // Recursive types stop at their first repeat.
        if self.record.borrow().visiting.contains(&name) {
            return ZeroDeserializer.deserialize_struct(name, fields, visitor);
        }
        self.record.borrow_mut().visiting.push(name);
        let result = visitor.visit_map(RecordFields {
            record: self.record,
            structure: name,
            fields: fields.iter(),
            pending: None,
        });
        self.record.borrow_mut().visiting.pop();
        result
    }
}

struct RecordFields<'r> {
    record: &'r RefCell<Record>,
    structure: &'static str,
    fields: std::slice::Iter<'static, &'static str>,
    pending: Option<&'static str>,
}

impl<'de> MapAccess<'de> for RecordFields<'_> {
    type Error = ConfigError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        for &field in self.fields.by_ref() {
            if self.record.borrow().skipped.contains(&(self.structure, field)) {
                continue;
            }
            self.pending = Some(field);
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
        let field = self
            .pending
            .take()
            .ok_or_else(|| ConfigError::custom("value requested before its key"))?;
        let id = (self.structure, field);
        seed.deserialize(Recorder {
            record: self.record,
            field: Some(id),
        })
        .map_err(|e| {
            // Innermost field first; outer fields see the error afterwards.
            self.record.borrow_mut().failed.get_or_insert(id);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;
    use std::collections::HashMap;
    use std::num::NonZeroU16;
    use std::time::Duration;

    #[allow(dead_code)]
    #[derive(Deserialize)]
    struct Server {
        host: String,
        limits: Option<Limits>,
    }

    #[allow(dead_code)]
    #[derive(Deserialize)]
    struct Limits {
        max: u32,
    }

    #[allow(dead_code)]
    #[derive(Deserialize)]
    struct Wrapper(Server);

    #[allow(dead_code)]
    #[derive(Deserialize)]
    struct App {
        name: String,
        port: Option<u16>,
        timeout: Duration,
        started: Timestamp,
        server: Server,
        backup: Option<Wrapper>,
        env: HashMap<String, String>,
        tags: Vec<String>,
    }

    fn discover<'de, T: Deserialize<'de>>() -> Binding {
        Binding::discover::<T>(DecodeOptions::default())
    }

    #[test]
    fn test_struct_and_map_fields_take_sections() {
        let binding = discover::<App>();
        for field in ["server", "backup", "env"] {
            assert!(binding.takes_section("App", field), "{field}");
        }
        assert!(binding.takes_section("Server", "limits"));
    }

    #[test]
    fn test_scalar_fields_do_not() {
        let binding = discover::<App>();
        for field in ["name", "port", "timeout", "started", "tags"] {
            assert!(!binding.takes_section("App", field), "{field}");
        }
        assert!(!binding.takes_section("Server", "host"));
        assert!(!binding.takes_section("Limits", "max"));
    }

    #[test]
    fn test_recursive_type_terminates() {
        #[allow(dead_code)]
        #[derive(Deserialize)]
        struct Node {
            value: u8,
            child: Option<Box<Node>>,
        }

        let binding = discover::<Node>();
        assert!(binding.takes_section("Node", "child"));
        assert!(!binding.takes_section("Node", "value"));
    }

    #[test]
    fn test_rejected_zero_value_does_not_hide_later_fields() {
        #[allow(dead_code)]
        #[derive(Deserialize)]
        struct Strict {
            workers: NonZeroU16,
            server: Server,
        }

        let binding = discover::<Strict>();
        assert!(binding.takes_section("Strict", "server"));
        assert!(binding.takes_section("Server", "limits"));
        assert!(!binding.takes_section("Strict", "workers"));
    }

    #[test]
    fn test_map_destination_records_nothing() {
        let binding = discover::<HashMap<String, HashMap<String, String>>>();
        assert!(binding.section_fields.is_empty());
    }
}
