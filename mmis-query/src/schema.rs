//! Record schemas
//!
//! A schema declares, per record type, which named fields a query may
//! reference, what kind each field is, and which fields free-text search
//! looks at. The engine never inspects records except through a schema.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{QueryError, QueryResult};

pub(crate) type TextFn<T> = Box<dyn Fn(&T) -> &str + Send + Sync>;
pub(crate) type NumericFn<T> = Box<dyn Fn(&T) -> f64 + Send + Sync>;
pub(crate) type FlagFn<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// How a field's values compare.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Strings, compared case-insensitively when sorting.
    Text,
    /// Numbers.
    Numeric,
    /// Date or date-time strings, compared as parsed timestamps.
    Temporal,
    /// Derived booleans used as toggles.
    Flag,
}

impl FieldKind {
    /// Get string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Numeric => "numeric",
            FieldKind::Temporal => "temporal",
            FieldKind::Flag => "flag",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) enum Accessor<T> {
    Text(TextFn<T>),
    Numeric(NumericFn<T>),
    Temporal(TextFn<T>),
    Flag(FlagFn<T>),
}

impl<T> Accessor<T> {
    pub(crate) fn kind(&self) -> FieldKind {
        match self {
            Accessor::Text(_) => FieldKind::Text,
            Accessor::Numeric(_) => FieldKind::Numeric,
            Accessor::Temporal(_) => FieldKind::Temporal,
            Accessor::Flag(_) => FieldKind::Flag,
        }
    }
}

pub(crate) struct Field<T> {
    pub(crate) name: String,
    pub(crate) accessor: Accessor<T>,
}

/// Field declarations for one record type.
///
/// # Example
///
/// ```
/// use mmis_query::{FieldKind, RecordSchema};
///
/// struct Market {
///     name: String,
///     city: String,
///     capacity: u32,
///     established: String,
/// }
///
/// let schema = RecordSchema::<Market>::new("market")
///     .search_text("name", |m| m.name.as_str())
///     .search_text("city", |m| m.city.as_str())
///     .numeric("capacity", |m| f64::from(m.capacity))
///     .temporal("established", |m| m.established.as_str());
///
/// assert_eq!(schema.kind_of("capacity"), Some(FieldKind::Numeric));
/// assert_eq!(schema.search_fields().collect::<Vec<_>>(), ["name", "city"]);
/// ```
pub struct RecordSchema<T> {
    name: String,
    fields: Vec<Field<T>>,
    search: Vec<usize>,
}

impl<T> RecordSchema<T> {
    /// Start an empty schema; `name` identifies the record type in errors and logs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            search: Vec::new(),
        }
    }

    /// Schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn push(mut self, name: impl Into<String>, accessor: Accessor<T>) -> Self {
        let name = name.into();
        if let Some(existing) = self.fields.iter_mut().find(|field| field.name == name) {
            existing.accessor = accessor;
        } else {
            self.fields.push(Field { name, accessor });
        }
        self
    }

    /// Declare a text field.
    pub fn text<F>(self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> &str + Send + Sync + 'static,
    {
        self.push(name, Accessor::Text(Box::new(accessor)))
    }

    /// Declare a text field that free-text search also looks at.
    pub fn search_text<F>(self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> &str + Send + Sync + 'static,
    {
        let name = name.into();
        let mut schema = self.text(name.clone(), accessor);
        if let Some(index) = schema.index_of(&name) {
            if !schema.search.contains(&index) {
                schema.search.push(index);
            }
        }
        schema
    }

    /// Declare a numeric field.
    pub fn numeric<F>(self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> f64 + Send + Sync + 'static,
    {
        self.push(name, Accessor::Numeric(Box::new(accessor)))
    }

    /// Declare a date or date-time field stored as a string.
    pub fn temporal<F>(self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> &str + Send + Sync + 'static,
    {
        self.push(name, Accessor::Temporal(Box::new(accessor)))
    }

    /// Declare a derived boolean usable as a toggle filter.
    pub fn flag<F>(self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.push(name, Accessor::Flag(Box::new(accessor)))
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Kind of a declared field.
    pub fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.index_of(name).map(|index| self.fields[index].accessor.kind())
    }

    /// Declared field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Names of the fields free-text search looks at.
    pub fn search_fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.search.iter().map(|index| self.fields[*index].name.as_str())
    }

    pub(crate) fn search_accessors(&self) -> Vec<&TextFn<T>> {
        self.search
            .iter()
            .filter_map(|index| match &self.fields[*index].accessor {
                Accessor::Text(accessor) => Some(accessor),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn accessor(&self, name: &str) -> QueryResult<&Accessor<T>> {
        self.index_of(name)
            .map(|index| &self.fields[index].accessor)
            .ok_or_else(|| QueryError::UnknownField {
                schema: self.name.clone(),
                field: name.to_string(),
            })
    }
}

impl<T> fmt::Debug for RecordSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSchema")
            .field("name", &self.name)
            .field(
                "fields",
                &self
                    .fields
                    .iter()
                    .map(|field| (field.name.as_str(), field.accessor.kind()))
                    .collect::<Vec<_>>(),
            )
            .field("search", &self.search_fields().collect::<Vec<_>>())
            .finish()
    }
}
