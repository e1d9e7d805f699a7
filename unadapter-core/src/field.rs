use crate::{Result, Value};
use futures::future::{BoxFuture, FutureExt};
use std::{
    fmt::{self, Debug, Display, Formatter},
    future::Future,
    sync::Arc,
};

/// Logical type of a field, drives the capability coercions.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    #[default]
    String,
    Number,
    Boolean,
    Date,
    Json,
}

/// Referential action for foreign key deletes.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No special action.
    #[default]
    NoAction,
    /// Reject the operation.
    Restrict,
    /// Propagate delete.
    Cascade,
    /// Set referencing columns to NULL.
    SetNull,
    /// Apply column DEFAULT.
    SetDefault,
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::NoAction => "NO ACTION",
            Action::Restrict => "RESTRICT",
            Action::Cascade => "CASCADE",
            Action::SetNull => "SET NULL",
            Action::SetDefault => "SET DEFAULT",
        })
    }
}

/// Foreign key like relation to another model's field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Logical key of the referenced model.
    pub model: String,
    /// Logical key of the referenced field, commonly `id`.
    pub field: String,
    pub on_delete: Action,
}

impl Reference {
    pub fn new(model: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            field: field.into(),
            on_delete: Action::NoAction,
        }
    }
    pub fn on_delete(mut self, action: Action) -> Self {
        self.on_delete = action;
        self
    }
}

pub type ValueProducer = Arc<dyn Fn() -> Value + Send + Sync>;
pub type ValueMapper = Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// Value used on create when the caller leaves a field absent.
#[derive(Clone)]
pub enum DefaultValue {
    Constant(Value),
    Producer(ValueProducer),
}

impl DefaultValue {
    pub fn produce(&self) -> Value {
        match self {
            DefaultValue::Constant(v) => v.clone(),
            DefaultValue::Producer(f) => f(),
        }
    }
}

impl Debug for DefaultValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            DefaultValue::Producer(..) => f.write_str("Producer(..)"),
        }
    }
}

/// Per field value mappers, applied on write (`input`) and on read (`output`).
#[derive(Default, Clone)]
pub struct FieldTransform {
    pub input: Option<ValueMapper>,
    pub output: Option<ValueMapper>,
}

fn boxed_mapper<F, Fut>(f: F) -> ValueMapper
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Arc::new(move |v| f(v).boxed())
}

impl FieldTransform {
    pub fn with_input<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.input = Some(boxed_mapper(f));
        self
    }
    pub fn with_output<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.output = Some(boxed_mapper(f));
        self
    }
}

/// Declarative description of a single attribute of a model.
#[derive(Default, Clone)]
pub struct FieldDescriptor {
    pub kind: FieldKind,
    /// Enforced on create only.
    pub required: bool,
    /// Advisory, rendered in schema files.
    pub unique: bool,
    /// Advisory.
    pub sortable: bool,
    pub default_value: Option<DefaultValue>,
    /// Physical storage name, the logical key when `None`.
    pub field_name: Option<String>,
    pub references: Option<Reference>,
    pub transform: FieldTransform,
}

impl FieldDescriptor {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }
    pub fn string() -> Self {
        Self::new(FieldKind::String)
    }
    pub fn number() -> Self {
        Self::new(FieldKind::Number)
    }
    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }
    pub fn date() -> Self {
        Self::new(FieldKind::Date)
    }
    pub fn json() -> Self {
        Self::new(FieldKind::Json)
    }
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(DefaultValue::Constant(value.into()));
        self
    }
    pub fn default_with(mut self, producer: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default_value = Some(DefaultValue::Producer(Arc::new(producer)));
        self
    }
    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = Some(name.into());
        self
    }
    pub fn references(mut self, reference: Reference) -> Self {
        self.references = Some(reference);
        self
    }
    pub fn transform(mut self, transform: FieldTransform) -> Self {
        self.transform = transform;
        self
    }

    /// The field is the model identifier or points at another model's identifier.
    pub fn is_identifier(&self, key: &str) -> bool {
        key == "id"
            || self
                .references
                .as_ref()
                .is_some_and(|r| r.field == "id")
    }
}

impl Debug for FieldDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("unique", &self.unique)
            .field("default_value", &self.default_value)
            .field("field_name", &self.field_name)
            .field("references", &self.references)
            .field("input_transform", &self.transform.input.is_some())
            .field("output_transform", &self.transform.output.is_some())
            .finish()
    }
}

/// Ordered field map, a later insert of the same key replaces the earlier descriptor in place.
#[derive(Default, Debug, Clone)]
pub struct FieldMap {
    entries: Vec<(String, FieldDescriptor)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with(mut self, key: impl Into<String>, field: FieldDescriptor) -> Self {
        self.insert(key, field);
        self
    }
    pub fn insert(&mut self, key: impl Into<String>, field: FieldDescriptor) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = field,
            None => self.entries.push((key, field)),
        }
    }
    pub fn merge(&mut self, other: FieldMap) {
        for (key, field) in other.entries {
            self.insert(key, field);
        }
    }
    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Place `field` under `key` at the front, replacing any existing entry.
    pub(crate) fn insert_first(&mut self, key: &str, field: FieldDescriptor) {
        self.entries.retain(|(k, _)| k != key);
        self.entries.insert(0, (key.to_string(), field));
    }
}

impl<K: Into<String>> FromIterator<(K, FieldDescriptor)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (K, FieldDescriptor)>>(iter: T) -> Self {
        let mut result = FieldMap::new();
        for (k, v) in iter {
            result.insert(k, v);
        }
        result
    }
}
