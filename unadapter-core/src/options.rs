use crate::PluginSchema;
use std::{
    collections::BTreeMap,
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

/// Produces an id for the given logical model.
pub type IdGenerator = Arc<dyn Fn(&str) -> String + Send + Sync>;

#[derive(Default, Clone)]
pub enum GenerateId {
    /// Driver generator if any, otherwise a random uuid.
    #[default]
    Default,
    /// The storage assigns the id.
    Disabled,
    Custom(IdGenerator),
}

impl GenerateId {
    pub fn custom(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        GenerateId::Custom(Arc::new(f))
    }
}

impl Debug for GenerateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GenerateId::Default => f.write_str("Default"),
            GenerateId::Disabled => f.write_str("Disabled"),
            GenerateId::Custom(..) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct DatabaseOptions {
    /// `find_many` ceiling when the caller omits a limit, 100 when unset.
    pub default_find_many_limit: Option<u32>,
    pub use_number_id: bool,
    pub generate_id: GenerateId,
}

#[derive(Default, Debug, Clone)]
pub struct AdvancedOptions {
    pub database: DatabaseOptions,
}

/// Per model naming overrides, consumed by the tables function.
#[derive(Default, Debug, Clone)]
pub struct ModelOptions {
    pub model_name: Option<String>,
    /// Logical field key to physical name.
    pub fields: BTreeMap<String, String>,
}

/// Application level configuration handed to the adapter and to the tables function.
#[derive(Default, Debug, Clone)]
pub struct AdapterOptions {
    pub advanced: AdvancedOptions,
    pub models: BTreeMap<String, ModelOptions>,
    pub plugins: Vec<PluginSchema>,
}

impl AdapterOptions {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_number_id(mut self, use_number_id: bool) -> Self {
        self.advanced.database.use_number_id = use_number_id;
        self
    }
    pub fn with_generate_id(mut self, generate_id: GenerateId) -> Self {
        self.advanced.database.generate_id = generate_id;
        self
    }
    pub fn with_default_find_many_limit(mut self, limit: u32) -> Self {
        self.advanced.database.default_find_many_limit = Some(limit);
        self
    }
    pub fn with_model_name(mut self, model: &str, name: impl Into<String>) -> Self {
        self.models.entry(model.into()).or_default().model_name = Some(name.into());
        self
    }
    pub fn with_field_name(mut self, model: &str, field: &str, name: impl Into<String>) -> Self {
        self.models
            .entry(model.into())
            .or_default()
            .fields
            .insert(field.into(), name.into());
        self
    }
    pub fn with_plugin(mut self, plugin: PluginSchema) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Physical model name configured for `model`, or `model` itself.
    pub fn model_name<'a>(&'a self, model: &'a str) -> &'a str {
        self.models
            .get(model)
            .and_then(|m| m.model_name.as_deref())
            .unwrap_or(model)
    }

    /// Physical field name configured for `model.field`, or `field` itself.
    pub fn field_name<'a>(&'a self, model: &str, field: &'a str) -> &'a str {
        self.models
            .get(model)
            .and_then(|m| m.fields.get(field))
            .map(String::as_str)
            .unwrap_or(field)
    }

    pub fn find_many_limit(&self) -> u32 {
        self.advanced.database.default_find_many_limit.unwrap_or(100)
    }
}
