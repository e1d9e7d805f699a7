use crate::{FieldDescriptor, FieldKind, FieldMap, GenerateId, IdGenerator, Value};
use std::{collections::BTreeMap, fmt::Write, sync::Arc};
use uuid::Uuid;

/// One logical model: physical name, fields and migration hints.
#[derive(Default, Debug, Clone)]
pub struct TableDescriptor {
    /// Physical name, empty means "same as the logical key".
    pub model_name: String,
    pub fields: FieldMap,
    /// Position in generated schema files, unordered tables go last.
    pub order: Option<u32>,
    pub disable_migrations: bool,
}

impl TableDescriptor {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            ..Default::default()
        }
    }
    pub fn field(mut self, key: impl Into<String>, field: FieldDescriptor) -> Self {
        self.fields.insert(key, field);
        self
    }
    pub fn order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }
    pub fn disable_migrations(mut self, disable: bool) -> Self {
        self.disable_migrations = disable;
        self
    }
}

/// Tables contributed by a plugin, merged over the base tables.
#[derive(Default, Debug, Clone)]
pub struct PluginSchema {
    pub id: String,
    pub tables: Vec<(String, TableDescriptor)>,
}

impl PluginSchema {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tables: Vec::new(),
        }
    }
    pub fn table(mut self, key: impl Into<String>, table: TableDescriptor) -> Self {
        self.tables.push((key.into(), table));
        self
    }
}

/// How the synthesized `id` field behaves.
#[derive(Default, Clone)]
pub struct IdPolicy {
    pub use_number_id: bool,
    pub disable_id_generation: bool,
    pub generate_id: GenerateId,
    pub custom_id_generator: Option<IdGenerator>,
}

impl IdPolicy {
    /// Ids are produced by the adapter rather than assigned by the storage.
    pub fn generates_ids(&self) -> bool {
        !self.disable_id_generation
            && !self.use_number_id
            && !matches!(self.generate_id, GenerateId::Disabled)
    }

    pub fn id_descriptor(&self, model: &str) -> FieldDescriptor {
        let kind = if self.use_number_id {
            FieldKind::Number
        } else {
            FieldKind::String
        };
        let mut field = FieldDescriptor::new(kind);
        if !self.generates_ids() {
            return field;
        }
        let model = model.to_string();
        let generate_id = self.generate_id.clone();
        let custom = self.custom_id_generator.clone();
        field.required = true;
        field.default_with(move || {
            let id = match (&generate_id, &custom) {
                (GenerateId::Custom(f), _) => f(&model),
                (_, Some(f)) => f(&model),
                _ => default_generate_id(),
            };
            Value::Varchar(id)
        })
    }
}

pub fn default_generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Collects base tables and plugin contributions before the registry is finalized.
#[derive(Default, Debug, Clone)]
pub struct SchemaBuilder {
    tables: Vec<(String, TableDescriptor)>,
    plugins: Vec<PluginSchema>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn table(mut self, key: impl Into<String>, table: TableDescriptor) -> Self {
        self.tables.push((key.into(), table));
        self
    }
    pub fn plugin(mut self, plugin: PluginSchema) -> Self {
        self.plugins.push(plugin);
        self
    }
    pub fn plugins(mut self, plugins: impl IntoIterator<Item = PluginSchema>) -> Self {
        self.plugins.extend(plugins);
        self
    }

    pub fn build(self, policy: &IdPolicy) -> Schema {
        let mut tables = BTreeMap::<String, TableDescriptor>::new();
        let contributions = self
            .tables
            .into_iter()
            .chain(self.plugins.into_iter().flat_map(|p| p.tables));
        for (key, table) in contributions {
            match tables.get_mut(&key) {
                Some(existing) => {
                    existing.fields.merge(table.fields);
                    if !table.model_name.is_empty() {
                        existing.model_name = table.model_name;
                    }
                    if table.order.is_some() {
                        existing.order = table.order;
                    }
                    existing.disable_migrations |= table.disable_migrations;
                }
                None => {
                    tables.insert(key, table);
                }
            }
        }
        for (key, table) in tables.iter_mut() {
            if table.model_name.is_empty() {
                table.model_name = key.clone();
            }
            table.fields.insert_first("id", policy.id_descriptor(key));
        }
        Schema {
            tables: Arc::new(tables),
        }
    }
}

/// Finalized, immutable registry of logical models.
#[derive(Default, Debug, Clone)]
pub struct Schema {
    tables: Arc<BTreeMap<String, TableDescriptor>>,
}

impl Schema {
    pub fn get(&self, key: &str) -> Option<&TableDescriptor> {
        self.tables.get(key)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableDescriptor)> {
        self.tables.iter().map(|(k, v)| (k.as_str(), v))
    }
    pub fn len(&self) -> usize {
        self.tables.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Compact listing of models and their fields, attached to lookup errors.
    pub fn snapshot(&self) -> String {
        let mut out = String::new();
        out.push('{');
        for (i, (key, table)) in self.tables.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{key} ({}): [", table.model_name);
            for (j, (field, descriptor)) in table.fields.iter().enumerate() {
                if j > 0 {
                    out.push_str(", ");
                }
                out.push_str(field);
                if let Some(name) = descriptor.field_name.as_deref().filter(|n| *n != field) {
                    let _ = write!(out, " as {name}");
                }
            }
            out.push(']');
        }
        out.push('}');
        out
    }
}
