use crate::{
    AdapterError, AdapterOptions, CleanedWhere, Context, DriverConfig, IdPolicy, Record, Registry,
    Result, Schema, TransformInputArgs, TransformOutputArgs, Where, normalize_where,
};
use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Create,
    Update,
}

impl Display for WriteAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WriteAction::Create => "create",
            WriteAction::Update => "update",
        })
    }
}

/// Everything an adapter call needs besides the driver: registry, driver config and options.
#[derive(Debug, Clone)]
pub struct AdapterContext {
    registry: Registry,
    config: DriverConfig,
    options: AdapterOptions,
}

impl AdapterContext {
    pub fn new(schema: Schema, config: DriverConfig, options: AdapterOptions) -> Self {
        let registry = Registry::new(
            schema,
            config.use_plural,
            config.capabilities,
            options.advanced.database.use_number_id,
        );
        Self {
            registry,
            config,
            options,
        }
    }

    pub fn id_policy(config: &DriverConfig, options: &AdapterOptions) -> IdPolicy {
        IdPolicy {
            use_number_id: options.advanced.database.use_number_id,
            disable_id_generation: config.disable_id_generation,
            generate_id: options.advanced.database.generate_id.clone(),
            custom_id_generator: config.custom_id_generator.clone(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
    pub fn schema(&self) -> &Schema {
        self.registry.schema()
    }
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }
    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }
    pub fn use_number_id(&self) -> bool {
        self.options.advanced.database.use_number_id
    }

    pub fn resolve_model(&self, model: &str) -> Result<&str> {
        self.registry.resolve_model(model)
    }
    pub fn physical_model_name(&self, model: &str) -> Result<String> {
        self.registry.physical_model_name(model)
    }
    pub fn physical_field_name(&self, model: &str, field: &str) -> Result<String> {
        self.registry.physical_field_name(model, field)
    }

    pub fn normalize(
        &self,
        model: &str,
        conditions: Option<&[Where]>,
    ) -> Result<Option<Vec<CleanedWhere>>> {
        normalize_where(&self.registry, model, conditions)
    }

    /// Turn an application record into a storage record.
    ///
    /// Defaults are applied on create only, an absent field in an update stays absent.
    pub async fn transform_input(
        &self,
        data: &Record,
        model: &str,
        action: WriteAction,
    ) -> Result<Record> {
        let key = self.registry.resolve_model(model)?;
        let table = self.registry.table(key)?;
        let mut result = Record::new();
        for (field, attributes) in table.fields.iter() {
            let value = data.get(field).cloned();
            if value.is_none()
                && ((attributes.default_value.is_none() && attributes.transform.input.is_none())
                    || action == WriteAction::Update)
            {
                if action == WriteAction::Create && attributes.required {
                    return Err(AdapterError::MissingRequiredField {
                        model: key.to_string(),
                        field: field.to_string(),
                    }
                    .into());
                }
                continue;
            }
            let name = self
                .config
                .map_keys_transform_input
                .get(field)
                .or(attributes.field_name.as_ref())
                .map(String::as_str)
                .unwrap_or(field);
            let mut value = match (value, &attributes.default_value, action) {
                (Some(v), Some(default), WriteAction::Create) if v.is_null() => default.produce(),
                (None, Some(default), WriteAction::Create) => default.produce(),
                (v, ..) => v.unwrap_or_default(),
            };
            if let Some(transform) = &attributes.transform.input {
                value = transform(value)
                    .await
                    .with_context(|| format!("While transforming the input of `{key}.{field}`"))?;
            }
            if let Some(coercion) = self.registry.coercion(key, field) {
                value = coercion
                    .input(value)
                    .with_context(|| format!("While coercing the input of `{key}.{field}`"))?;
            }
            if let Some(hook) = &self.config.custom_transform_input {
                value = hook(TransformInputArgs {
                    data: value,
                    action,
                    field: name,
                    field_attributes: attributes,
                    model: key,
                    schema: self.schema(),
                    options: &self.options,
                });
            }
            if action == WriteAction::Create && attributes.required && value.is_null() {
                return Err(AdapterError::MissingRequiredField {
                    model: key.to_string(),
                    field: field.to_string(),
                }
                .into());
            }
            result.insert(name.to_string(), value);
        }
        Ok(result)
    }

    /// Turn a storage record back into an application record, keeping only `select` if not empty.
    pub async fn transform_output(
        &self,
        data: Record,
        model: &str,
        select: &[String],
    ) -> Result<Record> {
        let key = self.registry.resolve_model(model)?;
        let table = self.registry.table(key)?;
        let mapped = &self.config.map_keys_transform_output;
        let mut result = Record::new();
        for (field, attributes) in table.fields.iter() {
            if !select.is_empty() && !select.iter().any(|s| s == field) {
                continue;
            }
            let physical = attributes.field_name.as_deref().unwrap_or(field);
            let stored = mapped
                .iter()
                .find(|(_, v)| *v == physical)
                .map(|(k, _)| k.as_str())
                .unwrap_or(physical);
            let value = data.get(stored).cloned();
            let transform = attributes.transform.output.as_ref();
            if value.is_none() && transform.is_none() {
                continue;
            }
            let mut value = value.unwrap_or_default();
            if let Some(transform) = transform {
                value = transform(value)
                    .await
                    .with_context(|| format!("While transforming the output of `{key}.{field}`"))?;
            }
            if let Some(coercion) = self.registry.coercion(key, field) {
                value = coercion.output(value);
            }
            let name = mapped.get(field).map(String::as_str).unwrap_or(field);
            if let Some(hook) = &self.config.custom_transform_output {
                value = hook(TransformOutputArgs {
                    data: value,
                    field: name,
                    field_attributes: attributes,
                    select,
                    model: key,
                    schema: self.schema(),
                    options: &self.options,
                });
            }
            result.insert(name.to_string(), value);
        }
        Ok(result)
    }
}
