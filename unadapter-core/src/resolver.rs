use crate::{
    AdapterError, Capabilities, Coercion, FieldDescriptor, Result, Schema, TableDescriptor,
};
use std::collections::HashMap;

/// Finalized schema plus the name resolution and coercion lookups built on top of it.
///
/// Callers may address a model by its logical key or its physical name (also in plural form
/// when pluralization is on), and a field by its logical key or its physical name.
#[derive(Debug, Clone)]
pub struct Registry {
    schema: Schema,
    use_plural: bool,
    use_number_id: bool,
    capabilities: Capabilities,
    coercions: HashMap<String, HashMap<String, Coercion>>,
}

impl Registry {
    pub fn new(
        schema: Schema,
        use_plural: bool,
        capabilities: Capabilities,
        use_number_id: bool,
    ) -> Self {
        let coercions = schema
            .iter()
            .map(|(model, table)| {
                let fields = table
                    .fields
                    .iter()
                    .map(|(key, field)| {
                        (
                            key.to_string(),
                            Coercion::resolve(key, field, &capabilities, use_number_id),
                        )
                    })
                    .collect();
                (model.to_string(), fields)
            })
            .collect();
        Self {
            schema,
            use_plural,
            use_number_id,
            capabilities,
            coercions,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
    pub fn use_plural(&self) -> bool {
        self.use_plural
    }
    pub fn use_number_id(&self) -> bool {
        self.use_number_id
    }
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn lookup_model(&self, input: &str) -> Option<&str> {
        if let Some((key, _)) = self.schema.iter().find(|(key, _)| *key == input) {
            return Some(key);
        }
        self.schema
            .iter()
            .find(|(_, table)| table.model_name == input)
            .map(|(key, _)| key)
    }

    /// Logical key of the model addressed by `input`.
    pub fn resolve_model(&self, input: &str) -> Result<&str> {
        let found = self.lookup_model(input).or_else(|| {
            if !self.use_plural {
                return None;
            }
            input
                .strip_suffix('s')
                .and_then(|singular| self.lookup_model(singular))
        });
        found.ok_or_else(|| {
            log::debug!("Model `{input}` not found in schema");
            AdapterError::ModelNotFound {
                model: input.to_string(),
                snapshot: self.schema.snapshot(),
            }
            .into()
        })
    }

    /// Logical key of the field addressed by `field` inside `model`.
    pub fn resolve_field<'s>(&'s self, model: &str, field: &'s str) -> Result<&'s str> {
        if field == "id" {
            return Ok(field);
        }
        let table = self.table(model)?;
        let found = table
            .fields
            .iter()
            .find(|(key, _)| *key == field)
            .or_else(|| {
                table
                    .fields
                    .iter()
                    .find(|(_, f)| f.field_name.as_deref() == Some(field))
            });
        match found {
            Some((key, _)) => Ok(key),
            None => {
                log::debug!("Field `{field}` not found in model `{model}`");
                Err(AdapterError::FieldNotFound {
                    model: model.to_string(),
                    field: field.to_string(),
                    snapshot: self.schema.snapshot(),
                }
                .into())
            }
        }
    }

    pub fn table(&self, model: &str) -> Result<&TableDescriptor> {
        let key = self.resolve_model(model)?;
        self.schema.get(key).ok_or_else(|| {
            AdapterError::ModelNotFound {
                model: model.to_string(),
                snapshot: self.schema.snapshot(),
            }
            .into()
        })
    }

    /// Logical key and descriptor of a field.
    pub fn field<'s>(&'s self, model: &str, field: &'s str) -> Result<(&'s str, &'s FieldDescriptor)> {
        let table = self.table(model)?;
        let key = self.resolve_field(model, field)?;
        table
            .fields
            .iter()
            .find(|(k, _)| *k == key)
            .ok_or_else(|| {
                AdapterError::FieldNotFound {
                    model: model.to_string(),
                    field: field.to_string(),
                    snapshot: self.schema.snapshot(),
                }
                .into()
            })
    }

    pub fn physical_model_name(&self, model: &str) -> Result<String> {
        let key = self.resolve_model(model)?;
        let table = self.table(key)?;
        Ok(if table.model_name != key {
            table.model_name.clone()
        } else if self.use_plural {
            format!("{key}s")
        } else {
            key.to_string()
        })
    }

    pub fn physical_field_name(&self, model: &str, field: &str) -> Result<String> {
        let (key, descriptor) = self.field(model, field)?;
        Ok(descriptor
            .field_name
            .clone()
            .unwrap_or_else(|| key.to_string()))
    }

    /// Capability coercion of a field, `None` when the model or field is unknown.
    pub fn coercion(&self, model: &str, field: &str) -> Option<&Coercion> {
        self.coercions.get(model).and_then(|m| m.get(field))
    }
}
