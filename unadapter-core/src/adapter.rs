use crate::{
    AdapterContext, AdapterError, AdapterOptions, AdapterSchemaCreation, Driver, DriverFindMany,
    Method, Record, Result, SchemaBuilder, SortBy, Tracer, Where, WriteAction, render_record,
    render_records, render_where,
};
use futures::future::try_join_all;
use std::future::Future;

/// Arguments of [`Adapter::find_many`].
#[derive(Default, Debug, Clone, PartialEq)]
pub struct FindMany {
    pub filter: Option<Vec<Where>>,
    pub limit: Option<u32>,
    pub sort_by: Option<SortBy>,
    pub offset: Option<u32>,
}

impl FindMany {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn filter(mut self, filter: Vec<Where>) -> Self {
        self.filter = Some(filter);
        self
    }
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Uniform CRUD entry point wrapping a storage driver.
///
/// Every method takes logical (or aliased) model and field names and returns application shaped
/// records: ids as strings, values decoded back from the storage representation.
pub struct Adapter<D: Driver> {
    driver: D,
    context: AdapterContext,
}

/// Build an adapter around `driver`, `tables` produces its base tables from the options.
///
/// Fails with a configuration error when numeric ids are requested but the driver cannot store them.
pub fn create_adapter<D, F>(driver: D, tables: F, options: AdapterOptions) -> Result<Adapter<D>>
where
    D: Driver,
    F: FnOnce(&AdapterOptions) -> SchemaBuilder,
{
    let config = driver.config().clone();
    if options.advanced.database.use_number_id && !config.capabilities.supports_numeric_ids {
        return Err(AdapterError::Configuration(format!(
            "`use_number_id` is enabled but the adapter `{}` does not support numeric ids",
            config.adapter_name
        ))
        .into());
    }
    let policy = AdapterContext::id_policy(&config, &options);
    let schema = tables(&options)
        .plugins(options.plugins.iter().cloned())
        .build(&policy);
    log::debug!(
        "Created adapter `{}` with {} models",
        config.adapter_id,
        schema.len()
    );
    Ok(Adapter {
        driver,
        context: AdapterContext::new(schema, config, options),
    })
}

fn owned(select: &[&str]) -> Vec<String> {
    select.iter().map(|v| v.to_string()).collect()
}

impl<D: Driver> Adapter<D> {
    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn context(&self) -> &AdapterContext {
        &self.context
    }

    pub fn options(&self) -> &AdapterOptions {
        self.context.options()
    }

    pub fn id(&self) -> &str {
        &self.context.config().adapter_id
    }

    fn tracer<'s>(&'s self, method: Method, model: &'s str) -> Tracer<'s> {
        let config = self.context.config();
        Tracer::new(&config.debug_logs, &config.adapter_name, method, model)
    }

    pub async fn create(&self, model: &str, mut data: Record, select: &[&str]) -> Result<Record> {
        let physical = self.context.physical_model_name(model)?;
        let tracer = self.tracer(Method::Create, &physical);
        if data.remove("id").is_some() {
            log::warn!(
                "[{}] Creating a record with an id is not allowed, ids are assigned by the adapter. The id will be ignored.",
                self.context.config().adapter_name
            );
        }
        tracer.step(1, "Unsafe Input", || render_record(&data));
        let input = self
            .context
            .transform_input(&data, model, WriteAction::Create)
            .await?;
        tracer.step(2, "Parsed Input", || render_record(&input));
        let result = self.driver.create(&self.context, &physical, input).await?;
        tracer.step(3, "DB Result", || render_record(&result));
        let output = self
            .context
            .transform_output(result, model, &owned(select))
            .await?;
        tracer.step(4, "Parsed Result", || render_record(&output));
        Ok(output)
    }

    pub async fn find_one(
        &self,
        model: &str,
        filter: &[Where],
        select: &[&str],
    ) -> Result<Option<Record>> {
        let physical = self.context.physical_model_name(model)?;
        let tracer = self.tracer(Method::FindOne, &physical);
        let filter = self
            .context
            .normalize(model, Some(filter))?
            .unwrap_or_default();
        tracer.step(1, "Unsafe Input", || render_where(Some(&filter)));
        let select = owned(select);
        let result = self
            .driver
            .find_one(&self.context, &physical, &filter, &select)
            .await?;
        tracer.step(2, "DB Result", || {
            result
                .as_ref()
                .map(render_record)
                .unwrap_or_else(|| "null".into())
        });
        let output = match result {
            Some(result) => Some(self.context.transform_output(result, model, &select).await?),
            None => None,
        };
        tracer.step(3, "Parsed Result", || {
            output
                .as_ref()
                .map(render_record)
                .unwrap_or_else(|| "null".into())
        });
        Ok(output)
    }

    /// Limit defaults to the configured ceiling, an empty result is an empty list.
    pub async fn find_many(&self, model: &str, query: FindMany) -> Result<Vec<Record>> {
        let physical = self.context.physical_model_name(model)?;
        let tracer = self.tracer(Method::FindMany, &physical);
        let sort_by = match query.sort_by {
            Some(sort_by) => Some(SortBy {
                field: self.context.physical_field_name(model, &sort_by.field)?,
                direction: sort_by.direction,
            }),
            None => None,
        };
        let query = DriverFindMany {
            filter: self.context.normalize(model, query.filter.as_deref())?,
            limit: query
                .limit
                .unwrap_or_else(|| self.context.options().find_many_limit()),
            sort_by,
            offset: query.offset,
        };
        tracer.step(1, "Unsafe Input", || format!("{query:?}"));
        let result = self.driver.find_many(&self.context, &physical, &query).await?;
        tracer.step(2, "DB Result", || render_records(&result));
        let output = try_join_all(
            result
                .into_iter()
                .map(|row| self.context.transform_output(row, model, &[])),
        )
        .await?;
        tracer.step(3, "Parsed Result", || render_records(&output));
        Ok(output)
    }

    /// Returns `None` when nothing matches the filter.
    pub async fn update(
        &self,
        model: &str,
        filter: &[Where],
        update: Record,
    ) -> Result<Option<Record>> {
        let physical = self.context.physical_model_name(model)?;
        let tracer = self.tracer(Method::Update, &physical);
        let filter = self
            .context
            .normalize(model, Some(filter))?
            .unwrap_or_default();
        tracer.step(1, "Unsafe Input", || render_record(&update));
        let input = self
            .context
            .transform_input(&update, model, WriteAction::Update)
            .await?;
        tracer.step(2, "Parsed Input", || {
            format!("{} where {}", render_record(&input), render_where(Some(&filter)))
        });
        let result = self
            .driver
            .update(&self.context, &physical, &filter, input)
            .await?;
        tracer.step(3, "DB Result", || {
            result
                .as_ref()
                .map(render_record)
                .unwrap_or_else(|| "null".into())
        });
        let output = match result {
            Some(result) => Some(self.context.transform_output(result, model, &[]).await?),
            None => None,
        };
        tracer.step(4, "Parsed Result", || {
            output
                .as_ref()
                .map(render_record)
                .unwrap_or_else(|| "null".into())
        });
        Ok(output)
    }

    pub async fn update_many(&self, model: &str, filter: &[Where], update: Record) -> Result<u64> {
        let physical = self.context.physical_model_name(model)?;
        let tracer = self.tracer(Method::UpdateMany, &physical);
        let filter = self
            .context
            .normalize(model, Some(filter))?
            .unwrap_or_default();
        tracer.step(1, "Unsafe Input", || render_record(&update));
        let input = self
            .context
            .transform_input(&update, model, WriteAction::Update)
            .await?;
        tracer.step(2, "Parsed Input", || {
            format!("{} where {}", render_record(&input), render_where(Some(&filter)))
        });
        let result = self
            .driver
            .update_many(&self.context, &physical, &filter, input)
            .await?;
        tracer.step(3, "DB Result", || result.to_string());
        tracer.step(4, "Parsed Result", || result.to_string());
        Ok(result)
    }

    /// Deleting a record that does not exist is a no-op.
    pub async fn delete(&self, model: &str, filter: &[Where]) -> Result<()> {
        let physical = self.context.physical_model_name(model)?;
        let tracer = self.tracer(Method::Delete, &physical);
        let filter = self
            .context
            .normalize(model, Some(filter))?
            .unwrap_or_default();
        tracer.step(1, "Unsafe Input", || render_where(Some(&filter)));
        self.driver.delete(&self.context, &physical, &filter).await?;
        tracer.step(2, "DB Result", || "done".into());
        Ok(())
    }

    pub async fn delete_many(&self, model: &str, filter: &[Where]) -> Result<u64> {
        let physical = self.context.physical_model_name(model)?;
        let tracer = self.tracer(Method::DeleteMany, &physical);
        let filter = self
            .context
            .normalize(model, Some(filter))?
            .unwrap_or_default();
        tracer.step(1, "Unsafe Input", || render_where(Some(&filter)));
        let result = self
            .driver
            .delete_many(&self.context, &physical, &filter)
            .await?;
        tracer.step(2, "DB Result", || result.to_string());
        Ok(result)
    }

    pub async fn count(&self, model: &str, filter: Option<&[Where]>) -> Result<u64> {
        let physical = self.context.physical_model_name(model)?;
        let tracer = self.tracer(Method::Count, &physical);
        let filter = self.context.normalize(model, filter)?;
        tracer.step(1, "Unsafe Input", || render_where(filter.as_deref()));
        let result = self
            .driver
            .count(&self.context, &physical, filter.as_deref())
            .await?;
        tracer.step(2, "DB Result", || result.to_string());
        Ok(result)
    }

    /// Schema file generation, `None` when the driver cannot produce one.
    pub fn create_schema<'s>(
        &'s self,
        file: Option<&'s str>,
    ) -> Option<impl Future<Output = Result<AdapterSchemaCreation>> + Send + 's> {
        if !self.driver.supports_create_schema() {
            return None;
        }
        Some(self.driver.create_schema(&self.context, file))
    }
}
