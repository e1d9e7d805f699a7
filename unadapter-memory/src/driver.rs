use crate::{
    MemoryStore,
    filter::{matches, sort},
    store::{table_mut, table_ref},
};
use unadapter_core::{
    AdapterContext, AdapterError, AdapterSchemaCreation, Capabilities, CleanedWhere, DebugLogs,
    Driver, DriverConfig, DriverFindMany, Record, Result, SqlDialect, Value,
};

/// Reference driver keeping every table in a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryDriver {
    store: MemoryStore,
    config: DriverConfig,
    dialect: Option<SqlDialect>,
}

impl MemoryDriver {
    pub const ID: &'static str = "memory";
    pub const NAME: &'static str = "Memory Adapter";

    pub fn new(store: MemoryStore) -> Self {
        Self {
            store,
            config: DriverConfig::new(Self::ID, Self::NAME),
            dialect: None,
        }
    }

    pub fn with_debug_logs(mut self, debug_logs: DebugLogs) -> Self {
        self.config.debug_logs = debug_logs;
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.config.capabilities = capabilities;
        self
    }

    /// Enable schema file generation in the given dialect.
    pub fn with_schema_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Replace the whole driver configuration.
    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

impl Driver for MemoryDriver {
    fn config(&self) -> &DriverConfig {
        &self.config
    }

    async fn create(&self, context: &AdapterContext, model: &str, mut data: Record) -> Result<Record> {
        let mut tables = self.store.write().await;
        let table = table_mut(&mut tables, model)?;
        let assigned = data.get("id").is_none_or(Value::is_null);
        if assigned || context.use_number_id() {
            let id = table.reserve_id();
            data.insert("id".into(), Value::Int64(id));
        } else if let Some(id) = data.get("id")
            && table.rows.iter().any(|r| r.get("id") == Some(id))
        {
            return Err(AdapterError::StorageConflict(format!(
                "A row with id `{id}` already exists in `{model}`"
            ))
            .into());
        }
        table.rows.push(data.clone());
        Ok(data)
    }

    async fn find_one(
        &self,
        _context: &AdapterContext,
        model: &str,
        filter: &[CleanedWhere],
        _select: &[String],
    ) -> Result<Option<Record>> {
        let tables = self.store.read().await;
        let table = table_ref(&tables, model)?;
        Ok(table.rows.iter().find(|r| matches(r, filter)).cloned())
    }

    async fn find_many(
        &self,
        _context: &AdapterContext,
        model: &str,
        query: &DriverFindMany,
    ) -> Result<Vec<Record>> {
        let tables = self.store.read().await;
        let table = table_ref(&tables, model)?;
        let mut rows = match &query.filter {
            Some(filter) => table
                .rows
                .iter()
                .filter(|r| matches(r, filter))
                .cloned()
                .collect::<Vec<_>>(),
            None => table.rows.clone(),
        };
        if let Some(sort_by) = &query.sort_by {
            sort(&mut rows, sort_by);
        }
        Ok(rows
            .into_iter()
            .skip(query.offset.unwrap_or(0) as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn update(
        &self,
        _context: &AdapterContext,
        model: &str,
        filter: &[CleanedWhere],
        update: Record,
    ) -> Result<Option<Record>> {
        let mut tables = self.store.write().await;
        let table = table_mut(&mut tables, model)?;
        let mut first = None;
        for row in table.rows.iter_mut().filter(|r| matches(r, filter)) {
            row.extend(update.iter().map(|(k, v)| (k.clone(), v.clone())));
            if first.is_none() {
                first = Some(row.clone());
            }
        }
        Ok(first)
    }

    async fn update_many(
        &self,
        _context: &AdapterContext,
        model: &str,
        filter: &[CleanedWhere],
        update: Record,
    ) -> Result<u64> {
        let mut tables = self.store.write().await;
        let table = table_mut(&mut tables, model)?;
        let mut count = 0;
        for row in table.rows.iter_mut().filter(|r| matches(r, filter)) {
            row.extend(update.iter().map(|(k, v)| (k.clone(), v.clone())));
            count += 1;
        }
        Ok(count)
    }

    async fn delete(
        &self,
        _context: &AdapterContext,
        model: &str,
        filter: &[CleanedWhere],
    ) -> Result<()> {
        let mut tables = self.store.write().await;
        let table = table_mut(&mut tables, model)?;
        table.rows.retain(|r| !matches(r, filter));
        Ok(())
    }

    async fn delete_many(
        &self,
        _context: &AdapterContext,
        model: &str,
        filter: &[CleanedWhere],
    ) -> Result<u64> {
        let mut tables = self.store.write().await;
        let table = table_mut(&mut tables, model)?;
        let before = table.rows.len();
        table.rows.retain(|r| !matches(r, filter));
        Ok((before - table.rows.len()) as u64)
    }

    async fn count(
        &self,
        _context: &AdapterContext,
        model: &str,
        filter: Option<&[CleanedWhere]>,
    ) -> Result<u64> {
        let tables = self.store.read().await;
        let table = table_ref(&tables, model)?;
        let count = match filter {
            Some(filter) => table.rows.iter().filter(|r| matches(r, filter)).count(),
            None => table.rows.len(),
        };
        Ok(count as u64)
    }

    fn supports_create_schema(&self) -> bool {
        self.dialect.is_some()
    }

    async fn create_schema(
        &self,
        context: &AdapterContext,
        file: Option<&str>,
    ) -> Result<AdapterSchemaCreation> {
        let Some(dialect) = self.dialect else {
            return Err(AdapterError::Configuration(format!(
                "{} has no schema dialect configured",
                self.config.adapter_name
            ))
            .into());
        };
        log::debug!("Generating a {dialect} schema file");
        let code = dialect.sql_writer().write_schema(context.registry())?;
        Ok(AdapterSchemaCreation {
            code,
            path: file.unwrap_or(AdapterSchemaCreation::DEFAULT_PATH).to_string(),
            append: false,
            overwrite: true,
        })
    }
}
