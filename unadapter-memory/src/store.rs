use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use unadapter_core::{AdapterError, Record, Result};

#[derive(Default, Debug)]
pub(crate) struct MemoryTable {
    pub(crate) rows: Vec<Record>,
    /// Last assigned numeric id, never decreases.
    pub(crate) last_id: i64,
}

impl MemoryTable {
    pub(crate) fn reserve_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// Shared tables of the memory driver, keyed by physical table name.
///
/// Tables must be declared up front, writes to an unknown table fail.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<BTreeMap<String, MemoryTable>>>,
}

impl MemoryStore {
    pub fn new<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tables: Arc::new(RwLock::new(
                tables
                    .into_iter()
                    .map(|name| (name.into(), MemoryTable::default()))
                    .collect(),
            )),
        }
    }

    pub async fn add_table(&self, name: impl Into<String>) {
        self.tables.write().await.entry(name.into()).or_default();
    }

    pub async fn table_names(&self) -> Vec<String> {
        self.tables.read().await.keys().cloned().collect()
    }

    /// Snapshot of the rows currently stored in `table`.
    pub async fn rows(&self, table: &str) -> Result<Vec<Record>> {
        let tables = self.read().await;
        Ok(table_ref(&tables, table)?.rows.clone())
    }

    /// Remove every row, id counters included.
    pub async fn clear(&self) {
        for table in self.tables.write().await.values_mut() {
            *table = MemoryTable::default();
        }
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, MemoryTable>> {
        self.tables.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, MemoryTable>> {
        self.tables.write().await
    }
}

fn missing_table(name: &str) -> unadapter_core::Error {
    AdapterError::Storage(format!("Table `{name}` does not exist in the memory store")).into()
}

pub(crate) fn table_ref<'a>(
    tables: &'a BTreeMap<String, MemoryTable>,
    name: &str,
) -> Result<&'a MemoryTable> {
    tables.get(name).ok_or_else(|| missing_table(name))
}

pub(crate) fn table_mut<'a>(
    tables: &'a mut BTreeMap<String, MemoryTable>,
    name: &str,
) -> Result<&'a mut MemoryTable> {
    tables.get_mut(name).ok_or_else(|| missing_table(name))
}
