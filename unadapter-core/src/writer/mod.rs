mod sql_writer;

pub use sql_writer::*;

use std::fmt::{self, Display, Formatter};

/// Target SQL dialect of a generated schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlDialect {
    Postgres,
    MySql,
    Sqlite,
    MsSql,
}

impl SqlDialect {
    pub fn sql_writer(&self) -> &'static dyn SqlWriter {
        match self {
            SqlDialect::Postgres => &PostgresSqlWriter,
            SqlDialect::MySql => &MySqlSqlWriter,
            SqlDialect::Sqlite => &SqliteSqlWriter,
            SqlDialect::MsSql => &MsSqlSqlWriter,
        }
    }
}

impl Display for SqlDialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SqlDialect::Postgres => "postgres",
            SqlDialect::MySql => "mysql",
            SqlDialect::Sqlite => "sqlite",
            SqlDialect::MsSql => "mssql",
        })
    }
}

/// Generated schema file, written by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterSchemaCreation {
    pub code: String,
    pub path: String,
    pub append: bool,
    pub overwrite: bool,
}

impl AdapterSchemaCreation {
    pub const DEFAULT_PATH: &'static str = "schema.sql";
}
