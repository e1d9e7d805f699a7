use crate::{Action, FieldDescriptor, FieldKind, Registry, Result, TableDescriptor, separated_by};

/// Renders `CREATE TABLE` statements for a registry.
///
/// Default methods produce PostgreSQL, other dialects override what differs.
pub trait SqlWriter: Send + Sync {
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(out, value, '"', r#""""#);
        out.push('"');
    }

    fn write_column_type(&self, out: &mut String, kind: FieldKind) {
        out.push_str(match kind {
            FieldKind::String => "TEXT",
            FieldKind::Number => "INTEGER",
            FieldKind::Boolean => "BOOLEAN",
            FieldKind::Date => "TIMESTAMP WITH TIME ZONE",
            FieldKind::Json => "JSONB",
        });
    }

    /// Type of a column holding a numeric identifier.
    fn write_numeric_id_type(&self, out: &mut String) {
        out.push_str("BIGINT");
    }

    fn write_primary_key_column(&self, out: &mut String, use_number_id: bool) {
        self.write_identifier_quoted(out, "id");
        out.push(' ');
        if use_number_id {
            out.push_str("BIGSERIAL");
        } else {
            self.write_column_type(out, FieldKind::String);
        }
        out.push_str(" PRIMARY KEY");
    }

    fn write_references_action(&self, out: &mut String, action: Action) {
        out.push_str(&action.to_string());
    }

    fn write_create_table_column_fragment(
        &self,
        out: &mut String,
        registry: &Registry,
        key: &str,
        field: &FieldDescriptor,
    ) -> Result<()> {
        self.write_identifier_quoted(out, field.field_name.as_deref().unwrap_or(key));
        out.push(' ');
        if registry.use_number_id() && field.is_identifier(key) {
            self.write_numeric_id_type(out);
        } else {
            self.write_column_type(out, field.kind);
        }
        if field.required {
            out.push_str(" NOT NULL");
        }
        if field.unique {
            out.push_str(" UNIQUE");
        }
        if let Some(references) = &field.references {
            out.push_str(" REFERENCES ");
            self.write_identifier_quoted(out, &registry.physical_model_name(&references.model)?);
            out.push('(');
            self.write_identifier_quoted(
                out,
                &registry.physical_field_name(&references.model, &references.field)?,
            );
            out.push(')');
            out.push_str(" ON DELETE ");
            self.write_references_action(out, references.on_delete);
        }
        Ok(())
    }

    fn write_create_table(
        &self,
        out: &mut String,
        registry: &Registry,
        model: &str,
        table: &TableDescriptor,
    ) -> Result<()> {
        out.push_str("CREATE TABLE ");
        self.write_identifier_quoted(out, &registry.physical_model_name(model)?);
        out.push_str(" (\n");
        self.write_primary_key_column(out, registry.use_number_id());
        for (key, field) in table.fields.iter().filter(|(k, _)| *k != "id") {
            out.push_str(",\n");
            self.write_create_table_column_fragment(out, registry, key, field)?;
        }
        out.push_str("\n);");
        Ok(())
    }

    /// Every migratable table, sorted by `order` then by key.
    fn write_schema(&self, registry: &Registry) -> Result<String> {
        let mut tables = registry
            .schema()
            .iter()
            .filter(|(_, t)| !t.disable_migrations)
            .collect::<Vec<_>>();
        tables.sort_by_key(|(key, table)| (table.order.unwrap_or(u32::MAX), *key));
        let mut out = String::new();
        let mut result = Ok(());
        separated_by(
            &mut out,
            tables,
            |out, (key, table)| {
                if result.is_ok() {
                    result = self.write_create_table(out, registry, key, table);
                }
            },
            "\n\n",
        );
        result?;
        out.push('\n');
        Ok(out)
    }
}

pub struct PostgresSqlWriter;
impl SqlWriter for PostgresSqlWriter {}

pub struct MySqlSqlWriter;
impl SqlWriter for MySqlSqlWriter {
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('`');
        self.write_escaped(out, value, '`', "``");
        out.push('`');
    }

    fn write_column_type(&self, out: &mut String, kind: FieldKind) {
        out.push_str(match kind {
            FieldKind::String => "VARCHAR(255)",
            FieldKind::Number => "BIGINT",
            FieldKind::Boolean => "BOOLEAN",
            FieldKind::Date => "DATETIME",
            FieldKind::Json => "JSON",
        });
    }

    fn write_primary_key_column(&self, out: &mut String, use_number_id: bool) {
        self.write_identifier_quoted(out, "id");
        out.push(' ');
        if use_number_id {
            out.push_str("BIGINT AUTO_INCREMENT");
        } else {
            self.write_column_type(out, FieldKind::String);
        }
        out.push_str(" PRIMARY KEY");
    }
}

pub struct SqliteSqlWriter;
impl SqlWriter for SqliteSqlWriter {
    fn write_column_type(&self, out: &mut String, kind: FieldKind) {
        out.push_str(match kind {
            FieldKind::String => "TEXT",
            FieldKind::Number => "INTEGER",
            FieldKind::Boolean => "INTEGER",
            FieldKind::Date => "TEXT",
            FieldKind::Json => "TEXT",
        });
    }

    fn write_numeric_id_type(&self, out: &mut String) {
        out.push_str("INTEGER");
    }

    fn write_primary_key_column(&self, out: &mut String, use_number_id: bool) {
        self.write_identifier_quoted(out, "id");
        if use_number_id {
            out.push_str(" INTEGER PRIMARY KEY AUTOINCREMENT");
        } else {
            out.push_str(" TEXT PRIMARY KEY");
        }
    }
}

pub struct MsSqlSqlWriter;
impl SqlWriter for MsSqlSqlWriter {
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('[');
        self.write_escaped(out, value, ']', "]]");
        out.push(']');
    }

    fn write_column_type(&self, out: &mut String, kind: FieldKind) {
        out.push_str(match kind {
            FieldKind::String => "NVARCHAR(255)",
            FieldKind::Number => "BIGINT",
            FieldKind::Boolean => "BIT",
            FieldKind::Date => "DATETIME2",
            FieldKind::Json => "NVARCHAR(MAX)",
        });
    }

    fn write_primary_key_column(&self, out: &mut String, use_number_id: bool) {
        self.write_identifier_quoted(out, "id");
        out.push(' ');
        if use_number_id {
            out.push_str("BIGINT IDENTITY(1,1)");
        } else {
            self.write_column_type(out, FieldKind::String);
        }
        out.push_str(" PRIMARY KEY");
    }
}
