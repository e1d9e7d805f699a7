#[cfg(test)]
mod tests {
    use time::OffsetDateTime;
    use unadapter_core::{
        AdapterOptions, Capabilities, DebugLogs, Driver, DriverConfig, ErrorKind, FindMany, Method,
        Operator, SqlDialect, TraceSink, Where, create_adapter, error_kind, record,
    };
    use unadapter_memory::{MemoryDriver, MemoryStore};
    use unadapter_tests::{
        AUTH_TABLES, TestOptions, auth_tables, init_logs, run_adapter_tests,
        run_number_id_adapter_tests, silent_logs,
    };

    fn driver(store: &MemoryStore, sink: &TraceSink) -> MemoryDriver {
        MemoryDriver::new(store.clone()).with_debug_logs(DebugLogs::Capture(sink.clone()))
    }

    #[tokio::test]
    async fn memory() {
        init_logs();
        let store = MemoryStore::new(AUTH_TABLES);
        run_adapter_tests(
            |options, sink| create_adapter(driver(&store, sink), auth_tables, options),
            TestOptions::new(),
        )
        .await;
    }

    #[tokio::test]
    async fn memory_number_id() {
        init_logs();
        let store = MemoryStore::new(AUTH_TABLES);
        run_number_id_adapter_tests(
            |options, sink| create_adapter(driver(&store, sink), auth_tables, options),
            TestOptions::new().prefix("number id"),
        )
        .await;
    }

    #[tokio::test]
    async fn memory_without_native_types() {
        init_logs();
        let store = MemoryStore::new(AUTH_TABLES);
        let capabilities = Capabilities {
            supports_booleans: false,
            supports_dates: false,
            supports_json: false,
            supports_numeric_ids: true,
        };
        run_adapter_tests(
            |options, sink| {
                create_adapter(
                    driver(&store, sink).with_capabilities(capabilities),
                    auth_tables,
                    options,
                )
            },
            TestOptions::new().prefix("text only"),
        )
        .await;
    }

    #[tokio::test]
    async fn memory_plural() {
        init_logs();
        let store = MemoryStore::new(AUTH_TABLES.iter().map(|t| format!("{t}s")));
        run_adapter_tests(
            |options, sink| {
                let config = DriverConfig::new(MemoryDriver::ID, MemoryDriver::NAME)
                    .with_plural(true)
                    .with_debug_logs(DebugLogs::Capture(sink.clone()));
                create_adapter(
                    MemoryDriver::new(store.clone()).with_config(config),
                    auth_tables,
                    options,
                )
            },
            TestOptions::new().prefix("plural"),
        )
        .await;
        let users = store.rows("users").await.expect("The users table must exist");
        assert!(!users.is_empty());
    }

    #[tokio::test]
    async fn renamed_model() {
        let store = MemoryStore::new(["accounts_user"]);
        let options = AdapterOptions::new().with_model_name("user", "accounts_user");
        let adapter = create_adapter(MemoryDriver::new(store.clone()), auth_tables, options)
            .expect("Could not create the adapter");
        let user = adapter
            .create(
                "user",
                record! { "name" => "renamed", "email" => "renamed@email.com" },
                &[],
            )
            .await
            .expect("Could not create the user");
        let rows = store.rows("accounts_user").await.expect("Missing table");
        assert_eq!(rows.len(), 1);
        let found = adapter
            .find_one("accounts_user", &[Where::eq("email", "renamed@email.com")], &[])
            .await
            .expect("Could not find the user")
            .expect("The user was not found by its physical model name");
        assert_eq!(found, user);
    }

    #[tokio::test]
    async fn number_id_not_supported() {
        let store = MemoryStore::new(AUTH_TABLES);
        let result = create_adapter(
            MemoryDriver::new(store).with_capabilities(Capabilities {
                supports_numeric_ids: false,
                ..Default::default()
            }),
            auth_tables,
            AdapterOptions::new().with_number_id(true),
        );
        let Err(error) = result else {
            panic!("Numeric ids must be rejected when the driver cannot store them");
        };
        assert_eq!(error_kind(&error), Some(ErrorKind::Configuration));
    }

    #[tokio::test]
    async fn schema_file() {
        let store = MemoryStore::new(AUTH_TABLES);
        let adapter = create_adapter(
            MemoryDriver::new(store.clone()),
            auth_tables,
            AdapterOptions::new(),
        )
        .expect("Could not create the adapter");
        assert!(adapter.create_schema(None).is_none());

        let adapter = create_adapter(
            MemoryDriver::new(store).with_schema_dialect(SqlDialect::Postgres),
            auth_tables,
            AdapterOptions::new(),
        )
        .expect("Could not create the adapter");
        let schema = adapter
            .create_schema(Some("auth.sql"))
            .expect("The driver must support schema files")
            .await
            .expect("Could not generate the schema file");
        assert_eq!(schema.path, "auth.sql");
        assert!(!schema.append);
        assert!(schema.overwrite);
        let user = schema
            .code
            .find("CREATE TABLE \"user\"")
            .expect("Missing the user table");
        let account = schema
            .code
            .find("CREATE TABLE \"account\"")
            .expect("Missing the account table");
        let preference = schema
            .code
            .find("CREATE TABLE \"preference\"")
            .expect("Missing the preference table");
        assert!(user < account && account < preference);
        assert!(
            schema
                .code
                .contains("\"userId\" TEXT NOT NULL REFERENCES \"user\"(\"id\") ON DELETE CASCADE")
        );
    }

    #[tokio::test]
    async fn schema_file_with_options() {
        let options = AdapterOptions::new()
            .with_model_name("user", "accounts_user")
            .with_field_name("user", "email", "email_address");
        let adapter = create_adapter(
            MemoryDriver::new(MemoryStore::new(["accounts_user"]))
                .with_schema_dialect(SqlDialect::Postgres),
            auth_tables,
            options,
        )
        .expect("Could not create the adapter");
        let schema = adapter
            .create_schema(None)
            .expect("The driver must support schema files")
            .await
            .expect("Could not generate the schema file");
        assert!(schema.code.contains("CREATE TABLE \"accounts_user\""));
        assert!(schema.code.contains("\"email_address\" TEXT"));
        assert!(!schema.code.contains("\"email\" TEXT"));
        assert!(schema.code.contains("REFERENCES \"accounts_user\"(\"id\")"));
    }

    #[tokio::test]
    async fn traces() {
        let sink = TraceSink::new();
        let store = MemoryStore::new(AUTH_TABLES);
        let adapter = create_adapter(
            MemoryDriver::new(store).with_debug_logs(DebugLogs::Capture(sink.clone())),
            auth_tables,
            AdapterOptions::new(),
        )
        .expect("Could not create the adapter");
        let now = OffsetDateTime::now_utc();
        adapter
            .create(
                "user",
                record! {
                    "name" => "traced",
                    "email" => "traced@email.com",
                    "createdAt" => now,
                    "updatedAt" => now,
                },
                &[],
            )
            .await
            .expect("Could not create the user");
        let entries = sink.entries();
        assert_eq!(
            entries.iter().map(|e| e.action).collect::<Vec<_>>(),
            ["Unsafe Input", "Parsed Input", "DB Result", "Parsed Result"]
        );
        assert!(entries.iter().all(|e| e.method == Method::Create && e.total == 4));
        assert!(entries.iter().all(|e| e.transaction == entries[0].transaction));
        assert!(entries.iter().all(|e| e.adapter == MemoryDriver::NAME));
        assert!(entries[0].payload.contains("traced@email.com"));

        sink.reset();
        adapter
            .count("user", None)
            .await
            .expect("Could not count the users");
        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.method == Method::Count && e.total == 2));
    }

    #[tokio::test]
    async fn duplicate_id() {
        let store = MemoryStore::new(AUTH_TABLES);
        let adapter = create_adapter(
            MemoryDriver::new(store),
            auth_tables,
            AdapterOptions::new(),
        )
        .expect("Could not create the adapter");
        let row = record! { "id" => "fixed", "label" => "first" };
        adapter
            .driver()
            .create(adapter.context(), "preference", row.clone())
            .await
            .expect("Could not create the first row");
        let Err(error) = adapter
            .driver()
            .create(adapter.context(), "preference", row)
            .await
        else {
            panic!("A duplicate id must be rejected");
        };
        assert_eq!(error_kind(&error), Some(ErrorKind::StorageConflict));
    }

    #[tokio::test]
    async fn unknown_table() {
        let store = MemoryStore::new(["user"]);
        let adapter = create_adapter(MemoryDriver::new(store), auth_tables, AdapterOptions::new())
            .expect("Could not create the adapter");
        silent_logs! {
            let Err(error) = adapter.count("preference", None).await else {
                panic!("Counting a table missing from the store must fail");
            };
            assert_eq!(error_kind(&error), Some(ErrorKind::Storage));
            let Err(error) = adapter.count("unknown", None).await else {
                panic!("Counting an unknown model must fail");
            };
            assert_eq!(error_kind(&error), Some(ErrorKind::SchemaLookup));
        }
    }

    #[tokio::test]
    async fn clear() {
        let store = MemoryStore::new(AUTH_TABLES);
        let adapter = create_adapter(
            MemoryDriver::new(store.clone()),
            auth_tables,
            AdapterOptions::new().with_number_id(true),
        )
        .expect("Could not create the adapter");
        let first = adapter
            .create("preference", record! { "label" => "one" }, &[])
            .await
            .expect("Could not create the preference");
        store.clear().await;
        assert_eq!(adapter.count("preference", None).await.ok(), Some(0));
        let second = adapter
            .create("preference", record! { "label" => "two" }, &[])
            .await
            .expect("Could not create the preference");
        assert_eq!(first.get("id"), second.get("id"));
        store.add_table("extra").await;
        assert!(store.table_names().await.contains(&"extra".to_string()));
    }

    #[tokio::test]
    async fn default_limit_and_empty_results() {
        let store = MemoryStore::new(AUTH_TABLES);
        let adapter = create_adapter(
            MemoryDriver::new(store),
            auth_tables,
            AdapterOptions::new().with_default_find_many_limit(2),
        )
        .expect("Could not create the adapter");
        for label in ["a", "b", "c"] {
            adapter
                .create("preference", record! { "label" => label }, &[])
                .await
                .expect("Could not create the preference");
        }
        let found = adapter
            .find_many("preference", FindMany::new())
            .await
            .expect("Could not find the preferences");
        assert_eq!(found.len(), 2);
        let found = adapter
            .find_many("preference", FindMany::new().limit(10).offset(1))
            .await
            .expect("Could not find the preferences");
        assert_eq!(found.len(), 2);
        let found = adapter
            .find_many(
                "preference",
                FindMany::new().filter(vec![
                    Where::new("label", Operator::Eq, "a").or(),
                    Where::eq("label", "c").or(),
                ]),
            )
            .await
            .expect("Could not find the preferences");
        assert_eq!(found.len(), 2);
        let found = adapter
            .find_many(
                "preference",
                FindMany::new().filter(vec![Where::eq("label", "missing")]),
            )
            .await
            .expect("Could not find the preferences");
        assert!(found.is_empty());
        let updated = adapter
            .update(
                "preference",
                &[Where::eq("label", "missing")],
                record! { "priority" => 3 },
            )
            .await
            .expect("Could not update the preferences");
        assert_eq!(updated, None);
        let updated = adapter
            .update_many(
                "preference",
                &[Where::new("priority", Operator::Gte, 0)],
                record! { "priority" => 3 },
            )
            .await
            .expect("Could not update the preferences");
        assert_eq!(updated, 3);
        let deleted = adapter
            .delete_many("preference", &[Where::new("label", Operator::In, vec!["a", "b"])])
            .await
            .expect("Could not delete the preferences");
        assert_eq!(deleted, 2);
        assert_eq!(adapter.count("preference", None).await.ok(), Some(1));
    }
}
