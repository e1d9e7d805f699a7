#[cfg(test)]
mod tests {
    use indoc::indoc;
    use unadapter::{
        Action, Capabilities, FieldDescriptor, IdPolicy, Reference, Registry, SchemaBuilder,
        SqlDialect, TableDescriptor,
    };

    fn registry(use_number_id: bool, use_plural: bool) -> Registry {
        let schema = SchemaBuilder::new()
            .table(
                "tag",
                TableDescriptor::new("tag").field("label", FieldDescriptor::string()),
            )
            .table(
                "post",
                TableDescriptor::new("post")
                    .order(2)
                    .field(
                        "authorId",
                        FieldDescriptor::string()
                            .required(true)
                            .references(Reference::new("user", "id").on_delete(Action::Cascade)),
                    )
                    .field("title", FieldDescriptor::string())
                    .field("published", FieldDescriptor::boolean())
                    .field("meta", FieldDescriptor::json())
                    .field("publishedAt", FieldDescriptor::date()),
            )
            .table(
                "user",
                TableDescriptor::new("user")
                    .order(1)
                    .field("name", FieldDescriptor::string().required(true))
                    .field(
                        "email",
                        FieldDescriptor::string().unique(true).field_name("email_address"),
                    )
                    .field("age", FieldDescriptor::number()),
            )
            .table(
                "audit",
                TableDescriptor::new("audit")
                    .disable_migrations(true)
                    .field("event", FieldDescriptor::string()),
            )
            .build(&IdPolicy {
                use_number_id,
                ..Default::default()
            });
        Registry::new(schema, use_plural, Capabilities::default(), use_number_id)
    }

    #[test]
    fn postgres() {
        let schema = SqlDialect::Postgres
            .sql_writer()
            .write_schema(&registry(false, false))
            .unwrap();
        assert_eq!(
            schema,
            indoc! {r#"
                CREATE TABLE "user" (
                "id" TEXT PRIMARY KEY,
                "name" TEXT NOT NULL,
                "email_address" TEXT UNIQUE,
                "age" INTEGER
                );

                CREATE TABLE "post" (
                "id" TEXT PRIMARY KEY,
                "authorId" TEXT NOT NULL REFERENCES "user"("id") ON DELETE CASCADE,
                "title" TEXT,
                "published" BOOLEAN,
                "meta" JSONB,
                "publishedAt" TIMESTAMP WITH TIME ZONE
                );

                CREATE TABLE "tag" (
                "id" TEXT PRIMARY KEY,
                "label" TEXT
                );
            "#}
        );
    }

    #[test]
    fn postgres_plural_number_id() {
        let schema = SqlDialect::Postgres
            .sql_writer()
            .write_schema(&registry(true, true))
            .unwrap();
        assert!(schema.starts_with(indoc! {r#"
            CREATE TABLE "users" (
            "id" BIGSERIAL PRIMARY KEY,
        "#}));
        assert!(
            schema.contains(r#""authorId" BIGINT NOT NULL REFERENCES "users"("id") ON DELETE CASCADE"#)
        );
        assert!(!schema.contains("audit"));
    }

    #[test]
    fn mysql() {
        let schema = SqlDialect::MySql
            .sql_writer()
            .write_schema(&registry(true, false))
            .unwrap();
        assert_eq!(
            schema,
            indoc! {"
                CREATE TABLE `user` (
                `id` BIGINT AUTO_INCREMENT PRIMARY KEY,
                `name` VARCHAR(255) NOT NULL,
                `email_address` VARCHAR(255) UNIQUE,
                `age` BIGINT
                );

                CREATE TABLE `post` (
                `id` BIGINT AUTO_INCREMENT PRIMARY KEY,
                `authorId` BIGINT NOT NULL REFERENCES `user`(`id`) ON DELETE CASCADE,
                `title` VARCHAR(255),
                `published` BOOLEAN,
                `meta` JSON,
                `publishedAt` DATETIME
                );

                CREATE TABLE `tag` (
                `id` BIGINT AUTO_INCREMENT PRIMARY KEY,
                `label` VARCHAR(255)
                );
            "}
        );
    }

    #[test]
    fn sqlite() {
        let schema = SqlDialect::Sqlite
            .sql_writer()
            .write_schema(&registry(true, false))
            .unwrap();
        assert!(schema.starts_with(indoc! {r#"
            CREATE TABLE "user" (
            "id" INTEGER PRIMARY KEY AUTOINCREMENT,
            "name" TEXT NOT NULL,
        "#}));
        assert!(schema.contains(r#""authorId" INTEGER NOT NULL REFERENCES "user"("id")"#));
        assert!(schema.contains(r#""published" INTEGER,"#));
        assert!(schema.contains(r#""publishedAt" TEXT"#));
    }

    #[test]
    fn mssql() {
        let schema = SqlDialect::MsSql
            .sql_writer()
            .write_schema(&registry(false, false))
            .unwrap();
        assert!(schema.starts_with(indoc! {"
            CREATE TABLE [user] (
            [id] NVARCHAR(255) PRIMARY KEY,
            [name] NVARCHAR(255) NOT NULL,
        "}));
        assert!(schema.contains("[published] BIT,"));
        assert!(schema.contains("[meta] NVARCHAR(MAX),"));
        assert!(schema.contains("[publishedAt] DATETIME2\n);"));
    }

    #[test]
    fn quoting() {
        let mut out = String::new();
        SqlDialect::Postgres
            .sql_writer()
            .write_identifier_quoted(&mut out, r#"we"ird"#);
        assert_eq!(out, r#""we""ird""#);
        let mut out = String::new();
        SqlDialect::MySql
            .sql_writer()
            .write_identifier_quoted(&mut out, "we`ird");
        assert_eq!(out, "`we``ird`");
        let mut out = String::new();
        SqlDialect::MsSql
            .sql_writer()
            .write_identifier_quoted(&mut out, "we]ird");
        assert_eq!(out, "[we]]ird]");
    }
}
