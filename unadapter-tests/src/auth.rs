use time::OffsetDateTime;
use unadapter::{
    Action, AdapterOptions, FieldDescriptor, Reference, SchemaBuilder, TableDescriptor, Value,
};

/// Physical table names of [`auth_tables`] with default options.
pub const AUTH_TABLES: [&str; 5] = ["user", "session", "account", "verification", "preference"];

fn now() -> Value {
    Value::TimestampWithTimezone(OffsetDateTime::now_utc())
}

fn timestamp() -> FieldDescriptor {
    FieldDescriptor::date().required(true).default_with(now)
}

fn user_reference() -> FieldDescriptor {
    FieldDescriptor::string()
        .required(true)
        .references(Reference::new("user", "id").on_delete(Action::Cascade))
}

struct Table<'o> {
    options: &'o AdapterOptions,
    key: &'static str,
    table: TableDescriptor,
}

impl<'o> Table<'o> {
    fn new(options: &'o AdapterOptions, key: &'static str) -> Self {
        Self {
            options,
            key,
            table: TableDescriptor::new(options.model_name(key)),
        }
    }
    fn field(mut self, key: &str, field: FieldDescriptor) -> Self {
        let name = self.options.field_name(self.key, key).to_string();
        self.table = self.table.field(key, field.field_name(name));
        self
    }
    fn order(mut self, order: u32) -> Self {
        self.table = self.table.order(order);
        self
    }
}

/// Auth style schema used by the conformance scenarios.
///
/// Honors the model and field renames configured in `options`.
pub fn auth_tables(options: &AdapterOptions) -> SchemaBuilder {
    let user = Table::new(options, "user")
        .field(
            "name",
            FieldDescriptor::string().required(true).sortable(true),
        )
        .field(
            "email",
            FieldDescriptor::string()
                .required(true)
                .unique(true)
                .sortable(true),
        )
        .field(
            "emailVerified",
            FieldDescriptor::boolean()
                .required(true)
                .default_with(|| Value::Boolean(false)),
        )
        .field("image", FieldDescriptor::string())
        .field("createdAt", timestamp())
        .field("updatedAt", timestamp())
        .order(1);
    let session = Table::new(options, "session")
        .field("expiresAt", FieldDescriptor::date().required(true))
        .field("token", FieldDescriptor::string().required(true).unique(true))
        .field("createdAt", timestamp())
        .field("updatedAt", timestamp())
        .field("ipAddress", FieldDescriptor::string())
        .field("userAgent", FieldDescriptor::string())
        .field("userId", user_reference())
        .order(2);
    let account = Table::new(options, "account")
        .field("accountId", FieldDescriptor::string().required(true))
        .field("providerId", FieldDescriptor::string().required(true))
        .field("userId", user_reference())
        .field("accessToken", FieldDescriptor::string())
        .field("password", FieldDescriptor::string())
        .field("createdAt", timestamp())
        .field("updatedAt", timestamp())
        .order(3);
    let verification = Table::new(options, "verification")
        .field("identifier", FieldDescriptor::string().required(true))
        .field("value", FieldDescriptor::string().required(true))
        .field("expiresAt", FieldDescriptor::date().required(true))
        .field("createdAt", timestamp())
        .field("updatedAt", timestamp())
        .order(4);
    let preference = Table::new(options, "preference")
        .field("label", FieldDescriptor::string().required(true))
        .field("priority", FieldDescriptor::number().default_value(0))
        .field("enabled", FieldDescriptor::boolean().default_value(true))
        .field("updatedAt", FieldDescriptor::date())
        .field("payload", FieldDescriptor::json());
    [user, session, account, verification, preference]
        .into_iter()
        .fold(SchemaBuilder::new(), |builder, table| {
            builder.table(table.key, table.table)
        })
}
