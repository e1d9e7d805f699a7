#[cfg(test)]
mod tests {
    use unadapter_core::{
        Capabilities, ErrorKind, FieldDescriptor, GenerateId, IdPolicy, PluginSchema, Registry,
        SchemaBuilder, TableDescriptor, Value, error_kind,
    };

    fn schema() -> SchemaBuilder {
        SchemaBuilder::new()
            .table(
                "user",
                TableDescriptor::new("user")
                    .order(1)
                    .field("name", FieldDescriptor::string().required(true))
                    .field(
                        "email",
                        FieldDescriptor::string().unique(true).field_name("email_address"),
                    ),
            )
            .table(
                "session",
                TableDescriptor::new("auth_session")
                    .field("token", FieldDescriptor::string().required(true)),
            )
    }

    fn registry(use_plural: bool) -> Registry {
        Registry::new(
            schema().build(&IdPolicy::default()),
            use_plural,
            Capabilities::default(),
            false,
        )
    }

    #[test]
    fn resolve_model() {
        let registry = registry(false);
        assert_eq!(registry.resolve_model("user").unwrap(), "user");
        assert_eq!(registry.resolve_model("session").unwrap(), "session");
        assert_eq!(registry.resolve_model("auth_session").unwrap(), "session");
        let error = registry.resolve_model("users").unwrap_err();
        assert_eq!(error_kind(&error), Some(ErrorKind::SchemaLookup));
        let message = format!("{error:#}");
        assert!(message.contains("users"), "{message}");
        assert!(message.contains("session (auth_session)"), "{message}");
    }

    #[test]
    fn resolve_model_plural() {
        let registry = registry(true);
        assert_eq!(registry.resolve_model("users").unwrap(), "user");
        assert_eq!(registry.resolve_model("user").unwrap(), "user");
        assert_eq!(registry.resolve_model("auth_sessions").unwrap(), "session");
        assert!(registry.resolve_model("accounts").is_err());
    }

    #[test]
    fn physical_model_name() {
        let registry = registry(false);
        assert_eq!(registry.physical_model_name("user").unwrap(), "user");
        assert_eq!(registry.physical_model_name("session").unwrap(), "auth_session");
        let registry = self::registry(true);
        assert_eq!(registry.physical_model_name("user").unwrap(), "users");
        assert_eq!(registry.physical_model_name("users").unwrap(), "users");
        assert_eq!(registry.physical_model_name("session").unwrap(), "auth_session");
    }

    #[test]
    fn resolve_field() {
        let registry = registry(false);
        assert_eq!(registry.resolve_field("user", "email").unwrap(), "email");
        assert_eq!(registry.resolve_field("user", "email_address").unwrap(), "email");
        assert_eq!(registry.resolve_field("user", "id").unwrap(), "id");
        assert_eq!(registry.resolve_field("auth_session", "token").unwrap(), "token");
        let error = registry.resolve_field("user", "password").unwrap_err();
        assert_eq!(error_kind(&error), Some(ErrorKind::SchemaLookup));
        assert_eq!(
            registry.physical_field_name("user", "email").unwrap(),
            "email_address"
        );
        assert_eq!(registry.physical_field_name("user", "name").unwrap(), "name");
        assert_eq!(registry.physical_field_name("user", "id").unwrap(), "id");
    }

    #[test]
    fn id_field_first() {
        let registry = registry(false);
        let table = registry.table("user").unwrap();
        assert_eq!(
            table.fields.keys().collect::<Vec<_>>(),
            ["id", "name", "email"]
        );
        let id = table.fields.get("id").unwrap();
        assert!(id.required);
        assert!(id.default_value.is_some());
    }

    #[test]
    fn plugins_merge() {
        let plugin = PluginSchema::new("two-factor")
            .table(
                "user",
                TableDescriptor::default()
                    .field("twoFactorEnabled", FieldDescriptor::boolean().default_value(false)),
            )
            .table(
                "twoFactor",
                TableDescriptor::new("two_factor")
                    .order(5)
                    .field("secret", FieldDescriptor::string().required(true)),
            );
        let schema = schema().plugin(plugin).build(&IdPolicy::default());
        let user = schema.get("user").unwrap();
        assert_eq!(user.model_name, "user");
        assert_eq!(user.order, Some(1));
        assert_eq!(
            user.fields.keys().collect::<Vec<_>>(),
            ["id", "name", "email", "twoFactorEnabled"]
        );
        let two_factor = schema.get("twoFactor").unwrap();
        assert_eq!(two_factor.model_name, "two_factor");
        assert!(two_factor.fields.contains_key("id"));
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn id_policy() {
        let policy = IdPolicy::default();
        assert!(policy.generates_ids());
        let numeric = IdPolicy {
            use_number_id: true,
            ..Default::default()
        };
        assert!(!numeric.generates_ids());
        let id = numeric.id_descriptor("user");
        assert!(!id.required);
        assert!(id.default_value.is_none());
        let disabled = IdPolicy {
            generate_id: GenerateId::Disabled,
            ..Default::default()
        };
        assert!(!disabled.generates_ids());
        let custom = IdPolicy {
            generate_id: GenerateId::custom(|model| format!("{model}-1")),
            ..Default::default()
        };
        let id = custom.id_descriptor("session");
        assert_eq!(
            id.default_value.unwrap().produce(),
            Value::from("session-1")
        );
        let generated = policy.id_descriptor("user").default_value.unwrap().produce();
        assert_eq!(generated.as_str().map(str::len), Some(32));
    }
}
