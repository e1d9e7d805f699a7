#[cfg(test)]
mod tests {
    use unadapter_core::{
        Capabilities, CleanedWhere, Connector, ErrorKind, FieldDescriptor, IdPolicy, Operator,
        Registry, Result, SchemaBuilder, TableDescriptor, Value, Where, error_kind,
        normalize_where, render_where,
    };

    fn registry(use_number_id: bool) -> Registry {
        let policy = IdPolicy {
            use_number_id,
            ..Default::default()
        };
        let schema = SchemaBuilder::new()
            .table(
                "user",
                TableDescriptor::new("user")
                    .field("name", FieldDescriptor::string())
                    .field("email", FieldDescriptor::string().field_name("email_address"))
                    .field("age", FieldDescriptor::number()),
            )
            .build(&policy);
        Registry::new(schema, false, Capabilities::default(), use_number_id)
    }

    fn clean(use_number_id: bool, conditions: &[Where]) -> Result<Vec<CleanedWhere>> {
        normalize_where(&registry(use_number_id), "user", Some(conditions))
            .map(Option::unwrap_or_default)
    }

    #[test]
    fn absent_filter() {
        assert_eq!(normalize_where(&registry(false), "user", None).unwrap(), None);
        assert!(clean(false, &[]).unwrap().is_empty());
    }

    #[test]
    fn physical_names_and_order() {
        let conditions = [
            Where::eq("email", "john@email.com"),
            Where::new("age", Operator::Gte, 18),
            Where::new("name", Operator::StartsWith, "jo").or(),
        ];
        let cleaned = clean(false, &conditions).unwrap();
        assert_eq!(
            cleaned,
            [
                CleanedWhere {
                    field: "email_address".into(),
                    operator: Operator::Eq,
                    value: "john@email.com".into(),
                    connector: Connector::And,
                },
                CleanedWhere {
                    field: "age".into(),
                    operator: Operator::Gte,
                    value: Value::Int64(18),
                    connector: Connector::And,
                },
                CleanedWhere {
                    field: "name".into(),
                    operator: Operator::StartsWith,
                    value: "jo".into(),
                    connector: Connector::Or,
                },
            ]
        );
        assert_eq!(
            render_where(Some(&cleaned)),
            "[AND email_address eq john@email.com, AND age gte 18, OR name starts_with jo]"
        );
    }

    #[test]
    fn aliased_field() {
        let cleaned = clean(false, &[Where::eq("email_address", "john@email.com")]).unwrap();
        assert_eq!(cleaned[0].field, "email_address");
    }

    #[test]
    fn numeric_identifiers() {
        let conditions = [
            Where::eq("id", "42"),
            Where::new("id", Operator::In, vec!["1", "2"]),
            Where::eq("name", "42"),
        ];
        let cleaned = clean(true, &conditions).unwrap();
        assert_eq!(cleaned[0].value, Value::Int64(42));
        assert_eq!(
            cleaned[1].value,
            Value::List(vec![Value::Int64(1), Value::Int64(2)])
        );
        assert_eq!(cleaned[2].value, Value::from("42"));

        let cleaned = clean(false, &conditions[..1]).unwrap();
        assert_eq!(cleaned[0].value, Value::from("42"));
    }

    #[test]
    fn non_numeric_identifier_is_kept() {
        let cleaned = clean(true, &[Where::eq("id", "abc")]).unwrap();
        assert_eq!(cleaned[0].field, "id");
        assert_eq!(cleaned[0].value, Value::from("abc"));

        let cleaned = clean(true, &[Where::new("id", Operator::In, vec!["1", "x"])]).unwrap();
        assert_eq!(
            cleaned[0].value,
            Value::List(vec![Value::from("1"), Value::from("x")])
        );
    }

    #[test]
    fn in_requires_list() {
        let error = clean(false, &[Where::new("name", Operator::In, "john")]).unwrap_err();
        assert_eq!(error_kind(&error), Some(ErrorKind::TypeMismatch));
        // Checked before the field lookup
        let error = clean(false, &[Where::new("missing", Operator::In, 1)]).unwrap_err();
        assert_eq!(error_kind(&error), Some(ErrorKind::TypeMismatch));
    }

    #[test]
    fn unknown_field() {
        let error = clean(false, &[Where::eq("password", "secret")]).unwrap_err();
        assert_eq!(error_kind(&error), Some(ErrorKind::SchemaLookup));
    }

    #[test]
    fn operators() {
        for operator in [
            Operator::Eq,
            Operator::Ne,
            Operator::Lt,
            Operator::Lte,
            Operator::Gt,
            Operator::Gte,
            Operator::In,
            Operator::Contains,
            Operator::StartsWith,
            Operator::EndsWith,
        ] {
            assert_eq!(operator.as_str().parse::<Operator>().unwrap(), operator);
        }
        let error = "like".parse::<Operator>().unwrap_err();
        assert_eq!(error_kind(&error), Some(ErrorKind::TypeMismatch));
    }
}
