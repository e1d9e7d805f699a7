#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;
    use unadapter_core::{ErrorKind, Value, error_kind, record, render_record};

    #[test]
    fn value_conversions() {
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from(7_u8), Value::Int64(7));
        assert_eq!(Value::from(-7_i32), Value::Int64(-7));
        assert_eq!(Value::from(1.5_f32), Value::Float64(1.5));
        assert_eq!(Value::from("a"), Value::Varchar("a".into()));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::Varchar("a".into()));
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::List(vec![Value::Int64(1), Value::Int64(2)])
        );
        assert_eq!(
            Value::from(json!({ "a": 1 })),
            Value::Json(json!({ "a": 1 }))
        );
    }

    #[test]
    fn value_compare() {
        assert_eq!(Value::Int64(3), Value::Float64(3.0));
        assert_ne!(Value::Int64(3), Value::Varchar("3".into()));
        assert!(Value::Int64(2) < Value::Float64(2.5));
        assert!(Value::Varchar("a".into()) < Value::Varchar("b".into()));
    }

    #[test]
    fn value_to_number() {
        assert_eq!(Value::from("42").to_number().unwrap(), Value::Int64(42));
        assert_eq!(Value::from(" 7 ").to_number().unwrap(), Value::Int64(7));
        assert_eq!(Value::from("1.5").to_number().unwrap(), Value::Float64(1.5));
        assert_eq!(Value::Null.to_number().unwrap(), Value::Null);
        assert_eq!(
            Value::from(vec!["1", "2"]).to_number().unwrap(),
            Value::List(vec![Value::Int64(1), Value::Int64(2)])
        );
        let error = Value::from("abc").to_number().unwrap_err();
        assert_eq!(error_kind(&error), Some(ErrorKind::TypeMismatch));
        assert!(Value::Json(json!({})).to_number().is_err());
    }

    #[test]
    fn value_to_id_string() {
        assert_eq!(Value::Int64(12).to_id_string(), Value::from("12"));
        assert_eq!(Value::from("abc").to_id_string(), Value::from("abc"));
        assert_eq!(Value::Null.to_id_string(), Value::Null);
        assert_eq!(
            Value::from(vec![1, 2]).to_id_string(),
            Value::from(vec!["1", "2"])
        );
    }

    #[test]
    fn value_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Float64(2.0).to_string(), "2");
        assert_eq!(
            Value::from(datetime!(2024-02-29 08:00:00 UTC)).to_string(),
            "2024-02-29T08:00:00Z"
        );
        assert_eq!(Value::from(vec![1, 2]).to_string(), "[1, 2]");
        assert_eq!(
            Value::from(datetime!(2024-02-29 08:00:00 UTC)).to_json(),
            json!("2024-02-29T08:00:00Z")
        );
    }

    #[test]
    fn record_rendering() {
        let record = record! { "name" => "John", "age" => 30, "admin" => false };
        let rendered = render_record(&record);
        assert!(rendered.starts_with('{') && rendered.ends_with('}'));
        assert!(rendered.contains("name: \"John\""), "{rendered}");
        assert!(rendered.contains("age: 30"), "{rendered}");
    }
}
