#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };
    use unadapter_core::{DebugLogs, Method, MethodLogs, TraceGate, TraceSink, Tracer};

    #[test]
    fn gates() {
        assert_eq!(DebugLogs::Disabled.gate(Method::Create), None);
        assert_eq!(DebugLogs::Enabled.gate(Method::Count), Some(TraceGate::Global));
        let methods = DebugLogs::Methods(MethodLogs::default().with(Method::FindMany));
        assert_eq!(methods.gate(Method::FindMany), Some(TraceGate::PerMethod));
        assert_eq!(methods.gate(Method::FindOne), None);
        assert!(!DebugLogs::Disabled.is_enabled());
        assert!(methods.is_enabled());
    }

    #[test]
    fn log_condition() {
        let allowed = Arc::new(AtomicBool::new(false));
        let condition = allowed.clone();
        let logs = DebugLogs::Methods(
            MethodLogs::default()
                .with(Method::Update)
                .with_condition(move || condition.load(Ordering::Relaxed)),
        );
        assert_eq!(logs.gate(Method::Update), None);
        allowed.store(true, Ordering::Relaxed);
        assert_eq!(logs.gate(Method::Update), Some(TraceGate::Predicate));
        assert_eq!(logs.gate(Method::Delete), None);
    }

    #[test]
    fn capture() {
        let sink = TraceSink::new();
        let logs = DebugLogs::Capture(sink.clone());
        let tracer = Tracer::new(&logs, "Test Adapter", Method::FindOne, "user");
        tracer.step(1, "Unsafe Input", || "[AND id eq 1]".into());
        tracer.step(2, "DB Result", || "null".into());
        tracer.step(3, "Parsed Result", || "null".into());
        let entries = sink.entries();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.transaction == tracer.transaction()));
        assert!(entries.iter().all(|e| e.adapter == "Test Adapter"));
        assert_eq!(
            entries[0].to_string(),
            format!(
                "#{} [1/3] findOne (user) Unsafe Input: [AND id eq 1]",
                tracer.transaction()
            )
        );
        assert_eq!(entries[2].gate, TraceGate::Capture);

        let other = Tracer::new(&logs, "Test Adapter", Method::Count, "user");
        assert!(other.transaction() > tracer.transaction());

        sink.reset();
        assert!(sink.is_empty());
    }

    #[test]
    fn lazy_payload() {
        let logs = DebugLogs::Methods(MethodLogs::default().with(Method::Create));
        let tracer = Tracer::new(&logs, "Test Adapter", Method::Delete, "session");
        tracer.step(1, "Unsafe Input", || panic!("The payload of a gated trace was rendered"));
        let tracer = Tracer::new(&DebugLogs::Disabled, "Test Adapter", Method::Create, "session");
        tracer.step(1, "Unsafe Input", || panic!("The payload of a disabled trace was rendered"));
    }

    #[test]
    fn steps() {
        assert_eq!(Method::Create.steps(), 4);
        assert_eq!(Method::UpdateMany.steps(), 4);
        assert_eq!(Method::FindMany.steps(), 3);
        assert_eq!(Method::DeleteMany.steps(), 2);
        assert_eq!(Method::UpdateMany.as_str(), "updateMany");
    }
}
