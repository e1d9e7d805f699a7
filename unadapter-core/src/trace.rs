use std::{
    fmt::{self, Debug, Display, Formatter},
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

static TRANSACTION: AtomicU64 = AtomicU64::new(0);

/// Next process wide transaction number, used only to correlate trace entries.
pub fn next_transaction() -> u64 {
    TRANSACTION.fetch_add(1, Ordering::Relaxed) + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Create,
    Update,
    UpdateMany,
    FindOne,
    FindMany,
    Delete,
    DeleteMany,
    Count,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Create => "create",
            Method::Update => "update",
            Method::UpdateMany => "updateMany",
            Method::FindOne => "findOne",
            Method::FindMany => "findMany",
            Method::Delete => "delete",
            Method::DeleteMany => "deleteMany",
            Method::Count => "count",
        }
    }
    /// Number of trace steps one call emits.
    pub fn steps(&self) -> u8 {
        match self {
            Method::Create | Method::Update | Method::UpdateMany => 4,
            Method::FindOne | Method::FindMany => 3,
            Method::Delete | Method::DeleteMany | Method::Count => 2,
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which switch let a trace through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceGate {
    Global,
    PerMethod,
    Predicate,
    Capture,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceEntry {
    /// Display name of the adapter that emitted the entry.
    pub adapter: String,
    pub transaction: u64,
    pub method: Method,
    pub step: u8,
    pub total: u8,
    pub action: &'static str,
    pub model: String,
    pub payload: String,
    pub gate: TraceGate,
}

impl Display for TraceEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} [{}/{}] {} ({}) {}: {}",
            self.transaction, self.step, self.total, self.method, self.model, self.action, self.payload
        )
    }
}

/// Shared in memory trace buffer, owned by whoever wants to replay the traces later.
#[derive(Default, Clone)]
pub struct TraceSink {
    entries: Arc<Mutex<Vec<TraceEntry>>>,
}

impl TraceSink {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn record(&self, entry: TraceEntry) {
        match self.entries.lock() {
            Ok(mut entries) => entries.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
    pub fn reset(&self) {
        match self.entries.lock() {
            Ok(mut entries) => entries.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
    pub fn entries(&self) -> Vec<TraceEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
    pub fn len(&self) -> usize {
        self.entries().len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Replay every buffered entry through `log::error!`.
    pub fn print(&self) {
        for entry in self.entries() {
            log::error!("[{}] {entry}", entry.adapter);
        }
    }
}

impl Debug for TraceSink {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceSink")
            .field("entries", &self.len())
            .finish()
    }
}

pub type LogCondition = Arc<dyn Fn() -> bool + Send + Sync>;

/// Per method switches, methods left `false` stay silent.
#[derive(Default, Clone)]
pub struct MethodLogs {
    pub create: bool,
    pub update: bool,
    pub update_many: bool,
    pub find_one: bool,
    pub find_many: bool,
    pub delete: bool,
    pub delete_many: bool,
    pub count: bool,
    pub log_condition: Option<LogCondition>,
}

impl MethodLogs {
    pub fn enabled(&self, method: Method) -> bool {
        match method {
            Method::Create => self.create,
            Method::Update => self.update,
            Method::UpdateMany => self.update_many,
            Method::FindOne => self.find_one,
            Method::FindMany => self.find_many,
            Method::Delete => self.delete,
            Method::DeleteMany => self.delete_many,
            Method::Count => self.count,
        }
    }
    pub fn with(mut self, method: Method) -> Self {
        match method {
            Method::Create => self.create = true,
            Method::Update => self.update = true,
            Method::UpdateMany => self.update_many = true,
            Method::FindOne => self.find_one = true,
            Method::FindMany => self.find_many = true,
            Method::Delete => self.delete = true,
            Method::DeleteMany => self.delete_many = true,
            Method::Count => self.count = true,
        }
        self
    }
    pub fn with_condition(mut self, condition: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.log_condition = Some(Arc::new(condition));
        self
    }
}

#[derive(Default, Clone)]
pub enum DebugLogs {
    #[default]
    Disabled,
    Enabled,
    Methods(MethodLogs),
    /// Buffer the traces in the sink instead of logging them.
    Capture(TraceSink),
}

impl Debug for DebugLogs {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DebugLogs::Disabled => f.write_str("Disabled"),
            DebugLogs::Enabled => f.write_str("Enabled"),
            DebugLogs::Methods(..) => f.write_str("Methods(..)"),
            DebugLogs::Capture(sink) => f.debug_tuple("Capture").field(sink).finish(),
        }
    }
}

impl DebugLogs {
    /// Gate a trace of `method`, `None` when it must not be emitted.
    pub fn gate(&self, method: Method) -> Option<TraceGate> {
        match self {
            DebugLogs::Disabled => None,
            DebugLogs::Enabled => Some(TraceGate::Global),
            DebugLogs::Capture(..) => Some(TraceGate::Capture),
            DebugLogs::Methods(methods) => {
                if let Some(condition) = &methods.log_condition {
                    if !condition() {
                        return None;
                    }
                    if methods.enabled(method) {
                        return Some(TraceGate::Predicate);
                    }
                    return None;
                }
                methods.enabled(method).then_some(TraceGate::PerMethod)
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, DebugLogs::Disabled)
    }
}

/// Step tracer of a single adapter call.
pub struct Tracer<'a> {
    logs: &'a DebugLogs,
    adapter: &'a str,
    transaction: u64,
    method: Method,
    model: &'a str,
}

impl<'a> Tracer<'a> {
    pub fn new(logs: &'a DebugLogs, adapter: &'a str, method: Method, model: &'a str) -> Self {
        Self {
            logs,
            adapter,
            transaction: next_transaction(),
            method,
            model,
        }
    }

    pub fn transaction(&self) -> u64 {
        self.transaction
    }

    /// Emit step `step`, the payload is rendered only when the trace passes the gate.
    pub fn step(&self, step: u8, action: &'static str, payload: impl FnOnce() -> String) {
        let Some(gate) = self.logs.gate(self.method) else {
            return;
        };
        let entry = TraceEntry {
            adapter: self.adapter.to_string(),
            transaction: self.transaction,
            method: self.method,
            step,
            total: self.method.steps(),
            action,
            model: self.model.to_string(),
            payload: payload(),
            gate,
        };
        match self.logs {
            DebugLogs::Capture(sink) => sink.record(entry),
            _ => log::info!("[{}] {entry}", self.adapter),
        }
    }
}
