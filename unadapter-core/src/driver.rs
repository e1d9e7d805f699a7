use crate::{
    AdapterContext, AdapterError, AdapterOptions, AdapterSchemaCreation, Capabilities,
    CleanedWhere, DebugLogs, FieldDescriptor, IdGenerator, Record, Result, Schema, Value,
    WriteAction,
};
use std::{
    collections::BTreeMap,
    fmt::{self, Debug, Formatter},
    future::Future,
    sync::Arc,
};

/// Arguments of the input hook, called once per written field.
pub struct TransformInputArgs<'a> {
    pub data: Value,
    pub action: WriteAction,
    /// Physical name the value is written under.
    pub field: &'a str,
    pub field_attributes: &'a FieldDescriptor,
    /// Logical model key.
    pub model: &'a str,
    pub schema: &'a Schema,
    pub options: &'a AdapterOptions,
}

/// Arguments of the output hook, called once per read field.
pub struct TransformOutputArgs<'a> {
    pub data: Value,
    /// Key the value is returned under.
    pub field: &'a str,
    pub field_attributes: &'a FieldDescriptor,
    pub select: &'a [String],
    pub model: &'a str,
    pub schema: &'a Schema,
    pub options: &'a AdapterOptions,
}

pub type TransformInputHook = Arc<dyn Fn(TransformInputArgs<'_>) -> Value + Send + Sync>;
pub type TransformOutputHook = Arc<dyn Fn(TransformOutputArgs<'_>) -> Value + Send + Sync>;

/// What a driver declares about itself, copied by the adapter at construction.
#[derive(Clone)]
pub struct DriverConfig {
    pub adapter_id: String,
    pub adapter_name: String,
    /// Pluralize physical model names.
    pub use_plural: bool,
    pub capabilities: Capabilities,
    pub debug_logs: DebugLogs,
    pub disable_id_generation: bool,
    pub custom_id_generator: Option<IdGenerator>,
    /// Logical field key to storage key, overrides the physical name on write.
    pub map_keys_transform_input: BTreeMap<String, String>,
    /// Storage key to returned key.
    pub map_keys_transform_output: BTreeMap<String, String>,
    pub custom_transform_input: Option<TransformInputHook>,
    pub custom_transform_output: Option<TransformOutputHook>,
}

impl DriverConfig {
    pub fn new(adapter_id: impl Into<String>, adapter_name: impl Into<String>) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            adapter_name: adapter_name.into(),
            use_plural: false,
            capabilities: Capabilities::default(),
            debug_logs: DebugLogs::Disabled,
            disable_id_generation: false,
            custom_id_generator: None,
            map_keys_transform_input: BTreeMap::new(),
            map_keys_transform_output: BTreeMap::new(),
            custom_transform_input: None,
            custom_transform_output: None,
        }
    }
    pub fn with_plural(mut self, use_plural: bool) -> Self {
        self.use_plural = use_plural;
        self
    }
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
    pub fn with_debug_logs(mut self, debug_logs: DebugLogs) -> Self {
        self.debug_logs = debug_logs;
        self
    }
    pub fn with_disable_id_generation(mut self, disable: bool) -> Self {
        self.disable_id_generation = disable;
        self
    }
    pub fn with_custom_id_generator(
        mut self,
        generator: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.custom_id_generator = Some(Arc::new(generator));
        self
    }
    pub fn with_input_key(mut self, field: impl Into<String>, key: impl Into<String>) -> Self {
        self.map_keys_transform_input.insert(field.into(), key.into());
        self
    }
    pub fn with_output_key(mut self, key: impl Into<String>, field: impl Into<String>) -> Self {
        self.map_keys_transform_output.insert(key.into(), field.into());
        self
    }
    pub fn with_transform_input(
        mut self,
        hook: impl Fn(TransformInputArgs<'_>) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.custom_transform_input = Some(Arc::new(hook));
        self
    }
    pub fn with_transform_output(
        mut self,
        hook: impl Fn(TransformOutputArgs<'_>) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.custom_transform_output = Some(Arc::new(hook));
        self
    }
}

impl Debug for DriverConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverConfig")
            .field("adapter_id", &self.adapter_id)
            .field("adapter_name", &self.adapter_name)
            .field("use_plural", &self.use_plural)
            .field("capabilities", &self.capabilities)
            .field("debug_logs", &self.debug_logs)
            .field("disable_id_generation", &self.disable_id_generation)
            .field("map_keys_transform_input", &self.map_keys_transform_input)
            .field("map_keys_transform_output", &self.map_keys_transform_output)
            .finish_non_exhaustive()
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortBy {
    pub field: String,
    pub direction: Direction,
}

impl SortBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

/// Normalized `find_many` arguments as a driver receives them.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverFindMany {
    pub filter: Option<Vec<CleanedWhere>>,
    pub limit: u32,
    /// Sort on a physical field.
    pub sort_by: Option<SortBy>,
    pub offset: Option<u32>,
}

/// Storage primitives a back end implements.
///
/// Every method receives the physical model name, physical field names and storage ready values.
pub trait Driver: Send + Sync {
    fn config(&self) -> &DriverConfig;

    fn create(
        &self,
        context: &AdapterContext,
        model: &str,
        data: Record,
    ) -> impl Future<Output = Result<Record>> + Send;

    fn find_one(
        &self,
        context: &AdapterContext,
        model: &str,
        filter: &[CleanedWhere],
        select: &[String],
    ) -> impl Future<Output = Result<Option<Record>>> + Send;

    fn find_many(
        &self,
        context: &AdapterContext,
        model: &str,
        query: &DriverFindMany,
    ) -> impl Future<Output = Result<Vec<Record>>> + Send;

    /// Update every matching row, return one of them after the update.
    fn update(
        &self,
        context: &AdapterContext,
        model: &str,
        filter: &[CleanedWhere],
        update: Record,
    ) -> impl Future<Output = Result<Option<Record>>> + Send;

    fn update_many(
        &self,
        context: &AdapterContext,
        model: &str,
        filter: &[CleanedWhere],
        update: Record,
    ) -> impl Future<Output = Result<u64>> + Send;

    /// Deleting nothing is not an error.
    fn delete(
        &self,
        context: &AdapterContext,
        model: &str,
        filter: &[CleanedWhere],
    ) -> impl Future<Output = Result<()>> + Send;

    fn delete_many(
        &self,
        context: &AdapterContext,
        model: &str,
        filter: &[CleanedWhere],
    ) -> impl Future<Output = Result<u64>> + Send;

    fn count(
        &self,
        context: &AdapterContext,
        model: &str,
        filter: Option<&[CleanedWhere]>,
    ) -> impl Future<Output = Result<u64>> + Send;

    /// Whether `create_schema` is available.
    fn supports_create_schema(&self) -> bool {
        false
    }

    /// Render a schema file for the registry of `context`.
    fn create_schema(
        &self,
        context: &AdapterContext,
        _file: Option<&str>,
    ) -> impl Future<Output = Result<AdapterSchemaCreation>> + Send {
        let adapter = context.config().adapter_name.clone();
        async move {
            Err(AdapterError::Configuration(format!(
                "{adapter} cannot generate schema files"
            ))
            .into())
        }
    }
}
