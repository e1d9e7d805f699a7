mod create;
mod delete;
mod find;
mod find_many;
mod kinds;
mod number_id;
#[cfg(not(feature = "disable-references"))]
mod references;
mod update;

use anyhow::anyhow;
use std::fmt::{self, Display, Formatter};
use unadapter::{Adapter, AdapterOptions, Driver, Record, Result, TraceSink, Value};

/// Every scenario of the conformance suite, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scenario {
    CreateModel,
    CreateModelShouldAlwaysReturnAnId,
    FindModel,
    FindModelWithoutId,
    FindModelWithSelect,
    FindModelWithModifiedFieldName,
    UpdateModel,
    ShouldFindMany,
    ShouldFindManyWithWhere,
    ShouldFindManyWithOperators,
    ShouldWorkWithReferenceFields,
    ShouldFindManyWithSortBy,
    ShouldFindManyWithLimit,
    ShouldFindManyWithOffset,
    ShouldUpdateWithMultipleWhere,
    DeleteModel,
    ShouldDeleteMany,
    ShouldNotThrowOnDeleteRecordNotFound,
    ShouldNotThrowOnRecordNotFound,
    ShouldFindManyWithContainsOperator,
    ShouldSearchUsersWithStartsWith,
    ShouldSearchUsersWithEndsWith,
    ShouldPreferGenerateIdIfProvided,
    ShouldRoundTripEveryFieldKind,
    ShouldNotBackfillDefaultsOnUpdate,
    ShouldCountWithWhere,
    ShouldRejectInWithoutList,
    ShouldReturnANumberIdAsAResult,
    ShouldIncrementTheIdBy1,
    ShouldNotMatchANonNumericId,
}

impl Scenario {
    pub const STANDARD: &'static [Scenario] = &[
        Scenario::CreateModel,
        Scenario::CreateModelShouldAlwaysReturnAnId,
        Scenario::FindModel,
        Scenario::FindModelWithoutId,
        Scenario::FindModelWithModifiedFieldName,
        Scenario::FindModelWithSelect,
        Scenario::UpdateModel,
        Scenario::ShouldFindMany,
        Scenario::ShouldFindManyWithWhere,
        Scenario::ShouldFindManyWithOperators,
        Scenario::ShouldWorkWithReferenceFields,
        Scenario::ShouldFindManyWithSortBy,
        Scenario::ShouldFindManyWithLimit,
        Scenario::ShouldFindManyWithOffset,
        Scenario::ShouldUpdateWithMultipleWhere,
        Scenario::DeleteModel,
        Scenario::ShouldDeleteMany,
        Scenario::ShouldNotThrowOnDeleteRecordNotFound,
        Scenario::ShouldNotThrowOnRecordNotFound,
        Scenario::ShouldFindManyWithContainsOperator,
        Scenario::ShouldSearchUsersWithStartsWith,
        Scenario::ShouldSearchUsersWithEndsWith,
        Scenario::ShouldPreferGenerateIdIfProvided,
        Scenario::ShouldRoundTripEveryFieldKind,
        Scenario::ShouldNotBackfillDefaultsOnUpdate,
        Scenario::ShouldCountWithWhere,
        Scenario::ShouldRejectInWithoutList,
    ];

    pub const NUMBER_ID: &'static [Scenario] = &[
        Scenario::ShouldReturnANumberIdAsAResult,
        Scenario::ShouldIncrementTheIdBy1,
        Scenario::ShouldNotMatchANonNumericId,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::CreateModel => "create model",
            Scenario::CreateModelShouldAlwaysReturnAnId => {
                "create model should always return an id"
            }
            Scenario::FindModel => "find model",
            Scenario::FindModelWithoutId => "find model without id",
            Scenario::FindModelWithSelect => "find model with select",
            Scenario::FindModelWithModifiedFieldName => "find model with modified field name",
            Scenario::UpdateModel => "update model",
            Scenario::ShouldFindMany => "should find many",
            Scenario::ShouldFindManyWithWhere => "should find many with where",
            Scenario::ShouldFindManyWithOperators => "should find many with operators",
            Scenario::ShouldWorkWithReferenceFields => "should work with reference fields",
            Scenario::ShouldFindManyWithSortBy => "should find many with sortBy",
            Scenario::ShouldFindManyWithLimit => "should find many with limit",
            Scenario::ShouldFindManyWithOffset => "should find many with offset",
            Scenario::ShouldUpdateWithMultipleWhere => "should update with multiple where",
            Scenario::DeleteModel => "delete model",
            Scenario::ShouldDeleteMany => "should delete many",
            Scenario::ShouldNotThrowOnDeleteRecordNotFound => {
                "shouldn't throw on delete record not found"
            }
            Scenario::ShouldNotThrowOnRecordNotFound => "shouldn't throw on record not found",
            Scenario::ShouldFindManyWithContainsOperator => {
                "should find many with contains operator"
            }
            Scenario::ShouldSearchUsersWithStartsWith => "should search users with startsWith",
            Scenario::ShouldSearchUsersWithEndsWith => "should search users with endsWith",
            Scenario::ShouldPreferGenerateIdIfProvided => "should prefer generateId if provided",
            Scenario::ShouldRoundTripEveryFieldKind => "should round trip every field kind",
            Scenario::ShouldNotBackfillDefaultsOnUpdate => "should not backfill defaults on update",
            Scenario::ShouldCountWithWhere => "should count with where",
            Scenario::ShouldRejectInWithoutList => "should reject in without list",
            Scenario::ShouldReturnANumberIdAsAResult => "Should return a number id as a result",
            Scenario::ShouldIncrementTheIdBy1 => "Should increment the id by 1",
            Scenario::ShouldNotMatchANonNumericId => "Should not match a non numeric id",
        }
    }
}

impl Display for Scenario {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Factory<'f, D> = dyn Fn(AdapterOptions, &TraceSink) -> Result<Adapter<D>> + 'f;

/// State shared by the scenarios of one suite run.
pub(crate) struct Suite<'f, D: Driver> {
    factory: &'f Factory<'f, D>,
    pub(crate) sink: TraceSink,
    pub(crate) options: AdapterOptions,
    pub(crate) adapter: Adapter<D>,
    /// User created by the first scenario, used by the following ones.
    pub(crate) user: Option<Record>,
    pub(crate) last_number_id: Option<i64>,
    /// User ids to remove before the standard scenarios run.
    pub(crate) cleanup: Vec<String>,
}

impl<'f, D: Driver> Suite<'f, D> {
    pub(crate) fn new<F>(factory: &'f F, options: AdapterOptions) -> Result<Self>
    where
        F: Fn(AdapterOptions, &TraceSink) -> Result<Adapter<D>> + 'f,
    {
        let sink = TraceSink::new();
        let adapter = factory(options.clone(), &sink)?;
        Ok(Self {
            factory,
            sink,
            options,
            adapter,
            user: None,
            last_number_id: None,
            cleanup: Vec::new(),
        })
    }

    /// Another adapter over the same storage, with the suite options adjusted by `customize`.
    pub(crate) fn adapter_with(
        &self,
        customize: impl FnOnce(AdapterOptions) -> AdapterOptions,
    ) -> Result<Adapter<D>> {
        (self.factory)(customize(self.options.clone()), &self.sink)
    }

    pub(crate) fn user(&self) -> Result<&Record> {
        self.user
            .as_ref()
            .ok_or_else(|| anyhow!("No user was created by `{}`", Scenario::CreateModel))
    }

    pub(crate) fn user_id(&self) -> Result<String> {
        text(self.user()?, "id").map(ToString::to_string)
    }
}

/// String value of `key`, failing when absent or not a string.
pub(crate) fn text<'a>(record: &'a Record, key: &str) -> Result<&'a str> {
    match record.get(key) {
        Some(Value::Varchar(v)) => Ok(v),
        Some(v) => Err(anyhow!("Expected `{key}` to be a string, found {v:?}")),
        None => Err(anyhow!("Expected `{key}` in {record:?}")),
    }
}

pub(crate) async fn run<D: Driver>(scenario: Scenario, suite: &mut Suite<'_, D>) -> Result<()> {
    match scenario {
        Scenario::CreateModel => create::create_model(suite).await,
        Scenario::CreateModelShouldAlwaysReturnAnId => create::always_return_an_id(suite).await,
        Scenario::FindModel => find::find_model(suite).await,
        Scenario::FindModelWithoutId => find::find_model_without_id(suite).await,
        Scenario::FindModelWithSelect => find::find_model_with_select(suite).await,
        Scenario::FindModelWithModifiedFieldName => find::modified_field_name(suite).await,
        Scenario::UpdateModel => update::update_model(suite).await,
        Scenario::ShouldFindMany => find_many::find_many(suite).await,
        Scenario::ShouldFindManyWithWhere => find_many::with_where(suite).await,
        Scenario::ShouldFindManyWithOperators => find_many::with_operators(suite).await,
        #[cfg(not(feature = "disable-references"))]
        Scenario::ShouldWorkWithReferenceFields => references::reference_fields(suite).await,
        #[cfg(feature = "disable-references")]
        Scenario::ShouldWorkWithReferenceFields => Ok(()),
        #[cfg(not(feature = "disable-ordering"))]
        Scenario::ShouldFindManyWithSortBy => find_many::with_sort_by(suite).await,
        #[cfg(feature = "disable-ordering")]
        Scenario::ShouldFindManyWithSortBy => Ok(()),
        Scenario::ShouldFindManyWithLimit => find_many::with_limit(suite).await,
        Scenario::ShouldFindManyWithOffset => find_many::with_offset(suite).await,
        Scenario::ShouldUpdateWithMultipleWhere => update::multiple_where(suite).await,
        Scenario::DeleteModel => delete::delete_model(suite).await,
        Scenario::ShouldDeleteMany => delete::delete_many(suite).await,
        Scenario::ShouldNotThrowOnDeleteRecordNotFound => delete::delete_not_found(suite).await,
        Scenario::ShouldNotThrowOnRecordNotFound => find::record_not_found(suite).await,
        Scenario::ShouldFindManyWithContainsOperator => find_many::with_contains(suite).await,
        Scenario::ShouldSearchUsersWithStartsWith => find_many::with_starts_with(suite).await,
        Scenario::ShouldSearchUsersWithEndsWith => find_many::with_ends_with(suite).await,
        Scenario::ShouldPreferGenerateIdIfProvided => create::prefer_generate_id(suite).await,
        Scenario::ShouldRoundTripEveryFieldKind => kinds::round_trip(suite).await,
        Scenario::ShouldNotBackfillDefaultsOnUpdate => update::no_default_backfill(suite).await,
        Scenario::ShouldCountWithWhere => kinds::count_with_where(suite).await,
        Scenario::ShouldRejectInWithoutList => find_many::reject_in_without_list(suite).await,
        Scenario::ShouldReturnANumberIdAsAResult => number_id::return_number_id(suite).await,
        Scenario::ShouldIncrementTheIdBy1 => number_id::increment_by_one(suite).await,
        Scenario::ShouldNotMatchANonNumericId => number_id::non_numeric_id(suite).await,
    }
}
