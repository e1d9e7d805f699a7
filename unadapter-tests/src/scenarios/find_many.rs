use super::{Suite, text};
use anyhow::{Context, ensure};
use time::OffsetDateTime;
use unadapter::{
    Driver, ErrorKind, FindMany, Operator, Result, Value, Where, error_kind, record,
};

async fn count_users<D: Driver>(suite: &Suite<'_, D>, query: FindMany) -> Result<usize> {
    Ok(suite.adapter.find_many("user", query).await?.len())
}

pub(super) async fn find_many<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let found = count_users(suite, FindMany::new()).await?;
    ensure!(found == 3, "Expected 3 users, found {found}");
    Ok(())
}

pub(super) async fn with_where<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let now = OffsetDateTime::now_utc();
    let user = suite
        .adapter
        .create(
            "user",
            record! {
                "name" => "user2",
                "email" => "test@email.com",
                "emailVerified" => true,
                "createdAt" => now,
                "updatedAt" => now,
            },
            &[],
        )
        .await?;
    let id = text(&user, "id")?;
    let found = count_users(suite, FindMany::new().filter(vec![Where::eq("id", id)])).await?;
    ensure!(found == 1, "Expected 1 user, found {found}");
    Ok(())
}

pub(super) async fn with_operators<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let now = OffsetDateTime::now_utc();
    let user = suite
        .adapter
        .create(
            "user",
            record! {
                "name" => "user",
                "email" => "test-email2@email.com",
                "emailVerified" => true,
                "createdAt" => now,
                "updatedAt" => now,
            },
            &[],
        )
        .await?;
    let ids = vec![suite.user_id()?, text(&user, "id")?.to_string()];
    let found = count_users(
        suite,
        FindMany::new().filter(vec![Where::new("id", Operator::In, ids)]),
    )
    .await?;
    ensure!(found == 2, "Expected 2 users, found {found}");
    Ok(())
}

#[cfg(not(feature = "disable-ordering"))]
pub(super) async fn with_sort_by<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    use unadapter::SortBy;
    let now = OffsetDateTime::now_utc();
    suite
        .adapter
        .create(
            "user",
            record! {
                "name" => "a",
                "email" => "a@email.com",
                "emailVerified" => true,
                "createdAt" => now,
                "updatedAt" => now,
            },
            &[],
        )
        .await?;
    let ascending = suite
        .adapter
        .find_many("user", FindMany::new().sort_by(SortBy::asc("name")))
        .await?;
    let first = ascending.first().context("No user returned")?;
    ensure!(text(first, "name")? == "a", "Expected `a` first, found {first:?}");
    let descending = suite
        .adapter
        .find_many("user", FindMany::new().sort_by(SortBy::desc("name")))
        .await?;
    let last = descending.last().context("No user returned")?;
    ensure!(text(last, "name")? == "a", "Expected `a` last, found {last:?}");
    Ok(())
}

pub(super) async fn with_limit<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let found = count_users(suite, FindMany::new().limit(1)).await?;
    ensure!(found == 1, "Expected 1 user, found {found}");
    Ok(())
}

pub(super) async fn with_offset<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let total = suite.adapter.count("user", None).await? as usize;
    let found = count_users(suite, FindMany::new().offset(2)).await?;
    ensure!(
        found == total.saturating_sub(2),
        "Expected {} users, found {found}",
        total.saturating_sub(2)
    );
    #[cfg(not(feature = "disable-ordering"))]
    ensure!(found == 4, "Expected 4 users, found {found}");
    Ok(())
}

async fn search<D: Driver>(
    suite: &Suite<'_, D>,
    operator: Operator,
    value: &str,
) -> Result<usize> {
    count_users(
        suite,
        FindMany::new().filter(vec![Where::new("name", operator, value)]),
    )
    .await
}

pub(super) async fn with_contains<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let found = search(suite, Operator::Contains, "user2").await?;
    ensure!(found == 1, "Expected 1 user, found {found}");
    Ok(())
}

pub(super) async fn with_starts_with<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let found = search(suite, Operator::StartsWith, "us").await?;
    ensure!(found == 2, "Expected 2 users, found {found}");
    Ok(())
}

pub(super) async fn with_ends_with<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let found = search(suite, Operator::EndsWith, "er2").await?;
    ensure!(found == 1, "Expected 1 user, found {found}");
    Ok(())
}

pub(super) async fn reject_in_without_list<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let result = suite
        .adapter
        .find_many(
            "user",
            FindMany::new().filter(vec![Where::new("id", Operator::In, Value::from("1"))]),
        )
        .await;
    match result {
        Ok(rows) => anyhow::bail!("Expected a type mismatch, found {} rows", rows.len()),
        Err(e) => ensure!(
            error_kind(&e) == Some(ErrorKind::TypeMismatch),
            "Expected a type mismatch, found {e:#}"
        ),
    }
    Ok(())
}
