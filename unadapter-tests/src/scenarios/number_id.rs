use super::{Suite, text};
use anyhow::{Context, ensure};
use time::OffsetDateTime;
use unadapter::{Driver, Record, Result, Where, record};

async fn create_user<D: Driver>(suite: &mut Suite<'_, D>, name: &str) -> Result<i64> {
    let now = OffsetDateTime::now_utc();
    let user: Record = suite
        .adapter
        .create(
            "user",
            record! {
                "name" => name,
                "email" => format!("{name}@number-id.com"),
                "emailVerified" => true,
                "createdAt" => now,
                "updatedAt" => now,
            },
            &[],
        )
        .await?;
    let id = text(&user, "id")?;
    let number = id
        .parse::<i64>()
        .with_context(|| format!("The id `{id}` is not a number"))?;
    suite.cleanup.push(id.to_string());
    Ok(number)
}

pub(super) async fn return_number_id<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let id = create_user(suite, "number-id-1").await?;
    ensure!(id > 0, "Expected a positive id, found {id}");
    suite.last_number_id = Some(id);
    Ok(())
}

pub(super) async fn increment_by_one<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let last = suite
        .last_number_id
        .context("No numeric id was returned by a previous scenario")?;
    let id = create_user(suite, "number-id-2").await?;
    ensure!(id == last + 1, "Expected the id {}, found {id}", last + 1);
    suite.last_number_id = Some(id);
    Ok(())
}

pub(super) async fn non_numeric_id<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let filter = [Where::eq("id", "not-a-number")];
    let before = suite.adapter.count("user", None).await?;
    let found = suite.adapter.find_one("user", &filter, &[]).await?;
    ensure!(found.is_none(), "A non numeric id matched {found:?}");
    suite.adapter.delete("user", &filter).await?;
    let after = suite.adapter.count("user", None).await?;
    ensure!(before == after, "Expected {before} users, found {after}");
    Ok(())
}
