use super::Suite;
use anyhow::ensure;
use time::OffsetDateTime;
use unadapter::{Driver, FindMany, Result, Where, record};

pub(super) async fn delete_model<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let id = suite.user_id()?;
    let filter = [Where::eq("id", id)];
    suite.adapter.delete("user", &filter).await?;
    // A second delete must be a no-op
    suite.adapter.delete("user", &filter).await?;
    let found = suite.adapter.find_one("user", &filter, &[]).await?;
    ensure!(found.is_none(), "The user is still there: {found:?}");
    Ok(())
}

pub(super) async fn delete_many<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    for i in ["to-be-delete-1", "to-be-delete-2", "to-be-delete-3"] {
        let now = OffsetDateTime::now_utc();
        suite
            .adapter
            .create(
                "user",
                record! {
                    "name" => "to-be-deleted",
                    "email" => format!("email@test-{i}.com"),
                    "emailVerified" => true,
                    "createdAt" => now,
                    "updatedAt" => now,
                },
                &[],
            )
            .await?;
    }
    let filter = vec![Where::eq("name", "to-be-deleted")];
    let found = suite
        .adapter
        .find_many("user", FindMany::new().filter(filter.clone()))
        .await?;
    ensure!(found.len() == 3, "Expected 3 users, found {}", found.len());
    let deleted = suite.adapter.delete_many("user", &filter).await?;
    ensure!(deleted == 3, "Expected 3 deleted users, found {deleted}");
    let found = suite
        .adapter
        .find_many("user", FindMany::new().filter(filter))
        .await?;
    ensure!(found.is_empty(), "Expected no users, found {}", found.len());
    Ok(())
}

pub(super) async fn delete_not_found<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    suite
        .adapter
        .delete("user", &[Where::eq("id", "100000")])
        .await
}
