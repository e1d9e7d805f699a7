use super::{Suite, text};
use anyhow::{Context, ensure};
use serde_json::json;
use time::macros::datetime;
use unadapter::{Driver, Result, Value, Where, record};

pub(super) async fn round_trip<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let updated_at = datetime!(2024-05-01 10:30:00 UTC);
    let payload = json!({ "theme": "dark", "tags": ["a", "b"], "size": 3 });
    let created = suite
        .adapter
        .create(
            "preference",
            record! {
                "label" => "round-trip",
                "priority" => 7,
                "enabled" => false,
                "updatedAt" => updated_at,
                "payload" => payload.clone(),
            },
            &[],
        )
        .await?;
    ensure!(
        created.get("priority") == Some(&Value::Int64(7))
            && created.get("enabled") == Some(&Value::Boolean(false))
            && created.get("updatedAt") == Some(&Value::TimestampWithTimezone(updated_at))
            && created.get("payload") == Some(&Value::Json(payload)),
        "The created preference changed its values: {created:?}"
    );
    let id = text(&created, "id")?;
    let found = suite
        .adapter
        .find_one("preference", &[Where::eq("id", id)], &[])
        .await?
        .context("The preference was not found by id")?;
    ensure!(found == created, "Expected {created:?}, found {found:?}");
    Ok(())
}

pub(super) async fn count_with_where<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    for priority in [1, 2] {
        suite
            .adapter
            .create(
                "preference",
                record! { "label" => "counted", "priority" => priority },
                &[],
            )
            .await?;
    }
    let filter = [Where::eq("label", "counted")];
    let counted = suite.adapter.count("preference", Some(&filter[..])).await?;
    ensure!(counted == 2, "Expected 2 preferences, found {counted}");
    let total = suite.adapter.count("preference", None).await?;
    ensure!(
        total > counted,
        "Expected the unfiltered count to exceed {counted}, found {total}"
    );
    Ok(())
}
