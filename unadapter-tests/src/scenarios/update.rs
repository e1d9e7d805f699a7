use super::{Suite, text};
use anyhow::{Context, ensure};
use unadapter::{Driver, Result, Value, Where, record};

pub(super) async fn update_model<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let id = suite.user_id()?;
    let updated = suite
        .adapter
        .update(
            "user",
            &[Where::eq("id", id)],
            record! { "email" => "updated@email.com" },
        )
        .await?
        .context("The update did not return the user")?;
    let name = text(suite.user()?, "name")?;
    ensure!(
        text(&updated, "email")? == "updated@email.com" && text(&updated, "name")? == name,
        "Unexpected user after the update {updated:?}"
    );
    if let Some(user) = suite.user.as_mut() {
        user.insert("email".into(), "updated@email.com".into());
    }
    Ok(())
}

pub(super) async fn multiple_where<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let user = suite.user()?;
    let name = text(user, "name")?.to_string();
    let email = text(user, "email")?.to_string();
    let updated = suite
        .adapter
        .update_many(
            "user",
            &[Where::eq("name", name.as_str()), Where::eq("email", email)],
            record! { "email" => "updated@email.com" },
        )
        .await?;
    ensure!(updated == 1, "Expected 1 updated user, found {updated}");
    let found = suite
        .adapter
        .find_one("user", &[Where::eq("email", "updated@email.com")], &[])
        .await?
        .context("The updated user was not found")?;
    ensure!(
        text(&found, "name")? == name,
        "Unexpected user after the update {found:?}"
    );
    Ok(())
}

pub(super) async fn no_default_backfill<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let created = suite
        .adapter
        .create(
            "preference",
            record! {
                "label" => "isolation",
                "priority" => 5,
                "enabled" => false,
            },
            &[],
        )
        .await?;
    let id = text(&created, "id")?;
    let updated = suite
        .adapter
        .update(
            "preference",
            &[Where::eq("id", id)],
            record! { "label" => "isolated" },
        )
        .await?
        .context("The update did not return the preference")?;
    ensure!(
        updated.get("priority") == Some(&Value::Int64(5)),
        "Priority was reset by the update: {updated:?}"
    );
    ensure!(
        updated.get("enabled") == Some(&Value::Boolean(false)),
        "Enabled was reset by the update: {updated:?}"
    );
    ensure!(
        text(&updated, "label")? == "isolated",
        "Label was not updated: {updated:?}"
    );
    let defaults = suite
        .adapter
        .create("preference", record! { "label" => "defaults" }, &[])
        .await?;
    ensure!(
        defaults.get("priority") == Some(&Value::Int64(0))
            && defaults.get("enabled") == Some(&Value::Boolean(true)),
        "Defaults were not applied on create: {defaults:?}"
    );
    Ok(())
}
