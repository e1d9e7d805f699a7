use super::{Suite, text};
use anyhow::{Context, ensure};
use time::OffsetDateTime;
use unadapter::{Driver, Result, Where, record};

pub(super) async fn find_model<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let id = suite.user_id()?;
    let found = suite
        .adapter
        .find_one("user", &[Where::eq("id", id)], &[])
        .await?
        .context("The created user was not found by id")?;
    let user = suite.user()?;
    ensure!(
        text(&found, "name")? == text(user, "name")?
            && text(&found, "email")? == text(user, "email")?,
        "Expected {user:?}, found {found:?}"
    );
    Ok(())
}

pub(super) async fn find_model_without_id<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let user = suite.user()?;
    let email = text(user, "email")?;
    let found = suite
        .adapter
        .find_one("user", &[Where::eq("email", email)], &[])
        .await?
        .context("The created user was not found by email")?;
    ensure!(
        text(&found, "name")? == text(user, "name")?,
        "Expected {user:?}, found {found:?}"
    );
    Ok(())
}

pub(super) async fn find_model_with_select<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let id = suite.user_id()?;
    let found = suite
        .adapter
        .find_one("user", &[Where::eq("id", id)], &["email"])
        .await?
        .context("The created user was not found by id")?;
    let email = text(suite.user()?, "email")?;
    ensure!(
        found == record! { "email" => email },
        "Expected only the email, found {found:?}"
    );
    Ok(())
}

pub(super) async fn modified_field_name<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let email = "test-email-with-modified-field@email.com";
    let adapter = suite.adapter_with(|o| o.with_field_name("user", "email", "email_address"))?;
    let now = OffsetDateTime::now_utc();
    let user = adapter
        .create(
            "user",
            record! {
                "email" => email,
                "name" => "test-name-with-modified-field",
                "emailVerified" => true,
                "createdAt" => now,
                "updatedAt" => now,
            },
            &[],
        )
        .await?;
    ensure!(text(&user, "email")? == email, "Unexpected email in {user:?}");
    let found = adapter
        .find_one("user", &[Where::eq("email", email)], &[])
        .await?
        .context("The user with a renamed email field was not found")?;
    ensure!(text(&found, "email")? == email, "Unexpected email in {found:?}");
    Ok(())
}

pub(super) async fn record_not_found<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let found = suite
        .adapter
        .find_one("user", &[Where::eq("id", "100000")], &[])
        .await?;
    ensure!(found.is_none(), "Expected nothing, found {found:?}");
    Ok(())
}
