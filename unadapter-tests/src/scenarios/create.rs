use super::{Suite, text};
use anyhow::ensure;
use time::OffsetDateTime;
use unadapter::{Driver, GenerateId, Result, Value, record};

pub(super) async fn create_model<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let now = OffsetDateTime::now_utc();
    let user = suite
        .adapter
        .create(
            "user",
            record! {
                "name" => "user",
                "email" => "user@email.com",
                "emailVerified" => true,
                "createdAt" => now,
                "updatedAt" => now,
            },
            &[],
        )
        .await?;
    ensure!(text(&user, "name")? == "user", "Unexpected name in {user:?}");
    ensure!(
        text(&user, "email")? == "user@email.com",
        "Unexpected email in {user:?}"
    );
    suite.user = Some(user);
    Ok(())
}

pub(super) async fn always_return_an_id<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let user = suite
        .adapter
        .create(
            "user",
            record! {
                "name" => "test-name-without-id",
                "email" => "test-email-without-id@email.com",
            },
            &[],
        )
        .await?;
    let id = text(&user, "id")?;
    ensure!(!id.is_empty(), "The returned id is empty");
    Ok(())
}

pub(super) async fn prefer_generate_id<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let adapter = suite
        .adapter_with(|o| o.with_generate_id(GenerateId::custom(|_| "mocked-id".into())))?;
    let user = adapter
        .create(
            "user",
            record! {
                "name" => "user4",
                "email" => "user4@email.com",
                "emailVerified" => true,
            },
            &[],
        )
        .await?;
    ensure!(
        user.get("id") == Some(&Value::Varchar("mocked-id".into())),
        "Expected the generated id to be `mocked-id`, found {:?}",
        user.get("id")
    );
    Ok(())
}
