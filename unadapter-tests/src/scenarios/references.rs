use super::{Suite, text};
use anyhow::{Context, ensure};
use unadapter::{Driver, FindMany, Result, Where, record};

pub(super) async fn reference_fields<D: Driver>(suite: &mut Suite<'_, D>) -> Result<()> {
    let user_id = suite.user_id()?;
    let account = suite
        .adapter
        .create(
            "account",
            record! {
                "accountId" => "github-1",
                "providerId" => "github",
                "userId" => user_id.as_str(),
            },
            &[],
        )
        .await?;
    ensure!(
        text(&account, "userId")? == user_id,
        "The reference was not returned as the user id: {account:?}"
    );
    let found = suite
        .adapter
        .find_many(
            "account",
            FindMany::new().filter(vec![Where::eq("userId", user_id.as_str())]),
        )
        .await?;
    ensure!(found.len() == 1, "Expected 1 account, found {}", found.len());
    let found = suite
        .adapter
        .find_one("account", &[Where::eq("userId", user_id.as_str())], &[])
        .await?
        .context("The account was not found by user id")?;
    ensure!(
        text(&found, "id")? == text(&account, "id")?,
        "Expected {account:?}, found {found:?}"
    );
    Ok(())
}
