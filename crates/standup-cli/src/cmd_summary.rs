use standup_core::Zone;
use standup_digest::compose;
use standup_serve::AppConfig;
use standup_store::ActivityStore;

pub fn execute(config: AppConfig, date: Option<&str>, dry_run: bool) -> anyhow::Result<()> {
    let store = ActivityStore::open_or_create(&config.db_path)?;
    let zone = Zone::resolve(&config.timezone);
    let date = date.map(str::to_string).unwrap_or_else(|| zone.today());
    let outcome = compose(&store, &date);

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else {
        match &config.slack_webhook_url {
            Some(url) => standup_notify::post(url, &outcome.report)?,
            None => anyhow::bail!(
                "no Slack webhook configured (set --slack-webhook-url or SLACK_WEBHOOK_URL)"
            ),
        }
    }

    if !outcome.failures.is_empty() {
        anyhow::bail!(
            "digest is partial; failed categories: {}",
            outcome.failed_categories().join(", ")
        );
    }
    Ok(())
}
