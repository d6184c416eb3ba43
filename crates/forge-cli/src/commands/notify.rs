use clap::Args;
use forge_core::{ConfigProvider, ForgeConfig, SharedConfigProvider};
use forge_notifications::{NotificationPayload, NotificationService, OwnerNotifier};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Args)]
pub struct NotifyCommand {
    /// Notification title
    #[arg(long)]
    pub title: String,

    /// Notification body
    #[arg(long)]
    pub content: String,

    /// Base URL of the Forge API
    #[arg(long, env = "BUILT_IN_FORGE_API_URL", default_value = "")]
    pub forge_api_url: String,

    /// API key for the Forge API
    #[arg(
        long,
        env = "BUILT_IN_FORGE_API_KEY",
        default_value = "",
        hide_env_values = true
    )]
    pub forge_api_key: String,
}

impl NotifyCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        let delivered = rt.block_on(self.run())?;

        if !delivered {
            anyhow::bail!("Notification was not delivered, see the log for details");
        }

        println!("Notification delivered");
        Ok(())
    }

    /// Validate and send; `Ok(false)` when the Forge API could not be reached
    /// or refused the notification.
    pub async fn run(self) -> anyhow::Result<bool> {
        let config = SharedConfigProvider::new(ForgeConfig::new(
            self.forge_api_url,
            self.forge_api_key,
        ));
        debug!("Using {:?}", config.current());

        let notifier: Arc<dyn OwnerNotifier> =
            Arc::new(NotificationService::new(Arc::new(config))?);
        let delivered = notifier
            .notify_owner(NotificationPayload::new(self.title, self.content))
            .await?;

        info!("Notification delivery result: {}", delivered);
        Ok(delivered)
    }
}
