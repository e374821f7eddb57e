use crate::client::ConsoleClient;
use api_contract::SystemStatsDto;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// 首页统计轮询；立即拉取一次，之后按固定间隔。丢弃即停止。
pub struct StatsPoller {
    handle: JoinHandle<()>,
    receiver: watch::Receiver<Option<SystemStatsDto>>,
}

impl StatsPoller {
    pub fn spawn(client: Arc<ConsoleClient>, every: Duration) -> Self {
        let (sender, receiver) = watch::channel(None);
        let handle = tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match client.system_stats().await {
                    Ok(stats) => {
                        debug!(rpm = stats.rpm, "system stats refreshed");
                        sender.send_replace(Some(stats));
                    }
                    Err(err) => warn!(error = %err, "system stats poll failed"),
                }
            }
        });
        Self { handle, receiver }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<SystemStatsDto>> {
        self.receiver.clone()
    }

    pub fn latest(&self) -> Option<SystemStatsDto> {
        self.receiver.borrow().clone()
    }
}

impl Drop for StatsPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
