use crate::ClientError;
use crate::client::ConsoleClient;
use api_contract::RankingDto;
use tracing::warn;

/// 排行榜展示状态：刷新失败时继续展示上一次成功的数据。
#[derive(Debug, Default)]
pub struct RankingBoard {
    data: RankingDto,
    last_error: Option<String>,
}

impl RankingBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &RankingDto {
        &self.data
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// 返回本次刷新是否成功。
    pub async fn refresh(&mut self, client: &ConsoleClient) -> bool {
        match client.ranking().await {
            Ok(data) => {
                self.data = data;
                self.last_error = None;
                true
            }
            Err(err) => {
                warn!(error = %err, "ranking refresh failed, keeping previous data");
                self.last_error = Some(error_text(&err));
                false
            }
        }
    }
}

fn error_text(err: &ClientError) -> String {
    match err {
        ClientError::Api(message) => message.clone(),
        other => other.to_string(),
    }
}
