use crate::ClientError;
use api_contract::{ApiResponse, OptionDto, RankingDto, SystemStatsDto, UpdateOptionRequest};
use futures::future::join_all;
use relay_settings::{ChangedField, EditSession, SettingsBag};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::{info, warn};

pub struct ConsoleClient {
    http: Client,
    base_url: String,
    admin_token: Option<String>,
}

impl ConsoleClient {
    pub fn new(base_url: impl Into<String>, admin_token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            admin_token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.admin_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .authorized(self.http.get(self.url(path)))
            .send()
            .await?;
        let body: ApiResponse<T> = response.json().await?;
        if let Some(message) = body.error_message() {
            return Err(ClientError::Api(message));
        }
        body.data
            .ok_or_else(|| ClientError::Api(format!("{path} returned no data")))
    }

    /// 读取设置项，只保留分组倍率页管理的键。
    pub async fn fetch_options(&self) -> Result<SettingsBag, ClientError> {
        let options: Vec<OptionDto> = self.get_data("/api/option").await?;
        Ok(SettingsBag::from_options(
            options.into_iter().map(|option| (option.key, option.value)),
        ))
    }

    pub async fn ranking(&self) -> Result<RankingDto, ClientError> {
        self.get_data("/api/log/ranking").await
    }

    pub async fn system_stats(&self) -> Result<SystemStatsDto, ClientError> {
        self.get_data("/api/system/stats").await
    }

    async fn put_option(&self, field: &ChangedField) -> Result<(), String> {
        let body = UpdateOptionRequest::new(field.key.clone(), field.wire_value());
        let response = self
            .authorized(self.http.put(self.url("/api/option")))
            .json(&body)
            .send()
            .await
            .map_err(|err| format!("{}: {err}", field.key))?;
        let result: ApiResponse<serde::de::IgnoredAny> = response
            .json()
            .await
            .map_err(|err| format!("{}: {err}", field.key))?;
        match result.error_message() {
            Some(message) => Err(format!("{}: {message}", field.key)),
            None => Ok(()),
        }
    }

    /// 校验并并发保存所有改动，全部成功后提交会话并调用 `refresh`。
    ///
    /// 返回保存的字段数。任一请求失败时会话保持原样，错误汇总为一条 `Save`。
    pub async fn submit<F, Fut>(
        &self,
        session: &mut EditSession,
        refresh: F,
    ) -> Result<usize, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        session.validate()?;
        let changes = session.changes();
        if changes.is_empty() {
            return Err(ClientError::NothingChanged);
        }

        let results = join_all(changes.iter().map(|field| self.put_option(field))).await;
        let failures: Vec<String> = results.into_iter().filter_map(Result::err).collect();
        if !failures.is_empty() {
            warn!(failed = failures.len(), total = changes.len(), "option save failed");
            return Err(ClientError::Save(failures.join("; ")));
        }

        info!(saved = changes.len(), "options saved");
        session.commit();
        refresh().await;
        Ok(changes.len())
    }
}
