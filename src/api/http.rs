//! HTTP implementation of the [`LeaveApi`] collaborator.
//!
//! Mirrors the behavior of the front end's axios client: a bearer token is
//! attached to every request, server error bodies are reduced to their
//! `message`, and connection failures surface as a network-error notice.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{HolidayRecord, LeavePolicy};

use super::client::{
    AdjacentLeave, ApiEnvelope, BulkSaveOutcome, FloaterDay, HolidayBulkPayload, LeaveApi,
    LeaveRequestPayload, WorkingDaysReport,
};

/// A reqwest-backed client for the leave backend.
///
/// # Example
///
/// ```no_run
/// use leave_engine::api::HttpLeaveApi;
///
/// let api = HttpLeaveApi::new("https://hr.example.com/api")
///     .with_token("eyJhbGciOi...");
/// ```
#[derive(Debug, Clone)]
pub struct HttpLeaveApi {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpLeaveApi {
    /// Creates a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpLeaveApi {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: None,
        }
    }

    /// Attaches the session's bearer token to every subsequent request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> EngineResult<ApiEnvelope<T>> {
        let status = response.status();
        if !status.is_success() {
            // Server responded with an error status; prefer its own message.
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .get("message")
                .or_else(|| body.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            return Err(EngineError::Api { message });
        }

        Ok(response.json::<ApiEnvelope<T>>().await?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> EngineResult<ApiEnvelope<T>> {
        debug!(path, "GET request to leave backend");
        let request = self.authorize(self.client.get(self.url(path)).query(query));
        Self::read_envelope(request.send().await?).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> EngineResult<ApiEnvelope<T>> {
        debug!(path, "POST request to leave backend");
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        Self::read_envelope(request.send().await?).await
    }
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn range_query(start: NaiveDate, end: NaiveDate) -> [(&'static str, String); 2] {
    [("startDate", iso(start)), ("endDate", iso(end))]
}

#[async_trait]
impl LeaveApi for HttpLeaveApi {
    async fn get_working_days(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<WorkingDaysReport> {
        self.get_json("/leave/working-days", &range_query(start, end))
            .await?
            .into_result()
    }

    async fn check_floater_available(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<FloaterDay>> {
        self.get_json("/leave/floater-available", &range_query(start, end))
            .await?
            .into_result()
    }

    async fn get_leave_on_days(&self, start: NaiveDate, end: NaiveDate) -> EngineResult<String> {
        let envelope: ApiEnvelope<Value> = self
            .get_json("/leave/on-days", &range_query(start, end))
            .await?;
        if envelope.success {
            Ok(envelope.message.unwrap_or_default())
        } else {
            envelope.ack().map(|_| String::new())
        }
    }

    async fn get_before_after_leave(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AdjacentLeave>> {
        self.get_json("/leave/before-after", &range_query(start, end))
            .await?
            .into_result()
    }

    async fn get_policy_types(&self) -> EngineResult<Vec<LeavePolicy>> {
        self.get_json("/policy/types", &[]).await?.into_result()
    }

    async fn create_leave_request(&self, payload: LeaveRequestPayload) -> EngineResult<()> {
        self.post_json::<_, Value>("/leave/request", &payload)
            .await?
            .ack()
    }

    async fn get_all_holidays(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<HolidayRecord>> {
        self.get_json("/holiday/all", &range_query(start, end))
            .await?
            .into_result()
    }

    async fn insert_holiday_bulk(
        &self,
        payload: HolidayBulkPayload,
    ) -> EngineResult<BulkSaveOutcome> {
        self.post_json("/holiday/bulk", &payload)
            .await?
            .into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let api = HttpLeaveApi::new("https://hr.example.com/api/");
        assert_eq!(
            api.url("/leave/working-days"),
            "https://hr.example.com/api/leave/working-days"
        );
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = HttpLeaveApi::new("https://hr.example.com/api");
        assert_eq!(api.url("policy/types"), "https://hr.example.com/api/policy/types");
    }

    #[test]
    fn test_range_query_uses_iso_dates() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        let query = range_query(start, end);

        assert_eq!(query[0], ("startDate", "2025-06-02".to_string()));
        assert_eq!(query[1], ("endDate", "2025-06-04".to_string()));
    }
}
