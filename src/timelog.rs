use async_trait::async_trait;
use chrono::TimeDelta;
use reqwest::{
    Client, StatusCode,
    header::ACCEPT
};
use serde::Serialize;

use crate::{
    backend::{FinishStateInfo, TaskBackend, TaskCompletion},
    directory::UserId,
    errors::RequestError
};

const MIME_JSON: &str = "application/json";

const FINISH_STATE_ENDPOINT: &str = "/tasks/finish-state";
const COMPLETE_ENDPOINT: &str = "/tasks/complete";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FinishStateParams<'a> {
    user_id: &'a UserId,
    unit: Option<i32>
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompleteParams<'a> {
    user_id: &'a UserId,
    unit: i32,
    task: i32,
    duration_ms: i64
}

/// HTTP client for the task-timing backend.
pub struct TimeLogClient {
    client: Client,
    finish_state_url: String,
    complete_url: String
}

impl TimeLogClient {
    pub fn new(url: &str) -> TimeLogClient {
        TimeLogClient {
            client: Client::builder().build().unwrap(),
            finish_state_url: url.to_string() + FINISH_STATE_ENDPOINT,
            complete_url: url.to_string() + COMPLETE_ENDPOINT
        }
    }

    async fn post<P, R>(&self, url: &str, params: &P) -> Result<R, RequestError>
    where
        P: Serialize + Sync,
        R: serde::de::DeserializeOwned
    {
        let response = self.client.post(url)
            .json(params)
            .header(ACCEPT, MIME_JSON)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(RequestError::HttpError(
                response.status().as_u16(),
                response.text().await.unwrap_or_else(|e| e.to_string())
            ));
        }

        Ok(response.json::<R>().await?)
    }
}

#[async_trait]
impl TaskBackend for TimeLogClient {
    async fn finish_state(
        &self,
        user: &UserId,
        unit: Option<i32>
    ) -> Result<Vec<FinishStateInfo>, RequestError>
    {
        self.post(
            &self.finish_state_url,
            &FinishStateParams { user_id: user, unit }
        ).await
    }

    async fn complete_task(
        &self,
        user: &UserId,
        unit: i32,
        task: i32,
        duration: TimeDelta
    ) -> Result<TaskCompletion, RequestError>
    {
        self.post(
            &self.complete_url,
            &CompleteParams {
                user_id: user,
                unit,
                task,
                duration_ms: duration.num_milliseconds()
            }
        ).await
    }
}
