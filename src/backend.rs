use async_trait::async_trait;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::{
    directory::UserId,
    errors::RequestError
};

/// Finish state of one unit as reported by the task backend.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishStateInfo {
    pub unit: i32,
    pub finished_tasks: Vec<i32>
}

/// Result of logging a completed timed task.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletion {
    pub unit: i32,
    pub task: i32,
    pub progress: i32
}

#[async_trait]
pub trait TaskBackend {
    async fn finish_state(
        &self,
        _user: &UserId,
        _unit: Option<i32>
    ) -> Result<Vec<FinishStateInfo>, RequestError>
    {
        unimplemented!();
    }

    async fn complete_task(
        &self,
        _user: &UserId,
        _unit: i32,
        _task: i32,
        _duration: TimeDelta
    ) -> Result<TaskCompletion, RequestError>
    {
        unimplemented!();
    }
}
