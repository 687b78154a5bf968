use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    envelope::Envelope,
    errors::AppError,
    model::{FinishStateResponse, TaskDoneResponse, TimedTaskRequest}
};

#[async_trait]
pub trait Core {
    async fn finish_state(
        &self,
        _login: &str,
        _unit: Option<i32>
    ) -> Result<Envelope<FinishStateResponse>, AppError>
    {
        unimplemented!();
    }

    async fn complete_task(
        &self,
        _login: &str,
        _unit: i32,
        _task: i32,
        _request: &TimedTaskRequest
    ) -> Result<Envelope<TaskDoneResponse>, AppError>
    {
        unimplemented!();
    }
}

pub type CoreArc = Arc<dyn Core + Send + Sync>;
