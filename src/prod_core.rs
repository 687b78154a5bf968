use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::future::Future;

use crate::{
    backend::TaskBackend,
    core::Core,
    directory::{UserDirectory, UserId},
    envelope::{Envelope, ResponseCode},
    errors::{AppError, RequestError},
    model::{FinishStateResponse, TaskDoneResponse, TimedTaskRequest},
    token::{TokenCodec, Tutorial}
};

/// The request pipeline behind every endpoint: resolve the caller through
/// the user directory, optionally validate a time token, invoke the backend
/// operation, map its response into an envelope.
///
/// `UserNotFound` and `InvalidTimeToken` are handled here and become error
/// envelopes; backend faults propagate as [`AppError`] and surface as a
/// generic server fault at the axum boundary.
pub struct ProdCore<D: UserDirectory, B: TaskBackend> {
    pub directory: D,
    pub backend: B,
    pub codec: TokenCodec,
    pub tutorial: Tutorial,
    pub now: fn() -> DateTime<Utc>
}

impl<D, B> ProdCore<D, B>
where
    D: UserDirectory + Send + Sync,
    B: TaskBackend + Send + Sync
{
    pub async fn process<R, T, F, Fut, M>(
        &self,
        login: &str,
        call: F,
        map: M
    ) -> Result<Envelope<T>, AppError>
    where
        F: FnOnce(UserId) -> Fut,
        Fut: Future<Output = Result<R, RequestError>>,
        M: FnOnce(R) -> T
    {
        let Some(user) = self.directory.resolve(login).await? else {
            return Ok(Envelope::error(ResponseCode::UserNotFound));
        };

        let response = call(user).await?;

        Ok(Envelope::ok(map(response)))
    }

    pub async fn process_timed_task<R, T, F, Fut, M>(
        &self,
        login: &str,
        unit: i32,
        task: i32,
        request: &TimedTaskRequest,
        call: F,
        map: M
    ) -> Result<Envelope<T>, AppError>
    where
        F: FnOnce(UserId, TimeDelta) -> Fut,
        Fut: Future<Output = Result<R, RequestError>>,
        M: FnOnce(R) -> T
    {
        // identity first, then the token, then the backend; an invalid
        // token must never reach the backend
        let Some(user) = self.directory.resolve(login).await? else {
            return Ok(Envelope::error(ResponseCode::UserNotFound));
        };

        let Some(duration) = self.token_duration(
            &request.time_token, &user, unit, task
        ) else {
            return Ok(Envelope::error(ResponseCode::InvalidTimeToken));
        };

        let response = call(user, duration).await?;

        Ok(Envelope::ok(map(response)))
    }

    fn token_duration(
        &self,
        token: &str,
        user: &UserId,
        unit: i32,
        task: i32
    ) -> Option<TimeDelta>
    {
        let payload = match self.codec.decode(token) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(
                    token,
                    user = %user,
                    error = %err,
                    "can't decode time token"
                );
                return None;
            }
        };

        if payload.tutorial != self.tutorial
            || payload.unit != unit
            || payload.task != task
        {
            return None;
        }

        let span = (self.now)() - payload.start;

        // Exactly zero is degenerate and rejected. A negative span (start
        // in the future) is deliberately left through; see DESIGN.md.
        if span.is_zero() { None } else { Some(span) }
    }
}

#[async_trait]
impl<D, B> Core for ProdCore<D, B>
where
    D: UserDirectory + Send + Sync,
    B: TaskBackend + Send + Sync
{
    async fn finish_state(
        &self,
        login: &str,
        unit: Option<i32>
    ) -> Result<Envelope<FinishStateResponse>, AppError>
    {
        self.process(
            login,
            |user| async move {
                self.backend.finish_state(&user, unit).await
            },
            FinishStateResponse::from
        ).await
    }

    async fn complete_task(
        &self,
        login: &str,
        unit: i32,
        task: i32,
        request: &TimedTaskRequest
    ) -> Result<Envelope<TaskDoneResponse>, AppError>
    {
        self.process_timed_task(
            login,
            unit,
            task,
            request,
            |user, duration| async move {
                self.backend.complete_task(&user, unit, task, duration).await
            },
            TaskDoneResponse::from
        ).await
    }
}
