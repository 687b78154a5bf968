use axum::{
    extract::{Path, State},
    response::Json
};
use std::ops::RangeInclusive;

use crate::{
    core::CoreArc,
    envelope::Envelope,
    errors::AppError,
    extractors::AuthUser,
    model::{
        FinishStateRequest, FinishStateResponse, TaskDoneResponse,
        TimedTaskRequest
    }
};

// units and tasks the tutorial actually has
const UNIT_RANGE: RangeInclusive<i32> = 1..=5;
const TASK_RANGE: RangeInclusive<i32> = 1..=5;

pub async fn root_get() -> &'static str {
    "ok"
}

pub async fn state_post(
    AuthUser(login): AuthUser,
    State(core): State<CoreArc>,
    Json(request): Json<FinishStateRequest>
) -> Result<Envelope<FinishStateResponse>, AppError>
{
    if request.unit.is_some_and(|unit| !UNIT_RANGE.contains(&unit)) {
        return Err(AppError::MalformedQuery);
    }

    core.finish_state(&login, request.unit).await
}

pub async fn task_unit_task_post(
    AuthUser(login): AuthUser,
    Path((unit, task)): Path<(i32, i32)>,
    State(core): State<CoreArc>,
    Json(request): Json<TimedTaskRequest>
) -> Result<Envelope<TaskDoneResponse>, AppError>
{
    if !UNIT_RANGE.contains(&unit) || !TASK_RANGE.contains(&task) {
        return Err(AppError::MalformedQuery);
    }

    core.complete_task(&login, unit, task, &request).await
}
