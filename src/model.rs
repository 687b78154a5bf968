use serde::{Deserialize, Serialize};

use crate::backend::{FinishStateInfo, TaskCompletion};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishStateRequest {
    pub unit: Option<i32>
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedTaskRequest {
    pub time_token: String
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitState {
    pub unit: i32,
    pub finished_tasks: Vec<i32>
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishStateResponse {
    pub units: Vec<UnitState>
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDoneResponse {
    pub unit: i32,
    pub task: i32,
    pub progress: i32
}

impl From<Vec<FinishStateInfo>> for FinishStateResponse {
    fn from(units: Vec<FinishStateInfo>) -> Self {
        FinishStateResponse {
            units: units.into_iter()
                .map(|u| UnitState {
                    unit: u.unit,
                    finished_tasks: u.finished_tasks
                })
                .collect()
        }
    }
}

impl From<TaskCompletion> for TaskDoneResponse {
    fn from(c: TaskCompletion) -> Self {
        TaskDoneResponse {
            unit: c.unit,
            task: c.task,
            progress: c.progress
        }
    }
}
