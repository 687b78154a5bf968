use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::RequestError;

/// Opaque internal user identifier. A newtype so it cannot be confused with
/// bare login names or other strings.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The user directory service: maps an externally-authenticated login name
/// to an internal user id. An unknown login is an absent result, not an
/// error.
#[async_trait]
pub trait UserDirectory {
    async fn resolve(
        &self,
        login: &str
    ) -> Result<Option<UserId>, RequestError>;
}
