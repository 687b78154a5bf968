use axum::extract::FromRef;
use jsonwebtoken::DecodingKey;

use crate::core::CoreArc;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub core: CoreArc,
    pub jwt_key: DecodingKey
}
