use axum::{
    extract::{FromRef, FromRequestParts, State},
    http::request::Parts
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer}
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
// TODO: replace with into_ok() when that's available
use unwrap_infallible::UnwrapInfallible;

use crate::errors::AppError;

async fn get_state<S, T>(
    parts: &mut Parts,
    state: &S
) -> T
where
    S: Send + Sync,
    T: FromRef<S>
{
    State::<T>::from_request_parts(parts, state)
        .await
        .unwrap_infallible()
        .0
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String
}

/// The caller's externally-authenticated login name, taken from the `sub`
/// claim of the bearer token. Verification only; tokens are issued by the
/// external auth service.
pub struct AuthUser(pub String);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    DecodingKey: FromRef<S>
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S
    ) -> Result<Self, Self::Rejection>
    {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(
                parts, state
            )
            .await
            .or(Err(AppError::Unauthorized))?;

        let key: DecodingKey = get_state(parts, state).await;

        let data = decode::<Claims>(
            bearer.token(),
            &key,
            &Validation::default()
        )
        .or(Err(AppError::Unauthorized))?;

        Ok(AuthUser(data.claims.sub))
    }
}
