use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    header::ACCEPT
};
use serde::{Deserialize, Serialize};

use crate::{
    directory::{UserDirectory, UserId},
    errors::RequestError
};

const MIME_JSON: &str = "application/json";

const BY_LOGIN_ENDPOINT: &str = "/userinfo/by-login";

#[derive(Serialize)]
struct ByLoginParams<'a> {
    login: &'a str
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserInfoResult {
    user_id: UserId
}

/// HTTP client for the user directory service.
pub struct UserInfoClient {
    client: Client,
    by_login_url: String
}

impl UserInfoClient {
    pub fn new(url: &str) -> UserInfoClient {
        UserInfoClient {
            client: Client::builder().build().unwrap(),
            by_login_url: url.to_string() + BY_LOGIN_ENDPOINT
        }
    }
}

#[async_trait]
impl UserDirectory for UserInfoClient {
    async fn resolve(
        &self,
        login: &str
    ) -> Result<Option<UserId>, RequestError>
    {
        let response = self.client.post(&self.by_login_url)
            .json(&ByLoginParams { login })
            .header(ACCEPT, MIME_JSON)
            .send()
            .await?;

        match response.status() {
            // the directory reports an unknown login as 404, not a fault
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::OK => {
                let info = response.json::<UserInfoResult>().await?;
                Ok(Some(info.user_id))
            },
            status => Err(RequestError::HttpError(
                status.as_u16(),
                response.text().await.unwrap_or_else(|e| e.to_string())
            ))
        }
    }
}
