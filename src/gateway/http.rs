use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::debug;

use crate::app::ApiConfig;
use crate::models::{
    AuthToken, AvatarRef, CredentialGateway, MultipartPayload, ProfileChanges, ProfileEcho,
    SignInResponse, UserProfile,
};
use crate::utils::{GatewayError, GatewayResult};

/// Which call a status code came back from; 401 means different things
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    SignIn,
    Authenticated,
}

#[derive(Deserialize)]
struct SessionBody {
    user: UserProfile,
    token: AuthToken,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileBody {
    Wrapped { user: UserProfile },
    Bare(UserProfile),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EchoBody {
    Wrapped { user: ProfileEcho },
    Bare(ProfileEcho),
}

#[derive(Deserialize)]
struct AvatarBody {
    avatar: AvatarRef,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Credential gateway talking JSON/multipart to the Ignite Gym API
pub struct HttpCredentialGateway {
    client: Client,
    base_url: String,
}

impl HttpCredentialGateway {
    pub fn new(config: &ApiConfig) -> GatewayResult<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(request: RequestBuilder, token: &AuthToken) -> RequestBuilder {
        request.header("Authorization", format!("Bearer {}", token.as_str()))
    }

    /// Send and turn non-success statuses into gateway errors
    async fn send(&self, request: RequestBuilder, call: Call) -> GatewayResult<Response> {
        let response = request.send().await.map_err(|e| {
            GatewayError::Network(format!("Failed to reach {}: {}", self.base_url, e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| status.to_string());
        debug!("Gateway returned {}: {}", status, message);
        Err(map_status(status, call, message))
    }
}

/// Translate an HTTP failure status into the gateway taxonomy
fn map_status(status: StatusCode, call: Call, message: String) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED if call == Call::SignIn => GatewayError::InvalidCredentials,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Unauthorized,
        StatusCode::PAYLOAD_TOO_LARGE => GatewayError::PayloadTooLarge,
        s if s.is_client_error() => GatewayError::ValidationRejected(message),
        s => GatewayError::Network(format!("Server error {}: {}", s, message)),
    }
}

/// JSON body for a profile update: only the fields that changed
fn update_body(changes: &ProfileChanges) -> Value {
    let mut body = Map::new();
    if let Some(name) = &changes.name {
        body.insert("name".to_string(), json!(name));
    }
    if let Some(old_password) = &changes.old_password {
        body.insert("old_password".to_string(), json!(old_password));
    }
    if let Some(new_password) = &changes.new_password {
        body.insert("password".to_string(), json!(new_password));
    }
    Value::Object(body)
}

#[async_trait]
impl CredentialGateway for HttpCredentialGateway {
    async fn sign_in(&self, email: &str, password: &str) -> GatewayResult<SignInResponse> {
        let request = self
            .client
            .post(self.url("/sessions"))
            .json(&json!({ "email": email, "password": password }));

        let body: SessionBody = self.send(request, Call::SignIn).await?.json().await?;
        Ok(SignInResponse {
            profile: body.user,
            token: body.token,
        })
    }

    async fn current_profile(&self, token: &AuthToken) -> GatewayResult<UserProfile> {
        let request = Self::authorized(self.client.get(self.url("/users/me")), token);

        let body: ProfileBody = self.send(request, Call::Authenticated).await?.json().await?;
        Ok(match body {
            ProfileBody::Wrapped { user } | ProfileBody::Bare(user) => user,
        })
    }

    async fn update_profile(
        &self,
        token: &AuthToken,
        changes: &ProfileChanges,
    ) -> GatewayResult<ProfileEcho> {
        let request = Self::authorized(self.client.put(self.url("/users")), token)
            .json(&update_body(changes));

        let response = self.send(request, Call::Authenticated).await?;
        // Some deployments answer 204 with no body: treat as a plain confirmation
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(ProfileEcho {
                name: changes.name.clone(),
                avatar_ref: None,
            });
        }
        let body: EchoBody = response.json().await?;
        Ok(match body {
            EchoBody::Wrapped { user } | EchoBody::Bare(user) => user,
        })
    }

    async fn upload_avatar(
        &self,
        token: &AuthToken,
        payload: MultipartPayload,
    ) -> GatewayResult<AvatarRef> {
        let part = multipart::Part::bytes(payload.bytes.to_vec())
            .file_name(payload.file_name)
            .mime_str(&payload.content_type)?;
        let form = multipart::Form::new().part(payload.field, part);

        let request =
            Self::authorized(self.client.patch(self.url("/users/avatar")), token).multipart(form);

        let body: AvatarBody = self.send(request, Call::Authenticated).await?.json().await?;
        Ok(body.avatar)
    }
}
