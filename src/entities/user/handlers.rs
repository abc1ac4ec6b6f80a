//! Sign-in and sign-up handlers

use super::model::{AuthSession, User, UserProfile, UserRole};
use crate::auth::Authenticator;
use crate::core::envelope::Envelope;
use crate::core::error::{ApiResult, AuthError};
use crate::core::extractors::JsonBody;
use crate::core::query::Filter;
use crate::core::resource::Resource;
use crate::core::validation::ValidatableEntity;
use axum::extract::State;
use serde_json::{Value, json};

/// User-specific AppState
#[derive(Clone)]
pub struct UserAppState {
    pub users: Resource<User>,
    pub auth: Authenticator,
}

impl UserAppState {
    async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let filter = Filter::new()
            .eq("email", email.trim().to_lowercase())
            .limit(1);
        Ok(self.users.list(&filter).await?.into_iter().next())
    }

    fn session(&self, user: &User) -> ApiResult<AuthSession> {
        Ok(AuthSession {
            token: self.auth.tokens.issue(user.id)?,
            user: UserProfile::from(user),
        })
    }
}

/// Non-blank string field of the body
fn text<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

pub async fn signin(
    State(state): State<UserAppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<Envelope<AuthSession>> {
    let (Some(email), Some(password)) = (text(&body, "email"), text(&body, "password")) else {
        return Err(AuthError::MissingCredentials.into());
    };

    let user = state
        .find_by_email(email)
        .await?
        .ok_or(AuthError::UnknownUser)?;

    if !state.auth.hasher.verify(password, &user.password).await? {
        tracing::warn!(user = %user.id, "sign-in with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let session = state.session(&user)?;
    tracing::info!(user = %user.id, "signed in");
    Ok(Envelope::ok(session))
}

/// `role` is optional and defaults to `user`
pub async fn signup(
    State(state): State<UserAppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<Envelope<AuthSession>> {
    let (Some(name), Some(email), Some(password)) = (
        text(&body, "name"),
        text(&body, "email"),
        text(&body, "password"),
    ) else {
        return Err(AuthError::MissingSignupFields.into());
    };

    if !state.auth.tokens.is_configured() {
        return Err(AuthError::SigningKeyMissing.into());
    }

    if state.find_by_email(email).await?.is_some() {
        return Err(AuthError::DuplicateEmail.into());
    }

    let role = text(&body, "role").unwrap_or(UserRole::User.as_str());
    let hash = state.auth.hasher.hash(password).await?;
    let user = User::from_payload(json!({
        "name": name,
        "email": email,
        "password": hash,
        "role": role,
    }))?;

    let user = state.users.create(user).await?;
    let session = state.session(&user)?;
    Ok(Envelope::created(session).with_message("User created successfully"))
}
