//! Entity descriptor for User

use super::handlers::{UserAppState, signin, signup};
use super::model::User;
use crate::auth::Authenticator;
use crate::core::resource::Resource;
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::post};

/// Descriptor for the account endpoints under `/users`
pub struct UserDescriptor {
    pub users: Resource<User>,
    pub auth: Authenticator,
}

impl UserDescriptor {
    pub fn new(users: Resource<User>, auth: Authenticator) -> Self {
        Self { users, auth }
    }
}

impl EntityDescriptor for UserDescriptor {
    fn entity_type(&self) -> &str {
        "user"
    }

    fn plural(&self) -> &str {
        "users"
    }

    fn build_routes(&self) -> Router {
        let state = UserAppState {
            users: self.users.clone(),
            auth: self.auth.clone(),
        };

        Router::new()
            .route("/users/signin", post(signin))
            .route("/users/signup", post(signup))
            .with_state(state)
    }
}
