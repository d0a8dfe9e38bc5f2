use super::{call, to_body};
use crate::error::{ErrorKind, ServiceError, ServiceResult};
use crate::session::Session;
use crate::transport::{Method, RequestOptions, Transport};
use phr_models::{
    AuthSession, LoginRequest, NonEmptyText, ProfileEnvelope, RegisterRequest, User,
};
use std::sync::Arc;

const LOGIN: &str = "Login failed";
const REGISTER: &str = "Registration failed";
const PROFILE: &str = "Failed to fetch profile";
const LOGOUT: &str = "Failed to sign out";

/// Sign-in, registration and profile. Successful sign-in stores the bearer token in the
/// session, which the transport attaches to every later request.
pub struct AuthService<T> {
    transport: Arc<T>,
    session: Arc<Session>,
}

impl<T: Transport> AuthService<T> {
    pub fn new(transport: Arc<T>, session: Arc<Session>) -> Self {
        Self { transport, session }
    }

    async fn authenticate<B: serde::Serialize>(
        &self,
        path: &str,
        request: &B,
        message: &str,
    ) -> ServiceResult<User> {
        let body = to_body(request, message)?;
        let auth: AuthSession = call(
            self.transport.as_ref(),
            Method::Post,
            path,
            RequestOptions::new().body(body),
            "auth session",
            message,
        )
        .await?;
        if auth.token.trim().is_empty() {
            tracing::error!("auth response carried an empty token");
            return Err(ServiceError::new(ErrorKind::Decode, message));
        }
        self.session.set_token(auth.token).map_err(|e| {
            tracing::warn!("{e}");
            ServiceError::new(
                ErrorKind::Invalid,
                format!("Signed in, but the session could not be saved: {e}"),
            )
        })?;
        tracing::info!(email = %auth.user.email, "signed in");
        Ok(auth.user)
    }

    /// Sign in. A blank email or password is rejected without a request.
    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<User> {
        let email = NonEmptyText::new(email).map_err(|_| ServiceError::invalid(LOGIN))?;
        if NonEmptyText::new(password).is_err() {
            return Err(ServiceError::invalid(LOGIN));
        }
        let request = LoginRequest {
            email: email.into_inner(),
            password: password.to_owned(),
        };
        self.authenticate("/auth/login", &request, LOGIN).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ServiceResult<User> {
        self.authenticate("/auth/register", request, REGISTER).await
    }

    pub async fn profile(&self) -> ServiceResult<User> {
        let envelope: ProfileEnvelope = call(
            self.transport.as_ref(),
            Method::Get,
            "/auth/profile",
            RequestOptions::new(),
            "profile",
            PROFILE,
        )
        .await?;
        Ok(envelope.user)
    }

    /// Forget the stored token. No request is made.
    pub fn logout(&self) -> ServiceResult<()> {
        self.session.clear().map_err(|e| {
            tracing::warn!("{e}");
            ServiceError::new(ErrorKind::Invalid, LOGOUT)
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }
}
