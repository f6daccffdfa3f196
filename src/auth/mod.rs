mod router;

pub use router::auth_router;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Simulated sign-in/sign-up. Accepts any non-empty credentials after the
/// configured delay; carries no real security semantics and touches no
/// listing state.
#[derive(Debug, Clone)]
pub struct AuthStub {
    delay: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Acknowledgment returned once the simulated round-trip completes.
#[derive(Debug, Clone, Serialize)]
pub struct AuthAck {
    pub email: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("e-mail e senha são obrigatórios")]
    MissingCredentials,
    #[error("as senhas não coincidem")]
    PasswordMismatch,
}

impl AuthStub {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthAck, AuthError> {
        tokio::time::sleep(self.delay).await;
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        Ok(AuthAck {
            email: request.email,
            message: "Login realizado com sucesso!".to_string(),
        })
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<AuthAck, AuthError> {
        tokio::time::sleep(self.delay).await;
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if request.password != request.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(AuthAck {
            email: request.email,
            message: "Conta criada com sucesso!".to_string(),
        })
    }
}
