use crate::config::LoginSettings;

/// Why a login attempt was refused. `Display` is the message shown on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Please fill in both fields")]
    MissingFields,
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Login state checked against the configured credentials.
#[derive(Debug, Clone)]
pub struct Session {
    credentials: LoginSettings,
    user: Option<String>,
}

impl Session {
    pub fn new(credentials: LoginSettings) -> Self {
        Self {
            credentials,
            user: None,
        }
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), LoginError> {
        if username.is_empty() || password.is_empty() {
            return Err(LoginError::MissingFields);
        }
        if username != self.credentials.username || password != self.credentials.password {
            tracing::warn!("Rejected login for {username:?}");
            return Err(LoginError::InvalidCredentials);
        }
        tracing::info!("Logged in as {username}");
        self.user = Some(username.to_string());
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!("Logged out {user}");
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}
