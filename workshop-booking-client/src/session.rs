use workshop_booking_config::SessionConfig;

/// What the login flow left behind. Only read here, never validated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct Session {
    token: Option<String>,
    admin: Option<String>,
}

impl Session {
    pub const fn anonymous() -> Self {
        Self {
            token: None,
            admin: None,
        }
    }

    pub const fn new(token: Option<String>, admin: Option<String>) -> Self {
        Self { token, admin }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.token.clone(), config.admin.clone())
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.admin.is_some()
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            admin: self.admin,
        }
    }

    pub fn without_token(self) -> Self {
        Self {
            token: None,
            admin: self.admin,
        }
    }

    pub fn with_admin(self, admin: impl Into<String>) -> Self {
        Self {
            token: self.token,
            admin: Some(admin.into()),
        }
    }

    pub fn without_admin(self) -> Self {
        Self {
            token: self.token,
            admin: None,
        }
    }
}
