//! Decides before every navigation whether it may happen.

use crate::session::Session;

/// Route metadata the guard looks at. A route may carry any combination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteTags {
    /// Reachable without a session.
    pub public: bool,
    /// Only makes sense without a session, like the login page.
    pub only_logged_out: bool,
    pub is_admin: bool,
    /// The catch-all for unknown paths.
    pub not_found: bool,
}

impl RouteTags {
    pub const NONE: Self = Self {
        public: false,
        only_logged_out: false,
        is_admin: false,
        not_found: false,
    };
    pub const PUBLIC: Self = Self {
        public: true,
        ..Self::NONE
    };
    pub const ONLY_LOGGED_OUT: Self = Self {
        only_logged_out: true,
        ..Self::NONE
    };
    pub const IS_ADMIN: Self = Self {
        is_admin: true,
        ..Self::NONE
    };
    pub const NOT_FOUND: Self = Self {
        not_found: true,
        ..Self::NONE
    };

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            public: self.public || other.public,
            only_logged_out: self.only_logged_out || other.only_logged_out,
            is_admin: self.is_admin || other.is_admin,
            not_found: self.not_found || other.not_found,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Proceed,
    RedirectLogin,
    RedirectProfile,
}

/// First matching rule wins. Unknown paths never show a not found page: a
/// logged out visitor is sent to login and everyone else to their profile.
#[must_use]
pub const fn decide(session: &Session, tags: RouteTags) -> Action {
    let logged_in = session.is_authenticated();
    if (!logged_in && !tags.public) || (!logged_in && tags.not_found) {
        Action::RedirectLogin
    } else if (logged_in && tags.only_logged_out) || (logged_in && tags.not_found) {
        Action::RedirectProfile
    } else if !session.is_admin() && tags.is_admin {
        Action::RedirectProfile
    } else {
        Action::Proceed
    }
}
