//! Session credential types
//!
//! Tokens are opaque strings. `Debug` output redacts them so credentials can
//! be logged with `?` formatting without leaking secrets.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::auth::UserProfile;

/// Access/refresh token pair held by the session store
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl Credentials {
    /// Pair from optional tokens
    #[must_use]
    pub fn new(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self { access_token, refresh_token }
    }

    /// Both tokens absent
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Result of a successful token refresh
///
/// `user` carries the profile payload exactly as the refresh endpoint
/// returned it; `None` when the response had no `user` field.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRotation {
    pub credentials: Credentials,
    pub user: Option<serde_json::Value>,
}

impl TokenRotation {
    /// Rotation result with the optional user payload
    #[must_use]
    pub fn new(credentials: Credentials, user: Option<serde_json::Value>) -> Self {
        Self { credentials, user }
    }

    /// Decode the profile payload, if present and well-formed.
    #[must_use]
    pub fn user_profile(&self) -> Option<UserProfile> {
        self.user.clone().and_then(|value| serde_json::from_value(value).ok())
    }
}
