//! Conversions from external infrastructure errors into domain errors.

use keyring::Error as KeyringError;
use reqwest::Error as HttpError;
use vakansiya_domain::VakansiyaError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub VakansiyaError);

impl From<InfraError> for VakansiyaError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<VakansiyaError> for InfraError {
    fn from(value: VakansiyaError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoVakansiyaError {
    fn into_vakansiya(self) -> VakansiyaError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → VakansiyaError */
/* -------------------------------------------------------------------------- */

impl IntoVakansiyaError for KeyringError {
    fn into_vakansiya(self) -> VakansiyaError {
        use KeyringError::*;

        let description = self.to_string();

        match self {
            NoEntry => VakansiyaError::NotFound("keychain entry not found".into()),
            BadEncoding(_) => {
                VakansiyaError::Storage("credential in keychain is not valid UTF-8".into())
            }
            TooLong(name, limit) => VakansiyaError::Storage(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            Invalid(attr, reason) => {
                VakansiyaError::Storage(format!("keychain attribute '{attr}' is invalid: {reason}"))
            }
            Ambiguous(entries) => VakansiyaError::Storage(format!(
                "multiple keychain entries matched request ({} results)",
                entries.len()
            )),
            PlatformFailure(err) => {
                VakansiyaError::Storage(format!("keychain platform error: {err}"))
            }
            NoStorageAccess(err) => {
                VakansiyaError::Storage(format!("unable to access secure storage: {err}"))
            }
            _ => VakansiyaError::Storage(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_vakansiya())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → VakansiyaError */
/* -------------------------------------------------------------------------- */

impl IntoVakansiyaError for HttpError {
    fn into_vakansiya(self) -> VakansiyaError {
        if self.is_builder() {
            return VakansiyaError::Config(format!("invalid HTTP client configuration: {self}"));
        }

        if self.is_timeout() {
            return VakansiyaError::Network(format!("HTTP request timed out: {self}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return VakansiyaError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() || self.is_body() {
            return VakansiyaError::Network(format!("failed to read HTTP response body: {self}"));
        }

        VakansiyaError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_vakansiya())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
