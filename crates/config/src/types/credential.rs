//! Credential types for Nexus configuration.
//!
//! Responsibilities:
//! - Hold the group, username and password presented to the ticket authority.
//! - Handle serialization of the password.
//!
//! Does NOT handle:
//! - The ticket exchange itself (see client crate).
//!
//! Invariants:
//! - The password is a `secrecy::SecretString` and never appears in `Debug` output.
//! - Serialization includes the password for profile persistence; secrecy is for runtime safety.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Module for serializing SecretString as strings.
pub(crate) mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }

    /// Same as the parent module, for optional fields.
    pub mod option {
        use secrecy::{ExposeSecret, SecretString};
        use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
        use serde::{Deserializer, Serializer};

        pub fn serialize<S>(secret: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            secret
                .as_ref()
                .map(|s| s.expose_secret().to_string())
                .serialize(serializer)
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = Option::<String>::deserialize(deserializer)?;
            Ok(s.map(|s| SecretString::new(s.into())))
        }
    }
}

/// Group-scoped account used to obtain a ticket granting ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Customer group (tenant) the account belongs to
    pub group: String,
    /// Account name within the group
    pub username: String,
    /// Account password
    #[serde(with = "secret_string")]
    pub password: SecretString,
}

impl CredentialConfig {
    /// Create a credential from its three parts.
    pub fn new(
        group: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            username: username.into(),
            password: SecretString::new(password.into().into()),
        }
    }
}
