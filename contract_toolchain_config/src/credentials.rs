use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroizing;

const REDACTED: &str = "<redacted>";

/// A secret key used to sign transactions.
///
/// Serializes to the raw key so the config can be handed to the toolchain, but
/// `Debug` and `Display` never print it. The key is wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningCredential(Zeroizing<String>);

impl SigningCredential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    pub(crate) fn redacted() -> Self {
        Self::new(REDACTED)
    }

    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl Serialize for SigningCredential {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SigningCredential {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

impl fmt::Debug for SigningCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningCredential").field(&REDACTED).finish()
    }
}

impl fmt::Display for SigningCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_is_never_formatted() {
        let credential = SigningCredential::new("0xdeadbeef");

        assert!(!format!("{credential:?}").contains("deadbeef"));
        assert!(!credential.to_string().contains("deadbeef"));
        assert_eq!(credential.expose_secret(), "0xdeadbeef");
    }

    #[test]
    fn test_credential_serializes_raw() {
        let credential = SigningCredential::new("0xdeadbeef");
        assert_eq!(
            serde_json::to_string(&credential).unwrap(),
            "\"0xdeadbeef\""
        );
    }

    #[test]
    fn test_credential_from_json() {
        let credential: SigningCredential = serde_json::from_str("\"0xdeadbeef\"").unwrap();
        let copy = credential.clone();
        drop(credential);

        assert_eq!(copy.expose_secret(), "0xdeadbeef");
        assert!(serde_json::from_str::<SigningCredential>("42").is_err());
    }
}
