use rand::{Rng, distr::Alphanumeric};
use serde::ser::Serializer;

const TOKEN_LENGTH: usize = 32;

/// One-time opt-out handle stored alongside every persisted audit.
/// Generated fresh on each submission; never reused, never deduplicated.
#[derive(Debug)]
pub struct UnsubscribeToken(String);

impl UnsubscribeToken {
    pub fn new() -> Self {
        let mut rng = rand::rng();
        let token = std::iter::repeat_with(|| rng.sample(Alphanumeric))
            .map(char::from)
            .take(TOKEN_LENGTH)
            .collect();
        Self(token)
    }
}

impl serde::Serialize for UnsubscribeToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl AsRef<str> for UnsubscribeToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
