use validator::ValidateEmail;

#[derive(Debug, Clone)]
pub struct RecipientEmail(String);

impl RecipientEmail {
    pub fn parse(s: String) -> Result<Self, String> {
        if !s.validate_email() {
            return Err(format!("{} is not a valid recipient email.", s));
        };
        Ok(Self(s))
    }
}

impl AsRef<str> for RecipientEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RecipientEmail {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        RecipientEmail::parse(value)
    }
}
