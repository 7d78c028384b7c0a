use secrecy::{ExposeSecret, SecretString};

/// HTTP Basic credentials for the REST management API.
///
/// The password is held as a [`SecretString`] so it never shows up in
/// `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Attach these credentials to a request as HTTP Basic auth.
    pub(crate) fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.basic_auth(&self.username, Some(self.password.expose_secret()))
    }
}
