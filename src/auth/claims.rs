use serde::{Deserialize, Serialize};

/// Claims carried by access tokens from the hosted auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub aud: Option<String>,
    pub exp: usize, // Expiration time (as UTC timestamp)
    #[serde(default)]
    pub iat: Option<usize>,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}
