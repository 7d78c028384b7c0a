// REST API security endpoints
//
// Users live in the default user/group service, role bindings in the
// default role service.

use secrecy::SecretString;
use tracing::debug;

use crate::error::Error;
use crate::rest::client::{RestClient, create_outcome};
use crate::rest::models::{CreateOutcome, new_user_body, update_user_body};

impl RestClient {
    /// Create an enabled user.
    ///
    /// `POST /rest/security/usergroup/users`
    pub async fn create_user(
        &self,
        name: &str,
        password: &SecretString,
    ) -> Result<CreateOutcome, Error> {
        let url = self.rest_url(&["security", "usergroup", "users"])?;
        debug!(name, "creating user");
        create_outcome(self.post_json(url, &new_user_body(name, password)).await)
    }

    /// Bind a role to a user. Binding a role the user already holds succeeds.
    ///
    /// `POST /rest/security/roles/role/{role}/user/{user}`
    pub async fn associate_user_role(&self, name: &str, role: &str) -> Result<(), Error> {
        let url = self.rest_url(&["security", "roles", "role", role, "user", name])?;
        debug!(name, role, "associating role");
        self.post_empty(url).await
    }

    /// Update a user's password and enabled flag.
    ///
    /// `POST /rest/security/usergroup/user/{user}`
    pub async fn update_user(
        &self,
        name: &str,
        password: &SecretString,
        enabled: bool,
    ) -> Result<(), Error> {
        let url = self.rest_url(&["security", "usergroup", "user", name])?;
        debug!(name, enabled, "updating user");
        self.post_json(url, &update_user_body(password, enabled)).await
    }
}
