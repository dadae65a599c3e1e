use crate::session::{Credentials, Registration, Session, User};
use crate::transport::rest::ApiClient;
use crate::transport::TransportError;
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, info, instrument};

#[derive(Debug, Deserialize)]
struct LoginResponse {
    user: User,
    token: String,
}

/// Signs the admin in and out of the shared [`Session`].
#[derive(Clone, Debug)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn session(&self) -> &Session {
        self.api.session()
    }

    /// `POST /auth/login`; stores the returned token and user on success.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<User, TransportError> {
        let request = self.api.request(Method::POST, "auth/login").json(credentials);
        let response = self.api.send(request).await?;
        let LoginResponse { user, token } = ApiClient::parse_json(response).await?;
        info!(role = ?user.role, "Login succeeded");
        self.session().sign_in(user.clone(), token);
        Ok(user)
    }

    /// `POST /auth/register`.
    ///
    /// When the backend answers with `{ user, token }` the new account is signed in
    /// and returned; any other accepted body yields `None` and the session is untouched.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<Option<User>, TransportError> {
        let request = self
            .api
            .request(Method::POST, "auth/register")
            .json(registration);
        let response = self.api.send(request).await?;
        match ApiClient::parse_echo::<LoginResponse>(response).await? {
            Some(LoginResponse { user, token }) => {
                info!(role = ?user.role, "Registered and signed in");
                self.session().sign_in(user.clone(), token);
                Ok(Some(user))
            }
            None => {
                debug!("Registered without a session token");
                Ok(None)
            }
        }
    }

    pub fn logout(&self) {
        self.session().logout();
    }
}
