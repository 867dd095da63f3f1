use std::fmt::Debug;
use anyhow::{bail, Context};
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use crate::alert::FAILED_TO_FETCH;
use crate::PortalClient;
use crate::user::{Registration, User, UserUpdate};

const USERS_SEGMENT: &str = "users";
const ACCESS_TOKEN_HEADER: &str = "Access-Token";
const JSON_CONTENT_TYPE: &str = "application/json";

/// The REST endpoints of the backend, that the views talk to
pub trait UserBackend: Debug + Send + Sync {

    /// `GET /users/{id}`, authorized by the given session token. \
    /// Unlike the registration reply, a non-2xx answer is an error here and is never decoded as a [`User`],
    /// so a missing user shows an alert instead of an empty profile.
    fn fetch_user(&self, user_id: &str, token: Option<&str>) -> anyhow::Result<User>;

    /// `PUT /users/{id}`. The response body is not looked at.
    fn update_user(&self, user_id: &str, update: &UserUpdate) -> anyhow::Result<()>;

    /// `POST /users`. Returns the parsed JSON reply, whatever its HTTP status.
    fn register_user(&self, registration: &Registration) -> anyhow::Result<Value>;
}

impl PortalClient {

    pub(crate) fn fetch_user_request(&self, user_id: &str, token: Option<&str>) -> anyhow::Result<RequestBuilder> {
        let mut request = self.get(&[USERS_SEGMENT, user_id])?
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(token) = token {
            request = request.header(ACCESS_TOKEN_HEADER, token);
        }
        Ok(request)
    }

    pub(crate) fn update_user_request(&self, user_id: &str, update: &UserUpdate) -> anyhow::Result<RequestBuilder> {
        Ok(self.put(&[USERS_SEGMENT, user_id])?
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .json(update))
    }

    pub(crate) fn register_user_request(&self, registration: &Registration) -> anyhow::Result<RequestBuilder> {
        Ok(self.post(&[USERS_SEGMENT])?
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .json(registration))
    }

}

impl UserBackend for PortalClient {

    fn fetch_user(&self, user_id: &str, token: Option<&str>) -> anyhow::Result<User> {
        let response = send(self.fetch_user_request(user_id, token)?)?;
        if !response.status().is_success() {
            bail!("Could not load user {}. Status Code: {}", user_id, response.status());
        }
        response.json().context("Could not parse user")
    }

    fn update_user(&self, user_id: &str, update: &UserUpdate) -> anyhow::Result<()> {
        let response = send(self.update_user_request(user_id, update)?)?;
        if !response.status().is_success() {
            log::warn!("Update of user {} answered with status code: {}", user_id, response.status());
        }
        Ok(())
    }

    fn register_user(&self, registration: &Registration) -> anyhow::Result<Value> {
        let response = send(self.register_user_request(registration)?)?;
        let text = response.text().context("Could not read registration response")?;
        serde_json::from_str(&text).context("Could not parse registration response json")
    }

}

/// Sends the request. Requests, that never got an answer, are marked with [`FAILED_TO_FETCH`]
fn send(request: RequestBuilder) -> anyhow::Result<Response> {
    request.send().map_err(|err| {
        if err.is_connect() || err.is_timeout() {
            anyhow::Error::new(err).context(FAILED_TO_FETCH)
        } else {
            anyhow::Error::new(err)
        }
    })
}
