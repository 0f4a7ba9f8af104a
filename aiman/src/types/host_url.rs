//! NewTypes for values used by users when first interacting and authenticating with the API.

use crate::errors::InvalidHostUrl;
use crate::routes::Route;
use aliri_braid::braid;

/// A [HostUrl] is the base URL of an AI Manager service, e.g.
/// `https://aiman-api.example.com`
#[braid(validator, serde)]
pub struct HostUrl(String);

impl aliri_braid::Validator for HostUrl {
    type Error = InvalidHostUrl;

    fn validate(s: &str) -> Result<(), Self::Error> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(())
        } else {
            Err(InvalidHostUrl::Protocol(s.to_string()))
        }
    }
}

impl HostUrl {
    /// Full URL of an API route on this host.
    pub fn join(&self, route: &Route) -> String {
        format!("{}{}", self.as_str().trim_end_matches('/'), route.path())
    }
}
