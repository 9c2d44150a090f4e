//! Client identity and credential extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};
use std::convert::Infallible;
use std::future::{Ready, ready};

use beacon_core::identity::{FORWARDED_FOR_HEADER, REAL_IP_HEADER, client_identifier};

/// Rate-limit key of the caller, resolved from forwarding headers.
///
/// Never fails; callers without usable headers share the `"anonymous"` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity(pub String);

impl ClientIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn header_str<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

impl FromRequest for ClientIdentity {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(ClientIdentity(client_identifier(
            header_str(req, FORWARDED_FOR_HEADER),
            header_str(req, REAL_IP_HEADER),
        ))))
    }
}

/// Optional `Authorization: Bearer <token>` credential.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequest for BearerToken {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = header_str(req, header::AUTHORIZATION.as_str())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string());
        ready(Ok(BearerToken(token)))
    }
}
