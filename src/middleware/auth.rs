use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::utils::ids::parse_id;

pub const REVIEWER_ROLES: &[&str] = &["admin", "instructor"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userID", default, deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    pub exp: usize,
    pub role: Option<String>,
}

impl Claims {
    /// The verified caller's numeric id.
    pub fn caller_id(&self) -> Result<i64> {
        let raw = self
            .user_id
            .as_deref()
            .ok_or_else(|| Error::Unauthorized("User ID not found in token".to_string()))?;
        parse_id(raw, "user ID")
    }

    pub fn has_any_role(&self, allowed: &[&str]) -> bool {
        let role = self.role.as_deref().unwrap_or_default();
        allowed.iter().any(|r| r.eq_ignore_ascii_case(role))
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

/// HS256 verifier shared by the bearer middleware.
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected bearer token: {}", e);
                Error::Unauthorized("invalid_token".to_string())
            })
    }
}

fn bearer_token(req: &Request) -> Result<&str> {
    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| Error::Unauthorized("missing_authorization".to_string()))?;
    let value = header
        .to_str()
        .map_err(|_| Error::Unauthorized("bad_authorization".to_string()))?;
    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::Unauthorized("unsupported_scheme".to_string()))
}

pub async fn require_bearer_auth(
    State(verifier): State<JwtVerifier>,
    mut req: Request,
    next: Next,
) -> Response {
    let claims = match bearer_token(&req).and_then(|token| verifier.verify(token)) {
        Ok(claims) => claims,
        Err(e) => return e.into_response(),
    };
    req.extensions_mut().insert(claims);
    next.run(req).await
}

/// Must run inside `require_bearer_auth`.
pub async fn require_reviewer(req: Request, next: Next) -> Response {
    let allowed = req
        .extensions()
        .get::<Claims>()
        .map(|claims| claims.has_any_role(REVIEWER_ROLES));
    match allowed {
        Some(true) => next.run(req).await,
        Some(false) => Error::Forbidden("forbidden".to_string()).into_response(),
        None => Error::Unauthorized("missing_authorization".to_string()).into_response(),
    }
}
