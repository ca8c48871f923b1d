use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use poem::Request;
use poem_openapi::SecurityScheme;
use poem_openapi::auth::Bearer;
use serde::{Deserialize, Serialize};

use business::domain::shared::value_objects::UserId;

use crate::config::auth_config::AuthConfig;

/// Claims carried by the externally issued access token. Issuance lives in
/// the auth collaborator; this service only validates.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub exp: i64,
}

/// The authenticated caller extracted from a validated bearer token.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: UserId,
    pub name: Option<String>,
}

fn decode_caller(token: &str, secret: &str) -> Result<Caller, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| format!("auth.token_validation_failed: {e}"))?;

    Ok(Caller {
        user_id: UserId::new(token_data.claims.sub),
        name: token_data.claims.name,
    })
}

/// Bearer token authentication for cart operations and catalog mutations
#[derive(SecurityScheme)]
#[oai(ty = "bearer", bearer_format = "JWT", checker = "bearer_checker")]
pub struct BearerAuth(pub Caller);

async fn bearer_checker(_req: &Request, bearer: Bearer) -> Option<Caller> {
    let config = AuthConfig::from_env();
    decode_caller(&bearer.token, &config.jwt_secret).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &str = "test-secret";

    fn token_for(claims: &AccessClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn should_extract_caller_from_valid_token() {
        let token = token_for(
            &AccessClaims {
                sub: "customer-42".to_string(),
                name: Some("Ada".to_string()),
                exp: chrono::Utc::now().timestamp() + 3600,
            },
            SECRET,
        );

        let caller = decode_caller(&token, SECRET).unwrap();

        assert_eq!(caller.user_id.as_str(), "customer-42");
        assert_eq!(caller.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn should_reject_expired_token() {
        let token = token_for(
            &AccessClaims {
                sub: "customer-42".to_string(),
                name: None,
                exp: chrono::Utc::now().timestamp() - 3600,
            },
            SECRET,
        );

        let result = decode_caller(&token, SECRET);

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("auth.token_validation_failed"));
    }

    #[test]
    fn should_reject_token_signed_with_other_secret() {
        let token = token_for(
            &AccessClaims {
                sub: "customer-42".to_string(),
                name: None,
                exp: chrono::Utc::now().timestamp() + 3600,
            },
            "another-secret",
        );

        assert!(decode_caller(&token, SECRET).is_err());
    }

    #[test]
    fn should_reject_garbage_token() {
        assert!(decode_caller("not-a-jwt", SECRET).is_err());
    }
}
