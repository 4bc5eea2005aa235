use crate::models::Claims;
use jsonwebtoken::{DecodingKey, Validation, decode};

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::role::Role;
    use crate::models::TokenType;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use std::time::{SystemTime, UNIX_EPOCH};

    pub(crate) fn sign(role: Role, token_type: TokenType, secret: &str, ttl_secs: i64) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;
        let claims = Claims {
            sub: "u-42".to_string(),
            name: "Abena".to_string(),
            role,
            exp: (now + ttl_secs) as usize,
            token_type,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn accepts_token_signed_with_same_secret() {
        let token = sign(Role::Accountant, TokenType::Access, "s3cret", 600);
        let claims = verify_token(&token, "s3cret").unwrap();

        assert_eq!(claims.sub, "u-42");
        assert_eq!(claims.role, Role::Accountant);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn rejects_wrong_secret_and_expired_tokens() {
        let token = sign(Role::Admin, TokenType::Access, "s3cret", 600);
        assert!(verify_token(&token, "other").is_err());

        let expired = sign(Role::Admin, TokenType::Access, "s3cret", -3600);
        assert!(verify_token(&expired, "s3cret").is_err());
    }
}
