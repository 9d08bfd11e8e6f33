//! JWT encoding and validation for the session service.

use crate::{errors::*, types::*};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use pal_accounts::AccountStore;
use uuid::Uuid;

use super::SessionService;

impl<A: AccountStore + ?Sized> SessionService<A> {
    pub(crate) fn build_token_claims(&self, account_id: Uuid) -> TokenClaims {
        let now = current_timestamp();

        TokenClaims {
            iss: self.issuer.clone(),
            sub: account_id.to_string(),
            aud: self.audience.clone(),
            iat: now,
            exp: now.saturating_add(self.lifetimes.token_ttl),
            nbf: now,
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub(crate) fn sign_jwt(&self, claims: &TokenClaims) -> Result<String> {
        let header = Header::new(Algorithm::HS256);
        Ok(encode(&header, claims, &self.encoding_key)?)
    }

    pub(crate) fn verify_jwt_internal(&self, token: &str) -> Result<TokenClaims> {
        // Parse header without verification so the algorithm can be pinned
        let header = jsonwebtoken::decode_header(token).map_err(|_| SessionError::InvalidToken)?;

        if header.alg != Algorithm::HS256 {
            return Err(SessionError::InvalidAlgorithm {
                found: format!("{:?}", header.alg),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&self.audience);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = self.lifetimes.leeway;

        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::TokenExpired,
                ErrorKind::InvalidAudience => SessionError::InvalidAudience,
                _ => SessionError::InvalidToken,
            })?;

        Ok(token_data.claims)
    }
}
