use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access-token payload issued by the identity provider. `aud` and `iss` are
/// checked by the validator and not kept here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user ID
    pub exp: usize,
}
