use serde::{Deserialize, Serialize};

/// A registered account holder (student).
///
/// The `ra` (registration number, 13 digits) is the ownership key every
/// protected record carries. Identity fields are fixed at registration;
/// only the password hash changes afterwards, through the explicit
/// password-change flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub ra: String,
    pub name: String,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub institution_id: i64,
}

impl Identity {
    /// Create an identity with an unassigned id; the credential store
    /// assigns the definitive id on save.
    pub fn new(
        ra: String,
        name: String,
        email: String,
        username: String,
        password_hash: String,
        institution_id: i64,
    ) -> Self {
        Self {
            id: 0,
            ra,
            name,
            email,
            username,
            password_hash,
            institution_id,
        }
    }
}
