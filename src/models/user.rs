use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the auth collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
}
