use crate::models::User;

/// The session collaborator. Authentication itself is external; the views
/// only ever ask who is currently signed in.
pub trait AuthProvider: Send + Sync {
    fn current_user(&self) -> Option<User>;
}

/// An [`AuthProvider`] with a fixed identity, for the console driver and
/// tests.
pub struct FixedAuth {
    user: Option<User>,
}

impl FixedAuth {
    pub fn new(uid: Option<String>) -> Self {
        Self {
            user: uid.map(|uid| User { uid }),
        }
    }
}

impl AuthProvider for FixedAuth {
    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }
}
