//! Cart and order ownership.

use uuid::Uuid;

use crate::domain::users::records::UserUuid;

/// The identity a cart or order is scoped to: an authenticated user or an
/// anonymous browser session. Threaded explicitly into every cart and order
/// operation; never read from ambient request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerContext {
    User(UserUuid),
    Guest(Uuid),
}

impl OwnerContext {
    #[must_use]
    pub fn user_uuid(self) -> Option<UserUuid> {
        match self {
            Self::User(user) => Some(user),
            Self::Guest(_) => None,
        }
    }

    #[must_use]
    pub fn session_uuid(self) -> Option<Uuid> {
        match self {
            Self::User(_) => None,
            Self::Guest(session) => Some(session),
        }
    }
}
