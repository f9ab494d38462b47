//! Auth handlers.

pub(crate) mod login;
pub(crate) mod me;
pub(crate) mod profile;
pub(crate) mod register;

use davenport_app::domain::users::records::UserRecord;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public view of an account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserBody {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
}

impl From<UserRecord> for UserBody {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid.into_uuid(),
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role.as_str().to_string(),
        }
    }
}
