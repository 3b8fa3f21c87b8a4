use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// View mode of the dashboard. Admins may edit, disable, and delete;
/// users only look.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[default]
    Admin,
    User,
}

impl Role {
    /// The other role.
    pub fn toggled(self) -> Self {
        match self {
            Self::Admin => Self::User,
            Self::User => Self::Admin,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }
}
