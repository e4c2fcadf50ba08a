use heapless::String as HeaplessString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ApiError;

/// Role resolved by the authentication collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Faculty => write!(f, "faculty"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "faculty" => Ok(Role::Faculty),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

pub fn serialize_role<S>(value: &Role, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(match value {
        Role::Student => "student",
        Role::Faculty => "faculty",
        Role::Admin => "admin",
    })
}

pub fn deserialize_role<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    Role::from_str(&value_str)
        .map_err(|_| serde::de::Error::custom(format!("Invalid Role: {value_str}")))
}

/// Authenticated per-request identity.
///
/// Built by the (external) auth layer and passed explicitly into every core
/// operation; the core never reads identity from ambient state. The display
/// name and email are snapshotted onto complaints at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorContext {
    pub actor_id: Uuid,

    #[serde(
        serialize_with = "serialize_role",
        deserialize_with = "deserialize_role"
    )]
    pub role: Role,

    pub display_name: HeaplessString<100>,
    pub email: HeaplessString<100>,
}

impl ActorContext {
    pub fn new(actor_id: Uuid, role: Role, display_name: &str, email: &str) -> Result<Self, ApiError> {
        let display_name = HeaplessString::try_from(display_name)
            .map_err(|_| ApiError::Validation("display name exceeds 100 bytes".to_string()))?;
        let email = HeaplessString::try_from(email)
            .map_err(|_| ApiError::Validation("email exceeds 100 bytes".to_string()))?;
        Ok(ActorContext {
            actor_id,
            role,
            display_name,
            email,
        })
    }
}
