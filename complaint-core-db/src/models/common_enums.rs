use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Database model for complaint category enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "complaint_category", rename_all = "PascalCase")]
pub enum Category {
    Academic,
    Infrastructure,
    Mess,
    Hostel,
    Library,
    Other,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Academic => write!(f, "Academic"),
            Category::Infrastructure => write!(f, "Infrastructure"),
            Category::Mess => write!(f, "Mess"),
            Category::Hostel => write!(f, "Hostel"),
            Category::Library => write!(f, "Library"),
            Category::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Academic" => Ok(Category::Academic),
            "Infrastructure" => Ok(Category::Infrastructure),
            "Mess" => Ok(Category::Mess),
            "Hostel" => Ok(Category::Hostel),
            "Library" => Ok(Category::Library),
            "Other" => Ok(Category::Other),
            _ => Err(()),
        }
    }
}

pub fn serialize_category<S>(value: &Category, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(match value {
        Category::Academic => "Academic",
        Category::Infrastructure => "Infrastructure",
        Category::Mess => "Mess",
        Category::Hostel => "Hostel",
        Category::Library => "Library",
        Category::Other => "Other",
    })
}

pub fn deserialize_category<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    Category::from_str(&value_str)
        .map_err(|_| serde::de::Error::custom(format!("Invalid Category: {value_str}")))
}

/// Database model for complaint priority enum
///
/// Priority is fixed at creation time; the SLA due date is derived from it
/// exactly once and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "complaint_priority", rename_all = "PascalCase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
            Priority::Urgent => write!(f, "Urgent"),
        }
    }
}

impl FromStr for Priority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Priority::Low),
            "Medium" => Ok(Priority::Medium),
            "High" => Ok(Priority::High),
            "Urgent" => Ok(Priority::Urgent),
            _ => Err(()),
        }
    }
}

pub fn serialize_priority<S>(value: &Priority, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(match value {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
        Priority::Urgent => "Urgent",
    })
}

pub fn deserialize_priority<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    Priority::from_str(&value_str)
        .map_err(|_| serde::de::Error::custom(format!("Invalid Priority: {value_str}")))
}

/// Database model for complaint status enum
///
/// Any handler or administrator may move a complaint between any two states,
/// including re-opening a Resolved or Rejected complaint. The permissive
/// transition graph is a documented contract, not an omission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "complaint_status", rename_all = "PascalCase")]
pub enum Status {
    Pending,
    #[serde(rename = "In Progress")]
    #[sqlx(rename = "In Progress")]
    InProgress,
    Resolved,
    Rejected,
}

impl Default for Status {
    fn default() -> Self {
        Status::Pending
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Pending => write!(f, "Pending"),
            Status::InProgress => write!(f, "In Progress"),
            Status::Resolved => write!(f, "Resolved"),
            Status::Rejected => write!(f, "Rejected"),
        }
    }
}

impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Status::Pending),
            "In Progress" => Ok(Status::InProgress),
            "Resolved" => Ok(Status::Resolved),
            "Rejected" => Ok(Status::Rejected),
            _ => Err(()),
        }
    }
}

pub fn serialize_status<S>(value: &Status, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(match value {
        Status::Pending => "Pending",
        Status::InProgress => "In Progress",
        Status::Resolved => "Resolved",
        Status::Rejected => "Rejected",
    })
}

pub fn deserialize_status<'de, D>(deserializer: D) -> Result<Status, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    Status::from_str(&value_str)
        .map_err(|_| serde::de::Error::custom(format!("Invalid Status: {value_str}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_creation_contract() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(Status::default(), Status::Pending);
    }

    #[test]
    fn status_display_round_trips() {
        for status in [
            Status::Pending,
            Status::InProgress,
            Status::Resolved,
            Status::Rejected,
        ] {
            assert_eq!(status.to_string().parse::<Status>(), Ok(status));
        }
        assert_eq!(Status::InProgress.to_string(), "In Progress");
    }

    #[test]
    fn unknown_enum_strings_are_rejected() {
        assert!("Escalated".parse::<Status>().is_err());
        assert!("Critical".parse::<Priority>().is_err());
        assert!("Sports".parse::<Category>().is_err());
    }
}
