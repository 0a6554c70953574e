use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::vehicle::Vehicle;
use crate::utils::geo::LatLng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Rider,
    Driver,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Rider, UserRole::Driver];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Rider => "Rider",
            UserRole::Driver => "Driver",
        }
    }

    /// Path prefix of the dashboard this role may enter.
    pub fn dashboard_prefix(&self) -> &'static str {
        match self {
            UserRole::Admin => "/Admin",
            UserRole::Rider => "/Rider",
            UserRole::Driver => "/Driver",
        }
    }

    /// Landing page of the role's dashboard.
    pub fn dashboard_home(&self) -> &'static str {
        match self {
            UserRole::Admin => "/Admin/state",
            UserRole::Rider => "/Rider/profile",
            UserRole::Driver => "/Driver/profile",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub driver_profile: Option<DriverProfile>,
}

impl User {
    /// First letter of the name, upper-cased, for avatar fallbacks.
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverProfile {
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub accepted_ride: Option<u32>,
    #[serde(default)]
    pub income: Option<f64>,
    #[serde(default)]
    pub location: Option<LatLng>,
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
}

/// A user reference that the backend sends either populated or as a bare id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Populated(Box<UserSummary>),
    Id(String),
}

impl UserRef {
    pub fn id(&self) -> &str {
        match self {
            UserRef::Populated(user) => &user.id,
            UserRef::Id(id) => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            UserRef::Populated(user) => Some(&user.name),
            UserRef::Id(_) => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            UserRef::Populated(user) => user.email.as_deref(),
            UserRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub is_verified: Option<bool>,
}
