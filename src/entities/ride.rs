use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::user::UserRef;
use crate::utils::geo::LatLng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RideStatus {
    Requested,
    Accepted,
    Started,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl RideStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Requested => "requested",
            RideStatus::Accepted => "accepted",
            RideStatus::Started => "started",
            RideStatus::Completed => "completed",
            RideStatus::Cancelled => "cancelled",
            RideStatus::Unknown => "unknown",
        }
    }

    /// The single action a driver can take next. Terminal states have none.
    pub fn next_driver_action(&self) -> Option<RideAction> {
        match self {
            RideStatus::Requested => Some(RideAction::Accept),
            RideStatus::Accepted => Some(RideAction::Start),
            RideStatus::Started => Some(RideAction::Complete),
            RideStatus::Completed | RideStatus::Cancelled | RideStatus::Unknown => None,
        }
    }

    /// Rides a driver still has to work on.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            RideStatus::Requested | RideStatus::Accepted | RideStatus::Started
        )
    }

    /// Riders may only withdraw a request nobody has accepted yet.
    pub fn is_cancellable(&self) -> bool {
        *self == RideStatus::Requested
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            RideStatus::Completed => "badge badge-green",
            RideStatus::Requested => "badge badge-yellow",
            RideStatus::Cancelled => "badge badge-red",
            _ => "badge badge-blue",
        }
    }
}

impl std::fmt::Display for RideStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transition requests the client can send for a ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RideAction {
    Accept,
    Start,
    Complete,
    Cancel,
}

impl RideAction {
    pub fn endpoint(&self) -> &'static str {
        match self {
            RideAction::Accept => "/ride/accept-ride",
            RideAction::Start => "/ride/start-ride",
            RideAction::Complete => "/ride/complete-ride",
            RideAction::Cancel => "/ride/cancel-ride",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            RideAction::Accept => "accept",
            RideAction::Start => "start",
            RideAction::Complete => "complete",
            RideAction::Cancel => "cancel",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "accept" => Some(RideAction::Accept),
            "start" => Some(RideAction::Start),
            "complete" => Some(RideAction::Complete),
            "cancel" => Some(RideAction::Cancel),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RideAction::Accept => "Accept Ride",
            RideAction::Start => "Start Ride",
            RideAction::Complete => "Complete Ride",
            RideAction::Cancel => "Cancel Ride",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            RideAction::Accept => "accepted",
            RideAction::Start => "started",
            RideAction::Complete => "completed",
            RideAction::Cancel => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub rider: Option<UserRef>,
    #[serde(default)]
    pub driver: Option<UserRef>,
    pub start_ride: LatLng,
    pub end_ride: LatLng,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub fare: Option<f64>,
    pub ride_status: RideStatus,
    #[serde(default)]
    pub promo_code: Option<String>,
    #[serde(default)]
    pub ride_history: Vec<RideHistoryEntry>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideHistoryEntry {
    pub status: RideStatus,
    pub time: DateTime<Utc>,
}

/// Body of `POST /ride/create`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRideRequest {
    pub start_ride: LatLng,
    pub end_ride: LatLng,
    pub rider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
}

/// Body of every transition endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideIdRequest {
    pub ride_id: String,
}

/// Returned by transition endpoints; only the status is consumed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideStatusUpdate {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub ride_status: RideStatus,
}
