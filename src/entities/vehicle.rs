use serde::{Deserialize, Serialize};

use crate::utils::serde_ext::lenient_u16;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub owner: Option<String>,
    pub model: String,
    #[serde(default, deserialize_with = "lenient_u16")]
    pub year: Option<u16>,
    #[serde(default, deserialize_with = "lenient_u16")]
    pub max_capacity: Option<u16>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub vehicle_image: Option<String>,
}

/// Vehicle kinds offered by the registration and vehicle forms.
pub const VEHICLE_KINDS: [&str; 3] = ["Car", "Bike", "CNG"];
