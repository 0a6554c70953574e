use reqwest::{multipart::Form, Method};
use serde::{Deserialize, Serialize};

use crate::backend::{record_path, ApiResponse, BackendClient, Paginated};
use crate::entities::ride::Ride;
use crate::entities::stats::AdminStats;
use crate::entities::user::User;
use crate::error::AppResult;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangeVerificationRequest<'a> {
    user_id: &'a str,
    is_verify: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideCount {
    #[serde(default)]
    pub ride_count: u64,
}

impl BackendClient {
    pub async fn users(
        &self,
        token: &str,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> AppResult<ApiResponse<Paginated<User>>> {
        let mut query = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(term) = search {
            query.push(("searchTerm", term.to_string()));
        }
        self.get("/user/get", Some(token), &query).await
    }

    pub async fn user(&self, token: &str, user_id: &str) -> AppResult<ApiResponse<User>> {
        self.get(&record_path("/user/get", user_id)?, Some(token), &[])
            .await
    }

    pub async fn change_verification(
        &self,
        token: &str,
        user_id: &str,
        is_verify: bool,
    ) -> AppResult<ApiResponse<serde_json::Value>> {
        let body = ChangeVerificationRequest { user_id, is_verify };
        self.send_json(Method::PATCH, "/user/change-verification", Some(token), &body)
            .await
    }

    pub async fn delete_user(
        &self,
        token: &str,
        user_id: &str,
    ) -> AppResult<ApiResponse<serde_json::Value>> {
        let path = record_path("/user/delete", user_id)?;
        self.send_empty(Method::DELETE, &path, Some(token)).await
    }

    pub async fn admin_stats(&self, token: &str) -> AppResult<ApiResponse<AdminStats>> {
        self.get("/user/admin-states", Some(token), &[]).await
    }

    pub async fn ride_count(&self, token: &str) -> AppResult<ApiResponse<RideCount>> {
        self.get("/user/ride-count", Some(token), &[]).await
    }

    pub async fn update_user(
        &self,
        token: &str,
        user_id: &str,
        payload: &UpdateProfileRequest,
    ) -> AppResult<ApiResponse<User>> {
        let path = record_path("/user/update", user_id)?;
        self.send_json(Method::PATCH, &path, Some(token), payload)
            .await
    }

    pub async fn driver_completed_rides(
        &self,
        token: &str,
        page: u32,
        limit: u32,
    ) -> AppResult<ApiResponse<Paginated<Ride>>> {
        let query = [("page", page.to_string()), ("limit", limit.to_string())];
        self.get("/user/driver-complete-ride", Some(token), &query)
            .await
    }

    pub async fn create_vehicle(
        &self,
        token: &str,
        form: Form,
    ) -> AppResult<ApiResponse<serde_json::Value>> {
        self.send_multipart("/user/driver/create/vehicle", Some(token), form)
            .await
    }

    pub async fn delete_vehicle(
        &self,
        token: &str,
        vehicle_id: &str,
    ) -> AppResult<ApiResponse<serde_json::Value>> {
        let path = record_path("/user/driver/delete/vehicle", vehicle_id)?;
        self.send_empty(Method::DELETE, &path, Some(token)).await
    }
}
