use reqwest::Method;

use crate::backend::{record_path, ApiResponse, BackendClient, Listing, Paginated};
use crate::entities::ride::{CreateRideRequest, Ride, RideAction, RideIdRequest, RideStatusUpdate};
use crate::error::AppResult;

#[derive(Debug, serde::Serialize)]
struct DiscountRequest<'a> {
    email: &'a str,
}

impl BackendClient {
    pub async fn create_ride(
        &self,
        token: &str,
        payload: &CreateRideRequest,
    ) -> AppResult<ApiResponse<Ride>> {
        self.send_json(Method::POST, "/ride/create", Some(token), payload)
            .await
    }

    /// Asks the backend to move a ride along; the backend decides whether it may.
    pub async fn transition_ride(
        &self,
        token: &str,
        action: RideAction,
        ride_id: &str,
    ) -> AppResult<ApiResponse<RideStatusUpdate>> {
        let body = RideIdRequest {
            ride_id: ride_id.to_string(),
        };
        self.send_json(Method::POST, action.endpoint(), Some(token), &body)
            .await
    }

    /// Rides belonging to the caller (rider history or driver assignments).
    pub async fn my_rides(&self, token: &str) -> AppResult<ApiResponse<Listing<Ride>>> {
        self.get("/ride/get-ride-info", Some(token), &[]).await
    }

    pub async fn all_rides(
        &self,
        token: Option<&str>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> AppResult<ApiResponse<Paginated<Ride>>> {
        let mut query = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        self.get("/ride/get-all", token, &query).await
    }

    pub async fn ride(&self, token: Option<&str>, ride_id: &str) -> AppResult<ApiResponse<Ride>> {
        self.get(&record_path("/ride/get", ride_id)?, token, &[]).await
    }

    /// Emails a one-off promo code ("discount OTP") to a rider.
    pub async fn send_discount_code(
        &self,
        token: &str,
        email: &str,
    ) -> AppResult<ApiResponse<serde_json::Value>> {
        self.send_json(Method::POST, "/ride/discount", Some(token), &DiscountRequest { email })
            .await
    }
}
