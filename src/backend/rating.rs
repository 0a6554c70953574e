use reqwest::Method;

use crate::backend::{ApiResponse, BackendClient, Listing};
use crate::entities::rating::{CreateRatingRequest, Rating};
use crate::error::AppResult;

impl BackendClient {
    pub async fn create_rating(
        &self,
        token: &str,
        payload: &CreateRatingRequest,
    ) -> AppResult<ApiResponse<Rating>> {
        self.send_json(Method::POST, "/rating/create", Some(token), payload)
            .await
    }

    pub async fn ratings(&self, token: &str) -> AppResult<ApiResponse<Listing<Rating>>> {
        self.get("/rating/get-all", Some(token), &[]).await
    }
}
