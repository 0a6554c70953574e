use reqwest::Method;

use crate::backend::{ApiResponse, BackendClient, Listing};
use crate::entities::payment::Payment;
use crate::error::AppResult;
use crate::utils::html::with_query;

/// Result reported by the payment gateway's redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Success,
    Fail,
    Cancel,
}

impl PaymentOutcome {
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "success" => Some(PaymentOutcome::Success),
            "fail" => Some(PaymentOutcome::Fail),
            "cancel" => Some(PaymentOutcome::Cancel),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            PaymentOutcome::Success => "success",
            PaymentOutcome::Fail => "fail",
            PaymentOutcome::Cancel => "cancel",
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            PaymentOutcome::Success => "Payment successful",
            PaymentOutcome::Fail => "Payment failed",
            PaymentOutcome::Cancel => "Payment cancelled",
        }
    }
}

impl BackendClient {
    pub async fn report_payment(
        &self,
        outcome: PaymentOutcome,
        query: &[(String, String)],
    ) -> AppResult<ApiResponse<serde_json::Value>> {
        let pairs: Vec<(&str, &str)> = query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let path = with_query(&format!("/payment/{}", outcome.slug()), &pairs);
        self.send_empty(Method::POST, &path, None).await
    }

    pub async fn payments(&self, token: &str) -> AppResult<ApiResponse<Listing<Payment>>> {
        self.get("/payment/get-payment", Some(token), &[]).await
    }
}
