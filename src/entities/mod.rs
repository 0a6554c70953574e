pub mod payment;
pub mod rating;
pub mod ride;
pub mod stats;
pub mod user;
pub mod vehicle;
