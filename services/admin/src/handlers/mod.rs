pub mod auth;
pub mod guardian;
pub mod membership;
pub mod menu;
pub mod role;
pub mod school;
pub mod stats;
pub mod subject;
pub mod unit;
pub mod user;
