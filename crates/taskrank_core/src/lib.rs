pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod model;
pub mod payload;
pub mod render;

pub use client::{Endpoint, HttpScoringClient, ResponseBody, ScoringApi};
pub use controller::Controller;
pub use error::AppError;
pub use form::TaskForm;
