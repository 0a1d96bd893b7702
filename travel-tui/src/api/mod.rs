mod client;
mod dev_backend;
pub mod dto;

pub use client::{save_report, ApiClient, ClientError};
