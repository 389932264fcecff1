pub mod access;
pub mod auth;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod export;
pub mod lifecycle;
pub mod models;
pub mod notify;
pub mod query;
pub mod reports;
pub mod seed;
pub mod service;
pub mod state;
pub mod storage;

pub use error::{AppError, Result};
pub use service::LeaveDesk;
