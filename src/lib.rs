//! Payhook - payment-gateway webhook ingestion service
//!
//! Receives payment callbacks from the gateway, records each transaction
//! exactly once, and reconciles the matching order's payment status in the
//! backing store.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
