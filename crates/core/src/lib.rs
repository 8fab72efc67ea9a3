//! Core money logic for Bodega.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Amounts are `rust_decimal::Decimal` throughout; nothing here touches floats.
//!
//! # Modules
//!
//! - `locale` - Locale-aware number parsing, formatting and live input
//! - `currency` - Rate registry, conversions and currency-styled display
//! - `settlement` - Point-of-sale and accounts-receivable reconciliation
//! - `business` - Business profile and feature flags

pub mod business;
pub mod currency;
pub mod locale;
pub mod settlement;
