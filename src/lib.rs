//! Order Tracker - order lifecycle tracking service
//!
//! Orders move through a fixed seven-phase production and shipping timeline.
//! This crate keeps each order's timeline, progress cursor, current phase
//! label and coarse status consistent with one another.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
