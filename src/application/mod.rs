//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers mutate orders under a per-order lock; the query handler
//! reads them.

pub mod handlers;

pub use handlers::{
    AdvancePhaseCommand, AdvancePhaseHandler, CreateOrderCommand, CreateOrderHandler,
    DeleteOrderCommand, DeleteOrderHandler, GetOrderHandler, GetOrderQuery, OrderCommandResult,
    OrderLocks, SetPhaseCommand, SetPhaseHandler, UpdateOrderCommand, UpdateOrderHandler,
};
