//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod order;

pub use order::{
    AdvancePhaseCommand, AdvancePhaseHandler, CreateOrderCommand, CreateOrderHandler,
    DeleteOrderCommand, DeleteOrderHandler, GetOrderHandler, GetOrderQuery, OrderCommandResult,
    OrderIdGenerator, OrderLocks, SetPhaseCommand, SetPhaseHandler, UpdateOrderCommand,
    UpdateOrderHandler,
};
