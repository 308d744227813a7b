//! Order command and query handlers.

mod advance_phase;
mod create_order;
mod delete_order;
mod get_order;
mod order_id_generator;
mod order_locks;
mod set_phase;
mod side_effects;
mod update_order;

pub use advance_phase::{AdvancePhaseCommand, AdvancePhaseHandler};
pub use create_order::{CreateOrderCommand, CreateOrderHandler};
pub use delete_order::{DeleteOrderCommand, DeleteOrderHandler};
pub use get_order::{GetOrderHandler, GetOrderQuery};
pub use order_id_generator::{OrderIdGenerator, DEFAULT_MAX_ATTEMPTS};
pub use order_locks::{OrderGuard, OrderLocks};
pub use set_phase::{SetPhaseCommand, SetPhaseHandler};
pub use side_effects::OrderCommandResult;
pub use update_order::{UpdateOrderCommand, UpdateOrderHandler};
