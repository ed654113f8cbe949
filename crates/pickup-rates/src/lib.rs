pub mod evaluate;
pub mod plugin;

pub use evaluate::{delivery_cost, evaluate, is_allowed_weight};
pub use plugin::{RegionalPickup, ShippingRequest};
