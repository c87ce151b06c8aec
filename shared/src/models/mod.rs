//! Data models
//!
//! Shared between lounge-server and lounge-client (via API).
//! All IDs are `i64`.

pub mod dashboard;
pub mod event;
pub mod menu_item;
pub mod order;
pub mod reservation;
pub mod staff;
pub mod table;

// Re-exports
pub use dashboard::*;
pub use event::*;
pub use menu_item::*;
pub use order::*;
pub use reservation::*;
pub use staff::*;
pub use table::*;
