//! Table reservations
//!
//! [`TableBook`] tracks which slots each table holds; [`ReservationDesk`]
//! layers bookings, expiry and the waitlist on top.

mod desk;
mod table_book;

pub use desk::ReservationDesk;
pub use table_book::{TableBook, TableError, default_tables};
