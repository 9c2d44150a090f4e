//! SeaORM entities.

pub mod waitlist_entry;
