//! Persistence for the three collections: users, students and the attendance ledger.
//!
//! No referential integrity is enforced between them; an attendance row may
//! name a student that was never registered.

pub mod attendance;
pub mod students;
pub mod users;
