//! API Routes
//!
//! Route handlers organized by functionality.

pub mod accounts;
pub mod health;
pub mod link;
pub mod page;
pub mod portfolio;
