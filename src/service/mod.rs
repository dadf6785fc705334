//! Business logic layer.
//!
//! Services coordinate repositories and the domain rules; the bot layer only parses
//! arguments and renders what services return.

pub mod aura;
