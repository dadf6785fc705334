//! Prefix command parsing.

pub mod aura;
