//! Domain models for the aura economy.
//!
//! Models are independent of the database entity layout and of Discord types. The data layer
//! converts stored rows into these models at the repository boundary; the bot layer converts
//! Discord users into `Player`s before calling the service layer.

pub mod aura;
pub mod outcome;
