//! SeaORM entities for the aura bot database.

pub mod aura_account;
pub mod prelude;
