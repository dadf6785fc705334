//! Database repository layer.
//!
//! Repositories run queries through SeaORM and convert entity rows into domain models, keeping
//! the service layer free of storage details.

pub mod aura_account;

#[cfg(test)]
mod test;
