pub use super::aura_account::Entity as AuraAccount;
