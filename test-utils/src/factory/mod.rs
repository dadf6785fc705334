//! Factory methods for creating test data.
//!
//! Factories insert rows with sensible defaults, reducing boilerplate in tests. Each factory
//! has a builder struct for customization and a `create_*` convenience function for quick
//! default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! // Create with defaults (amount 100 in a fresh guild scope)
//! let account = factory::create_aura_account(&db).await?;
//!
//! // Customize
//! let rich = factory::aura_account::AuraAccountFactory::new(&db)
//!     .user_id(42)
//!     .guild(7)
//!     .amount(1_500)
//!     .build()
//!     .await?;
//! ```

pub mod aura_account;
pub mod helpers;

pub use aura_account::{create_aura_account, create_aura_account_with_amount};
