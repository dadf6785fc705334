use crate::{
    data::aura_account::AuraAccountRepository,
    error::AppError,
    model::aura::{AuraAccount, Scope, StoredAccount},
};
use sea_orm::EntityTrait;
use test_utils::{builder::TestBuilder, factory};

mod find;
mod get_all_by_scope;
mod save;
