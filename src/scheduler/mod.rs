//! Background jobs run on a cron schedule.

pub mod lock_pruning;
