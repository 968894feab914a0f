//! The policy engine proper: pure decision logic over state the handlers
//! read from the store. Nothing in here talks to Telegram or Mongo directly,
//! which is what keeps the invariants testable.

pub mod broadcast;
pub mod censor;
pub mod countdown;
pub mod filters;
pub mod permissions;
pub mod roles;
pub mod warnings;
