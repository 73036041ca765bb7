//! Wire and domain types shared by the gateway client and the desktop shell.

pub mod domain;
pub mod error;
pub mod protocol;
