#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod collaborators;
pub mod events;
pub mod processors;
pub mod receipt;
pub mod utils;
pub mod validation;
pub mod wizard;
