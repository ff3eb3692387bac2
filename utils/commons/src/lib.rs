//! Definitions shared across the car auction contract: the error taxonomy,
//! common type aliases and event tags.
#![cfg_attr(not(feature = "std"), no_std)]

use concordium_std::*;

mod constants;
mod errors;
mod types;

pub use self::{constants::*, errors::*, types::*};
