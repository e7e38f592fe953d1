//! RDM/E1.37-1 dimmer device model: a root device with presets, failsafe
//! and lock settings plus `DMX_BLOCK_ADDRESS`, and four single-slot
//! dimmer sub-devices.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod handlers;
pub mod model;
pub mod state;
pub mod tables;

pub use model::DimmerModel;
pub use state::{DimmerRoot, DimmerSubDevice};
