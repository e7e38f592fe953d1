//! RDM/E1.37-2 network interface device model: a single root device
//! reporting a fixed interface table and accepting DNS/default-route
//! configuration.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod handlers;
pub mod model;
pub mod state;
pub mod tables;

pub use model::NetworkModel;
pub use state::NetworkRoot;
