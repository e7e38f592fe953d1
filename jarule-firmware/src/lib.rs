//! Firmware glue: wires exactly one device model (selected at compile
//! time via a Cargo feature) to the HAL traits and exposes the
//! `Responder` entry point a transport driver calls into on every
//! received frame.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(any(test, feature = "model-dimmer", feature = "model-network")))]
compile_error!("jarule-firmware requires exactly one of the `model-dimmer` / `model-network` features");

#[cfg(all(feature = "model-dimmer", feature = "model-network"))]
compile_error!("`model-dimmer` and `model-network` are mutually exclusive");

pub mod config;
pub mod hal;
pub mod responder;

pub use config::BuildConfig;
pub use hal::{CoarseTimer, IdentifyIndicator, NullHal, Transceiver};
pub use responder::{ReceiveOutcome, Responder};

#[cfg(feature = "model-dimmer")]
pub type ActiveModel = jarule_dimmer::DimmerModel;

#[cfg(feature = "model-network")]
pub type ActiveModel = jarule_network::NetworkModel;
