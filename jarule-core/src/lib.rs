//! RDM (Remote Device Management, ANSI E1.20 + E1.37-x) responder engine.
//!
//! This crate is the transport-agnostic core of a DMX512/RDM responder: it
//! decodes RDM frames off a byte buffer handed to it by a transceiver driver,
//! matches UIDs, dispatches command-class/PID pairs against a per-model
//! PID table, enforces sub-device routing and write-protect locking, and
//! assembles replies back into the same kind of buffer. It does not own a
//! transceiver, a timer, or any host transport; those are external
//! collaborators (see `jarule-firmware::hal`).
//!
//! No dynamic allocation: buffers are fixed-size and stack- or
//! caller-owned. No panics outside tests: every fallible path returns a
//! typed result.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod buffer;
pub mod dispatch;
pub mod discovery;
pub mod frame;
pub mod logger;
pub mod model;
pub mod pid;
pub mod responder;
pub mod router;
pub mod uid;

pub use buffer::{ParamWriter, RdmBuffer, HEADER_SIZE, MAX_PARAM_DATA, RDM_BUFFER_SIZE};
pub use dispatch::{dispatch_pid, GetHandler, HandlerResult, PidDescriptor, SetHandler};
pub use discovery::{handle_discovery, DubResponse};
pub use frame::{FrameError, RdmHeader};
pub use model::{Model, ModelId};
pub use pid::{nack, CommandClass, NackReason, ResponseType};
pub use responder::{
    PersonalityDefinition, ResponderDefinition, ResponderLike, ResponderState, SensorDefinition,
    SlotDefinition, SlotLabel, SlotType,
};
pub use router::{dispatch_to_subdevices, LockState, RouteOutcome, SUBDEVICE_ALL, SUBDEVICE_MAX,
    SUBDEVICE_ROOT};
pub use uid::Uid;
