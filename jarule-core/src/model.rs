//! Model registry: the polymorphic boundary between the responder core
//! and a concrete device model (dimmer, network). Exactly one model is
//! linked into any given firmware build (selected at compile time via
//! Cargo features on `jarule-firmware`), so this is a trait a model
//! implements once rather than a runtime-selectable registry of many.

use crate::dispatch::HandlerResult;
use crate::pid::CommandClass;

/// Identifies which model a build was compiled with, reported back
/// through `DEVICE_INFO.model_id` and used in diagnostics/logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ModelId {
    Dimmer = 0x0100,
    Network = 0x0101,
}

/// The lifecycle and request-handling surface a device model exposes to
/// `jarule-firmware`. Mirrors the original firmware's per-model
/// `Initialize/Activate/Deactivate/HandleRequest` quartet; `tick` stands
/// in for periodic per-model work driven off the coarse timer (E1.37-1
/// identify-flash cadence, DHCP lease timers) that the C firmware does
/// inline in its main loop rather than as a named entry point.
pub trait Model {
    /// Dispatches a decoded, already-UID-matched request. `response` is
    /// a cursor over the shared buffer's parameter-data region; the
    /// caller (firmware glue) stamps the header/checksum from the
    /// returned result.
    fn handle_request(
        &mut self,
        command_class: CommandClass,
        sub_device: u16,
        pid: u16,
        request_data: &[u8],
        response: &mut crate::buffer::ParamWriter,
    ) -> HandlerResult;

    /// Called once when this model becomes the active model (always, in
    /// the single-model-per-build world these builds ship; retained as a
    /// named hook because the original firmware treats activation as a
    /// distinct step from construction, re-priming state that a simple
    /// `Default` wouldn't).
    fn activate(&mut self);

    /// Called before a model stops receiving requests. No shipped build
    /// actually switches models at runtime (Non-goal), so this exists
    /// for symmetry with `activate` and for tests that want to assert
    /// on a clean shutdown path.
    fn deactivate(&mut self);

    /// Advances any time-based behavior (identify flashing, etc.) by one
    /// coarse tick. `now_ticks` is whatever `CoarseTimer::now_ticks`
    /// returned.
    fn tick(&mut self, now_ticks: u32);

    /// Whether any device in this model currently has `IDENTIFY_DEVICE`
    /// set. `jarule-firmware` polls this each tick to drive the identify
    /// GPIO; the model itself owns no HAL handle.
    fn identify_active(&self) -> bool;
}
