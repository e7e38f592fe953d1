//! Sub-device routing: maps a request's `sub_device` field onto the root
//! device, one specific sub-device, or (for `SUBDEVICE_ALL`) every
//! sub-device in turn, and enforces write-protect locking ahead of
//! dispatch.

use crate::dispatch::{dispatch_pid, HandlerResult, PidDescriptor};
use crate::pid::{nack, CommandClass};
use crate::responder::ResponderLike;
use crate::buffer::ParamWriter;

pub const SUBDEVICE_ROOT: u16 = 0;
pub const SUBDEVICE_MAX: u16 = 0x0200;
pub const SUBDEVICE_ALL: u16 = 0xffff;

/// Write-protect state a sub-device may be in (E1.37-1 `LOCK_STATE`).
/// When locked, every SET other than one that unlocks (`LOCK_PIN`/
/// `LOCK_STATE` with the correct PIN) is rejected before it ever reaches
/// the model's handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    Locked,
}

/// What routing concluded, before the caller stamps the wire response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Handled(HandlerResult),
    /// `sub_device` named a device that does not exist in this
    /// instance's table.
    OutOfRange,
}

/// Scoped cursor over "the sub-device currently being dispatched to",
/// mirroring the firmware's single `g_active_device` pointer but
/// restored unconditionally on drop rather than by convention at every
/// return site.
struct ActiveDeviceGuard<'a> {
    slot: &'a mut Option<usize>,
}

impl<'a> ActiveDeviceGuard<'a> {
    fn enter(slot: &'a mut Option<usize>, index: usize) -> Self {
        *slot = Some(index);
        ActiveDeviceGuard { slot }
    }
}

impl Drop for ActiveDeviceGuard<'_> {
    fn drop(&mut self) {
        *self.slot = None;
    }
}

/// One routable device: its sub-device number (0 for the root device,
/// 1..=count for sub-devices) paired with its lock state and handler
/// state.
pub struct RoutedDevice<'a, S> {
    pub sub_device_number: u16,
    pub lock_state: LockState,
    pub state: &'a mut S,
}

/// PIDs allowed through even while locked: the unlock mechanism itself.
fn is_unlock_pid(pid: u16) -> bool {
    pid == crate::pid::param::LOCK_PIN || pid == crate::pid::param::LOCK_STATE
}

/// Routes `(sub_device, command_class, pid, request_data)` to the
/// matching device(s) in `devices`, enforcing the lock, and dispatching
/// against `table`. For `SUBDEVICE_ALL` every non-root device is
/// dispatched to in order and the *last* result is returned (ja-rule's
/// `DimmerModel_HandleRequest` loop overwrites `response_size` on every
/// iteration rather than resetting between sub-devices, so a broadcast
/// SET's ack reflects only the final sub-device visited).
pub fn dispatch_to_subdevices<S: ResponderLike>(
    devices: &mut [RoutedDevice<'_, S>],
    active_cursor: &mut Option<usize>,
    table: &[PidDescriptor<S>],
    sub_device: u16,
    command_class: CommandClass,
    pid: u16,
    request_data: &[u8],
    response: &mut ParamWriter,
) -> RouteOutcome {
    match sub_device {
        SUBDEVICE_ROOT => {
            let Some(index) = devices.iter().position(|d| d.sub_device_number == SUBDEVICE_ROOT)
            else {
                return RouteOutcome::OutOfRange;
            };
            RouteOutcome::Handled(dispatch_one(devices, active_cursor, table, index, command_class, pid, request_data, response))
        }
        SUBDEVICE_ALL => {
            let indices: heapless::Vec<usize, 32> = devices
                .iter()
                .enumerate()
                .filter(|(_, d)| d.sub_device_number != SUBDEVICE_ROOT)
                .map(|(i, _)| i)
                .collect();
            let mut last = HandlerResult::NoResponse;
            for index in indices {
                last = dispatch_one(devices, active_cursor, table, index, command_class, pid, request_data, response);
            }
            RouteOutcome::Handled(last)
        }
        n if n < SUBDEVICE_MAX => {
            let Some(index) = devices.iter().position(|d| d.sub_device_number == n) else {
                return RouteOutcome::OutOfRange;
            };
            RouteOutcome::Handled(dispatch_one(devices, active_cursor, table, index, command_class, pid, request_data, response))
        }
        _ => RouteOutcome::OutOfRange,
    }
}

fn dispatch_one<S: ResponderLike>(
    devices: &mut [RoutedDevice<'_, S>],
    active_cursor: &mut Option<usize>,
    table: &[PidDescriptor<S>],
    index: usize,
    command_class: CommandClass,
    pid: u16,
    request_data: &[u8],
    response: &mut ParamWriter,
) -> HandlerResult {
    let _guard = ActiveDeviceGuard::enter(active_cursor, index);
    let device = &mut devices[index];
    if device.lock_state == LockState::Locked
        && command_class == CommandClass::SetCommand
        && !is_unlock_pid(pid)
    {
        return HandlerResult::Nack(nack::WRITE_PROTECT);
    }
    dispatch_pid(device.state, table, command_class, pid, request_data, response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::{ResponderDefinition, ResponderState};

    struct Fixture {
        def: &'static ResponderDefinition,
        state: ResponderState,
    }

    static DEF: ResponderDefinition = ResponderDefinition {
        model_id: 1,
        product_category: 0,
        software_version_id: 1,
        software_version_label: "1.0.0",
        model_description: "Fixture",
        manufacturer_label: "Test",
        product_detail_ids: &[],
        personalities: &[],
        sensors: &[],
        footprint_of: |_| 0,
    };

    impl ResponderLike for Fixture {
        fn definition(&self) -> &'static ResponderDefinition {
            self.def
        }
        fn state(&self) -> &ResponderState {
            &self.state
        }
        fn state_mut(&mut self) -> &mut ResponderState {
            &mut self.state
        }
        fn model_supported_pids(&self) -> &'static [u16] {
            &[]
        }
    }

    fn get_device_label(s: &Fixture, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
        crate::responder::device_label_get(s, _data, w)
    }
    fn set_device_label(s: &mut Fixture, data: &[u8]) -> HandlerResult {
        crate::responder::device_label_set(s, data)
    }

    fn table() -> [PidDescriptor<Fixture>; 1] {
        [PidDescriptor {
            pid: crate::pid::param::DEVICE_LABEL,
            get: Some(get_device_label),
            set: Some(set_device_label),
            min_get_pdl: 0,
        }]
    }

    #[test]
    fn out_of_range_subdevice_is_reported() {
        let mut root_state = Fixture { def: &DEF, state: ResponderState::default() };
        let mut devices = [RoutedDevice { sub_device_number: 0, lock_state: LockState::Unlocked, state: &mut root_state }];
        let t = table();
        let mut cursor = None;
        let mut backing = [0u8; 64];
        let mut w = ParamWriter::new(&mut backing);
        let outcome = dispatch_to_subdevices(&mut devices, &mut cursor, &t, 5, CommandClass::GetCommand, crate::pid::param::DEVICE_LABEL, &[], &mut w);
        assert_eq!(outcome, RouteOutcome::OutOfRange);
        assert!(cursor.is_none());
    }

    #[test]
    fn locked_subdevice_rejects_set() {
        let mut sub_state = Fixture { def: &DEF, state: ResponderState::default() };
        let mut devices = [RoutedDevice { sub_device_number: 1, lock_state: LockState::Locked, state: &mut sub_state }];
        let t = table();
        let mut cursor = None;
        let mut backing = [0u8; 64];
        let mut w = ParamWriter::new(&mut backing);
        let outcome = dispatch_to_subdevices(&mut devices, &mut cursor, &t, 1, CommandClass::SetCommand, crate::pid::param::DEVICE_LABEL, b"x", &mut w);
        assert_eq!(outcome, RouteOutcome::Handled(HandlerResult::Nack(nack::WRITE_PROTECT)));
    }

    #[test]
    fn all_subdevices_returns_last_result() {
        let mut s1 = Fixture { def: &DEF, state: ResponderState::default() };
        let mut s2 = Fixture { def: &DEF, state: ResponderState::default() };
        let mut devices = [
            RoutedDevice { sub_device_number: 1, lock_state: LockState::Unlocked, state: &mut s1 },
            RoutedDevice { sub_device_number: 2, lock_state: LockState::Unlocked, state: &mut s2 },
        ];
        let t = table();
        let mut cursor = None;
        let mut backing = [0u8; 64];
        let mut w = ParamWriter::new(&mut backing);
        let outcome = dispatch_to_subdevices(&mut devices, &mut cursor, &t, SUBDEVICE_ALL, CommandClass::SetCommand, crate::pid::param::DEVICE_LABEL, b"All", &mut w);
        assert_eq!(outcome, RouteOutcome::Handled(HandlerResult::Ack(0)));
        assert_eq!(s2.state.device_label.as_str(), "All");
    }
}
