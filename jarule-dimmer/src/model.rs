//! The dimmer `Model`: owns the root device and its four sub-devices and
//! wires PID dispatch through `jarule_core::router` against the tables in
//! `tables.rs`, special-casing the two PIDs that don't fit a single
//! device's state (`DMX_BLOCK_ADDRESS`, which spans every sub-device, and
//! `RESET_DEVICE`, which has none).

use jarule_core::buffer::ParamWriter;
use jarule_core::dispatch::HandlerResult;
use jarule_core::model::Model;
use jarule_core::pid::{nack, param, CommandClass};
use jarule_core::responder;
use jarule_core::router::{self, LockState, RouteOutcome, RoutedDevice};

use crate::handlers::{self, BlockAddressContext};
use crate::state::{new_subdevices, DimmerRoot, DimmerSubDevice, LOCK_STATE_ALL_LOCKED, LOCK_STATE_UNLOCKED};

pub struct DimmerModel {
    root: DimmerRoot,
    subdevices: [DimmerSubDevice; 4],
    active_cursor: Option<usize>,
}

impl Default for DimmerModel {
    fn default() -> Self {
        DimmerModel {
            root: DimmerRoot::default(),
            subdevices: new_subdevices(),
            active_cursor: None,
        }
    }
}

impl DimmerModel {
    /// The root device is never write-protected by its own `LOCK_STATE`:
    /// locking it out would make the lock un-administerable (there's no
    /// other path to `LOCK_PIN`/`LOCK_STATE`). `lock_state` only ever
    /// gates sub-devices; see `subdevice_lock_state`.
    fn root_lock_state(&self) -> LockState {
        LockState::Unlocked
    }

    fn subdevice_lock_state(&self) -> LockState {
        if self.root.lock_state == LOCK_STATE_UNLOCKED {
            LockState::Unlocked
        } else {
            LockState::Locked
        }
    }
}

impl Model for DimmerModel {
    fn handle_request(
        &mut self,
        command_class: CommandClass,
        sub_device: u16,
        pid: u16,
        request_data: &[u8],
        response: &mut ParamWriter,
    ) -> HandlerResult {
        if pid == param::RESET_DEVICE {
            return match command_class {
                CommandClass::SetCommand => responder::reset_device_set(request_data),
                _ => HandlerResult::Nack(nack::UNSUPPORTED_COMMAND_CLASS),
            };
        }

        if pid == param::DMX_BLOCK_ADDRESS && sub_device == router::SUBDEVICE_ROOT {
            let mut ctx = BlockAddressContext {
                subdevices: &mut self.subdevices,
            };
            return match command_class {
                CommandClass::GetCommand => handlers::dmx_block_address_get(&ctx, request_data, response),
                CommandClass::SetCommand => handlers::dmx_block_address_set(&mut ctx, request_data),
                _ => HandlerResult::Nack(nack::UNSUPPORTED_COMMAND_CLASS),
            };
        }

        if command_class == CommandClass::GetCommand && sub_device == router::SUBDEVICE_ALL {
            return HandlerResult::Nack(nack::SUB_DEVICE_OUT_OF_RANGE);
        }

        if sub_device == router::SUBDEVICE_ROOT {
            let root_lock = self.root_lock_state();
            let mut devices = [RoutedDevice {
                sub_device_number: router::SUBDEVICE_ROOT,
                lock_state: root_lock,
                state: &mut self.root,
            }];
            let outcome = router::dispatch_to_subdevices(
                &mut devices,
                &mut self.active_cursor,
                crate::tables::ROOT_TABLE,
                router::SUBDEVICE_ROOT,
                command_class,
                pid,
                request_data,
                response,
            );
            return match outcome {
                RouteOutcome::Handled(r) => r,
                RouteOutcome::OutOfRange => HandlerResult::Nack(nack::SUB_DEVICE_OUT_OF_RANGE),
            };
        }

        let sub_lock = self.subdevice_lock_state();
        let mut devices: [RoutedDevice<'_, DimmerSubDevice>; 4] = [
            RoutedDevice { sub_device_number: self.subdevices[0].index, lock_state: sub_lock, state: &mut self.subdevices[0] },
            RoutedDevice { sub_device_number: self.subdevices[1].index, lock_state: sub_lock, state: &mut self.subdevices[1] },
            RoutedDevice { sub_device_number: self.subdevices[2].index, lock_state: sub_lock, state: &mut self.subdevices[2] },
            RoutedDevice { sub_device_number: self.subdevices[3].index, lock_state: sub_lock, state: &mut self.subdevices[3] },
        ];
        let outcome = router::dispatch_to_subdevices(
            &mut devices,
            &mut self.active_cursor,
            crate::tables::SUBDEVICE_TABLE,
            sub_device,
            command_class,
            pid,
            request_data,
            response,
        );
        match outcome {
            RouteOutcome::Handled(r) => r,
            RouteOutcome::OutOfRange => HandlerResult::Nack(nack::SUB_DEVICE_OUT_OF_RANGE),
        }
    }

    fn activate(&mut self) {
        *self = DimmerModel::default();
    }

    fn deactivate(&mut self) {}

    fn tick(&mut self, _now_ticks: u32) {}

    fn identify_active(&self) -> bool {
        self.root.responder.identify_on || self.subdevices.iter().any(|s| s.responder.identify_on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarule_core::pid::param;

    fn writer(backing: &mut [u8]) -> ParamWriter<'_> {
        ParamWriter::new(backing)
    }

    #[test]
    fn device_label_set_then_get_on_root() {
        let mut model = DimmerModel::default();
        let mut backing = [0u8; 64];
        let mut w = writer(&mut backing);
        let result = model.handle_request(CommandClass::SetCommand, 0, param::DEVICE_LABEL, b"Dimmer", &mut w);
        assert_eq!(result, HandlerResult::Ack(0));

        let mut backing2 = [0u8; 64];
        let mut w2 = writer(&mut backing2);
        let result = model.handle_request(CommandClass::GetCommand, 0, param::DEVICE_LABEL, &[], &mut w2);
        assert_eq!(result, HandlerResult::Ack(6));
        assert_eq!(&backing2[..6], b"Dimmer");
    }

    #[test]
    fn dmx_block_address_set_spans_all_subdevices() {
        let mut model = DimmerModel::default();
        let mut backing = [0u8; 64];
        let mut w = writer(&mut backing);
        let result = model.handle_request(
            CommandClass::SetCommand,
            0,
            param::DMX_BLOCK_ADDRESS,
            &100u16.to_be_bytes(),
            &mut w,
        );
        assert_eq!(result, HandlerResult::Ack(0));
        assert_eq!(model.subdevices[0].responder.dmx_start_address, 100);
        assert_eq!(model.subdevices[1].responder.dmx_start_address, 101);
        assert_eq!(model.subdevices[3].responder.dmx_start_address, 103);
    }

    #[test]
    fn unknown_subdevice_is_out_of_range() {
        let mut model = DimmerModel::default();
        let mut backing = [0u8; 64];
        let mut w = writer(&mut backing);
        let result = model.handle_request(CommandClass::GetCommand, 99, param::DEVICE_LABEL, &[], &mut w);
        assert_eq!(result, HandlerResult::Nack(nack::SUB_DEVICE_OUT_OF_RANGE));
    }

    #[test]
    fn curve_odd_rejected_on_even_indexed_subdevice() {
        let mut model = DimmerModel::default();
        let mut backing = [0u8; 64];
        let mut w = writer(&mut backing);
        // sub-device number 4 has index 4 (even), so curve 1 (odd) must NACK.
        let result = model.handle_request(CommandClass::SetCommand, 4, param::CURVE, &[1], &mut w);
        assert_eq!(result, HandlerResult::Nack(nack::DATA_OUT_OF_RANGE));
    }

    #[test]
    fn locked_subdevice_rejects_set_but_allows_lock_pid() {
        let mut model = DimmerModel::default();
        let mut backing = [0u8; 64];
        let mut w = writer(&mut backing);
        model.handle_request(CommandClass::SetCommand, 0, param::LOCK_STATE, &[0, 0, LOCK_STATE_ALL_LOCKED], &mut w);

        let mut backing2 = [0u8; 64];
        let mut w2 = writer(&mut backing2);
        let result = model.handle_request(CommandClass::SetCommand, 1, param::MAXIMUM_LEVEL, &[0, 1], &mut w2);
        assert_eq!(result, HandlerResult::Nack(nack::WRITE_PROTECT));
    }
}
