//! The network `Model`: a single root device, no sub-devices. Unlike
//! the dimmer model there is no sub-device router to thread through —
//! any `sub_device` other than the root immediately NACKs.

use jarule_core::buffer::ParamWriter;
use jarule_core::dispatch::{dispatch_pid, HandlerResult};
use jarule_core::model::Model;
use jarule_core::pid::{nack, CommandClass};
use jarule_core::router::SUBDEVICE_ROOT;

use crate::state::NetworkRoot;

#[derive(Default)]
pub struct NetworkModel {
    root: NetworkRoot,
}

impl Model for NetworkModel {
    fn handle_request(
        &mut self,
        command_class: CommandClass,
        sub_device: u16,
        pid: u16,
        request_data: &[u8],
        response: &mut ParamWriter,
    ) -> HandlerResult {
        if sub_device != SUBDEVICE_ROOT {
            return HandlerResult::Nack(nack::SUB_DEVICE_OUT_OF_RANGE);
        }
        dispatch_pid(&mut self.root, crate::tables::ROOT_TABLE, command_class, pid, request_data, response)
    }

    fn activate(&mut self) {
        *self = NetworkModel::default();
    }

    fn deactivate(&mut self) {}

    fn tick(&mut self, _now_ticks: u32) {}

    fn identify_active(&self) -> bool {
        self.root.responder.identify_on
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
    fn non_root_subdevice_out_of_range() {
        let mut model = NetworkModel::default();
        let mut backing = [0u8; 64];
        let mut w = writer(&mut backing);
        let result = model.handle_request(CommandClass::GetCommand, 1, param::LIST_INTERFACES, &[], &mut w);
        assert_eq!(result, HandlerResult::Nack(nack::SUB_DEVICE_OUT_OF_RANGE));
    }

    #[test]
    fn default_route_set_then_get() {
        let mut model = NetworkModel::default();
        let mut backing = [0u8; 64];
        let mut w = writer(&mut backing);
        let set_result = model.handle_request(
            CommandClass::SetCommand,
            0,
            param::IPV4_DEFAULT_ROUTE,
            &[0, 0, 0, 0, 10, 10, 1, 2],
            &mut w,
        );
        assert_eq!(set_result, HandlerResult::Ack(0));

        let mut backing2 = [0u8; 64];
        let mut w2 = writer(&mut backing2);
        let get_result = model.handle_request(CommandClass::GetCommand, 0, param::IPV4_DEFAULT_ROUTE, &[], &mut w2);
        assert_eq!(get_result, HandlerResult::Ack(8));
        assert_eq!(&backing2[..8], &[0, 0, 0, 0, 10, 10, 1, 2]);
    }

    #[test]
    fn unknown_pid_nacks() {
        let mut model = NetworkModel::default();
        let mut backing = [0u8; 64];
        let mut w = writer(&mut backing);
        let result = model.handle_request(CommandClass::GetCommand, 0, 0xbeef, &[], &mut w);
        assert_eq!(result, HandlerResult::Nack(nack::UNKNOWN_PID));
    }
}
