//! The PID dispatcher: given a decoded request header and a model's PID
//! descriptor table, finds the matching entry, checks command-class
//! support and minimum parameter length, invokes the handler, and hands
//! back a tagged result for the caller to serialize.

use crate::buffer::ParamWriter;
use crate::pid::{nack, CommandClass, NackReason};
use crate::responder::ResponderLike;

/// What a PID handler produces. The dispatcher's prologue (building the
/// `ParamWriter`) and epilogue (`buffer::finish_response` /
/// `buffer::build_nack`) are the only code that turns this into wire
/// bytes; handlers never touch the header or checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerResult {
    /// Success; the `usize` is the number of parameter-data bytes the
    /// handler wrote (0 for a SET with nothing to echo).
    Ack(usize),
    /// No message_count / response suppressed (never for the request
    /// classes this responder serves, but the type stays requestable so
    /// the dispatcher code doesn't special-case broadcast vs. NACK
    /// fall-through).
    NoResponse,
    Nack(NackReason),
}

/// Every GET handler receives the request's parameter data too (not just
/// SET): several PIDs are GET-with-a-selector (`LOCK_STATE_DESCRIPTION`,
/// `CURVE_DESCRIPTION`, `PRESET_STATUS`, `SENSOR_VALUE`...), so the
/// signature is uniform rather than split into "GET takes nothing" /
/// "GET takes a selector" variants.
pub type GetHandler<S> = fn(&S, &[u8], &mut ParamWriter) -> HandlerResult;
pub type SetHandler<S> = fn(&mut S, &[u8]) -> HandlerResult;

/// One row of a model's PID table (spec's `PIDDescriptor`, generalized
/// over the concrete state type `S` rather than void pointers + a C
/// command-class bitmask).
#[derive(Clone, Copy)]
pub struct PidDescriptor<S> {
    pub pid: u16,
    pub get: Option<GetHandler<S>>,
    pub set: Option<SetHandler<S>>,
    /// Minimum parameter data length a GET request must carry (0 if GET
    /// takes no parameter data at all).
    pub min_get_pdl: u8,
}

/// Looks up `pid` in `table`, checks the requested command class is
/// supported by that row, checks `request_data`'s length against
/// `min_get_pdl` for GET, and invokes the matching handler.
///
/// Dispatch rules (spec §4.D):
/// 1. Unknown PID -> `UNKNOWN_PID`.
/// 2. PID known but this command class unsupported -> `UNSUPPORTED_COMMAND_CLASS`.
/// 3. GET with fewer than `min_get_pdl` bytes -> `FORMAT_ERROR`.
/// 4. Otherwise invoke the handler and return its result unchanged.
pub fn dispatch_pid<S: ResponderLike>(
    state: &mut S,
    table: &[PidDescriptor<S>],
    command_class: CommandClass,
    pid: u16,
    request_data: &[u8],
    response: &mut ParamWriter,
) -> HandlerResult {
    let Some(descriptor) = table.iter().find(|d| d.pid == pid) else {
        return HandlerResult::Nack(nack::UNKNOWN_PID);
    };

    match command_class {
        CommandClass::GetCommand => match descriptor.get {
            None => HandlerResult::Nack(nack::UNSUPPORTED_COMMAND_CLASS),
            Some(handler) => {
                if request_data.len() < descriptor.min_get_pdl as usize {
                    return HandlerResult::Nack(nack::FORMAT_ERROR);
                }
                handler(state, request_data, response)
            }
        },
        CommandClass::SetCommand => match descriptor.set {
            None => HandlerResult::Nack(nack::UNSUPPORTED_COMMAND_CLASS),
            Some(handler) => handler(state, request_data),
        },
        _ => HandlerResult::Nack(nack::UNSUPPORTED_COMMAND_CLASS),
    }
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
    fn unknown_pid_nacks() {
        let mut f = Fixture {
            def: &DEF,
            state: ResponderState::default(),
        };
        let t = table();
        let mut backing = [0u8; 64];
        let mut w = ParamWriter::new(&mut backing);
        let result = dispatch_pid(&mut f, &t, CommandClass::GetCommand, 0xbeef, &[], &mut w);
        assert_eq!(result, HandlerResult::Nack(nack::UNKNOWN_PID));
    }

    #[test]
    fn known_pid_unsupported_class_nacks() {
        let mut f = Fixture {
            def: &DEF,
            state: ResponderState::default(),
        };
        let t = [PidDescriptor {
            pid: crate::pid::param::DEVICE_LABEL,
            get: Some(get_device_label),
            set: None,
            min_get_pdl: 0,
        }];
        let mut backing = [0u8; 64];
        let mut w = ParamWriter::new(&mut backing);
        let result = dispatch_pid(
            &mut f,
            &t,
            CommandClass::SetCommand,
            crate::pid::param::DEVICE_LABEL,
            b"x",
            &mut w,
        );
        assert_eq!(result, HandlerResult::Nack(nack::UNSUPPORTED_COMMAND_CLASS));
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut f = Fixture {
            def: &DEF,
            state: ResponderState::default(),
        };
        let t = table();
        let mut backing = [0u8; 64];
        let mut w = ParamWriter::new(&mut backing);
        let set_result = dispatch_pid(
            &mut f,
            &t,
            CommandClass::SetCommand,
            crate::pid::param::DEVICE_LABEL,
            b"Dimmer",
            &mut w,
        );
        assert_eq!(set_result, HandlerResult::Ack(0));

        let mut backing2 = [0u8; 64];
        let mut w2 = ParamWriter::new(&mut backing2);
        let get_result = dispatch_pid(
            &mut f,
            &t,
            CommandClass::GetCommand,
            crate::pid::param::DEVICE_LABEL,
            &[],
            &mut w2,
        );
        assert_eq!(get_result, HandlerResult::Ack(6));
        assert_eq!(&backing2[..6], b"Dimmer");
    }
}
