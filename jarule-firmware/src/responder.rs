//! The upward entry point: decodes an incoming frame, matches this
//! device's UID, dispatches to the active model, and stamps a reply into
//! the shared buffer. Mirrors `RDMResponder_Receive` /
//! `RDMResponder_GetResponse` from the original firmware, collapsed into
//! one call since there's no reason here to split "decode" from "get the
//! queued response" across two entry points when both run synchronously.

use jarule_core::buffer::{self, ParamWriter, RdmBuffer};
use jarule_core::discovery::{self, DiscoveryOutcome, DubResponse};
use jarule_core::dispatch::HandlerResult;
use jarule_core::frame::{FrameError, RdmHeader, HEADER_SIZE};
use jarule_core::model::Model;
use jarule_core::pid::{param, CommandClass};
use jarule_core::{log_info, log_warn};
use jarule_core::Uid;

use crate::config::BuildConfig;

/// What came out of processing one incoming frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// Nothing to transmit: malformed frame, a broadcast request (E1.20
    /// §6.1 suppresses all broadcast responses), or a muted/out-of-range
    /// discovery probe.
    NoResponse,
    /// A normal RDM frame was written into the caller's response buffer;
    /// the `usize` is its length.
    Frame(usize),
    /// A `DISC_UNIQUE_BRANCH` hit: transmit this DUB encoding as-is, not
    /// through the normal header/checksum path.
    Dub(DubResponse),
}

/// Owns this device's identity, model, and discovery-mute state.
/// Transceiver/timer/GPIO access is threaded through per call rather
/// than stored, since `jarule-firmware`'s HAL traits are the caller's to
/// own (see `hal`).
pub struct Responder<M> {
    uid: Uid,
    muted: bool,
    model: M,
}

impl<M: Model + Default> Responder<M> {
    pub fn new(config: BuildConfig) -> Self {
        Responder {
            uid: config.uid,
            muted: false,
            model: M::default(),
        }
    }
}

impl<M: Model> Responder<M> {
    pub fn uid(&self) -> Uid {
        self.uid
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Advances the active model by one coarse tick.
    pub fn tick(&mut self, now_ticks: u32) {
        self.model.tick(now_ticks);
    }

    /// Processes one received frame. `response_buffer` is scratch space
    /// reused for the reply; its contents are only meaningful when the
    /// return value is `Frame(len)`.
    pub fn receive(&mut self, request: &[u8], response_buffer: &mut RdmBuffer) -> ReceiveOutcome {
        let header = match RdmHeader::decode(request) {
            Ok(h) => h,
            Err(e) => {
                log_frame_error(e);
                return ReceiveOutcome::NoResponse;
            }
        };

        let request_data = &request[HEADER_SIZE..HEADER_SIZE + header.parameter_data_length as usize];

        if header.command_class.is_discovery() {
            return self.receive_discovery(&header, request_data, response_buffer);
        }

        if !self.uid.matches(header.destination_uid) {
            return ReceiveOutcome::NoResponse;
        }

        let mut writer = ParamWriter::new(&mut response_buffer[HEADER_SIZE..]);
        let result = self.model.handle_request(
            header.command_class,
            header.sub_device,
            header.parameter_id,
            request_data,
            &mut writer,
        );

        if !self.uid.requires_response(header.destination_uid) {
            // Broadcast: side effects already applied, reply suppressed.
            return ReceiveOutcome::NoResponse;
        }

        match result {
            HandlerResult::Ack(pdl) => {
                let len = buffer::finish_response(response_buffer, &header, pdl);
                ReceiveOutcome::Frame(len)
            }
            HandlerResult::Nack(reason) => {
                log_warn!("dispatch", "nack");
                let len = buffer::build_nack(response_buffer, &header, reason);
                ReceiveOutcome::Frame(len)
            }
            HandlerResult::NoResponse => ReceiveOutcome::NoResponse,
        }
    }

    fn receive_discovery(
        &mut self,
        header: &RdmHeader,
        request_data: &[u8],
        response_buffer: &mut RdmBuffer,
    ) -> ReceiveOutcome {
        match discovery::handle_discovery(self.uid, &mut self.muted, header.command_class, header.parameter_id, request_data) {
            DiscoveryOutcome::Respond(dub) => ReceiveOutcome::Dub(dub),
            DiscoveryOutcome::Silent => {
                let is_mute_pid = header.parameter_id == param::DISC_MUTE || header.parameter_id == param::DISC_UN_MUTE;
                if is_mute_pid && header.destination_uid == self.uid {
                    log_info!("discovery", "mute state changed");
                    let mut writer = ParamWriter::new(&mut response_buffer[HEADER_SIZE..]);
                    writer.push_u8(0).push_u8(0); // control field: no proxied devices, no managed proxy flag
                    let pdl = writer.len();
                    let len = buffer::finish_response(response_buffer, header, pdl);
                    ReceiveOutcome::Frame(len)
                } else {
                    ReceiveOutcome::NoResponse
                }
            }
        }
    }
}

fn log_frame_error(e: FrameError) {
    match e {
        FrameError::Truncated => log_warn!("frame", "truncated"),
        FrameError::BadStartCode => log_warn!("frame", "bad start code"),
        FrameError::BadSubStartCode => log_warn!("frame", "bad sub-start code"),
        FrameError::BadLength => log_warn!("frame", "bad length"),
        FrameError::ChecksumMismatch => log_warn!("frame", "checksum mismatch"),
        FrameError::BadCommandClass => log_warn!("frame", "bad command class"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarule_core::buffer::RDM_BUFFER_SIZE;
    use jarule_core::frame::checksum;
    use jarule_core::pid::{CommandClass, SUB_START_CODE, START_CODE};

    #[derive(Default)]
    struct StubModel {
        last_pid: Option<u16>,
    }

    impl Model for StubModel {
        fn handle_request(
            &mut self,
            _command_class: CommandClass,
            _sub_device: u16,
            pid: u16,
            _request_data: &[u8],
            response: &mut ParamWriter,
        ) -> HandlerResult {
            self.last_pid = Some(pid);
            response.push_u16(0x1234);
            HandlerResult::Ack(response.len())
        }
        fn activate(&mut self) {}
        fn deactivate(&mut self) {}
        fn tick(&mut self, _now_ticks: u32) {}
        fn identify_active(&self) -> bool {
            false
        }
    }

    fn build_get_request(dest: Uid, src: Uid, pid: u16) -> [u8; 26] {
        let mut frame = [0u8; 26];
        frame[0] = START_CODE;
        frame[1] = SUB_START_CODE;
        frame[2] = 24;
        frame[3..9].copy_from_slice(dest.as_bytes());
        frame[9..15].copy_from_slice(src.as_bytes());
        frame[15] = 1; // transaction number
        frame[16] = 1; // port id
        frame[17] = 0; // message count
        frame[18..20].copy_from_slice(&0u16.to_be_bytes());
        frame[20] = CommandClass::GetCommand as u8;
        frame[21..23].copy_from_slice(&pid.to_be_bytes());
        frame[23] = 0;
        let sum = checksum(&frame[..24]);
        frame[24..26].copy_from_slice(&sum.to_be_bytes());
        frame
    }

    #[test]
    fn responds_to_a_matching_unicast_request() {
        let uid = Uid::new(0x7a70, 1);
        let mut responder: Responder<StubModel> = Responder::new(BuildConfig::new(0x7a70, 1, 0));
        let request = build_get_request(uid, Uid::new(0x1234, 0xabcd), param::DEVICE_INFO);
        let mut backing = [0u8; RDM_BUFFER_SIZE];
        let outcome = responder.receive(&request, &mut backing);
        assert!(matches!(outcome, ReceiveOutcome::Frame(_)));
        assert_eq!(responder.model().last_pid, Some(param::DEVICE_INFO));
    }

    #[test]
    fn ignores_a_request_for_another_uid() {
        let mut responder: Responder<StubModel> = Responder::new(BuildConfig::new(0x7a70, 1, 0));
        let other = Uid::new(0x7a70, 2);
        let request = build_get_request(other, Uid::new(0x1234, 0xabcd), param::DEVICE_INFO);
        let mut backing = [0u8; RDM_BUFFER_SIZE];
        let outcome = responder.receive(&request, &mut backing);
        assert_eq!(outcome, ReceiveOutcome::NoResponse);
    }

    #[test]
    fn suppresses_response_to_broadcast() {
        let mut responder: Responder<StubModel> = Responder::new(BuildConfig::new(0x7a70, 1, 0));
        let request = build_get_request(Uid::BROADCAST, Uid::new(0x1234, 0xabcd), param::DEVICE_INFO);
        let mut backing = [0u8; RDM_BUFFER_SIZE];
        let outcome = responder.receive(&request, &mut backing);
        assert_eq!(outcome, ReceiveOutcome::NoResponse);
        assert_eq!(responder.model().last_pid, Some(param::DEVICE_INFO));
    }

    #[test]
    fn malformed_frame_is_silently_dropped() {
        let mut responder: Responder<StubModel> = Responder::new(BuildConfig::new(0x7a70, 1, 0));
        let mut backing = [0u8; RDM_BUFFER_SIZE];
        let outcome = responder.receive(&[0u8; 4], &mut backing);
        assert_eq!(outcome, ReceiveOutcome::NoResponse);
    }
}
