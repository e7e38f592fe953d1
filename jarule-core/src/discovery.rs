//! `DISC_UNIQUE_BRANCH` / `DISC_MUTE` / `DISC_UN_MUTE` handling (E1.20
//! §6.4, Appendix B). Discovery runs on the discovery command class only,
//! outside the normal GET/SET PID table, and its "mute" response uses a
//! different wire encoding than every other RDM reply.

use crate::frame::checksum;
use crate::pid::{param, CommandClass};
use crate::uid::Uid;

/// DUB preamble byte, repeated up to 7 times before the separator.
const PREAMBLE: u8 = 0xfe;
const PREAMBLE_SEPARATOR: u8 = 0xaa;
const DUB_PREAMBLE_BYTES: usize = 7;

/// A `DISC_UNIQUE_BRANCH` response frame: not a normal RDM header/ack,
/// just the Manchester-like OR-masked UID + checksum E1.20 Appendix B
/// requires so overlapping responses remain individually recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DubResponse {
    pub bytes: [u8; DUB_PREAMBLE_BYTES + 1 + 16],
}

impl DubResponse {
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

/// Encodes `uid` (and its checksum) into the DUB OR-masked wire form:
/// each data byte `b` becomes two bytes, `b | 0xaa` then `b | 0x55`.
fn encode_dub(uid: Uid) -> DubResponse {
    let mut out = [0u8; DUB_PREAMBLE_BYTES + 1 + 16];
    for b in out.iter_mut().take(DUB_PREAMBLE_BYTES) {
        *b = PREAMBLE;
    }
    out[DUB_PREAMBLE_BYTES] = PREAMBLE_SEPARATOR;

    let sum = checksum(uid.as_bytes());
    let mut payload = [0u8; 8];
    payload[..6].copy_from_slice(uid.as_bytes());
    payload[6..8].copy_from_slice(&sum.to_be_bytes());

    let base = DUB_PREAMBLE_BYTES + 1;
    for (i, &byte) in payload.iter().enumerate() {
        out[base + i * 2] = byte | 0xaa;
        out[base + i * 2 + 1] = byte | 0x55;
    }
    DubResponse { bytes: out }
}

/// Outcome of processing a discovery-class request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    /// Transmit the enclosed DUB response (this responder is in range
    /// and unmuted).
    Respond(DubResponse),
    /// Nothing to transmit: either out of range, already muted, or the
    /// PID was `DISC_MUTE`/`DISC_UN_MUTE` (those ack through the normal
    /// frame path built by the caller, not this one).
    Silent,
}

/// Processes a discovery-class frame against `own_uid`, threading
/// `muted` through as the responder's persistent (until un-muted or
/// power cycle) mute flag. Returns `Silent` for anything this function
/// doesn't itself produce a DUB reply for; the caller is responsible for
/// building the ordinary ACK frame for `DISC_MUTE`/`DISC_UN_MUTE`
/// (those use the normal header format, just with no parameter data
/// other than the control field).
pub fn handle_discovery(
    own_uid: Uid,
    muted: &mut bool,
    command_class: CommandClass,
    pid: u16,
    request_data: &[u8],
) -> DiscoveryOutcome {
    if command_class != CommandClass::DiscoveryCommand {
        return DiscoveryOutcome::Silent;
    }

    match pid {
        param::DISC_UNIQUE_BRANCH => {
            if *muted || request_data.len() != 12 {
                return DiscoveryOutcome::Silent;
            }
            let lower = Uid::from_bytes(request_data[0..6].try_into().unwrap());
            let upper = Uid::from_bytes(request_data[6..12].try_into().unwrap());
            if own_uid >= lower && own_uid <= upper {
                DiscoveryOutcome::Respond(encode_dub(own_uid))
            } else {
                DiscoveryOutcome::Silent
            }
        }
        param::DISC_MUTE => {
            *muted = true;
            DiscoveryOutcome::Silent
        }
        param::DISC_UN_MUTE => {
            *muted = false;
            DiscoveryOutcome::Silent
        }
        _ => DiscoveryOutcome::Silent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responds_when_uid_in_range_and_unmuted() {
        let uid = Uid::new(0x7a70, 5);
        let mut muted = false;
        let mut data = [0u8; 12];
        data[0..6].copy_from_slice(Uid::new(0, 0).as_bytes());
        data[6..12].copy_from_slice(Uid::new(0xffff, 0xffff_ffff).as_bytes());
        let outcome = handle_discovery(uid, &mut muted, CommandClass::DiscoveryCommand, param::DISC_UNIQUE_BRANCH, &data);
        assert!(matches!(outcome, DiscoveryOutcome::Respond(_)));
    }

    #[test]
    fn silent_when_muted() {
        let uid = Uid::new(0x7a70, 5);
        let mut muted = true;
        let mut data = [0u8; 12];
        data[0..6].copy_from_slice(Uid::new(0, 0).as_bytes());
        data[6..12].copy_from_slice(Uid::new(0xffff, 0xffff_ffff).as_bytes());
        let outcome = handle_discovery(uid, &mut muted, CommandClass::DiscoveryCommand, param::DISC_UNIQUE_BRANCH, &data);
        assert_eq!(outcome, DiscoveryOutcome::Silent);
    }

    #[test]
    fn silent_when_out_of_range() {
        let uid = Uid::new(0x7a70, 5);
        let mut muted = false;
        let mut data = [0u8; 12];
        data[0..6].copy_from_slice(Uid::new(0x1234, 0).as_bytes());
        data[6..12].copy_from_slice(Uid::new(0x1234, 0xffff_ffff).as_bytes());
        let outcome = handle_discovery(uid, &mut muted, CommandClass::DiscoveryCommand, param::DISC_UNIQUE_BRANCH, &data);
        assert_eq!(outcome, DiscoveryOutcome::Silent);
    }

    #[test]
    fn mute_and_unmute_toggle_flag() {
        let uid = Uid::new(0x7a70, 5);
        let mut muted = false;
        handle_discovery(uid, &mut muted, CommandClass::DiscoveryCommand, param::DISC_MUTE, &[]);
        assert!(muted);
        handle_discovery(uid, &mut muted, CommandClass::DiscoveryCommand, param::DISC_UN_MUTE, &[]);
        assert!(!muted);
    }
}
