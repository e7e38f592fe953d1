//! RDM frame header codec: parses and serializes the 24-byte RDM header
//! and computes the trailing 16-bit additive checksum (E1.20 §6.2).

use crate::pid::{CommandClass, SUB_START_CODE, START_CODE};
use crate::uid::Uid;

/// Size of the RDM header, start code through parameter data length.
pub const HEADER_SIZE: usize = 24;

/// Reasons a byte buffer failed to parse as a well-formed RDM request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("frame shorter than the minimum RDM length")]
    Truncated,
    #[error("bad start code")]
    BadStartCode,
    #[error("bad sub-start code")]
    BadSubStartCode,
    #[error("message length field disagrees with the buffer length")]
    BadLength,
    #[error("checksum mismatch")]
    ChecksumMismatch,
    #[error("unrecognized command class")]
    BadCommandClass,
}

/// The decoded fixed-size portion of an RDM request or response, sans
/// parameter data (which the caller indexes directly out of the source
/// buffer via [`RdmHeader::param_data_len`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RdmHeader {
    pub message_length: u8,
    pub destination_uid: Uid,
    pub source_uid: Uid,
    pub transaction_number: u8,
    pub port_or_response_type: u8,
    pub message_count: u8,
    pub sub_device: u16,
    pub command_class: CommandClass,
    pub parameter_id: u16,
    pub parameter_data_length: u8,
}

impl RdmHeader {
    /// Parses and validates the header of `frame` (start code, sub-start
    /// code, declared length, checksum). Does not validate the command
    /// class/PID against any table; that's the dispatcher's job.
    pub fn decode(frame: &[u8]) -> Result<Self, FrameError> {
        if frame.len() < HEADER_SIZE + 2 {
            return Err(FrameError::Truncated);
        }
        if frame[0] != START_CODE {
            return Err(FrameError::BadStartCode);
        }
        if frame[1] != SUB_START_CODE {
            return Err(FrameError::BadSubStartCode);
        }

        let message_length = frame[2];
        let total_len = message_length as usize + 2; // + checksum
        if total_len != frame.len() {
            return Err(FrameError::BadLength);
        }

        let checksum = checksum(&frame[..frame.len() - 2]);
        let on_wire = u16::from_be_bytes([frame[frame.len() - 2], frame[frame.len() - 1]]);
        if checksum != on_wire {
            return Err(FrameError::ChecksumMismatch);
        }

        let destination_uid = Uid::from_bytes(frame[3..9].try_into().unwrap());
        let source_uid = Uid::from_bytes(frame[9..15].try_into().unwrap());
        let transaction_number = frame[15];
        let port_or_response_type = frame[16];
        let message_count = frame[17];
        let sub_device = u16::from_be_bytes([frame[18], frame[19]]);
        let command_class = CommandClass::try_from(frame[20])
            .map_err(|_| FrameError::BadCommandClass)?;
        let parameter_id = u16::from_be_bytes([frame[21], frame[22]]);
        let parameter_data_length = frame[23];

        if HEADER_SIZE + parameter_data_length as usize + 2 != frame.len() {
            return Err(FrameError::BadLength);
        }

        Ok(RdmHeader {
            message_length,
            destination_uid,
            source_uid,
            transaction_number,
            port_or_response_type,
            message_count,
            sub_device,
            command_class,
            parameter_id,
            parameter_data_length,
        })
    }

    /// Writes the 24-byte header into `out[0..24]`. `parameter_data_length`
    /// must already reflect the caller's payload; the checksum is not
    /// written here (see [`checksum`] / `buffer::finish_response`).
    pub fn encode(&self, out: &mut [u8]) {
        debug_assert!(out.len() >= HEADER_SIZE);
        out[0] = START_CODE;
        out[1] = SUB_START_CODE;
        out[2] = self.message_length;
        out[3..9].copy_from_slice(self.destination_uid.as_bytes());
        out[9..15].copy_from_slice(self.source_uid.as_bytes());
        out[15] = self.transaction_number;
        out[16] = self.port_or_response_type;
        out[17] = self.message_count;
        out[18..20].copy_from_slice(&self.sub_device.to_be_bytes());
        out[20] = self.command_class as u8;
        out[21..23].copy_from_slice(&self.parameter_id.to_be_bytes());
        out[23] = self.parameter_data_length;
    }
}

/// E1.20 §6.2.11 additive checksum: sum of all bytes in `data`, mod 2^16.
pub fn checksum(data: &[u8]) -> u16 {
    data.iter().fold(0u16, |acc, &b| acc.wrapping_add(b as u16))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_get_device_info() -> [u8; 26] {
        let mut frame = [0u8; 26];
        frame[0] = START_CODE;
        frame[1] = SUB_START_CODE;
        frame[2] = 24; // message_length
        frame[3..9].copy_from_slice(Uid::new(0x7a70, 1).as_bytes());
        frame[9..15].copy_from_slice(Uid::new(0x1234, 0xabcd).as_bytes());
        frame[15] = 7; // transaction_number
        frame[16] = 1; // port id
        frame[17] = 0; // message count
        frame[18..20].copy_from_slice(&0u16.to_be_bytes()); // sub_device root
        frame[20] = CommandClass::GetCommand as u8;
        frame[21..23].copy_from_slice(&crate::pid::param::DEVICE_INFO.to_be_bytes());
        frame[23] = 0; // pdl
        let sum = checksum(&frame[..24]);
        frame[24..26].copy_from_slice(&sum.to_be_bytes());
        frame
    }

    #[test]
    fn decodes_a_well_formed_get_request() {
        let frame = sample_get_device_info();
        let header = RdmHeader::decode(&frame).unwrap();
        assert_eq!(header.command_class, CommandClass::GetCommand);
        assert_eq!(header.parameter_id, crate::pid::param::DEVICE_INFO);
        assert_eq!(header.parameter_data_length, 0);
    }

    #[test]
    fn rejects_bad_checksum() {
        let mut frame = sample_get_device_info();
        let last = frame.len() - 1;
        frame[last] ^= 0xff;
        assert_eq!(RdmHeader::decode(&frame), Err(FrameError::ChecksumMismatch));
    }

    #[test]
    fn rejects_truncated_frame() {
        let frame = sample_get_device_info();
        assert_eq!(RdmHeader::decode(&frame[..10]), Err(FrameError::Truncated));
    }

    #[test]
    fn round_trips_encode_decode() {
        let frame = sample_get_device_info();
        let header = RdmHeader::decode(&frame).unwrap();
        let mut out = [0u8; HEADER_SIZE];
        header.encode(&mut out);
        assert_eq!(&out[..], &frame[..HEADER_SIZE]);
    }
}
