//! The shared RDM buffer: a single fixed-size byte array that holds first
//! the incoming request and then, in place, the outgoing response. This
//! mirrors the firmware's single `g_rdm_buffer` — there is one buffer, not
//! a request buffer and a response buffer, because the device is
//! half-duplex and never needs both at once.

pub use crate::frame::HEADER_SIZE;
use crate::frame::{checksum, RdmHeader};
use crate::pid::ResponseType;
use crate::uid::Uid;

/// Largest parameter data block (E1.20 §6.2.3: PDL is one byte).
pub const MAX_PARAM_DATA: usize = 231;

/// Header + max parameter data + checksum.
pub const RDM_BUFFER_SIZE: usize = HEADER_SIZE + MAX_PARAM_DATA + 2;

/// The shared request/response buffer.
pub type RdmBuffer = [u8; RDM_BUFFER_SIZE];

/// A cursor over the parameter-data region of the shared buffer, handed
/// to a PID handler so it can write its response payload without seeing
/// (or being able to corrupt) the header region.
pub struct ParamWriter<'a> {
    data: &'a mut [u8],
    len: usize,
}

impl<'a> ParamWriter<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        ParamWriter { data, len: 0 }
    }

    pub fn push_u8(&mut self, value: u8) -> &mut Self {
        self.data[self.len] = value;
        self.len += 1;
        self
    }

    pub fn push_u16(&mut self, value: u16) -> &mut Self {
        self.data[self.len..self.len + 2].copy_from_slice(&value.to_be_bytes());
        self.len += 2;
        self
    }

    pub fn push_u32(&mut self, value: u32) -> &mut Self {
        self.data[self.len..self.len + 4].copy_from_slice(&value.to_be_bytes());
        self.len += 4;
        self
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.data[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        self
    }

    pub fn push_uid(&mut self, uid: Uid) -> &mut Self {
        self.push_bytes(uid.as_bytes())
    }

    /// Pads a fixed-width ASCII/Latin-1 label field with trailing zeroes
    /// cut off once `width` bytes are written (E1.20 label fields are not
    /// null-terminated, just truncated/padded to their declared width).
    pub fn push_label(&mut self, text: &str, width: usize) -> &mut Self {
        let bytes = text.as_bytes();
        let n = bytes.len().min(width);
        self.push_bytes(&bytes[..n]);
        self
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.len
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Stamps a GET/SET ack response into `buffer` in place: rewrites the
/// header (swapped UIDs, response command class, `ACK`) and recomputes
/// the checksum over `pdl` bytes of parameter data already written at
/// `buffer[HEADER_SIZE..]`. Returns the total frame length.
pub fn finish_response(
    buffer: &mut RdmBuffer,
    request: &RdmHeader,
    pdl: usize,
) -> usize {
    let header = RdmHeader {
        message_length: (HEADER_SIZE + pdl) as u8,
        destination_uid: request.source_uid,
        source_uid: request.destination_uid,
        transaction_number: request.transaction_number,
        port_or_response_type: ResponseType::Ack as u8,
        message_count: 0,
        sub_device: request.sub_device,
        command_class: request.command_class.response_class(),
        parameter_id: request.parameter_id,
        parameter_data_length: pdl as u8,
    };
    header.encode(&mut buffer[..HEADER_SIZE]);
    let frame_len = HEADER_SIZE + pdl;
    let sum = checksum(&buffer[..frame_len]);
    buffer[frame_len..frame_len + 2].copy_from_slice(&sum.to_be_bytes());
    frame_len + 2
}

/// Stamps a NACK response (zero-length parameter data, the two-byte NACK
/// reason in its place) into `buffer`. Returns the total frame length.
pub fn build_nack(
    buffer: &mut RdmBuffer,
    request: &RdmHeader,
    reason: crate::pid::NackReason,
) -> usize {
    buffer[HEADER_SIZE..HEADER_SIZE + 2].copy_from_slice(&(reason as u16).to_be_bytes());
    let header = RdmHeader {
        message_length: (HEADER_SIZE + 2) as u8,
        destination_uid: request.source_uid,
        source_uid: request.destination_uid,
        transaction_number: request.transaction_number,
        port_or_response_type: ResponseType::NackReason as u8,
        message_count: 0,
        sub_device: request.sub_device,
        command_class: request.command_class.response_class(),
        parameter_id: request.parameter_id,
        parameter_data_length: 2,
    };
    header.encode(&mut buffer[..HEADER_SIZE]);
    let frame_len = HEADER_SIZE + 2;
    let sum = checksum(&buffer[..frame_len]);
    buffer[frame_len..frame_len + 2].copy_from_slice(&sum.to_be_bytes());
    frame_len + 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_writer_tracks_length() {
        let mut backing = [0u8; MAX_PARAM_DATA];
        let mut w = ParamWriter::new(&mut backing);
        w.push_u16(0x0102).push_u8(0x03);
        assert_eq!(w.len(), 3);
        assert_eq!(&backing[..3], &[0x01, 0x02, 0x03]);
    }
}
