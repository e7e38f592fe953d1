//! RDM UIDs: 48-bit `{manufacturer_id:16, device_id:32}` addresses.

use core::fmt;

/// A 6-byte RDM UID, big-endian on the wire (E1.20 §3.2.1).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uid([u8; 6]);

impl Uid {
    /// All-manufacturers, all-devices broadcast UID `ffff:ffffffff`.
    pub const BROADCAST: Uid = Uid([0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);

    pub const fn new(manufacturer_id: u16, device_id: u32) -> Self {
        let m = manufacturer_id.to_be_bytes();
        let d = device_id.to_be_bytes();
        Uid([m[0], m[1], d[0], d[1], d[2], d[3]])
    }

    pub const fn from_bytes(bytes: [u8; 6]) -> Self {
        Uid(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    pub const fn manufacturer_id(&self) -> u16 {
        u16::from_be_bytes([self.0[0], self.0[1]])
    }

    pub const fn device_id(&self) -> u32 {
        u32::from_be_bytes([self.0[2], self.0[3], self.0[4], self.0[5]])
    }

    /// A manufacturer-broadcast UID for this device's manufacturer:
    /// `{manufacturer_id}:ffffffff`.
    pub const fn manufacturer_broadcast(&self) -> Uid {
        Uid::new(self.manufacturer_id(), 0xffff_ffff)
    }

    pub const fn is_broadcast(&self) -> bool {
        self.device_id() == 0xffff_ffff
    }

    /// Whether a request addressed to `target` should be acted on (and,
    /// for non-discovery classes, answered) by a responder whose UID is
    /// `self`: exact match, full broadcast, or this responder's
    /// manufacturer's broadcast.
    pub fn matches(&self, target: Uid) -> bool {
        *self == target
            || target == Uid::BROADCAST
            || (target.device_id() == 0xffff_ffff
                && target.manufacturer_id() == self.manufacturer_id())
    }

    /// Only a broadcast target never warrants a response (E1.20 §6.1):
    /// responses are suppressed for any of the three broadcast forms.
    pub fn requires_action(&self, target: Uid) -> bool {
        self.matches(target)
    }

    pub const fn requires_response(&self, target: Uid) -> bool {
        target.device_id() != 0xffff_ffff
    }
}

impl fmt::Debug for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04x}:{:08x}",
            self.manufacturer_id(),
            self.device_id()
        )
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_bytes() {
        let uid = Uid::new(0x7a70, 0x0000_0001);
        assert_eq!(uid.as_bytes(), &[0x7a, 0x70, 0x00, 0x00, 0x00, 0x01]);
        assert_eq!(Uid::from_bytes(*uid.as_bytes()), uid);
    }

    #[test]
    fn broadcast_matches_any_device() {
        let uid = Uid::new(0x7a70, 42);
        assert!(uid.matches(Uid::BROADCAST));
    }

    #[test]
    fn manufacturer_broadcast_matches_same_manufacturer_only() {
        let uid = Uid::new(0x7a70, 42);
        let other = Uid::new(0x1234, 1);
        assert!(uid.matches(uid.manufacturer_broadcast()));
        assert!(!other.matches(uid.manufacturer_broadcast()));
    }

    #[test]
    fn broadcast_targets_never_require_a_response() {
        let uid = Uid::new(0x7a70, 42);
        assert!(!uid.requires_response(Uid::BROADCAST));
        assert!(!uid.requires_response(uid.manufacturer_broadcast()));
        assert!(uid.requires_response(uid));
    }
}
