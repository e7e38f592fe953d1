//! PID-specific handlers for the network interface model: interface
//! enumeration plus DHCP/Zeroconf/default-route/DNS configuration
//! (E1.37-2).

use jarule_core::buffer::ParamWriter;
use jarule_core::dispatch::HandlerResult;
use jarule_core::pid::nack;

use crate::state::{find_interface, NetworkRoot, MAX_DNS_LABEL};

pub fn list_interfaces(s: &NetworkRoot, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    let _ = s;
    for iface in crate::state::FIXED_INTERFACES.iter() {
        w.push_u32(iface.id).push_u16(iface.hardware_type);
    }
    HandlerResult::Ack(w.len())
}

fn interface_id(data: &[u8]) -> Result<u32, HandlerResult> {
    if data.len() != 4 {
        return Err(HandlerResult::Nack(nack::FORMAT_ERROR));
    }
    Ok(u32::from_be_bytes([data[0], data[1], data[2], data[3]]))
}

pub fn interface_label(s: &NetworkRoot, data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    let _ = s;
    let id = match interface_id(data) {
        Ok(id) => id,
        Err(r) => return r,
    };
    let Some(iface) = find_interface(id) else {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    };
    w.push_u32(iface.id).push_bytes(iface.label.as_bytes());
    HandlerResult::Ack(w.len())
}

pub fn interface_hardware_address(s: &NetworkRoot, data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    let _ = s;
    let id = match interface_id(data) {
        Ok(id) => id,
        Err(r) => return r,
    };
    let Some(iface) = find_interface(id) else {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    };
    w.push_u32(iface.id).push_bytes(&iface.hardware_address);
    HandlerResult::Ack(w.len())
}

pub fn ipv4_dhcp_mode_get(s: &NetworkRoot, data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    let _ = s;
    let id = match interface_id(data) {
        Ok(id) => id,
        Err(r) => return r,
    };
    let Some(iface) = find_interface(id) else {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    };
    w.push_u32(iface.id).push_u8(iface.mode_fixed_on as u8);
    HandlerResult::Ack(w.len())
}

pub fn ipv4_zeroconf_mode_get(s: &NetworkRoot, data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    ipv4_dhcp_mode_get(s, data, w)
}

pub fn ipv4_default_route_get(s: &NetworkRoot, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u32(s.default_route_iface).push_bytes(&s.default_route_ip);
    HandlerResult::Ack(w.len())
}

pub fn ipv4_default_route_set(s: &mut NetworkRoot, data: &[u8]) -> HandlerResult {
    if data.len() != 8 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    s.default_route_iface = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    s.default_route_ip.copy_from_slice(&data[4..8]);
    HandlerResult::Ack(0)
}

pub fn dns_name_server_get(s: &NetworkRoot, data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    if data.len() != 1 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let index = data[0];
    if index == 0 || index > s.name_server_count {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    w.push_bytes(&s.name_servers[index as usize - 1]);
    HandlerResult::Ack(w.len())
}

pub fn dns_name_server_set(s: &mut NetworkRoot, data: &[u8]) -> HandlerResult {
    if data.len() != 5 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let index = data[0];
    if index == 0 || index as usize > s.name_servers.len() {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    s.name_servers[index as usize - 1].copy_from_slice(&data[1..5]);
    if index > s.name_server_count {
        s.name_server_count = index;
    }
    HandlerResult::Ack(0)
}

pub fn dns_hostname_get(s: &NetworkRoot, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_bytes(s.hostname.as_bytes());
    HandlerResult::Ack(w.len())
}

pub fn dns_hostname_set(s: &mut NetworkRoot, data: &[u8]) -> HandlerResult {
    set_label_field(&mut s.hostname, data)
}

pub fn dns_domain_name_get(s: &NetworkRoot, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_bytes(s.domain_name.as_bytes());
    HandlerResult::Ack(w.len())
}

pub fn dns_domain_name_set(s: &mut NetworkRoot, data: &[u8]) -> HandlerResult {
    set_label_field(&mut s.domain_name, data)
}

fn set_label_field(field: &mut heapless::String<MAX_DNS_LABEL>, data: &[u8]) -> HandlerResult {
    if data.len() > MAX_DNS_LABEL {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let text = match core::str::from_utf8(data) {
        Ok(t) => t,
        Err(_) => return HandlerResult::Nack(nack::FORMAT_ERROR),
    };
    let mut value = heapless::String::new();
    if value.push_str(text).is_err() {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    *field = value;
    HandlerResult::Ack(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer(backing: &mut [u8]) -> ParamWriter<'_> {
        ParamWriter::new(backing)
    }

    #[test]
    fn list_interfaces_matches_fixed_table() {
        let s = NetworkRoot::default();
        let mut backing = [0u8; 64];
        let mut w = writer(&mut backing);
        let result = list_interfaces(&s, &[], &mut w);
        assert_eq!(result, HandlerResult::Ack(18));
        assert_eq!(
            &backing[..18],
            &[
                0, 0, 0, 1, 0, 0x01, //
                0, 0, 0, 3, 0, 0x1f, //
                0, 0, 0, 4, 0, 0x01, //
            ]
        );
    }

    #[test]
    fn interface_label_unknown_id_out_of_range() {
        let s = NetworkRoot::default();
        let mut backing = [0u8; 64];
        let mut w = writer(&mut backing);
        let result = interface_label(&s, &2u32.to_be_bytes(), &mut w);
        assert_eq!(result, HandlerResult::Nack(nack::DATA_OUT_OF_RANGE));
    }

    #[test]
    fn interface_label_known_id() {
        let s = NetworkRoot::default();
        let mut backing = [0u8; 64];
        let mut w = writer(&mut backing);
        let result = interface_label(&s, &1u32.to_be_bytes(), &mut w);
        assert_eq!(result, HandlerResult::Ack(8));
        assert_eq!(&backing[..8], b"\x00\x00\x00\x01eth0");
    }

    #[test]
    fn hardware_address_known_id() {
        let s = NetworkRoot::default();
        let mut backing = [0u8; 64];
        let mut w = writer(&mut backing);
        let result = interface_hardware_address(&s, &1u32.to_be_bytes(), &mut w);
        assert_eq!(result, HandlerResult::Ack(10));
        assert_eq!(&backing[..10], &[0, 0, 0, 1, 0x52, 0x12, 0x34, 0x56, 0x78, 0x9a]);
    }

    #[test]
    fn default_route_round_trips() {
        let mut s = NetworkRoot::default();
        let set_result = ipv4_default_route_set(&mut s, &[0, 0, 0, 0, 10, 10, 1, 2]);
        assert_eq!(set_result, HandlerResult::Ack(0));

        let mut backing = [0u8; 64];
        let mut w = writer(&mut backing);
        let get_result = ipv4_default_route_get(&s, &[], &mut w);
        assert_eq!(get_result, HandlerResult::Ack(8));
        assert_eq!(&backing[..8], &[0, 0, 0, 0, 10, 10, 1, 2]);
    }

    #[test]
    fn name_server_get_rejects_unset_index() {
        let mut s = NetworkRoot::default();
        ipv4_default_route_set(&mut s, &[0, 0, 0, 0, 0, 0, 0, 0]);
        let set_result = dns_name_server_set(&mut s, &[1, 10, 10, 1, 2]);
        assert_eq!(set_result, HandlerResult::Ack(0));

        let mut backing = [0u8; 64];
        let mut w = writer(&mut backing);
        let get_result = dns_name_server_get(&s, &[1], &mut w);
        assert_eq!(get_result, HandlerResult::Ack(4));
        assert_eq!(&backing[..4], &[10, 10, 1, 2]);

        let mut backing2 = [0u8; 64];
        let mut w2 = writer(&mut backing2);
        let out_of_range = dns_name_server_get(&s, &[3], &mut w2);
        assert_eq!(out_of_range, HandlerResult::Nack(nack::DATA_OUT_OF_RANGE));
    }

    #[test]
    fn hostname_round_trips() {
        let mut s = NetworkRoot::default();
        let set_result = dns_hostname_set(&mut s, b"foo");
        assert_eq!(set_result, HandlerResult::Ack(0));

        let mut backing = [0u8; 64];
        let mut w = writer(&mut backing);
        let get_result = dns_hostname_get(&s, &[], &mut w);
        assert_eq!(get_result, HandlerResult::Ack(3));
        assert_eq!(&backing[..3], b"foo");
    }

    #[test]
    fn domain_name_round_trips() {
        let mut s = NetworkRoot::default();
        dns_domain_name_set(&mut s, b"myco.co.nz");
        let mut backing = [0u8; 64];
        let mut w = writer(&mut backing);
        let get_result = dns_domain_name_get(&s, &[], &mut w);
        assert_eq!(get_result, HandlerResult::Ack(10));
        assert_eq!(&backing[..10], b"myco.co.nz");
    }
}
