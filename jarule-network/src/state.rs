//! Network interface model state: a fixed interface table plus the
//! mutable default-route/DNS settings a controller can configure.

use heapless::{String, Vec};
use jarule_core::responder::{ResponderDefinition, ResponderLike, ResponderState};

pub const MAX_NAME_SERVERS: usize = 3;
pub const MAX_DNS_LABEL: usize = 63;

/// One entry of the fixed interface table (E1.37-2 `LIST_INTERFACES`).
/// Real ja-rule builds enumerate whatever network interfaces the host
/// OS exposes; the responder core has no OS to query, so the table is
/// compiled in, matching the interface IDs/types the original test
/// fixture exercises (ids 1, 3, 4 — note the gap at 2, same shape as the
/// dimmer's sub-device numbering).
#[derive(Debug, Clone, Copy)]
pub struct InterfaceDefinition {
    pub id: u32,
    pub hardware_type: u16,
    pub label: &'static str,
    pub hardware_address: [u8; 6],
    /// `true` if this interface's DHCP/Zeroconf mode is hard-wired on
    /// and can't be toggled (matches the fixture's interface 4, which
    /// always reports mode `1` for both PIDs).
    pub mode_fixed_on: bool,
}

pub static FIXED_INTERFACES: [InterfaceDefinition; 3] = [
    InterfaceDefinition {
        id: 1,
        hardware_type: 0x0001,
        label: "eth0",
        hardware_address: [0x52, 0x12, 0x34, 0x56, 0x78, 0x9a],
        mode_fixed_on: false,
    },
    InterfaceDefinition {
        id: 3,
        hardware_type: 0x001f,
        label: "wlan0",
        hardware_address: [0x52, 0x12, 0x34, 0x56, 0x78, 0x9b],
        mode_fixed_on: false,
    },
    InterfaceDefinition {
        id: 4,
        hardware_type: 0x0001,
        label: "eth1",
        hardware_address: [0x52, 0x12, 0x34, 0x56, 0x78, 0x9c],
        mode_fixed_on: true,
    },
];

pub fn find_interface(id: u32) -> Option<&'static InterfaceDefinition> {
    FIXED_INTERFACES.iter().find(|iface| iface.id == id)
}

#[derive(Debug, Clone)]
pub struct NetworkRoot {
    pub responder: ResponderState,
    pub default_route_iface: u32,
    pub default_route_ip: [u8; 4],
    pub name_servers: [[u8; 4]; MAX_NAME_SERVERS],
    /// Highest 1-based index written by a `DNS_NAME_SERVER` SET; GET
    /// rejects any index beyond this even though the backing array has
    /// `MAX_NAME_SERVERS` capacity (an unset slot is not a valid server).
    pub name_server_count: u8,
    pub hostname: String<MAX_DNS_LABEL>,
    pub domain_name: String<MAX_DNS_LABEL>,
}

impl Default for NetworkRoot {
    fn default() -> Self {
        NetworkRoot {
            responder: ResponderState::default(),
            default_route_iface: 0,
            default_route_ip: [0; 4],
            name_servers: [[0; 4]; MAX_NAME_SERVERS],
            name_server_count: 0,
            hostname: String::new(),
            domain_name: String::new(),
        }
    }
}

impl ResponderLike for NetworkRoot {
    fn definition(&self) -> &'static ResponderDefinition {
        &ROOT_DEFINITION
    }
    fn state(&self) -> &ResponderState {
        &self.responder
    }
    fn state_mut(&mut self) -> &mut ResponderState {
        &mut self.responder
    }
    fn model_supported_pids(&self) -> &'static [u16] {
        ROOT_SUPPORTED_PIDS
    }
}

fn no_footprint(_personality_index: u8) -> u16 {
    0
}

pub static ROOT_DEFINITION: ResponderDefinition = ResponderDefinition {
    model_id: jarule_core::model::ModelId::Network as u16,
    product_category: jarule_core::pid::product_category::CONTROL,
    software_version_id: 0x0000_0000,
    software_version_label: "Alpha",
    model_description: "Ja Rule Network Device",
    manufacturer_label: "Open Lighting Project",
    product_detail_ids: &[jarule_core::pid::product_detail::TEST],
    personalities: &[],
    sensors: &[],
    footprint_of: no_footprint,
};

use jarule_core::pid::param;

pub static ROOT_SUPPORTED_PIDS: &[u16] = &[
    param::LIST_INTERFACES,
    param::INTERFACE_LABEL,
    param::INTERFACE_HARDWARE_ADDRESS_TYPE1,
    param::IPV4_DHCP_MODE,
    param::IPV4_ZEROCONF_MODE,
    param::IPV4_DEFAULT_ROUTE,
    param::DNS_NAME_SERVER,
    param::DNS_HOSTNAME,
    param::DNS_DOMAIN_NAME,
    param::DEVICE_LABEL,
    param::MANUFACTURER_LABEL,
    param::DEVICE_MODEL_DESCRIPTION,
];

pub type NameServers = Vec<[u8; 4], MAX_NAME_SERVERS>;
