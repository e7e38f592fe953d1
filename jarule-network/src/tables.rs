//! PID descriptor table for the network root device: the generic
//! "RDM information"/"production information" PIDs every responder
//! answers, plus the E1.37-2 network-specific PIDs wired to
//! `handlers.rs`.

use jarule_core::dispatch::{GetHandler, PidDescriptor, SetHandler};
use jarule_core::pid::param;
use jarule_core::responder;

use crate::handlers;
use crate::state::NetworkRoot;

macro_rules! descriptor {
    ($pid:expr, $get:expr, $set:expr, $min_pdl:expr) => {
        PidDescriptor {
            pid: $pid,
            get: $get,
            set: $set,
            min_get_pdl: $min_pdl,
        }
    };
}

pub static ROOT_TABLE: &[PidDescriptor<NetworkRoot>] = &[
    descriptor!(
        param::DEVICE_INFO,
        Some(responder::device_info::<NetworkRoot> as GetHandler<NetworkRoot>),
        None,
        0
    ),
    descriptor!(
        param::SUPPORTED_PARAMETERS,
        Some(responder::supported_parameters::<NetworkRoot> as GetHandler<NetworkRoot>),
        None,
        0
    ),
    descriptor!(
        param::PARAMETER_DESCRIPTION,
        Some(responder::parameter_description::<NetworkRoot> as GetHandler<NetworkRoot>),
        None,
        2
    ),
    descriptor!(
        param::DEVICE_MODEL_DESCRIPTION,
        Some(responder::device_model_description::<NetworkRoot> as GetHandler<NetworkRoot>),
        None,
        0
    ),
    descriptor!(
        param::MANUFACTURER_LABEL,
        Some(responder::manufacturer_label::<NetworkRoot> as GetHandler<NetworkRoot>),
        None,
        0
    ),
    descriptor!(
        param::DEVICE_LABEL,
        Some(responder::device_label_get::<NetworkRoot> as GetHandler<NetworkRoot>),
        Some(responder::device_label_set::<NetworkRoot> as SetHandler<NetworkRoot>),
        0
    ),
    descriptor!(
        param::SOFTWARE_VERSION_LABEL,
        Some(responder::software_version_label::<NetworkRoot> as GetHandler<NetworkRoot>),
        None,
        0
    ),
    descriptor!(
        param::IDENTIFY_DEVICE,
        Some(responder::identify_device_get::<NetworkRoot> as GetHandler<NetworkRoot>),
        Some(responder::identify_device_set::<NetworkRoot> as SetHandler<NetworkRoot>),
        0
    ),
    descriptor!(
        param::DMX_START_ADDRESS,
        Some(responder::dmx_start_address_get::<NetworkRoot> as GetHandler<NetworkRoot>),
        Some(responder::dmx_start_address_set::<NetworkRoot> as SetHandler<NetworkRoot>),
        0
    ),
    descriptor!(
        param::LANGUAGE_CAPABILITIES,
        Some(responder::language_capabilities::<NetworkRoot> as GetHandler<NetworkRoot>),
        None,
        0
    ),
    descriptor!(
        param::LANGUAGE,
        Some(responder::language_get::<NetworkRoot> as GetHandler<NetworkRoot>),
        Some(responder::language_set::<NetworkRoot> as SetHandler<NetworkRoot>),
        0
    ),
    descriptor!(
        param::PRODUCT_DETAIL_ID_LIST,
        Some(responder::product_detail_id_list::<NetworkRoot> as GetHandler<NetworkRoot>),
        None,
        0
    ),
    descriptor!(param::LIST_INTERFACES, Some(handlers::list_interfaces), None, 0),
    descriptor!(param::INTERFACE_LABEL, Some(handlers::interface_label), None, 4),
    descriptor!(
        param::INTERFACE_HARDWARE_ADDRESS_TYPE1,
        Some(handlers::interface_hardware_address),
        None,
        4
    ),
    descriptor!(param::IPV4_DHCP_MODE, Some(handlers::ipv4_dhcp_mode_get), None, 4),
    descriptor!(param::IPV4_ZEROCONF_MODE, Some(handlers::ipv4_zeroconf_mode_get), None, 4),
    descriptor!(
        param::IPV4_DEFAULT_ROUTE,
        Some(handlers::ipv4_default_route_get),
        Some(handlers::ipv4_default_route_set),
        0
    ),
    descriptor!(
        param::DNS_NAME_SERVER,
        Some(handlers::dns_name_server_get),
        Some(handlers::dns_name_server_set),
        1
    ),
    descriptor!(
        param::DNS_HOSTNAME,
        Some(handlers::dns_hostname_get),
        Some(handlers::dns_hostname_set),
        0
    ),
    descriptor!(
        param::DNS_DOMAIN_NAME,
        Some(handlers::dns_domain_name_get),
        Some(handlers::dns_domain_name_set),
        0
    ),
];
