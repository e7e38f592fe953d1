//! PID descriptor tables for the root device and sub-devices: every PID
//! either model answers, wired to its handler in `handlers.rs` or to the
//! generic handlers in `jarule_core::responder`.

use jarule_core::dispatch::{GetHandler, PidDescriptor, SetHandler};
use jarule_core::pid::param;
use jarule_core::responder;

use crate::handlers;
use crate::state::{DimmerRoot, DimmerSubDevice};

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

pub static ROOT_TABLE: &[PidDescriptor<DimmerRoot>] = &[
    descriptor!(param::DEVICE_INFO, Some(responder::device_info::<DimmerRoot> as GetHandler<DimmerRoot>), None, 0),
    descriptor!(
        param::SUPPORTED_PARAMETERS,
        Some(responder::supported_parameters::<DimmerRoot> as GetHandler<DimmerRoot>),
        None,
        0
    ),
    descriptor!(
        param::PARAMETER_DESCRIPTION,
        Some(responder::parameter_description::<DimmerRoot> as GetHandler<DimmerRoot>),
        None,
        2
    ),
    descriptor!(
        param::DEVICE_MODEL_DESCRIPTION,
        Some(responder::device_model_description::<DimmerRoot> as GetHandler<DimmerRoot>),
        None,
        0
    ),
    descriptor!(
        param::MANUFACTURER_LABEL,
        Some(responder::manufacturer_label::<DimmerRoot> as GetHandler<DimmerRoot>),
        None,
        0
    ),
    descriptor!(
        param::DEVICE_LABEL,
        Some(responder::device_label_get::<DimmerRoot> as GetHandler<DimmerRoot>),
        Some(responder::device_label_set::<DimmerRoot> as SetHandler<DimmerRoot>),
        0
    ),
    descriptor!(
        param::SOFTWARE_VERSION_LABEL,
        Some(responder::software_version_label::<DimmerRoot> as GetHandler<DimmerRoot>),
        None,
        0
    ),
    descriptor!(
        param::IDENTIFY_DEVICE,
        Some(responder::identify_device_get::<DimmerRoot> as GetHandler<DimmerRoot>),
        Some(responder::identify_device_set::<DimmerRoot> as SetHandler<DimmerRoot>),
        0
    ),
    descriptor!(
        param::DMX_PERSONALITY,
        Some(responder::dmx_personality_get::<DimmerRoot> as GetHandler<DimmerRoot>),
        Some(responder::dmx_personality_set::<DimmerRoot> as SetHandler<DimmerRoot>),
        0
    ),
    descriptor!(
        param::DMX_PERSONALITY_DESCRIPTION,
        Some(responder::dmx_personality_description::<DimmerRoot> as GetHandler<DimmerRoot>),
        None,
        1
    ),
    descriptor!(
        param::DMX_START_ADDRESS,
        Some(responder::dmx_start_address_get::<DimmerRoot> as GetHandler<DimmerRoot>),
        Some(responder::dmx_start_address_set::<DimmerRoot> as SetHandler<DimmerRoot>),
        0
    ),
    descriptor!(
        param::LANGUAGE_CAPABILITIES,
        Some(responder::language_capabilities::<DimmerRoot> as GetHandler<DimmerRoot>),
        None,
        0
    ),
    descriptor!(
        param::LANGUAGE,
        Some(responder::language_get::<DimmerRoot> as GetHandler<DimmerRoot>),
        Some(responder::language_set::<DimmerRoot> as SetHandler<DimmerRoot>),
        0
    ),
    descriptor!(
        param::PRODUCT_DETAIL_ID_LIST,
        Some(responder::product_detail_id_list::<DimmerRoot> as GetHandler<DimmerRoot>),
        None,
        0
    ),
    descriptor!(param::CAPTURE_PRESET, None, Some(handlers::capture_preset_set), 0),
    descriptor!(
        param::PRESET_PLAYBACK,
        Some(handlers::preset_playback_get),
        Some(handlers::preset_playback_set),
        0
    ),
    descriptor!(
        param::DMX_FAIL_MODE,
        Some(handlers::dmx_fail_mode_get),
        Some(handlers::dmx_fail_mode_set),
        0
    ),
    descriptor!(
        param::DMX_STARTUP_MODE,
        Some(handlers::dmx_startup_mode_get),
        Some(handlers::dmx_startup_mode_set),
        0
    ),
    descriptor!(
        param::POWER_ON_SELF_TEST,
        Some(handlers::power_on_self_test_get),
        Some(handlers::power_on_self_test_set),
        0
    ),
    descriptor!(param::LOCK_PIN, Some(handlers::lock_pin_get), Some(handlers::lock_pin_set), 0),
    descriptor!(
        param::LOCK_STATE,
        Some(handlers::lock_state_get),
        Some(handlers::lock_state_set),
        0
    ),
    descriptor!(
        param::LOCK_STATE_DESCRIPTION,
        Some(handlers::lock_state_description),
        None,
        1
    ),
    descriptor!(param::PRESET_INFO, Some(handlers::preset_info), None, 0),
    descriptor!(
        param::PRESET_STATUS,
        Some(handlers::preset_status_get),
        Some(handlers::preset_status_set),
        2
    ),
    descriptor!(
        param::PRESET_MERGEMODE,
        Some(handlers::preset_merge_mode_get),
        Some(handlers::preset_merge_mode_set),
        0
    ),
];

/// `RESET_DEVICE` has no typed state to touch; wired in directly as a
/// standalone SET-only check ahead of the root table in
/// `DimmerModel::handle_request` rather than forced into this table.
pub static SUBDEVICE_TABLE: &[PidDescriptor<DimmerSubDevice>] = &[
    descriptor!(param::DEVICE_INFO, Some(responder::device_info::<DimmerSubDevice> as GetHandler<DimmerSubDevice>), None, 0),
    descriptor!(
        param::SUPPORTED_PARAMETERS,
        Some(responder::supported_parameters::<DimmerSubDevice> as GetHandler<DimmerSubDevice>),
        None,
        0
    ),
    descriptor!(
        param::PARAMETER_DESCRIPTION,
        Some(responder::parameter_description::<DimmerSubDevice> as GetHandler<DimmerSubDevice>),
        None,
        2
    ),
    descriptor!(
        param::DEVICE_MODEL_DESCRIPTION,
        Some(responder::device_model_description::<DimmerSubDevice> as GetHandler<DimmerSubDevice>),
        None,
        0
    ),
    descriptor!(
        param::MANUFACTURER_LABEL,
        Some(responder::manufacturer_label::<DimmerSubDevice> as GetHandler<DimmerSubDevice>),
        None,
        0
    ),
    descriptor!(
        param::DEVICE_LABEL,
        Some(responder::device_label_get::<DimmerSubDevice> as GetHandler<DimmerSubDevice>),
        Some(responder::device_label_set::<DimmerSubDevice> as SetHandler<DimmerSubDevice>),
        0
    ),
    descriptor!(
        param::SOFTWARE_VERSION_LABEL,
        Some(responder::software_version_label::<DimmerSubDevice> as GetHandler<DimmerSubDevice>),
        None,
        0
    ),
    descriptor!(
        param::IDENTIFY_DEVICE,
        Some(responder::identify_device_get::<DimmerSubDevice> as GetHandler<DimmerSubDevice>),
        Some(responder::identify_device_set::<DimmerSubDevice> as SetHandler<DimmerSubDevice>),
        0
    ),
    descriptor!(
        param::DMX_PERSONALITY,
        Some(responder::dmx_personality_get::<DimmerSubDevice> as GetHandler<DimmerSubDevice>),
        Some(responder::dmx_personality_set::<DimmerSubDevice> as SetHandler<DimmerSubDevice>),
        0
    ),
    descriptor!(
        param::DMX_PERSONALITY_DESCRIPTION,
        Some(responder::dmx_personality_description::<DimmerSubDevice> as GetHandler<DimmerSubDevice>),
        None,
        1
    ),
    descriptor!(
        param::DMX_START_ADDRESS,
        Some(responder::dmx_start_address_get::<DimmerSubDevice> as GetHandler<DimmerSubDevice>),
        Some(responder::dmx_start_address_set::<DimmerSubDevice> as SetHandler<DimmerSubDevice>),
        0
    ),
    descriptor!(
        param::PRODUCT_DETAIL_ID_LIST,
        Some(responder::product_detail_id_list::<DimmerSubDevice> as GetHandler<DimmerSubDevice>),
        None,
        0
    ),
    descriptor!(
        param::IDENTIFY_MODE,
        Some(handlers::identify_mode_get),
        Some(handlers::identify_mode_set),
        0
    ),
    descriptor!(param::BURN_IN, Some(handlers::burn_in_get), Some(handlers::burn_in_set), 0),
    descriptor!(param::DIMMER_INFO, Some(handlers::dimmer_info), None, 0),
    descriptor!(
        param::MINIMUM_LEVEL,
        Some(handlers::minimum_level_get),
        Some(handlers::minimum_level_set),
        0
    ),
    descriptor!(
        param::MAXIMUM_LEVEL,
        Some(handlers::maximum_level_get),
        Some(handlers::maximum_level_set),
        0
    ),
    descriptor!(param::CURVE, Some(handlers::curve_get), Some(handlers::curve_set), 0),
    descriptor!(param::CURVE_DESCRIPTION, Some(handlers::curve_description), None, 1),
    descriptor!(
        param::OUTPUT_RESPONSE_TIME,
        Some(handlers::output_response_time_get),
        Some(handlers::output_response_time_set),
        0
    ),
    descriptor!(
        param::OUTPUT_RESPONSE_TIME_DESCRIPTION,
        Some(handlers::output_response_time_description),
        None,
        1
    ),
    descriptor!(
        param::MODULATION_FREQUENCY,
        Some(handlers::modulation_frequency_get),
        Some(handlers::modulation_frequency_set),
        0
    ),
    descriptor!(
        param::MODULATION_FREQUENCY_DESCRIPTION,
        Some(handlers::modulation_frequency_description),
        None,
        1
    ),
];
