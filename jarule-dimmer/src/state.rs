//! Root-device and sub-device state for the dimmer model.

use heapless::String;
use jarule_core::responder::{ResponderDefinition, ResponderLike, ResponderState};

pub const NUMBER_OF_SUB_DEVICES: usize = 4;
pub const NUMBER_OF_SCENES: usize = 3;
pub const NUMBER_OF_LOCK_STATES: u8 = 3;
pub const NUMBER_OF_CURVES: u8 = 4;
pub const NUMBER_OF_OUTPUT_RESPONSE_TIMES: u8 = 2;
pub const NUMBER_OF_MODULATION_FREQUENCIES: u8 = 4;
pub const MAX_DMX_START_ADDRESS: u16 = 512;
pub const INVALID_DMX_START_ADDRESS: u16 = 0xffff;
pub const MAX_PIN_CODE: u16 = 9999;

/// Index of a sub-device within `g_subdevices` alongside its sub-device
/// number. Matches the original firmware's gap at sub-device 2: indices
/// are `[1, 3, 4, 5]`, not `[1, 2, 3, 4]`.
pub const SUB_DEVICE_NUMBERS: [u16; NUMBER_OF_SUB_DEVICES] = [1, 3, 4, 5];

pub const IDENTIFY_MODE_QUIET: u8 = 0x01;
pub const IDENTIFY_MODE_LOUD: u8 = 0x02;

pub const PRESET_NOT_PROGRAMMED: u8 = 0x00;
pub const PRESET_PROGRAMMED: u8 = 0x01;
pub const PRESET_PROGRAMMED_READ_ONLY: u8 = 0x02;

pub const PRESET_PLAYBACK_OFF: u16 = 0x0000;
pub const PRESET_PLAYBACK_ALL: u16 = 0xffff;

pub const MERGE_MODE_DEFAULT: u8 = 0x00;
pub const MERGE_MODE_DMX_ONLY: u8 = 0x03;

pub const LOCK_STATE_UNLOCKED: u8 = 0x00;
pub const LOCK_STATE_SUBDEVICES_LOCKED: u8 = 0x01;
pub const LOCK_STATE_ALL_LOCKED: u8 = 0x02;

pub const LOCK_STATES: [&str; 3] = ["Unlocked", "Subdevices locked", "Root & subdevices locked"];
pub const CURVE_DESCRIPTIONS: [&str; 4] = ["Linear", "Modified Linear", "Square", "Modified Square"];
pub const OUTPUT_RESPONSE_DESCRIPTIONS: [&str; 2] = ["Fast", "Slow"];
pub const MODULATION_FREQUENCIES: [(u32, &str); 4] = [
    (50, "50 Hz"),
    (60, "60 Hz"),
    (1000, "1000 Hz"),
    (2000, "2000 Hz"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Scene {
    pub up_fade_time: u16,
    pub down_fade_time: u16,
    pub wait_time: u16,
    pub programmed_state: u8,
}

/// Root device: the presets/lock/DMX-block-address owner. Its own
/// `ResponderState` carries device label/identify/personality/DMX start
/// address the way every responder does; the fields below are what only
/// the root device has.
#[derive(Debug, Clone)]
pub struct DimmerRoot {
    pub responder: ResponderState,
    pub scenes: [Scene; NUMBER_OF_SCENES],
    pub playback_mode: u16,
    pub playback_level: u8,
    pub startup_scene: u16,
    pub startup_delay: u16,
    pub startup_hold: u16,
    pub startup_level: u8,
    pub fail_scene: u16,
    pub fail_loss_of_signal_delay: u16,
    pub fail_hold_time: u16,
    pub fail_level: u8,
    pub pin_code: u16,
    pub lock_state: u8,
    pub merge_mode: u8,
    pub power_on_self_test: bool,
}

impl Default for DimmerRoot {
    fn default() -> Self {
        DimmerRoot {
            responder: ResponderState::default(),
            scenes: [Scene::default(); NUMBER_OF_SCENES],
            playback_mode: PRESET_PLAYBACK_OFF,
            playback_level: 0,
            startup_scene: PRESET_PLAYBACK_OFF,
            startup_delay: 0,
            startup_hold: 0,
            startup_level: 0,
            fail_scene: PRESET_PLAYBACK_OFF,
            fail_loss_of_signal_delay: 0,
            fail_hold_time: 0,
            fail_level: 0,
            pin_code: 0,
            lock_state: LOCK_STATE_UNLOCKED,
            merge_mode: MERGE_MODE_DEFAULT,
            power_on_self_test: false,
        }
    }
}

impl ResponderLike for DimmerRoot {
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

/// One dimmer sub-device: a single-channel (1-slot personality) output.
#[derive(Debug, Clone)]
pub struct DimmerSubDevice {
    pub responder: ResponderState,
    pub index: u16,
    pub min_level_increasing: u16,
    pub min_level_decreasing: u16,
    pub max_level: u16,
    pub on_below_min: u8,
    pub identify_mode: u8,
    pub burn_in: u8,
    pub curve: u8,
    pub output_response_time: u8,
    pub modulation_frequency: u8,
}

impl DimmerSubDevice {
    pub fn new(index: u16) -> Self {
        DimmerSubDevice {
            responder: ResponderState::default(),
            index,
            min_level_increasing: 0,
            min_level_decreasing: 0,
            max_level: 0,
            on_below_min: 0,
            identify_mode: IDENTIFY_MODE_QUIET,
            burn_in: 0,
            curve: 1,
            output_response_time: 1,
            modulation_frequency: 1,
        }
    }
}

impl ResponderLike for DimmerSubDevice {
    fn definition(&self) -> &'static ResponderDefinition {
        &SUBDEVICE_DEFINITION
    }
    fn state(&self) -> &ResponderState {
        &self.responder
    }
    fn state_mut(&mut self) -> &mut ResponderState {
        &mut self.responder
    }
    fn model_supported_pids(&self) -> &'static [u16] {
        SUBDEVICE_SUPPORTED_PIDS
    }
}

use jarule_core::responder::PersonalityDefinition;

static PERSONALITIES: [PersonalityDefinition; 1] = [PersonalityDefinition {
    slot_count: 1,
    description: "Dimmer",
}];

fn footprint_of(_personality_index: u8) -> u16 {
    1
}

pub static ROOT_DEFINITION: ResponderDefinition = ResponderDefinition {
    model_id: jarule_core::model::ModelId::Dimmer as u16,
    product_category: jarule_core::pid::product_category::DIMMER,
    software_version_id: 0x0000_0000,
    software_version_label: "Alpha",
    model_description: "Ja Rule Dimmer Device",
    manufacturer_label: "Open Lighting Project",
    product_detail_ids: &[jarule_core::pid::product_detail::TEST],
    personalities: &PERSONALITIES,
    sensors: &[],
    footprint_of,
};

pub static SUBDEVICE_DEFINITION: ResponderDefinition = ResponderDefinition {
    model_id: jarule_core::model::ModelId::Dimmer as u16,
    product_category: jarule_core::pid::product_category::DIMMER,
    software_version_id: 0x0000_0000,
    software_version_label: "Alpha",
    model_description: "Ja Rule Dimmer Device",
    manufacturer_label: "Open Lighting Project",
    product_detail_ids: &[jarule_core::pid::product_detail::TEST],
    personalities: &PERSONALITIES,
    sensors: &[],
    footprint_of,
};

use jarule_core::pid::param;

pub static ROOT_SUPPORTED_PIDS: &[u16] = &[
    param::CAPTURE_PRESET,
    param::PRESET_PLAYBACK,
    param::DMX_BLOCK_ADDRESS,
    param::DMX_FAIL_MODE,
    param::DMX_STARTUP_MODE,
    param::POWER_ON_SELF_TEST,
    param::LOCK_PIN,
    param::LOCK_STATE,
    param::LOCK_STATE_DESCRIPTION,
    param::PRESET_INFO,
    param::PRESET_STATUS,
    param::PRESET_MERGEMODE,
    param::DEVICE_LABEL,
    param::DMX_PERSONALITY,
    param::DMX_PERSONALITY_DESCRIPTION,
    param::DMX_START_ADDRESS,
    param::MANUFACTURER_LABEL,
    param::DEVICE_MODEL_DESCRIPTION,
];

pub static SUBDEVICE_SUPPORTED_PIDS: &[u16] = &[
    param::IDENTIFY_MODE,
    param::BURN_IN,
    param::DIMMER_INFO,
    param::MINIMUM_LEVEL,
    param::MAXIMUM_LEVEL,
    param::CURVE,
    param::CURVE_DESCRIPTION,
    param::OUTPUT_RESPONSE_TIME,
    param::OUTPUT_RESPONSE_TIME_DESCRIPTION,
    param::MODULATION_FREQUENCY,
    param::MODULATION_FREQUENCY_DESCRIPTION,
    param::DEVICE_LABEL,
    param::DMX_PERSONALITY,
    param::DMX_PERSONALITY_DESCRIPTION,
    param::DMX_START_ADDRESS,
    param::MANUFACTURER_LABEL,
    param::DEVICE_MODEL_DESCRIPTION,
];

/// Recomputes every sub-device's DMX start address starting at
/// `start_address`, contiguously by personality footprint, exactly as
/// `ResetToBlockAddress` does. Fails (leaving addresses unchanged) if the
/// combined footprint would run past slot 512.
pub fn reset_to_block_address(subdevices: &mut [DimmerSubDevice], start_address: u16) -> bool {
    let total_footprint: u32 = subdevices
        .iter()
        .map(|s| (s.definition().footprint_of)(s.responder.personality_index) as u32)
        .sum();
    if (MAX_DMX_START_ADDRESS as u32 - start_address as u32 + 1) < total_footprint {
        return false;
    }
    let mut address = start_address;
    for sub in subdevices.iter_mut() {
        sub.responder.dmx_start_address = address;
        address += (sub.definition().footprint_of)(sub.responder.personality_index);
    }
    true
}

pub fn new_subdevices() -> [DimmerSubDevice; NUMBER_OF_SUB_DEVICES] {
    [
        DimmerSubDevice::new(SUB_DEVICE_NUMBERS[0]),
        DimmerSubDevice::new(SUB_DEVICE_NUMBERS[1]),
        DimmerSubDevice::new(SUB_DEVICE_NUMBERS[2]),
        DimmerSubDevice::new(SUB_DEVICE_NUMBERS[3]),
    ]
}

#[allow(dead_code)]
pub type Label = String<32>;
