//! RDM command classes, NACK reasons, and Parameter IDs.
//!
//! Transcribed from ANSI E1.20 §6.2.10, Table A-17 and E1.37-1/E1.37-2,
//! matching `rdm.h` in the original ja-rule firmware rather than
//! reinventing the numbering.

use num_enum::TryFromPrimitive;

/// RDM command classes (E1.20 §6.2.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum CommandClass {
    DiscoveryCommand = 0x10,
    DiscoveryCommandResponse = 0x11,
    GetCommand = 0x20,
    GetCommandResponse = 0x21,
    SetCommand = 0x30,
    SetCommandResponse = 0x31,
}

impl CommandClass {
    /// The response command class for this request class (GET -> GET_RESPONSE etc).
    pub const fn response_class(self) -> Self {
        match self {
            CommandClass::GetCommand | CommandClass::GetCommandResponse => {
                CommandClass::GetCommandResponse
            }
            CommandClass::SetCommand | CommandClass::SetCommandResponse => {
                CommandClass::SetCommandResponse
            }
            CommandClass::DiscoveryCommand | CommandClass::DiscoveryCommandResponse => {
                CommandClass::DiscoveryCommandResponse
            }
        }
    }

    pub const fn is_discovery(self) -> bool {
        matches!(self, CommandClass::DiscoveryCommand)
    }
}

/// RDM response types (E1.20 §6.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum ResponseType {
    Ack = 0x00,
    AckTimer = 0x01,
    NackReason = 0x02,
    AckOverflow = 0x03,
}

/// NACK reason codes, E1.20 Table A-17.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, thiserror::Error)]
#[repr(u16)]
pub enum NackReason {
    #[error("unknown PID")]
    UnknownPid = 0x0000,
    #[error("format error")]
    FormatError = 0x0001,
    #[error("hardware fault")]
    HardwareFault = 0x0002,
    #[error("proxy reject")]
    ProxyReject = 0x0003,
    #[error("write protect")]
    WriteProtect = 0x0004,
    #[error("unsupported command class")]
    UnsupportedCommandClass = 0x0005,
    #[error("data out of range")]
    DataOutOfRange = 0x0006,
    #[error("buffer full")]
    BufferFull = 0x0007,
    #[error("packet size unsupported")]
    PacketSizeUnsupported = 0x0008,
    #[error("sub device out of range")]
    SubDeviceOutOfRange = 0x0009,
    #[error("proxy buffer full")]
    ProxyBufferFull = 0x000a,
    #[error("action not supported")]
    ActionNotSupported = 0x000b,
    #[error("endpoint number invalid")]
    EndpointNumberInvalid = 0x0011,
}

/// Convenience re-export so callers can write `nack::WRITE_PROTECT` style
/// constants where an enum variant would be verbose (table literals).
pub mod nack {
    use super::NackReason;
    pub const UNKNOWN_PID: NackReason = NackReason::UnknownPid;
    pub const FORMAT_ERROR: NackReason = NackReason::FormatError;
    pub const WRITE_PROTECT: NackReason = NackReason::WriteProtect;
    pub const UNSUPPORTED_COMMAND_CLASS: NackReason = NackReason::UnsupportedCommandClass;
    pub const DATA_OUT_OF_RANGE: NackReason = NackReason::DataOutOfRange;
    pub const SUB_DEVICE_OUT_OF_RANGE: NackReason = NackReason::SubDeviceOutOfRange;
}

/// Parameter IDs from E1.20, E1.37-1 and E1.37-2.
#[allow(dead_code)]
pub mod param {
    // Discovery
    pub const DISC_UNIQUE_BRANCH: u16 = 0x0001;
    pub const DISC_MUTE: u16 = 0x0002;
    pub const DISC_UN_MUTE: u16 = 0x0003;

    // Network management
    pub const PROXIED_DEVICES: u16 = 0x0010;
    pub const PROXIED_DEVICE_COUNT: u16 = 0x0011;
    pub const COMMS_STATUS: u16 = 0x0015;

    // Status collection
    pub const QUEUED_MESSAGE: u16 = 0x0020;
    pub const STATUS_MESSAGES: u16 = 0x0030;
    pub const STATUS_ID_DESCRIPTION: u16 = 0x0031;
    pub const CLEAR_STATUS_ID: u16 = 0x0032;
    pub const SUB_DEVICE_STATUS_REPORT_THRESHOLD: u16 = 0x0033;

    // RDM information
    pub const SUPPORTED_PARAMETERS: u16 = 0x0050;
    pub const PARAMETER_DESCRIPTION: u16 = 0x0051;

    // Production information
    pub const DEVICE_INFO: u16 = 0x0060;
    pub const PRODUCT_DETAIL_ID_LIST: u16 = 0x0070;
    pub const DEVICE_MODEL_DESCRIPTION: u16 = 0x0080;
    pub const MANUFACTURER_LABEL: u16 = 0x0081;
    pub const DEVICE_LABEL: u16 = 0x0082;
    pub const FACTORY_DEFAULTS: u16 = 0x0090;
    pub const LANGUAGE_CAPABILITIES: u16 = 0x00a0;
    pub const LANGUAGE: u16 = 0x00b0;
    pub const SOFTWARE_VERSION_LABEL: u16 = 0x00c0;
    pub const BOOT_SOFTWARE_VERSION_ID: u16 = 0x00c1;
    pub const BOOT_SOFTWARE_VERSION_LABEL: u16 = 0x00c2;

    // DMX512
    pub const DMX_PERSONALITY: u16 = 0x00e0;
    pub const DMX_PERSONALITY_DESCRIPTION: u16 = 0x00e1;
    pub const DMX_START_ADDRESS: u16 = 0x00f0;
    pub const SLOT_INFO: u16 = 0x0120;
    pub const SLOT_DESCRIPTION: u16 = 0x0121;
    pub const DEFAULT_SLOT_VALUE: u16 = 0x0122;

    // Sensors
    pub const SENSOR_DEFINITION: u16 = 0x0200;
    pub const SENSOR_VALUE: u16 = 0x0201;
    pub const RECORD_SENSORS: u16 = 0x0202;

    // Power/lamp settings
    pub const DEVICE_HOURS: u16 = 0x0400;
    pub const LAMP_HOURS: u16 = 0x0401;
    pub const LAMP_STRIKES: u16 = 0x0402;
    pub const LAMP_STATE: u16 = 0x0403;
    pub const LAMP_ON_MODE: u16 = 0x0404;
    pub const DEVICE_POWER_CYCLES: u16 = 0x0405;

    // Display settings
    pub const DISPLAY_INVERT: u16 = 0x0500;
    pub const DISPLAY_LEVEL: u16 = 0x0501;

    // Configuration
    pub const PAN_INVERT: u16 = 0x0600;
    pub const TILT_INVERT: u16 = 0x0601;
    pub const PAN_TILT_SWAP: u16 = 0x0602;
    pub const REAL_TIME_CLOCK: u16 = 0x0603;

    // Control
    pub const IDENTIFY_DEVICE: u16 = 0x1000;
    pub const RESET_DEVICE: u16 = 0x1001;
    pub const POWER_STATE: u16 = 0x1010;
    pub const PERFORM_SELFTEST: u16 = 0x1020;
    pub const SELF_TEST_DESCRIPTION: u16 = 0x1021;
    pub const CAPTURE_PRESET: u16 = 0x1030;
    pub const PRESET_PLAYBACK: u16 = 0x1031;

    // E1.37-1: DMX512 setup
    pub const DMX_BLOCK_ADDRESS: u16 = 0x0140;
    pub const DMX_FAIL_MODE: u16 = 0x0141;
    pub const DMX_STARTUP_MODE: u16 = 0x0142;

    // E1.37-1: dimmer settings
    pub const DIMMER_INFO: u16 = 0x0340;
    pub const MINIMUM_LEVEL: u16 = 0x0341;
    pub const MAXIMUM_LEVEL: u16 = 0x0342;
    pub const CURVE: u16 = 0x0343;
    pub const CURVE_DESCRIPTION: u16 = 0x0344;

    // E1.37-1: control
    pub const OUTPUT_RESPONSE_TIME: u16 = 0x0345;
    pub const OUTPUT_RESPONSE_TIME_DESCRIPTION: u16 = 0x0346;
    pub const MODULATION_FREQUENCY: u16 = 0x0347;
    pub const MODULATION_FREQUENCY_DESCRIPTION: u16 = 0x0348;

    // E1.37-1: power/lamp settings
    pub const BURN_IN: u16 = 0x0440;

    // E1.37-1: configuration
    pub const LOCK_PIN: u16 = 0x0640;
    pub const LOCK_STATE: u16 = 0x0641;
    pub const LOCK_STATE_DESCRIPTION: u16 = 0x0642;
    pub const IDENTIFY_MODE: u16 = 0x1040;
    pub const PRESET_INFO: u16 = 0x1041;
    pub const PRESET_STATUS: u16 = 0x1042;
    pub const PRESET_MERGEMODE: u16 = 0x1043;
    pub const POWER_ON_SELF_TEST: u16 = 0x1044;

    // E1.37-2: network interfaces
    pub const LIST_INTERFACES: u16 = 0x0700;
    pub const INTERFACE_LABEL: u16 = 0x0701;
    pub const INTERFACE_HARDWARE_ADDRESS_TYPE1: u16 = 0x0702;
    pub const IPV4_DHCP_MODE: u16 = 0x0703;
    pub const IPV4_ZEROCONF_MODE: u16 = 0x0704;
    pub const IPV4_CURRENT_ADDRESS: u16 = 0x0705;
    pub const IPV4_STATIC_ADDRESS: u16 = 0x0706;
    pub const INTERFACE_RENEW_DHCP: u16 = 0x0707;
    pub const INTERFACE_RELEASE_DHCP: u16 = 0x0708;
    pub const INTERFACE_APPLY_CONFIGURATION: u16 = 0x0709;
    pub const IPV4_DEFAULT_ROUTE: u16 = 0x070a;
    pub const DNS_NAME_SERVER: u16 = 0x070b;
    pub const DNS_HOSTNAME: u16 = 0x070c;
    pub const DNS_DOMAIN_NAME: u16 = 0x070d;
}

/// Product category codes, E1.20 Table A-5 (subset actually emitted by the
/// shipped models; the full table is > 60 entries and the rest are inert
/// data values not involved in any dispatch logic).
#[allow(dead_code)]
pub mod product_category {
    pub const NOT_DECLARED: u16 = 0x0000;
    pub const DIMMER: u16 = 0x0500;
    pub const DIMMER_CS_LED: u16 = 0x0509;
    pub const CONTROL: u16 = 0x7000;
    pub const TEST_EQUIPMENT: u16 = 0x7101;
    pub const OTHER: u16 = 0x7fff;
}

/// RDM product detail IDs (E1.20 Table A-7, subset used by the shipped models).
#[allow(dead_code)]
pub mod product_detail {
    pub const NOT_DECLARED: u16 = 0x0000;
    pub const TEST: u16 = 0x0006;
    pub const CHANGEOVER_MANUAL: u16 = 0x0002;
}

pub const RDM_VERSION: u16 = 0x0100;
pub const START_CODE: u8 = 0xcc;
pub const SUB_START_CODE: u8 = 0x01;
pub const RDM_MIN_FRAME_SIZE: usize = 26;
