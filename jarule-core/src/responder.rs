//! Generic PID handlers shared by every responder model (root device or
//! sub-device): the "RDM information" and "production information"
//! categories that every E1.20 responder answers the same way regardless
//! of what it actually does. A concrete model supplies the data these
//! handlers format (via [`ResponderLike`] and a `&'static`
//! [`ResponderDefinition`]) and layers its own PID-specific handlers on
//! top through its own descriptor table (see `jarule-dimmer`,
//! `jarule-network`).

use crate::dispatch::HandlerResult;
use crate::buffer::ParamWriter;
use crate::pid::{nack, param};

/// One DMX512 personality (footprint + description), E1.20 §3.3.4.
#[derive(Debug, Clone, Copy)]
pub struct PersonalityDefinition {
    pub slot_count: u16,
    pub description: &'static str,
}

/// A sensor definition, E1.37-1 §4.2. No shipped model populates this
/// (no live sensors to report); the type exists so `SENSOR_DEFINITION`
/// dispatch has something to range-check against.
#[derive(Debug, Clone, Copy)]
pub struct SensorDefinition {
    pub kind: u8,
    pub unit: u8,
    pub prefix: u8,
    pub range_min: i16,
    pub range_max: i16,
    pub description: &'static str,
}

/// One entry of `SLOT_INFO` / `SLOT_DESCRIPTION` (E1.20 §10.8).
#[derive(Debug, Clone, Copy)]
pub struct SlotDefinition {
    pub offset: u16,
    pub slot_type: SlotType,
    pub slot_label: SlotLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SlotType {
    Primary = 0x00,
    SecFine = 0x01,
}

/// Standard slot label IDs, E1.20 Table A-17 / E1.37-1 (subset used by
/// the shipped dimmer personalities).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum SlotLabel {
    Intensity = 0x0001,
    IntensityFine = 0x0002,
}

/// Static, per-model data: everything about a responder that does not
/// change at runtime. One of these exists per model (not per instance),
/// analogous to `RDM_RESPONDER_DEFINITION` in the original firmware.
pub struct ResponderDefinition {
    pub model_id: u16,
    pub product_category: u16,
    pub software_version_id: u32,
    pub software_version_label: &'static str,
    pub model_description: &'static str,
    pub manufacturer_label: &'static str,
    pub product_detail_ids: &'static [u16],
    pub personalities: &'static [PersonalityDefinition],
    pub sensors: &'static [SensorDefinition],
    pub footprint_of: fn(personality_index: u8) -> u16,
}

/// Runtime, per-instance state common to every responder (root device or
/// sub-device). A concrete model's state struct embeds this and
/// implements [`ResponderLike`] by delegating to it, the way the C
/// firmware's `DimmerRootDevice`/`DimmerSubDevice` both embed a common
/// header struct.
#[derive(Debug, Clone)]
pub struct ResponderState {
    pub device_label: heapless::String<32>,
    pub language: [u8; 2],
    pub identify_on: bool,
    pub personality_index: u8,
    pub dmx_start_address: u16,
}

impl Default for ResponderState {
    fn default() -> Self {
        ResponderState {
            device_label: heapless::String::new(),
            language: *b"en",
            identify_on: false,
            personality_index: 1,
            dmx_start_address: 1,
        }
    }
}

/// What a PID dispatcher needs from any responder model instance in
/// order to serve the generic PID set. A concrete model additionally
/// implements its own PID-specific handlers with the same signature
/// (`fn(&mut Self, &mut ParamWriter) -> HandlerResult` /
/// `fn(&mut Self, &[u8]) -> HandlerResult`) against `Self` directly,
/// rather than through this trait, since those handlers need the
/// model's own fields.
pub trait ResponderLike {
    fn definition(&self) -> &'static ResponderDefinition;
    fn state(&self) -> &ResponderState;
    fn state_mut(&mut self) -> &mut ResponderState;
    /// The `SUPPORTED_PARAMETERS` list of model-specific (non-generic)
    /// PIDs this instance answers, excluding the always-required set
    /// (E1.20 §10.2 Table A-17 footnote: those must never be listed).
    fn model_supported_pids(&self) -> &'static [u16];
}

/// PIDs every responder answers without being listed in
/// `SUPPORTED_PARAMETERS` (E1.20 §10.2): they're always required.
const ALWAYS_REQUIRED_PIDS: &[u16] = &[
    param::DISC_UNIQUE_BRANCH,
    param::DISC_MUTE,
    param::DISC_UN_MUTE,
    param::SUPPORTED_PARAMETERS,
    param::PARAMETER_DESCRIPTION,
    param::DEVICE_INFO,
    param::SOFTWARE_VERSION_LABEL,
    param::DMX_START_ADDRESS,
    param::IDENTIFY_DEVICE,
];

pub fn device_info<S: ResponderLike>(s: &S, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    let def = s.definition();
    let state = s.state();
    let footprint = (def.footprint_of)(state.personality_index);
    w.push_u16(crate::pid::RDM_VERSION)
        .push_u16(def.model_id)
        .push_u16(def.product_category)
        .push_u32(def.software_version_id)
        .push_u16(footprint)
        .push_u8(state.personality_index)
        .push_u8(def.personalities.len() as u8)
        .push_u16(state.dmx_start_address)
        .push_u16(0) // sub_device_count: filled in by the router for the root device
        .push_u8(def.sensors.len() as u8);
    HandlerResult::Ack(w.len())
}

pub fn supported_parameters<S: ResponderLike>(s: &S, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    for &pid in s.model_supported_pids() {
        if !ALWAYS_REQUIRED_PIDS.contains(&pid) {
            w.push_u16(pid);
        }
    }
    HandlerResult::Ack(w.len())
}

pub fn device_model_description<S: ResponderLike>(s: &S, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_label(s.definition().model_description, 32);
    HandlerResult::Ack(w.len())
}

pub fn manufacturer_label<S: ResponderLike>(s: &S, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_label(s.definition().manufacturer_label, 32);
    HandlerResult::Ack(w.len())
}

pub fn device_label_get<S: ResponderLike>(s: &S, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_label(s.state().device_label.as_str(), 32);
    HandlerResult::Ack(w.len())
}

pub fn device_label_set<S: ResponderLike>(s: &mut S, data: &[u8]) -> HandlerResult {
    if data.len() > 32 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let text = match core::str::from_utf8(data) {
        Ok(t) => t,
        Err(_) => return HandlerResult::Nack(nack::FORMAT_ERROR),
    };
    let mut label = heapless::String::new();
    if label.push_str(text).is_err() {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    s.state_mut().device_label = label;
    HandlerResult::Ack(0)
}

pub fn software_version_label<S: ResponderLike>(s: &S, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_label(s.definition().software_version_label, 32);
    HandlerResult::Ack(w.len())
}

pub fn identify_device_get<S: ResponderLike>(s: &S, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u8(s.state().identify_on as u8);
    HandlerResult::Ack(w.len())
}

pub fn identify_device_set<S: ResponderLike>(s: &mut S, data: &[u8]) -> HandlerResult {
    if data.len() != 1 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    s.state_mut().identify_on = match data[0] {
        0 => false,
        1 => true,
        _ => return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE),
    };
    HandlerResult::Ack(0)
}

pub fn dmx_personality_get<S: ResponderLike>(s: &S, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u8(s.state().personality_index)
        .push_u8(s.definition().personalities.len() as u8);
    HandlerResult::Ack(w.len())
}

pub fn dmx_personality_set<S: ResponderLike>(s: &mut S, data: &[u8]) -> HandlerResult {
    if data.len() != 1 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let index = data[0];
    let count = s.definition().personalities.len() as u8;
    if index == 0 || index > count {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    s.state_mut().personality_index = index;
    HandlerResult::Ack(0)
}

pub fn dmx_personality_description<S: ResponderLike>(
    s: &S,
    request_data: &[u8],
    w: &mut ParamWriter,
) -> HandlerResult {
    if request_data.len() != 1 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let index = request_data[0];
    let personalities = s.definition().personalities;
    if index == 0 || index as usize > personalities.len() {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    let personality = personalities[index as usize - 1];
    w.push_u8(index)
        .push_u16(personality.slot_count)
        .push_label(personality.description, 32);
    HandlerResult::Ack(w.len())
}

pub fn dmx_start_address_get<S: ResponderLike>(s: &S, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u16(s.state().dmx_start_address);
    HandlerResult::Ack(w.len())
}

pub fn dmx_start_address_set<S: ResponderLike>(s: &mut S, data: &[u8]) -> HandlerResult {
    if data.len() != 2 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let address = u16::from_be_bytes([data[0], data[1]]);
    if address == 0 || address > 512 {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    s.state_mut().dmx_start_address = address;
    HandlerResult::Ack(0)
}

pub fn slot_info<S: ResponderLike>(
    s: &S,
    slots: &'static [SlotDefinition],
    w: &mut ParamWriter,
) -> HandlerResult {
    let _ = s;
    for slot in slots {
        w.push_u16(slot.offset)
            .push_u8(slot.slot_type as u8)
            .push_u16(slot.slot_label as u16);
    }
    HandlerResult::Ack(w.len())
}

pub fn slot_description(
    request_data: &[u8],
    slots: &'static [SlotDefinition],
    descriptions: &'static [&'static str],
    w: &mut ParamWriter,
) -> HandlerResult {
    if request_data.len() != 2 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let slot_number = u16::from_be_bytes([request_data[0], request_data[1]]);
    if slot_number as usize >= slots.len() {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    w.push_u16(slot_number)
        .push_label(descriptions[slot_number as usize], 32);
    HandlerResult::Ack(w.len())
}

pub fn sensor_definition<S: ResponderLike>(
    s: &S,
    request_data: &[u8],
    w: &mut ParamWriter,
) -> HandlerResult {
    if request_data.len() != 1 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let sensors = s.definition().sensors;
    let index = request_data[0];
    if index as usize >= sensors.len() {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    let sensor = sensors[index as usize];
    w.push_u8(index)
        .push_u8(sensor.kind)
        .push_u8(sensor.unit)
        .push_u8(sensor.prefix)
        .push_u16(sensor.range_min as u16)
        .push_u16(sensor.range_max as u16)
        .push_u16(sensor.range_min as u16)
        .push_u16(sensor.range_max as u16)
        .push_u8(0)
        .push_label(sensor.description, 32);
    HandlerResult::Ack(w.len())
}

/// No shipped model has live sensors to read back (Non-goal: no actual
/// lamp/sensor driving), so `SENSOR_VALUE` always NACKs out of range once
/// the index is checked against the (empty) definition list.
pub fn sensor_value<S: ResponderLike>(s: &S, request_data: &[u8], _w: &mut ParamWriter) -> HandlerResult {
    if request_data.len() != 1 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let index = request_data[0];
    if index as usize >= s.definition().sensors.len() {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    HandlerResult::Nack(nack::DATA_OUT_OF_RANGE)
}

/// Manufacturer-specific PID description range is 0x8000-0xffdf (E1.20
/// Table A-1); nothing in these models actually registers one, so every
/// in-range request still NACKs, but out-of-range requests get the more
/// specific NACK reason.
pub fn parameter_description<S: ResponderLike>(_s: &S, request_data: &[u8], _w: &mut ParamWriter) -> HandlerResult {
    if request_data.len() != 2 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let pid = u16::from_be_bytes([request_data[0], request_data[1]]);
    if !(0x8000..=0xffdf).contains(&pid) {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    HandlerResult::Nack(nack::UNKNOWN_PID)
}

pub fn language_capabilities<S: ResponderLike>(_s: &S, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_bytes(b"en");
    HandlerResult::Ack(w.len())
}

pub fn language_get<S: ResponderLike>(s: &S, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_bytes(&s.state().language);
    HandlerResult::Ack(w.len())
}

pub fn language_set<S: ResponderLike>(s: &mut S, data: &[u8]) -> HandlerResult {
    if data.len() != 2 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    if data != b"en" {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    s.state_mut().language = [data[0], data[1]];
    HandlerResult::Ack(0)
}

pub fn product_detail_id_list<S: ResponderLike>(s: &S, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    for &id in s.definition().product_detail_ids {
        w.push_u16(id);
    }
    HandlerResult::Ack(w.len())
}

/// `RESET_DEVICE` is accepted (warm/cold reset byte validated) but has no
/// observable effect: there is no persistent state to reload and the
/// process doesn't actually restart in this responder core (Non-goal: no
/// real hardware reset path). Matches the original firmware's behavior
/// of ACKing the command before `APP_Reset` runs asynchronously.
pub fn reset_device_set(data: &[u8]) -> HandlerResult {
    match data {
        [0] | [1] => HandlerResult::Ack(0),
        _ => HandlerResult::Nack(nack::DATA_OUT_OF_RANGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        def: &'static ResponderDefinition,
        state: ResponderState,
    }

    static DEF: ResponderDefinition = ResponderDefinition {
        model_id: 0x0100,
        product_category: crate::pid::product_category::DIMMER,
        software_version_id: 1,
        software_version_label: "1.0.0",
        model_description: "Test Fixture",
        manufacturer_label: "Test Co",
        product_detail_ids: &[crate::pid::product_detail::TEST],
        personalities: &[PersonalityDefinition {
            slot_count: 1,
            description: "1 Channel",
        }],
        sensors: &[],
        footprint_of: |_| 1,
    };

    impl ResponderLike for Fixture {
        fn definition(&self) -> &'static ResponderDefinition {
            self.def
        }
        fn state(&self) -> &ResponderState {
            &self.state
        }
        fn state_mut(&mut self) -> &mut ResponderState {
            &mut self.state
        }
        fn model_supported_pids(&self) -> &'static [u16] {
            &[param::DEVICE_LABEL]
        }
    }

    fn fixture() -> Fixture {
        Fixture {
            def: &DEF,
            state: ResponderState::default(),
        }
    }

    #[test]
    fn device_label_round_trips() {
        let mut f = fixture();
        assert!(matches!(
            device_label_set(&mut f, b"Dimmer #1"),
            HandlerResult::Ack(0)
        ));
        let mut backing = [0u8; MAX_PARAM_DATA_FOR_TEST];
        let mut w = ParamWriter::new(&mut backing);
        device_label_get(&f, &[], &mut w);
        assert_eq!(&backing[..9], b"Dimmer #1");
    }

    const MAX_PARAM_DATA_FOR_TEST: usize = 64;

    #[test]
    fn supported_parameters_excludes_always_required() {
        let f = fixture();
        let mut backing = [0u8; MAX_PARAM_DATA_FOR_TEST];
        let mut w = ParamWriter::new(&mut backing);
        supported_parameters(&f, &[], &mut w);
        assert_eq!(w.len(), 2);
        assert_eq!(&backing[..2], &param::DEVICE_LABEL.to_be_bytes());
    }

    #[test]
    fn dmx_start_address_rejects_zero_and_out_of_range() {
        let mut f = fixture();
        assert!(matches!(
            dmx_start_address_set(&mut f, &0u16.to_be_bytes()),
            HandlerResult::Nack(nack::DATA_OUT_OF_RANGE)
        ));
        assert!(matches!(
            dmx_start_address_set(&mut f, &513u16.to_be_bytes()),
            HandlerResult::Nack(nack::DATA_OUT_OF_RANGE)
        ));
    }
}
