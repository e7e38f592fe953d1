//! Root and sub-device PID handlers. Signatures match
//! `jarule_core::dispatch::{GetHandler, SetHandler}` so these slot
//! directly into a `PidDescriptor` table.

use jarule_core::buffer::ParamWriter;
use jarule_core::dispatch::HandlerResult;
use jarule_core::pid::nack;

use crate::state::*;

fn u16_at(data: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([data[offset], data[offset + 1]])
}

// ---- Root PID handlers -----------------------------------------------

pub fn capture_preset_set(root: &mut DimmerRoot, data: &[u8]) -> HandlerResult {
    if data.len() != 8 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let scene_index = u16_at(data, 0);
    let up_fade_time = u16_at(data, 2);
    let down_fade_time = u16_at(data, 4);
    let wait_time = u16_at(data, 6);
    if scene_index == 0 || scene_index as usize > NUMBER_OF_SCENES {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    let scene = &mut root.scenes[scene_index as usize - 1];
    if scene.programmed_state == PRESET_PROGRAMMED_READ_ONLY {
        return HandlerResult::Nack(nack::WRITE_PROTECT);
    }
    scene.up_fade_time = up_fade_time;
    scene.down_fade_time = down_fade_time;
    scene.wait_time = wait_time;
    scene.programmed_state = PRESET_PROGRAMMED;
    HandlerResult::Ack(0)
}

pub fn preset_playback_get(root: &DimmerRoot, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u16(root.playback_mode).push_u8(root.playback_level);
    HandlerResult::Ack(w.len())
}

pub fn preset_playback_set(root: &mut DimmerRoot, data: &[u8]) -> HandlerResult {
    if data.len() != 3 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let playback_mode = u16_at(data, 0);
    if playback_mode as usize > NUMBER_OF_SCENES && playback_mode != PRESET_PLAYBACK_ALL {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    root.playback_mode = playback_mode;
    root.playback_level = data[2];
    HandlerResult::Ack(0)
}

pub struct BlockAddressContext<'a> {
    pub subdevices: &'a mut [DimmerSubDevice],
}

pub fn dmx_block_address_get(ctx: &BlockAddressContext, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    let mut total_footprint: u16 = 0;
    let mut expected_start_address: u16 = 0;
    let mut is_contiguous = true;
    for sub in ctx.subdevices.iter() {
        let footprint = (sub.definition().footprint_of)(sub.responder.personality_index);
        total_footprint += footprint;
        if expected_start_address != 0 {
            if expected_start_address != sub.responder.dmx_start_address {
                is_contiguous = false;
            } else {
                expected_start_address += footprint;
            }
        } else {
            expected_start_address = sub.responder.dmx_start_address + footprint;
        }
    }
    let start = if is_contiguous {
        ctx.subdevices[0].responder.dmx_start_address
    } else {
        INVALID_DMX_START_ADDRESS
    };
    w.push_u16(total_footprint).push_u16(start);
    HandlerResult::Ack(w.len())
}

pub fn dmx_block_address_set(ctx: &mut BlockAddressContext, data: &[u8]) -> HandlerResult {
    if data.len() != 2 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let start_address = u16_at(data, 0);
    if start_address == 0 || start_address > MAX_DMX_START_ADDRESS {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    if reset_to_block_address(ctx.subdevices, start_address) {
        HandlerResult::Ack(0)
    } else {
        HandlerResult::Nack(nack::DATA_OUT_OF_RANGE)
    }
}

pub fn dmx_fail_mode_get(root: &DimmerRoot, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u16(root.fail_scene)
        .push_u16(root.fail_loss_of_signal_delay)
        .push_u16(root.fail_hold_time)
        .push_u8(root.fail_level);
    HandlerResult::Ack(w.len())
}

pub fn dmx_fail_mode_set(root: &mut DimmerRoot, data: &[u8]) -> HandlerResult {
    if data.len() != 7 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let scene_index = u16_at(data, 0);
    if scene_index as usize > NUMBER_OF_SCENES && scene_index != PRESET_PLAYBACK_ALL {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    root.fail_scene = scene_index;
    root.fail_loss_of_signal_delay = u16_at(data, 2);
    root.fail_hold_time = u16_at(data, 4);
    root.fail_level = data[6];
    HandlerResult::Ack(0)
}

pub fn dmx_startup_mode_get(root: &DimmerRoot, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u16(root.startup_scene)
        .push_u16(root.startup_delay)
        .push_u16(root.startup_hold)
        .push_u8(root.startup_level);
    HandlerResult::Ack(w.len())
}

pub fn dmx_startup_mode_set(root: &mut DimmerRoot, data: &[u8]) -> HandlerResult {
    if data.len() != 7 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let scene_index = u16_at(data, 0);
    if scene_index as usize > NUMBER_OF_SCENES && scene_index != PRESET_PLAYBACK_ALL {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    root.startup_scene = scene_index;
    root.startup_delay = u16_at(data, 2);
    root.startup_hold = u16_at(data, 4);
    root.startup_level = data[6];
    HandlerResult::Ack(0)
}

pub fn power_on_self_test_get(root: &DimmerRoot, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u8(root.power_on_self_test as u8);
    HandlerResult::Ack(w.len())
}

pub fn power_on_self_test_set(root: &mut DimmerRoot, data: &[u8]) -> HandlerResult {
    if data.len() != 1 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    root.power_on_self_test = match data[0] {
        0 => false,
        1 => true,
        _ => return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE),
    };
    HandlerResult::Ack(0)
}

pub fn lock_pin_get(root: &DimmerRoot, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u16(root.pin_code);
    HandlerResult::Ack(w.len())
}

pub fn lock_pin_set(root: &mut DimmerRoot, data: &[u8]) -> HandlerResult {
    if data.len() != 4 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let new_pin = u16_at(data, 0);
    let old_pin = u16_at(data, 2);
    if new_pin > MAX_PIN_CODE {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    if old_pin != root.pin_code {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    root.pin_code = new_pin;
    HandlerResult::Ack(0)
}

pub fn lock_state_get(root: &DimmerRoot, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u8(root.lock_state).push_u8(NUMBER_OF_LOCK_STATES - 1);
    HandlerResult::Ack(w.len())
}

pub fn lock_state_set(root: &mut DimmerRoot, data: &[u8]) -> HandlerResult {
    if data.len() != 3 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let pin = u16_at(data, 0);
    let lock_state = data[2];
    if pin != root.pin_code || lock_state >= NUMBER_OF_LOCK_STATES {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    root.lock_state = lock_state;
    HandlerResult::Ack(0)
}

pub fn lock_state_description(_root: &DimmerRoot, request_data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    if request_data.is_empty() {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let lock_state = request_data[0];
    if lock_state == 0 || lock_state >= NUMBER_OF_LOCK_STATES {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    w.push_u8(lock_state)
        .push_label(LOCK_STATES[lock_state as usize], 32);
    HandlerResult::Ack(w.len())
}

pub fn preset_info(_root: &DimmerRoot, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u8(1).push_u8(1).push_u8(1).push_u8(1).push_u8(1).push_u8(1)
        .push_u16(NUMBER_OF_SCENES as u16)
        .push_u16(0).push_u16(0xfffe)
        .push_u16(0).push_u16(0xfffe)
        .push_u16(0).push_u16(0xfffe)
        .push_u16(0).push_u16(0xfffe)
        .push_u16(0).push_u16(0xfffe)
        .push_u16(0).push_u16(0xfffe);
    HandlerResult::Ack(w.len())
}

pub fn preset_status_get(root: &DimmerRoot, request_data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    if request_data.len() < 2 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let scene_index = u16_at(request_data, 0);
    if scene_index == 0 || scene_index as usize > NUMBER_OF_SCENES {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    let scene = root.scenes[scene_index as usize - 1];
    w.push_u16(scene_index)
        .push_u16(scene.up_fade_time)
        .push_u16(scene.down_fade_time)
        .push_u16(scene.wait_time)
        .push_u8(scene.programmed_state);
    HandlerResult::Ack(w.len())
}

pub fn preset_status_set(root: &mut DimmerRoot, data: &[u8]) -> HandlerResult {
    if data.len() != 9 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let scene_index = u16_at(data, 0);
    let up_fade_time = u16_at(data, 2);
    let down_fade_time = u16_at(data, 4);
    let wait_time = u16_at(data, 6);
    let clear_preset = data[8];
    if scene_index == 0 || scene_index as usize > NUMBER_OF_SCENES {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    let scene = &mut root.scenes[scene_index as usize - 1];
    if scene.programmed_state == PRESET_PROGRAMMED_READ_ONLY {
        return HandlerResult::Nack(nack::WRITE_PROTECT);
    }
    if clear_preset > 1 {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    if clear_preset == 1 {
        scene.up_fade_time = 0;
        scene.down_fade_time = 0;
        scene.wait_time = 0;
        scene.programmed_state = PRESET_NOT_PROGRAMMED;
    } else {
        scene.up_fade_time = up_fade_time;
        scene.down_fade_time = down_fade_time;
        scene.wait_time = wait_time;
    }
    HandlerResult::Ack(0)
}

pub fn preset_merge_mode_get(root: &DimmerRoot, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u8(root.merge_mode);
    HandlerResult::Ack(w.len())
}

pub fn preset_merge_mode_set(root: &mut DimmerRoot, data: &[u8]) -> HandlerResult {
    if data.len() != 1 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    if data[0] > MERGE_MODE_DMX_ONLY {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    root.merge_mode = data[0];
    HandlerResult::Ack(0)
}

// ---- Sub-device PID handlers ------------------------------------------

pub fn identify_mode_get(sub: &DimmerSubDevice, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u8(sub.identify_mode);
    HandlerResult::Ack(w.len())
}

pub fn identify_mode_set(sub: &mut DimmerSubDevice, data: &[u8]) -> HandlerResult {
    if data.len() != 1 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let mode = data[0];
    if mode != IDENTIFY_MODE_QUIET && mode != IDENTIFY_MODE_LOUD {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    sub.identify_mode = mode;
    HandlerResult::Ack(0)
}

pub fn burn_in_get(sub: &DimmerSubDevice, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u8(sub.burn_in);
    HandlerResult::Ack(w.len())
}

pub fn burn_in_set(sub: &mut DimmerSubDevice, data: &[u8]) -> HandlerResult {
    if data.len() != 1 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    sub.burn_in = data[0];
    HandlerResult::Ack(0)
}

pub fn dimmer_info(_sub: &DimmerSubDevice, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u16(0).push_u16(0xfffe)
        .push_u16(0).push_u16(0xfffe)
        .push_u8(NUMBER_OF_CURVES)
        .push_u8(8)
        .push_u8(1);
    HandlerResult::Ack(w.len())
}

pub fn minimum_level_get(sub: &DimmerSubDevice, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u16(sub.min_level_increasing)
        .push_u16(sub.min_level_decreasing)
        .push_u8(sub.on_below_min);
    HandlerResult::Ack(w.len())
}

pub fn minimum_level_set(sub: &mut DimmerSubDevice, data: &[u8]) -> HandlerResult {
    if data.len() != 5 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let on_below_min = data[4];
    if on_below_min > 1 {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    sub.min_level_increasing = u16_at(data, 0);
    sub.min_level_decreasing = u16_at(data, 2);
    sub.on_below_min = on_below_min;
    HandlerResult::Ack(0)
}

pub fn maximum_level_get(sub: &DimmerSubDevice, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u16(sub.max_level);
    HandlerResult::Ack(w.len())
}

pub fn maximum_level_set(sub: &mut DimmerSubDevice, data: &[u8]) -> HandlerResult {
    if data.len() != 2 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    sub.max_level = u16_at(data, 0);
    HandlerResult::Ack(0)
}

pub fn curve_get(sub: &DimmerSubDevice, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u8(sub.curve).push_u8(NUMBER_OF_CURVES);
    HandlerResult::Ack(w.len())
}

/// Not every sub-device supports every curve: odd curve numbers are
/// rejected on even-indexed sub-devices (`index % 2 == 0`), matching the
/// original firmware bit for bit.
pub fn curve_set(sub: &mut DimmerSubDevice, data: &[u8]) -> HandlerResult {
    if data.len() != 1 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let curve = data[0];
    if curve == 0 || curve > NUMBER_OF_CURVES {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    if curve % 2 == 1 && sub.index % 2 == 0 {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    sub.curve = curve;
    HandlerResult::Ack(0)
}

pub fn curve_description(_sub: &DimmerSubDevice, request_data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    if request_data.is_empty() {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let curve = request_data[0];
    if curve == 0 || curve > NUMBER_OF_CURVES {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    w.push_u8(curve)
        .push_label(CURVE_DESCRIPTIONS[curve as usize - 1], 32);
    HandlerResult::Ack(w.len())
}

pub fn output_response_time_get(sub: &DimmerSubDevice, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u8(sub.output_response_time)
        .push_u8(NUMBER_OF_OUTPUT_RESPONSE_TIMES);
    HandlerResult::Ack(w.len())
}

pub fn output_response_time_set(sub: &mut DimmerSubDevice, data: &[u8]) -> HandlerResult {
    if data.len() != 1 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let setting = data[0];
    if setting == 0 || setting > NUMBER_OF_OUTPUT_RESPONSE_TIMES {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    sub.output_response_time = setting;
    HandlerResult::Ack(0)
}

pub fn output_response_time_description(_sub: &DimmerSubDevice, request_data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    if request_data.is_empty() {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let setting = request_data[0];
    if setting == 0 || setting > NUMBER_OF_OUTPUT_RESPONSE_TIMES {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    w.push_u8(setting)
        .push_label(OUTPUT_RESPONSE_DESCRIPTIONS[setting as usize - 1], 32);
    HandlerResult::Ack(w.len())
}

pub fn modulation_frequency_get(sub: &DimmerSubDevice, _data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    w.push_u8(sub.modulation_frequency)
        .push_u8(NUMBER_OF_MODULATION_FREQUENCIES);
    HandlerResult::Ack(w.len())
}

pub fn modulation_frequency_set(sub: &mut DimmerSubDevice, data: &[u8]) -> HandlerResult {
    if data.len() != 1 {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let setting = data[0];
    if setting == 0 || setting > NUMBER_OF_MODULATION_FREQUENCIES {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    sub.modulation_frequency = setting;
    HandlerResult::Ack(0)
}

pub fn modulation_frequency_description(_sub: &DimmerSubDevice, request_data: &[u8], w: &mut ParamWriter) -> HandlerResult {
    if request_data.is_empty() {
        return HandlerResult::Nack(nack::FORMAT_ERROR);
    }
    let setting = request_data[0];
    if setting == 0 || setting > NUMBER_OF_MODULATION_FREQUENCIES {
        return HandlerResult::Nack(nack::DATA_OUT_OF_RANGE);
    }
    let (frequency, description) = MODULATION_FREQUENCIES[setting as usize - 1];
    w.push_u8(setting).push_u32(frequency).push_label(description, 32);
    HandlerResult::Ack(w.len())
}
