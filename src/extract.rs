//! Decodes a populated frame buffer back into the device model.
//!
//! Extraction is destructive: every decoded bit is cleared from the
//! buffer, so whatever remains afterwards is configuration the decoder
//! does not understand and can be reported as unknown.

use thiserror::Error;

use crate::consts::*;
use crate::frame::{frame_get_u32, frame_get_u64, read_lut64, FrameBits};
use crate::lut::{lut2bool, BASE_M_AC, BASE_M_BD, BASE_X_AB, BASE_X_CD};
use crate::model::{
    catalogue_endpoints, DevKind, FpgaModel, LutPos, ModelError, Net, SwIdx, DEV_LOGM, DEV_LOGX,
};
use crate::parts::{self, RoutingBitPos};

/// The bit positions every bitstream for the die carries; their
/// meaning is not decoded.
pub(crate) const DEFAULT_BITS: [(usize, usize, usize, usize); 5] = [
    (0, 0, 3, 66),
    (0, 1, 23, 1034),
    (0, 1, 23, 1035),
    (0, 1, 23, 1039),
    (2, 0, 3, 66),
];

/// Known IOB config word patterns.
const IOB_OUT_W0: u32 = 0x0000_0100;
const IOB_OUT_W0_MASK: u32 = 0xFFFF_FF7F; // bit 7 toggles with the output net
const IOB_OUT_W1: u32 = 0x0600_1100;
const IOB_IN_W0: u32 = 0x0000_0107;
const IOB_IN_W1: u32 = 0x0B00_2400;

/// Required and permitted bits of the X-slice presence mask in minor
/// 26.
const XDEV_MASK: u64 = 0x0000_00B0_0060_0086;

pub const IO_LVCMOS33: &str = "LVCMOS33";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("default bit r{0} ma{1} mi{2} bit {3} is not set")]
    MissingDefaultBit(usize, usize, usize, usize),
    #[error("unsupported IOB config {w0:#010x} {w1:#010x} at entry {entry}")]
    UnknownIobPattern { entry: usize, w0: u32, w1: u32 },
    #[error("IOB entry {0} has no device in the model")]
    NoIobDevice(usize),
    #[error("unsupported X-slice mask {mask:#018x} at y{y} x{x}")]
    UnknownLogicMask { y: usize, x: usize, mask: u64 },
    #[error("no logic device at y{y} x{x}")]
    NoLogicDevice { y: usize, x: usize },
    #[error("catalogue switch {from}->{to} not found at y{y} x{x}")]
    NoCatalogueSwitch {
        y: usize,
        x: usize,
        from: String,
        to: String,
    },
    #[error("more than {MAX_YX_SWITCHES} active routing switches")]
    TooManySwitches,
    #[error("tile column {0} carries no frames")]
    NoMajor(usize),
}

struct ExtractState<'b> {
    bits: &'b mut FrameBits,
    yx_pos: Vec<(usize, usize, SwIdx)>,
}

/// Decodes `bits` into device and switch state of `model`.
pub fn extract_model(model: &mut FpgaModel, bits: &mut FrameBits) -> Result<(), ExtractError> {
    for (row, major, minor, bit) in DEFAULT_BITS {
        if !bits.get_bit(row, major, minor, bit) {
            return Err(ExtractError::MissingDefaultBit(row, major, minor, bit));
        }
        bits.clear_bit(row, major, minor, bit);
    }

    extract_iobs(model, bits)?;
    extract_logic(model, bits)?;

    let mut es = ExtractState {
        bits,
        yx_pos: Vec::new(),
    };
    extract_switches(model, &mut es)?;

    // turn the extracted switches into nets
    for (y, x, idx) in es.yx_pos {
        model.switch_enable(y, x, idx);
        model.nets_mut().push(Net {
            switches: vec![(y, x, idx)],
        });
    }
    Ok(())
}

fn extract_iobs(model: &mut FpgaModel, bits: &mut FrameBits) -> Result<(), ExtractError> {
    for entry in 0..parts::num_iobs() {
        let (w0, w1) = bits.iob_words(entry);
        if w0 == 0 && w1 == 0 {
            continue;
        }
        let Some(sitename) = parts::iob_sitename_at(entry) else {
            eprintln!("#W Config for unnamed IOB entry {entry}.");
            continue;
        };
        let (y, x, idx) = model
            .find_iob(sitename)
            .ok_or(ExtractError::NoIobDevice(entry))?;
        let dev = model
            .device_mut(y, x, DevKind::Iob, idx)
            .ok_or(ExtractError::NoIobDevice(entry))?;

        // only two hardcoded IOB types are decoded so far
        if (w0 & IOB_OUT_W0_MASK) == IOB_OUT_W0 && w1 == IOB_OUT_W1 {
            dev.instantiated = true;
            let iob = dev.iob_mut().ok_or(ExtractError::NoIobDevice(entry))?;
            iob.ostandard = Some(IO_LVCMOS33.to_string());
            iob.drive_strength = 12;
            iob.o_used = true;
            iob.slew = Some(crate::model::Slew::Slow);
            iob.suspend = Some(crate::model::Suspend::ThreeState);
            bits.set_iob_words(entry, 0, 0);
        } else if w0 == IOB_IN_W0 && w1 == IOB_IN_W1 {
            dev.instantiated = true;
            let iob = dev.iob_mut().ok_or(ExtractError::NoIobDevice(entry))?;
            iob.istandard = Some(IO_LVCMOS33.to_string());
            iob.bypass_mux = Some(crate::model::BypassMux::I);
            iob.i_mux = Some(crate::model::IMux::I);
            bits.set_iob_words(entry, 0, 0);
        } else {
            return Err(ExtractError::UnknownIobPattern { entry, w0, w1 });
        }
    }
    Ok(())
}

// Byte offset of a logic site's config inside its row frames: eight
// bytes per site, skipping the two hclk bytes in the middle.
pub(crate) fn logic_byte_off(row_pos: i32) -> usize {
    let mut pos = row_pos as usize;
    if pos > 8 {
        pos -= 1;
    }
    let mut byte_off = pos * 8;
    if pos >= 8 {
        byte_off += 2;
    }
    byte_off
}

fn extract_logic(model: &mut FpgaModel, bits: &mut FrameBits) -> Result<(), ExtractError> {
    for x in LEFT_SIDE_WIDTH..model.x_width - RIGHT_SIDE_WIDTH {
        if !model.is_atx(XCheck::FabricLogicCol | XCheck::CenterLogicCol, x) {
            continue;
        }
        for y in TOP_IO_TILES..model.y_height - BOT_IO_TILES {
            if !model.has_device_type(y, x, DevKind::Logic, crate::model::LogicSubtype::M as u8) {
                continue;
            }
            let (row, row_pos) = model.is_in_row(y);
            if row < 0 || row_pos < 0 || row_pos == HCLK_POS {
                eprintln!("#W Logic device outside a row at y{y} x{x}.");
                continue;
            }
            let row = row as usize;
            let major = model.x_major(x).ok_or(ExtractError::NoMajor(x))?;
            let byte_off = logic_byte_off(row_pos);
            let base = crate::frame::far_pos(row, major, 0).ok_or(ExtractError::NoMajor(x))?;

            // M device LUTs: A and C in minors 24/25, B and D in 21/22
            let m_luts = [
                (LutPos::A, 24usize, byte_off + 4, BASE_M_AC),
                (LutPos::B, 21, byte_off + 4, BASE_M_BD),
                (LutPos::C, 24, byte_off, BASE_M_AC),
                (LutPos::D, 21, byte_off, BASE_M_BD),
            ];
            for (pos, minor, off, logic_base) in m_luts {
                let f0 = base + minor * FRAME_SIZE;
                let f1 = base + (minor + 1) * FRAME_SIZE;
                let d = bits.as_bytes();
                if frame_get_u32(&d[f0 + off..]) == 0 && frame_get_u32(&d[f1 + off..]) == 0 {
                    continue;
                }
                let lut = read_lut64(&d[f0..], off * 8);
                let lut_str = lut2bool(lut, 64, &logic_base, true);
                if !lut_str.is_empty() {
                    let dev = model
                        .device_mut(y, x, DevKind::Logic, DEV_LOGM)
                        .ok_or(ExtractError::NoLogicDevice { y, x })?;
                    dev.instantiated = true;
                    dev.logic_mut()
                        .ok_or(ExtractError::NoLogicDevice { y, x })?
                        .set_lut(pos, 6, &lut_str);
                    let d = bits.as_bytes_mut();
                    d[f0 + off..f0 + off + 4].fill(0);
                    d[f1 + off..f1 + off + 4].fill(0);
                }
            }

            // X device: presence mask in minor 26
            let mask_off = base + 26 * FRAME_SIZE + byte_off;
            let mask = frame_get_u64(&bits.as_bytes()[mask_off..]);
            if mask != 0 {
                if mask != XDEV_MASK {
                    return Err(ExtractError::UnknownLogicMask { y, x, mask });
                }
                bits.as_bytes_mut()[mask_off..mask_off + 8].fill(0);

                let x_luts = [
                    (LutPos::A, 27usize, byte_off + 4, BASE_X_AB),
                    (LutPos::B, 29, byte_off + 4, BASE_X_AB),
                    (LutPos::C, 27, byte_off, BASE_X_CD),
                    (LutPos::D, 29, byte_off, BASE_X_CD),
                ];
                for (pos, minor, off, logic_base) in x_luts {
                    let f0 = base + minor * FRAME_SIZE;
                    let f1 = base + (minor + 1) * FRAME_SIZE;
                    let lut = read_lut64(&bits.as_bytes()[f0..], off * 8);
                    let lut_str = lut2bool(lut, 64, &logic_base, false);
                    if !lut_str.is_empty() {
                        let dev = model
                            .device_mut(y, x, DevKind::Logic, DEV_LOGX)
                            .ok_or(ExtractError::NoLogicDevice { y, x })?;
                        dev.instantiated = true;
                        dev.logic_mut()
                            .ok_or(ExtractError::NoLogicDevice { y, x })?
                            .set_lut(pos, 6, &lut_str);
                        let d = bits.as_bytes_mut();
                        d[f0 + off..f0 + off + 4].fill(0);
                        d[f1 + off..f1 + off + 4].fill(0);
                    }
                }
            }
        }
    }
    Ok(())
}

// Start of a routing tile's 64-bit band within its frames.
pub(crate) fn routing_bit_start(row_pos: i32) -> usize {
    if row_pos > HCLK_POS {
        (row_pos as usize - 1) * 64 + 16
    } else {
        row_pos as usize * 64
    }
}

fn bitpos_is_set(
    bits: &FrameBits,
    row: usize,
    major: usize,
    row_pos: i32,
    swpos: &RoutingBitPos,
) -> bool {
    let start = routing_bit_start(row_pos);
    let two_bits_val = if swpos.minor == 20 {
        (u8::from(bits.get_bit(row, major, 20, start + swpos.two_bits_o)) << 1)
            | u8::from(bits.get_bit(row, major, 20, start + swpos.two_bits_o + 1))
    } else {
        (u8::from(bits.get_bit(row, major, swpos.minor, start + swpos.two_bits_o / 2)) << 1)
            | u8::from(bits.get_bit(row, major, swpos.minor + 1, start + swpos.two_bits_o / 2))
    };
    if two_bits_val != swpos.two_bits_val {
        return false;
    }
    if swpos.minor == 20 {
        bits.get_bit(row, major, 20, start + swpos.one_bit_o)
    } else {
        bits.get_bit(
            row,
            major,
            swpos.minor + (swpos.one_bit_o & 1),
            start + swpos.one_bit_o / 2,
        )
    }
}

pub(crate) fn bitpos_clear_bits(
    bits: &mut FrameBits,
    row: usize,
    major: usize,
    row_pos: i32,
    swpos: &RoutingBitPos,
) {
    let start = routing_bit_start(row_pos);
    if swpos.minor == 20 {
        bits.clear_bit(row, major, 20, start + swpos.two_bits_o);
        bits.clear_bit(row, major, 20, start + swpos.two_bits_o + 1);
        bits.clear_bit(row, major, 20, start + swpos.one_bit_o);
    } else {
        bits.clear_bit(row, major, swpos.minor, start + swpos.two_bits_o / 2);
        bits.clear_bit(row, major, swpos.minor + 1, start + swpos.two_bits_o / 2);
        bits.clear_bit(
            row,
            major,
            swpos.minor + (swpos.one_bit_o & 1),
            start + swpos.one_bit_o / 2,
        );
    }
}

fn extract_routing_switches(
    model: &FpgaModel,
    es: &mut ExtractState,
    y: usize,
    x: usize,
) -> Result<(), ExtractError> {
    let (row, row_pos) = model.is_in_row(y);
    if row < 0 || row_pos < 0 || row_pos == HCLK_POS {
        return Ok(());
    }
    let row = row as usize;
    let major = model.x_major(x).ok_or(ExtractError::NoMajor(x))?;
    let kind = model.tile(y, x).kind;

    for i in 0..model.bitpos_catalogue().len() {
        let swpos = &model.bitpos_catalogue()[i];
        if !bitpos_is_set(es.bits, row, major, row_pos, swpos) {
            continue;
        }
        let (from, to, _) = catalogue_endpoints(kind, &swpos.from, &swpos.to, swpos.bidir);
        let from_i = model.wire_idx(&from);
        let to_i = model.wire_idx(&to);
        let sw_idx = match (from_i, to_i) {
            (Some(f), Some(t)) => model.switch_lookup(y, x, f, t),
            _ => None,
        }
        .ok_or_else(|| ExtractError::NoCatalogueSwitch {
            y,
            x,
            from: from.clone(),
            to: to.clone(),
        })?;
        if model.switch_is_enabled(y, x, sw_idx) {
            eprintln!("#W Switch {from}->{to} at y{y} x{x} set twice.");
        }
        if es.yx_pos.len() >= MAX_YX_SWITCHES {
            return Err(ExtractError::TooManySwitches);
        }
        es.yx_pos.push((y, x, sw_idx));
        bitpos_clear_bits(es.bits, row, major, row_pos, swpos);
    }
    Ok(())
}

fn extract_switches(model: &FpgaModel, es: &mut ExtractState) -> Result<(), ExtractError> {
    for x in 0..model.x_width {
        if !model.is_atx(XCheck::RoutingCol, x) {
            continue;
        }
        for y in TOP_IO_TILES..model.y_height - BOT_IO_TILES {
            if model.is_aty(YCheck::RowHorizAxsymm | YCheck::ChipHorizRegs, y) {
                continue;
            }
            extract_routing_switches(model, es, y, x)?;
        }
    }
    Ok(())
}
