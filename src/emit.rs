//! Encodes a configured model into a fresh frame buffer; the inverse
//! of the extractor.

use thiserror::Error;

use crate::consts::*;
use crate::extract::{bitpos_clear_bits, routing_bit_start, DEFAULT_BITS};
use crate::frame::{far_pos, frame_set_u64, write_lut64, FrameBits};
use crate::lut::{parse_boolexpr, LutError, BASE_M_AC, BASE_M_BD, BASE_X_AB, BASE_X_CD};
use crate::model::{
    catalogue_endpoints, DevKind, DeviceConfig, FpgaModel, LutPos, ModelError,
};
use crate::parts;

const XDEV_MASK: u64 = 0x0000_00B0_0060_0086;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Lut(#[from] LutError),
    #[error("IOB at y{y} x{x} index {idx} has no pad site name")]
    NoSitename { y: usize, x: usize, idx: usize },
    #[error("unsupported IOB config at y{y} x{x} index {idx}")]
    UnsupportedIob { y: usize, x: usize, idx: usize },
    #[error("tile column {0} carries no frames")]
    NoMajor(usize),
}

/// Writes the configuration of `model` into `bits`.
pub fn write_model(bits: &mut FrameBits, model: &FpgaModel) -> Result<(), EmitError> {
    for (row, major, minor, bit) in DEFAULT_BITS {
        bits.set_bit(row, major, minor, bit);
    }
    emit_iobs(bits, model)?;
    emit_logic(bits, model)?;
    emit_switches(bits, model)?;
    Ok(())
}

fn emit_iobs(bits: &mut FrameBits, model: &FpgaModel) -> Result<(), EmitError> {
    for (y, x, tile) in model.iter_tiles() {
        let mut iob_idx = 0;
        for dev in &tile.devices {
            if dev.kind != DevKind::Iob {
                continue;
            }
            let idx = iob_idx;
            iob_idx += 1;
            if !dev.instantiated {
                continue;
            }
            let DeviceConfig::Iob(cfg) = &dev.config else {
                continue;
            };
            let sitename = model
                .iob_sitename(y, x, idx)
                .ok_or(EmitError::NoSitename { y, x, idx })?;
            let entry = parts::IOB_WORD_INDEX
                .get(sitename)
                .copied()
                .ok_or(EmitError::NoSitename { y, x, idx })?;
            if cfg.o_used && cfg.ostandard.as_deref() == Some(crate::extract::IO_LVCMOS33) {
                bits.set_iob_words(usize::from(entry), 0x0000_0100, 0x0600_1100);
            } else if cfg.istandard.as_deref() == Some(crate::extract::IO_LVCMOS33) {
                bits.set_iob_words(usize::from(entry), 0x0000_0107, 0x0B00_2400);
            } else {
                return Err(EmitError::UnsupportedIob { y, x, idx });
            }
        }
    }
    Ok(())
}

fn emit_logic(bits: &mut FrameBits, model: &FpgaModel) -> Result<(), EmitError> {
    for (y, x, tile) in model.iter_tiles() {
        if tile.devices.is_empty() {
            continue;
        }
        let (row, row_pos) = model.is_in_row(y);
        if row < 0 || row_pos < 0 || row_pos == HCLK_POS {
            continue;
        }
        let row = row as usize;
        let byte_off = crate::extract::logic_byte_off(row_pos);

        // only the M slices and the X slices beside them have a
        // decoded frame layout
        let tile_has_m = tile.devices.iter().any(|d| {
            d.kind == DevKind::Logic
                && d.subtype() == Some(crate::model::LogicSubtype::M as u8)
        });
        if !tile_has_m {
            continue;
        }
        for dev in &tile.devices {
            if dev.kind != DevKind::Logic || !dev.instantiated {
                continue;
            }
            let DeviceConfig::Logic(cfg) = &dev.config else {
                continue;
            };
            let major = model.x_major(x).ok_or(EmitError::NoMajor(x))?;
            let base = far_pos(row, major, 0).ok_or(EmitError::NoMajor(x))?;

            use crate::model::LogicSubtype;
            match cfg.subtype {
                LogicSubtype::L => {}
                LogicSubtype::M => {
                    let positions = [
                        (LutPos::A, 24usize, byte_off + 4, BASE_M_AC),
                        (LutPos::B, 21, byte_off + 4, BASE_M_BD),
                        (LutPos::C, 24, byte_off, BASE_M_AC),
                        (LutPos::D, 21, byte_off, BASE_M_BD),
                    ];
                    for (pos, minor, off, logic_base) in positions {
                        if let Some(expr) = cfg.lut(pos, 6) {
                            let lut = parse_boolexpr(expr, &logic_base, true)?;
                            let f0 = base + minor * FRAME_SIZE;
                            write_lut64(&mut bits.as_bytes_mut()[f0..], off * 8, lut);
                        }
                    }
                }
                LogicSubtype::X => {
                    let positions = [
                        (LutPos::A, 27usize, byte_off + 4, BASE_X_AB),
                        (LutPos::B, 29, byte_off + 4, BASE_X_AB),
                        (LutPos::C, 27, byte_off, BASE_X_CD),
                        (LutPos::D, 29, byte_off, BASE_X_CD),
                    ];
                    let mut any = false;
                    for (pos, minor, off, logic_base) in positions {
                        if let Some(expr) = cfg.lut(pos, 6) {
                            let lut = parse_boolexpr(expr, &logic_base, false)?;
                            let f0 = base + minor * FRAME_SIZE;
                            write_lut64(&mut bits.as_bytes_mut()[f0..], off * 8, lut);
                            any = true;
                        }
                    }
                    if any {
                        let mask_off = base + 26 * FRAME_SIZE + byte_off;
                        frame_set_u64(&mut bits.as_bytes_mut()[mask_off..], XDEV_MASK);
                    }
                }
            }
        }
    }
    Ok(())
}

fn emit_switches(bits: &mut FrameBits, model: &FpgaModel) -> Result<(), EmitError> {
    for x in 0..model.x_width {
        if !model.is_atx(XCheck::RoutingCol, x) {
            continue;
        }
        for y in TOP_IO_TILES..model.y_height - BOT_IO_TILES {
            if model.is_aty(YCheck::RowHorizAxsymm | YCheck::ChipHorizRegs, y) {
                continue;
            }
            let (row, row_pos) = model.is_in_row(y);
            if row < 0 || row_pos < 0 || row_pos == HCLK_POS {
                continue;
            }
            let row = row as usize;
            let major = model.x_major(x).ok_or(EmitError::NoMajor(x))?;
            let kind = model.tile(y, x).kind;
            for swpos in model.bitpos_catalogue() {
                let (from, to, _) = catalogue_endpoints(kind, &swpos.from, &swpos.to, swpos.bidir);
                let sw_idx = match (model.wire_idx(&from), model.wire_idx(&to)) {
                    (Some(f), Some(t)) => model.switch_lookup(y, x, f, t),
                    _ => None,
                };
                let Some(sw_idx) = sw_idx else { continue };
                if !model.switch_is_enabled(y, x, sw_idx) {
                    continue;
                }
                // write the selector pair and the enable bit
                bitpos_clear_bits(bits, row, major, row_pos, swpos);
                let start = routing_bit_start(row_pos);
                if swpos.minor == 20 {
                    if swpos.two_bits_val & 2 != 0 {
                        bits.set_bit(row, major, 20, start + swpos.two_bits_o);
                    }
                    if swpos.two_bits_val & 1 != 0 {
                        bits.set_bit(row, major, 20, start + swpos.two_bits_o + 1);
                    }
                    bits.set_bit(row, major, 20, start + swpos.one_bit_o);
                } else {
                    if swpos.two_bits_val & 2 != 0 {
                        bits.set_bit(row, major, swpos.minor, start + swpos.two_bits_o / 2);
                    }
                    if swpos.two_bits_val & 1 != 0 {
                        bits.set_bit(row, major, swpos.minor + 1, start + swpos.two_bits_o / 2);
                    }
                    bits.set_bit(
                        row,
                        major,
                        swpos.minor + (swpos.one_bit_o & 1),
                        start + swpos.one_bit_o / 2,
                    );
                }
            }
        }
    }
    Ok(())
}
