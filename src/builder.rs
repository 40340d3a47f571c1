//! Emits the byte sequence of a configuration bitstream from a
//! [`Bitstream`] record: header, sync word, the ordered register
//! actions around the FDRI frame payload, and the shutdown sequence.
//!
//! Emission is bit-exact against what the parser consumed on the
//! header, register and frame axes. CRC words are written as zero.

use num_traits::ToPrimitive;

use crate::consts::*;
use crate::frame::{far_pos, FrameBits};
use crate::model::FpgaModel;
use crate::reader::{BitError, Bitstream, RegAction, FDRI_BLOCK0_WORDS, FDRI_BRAM_IOB_WORDS};

fn push_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn push_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn type1_hdr(reg: ConfigReg, word_count: u16) -> u16 {
    (1 << 13) | (2 << 11) | (reg.to_u16().unwrap() << 5) | word_count
}

fn push_reg(out: &mut Vec<u8>, action: &RegAction) {
    match action {
        RegAction::Noop => push_u16(out, 1 << 13),
        RegAction::Write { reg, value } => {
            push_u16(out, type1_hdr(*reg, 1));
            push_u16(out, *value);
        }
        RegAction::WriteWide { reg, value } => {
            push_u16(out, type1_hdr(*reg, 2));
            push_u32(out, *value);
        }
        RegAction::WriteFar { maj, min } => {
            push_u16(out, type1_hdr(ConfigReg::FarMaj, 2));
            push_u16(out, *maj);
            push_u16(out, *min);
        }
        RegAction::WriteMfwr => {
            push_u16(out, type1_hdr(ConfigReg::Mfwr, 4));
            push_u32(out, 0);
            push_u32(out, 0);
        }
    }
}

// FDRI payload bytes: the type-0 frames starting at the FAR position
// with all-1 padding frame pairs at the row boundaries, followed (for
// a full-device write) by the BRAM data, the IOB words and one closing
// zero word.
fn fdri_payload(bs: &Bitstream, far: (u16, u16, u16, u16)) -> Result<Vec<u8>, BitError> {
    let (block, row, major, minor) = far;
    let mut payload = Vec::with_capacity(bs.fdri_words as usize * 2);

    let block0_words = if bs.fdri_words > FDRI_BLOCK0_WORDS {
        FDRI_BLOCK0_WORDS
    } else {
        bs.fdri_words
    };
    if block == 0 {
        let start = far_pos(row.into(), major.into(), minor.into()).ok_or(BitError::BadFar(0))?;
        let num_frames = block0_words as usize / (FRAME_SIZE / 2);
        let mut padding = 0;
        let mut i = 0;
        while i < num_frames {
            if major == 0 && minor == 0 && i % (FRAMES_PER_ROW + 2) == FRAMES_PER_ROW {
                payload.extend_from_slice(&[0xFF; 2 * FRAME_SIZE]);
                i += 2;
                padding += 2;
                continue;
            }
            let src = start + (i - padding) * FRAME_SIZE;
            payload.extend_from_slice(&bs.bits.as_bytes()[src..src + FRAME_SIZE]);
            i += 1;
        }
    }
    if bs.fdri_words > block0_words {
        let len = FDRI_BRAM_IOB_WORDS as usize * 2;
        payload.extend_from_slice(&bs.bits.as_bytes()[BRAM_DATA_START..BRAM_DATA_START + len]);
        push_u16(&mut payload, 0);
    }
    debug_assert_eq!(payload.len(), bs.fdri_words as usize * 2);
    Ok(payload)
}

/// Produces the byte sequence of a bitstream record.
pub fn write_bitstream(bs: &Bitstream) -> Result<Vec<u8>, BitError> {
    let mut body = Vec::new();
    for _ in 0..bs.sync_padding {
        body.push(0xFF);
    }
    push_u32(&mut body, SYNC_WORD);

    let mut far = None;
    for action in &bs.regs[..bs.num_regs_before_bits] {
        if let RegAction::WriteFar { maj, min } = action {
            far = Some((
                (maj & 0xF000) >> 12,
                (maj & 0x0F00) >> 8,
                maj & 0x00FF,
                min & 0x03FF,
            ));
        }
        push_reg(&mut body, action);
    }
    if bs.fdri_words > 0 {
        let far = far.ok_or(BitError::FdriWithoutFar(0))?;
        push_u16(&mut body, type1_hdr(ConfigReg::Fdri, 0));
        push_u16(&mut body, (2 << 13) | (2 << 11) | (ConfigReg::Fdri.to_u16().unwrap() << 5));
        push_u32(&mut body, bs.fdri_words);
        body.extend_from_slice(&fdri_payload(bs, far)?);
        // the auto-crc word; not computed
        push_u32(&mut body, 0);
    }
    for action in &bs.regs[bs.num_regs_before_bits..] {
        push_reg(&mut body, action);
    }

    let mut out = Vec::with_capacity(body.len() + 128);
    out.extend_from_slice(&[
        0x00, 0x09, 0x0F, 0xF0, 0x0F, 0xF0, 0x0F, 0xF0, 0x0F, 0xF0, 0x00, 0x00, 0x01,
    ]);
    for (i, s) in bs.header_str.iter().enumerate() {
        out.push(b'a' + i as u8);
        push_u16(&mut out, (s.len() + 1) as u16);
        out.extend_from_slice(s.as_bytes());
        out.push(0);
    }
    out.push(b'e');
    push_u32(&mut out, body.len() as u32);
    out.extend_from_slice(&body);
    Ok(out)
}

/// Builds the canonical full-device bitstream record for a configured
/// model: register setup with the documented default values, a single
/// full FDRI write covering all frames plus the BRAM/IOB tail, and the
/// GRESTORE/DESYNC shutdown sequence.
pub fn bitstream_for_model(
    model: &FpgaModel,
    header_str: [String; 4],
) -> Result<Bitstream, crate::emit::EmitError> {
    let mut bits = FrameBits::new();
    crate::emit::write_model(&mut bits, model)?;

    let mut regs = vec![
        RegAction::Write {
            reg: ConfigReg::Cmd,
            value: Cmd::Rcrc as u16,
        },
        RegAction::Noop,
        RegAction::Write {
            reg: ConfigReg::Flr,
            value: IOB_WORDS as u16,
        },
        RegAction::Write {
            reg: ConfigReg::Cor1,
            value: COR1_DEF,
        },
        RegAction::Write {
            reg: ConfigReg::Cor2,
            value: COR2_DEF,
        },
        RegAction::WriteWide {
            reg: ConfigReg::Idcode,
            value: XC6SLX9,
        },
        RegAction::Write {
            reg: ConfigReg::Mask,
            value: MASK_DEF,
        },
        RegAction::Write {
            reg: ConfigReg::Ctl,
            value: CTL_DEF,
        },
        RegAction::Write {
            reg: ConfigReg::CclkFreq,
            value: CCLK_FREQ_DEF,
        },
        RegAction::Write {
            reg: ConfigReg::PwrdnReg,
            value: PWRDN_REG_DEF,
        },
        RegAction::Write {
            reg: ConfigReg::EyeMask,
            value: EYE_MASK_DEF,
        },
        RegAction::Write {
            reg: ConfigReg::HcOptReg,
            value: HC_OPT_REG_DEF,
        },
        RegAction::Write {
            reg: ConfigReg::Cwdt,
            value: CWDT_DEF,
        },
        RegAction::Write {
            reg: ConfigReg::PuGwe,
            value: PU_GWE_DEF,
        },
        RegAction::Write {
            reg: ConfigReg::PuGts,
            value: PU_GTS_DEF,
        },
        RegAction::Write {
            reg: ConfigReg::ModeReg,
            value: MODE_REG_DEF,
        },
        RegAction::Write {
            reg: ConfigReg::General1,
            value: 0,
        },
        RegAction::Write {
            reg: ConfigReg::General2,
            value: 0,
        },
        RegAction::Write {
            reg: ConfigReg::General3,
            value: 0,
        },
        RegAction::Write {
            reg: ConfigReg::General4,
            value: 0,
        },
        RegAction::Write {
            reg: ConfigReg::General5,
            value: 0,
        },
        RegAction::Write {
            reg: ConfigReg::SeuOpt,
            value: SEU_OPT_DEF,
        },
        RegAction::WriteWide {
            reg: ConfigReg::ExpSign,
            value: 0,
        },
        RegAction::WriteFar { maj: 0, min: 0 },
        RegAction::Write {
            reg: ConfigReg::Cmd,
            value: Cmd::Wcfg as u16,
        },
    ];
    let num_regs_before_bits = regs.len();
    regs.extend([
        RegAction::Write {
            reg: ConfigReg::Cmd,
            value: Cmd::Grestore as u16,
        },
        RegAction::WriteWide {
            reg: ConfigReg::Crc,
            value: 0,
        },
        RegAction::Write {
            reg: ConfigReg::Cmd,
            value: Cmd::Desync as u16,
        },
    ]);

    Ok(Bitstream {
        header_str,
        regs,
        num_regs_before_bits,
        idcode: Some(XC6SLX9),
        flr: Some(IOB_WORDS as u16),
        fdri_words: FDRI_BLOCK0_WORDS + FDRI_BRAM_IOB_WORDS + 1,
        sync_padding: 16,
        bits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reg_packet_shapes() {
        let mut out = Vec::new();
        push_reg(&mut out, &RegAction::Noop);
        assert_eq!(out, [0x20, 0x00]);

        let mut out = Vec::new();
        push_reg(
            &mut out,
            &RegAction::Write {
                reg: ConfigReg::Cmd,
                value: Cmd::Rcrc as u16,
            },
        );
        // type 1, write, register 5, one word
        assert_eq!(out, [0x30, 0xA1, 0x00, 0x07]);

        let mut out = Vec::new();
        push_reg(
            &mut out,
            &RegAction::WriteWide {
                reg: ConfigReg::Idcode,
                value: XC6SLX9,
            },
        );
        assert_eq!(out, [0x31, 0xC2, 0x04, 0x00, 0x10, 0x93]);
    }
}
