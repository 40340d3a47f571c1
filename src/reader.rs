//! Parses the vendor's framed, packet-oriented configuration stream
//! into a [`Bitstream`]: the four header strings, the ordered register
//! action log, and the frame buffer.
//!
//! All multi-byte fields in the packet stream are big-endian. The
//! register action log preserves NOOPs and their order so the writer
//! can reproduce the input stream.

use num_traits::FromPrimitive;
use thiserror::Error;

use crate::consts::*;
use crate::frame::{far_pos, FrameBits};
use crate::parts;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitError {
    #[error("unexpected end of file at offset {0}")]
    UnexpectedEof(usize),
    #[error("bad magic byte at offset {0}")]
    BadMagic(usize),
    #[error("expected header string key {expected:?} at offset {offset}")]
    BadHeaderKey { offset: usize, expected: char },
    #[error("header string at offset {0} is not zero-terminated")]
    BadHeaderString(usize),
    #[error("unexpected sync word {word:#010x} at offset {offset}")]
    BadSync { offset: usize, word: u32 },
    #[error("bad packet header {header:#06x} at offset {offset}")]
    BadPacket { offset: usize, header: u16 },
    #[error("unknown register {reg} at offset {offset}")]
    UnknownRegister { offset: usize, reg: u16 },
    #[error("word count {count} out of range at offset {offset}")]
    BadWordCount { offset: usize, count: u32 },
    #[error("frame data at offset {0} without preceding frame address")]
    FdriWithoutFar(usize),
    #[error("unsupported idcode {0:#010x}")]
    UnsupportedIdcode(u32),
    #[error("frame length register is {0}, must be 896 for this die")]
    BadFlr(u32),
    #[error("bad frame address block {block} at offset {offset}")]
    BadBlock { offset: usize, block: u16 },
    #[error("frame address outside the die at offset {0}")]
    BadFar(usize),
    #[error("frame data crosses a non-padding boundary at offset {0}")]
    BadPadding(usize),
}

/// One recorded configuration register action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegAction {
    Noop,
    /// A one-word type-1 write.
    Write { reg: ConfigReg, value: u16 },
    /// A two-word type-1 write (CRC, EXP_SIGN, IDCODE).
    WriteWide { reg: ConfigReg, value: u32 },
    /// A FAR_MAJ write carrying the major and minor address words.
    WriteFar { maj: u16, min: u16 },
    /// An MFWR write (its two dwords are always zero).
    WriteMfwr,
}

/// A parsed bitstream: header fields, register log and frame buffer.
pub struct Bitstream {
    /// The four length-prefixed header strings keyed 'a'..'d'
    /// (typically design name, part name, date, time).
    pub header_str: [String; 4],
    pub regs: Vec<RegAction>,
    /// Index into `regs` where the FDRI phase begins.
    pub num_regs_before_bits: usize,
    pub idcode: Option<u32>,
    pub flr: Option<u16>,
    /// Word count of the FDRI payload, needed to reproduce the stream.
    pub fdri_words: u32,
    /// 0xFF padding bytes between the 'e' length field and the sync
    /// word.
    pub sync_padding: usize,
    pub bits: FrameBits,
}

const HEADER_MAGIC: [u8; 13] = [
    0x00, 0x09, 0x0F, 0xF0, 0x0F, 0xF0, 0x0F, 0xF0, 0x0F, 0xF0, 0x00, 0x00, 0x01,
];

/// Number of FDRI words covering all type-0 frames including the
/// padding frames.
pub(crate) const FDRI_BLOCK0_WORDS: u32 =
    (NUM_ROWS * (FRAMES_PER_ROW + PADDING_FRAMES_PER_ROW) * FRAME_SIZE / 2) as u32;
/// BRAM data plus IOB tail words.
pub(crate) const FDRI_BRAM_IOB_WORDS: u32 = (4 * 144 * FRAME_SIZE / 2 + IOB_WORDS) as u32;

struct Cursor<'a> {
    d: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], BitError> {
        if self.pos + n > self.d.len() {
            return Err(BitError::UnexpectedEof(self.d.len()));
        }
        let s = &self.d[self.pos..self.pos + n];
        self.pos += n;
        Ok(s)
    }

    fn u8(&mut self) -> Result<u8, BitError> {
        Ok(self.take(1)?[0])
    }

    fn u16_be(&mut self) -> Result<u16, BitError> {
        Ok(u16::from_be_bytes(self.take(2)?.try_into().unwrap()))
    }

    fn u32_be(&mut self) -> Result<u32, BitError> {
        Ok(u32::from_be_bytes(self.take(4)?.try_into().unwrap()))
    }

    fn peek_u16_be(&self, at: usize) -> Result<u16, BitError> {
        if at + 2 > self.d.len() {
            return Err(BitError::UnexpectedEof(self.d.len()));
        }
        Ok(u16::from_be_bytes(self.d[at..at + 2].try_into().unwrap()))
    }
}

/// Parses a complete bitstream file.
pub fn read_bitstream(d: &[u8]) -> Result<Bitstream, BitError> {
    let mut cur = Cursor { d, pos: 0 };

    // 13-byte magic
    let magic = cur.take(HEADER_MAGIC.len())?;
    if magic != HEADER_MAGIC {
        let bad = magic
            .iter()
            .zip(HEADER_MAGIC.iter())
            .position(|(a, b)| a != b)
            .unwrap();
        return Err(BitError::BadMagic(bad));
    }

    // four strings 'a'..'d', 16-bit length, z-terminated
    let mut header_str: [String; 4] = Default::default();
    for (i, slot) in header_str.iter_mut().enumerate() {
        let expected = (b'a' + i as u8) as char;
        let key_off = cur.pos;
        if cur.u8()? != expected as u8 {
            return Err(BitError::BadHeaderKey {
                offset: key_off,
                expected,
            });
        }
        let str_len = usize::from(cur.u16_be()?);
        let str_off = cur.pos;
        let bytes = cur.take(str_len)?;
        if str_len == 0 || bytes[str_len - 1] != 0 {
            return Err(BitError::BadHeaderString(str_off));
        }
        *slot = String::from_utf8_lossy(&bytes[..str_len - 1]).into_owned();
    }

    // 'e' plus the length of the remaining payload
    let key_off = cur.pos;
    if cur.u8()? != b'e' {
        return Err(BitError::BadHeaderKey {
            offset: key_off,
            expected: 'e',
        });
    }
    let cmd_len = cur.u32_be()? as usize;
    if cur.pos + cmd_len > d.len() {
        return Err(BitError::UnexpectedEof(d.len()));
    }
    if cur.pos + cmd_len < d.len() {
        eprintln!(
            "#W Unexpected continuation after offset {}.",
            cur.pos + cmd_len
        );
    }

    // 0xFF padding up to the sync word
    let mut sync_padding = 0;
    while cur.pos < d.len() && d[cur.pos] != 0xAA {
        if d[cur.pos] != 0xFF {
            eprintln!("#W Expected 0xFF, got 0x{:02X} at offset {}.", d[cur.pos], cur.pos);
        }
        sync_padding += 1;
        cur.pos += 1;
    }
    let sync_off = cur.pos;
    let sync = cur.u32_be()?;
    if sync != SYNC_WORD {
        return Err(BitError::BadSync {
            offset: sync_off,
            word: sync,
        });
    }

    let mut bs = Bitstream {
        header_str,
        regs: Vec::new(),
        num_regs_before_bits: 0,
        idcode: None,
        flr: None,
        fdri_words: 0,
        sync_padding,
        bits: FrameBits::new(),
    };

    let mut first_far_off = None;
    while cur.pos < d.len() {
        let hdr_off = cur.pos;
        let hdr = cur.u16_be()?;

        // 3 bits: 001 = type 1; 010 = type 2
        let packet_type = (hdr & 0xE000) >> 13;
        if packet_type != 1 && packet_type != 2 {
            return Err(BitError::BadPacket {
                offset: hdr_off,
                header: hdr,
            });
        }
        // 2 bits: 00 = noop; 01 = read; 10 = write; 11 = reserved
        let opcode = (hdr & 0x1800) >> 11;
        if opcode == 3 {
            return Err(BitError::BadPacket {
                offset: hdr_off,
                header: hdr,
            });
        }
        if opcode == 0 {
            if packet_type != 1 || hdr & 0x07FF != 0 {
                return Err(BitError::BadPacket {
                    offset: hdr_off,
                    header: hdr,
                });
            }
            bs.regs.push(RegAction::Noop);
            continue;
        }

        let reg_num = (hdr & 0x07E0) >> 5;
        let word_count = usize::from(hdr & 0x001F);

        if packet_type == 2 {
            if word_count != 0 {
                eprintln!("#W 0x{hdr_off:x}=0x{hdr:x} Unexpected type 2 wordcount.");
            }
            if ConfigReg::from_u16(reg_num) != Some(ConfigReg::Fdri) {
                return Err(BitError::BadPacket {
                    offset: hdr_off,
                    header: hdr,
                });
            }
            let count_off = cur.pos;
            let count = cur.u32_be()?;
            if cur.pos + 2 * count as usize > d.len() || 2 * count < FRAME_SIZE as u32 {
                return Err(BitError::BadWordCount {
                    offset: count_off,
                    count,
                });
            }
            let Some(far_off) = first_far_off else {
                return Err(BitError::FdriWithoutFar(hdr_off));
            };
            bs.num_regs_before_bits = bs.regs.len();
            bs.fdri_words = count;
            let end = read_frames(&mut bs, d, far_off)?;
            cur.pos = end;
            continue;
        }

        let reg =
            ConfigReg::from_u16(reg_num).ok_or(BitError::UnknownRegister {
                offset: hdr_off,
                reg: reg_num,
            })?;
        if reg == ConfigReg::Fdri && word_count == 0 {
            // announces the following type-2 frame data packet
            continue;
        }
        let expect_wc = |wc: usize| -> Result<(), BitError> {
            if word_count != wc {
                return Err(BitError::BadWordCount {
                    offset: hdr_off,
                    count: word_count as u32,
                });
            }
            Ok(())
        };
        match reg {
            ConfigReg::Idcode => {
                expect_wc(2)?;
                let v = cur.u32_be()?;
                if !parts::supported_idcode(v) {
                    return Err(BitError::UnsupportedIdcode(v));
                }
                bs.idcode = Some(v);
                bs.regs.push(RegAction::WriteWide {
                    reg: ConfigReg::Idcode,
                    value: v,
                });
            }
            ConfigReg::Flr => {
                expect_wc(1)?;
                let v = cur.u16_be()?;
                if usize::from(v) != IOB_WORDS {
                    return Err(BitError::BadFlr(u32::from(v)));
                }
                bs.flr = Some(v);
                bs.regs.push(RegAction::Write {
                    reg: ConfigReg::Flr,
                    value: v,
                });
            }
            ConfigReg::FarMaj => {
                expect_wc(2)?;
                if first_far_off.is_none() {
                    first_far_off = Some(hdr_off);
                }
                let maj = cur.u16_be()?;
                let min = cur.u16_be()?;
                bs.regs.push(RegAction::WriteFar { maj, min });
            }
            ConfigReg::Mfwr => {
                expect_wc(4)?;
                let d0 = cur.u32_be()?;
                let d1 = cur.u32_be()?;
                if d0 != 0 || d1 != 0 {
                    return Err(BitError::BadPacket {
                        offset: hdr_off,
                        header: hdr,
                    });
                }
                bs.regs.push(RegAction::WriteMfwr);
            }
            ConfigReg::Crc | ConfigReg::ExpSign => {
                expect_wc(2)?;
                let v = cur.u32_be()?;
                bs.regs.push(RegAction::WriteWide { reg, value: v });
            }
            ConfigReg::Cmd => {
                expect_wc(1)?;
                let v = cur.u16_be()?;
                if Cmd::from_u16(v).is_none() {
                    eprintln!("#W Unknown CMD 0x{v:X}.");
                }
                bs.regs.push(RegAction::Write { reg, value: v });
            }
            _ => {
                expect_wc(1)?;
                let v = cur.u16_be()?;
                warn_reserved(reg, v);
                bs.regs.push(RegAction::Write { reg, value: v });
            }
        }
    }
    Ok(bs)
}

// Reserved-bit expectations per ug380; deviations are reported but
// never fatal.
fn warn_reserved(reg: ConfigReg, v: u16) {
    let (mask, expect) = match reg {
        // reserved bits 14:5 are 0110111000
        ConfigReg::Cor1 => (0x7FE0, 0x3700),
        // reserved bits 14:12 are 000
        ConfigReg::Cor2 => (0x7000, 0x0000),
        // bit 0 is reserved as 1, and bit 7 has been seen on as well
        ConfigReg::Ctl | ConfigReg::Mask => (0xFF81, 0x0081),
        // reserved bits 13:6 are 00100010
        ConfigReg::PwrdnReg => (0xBFCA, 0x0880),
        // reserved bits 5:0 are 011111
        ConfigReg::HcOptReg => (0xFFBF, 0x001F),
        ConfigReg::ModeReg => (0xC4FF, 0x0000),
        ConfigReg::CclkFreq => (0xBC00, 0x0000),
        ConfigReg::SeuOpt => (0xC004, 0x0000),
        ConfigReg::Cwdt => {
            if v < 0x0201 {
                eprintln!("#W Watchdog timer clock below minimum value of 0x0201.");
            }
            return;
        }
        _ => return,
    };
    if v & mask != expect {
        eprintln!(
            "#W {reg:?}: expected reserved {expect:#06x}, got {:#06x}.",
            v & mask
        );
    }
}

// Reprocesses the stream from the first FAR write, maintaining the
// frame address state machine and copying FDRI payload into the frame
// buffer. Returns the stream offset after the FDRI phase (pointing at
// the terminating CMD GRESTORE/LFRM packet).
fn read_frames(bs: &mut Bitstream, d: &[u8], inpos: usize) -> Result<usize, BitError> {
    match bs.idcode {
        Some(v) if parts::supported_idcode(v) => {}
        Some(v) => return Err(BitError::UnsupportedIdcode(v)),
        None => return Err(BitError::UnsupportedIdcode(0)),
    }
    match bs.flr {
        Some(v) if usize::from(v) == IOB_WORDS => {}
        Some(v) => return Err(BitError::BadFlr(u32::from(v))),
        None => return Err(BitError::BadFlr(0)),
    }

    let mut cur = Cursor { d, pos: inpos };
    let mut far: Option<(u16, u16, u16, u16)> = None; // block, row, major, minor
    let mut mfw_src_off: Option<usize> = None;

    while cur.pos < d.len() {
        let hdr_off = cur.pos;
        let hdr = cur.u16_be()?;

        let packet_type = (hdr & 0xE000) >> 13;
        if packet_type != 1 && packet_type != 2 {
            return Err(BitError::BadPacket {
                offset: hdr_off,
                header: hdr,
            });
        }
        let opcode = (hdr & 0x1800) >> 11;
        if opcode == 3 {
            return Err(BitError::BadPacket {
                offset: hdr_off,
                header: hdr,
            });
        }
        if opcode == 0 {
            if packet_type != 1 || hdr & 0x07FF != 0 {
                return Err(BitError::BadPacket {
                    offset: hdr_off,
                    header: hdr,
                });
            }
            continue;
        }

        let reg_num = (hdr & 0x07E0) >> 5;
        let word_count = usize::from(hdr & 0x001F);
        let reg = ConfigReg::from_u16(reg_num);

        if packet_type == 1 {
            match reg {
                Some(ConfigReg::Fdri) if word_count == 0 => continue,
                Some(ConfigReg::Cmd) => {
                    if word_count != 1 {
                        return Err(BitError::BadWordCount {
                            offset: hdr_off,
                            count: word_count as u32,
                        });
                    }
                    let v = cur.peek_u16_be(cur.pos)?;
                    match Cmd::from_u16(v) {
                        Some(Cmd::Grestore) | Some(Cmd::Lfrm) => {
                            // ends the FDRI phase; leave the packet
                            // for the caller
                            return Ok(hdr_off);
                        }
                        Some(Cmd::Mfw) => {
                            let (block, row, major, minor) =
                                far.ok_or(BitError::FdriWithoutFar(hdr_off))?;
                            if block != 0 {
                                return Err(BitError::BadBlock {
                                    offset: hdr_off,
                                    block,
                                });
                            }
                            mfw_src_off = Some(
                                far_pos(row.into(), major.into(), minor.into())
                                    .ok_or(BitError::BadFar(hdr_off))?,
                            );
                        }
                        Some(Cmd::Wcfg) => {}
                        _ => {
                            return Err(BitError::BadPacket {
                                offset: hdr_off,
                                header: hdr,
                            })
                        }
                    }
                    cur.pos += 2;
                    continue;
                }
                Some(ConfigReg::FarMaj) => {
                    if word_count != 2 {
                        return Err(BitError::BadWordCount {
                            offset: hdr_off,
                            count: word_count as u32,
                        });
                    }
                    let maj = cur.u16_be()?;
                    let min = cur.u16_be()?;
                    let block = (maj & 0xF000) >> 12;
                    if block > 7 {
                        return Err(BitError::BadBlock {
                            offset: hdr_off,
                            block,
                        });
                    }
                    far = Some((block, (maj & 0x0F00) >> 8, maj & 0x00FF, min & 0x03FF));
                    continue;
                }
                Some(ConfigReg::Mfwr) => {
                    if word_count != 4 {
                        return Err(BitError::BadWordCount {
                            offset: hdr_off,
                            count: word_count as u32,
                        });
                    }
                    let d0 = cur.u32_be()?;
                    let d1 = cur.u32_be()?;
                    if d0 != 0 || d1 != 0 {
                        return Err(BitError::BadPacket {
                            offset: hdr_off,
                            header: hdr,
                        });
                    }
                    let (block, row, major, minor) =
                        far.ok_or(BitError::FdriWithoutFar(hdr_off))?;
                    if block != 0 {
                        return Err(BitError::BadBlock {
                            offset: hdr_off,
                            block,
                        });
                    }
                    let dst = far_pos(row.into(), major.into(), minor.into())
                        .ok_or(BitError::BadFar(hdr_off))?;
                    let src = mfw_src_off.ok_or(BitError::FdriWithoutFar(hdr_off))?;
                    // the first MFWR overwrites its own source
                    let frame: Vec<u8> =
                        bs.bits.as_bytes()[src..src + FRAME_SIZE].to_vec();
                    bs.bits.as_bytes_mut()[dst..dst + FRAME_SIZE].copy_from_slice(&frame);
                    continue;
                }
                _ => {
                    return Err(BitError::BadPacket {
                        offset: hdr_off,
                        header: hdr,
                    })
                }
            }
        }

        // type 2: the frame data payload
        if word_count != 0 || reg != Some(ConfigReg::Fdri) {
            return Err(BitError::BadPacket {
                offset: hdr_off,
                header: hdr,
            });
        }
        let count_off = cur.pos;
        let u32_count = cur.u32_be()?;
        if cur.pos + 2 * u32_count as usize > d.len() || 2 * u32_count < FRAME_SIZE as u32 {
            return Err(BitError::BadWordCount {
                offset: count_off,
                count: u32_count,
            });
        }

        let (block, row, major, minor) = far.ok_or(BitError::FdriWithoutFar(hdr_off))?;
        if block > 1 {
            return Err(BitError::BadBlock {
                offset: hdr_off,
                block,
            });
        }

        let mut block0_words = 0u32;
        if block == 0 {
            let offset_in_bits = far_pos(row.into(), major.into(), minor.into())
                .ok_or(BitError::BadFar(hdr_off))?;
            if row == 0 && major == 0 && minor == 0 && u32_count > FDRI_BLOCK0_WORDS {
                block0_words = FDRI_BLOCK0_WORDS;
            } else {
                block0_words = u32_count;
                if block0_words % (FRAME_SIZE as u32 / 2) != 0 {
                    return Err(BitError::BadWordCount {
                        offset: count_off,
                        count: u32_count,
                    });
                }
            }
            let num_frames = (block0_words as usize) / (FRAME_SIZE / 2);
            let mut padding_frames = 0;
            let mut i = 0;
            while i < num_frames {
                let src = cur.pos + i * FRAME_SIZE;
                if i > 0 && i + 1 == num_frames {
                    // The last frame of a block is skipped as a
                    // padding frame when it is all-1.
                    if d[src..src + FRAME_SIZE].iter().all(|&b| b == 0xFF) {
                        break;
                    }
                }
                if major == 0 && minor == 0 && i % (FRAMES_PER_ROW + 2) == FRAMES_PER_ROW {
                    // two all-1 padding frames at every row boundary
                    if !d[src..src + 2 * FRAME_SIZE].iter().all(|&b| b == 0xFF) {
                        return Err(BitError::BadPadding(src));
                    }
                    i += 2;
                    padding_frames += 2;
                    continue;
                }
                let dst = offset_in_bits + (i - padding_frames) * FRAME_SIZE;
                if dst + FRAME_SIZE > FRAMES_DATA_LEN {
                    return Err(BitError::BadFar(src));
                }
                bs.bits.as_bytes_mut()[dst..dst + FRAME_SIZE]
                    .copy_from_slice(&d[src..src + FRAME_SIZE]);
                i += 1;
            }
        }
        if u32_count > block0_words {
            // bram data and the IOB tail, closed by one zero word
            let bram_words = u32_count - block0_words;
            if bram_words != FDRI_BRAM_IOB_WORDS + 1 {
                return Err(BitError::BadWordCount {
                    offset: count_off,
                    count: u32_count,
                });
            }
            let src = cur.pos + block0_words as usize * 2;
            let dst = BRAM_DATA_START;
            let len = FDRI_BRAM_IOB_WORDS as usize * 2;
            bs.bits.as_bytes_mut()[dst..dst + len].copy_from_slice(&d[src..src + len]);
            let closing = u16::from_be_bytes(
                d[src + len..src + len + 2].try_into().unwrap(),
            );
            if closing != 0 {
                return Err(BitError::BadPadding(src + len));
            }
        }
        cur.pos += 2 * u32_count as usize;
        // the auto-crc word after the payload
        let _crc = cur.u32_be()?;
    }
    Err(BitError::UnexpectedEof(d.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_truncated_and_bad_magic() {
        assert!(matches!(
            read_bitstream(&[]),
            Err(BitError::UnexpectedEof(_))
        ));
        let mut d = HEADER_MAGIC.to_vec();
        d[0] = 0xFF;
        assert!(matches!(read_bitstream(&d), Err(BitError::BadMagic(0))));
    }

    #[test]
    fn rejects_missing_header_strings() {
        let mut d = HEADER_MAGIC.to_vec();
        d.extend_from_slice(&[b'x', 0, 2, b'a', 0]);
        assert!(matches!(
            read_bitstream(&d),
            Err(BitError::BadHeaderKey { expected: 'a', .. })
        ));
    }
}
