//! Human-readable rendering of configuration register values.

use num_traits::FromPrimitive;
use xs6::{Cmd, ConfigReg};

fn flags_and_rest(value: u16, flags: &[(u16, &str)]) -> (Vec<String>, u16) {
    let mut out = Vec::new();
    let mut rest = value;
    for &(mask, name) in flags {
        if rest & mask == mask {
            out.push(name.to_string());
            rest &= !mask;
        }
    }
    (out, rest)
}

fn with_flags(value: u16, parts: Vec<String>) -> String {
    if parts.is_empty() {
        format!("0x{value:04X}")
    } else {
        format!("0x{value:04X} {}", parts.join(" "))
    }
}

/// Renders a one-word register write the way `ug380` names its fields.
pub fn describe(reg: ConfigReg, value: u16) -> String {
    match reg {
        ConfigReg::Cmd => match Cmd::from_u16(value) {
            Some(cmd) => format!("{cmd:?}").to_uppercase(),
            None => format!("unknown 0x{value:04X}"),
        },
        ConfigReg::Cor1 => {
            let (mut parts, rest) = flags_and_rest(
                value,
                &[
                    (0x8000, "DRIVE_AWAKE"),
                    (0x0010, "CRC_BYPASS"),
                    (0x0008, "DONE_PIPE"),
                    (0x0004, "DRIVE_DONE"),
                ],
            );
            match rest & 0x0003 {
                0b10 | 0b11 => parts.push("SSCLKSRC=TCK".to_string()),
                0b01 => parts.push("SSCLKSRC=UserClk".to_string()),
                _ => {}
            }
            with_flags(value, parts)
        }
        ConfigReg::Cor2 => {
            let (mut parts, rest) = flags_and_rest(value, &[(0x8000, "RESET_ON_ERROR")]);
            parts.push(format!("DONE_CYCLE={:03b}", (rest & 0x0E00) >> 9));
            parts.push(format!("LCK_CYCLE={:03b}", (rest & 0x01C0) >> 6));
            parts.push(format!("GTS_CYCLE={:03b}", (rest & 0x0038) >> 3));
            parts.push(format!("GWE_CYCLE={:03b}", rest & 0x0007));
            with_flags(value, parts)
        }
        ConfigReg::Ctl | ConfigReg::Mask => {
            let (mut parts, _) = flags_and_rest(
                value,
                &[
                    (0x0040, "DECRYPT"),
                    (0x0008, "PERSIST"),
                    (0x0004, "USE_EFUSE_KEY"),
                    (0x0002, "CRC_EXTSTAT_DISABLE"),
                ],
            );
            match value & 0x0030 {
                0x0030 => parts.push(if reg == ConfigReg::Mask {
                    "SECURITY".to_string()
                } else {
                    "SBITS=NO_RW".to_string()
                }),
                0x0020 => parts.push("SBITS=NO_READ".to_string()),
                0x0010 => parts.push("SBITS=ICAP_READ".to_string()),
                _ => {}
            }
            with_flags(value, parts)
        }
        ConfigReg::PwrdnReg => {
            let (parts, _) = flags_and_rest(
                value,
                &[
                    (0x4000, "EN_EYES"),
                    (0x0020, "FILTER_B"),
                    (0x0010, "EN_PGSR"),
                    (0x0004, "EN_PWRDN"),
                    (0x0001, "KEEP_SCLK"),
                ],
            );
            with_flags(value, parts)
        }
        ConfigReg::HcOptReg => {
            let (parts, _) = flags_and_rest(value, &[(0x0040, "INIT_SKIP")]);
            with_flags(value, parts)
        }
        ConfigReg::ModeReg => {
            let (mut parts, _) = flags_and_rest(
                value,
                &[
                    (1 << 13, "NEW_MODE=BITSTREAM"),
                    (1 << 9, "BOOTMODE_1"),
                    (1 << 8, "BOOTMODE_0"),
                ],
            );
            match (value & (1 << 12) != 0, value & (1 << 11) != 0) {
                (true, false) => parts.push("BUSWIDTH=4".to_string()),
                (false, true) => parts.push("BUSWIDTH=2".to_string()),
                // BUSWIDTH=1 is the default and not displayed
                _ => {}
            }
            with_flags(value, parts)
        }
        ConfigReg::CclkFreq => {
            let (mut parts, rest) = flags_and_rest(value, &[(1 << 14, "EXT_MCLK")]);
            parts.push(format!("MCLK_FREQ=0x{:03X}", rest & 0x03FF));
            with_flags(value, parts)
        }
        ConfigReg::SeuOpt => {
            let (mut parts, _) = flags_and_rest(
                value,
                &[
                    (1 << 3, "SEU_RUN_ON_ERR"),
                    (1 << 1, "GLUT_MASK"),
                    (1 << 0, "SEU_ENABLE"),
                ],
            );
            parts.push(format!("SEU_FREQ=0x{:X}", (value & 0x3FF0) >> 4));
            with_flags(value, parts)
        }
        _ => format!("0x{value:04X}"),
    }
}
