//! Programmable switches (build phase 5): logic tiles, IOLOGIC tiles,
//! routing tiles driven by the bit-position catalogue, dirwire
//! terminators, CE/CLK terminators and IOB pad tiles.

use crate::consts::*;

use super::devices::{DevKind, LogicSubtype};
use super::{FpgaModel, ModelError};

/// The 63 logicin wires in `LOGICIN_B<i>` order: the X-site inputs
/// first, then the M-site inputs.
pub const LOGICIN_WIRES: [(char, &str); 63] = [
    ('X', "A1"), ('X', "A2"), ('X', "A3"), ('X', "A4"), ('X', "A5"), ('X', "A6"),
    ('X', "AX"),
    ('X', "B1"), ('X', "B2"), ('X', "B3"), ('X', "B4"), ('X', "B5"), ('X', "B6"),
    ('X', "BX"),
    ('X', "C1"), ('X', "C2"), ('X', "C3"), ('X', "C4"), ('X', "C5"), ('X', "C6"),
    ('X', "CE"), ('X', "CX"),
    ('X', "D1"), ('X', "D2"), ('X', "D3"), ('X', "D4"), ('X', "D5"), ('X', "D6"),
    ('X', "DX"),
    ('M', "A1"), ('M', "A2"), ('M', "A3"), ('M', "A4"), ('M', "A5"), ('M', "A6"),
    ('M', "AX"), ('M', "AI"),
    ('M', "B1"), ('M', "B2"), ('M', "B3"), ('M', "B4"), ('M', "B5"), ('M', "B6"),
    ('M', "BX"), ('M', "BI"),
    ('M', "C1"), ('M', "C2"), ('M', "C3"), ('M', "C4"), ('M', "C5"), ('M', "C6"),
    ('M', "CE"), ('M', "CX"), ('M', "CI"),
    ('M', "D1"), ('M', "D2"), ('M', "D3"), ('M', "D4"), ('M', "D5"), ('M', "D6"),
    ('M', "DX"), ('M', "DI"),
    ('M', "WE"),
];

/// The 24 logicout wires in `LOGICOUT<i>` order, X site then M site.
pub const LOGICOUT_WIRES: [(char, &str); 24] = [
    ('X', "A"), ('X', "AMUX"), ('X', "AQ"),
    ('X', "B"), ('X', "BMUX"), ('X', "BQ"),
    ('X', "C"), ('X', "CMUX"), ('X', "CQ"),
    ('X', "D"), ('X', "DMUX"), ('X', "DQ"),
    ('M', "A"), ('M', "AMUX"), ('M', "AQ"),
    ('M', "B"), ('M', "BMUX"), ('M', "BQ"),
    ('M', "C"), ('M', "CMUX"), ('M', "CQ"),
    ('M', "D"), ('M', "DMUX"), ('M', "DQ"),
];

pub(super) fn init_switches(m: &mut FpgaModel) -> Result<(), ModelError> {
    init_routing_switches(m)?;
    init_logic_switches(m)?;
    init_iologic_switches(m)?;
    init_north_south_dirwire_term(m)?;
    init_ce_clk_switches(m)?;
    init_io_switches(m)?;
    Ok(())
}

fn logicin_s(i: usize, routing_io: bool) -> String {
    if routing_io && (i == 4 || i == 10) {
        format!("INT_IOI_LOGICIN_B{i}")
    } else {
        format!("LOGICIN_B{i}")
    }
}

fn init_logic_tile(m: &mut FpgaModel, y: usize, x: usize) -> Result<(), ModelError> {
    let (ml, xp) = if m.has_device_type(y, x, DevKind::Logic, LogicSubtype::M as u8) {
        ('M', "X")
    } else {
        ('L', "XX")
    };

    m.add_switch(y, x, &format!("CLEX{ml}_CLK0"), &format!("{xp}_CLK"), false)?;
    m.add_switch(y, x, &format!("CLEX{ml}_CLK1"), &format!("{ml}_CLK"), false)?;
    m.add_switch(y, x, &format!("CLEX{ml}_SR0"), &format!("{xp}_SR"), false)?;
    m.add_switch(y, x, &format!("CLEX{ml}_SR1"), &format!("{ml}_SR"), false)?;
    for (i, &(family, name)) in LOGICIN_WIRES.iter().enumerate() {
        if family == 'X' {
            m.add_switch(
                y, x,
                &format!("CLEX{ml}_LOGICIN_B{i}"),
                &format!("{xp}_{name}"),
                false,
            )?;
        } else {
            if ml == 'L' && matches!(name, "AI" | "BI" | "CI" | "DI" | "WE") {
                continue;
            }
            m.add_switch(
                y, x,
                &format!("CLEX{ml}_LOGICIN_B{i}"),
                &format!("{ml}_{name}"),
                false,
            )?;
        }
    }
    for (i, &(family, name)) in LOGICOUT_WIRES.iter().enumerate() {
        let pre = if family == 'X' { xp.to_string() } else { ml.to_string() };
        m.add_switch(
            y, x,
            &format!("{pre}_{name}"),
            &format!("CLEX{ml}_LOGICOUT{i}"),
            false,
        )?;
    }
    for pos in ['A', 'B', 'C', 'D'] {
        for j in 1..=6 {
            m.add_switch(y, x, &format!("{ml}_{pos}{j}"), &format!("{ml}_{pos}"), false)?;
            m.add_switch(y, x, &format!("{xp}_{pos}{j}"), &format!("{xp}_{pos}"), false)?;
        }
        m.add_switch(y, x, &format!("{ml}_{pos}"), &format!("{ml}_{pos}MUX"), false)?;
    }
    // carry chain
    if ml == 'L' {
        if m.has_connpt(y, x, "XL_COUT_N") {
            m.add_switch(y, x, "XL_COUT", "XL_COUT_N", false)?;
        }
        m.add_switch(y, x, "XL_COUT", "L_DMUX", false)?;
    } else {
        if m.has_connpt(y, x, "M_COUT_N") {
            m.add_switch(y, x, "M_COUT", "M_COUT_N", false)?;
        }
        m.add_switch(y, x, "M_COUT", "M_DMUX", false)?;
    }
    Ok(())
}

fn init_logic_switches(m: &mut FpgaModel) -> Result<(), ModelError> {
    for x in LEFT_SIDE_WIDTH..m.x_width - RIGHT_SIDE_WIDTH {
        if !m.is_atx(XCheck::FabricLogicCol | XCheck::CenterLogicCol, x) {
            continue;
        }
        for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
            if m.has_device(y, x, DevKind::Logic) {
                init_logic_tile(m, y, x)?;
            }
        }
    }
    Ok(())
}

fn init_iologic_tile(m: &mut FpgaModel, y: usize, x: usize) -> Result<(), ModelError> {
    let (io_prefix, prefix, prefix2) = if x < LEFT_SIDE_WIDTH {
        ("IOI_", "LIOI_", "LIOI_IOB_")
    } else if x >= m.x_width - RIGHT_SIDE_WIDTH {
        ("RIOI_", "RIOI_", "RIOI_IOB_")
    } else if y == TOP_OUTER_IO {
        ("TIOI_", "TIOI_", "TIOI_OUTER_")
    } else if y == TOP_INNER_IO {
        ("TIOI_INNER_", "TIOI_", "TIOI_INNER_")
    } else if y == m.y_height - BOT_INNER_IO {
        ("BIOI_INNER_", "BIOI_", "BIOI_INNER_")
    } else {
        ("TIOI_", "BIOI_", "BIOI_OUTER_")
    };

    for i in 0..=23 {
        m.add_switch(
            y, x,
            &format!("IOI_INTER_LOGICOUT{i}"),
            &format!("IOI_LOGICOUT{i}"),
            false,
        )?;
    }
    // switches going to IOI_INTER_LOGICOUT0:15
    const LOGICOUT_SRC: [&str; 16] = [
        "FABRICOUT_ILOGIC_SITE",
        "Q1_ILOGIC_SITE",
        "Q2_ILOGIC_SITE",
        "Q3_ILOGIC_SITE",
        "Q4_ILOGIC_SITE",
        "INCDEC_ILOGIC_SITE",
        "VALID_ILOGIC_SITE",
        "FABRICOUT_ILOGIC_SITE_S",
        "Q1_ILOGIC_SITE_S",
        "Q2_ILOGIC_SITE_S",
        "Q3_ILOGIC_SITE_S",
        "Q4_ILOGIC_SITE_S",
        "",
        "",
        "BUSY_IODELAY_SITE",
        "BUSY_IODELAY_SITE_S",
    ];
    for (i, src) in LOGICOUT_SRC.iter().enumerate() {
        if !src.is_empty() {
            m.add_switch(y, x, src, &format!("IOI_INTER_LOGICOUT{i}"), false)?;
        }
    }
    // The 6 CE lines (4 IO_CE and 2 PLL_CE) can be switched to 4 IOCE
    // destinations; each IOCE line can be driven by 6 CE lines.
    for i in 0..=3usize {
        let dest = format!("IOI_CLKDIST_IOCE{}{}", i / 2, if i % 2 == 1 { "_M" } else { "_S" });
        for j in 0..=3 {
            m.add_switch(y, x, &format!("{io_prefix}IOCE{j}"), &dest, false)?;
        }
        for j in 0..=1 {
            m.add_switch(y, x, &format!("{io_prefix}PLLCE{j}"), &dest, false)?;
        }
    }
    // Incoming clocks and fan switch to intermediates, and from there
    // to the ilogic/ologic devices or the two CLK1 lines.
    for i in 0..4usize {
        let inter_i = format!("IOI_CLK{}INTER{}", i % 2, if i < 2 { "_M" } else { "_S" });
        m.add_switch(y, x, &format!("IOI_CLK{}", i / 2), &inter_i, false)?;
        m.add_switch(y, x, &format!("IOI_GFAN{}", i / 2), &inter_i, false)?;
        m.add_switch(y, x, &format!("{io_prefix}IOCLK{i}"), &inter_i, false)?;
        m.add_switch(
            y, x,
            &format!("{io_prefix}PLLCLK{}", i / 2),
            &format!("IOI_CLK{}INTER{}", i / 2, if i % 2 == 1 { "_M" } else { "_S" }),
            false,
        )?;
        // only PLLCLK reaches the CLK2 intermediate
        m.add_switch(
            y, x,
            &format!("{io_prefix}PLLCLK{}", i / 2),
            &format!("IOI_CLK2INTER{}", if i % 2 == 1 { "_S" } else { "_M" }),
            false,
        )?;
        m.add_switch(
            y, x,
            &inter_i,
            &format!("IOI_CLKDIST_CLK1{}", if i < 2 { "_M" } else { "_S" }),
            false,
        )?;
    }
    // three sources each
    for i in 0..6usize {
        let inter = format!("IOI_CLK{}INTER{}", i % 3, if i < 3 { "_M" } else { "_S" });
        let ms = if i < 3 { "_M" } else { "_S" };
        m.add_switch(y, x, &inter, &format!("IOI_CLKDIST_CLK0_ILOGIC{ms}"), false)?;
        m.add_switch(y, x, &inter, &format!("IOI_CLKDIST_CLK0_OLOGIC{ms}"), false)?;
    }
    // logicin wires
    const IOLOGIC_LOGICIN: [(usize, &str); 40] = [
        (2, "CAL_IODELAY_SITE"),
        (3, "CAL_IODELAY_SITE_S"),
        (5, "CE_IODELAY_SITE_S"),
        (7, "INC_IODELAY_SITE_S"),
        (8, "TRAIN_OLOGIC_SITE"),
        (9, "TCE_OLOGIC_SITE_S"),
        (12, "T3_OLOGIC_SITE_S"),
        (14, "REV_OLOGIC_SITE_S"),
        (15, "D1_OLOGIC_SITE_S"),
        (16, "D2_OLOGIC_SITE_S"),
        (17, "D3_OLOGIC_SITE_S"),
        (19, "BITSLIP_ILOGIC_SITE_S"),
        (20, "SR_ILOGIC_SITE_S"),
        (23, "TCE_OLOGIC_SITE"),
        (24, "T1_OLOGIC_SITE"),
        (25, "T2_OLOGIC_SITE"),
        (26, "T3_OLOGIC_SITE"),
        (27, "T4_OLOGIC_SITE"),
        (28, "TRAIN_OLOGIC_SITE_S"),
        (29, "REV_OLOGIC_SITE"),
        (30, "OCE_OLOGIC_SITE"),
        (31, "D1_OLOGIC_SITE"),
        (32, "D2_OLOGIC_SITE"),
        (34, "D4_OLOGIC_SITE"),
        (36, "SR_ILOGIC_SITE"),
        (37, "REV_ILOGIC_SITE"),
        (38, "CE0_ILOGIC_SITE"),
        (39, "OCE_OLOGIC_SITE_S"),
        (41, "RST_IODELAY_SITE_S"),
        (42, "T2_OLOGIC_SITE_S"),
        (44, "D3_OLOGIC_SITE"),
        (45, "T1_OLOGIC_SITE_S"),
        (47, "CE_IODELAY_SITE"),
        (48, "D4_OLOGIC_SITE_S"),
        (54, "T4_OLOGIC_SITE_S"),
        (55, "RST_IODELAY_SITE"),
        (57, "BITSLIP_ILOGIC_SITE"),
        (58, "INC_IODELAY_SITE"),
        (59, "REV_ILOGIC_SITE_S"),
        (62, "CE0_ILOGIC_SITE_S"),
    ];
    for &(i, dest) in IOLOGIC_LOGICIN.iter() {
        m.add_switch(y, x, &format!("IOI_LOGICINB{i}"), dest, false)?;
    }
    // GND
    for site in ["REV_OLOGIC_SITE", "SR_OLOGIC_SITE", "TRAIN_OLOGIC_SITE"] {
        m.add_switch(y, x, &format!("{prefix}GND_TIEOFF"), &format!("{site}_S"), false)?;
        m.add_switch(y, x, &format!("{prefix}GND_TIEOFF"), site, false)?;
    }
    // VCC
    for site in ["IOCE_ILOGIC_SITE", "IOCE_OLOGIC_SITE"] {
        m.add_switch(y, x, &format!("{prefix}VCC_TIEOFF"), &format!("{site}_S"), false)?;
        m.add_switch(y, x, &format!("{prefix}VCC_TIEOFF"), site, false)?;
    }
    // CLK
    for site in ["CLKDIV_ILOGIC_SITE", "CLKDIV_OLOGIC_SITE", "CLK_IODELAY_SITE"] {
        m.add_switch(y, x, "IOI_CLK1", &format!("{site}_S"), false)?;
        m.add_switch(y, x, "IOI_CLK0", site, false)?;
    }
    for i in 0..4usize {
        m.add_switch(
            y, x,
            &format!("CLK{}_ILOGIC_SITE{}", i / 2, if i % 2 == 1 { "_S" } else { "" }),
            &format!("CFB{}_ILOGIC_SITE{}", i / 2, if i % 2 == 1 { "_S" } else { "" }),
            false,
        )?;
    }
    // SR
    for site in ["SR_ILOGIC_SITE", "SR_OLOGIC_SITE"] {
        m.add_switch(y, x, "IOI_SR1", &format!("{site}_S"), false)?;
        m.add_switch(y, x, "IOI_SR0", site, false)?;
    }
    // IOCLK to the intermediates
    for i in 0..4usize {
        m.add_switch(
            y, x,
            &format!("{io_prefix}IOCLK{i}"),
            &format!("IOI_CLK{}INTER{}", i % 2, if i / 2 == 1 { "_M" } else { "_S" }),
            false,
        )?;
    }
    {
        const PAIRS: [(&str, &str); 13] = [
            ("D1_OLOGIC_SITE", "OQ_OLOGIC_SITE"),
            ("DATAOUT_IODELAY_SITE", "DDLY_ILOGIC_SITE"),
            ("DDLY2_ILOGIC_SITE", "FABRICOUT_ILOGIC_SITE"),
            ("DDLY_ILOGIC_SITE", "DFB_ILOGIC_SITE"),
            ("D_ILOGIC_IDATAIN_IODELAY", "D_ILOGIC_SITE"),
            ("D_ILOGIC_IDATAIN_IODELAY", "IDATAIN_IODELAY_SITE"),
            ("D_ILOGIC_SITE", "DFB_ILOGIC_SITE"),
            ("D_ILOGIC_SITE", "FABRICOUT_ILOGIC_SITE"),
            ("T1_OLOGIC_SITE", "TQ_OLOGIC_SITE"),
            ("TQ_OLOGIC_SITE", "TFB_ILOGIC_SITE"),
            ("TQ_OLOGIC_SITE", "T_IODELAY_SITE"),
            ("OQ_OLOGIC_SITE", "ODATAIN_IODELAY_SITE"),
            ("OQ_OLOGIC_SITE", "OFB_ILOGIC_SITE"),
        ];
        for (from, to) in PAIRS {
            m.add_switch(y, x, from, to, false)?;
            m.add_switch(y, x, &format!("{from}_S"), &format!("{to}_S"), false)?;
        }
        m.add_switch(y, x, "DATAOUT2_IODELAY_SITE", "DDLY2_ILOGIC_SITE", false)?;
        m.add_switch(y, x, "DATAOUT2_IODELAY2_SITE_S", "DDLY2_ILOGIC_SITE_S", false)?;
    }
    for i in 0..2 {
        m.add_switch(
            y, x,
            "IOI_PCI_CE",
            &format!("OCE_OLOGIC_SITE{}", if i == 1 { "_S" } else { "" }),
            false,
        )?;
    }
    // three because IBUF1 cannot be switched to the non-_S side
    for i in 0..3usize {
        m.add_switch(
            y, x,
            &format!("{prefix2}IBUF{}", i / 2),
            &format!("D_ILOGIC_IDATAIN_IODELAY{}", if i % 2 == 0 { "_S" } else { "" }),
            false,
        )?;
    }
    {
        const OUT_PAIRS: [(&str, &str); 4] = [
            ("DOUT_IODELAY_SITE", "O"),
            ("OQ_OLOGIC_SITE", "O"),
            ("TOUT_IODELAY_SITE", "T"),
            ("TQ_OLOGIC_SITE", "T"),
        ];
        for i in 0..8usize {
            let (from, to) = OUT_PAIRS[i / 2];
            m.add_switch(
                y, x,
                &format!("{from}{}", if i % 2 == 1 { "_S" } else { "" }),
                &format!("{prefix2}{to}{}", i % 2),
                false,
            )?;
        }
    }
    {
        const SHIFT_PAIRS: [(&str, &str); 6] = [
            ("SHIFTOUT1_OLOGIC_SITE", "SHIFTIN1_OLOGIC_SITE_S"),
            ("SHIFTOUT2_OLOGIC_SITE", "SHIFTIN2_OLOGIC_SITE_S"),
            ("SHIFTOUT3_OLOGIC_SITE_S", "SHIFTIN3_OLOGIC_SITE"),
            ("SHIFTOUT4_OLOGIC_SITE_S", "SHIFTIN4_OLOGIC_SITE"),
            ("SHIFTOUT_ILOGIC_SITE", "SHIFTIN_ILOGIC_SITE_S"),
            ("SHIFTOUT_ILOGIC_SITE_S", "SHIFTIN_ILOGIC_SITE"),
        ];
        for (from, to) in SHIFT_PAIRS {
            m.add_switch(y, x, from, to, false)?;
        }
    }
    {
        const CLKDIST_PAIRS: [(&str, &str); 9] = [
            ("IOI_CLKDIST_CLK0_ILOGIC%s", "CLK0_ILOGIC_SITE%s"),
            ("IOI_CLKDIST_CLK0_ILOGIC%s", "IOCLK_IODELAY_SITE%s"),
            ("IOI_CLKDIST_CLK0_OLOGIC%s", "CLK0_OLOGIC_SITE%s"),
            ("IOI_CLKDIST_CLK0_OLOGIC%s", "IOCLK_IODELAY_SITE%s"),
            ("IOI_CLKDIST_CLK1%s", "CLK1_ILOGIC_SITE%s"),
            ("IOI_CLKDIST_CLK1%s", "CLK1_OLOGIC_SITE%s"),
            ("IOI_CLKDIST_CLK1%s", "IOCLK1_IODELAY_SITE%s"),
            ("IOI_CLKDIST_IOCE0%s", "IOCE_ILOGIC_SITE%s"),
            ("IOI_CLKDIST_IOCE1%s", "IOCE_OLOGIC_SITE%s"),
        ];
        for i in 0..18usize {
            let (from, to) = CLKDIST_PAIRS[i / 2];
            let from = from.replace("%s", if i % 2 == 1 { "_S" } else { "_M" });
            let to = to.replace("%s", if i % 2 == 1 { "_S" } else { "" });
            m.add_switch(y, x, &from, &to, false)?;
        }
    }
    {
        const MCB_DRP_PAIRS: [(&str, &str); 6] = [
            ("IOI_MCB_DRPADD", "CAL_IODELAY_SITE%s"),
            ("IOI_MCB_DRPBROADCAST", "RST_IODELAY_SITE%s"),
            ("IOI_MCB_DRPCLK", "CLK_IODELAY_SITE%s"),
            ("IOI_MCB_DRPCS", "INC_IODELAY_SITE%s"),
            ("IOI_MCB_DRPSDO", "CE_IODELAY_SITE%s"),
            ("IOI_MCB_DRPTRAIN", "TRAIN_OLOGIC_SITE%s"),
        ];
        for i in 0..12usize {
            let (from, to) = MCB_DRP_PAIRS[i / 2];
            let to = to.replace("%s", if i % 2 == 1 { "_S" } else { "" });
            m.add_switch(y, x, from, &to, false)?;
        }
    }
    {
        const MCB_PAIRS: [(&str, &str); 12] = [
            ("IOI_MCB_OUTN_M", "D2_OLOGIC_SITE"),
            ("IOI_MCB_OUTN_S", "D2_OLOGIC_SITE_S"),
            ("IOI_MCB_OUTP_M", "D1_OLOGIC_SITE"),
            ("IOI_MCB_OUTP_S", "D1_OLOGIC_SITE_S"),
            ("IOI_MCB_DQIEN_M", "T2_OLOGIC_SITE"),
            ("IOI_MCB_DQIEN_M", "T2_OLOGIC_SITE_S"),
            ("IOI_MCB_DQIEN_S", "T1_OLOGIC_SITE"),
            ("IOI_MCB_DQIEN_S", "T1_OLOGIC_SITE_S"),
            ("FABRICOUT_ILOGIC_SITE", "IOI_MCB_INBYP_M"),
            ("FABRICOUT_ILOGIC_SITE_S", "IOI_MCB_INBYP_S"),
            ("OUTP_IODELAY_SITE", "IOI_MCB_IN_M"),
            ("STUB_OUTP_IODELAY_S", "IOI_MCB_IN_S"),
        ];
        for (from, to) in MCB_PAIRS {
            m.add_switch(y, x, from, to, false)?;
        }
    }
    if x < LEFT_SIDE_WIDTH || x >= m.x_width - RIGHT_SIDE_WIDTH {
        m.add_switch(y, x, "AUXSDOIN_IODELAY_M", "AUXSDO_IODELAY_M", false)?;
        m.add_switch(y, x, "AUXSDOIN_IODELAY_S", "AUXSDO_IODELAY_S", false)?;
    } else {
        m.add_switch(y, x, "AUXSDOIN_IODELAY_S_STUB", "AUXSDO_IODELAY_S_STUB", false)?;
        m.add_switch(y, x, "AUXSDOIN_IODELAY_STUB", "AUXSDO_IODELAY_STUB", false)?;
    }
    Ok(())
}

fn init_iologic_switches(m: &mut FpgaModel) -> Result<(), ModelError> {
    for x in LEFT_SIDE_WIDTH..m.x_width - RIGHT_SIDE_WIDTH {
        for y in [
            TOP_OUTER_IO,
            TOP_INNER_IO,
            m.y_height - BOT_INNER_IO,
            m.y_height - BOT_OUTER_IO,
        ] {
            if m.has_device(y, x, DevKind::Ilogic) {
                init_iologic_tile(m, y, x)?;
            }
        }
    }
    for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
        if m.has_device(y, LEFT_IO_DEVS, DevKind::Ilogic) {
            init_iologic_tile(m, y, LEFT_IO_DEVS)?;
        }
        if m.has_device(y, m.x_width - RIGHT_IO_DEVS_O, DevKind::Ilogic) {
            init_iologic_tile(m, y, m.x_width - RIGHT_IO_DEVS_O)?;
        }
    }
    Ok(())
}

fn init_north_south_dirwire_term(m: &mut FpgaModel) -> Result<(), ModelError> {
    const LOGICIN_PAIRS: [usize; 8] = [21, 20, 28, 36, 52, 44, 60, 62];
    for x in 0..m.x_width {
        if !m.is_atx(XCheck::RoutingCol, x) {
            continue;
        }

        // top
        for i in 0..4 {
            m.add_switch(
                TOP_INNER_ROW, x,
                &format!("IOI_TTERM_LOGICIN{}", LOGICIN_PAIRS[i * 2]),
                &format!("IOI_TTERM_LOGICIN_S{}", LOGICIN_PAIRS[i * 2 + 1]),
                false,
            )?;
        }
        const S0_SWITCHES: [(&str, &str); 8] = [
            ("ER1E3", "EL1E_S0"),
            ("SR1E_N3", "NL1E_S0"),
            ("SS2E_N3", "NN2E_S0"),
            ("SS4E3", "NW4E_S0"),
            ("SW2E3", "NE2E_S0"),
            ("SW4E3", "WW4E_S0"),
            ("WL1E3", "WR1E_S0"),
            ("WW2E3", "NW2E_S0"),
        ];
        m.add_switch_set(TOP_INNER_ROW, x, "IOI_TTERM_", &S0_SWITCHES, 0)?;
        const TOP_DIR: [(&str, &str); 14] = [
            ("NN4B", "SS4A"),
            ("NN4A", "SS4M"),
            ("NN4M", "SS4C"),
            ("NN4C", "SS4E"),
            ("NN2B", "SS2M"),
            ("NN2M", "SS2E"),
            ("NE4B", "SE4A"),
            ("NE4A", "SE4M"),
            ("NE2B", "SE2M"),
            ("NW4B", "SW4A"),
            ("NW4A", "SW4M"),
            ("NW2B", "SW2M"),
            ("NL1B", "SL1E"),
            ("NR1B", "SR1E"),
        ];
        m.add_switch_set(TOP_INNER_ROW, x, "IOI_TTERM_", &TOP_DIR, 3)?;

        // bottom
        if m.is_atx(XCheck::FabricBramRoutingCol, x) {
            continue;
        }
        for i in 0..4 {
            m.add_switch(
                m.y_height - BOT_INNER_ROW, x,
                &format!("IOI_BTERM_LOGICIN{}", LOGICIN_PAIRS[i * 2 + 1]),
                &format!("IOI_BTERM_LOGICIN_N{}", LOGICIN_PAIRS[i * 2]),
                false,
            )?;
        }
        const N3_SWITCHES: [(&str, &str); 8] = [
            ("EL1E0", "ER1E_N3"),
            ("NE2E0", "SW2E_N3"),
            ("NL1E_S0", "SR1E_N3"),
            ("NN2E_S0", "SS2E_N3"),
            ("NW2E0", "WW2E_N3"),
            ("NW4E0", "SS4E_N3"),
            ("WR1E0", "WL1E_N3"),
            ("WW4E0", "SW4E_N3"),
        ];
        m.add_switch_set(m.y_height - BOT_INNER_ROW, x, "IOI_BTERM_", &N3_SWITCHES, 0)?;
        const BOT_DIR: [(&str, &str); 14] = [
            ("SS4B", "NN4A"),
            ("SS4A", "NN4M"),
            ("SS4M", "NN4C"),
            ("SS4C", "NN4E"),
            ("SS2B", "NN2M"),
            ("SS2M", "NN2E"),
            ("SE4B", "NE4A"),
            ("SE4A", "NE4M"),
            ("SE2B", "NE2M"),
            ("SW4B", "NW4A"),
            ("SW4A", "NW4M"),
            ("SW2B", "NW2M"),
            ("NL1E", "SL1B"),
            ("SR1B", "NR1E"),
        ];
        m.add_switch_set(m.y_height - BOT_INNER_ROW, x, "IOI_BTERM_", &BOT_DIR, 3)?;
    }
    Ok(())
}

// CE and CLK wires for IO and PLL run horizontally through the hclk
// rows and vertically through the logic device columns; this sets up
// their switches in the term tiles.
fn init_ce_clk_switches(m: &mut FpgaModel) -> Result<(), ModelError> {
    for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
        if !m.is_aty(YCheck::RowHorizAxsymm, y) {
            continue;
        }
        // left
        for i in 0..=3 {
            m.add_switch(
                y, LEFT_INNER_COL,
                &format!("HCLK_IOI_LTERM_IOCE{i}"),
                &format!("HCLK_IOI_LTERM_IOCE{i}_E"),
                false,
            )?;
            m.add_switch(
                y, LEFT_INNER_COL,
                &format!("HCLK_IOI_LTERM_IOCLK{i}"),
                &format!("HCLK_IOI_LTERM_IOCLK{i}_E"),
                false,
            )?;
        }
        for i in 0..=1 {
            m.add_switch(
                y, LEFT_INNER_COL,
                &format!("HCLK_IOI_LTERM_PLLCE{i}"),
                &format!("HCLK_IOI_LTERM_PLLCE{i}_E"),
                false,
            )?;
            m.add_switch(
                y, LEFT_INNER_COL,
                &format!("HCLK_IOI_LTERM_PLLCLK{i}"),
                &format!("HCLK_IOI_LTERM_PLLCLK{i}_E"),
                false,
            )?;
        }
        // right
        let rx = m.x_width - RIGHT_INNER_O;
        for i in 0..=3 {
            m.add_switch(
                y, rx,
                &format!("HCLK_IOI_RTERM_IOCE{i}"),
                &format!("HCLK_IOI_RTERM_IOCE{}_W", 3 - i),
                false,
            )?;
            m.add_switch(
                y, rx,
                &format!("HCLK_IOI_RTERM_IOCLK{i}"),
                &format!("HCLK_IOI_RTERM_IOCLK{}_W", 3 - i),
                false,
            )?;
        }
        for i in 0..=1 {
            m.add_switch(
                y, rx,
                &format!("HCLK_IOI_RTERM_PLLCEOUT{i}"),
                &format!("HCLK_IOI_RTERM_PLLCEOUT{i}_W"),
                false,
            )?;
            m.add_switch(
                y, rx,
                &format!("HCLK_IOI_RTERM_PLLCLKOUT{i}"),
                &format!("HCLK_IOI_RTERM_PLLCLKOUT{i}_W"),
                false,
            )?;
        }
    }
    for x in LEFT_SIDE_WIDTH..m.x_width - RIGHT_SIDE_WIDTH {
        if !m.is_atx(XCheck::FabricLogicCol | XCheck::CenterLogicCol, x)
            || m.is_atx(XCheck::RoutingNoIo, x - 1)
        {
            continue;
        }
        // top
        for i in 0..=3 {
            m.add_switch(
                TOP_INNER_ROW, x,
                &format!("TTERM_CLB_IOCE{i}"),
                &format!("TTERM_CLB_IOCE{i}_S"),
                false,
            )?;
            m.add_switch(
                TOP_INNER_ROW, x,
                &format!("TTERM_CLB_IOCLK{i}"),
                &format!("TTERM_CLB_IOCLK{i}_S"),
                false,
            )?;
        }
        for i in 0..=1 {
            m.add_switch(
                TOP_INNER_ROW, x,
                &format!("TTERM_CLB_PLLCE{i}"),
                &format!("TTERM_CLB_PLLCE{i}_S"),
                false,
            )?;
            m.add_switch(
                TOP_INNER_ROW, x,
                &format!("TTERM_CLB_PLLCLK{i}"),
                &format!("TTERM_CLB_PLLCLK{i}_S"),
                false,
            )?;
        }
        m.add_switch(TOP_INNER_ROW, x, "TTERM_CLB_PCICE", "TTERM_CLB_PCICE_S", false)?;

        // bottom
        let by = m.y_height - BOT_INNER_ROW;
        for i in 0..=3 {
            m.add_switch(
                by, x,
                &format!("BTERM_CLB_CEOUT{i}"),
                &format!("BTERM_CLB_CEOUT{i}_N"),
                false,
            )?;
            m.add_switch(
                by, x,
                &format!("BTERM_CLB_CLKOUT{i}"),
                &format!("BTERM_CLB_CLKOUT{i}_N"),
                false,
            )?;
        }
        for i in 0..=1 {
            m.add_switch(
                by, x,
                &format!("BTERM_CLB_PLLCEOUT{i}"),
                &format!("BTERM_CLB_PLLCEOUT{i}_N"),
                false,
            )?;
            m.add_switch(
                by, x,
                &format!("BTERM_CLB_PLLCLKOUT{i}"),
                &format!("BTERM_CLB_PLLCLKOUT{i}_N"),
                false,
            )?;
        }
        m.add_switch(by, x, "BTERM_CLB_PCICE", "BTERM_CLB_PCICE_N", false)?;
    }
    Ok(())
}

fn init_io_tile(m: &mut FpgaModel, y: usize, x: usize) -> Result<(), ModelError> {
    let (prefix, num_devs) = if y == 0 {
        ("TIOB", 2)
    } else if y == m.y_height - BOT_OUTER_ROW {
        ("BIOB", 2)
    } else if x == 0 {
        ("LIOB", 1)
    } else {
        ("RIOB", 1)
    };
    if y == 0 {
        m.add_switch(y, x, &format!("{prefix}_DIFFO_OUT2"), &format!("{prefix}_DIFFO_IN3"), false)?;
    } else if y == m.y_height - BOT_OUTER_ROW {
        m.add_switch(y, x, &format!("{prefix}_DIFFO_OUT3"), &format!("{prefix}_DIFFO_IN2"), false)?;
    }

    for i in 0..num_devs * 2 {
        m.add_switch(
            y, x,
            &format!("{prefix}_IBUF{i}_PINW"),
            &format!("{prefix}_IBUF{i}"),
            false,
        )?;
        m.add_switch(y, x, &format!("{prefix}_O{i}"), &format!("{prefix}_O{i}_PINW"), false)?;
        m.add_switch(y, x, &format!("{prefix}_T{i}"), &format!("{prefix}_T{i}_PINW"), false)?;
    }
    m.add_switch(y, x, &format!("{prefix}_DIFFO_OUT0"), &format!("{prefix}_DIFFO_IN1"), false)?;
    for i in 0..=1usize {
        m.add_switch(
            y, x,
            &format!("{prefix}_PADOUT{i}"),
            &format!("{prefix}_DIFFI_IN{}", 1 - i),
            false,
        )?;
    }
    if num_devs > 1 {
        for i in 0..=1usize {
            m.add_switch(
                y, x,
                &format!("{prefix}_PADOUT{}", i + 2),
                &format!("{prefix}_DIFFI_IN{}", 3 - i),
                false,
            )?;
        }
    }
    Ok(())
}

fn init_io_switches(m: &mut FpgaModel) -> Result<(), ModelError> {
    for x in 0..m.x_width {
        if m.has_device(0, x, DevKind::Iob) {
            init_io_tile(m, 0, x)?;
        }
        if m.has_device(m.y_height - BOT_OUTER_ROW, x, DevKind::Iob) {
            init_io_tile(m, m.y_height - BOT_OUTER_ROW, x)?;
        }
    }
    for y in 0..m.y_height {
        if m.has_device(y, 0, DevKind::Iob) {
            init_io_tile(m, y, 0)?;
        }
        if m.has_device(y, m.x_width - RIGHT_OUTER_O, DevKind::Iob) {
            init_io_tile(m, y, m.x_width - RIGHT_OUTER_O)?;
        }
    }
    Ok(())
}

/// Resolves a catalogue entry's endpoints for a concrete routing tile:
/// the substituted from/to names and the effective direction.
pub(crate) fn catalogue_endpoints(
    kind: TileKind,
    from: &str,
    to: &str,
    bidir: bool,
) -> (String, String, bool) {
    let routing_io = kind == TileKind::IoRouting || kind == TileKind::RoutingIoL;
    let gclk_brk = kind == TileKind::RoutingBrk || kind == TileKind::BramRoutingBrk;
    let mut from = from.to_string();
    let mut is_bidir = bidir;
    if routing_io {
        if from == "GFAN0" || from == "GFAN1" {
            from = "VCC_WIRE".to_string();
            is_bidir = false;
        } else if to == "GFAN0" || to == "GFAN1" {
            is_bidir = false;
        }
    }
    (
        routing_wirestr(&from, routing_io, gclk_brk),
        routing_wirestr(to, routing_io, gclk_brk),
        is_bidir,
    )
}

// In routing-IO tiles a few wires take on interconnect names and the
// GFAN switches become unidirectional; in break tiles the GCLKs carry
// a _BRK suffix.
fn routing_wirestr(wire: &str, routing_io: bool, gclk_brk: bool) -> String {
    if routing_io {
        match wire {
            "GFAN0" => return "INT_IOI_GFAN0".to_string(),
            "GFAN1" => return "INT_IOI_GFAN1".to_string(),
            "LOGICIN_B4" => return "INT_IOI_LOGICIN_B4".to_string(),
            "LOGICIN_B10" => return "INT_IOI_LOGICIN_B10".to_string(),
            _ => {}
        }
    }
    if gclk_brk && wire.starts_with("GCLK") && !wire.ends_with("_BRK") {
        return format!("{wire}_BRK");
    }
    wire.to_string()
}

fn init_routing_tile(m: &mut FpgaModel, y: usize, x: usize) -> Result<(), ModelError> {
    let kind = m.tile(y, x).kind;
    let routing_io = kind == TileKind::IoRouting || kind == TileKind::RoutingIoL;
    let gclk_brk = kind == TileKind::RoutingBrk || kind == TileKind::BramRoutingBrk;

    // KEEP1
    for i in 0..LOGICIN_WIRES.len() {
        m.add_switch(y, x, "KEEP1_WIRE", &logicin_s(i, routing_io), false)?;
    }
    m.add_switch(y, x, "KEEP1_WIRE", "FAN_B", false)?;
    for i in 0..=1 {
        m.add_switch(y, x, "KEEP1_WIRE", &format!("CLK{i}"), false)?;
        m.add_switch(y, x, "KEEP1_WIRE", &format!("SR{i}"), false)?;
        m.add_switch(
            y, x,
            "KEEP1_WIRE",
            &routing_wirestr(&format!("GFAN{i}"), routing_io, gclk_brk),
            false,
        )?;
    }

    for i in 0..m.bitpos_catalogue().len() {
        let (from_str, to_str, is_bidir) = {
            let entry = &m.bitpos_catalogue()[i];
            catalogue_endpoints(kind, &entry.from, &entry.to, entry.bidir)
        };
        m.add_switch(y, x, &from_str, &to_str, is_bidir)?;
        if is_bidir {
            m.add_switch(y, x, &to_str, &from_str, true)?;
        }
    }
    if routing_io {
        // these fall back to regular unidir switches in the io tiles
        m.add_switch(y, x, "LOGICIN_B6", "INT_IOI_GFAN0", false)?;
        m.add_switch(y, x, "LOGICIN_B35", "INT_IOI_GFAN0", false)?;
        m.add_switch(y, x, "LOGICIN_B51", "INT_IOI_GFAN1", false)?;
        m.add_switch(y, x, "LOGICIN_B53", "INT_IOI_GFAN1", false)?;
    }
    for i in [20, 21, 28, 36, 44, 52, 60, 62] {
        m.add_switch(y, x, &format!("LOGICIN_B{i}"), &format!("LOGICIN{i}"), false)?;
    }
    Ok(())
}

fn init_routing_switches(m: &mut FpgaModel) -> Result<(), ModelError> {
    for x in 0..m.x_width {
        if !m.is_atx(XCheck::RoutingCol, x) {
            continue;
        }
        for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
            if m.is_aty(YCheck::RowHorizAxsymm | YCheck::ChipHorizRegs, y) {
                continue;
            }
            init_routing_tile(m, y, x)?;
        }
    }
    Ok(())
}
