//! Device pin connection points (build phase 3).

use crate::consts::*;
use crate::strarray::STRIDX_NO_ENTRY;

use super::devices::{DevKind, DeviceConfig, LogicSubtype};
use super::{FpgaModel, ModelError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

fn add_connpt_2(
    m: &mut FpgaModel,
    y: usize,
    x: usize,
    base: &str,
    suffix1: &str,
    suffix2: &str,
) -> Result<(), ModelError> {
    m.add_connpt_name(y, x, &format!("{base}{suffix1}"))?;
    m.add_connpt_name(y, x, &format!("{base}{suffix2}"))?;
    Ok(())
}

fn init_iologic_ports(m: &mut FpgaModel, y: usize, x: usize, side: Side) -> Result<(), ModelError> {
    let prefix = match side {
        Side::Top => "TIOI",
        Side::Bottom => "BIOI",
        Side::Left => "LIOI",
        Side::Right => "RIOI",
    };
    // left and right sites pair master/slave devices; top and bottom
    // route the auxiliary pins over stubs
    let (suffix1, suffix2) = if matches!(side, Side::Left | Side::Right) {
        ("_M", "_S")
    } else {
        ("_STUB", "_S_STUB")
    };

    for i in 0..=23 {
        m.add_connpt_name(y, x, &format!("IOI_INTER_LOGICOUT{i}"))?;
    }
    m.add_connpt_name(y, x, &format!("{prefix}_GND_TIEOFF"))?;
    m.add_connpt_name(y, x, &format!("{prefix}_VCC_TIEOFF"))?;
    m.add_connpt_name(y, x, &format!("{prefix}_KEEP1_STUB"))?;
    for i in 0..=4 {
        add_connpt_2(m, y, x, &format!("AUXADDR{i}_IODELAY"), suffix1, suffix2)?;
    }
    add_connpt_2(m, y, x, "AUXSDOIN_IODELAY", suffix1, suffix2)?;
    add_connpt_2(m, y, x, "AUXSDO_IODELAY", suffix1, suffix2)?;
    add_connpt_2(m, y, x, "MEMUPDATE_IODELAY", suffix1, suffix2)?;

    m.add_connpt_name(y, x, "OUTN_IODELAY_SITE")?;
    m.add_connpt_name(y, x, "STUB_OUTN_IODELAY_S")?;
    m.add_connpt_name(y, x, "OUTP_IODELAY_SITE")?;
    m.add_connpt_name(y, x, "STUB_OUTP_IODELAY_S")?;

    for i in 1..=4 {
        add_connpt_2(m, y, x, &format!("Q{i}_ILOGIC_SITE"), "", "_S")?;
        add_connpt_2(m, y, x, &format!("D{i}_OLOGIC_SITE"), "", "_S")?;
        add_connpt_2(m, y, x, &format!("T{i}_OLOGIC_SITE"), "", "_S")?;
        add_connpt_2(m, y, x, &format!("SHIFTIN{i}_OLOGIC_SITE"), "", "_S")?;
        add_connpt_2(m, y, x, &format!("SHIFTOUT{i}_OLOGIC_SITE"), "", "_S")?;
    }
    for i in 0..=1 {
        add_connpt_2(m, y, x, &format!("CFB{i}_ILOGIC_SITE"), "", "_S")?;
        add_connpt_2(m, y, x, &format!("CLK{i}_ILOGIC_SITE"), "", "_S")?;
        add_connpt_2(m, y, x, &format!("CLK{i}_OLOGIC_SITE"), "", "_S")?;
    }

    const SITE_PINS: [&str; 45] = [
        "BITSLIP_ILOGIC_SITE",
        "BUSY_IODELAY_SITE",
        "CAL_IODELAY_SITE",
        "CE0_ILOGIC_SITE",
        "CE_IODELAY_SITE",
        "CIN_IODELAY_SITE",
        "CLKDIV_ILOGIC_SITE",
        "CLKDIV_OLOGIC_SITE",
        "CLK_IODELAY_SITE",
        "DATAOUT_IODELAY_SITE",
        "DDLY2_ILOGIC_SITE",
        "DDLY_ILOGIC_SITE",
        "DFB_ILOGIC_SITE",
        "D_ILOGIC_IDATAIN_IODELAY",
        "D_ILOGIC_SITE",
        "DOUT_IODELAY_SITE",
        "FABRICOUT_ILOGIC_SITE",
        "IDATAIN_IODELAY_SITE",
        "INCDEC_ILOGIC_SITE",
        "INC_IODELAY_SITE",
        "IOCE_ILOGIC_SITE",
        "IOCE_OLOGIC_SITE",
        "IOCLK1_IODELAY_SITE",
        "IOCLK_IODELAY_SITE",
        "LOAD_IODELAY_SITE",
        "OCE_OLOGIC_SITE",
        "ODATAIN_IODELAY_SITE",
        "OFB_ILOGIC_SITE",
        "OQ_OLOGIC_SITE",
        "RCLK_IODELAY_SITE",
        "READEN_IODELAY_UNUSED_SITE",
        "REV_ILOGIC_SITE",
        "REV_OLOGIC_SITE",
        "RST_IODELAY_SITE",
        "SHIFTIN_ILOGIC_SITE",
        "SHIFTOUT_ILOGIC_SITE",
        "SR_ILOGIC_SITE",
        "SR_OLOGIC_SITE",
        "TCE_OLOGIC_SITE",
        "TFB_ILOGIC_SITE",
        "T_IODELAY_SITE",
        "TOUT_IODELAY_SITE",
        "TQ_OLOGIC_SITE",
        "TRAIN_OLOGIC_SITE",
        "VALID_ILOGIC_SITE",
    ];
    for pin in SITE_PINS {
        add_connpt_2(m, y, x, pin, "", "_S")?;
    }
    m.add_connpt_name(y, x, "DATAOUT2_IODELAY_SITE")?;
    m.add_connpt_name(y, x, "DATAOUT2_IODELAY2_SITE_S")?;

    for i in 0..=2 {
        add_connpt_2(m, y, x, &format!("IOI_CLK{i}INTER"), "_M", "_S")?;
    }
    for i in 0..=1 {
        add_connpt_2(m, y, x, &format!("IOI_CLKDIST_IOCE{i}"), "_M", "_S")?;
    }
    add_connpt_2(m, y, x, "IOI_CLKDIST_CLK0_ILOGIC", "_M", "_S")?;
    add_connpt_2(m, y, x, "IOI_CLKDIST_CLK0_OLOGIC", "_M", "_S")?;
    add_connpt_2(m, y, x, "IOI_CLKDIST_CLK1", "_M", "_S")?;

    if matches!(side, Side::Top | Side::Bottom) {
        for base in [
            "IOI_MCB_DQIEN",
            "IOI_MCB_INBYP",
            "IOI_MCB_IN",
            "IOI_MCB_OUTN",
            "IOI_MCB_OUTP",
        ] {
            add_connpt_2(m, y, x, base, "_M", "_S")?;
        }
        for pin in [
            "IOI_MCB_DRPADD",
            "IOI_MCB_DRPBROADCAST",
            "IOI_MCB_DRPCLK",
            "IOI_MCB_DRPCS",
            "IOI_MCB_DRPSDI",
            "IOI_MCB_DRPSDO",
            "IOI_MCB_DRPTRAIN",
        ] {
            m.add_connpt_name(y, x, pin)?;
        }
    }
    Ok(())
}

fn init_bram_ports(m: &mut FpgaModel, y: usize, x: usize) -> Result<(), ModelError> {
    // pass 0 is the ramb16, passes 1 and 2 the two ramb8 halves
    const PASS: [&str; 3] = ["RAMB16BWER", "RAMB8BWER_0", "RAMB8BWER_1"];
    for (pass, pre) in PASS.iter().enumerate() {
        for port in ['A', 'B'] {
            m.add_connpt_name(y, x, &format!("{pre}_CLK{port}"))?;
            m.add_connpt_name(y, x, &format!("{pre}_EN{port}"))?;
            m.add_connpt_name(y, x, &format!("{pre}_REGCE{port}"))?;
            m.add_connpt_name(y, x, &format!("{pre}_RST{port}"))?;
            let par_max = if pass == 0 { 3 } else { 1 };
            for k in 0..=par_max {
                m.add_connpt_name(y, x, &format!("{pre}_DIP{port}{k}"))?;
                m.add_connpt_name(y, x, &format!("{pre}_DOP{port}{k}"))?;
                m.add_connpt_name(y, x, &format!("{pre}_WE{port}{k}"))?;
            }
            let addr_max = if pass == 0 { 13 } else { 12 };
            for k in 0..=addr_max {
                m.add_connpt_name(y, x, &format!("{pre}_ADDR{port}{k}"))?;
            }
            let data_max = if pass == 0 { 31 } else { 15 };
            for k in 0..=data_max {
                m.add_connpt_name(y, x, &format!("{pre}_DI{port}{k}"))?;
                m.add_connpt_name(y, x, &format!("{pre}_DO{port}{k}"))?;
            }
        }
    }
    Ok(())
}

fn init_macc_ports(m: &mut FpgaModel, y: usize, x: usize) -> Result<(), ModelError> {
    let (row_num, row_pos) = m.is_in_row(y);
    // the cascade inputs only exist on the bottom-most site
    if row_num == 0 && row_pos == LAST_POS_IN_ROW {
        m.add_connpt_name(y, x, "CARRYIN_DSP48A1_SITE")?;
        for i in 0..=47 {
            m.add_connpt_name(y, x, &format!("PCIN{i}_DSP48A1_SITE"))?;
        }
    }
    m.add_connpt_name(y, x, "CLK_DSP48A1_SITE")?;
    m.add_connpt_name(y, x, "CARRYOUT_DSP48A1_SITE")?;
    m.add_connpt_name(y, x, "CARRYOUTF_DSP48A1_SITE")?;
    for pre in ["CE", "RST"] {
        m.add_connpt_name(y, x, &format!("{pre}CARRYIN_DSP48A1_SITE"))?;
        for seq in ["A", "B", "C", "D", "M", "P", "OPMODE"] {
            m.add_connpt_name(y, x, &format!("{pre}{seq}_DSP48A1_SITE"))?;
        }
    }
    for i in 0..=17 {
        m.add_connpt_name(y, x, &format!("A{i}_DSP48A1_SITE"))?;
        m.add_connpt_name(y, x, &format!("B{i}_DSP48A1_SITE"))?;
        m.add_connpt_name(y, x, &format!("D{i}_DSP48A1_SITE"))?;
        m.add_connpt_name(y, x, &format!("BCOUT{i}_DSP48A1_SITE"))?;
    }
    for i in 0..=47 {
        m.add_connpt_name(y, x, &format!("C{i}_DSP48A1_SITE"))?;
        m.add_connpt_name(y, x, &format!("P{i}_DSP48A1_SITE"))?;
        m.add_connpt_name(y, x, &format!("PCOUT{i}_DSP48A1_SITE"))?;
    }
    for i in 0..=35 {
        m.add_connpt_name(y, x, &format!("M{i}_DSP48A1_SITE"))?;
    }
    for i in 0..=7 {
        m.add_connpt_name(y, x, &format!("OPMODE{i}_DSP48A1_SITE"))?;
    }
    Ok(())
}

fn init_logic_ports(m: &mut FpgaModel, y: usize, x: usize) -> Result<(), ModelError> {
    let num_devs = m.tile(y, x).devices.len();
    for dev_i in 0..num_devs {
        let subtype = match &m.tile(y, x).devices[dev_i].config {
            DeviceConfig::Logic(cfg) => cfg.subtype,
            _ => continue,
        };
        let pre = match subtype {
            LogicSubtype::M => "M",
            LogicSubtype::L => "L",
            LogicSubtype::X => {
                if m.tile(y, x).flags.contains(TileFlag::LogicXlDev) {
                    "XX"
                } else {
                    "X"
                }
            }
        };

        let mut pinw_in = [[STRIDX_NO_ENTRY; 6]; 4];
        let mut pinw_in_x = [STRIDX_NO_ENTRY; 4];
        let mut pinw_in_i = [STRIDX_NO_ENTRY; 4];
        let mut pinw_out = [STRIDX_NO_ENTRY; 4];
        let mut pinw_out_mux = [STRIDX_NO_ENTRY; 4];
        let mut pinw_out_q = [STRIDX_NO_ENTRY; 4];
        for (i, pos) in ['A', 'B', 'C', 'D'].into_iter().enumerate() {
            for j in 0..6 {
                pinw_in[i][j] = m.add_connpt_name(y, x, &format!("{pre}_{pos}{}", j + 1))?.0;
            }
            pinw_in_x[i] = m.add_connpt_name(y, x, &format!("{pre}_{pos}X"))?.0;
            if subtype == LogicSubtype::M {
                pinw_in_i[i] = m.add_connpt_name(y, x, &format!("{pre}_{pos}I"))?.0;
            }
            pinw_out[i] = m.add_connpt_name(y, x, &format!("{pre}_{pos}"))?.0;
            pinw_out_mux[i] = m.add_connpt_name(y, x, &format!("{pre}_{pos}MUX"))?.0;
            pinw_out_q[i] = m.add_connpt_name(y, x, &format!("{pre}_{pos}Q"))?.0;
        }
        let pinw_in_clk = m.add_connpt_name(y, x, &format!("{pre}_CLK"))?.0;
        let pinw_in_ce = m.add_connpt_name(y, x, &format!("{pre}_CE"))?.0;
        let pinw_in_sr = m.add_connpt_name(y, x, &format!("{pre}_SR"))?.0;
        let pinw_in_we = if subtype == LogicSubtype::M {
            m.add_connpt_name(y, x, &format!("{pre}_WE"))?.0
        } else {
            STRIDX_NO_ENTRY
        };

        let no_io = m.is_atx(XCheck::RoutingNoIo, x - 1);
        let has_cin = subtype != LogicSubtype::X
            && ((no_io && m.is_aty(YCheck::InnerBottom, y + 1))
                || (!no_io && m.is_aty(YCheck::BotInnerIo, y + 1)));
        let pinw_in_cin = if has_cin {
            m.add_connpt_name(y, x, &format!("{pre}_CIN"))?.0
        } else {
            STRIDX_NO_ENTRY
        };
        let pinw_out_cout = match subtype {
            LogicSubtype::M => m.add_connpt_name(y, x, "M_COUT")?.0,
            LogicSubtype::L => m.add_connpt_name(y, x, "XL_COUT")?.0,
            LogicSubtype::X => STRIDX_NO_ENTRY,
        };

        if let DeviceConfig::Logic(cfg) = &mut m.tile_mut(y, x).devices[dev_i].config {
            cfg.pinw_in = pinw_in;
            cfg.pinw_in_x = pinw_in_x;
            cfg.pinw_in_i = pinw_in_i;
            cfg.pinw_out = pinw_out;
            cfg.pinw_out_mux = pinw_out_mux;
            cfg.pinw_out_q = pinw_out_q;
            cfg.pinw_in_clk = pinw_in_clk;
            cfg.pinw_in_ce = pinw_in_ce;
            cfg.pinw_in_sr = pinw_in_sr;
            cfg.pinw_in_we = pinw_in_we;
            cfg.pinw_in_cin = pinw_in_cin;
            cfg.pinw_out_cout = pinw_out_cout;
        }
    }
    Ok(())
}

pub(super) fn init_ports(m: &mut FpgaModel) -> Result<(), ModelError> {
    // ILOGIC/OLOGIC/IODELAY sites
    for x in LEFT_SIDE_WIDTH..m.x_width - RIGHT_SIDE_WIDTH {
        for y in [TOP_OUTER_IO, TOP_INNER_IO] {
            if m.has_device(y, x, DevKind::Ilogic) {
                init_iologic_ports(m, y, x, Side::Top)?;
            }
        }
        for y in [m.y_height - BOT_INNER_IO, m.y_height - BOT_OUTER_IO] {
            if m.has_device(y, x, DevKind::Ilogic) {
                init_iologic_ports(m, y, x, Side::Bottom)?;
            }
        }
    }
    for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
        if m.has_device(y, LEFT_IO_DEVS, DevKind::Ilogic) {
            init_iologic_ports(m, y, LEFT_IO_DEVS, Side::Left)?;
        }
        if m.has_device(y, m.x_width - RIGHT_IO_DEVS_O, DevKind::Ilogic) {
            init_iologic_ports(m, y, m.x_width - RIGHT_IO_DEVS_O, Side::Right)?;
        }
    }

    for x in 0..m.x_width {
        if m.is_atx(XCheck::RoutingCol, x) {
            for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
                if m.is_aty(YCheck::RowHorizAxsymm | YCheck::ChipHorizRegs, y) {
                    continue;
                }
                m.add_connpt_name(y, x, "VCC_WIRE")?;
                m.add_connpt_name(y, x, "GND_WIRE")?;
                m.add_connpt_name(y, x, "KEEP1_WIRE")?;
                m.add_connpt_name(y, x, "FAN")?;
                m.add_connpt_name(y, x, "FAN_B")?;
                if !m.is_atyx(YxCheck::IoRouting, y, x) {
                    m.add_connpt_name(y, x, "GFAN0")?;
                    m.add_connpt_name(y, x, "GFAN1")?;
                } else if !m.is_atx(XCheck::CenterRoutingCol, x)
                    || m.is_aty(YCheck::TopbotIoRange, y)
                {
                    m.add_connpt_name(y, x, "INT_IOI_LOGICIN_B4")?;
                    m.add_connpt_name(y, x, "INT_IOI_LOGICIN_B10")?;
                }
            }
        }
        if m.is_atx(XCheck::FabricBramCol, x) {
            for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
                if m.tile(y, x).flags.contains(TileFlag::BramDev) {
                    init_bram_ports(m, y, x)?;
                }
            }
        }
        if m.is_atx(XCheck::FabricMaccCol, x) {
            for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
                if m.tile(y, x).flags.contains(TileFlag::MaccDev) {
                    init_macc_ports(m, y, x)?;
                }
            }
        }
        if m.is_atx(XCheck::LogicCol, x) {
            for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
                if !(m.tile(y, x).flags
                    & (TileFlag::LogicXmDev | TileFlag::LogicXlDev))
                    .is_empty()
                {
                    init_logic_ports(m, y, x)?;
                }
            }
        }
    }
    Ok(())
}
