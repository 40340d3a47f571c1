//! Device primitives and their instantiation (build phase 2).
//!
//! Ordering within a tile matters: callers address devices by
//! `(kind, type_idx)` where the index counts devices of one kind in
//! instantiation order, and the IOBM/IOBS order per site must match the
//! per-die sitename tables.

use crate::consts::*;
use crate::strarray::{StrIdx, STRIDX_NO_ENTRY};

use super::{FpgaModel, ModelError};

/// Logic devices M and L sit at type index 0, the X device at 1.
pub const DEV_LOGM: usize = 0;
pub const DEV_LOGX: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DevKind {
    Iob,
    Logic,
    Ilogic,
    Ologic,
    Iodelay,
    Bram16,
    Bram8,
    Macc,
    Pll,
    Dcm,
    Bufgmux,
    Bufio,
    BufioFb,
    Bufpll,
    BufpllMcb,
    Bufh,
    Bscan,
    Tieoff,
    OctCalibrate,
    Icap,
    SpiAccess,
    Startup,
    PostCrcInternal,
    SlaveSpi,
    SuspendSync,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IobSubtype {
    Iobm = 1,
    Iobs = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicSubtype {
    M = 1,
    L = 2,
    X = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BypassMux {
    I,
    O,
    T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IMux {
    I,
    IB,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slew {
    Slow,
    Fast,
    Quietio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suspend {
    LastVal,
    ThreeState,
    ThreeStatePullup,
    ThreeStatePulldown,
    ThreeStateKeeper,
    ThreeStateOctOn,
}

/// IOB configuration plus the interned pin names of the pad site.
#[derive(Debug, Clone)]
pub struct IobConfig {
    pub subtype: IobSubtype,
    pub istandard: Option<String>,
    pub ostandard: Option<String>,
    pub bypass_mux: Option<BypassMux>,
    pub i_mux: Option<IMux>,
    pub drive_strength: u8,
    pub slew: Option<Slew>,
    pub suspend: Option<Suspend>,
    pub in_term: Option<String>,
    pub out_term: Option<String>,
    pub o_used: bool,

    pub pinw_in_o: StrIdx,
    pub pinw_in_t: StrIdx,
    pub pinw_out_i: StrIdx,
    pub pinw_out_padout: StrIdx,
    pub pinw_in_diffi_in: StrIdx,
    pub pinw_in_diffo_in: StrIdx,
    pub pinw_out_diffo_out: StrIdx,
    pub pinw_out_pci_rdy: StrIdx,
}

impl IobConfig {
    fn new(subtype: IobSubtype) -> Self {
        Self {
            subtype,
            istandard: None,
            ostandard: None,
            bypass_mux: None,
            i_mux: None,
            drive_strength: 0,
            slew: None,
            suspend: None,
            in_term: None,
            out_term: None,
            o_used: false,
            pinw_in_o: STRIDX_NO_ENTRY,
            pinw_in_t: STRIDX_NO_ENTRY,
            pinw_out_i: STRIDX_NO_ENTRY,
            pinw_out_padout: STRIDX_NO_ENTRY,
            pinw_in_diffi_in: STRIDX_NO_ENTRY,
            pinw_in_diffo_in: STRIDX_NO_ENTRY,
            pinw_out_diffo_out: STRIDX_NO_ENTRY,
            pinw_out_pci_rdy: STRIDX_NO_ENTRY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LutPos {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
}

impl LutPos {
    pub const ALL: [LutPos; 4] = [LutPos::A, LutPos::B, LutPos::C, LutPos::D];

    pub fn letter(self) -> char {
        match self {
            LutPos::A => 'A',
            LutPos::B => 'B',
            LutPos::C => 'C',
            LutPos::D => 'D',
        }
    }
}

/// Per-position configuration of a logic slice.
#[derive(Debug, Clone, Default)]
pub struct LogicPosConfig {
    pub lut6: Option<String>,
    pub lut5: Option<String>,
    pub ff_used: bool,
    pub ff_mux: Option<String>,
    pub ff_srinit: Option<String>,
    pub cy0: Option<String>,
    pub out_used: bool,
}

#[derive(Debug, Clone)]
pub struct LogicConfig {
    pub subtype: LogicSubtype,
    pub pos: [LogicPosConfig; 4],
    pub clk_inv: bool,
    pub sync_attr: Option<String>,
    pub precyinit: Option<String>,
    pub cout_used: bool,

    pub pinw_in: [[StrIdx; 6]; 4],
    pub pinw_in_x: [StrIdx; 4],
    pub pinw_in_i: [StrIdx; 4],
    pub pinw_out: [StrIdx; 4],
    pub pinw_out_mux: [StrIdx; 4],
    pub pinw_out_q: [StrIdx; 4],
    pub pinw_in_clk: StrIdx,
    pub pinw_in_ce: StrIdx,
    pub pinw_in_sr: StrIdx,
    pub pinw_in_we: StrIdx,
    pub pinw_in_cin: StrIdx,
    pub pinw_out_cout: StrIdx,
}

impl LogicConfig {
    fn new(subtype: LogicSubtype) -> Self {
        Self {
            subtype,
            pos: Default::default(),
            clk_inv: false,
            sync_attr: None,
            precyinit: None,
            cout_used: false,
            pinw_in: [[STRIDX_NO_ENTRY; 6]; 4],
            pinw_in_x: [STRIDX_NO_ENTRY; 4],
            pinw_in_i: [STRIDX_NO_ENTRY; 4],
            pinw_out: [STRIDX_NO_ENTRY; 4],
            pinw_out_mux: [STRIDX_NO_ENTRY; 4],
            pinw_out_q: [STRIDX_NO_ENTRY; 4],
            pinw_in_clk: STRIDX_NO_ENTRY,
            pinw_in_ce: STRIDX_NO_ENTRY,
            pinw_in_sr: STRIDX_NO_ENTRY,
            pinw_in_we: STRIDX_NO_ENTRY,
            pinw_in_cin: STRIDX_NO_ENTRY,
            pinw_out_cout: STRIDX_NO_ENTRY,
        }
    }

    pub fn set_lut(&mut self, pos: LutPos, width: usize, expr: &str) {
        let slot = &mut self.pos[pos as usize];
        if width == 6 {
            slot.lut6 = Some(expr.to_string());
        } else {
            slot.lut5 = Some(expr.to_string());
        }
    }

    pub fn lut(&self, pos: LutPos, width: usize) -> Option<&str> {
        let slot = &self.pos[pos as usize];
        if width == 6 {
            slot.lut6.as_deref()
        } else {
            slot.lut5.as_deref()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum DeviceConfig {
    #[default]
    None,
    Iob(IobConfig),
    Logic(LogicConfig),
}

#[derive(Debug, Clone)]
pub struct Device {
    pub kind: DevKind,
    pub instantiated: bool,
    pub config: DeviceConfig,
}

impl Device {
    fn new(kind: DevKind) -> Self {
        Self {
            kind,
            instantiated: false,
            config: DeviceConfig::None,
        }
    }

    pub fn subtype(&self) -> Option<u8> {
        match &self.config {
            DeviceConfig::Iob(c) => Some(c.subtype as u8),
            DeviceConfig::Logic(c) => Some(c.subtype as u8),
            DeviceConfig::None => None,
        }
    }

    pub fn iob(&self) -> Option<&IobConfig> {
        match &self.config {
            DeviceConfig::Iob(c) => Some(c),
            _ => None,
        }
    }

    pub fn iob_mut(&mut self) -> Option<&mut IobConfig> {
        match &mut self.config {
            DeviceConfig::Iob(c) => Some(c),
            _ => None,
        }
    }

    pub fn logic(&self) -> Option<&LogicConfig> {
        match &self.config {
            DeviceConfig::Logic(c) => Some(c),
            _ => None,
        }
    }

    pub fn logic_mut(&mut self) -> Option<&mut LogicConfig> {
        match &mut self.config {
            DeviceConfig::Logic(c) => Some(c),
            _ => None,
        }
    }
}

fn add_dev(m: &mut FpgaModel, y: usize, x: usize, kind: DevKind) -> Result<(), ModelError> {
    m.tile_mut(y, x).devices.push(Device::new(kind));
    Ok(())
}

fn add_iob(m: &mut FpgaModel, y: usize, x: usize, subtype: IobSubtype) -> Result<(), ModelError> {
    let type_idx = m
        .tile(y, x)
        .devices
        .iter()
        .filter(|d| d.kind == DevKind::Iob)
        .count();
    let prefix = if y == TOP_OUTER_ROW {
        "TIOB"
    } else if y == m.y_height - BOT_OUTER_ROW {
        "BIOB"
    } else if x == LEFT_OUTER_COL {
        "LIOB"
    } else {
        "RIOB"
    };

    let mut cfg = IobConfig::new(subtype);
    cfg.pinw_in_o = m.add_connpt_name(y, x, &format!("{prefix}_O{type_idx}_PINW"))?.0;
    cfg.pinw_in_t = m.add_connpt_name(y, x, &format!("{prefix}_T{type_idx}_PINW"))?.0;
    cfg.pinw_out_i = m
        .add_connpt_name(y, x, &format!("{prefix}_IBUF{type_idx}_PINW"))?
        .0;
    cfg.pinw_out_padout = m
        .add_connpt_name(y, x, &format!("{prefix}_PADOUT{type_idx}"))?
        .0;
    cfg.pinw_in_diffi_in = m
        .add_connpt_name(y, x, &format!("{prefix}_DIFFI_IN{type_idx}"))?
        .0;
    cfg.pinw_in_diffo_in = m
        .add_connpt_name(y, x, &format!("{prefix}_DIFFO_IN{type_idx}"))?
        .0;
    cfg.pinw_out_diffo_out = m
        .add_connpt_name(y, x, &format!("{prefix}_DIFFO_OUT{type_idx}"))?
        .0;

    // The four pads closest to the central regs row carry the PCI
    // ready outputs under fixed names.
    let pci_rdy = if x == LEFT_OUTER_COL && y == m.center_y - CENTER_TOP_IOB_O && type_idx == 1 {
        "LIOB_TOP_PCI_RDY0".to_string()
    } else if x == LEFT_OUTER_COL && y == m.center_y + CENTER_BOT_IOB_O && type_idx == 0 {
        "LIOB_BOT_PCI_RDY0".to_string()
    } else if x == m.x_width - RIGHT_OUTER_O
        && y == m.center_y - CENTER_TOP_IOB_O
        && type_idx == 0
    {
        "RIOB_BOT_PCI_RDY0".to_string()
    } else if x == m.x_width - RIGHT_OUTER_O
        && y == m.center_y + CENTER_BOT_IOB_O
        && type_idx == 1
    {
        "RIOB_TOP_PCI_RDY1".to_string()
    } else {
        format!("{prefix}_PCI_RDY{type_idx}")
    };
    cfg.pinw_out_pci_rdy = m.add_connpt_name(y, x, &pci_rdy)?.0;

    let mut dev = Device::new(DevKind::Iob);
    dev.config = DeviceConfig::Iob(cfg);
    m.tile_mut(y, x).devices.push(dev);
    Ok(())
}

fn add_logic(
    m: &mut FpgaModel,
    y: usize,
    x: usize,
    subtype: LogicSubtype,
) -> Result<(), ModelError> {
    let mut dev = Device::new(DevKind::Logic);
    dev.config = DeviceConfig::Logic(LogicConfig::new(subtype));
    m.tile_mut(y, x).devices.push(dev);
    Ok(())
}

pub(super) fn init_devices(m: &mut FpgaModel) -> Result<(), ModelError> {
    // DCM, PLL
    for i in 0..m.cfg_rows {
        let mut y = TOP_IO_TILES + HALF_ROW - 1 + i * ROW_SIZE;
        if y > m.center_y {
            y += 1; // central regs
        }
        let x = m.center_x - CENTER_CMTPLL_O;
        if i % 2 == 1 {
            add_dev(m, y, x, DevKind::Dcm)?;
            add_dev(m, y, x, DevKind::Dcm)?;
        } else {
            add_dev(m, y, x, DevKind::Pll)?;
        }
    }

    // BSCAN
    add_dev(m, TOP_IO_TILES, m.x_width - RIGHT_IO_DEVS_O, DevKind::Bscan)?;
    add_dev(m, TOP_IO_TILES, m.x_width - RIGHT_IO_DEVS_O, DevKind::Bscan)?;

    // BSCAN, OCT_CALIBRATE
    add_dev(m, TOP_IO_TILES + 1, m.x_width - RIGHT_IO_DEVS_O, DevKind::Bscan)?;
    add_dev(m, TOP_IO_TILES + 1, m.x_width - RIGHT_IO_DEVS_O, DevKind::Bscan)?;
    add_dev(
        m,
        TOP_IO_TILES + 1,
        m.x_width - RIGHT_IO_DEVS_O,
        DevKind::OctCalibrate,
    )?;

    // ICAP, SPI_ACCESS, OCT_CALIBRATE
    let y = m.y_height - BOT_IO_TILES - 1;
    add_dev(m, y, m.x_width - RIGHT_IO_DEVS_O, DevKind::Icap)?;
    add_dev(m, y, m.x_width - RIGHT_IO_DEVS_O, DevKind::SpiAccess)?;
    add_dev(m, y, m.x_width - RIGHT_IO_DEVS_O, DevKind::OctCalibrate)?;

    // STARTUP, POST_CRC_INTERNAL, SLAVE_SPI, SUSPEND_SYNC
    let y = m.y_height - BOT_IO_TILES - 2;
    add_dev(m, y, m.x_width - RIGHT_IO_DEVS_O, DevKind::Startup)?;
    add_dev(m, y, m.x_width - RIGHT_IO_DEVS_O, DevKind::PostCrcInternal)?;
    add_dev(m, y, m.x_width - RIGHT_IO_DEVS_O, DevKind::SlaveSpi)?;
    add_dev(m, y, m.x_width - RIGHT_IO_DEVS_O, DevKind::SuspendSync)?;

    // BUFGMUX
    for _ in 0..16 {
        add_dev(m, m.center_y, m.center_x, DevKind::Bufgmux)?;
    }

    // BUFPLL, BUFPLL_MCB, BUFIO, BUFIO_FB at all four chip edges
    let corners = [
        (TOP_OUTER_ROW, m.center_x - CENTER_CMTPLL_O),
        (m.center_y, LEFT_OUTER_COL),
        (m.center_y, m.x_width - RIGHT_OUTER_O),
        (m.y_height - BOT_OUTER_ROW, m.center_x - CENTER_CMTPLL_O),
    ];
    for (y, x) in corners {
        add_dev(m, y, x, DevKind::Bufpll)?;
        add_dev(m, y, x, DevKind::Bufpll)?;
        add_dev(m, y, x, DevKind::BufpllMcb)?;
        for _ in 0..8 {
            add_dev(m, y, x, DevKind::Bufio)?;
            add_dev(m, y, x, DevKind::BufioFb)?;
        }
    }

    // BUFH in the hclk row of the center column
    for i in 0..m.cfg_rows {
        let mut y = TOP_IO_TILES + HALF_ROW + i * ROW_SIZE;
        if y > m.center_y {
            y += 1;
        }
        for _ in 0..32 {
            add_dev(m, y, m.center_x, DevKind::Bufh)?;
        }
    }

    // BRAM
    for x in 0..m.x_width {
        if !m.is_atx(XCheck::FabricBramCol, x) {
            continue;
        }
        for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
            if !m.tile(y, x).flags.contains(TileFlag::BramDev) {
                continue;
            }
            add_dev(m, y, x, DevKind::Bram16)?;
            add_dev(m, y, x, DevKind::Bram8)?;
            add_dev(m, y, x, DevKind::Bram8)?;
        }
    }

    // MACC
    for x in 0..m.x_width {
        if !m.is_atx(XCheck::FabricMaccCol, x) {
            continue;
        }
        for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
            if !m.tile(y, x).flags.contains(TileFlag::MaccDev) {
                continue;
            }
            add_dev(m, y, x, DevKind::Macc)?;
        }
    }

    // ILOGIC/OLOGIC/IODELAY, two sites per IO tile
    for x in LEFT_SIDE_WIDTH..m.x_width - RIGHT_SIDE_WIDTH {
        if !m.is_atx(XCheck::FabricLogicCol | XCheck::CenterLogicCol, x)
            || m.is_atx(XCheck::RoutingNoIo, x - 1)
        {
            continue;
        }
        for i in 0..=1 {
            for y in [TOP_IO_TILES + i, m.y_height - BOT_IO_TILES - i - 1] {
                for _ in 0..=1 {
                    add_dev(m, y, x, DevKind::Ilogic)?;
                    add_dev(m, y, x, DevKind::Ologic)?;
                    add_dev(m, y, x, DevKind::Iodelay)?;
                }
            }
        }
    }
    for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
        if m.is_aty(YCheck::LeftWired, y) {
            for _ in 0..=1 {
                add_dev(m, y, LEFT_IO_DEVS, DevKind::Ilogic)?;
                add_dev(m, y, LEFT_IO_DEVS, DevKind::Ologic)?;
                add_dev(m, y, LEFT_IO_DEVS, DevKind::Iodelay)?;
            }
        }
        if m.is_aty(YCheck::RightWired, y) {
            let x = m.x_width - RIGHT_IO_DEVS_O;
            for _ in 0..=1 {
                add_dev(m, y, x, DevKind::Ilogic)?;
                add_dev(m, y, x, DevKind::Ologic)?;
                add_dev(m, y, x, DevKind::Iodelay)?;
            }
        }
    }

    // IOB. The order of subtypes IOBM and IOBS must match the order in
    // the per-die sitename tables.
    for x in 0..m.x_width {
        if m.is_atx(XCheck::OuterLeft, x) {
            for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
                if !m.is_aty(YCheck::LeftWired, y) {
                    continue;
                }
                add_iob(m, y, x, IobSubtype::Iobm)?;
                add_iob(m, y, x, IobSubtype::Iobs)?;
            }
        }
        if m.is_atx(XCheck::OuterRight, x) {
            for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
                if !m.is_aty(YCheck::RightWired, y) {
                    continue;
                }
                add_iob(m, y, x, IobSubtype::Iobm)?;
                add_iob(m, y, x, IobSubtype::Iobs)?;
            }
        }
        if m.is_atx(XCheck::FabricLogicRoutingCol | XCheck::CenterRoutingCol, x)
            && !m.is_atx(XCheck::RoutingNoIo, x)
        {
            add_iob(m, TOP_OUTER_ROW, x, IobSubtype::Iobm)?;
            add_iob(m, TOP_OUTER_ROW, x, IobSubtype::Iobs)?;
            add_iob(m, TOP_OUTER_ROW, x, IobSubtype::Iobm)?;
            add_iob(m, TOP_OUTER_ROW, x, IobSubtype::Iobs)?;

            let y = m.y_height - BOT_OUTER_ROW;
            add_iob(m, y, x, IobSubtype::Iobm)?;
            add_iob(m, y, x, IobSubtype::Iobs)?;
            add_iob(m, y, x, IobSubtype::Iobs)?;
            add_iob(m, y, x, IobSubtype::Iobm)?;
        }
    }

    // TIEOFF
    add_dev(m, m.center_y, LEFT_OUTER_COL, DevKind::Tieoff)?;
    add_dev(m, m.center_y, m.x_width - RIGHT_OUTER_O, DevKind::Tieoff)?;
    add_dev(m, TOP_OUTER_ROW, m.center_x - 1, DevKind::Tieoff)?;
    add_dev(
        m,
        m.y_height - BOT_OUTER_ROW,
        m.center_x - CENTER_CMTPLL_O,
        DevKind::Tieoff,
    )?;

    for x in 0..m.x_width {
        if m.is_atx(XCheck::LeftIoDevsCol, x) {
            for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
                if m.is_aty(YCheck::LeftWired, y) {
                    add_dev(m, y, x, DevKind::Tieoff)?;
                }
            }
        }
        if m.is_atx(XCheck::RightIoDevsCol, x) {
            for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
                if m.is_aty(YCheck::RightWired, y) {
                    add_dev(m, y, x, DevKind::Tieoff)?;
                }
            }
        }
        if m.is_atx(XCheck::CenterCmtpllCol, x) {
            for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
                if m.tile(y, x).flags.contains(TileFlag::PllDev) {
                    add_dev(m, y, x, DevKind::Tieoff)?;
                }
            }
        }
        if m.is_atx(XCheck::RoutingCol, x) {
            for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
                if m.is_aty(YCheck::RowHorizAxsymm | YCheck::ChipHorizRegs, y) {
                    continue;
                }
                add_dev(m, y, x, DevKind::Tieoff)?;
            }
        }
        if m.is_atx(XCheck::FabricLogicCol | XCheck::CenterLogicCol, x)
            && x >= 1
            && !m.is_atx(XCheck::RoutingNoIo, x - 1)
        {
            for i in 0..=1 {
                add_dev(m, TOP_IO_TILES + i, x, DevKind::Tieoff)?;
                add_dev(m, m.y_height - BOT_IO_TILES - i - 1, x, DevKind::Tieoff)?;
            }
        }
    }

    // LOGIC
    for x in 0..m.x_width {
        if !m.is_atx(XCheck::FabricLogicCol | XCheck::CenterLogicCol, x) {
            continue;
        }
        for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
            if m.tile(y, x).flags.contains(TileFlag::LogicXmDev) {
                add_logic(m, y, x, LogicSubtype::M)?;
                add_logic(m, y, x, LogicSubtype::X)?;
            }
            if m.tile(y, x).flags.contains(TileFlag::LogicXlDev) {
                add_logic(m, y, x, LogicSubtype::L)?;
                add_logic(m, y, x, LogicSubtype::X)?;
            }
        }
    }
    Ok(())
}
