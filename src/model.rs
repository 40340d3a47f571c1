//! The in-memory device model: a grid of tiles carrying devices, named
//! connection points, inter-tile wires and programmable switches.
//!
//! A model is built once by [`FpgaModel::xc6slx9`] (or
//! [`FpgaModel::build`] for explicit descriptors) and mutated afterwards
//! only through the explicit device/switch APIs. Construction runs a
//! strict phase sequence: tiles, devices, ports, wires, switches; later
//! phases read but never rewrite the output of earlier ones.

use flagset::FlagSet;
use thiserror::Error;

use crate::consts::*;
use crate::parts::{self, IobSide, RoutingBitPos};
use crate::strarray::{HashedStrarray, InternError, StrIdx, STRIDX_64K, STRIDX_NO_ENTRY};

mod conns;
mod devices;
mod ports;
mod switches;
mod tiles;

pub use devices::{
    BypassMux, DevKind, Device, DeviceConfig, IMux, IobConfig, IobSubtype, LogicConfig,
    LogicPosConfig, LogicSubtype, LutPos, Slew, Suspend, DEV_LOGM, DEV_LOGX,
};
pub(crate) use switches::catalogue_endpoints;
pub use switches::{LOGICIN_WIRES, LOGICOUT_WIRES};

/// Index of a switch within its tile's switch list.
pub type SwIdx = u16;

const SWITCH_ON: u32 = 0x8000_0000;
const SWITCH_BIDIRECTIONAL: u32 = 0x4000_0000;
const SWITCH_MAX_CONNPT_O: u32 = 0x7FFF;

/// Direction selector for switch queries: look at the driving side or
/// the driven side of a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwDir {
    From,
    To,
}

impl SwDir {
    fn flip(self) -> SwDir {
        match self {
            SwDir::From => SwDir::To,
            SwDir::To => SwDir::From,
        }
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Intern(#[from] InternError),
    #[error("unknown wire {0:?}")]
    UnknownWire(String),
    #[error("no connection point {name:?} in tile y{y} x{x}")]
    NoConnPoint { y: usize, x: usize, name: String },
    #[error("connection point index overflow in tile y{y} x{x}")]
    ConnPointOverflow { y: usize, x: usize },
    #[error("duplicate switch {from}->{to} in tile y{y} x{x}")]
    DuplicateSwitch {
        y: usize,
        x: usize,
        from: String,
        to: String,
    },
    #[error("switch chain depth exceeded in tile y{y} x{x}")]
    ChainDepth { y: usize, x: usize },
    #[error("no device {kind:?} index {type_idx} in tile y{y} x{x}")]
    NoDevice {
        y: usize,
        x: usize,
        kind: DevKind,
        type_idx: usize,
    },
    #[error("unexpected column descriptor character {0:?}")]
    BadDescriptor(char),
    #[error("wiring string must hold 16 characters per row")]
    BadWiring,
}

/// One grid cell of the fabric.
#[derive(Debug, Clone, Default)]
pub struct Tile {
    pub kind: TileKind,
    pub flags: FlagSet<TileFlag>,
    pub devices: Vec<Device>,
    // (dests_offset, name); offsets are non-decreasing, the last entry's
    // destinations extend to the end of conn_point_dests
    conn_point_names: Vec<(u16, StrIdx)>,
    // (dest_x, dest_y, dest_name)
    conn_point_dests: Vec<(u16, u16, StrIdx)>,
    // packed: bit31 on, bit30 bidir, bits 29:15 from, 14:0 to
    switches: Vec<u32>,
}

impl Tile {
    pub fn num_conn_points(&self) -> usize {
        self.conn_point_names.len()
    }

    pub fn num_conn_dests(&self) -> usize {
        self.conn_point_dests.len()
    }

    pub fn num_switches(&self) -> usize {
        self.switches.len()
    }

    /// Connection points in insertion order as `(dests_offset, name)`.
    pub fn conn_points(&self) -> impl Iterator<Item = (usize, StrIdx)> + '_ {
        self.conn_point_names
            .iter()
            .map(|&(o, n)| (usize::from(o), n))
    }

    /// All destination records as `(dest_x, dest_y, dest_name)`.
    pub fn conn_dests(&self) -> impl Iterator<Item = (usize, usize, StrIdx)> + '_ {
        self.conn_point_dests
            .iter()
            .map(|&(x, y, n)| (usize::from(x), usize::from(y), n))
    }

    fn connpt_index_of(&self, name: StrIdx) -> Option<usize> {
        // searching backwards is a little faster during model building
        self.conn_point_names
            .iter()
            .rposition(|&(_, n)| n == name)
    }

    fn switch_conn_o(&self, sw: u32, dir: SwDir) -> usize {
        match dir {
            SwDir::From => ((sw >> 15) & SWITCH_MAX_CONNPT_O) as usize,
            SwDir::To => (sw & SWITCH_MAX_CONNPT_O) as usize,
        }
    }

    fn switch_name(&self, idx: SwIdx, dir: SwDir) -> StrIdx {
        let conn_o = self.switch_conn_o(self.switches[usize::from(idx)], dir);
        self.conn_point_names[conn_o].1
    }
}

/// Expansion point of a wire net: a name pattern (`%i` is replaced by a
/// running count), the count start, and the tile holding the wire.
#[derive(Debug, Clone)]
pub struct WPoint {
    pub name: String,
    pub start_count: usize,
    pub y: usize,
    pub x: usize,
}

impl WPoint {
    pub fn new(name: &str, start_count: usize, y: usize, x: usize) -> Self {
        Self {
            name: name.to_string(),
            start_count,
            y,
            x,
        }
    }
}

/// A builder-time wire net: every pair of expanded points is connected.
/// `last_inc == 0` disables `%i` expansion; otherwise the counts run
/// from `start_count` to `start_count + last_inc` inclusive.
#[derive(Debug, Clone, Default)]
pub struct WNet {
    pub last_inc: usize,
    pub pts: Vec<WPoint>,
}

/// OR into `start2` of [`FpgaModel::add_conn_range`] to enumerate the
/// second name downward from the start count.
pub const COUNT_DOWN: usize = 0x100;
const COUNT_MASK: usize = 0xFF;

pub(crate) fn expand_name(pattern: &str, count: usize) -> String {
    match pattern.find("%i") {
        Some(pos) => format!("{}{}{}", &pattern[..pos], count, &pattern[pos + 2..]),
        None => pattern.to_string(),
    }
}

/// A group of programmed switches extracted from one bitstream.
#[derive(Debug, Clone, Default)]
pub struct Net {
    pub switches: Vec<(usize, usize, SwIdx)>,
}

/// The model handle: chip geometry, the tile grid, the string interner
/// and the routing switch bit-position catalogue.
pub struct FpgaModel {
    pub cfg_rows: usize,
    cfg_columns: String,
    cfg_left_wiring: String,
    cfg_right_wiring: String,

    pub x_width: usize,
    pub y_height: usize,
    pub center_x: usize,
    pub center_y: usize,
    // Left and right gclk separators sit on the device column of the
    // logic or bram/macc column marked with 'g' in cfg_columns.
    pub left_gclk_sep_x: usize,
    pub right_gclk_sep_x: usize,

    tiles: Vec<Tile>,
    names: HashedStrarray,
    x_major: Vec<Option<usize>>,
    bitpos: Vec<RoutingBitPos>,
    nets: Vec<Net>,
}

pub const XC6SLX9_ROWS: usize = 4;
pub const XC6SLX9_COLUMNS: &str = "M L Bg M L D M R M Ln M L Bg M L";
pub const XC6SLX9_LEFT_WIRING: &str = concat!(
    /* row 3 */ "UWUWUWUW", "WWWWUUUU", /* row 2 */ "UUUUUUUU", "WWWWWWUU",
    /* row 1 */ "WWWUUWUU", "WUUWUUWU", /* row 0 */ "UWUUWUUW", "UUWWWWUU"
);
pub const XC6SLX9_RIGHT_WIRING: &str = concat!(
    /* row 3 */ "UUWWUWUW", "WWWWUUUU", /* row 2 */ "UUUUUUUU", "WWWWWWUU",
    /* row 1 */ "WWWUUWUU", "WUUWUUWU", /* row 0 */ "UWUUWUUW", "UUWWWWUU"
);

impl FpgaModel {
    /// Builds the model of the supported die with the built-in routing
    /// switch catalogue.
    pub fn xc6slx9() -> Result<Self, ModelError> {
        Self::build(
            XC6SLX9_ROWS,
            XC6SLX9_COLUMNS,
            XC6SLX9_LEFT_WIRING,
            XC6SLX9_RIGHT_WIRING,
        )
    }

    pub fn build(
        cfg_rows: usize,
        columns: &str,
        left_wiring: &str,
        right_wiring: &str,
    ) -> Result<Self, ModelError> {
        Self::build_with_bitpos(
            cfg_rows,
            columns,
            left_wiring,
            right_wiring,
            parts::builtin_routing_bitpos(),
        )
    }

    /// Builds a model against an externally loaded switch bit-position
    /// catalogue.
    pub fn build_with_bitpos(
        cfg_rows: usize,
        columns: &str,
        left_wiring: &str,
        right_wiring: &str,
        bitpos: Vec<RoutingBitPos>,
    ) -> Result<Self, ModelError> {
        if left_wiring.len() < cfg_rows * 16 || right_wiring.len() < cfg_rows * 16 {
            return Err(ModelError::BadWiring);
        }
        let mut model = FpgaModel {
            cfg_rows,
            cfg_columns: columns.to_string(),
            cfg_left_wiring: left_wiring.to_string(),
            cfg_right_wiring: right_wiring.to_string(),
            x_width: 0,
            y_height: 0,
            center_x: 0,
            center_y: 0,
            left_gclk_sep_x: 0,
            right_gclk_sep_x: 0,
            tiles: Vec::new(),
            names: HashedStrarray::new(STRIDX_64K),
            x_major: Vec::new(),
            bitpos,
            nets: Vec::new(),
        };

        // The order of tiles, then devices, then ports, then wires and
        // finally switches matters so each phase can build on the
        // previous one.
        tiles::init_tiles(&mut model)?;
        devices::init_devices(&mut model)?;
        ports::init_ports(&mut model)?;
        conns::init_conns(&mut model)?;
        switches::init_switches(&mut model)?;
        Ok(model)
    }

    pub fn tile(&self, y: usize, x: usize) -> &Tile {
        &self.tiles[y * self.x_width + x]
    }

    pub fn tile_mut(&mut self, y: usize, x: usize) -> &mut Tile {
        &mut self.tiles[y * self.x_width + x]
    }

    /// All tiles with their coordinates, row-major.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (usize, usize, &Tile)> {
        let w = self.x_width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, t)| (i / w, i % w, t))
    }

    pub fn strings(&self) -> &HashedStrarray {
        &self.names
    }

    pub fn wire_name(&self, idx: StrIdx) -> &str {
        self.names.lookup(idx).unwrap_or("")
    }

    pub fn wire_idx(&self, name: &str) -> Option<StrIdx> {
        self.names.find(name)
    }

    pub(crate) fn intern(&mut self, name: &str) -> Result<StrIdx, ModelError> {
        Ok(self.names.add(name)?)
    }

    /// FAR major column of tile column `x`, if the column carries
    /// configuration frames.
    pub fn x_major(&self, x: usize) -> Option<usize> {
        self.x_major.get(x).copied().flatten()
    }

    pub fn bitpos_catalogue(&self) -> &[RoutingBitPos] {
        &self.bitpos
    }

    pub fn nets(&self) -> &[Net] {
        &self.nets
    }

    pub fn nets_mut(&mut self) -> &mut Vec<Net> {
        &mut self.nets
    }

    //
    // coordinate predicates
    //

    /// Row position inside its row-group: `(row_num, row_pos)` with
    /// both `-1` outside any row, `row_pos` 0..7 for the upper half, 8
    /// for the hclk, 9..16 for the lower half.
    pub fn is_in_row(&self, y: usize) -> (i32, i32) {
        if y < TOP_IO_TILES {
            return (-1, -1);
        }
        // normalize y to the beginning of rows
        let mut yy = y - TOP_IO_TILES;
        // distance to the central regs row, which is not in any row
        let dist_to_center = (self.cfg_rows / 2) * ROW_SIZE;
        if yy == dist_to_center {
            return (-1, -1);
        }
        if yy > dist_to_center {
            yy -= 1;
        }
        if yy >= self.cfg_rows * ROW_SIZE {
            return (-1, -1);
        }
        (
            (self.cfg_rows - yy / ROW_SIZE - 1) as i32,
            (yy % ROW_SIZE) as i32,
        )
    }

    pub fn which_row(&self, y: usize) -> i32 {
        self.is_in_row(y).0
    }

    pub fn pos_in_row(&self, y: usize) -> i32 {
        self.is_in_row(y).1
    }

    /// True if any of the row checks holds at `y`.
    pub fn is_aty(&self, check: impl Into<FlagSet<YCheck>>, y: usize) -> bool {
        let check = check.into();
        if y >= self.y_height {
            return false;
        }
        if check.contains(YCheck::InnerTop) && y == TOP_INNER_ROW {
            return true;
        }
        if check.contains(YCheck::InnerBottom) && y == self.y_height - BOT_INNER_ROW {
            return true;
        }
        if check.contains(YCheck::ChipHorizRegs) && y == self.center_y {
            return true;
        }
        if !(check & (YCheck::RowHorizAxsymm | YCheck::BottomOfRow)).is_empty() {
            let row_pos = self.pos_in_row(y);
            if check.contains(YCheck::RowHorizAxsymm) && row_pos == HCLK_POS {
                return true;
            }
            if check.contains(YCheck::BottomOfRow) && row_pos == LAST_POS_IN_ROW {
                return true;
            }
        }
        if check.contains(YCheck::LeftWired)
            && self.tile(y, LEFT_OUTER_COL).flags.contains(TileFlag::Wired)
        {
            return true;
        }
        if check.contains(YCheck::RightWired)
            && self
                .tile(y, self.x_width - RIGHT_OUTER_O)
                .flags
                .contains(TileFlag::Wired)
        {
            return true;
        }
        if check.contains(YCheck::TopbotIoRange)
            && ((y > TOP_INNER_ROW && y <= TOP_INNER_ROW + TOP_IO_TILES)
                || (y >= self.y_height - BOT_INNER_ROW - BOT_IO_TILES
                    && y < self.y_height - BOT_INNER_ROW))
        {
            return true;
        }
        if check.contains(YCheck::TopOuterIo) && y == TOP_OUTER_IO {
            return true;
        }
        if check.contains(YCheck::TopInnerIo) && y == TOP_INNER_IO {
            return true;
        }
        if check.contains(YCheck::BotInnerIo) && y == self.y_height - BOT_INNER_IO {
            return true;
        }
        if check.contains(YCheck::BotOuterIo) && y == self.y_height - BOT_OUTER_IO {
            return true;
        }
        false
    }

    /// True if any of the column checks holds at `x`.
    pub fn is_atx(&self, check: impl Into<FlagSet<XCheck>>, x: usize) -> bool {
        let check = check.into();
        if x >= self.x_width {
            return false;
        }
        let colflags = self.tile(0, x).flags;
        if check.contains(XCheck::OuterLeft) && x == 0 {
            return true;
        }
        if check.contains(XCheck::InnerLeft) && x == 1 {
            return true;
        }
        if check.contains(XCheck::InnerRight) && x == self.x_width - 2 {
            return true;
        }
        if check.contains(XCheck::OuterRight) && x == self.x_width - 1 {
            return true;
        }
        if check.contains(XCheck::RoutingCol)
            && (colflags.contains(TileFlag::FabricRoutingCol)
                || x == LEFT_IO_ROUTING
                || x == self.x_width - RIGHT_IO_ROUTING_O
                || x == self.center_x - CENTER_ROUTING_O)
        {
            return true;
        }
        if colflags.contains(TileFlag::FabricRoutingCol) {
            let via = self.tile(0, x + 1).flags;
            let dev = self.tile(0, x + 2).flags;
            if check.contains(XCheck::RoutingToBramCol)
                && via.contains(TileFlag::FabricBramMaccRoutingCol)
                && dev.contains(TileFlag::FabricBramCol)
            {
                return true;
            }
            if check.contains(XCheck::RoutingToMaccCol)
                && via.contains(TileFlag::FabricBramMaccRoutingCol)
                && dev.contains(TileFlag::FabricMaccCol)
            {
                return true;
            }
        }
        if check.contains(XCheck::RoutingNoIo) && colflags.contains(TileFlag::RoutingNoIo) {
            return true;
        }
        if check.contains(XCheck::RoutingHasIo)
            && colflags.contains(TileFlag::FabricRoutingCol)
            && !colflags.contains(TileFlag::RoutingNoIo)
        {
            return true;
        }
        if check.contains(XCheck::LogicCol)
            && (colflags.contains(TileFlag::FabricLogicCol)
                || x == self.center_x - CENTER_LOGIC_O)
        {
            return true;
        }
        if check.contains(XCheck::FabricRoutingCol)
            && colflags.contains(TileFlag::FabricRoutingCol)
        {
            return true;
        }
        if check.contains(XCheck::FabricLogicRoutingCol)
            && colflags.contains(TileFlag::FabricRoutingCol)
            && self.tile(0, x + 1).flags.contains(TileFlag::FabricLogicCol)
        {
            return true;
        }
        if check.contains(XCheck::FabricLogicCol) && colflags.contains(TileFlag::FabricLogicCol)
        {
            return true;
        }
        if check.contains(XCheck::FabricBramMaccRoutingCol)
            && colflags.contains(TileFlag::FabricBramMaccRoutingCol)
        {
            return true;
        }
        if check.contains(XCheck::FabricBramRoutingCol)
            && colflags.contains(TileFlag::FabricRoutingCol)
            && x + 2 < self.x_width
            && self
                .tile(0, x + 1)
                .flags
                .contains(TileFlag::FabricBramMaccRoutingCol)
            && self.tile(0, x + 2).flags.contains(TileFlag::FabricBramCol)
        {
            return true;
        }
        if check.contains(XCheck::FabricMaccRoutingCol)
            && colflags.contains(TileFlag::FabricRoutingCol)
            && x + 2 < self.x_width
            && self
                .tile(0, x + 1)
                .flags
                .contains(TileFlag::FabricBramMaccRoutingCol)
            && self.tile(0, x + 2).flags.contains(TileFlag::FabricMaccCol)
        {
            return true;
        }
        if check.contains(XCheck::FabricBramCol) && colflags.contains(TileFlag::FabricBramCol) {
            return true;
        }
        if check.contains(XCheck::FabricMaccCol) && colflags.contains(TileFlag::FabricMaccCol) {
            return true;
        }
        if check.contains(XCheck::CenterRoutingCol) && x == self.center_x - CENTER_ROUTING_O {
            return true;
        }
        if check.contains(XCheck::CenterLogicCol) && x == self.center_x - CENTER_LOGIC_O {
            return true;
        }
        if check.contains(XCheck::CenterCmtpllCol) && x == self.center_x - CENTER_CMTPLL_O {
            return true;
        }
        if check.contains(XCheck::CenterRegsCol) && x == self.center_x {
            return true;
        }
        if check.contains(XCheck::LeftIoRoutingCol) && x == LEFT_IO_ROUTING {
            return true;
        }
        if check.contains(XCheck::LeftIoDevsCol) && x == LEFT_IO_DEVS {
            return true;
        }
        if check.contains(XCheck::RightIoRoutingCol)
            && x == self.x_width - RIGHT_IO_ROUTING_O
        {
            return true;
        }
        if check.contains(XCheck::RightIoDevsCol) && x == self.x_width - RIGHT_IO_DEVS_O {
            return true;
        }
        if check.contains(XCheck::LeftSide) && x < self.center_x {
            return true;
        }
        if check.contains(XCheck::LeftMcb) && x == LEFT_MCB_COL {
            return true;
        }
        if check.contains(XCheck::RightMcb) && x == self.x_width - RIGHT_MCB_O {
            return true;
        }
        false
    }

    /// True if any of the combined checks holds at `(y, x)`.
    pub fn is_atyx(&self, check: impl Into<FlagSet<YxCheck>>, y: usize, x: usize) -> bool {
        let check = check.into();
        if y >= self.y_height || x >= self.x_width {
            return false;
        }
        if check.contains(YxCheck::RoutingTile)
            && (self.tile(0, x).flags.contains(TileFlag::FabricRoutingCol)
                || x == LEFT_IO_ROUTING
                || x == self.x_width - RIGHT_IO_ROUTING_O
                || x == self.center_x - CENTER_ROUTING_O)
        {
            let row_pos = self.pos_in_row(y);
            if row_pos >= 0 && row_pos != HCLK_POS {
                return true;
            }
        }
        let tile = self.tile(y, x);
        if check.contains(YxCheck::IoRouting)
            && (tile.kind == TileKind::IoRouting || tile.kind == TileKind::RoutingIoL)
        {
            return true;
        }
        if check.contains(YxCheck::DevIlogic) && self.has_device(y, x, DevKind::Ilogic) {
            return true;
        }
        if check.contains(YxCheck::DevOlogic) && self.has_device(y, x, DevKind::Ologic) {
            return true;
        }
        if check.contains(YxCheck::DevLogic) && self.has_device(y, x, DevKind::Logic) {
            return true;
        }
        false
    }

    //
    // devices
    //

    pub fn has_device(&self, y: usize, x: usize, kind: DevKind) -> bool {
        self.tile(y, x).devices.iter().any(|d| d.kind == kind)
    }

    pub fn has_device_type(&self, y: usize, x: usize, kind: DevKind, subtype: u8) -> bool {
        self.tile(y, x)
            .devices
            .iter()
            .any(|d| d.kind == kind && d.subtype() == Some(subtype))
    }

    /// The `type_idx`-th device of `kind` in the tile. Callers address
    /// devices by `(kind, type_idx)`; the index counts only devices of
    /// that kind, in instantiation order.
    pub fn device(&self, y: usize, x: usize, kind: DevKind, type_idx: usize) -> Option<&Device> {
        self.tile(y, x)
            .devices
            .iter()
            .filter(|d| d.kind == kind)
            .nth(type_idx)
    }

    pub fn device_mut(
        &mut self,
        y: usize,
        x: usize,
        kind: DevKind,
        type_idx: usize,
    ) -> Option<&mut Device> {
        self.tile_mut(y, x)
            .devices
            .iter_mut()
            .filter(|d| d.kind == kind)
            .nth(type_idx)
    }

    /// Locates an IOB device by pad site name, e.g. `"P48"`.
    pub fn find_iob(&self, sitename: &str) -> Option<(usize, usize, usize)> {
        let (side, xy, idx) = parts::find_iob(sitename)?;
        Some(match side {
            IobSide::Top => (TOP_OUTER_ROW, xy, idx),
            IobSide::Bottom => (self.y_height - BOT_OUTER_ROW, xy, idx),
            IobSide::Left => (xy, LEFT_OUTER_COL, idx),
            IobSide::Right => (xy, self.x_width - RIGHT_OUTER_O, idx),
        })
    }

    /// Pad site name of the IOB at `(y, x, type_idx)`.
    pub fn iob_sitename(&self, y: usize, x: usize, idx: usize) -> Option<&'static str> {
        let (side, xy) = if y == TOP_OUTER_ROW {
            (IobSide::Top, x)
        } else if y == self.y_height - BOT_OUTER_ROW {
            (IobSide::Bottom, x)
        } else if x == LEFT_OUTER_COL {
            (IobSide::Left, y)
        } else if x == self.x_width - RIGHT_OUTER_O {
            (IobSide::Right, y)
        } else {
            return None;
        };
        parts::iob_sitename(side, xy, idx)
    }

    //
    // connection points and wires
    //

    pub fn has_connpt(&self, y: usize, x: usize, name: &str) -> bool {
        match self.names.find(name) {
            Some(idx) => self.tile(y, x).connpt_index_of(idx).is_some(),
            None => false,
        }
    }

    /// Adds a named connection point to a tile, returning its name ID
    /// and position in the tile's list. Adding an existing name is a
    /// no-op apart from the returned position.
    pub(crate) fn add_connpt_name(
        &mut self,
        y: usize,
        x: usize,
        name: &str,
    ) -> Result<(StrIdx, usize), ModelError> {
        let name_i = self.intern(name)?;
        let w = self.x_width;
        let tile = &mut self.tiles[y * w + x];
        if let Some(pos) = tile.connpt_index_of(name_i) {
            return Ok((name_i, pos));
        }
        let pos = tile.conn_point_names.len();
        if pos as u32 > SWITCH_MAX_CONNPT_O {
            return Err(ModelError::ConnPointOverflow { y, x });
        }
        let dests_offset = tile.conn_point_dests.len() as u16;
        tile.conn_point_names.push((dests_offset, name_i));
        Ok((name_i, pos))
    }

    /// Adds the directed edge `(y1,x1,name1) -> (y2,x2,name2)`. The
    /// name is registered at the destination tile first so wire names
    /// are always resolvable at both ends.
    pub fn add_conn_uni(
        &mut self,
        y1: usize,
        x1: usize,
        name1: &str,
        y2: usize,
        x2: usize,
        name2: &str,
    ) -> Result<(), ModelError> {
        self.add_connpt_name(y2, x2, name2)?;
        let (_, conn_point_o) = self.add_connpt_name(y1, x1, name1)?;
        let name2_i = self.intern(name2)?;

        let w = self.x_width;
        let tile = &mut self.tiles[y1 * w + x1];
        let conn_start = usize::from(tile.conn_point_names[conn_point_o].0);
        let conn_end = match tile.conn_point_names.get(conn_point_o + 1) {
            Some(&(o, _)) => usize::from(o),
            None => tile.conn_point_dests.len(),
        };
        let dest = (x2 as u16, y2 as u16, name2_i);
        // a connection made a second time is dropped silently
        if tile.conn_point_dests[conn_start..conn_end].contains(&dest) {
            return Ok(());
        }
        tile.conn_point_dests.insert(conn_end, dest);
        for entry in &mut tile.conn_point_names[conn_point_o + 1..] {
            entry.0 += 1;
        }
        Ok(())
    }

    pub fn add_conn_bi(
        &mut self,
        y1: usize,
        x1: usize,
        name1: &str,
        y2: usize,
        x2: usize,
        name2: &str,
    ) -> Result<(), ModelError> {
        self.add_conn_uni(y1, x1, name1, y2, x2, name2)?;
        self.add_conn_uni(y2, x2, name2, y1, x1, name1)
    }

    /// Tile-type prefix applied to wire names by the `_pref` variants:
    /// central regs, hclk and inner term rows carry their own name
    /// spaces.
    pub(crate) fn wire_pref(&self, y: usize, x: usize) -> &'static str {
        if self.is_aty(YCheck::ChipHorizRegs, y) {
            if x + CENTER_ROUTING_O == self.center_x {
                "REGC_INT_"
            } else {
                "REGH_"
            }
        } else if self.is_aty(YCheck::RowHorizAxsymm, y) {
            "HCLK_"
        } else if self.is_aty(YCheck::InnerTop, y) {
            "IOI_TTERM_"
        } else if self.is_aty(YCheck::InnerBottom, y) {
            "IOI_BTERM_"
        } else {
            ""
        }
    }

    pub fn add_conn_uni_pref(
        &mut self,
        y1: usize,
        x1: usize,
        name1: &str,
        y2: usize,
        x2: usize,
        name2: &str,
    ) -> Result<(), ModelError> {
        let n1 = format!("{}{}", self.wire_pref(y1, x1), name1);
        let n2 = format!("{}{}", self.wire_pref(y2, x2), name2);
        self.add_conn_uni(y1, x1, &n1, y2, x2, &n2)
    }

    pub fn add_conn_bi_pref(
        &mut self,
        y1: usize,
        x1: usize,
        name1: &str,
        y2: usize,
        x2: usize,
        name2: &str,
    ) -> Result<(), ModelError> {
        let n1 = format!("{}{}", self.wire_pref(y1, x1), name1);
        let n2 = format!("{}{}", self.wire_pref(y2, x2), name2);
        self.add_conn_bi(y1, x1, &n1, y2, x2, &n2)
    }

    /// Connects `name1` counted over `[start1, last1]` against `name2`
    /// counted from `start2` (downward when `COUNT_DOWN` is or'ed in).
    #[allow(clippy::too_many_arguments)]
    pub fn add_conn_range(
        &mut self,
        bidir: bool,
        pref: bool,
        y1: usize,
        x1: usize,
        name1: &str,
        start1: usize,
        last1: usize,
        y2: usize,
        x2: usize,
        name2: &str,
        start2: usize,
    ) -> Result<(), ModelError> {
        let one = |m: &mut Self, n1: &str, n2: &str| -> Result<(), ModelError> {
            match (bidir, pref) {
                (true, true) => m.add_conn_bi_pref(y1, x1, n1, y2, x2, n2),
                (true, false) => m.add_conn_bi(y1, x1, n1, y2, x2, n2),
                (false, true) => m.add_conn_uni_pref(y1, x1, n1, y2, x2, n2),
                (false, false) => m.add_conn_uni(y1, x1, n1, y2, x2, n2),
            }
        };
        if last1 <= start1 {
            return one(self, name1, name2);
        }
        for i in start1..=last1 {
            let n1 = expand_name(name1, i);
            let n2 = if start2 & COUNT_DOWN != 0 {
                expand_name(name2, (start2 & COUNT_MASK) - (i - start1))
            } else {
                expand_name(name2, (start2 & COUNT_MASK) + (i - start1))
            };
            one(self, &n1, &n2)?;
        }
        Ok(())
    }

    /// Expands a wire net and connects every pair of its points.
    pub fn add_conn_net(&mut self, bidir: bool, pref: bool, net: &WNet) -> Result<(), ModelError> {
        for i in 0..net.pts.len() {
            for j in i + 1..net.pts.len() {
                let (a, b) = (&net.pts[i], &net.pts[j]);
                self.add_conn_range(
                    bidir,
                    pref,
                    a.y,
                    a.x,
                    &a.name.clone(),
                    a.start_count,
                    a.start_count + net.last_inc,
                    b.y,
                    b.x,
                    &b.name.clone(),
                    b.start_count,
                )?;
            }
        }
        Ok(())
    }

    /// Looks up a connection point and returns the range of its
    /// destination records.
    pub fn connpt_lookup(
        &self,
        y: usize,
        x: usize,
        name: &str,
    ) -> Result<(usize, usize), ModelError> {
        let name_i = self
            .names
            .find(name)
            .ok_or_else(|| ModelError::UnknownWire(name.to_string()))?;
        let tile = self.tile(y, x);
        let pos = tile
            .connpt_index_of(name_i)
            .ok_or_else(|| ModelError::NoConnPoint {
                y,
                x,
                name: name.to_string(),
            })?;
        let start = usize::from(tile.conn_point_names[pos].0);
        let end = match tile.conn_point_names.get(pos + 1) {
            Some(&(o, _)) => usize::from(o),
            None => tile.conn_point_dests.len(),
        };
        Ok((start, end - start))
    }

    /// One destination record: `(dest_y, dest_x, dest_name)`.
    pub fn conn_dest(&self, y: usize, x: usize, dest_idx: usize) -> (usize, usize, StrIdx) {
        let (dx, dy, dn) = self.tile(y, x).conn_point_dests[dest_idx];
        (usize::from(dy), usize::from(dx), dn)
    }

    //
    // switches
    //

    /// Adds a programmable switch between two connection points of one
    /// tile, registering the points as needed.
    pub fn add_switch(
        &mut self,
        y: usize,
        x: usize,
        from: &str,
        to: &str,
        bidir: bool,
    ) -> Result<(), ModelError> {
        let (_, from_o) = self.add_connpt_name(y, x, from)?;
        let (_, to_o) = self.add_connpt_name(y, x, to)?;
        let w = self.x_width;
        let tile = &mut self.tiles[y * w + x];
        let mut sw = ((from_o as u32) << 15) | to_o as u32;
        if bidir {
            sw |= SWITCH_BIDIRECTIONAL;
        }
        // Checking for duplicates slows model building down a lot, so
        // it only runs in debug builds.
        if cfg!(debug_assertions)
            && tile
                .switches
                .iter()
                .any(|&s| s & 0x3FFF_FFFF == sw & 0x3FFF_FFFF)
        {
            return Err(ModelError::DuplicateSwitch {
                y,
                x,
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        tile.switches.push(sw);
        Ok(())
    }

    /// Adds prefixed switch pairs; with `suffix_inc > 0` each pair is
    /// replicated for the numeric suffixes `0..=suffix_inc`.
    pub(crate) fn add_switch_set(
        &mut self,
        y: usize,
        x: usize,
        prefix: &str,
        pairs: &[(&str, &str)],
        suffix_inc: usize,
    ) -> Result<(), ModelError> {
        for &(from, to) in pairs {
            if suffix_inc == 0 {
                self.add_switch(y, x, &format!("{prefix}{from}"), &format!("{prefix}{to}"), false)?;
            } else {
                for j in 0..=suffix_inc {
                    self.add_switch(
                        y,
                        x,
                        &format!("{prefix}{from}{j}"),
                        &format!("{prefix}{to}{j}"),
                        false,
                    )?;
                }
            }
        }
        Ok(())
    }

    /// Finds a switch by its endpoint wire IDs.
    pub fn switch_lookup(&self, y: usize, x: usize, from: StrIdx, to: StrIdx) -> Option<SwIdx> {
        if from == STRIDX_NO_ENTRY || to == STRIDX_NO_ENTRY {
            return None;
        }
        let tile = self.tile(y, x);
        let from_o = tile.connpt_index_of(from)?;
        let to_o = tile.connpt_index_of(to)?;
        let want = ((from_o as u32) << 15) | to_o as u32;
        tile.switches
            .iter()
            .position(|&s| s & 0x3FFF_FFFF == want)
            .map(|i| i as SwIdx)
    }

    /// First switch whose `dir` side is the named connection point.
    pub fn switch_first(&self, y: usize, x: usize, name: &str, dir: SwDir) -> Option<SwIdx> {
        let name_i = self.names.find(name)?;
        let tile = self.tile(y, x);
        (0..tile.switches.len())
            .find(|&i| tile.switch_name(i as SwIdx, dir) == name_i)
            .map(|i| i as SwIdx)
    }

    /// Next switch after `last` sharing `last`'s `dir`-side endpoint.
    pub fn switch_next(&self, y: usize, x: usize, last: SwIdx, dir: SwDir) -> Option<SwIdx> {
        self.switch_search(y, x, last, usize::from(last) + 1, dir)
    }

    fn switch_back_to_first(&self, y: usize, x: usize, last: SwIdx, dir: SwDir) -> Option<SwIdx> {
        self.switch_search(y, x, last, 0, dir)
    }

    fn switch_search(
        &self,
        y: usize,
        x: usize,
        last: SwIdx,
        search_beg: usize,
        dir: SwDir,
    ) -> Option<SwIdx> {
        let tile = self.tile(y, x);
        let name_i = tile.switch_name(last, dir);
        (search_beg..tile.switches.len())
            .find(|&i| tile.switch_name(i as SwIdx, dir) == name_i)
            .map(|i| i as SwIdx)
    }

    /// Endpoint wire name of a switch.
    pub fn switch_str(&self, y: usize, x: usize, idx: SwIdx, dir: SwDir) -> &str {
        self.wire_name(self.tile(y, x).switch_name(idx, dir))
    }

    pub fn switch_wire(&self, y: usize, x: usize, idx: SwIdx, dir: SwDir) -> StrIdx {
        self.tile(y, x).switch_name(idx, dir)
    }

    pub fn switch_is_bidir(&self, y: usize, x: usize, idx: SwIdx) -> bool {
        self.tile(y, x).switches[usize::from(idx)] & SWITCH_BIDIRECTIONAL != 0
    }

    pub fn switch_is_enabled(&self, y: usize, x: usize, idx: SwIdx) -> bool {
        self.tile(y, x).switches[usize::from(idx)] & SWITCH_ON != 0
    }

    pub fn switch_enable(&mut self, y: usize, x: usize, idx: SwIdx) {
        let w = self.x_width;
        self.tiles[y * w + x].switches[usize::from(idx)] |= SWITCH_ON;
    }

    pub fn switch_disable(&mut self, y: usize, x: usize, idx: SwIdx) {
        let w = self.x_width;
        self.tiles[y * w + x].switches[usize::from(idx)] &= !SWITCH_ON;
    }
}

impl std::fmt::Debug for FpgaModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FpgaModel")
            .field("cfg_rows", &self.cfg_rows)
            .field("x_width", &self.x_width)
            .field("y_height", &self.y_height)
            .field("center_x", &self.center_x)
            .field("center_y", &self.center_y)
            .finish_non_exhaustive()
    }
}

/// Enumerates all switch chains reachable from a starting connection
/// point.
///
/// At every level the first round yields all sibling switches out of
/// the current endpoint, then the second round descends into children,
/// which sorts the returned chains in a stable way. A candidate whose
/// downstream endpoint is already on the chain is skipped so cyclic
/// wiring cannot recurse endlessly.
pub struct SwitchChain<'m> {
    model: &'m FpgaModel,
    y: usize,
    x: usize,
    dir: SwDir,
    start: Option<String>,
    chain: Vec<SwIdx>,
    first_round: bool,
}

impl<'m> SwitchChain<'m> {
    pub fn new(model: &'m FpgaModel, y: usize, x: usize, start: &str, dir: SwDir) -> Self {
        Self {
            model,
            y,
            x,
            dir,
            start: Some(start.to_string()),
            chain: Vec::new(),
            first_round: false,
        }
    }

    /// Advances to the next chain; `Ok(None)` when exhausted (or when
    /// the start point drives no switch at all).
    pub fn next_chain(&mut self) -> Result<Option<&[SwIdx]>, ModelError> {
        let (m, y, x, dir) = (self.model, self.y, self.x, self.dir);

        if let Some(start) = self.start.take() {
            let Some(idx) = m.switch_first(y, x, &start, dir) else {
                self.chain.clear();
                return Ok(None);
            };
            self.chain = vec![idx];
            self.first_round = true;
            return Ok(Some(&self.chain));
        }
        if self.chain.is_empty() {
            return Ok(None);
        }
        if self.first_round {
            // go through all members at the present level first
            let last = *self.chain.last().unwrap();
            if let Some(idx) = m.switch_next(y, x, last, dir) {
                *self.chain.last_mut().unwrap() = idx;
                return Ok(Some(&self.chain));
            }
            self.first_round = false;
            let idx = m
                .switch_back_to_first(y, x, last, dir)
                .expect("level restart from an existing switch");
            *self.chain.last_mut().unwrap() = idx;
        }
        // look for children
        let tile = m.tile(y, x);
        loop {
            let last = *self.chain.last().unwrap();
            let endpoint = m.switch_str(y, x, last, dir.flip()).to_string();
            let child_conn_o =
                tile.switch_conn_o(tile.switches[usize::from(last)], dir.flip());
            if let Some(idx) = m.switch_first(y, x, &endpoint, dir) {
                let cyclic = self.chain.iter().any(|&c| {
                    tile.switch_conn_o(tile.switches[usize::from(c)], dir) == child_conn_o
                });
                if !cyclic {
                    if self.chain.len() >= MAX_SW_CHAIN_SIZE {
                        self.chain.clear();
                        return Err(ModelError::ChainDepth { y, x });
                    }
                    self.first_round = true;
                    self.chain.push(idx);
                    return Ok(Some(&self.chain));
                }
            }
            loop {
                let last = *self.chain.last().unwrap();
                match m.switch_next(y, x, last, dir) {
                    Some(idx) => {
                        *self.chain.last_mut().unwrap() = idx;
                        break;
                    }
                    None => {
                        self.chain.pop();
                        if self.chain.is_empty() {
                            return Ok(None);
                        }
                    }
                }
            }
        }
    }
}
