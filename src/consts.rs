use flagset::flags;
use num_derive::{FromPrimitive, ToPrimitive};

// Frame geometry for the XC6SLX9 die. One frame configures one minor
// column of one major column of one row.
pub const FRAME_SIZE: usize = 130;
pub const FRAMES_PER_ROW: usize = 505;
pub const PADDING_FRAMES_PER_ROW: usize = 2;
pub const NUM_ROWS: usize = 4;

pub const FRAMES_DATA_START: usize = 0;
pub const FRAMES_DATA_LEN: usize = NUM_ROWS * FRAMES_PER_ROW * FRAME_SIZE;
pub const BRAM_DATA_START: usize = FRAMES_DATA_LEN;
pub const BRAM_DATA_LEN: usize = 4 * 144 * FRAME_SIZE;
pub const IOB_DATA_START: usize = BRAM_DATA_START + BRAM_DATA_LEN;
/// FLR value for the die; counted in 16-bit words.
pub const IOB_WORDS: usize = 896;
pub const IOB_DATA_LEN: usize = IOB_WORDS * 2;
pub const BITS_LEN: usize = IOB_DATA_START + IOB_DATA_LEN;
pub const IOB_ENTRY_LEN: usize = 8;

// The highest 4 bits are the binary revision and not used when
// performing IDCODE verification (ug380, Configuration Sequence).
pub const IDCODE_MASK: u32 = 0x0FFF_FFFF;
pub const XC6SLX4: u32 = 0x0400_0093;
pub const XC6SLX9: u32 = 0x0400_1093;
pub const XC6SLX16: u32 = 0x0400_2093;
pub const XC6SLX25: u32 = 0x0400_4093;
pub const XC6SLX45: u32 = 0x0400_8093;
pub const XC6SLX75: u32 = 0x0400_E093;
pub const XC6SLX100: u32 = 0x0401_1093;
pub const XC6SLX150: u32 = 0x0401_D093;

pub const SYNC_WORD: u32 = 0xAA99_5566;

// Well-known register default values (ug380 p.90ff).
pub const COR1_DEF: u16 = 0x3D00;
pub const COR2_DEF: u16 = 0x09EE;
pub const MASK_DEF: u16 = 0xCF;
pub const CTL_DEF: u16 = 0x81;
pub const CCLK_FREQ_DEF: u16 = 0x3CC8;
pub const PWRDN_REG_DEF: u16 = 0x0881;
pub const EYE_MASK_DEF: u16 = 0x0000;
pub const HC_OPT_REG_DEF: u16 = 0x1F;
pub const CWDT_DEF: u16 = 0xFFFF;
pub const PU_GWE_DEF: u16 = 0x005;
pub const PU_GTS_DEF: u16 = 0x004;
pub const MODE_REG_DEF: u16 = 0x100;
pub const SEU_OPT_DEF: u16 = 0x1BE2;

//
// Fixed tile columns on the left and right side of the chip.
//
pub const LEFT_OUTER_COL: usize = 0;
pub const LEFT_INNER_COL: usize = 1;
pub const LEFT_IO_ROUTING: usize = 2;
pub const LEFT_IO_DEVS: usize = 3;
pub const LEFT_MCB_COL: usize = 4;
pub const LEFT_SIDE_WIDTH: usize = 5;
pub const RIGHT_SIDE_WIDTH: usize = 5;

// Offsets on the right side are deducted from the width.
pub const RIGHT_OUTER_O: usize = 1;
pub const RIGHT_INNER_O: usize = 2;
pub const RIGHT_MCB_O: usize = 3;
pub const RIGHT_IO_DEVS_O: usize = 4;
pub const RIGHT_IO_ROUTING_O: usize = 5;

pub const TOP_OUTER_ROW: usize = 0;
pub const TOP_INNER_ROW: usize = 1;
pub const TOP_IO_TILES: usize = 2;
pub const TOP_OUTER_IO: usize = 2;
pub const TOP_INNER_IO: usize = 3;
pub const BOT_IO_TILES: usize = 2;
pub const BOT_OUTER_ROW: usize = 1;
pub const BOT_INNER_ROW: usize = 2;
pub const BOT_OUTER_IO: usize = 3;
pub const BOT_INNER_IO: usize = 4;

/// Tiles above (and below) the hclk row inside one row-group.
pub const HALF_ROW: usize = 8;
pub const HCLK_POS: i32 = 8;
/// Full height of one row-group including the hclk tile.
pub const ROW_SIZE: usize = HALF_ROW + 1 + HALF_ROW;
pub const LAST_POS_IN_ROW: i32 = 16;

pub const CENTER_CMTPLL_O: usize = 1;
pub const CENTER_LOGIC_O: usize = 2;
pub const CENTER_ROUTING_O: usize = 3;
pub const CENTER_TOP_IOB_O: usize = 3;
pub const CENTER_BOT_IOB_O: usize = 1;

/// IO rows at the top and bottom edge carrying IOLOGIC sites.
pub const TOPBOT_IO_ROWS: usize = 2;
/// Rows treated as 'local' interconnect at the ends of the left and
/// right IO columns.
pub const LEFT_LOCAL_HEIGHT: usize = 1;
pub const RIGHT_LOCAL_HEIGHT: usize = 2;

/// Upper bound on switch chain depth in the enumerator.
pub const MAX_SW_CHAIN_SIZE: usize = 32;
/// Hard cap on active routing switches during extraction.
pub const MAX_YX_SWITCHES: usize = 1024;

/// Configuration register numbers as they appear in type-1 packet
/// headers (ug380 p.90).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum ConfigReg {
    Crc = 0,
    FarMaj = 1,
    FarMin = 2,
    Fdri = 3,
    Fdro = 4,
    Cmd = 5,
    Ctl = 6,
    Mask = 7,
    Stat = 8,
    Lout = 9,
    Cor1 = 10,
    Cor2 = 11,
    PwrdnReg = 12,
    Flr = 13,
    Idcode = 14,
    Cwdt = 15,
    HcOptReg = 16,
    Csbo = 18,
    General1 = 19,
    General2 = 20,
    General3 = 21,
    General4 = 22,
    General5 = 23,
    ModeReg = 24,
    PuGwe = 25,
    PuGts = 26,
    Mfwr = 27,
    CclkFreq = 28,
    SeuOpt = 29,
    ExpSign = 30,
    RdbkSign = 31,
    Bootsts = 32,
    EyeMask = 33,
    CbcReg = 34,
}

/// Values written to the CMD register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Cmd {
    Null = 0,
    Wcfg = 1,
    Mfw = 2,
    Lfrm = 3,
    Rcfg = 4,
    Start = 5,
    Rcrc = 7,
    Aghigh = 8,
    Grestore = 10,
    Shutdown = 11,
    Desync = 13,
    Iprog = 14,
}

/// Resource type of a major column within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorKind {
    Zero,
    Left,
    LogicXm,
    LogicXl,
    Bram,
    Macc,
    Center,
    Right,
}

flags! {
    /// Per-tile flags. The fabric column flags are only set in the y==0
    /// tile of a column; `Wired` is only set on the outer left/right
    /// columns.
    pub enum TileFlag: u32 {
        FabricRoutingCol = 0x0000_0001,
        FabricLogicCol = 0x0000_0002,
        FabricBramMaccRoutingCol = 0x0000_0004,
        FabricBramCol = 0x0000_0008,
        FabricMaccCol = 0x0000_0010,
        RoutingNoIo = 0x0000_0020,
        BramDev = 0x0000_0040,
        MaccDev = 0x0000_0080,
        LogicXlDev = 0x0000_0100,
        LogicXmDev = 0x0000_0200,
        IologicDelayDev = 0x0000_0400,
        DcmDev = 0x0000_0800,
        PllDev = 0x0000_1000,
        Wired = 0x0000_2000,
    }

    /// Row predicates; multiple checks combine with OR logic.
    pub enum YCheck: u16 {
        InnerTop = 0x0001,
        InnerBottom = 0x0002,
        ChipHorizRegs = 0x0004,
        RowHorizAxsymm = 0x0008,
        BottomOfRow = 0x0010,
        LeftWired = 0x0020,
        RightWired = 0x0040,
        TopbotIoRange = 0x0080,
        TopOuterIo = 0x0100,
        TopInnerIo = 0x0200,
        BotInnerIo = 0x0400,
        BotOuterIo = 0x0800,
    }

    /// Column predicates; multiple checks combine with OR logic.
    pub enum XCheck: u32 {
        OuterLeft = 0x0000_0001,
        InnerLeft = 0x0000_0002,
        InnerRight = 0x0000_0004,
        OuterRight = 0x0000_0008,
        /// Includes the routing columns in left/right IO and the center.
        RoutingCol = 0x0000_0010,
        RoutingToBramCol = 0x0000_0020,
        RoutingToMaccCol = 0x0000_0040,
        RoutingNoIo = 0x0000_0080,
        RoutingHasIo = 0x0000_0100,
        /// Includes the center logic column.
        LogicCol = 0x0000_0200,
        FabricRoutingCol = 0x0000_0400,
        FabricLogicRoutingCol = 0x0000_0800,
        FabricLogicCol = 0x0000_1000,
        FabricBramMaccRoutingCol = 0x0000_2000,
        FabricBramRoutingCol = 0x0000_4000,
        FabricMaccRoutingCol = 0x0000_8000,
        FabricBramCol = 0x0001_0000,
        FabricMaccCol = 0x0002_0000,
        CenterRoutingCol = 0x0004_0000,
        CenterLogicCol = 0x0008_0000,
        CenterCmtpllCol = 0x0010_0000,
        CenterRegsCol = 0x0020_0000,
        LeftIoRoutingCol = 0x0040_0000,
        LeftIoDevsCol = 0x0080_0000,
        RightIoRoutingCol = 0x0100_0000,
        RightIoDevsCol = 0x0200_0000,
        /// True for anything left of the center column (excluded).
        LeftSide = 0x0400_0000,
        LeftMcb = 0x0800_0000,
        RightMcb = 0x1000_0000,
    }

    /// Combined row/column predicates.
    pub enum YxCheck: u8 {
        /// In the regular 0..15 row positions of a routing column.
        RoutingTile = 0x01,
        IoRouting = 0x02,
        DevIlogic = 0x04,
        DevOlogic = 0x08,
        DevLogic = 0x10,
    }
}

/// Every tile type of the fabric. `Na` marks grid cells outside the
/// chip's real tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum TileKind {
    #[default]
    Na = 0,
    Routing,
    RoutingBrk,
    RoutingVia,
    HclkRoutingXm,
    HclkRoutingXl,
    HclkLogicXm,
    HclkLogicXl,
    LogicXm,
    LogicXl,
    ReghRoutingXm,
    ReghRoutingXl,
    ReghLogicXm,
    ReghLogicXl,
    BramRouting,
    BramRoutingBrk,
    Bram,
    BramRoutingTermT,
    BramRoutingTermB,
    BramRoutingViaTermT,
    BramRoutingViaTermB,
    BramTermLt,
    BramTermRt,
    BramTermLb,
    BramTermRb,
    HclkBramRouting,
    HclkBramRoutingVia,
    HclkBram,
    ReghBramRouting,
    ReghBramRoutingVia,
    ReghBramL,
    ReghBramR,
    Macc,
    HclkMaccRouting,
    HclkMaccRoutingVia,
    HclkMacc,
    ReghMaccRouting,
    ReghMaccRoutingVia,
    ReghMaccL,
    PllT,
    DcmT,
    PllB,
    DcmB,
    RegT,
    RegTermT,
    RegTermB,
    RegB,
    RegvTermT,
    RegvTermB,
    HclkRegv,
    Regv,
    RegvBrk,
    RegvT,
    RegvB,
    RegvMidbufT,
    RegvHclkbufT,
    RegvHclkbufB,
    RegvMidbufB,
    RegcRouting,
    RegcLogic,
    RegcCmt,
    /// The unique tile in the middle of the chip.
    Center,
    IoT,
    IoB,
    IoTermT,
    IoTermB,
    IoRouting,
    IoLogicTermT,
    IoLogicTermB,
    IoOuterT,
    IoInnerT,
    IoOuterB,
    IoInnerB,
    IoBufpllTermT,
    IoLogicRegTermT,
    IoBufpllTermB,
    IoLogicRegTermB,
    LogicRoutingTermB,
    LogicNoioTermB,
    MaccRoutingTermT,
    MaccRoutingTermB,
    MaccViaTermT,
    MaccTermTl,
    MaccTermTr,
    MaccTermBl,
    MaccTermBr,
    RoutingViaRegc,
    RoutingViaIo,
    RoutingViaIoDcm,
    RoutingViaCarry,
    CornerTermL,
    CornerTermR,
    IoTermLUpperTop,
    IoTermLUpperBot,
    IoTermLLowerTop,
    IoTermLLowerBot,
    IoTermRUpperTop,
    IoTermRUpperBot,
    IoTermRLowerTop,
    IoTermRLowerBot,
    IoTermL,
    IoTermR,
    HclkTermL,
    HclkTermR,
    ReghIoTermL,
    ReghIoTermR,
    RegL,
    RegR,
    IoPciL,
    IoPciR,
    IoRdyL,
    IoRdyR,
    IoL,
    IoR,
    IoPciConnL,
    IoPciConnR,
    CornerTermT,
    CornerTermB,
    RoutingIoL,
    HclkRoutingIoL,
    HclkRoutingIoR,
    ReghRoutingIoL,
    ReghRoutingIoR,
    RoutingIoLBrk,
    RoutingGclk,
    ReghIoL,
    ReghIoR,
    ReghMcb,
    HclkMcb,
    RoutingIoViaL,
    RoutingIoViaR,
    RoutingIoPciCeL,
    RoutingIoPciCeR,
    CornerTl,
    CornerBl,
    CornerTrUpper,
    CornerTrLower,
    CornerBrUpper,
    CornerBrLower,
    HclkIoTopUpL,
    HclkIoTopUpR,
    HclkIoTopSplitL,
    HclkIoTopSplitR,
    HclkIoTopDnL,
    HclkIoTopDnR,
    HclkIoBotUpL,
    HclkIoBotUpR,
    HclkIoBotSplitL,
    HclkIoBotSplitR,
    HclkIoBotDnL,
    HclkIoBotDnR,
}
