//! Per-die catalogue data for the XC6SLX9: frame column layout, IOB
//! site naming, and the routing switch bit-position records.

use std::borrow::Cow;

use phf::phf_map;
use thiserror::Error;

use crate::consts::{MajorKind, IDCODE_MASK, XC6SLX9};

/// Minor frame count of each major column, left to right.
pub const MINORS_PER_MAJOR: [usize; 18] = [
    4,  // 0: clock spine
    30, // 1: left
    31, // 2: logic M
    30, // 3: logic L
    25, // 4: bram
    31, // 5: logic M
    30, // 6: logic L
    24, // 7: macc
    31, // 8: logic M
    31, // 9: center
    31, // 10: logic M
    30, // 11: logic L
    31, // 12: logic M
    30, // 13: logic L
    25, // 14: bram
    31, // 15: logic M
    30, // 16: logic L
    30, // 17: right
];

const MAJOR_KINDS: [MajorKind; 18] = [
    MajorKind::Zero,
    MajorKind::Left,
    MajorKind::LogicXm,
    MajorKind::LogicXl,
    MajorKind::Bram,
    MajorKind::LogicXm,
    MajorKind::LogicXl,
    MajorKind::Macc,
    MajorKind::LogicXm,
    MajorKind::Center,
    MajorKind::LogicXm,
    MajorKind::LogicXl,
    MajorKind::LogicXm,
    MajorKind::LogicXl,
    MajorKind::Bram,
    MajorKind::LogicXm,
    MajorKind::LogicXl,
    MajorKind::Right,
];

pub fn major_minors(major: usize) -> usize {
    MINORS_PER_MAJOR[major]
}

pub fn major_kind(major: usize) -> MajorKind {
    MAJOR_KINDS[major]
}

pub fn supported_idcode(idcode: u32) -> bool {
    (idcode & IDCODE_MASK) == XC6SLX9
}

/// IOB config-word entries in tail order. Unbonded or reserved entries
/// carry no site name.
pub const IOB_SITENAMES: [Option<&str>; 224] = [
    Some("P70"), Some("P69"), Some("P67"), Some("P66"), Some("P65"), Some("P64"), Some("P62"), Some("P61"),
    Some("P60"), Some("P59"), Some("P58"), Some("P57"), None, None, None, None,
    None, None, Some("P56"), Some("P55"), None, None, None, None,
    None, None, Some("P51"), Some("P50"), None, None, None, None,
    None, None, None, None, Some("UNB131"), Some("UNB132"), Some("P48"), Some("P47"),
    Some("P46"), Some("P45"), Some("P44"), Some("P43"), None, None, Some("P41"), Some("P40"),
    Some("P39"), Some("P38"), Some("P35"), Some("P34"), Some("P33"), Some("P32"), None, None,
    None, None, None, None, None, None, None, None,
    Some("P30"), Some("P29"), Some("P27"), Some("P26"), None, None, None, None,
    None, None, Some("P24"), Some("P23"), Some("P22"), Some("P21"), None, None,
    None, None, None, None, Some("P17"), Some("P16"), Some("P15"), Some("P14"),
    None, None, None, None, None, None, None, None,
    Some("P12"), Some("P11"), Some("P10"), Some("P9"), Some("P8"), Some("P7"), Some("P6"), Some("P5"),
    None, None, None, None, None, None, Some("P2"), Some("P1"),
    Some("P144"), Some("P143"), Some("P142"), Some("P141"), Some("P140"), Some("P139"), Some("P138"), Some("P137"),
    None, None, None, None, None, None, None, None,
    None, None, None, None, Some("P134"), Some("P133"), Some("P132"), Some("P131"),
    None, None, None, None, None, None, Some("P127"), Some("P126"),
    Some("P124"), Some("P123"), None, None, None, None, None, None,
    Some("P121"), Some("P120"), Some("P119"), Some("P118"), Some("P117"), Some("P116"), Some("P115"), Some("P114"),
    Some("P112"), Some("P111"), Some("P105"), Some("P104"), None, None, None, None,
    None, None, Some("P102"), Some("P101"), Some("P99"), Some("P98"), Some("P97"), None,
    None, None, None, None, None, None, None, None,
    None, None, Some("P95"), Some("P94"), Some("P93"), Some("P92"), None, None,
    None, None, None, Some("P88"), Some("P87"), None, Some("P85"), Some("P84"),
    None, None, Some("P83"), Some("P82"), Some("P81"), Some("P80"), Some("P79"), Some("P78"),
    None, None, None, None, None, None, None, None,
    None, None, None, None, None, None, Some("P75"), Some("P74"),
];

/// Site name to config-word entry index.
pub static IOB_WORD_INDEX: phf::Map<&'static str, u16> = phf_map! {
    "P70" => 0,
    "P69" => 1,
    "P67" => 2,
    "P66" => 3,
    "P65" => 4,
    "P64" => 5,
    "P62" => 6,
    "P61" => 7,
    "P60" => 8,
    "P59" => 9,
    "P58" => 10,
    "P57" => 11,
    "P56" => 18,
    "P55" => 19,
    "P51" => 26,
    "P50" => 27,
    "UNB131" => 36,
    "UNB132" => 37,
    "P48" => 38,
    "P47" => 39,
    "P46" => 40,
    "P45" => 41,
    "P44" => 42,
    "P43" => 43,
    "P41" => 46,
    "P40" => 47,
    "P39" => 48,
    "P38" => 49,
    "P35" => 50,
    "P34" => 51,
    "P33" => 52,
    "P32" => 53,
    "P30" => 64,
    "P29" => 65,
    "P27" => 66,
    "P26" => 67,
    "P24" => 74,
    "P23" => 75,
    "P22" => 76,
    "P21" => 77,
    "P17" => 84,
    "P16" => 85,
    "P15" => 86,
    "P14" => 87,
    "P12" => 96,
    "P11" => 97,
    "P10" => 98,
    "P9" => 99,
    "P8" => 100,
    "P7" => 101,
    "P6" => 102,
    "P5" => 103,
    "P2" => 110,
    "P1" => 111,
    "P144" => 112,
    "P143" => 113,
    "P142" => 114,
    "P141" => 115,
    "P140" => 116,
    "P139" => 117,
    "P138" => 118,
    "P137" => 119,
    "P134" => 132,
    "P133" => 133,
    "P132" => 134,
    "P131" => 135,
    "P127" => 142,
    "P126" => 143,
    "P124" => 144,
    "P123" => 145,
    "P121" => 152,
    "P120" => 153,
    "P119" => 154,
    "P118" => 155,
    "P117" => 156,
    "P116" => 157,
    "P115" => 158,
    "P114" => 159,
    "P112" => 160,
    "P111" => 161,
    "P105" => 162,
    "P104" => 163,
    "P102" => 170,
    "P101" => 171,
    "P99" => 172,
    "P98" => 173,
    "P97" => 174,
    "P95" => 186,
    "P94" => 187,
    "P93" => 188,
    "P92" => 189,
    "P88" => 195,
    "P87" => 196,
    "P85" => 198,
    "P84" => 199,
    "P83" => 202,
    "P82" => 203,
    "P81" => 204,
    "P80" => 205,
    "P79" => 206,
    "P78" => 207,
    "P75" => 222,
    "P74" => 223,
};

pub fn num_iobs() -> usize {
    IOB_SITENAMES.len()
}

pub fn iob_sitename_at(word_entry: usize) -> Option<&'static str> {
    IOB_SITENAMES.get(word_entry).copied().flatten()
}

/// Which edge of the chip an IOB pad sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IobSide {
    Top,
    Bottom,
    Left,
    Right,
}

/// One IOB location: the variable coordinate along the edge plus the
/// pad names of the devices there. Top and bottom sites hold four
/// devices, left and right two.
#[derive(Debug, Clone, Copy)]
pub struct IobSite {
    pub xy: usize,
    pub names: &'static [&'static str],
}

pub const IOB_TOP: [IobSite; 11] = [
    IobSite { xy: 5, names: &["P144", "P143", "P142", "P141"] },
    IobSite { xy: 7, names: &["P140", "P139", "P138", "P137"] },
    IobSite { xy: 12, names: &["UNB9", "UNB10", "UNB11", "UNB12"] },
    IobSite { xy: 14, names: &["UNB13", "UNB14", "UNB15", "UNB16"] },
    IobSite { xy: 19, names: &["UNB17", "UNB18", "UNB19", "UNB20"] },
    IobSite { xy: 21, names: &["P134", "P133", "P132", "P131"] },
    IobSite { xy: 25, names: &["P127", "P126", "P124", "P123"] },
    IobSite { xy: 29, names: &["UNB29", "UNB30", "UNB31", "UNB32"] },
    IobSite { xy: 31, names: &["UNB33", "UNB34", "P121", "P120"] },
    IobSite { xy: 36, names: &["P119", "P118", "P117", "P116"] },
    IobSite { xy: 38, names: &["P115", "P114", "P112", "P111"] },
];

pub const IOB_BOTTOM: [IobSite; 11] = [
    IobSite { xy: 5, names: &["P39", "P38", "P40", "P41"] },
    IobSite { xy: 7, names: &["UNB139", "UNB140", "P43", "P44"] },
    IobSite { xy: 12, names: &["P46", "P45", "P47", "P48"] },
    IobSite { xy: 14, names: &["UNB131", "UNB132", "UNB130", "UNB129"] },
    IobSite { xy: 19, names: &["UNB127", "UNB128", "UNB126", "UNB125"] },
    IobSite { xy: 21, names: &["UNB123", "UNB124", "P50", "P51"] },
    IobSite { xy: 25, names: &["P56", "P55", "UNB118", "UNB117"] },
    IobSite { xy: 29, names: &["UNB115", "UNB116", "UNB114", "UNB113"] },
    IobSite { xy: 31, names: &["P58", "P57", "P59", "P60"] },
    IobSite { xy: 36, names: &["P62", "P61", "P64", "P65"] },
    IobSite { xy: 38, names: &["P67", "P66", "P69", "P70"] },
];

pub const IOB_LEFT: [IobSite; 28] = [
    IobSite { xy: 3, names: &["P1", "P2"] },
    IobSite { xy: 5, names: &["UNB198", "UNB197"] },
    IobSite { xy: 7, names: &["UNB196", "UNB195"] },
    IobSite { xy: 9, names: &["UNB194", "UNB193"] },
    IobSite { xy: 11, names: &["P5", "P6"] },
    IobSite { xy: 12, names: &["P7", "P8"] },
    IobSite { xy: 13, names: &["P9", "P10"] },
    IobSite { xy: 14, names: &["P11", "P12"] },
    IobSite { xy: 28, names: &["UNB184", "UNB183"] },
    IobSite { xy: 29, names: &["UNB182", "UNB181"] },
    IobSite { xy: 30, names: &["UNB180", "UNB179"] },
    IobSite { xy: 31, names: &["UNB178", "UNB177"] },
    IobSite { xy: 32, names: &["P14", "P15"] },
    IobSite { xy: 33, names: &["P16", "P17"] },
    IobSite { xy: 37, names: &["P21", "P22"] },
    IobSite { xy: 38, names: &["P23", "P24"] },
    IobSite { xy: 39, names: &["UNB168", "UNB167"] },
    IobSite { xy: 42, names: &["UNB166", "UNB165"] },
    IobSite { xy: 46, names: &["UNB164", "UNB163"] },
    IobSite { xy: 49, names: &["P26", "P27"] },
    IobSite { xy: 52, names: &["P29", "P30"] },
    IobSite { xy: 55, names: &["UNB158", "UNB157"] },
    IobSite { xy: 58, names: &["UNB156", "UNB155"] },
    IobSite { xy: 61, names: &["UNB154", "UNB153"] },
    IobSite { xy: 65, names: &["UNB152", "UNB151"] },
    IobSite { xy: 66, names: &["UNB150", "UNB149"] },
    IobSite { xy: 67, names: &["P32", "P33"] },
    IobSite { xy: 68, names: &["P34", "P35"] },
];

pub const IOB_RIGHT: [IobSite; 28] = [
    IobSite { xy: 4, names: &["P105", "P104"] },
    IobSite { xy: 5, names: &["UNB47", "UNB48"] },
    IobSite { xy: 7, names: &["UNB49", "UNB50"] },
    IobSite { xy: 9, names: &["UNB51", "UNB52"] },
    IobSite { xy: 11, names: &["P102", "P101"] },
    IobSite { xy: 12, names: &["P100", "P99"] },
    IobSite { xy: 13, names: &["P98", "P97"] },
    IobSite { xy: 14, names: &["UNB59", "UNB60"] },
    IobSite { xy: 28, names: &["UNB61", "UNB62"] },
    IobSite { xy: 29, names: &["UNB63", "UNB64"] },
    IobSite { xy: 30, names: &["UNB65", "UNB66"] },
    IobSite { xy: 31, names: &["UNB67", "UNB68"] },
    IobSite { xy: 32, names: &["P95", "P94"] },
    IobSite { xy: 33, names: &["P93", "P92"] },
    IobSite { xy: 37, names: &["P88", "P87"] },
    IobSite { xy: 38, names: &["P85", "P84"] },
    IobSite { xy: 39, names: &["UNB77", "UNB78"] },
    IobSite { xy: 42, names: &["P83", "P82"] },
    IobSite { xy: 46, names: &["P81", "P80"] },
    IobSite { xy: 49, names: &["P79", "P78"] },
    IobSite { xy: 52, names: &["UNB85", "UNB86"] },
    IobSite { xy: 55, names: &["UNB87", "UNB88"] },
    IobSite { xy: 58, names: &["UNB89", "UNB90"] },
    IobSite { xy: 61, names: &["UNB91", "UNB92"] },
    IobSite { xy: 65, names: &["UNB93", "UNB94"] },
    IobSite { xy: 66, names: &["UNB95", "UNB96"] },
    IobSite { xy: 67, names: &["UNB97", "UNB98"] },
    IobSite { xy: 68, names: &["P75", "P74"] },
];

fn side_tables() -> [(&'static [IobSite], IobSide); 4] {
    [
        (&IOB_TOP, IobSide::Top),
        (&IOB_BOTTOM, IobSide::Bottom),
        (&IOB_LEFT, IobSide::Left),
        (&IOB_RIGHT, IobSide::Right),
    ]
}

/// Locates a pad name on the chip edge. Returns the side, the variable
/// coordinate along that side, and the device index within the site.
pub fn find_iob(sitename: &str) -> Option<(IobSide, usize, usize)> {
    for (table, side) in side_tables() {
        for site in table {
            if let Some(idx) = site.names.iter().position(|&n| n == sitename) {
                return Some((side, site.xy, idx));
            }
        }
    }
    None
}

pub fn iob_sitename(side: IobSide, xy: usize, idx: usize) -> Option<&'static str> {
    let table: &[IobSite] = match side {
        IobSide::Top => &IOB_TOP,
        IobSide::Bottom => &IOB_BOTTOM,
        IobSide::Left => &IOB_LEFT,
        IobSide::Right => &IOB_RIGHT,
    };
    table
        .iter()
        .find(|site| site.xy == xy)
        .and_then(|site| site.names.get(idx).copied())
}

/// One programmable mux bit position in a routing tile: the two-bit
/// selector pair and the one-bit enable, with the switch endpoints.
///
/// For `minor == 20` all three bits live in that frame at the literal
/// offsets. For other minors the two selector bits straddle `minor` and
/// `minor + 1` at offset `two_bits_o / 2`, and the one-bit lives in
/// `minor + (one_bit_o & 1)` at offset `one_bit_o / 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingBitPos {
    pub minor: usize,
    pub two_bits_o: usize,
    /// Selector value, always 1, 2 or 3.
    pub two_bits_val: u8,
    pub one_bit_o: usize,
    pub from: Cow<'static, str>,
    pub to: Cow<'static, str>,
    pub bidir: bool,
}

#[derive(Debug, Error)]
pub enum BitPosError {
    #[error("malformed switch bit-position line {0}: {1}")]
    BadLine(usize, String),
    #[error("selector value {0} out of range on line {1}, expected 1..3")]
    BadSelector(u8, usize),
}

impl RoutingBitPos {
    /// One catalogue line in the dump format:
    /// `mi<minor> <to> <two_bits_o>/<two_bits_val>/<one_bit_o> <from> -> | <->`.
    pub fn to_line(&self) -> String {
        format!(
            "mi{:02} {} {}/{}/{} {} {}",
            self.minor,
            self.to,
            self.two_bits_o,
            self.two_bits_val,
            self.one_bit_o,
            self.from,
            if self.bidir { "<->" } else { "->" }
        )
    }
}

/// Parses a catalogue in the line format of [`RoutingBitPos::to_line`].
/// Empty lines and `#` comments are skipped.
pub fn parse_bitpos_catalogue(text: &str) -> Result<Vec<RoutingBitPos>, BitPosError> {
    let mut out = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let bad = || BitPosError::BadLine(lineno + 1, line.to_string());
        let mut words = line.split_whitespace();
        let minor = words
            .next()
            .and_then(|w| w.strip_prefix("mi"))
            .and_then(|w| w.parse::<usize>().ok())
            .ok_or_else(bad)?;
        let to = words.next().ok_or_else(bad)?.to_string();
        let mut bits = words.next().ok_or_else(bad)?.split('/');
        let two_bits_o = bits
            .next()
            .and_then(|w| w.parse::<usize>().ok())
            .ok_or_else(bad)?;
        let two_bits_val = bits
            .next()
            .and_then(|w| w.parse::<u8>().ok())
            .ok_or_else(bad)?;
        let one_bit_o = bits
            .next()
            .and_then(|w| w.parse::<usize>().ok())
            .ok_or_else(bad)?;
        let from = words.next().ok_or_else(bad)?.to_string();
        let bidir = match words.next().ok_or_else(bad)? {
            "->" => false,
            "<->" => true,
            _ => return Err(bad()),
        };
        if !(1..=3).contains(&two_bits_val) {
            return Err(BitPosError::BadSelector(two_bits_val, lineno + 1));
        }
        out.push(RoutingBitPos {
            minor,
            two_bits_o,
            two_bits_val,
            one_bit_o,
            from: Cow::Owned(from),
            to: Cow::Owned(to),
            bidir,
        });
    }
    Ok(out)
}

macro_rules! bp {
    ($minor:expr, $two_o:expr, $val:expr, $one_o:expr, $from:expr, $to:expr) => {
        RoutingBitPos {
            minor: $minor,
            two_bits_o: $two_o,
            two_bits_val: $val,
            one_bit_o: $one_o,
            from: Cow::Borrowed($from),
            to: Cow::Borrowed($to),
            bidir: false,
        }
    };
    ($minor:expr, $two_o:expr, $val:expr, $one_o:expr, $from:expr, $to:expr, bidir) => {
        RoutingBitPos {
            minor: $minor,
            two_bits_o: $two_o,
            two_bits_val: $val,
            one_bit_o: $one_o,
            from: Cow::Borrowed($from),
            to: Cow::Borrowed($to),
            bidir: true,
        }
    };
}

/// The built-in slice of the switch bit-position catalogue.
///
/// The authoritative catalogue for the die is maintained as external
/// data and loaded with [`parse_bitpos_catalogue`]; this subset covers
/// the logicin muxes, the clock/fan distribution and the directional
/// wire heads so that a model is routable without external files.
pub fn builtin_routing_bitpos() -> Vec<RoutingBitPos> {
    // Bit cell discipline: selector pairs sit at frame offsets 0..6 of
    // an even/odd minor window, enable bits at offsets 16 and up, so no
    // two catalogue entries touch the same cell.
    vec![
        // logicin input muxes
        bp!(0, 0, 1, 32, "LOGICOUT0", "LOGICIN_B0"),
        bp!(0, 0, 2, 33, "LOGICOUT1", "LOGICIN_B0"),
        bp!(0, 0, 3, 34, "NN2E0", "LOGICIN_B0"),
        bp!(0, 4, 1, 35, "LOGICOUT2", "LOGICIN_B1"),
        bp!(0, 4, 2, 36, "LOGICOUT3", "LOGICIN_B1"),
        bp!(0, 4, 3, 37, "SS2E0", "LOGICIN_B1"),
        bp!(2, 0, 1, 32, "LOGICOUT4", "LOGICIN_B2"),
        bp!(2, 0, 2, 33, "EE2E0", "LOGICIN_B2"),
        bp!(2, 0, 3, 34, "WW2E0", "LOGICIN_B2"),
        bp!(2, 4, 1, 35, "LOGICOUT5", "LOGICIN_B3"),
        bp!(2, 4, 2, 36, "NN4E0", "LOGICIN_B3"),
        bp!(2, 4, 3, 37, "SS4E0", "LOGICIN_B3"),
        bp!(4, 0, 1, 32, "LOGICOUT6", "LOGICIN_B4"),
        bp!(4, 0, 2, 33, "NR1E0", "LOGICIN_B4"),
        bp!(4, 4, 1, 35, "LOGICOUT7", "LOGICIN_B10"),
        bp!(4, 4, 2, 36, "SR1E0", "LOGICIN_B10"),
        bp!(6, 0, 1, 32, "LOGICOUT8", "LOGICIN_B20"),
        bp!(6, 0, 2, 33, "LOGICOUT9", "LOGICIN_B21"),
        bp!(6, 4, 1, 35, "LOGICOUT10", "LOGICIN_B28"),
        bp!(6, 4, 2, 36, "LOGICOUT11", "LOGICIN_B36"),
        bp!(8, 0, 1, 32, "LOGICOUT12", "LOGICIN_B44"),
        bp!(8, 0, 2, 33, "LOGICOUT13", "LOGICIN_B52"),
        bp!(8, 4, 1, 35, "LOGICOUT14", "LOGICIN_B60"),
        bp!(8, 4, 2, 36, "LOGICOUT15", "LOGICIN_B62"),
        bp!(8, 8, 1, 38, "VCC_WIRE", "LOGICIN_B40"),
        bp!(8, 8, 2, 39, "GND_WIRE", "LOGICIN_B41"),
        bp!(8, 8, 3, 40, "LOGICIN_B62", "FAN_B"),
        // fan and clock distribution
        bp!(10, 0, 1, 32, "LOGICIN_B10", "GFAN0", bidir),
        bp!(10, 0, 2, 33, "LOGICIN_B11", "GFAN0", bidir),
        bp!(10, 4, 1, 35, "LOGICIN_B4", "GFAN1", bidir),
        bp!(10, 4, 2, 36, "LOGICIN_B5", "GFAN1", bidir),
        bp!(12, 0, 1, 32, "GCLK0", "CLK0"),
        bp!(12, 0, 2, 33, "GCLK1", "CLK0"),
        bp!(12, 0, 3, 34, "GFAN0", "CLK0"),
        bp!(12, 4, 1, 35, "GCLK2", "CLK1"),
        bp!(12, 4, 2, 36, "GCLK3", "CLK1"),
        bp!(12, 4, 3, 37, "GFAN1", "CLK1"),
        bp!(14, 0, 1, 32, "LOGICIN_B6", "SR0"),
        bp!(14, 0, 2, 33, "GFAN0", "SR0"),
        bp!(14, 4, 1, 35, "LOGICIN_B35", "SR1"),
        bp!(14, 4, 2, 36, "GFAN1", "SR1"),
        // directional wire heads
        bp!(16, 0, 1, 32, "LOGICOUT16", "NN2B0"),
        bp!(16, 0, 2, 33, "SS2E0", "NN2B0"),
        bp!(16, 4, 1, 35, "LOGICOUT17", "SS2B0"),
        bp!(16, 4, 2, 36, "NN2E0", "SS2B0"),
        bp!(18, 0, 1, 32, "LOGICOUT18", "NN4B0"),
        bp!(18, 0, 2, 33, "SS4E0", "NN4B0"),
        bp!(18, 4, 1, 35, "LOGICOUT19", "SS4B0"),
        bp!(18, 4, 2, 36, "NN4E0", "SS4B0"),
        bp!(18, 8, 1, 38, "LOGICOUT20", "EE2B0"),
        bp!(18, 8, 2, 39, "WW2E0", "EE2B0"),
        bp!(18, 12, 1, 41, "LOGICOUT21", "WW2B0"),
        bp!(18, 12, 2, 42, "EE2E0", "WW2B0"),
        // minor 20 holds all three bits in one frame
        bp!(20, 0, 1, 16, "LOGICOUT22", "NR1B0"),
        bp!(20, 0, 2, 17, "SR1E0", "NR1B0"),
        bp!(20, 4, 1, 18, "LOGICOUT23", "SR1B0"),
        bp!(20, 4, 2, 19, "NR1E0", "SR1B0"),
        bp!(20, 8, 1, 20, "GCLK4", "CLK0"),
        bp!(20, 8, 2, 21, "GCLK5", "CLK1"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minors_sum_to_row() {
        assert_eq!(MINORS_PER_MAJOR.iter().sum::<usize>(), 505);
    }

    #[test]
    fn sitename_word_index_agrees_with_table() {
        for (name, &word) in IOB_WORD_INDEX.entries() {
            assert_eq!(iob_sitename_at(usize::from(word)), Some(*name));
        }
        assert_eq!(IOB_WORD_INDEX.get("P48").copied(), Some(38));
    }

    #[test]
    fn find_iob_sites() {
        let (side, xy, idx) = find_iob("P48").unwrap();
        assert_eq!(side, IobSide::Bottom);
        assert_eq!(xy, 12);
        assert_eq!(idx, 3);
        assert_eq!(iob_sitename(side, xy, idx), Some("P48"));
        for name in ["P48", "P55", "P137"] {
            let (side, xy, idx) = find_iob(name).unwrap();
            assert_eq!(iob_sitename(side, xy, idx), Some(name));
        }
        assert!(find_iob("P999").is_none());
    }

    #[test]
    fn builtin_catalogue_is_wellformed() {
        let cat = builtin_routing_bitpos();
        for e in &cat {
            assert!((1..=3).contains(&e.two_bits_val));
            let width = if e.minor == 20 { 64 } else { 128 };
            assert!(e.two_bits_o + 1 < width);
            assert!(e.one_bit_o < width);
        }
        // distinct selector values within a selector group
        for (i, a) in cat.iter().enumerate() {
            for b in &cat[i + 1..] {
                if a.minor == b.minor && a.two_bits_o == b.two_bits_o {
                    assert_ne!(a.two_bits_val, b.two_bits_val, "{} / {}", a.to_line(), b.to_line());
                }
            }
        }
    }

    #[test]
    fn catalogue_line_roundtrip() {
        let cat = builtin_routing_bitpos();
        let text = cat
            .iter()
            .map(RoutingBitPos::to_line)
            .collect::<Vec<_>>()
            .join("\n");
        let parsed = parse_bitpos_catalogue(&text).unwrap();
        assert_eq!(parsed, cat);
        assert!(parse_bitpos_catalogue("mi99 X 0/5/0 Y ->").is_err());
        assert!(parse_bitpos_catalogue("garbage").is_err());
    }
}
