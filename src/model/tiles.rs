//! Tile grid initialization (build phase 1): parses the column
//! descriptor and the side wiring strings, stamps tile types and fabric
//! flags, and assigns the FAR major number of every column.
//!
//! Column letters: `L` logic-XL, `M` logic-XM, `B` block ram, `D` macc,
//! `R` the center register column. Suffix `n` marks a logic column
//! without IO at top and bottom, `g` the global clock separation
//! columns. The wiring strings carry 16 characters per row, top-down,
//! `W` wired / `U` unwired.

use crate::consts::*;

use super::{FpgaModel, ModelError, Tile};

fn next_non_whitespace(s: &str) -> Option<char> {
    s.chars().find(|&c| c != ' ')
}

fn last_major(s: &str, cur_o: usize) -> Option<char> {
    s[..cur_o].chars().rev().find(|c| c.is_ascii_uppercase())
}

pub(super) fn init_tiles(m: &mut FpgaModel) -> Result<(), ModelError> {
    // one center row, cfg_rows row-groups, two extra tiles at top and
    // bottom each
    let tile_rows = 1 + ROW_SIZE * m.cfg_rows + 2 + 2;
    let mut tile_columns = LEFT_SIDE_WIDTH + RIGHT_SIDE_WIDTH;
    for c in m.cfg_columns.chars() {
        match c {
            'L' | 'M' => tile_columns += 2,
            'B' | 'D' => tile_columns += 3,
            'R' => tile_columns += 2 + 2,
            ' ' | 'n' | 'g' => {}
            other => return Err(ModelError::BadDescriptor(other)),
        }
    }
    m.x_width = tile_columns;
    m.y_height = tile_rows;
    m.center_y = TOP_IO_TILES + (m.cfg_rows / 2) * ROW_SIZE;
    m.tiles = vec![Tile::default(); tile_rows * tile_columns];
    m.x_major = vec![None; tile_columns];
    for x in 0..LEFT_SIDE_WIDTH {
        m.x_major[x] = Some(1);
    }
    for x in tile_columns - RIGHT_SIDE_WIDTH..tile_columns {
        m.x_major[x] = Some(17);
    }

    //
    // left to right through the configured columns, top to bottom
    // within each
    //

    let columns = m.cfg_columns.clone();
    let mut left_side = true; // until the 'R' center column
    let mut i = LEFT_SIDE_WIDTH;
    let mut major = 2;
    for (j, cur_cfgcol) in columns.char_indices() {
        match cur_cfgcol {
            'L' | 'M' => {
                let no_io = next_non_whitespace(&columns[j + 1..]) == Some('n');
                let last_col = last_major(&columns, j);
                let logic_xl = cur_cfgcol == 'L';

                m.x_major[i] = Some(major);
                m.x_major[i + 1] = Some(major);
                major += 1;

                m.tile_mut(0, i).flags |= TileFlag::FabricRoutingCol;
                if no_io {
                    m.tile_mut(0, i).flags |= TileFlag::RoutingNoIo;
                }
                m.tile_mut(0, i + 1).flags |= TileFlag::FabricLogicCol;
                for k in (0..m.cfg_rows).rev() {
                    let mut row_top_y = TOP_IO_TILES + (m.cfg_rows - 1 - k) * ROW_SIZE;
                    if k < m.cfg_rows / 2 {
                        row_top_y += 1; // below the central regs row
                    }
                    let start = if k == m.cfg_rows - 1 && !no_io { 2 } else { 0 };
                    let end = if k == 0 && !no_io { 14 } else { 16 };
                    for l in start..end {
                        let y = row_top_y + if l < 8 { l } else { l + 1 };
                        m.tile_mut(y, i).kind = if l < 15 || (k == 0 && no_io) {
                            TileKind::Routing
                        } else {
                            TileKind::RoutingBrk
                        };
                        let dev = m.tile_mut(y, i + 1);
                        if logic_xl {
                            dev.flags |= TileFlag::LogicXlDev;
                            dev.kind = TileKind::LogicXl;
                        } else {
                            dev.flags |= TileFlag::LogicXmDev;
                            dev.kind = TileKind::LogicXm;
                        }
                    }
                    let hclk = row_top_y + 8;
                    if logic_xl {
                        m.tile_mut(hclk, i).kind = TileKind::HclkRoutingXl;
                        m.tile_mut(hclk, i + 1).kind = TileKind::HclkLogicXl;
                    } else {
                        m.tile_mut(hclk, i).kind = TileKind::HclkRoutingXm;
                        m.tile_mut(hclk, i + 1).kind = TileKind::HclkLogicXm;
                    }
                }

                if last_col == Some('R') {
                    m.tile_mut(TOP_INNER_ROW, i).kind = TileKind::IoBufpllTermT;
                    m.tile_mut(tile_rows - 2, i).kind = TileKind::IoBufpllTermB;
                } else {
                    m.tile_mut(TOP_INNER_ROW, i).kind = TileKind::IoTermT;
                    m.tile_mut(tile_rows - 2, i).kind = if no_io {
                        TileKind::LogicRoutingTermB
                    } else {
                        TileKind::IoTermB
                    };
                }
                if !no_io {
                    m.tile_mut(0, i).kind = TileKind::IoT;
                    m.tile_mut(tile_rows - 1, i).kind = TileKind::IoB;
                    for y in [2, 3, tile_rows - 4, tile_rows - 3] {
                        m.tile_mut(y, i).kind = TileKind::IoRouting;
                    }
                }

                if last_col == Some('R') {
                    m.tile_mut(TOP_INNER_ROW, i + 1).kind = TileKind::IoLogicRegTermT;
                    m.tile_mut(tile_rows - 2, i + 1).kind = TileKind::IoLogicRegTermB;
                } else {
                    m.tile_mut(TOP_INNER_ROW, i + 1).kind = TileKind::IoLogicTermT;
                    m.tile_mut(tile_rows - 2, i + 1).kind = if no_io {
                        TileKind::LogicNoioTermB
                    } else {
                        TileKind::IoLogicTermB
                    };
                }
                if !no_io {
                    for (y, kind) in [
                        (2, TileKind::IoOuterT),
                        (3, TileKind::IoInnerT),
                        (tile_rows - 4, TileKind::IoInnerB),
                        (tile_rows - 3, TileKind::IoOuterB),
                    ] {
                        let t = m.tile_mut(y, i + 1);
                        t.kind = kind;
                        t.flags |= TileFlag::IologicDelayDev;
                    }
                }

                if logic_xl {
                    m.tile_mut(m.center_y, i).kind = TileKind::ReghRoutingXl;
                    m.tile_mut(m.center_y, i + 1).kind = TileKind::ReghLogicXl;
                } else {
                    m.tile_mut(m.center_y, i).kind = TileKind::ReghRoutingXm;
                    m.tile_mut(m.center_y, i + 1).kind = TileKind::ReghLogicXm;
                }
                i += 2;
            }
            'B' | 'D' => {
                let is_bram = cur_cfgcol == 'B';
                if is_bram && next_non_whitespace(&columns[j + 1..]) == Some('g') {
                    if left_side {
                        m.left_gclk_sep_x = i + 2;
                    } else {
                        m.right_gclk_sep_x = i + 2;
                    }
                }
                m.x_major[i] = Some(major);
                m.x_major[i + 1] = Some(major);
                m.x_major[i + 2] = Some(major);
                major += 1;

                // no_io is always on for bram and macc columns
                m.tile_mut(0, i).flags |= TileFlag::FabricRoutingCol | TileFlag::RoutingNoIo;
                m.tile_mut(0, i + 1).flags |= TileFlag::FabricBramMaccRoutingCol;
                m.tile_mut(0, i + 2).flags |= if is_bram {
                    TileFlag::FabricBramCol
                } else {
                    TileFlag::FabricMaccCol
                };
                for k in (0..m.cfg_rows).rev() {
                    let mut row_top_y = TOP_IO_TILES + (m.cfg_rows - 1 - k) * ROW_SIZE;
                    if k < m.cfg_rows / 2 {
                        row_top_y += 1;
                    }
                    for l in 0..16 {
                        let y = row_top_y + if l < 8 { l } else { l + 1 };
                        m.tile_mut(y, i).kind = match (is_bram, l) {
                            (true, 15) => TileKind::BramRoutingBrk,
                            (true, _) => TileKind::BramRouting,
                            (false, 15) => TileKind::RoutingBrk,
                            (false, _) => TileKind::Routing,
                        };
                        m.tile_mut(y, i + 1).kind = TileKind::RoutingVia;
                        if l % 4 == 0 {
                            let dev = m.tile_mut(y + 3, i + 2);
                            if is_bram {
                                dev.kind = TileKind::Bram;
                                dev.flags |= TileFlag::BramDev;
                            } else {
                                dev.kind = TileKind::Macc;
                                dev.flags |= TileFlag::MaccDev;
                            }
                        }
                    }
                    let hclk = row_top_y + 8;
                    if is_bram {
                        m.tile_mut(hclk, i).kind = TileKind::HclkBramRouting;
                        m.tile_mut(hclk, i + 1).kind = TileKind::HclkBramRoutingVia;
                        m.tile_mut(hclk, i + 2).kind = TileKind::HclkBram;
                    } else {
                        m.tile_mut(hclk, i).kind = TileKind::HclkMaccRouting;
                        m.tile_mut(hclk, i + 1).kind = TileKind::HclkMaccRoutingVia;
                        m.tile_mut(hclk, i + 2).kind = TileKind::HclkMacc;
                    }
                }

                if is_bram {
                    m.tile_mut(TOP_INNER_ROW, i).kind = TileKind::BramRoutingTermT;
                    m.tile_mut(tile_rows - 2, i).kind = TileKind::BramRoutingTermB;
                    m.tile_mut(TOP_INNER_ROW, i + 1).kind = TileKind::BramRoutingViaTermT;
                    m.tile_mut(tile_rows - 2, i + 1).kind = TileKind::BramRoutingViaTermB;
                    m.tile_mut(TOP_INNER_ROW, i + 2).kind = if left_side {
                        TileKind::BramTermLt
                    } else {
                        TileKind::BramTermRt
                    };
                    m.tile_mut(tile_rows - 2, i + 2).kind = if left_side {
                        TileKind::BramTermLb
                    } else {
                        TileKind::BramTermRb
                    };
                    m.tile_mut(m.center_y, i).kind = TileKind::ReghBramRouting;
                    m.tile_mut(m.center_y, i + 1).kind = TileKind::ReghBramRoutingVia;
                    m.tile_mut(m.center_y, i + 2).kind = if left_side {
                        TileKind::ReghBramL
                    } else {
                        TileKind::ReghBramR
                    };
                } else {
                    m.tile_mut(TOP_INNER_ROW, i).kind = TileKind::MaccRoutingTermT;
                    m.tile_mut(tile_rows - 2, i).kind = TileKind::MaccRoutingTermB;
                    m.tile_mut(TOP_INNER_ROW, i + 1).kind = TileKind::MaccViaTermT;
                    m.tile_mut(tile_rows - 2, i + 1).kind = TileKind::IoLogicTermB;
                    m.tile_mut(TOP_INNER_ROW, i + 2).kind = if left_side {
                        TileKind::MaccTermTl
                    } else {
                        TileKind::MaccTermTr
                    };
                    m.tile_mut(tile_rows - 2, i + 2).kind = if left_side {
                        TileKind::MaccTermBl
                    } else {
                        TileKind::MaccTermBr
                    };
                    m.tile_mut(m.center_y, i).kind = TileKind::ReghMaccRouting;
                    m.tile_mut(m.center_y, i + 1).kind = TileKind::ReghMaccRoutingVia;
                    m.tile_mut(m.center_y, i + 2).kind = TileKind::ReghMaccL;
                }
                i += 3;
            }
            'R' => {
                if next_non_whitespace(&columns[j + 1..]) != Some('M') {
                    // a logic-M column must follow the center for the
                    // top and bottom bufpll and reg routing
                    return Err(ModelError::BadDescriptor('R'));
                }
                m.center_x = i + 3;
                for xo in 0..4 {
                    m.x_major[i + xo] = Some(major);
                }
                major += 1;
                left_side = false;
                for k in (0..m.cfg_rows).rev() {
                    let mut row_top_y = TOP_IO_TILES + (m.cfg_rows - 1 - k) * ROW_SIZE;
                    if k < m.cfg_rows / 2 {
                        row_top_y += 1;
                    }
                    for l in 0..16 {
                        let y = row_top_y + if l < 8 { l } else { l + 1 };

                        // the top-left and bottom-right chip corners
                        // leave gaps in the center routing column
                        if (k < m.cfg_rows - 1 || l >= 2) && (k > 0 || l < 14) {
                            m.tile_mut(y, i).kind = if l < 15 {
                                TileKind::Routing
                            } else {
                                TileKind::RoutingBrk
                            };
                            if l == 7 {
                                m.tile_mut(y, i + 1).kind = TileKind::RoutingViaIo;
                            } else if l == 8 {
                                m.tile_mut(y, i + 1).kind = if k % 2 == 1 {
                                    TileKind::RoutingViaCarry
                                } else {
                                    TileKind::RoutingViaIoDcm
                                };
                            } else if l == 15 && k == m.cfg_rows / 2 {
                                m.tile_mut(y, i + 1).kind = TileKind::RoutingViaRegc;
                            } else {
                                let dev = m.tile_mut(y, i + 1);
                                dev.kind = TileKind::LogicXl;
                                dev.flags |= TileFlag::LogicXlDev;
                            }
                        }
                        if l == 7 || (l == 8 && k % 2 == 0) {
                            m.tile_mut(y, i).kind = TileKind::IoRouting;
                        }

                        if l == 7 {
                            // pll on odd rows, dcm on even
                            let half_cfg_rows = m.cfg_rows / 2;
                            let cmt = m.tile_mut(row_top_y + l, i + 2);
                            if k % 2 == 1 {
                                cmt.flags |= TileFlag::PllDev;
                                cmt.kind = if k < half_cfg_rows {
                                    TileKind::PllB
                                } else {
                                    TileKind::PllT
                                };
                            } else {
                                cmt.flags |= TileFlag::DcmDev;
                                cmt.kind = if k < half_cfg_rows {
                                    TileKind::DcmB
                                } else {
                                    TileKind::DcmT
                                };
                            }
                        }
                        // four midbuf tiles in the middle of the top
                        // and bottom halves
                        if l == 15 {
                            m.tile_mut(row_top_y + l + 1, i + 3).kind =
                                if k == m.cfg_rows * 3 / 4 {
                                    TileKind::RegvMidbufT
                                } else if k == m.cfg_rows / 4 {
                                    TileKind::RegvHclkbufB
                                } else {
                                    TileKind::RegvBrk
                                };
                        } else if l == 0 && k == m.cfg_rows * 3 / 4 - 1 {
                            m.tile_mut(row_top_y + l, i + 3).kind = TileKind::RegvHclkbufT;
                        } else if l == 0 && k + 1 == m.cfg_rows / 4 {
                            m.tile_mut(row_top_y + l, i + 3).kind = TileKind::RegvMidbufB;
                        } else if l == 8 {
                            m.tile_mut(row_top_y + l + 1, i + 3).kind = if k < m.cfg_rows / 2 {
                                TileKind::RegvB
                            } else {
                                TileKind::RegvT
                            };
                        } else {
                            m.tile_mut(y, i + 3).kind = TileKind::Regv;
                        }
                    }
                    let hclk = row_top_y + 8;
                    m.tile_mut(hclk, i).kind = TileKind::HclkRoutingXl;
                    m.tile_mut(hclk, i + 1).kind = TileKind::HclkLogicXl;
                    m.tile_mut(hclk, i + 3).kind = TileKind::HclkRegv;
                }
                m.tile_mut(0, i).kind = TileKind::IoT;
                m.tile_mut(tile_rows - 1, i).kind = TileKind::IoB;
                m.tile_mut(TOP_INNER_ROW, i).kind = TileKind::IoTermT;
                m.tile_mut(tile_rows - 2, i).kind = TileKind::IoTermB;
                for y in [2, 3, tile_rows - 4, tile_rows - 3] {
                    m.tile_mut(y, i).kind = TileKind::IoRouting;
                }

                m.tile_mut(TOP_INNER_ROW, i + 1).kind = TileKind::IoLogicRegTermT;
                m.tile_mut(tile_rows - 2, i + 1).kind = TileKind::IoLogicRegTermB;
                for (y, kind) in [
                    (2, TileKind::IoOuterT),
                    (3, TileKind::IoInnerT),
                    (tile_rows - 4, TileKind::IoInnerB),
                    (tile_rows - 3, TileKind::IoOuterB),
                ] {
                    let t = m.tile_mut(y, i + 1);
                    t.kind = kind;
                    t.flags |= TileFlag::IologicDelayDev;
                }

                m.tile_mut(0, i + 2).kind = TileKind::RegT;
                m.tile_mut(TOP_INNER_ROW, i + 2).kind = TileKind::RegTermT;
                m.tile_mut(tile_rows - 2, i + 2).kind = TileKind::RegTermB;
                m.tile_mut(tile_rows - 1, i + 2).kind = TileKind::RegB;
                m.tile_mut(TOP_INNER_ROW, i + 3).kind = TileKind::RegvTermT;
                m.tile_mut(tile_rows - 2, i + 3).kind = TileKind::RegvTermB;

                m.tile_mut(m.center_y, i).kind = TileKind::RegcRouting;
                m.tile_mut(m.center_y, i + 1).kind = TileKind::RegcLogic;
                m.tile_mut(m.center_y, i + 2).kind = TileKind::RegcCmt;
                m.tile_mut(m.center_y, i + 3).kind = TileKind::Center;

                i += 4;
            }
            ' ' | 'g' | 'n' => {}
            other => return Err(ModelError::BadDescriptor(other)),
        }
    }

    init_left_io(m);
    init_right_io(m);
    Ok(())
}

fn init_left_io(m: &mut FpgaModel) {
    let tile_rows = m.y_height;
    let wiring = m.cfg_left_wiring.clone();
    let wiring = wiring.as_bytes();

    for k in (0..m.cfg_rows).rev() {
        let mut row_top_y = TOP_IO_TILES + (m.cfg_rows - 1 - k) * ROW_SIZE;
        if k < m.cfg_rows / 2 {
            row_top_y += 1;
        }
        for l in 0..16 {
            let y = row_top_y + if l < 8 { l } else { l + 1 };
            let wired = wiring[(m.cfg_rows - 1 - k) * 16 + l] == b'W';

            // +0: the pad column
            if wired {
                let t = m.tile_mut(y, 0);
                t.flags |= TileFlag::Wired;
                t.kind = TileKind::IoL;
            }
            // +1: the term column
            if (k == m.cfg_rows - 1 && l == 0) || (k == 0 && l == 15) {
                m.tile_mut(y, 1).kind = TileKind::CornerTermL;
            } else if k == m.cfg_rows / 2 && l == 12 {
                m.tile_mut(row_top_y + l + 1, 1).kind = TileKind::IoTermLUpperTop;
            } else if k == m.cfg_rows / 2 && l == 13 {
                m.tile_mut(row_top_y + l + 1, 1).kind = TileKind::IoTermLUpperBot;
            } else if k + 1 == m.cfg_rows / 2 && l == 0 {
                m.tile_mut(row_top_y + l, 1).kind = TileKind::IoTermLLowerTop;
            } else if k + 1 == m.cfg_rows / 2 && l == 1 {
                m.tile_mut(row_top_y + l, 1).kind = TileKind::IoTermLLowerBot;
            } else {
                m.tile_mut(y, 1).kind = TileKind::IoTermL;
            }
            // +2: the io routing column
            if wired {
                m.tile_mut(y, 2).kind = if l == 15 && k != 0 && k != m.cfg_rows / 2 {
                    TileKind::RoutingIoLBrk
                } else {
                    TileKind::RoutingIoL
                };
            } else if k != 0 && k != m.cfg_rows / 2 && l == 15 {
                m.tile_mut(y, 2).kind = TileKind::RoutingBrk;
            } else if k == m.cfg_rows / 2 && l == 14 {
                m.tile_mut(y, 2).kind = TileKind::RoutingGclk;
            } else {
                m.tile_mut(y, 2).kind = TileKind::Routing;
            }
            // +3: the io device column
            if wired {
                m.tile_mut(y, 3).kind = TileKind::RoutingIoViaL;
            } else if k == m.cfg_rows - 1 && l == 0 {
                m.tile_mut(y, 3).kind = TileKind::CornerTl;
            } else if k == 0 && l == 15 {
                m.tile_mut(y, 3).kind = TileKind::CornerBl;
            } else if k != 0 && k != m.cfg_rows / 2 && l == 15 {
                m.tile_mut(y, 3).kind = TileKind::RoutingViaCarry;
            } else {
                m.tile_mut(y, 3).kind = TileKind::RoutingVia;
            }
        }
        let hclk = row_top_y + 8;
        m.tile_mut(hclk, 1).kind = TileKind::HclkTermL;
        m.tile_mut(hclk, 2).kind = TileKind::HclkRoutingIoL;
        m.tile_mut(hclk, 3).kind = if k >= m.cfg_rows / 2 {
            if k > m.cfg_rows * 3 / 4 {
                TileKind::HclkIoTopUpL
            } else if k == m.cfg_rows * 3 / 4 {
                TileKind::HclkIoTopSplitL
            } else {
                TileKind::HclkIoTopDnL
            }
        } else if k + 1 < m.cfg_rows / 4 {
            TileKind::HclkIoBotDnL
        } else if k + 1 == m.cfg_rows / 4 {
            TileKind::HclkIoBotSplitL
        } else {
            TileKind::HclkIoBotUpL
        };
        m.tile_mut(hclk, 4).kind = TileKind::HclkMcb;
    }

    m.tile_mut(m.center_y - 3, 0).kind = TileKind::IoPciL;
    m.tile_mut(m.center_y - 2, 0).kind = TileKind::IoPciConnL;
    m.tile_mut(m.center_y - 1, 0).kind = TileKind::IoPciConnL;
    m.tile_mut(m.center_y, 0).kind = TileKind::RegL;
    m.tile_mut(m.center_y + 1, 0).kind = TileKind::IoRdyL;

    m.tile_mut(m.center_y, 1).kind = TileKind::ReghIoTermL;

    m.tile_mut(TOP_INNER_ROW, 2).kind = TileKind::CornerTermT;
    m.tile_mut(tile_rows - 2, 2).kind = TileKind::CornerTermB;
    m.tile_mut(m.center_y, 2).kind = TileKind::ReghRoutingIoL;

    m.tile_mut(TOP_INNER_ROW, 3).kind = TileKind::RoutingIoPciCeL;
    m.tile_mut(tile_rows - 2, 3).kind = TileKind::RoutingIoPciCeL;
    m.tile_mut(m.center_y, 3).kind = TileKind::ReghIoL;
    m.tile_mut(m.center_y, 4).kind = TileKind::ReghMcb;
}

fn init_right_io(m: &mut FpgaModel) {
    let tile_rows = m.y_height;
    let tile_columns = m.x_width;
    let wiring = m.cfg_right_wiring.clone();
    let wiring = wiring.as_bytes();

    for k in (0..m.cfg_rows).rev() {
        let mut row_top_y = TOP_IO_TILES + (m.cfg_rows - 1 - k) * ROW_SIZE;
        if k < m.cfg_rows / 2 {
            row_top_y += 1;
        }
        for l in 0..16 {
            let y = row_top_y + if l < 8 { l } else { l + 1 };
            let wired = wiring[(m.cfg_rows - 1 - k) * 16 + l] == b'W';

            // -1: the pad column
            if wired {
                m.tile_mut(y, tile_columns - 1).flags |= TileFlag::Wired;
            }
            if k == m.cfg_rows / 2 && l == 13 {
                m.tile_mut(row_top_y + l + 1, tile_columns - 1).kind = TileKind::IoRdyR;
            } else if k == m.cfg_rows / 2 && (l == 14 || l == 15) {
                m.tile_mut(row_top_y + l + 1, tile_columns - 1).kind = TileKind::IoPciConnR;
            } else if k + 1 == m.cfg_rows / 2 && l == 0 {
                m.tile_mut(row_top_y + l, tile_columns - 1).kind = TileKind::IoPciR;
            } else if wired {
                m.tile_mut(y, tile_columns - 1).kind = TileKind::IoR;
            }
            // -2: the term column
            if (k == m.cfg_rows - 1 && l <= 1) || (k == 0 && l >= 14) {
                m.tile_mut(y, tile_columns - 2).kind = TileKind::CornerTermR;
            } else if k == m.cfg_rows / 2 && l == 12 {
                m.tile_mut(row_top_y + l + 1, tile_columns - 2).kind = TileKind::IoTermRUpperTop;
            } else if k == m.cfg_rows / 2 && l == 13 {
                m.tile_mut(row_top_y + l + 1, tile_columns - 2).kind = TileKind::IoTermRUpperBot;
            } else if k + 1 == m.cfg_rows / 2 && l == 0 {
                m.tile_mut(row_top_y + l, tile_columns - 2).kind = TileKind::IoTermRLowerTop;
            } else if k + 1 == m.cfg_rows / 2 && l == 1 {
                m.tile_mut(row_top_y + l, tile_columns - 2).kind = TileKind::IoTermRLowerBot;
            } else {
                m.tile_mut(y, tile_columns - 2).kind = TileKind::IoTermR;
            }
            // -4: the io device column
            if wired {
                m.tile_mut(y, tile_columns - 4).kind = TileKind::RoutingIoViaR;
            } else if k == m.cfg_rows - 1 && l == 0 {
                m.tile_mut(y, tile_columns - 4).kind = TileKind::CornerTrUpper;
            } else if k == m.cfg_rows - 1 && l == 1 {
                m.tile_mut(y, tile_columns - 4).kind = TileKind::CornerTrLower;
            } else if k != 0 && k != m.cfg_rows / 2 && l == 15 {
                m.tile_mut(y, tile_columns - 4).kind = TileKind::RoutingViaCarry;
            } else if k == 0 && l == 14 {
                m.tile_mut(y, tile_columns - 4).kind = TileKind::CornerBrUpper;
            } else if k == 0 && l == 15 {
                m.tile_mut(y, tile_columns - 4).kind = TileKind::CornerBrLower;
            } else {
                m.tile_mut(y, tile_columns - 4).kind = TileKind::RoutingVia;
            }
            // -5: the io routing column
            if wired {
                m.tile_mut(y, tile_columns - 5).kind = TileKind::IoRouting;
            } else if k != 0 && k != m.cfg_rows / 2 && l == 15 {
                m.tile_mut(y, tile_columns - 5).kind = TileKind::RoutingBrk;
            } else if k == m.cfg_rows / 2 && l == 14 {
                m.tile_mut(y, tile_columns - 5).kind = TileKind::RoutingGclk;
            } else {
                m.tile_mut(y, tile_columns - 5).kind = TileKind::Routing;
            }
        }
        let hclk = row_top_y + 8;
        m.tile_mut(hclk, tile_columns - 2).kind = TileKind::HclkTermR;
        m.tile_mut(hclk, tile_columns - 3).kind = TileKind::HclkMcb;
        m.tile_mut(hclk, tile_columns - 5).kind = TileKind::HclkRoutingIoR;
        m.tile_mut(hclk, tile_columns - 4).kind = if k >= m.cfg_rows / 2 {
            if k > m.cfg_rows * 3 / 4 {
                TileKind::HclkIoTopUpR
            } else if k == m.cfg_rows * 3 / 4 {
                TileKind::HclkIoTopSplitR
            } else {
                TileKind::HclkIoTopDnR
            }
        } else if k + 1 < m.cfg_rows / 4 {
            TileKind::HclkIoBotDnR
        } else if k + 1 == m.cfg_rows / 4 {
            TileKind::HclkIoBotSplitR
        } else {
            TileKind::HclkIoBotUpR
        };
    }
    m.tile_mut(TOP_INNER_ROW, tile_columns - 5).kind = TileKind::CornerTermT;
    m.tile_mut(tile_rows - 2, tile_columns - 5).kind = TileKind::CornerTermB;
    m.tile_mut(TOP_INNER_ROW, tile_columns - 4).kind = TileKind::RoutingIoPciCeR;
    m.tile_mut(tile_rows - 2, tile_columns - 4).kind = TileKind::RoutingIoPciCeR;
    m.tile_mut(m.center_y, tile_columns - 1).kind = TileKind::RegR;
    m.tile_mut(m.center_y, tile_columns - 2).kind = TileKind::ReghIoTermR;
    m.tile_mut(m.center_y, tile_columns - 3).kind = TileKind::ReghMcb;
    m.tile_mut(m.center_y, tile_columns - 4).kind = TileKind::ReghIoR;
    m.tile_mut(m.center_y, tile_columns - 5).kind = TileKind::ReghRoutingIoR;
}
