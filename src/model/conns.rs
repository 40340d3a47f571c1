//! Inter-tile wires (build phase 4).
//!
//! Each pass emits a family of wire nets; a net is expanded into
//! directed edges between every pair of its points. The passes run in a
//! fixed order, starting with the logic carry chain and ending with the
//! global clock tree.

use flagset::FlagSet;

use crate::consts::*;

use super::devices::{DevKind, LogicSubtype};
use super::{FpgaModel, ModelError, WNet, WPoint, COUNT_DOWN};

fn wnet(last_inc: usize, pts: &[(&str, usize, usize, usize)]) -> WNet {
    WNet {
        last_inc,
        pts: pts
            .iter()
            .map(|&(name, start, y, x)| WPoint::new(name, start, y, x))
            .collect(),
    }
}

fn top_term(_m: &FpgaModel) -> usize {
    TOP_INNER_ROW
}

fn bot_term(m: &FpgaModel) -> usize {
    m.y_height - BOT_INNER_ROW
}

pub(super) fn init_conns(m: &mut FpgaModel) -> Result<(), ModelError> {
    connect_logic_carry(m)?;
    connect_clk_sr(m, "CLK")?;
    connect_clk_sr(m, "SR")?;
    run_gfan(m)?;
    run_term_wires(m)?;
    run_io_wires(m)?;
    run_direction_wires(m)?;
    run_logic_inout(m)?;
    run_gclk(m)?;
    Ok(())
}

fn connect_logic_carry(m: &mut FpgaModel) -> Result<(), ModelError> {
    for x in 0..m.x_width {
        if !m.is_atx(XCheck::FabricLogicCol | XCheck::CenterLogicCol, x) {
            continue;
        }
        for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
            if !m.has_device_type(y, x, DevKind::Logic, LogicSubtype::M as u8) {
                continue;
            }
            if m.is_aty(YCheck::ChipHorizRegs, y - 1)
                && m.has_device_type(y - 2, x, DevKind::Logic, LogicSubtype::M as u8)
            {
                let net = wnet(
                    0,
                    &[
                        ("M_CIN", 0, y - 2, x),
                        ("REGH_CLEXM_COUT", 0, y - 1, x),
                        ("M_COUT_N", 0, y, x),
                    ],
                );
                m.add_conn_net(true, false, &net)?;
            } else if m.is_aty(YCheck::RowHorizAxsymm, y - 1)
                && m.has_device_type(y - 2, x, DevKind::Logic, LogicSubtype::M as u8)
            {
                let net = wnet(
                    0,
                    &[
                        ("M_CIN", 0, y - 2, x),
                        ("HCLK_CLEXM_COUT", 0, y - 1, x),
                        ("M_COUT_N", 0, y, x),
                    ],
                );
                m.add_conn_net(true, false, &net)?;
            } else if m.has_device_type(y - 1, x, DevKind::Logic, LogicSubtype::M as u8) {
                m.add_conn_bi(y, x, "M_COUT_N", y - 1, x, "M_CIN")?;
            }
        }
    }
    Ok(())
}

fn connect_clk_sr(m: &mut FpgaModel, clk_sr: &str) -> Result<(), ModelError> {
    let w = format!("{clk_sr}%i");
    // fabric logic, bram, macc
    for x in LEFT_SIDE_WIDTH..m.x_width - RIGHT_SIDE_WIDTH {
        if m.is_atx(XCheck::FabricBramRoutingCol | XCheck::FabricMaccRoutingCol, x) {
            for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
                if m.is_aty(YCheck::RowHorizAxsymm | YCheck::ChipHorizRegs, y) {
                    continue;
                }
                m.add_conn_range(
                    true, false, y, x, &w, 0, 1,
                    y, x + 1, &format!("INT_INTERFACE_{clk_sr}%i"), 0,
                )?;
                if m.has_device(y, x + 2, DevKind::Bram16) {
                    for int in 0..4 {
                        m.add_conn_range(
                            true, false, y - int, x, &w, 0, 1,
                            y, x + 2, &format!("BRAM_{clk_sr}%i_INT{int}"), 0,
                        )?;
                    }
                }
                if m.has_device(y, x + 2, DevKind::Macc) {
                    for int in 0..4 {
                        m.add_conn_range(
                            true, false, y - int, x, &w, 0, 1,
                            y, x + 2, &format!("MACC_{clk_sr}%i_INT{int}"), 0,
                        )?;
                    }
                }
            }
        }
        if m.is_atx(XCheck::FabricLogicRoutingCol | XCheck::CenterRoutingCol, x) {
            for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
                if m.has_device_type(y, x + 1, DevKind::Logic, LogicSubtype::M as u8) {
                    m.add_conn_range(
                        true, false, y, x, &w, 0, 1,
                        y, x + 1, &format!("CLEXM_{clk_sr}%i"), 0,
                    )?;
                } else if m.has_device_type(y, x + 1, DevKind::Logic, LogicSubtype::L as u8) {
                    m.add_conn_range(
                        true, false, y, x, &w, 0, 1,
                        y, x + 1, &format!("CLEXL_{clk_sr}%i"), 0,
                    )?;
                } else if m.has_device(y, x + 1, DevKind::Ilogic) {
                    m.add_conn_range(
                        true, false, y, x, &w, 0, 1,
                        y, x + 1, &format!("IOI_{clk_sr}%i"), 0,
                    )?;
                }
            }
        }
    }
    // center PLLs and DCMs
    m.add_conn_range(
        true, false,
        m.center_y - 1, m.center_x - CENTER_ROUTING_O, &w, 0, 1,
        m.center_y - 1, m.center_x - CENTER_LOGIC_O,
        &format!("INT_INTERFACE_REGC_{clk_sr}%i"), 0,
    )?;
    for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
        if !m.is_aty(YCheck::RowHorizAxsymm, y) {
            continue;
        }
        let cmt_x = m.center_x - CENTER_CMTPLL_O;
        for (dev, pre) in [(DevKind::Pll, "PLL"), (DevKind::Dcm, "DCM")] {
            if !m.has_device(y - 1, cmt_x, dev) {
                continue;
            }
            let net = wnet(
                1,
                &[
                    (&w, 0, y - 1, m.center_x - CENTER_ROUTING_O),
                    (&format!("INT_INTERFACE_{clk_sr}%i"), 0, y - 1, m.center_x - CENTER_LOGIC_O),
                    (&format!("{pre}_CLB2_{clk_sr}%i"), 0, y - 1, cmt_x),
                ],
            );
            m.add_conn_net(true, false, &net)?;
            let net = wnet(
                1,
                &[
                    (&w, 0, y + 1, m.center_x - CENTER_ROUTING_O),
                    (&format!("INT_INTERFACE_{clk_sr}%i"), 0, y + 1, m.center_x - CENTER_LOGIC_O),
                    (&format!("{pre}_CLB1_{clk_sr}%i"), 0, y - 1, cmt_x),
                ],
            );
            m.add_conn_net(true, false, &net)?;
        }
    }
    // left and right side
    for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
        if m.is_aty(YCheck::RowHorizAxsymm | YCheck::ChipHorizRegs, y) {
            continue;
        }
        for (x, local, wired) in [
            (LEFT_IO_ROUTING, LEFT_LOCAL_HEIGHT, YCheck::LeftWired),
            (m.x_width - RIGHT_IO_ROUTING_O, RIGHT_LOCAL_HEIGHT, YCheck::RightWired),
        ] {
            let dest = if y < TOP_IO_TILES + local || y > m.y_height - BOT_IO_TILES - local - 1 {
                format!("INT_INTERFACE_LOCAL_{clk_sr}%i")
            } else if m.is_aty(wired, y) {
                format!("IOI_{clk_sr}%i")
            } else {
                format!("INT_INTERFACE_{clk_sr}%i")
            };
            m.add_conn_range(true, false, y, x, &w, 0, 1, y, x + 1, &dest, 0)?;
        }
    }
    Ok(())
}

fn run_gfan(m: &mut FpgaModel) -> Result<(), ModelError> {
    // left and right IO devs
    for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
        if m.is_aty(YCheck::LeftWired, y) {
            m.add_conn_range(
                true, false, y, LEFT_IO_ROUTING, "INT_IOI_GFAN%i", 0, 1,
                y, LEFT_IO_DEVS, "IOI_GFAN%i", 0,
            )?;
        }
        if m.is_aty(YCheck::RightWired, y) {
            m.add_conn_range(
                true, false,
                y, m.x_width - RIGHT_IO_ROUTING_O, "INT_IOI_GFAN%i", 0, 1,
                y, m.x_width - RIGHT_IO_DEVS_O, "IOI_GFAN%i", 0,
            )?;
        }
    }
    // top and bottom IO devs
    for x in LEFT_SIDE_WIDTH..m.x_width - RIGHT_SIDE_WIDTH {
        if m.is_atx(XCheck::FabricLogicRoutingCol | XCheck::CenterRoutingCol, x)
            && !m.is_atx(XCheck::RoutingNoIo, x)
        {
            for i in 0..TOPBOT_IO_ROWS {
                m.add_conn_range(
                    true, false, TOP_OUTER_IO + i, x, "INT_IOI_GFAN%i", 0, 1,
                    TOP_OUTER_IO + i, x + 1, "IOI_GFAN%i", 0,
                )?;
                m.add_conn_range(
                    true, false,
                    m.y_height - BOT_OUTER_IO - i, x, "INT_IOI_GFAN%i", 0, 1,
                    m.y_height - BOT_OUTER_IO - i, x + 1, "IOI_GFAN%i", 0,
                )?;
            }
        }
    }
    // center devs
    for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
        if !m.is_aty(YCheck::RowHorizAxsymm, y) {
            continue;
        }
        let cmt_x = m.center_x - CENTER_CMTPLL_O;
        if m.tile(y - 1, cmt_x).flags.contains(TileFlag::DcmDev) {
            let net = wnet(
                1,
                &[
                    ("INT_IOI_GFAN%i", 0, y - 1, m.center_x - CENTER_ROUTING_O),
                    ("INT_INTERFACE_GFAN%i", 0, y - 1, m.center_x - CENTER_LOGIC_O),
                    ("DCM2_GFAN%i", 0, y - 1, cmt_x),
                ],
            );
            m.add_conn_net(true, false, &net)?;
            let net = wnet(
                1,
                &[
                    ("INT_IOI_GFAN%i", 0, y + 1, m.center_x - CENTER_ROUTING_O),
                    ("INT_INTERFACE_GFAN%i", 0, y + 1, m.center_x - CENTER_LOGIC_O),
                    ("DCM1_GFAN%i", 0, y - 1, cmt_x),
                ],
            );
            m.add_conn_net(true, false, &net)?;
        } else if m.tile(y - 1, cmt_x).flags.contains(TileFlag::PllDev) {
            let net = wnet(
                1,
                &[
                    ("INT_IOI_GFAN%i", 0, y - 1, m.center_x - CENTER_ROUTING_O),
                    ("INT_INTERFACE_GFAN%i", 0, y - 1, m.center_x - CENTER_LOGIC_O),
                    ("PLL_CLB2_GFAN%i", 0, y - 1, cmt_x),
                ],
            );
            m.add_conn_net(true, false, &net)?;
        }
    }
    Ok(())
}

// Wires going from the top and bottom term tiles vertically to support
// the two ILOGIC/OLOGIC/IODELAY tiles below or above the term tile,
// plus the horizontal PCICE collection toward the center.
fn run_term_wires(m: &mut FpgaModel) -> Result<(), ModelError> {
    for x in LEFT_SIDE_WIDTH + 1..m.x_width - RIGHT_SIDE_WIDTH {
        let y = top_term(m);
        if m.has_device(y + 1, x, DevKind::Ilogic) {
            let nets = [
                wnet(3, &[
                    ("TTERM_CLB_IOCE%i_S", 0, y, x),
                    ("TIOI_IOCE%i", 0, y + 1, x),
                    ("TIOI_INNER_IOCE%i", 0, y + 2, x),
                ]),
                wnet(3, &[
                    ("TTERM_CLB_IOCLK%i_S", 0, y, x),
                    ("TIOI_IOCLK%i", 0, y + 1, x),
                    ("TIOI_INNER_IOCLK%i", 0, y + 2, x),
                ]),
                wnet(0, &[
                    ("TTERM_CLB_PCICE_S", 0, y, x),
                    ("IOI_PCI_CE", 0, y + 1, x),
                    ("IOI_PCI_CE", 0, y + 2, x),
                ]),
                wnet(1, &[
                    ("TTERM_CLB_PLLCE%i_S", 0, y, x),
                    ("TIOI_PLLCE%i", 0, y + 1, x),
                    ("TIOI_INNER_PLLCE%i", 0, y + 2, x),
                ]),
                wnet(1, &[
                    ("TTERM_CLB_PLLCLK%i_S", 0, y, x),
                    ("TIOI_PLLCLK%i", 0, y + 1, x),
                    ("TIOI_INNER_PLLCLK%i", 0, y + 2, x),
                ]),
            ];
            for net in &nets {
                m.add_conn_net(true, false, net)?;
            }
        }

        let y = bot_term(m);
        if m.has_device(y - 1, x, DevKind::Ilogic) {
            let nets = [
                wnet(3, &[
                    ("BTERM_CLB_CEOUT%i_N", 0, y, x),
                    ("TIOI_IOCE%i", 0, y - 1, x),
                    ("BIOI_INNER_IOCE%i", 0, y - 2, x),
                ]),
                wnet(3, &[
                    ("BTERM_CLB_CLKOUT%i_N", 0, y, x),
                    ("TIOI_IOCLK%i", 0, y - 1, x),
                    ("BIOI_INNER_IOCLK%i", 0, y - 2, x),
                ]),
                wnet(0, &[
                    ("BTERM_CLB_PCICE_N", 0, y, x),
                    ("IOI_PCI_CE", 0, y - 1, x),
                    ("IOI_PCI_CE", 0, y - 2, x),
                ]),
                wnet(1, &[
                    ("BTERM_CLB_PLLCEOUT%i_N", 0, y, x),
                    ("BIOI_PLLCE%i", 0, y - 1, x),
                    ("BIOI_INNER_PLLCE%i", 0, y - 2, x),
                ]),
                wnet(1, &[
                    ("BTERM_CLB_PLLCLKOUT%i_N", 0, y, x),
                    ("BIOI_PLLCLK%i", 0, y - 1, x),
                    ("BIOI_INNER_PLLCLK%i", 0, y - 2, x),
                ]),
            ];
            for net in &nets {
                m.add_conn_net(true, false, net)?;
            }
        }
    }

    // PCICE east-to-center and west-to-center along the bottom term row
    let y = bot_term(m);
    let mut pcice_cols: Vec<usize> = Vec::new();
    for x in LEFT_SIDE_WIDTH..m.x_width - RIGHT_SIDE_WIDTH {
        if m.has_device(y - 1, x, DevKind::Ilogic)
            || m.is_atx(XCheck::FabricBramCol | XCheck::FabricMaccCol, x)
        {
            pcice_cols.push(x);
        }
    }
    for pair in pcice_cols.windows(2) {
        let (xa, xb) = (pair[0], pair[1]);
        let name_at = |mm: &FpgaModel, x: usize, other: usize| -> String {
            let to_center = (other < x) ^ (x < mm.center_x);
            if mm.is_atx(XCheck::FabricBramCol, x) {
                if to_center { "BRAM_TTERM_PCICE_OUT" } else { "BRAM_TTERM_PCICE_IN" }.to_string()
            } else if mm.is_atx(XCheck::FabricMaccCol, x) {
                if to_center {
                    "MACCSITE2_TTERM_PCICE_OUT"
                } else {
                    "MACCSITE2_TTERM_PCICE_IN"
                }
                .to_string()
            } else {
                "BTERM_CLB_PCICE".to_string()
            }
        };
        let na = name_at(m, xa, xb);
        let nb = name_at(m, xb, xa);
        m.add_conn_bi(y, xa, &na, y, xb, &nb)?;
    }
    Ok(())
}

// Input wires from IBUF into the chip, output wires from the chip into
// O, and the T wires.
fn run_io_wires(m: &mut FpgaModel) -> Result<(), ModelError> {
    for x in LEFT_SIDE_WIDTH..m.x_width - RIGHT_SIDE_WIDTH {
        for s in ["IBUF", "O", "T"] {
            let y = 0;
            if m.has_device(y, x, DevKind::Iob) {
                let net1 = wnet(
                    1,
                    &[
                        (&format!("TIOB_{s}%i"), 0, y, x),
                        (&format!("IOI_TTERM_IOIUP_{s}%i"), 0, y + 1, x),
                        (&format!("TTERM_IOIUP_{s}%i"), 0, y + 1, x + 1),
                        (&format!("TIOI_OUTER_{s}%i"), 0, y + 2, x + 1),
                    ],
                );
                let net2 = wnet(
                    1,
                    &[
                        (&format!("TIOB_{s}%i"), 2, y, x),
                        (&format!("IOI_TTERM_IOIBOT_{s}%i"), 0, y + 1, x),
                        (&format!("TTERM_IOIBOT_{s}%i"), 0, y + 1, x + 1),
                        (&format!("TIOI_OUTER_{s}%i_EXT"), 0, y + 2, x + 1),
                        (&format!("TIOI_INNER_{s}%i"), 0, y + 3, x + 1),
                    ],
                );
                m.add_conn_net(true, false, &net1)?;
                m.add_conn_net(true, false, &net2)?;
            }

            let y = m.y_height - BOT_OUTER_ROW;
            if m.has_device(y, x, DevKind::Iob) {
                let net1 = wnet(
                    1,
                    &[
                        (&format!("BIOI_INNER_{s}%i"), 0, y - 3, x + 1),
                        (&format!("BIOI_OUTER_{s}%i_EXT"), 0, y - 2, x + 1),
                        (&format!("BTERM_IOIUP_{s}%i"), 0, y - 1, x + 1),
                        (&format!("IOI_BTERM_IOIUP_{s}%i"), 0, y - 1, x),
                        (&format!("BIOB_{s}%i"), 0, y, x),
                    ],
                );
                m.add_conn_net(true, false, &net1)?;
                // this is a net too, but with a counted-down range
                m.add_conn_range(
                    true, false, y, x, &format!("BIOB_{s}%i"), 2, 3,
                    y - 1, x, &format!("IOI_BTERM_IOIBOT_{s}%i"), 1 | COUNT_DOWN,
                )?;
                m.add_conn_range(
                    true, false, y, x, &format!("BIOB_{s}%i"), 2, 3,
                    y - 1, x + 1, &format!("BTERM_IOIBOT_{s}%i"), 1 | COUNT_DOWN,
                )?;
                m.add_conn_range(
                    true, false, y, x, &format!("BIOB_{s}%i"), 2, 3,
                    y - 2, x + 1, &format!("BIOI_OUTER_{s}%i"), 1 | COUNT_DOWN,
                )?;
                m.add_conn_range(
                    true, false, y - 1, x, &format!("IOI_BTERM_IOIBOT_{s}%i"), 0, 1,
                    y - 1, x + 1, &format!("BTERM_IOIBOT_{s}%i"), 0,
                )?;
                m.add_conn_range(
                    true, false, y - 1, x, &format!("IOI_BTERM_IOIBOT_{s}%i"), 0, 1,
                    y - 2, x + 1, &format!("BIOI_OUTER_{s}%i"), 0,
                )?;
                m.add_conn_range(
                    true, false, y - 1, x + 1, &format!("BTERM_IOIBOT_{s}%i"), 0, 1,
                    y - 2, x + 1, &format!("BIOI_OUTER_{s}%i"), 0,
                )?;
            }
        }
    }
    for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
        if m.has_device(y, LEFT_IO_DEVS, DevKind::Ilogic) {
            for s in ["IBUF", "O", "T"] {
                let net = wnet(
                    1,
                    &[
                        (&format!("LIOB_{s}%i"), 0, y, 0),
                        (&format!("LTERM_IOB_{s}%i"), 0, y, 1),
                        (&format!("LIOI_INT_{s}%i"), 0, y, 2),
                        (&format!("LIOI_IOB_{s}%i"), 0, y, 3),
                    ],
                );
                m.add_conn_net(true, false, &net)?;
            }
        }
        if m.has_device(y, m.x_width - RIGHT_IO_DEVS_O, DevKind::Ilogic) {
            let x = m.x_width - RIGHT_OUTER_O;
            for s in ["IBUF", "O", "T"] {
                let net = wnet(
                    1,
                    &[
                        (&format!("RIOB_{s}%i"), 0, y, x),
                        (&format!("RTERM_IOB_{s}%i"), 0, y, x - 1),
                        (&format!("MCB_{s}%i"), 0, y, x - 2),
                        (&format!("RIOI_IOB_{s}%i"), 0, y, x - 3),
                    ],
                );
                m.add_conn_net(true, false, &net)?;
            }
        }
    }
    Ok(())
}

const S_4WIRE: [char; 5] = ['B', 'A', 'M', 'C', 'E'];

// Special south-4 wiring around hclk rows and the chip center: the E3
// endpoint is mirrored one (or two) tiles up as SS4E_N3.
fn wire_ss4e_n3(m: &mut FpgaModel, net: &WNet) -> Result<(), ModelError> {
    let i = net.pts.len();
    if i == 0 || net.pts[i - 1].name.as_bytes().get(3) != Some(&b'E') {
        return Ok(());
    }
    let e_y = net.pts[i - 1].y;
    let e_x = net.pts[i - 1].x;
    if e_y == bot_term(m) - 1 && !m.is_atx(XCheck::FabricBramRoutingCol, e_x) {
        m.add_conn_bi_pref(e_y, e_x, "SS4E_N3", e_y + 1, e_x, "SS4E_N3")?;
    }
    m.add_conn_bi_pref(e_y, e_x, "SS4E3", e_y - 1, e_x, "SS4E_N3")?;
    let extra_n3 = m.pos_in_row(e_y - 1) == HCLK_POS || e_y - 1 == m.center_y;
    let j_start: i64 = if extra_n3 {
        m.add_conn_bi_pref(e_y, e_x, "SS4E3", e_y - 2, e_x, "SS4E_N3")?;
        m.add_conn_bi_pref(e_y - 1, e_x, "SS4E_N3", e_y - 2, e_x, "SS4E_N3")?;
        m.add_conn_bi_pref(e_y - 1, e_x, "SS4C3", e_y - 2, e_x, "SS4E_N3")?;
        m.add_conn_bi_pref(e_y - 2, e_x, "SS4C3", e_y - 1, e_x, "SS4E_N3")?;
        i as i64 - 4
    } else {
        i as i64 - 3
    };
    let mut j = j_start;
    while j >= 0 {
        let name3 = format!("{}3", &net.pts[j as usize].name[..4]);
        m.add_conn_bi_pref(net.pts[j as usize].y, e_x, &name3, e_y - 1, e_x, "SS4E_N3")?;
        if extra_n3 {
            m.add_conn_bi_pref(net.pts[j as usize].y, e_x, &name3, e_y - 2, e_x, "SS4E_N3")?;
        }
        j -= 1;
    }
    Ok(())
}

fn run_direction_wires(m: &mut FpgaModel) -> Result<(), ModelError> {
    // SS4
    for x in 0..m.x_width {
        if !m.is_atx(XCheck::RoutingCol, x) {
            continue;
        }
        // some wiring at the top
        for i in 1..5 {
            let mut net = WNet {
                last_inc: 3,
                pts: vec![WPoint::new(&format!("SS4{}%i", S_4WIRE[i]), 0, top_term(m), x)],
            };
            for j in i..5 {
                net.pts.push(WPoint::new(
                    &format!("SS4{}%i", S_4WIRE[j]),
                    0,
                    top_term(m) + (j - i + 1),
                    x,
                ));
            }
            m.add_conn_net(true, true, &net)?;
            wire_ss4e_n3(m, &net)?;
        }
        // rest going down to bottom termination
        for y in 0..m.y_height {
            let (_, row_pos) = m.is_in_row(y);
            if m.is_atx(XCheck::FabricBramRoutingCol, x) && y > bot_term(m) - 5 {
                break;
            }
            if row_pos < 0 || row_pos == HCLK_POS {
                continue;
            }
            let mut net = WNet {
                last_inc: 3,
                pts: Vec::new(),
            };
            let mut j = 0;
            let mut i = 0;
            while i < 5 {
                if y + j == bot_term(m) {
                    net.pts
                        .push(WPoint::new(&format!("SS4{}%i", S_4WIRE[i - 1]), 0, y + j, x));
                    break;
                }
                if y + j == m.center_y || m.pos_in_row(y + j) == HCLK_POS {
                    net.pts
                        .push(WPoint::new(&format!("SS4{}%i", S_4WIRE[i - 1]), 0, y + j, x));
                    j += 1;
                }
                net.pts
                    .push(WPoint::new(&format!("SS4{}%i", S_4WIRE[i]), 0, y + j, x));
                j += 1;
                i += 1;
            }
            m.add_conn_net(true, true, &net)?;
            wire_ss4e_n3(m, &net)?;
        }
    }

    // NN4
    for x in 0..m.x_width {
        if !m.is_atx(XCheck::RoutingCol, x) {
            continue;
        }
        for y in 0..m.y_height {
            let (_, row_pos) = m.is_in_row(y);
            if row_pos < 0 || row_pos == HCLK_POS {
                continue;
            }
            let mut net = WNet {
                last_inc: 3,
                pts: Vec::new(),
            };
            let mut j = 0;
            let mut i = 0;
            while i < 5 {
                if y - j == TOP_INNER_ROW {
                    net.pts
                        .push(WPoint::new(&format!("NN4{}%i", S_4WIRE[i - 1]), 0, y - j, x));
                    break;
                }
                net.pts
                    .push(WPoint::new(&format!("NN4{}%i", S_4WIRE[i]), 0, y - j, x));
                if y - j == m.center_y || m.pos_in_row(y - j) == HCLK_POS {
                    i -= 1;
                }
                j += 1;
                i += 1;
            }
            m.add_conn_net(true, true, &net)?;
        }
        if !m.is_atx(XCheck::FabricBramRoutingCol, x) {
            for i in 1..5 {
                let mut net = WNet {
                    last_inc: 3,
                    pts: vec![WPoint::new(&format!("NN4{}%i", S_4WIRE[i]), 0, bot_term(m), x)],
                };
                for j in i..5 {
                    net.pts.push(WPoint::new(
                        &format!("NN4{}%i", S_4WIRE[j]),
                        0,
                        bot_term(m) - (j - i + 1),
                        x,
                    ));
                }
                m.add_conn_net(true, true, &net)?;
            }
        }
    }

    for y in 0..m.y_height {
        for x in 0..m.x_width {
            if !m.is_atyx(YxCheck::RoutingTile, y, x) {
                continue;
            }
            // NR1
            if m.is_aty(YCheck::InnerTop, y - 1) {
                let n = wnet(3, &[("NR1B%i", 0, y, x), ("NR1B%i", 0, y - 1, x)]);
                m.add_conn_net(true, true, &n)?;
            } else if m.is_aty(YCheck::RowHorizAxsymm | YCheck::ChipHorizRegs, y - 1) {
                let n = wnet(
                    3,
                    &[
                        ("NR1B%i", 0, y, x),
                        ("NR1E%i", 0, y - 1, x),
                        ("NR1E%i", 0, y - 2, x),
                    ],
                );
                m.add_conn_net(true, true, &n)?;
            } else {
                let n = wnet(3, &[("NR1B%i", 0, y, x), ("NR1E%i", 0, y - 1, x)]);
                m.add_conn_net(true, true, &n)?;
                if m.is_aty(YCheck::InnerBottom, y + 1)
                    && !m.is_atx(XCheck::FabricBramRoutingCol, x)
                {
                    let n = wnet(3, &[("NR1E%i", 0, y, x), ("NR1E%i", 0, y + 1, x)]);
                    m.add_conn_net(true, true, &n)?;
                }
            }

            // NN2
            if m.is_aty(YCheck::InnerTop, y - 1) {
                let n = wnet(3, &[("NN2B%i", 0, y, x), ("NN2B%i", 0, y - 1, x)]);
                m.add_conn_net(true, true, &n)?;
                let n = wnet(0, &[("NN2E_S0", 0, y, x), ("NN2E_S0", 0, y - 1, x)]);
                m.add_conn_net(true, true, &n)?;
            } else if m.is_aty(YCheck::InnerTop, y - 2) {
                let n = wnet(
                    3,
                    &[
                        ("NN2B%i", 0, y, x),
                        ("NN2M%i", 0, y - 1, x),
                        ("NN2M%i", 0, y - 2, x),
                    ],
                );
                m.add_conn_net(true, true, &n)?;
            } else if m.is_aty(YCheck::RowHorizAxsymm | YCheck::ChipHorizRegs, y - 1) {
                let n = wnet(
                    3,
                    &[
                        ("NN2B%i", 0, y, x),
                        ("NN2M%i", 0, y - 1, x),
                        ("NN2M%i", 0, y - 2, x),
                        ("NN2E%i", 0, y - 3, x),
                    ],
                );
                m.add_conn_net(true, true, &n)?;
                m.add_conn_bi_pref(y - 1, x, "NN2M0", y - 2, x, "NN2E_S0")?;
                m.add_conn_bi_pref(y - 3, x, "NN2E0", y - 2, x, "NN2E_S0")?;
                m.add_conn_bi_pref(y, x, "NN2B0", y - 2, x, "NN2E_S0")?;
            } else if m.is_aty(YCheck::RowHorizAxsymm | YCheck::ChipHorizRegs, y - 2) {
                let n = wnet(
                    3,
                    &[
                        ("NN2B%i", 0, y, x),
                        ("NN2M%i", 0, y - 1, x),
                        ("NN2E%i", 0, y - 2, x),
                        ("NN2E%i", 0, y - 3, x),
                    ],
                );
                m.add_conn_net(true, true, &n)?;
                m.add_conn_bi_pref(y, x, "NN2B0", y - 1, x, "NN2E_S0")?;
                m.add_conn_bi_pref(y, x, "NN2B0", y - 2, x, "NN2E_S0")?;
                m.add_conn_bi_pref(y - 2, x, "NN2E0", y - 1, x, "NN2E_S0")?;
                m.add_conn_bi_pref(y - 2, x, "NN2E_S0", y - 1, x, "NN2M0")?;
                m.add_conn_bi_pref(y - 2, x, "NN2E_S0", y - 1, x, "NN2E_S0")?;
                m.add_conn_bi_pref(y - 2, x, "NN2E_S0", y - 3, x, "NN2E0")?;
                m.add_conn_bi_pref(y - 3, x, "NN2E0", y - 1, x, "NN2E_S0")?;
            } else {
                let n = wnet(
                    3,
                    &[
                        ("NN2B%i", 0, y, x),
                        ("NN2M%i", 0, y - 1, x),
                        ("NN2E%i", 0, y - 2, x),
                    ],
                );
                m.add_conn_net(true, true, &n)?;
                m.add_conn_bi(y, x, "NN2B0", y - 1, x, "NN2E_S0")?;
                m.add_conn_bi(y - 2, x, "NN2E0", y - 1, x, "NN2E_S0")?;
                if m.is_aty(YCheck::InnerBottom, y + 1) {
                    m.add_conn_bi(y, x, "NN2E_S0", y - 1, x, "NN2E0")?;
                    if !m.is_atx(XCheck::FabricBramRoutingCol, x) {
                        let n = wnet(
                            3,
                            &[
                                ("NN2E%i", 0, y - 1, x),
                                ("NN2M%i", 0, y, x),
                                ("NN2M%i", 0, y + 1, x),
                            ],
                        );
                        m.add_conn_net(true, true, &n)?;
                        m.add_conn_range(
                            true, true, y, x, "NN2E%i", 0, 3, y + 1, x, "NN2E%i", 0,
                        )?;
                        m.add_conn_bi(y, x, "NN2E0", y + 1, x, "IOI_BTERM_NN2E_S0")?;
                        m.add_conn_bi(y, x, "NN2E_S0", y + 1, x, "IOI_BTERM_NN2M0")?;
                    }
                }
            }

            // SS2
            if m.is_aty(YCheck::RowHorizAxsymm | YCheck::ChipHorizRegs, y + 2) {
                let n = wnet(
                    3,
                    &[
                        ("SS2B%i", 0, y, x),
                        ("SS2M%i", 0, y + 1, x),
                        ("SS2M%i", 0, y + 2, x),
                        ("SS2E%i", 0, y + 3, x),
                    ],
                );
                m.add_conn_net(true, true, &n)?;
                m.add_conn_bi_pref(y, x, "SS2B3", y + 1, x, "SS2E_N3")?;
                m.add_conn_bi_pref(y + 1, x, "SS2E_N3", y + 2, x, "SS2E_N3")?;
                m.add_conn_bi_pref(y, x, "SS2B3", y + 2, x, "SS2E_N3")?;
                m.add_conn_bi_pref(y + 2, x, "SS2E_N3", y + 3, x, "SS2E3")?;
                m.add_conn_bi_pref(y + 1, x, "SS2E_N3", y + 2, x, "SS2M3")?;
                m.add_conn_bi_pref(y + 1, x, "SS2E_N3", y + 3, x, "SS2E3")?;
                m.add_conn_bi_pref(y + 1, x, "SS2M3", y + 2, x, "SS2E_N3")?;
                m.add_conn_bi_pref(y + 2, x, "SS2B3", y + 3, x, "SS2E_N3")?;
            } else if m.is_aty(YCheck::RowHorizAxsymm | YCheck::ChipHorizRegs, y + 1) {
                let n = wnet(
                    3,
                    &[
                        ("SS2B%i", 0, y, x),
                        ("SS2B%i", 0, y + 1, x),
                        ("SS2M%i", 0, y + 2, x),
                        ("SS2E%i", 0, y + 3, x),
                    ],
                );
                m.add_conn_net(true, true, &n)?;
                m.add_conn_bi_pref(y, x, "SS2B3", y + 2, x, "SS2E_N3")?;
                m.add_conn_bi_pref(y + 2, x, "SS2E_N3", y + 3, x, "SS2E3")?;
            } else if m.is_aty(YCheck::InnerBottom, y + 2) {
                if !m.is_atx(XCheck::FabricBramRoutingCol, x) {
                    let n = wnet(
                        3,
                        &[
                            ("SS2B%i", 0, y, x),
                            ("SS2M%i", 0, y + 1, x),
                            ("SS2M%i", 0, y + 2, x),
                        ],
                    );
                    m.add_conn_net(true, true, &n)?;
                }
            } else if m.is_aty(YCheck::InnerBottom, y + 1) {
                if !m.is_atx(XCheck::FabricBramRoutingCol, x) {
                    m.add_conn_range(true, true, y, x, "SS2B%i", 0, 3, y + 1, x, "SS2B%i", 0)?;
                    m.add_conn_bi_pref(y, x, "SS2E_N3", y + 1, x, "SS2E_N3")?;
                }
            } else {
                if m.is_aty(YCheck::InnerTop, y - 1) {
                    let n = wnet(
                        3,
                        &[
                            ("SS2M%i", 0, y - 1, x),
                            ("SS2M%i", 0, y, x),
                            ("SS2E%i", 0, y + 1, x),
                        ],
                    );
                    m.add_conn_net(true, true, &n)?;
                    m.add_conn_range(true, true, y, x, "SS2E%i", 0, 3, y - 1, x, "SS2E%i", 0)?;
                    m.add_conn_bi_pref(y, x, "SS2E3", y - 1, x, "SS2E_N3")?;
                    m.add_conn_bi_pref(y, x, "SS2E_N3", y - 1, x, "SS2M3")?;
                    m.add_conn_bi_pref(y, x, "SS2E_N3", y + 1, x, "SS2E3")?;
                }
                let n = wnet(
                    3,
                    &[
                        ("SS2B%i", 0, y, x),
                        ("SS2M%i", 0, y + 1, x),
                        ("SS2E%i", 0, y + 2, x),
                    ],
                );
                m.add_conn_net(true, true, &n)?;
                m.add_conn_bi_pref(y, x, "SS2B3", y + 1, x, "SS2E_N3")?;
                m.add_conn_bi_pref(y + 1, x, "SS2E_N3", y + 2, x, "SS2E3")?;
            }
        }
    }
    Ok(())
}

fn run_logic_inout(m: &mut FpgaModel) -> Result<(), ModelError> {
    // LOGICOUT
    for x in 0..m.x_width {
        if m.is_atx(XCheck::FabricLogicRoutingCol | XCheck::CenterRoutingCol, x) {
            for y in 0..m.y_height {
                let dev_flags = m.tile(y, x + 1).flags;
                if dev_flags.contains(TileFlag::LogicXmDev) {
                    m.add_conn_range(
                        true, false, y, x, "LOGICOUT%i", 0, 23,
                        y, x + 1, "CLEXM_LOGICOUT%i", 0,
                    )?;
                }
                if dev_flags.contains(TileFlag::LogicXlDev) {
                    m.add_conn_range(
                        true, false, y, x, "LOGICOUT%i", 0, 23,
                        y, x + 1, "CLEXL_LOGICOUT%i", 0,
                    )?;
                }
                if dev_flags.contains(TileFlag::IologicDelayDev) {
                    m.add_conn_range(
                        true, false, y, x, "LOGICOUT%i", 0, 23,
                        y, x + 1, "IOI_LOGICOUT%i", 0,
                    )?;
                }
            }
        }
        if m.is_atx(XCheck::FabricBramRoutingCol | XCheck::FabricMaccRoutingCol, x) {
            for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
                if m.is_aty(YCheck::RowHorizAxsymm | YCheck::ChipHorizRegs, y) {
                    continue;
                }
                m.add_conn_range(
                    true, false, y, x, "LOGICOUT%i", 0, 23,
                    y, x + 1, "INT_INTERFACE_LOGICOUT%i", 0,
                )?;
                for (flag, pre) in
                    [(TileFlag::BramDev, "BRAM"), (TileFlag::MaccDev, "MACC")]
                {
                    if m.tile(y, x + 2).flags.contains(flag) {
                        for int in 0..4usize {
                            m.add_conn_range(
                                true, false,
                                y - int, x + 1, "INT_INTERFACE_LOGICOUT_%i", 0, 23,
                                y, x + 2, &format!("{pre}_LOGICOUT%i_INT{int}"), 0,
                            )?;
                        }
                    }
                }
            }
        }
        if m.is_atx(XCheck::CenterRoutingCol, x) {
            for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
                if m.is_aty(YCheck::RowHorizAxsymm, y) {
                    m.add_conn_range(
                        true, false, y - 1, x, "LOGICOUT%i", 0, 23,
                        y - 1, x + 1, "INT_INTERFACE_LOGICOUT%i", 0,
                    )?;
                    m.add_conn_range(
                        true, false, y + 1, x, "LOGICOUT%i", 0, 23,
                        y + 1, x + 1, "INT_INTERFACE_LOGICOUT%i", 0,
                    )?;
                    for (flag, pre) in
                        [(TileFlag::DcmDev, "DCM"), (TileFlag::PllDev, "PLL")]
                    {
                        if m.tile(y - 1, x + 2).flags.contains(flag) {
                            m.add_conn_range(
                                true, false,
                                y - 1, x + 1, "INT_INTERFACE_LOGICOUT_%i", 0, 23,
                                y - 1, x + 2, &format!("{pre}_CLB2_LOGICOUT%i"), 0,
                            )?;
                            m.add_conn_range(
                                true, false,
                                y + 1, x + 1, "INT_INTERFACE_LOGICOUT_%i", 0, 23,
                                y - 1, x + 2, &format!("{pre}_CLB1_LOGICOUT%i"), 0,
                            )?;
                        }
                    }
                }
                if m.is_aty(YCheck::ChipHorizRegs, y) {
                    m.add_conn_range(
                        true, false, y - 1, x, "LOGICOUT%i", 0, 23,
                        y - 1, x + 1, "INT_INTERFACE_REGC_LOGICOUT%i", 0,
                    )?;
                }
            }
        }
        if m.is_atx(XCheck::LeftIoRoutingCol | XCheck::RightIoRoutingCol, x) {
            let (local_size, wired_side) = if m.is_atx(XCheck::LeftIoRoutingCol, x) {
                (LEFT_LOCAL_HEIGHT, YCheck::LeftWired)
            } else {
                (RIGHT_LOCAL_HEIGHT, YCheck::RightWired)
            };
            for y in TOP_IO_TILES..m.y_height - BOT_IO_TILES {
                if m.is_aty(YCheck::RowHorizAxsymm | YCheck::ChipHorizRegs, y) {
                    continue;
                }
                let dest = if y < TOP_IO_TILES + local_size
                    || y > m.y_height - BOT_IO_TILES - local_size - 1
                {
                    "INT_INTERFACE_LOCAL_LOGICOUT%i"
                } else if m.is_aty(wired_side, y) {
                    "IOI_LOGICOUT%i"
                } else {
                    "INT_INTERFACE_LOGICOUT%i"
                };
                m.add_conn_range(true, false, y, x, "LOGICOUT%i", 0, 23, y, x + 1, dest, 0)?;
            }
        }
    }

    // LOGICIN of the center PLL/DCM columns
    for i in 0..m.cfg_rows {
        let mut y = TOP_IO_TILES + HALF_ROW + i * ROW_SIZE;
        if y > m.center_y {
            y += 1;
        }
        let logic_x = m.center_x - CENTER_LOGIC_O;
        let cmt_x = m.center_x - CENTER_CMTPLL_O;
        let dests: &[(usize, &str)] = if i % 2 == 1 {
            &[(y - 1, "DCM_CLB2"), (y + 1, "DCM_CLB1")]
        } else {
            &[(y - 1, "PLL_CLB2")]
        };
        for &(from_y, pre) in dests {
            m.add_conn_range(
                true, false, from_y, logic_x, "INT_INTERFACE_LOGICBIN%i", 0, 3,
                y - 1, cmt_x, &format!("{pre}_LOGICINB%i"), 0,
            )?;
            m.add_conn_bi(
                from_y, logic_x, "INT_INTERFACE_IOI_LOGICBIN4",
                y - 1, cmt_x, &format!("{pre}_LOGICINB4"),
            )?;
            m.add_conn_range(
                true, false, from_y, logic_x, "INT_INTERFACE_LOGICBIN%i", 5, 9,
                y - 1, cmt_x, &format!("{pre}_LOGICINB%i"), 5,
            )?;
            m.add_conn_bi(
                from_y, logic_x, "INT_INTERFACE_IOI_LOGICBIN10",
                y - 1, cmt_x, &format!("{pre}_LOGICINB10"),
            )?;
            m.add_conn_range(
                true, false, from_y, logic_x, "INT_INTERFACE_LOGICBIN%i", 11, 62,
                y - 1, cmt_x, &format!("{pre}_LOGICINB%i"), 11,
            )?;
        }
        if i % 2 == 0 {
            m.add_conn_range(
                true, false, y + 1, logic_x, "INT_INTERFACE_LOGICBIN%i", 0, 62,
                y - 1, cmt_x, "PLL_CLB1_LOGICINB%i", 0,
            )?;
        }
    }

    // the eight northward and southward crossing wires, and the
    // logicin/logicout fabric fanout per routing tile
    const NORTH_P: [usize; 4] = [21, 28, 52, 60];
    const SOUTH_P: [usize; 4] = [20, 36, 44, 62];
    for y in 0..m.y_height {
        for x in 0..m.x_width {
            if !m.is_atyx(YxCheck::RoutingTile, y, x) {
                continue;
            }
            for p in NORTH_P {
                if m.is_aty(YCheck::InnerTop, y - 1) {
                    m.add_conn_bi_pref(
                        y, x, &format!("LOGICIN{p}"), y - 1, x, &format!("LOGICIN{p}"),
                    )?;
                } else {
                    m.add_conn_bi_pref(
                        y, x, &format!("LOGICIN{p}"), y - 1, x, &format!("LOGICIN_N{p}"),
                    )?;
                }
                if m.is_aty(YCheck::RowHorizAxsymm | YCheck::ChipHorizRegs, y - 1) {
                    m.add_conn_bi_pref(
                        y, x, &format!("LOGICIN{p}"), y - 2, x, &format!("LOGICIN_N{p}"),
                    )?;
                    m.add_conn_bi_pref(
                        y - 1, x, &format!("LOGICIN_N{p}"),
                        y - 2, x, &format!("LOGICIN_N{p}"),
                    )?;
                }
                if m.is_aty(YCheck::InnerBottom, y + 1)
                    && !m.is_atx(XCheck::FabricBramRoutingCol, x)
                {
                    m.add_conn_bi_pref(
                        y, x, &format!("LOGICIN_N{p}"), y + 1, x, &format!("LOGICIN_N{p}"),
                    )?;
                }
            }
            for p in SOUTH_P {
                if m.is_aty(YCheck::InnerTop, y - 1) {
                    m.add_conn_bi_pref(
                        y, x, &format!("LOGICIN_S{p}"), y - 1, x, &format!("LOGICIN_S{p}"),
                    )?;
                }
                if m.is_aty(YCheck::RowHorizAxsymm | YCheck::ChipHorizRegs, y + 1) {
                    m.add_conn_bi_pref(
                        y, x, &format!("LOGICIN{p}"), y + 1, x, &format!("LOGICIN{p}"),
                    )?;
                    m.add_conn_bi_pref(
                        y, x, &format!("LOGICIN{p}"), y + 2, x, &format!("LOGICIN_S{p}"),
                    )?;
                    m.add_conn_bi_pref(
                        y + 1, x, &format!("LOGICIN{p}"), y + 2, x, &format!("LOGICIN_S{p}"),
                    )?;
                } else if m.is_aty(YCheck::InnerBottom, y + 1) {
                    if !m.is_atx(XCheck::FabricBramRoutingCol, x) {
                        m.add_conn_bi_pref(
                            y, x, &format!("LOGICIN{p}"), y + 1, x, &format!("LOGICIN{p}"),
                        )?;
                    }
                } else {
                    m.add_conn_bi_pref(
                        y, x, &format!("LOGICIN{p}"), y + 1, x, &format!("LOGICIN_S{p}"),
                    )?;
                }
            }

            let dev_flags = m.tile(y, x + 1).flags;
            if dev_flags.contains(TileFlag::LogicXmDev) {
                m.add_conn_range(
                    true, false, y, x, "LOGICIN_B%i", 0, 62,
                    y, x + 1, "CLEXM_LOGICIN_B%i", 0,
                )?;
            }
            if dev_flags.contains(TileFlag::LogicXlDev) {
                // the L sites have no AI/BI/CI/DI/WE inputs
                for (s, e) in [(0, 35), (37, 43), (45, 52), (54, 60)] {
                    m.add_conn_range(
                        true, false, y, x, "LOGICIN_B%i", s, e,
                        y, x + 1, "CLEXL_LOGICIN_B%i", s,
                    )?;
                }
            }
            if dev_flags.contains(TileFlag::IologicDelayDev) {
                for (s, e) in [(0, 3), (5, 9), (11, 62)] {
                    m.add_conn_range(
                        true, false, y, x, "LOGICIN_B%i", s, e,
                        y, x + 1, "IOI_LOGICINB%i", s,
                    )?;
                }
            }
            for (check, flag, pre) in [
                (XCheck::FabricBramRoutingCol, TileFlag::BramDev, "BRAM"),
                (XCheck::FabricMaccRoutingCol, TileFlag::MaccDev, "MACC"),
            ] {
                if m.is_atx(check, x) {
                    m.add_conn_range(
                        true, false, y, x, "LOGICIN_B%i", 0, 62,
                        y, x + 1, "INT_INTERFACE_LOGICBIN%i", 0,
                    )?;
                    if m.tile(y, x + 2).flags.contains(flag) {
                        for i in 0..4usize {
                            let dest = format!("{pre}_LOGICINB%i_INT{}", 3 - i);
                            m.add_conn_range(
                                true, false, y - (3 - i), x, "LOGICIN_B%i", 0, 62,
                                y, x + 2, &dest, 0,
                            )?;
                            m.add_conn_range(
                                true, false,
                                y - (3 - i), x + 1, "INT_INTERFACE_LOGICBIN%i", 0, 62,
                                y, x + 2, &dest, 0,
                            )?;
                        }
                    }
                }
            }
            if x + 3 == m.center_x && m.is_aty(YCheck::ChipHorizRegs, y + 1) {
                m.add_conn_range(
                    true, false, y, x, "LOGICIN_B%i", 0, 62,
                    y, x + 1, "INT_INTERFACE_REGC_LOGICBIN%i", 0,
                )?;
                const CLK_PINS: [usize; 16] =
                    [24, 15, 7, 42, 5, 12, 62, 16, 47, 20, 38, 23, 48, 57, 44, 4];
                for (i, p) in CLK_PINS.into_iter().enumerate() {
                    let src = format!("LOGICIN_B{p}");
                    m.add_conn_bi(y, x, &src, y + 1, x + 1, &format!("REGC_CLE_SEL{i}"))?;
                    m.add_conn_bi(y, x, &src, y + 1, x + 2, &format!("REGC_CMT_SEL{i}"))?;
                    m.add_conn_bi(y, x, &src, y + 1, x + 3, &format!("CLKC_SEL{i}_PLL"))?;
                }
            }
        }
    }
    Ok(())
}

struct SeedData {
    checks: FlagSet<XCheck>,
    name: &'static str,
}

fn seed_strx(m: &FpgaModel, seeds: &[SeedData]) -> Vec<Option<&'static str>> {
    (0..m.x_width)
        .map(|x| {
            let mut result = None;
            for seed in seeds {
                if m.is_atx(seed.checks, x) {
                    result = Some(seed.name);
                }
            }
            result
        })
        .collect()
}

fn run_gclk(m: &mut FpgaModel) -> Result<(), ModelError> {
    for row in (0..m.cfg_rows).rev() {
        let mut row_top_y = TOP_IO_TILES + (m.cfg_rows - 1 - row) * ROW_SIZE;
        if row < m.cfg_rows / 2 {
            row_top_y += 1;
        }
        // net that connects the hclk wires of half the chip together
        // horizontally
        let mut net = WNet {
            last_inc: 15,
            pts: Vec::new(),
        };
        let mut x = LEFT_IO_ROUTING;
        loop {
            let y = row_top_y + 8;
            if m.is_atx(
                XCheck::LeftIoRoutingCol | XCheck::FabricRoutingCol | XCheck::CenterRoutingCol,
                x,
            ) {
                net.pts.push(WPoint::new("HCLK_GCLK%i_INT", 0, y, x));
            } else if m.is_atx(XCheck::LeftMcb, x) {
                net.pts.push(WPoint::new("HCLK_GCLK%i_MCB", 0, y, x));
            } else if m.is_atx(
                XCheck::FabricLogicCol | XCheck::CenterLogicCol | XCheck::LeftIoDevsCol,
                x,
            ) {
                net.pts.push(WPoint::new("HCLK_GCLK%i_CLB", 0, y, x));
            } else if m.is_atx(XCheck::FabricBramMaccRoutingCol, x) {
                net.pts.push(WPoint::new("HCLK_GCLK%i_BRAM_INTER", 0, y, x));
            } else if m.is_atx(XCheck::FabricBramCol, x) {
                net.pts.push(WPoint::new("HCLK_GCLK%i_BRAM", 0, y, x));
            } else if m.is_atx(XCheck::FabricMaccCol, x) {
                net.pts.push(WPoint::new("HCLK_GCLK%i_DSP", 0, y, x));
            } else if m.is_atx(XCheck::CenterCmtpllCol, x) {
                net.pts.push(WPoint::new("HCLK_CMT_GCLK%i_CLB", 0, row_top_y + 7, x));
            } else if m.is_atx(XCheck::CenterRegsCol, x) {
                net.pts.push(WPoint::new("CLKV_BUFH_LEFT_L%i", 0, y, x));
                // connect the left half, then start the right half
                m.add_conn_net(true, false, &net)?;
                net.pts.clear();
                net.pts.push(WPoint::new("CLKV_BUFH_RIGHT_R%i", 0, y, x));
            } else if m.is_atx(XCheck::RightIoRoutingCol, x) {
                net.pts.push(WPoint::new("HCLK_GCLK%i_INT", 0, y, x));
                m.add_conn_net(true, false, &net)?;
                break;
            }
            x += 1;
            assert!(x < m.x_width, "gclk net ran off the right edge");
        }
    }

    for x in 0..m.x_width {
        if !m.is_atx(XCheck::RoutingCol, x) {
            continue;
        }
        for row in (0..m.cfg_rows).rev() {
            let mut row_top_y = TOP_IO_TILES + (m.cfg_rows - 1 - row) * ROW_SIZE;
            if row < m.cfg_rows / 2 {
                row_top_y += 1;
            }
            let is_break = if m.is_atx(XCheck::LeftIoRoutingCol | XCheck::RightIoRoutingCol, x) {
                row != 0 && row != m.cfg_rows / 2
            } else {
                row != 0
                    || m.is_atx(XCheck::FabricBramRoutingCol | XCheck::FabricMaccRoutingCol, x)
            };

            // vertical net inside the row, pulling together 16 gclk
            // wires across the top and bottom half
            let mut net = WNet {
                last_inc: 15,
                pts: (0..8)
                    .map(|i| WPoint::new("GCLK%i", 0, row_top_y + i, x))
                    .collect(),
            };
            m.add_conn_net(true, false, &net)?;
            for (i, pt) in net.pts.iter_mut().enumerate() {
                pt.y += 9;
                if i == 7 && is_break {
                    pt.name = "GCLK%i_BRK".to_string();
                }
            }
            m.add_conn_net(true, false, &net)?;

            // and vertically from each row tile to the hclk tile
            for i in 0..8 {
                m.add_conn_range(
                    true, false, row_top_y + i, x, "GCLK%i", 0, 15,
                    row_top_y + 8, x, "HCLK_GCLK_UP%i", 0,
                )?;
                m.add_conn_range(
                    true, false,
                    row_top_y + 9 + i, x,
                    if i == 7 && is_break { "GCLK%i_BRK" } else { "GCLK%i" }, 0, 15,
                    row_top_y + 8, x, "HCLK_GCLK%i", 0,
                )?;
            }
        }
    }
    run_gclk_horiz_regs(m)?;
    run_gclk_vert_regs(m)?;
    Ok(())
}

// Wire strings running horizontally over the center reg row; the wires
// meet at the gclk separation column of each half.
fn run_gclk_horiz_regs(m: &mut FpgaModel) -> Result<(), ModelError> {
    let fabric_int = XCheck::FabricRoutingCol | XCheck::LeftIoRoutingCol | XCheck::RightIoRoutingCol;
    let fabric_cle = XCheck::LeftIoDevsCol
        | XCheck::FabricBramMaccRoutingCol
        | XCheck::FabricLogicCol
        | XCheck::RightIoDevsCol;

    let clkpll_seeds = [
        SeedData { checks: XCheck::OuterLeft.into(), name: "REGL_CLKPLL%i" },
        SeedData { checks: XCheck::InnerLeft.into(), name: "REGL_LTERM_CLKPLL%i" },
        SeedData { checks: fabric_int, name: "INT_CLKPLL%i" },
        SeedData { checks: fabric_cle, name: "CLE_CLKPLL%i" },
        SeedData { checks: XCheck::FabricMaccCol.into(), name: "DSP_CLKPLL%i" },
        SeedData { checks: XCheck::CenterRoutingCol.into(), name: "REGC_INT_CLKPLL_IO_RT%i" },
        SeedData { checks: XCheck::CenterLogicCol.into(), name: "REGC_CLECLKPLL_IO_LT%i" },
        SeedData { checks: XCheck::CenterRegsCol.into(), name: "CLKC_PLL_IO_RT%i" },
        SeedData { checks: XCheck::InnerRight.into(), name: "REGR_RTERM_CLKPLL%i" },
        SeedData { checks: XCheck::OuterRight.into(), name: "REGR_CLKPLL%i" },
    ];
    let clkpll_lock_seeds = [
        SeedData { checks: XCheck::OuterLeft.into(), name: "REGL_LOCKED%i" },
        SeedData { checks: XCheck::InnerLeft.into(), name: "REGH_LTERM_LOCKED%i" },
        SeedData { checks: fabric_int, name: "INT_CLKPLL_LOCK%i" },
        SeedData { checks: fabric_cle, name: "CLE_CLKPLL_LOCK%i" },
        SeedData { checks: XCheck::FabricMaccCol.into(), name: "DSP_CLKPLL_LOCK%i" },
        SeedData { checks: XCheck::CenterRoutingCol.into(), name: "REGC_INT_CLKPLL_LOCK_RT%i" },
        SeedData { checks: XCheck::CenterLogicCol.into(), name: "REGC_CLECLKPLL_LOCK_LT%i" },
        SeedData { checks: XCheck::CenterRegsCol.into(), name: "CLKC_PLL_LOCK_RT%i" },
        SeedData { checks: XCheck::InnerRight.into(), name: "REGH_RTERM_LOCKED%i" },
        SeedData { checks: XCheck::OuterRight.into(), name: "REGR_LOCKED%i" },
    ];
    let strings: [(&[SeedData], &str, &str, &str); 2] = [
        (
            &clkpll_seeds,
            "REGC_CLKPLL_IO_LT%i",
            "REGC_CLKPLL_IO_RT%i",
            "INT_CLKPLL%i",
        ),
        (
            &clkpll_lock_seeds,
            "CLK_PLL_LOCK_LT%i",
            "CLK_PLL_LOCK_RT%i",
            "INT_CLKPLL_LOCK%i",
        ),
    ];

    for (seeds, cmtpll_left, cmtpll_right, sep_name) in strings {
        let names = seed_strx(m, seeds);
        let mut left_half = true;
        let mut x = 0;
        while x < m.x_width {
            if x == m.left_gclk_sep_x || x == m.right_gclk_sep_x {
                x += 1;
                continue;
            }
            let name = if m.is_atx(XCheck::CenterCmtpllCol, x) {
                Some(if left_half { cmtpll_left } else { cmtpll_right })
            } else {
                names[x]
            };
            if let Some(name) = name {
                let sep_x = if left_half {
                    m.left_gclk_sep_x
                } else {
                    m.right_gclk_sep_x
                };
                m.add_conn_range(
                    true, false, m.center_y, x, name, 0, 1,
                    m.center_y, sep_x, sep_name, 0,
                )?;
            }
            if left_half && m.is_atx(XCheck::CenterCmtpllCol, x) {
                // wire up the cmtpll column on the right side as well
                left_half = false;
                continue;
            }
            x += 1;
        }
    }
    Ok(())
}

// The vertical gclk spine through the center column, and the local
// gclk rings at the chip top and bottom.
fn run_gclk_vert_regs(m: &mut FpgaModel) -> Result<(), ModelError> {
    let hclk_y = |row: usize| -> usize {
        let mut y = TOP_IO_TILES + (m.cfg_rows - 1 - row) * ROW_SIZE + 8;
        if row < m.cfg_rows / 2 {
            y += 1;
        }
        y
    };
    let top_hclk = hclk_y(m.cfg_rows - 1);
    let second_hclk = hclk_y(m.cfg_rows - 2);
    let third_hclk = hclk_y(1);
    let bot_hclk = hclk_y(0);

    // fold net across the top two rows
    let mut net = WNet {
        last_inc: 15,
        pts: Vec::new(),
    };
    for y in top_hclk..=second_hclk {
        let name = if m.is_aty(YCheck::RowHorizAxsymm, y) {
            "CLKV_GCLKH_MAIN%i_FOLD"
        } else if y == second_hclk - HALF_ROW {
            "CLKV_GCLK_MAIN%i_BUF"
        } else {
            "CLKV_GCLK_MAIN%i_FOLD"
        };
        net.pts.push(WPoint::new(name, 0, y, m.center_x));
    }
    m.add_conn_net(true, false, &net)?;

    // main net through the center
    let mut net = WNet {
        last_inc: 15,
        pts: Vec::new(),
    };
    for y in second_hclk - HALF_ROW..=third_hclk + HALF_ROW {
        let name = if m.is_aty(YCheck::RowHorizAxsymm, y) {
            "REGV_GCLKH_MAIN%i"
        } else if m.is_aty(YCheck::ChipHorizRegs, y) {
            "CLKC_GCLK_MAIN%i"
        } else if y == m.center_y - 1 {
            "CLKV_GCLK_MAIN%i_BRK"
        } else {
            "CLKV_GCLK_MAIN%i"
        };
        net.pts.push(WPoint::new(name, 0, y, m.center_x));
    }
    m.add_conn_net(true, false, &net)?;

    // fold net across the bottom two rows
    let mut net = WNet {
        last_inc: 15,
        pts: Vec::new(),
    };
    for y in third_hclk..=bot_hclk {
        let name = if m.is_aty(YCheck::RowHorizAxsymm, y) {
            "CLKV_GCLKH_MAIN%i_FOLD"
        } else if y == third_hclk + HALF_ROW {
            "CLKV_GCLK_MAIN%i_BUF"
        } else {
            "CLKV_GCLK_MAIN%i_FOLD"
        };
        net.pts.push(WPoint::new(name, 0, y, m.center_x));
    }
    m.add_conn_net(true, false, &net)?;

    // a few local gclk networks at the center top and bottom
    let net = wnet(
        1,
        &[
            ("REGT_GCLK%i", 0, TOP_OUTER_ROW, m.center_x - 1),
            ("REGT_TTERM_GCLK%i", 0, TOP_INNER_ROW, m.center_x - 1),
            ("REGV_TTERM_GCLK%i", 0, TOP_INNER_ROW, m.center_x),
            ("BUFPLL_TOP_GCLK%i", 0, TOP_INNER_ROW, m.center_x + 1),
        ],
    );
    m.add_conn_net(true, false, &net)?;
    let net = wnet(
        1,
        &[
            ("REGB_GCLK%i", 0, m.y_height - 1, m.center_x - 1),
            ("REGB_BTERM_GCLK%i", 0, m.y_height - 2, m.center_x - 1),
            ("REGV_BTERM_GCLK%i", 0, m.y_height - 2, m.center_x),
            ("BUFPLL_BOT_GCLK%i", 0, m.y_height - 2, m.center_x + 1),
        ],
    );
    m.add_conn_net(true, false, &net)?;

    // gclk from the tterm down to the top eight rows at center_x+1,
    // and from the bterm up at the bottom
    for i in TOP_IO_TILES..=TOP_IO_TILES + HALF_ROW {
        m.add_conn_range(
            true, false, TOP_INNER_ROW, m.center_x + 1, "IOI_TTERM_GCLK%i", 0, 15,
            i, m.center_x + 1,
            if i == TOP_IO_TILES + HALF_ROW { "HCLK_GCLK_UP%i" } else { "GCLK%i" },
            0,
        )?;
    }
    for i in (m.y_height - 2 - HALF_ROW - 1..m.y_height - 2).rev() {
        m.add_conn_range(
            true, false, m.y_height - 2, m.center_x + 1, "IOI_BTERM_GCLK%i", 0, 15,
            i, m.center_x + 1,
            if i == m.y_height - 2 - HALF_ROW - 1 { "HCLK_GCLK%i" } else { "GCLK%i" },
            0,
        )?;
    }
    Ok(())
}
