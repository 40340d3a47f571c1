use xs6::consts::{TileFlag, TOP_INNER_ROW};
use xs6::model::{SwDir, SwitchChain};
use xs6::{FpgaModel, TileKind};

#[test]
fn xc6slx9_geometry() {
    let m = FpgaModel::xc6slx9().unwrap();

    assert_eq!(m.cfg_rows, 4);
    assert_eq!(m.x_width, 45);
    assert_eq!(m.y_height, 73);
    assert_eq!(m.center_y, 2 + 2 * 17);
    assert_eq!(m.center_x, 24);

    assert_eq!(m.tile(0, 0).kind, TileKind::Na);
    assert_eq!(m.tile(m.center_y, m.center_x).kind, TileKind::Center);

    // first fabric column pair: routing at 5, logic-XM at 6
    assert!(m.tile(0, 5).flags.contains(TileFlag::FabricRoutingCol));
    assert!(m.tile(0, 6).flags.contains(TileFlag::FabricLogicCol));
    assert_eq!(m.tile(38, 5).kind, TileKind::Routing);
    assert_eq!(m.tile(38, 6).kind, TileKind::LogicXm);
    assert_eq!(m.tile(38, 8).kind, TileKind::LogicXl);

    // the gclk separators sit on the device column of the two 'Bg'
    // columns
    assert_eq!(m.left_gclk_sep_x, 11);
    assert!(m.right_gclk_sep_x > m.center_x);
}

#[test]
fn row_structure() {
    let m = FpgaModel::xc6slx9().unwrap();

    assert_eq!(m.pos_in_row(TOP_INNER_ROW), -1);
    assert_eq!(m.pos_in_row(m.center_y), -1);
    assert_eq!(m.pos_in_row(2), 0);

    // hclk rows at local position 8 of each row-group
    for hclk_y in [10, 27, 45, 62] {
        assert_eq!(m.pos_in_row(hclk_y), 8, "y={hclk_y}");
    }
    assert_eq!(m.which_row(10), 3);
    assert_eq!(m.which_row(62), 0);
    assert_eq!(m.which_row(70), 0);
    assert_eq!(m.pos_in_row(70), 16);
    assert_eq!(m.pos_in_row(71), -1);

    // chip corners produce the terminator variants
    assert_eq!(m.tile(2, m.x_width - 4).kind, TileKind::CornerTrUpper);
    assert_eq!(m.tile(70, m.x_width - 4).kind, TileKind::CornerBrLower);
    assert_eq!(m.tile(2, 3).kind, TileKind::CornerTl);
    assert_eq!(m.tile(70, 3).kind, TileKind::CornerBl);
}

#[test]
fn build_is_deterministic() {
    let a = FpgaModel::xc6slx9().unwrap();
    let b = FpgaModel::xc6slx9().unwrap();

    for ((y, x, ta), (_, _, tb)) in a.iter_tiles().zip(b.iter_tiles()) {
        assert_eq!(ta.kind, tb.kind, "tile kind at y{y} x{x}");
        assert_eq!(ta.flags.bits(), tb.flags.bits(), "tile flags at y{y} x{x}");
        assert_eq!(ta.num_conn_points(), tb.num_conn_points(), "at y{y} x{x}");
        assert_eq!(ta.num_conn_dests(), tb.num_conn_dests(), "at y{y} x{x}");
        assert_eq!(ta.num_switches(), tb.num_switches(), "at y{y} x{x}");
        assert_eq!(ta.devices.len(), tb.devices.len(), "at y{y} x{x}");
        for ((oa, na), (ob, nb)) in ta.conn_points().zip(tb.conn_points()) {
            assert_eq!(oa, ob);
            assert_eq!(a.wire_name(na), b.wire_name(nb));
        }
    }
}

#[test]
fn conn_point_invariants() {
    let m = FpgaModel::xc6slx9().unwrap();

    for (y, x, tile) in m.iter_tiles() {
        // offsets are non-decreasing and within the dests array
        let mut last = 0;
        for (off, _) in tile.conn_points() {
            assert!(off <= tile.num_conn_dests(), "at y{y} x{x}");
            assert!(off >= last, "offsets decrease at y{y} x{x}");
            last = off;
        }
        // every edge's destination name is registered at the
        // destination tile
        for (dx, dy, dn) in tile.conn_dests() {
            assert!(dy < m.y_height && dx < m.x_width);
            let dest_tile = m.tile(dy, dx);
            assert!(
                dest_tile.conn_points().any(|(_, n)| n == dn),
                "dangling edge y{y} x{x} -> y{dy} x{dx} {}",
                m.wire_name(dn)
            );
        }
    }
}

#[test]
fn switch_invariants() {
    let m = FpgaModel::xc6slx9().unwrap();

    for (y, x, tile) in m.iter_tiles() {
        let n = tile.num_switches();
        let mut seen = std::collections::HashSet::new();
        for idx in 0..n {
            let from = m.switch_wire(y, x, idx as u16, SwDir::From);
            let to = m.switch_wire(y, x, idx as u16, SwDir::To);
            assert_ne!(from, 0, "switch endpoint without name at y{y} x{x}");
            assert_ne!(to, 0, "switch endpoint without name at y{y} x{x}");
            assert!(
                seen.insert((from, to)),
                "duplicate switch {}->{} at y{y} x{x}",
                m.wire_name(from),
                m.wire_name(to)
            );
        }
    }
}

// Every catalogue entry must resolve to an addressable switch in an
// interior routing tile.
#[test]
fn switch_catalogue_consistency() {
    let m = FpgaModel::xc6slx9().unwrap();
    let (y, x) = (38, 12);
    assert_eq!(m.tile(y, x).kind, TileKind::Routing);

    for entry in m.bitpos_catalogue() {
        assert!((1..=3).contains(&entry.two_bits_val));
        assert!(
            m.has_connpt(y, x, &entry.from),
            "missing {} at y{y} x{x}",
            entry.from
        );
        assert!(
            m.has_connpt(y, x, &entry.to),
            "missing {} at y{y} x{x}",
            entry.to
        );
        let from = m.wire_idx(&entry.from).unwrap();
        let to = m.wire_idx(&entry.to).unwrap();
        let idx = m.switch_lookup(y, x, from, to);
        assert!(idx.is_some(), "{} -> {}", entry.from, entry.to);
        let idx = idx.unwrap();
        assert_eq!(m.switch_is_bidir(y, x, idx), entry.bidir);
        assert!(!m.switch_is_enabled(y, x, idx));
    }
}

#[test]
fn iob_sitename_roundtrip() {
    let m = FpgaModel::xc6slx9().unwrap();

    for name in ["P48", "P55", "P137"] {
        let (y, x, idx) = m.find_iob(name).unwrap();
        assert_eq!(m.iob_sitename(y, x, idx), Some(name));
        assert!(
            m.device(y, x, xs6::DevKind::Iob, idx).is_some(),
            "{name}: no IOB device at y{y} x{x} idx{idx}"
        );
    }
    let (y, x, idx) = m.find_iob("P48").unwrap();
    assert_eq!(y, m.y_height - 1);
    assert_eq!(x, 12);
    assert_eq!(idx, 3);
}

// The enumerator yields all sibling switches at a level before it
// descends, and it terminates on cyclic wiring.
#[test]
fn switch_chain_enumeration() {
    let m = FpgaModel::xc6slx9().unwrap();
    let (y, x) = (38, 12);

    let mut chain = SwitchChain::new(&m, y, x, "KEEP1_WIRE", SwDir::From);
    let mut num_chains = 0;
    let mut max_depth = 0;
    let mut seen_depth2_after_full_level1 = true;
    let mut level1_done = false;
    while let Some(c) = chain.next_chain().unwrap() {
        num_chains += 1;
        max_depth = max_depth.max(c.len());
        if c.len() > 1 && !level1_done {
            level1_done = true;
        } else if c.len() == 1 && level1_done {
            seen_depth2_after_full_level1 = false;
        }
        assert!(num_chains < 100_000, "enumerator does not terminate");
    }
    // KEEP1 drives every logicin wire plus fan/clk/sr
    assert!(num_chains > 63, "only {num_chains} chains");
    assert!(max_depth >= 2, "no chain descended past one switch");
    assert!(
        seen_depth2_after_full_level1,
        "siblings were not exhausted before descending"
    );

    let mut none = SwitchChain::new(&m, y, x, "NO_SUCH_WIRE", SwDir::From);
    assert!(none.next_chain().unwrap().is_none());
}
