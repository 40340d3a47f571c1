use xs6::lut::{lut2bool, parse_boolexpr, BASE_M_AC, BASE_M_BD, BASE_X_AB, BASE_X_CD};

// The B/D logic base anchor: "A3*A5" survives compile and reduce
// unchanged.
#[test]
fn a3_a5_anchor() {
    let lut = parse_boolexpr("A3*A5", &BASE_M_BD, true).unwrap();
    assert_eq!(lut2bool(lut, 64, &BASE_M_BD, true), "A3*A5");
}

#[test]
fn reduce_and_reparse_is_identity() {
    // a spread of truth tables: sparse, dense, structured and
    // irregular
    let mut tables = vec![
        0u64,
        1,
        1 << 63,
        0xFFFF_FFFF_FFFF_FFFF,
        0xAAAA_AAAA_AAAA_AAAA,
        0x0000_FFFF_0000_FFFF,
        0x8000_0000_0000_0001,
        0x0123_4567_89AB_CDEF,
        0xF0E1_D2C3_B4A5_9687,
    ];
    // a deterministic pseudo-random walk
    let mut v = 0x243F_6A88_85A3_08D3u64;
    for _ in 0..16 {
        v = v.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        tables.push(v);
    }

    let params: [(&[u8; 6], bool); 4] = [
        (&BASE_M_AC, true),
        (&BASE_M_BD, true),
        (&BASE_X_AB, false),
        (&BASE_X_CD, false),
    ];
    for &t in &tables {
        for (base, flip) in params {
            let expr = lut2bool(t, 64, base, flip);
            let back = parse_boolexpr(&expr, base, flip).unwrap();
            assert_eq!(back, t, "table {t:#018x} expr {expr:?}");
        }
    }
}

#[test]
fn constant_shapes() {
    assert_eq!(lut2bool(0, 64, &BASE_M_AC, true), "");
    assert_eq!(lut2bool(u64::MAX, 64, &BASE_M_AC, true), "A6+~A6");
    assert_eq!(parse_boolexpr("", &BASE_M_AC, true).unwrap(), 0);
    assert_eq!(parse_boolexpr("A6+~A6", &BASE_M_AC, true).unwrap(), u64::MAX);
}

#[test]
fn lut5_width() {
    // the lut-5 half uses only the low 32 bits
    let lut = parse_boolexpr("A1*A2", &BASE_M_AC, true).unwrap() & 0xFFFF_FFFF;
    let expr = lut2bool(lut, 32, &BASE_M_AC, true);
    assert!(!expr.is_empty());
    assert_eq!(parse_boolexpr(&expr, &BASE_M_AC, true).unwrap() & 0xFFFF_FFFF, lut);
}

#[test]
fn xor_and_parentheses() {
    for expr in ["A2@A3", "(A1+~A2)*A3", "~(A1*A2)@A6"] {
        let lut = parse_boolexpr(expr, &BASE_X_AB, false).unwrap();
        let reduced = lut2bool(lut, 64, &BASE_X_AB, false);
        assert_eq!(
            parse_boolexpr(&reduced, &BASE_X_AB, false).unwrap(),
            lut,
            "{expr} -> {reduced}"
        );
    }
}
