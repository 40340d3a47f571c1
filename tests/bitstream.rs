use xs6::consts::{Cmd, ConfigReg};
use xs6::model::{DevKind, LutPos, Slew, Suspend, SwDir, DEV_LOGM};
use xs6::reader::RegAction;
use xs6::{
    bitstream_for_model, extract_model, read_bitstream, write_bitstream, FpgaModel,
};

fn push_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn push_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn push_t1(out: &mut Vec<u8>, reg: u16, words: &[u16]) {
    push_u16(out, (1 << 13) | (2 << 11) | (reg << 5) | words.len() as u16);
    for w in words {
        push_u16(out, *w);
    }
}

fn with_header(body: &[u8]) -> Vec<u8> {
    let mut out = vec![
        0x00, 0x09, 0x0F, 0xF0, 0x0F, 0xF0, 0x0F, 0xF0, 0x0F, 0xF0, 0x00, 0x00, 0x01,
    ];
    for (key, s) in [
        (b'a', "design"),
        (b'b', "6slx9tqg144"),
        (b'c', "2012/01/01"),
        (b'd', "12:00:00"),
    ] {
        out.push(key);
        push_u16(&mut out, (s.len() + 1) as u16);
        out.extend_from_slice(s.as_bytes());
        out.push(0);
    }
    out.push(b'e');
    push_u32(&mut out, body.len() as u32);
    out.extend_from_slice(body);
    out
}

// A minimal stream: sync, IDCODE, FLR, RCRC, FAR, WCFG, one all-zero
// frame, GRESTORE, DESYNC.
fn minimal_bitstream() -> Vec<u8> {
    let mut body = Vec::new();
    push_u32(&mut body, 0xAA99_5566);
    push_t1(&mut body, 14, &[0x0400, 0x1093]); // IDCODE
    push_t1(&mut body, 13, &[896]); // FLR
    push_t1(&mut body, 5, &[Cmd::Rcrc as u16]);
    push_t1(&mut body, 1, &[0, 0]); // FAR_MAJ (0,0,0,0)
    push_t1(&mut body, 5, &[Cmd::Wcfg as u16]);
    push_u16(&mut body, (1 << 13) | (2 << 11) | (3 << 5)); // FDRI type 1
    push_u16(&mut body, (2 << 13) | (2 << 11) | (3 << 5)); // FDRI type 2
    push_u32(&mut body, 65); // one frame
    body.extend_from_slice(&[0u8; 130]);
    push_u32(&mut body, 0); // auto-crc
    push_t1(&mut body, 5, &[Cmd::Grestore as u16]);
    push_t1(&mut body, 5, &[Cmd::Desync as u16]);
    with_header(&body)
}

#[test]
fn header_preservation() {
    let input = minimal_bitstream();
    let bs = read_bitstream(&input).unwrap();

    assert_eq!(bs.header_str[0], "design");
    assert_eq!(bs.header_str[1], "6slx9tqg144");
    assert_eq!(bs.header_str[2], "2012/01/01");
    assert_eq!(bs.header_str[3], "12:00:00");
    assert_eq!(bs.idcode, Some(0x0400_1093));
    assert_eq!(bs.flr, Some(896));
    assert_eq!(bs.fdri_words, 65);
    assert_eq!(bs.num_regs_before_bits, 5);
    assert_eq!(
        bs.regs[2],
        RegAction::Write {
            reg: ConfigReg::Cmd,
            value: Cmd::Rcrc as u16
        }
    );
    assert_eq!(bs.regs[3], RegAction::WriteFar { maj: 0, min: 0 });
    assert_eq!(
        bs.regs.last(),
        Some(&RegAction::Write {
            reg: ConfigReg::Cmd,
            value: Cmd::Desync as u16
        })
    );

    // re-emission yields the identical byte sequence
    let output = write_bitstream(&bs).unwrap();
    assert_eq!(output, input);
}

#[test]
fn parse_errors() {
    use xs6::BitError;

    // FDRI without a preceding FAR
    let mut body = Vec::new();
    push_u32(&mut body, 0xAA99_5566);
    push_t1(&mut body, 14, &[0x0400, 0x1093]);
    push_t1(&mut body, 13, &[896]);
    push_u16(&mut body, (2 << 13) | (2 << 11) | (3 << 5));
    push_u32(&mut body, 65);
    body.extend_from_slice(&[0u8; 130]);
    let d = with_header(&body);
    assert!(matches!(
        read_bitstream(&d),
        Err(BitError::FdriWithoutFar(_))
    ));

    // wrong IDCODE is unsupported
    let mut d = minimal_bitstream();
    let pos = d
        .windows(4)
        .position(|w| w == [0x04, 0x00, 0x10, 0x93])
        .unwrap();
    d[pos..pos + 4].copy_from_slice(&0x0401_D093u32.to_be_bytes());
    assert!(matches!(
        read_bitstream(&d),
        Err(BitError::UnsupportedIdcode(0x0401_D093))
    ));

    // FLR must be 896 for the die
    let mut d = minimal_bitstream();
    let pos = d.windows(2).position(|w| w == 896u16.to_be_bytes()).unwrap();
    d[pos..pos + 2].copy_from_slice(&895u16.to_be_bytes());
    assert!(matches!(read_bitstream(&d), Err(BitError::BadFlr(895))));
}

#[test]
fn model_to_bitstream_roundtrip() {
    let mut model = FpgaModel::xc6slx9().unwrap();

    // an output pad
    let (iy, ix, iidx) = model.find_iob("P48").unwrap();
    {
        let dev = model.device_mut(iy, ix, DevKind::Iob, iidx).unwrap();
        dev.instantiated = true;
        let iob = dev.iob_mut().unwrap();
        iob.ostandard = Some("LVCMOS33".to_string());
        iob.drive_strength = 12;
        iob.o_used = true;
        iob.slew = Some(Slew::Slow);
        iob.suspend = Some(Suspend::ThreeState);
    }

    // a LUT on the logic-M device beside routing tile (38, 5)
    let (ly, lx) = (38, 6);
    {
        let dev = model.device_mut(ly, lx, DevKind::Logic, DEV_LOGM).unwrap();
        dev.instantiated = true;
        dev.logic_mut().unwrap().set_lut(LutPos::A, 6, "A3*A5");
    }

    // one routing switch from the catalogue
    let (sy, sx) = (38, 12);
    let entry = model.bitpos_catalogue()[0].clone();
    let from = model.wire_idx(&entry.from).unwrap();
    let to = model.wire_idx(&entry.to).unwrap();
    let sw = model.switch_lookup(sy, sx, from, to).unwrap();
    model.switch_enable(sy, sx, sw);

    let bs = bitstream_for_model(
        &model,
        [
            "roundtrip".to_string(),
            "6slx9tqg144".to_string(),
            "2012/01/01".to_string(),
            "12:00:00".to_string(),
        ],
    )
    .unwrap();
    let bytes = write_bitstream(&bs).unwrap();
    let bs2 = read_bitstream(&bytes).unwrap();

    // stable on the header, register and frame axes
    assert_eq!(bs2.header_str, bs.header_str);
    assert_eq!(bs2.regs, bs.regs);
    assert_eq!(bs2.fdri_words, bs.fdri_words);
    assert!(bs2.bits == bs.bits, "frame bits differ after roundtrip");
    let bytes2 = write_bitstream(&bs2).unwrap();
    assert_eq!(bytes2, bytes);

    // and the extraction recovers the model configuration
    let mut model2 = FpgaModel::xc6slx9().unwrap();
    let mut bits = bs2.bits.clone();
    extract_model(&mut model2, &mut bits).unwrap();

    let dev = model2.device(iy, ix, DevKind::Iob, iidx).unwrap();
    assert!(dev.instantiated);
    let iob = dev.iob().unwrap();
    assert_eq!(iob.ostandard.as_deref(), Some("LVCMOS33"));
    assert_eq!(iob.drive_strength, 12);
    assert!(iob.o_used);
    assert_eq!(iob.slew, Some(Slew::Slow));
    assert_eq!(iob.suspend, Some(Suspend::ThreeState));

    let dev = model2.device(ly, lx, DevKind::Logic, DEV_LOGM).unwrap();
    assert!(dev.instantiated);
    assert_eq!(dev.logic().unwrap().lut(LutPos::A, 6), Some("A3*A5"));

    assert!(model2.switch_is_enabled(sy, sx, sw));
    assert_eq!(model2.nets().len(), 1);
    assert_eq!(model2.nets()[0].switches, vec![(sy, sx, sw)]);
    assert_eq!(model2.switch_str(sy, sx, sw, SwDir::From), entry.from);
    assert_eq!(model2.switch_str(sy, sx, sw, SwDir::To), entry.to);
}
