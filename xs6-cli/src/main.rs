use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use xs6::model::DeviceConfig;
use xs6::{extract_model, read_bitstream, Bitstream, FpgaModel, RegAction};

mod regs;

fn main() {
    let mut bits_only = false;
    let mut swbits = false;
    let mut filename = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--bits-only" => bits_only = true,
            "--swbits" => swbits = true,
            _ => filename = Some(arg),
        }
    }

    if swbits {
        print_swbits();
        return;
    }

    let Some(filename) = filename else {
        eprintln!("usage: bit2fp [--bits-only|--swbits] <bitfile>");
        std::process::exit(1);
    };
    let f = match std::fs::read(&filename) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{filename}: {e}");
            std::process::exit(1);
        }
    };
    let bs = match read_bitstream(&f) {
        Ok(bs) => bs,
        Err(e) => {
            eprintln!("{filename}: {e}");
            std::process::exit(1);
        }
    };

    print_header(&bs);
    println!();
    print_regs(&bs);
    if !bits_only {
        println!();
        print_floorplan(&bs);
    }
}

fn print_swbits() {
    for entry in xs6::parts::builtin_routing_bitpos() {
        println!("{}", entry.to_line());
    }
}

fn print_header(bs: &Bitstream) {
    let mut fields = vec![
        ("Design", bs.header_str[0].clone()),
        ("Part", bs.header_str[1].clone()),
        ("Date", bs.header_str[2].clone()),
        ("Time", bs.header_str[3].clone()),
    ];
    if let Some(idcode) = bs.idcode {
        fields.push(("IDCODE", format!("0x{idcode:08X}")));
    }
    if let Some(flr) = bs.flr {
        fields.push(("Frame length", flr.to_string()));
    }
    fields.push(("FDRI words", bs.fdri_words.to_string()));

    println!("Bitstream header:");
    let name_width = fields.iter().map(|(name, _)| name.len()).max().unwrap();
    for (name, value) in fields {
        println!("  {name}:{} {value}", " ".repeat(name_width - name.len()));
    }
}

fn print_regs(bs: &Bitstream) {
    println!("Register actions:");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["Index", "Register", "Value"]);
    for (i, action) in bs.regs.iter().enumerate() {
        let phase_mark = if i == bs.num_regs_before_bits { "*" } else { "" };
        match action {
            RegAction::Noop => {
                table.add_row([format!("{i}{phase_mark}"), "noop".to_string(), String::new()]);
            }
            RegAction::Write { reg, value } => {
                table.add_row([
                    format!("{i}{phase_mark}"),
                    format!("{reg:?}"),
                    regs::describe(*reg, *value),
                ]);
            }
            RegAction::WriteWide { reg, value } => {
                table.add_row([
                    format!("{i}{phase_mark}"),
                    format!("{reg:?}"),
                    format!("0x{value:08X}"),
                ]);
            }
            RegAction::WriteFar { maj, min } => {
                table.add_row([
                    format!("{i}{phase_mark}"),
                    "FarMaj".to_string(),
                    format!(
                        "blk={} row={} major={} minor={}",
                        (maj & 0xF000) >> 12,
                        (maj & 0x0F00) >> 8,
                        maj & 0x00FF,
                        min & 0x03FF
                    ),
                ]);
            }
            RegAction::WriteMfwr => {
                table.add_row([format!("{i}{phase_mark}"), "Mfwr".to_string(), String::new()]);
            }
        }
    }
    println!("{table}");
}

fn print_floorplan(bs: &Bitstream) {
    let mut model = match FpgaModel::xc6slx9() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("model: {e}");
            std::process::exit(1);
        }
    };
    let mut bits = bs.bits.clone();
    if let Err(e) = extract_model(&mut model, &mut bits) {
        eprintln!("extract: {e}");
        std::process::exit(1);
    }

    println!("Configured devices:");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["Y", "X", "Device", "Config"]);
    for (y, x, tile) in model.iter_tiles() {
        for dev in &tile.devices {
            if !dev.instantiated {
                continue;
            }
            let config = match &dev.config {
                DeviceConfig::Iob(iob) => {
                    let mut parts = Vec::new();
                    if let Some(s) = &iob.istandard {
                        parts.push(format!("istd={s}"));
                    }
                    if let Some(s) = &iob.ostandard {
                        parts.push(format!("ostd={s}"));
                        parts.push(format!("drive={}", iob.drive_strength));
                    }
                    parts.join(" ")
                }
                DeviceConfig::Logic(logic) => {
                    let mut parts = Vec::new();
                    for pos in xs6::model::LutPos::ALL {
                        if let Some(expr) = logic.lut(pos, 6) {
                            parts.push(format!("{}6LUT=\"{expr}\"", pos.letter()));
                        }
                    }
                    parts.join(" ")
                }
                DeviceConfig::None => String::new(),
            };
            table.add_row([
                y.to_string(),
                x.to_string(),
                format!("{:?}", dev.kind),
                config,
            ]);
        }
    }
    println!("{table}");

    println!();
    println!("Routed switches:");
    for net in model.nets() {
        for &(y, x, idx) in &net.switches {
            println!(
                "  y{y} x{x} {} {} {}",
                model.switch_str(y, x, idx, xs6::SwDir::From),
                if model.switch_is_bidir(y, x, idx) {
                    "<->"
                } else {
                    "->"
                },
                model.switch_str(y, x, idx, xs6::SwDir::To),
            );
        }
    }
}
