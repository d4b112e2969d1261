use geometry::orientation::Orientation;
use geometry::point::Point;
use geometry::polygon::Polygon;
use geometry::rect::Rect;
use test_log::test;

use crate::model::{
    BPin, BTerm, Blockage, Design, Fill, GCellGrid, GridPattern, Group, Inst, InstId, IoType,
    Layer, LayerId, LayerRule, MinCuts, Net, NetId, NonDefaultRule, Obstruction, PinShape,
    PlacementStatus, PropValue, Property, Region, RegionType, Row, RowDir, ScanChain, ScanInst,
    ScanList, ScanPartition, ScanPin, SigType, TechVia, TrackGrid, TrackPattern, Via, ViaBox,
    ViaParams, ViaRef, ViaRotation,
};
use crate::props::DEFINITIONS_BAG;
use crate::{Cause, DefOut, DefVersion, Error, WriterOptions};

fn options(version: DefVersion) -> WriterOptions {
    WriterOptions {
        version,
        ..Default::default()
    }
}

fn write_def(writer: &DefOut, design: &Design) -> (String, crate::IssueSet) {
    let mut buf = Vec::new();
    let issues = writer.write_block_to(design, &mut buf).unwrap();
    (String::from_utf8(buf).unwrap(), issues)
}

fn write_default(design: &Design) -> String {
    write_def(&DefOut::default(), design).0
}

/// Returns the lines between the line starting with `start` and the line
/// starting with `end`, inclusive.
fn section<'a>(def: &'a str, start: &str, end: &str) -> Vec<&'a str> {
    def.lines()
        .skip_while(|l| !l.starts_with(start))
        .take_while(|l| !l.starts_with(end))
        .chain(def.lines().find(|l| l.starts_with(end)))
        .collect()
}

struct Cells {
    design: Design,
    m1: LayerId,
    m2: LayerId,
    inst1: InstId,
    inst2: InstId,
    a: NetId,
    vdd: NetId,
}

/// Two placed inverters on a signal net and a power net.
fn cells() -> Cells {
    let mut design = Design::new("top");
    let m1 = design.add_layer(Layer::new("metal1", 1).with_alias("M1"));
    let m2 = design.add_layer(Layer::new("metal2", 3));
    let inv = design.add_master("INV");
    let inst1 = design.add_inst(Inst::new("inst1", inv).placed(
        Point::new(2000, 3000),
        Orientation::R0,
        PlacementStatus::Placed,
    ));
    let inst2 = design.add_inst(Inst::new("inst2", inv).placed(
        Point::new(4000, 3000),
        Orientation::MY,
        PlacementStatus::Firm,
    ));
    let a = design.add_net(Net::new("a"));
    let vdd = design.add_net(Net::special("VDD", SigType::Power));
    design.connect(inst1, "Y", Some(a), false);
    design.connect(inst2, "A", Some(a), false);
    design.connect(inst1, "VDD", Some(vdd), true);
    design.connect(inst2, "VDD", Some(vdd), true);
    Cells {
        design,
        m1,
        m2,
        inst1,
        inst2,
        a,
        vdd,
    }
}

#[test]
fn empty_design() {
    let def = write_default(&Design::new("top"));
    assert_eq!(
        def,
        "VERSION 5.8 ;\n\
         DIVIDERCHAR \"|\" ;\n\
         BUSBITCHARS \"[]\" ;\n\
         DESIGN top ;\n\
         UNITS DISTANCE MICRONS 1000 ;\n\
         COMPONENTS 0 ;\n\
         END COMPONENTS\n\
         NETS 0 ;\n\
         END NETS\n\
         END DESIGN\n"
    );
}

#[test]
fn names_case_sensitive_before_5_6() {
    let design = Design::new("top");
    let (def, _) = write_def(&DefOut::new(options(DefVersion::V5_5)), &design);
    assert!(def.starts_with("VERSION 5.5 ;\nNAMESCASESENSITIVE ON ;\n"));
    let (def, _) = write_def(&DefOut::new(options(DefVersion::V5_6)), &design);
    assert!(!def.contains("NAMESCASESENSITIVE"));
}

#[test]
fn die_area() {
    let mut design = Design::new("top");
    design.die_area = Polygon::from_rect(Rect::from_sides(0, 0, 0, 0));
    assert!(!write_default(&design).contains("DIEAREA"));

    design.die_area = Polygon::from_rect(Rect::from_sides(0, 0, 1000, 2000));
    assert!(write_default(&design).contains("DIEAREA ( 0 0 ) ( 1000 2000 ) ;\n"));

    design.die_area = Polygon::from_verts(vec![
        Point::new(0, 0),
        Point::new(100, 0),
        Point::new(100, 50),
        Point::new(50, 50),
        Point::new(50, 100),
        Point::new(0, 100),
    ]);
    assert!(write_default(&design)
        .contains("DIEAREA ( 0 0 ) ( 100 0 ) ( 100 50 ) ( 50 50 ) ( 50 100 ) ( 0 100 ) ;\n"));
}

#[test]
fn component_record() {
    let Cells { design, .. } = cells();
    let def = write_default(&design);
    assert_eq!(
        section(&def, "COMPONENTS", "END COMPONENTS"),
        [
            "COMPONENTS 2 ;",
            "    - inst1 INV + PLACED ( 2000 3000 ) N ;",
            "    - inst2 INV + FIXED ( 4000 3000 ) FN ;",
            "END COMPONENTS",
        ]
    );
}

#[test]
fn components_are_scaled_to_def_units() {
    let Cells { mut design, .. } = cells();
    design.db_units_per_micron = 2000;
    let def = write_default(&design);
    assert!(def.contains("    - inst1 INV + PLACED ( 1000 1500 ) N ;\n"));
}

#[test]
fn numeric_ids() {
    let Cells { design, .. } = cells();
    let writer = DefOut::new(WriterOptions {
        use_net_inst_ids: true,
        use_master_ids: true,
        ..Default::default()
    });
    let (def, _) = write_def(&writer, &design);
    assert!(def.contains("    - I0 M0 + PLACED ( 2000 3000 ) N ;\n"));
    assert!(def.contains("    - N0 ( I0 Y ) ( I1 A ) + USE SIGNAL ;\n"));
}

#[test]
fn special_net_with_regular_terminal_is_in_both_sections() {
    let Cells {
        mut design, vdd, ..
    } = cells();
    let tie = design.add_master("TIEHI");
    let tie_inst = design.add_inst(Inst::new("tie", tie));
    design.connect(tie_inst, "VDD", Some(vdd), false);

    let def = write_default(&design);
    assert_eq!(
        section(&def, "SPECIALNETS", "END SPECIALNETS"),
        [
            "SPECIALNETS 1 ;",
            "    - VDD ( inst1 VDD ) ( inst2 VDD ) + USE POWER ;",
            "END SPECIALNETS",
        ]
    );
    assert_eq!(
        section(&def, "NETS", "END NETS"),
        [
            "NETS 2 ;",
            "    - VDD ( tie VDD ) + USE POWER ;",
            "    - a ( inst1 Y ) ( inst2 A ) + USE SIGNAL ;",
            "END NETS",
        ]
    );
}

#[test]
fn wildcard_terminals_are_written_once() {
    let Cells {
        mut design, vdd, ..
    } = cells();
    design.nets[vdd.index()].wild_connected = true;
    let def = write_default(&design);
    assert!(def.contains("    - VDD ( * VDD ) + USE POWER ;\n"));
}

#[test]
fn net_attributes() {
    let Cells { mut design, a, .. } = cells();
    let net = &mut design.nets[a.index()];
    net.xtalk = 2;
    net.weight = 3;
    net.fixed_bump = true;
    net.source = crate::model::SourceType::Test;
    let def = write_default(&design);
    assert!(def.contains(
        "    - a ( inst1 Y ) ( inst2 A ) + XTALK 2 + USE SIGNAL + SOURCE TEST + FIXEDBUMP + WEIGHT 3 ;\n"
    ));
}

#[test]
fn selection_restricts_output() {
    let Cells {
        mut design, vdd, ..
    } = cells();
    let inv = design.insts[0].master;
    let other = design.add_inst(Inst::new("other", inv));
    let b = design.add_net(Net::new("b"));
    design.connect(other, "A", Some(b), false);

    let mut writer = DefOut::default();
    writer.select_net(b).select_net(vdd);
    let (def, _) = write_def(&writer, &design);

    assert_eq!(
        section(&def, "COMPONENTS", "END COMPONENTS"),
        ["COMPONENTS 1 ;", "    - other INV ;", "END COMPONENTS"]
    );
    assert!(def.contains("SPECIALNETS 1 ;\n"));
    assert_eq!(
        section(&def, "NETS", "END NETS"),
        ["NETS 1 ;", "    - b ( other A ) + USE SIGNAL ;", "END NETS"]
    );
}

#[test]
fn pins() {
    let Cells {
        mut design, m1, a, ..
    } = cells();
    let mut pin = BTerm::new("a", IoType::Input);
    pin.net = Some(a);
    pin.bpins.push(BPin {
        status: PlacementStatus::Placed,
        boxes: vec![PinShape {
            layer: m1,
            rect: Rect::from_sides(0, 0, 100, 200),
            mask: 0,
        }],
        rule: None,
    });
    design.add_bterm(pin);
    design.add_bterm(BTerm::new("floating", IoType::Output));

    let (def, issues) = write_def(&DefOut::default(), &design);
    assert_eq!(
        section(&def, "PINS", "END PINS"),
        [
            "PINS 1 ;",
            "    - a + NET a + DIRECTION INPUT + USE SIGNAL",
            "      + PORT",
            "        + LAYER metal1 ( -50 -100 ) ( 50 100 )",
            "        + PLACED ( 50 100 ) N ;",
            "END PINS",
        ]
    );
    assert!(def.contains("    - a ( PIN a ) ( inst1 Y ) ( inst2 A ) + USE SIGNAL ;\n"));

    assert_eq!(issues.num_warnings(), 1);
    let issue = issues.iter().next().unwrap();
    assert_eq!(
        issue.cause(),
        &Cause::PinWithoutNet {
            pin: "floating".into()
        }
    );
}

#[test]
fn extra_pins_before_port() {
    let Cells {
        mut design, m1, a, ..
    } = cells();
    let mut pin = BTerm::new("a", IoType::Input);
    pin.net = Some(a);
    for x in [0, 1000] {
        pin.bpins.push(BPin {
            status: PlacementStatus::Firm,
            boxes: vec![PinShape {
                layer: m1,
                rect: Rect::from_sides(x, 0, x + 100, 100),
                mask: 1,
            }],
            rule: None,
        });
    }
    design.add_bterm(pin);

    let (def, _) = write_def(&DefOut::new(options(DefVersion::V5_6)), &design);
    // The header counts terminals, while each extra shape gets its own record.
    let pins = section(&def, "PINS", "END PINS");
    assert_eq!(pins[0], "PINS 1 ;");
    assert_eq!(pins.iter().filter(|l| l.starts_with("    - a")).count(), 2);
    assert!(def.contains("PINS 1 ;\n    - a + NET a"));
    assert!(def.contains(" ;\n    - a.extra1 + NET a + DIRECTION INPUT + USE SIGNAL"));
    assert!(def.contains("        + FIXED ( 1050 50 ) N ;\nEND PINS\n"));
    assert!(!def.contains("PORT"));
    assert!(!def.contains("MASK"));

    let (def, _) = write_def(&DefOut::new(options(DefVersion::V5_8)), &design);
    assert!(!def.contains(".extra"));
    assert_eq!(def.matches("+ PORT").count(), 2);
    assert_eq!(def.matches(" MASK 1 ").count(), 2);
}

#[test]
fn layer_alias() {
    let Cells { mut design, m1, .. } = cells();
    design.obstructions.push(Obstruction::new(m1, Rect::from_sides(0, 0, 100, 100)));
    let writer = DefOut::new(WriterOptions {
        use_layer_alias: true,
        ..Default::default()
    });
    let (def, _) = write_def(&writer, &design);
    assert!(def.contains("    - LAYER M1 RECT ( 0 0 ) ( 100 100 ) ;\n"));
}

#[test]
fn blockages_and_fills() {
    let Cells {
        mut design,
        m1,
        m2,
        inst2,
        ..
    } = cells();
    design.obstructions.push(Obstruction::new(m2, Rect::from_sides(0, 0, 10, 10)));
    design.obstructions.push(Obstruction {
        inst: Some(inst2),
        pushed_down: true,
        ..Obstruction::new(m1, Rect::from_sides(20, 20, 30, 30))
    });
    design.obstructions.push(Obstruction {
        system_reserved: true,
        ..Obstruction::new(m1, Rect::from_sides(0, 0, 5, 5))
    });
    design.blockages.push(Blockage {
        soft: true,
        max_density: 50.0,
        ..Blockage::new(Rect::from_sides(0, 0, 10, 10))
    });
    design.fills.push(Fill {
        layer: m1,
        rect: Rect::from_sides(0, 0, 4, 4),
        mask: 2,
        opc: true,
    });

    let def = write_default(&design);
    assert_eq!(
        section(&def, "BLOCKAGES", "END BLOCKAGES"),
        [
            "BLOCKAGES 3 ;",
            "    - LAYER metal1 + COMPONENT inst2 + PUSHDOWN RECT ( 20 20 ) ( 30 30 ) ;",
            "    - LAYER metal2 RECT ( 0 0 ) ( 10 10 ) ;",
            "    - PLACEMENT + SOFT + PARTIAL 50.000000 RECT ( 0 0 ) ( 10 10 ) ;",
            "END BLOCKAGES",
        ]
    );
    assert_eq!(
        section(&def, "FILLS", "END FILLS"),
        [
            "FILLS 1 ;",
            "    - LAYER metal1 + MASK 2 + OPC RECT ( 0 0 ) ( 4 4 ) ;",
            "END FILLS",
        ]
    );
}

#[test]
fn scan_chains() {
    let Cells {
        mut design,
        inst1,
        inst2,
        ..
    } = cells();
    let inv = design.insts[0].master;
    let inst3 = design.add_inst(Inst::new("inst3", inv));
    let si = design.add_bterm(BTerm::new("si", IoType::Input));
    let so = design.add_bterm(BTerm::new("so", IoType::Output));
    let scan_inst = |design: &mut Design, inst| ScanInst {
        inst,
        scan_in: ScanPin::ITerm(design.connect(inst, "SI", None, false)),
        scan_out: ScanPin::ITerm(design.connect(inst, "SO", None, false)),
    };
    let floating = ScanList {
        insts: vec![scan_inst(&mut design, inst1)],
    };
    let ordered = ScanList {
        insts: vec![scan_inst(&mut design, inst2), scan_inst(&mut design, inst3)],
    };
    design.scan_chains.push(ScanChain {
        name: "chain".into(),
        scan_in: ScanPin::BTerm(si),
        scan_out: ScanPin::BTerm(so),
        partitions: vec![ScanPartition {
            name: "p0".into(),
            lists: vec![floating, ordered],
        }],
    });

    let (def, _) = write_def(&DefOut::default(), &design);
    assert!(def.ends_with(
        "\nSCANCHAINS 1 ;\n\n\
         - chain\n\
         + START PIN si\n\
         + FLOATING\n  inst1 ( IN SI ) ( OUT SO )\n\
         + ORDERED\n  inst2 ( IN SI ) ( OUT SO )\n  inst3 ( IN SI ) ( OUT SO )\n\
         + PARTITION p0\n\
         + STOP PIN so ;\n\n\
         END SCANCHAINS\n\n\
         END DESIGN\n"
    ));

    let mut second = design.scan_chains[0].partitions[0].clone();
    second.name = "p1".into();
    design.scan_chains[0].partitions.push(second);
    let (def, _) = write_def(&DefOut::default(), &design);
    assert!(def.contains("\nSCANCHAINS 2 ;\n\n- chain_0\n"));
    assert!(def.contains("+ STOP PIN so ;\n\n- chain_1\n"));
}

#[test]
fn placement() {
    let Cells {
        mut design, m1, a, ..
    } = cells();
    let mut pin = BTerm::new("a", IoType::Input);
    pin.net = Some(a);
    pin.bpins.push(BPin {
        status: PlacementStatus::Placed,
        boxes: vec![PinShape {
            layer: m1,
            rect: Rect::from_sides(0, 0, 100, 200),
            mask: 0,
        }],
        rule: None,
    });
    design.add_bterm(pin);
    let inv = design.insts[0].master;
    design.add_inst(Inst::new("unplaced", inv));

    let mut buf = Vec::new();
    DefOut::default()
        .write_placement_to(&design, &mut buf)
        .unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "a 50 100 : N\nCELLS\ninst1 2000 3000 : N\ninst2 4000 3000 : FN\n"
    );
}

#[test]
fn write_to_file() {
    let Cells { design, .. } = cells();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/top.def");

    let issues = DefOut::default().write_block(&design, &path).unwrap();
    assert!(issues.is_empty());
    let def = std::fs::read_to_string(&path).unwrap();
    assert_eq!(def, write_default(&design));
}

#[test]
fn open_failure() {
    let Cells { design, .. } = cells();
    let dir = tempfile::tempdir().unwrap();

    let err = DefOut::default().write_block(&design, dir.path()).unwrap_err();
    assert!(matches!(err, Error::Open { ref path, .. } if path == dir.path()));
    let err = DefOut::default()
        .write_placement(&design, dir.path())
        .unwrap_err();
    assert!(matches!(err, Error::Open { .. }));
}

fn region(name: &str, boundaries: Vec<Rect>, kind: RegionType) -> Region {
    Region {
        name: name.into(),
        boundaries,
        kind,
        properties: Vec::new(),
    }
}

fn group(name: &str, insts: Vec<InstId>, region: Option<crate::model::RegionId>) -> Group {
    Group {
        name: name.into(),
        insts,
        region,
        properties: Vec::new(),
    }
}

fn row(name: &str, origin: Point, orient: Orientation, dir: RowDir, site_count: u32) -> Row {
    Row {
        name: name.into(),
        site: "core".into(),
        origin,
        orient,
        dir,
        site_count,
        spacing: 200,
        properties: Vec::new(),
    }
}

#[test]
fn rows_tracks_and_gcell_grid() {
    let Cells {
        mut design, m1, m2, ..
    } = cells();
    design
        .rows
        .push(row("row0", Point::zero(), Orientation::R0, RowDir::Horizontal, 10));
    design.rows.push(row(
        "row1",
        Point::new(0, 1000),
        Orientation::MX,
        RowDir::Vertical,
        4,
    ));
    design.track_grids.push(TrackGrid {
        layer: m1,
        x: vec![TrackPattern {
            origin: 100,
            count: 10,
            step: 200,
            first_mask: 1,
            same_mask: true,
        }],
        y: vec![TrackPattern {
            origin: 50,
            count: 5,
            step: 100,
            first_mask: 2,
            same_mask: false,
        }],
    });
    design.track_grids.push(TrackGrid {
        layer: m2,
        x: vec![TrackPattern {
            origin: 0,
            count: 3,
            step: 400,
            first_mask: 0,
            same_mask: true,
        }],
        y: Vec::new(),
    });
    design.gcell_grid = Some(GCellGrid {
        x: vec![GridPattern {
            origin: 0,
            count: 11,
            step: 100,
        }],
        y: vec![GridPattern {
            origin: 0,
            count: 6,
            step: 200,
        }],
    });

    // Track masks do not depend on the version.
    for version in [DefVersion::V5_5, DefVersion::V5_6, DefVersion::V5_8] {
        let (def, _) = write_def(&DefOut::new(options(version)), &design);
        assert!(def.contains(
            "UNITS DISTANCE MICRONS 1000 ;\n\
             ROW row0 core 0 0 N DO 10 BY 1 STEP 200 0 ;\n\
             ROW row1 core 0 1000 FS DO 1 BY 4 STEP 0 200 ;\n\
             TRACKS X 100 DO 10 STEP 200 MASK 1 SAMEMASK LAYER metal1 ;\n\
             TRACKS Y 50 DO 5 STEP 100 MASK 2 LAYER metal1 ;\n\
             TRACKS X 0 DO 3 STEP 400 LAYER metal2 ;\n\
             GCELLGRID X 0 DO 11 STEP 100 ;\n\
             GCELLGRID Y 0 DO 6 STEP 200 ;\n\
             COMPONENTS 2 ;\n"
        ));
    }
}

/// A box via, a generated via, and a rotated copy of the box via.
fn vias(design: &mut Design, m1: LayerId, m2: LayerId) {
    let cut = design.add_layer(Layer::new("via1", 2));
    let base = design.add_via(Via {
        boxes: vec![
            ViaBox {
                layer: m1,
                rect: Rect::from_sides(-10, -10, 10, 10),
            },
            ViaBox {
                layer: m2,
                rect: Rect::from_sides(-20, -10, 20, 10),
            },
        ],
        ..Via::new("VIA12_box", m1)
    });
    design.add_via(Via {
        generate_rule: Some("VIAGEN12".into()),
        params: Some(ViaParams {
            cut_size: Point::new(10, 10),
            bottom_layer: m1,
            cut_layer: cut,
            top_layer: m2,
            cut_spacing: Point::new(20, 20),
            bottom_enclosure: Point::new(5, 0),
            top_enclosure: Point::new(0, 5),
            rows: 2,
            cols: 1,
            origin: Point::zero(),
            bottom_offset: Point::zero(),
            top_offset: Point::zero(),
        }),
        boxes: vec![ViaBox {
            layer: cut,
            rect: Rect::from_sides(-5, -5, 5, 5),
        }],
        ..Via::new("VIA12_gen", m1)
    });
    design.add_via(Via {
        rotation: Some(ViaRotation {
            base: ViaRef::Block(base),
            orient: Orientation::R90,
        }),
        boxes: vec![ViaBox {
            layer: m1,
            rect: Rect::from_sides(-10, -10, 10, 10),
        }],
        ..Via::new("VIA12_box_R90", m1)
    });
}

#[test]
fn vias_section() {
    let Cells {
        mut design, m1, m2, ..
    } = cells();
    vias(&mut design, m1, m2);

    let (def, _) = write_def(&DefOut::new(options(DefVersion::V5_8)), &design);
    assert_eq!(
        section(&def, "VIAS", "END VIAS"),
        [
            "VIAS 2 ;",
            "    - VIA12_box + RECT metal1 ( -10 -10 ) ( 10 10 ) + RECT metal2 ( -20 -10 ) ( 20 10 ) ;",
            "    - VIA12_gen + VIARULE VIAGEN12 + CUTSIZE 10 10  + LAYERS metal1 via1 metal2  \
             + CUTSPACING 20 20  + ENCLOSURE 5 0 0 5  + ROWCOL 2 1  ;",
            "END VIAS",
        ]
    );

    // Generated vias are written as shapes before VIARULE existed.
    let (def, _) = write_def(&DefOut::new(options(DefVersion::V5_5)), &design);
    assert_eq!(
        section(&def, "VIAS", "END VIAS"),
        [
            "VIAS 3 ;",
            "    - VIA12_box + RECT metal1 ( -10 -10 ) ( 10 10 ) + RECT metal2 ( -20 -10 ) ( 20 10 ) ;",
            "    - VIA12_gen + RECT via1 ( -5 -5 ) ( 5 5 ) ;",
            "    - VIA12_box_R90 + RECT metal1 ( -10 -10 ) ( 10 10 ) ;",
            "END VIAS",
        ]
    );
}

#[test]
fn only_rotated_vias_omit_section() {
    let Cells { mut design, m1, .. } = cells();
    let v12 = design.add_tech_via(TechVia {
        name: "V12".into(),
        bottom_layer: m1,
    });
    design.add_via(Via {
        rotation: Some(ViaRotation {
            base: ViaRef::Tech(v12),
            orient: Orientation::R90,
        }),
        ..Via::new("V12_R90", m1)
    });

    let (def, _) = write_def(&DefOut::new(options(DefVersion::V5_6)), &design);
    assert!(!def.contains("VIAS"));
    let (def, _) = write_def(&DefOut::new(options(DefVersion::V5_5)), &design);
    assert!(def.contains("VIAS 1 ;\n    - V12_R90 ;\nEND VIAS\n"));
}

#[test]
fn non_default_rules() {
    let Cells {
        mut design, m1, m2, ..
    } = cells();
    let cut = design.add_layer(Layer::new("via1", 2));
    let v12 = design.add_tech_via(TechVia {
        name: "V12".into(),
        bottom_layer: m1,
    });
    design.add_non_default_rule(NonDefaultRule {
        hard_spacing: true,
        layer_rules: vec![
            LayerRule {
                layer: m1,
                width: 200,
                spacing: 100,
                wire_extension: 0,
            },
            LayerRule {
                layer: m2,
                width: 300,
                spacing: 0,
                wire_extension: 50,
            },
        ],
        use_vias: vec![v12],
        use_via_rules: vec!["VIAGEN12".into()],
        min_cuts: vec![MinCuts {
            layer: cut,
            count: 2,
        }],
        ..NonDefaultRule::new("DOUBLE")
    });

    let def = write_default(&design);
    assert_eq!(
        section(&def, "NONDEFAULTRULES", "END NONDEFAULTRULES"),
        [
            "NONDEFAULTRULES 1 ;",
            "    - DOUBLE",
            "      + HARDSPACING",
            "      + LAYER metal1 WIDTH 200 SPACING 100",
            "      + LAYER metal2 WIDTH 300 WIREEXTENSION 50",
            "      + VIA V12",
            "      + VIARULE VIAGEN12",
            "      + MINCUTS via1 2",
            "    ;",
            "END NONDEFAULTRULES",
        ]
    );
}

#[test]
fn regions_and_groups() {
    let Cells {
        mut design,
        inst1,
        inst2,
        ..
    } = cells();
    let fence = design.add_region(region(
        "fence",
        vec![Rect::from_sides(0, 0, 1000, 1000)],
        RegionType::Exclusive,
    ));
    design.add_region(region(
        "guide",
        vec![
            Rect::from_sides(0, 0, 500, 500),
            Rect::from_sides(600, 0, 900, 500),
        ],
        RegionType::Suggested,
    ));
    design.add_region(region(
        "plain",
        vec![Rect::from_sides(0, 0, 10, 10)],
        RegionType::Inclusive,
    ));
    let empty = design.add_region(region("empty", Vec::new(), RegionType::Exclusive));
    design.insts[inst1.index()].region = Some(fence);
    design.insts[inst2.index()].region = Some(empty);
    design.add_group(group("g1", vec![inst1, inst2], Some(fence)));
    design.add_group(group("g2", Vec::new(), Some(fence)));
    design.add_group(group("g3", vec![inst2], Some(empty)));

    let def = write_default(&design);
    assert_eq!(
        section(&def, "REGIONS", "END REGIONS"),
        [
            "REGIONS 3 ;",
            "    - fence ( 0 0 ) ( 1000 1000 ) + TYPE FENCE ;",
            "    - guide ( 0 0 ) ( 500 500 ) ( 600 0 ) ( 900 500 ) + TYPE GUIDE ;",
            "    - plain ( 0 0 ) ( 10 10 ) ;",
            "END REGIONS",
        ]
    );
    assert_eq!(
        section(&def, "COMPONENTS", "END COMPONENTS"),
        [
            "COMPONENTS 2 ;",
            "    - inst1 INV + PLACED ( 2000 3000 ) N + REGION fence ;",
            "    - inst2 INV + FIXED ( 4000 3000 ) FN ;",
            "END COMPONENTS",
        ]
    );
    assert_eq!(
        section(&def, "GROUPS", "END GROUPS"),
        [
            "GROUPS 2 ;",
            "    - g1 inst1 inst2 + REGION fence ;",
            "    - g3 inst2 ;",
            "END GROUPS",
        ]
    );
}

#[test]
fn halo() {
    let Cells {
        mut design, inst1, ..
    } = cells();
    design.insts[inst1.index()].halo = Some(Rect::from_sides(10, 20, 30, 40));

    let (def, _) = write_def(&DefOut::new(options(DefVersion::V5_6)), &design);
    assert!(def.contains("    - inst1 INV + PLACED ( 2000 3000 ) N + HALO 10 20 30 40 ;\n"));
    let (def, _) = write_def(&DefOut::new(options(DefVersion::V5_5)), &design);
    assert!(def.contains("    - inst1 INV + PLACED ( 2000 3000 ) N ;\n"));
    assert!(!def.contains("HALO"));
}

#[test]
fn version_gates() {
    let Cells {
        mut design,
        m1,
        m2,
        inst1,
        ..
    } = cells();
    vias(&mut design, m1, m2);
    design.component_mask_shift = vec![m1, m2];
    let empty = design.add_region(region("empty", Vec::new(), RegionType::Exclusive));
    design.add_group(group("g", Vec::new(), Some(empty)));
    design.insts[inst1.index()].region = Some(empty);

    for version in [DefVersion::V5_5, DefVersion::V5_6, DefVersion::V5_8] {
        let (def, _) = write_def(&DefOut::new(options(version)), &design);
        assert_eq!(
            def.contains("    - VIA12_box_R90 "),
            version < DefVersion::V5_6,
            "{version}"
        );
        assert_eq!(
            def.contains("COMPONENTMASKSHIFT metal1 metal2 ;\nCOMPONENTS 2 ;\n"),
            version == DefVersion::V5_8,
            "{version}"
        );
        assert!(!def.contains("REGION"), "{version}");
        assert!(!def.contains("GROUPS"), "{version}");
    }
}

/// A design declaring one component pin property and one row property.
fn design_with_definitions() -> Cells {
    let mut cells = cells();
    let bag = Property::new(DEFINITIONS_BAG, "".into())
        .with_child(
            Property::new("COMPONENTPIN", "".into())
                .with_child(Property::new("cap", 0.0f64.into())),
        )
        .with_child(
            Property::new("ROW", "".into()).with_child(
                Property::new("tier", 0i64.into())
                    .with_child(Property::new("MIN", 0i64.into()))
                    .with_child(Property::new("MAX", 3i64.into())),
            ),
        );
    cells.design.properties.push(bag);
    cells
}

#[test]
fn property_definitions_and_pin_properties() {
    let Cells {
        mut design,
        inst1,
        a,
        ..
    } = design_with_definitions();
    let mut r = row("row0", Point::zero(), Orientation::R0, RowDir::Horizontal, 10);
    r.properties.push(Property::new("tier", 2i64.into()));
    design.rows.push(r);

    let mut pin = BTerm::new("a", IoType::Input);
    pin.net = Some(a);
    pin.properties.push(Property::new("cap", 1.5f64.into()));
    pin.properties.push(Property::new("tier", 1i64.into()));
    design.add_bterm(pin);
    let y = design.iterms.iter().position(|t| t.inst == inst1 && t.mterm == "Y");
    let iterm = &mut design.iterms[y.unwrap()];
    iterm.properties.push(Property::new("cap", 0.25f64.into()));
    iterm.properties.push(Property::new("flag", PropValue::Bool(true)));

    let def = write_default(&design);
    assert!(def.contains(
        "UNITS DISTANCE MICRONS 1000 ;\n\
         PROPERTYDEFINITIONS\n\
         COMPONENTPIN cap REAL ;\n\
         ROW tier INTEGER RANGE 0 3 ;\n\
         END PROPERTYDEFINITIONS\n\
         ROW row0 core 0 0 N DO 10 BY 1 STEP 200 0 + PROPERTY tier 2  ;\n"
    ));
    assert_eq!(
        section(&def, "PINPROPERTIES", "END PINPROPERTIES"),
        [
            "PINPROPERTIES 2 ;",
            "  - PIN a + PROPERTY cap 1.5  ;",
            "  - inst1 Y + PROPERTY cap 0.25  ;",
            "END PINPROPERTIES",
        ]
    );
}

#[test]
fn no_pin_properties_without_definitions() {
    let Cells { mut design, .. } = cells();
    design.iterms[0]
        .properties
        .push(Property::new("cap", 0.25f64.into()));
    let def = write_default(&design);
    assert!(!def.contains("PROPERTYDEFINITIONS"));
    assert!(!def.contains("PINPROPERTIES"));
}

#[test]
fn chain_without_partitions_is_omitted() {
    let Cells { mut design, .. } = cells();
    let si = design.add_bterm(BTerm::new("si", IoType::Input));
    let so = design.add_bterm(BTerm::new("so", IoType::Output));
    design.scan_chains.push(ScanChain {
        name: "chain".into(),
        scan_in: ScanPin::BTerm(si),
        scan_out: ScanPin::BTerm(so),
        partitions: Vec::new(),
    });
    let def = write_default(&design);
    assert!(!def.contains("SCANCHAINS"));
    assert!(def.ends_with("END NETS\nEND DESIGN\n"));
}

#[test]
fn dangling_ids_are_errors() {
    let Cells { mut design, .. } = cells();
    assert!(design.validate().is_ok());

    let mut pin = BTerm::new("a", IoType::Input);
    pin.net = Some(NetId::new(99));
    design.bterms.push(pin);
    let mut buf = Vec::new();
    let err = DefOut::default()
        .write_block_to(&design, &mut buf)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownId { kind: "net", index: 99, ref owner } if owner == "a"
    ));
    assert!(buf.is_empty());
    assert!(matches!(
        DefOut::default().write_placement_to(&design, &mut buf),
        Err(Error::UnknownId { .. })
    ));
}

#[test]
fn dangling_selection_is_an_error() {
    let Cells { design, .. } = cells();
    let mut writer = DefOut::default();
    writer.select_inst(InstId::new(7));
    let err = writer.write_block_to(&design, &mut Vec::new()).unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownId { kind: "instance", index: 7, .. }
    ));
}

