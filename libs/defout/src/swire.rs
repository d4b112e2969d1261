//! Special wiring of power and ground nets.

use std::io::Write;

use crate::centerline::{decompose_oct, decompose_rect};
use crate::error::Result;
use crate::issues::{Cause, IssueSet, Severity, WriteIssue};
use crate::model::{Net, SBox, SBoxShape, SWire, WireType};
use crate::sections::EmitContext;

/// Writes the routing of one special wire: its routing state followed by
/// every box, joined by `NEW`.
pub fn write_swire<W: Write>(
    ctx: &EmitContext<'_>,
    net: &Net,
    swire: &SWire,
    issues: &mut IssueSet,
    out: &mut W,
) -> Result<()> {
    match swire.wire_type {
        WireType::Cover => write!(out, "\n      + COVER")?,
        WireType::Fixed => write!(out, "\n      + FIXED")?,
        WireType::Shield => match swire.shield {
            Some(shield) => write!(out, "\n      + SHIELD {}", ctx.design[shield].name)?,
            None => {
                issues.add(WriteIssue::new_and_log(
                    Cause::MissingShieldNet {
                        net: net.name.clone(),
                    },
                    Severity::Warning,
                ));
                write!(out, "\n      + ROUTED")?;
            }
        },
        _ => write!(out, "\n      + ROUTED")?,
    }

    for (i, sbox) in swire.boxes.iter().enumerate() {
        if i > 0 {
            write!(out, "\n      NEW")?;
        }
        write_sbox(ctx, net, sbox, out)?;
    }
    Ok(())
}

fn write_sbox<W: Write>(ctx: &EmitContext<'_>, net: &Net, sbox: &SBox, out: &mut W) -> Result<()> {
    let shape = sbox.wire_shape.as_str();

    let (layer, centerline) = match sbox.shape {
        SBoxShape::Via { via, at, masks } => {
            let at = ctx.units.point(at);
            write!(out, " {} 0", ctx.layer_name(ctx.via_bottom_layer(via)))?;
            if let Some(shape) = shape {
                write!(out, " + SHAPE {shape}")?;
            }
            write!(out, " {at} ")?;
            if let Some(masks) = masks {
                write!(out, "MASK {masks} ")?;
            }
            write!(out, "{}", ctx.via_name(via))?;
            return Ok(());
        }
        SBoxShape::Path { layer, rect, dir } => (layer, decompose_rect(&net.name, rect, dir)?),
        SBoxShape::Oct { layer, ref oct } => (layer, decompose_oct(oct)),
    };

    let c = centerline.to_def(&ctx.units);
    write!(out, " {} {}", ctx.layer_name(layer), c.width)?;
    match (shape, sbox.mask) {
        (None, 0) => write!(out, " {} {}", c.start, c.end)?,
        (None, mask) => write!(out, " {} MASK {mask} {}", c.start, c.end)?,
        (Some(shape), 0) => write!(out, " + SHAPE {shape} {} {}", c.start, c.end)?,
        (Some(shape), mask) => {
            write!(out, " + SHAPE {shape} + MASK {mask} {} {}", c.start, c.end)?
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use arcstr::ArcStr;
    use geometry::oct::Oct;
    use geometry::point::Point;
    use geometry::rect::Rect;
    use test_log::test;

    use super::*;
    use crate::error::Error;
    use crate::model::{
        Design, Layer, LayerId, SBoxDir, SigType, TechVia, ViaColor, ViaRef, WireShapeType,
    };
    use crate::options::WriterOptions;
    use crate::select::Selection;

    fn write(design: &Design, net: &Net) -> (Result<String>, IssueSet) {
        let ctx = EmitContext::new(design, WriterOptions::default(), Selection::all());
        let mut issues = IssueSet::new();
        let mut buf = Vec::new();
        let result = net
            .swires
            .iter()
            .try_for_each(|swire| write_swire(&ctx, net, swire, &mut issues, &mut buf))
            .map(|_| String::from_utf8(buf).unwrap());
        (result, issues)
    }

    fn design() -> (Design, LayerId) {
        let mut design = Design::new("top");
        let m1 = design.add_layer(Layer::new("metal1", 1).with_alias("M1"));
        (design, m1)
    }

    #[test]
    fn path_boxes() {
        let (design, m1) = design();
        let mut net = Net::special("VDD", SigType::Power);
        let mut masked = SBox::path(m1, Rect::from_sides(0, 0, 100, 20), SBoxDir::Horizontal);
        masked.mask = 2;
        net.swires.push(SWire::new(
            WireType::Routed,
            vec![
                SBox::path(m1, Rect::from_sides(0, 0, 100, 20), SBoxDir::Horizontal)
                    .with_shape(WireShapeType::Stripe),
                masked.clone(),
                masked.with_shape(WireShapeType::FollowPin),
            ],
        ));
        let (out, issues) = write(&design, &net);
        assert!(issues.is_empty());
        assert_eq!(
            out.unwrap(),
            "\n      + ROUTED metal1 20 + SHAPE STRIPE ( 0 10 ) ( 100 10 )\
             \n      NEW metal1 20 ( 0 10 ) MASK 2 ( 100 10 )\
             \n      NEW metal1 20 + SHAPE FOLLOWPIN + MASK 2 ( 0 10 ) ( 100 10 )"
        );
    }

    #[test]
    fn via_and_oct_boxes() {
        let (mut design, m1) = design();
        let via = design.add_tech_via(TechVia {
            name: "VIA12".into(),
            bottom_layer: m1,
        });
        let mut net = Net::special("VSS", SigType::Ground);
        let mut colored = SBox::via(ViaRef::Tech(via), Point::new(5, 5));
        if let SBoxShape::Via { ref mut masks, .. } = colored.shape {
            *masks = Some(ViaColor {
                top: 1,
                cut: 1,
                bottom: 2,
            });
        }
        net.swires.push(SWire::new(
            WireType::Fixed,
            vec![
                SBox::via(ViaRef::Tech(via), Point::new(5, 5)).with_shape(WireShapeType::Stripe),
                colored,
                SBox {
                    shape: SBoxShape::Oct {
                        layer: m1,
                        oct: Oct::new(Point::new(0, 0), Point::new(50, 50), 10),
                    },
                    wire_shape: WireShapeType::None,
                    mask: 0,
                },
            ],
        ));
        let (out, _) = write(&design, &net);
        assert_eq!(
            out.unwrap(),
            "\n      + FIXED metal1 0 + SHAPE STRIPE ( 5 5 ) VIA12\
             \n      NEW metal1 0 ( 5 5 ) MASK 112 VIA12\
             \n      NEW metal1 10 ( 0 0 ) ( 50 50 )"
        );
    }

    #[test]
    fn missing_shield_falls_back_to_routed() {
        let (design, _) = design();
        let mut net = Net::special("VDD", SigType::Power);
        net.swires.push(SWire::new(WireType::Shield, Vec::new()));
        let (out, issues) = write(&design, &net);
        assert_eq!(out.unwrap(), "\n      + ROUTED");
        assert_eq!(issues.num_warnings(), 1);
        assert_eq!(
            issues.iter().next().unwrap().cause(),
            &Cause::MissingShieldNet {
                net: ArcStr::from("VDD")
            }
        );
    }

    #[test]
    fn odd_box_aborts() {
        let (design, m1) = design();
        let mut net = Net::special("VDD", SigType::Power);
        net.swires.push(SWire::new(
            WireType::Routed,
            vec![SBox::path(m1, Rect::from_sides(0, 0, 7, 9), SBoxDir::Undefined)],
        ));
        let (out, _) = write(&design, &net);
        assert!(matches!(out, Err(Error::OddDimensions { .. })));
    }
}
