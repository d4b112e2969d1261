//! Translation of a regular net's wire opcodes to DEF routing statements.

use std::io::Write;

use geometry::dir::Dir;
use geometry::point::Point;

use crate::error::{Error, Result};
use crate::model::{Net, RuleId, ViaColor, ViaRef, Wire, WireOp, WireType};
use crate::options::DefVersion;
use crate::sections::EmitContext;

/// Decodes a wire one opcode at a time.
///
/// A new path resets the point count. Every eighth element of a path starts
/// a new line. Consecutive points must share an axis.
pub struct PathDecoder<'a, 'c> {
    ctx: &'c EmitContext<'a>,
    net: &'a Net,
    prev_wire_type: WireType,
    prev: Option<Point>,
    path_cnt: usize,
    point_cnt: usize,
    active_rule: Option<RuleId>,
}

impl<'a, 'c> PathDecoder<'a, 'c> {
    pub fn new(ctx: &'c EmitContext<'a>, net: &'a Net) -> Self {
        Self {
            ctx,
            net,
            prev_wire_type: WireType::None,
            prev: None,
            path_cnt: 0,
            point_cnt: 0,
            active_rule: net.non_default_rule,
        }
    }

    /// Decodes every opcode of `wire`.
    pub fn decode<W: Write>(mut self, wire: &Wire, out: &mut W) -> Result<()> {
        let mut ops = wire.ops.iter().peekable();
        while let Some(op) = ops.next() {
            self.step(op, ops.peek().copied(), out)?;
        }
        Ok(())
    }

    /// Decodes a single opcode, given the one that follows it.
    pub fn step<W: Write>(&mut self, op: &WireOp, next: Option<&WireOp>, out: &mut W) -> Result<()> {
        match *op {
            WireOp::Path {
                layer,
                wire_type,
                kind,
            } => {
                let wire_type = if self.net.wire_type == WireType::Fixed {
                    WireType::Fixed
                } else {
                    wire_type
                };
                let layer = self.ctx.layer_name(layer);
                if self.path_cnt == 0 || wire_type != self.prev_wire_type {
                    write!(out, "\n      + {wire_type} {layer}")?;
                } else {
                    write!(out, "\n      NEW {layer}")?;
                }
                let tagged = matches!(next, Some(WireOp::Rule { .. }));
                if self.active_rule.is_some() && !tagged {
                    write!(out, " TAPER")?;
                }
                tracing::trace!(net = %self.net.name, ?kind, layer, "path");
                self.prev_wire_type = wire_type;
                self.point_cnt = 0;
                self.path_cnt += 1;
            }
            WireOp::Point { x, y, color } => {
                let p = self.ctx.units.point(Point::new(x, y));
                self.next_element(out)?;
                let mask = match color {
                    Some(c) if self.point_cnt % 2 == 0 => format!(" MASK {c}"),
                    _ => String::new(),
                };
                match self.aligned(p)? {
                    None => write!(out, " ( {} {} )", p.x, p.y)?,
                    Some(Dir::Vert) => write!(out, "{mask} ( * {} )", p.y)?,
                    Some(Dir::Horiz) => write!(out, "{mask} ( {} * )", p.x)?,
                }
                self.prev = Some(p);
            }
            WireOp::PointExt { x, y, ext } => {
                let p = self.ctx.units.point(Point::new(x, y));
                let ext = self.ctx.dist(ext);
                self.next_element(out)?;
                if self.point_cnt > 1 && self.prev == Some(p) {
                    write!(out, " ( * * {ext} )")?;
                } else {
                    match self.aligned(p)? {
                        None => write!(out, " ( {} {} {ext} )", p.x, p.y)?,
                        Some(Dir::Vert) => write!(out, " ( * {} {ext} )", p.y)?,
                        Some(Dir::Horiz) => write!(out, " ( {} * {ext} )", p.x)?,
                    }
                }
                self.prev = Some(p);
            }
            WireOp::Via { via, color } => {
                self.next_element(out)?;
                self.write_via(via, color, out)?;
            }
            // A tag naming the rule already in force is silent.
            WireOp::Rule { rule } => {
                if self.point_cnt == 0 && self.active_rule != Some(rule) {
                    write!(out, " TAPERRULE {} ", self.ctx.design[rule].name)?;
                    self.active_rule = Some(rule);
                }
            }
            WireOp::Rect {
                dx1,
                dy1,
                dx2,
                dy2,
                color,
            } => {
                self.next_element(out)?;
                let units = &self.ctx.units;
                write!(out, " RECT ")?;
                if let Some(c) = color {
                    write!(out, "MASK {c} ")?;
                }
                write!(
                    out,
                    "( {} {} {} {} ) ",
                    units.dist(dx1),
                    units.dist(dy1),
                    units.dist(dx2),
                    units.dist(dy2)
                )?;
            }
            WireOp::ITerm { .. } | WireOp::BTerm { .. } => {}
        }
        Ok(())
    }

    /// Counts a path element, breaking the line every eighth one.
    fn next_element<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.point_cnt += 1;
        if self.point_cnt % 8 == 0 {
            write!(out, "\n    ")?;
        }
        Ok(())
    }

    /// Classifies `p` against the previous point of the current path.
    ///
    /// Returns `None` for the first point of a path.
    fn aligned(&self, p: Point) -> Result<Option<Dir>> {
        let prev = match self.prev {
            Some(prev) if self.point_cnt > 1 => prev,
            _ => return Ok(None),
        };
        match p.aligned_with(prev) {
            Some(dir) => Ok(Some(dir)),
            None => Err(Error::DiagonalStep {
                net: self.net.name.clone(),
                from: prev,
                to: p,
            }),
        }
    }

    fn write_via<W: Write>(
        &self,
        via: ViaRef,
        color: Option<ViaColor>,
        out: &mut W,
    ) -> Result<()> {
        let version = self.ctx.version();
        write!(out, " ")?;
        if let Some(color) = color.filter(|_| version >= DefVersion::V5_8) {
            write!(out, "MASK {color} ")?;
        }
        match via {
            ViaRef::Block(id) => {
                let block_via = &self.ctx.design[id];
                match block_via.rotation {
                    Some(ref rotation) if version >= DefVersion::V5_6 => write!(
                        out,
                        "{} {}",
                        self.ctx.via_name(rotation.base),
                        rotation.orient.def_mnemonic()
                    )?,
                    _ => write!(out, "{}", block_via.name)?,
                }
            }
            ViaRef::Tech(_) => write!(out, "{}", self.ctx.via_name(via))?,
        }
        Ok(())
    }
}
