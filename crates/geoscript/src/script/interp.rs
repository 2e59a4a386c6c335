//! Operation dispatch table.
//!
//! Each operation has one English name plus the German aliases accepted for
//! older scripts. Handlers translate parsed arguments into `Ref`s and call the
//! matching `Session` method; the table is the only way a script reaches the
//! session.

use std::collections::HashMap;

use crate::construct::{CircleSpec, Value};
use crate::geom2::fmt_num;
use crate::registry::{Entity, Ref};
use crate::session::Session;

use super::error::CallError;
use super::parser::{Arg, Command};

type Handler = fn(&mut Session, &Args) -> Result<Value, CallError>;

/// One row of the dispatch table.
pub struct OpSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    handler: Handler,
}

impl OpSpec {
    pub(crate) fn call(&self, session: &mut Session, args: &Args) -> Result<Value, CallError> {
        (self.handler)(session, args)
    }
}

pub static OPS: &[OpSpec] = &[
    OpSpec { name: "Point", aliases: &["Punkt"], usage: "Point(x, y | [x, y], name?)", handler: op_point },
    OpSpec { name: "Line", aliases: &["Linie"], usage: "Line(A, B, name?)", handler: op_line },
    OpSpec { name: "Segment", aliases: &["Strecke"], usage: "Segment(A, B | length, name?)", handler: op_segment },
    OpSpec {
        name: "InfiniteLine",
        aliases: &["Gerade"],
        usage: "InfiniteLine(A, B | <dx, dy> | line, name?)",
        handler: op_infinite_line,
    },
    OpSpec { name: "Vector", aliases: &["Vektor"], usage: "Vector(end, \"name\"?) | Vector(start, end, name?)", handler: op_vector },
    OpSpec {
        name: "Polygon",
        aliases: &["Vieleck"],
        usage: "Polygon(A, B, C, ..., \"name\"?) | Polygon([A, B, C]) | Polygon(center, vertex, n, <dx, dy>?)",
        handler: op_polygon,
    },
    OpSpec {
        name: "RegularPolygon",
        aliases: &[],
        usage: "RegularPolygon(center, vertex, n, <dx, dy>?, name?)",
        handler: op_regular_polygon,
    },
    OpSpec {
        name: "Circle",
        aliases: &["Kreis"],
        usage: "Circle(M, r | segment | P, name?) | Circle(A, B, C, name?)",
        handler: op_circle,
    },
    OpSpec { name: "Ellipse", aliases: &[], usage: "Ellipse(M, rx, ry, rotation?, name?)", handler: op_ellipse },
    OpSpec {
        name: "Midpoint",
        aliases: &["Mittelpunkt"],
        usage: "Midpoint(A, B) | Midpoint(polygon) | Midpoint(A, B, C, ..., \"name\"?)",
        handler: op_midpoint,
    },
    OpSpec { name: "Intersection", aliases: &["Schnittpunkt"], usage: "Intersection(g, h, name?)", handler: op_intersection },
    OpSpec { name: "Perpendicular", aliases: &["Lot"], usage: "Perpendicular(P, g, name?)", handler: op_perpendicular },
    OpSpec { name: "Parallel", aliases: &["Parallele"], usage: "Parallel(P, g, name?)", handler: op_parallel },
    OpSpec { name: "Distance", aliases: &["Abstand"], usage: "Distance(A, B)", handler: op_distance },
    OpSpec { name: "Angle", aliases: &["Winkel"], usage: "Angle(A, B, C, name?)", handler: op_angle },
    OpSpec { name: "Text", aliases: &[], usage: "Text(P, content, name?)", handler: op_text },
    OpSpec {
        name: "Translate",
        aliases: &["Verschiebung"],
        usage: "Translate(element, dx, dy, newName?)",
        handler: op_translate,
    },
    OpSpec {
        name: "Rotate",
        aliases: &["Rotation"],
        usage: "Rotate(element, pivot, degrees, newName?)",
        handler: op_rotate,
    },
    OpSpec { name: "Reflect", aliases: &["Spiegelung"], usage: "Reflect(element, mirror, newName?)", handler: op_reflect },
    OpSpec { name: "Color", aliases: &["Farbe"], usage: "Color(element, color)", handler: op_color },
    OpSpec { name: "Rename", aliases: &["Name"], usage: "Rename(old, new)", handler: op_rename },
    OpSpec { name: "Title", aliases: &["Titel"], usage: "Title(text)", handler: op_title },
    OpSpec {
        name: "AxisLimits",
        aliases: &["UserAxisLimits"],
        usage: "AxisLimits(minX, maxX, minY, maxY)",
        handler: op_axis_limits,
    },
    OpSpec { name: "ShowAxes", aliases: &["Diagramm"], usage: "ShowAxes(true | false)", handler: op_show_axes },
];

/// Find an operation by English name or alias (case-sensitive).
pub fn lookup(name: &str) -> Option<&'static OpSpec> {
    OPS.iter()
        .find(|op| op.name == name || op.aliases.contains(&name))
}

/// Arguments of one call, with bindings substituted and the keyword name
/// (`name = ...` or `as = ...`) split off.
pub(crate) struct Args {
    items: Vec<Arg>,
    name: Option<String>,
}

impl Args {
    pub(crate) fn bind(cmd: &Command, vars: &HashMap<String, Value>) -> Result<Self, CallError> {
        let items = cmd.args.iter().map(|a| substitute(a, vars)).collect();
        let mut name = None;
        for (key, value) in &cmd.kwargs {
            match (key.as_str(), substitute(value, vars)) {
                ("name" | "as", Arg::Str(s) | Arg::Ident(s)) => name = Some(s),
                ("name" | "as", other) => {
                    return Err(CallError::Usage(format!("`{}` expects a string, got {}", key, other.describe())))
                }
                _ => return Err(CallError::Usage(format!("unknown keyword argument `{}`", key))),
            }
        }
        Ok(Self { items, name })
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn arity(&self, min: usize, max: usize) -> Result<(), CallError> {
        let n = self.len();
        if n < min || n > max {
            let want = if min == max {
                format!("{}", min)
            } else {
                format!("{} to {}", min, max)
            };
            return Err(CallError::Usage(format!("expected {} arguments, got {}", want, n)));
        }
        Ok(())
    }

    fn get(&self, i: usize) -> Result<&Arg, CallError> {
        self.items
            .get(i)
            .ok_or_else(|| CallError::Usage(format!("missing argument {}", i + 1)))
    }

    fn wrong(&self, i: usize, expected: &str) -> CallError {
        let got = self.items.get(i).map(Arg::describe).unwrap_or("nothing");
        CallError::Usage(format!("argument {}: expected {}, got {}", i + 1, expected, got))
    }

    fn reference(&self, i: usize) -> Result<Ref, CallError> {
        to_ref(self.get(i)?).ok_or_else(|| self.wrong(i, "a name, a coordinate, a vector or a number"))
    }

    fn number(&self, i: usize) -> Result<f64, CallError> {
        match self.get(i)? {
            Arg::Num(v) => Ok(*v),
            _ => Err(self.wrong(i, "a number")),
        }
    }

    fn count(&self, i: usize) -> Result<usize, CallError> {
        let v = self.number(i)?;
        if v.is_finite() && v >= 0.0 && v.fract() == 0.0 {
            Ok(v as usize)
        } else {
            Err(self.wrong(i, "a non-negative whole number"))
        }
    }

    fn word(&self, i: usize) -> Result<&str, CallError> {
        match self.get(i)? {
            Arg::Str(s) | Arg::Ident(s) => Ok(s),
            _ => Err(self.wrong(i, "a name")),
        }
    }

    fn text(&self, i: usize) -> Result<String, CallError> {
        match self.get(i)? {
            Arg::Str(s) | Arg::Ident(s) => Ok(s.clone()),
            Arg::Num(v) => Ok(fmt_num(*v)),
            _ => Err(self.wrong(i, "a string")),
        }
    }

    fn flag(&self, i: usize) -> Result<bool, CallError> {
        match self.get(i)? {
            Arg::Bool(b) => Ok(*b),
            _ => Err(self.wrong(i, "true or false")),
        }
    }

    /// Keyword name, else the positional argument at `i` if present.
    fn name_at(&self, i: usize) -> Result<Option<String>, CallError> {
        if self.name.is_some() {
            if self.len() > i {
                return Err(CallError::Usage("name given both positionally and as keyword".into()));
            }
            return Ok(self.name.clone());
        }
        match self.items.get(i) {
            None => Ok(None),
            Some(_) => self.word(i).map(|s| Some(s.to_string())),
        }
    }

    /// Point refs from position `from` on; list arguments are flattened.
    fn refs_from(&self, from: usize) -> Result<Vec<Ref>, CallError> {
        let mut out = Vec::new();
        for (k, a) in self.items.iter().enumerate().skip(from) {
            let flat: &[Arg] = match a {
                Arg::List(items) => items,
                single => std::slice::from_ref(single),
            };
            for item in flat {
                out.push(to_ref(item).ok_or_else(|| self.wrong(k, "point references"))?);
            }
        }
        Ok(out)
    }

    /// Split a variadic argument list: a trailing quoted string is the new
    /// element's name, bare identifiers are always references.
    fn variadic(&self) -> Result<(Vec<Ref>, Option<String>), CallError> {
        if let Some(Arg::Str(last)) = self.items.last() {
            if self.name.is_some() {
                return Err(CallError::Usage("name given both positionally and as keyword".into()));
            }
            let mut refs = self.refs_from(0)?;
            refs.pop();
            return Ok((refs, Some(last.clone())));
        }
        Ok((self.refs_from(0)?, self.name.clone()))
    }
}

fn to_ref(a: &Arg) -> Option<Ref> {
    match a {
        Arg::Num(v) => Some(Ref::Number(*v)),
        Arg::Str(s) | Arg::Ident(s) => Some(Ref::Name(s.clone())),
        Arg::Pair(x, y) => Some(Ref::xy(*x, *y)),
        Arg::Vector(dx, dy) => Some(Ref::vector(*dx, *dy)),
        Arg::Bool(_) | Arg::List(_) => None,
    }
}

/// Replace a bound identifier by the value it was bound to.
fn substitute(a: &Arg, vars: &HashMap<String, Value>) -> Arg {
    match a {
        Arg::Ident(id) => match vars.get(id) {
            Some(Value::Name(n)) => Arg::Ident(n.clone()),
            Some(Value::Number(v)) => Arg::Num(*v),
            Some(Value::Text(t)) => Arg::Str(t.clone()),
            Some(Value::Unit) | None => a.clone(),
        },
        Arg::List(items) => Arg::List(items.iter().map(|i| substitute(i, vars)).collect()),
        other => other.clone(),
    }
}

fn name(v: String) -> Result<Value, CallError> {
    Ok(Value::Name(v))
}

fn op_point(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(1, 3)?;
    let (at, next) = match a.get(0)? {
        Arg::Num(x) => (Ref::xy(*x, a.number(1)?), 2),
        Arg::Pair(x, y) => (Ref::xy(*x, *y), 1),
        _ => return Err(a.wrong(0, "x, y or [x, y]")),
    };
    if a.len() > next + 1 {
        return Err(a.wrong(next + 1, "nothing"));
    }
    let n = a.name_at(next)?;
    name(s.point(&at, n.as_deref())?)
}

fn op_line(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(2, 3)?;
    let n = a.name_at(2)?;
    name(s.line(&a.reference(0)?, &a.reference(1)?, n.as_deref())?)
}

fn op_segment(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(2, 3)?;
    let n = a.name_at(2)?;
    name(s.segment(&a.reference(0)?, &a.reference(1)?, n.as_deref())?)
}

fn op_infinite_line(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(2, 3)?;
    let n = a.name_at(2)?;
    name(s.infinite_line(&a.reference(0)?, &a.reference(1)?, n.as_deref())?)
}

fn op_vector(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(1, 3)?;
    match a.len() {
        1 => name(s.vector(None, &a.reference(0)?, a.name.as_deref())?),
        // Vector(P, "v"): a quoted second argument is the vector's name.
        2 if matches!(a.get(1)?, Arg::Str(_)) => {
            let n = a.name_at(1)?;
            name(s.vector(None, &a.reference(0)?, n.as_deref())?)
        }
        _ => {
            let n = a.name_at(2)?;
            name(s.vector(Some(&a.reference(0)?), &a.reference(1)?, n.as_deref())?)
        }
    }
}

fn op_polygon(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    if matches!(a.items.get(2), Some(Arg::Num(_))) {
        return op_regular_polygon(s, a);
    }
    let (refs, n) = a.variadic()?;
    name(s.polygon(&refs, n.as_deref())?)
}

fn op_regular_polygon(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(3, 5)?;
    let direction = match a.items.get(3) {
        Some(Arg::Vector(..) | Arg::Pair(..)) => Some(a.reference(3)?),
        _ => None,
    };
    let name_pos = if direction.is_some() { 4 } else { 3 };
    if a.len() > name_pos + 1 {
        return Err(a.wrong(name_pos + 1, "nothing"));
    }
    let n = a.name_at(name_pos)?;
    name(s.regular_polygon(
        &a.reference(0)?,
        &a.reference(1)?,
        a.count(2)?,
        direction.as_ref(),
        n.as_deref(),
    )?)
}

fn op_circle(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(2, 4)?;
    // A numeric second argument is always the radius form; otherwise a third
    // coordinate pair or bare point name selects the three-point form.
    let names_point = |arg: &Arg| match arg {
        Arg::Pair(..) => true,
        Arg::Ident(w) => matches!(s.registry().get(w), Some(Entity::Point(_))),
        _ => false,
    };
    let radius_form = matches!(a.get(1)?, Arg::Num(_));
    if radius_form && a.len() > 3 {
        return Err(a.wrong(3, "nothing"));
    }
    let three_point = !radius_form && (a.len() == 4 || (a.len() == 3 && names_point(a.get(2)?)));
    if three_point {
        let n = a.name_at(3)?;
        return name(s.circle_through(&a.reference(0)?, &a.reference(1)?, &a.reference(2)?, n.as_deref())?);
    }
    let spec = match a.get(1)? {
        Arg::Num(r) => CircleSpec::Radius(*r),
        Arg::Pair(x, y) => CircleSpec::Through(Ref::xy(*x, *y)),
        Arg::Str(w) | Arg::Ident(w) => match s.registry().get(w) {
            Some(Entity::Curve(_)) => CircleSpec::Segment(w.clone()),
            _ => CircleSpec::Through(Ref::name(w.clone())),
        },
        _ => return Err(a.wrong(1, "a radius, a segment or a point")),
    };
    let n = a.name_at(2)?;
    name(s.circle(&a.reference(0)?, &spec, n.as_deref())?)
}

fn op_ellipse(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(3, 5)?;
    let (rotation, name_pos) = match a.items.get(3) {
        Some(Arg::Num(r)) => (*r, 4),
        _ => (0.0, 3),
    };
    if a.len() > name_pos + 1 {
        return Err(a.wrong(name_pos + 1, "nothing"));
    }
    let n = a.name_at(name_pos)?;
    name(s.ellipse(&a.reference(0)?, a.number(1)?, a.number(2)?, rotation, n.as_deref())?)
}

fn op_midpoint(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    let (refs, n) = a.variadic()?;
    name(s.midpoint(&refs, n.as_deref())?)
}

fn op_intersection(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(2, 3)?;
    let n = a.name_at(2)?;
    name(s.intersection(&a.reference(0)?, &a.reference(1)?, n.as_deref())?)
}

fn op_perpendicular(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(2, 3)?;
    let n = a.name_at(2)?;
    name(s.perpendicular(&a.reference(0)?, &a.reference(1)?, n.as_deref())?)
}

fn op_parallel(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(2, 3)?;
    let n = a.name_at(2)?;
    name(s.parallel(&a.reference(0)?, &a.reference(1)?, n.as_deref())?)
}

fn op_distance(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(2, 2)?;
    Ok(Value::Number(s.distance(&a.reference(0)?, &a.reference(1)?)?))
}

fn op_angle(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(3, 4)?;
    let n = a.name_at(3)?;
    let m = s.angle(&a.reference(0)?, &a.reference(1)?, &a.reference(2)?, n.as_deref())?;
    Ok(Value::Text(m.display))
}

fn op_text(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(2, 3)?;
    let n = a.name_at(2)?;
    name(s.text(&a.reference(0)?, &a.text(1)?, n.as_deref())?)
}

fn op_translate(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(3, 4)?;
    let n = a.name_at(3)?;
    name(s.translate(a.word(0)?, a.number(1)?, a.number(2)?, n.as_deref())?)
}

fn op_rotate(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(3, 4)?;
    let n = a.name_at(3)?;
    name(s.rotate(a.word(0)?, &a.reference(1)?, a.number(2)?, n.as_deref())?)
}

fn op_reflect(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(2, 3)?;
    let n = a.name_at(2)?;
    name(s.reflect(a.word(0)?, &a.reference(1)?, n.as_deref())?)
}

fn op_color(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(2, 2)?;
    name(s.recolor(a.word(0)?, &a.text(1)?)?)
}

fn op_rename(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(2, 2)?;
    name(s.rename(a.word(0)?, a.word(1)?)?)
}

fn op_title(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(1, 1)?;
    s.set_title(&a.text(0)?);
    Ok(Value::Unit)
}

fn op_axis_limits(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(4, 4)?;
    s.set_axis_limits(a.number(0)?, a.number(1)?, a.number(2)?, a.number(3)?)?;
    Ok(Value::Unit)
}

fn op_show_axes(s: &mut Session, a: &Args) -> Result<Value, CallError> {
    a.arity(1, 1)?;
    s.set_axes_visible(a.flag(0)?);
    Ok(Value::Unit)
}
