//! Tagged operation argument.
//!
//! Every operation resolves its `Ref`s once, up front, instead of guessing at
//! each use whether an argument is a name, a coordinate or a number.

use std::fmt;

use nalgebra::Vector2;

use crate::geom2::{fmt_coord, fmt_num, Coord};

#[derive(Clone, Debug, PartialEq)]
pub enum Ref {
    /// Registry name.
    Name(String),
    /// Literal position.
    Coord(Coord),
    /// Bare number (radius, length, vertex count, ...).
    Number(f64),
    /// Literal direction.
    Vector(Coord),
}

impl Ref {
    pub fn name(name: impl Into<String>) -> Self {
        Ref::Name(name.into())
    }
    pub fn xy(x: f64, y: f64) -> Self {
        Ref::Coord(Vector2::new(x, y))
    }
    pub fn vector(dx: f64, dy: f64) -> Self {
        Ref::Vector(Vector2::new(dx, dy))
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Ref::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Ref::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Text used for derived entity names (`Ruler_A_B`): names verbatim,
    /// literals not at all.
    pub(crate) fn label(&self) -> Option<&str> {
        self.as_name()
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ref::Name(n) => write!(f, "\"{}\"", n),
            Ref::Coord(c) => write!(f, "{}", fmt_coord(*c)),
            Ref::Number(v) => write!(f, "{}", fmt_num(*v)),
            Ref::Vector(v) => write!(f, "<{}, {}>", fmt_num(v.x), fmt_num(v.y)),
        }
    }
}

impl From<&str> for Ref {
    fn from(name: &str) -> Self {
        Ref::Name(name.to_string())
    }
}

impl From<String> for Ref {
    fn from(name: String) -> Self {
        Ref::Name(name)
    }
}

impl From<(f64, f64)> for Ref {
    fn from((x, y): (f64, f64)) -> Self {
        Ref::xy(x, y)
    }
}

impl From<Coord> for Ref {
    fn from(c: Coord) -> Self {
        Ref::Coord(c)
    }
}

impl From<f64> for Ref {
    fn from(v: f64) -> Self {
        Ref::Number(v)
    }
}
