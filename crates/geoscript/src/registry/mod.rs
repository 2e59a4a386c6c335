//! Entity registry: the single name → entity map of a session.
//!
//! Invariants:
//! - Names are unique across all entity kinds.
//! - Iteration follows insertion order; a rename moves the entity to the end.
//! - `insert` never overwrites: a taken name is reported as `NameCollision`
//!   and the existing entity stays as it was.

mod entity;
mod reference;

use std::collections::HashMap;

pub use entity::{
    tooltip, Curve, Entity, PointEntity, Stroke, StrokeStyle, TextEntity, DEFAULT_FONT_SIZE,
    DEFAULT_STROKE_WIDTH,
};
pub(crate) use entity::retitle_tooltip;
pub use reference::Ref;

use crate::error::{GeoError, GeoResult};
use crate::geom2::Coord;

#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: Vec<(String, Entity)>,
    index: HashMap<String, usize>,
}

impl Registry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Entity> {
        let i = *self.index.get(name)?;
        Some(&mut self.entries[i].1)
    }

    /// Like `get`, reporting `NotFound` for absent names.
    pub fn require(&self, name: &str) -> GeoResult<&Entity> {
        self.get(name).ok_or_else(|| GeoError::NotFound {
            name: name.to_string(),
        })
    }

    pub fn require_mut(&mut self, name: &str) -> GeoResult<&mut Entity> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.entries[i].1),
            None => Err(GeoError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entity)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Fails with `NameCollision` if taken (existing entity untouched).
    pub fn insert(&mut self, name: &str, entity: Entity) -> GeoResult<()> {
        self.check_free(name)?;
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push((name.to_string(), entity));
        Ok(())
    }

    /// `Ok` if `name` is a valid, unused name.
    pub fn check_free(&self, name: &str) -> GeoResult<()> {
        if name.is_empty() {
            return Err(GeoError::invalid("empty name"));
        }
        if self.contains(name) {
            return Err(GeoError::NameCollision {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// `prefix + k` for the smallest `k >= 1` not in use (linear probe).
    pub fn generate_name(&self, prefix: &str) -> String {
        let mut k = 1usize;
        loop {
            let candidate = format!("{}{}", prefix, k);
            if !self.contains(&candidate) {
                return candidate;
            }
            k += 1;
        }
    }

    /// `base` itself if free, else `base + k` for the smallest free `k >= 2`.
    pub fn unique_name(&self, base: &str) -> String {
        if !self.contains(base) {
            return base.to_string();
        }
        let mut k = 2usize;
        loop {
            let candidate = format!("{}{}", base, k);
            if !self.contains(&candidate) {
                return candidate;
            }
            k += 1;
        }
    }

    /// Move the entity at `old` to `new`, keeping its data.
    ///
    /// A tooltip titled with the old name is retitled.
    pub fn rename(&mut self, old: &str, new: &str) -> GeoResult<()> {
        self.check_free(new)?;
        let i = *self.index.get(old).ok_or_else(|| GeoError::NotFound {
            name: old.to_string(),
        })?;
        let (_, mut entity) = self.entries.remove(i);
        if let Some(Some(tip)) = entity.tooltip_mut() {
            retitle_tooltip(tip, old, new);
        }
        self.entries.push((new.to_string(), entity));
        self.reindex();
        Ok(())
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, (n, _)) in self.entries.iter().enumerate() {
            self.index.insert(n.clone(), i);
        }
    }

    /// Resolve a point reference: coordinates pass through, names must be points.
    pub fn lookup_point(&self, r: &Ref) -> GeoResult<Coord> {
        match r {
            Ref::Coord(c) => {
                if c.x.is_finite() && c.y.is_finite() {
                    Ok(*c)
                } else {
                    Err(GeoError::invalid("non-finite coordinate"))
                }
            }
            Ref::Name(n) => match self.require(n)? {
                Entity::Point(p) => Ok(p.coord),
                other => Err(GeoError::InvalidReference {
                    found: format!("\"{}\" ({})", n, other.kind()),
                    expected: "a point name or [x, y]",
                }),
            },
            other => Err(GeoError::InvalidReference {
                found: other.to_string(),
                expected: "a point name or [x, y]",
            }),
        }
    }

    /// Resolve a curve by name.
    pub fn curve(&self, name: &str) -> GeoResult<&Curve> {
        match self.require(name)? {
            Entity::Curve(c) => Ok(c),
            other => Err(GeoError::InvalidReference {
                found: format!("\"{}\" ({})", name, other.kind()),
                expected: "a line or curve name",
            }),
        }
    }

    /// Resolve a `Ref` that must name a curve.
    pub fn curve_ref(&self, r: &Ref) -> GeoResult<&Curve> {
        match r {
            Ref::Name(n) => self.curve(n),
            other => Err(GeoError::InvalidReference {
                found: other.to_string(),
                expected: "a line or curve name",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn seg(a: (f64, f64), b: (f64, f64)) -> Entity {
        Entity::Curve(
            Curve::open(vec![vector![a.0, a.1], vector![b.0, b.1]], Stroke::solid("#000"))
                .unwrap()
                .with_tooltip(tooltip("L1", &["Start: (0, 0)".to_string()])),
        )
    }

    #[test]
    fn generate_name_fills_smallest_gap() {
        let mut reg = Registry::new();
        assert_eq!(reg.generate_name("P"), "P1");
        reg.insert("P1", Entity::point(vector![0.0, 0.0], "red")).unwrap();
        reg.insert("P3", Entity::point(vector![1.0, 0.0], "red")).unwrap();
        assert_eq!(reg.generate_name("P"), "P2");
        assert_eq!(reg.unique_name("Q"), "Q");
        assert_eq!(reg.unique_name("P1"), "P12");
    }

    #[test]
    fn insert_collision_leaves_existing_entity() {
        let mut reg = Registry::new();
        reg.insert("A", Entity::point(vector![1.0, 2.0], "red")).unwrap();
        let err = reg.insert("A", seg((0.0, 0.0), (1.0, 1.0))).unwrap_err();
        assert_eq!(err.colliding_name(), Some("A"));
        assert_eq!(reg.get("A"), Some(&Entity::point(vector![1.0, 2.0], "red")));
        assert_eq!(reg.len(), 1);
        assert!(matches!(
            reg.insert("", Entity::point(vector![0.0, 0.0], "red")),
            Err(GeoError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn names_are_unique_across_kinds() {
        let mut reg = Registry::new();
        reg.insert("X", seg((0.0, 0.0), (1.0, 1.0))).unwrap();
        assert!(matches!(
            reg.insert("X", Entity::point(vector![0.0, 0.0], "red")),
            Err(GeoError::NameCollision { .. })
        ));
    }

    #[test]
    fn rename_moves_entity_and_retitles_tooltip() {
        let mut reg = Registry::new();
        reg.insert("L1", seg((0.0, 0.0), (1.0, 1.0))).unwrap();
        reg.insert("A", Entity::point(vector![1.0, 2.0], "red")).unwrap();
        reg.rename("L1", "g").unwrap();
        assert!(!reg.contains("L1"));
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["A", "g"]);
        match reg.get("g") {
            Some(Entity::Curve(c)) => {
                assert_eq!(c.tooltip.as_deref(), Some("<strong>g</strong><br>Start: (0, 0)"));
            }
            other => panic!("expected curve, got {:?}", other),
        }
        assert!(matches!(reg.rename("nope", "z"), Err(GeoError::NotFound { .. })));
        assert!(matches!(reg.rename("A", "g"), Err(GeoError::NameCollision { .. })));
        // index stays consistent after the move
        assert!(matches!(reg.get("A"), Some(Entity::Point(_))));
    }

    #[test]
    fn lookup_point_resolution_rules() {
        let mut reg = Registry::new();
        reg.insert("A", Entity::point(vector![1.0, 2.0], "red")).unwrap();
        reg.insert("L", seg((0.0, 0.0), (1.0, 1.0))).unwrap();
        assert_eq!(reg.lookup_point(&Ref::name("A")).unwrap(), vector![1.0, 2.0]);
        assert_eq!(reg.lookup_point(&Ref::xy(3.0, 4.0)).unwrap(), vector![3.0, 4.0]);
        assert!(matches!(
            reg.lookup_point(&Ref::name("L")),
            Err(GeoError::InvalidReference { .. })
        ));
        assert!(matches!(
            reg.lookup_point(&Ref::Number(3.0)),
            Err(GeoError::InvalidReference { .. })
        ));
        assert!(matches!(
            reg.lookup_point(&Ref::name("missing")),
            Err(GeoError::NotFound { .. })
        ));
        assert!(reg.curve("L").is_ok());
        assert!(matches!(reg.curve("A"), Err(GeoError::InvalidReference { .. })));
    }

    #[test]
    fn curve_constructors_enforce_invariants() {
        let cfg = crate::geom2::GeomCfg::default();
        assert!(matches!(
            Curve::open(vec![vector![0.0, 0.0]], Stroke::solid("#000")),
            Err(GeoError::TooFewVertices { needed: 2, got: 1 })
        ));
        let tri = Curve::closed(
            vec![vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 1.0]],
            Stroke::solid("#0A0"),
            cfg,
        )
        .unwrap();
        assert_eq!(tri.vertices().len(), 4);
        assert_eq!(tri.ring().len(), 3);
        assert!(matches!(
            Curve::open(vec![vector![0.0, f64::NAN], vector![1.0, 1.0]], Stroke::solid("#000")),
            Err(GeoError::InvalidParameter { .. })
        ));
    }
}
