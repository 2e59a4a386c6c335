use crate::error::{GeoError, GeoResult};
use crate::geom2::{centroid, intersect_lines, midpoint, Coord};
use crate::registry::{Entity, Ref, TextEntity};
use crate::session::Session;

impl Session {
    /// Free point at a literal coordinate (auto-named `P<k>`).
    pub fn point(&mut self, at: &Ref, name: Option<&str>) -> GeoResult<String> {
        let coord = match at {
            Ref::Coord(_) => self.registry.lookup_point(at)?,
            other => {
                return Err(GeoError::InvalidReference {
                    found: other.to_string(),
                    expected: "[x, y]",
                })
            }
        };
        let name = self.claim_name(name, "P")?;
        self.commit(name, Entity::point(coord, "red"))
    }

    /// Midpoint or centroid (auto-named `M<k>`).
    ///
    /// - one polygon name: area centroid of the polygon,
    /// - two point refs: their mean,
    /// - three or more: centroid of the ring they span.
    pub fn midpoint(&mut self, refs: &[Ref], name: Option<&str>) -> GeoResult<String> {
        let geom = self.cfg.geom;
        let center = match refs {
            [] => return Err(GeoError::TooFewVertices { needed: 1, got: 0 }),
            [poly] => {
                let curve = self.registry.curve_ref(poly)?;
                if !curve.is_closed() {
                    return Err(GeoError::InvalidReference {
                        found: poly.to_string(),
                        expected: "a polygon name",
                    });
                }
                centroid(curve.ring(), geom)
                    .ok_or(GeoError::TooFewVertices { needed: 1, got: 0 })?
            }
            [a, b] => {
                let a = self.registry.lookup_point(a)?;
                let b = self.registry.lookup_point(b)?;
                midpoint(a, b)
            }
            many => {
                let pts = self.resolve_points(many)?;
                centroid(&pts, geom).ok_or(GeoError::TooFewVertices { needed: 3, got: 0 })?
            }
        };
        let name = self.claim_name(name, "M")?;
        self.commit(name, Entity::point(center, "red"))
    }

    /// Intersection of two lines given by name (auto-named `SP<k>`).
    ///
    /// Each curve is taken as the infinite line through its first two vertices.
    pub fn intersection(&mut self, first: &Ref, second: &Ref, name: Option<&str>) -> GeoResult<String> {
        let (a, b) = self.registry.curve_ref(first)?.endpoints();
        let (c, d) = self.registry.curve_ref(second)?.endpoints();
        let p = intersect_lines(a, b, c, d, self.cfg.geom)?;
        let name = self.claim_name(name, "SP")?;
        self.commit(name, Entity::point(p, "green"))
    }

    /// Free text label anchored at a point (auto-named `Text<k>`).
    pub fn text(&mut self, at: &Ref, content: &str, name: Option<&str>) -> GeoResult<String> {
        let coord = self.registry.lookup_point(at)?;
        let name = self.claim_name(name, "Text")?;
        let mut label = TextEntity::label(coord, content.to_string());
        label.font_size = self.cfg.label_font_size;
        label.background = Some("rgba(255,255,255,0.8)".to_string());
        self.commit(name, Entity::Text(label))
    }

    pub(crate) fn resolve_points(&self, refs: &[Ref]) -> GeoResult<Vec<Coord>> {
        refs.iter().map(|r| self.registry.lookup_point(r)).collect()
    }
}
