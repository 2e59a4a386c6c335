use nalgebra::Vector2;

use crate::construct::check_vertex_count;
use crate::error::{GeoError, GeoResult};
use crate::geom2::{cross, distance, fmt2, midpoint, sample_arc};
use crate::registry::{tooltip, Curve, Entity, Ref, Stroke, TextEntity};
use crate::session::Session;

/// Result of `Session::angle`.
#[derive(Clone, Debug, PartialEq)]
pub struct AngleMeasure {
    /// Unsigned angle in `[0, 180]`.
    pub degrees: f64,
    /// `degrees` rounded to two decimals, e.g. `"90.00"`.
    pub display: String,
}

impl Session {
    /// Euclidean distance between two point refs.
    ///
    /// Also registers a thin dashed helper line and a text label at the
    /// midpoint. For two names these are `Ruler_<a>_<b>` and
    /// `Distance_<a>_<b>` (made unique with a numeric suffix); otherwise the
    /// generated `Ruler<k>` and `Distance<k>`.
    pub fn distance(&mut self, a: &Ref, b: &Ref) -> GeoResult<f64> {
        let pa = self.registry.lookup_point(a)?;
        let pb = self.registry.lookup_point(b)?;
        let d = distance(pa, pb);

        let (ruler, label) = match (a.label(), b.label()) {
            (Some(na), Some(nb)) => (
                self.registry.unique_name(&format!("Ruler_{}_{}", na, nb)),
                self.registry.unique_name(&format!("Distance_{}_{}", na, nb)),
            ),
            _ => (
                self.registry.generate_name("Ruler"),
                self.registry.generate_name("Distance"),
            ),
        };
        let helper = Curve::open(vec![pa, pb], Stroke::dashed("#000").with_width(1.0))?;
        let mut text = TextEntity::label(midpoint(pa, pb), fmt2(d));
        text.font_size = self.cfg.label_font_size;

        self.commit(ruler, Entity::Curve(helper))?;
        self.commit(label, Entity::Text(text))?;
        Ok(d)
    }

    /// Angle ABC at vertex `b`, at most 180°.
    ///
    /// Inserts `<name>_arc` (an arc of radius `arc_radius` around B sweeping
    /// from BA towards BC) and `<name>_label` at 1.5× that radius on the
    /// bisector. Without a name, `Angle<k>` is the first base for which both
    /// derived names are free.
    pub fn angle(&mut self, a: &Ref, b: &Ref, c: &Ref, name: Option<&str>) -> GeoResult<AngleMeasure> {
        let pa = self.registry.lookup_point(a)?;
        let pb = self.registry.lookup_point(b)?;
        let pc = self.registry.lookup_point(c)?;
        let u = pa - pb;
        let v = pc - pb;
        let eps = self.cfg.geom.eps_dedup;
        if u.norm() < eps || v.norm() < eps {
            return Err(GeoError::DegenerateLine {
                reason: "angle leg has zero length",
            });
        }

        // Signed sweep from BA to BC in (-π, π].
        let sweep = cross(u, v).atan2(u.dot(&v));
        let degrees = sweep.abs().to_degrees();
        let display = fmt2(degrees);

        let base = match name {
            Some(n) => {
                self.registry.check_free(&format!("{}_arc", n))?;
                self.registry.check_free(&format!("{}_label", n))?;
                n.to_string()
            }
            None => self.free_angle_base(),
        };

        let r = self.cfg.arc_radius;
        let start = u.y.atan2(u.x);
        check_vertex_count("arc segments", self.cfg.arc_segments)?;
        let arc = sample_arc(pb, r, start, sweep, self.cfg.arc_segments);
        let mid = start + sweep / 2.0;
        let label_at = pb + Vector2::new(1.5 * r * mid.cos(), 1.5 * r * mid.sin());

        let arc_name = format!("{}_arc", base);
        let arc = Curve::open(arc, Stroke::solid("#FFA500"))?
            .with_tooltip(tooltip(&arc_name, &[format!("Angle: {}°", display)]));
        let mut label = TextEntity::label(label_at, format!("{}°", display));
        label.font_size = self.cfg.label_font_size;

        self.commit(arc_name, Entity::Curve(arc))?;
        self.commit(format!("{}_label", base), Entity::Text(label))?;
        Ok(AngleMeasure { degrees, display })
    }

    fn free_angle_base(&self) -> String {
        let mut k = 1usize;
        loop {
            let base = format!("Angle{}", k);
            if !self.registry.contains(&format!("{}_arc", base))
                && !self.registry.contains(&format!("{}_label", base))
            {
                return base;
            }
            k += 1;
        }
    }
}
