use crate::error::{GeoError, GeoResult};
use crate::geom2::Affine2;
use crate::registry::{retitle_tooltip, Ref};
use crate::session::Session;

fn check_finite(what: &str, v: f64) -> GeoResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(GeoError::invalid(format!("{} must be finite, got {}", what, v)))
    }
}

impl Session {
    /// Shift an element by `(dx, dy)`.
    ///
    /// Without `copy_as` the element is moved in place and its own name is
    /// returned; with it, a moved copy is inserted under that name.
    pub fn translate(&mut self, element: &str, dx: f64, dy: f64, copy_as: Option<&str>) -> GeoResult<String> {
        check_finite("dx", dx)?;
        check_finite("dy", dy)?;
        self.transform(element, &Affine2::translation(dx, dy), copy_as)
    }

    /// Rotate an element counterclockwise by `degrees` about `pivot`.
    pub fn rotate(&mut self, element: &str, pivot: &Ref, degrees: f64, copy_as: Option<&str>) -> GeoResult<String> {
        let pivot = self.registry.lookup_point(pivot)?;
        check_finite("angle", degrees)?;
        self.transform(element, &Affine2::rotation_about(pivot, degrees), copy_as)
    }

    /// Reflect an element through the point `mirror`.
    pub fn reflect(&mut self, element: &str, mirror: &Ref, copy_as: Option<&str>) -> GeoResult<String> {
        let mirror = self.registry.lookup_point(mirror)?;
        self.transform(element, &Affine2::point_reflection(mirror), copy_as)
    }

    fn transform(&mut self, element: &str, f: &Affine2, copy_as: Option<&str>) -> GeoResult<String> {
        let mut moved = self.registry.require(element)?.clone();
        moved.map_coords(f);
        if !moved.is_finite() {
            return Err(GeoError::invalid(format!(
                "transforming \"{}\" leaves the finite range",
                element
            )));
        }
        match copy_as {
            None => {
                *self.registry.require_mut(element)? = moved;
                tracing::debug!(name = element, "transform in place");
                Ok(element.to_string())
            }
            Some(target) => {
                self.registry.check_free(target)?;
                if let Some(Some(tip)) = moved.tooltip_mut() {
                    retitle_tooltip(tip, element, target);
                }
                self.commit(target.to_string(), moved)
            }
        }
    }
}
