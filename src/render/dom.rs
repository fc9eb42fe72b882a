//! Render target over the live SVG DOM of a generated report (wasm only).

use glam::DVec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, SvgAnimationElement, SvgElement};

use super::{ElementId, RenderTarget, Rotation};
use crate::error::IrisError;
use crate::util::color::Color;

/// Writes panel state into the document's SVG attributes.
pub struct DomTarget {
    document: Document,
}

impl DomTarget {
    /// Bind to the current window's document.
    pub fn from_window() -> Result<Self, IrisError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| {
                IrisError::MissingGeometry("no browser document".into())
            })?;
        Ok(Self { document })
    }

    fn element(&self, id: ElementId) -> Option<Element> {
        let key = id.to_string();
        let element = self.document.get_element_by_id(&key);
        if element.is_none() {
            log::debug!("element '{key}' not in document");
        }
        element
    }

    fn set_attr(&self, id: ElementId, name: &str, value: &str) {
        if let Some(element) = self.element(id) {
            if let Err(e) = element.set_attribute(name, value) {
                log::warn!("failed to set {name} on '{id}': {e:?}");
            }
        }
    }
}

/// Parse an SVG `points` attribute (`"x,y x,y ..."` or `"x y x y ..."`).
fn parse_points(raw: &str) -> Option<Vec<DVec2>> {
    let coords = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::parse::<f64>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    if coords.len() % 2 != 0 {
        return None;
    }
    Some(
        coords
            .chunks_exact(2)
            .map(|xy| DVec2::new(xy[0], xy[1]))
            .collect(),
    )
}

/// Inline `display` value; empty drops the override so the stylesheet
/// applies again.
fn display_value(displayed: bool) -> &'static str {
    if displayed {
        ""
    } else {
        "none"
    }
}

fn format_points(points: &[DVec2]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

impl RenderTarget for DomTarget {
    fn set_opacity(&mut self, id: ElementId, opacity: f64) {
        self.set_attr(id, "opacity", &opacity.to_string());
    }

    fn set_paint_opacity(&mut self, id: ElementId, opacity: f64) {
        let value = opacity.to_string();
        self.set_attr(id, "stroke-opacity", &value);
        self.set_attr(id, "fill-opacity", &value);
    }

    fn set_fill(&mut self, id: ElementId, color: Color) {
        self.set_attr(id, "fill", &color.to_string());
    }

    fn set_transform(&mut self, id: ElementId, rotation: Rotation) {
        self.set_attr(id, "transform", &rotation.to_string());
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(element) = self.element(id) {
            element.set_text_content(Some(text));
        }
    }

    fn set_line_endpoints(&mut self, id: ElementId, y1: f64, y2: f64) {
        self.set_attr(id, "y1", &y1.to_string());
        self.set_attr(id, "y2", &y2.to_string());
    }

    fn set_y(&mut self, id: ElementId, y: f64) {
        self.set_attr(id, "y", &y.to_string());
    }

    fn set_polygon_points(&mut self, id: ElementId, points: &[DVec2]) {
        self.set_attr(id, "points", &format_points(points));
    }

    fn set_displayed(&mut self, id: ElementId, displayed: bool) {
        let Some(element) = self.element(id) else {
            return;
        };
        let Some(svg) = element.dyn_ref::<SvgElement>() else {
            log::warn!("'{id}' is not an SVG element");
            return;
        };
        if let Err(e) = svg
            .style()
            .set_property("display", display_value(displayed))
        {
            log::warn!("failed to set display on '{id}': {e:?}");
        }
    }

    fn trigger_reveal_animation(&mut self, id: ElementId) {
        let Some(element) = self.element(id) else {
            return;
        };
        match element.dyn_into::<SvgAnimationElement>() {
            Ok(animation) => {
                if let Err(e) = animation.begin_element() {
                    log::warn!("failed to start animation '{id}': {e:?}");
                }
            }
            Err(_) => log::warn!("'{id}' is not an animation element"),
        }
    }

    fn polygon_points(&self, id: ElementId) -> Option<Vec<DVec2>> {
        parse_points(&self.element(id)?.get_attribute("points")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_point_separators() {
        let a = parse_points("35,240 400,240 400,940").unwrap();
        let b = parse_points("35 240 400 240 400 940").unwrap();
        assert_eq!(a, b);
        assert_eq!(a[2], DVec2::new(400.0, 940.0));
        assert!(parse_points("1,2 3").is_none());
    }

    #[test]
    fn display_toggles_only_the_display_property() {
        assert_eq!(display_value(true), "");
        assert_eq!(display_value(false), "none");
    }

    #[test]
    fn formats_points_as_pairs() {
        let points = [DVec2::new(1.5, 2.0), DVec2::new(3.0, 4.25)];
        assert_eq!(format_points(&points), "1.5,2 3,4.25");
    }
}
