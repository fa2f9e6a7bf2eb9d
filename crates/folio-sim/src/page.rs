//! Demo page layout
//!
//! The portfolio's sections stacked top to bottom, each with the reveal
//! transition it uses on the site.

use folio_reveal::{
    FacilityError, GeometryObserver, NodeHandle, ObserverOptions, Rect, RevealTransition,
};

pub(crate) const PAGE_WIDTH: f32 = 1280.0;

/// `(id, height in pixels)`, top to bottom
pub(crate) const SECTIONS: [(&str, f32); 5] = [
    ("hero", 800.0),
    ("about", 900.0),
    ("skills", 1100.0),
    ("projects", 1200.0),
    ("contact", 700.0),
];

/// Node handle for section `index`
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn section_node(index: usize) -> NodeHandle {
    NodeHandle::new(index as u64 + 1)
}

pub(crate) fn transition_for(id: &str) -> RevealTransition {
    match id {
        "skills" => RevealTransition::scale_in(),
        "projects" => RevealTransition::slide_left(),
        "contact" => RevealTransition::slide_right(),
        _ => RevealTransition::fade_up(),
    }
}

/// Connect a geometry observer with every section laid out
pub(crate) fn connect(
    options: &ObserverOptions,
    viewport_height: f32,
) -> Result<GeometryObserver, FacilityError> {
    let mut observer = GeometryObserver::connect(options)?;

    let mut top = 0.0;
    for (i, (_, height)) in SECTIONS.iter().enumerate() {
        observer.set_bounds(section_node(i), Rect::new(0.0, top, PAGE_WIDTH, *height));
        top += height;
    }
    observer.set_viewport(Rect::new(0.0, 0.0, PAGE_WIDTH, viewport_height));

    Ok(observer)
}
