//! Geometric parenting: components are placed inside the first container
//! whose bounds enclose their top-left anchor.

use egui::{Pos2, Vec2, pos2, vec2};
use std::collections::HashSet;

use crate::layout::{CanvasSpec, ComponentSpec, LayoutDocument};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Parent {
    Root,
    Container(String),
}

/// The coordinate space a component is placed in.
#[derive(Clone, Debug, PartialEq)]
pub struct ParentFrame {
    pub parent: Parent,
    pub origin: Pos2,
    pub size: Vec2,
}

impl ParentFrame {
    pub fn root(canvas: &CanvasSpec) -> Self {
        Self {
            parent: Parent::Root,
            origin: Pos2::ZERO,
            size: vec2(canvas.width, canvas.height),
        }
    }

    fn container(spec: &ComponentSpec) -> Self {
        Self {
            parent: Parent::Container(spec.id.clone()),
            origin: pos2(spec.x, spec.y),
            size: vec2(spec.width, spec.height),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Resolved<'a> {
    pub spec: &'a ComponentSpec,
    pub frame: ParentFrame,
}

/// Half-open containment test: `[cx, cx+cw) x [cy, cy+ch)`.
pub fn contains_anchor(container: &ComponentSpec, x: f32, y: f32) -> bool {
    container.x <= x
        && x < container.x + container.width
        && container.y <= y
        && y < container.y + container.height
}

/// Orders the document for construction and assigns each component its parent.
///
/// Containers come first, always parented to the root. Every other component
/// follows in document order, parented to the earliest declared container
/// holding its anchor. Components without an id, and supported components
/// whose id was already seen, are dropped.
pub fn resolve(doc: &LayoutDocument) -> Vec<Resolved<'_>> {
    let mut seen = HashSet::new();
    let unique: Vec<&ComponentSpec> = doc
        .components
        .iter()
        .filter(|c| {
            if c.id.is_empty() {
                log::warn!("Component of type '{}' has no id; skipped", c.type_name);
                return false;
            }
            // unsupported entries are rejected by the factory and must not claim their id
            if c.kind().is_none() {
                return true;
            }
            let first = seen.insert(c.id.as_str());
            if !first {
                log::warn!("Duplicate component id '{}' ignored", c.id);
            }
            first
        })
        .collect();

    let (containers, others): (Vec<&ComponentSpec>, Vec<&ComponentSpec>) =
        unique.into_iter().partition(|c| c.is_container());

    let mut resolved = Vec::with_capacity(containers.len() + others.len());
    for (i, container) in containers.iter().enumerate() {
        if let Some(outer) = containers[..i]
            .iter()
            .find(|outer| contains_anchor(outer, container.x, container.y))
        {
            log::warn!(
                "Container '{}' lies inside '{}'; nested containers are unsupported, placing it on the root",
                container.id,
                outer.id
            );
        }
        resolved.push(Resolved {
            spec: container,
            frame: ParentFrame::root(&doc.canvas),
        });
    }

    for spec in others {
        let frame = containers
            .iter()
            .find(|c| contains_anchor(c, spec.x, spec.y))
            .map(|c| ParentFrame::container(c))
            .unwrap_or_else(|| ParentFrame::root(&doc.canvas));
        resolved.push(Resolved { spec, frame });
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Properties;

    fn spec(id: &str, kind: &str, x: f32, y: f32, w: f32, h: f32) -> ComponentSpec {
        ComponentSpec {
            id: id.into(),
            type_name: kind.into(),
            x,
            y,
            width: w,
            height: h,
            properties: Properties::default(),
        }
    }

    fn doc(components: Vec<ComponentSpec>) -> LayoutDocument {
        LayoutDocument {
            canvas: CanvasSpec::default(),
            components,
        }
    }

    fn parent_of<'a>(resolved: &'a [Resolved<'_>], id: &str) -> &'a ParentFrame {
        &resolved
            .iter()
            .find(|r| r.spec.id == id)
            .expect("component resolved")
            .frame
    }

    #[test]
    fn test_single_container_match() {
        let d = doc(vec![
            spec("card", "CardView", 100.0, 100.0, 200.0, 100.0),
            spec("btn", "Button", 150.0, 120.0, 50.0, 20.0),
        ]);
        let r = resolve(&d);
        let frame = parent_of(&r, "btn");
        assert_eq!(frame.parent, Parent::Container("card".into()));
        assert_eq!(frame.origin, pos2(100.0, 100.0));
        assert_eq!(frame.size, vec2(200.0, 100.0));
    }

    #[test]
    fn test_no_match_parents_to_root() {
        let d = doc(vec![
            spec("card", "CardView", 100.0, 100.0, 200.0, 100.0),
            spec("btn", "Button", 10.0, 10.0, 50.0, 20.0),
        ]);
        let r = resolve(&d);
        let frame = parent_of(&r, "btn");
        assert_eq!(frame.parent, Parent::Root);
        assert_eq!(frame.origin, Pos2::ZERO);
        assert_eq!(frame.size, vec2(800.0, 600.0));
    }

    #[test]
    fn test_multiple_matches_pick_earliest_declared() {
        let d = doc(vec![
            spec("a", "Panel", 0.0, 0.0, 100.0, 100.0),
            spec("b", "Panel", 50.0, 50.0, 100.0, 100.0),
            spec("lbl", "Label", 60.0, 60.0, 10.0, 10.0),
        ]);
        let r = resolve(&d);
        assert_eq!(parent_of(&r, "lbl").parent, Parent::Container("a".into()));

        let d = doc(vec![
            spec("b", "Panel", 50.0, 50.0, 100.0, 100.0),
            spec("a", "Panel", 0.0, 0.0, 100.0, 100.0),
            spec("lbl", "Label", 60.0, 60.0, 10.0, 10.0),
        ]);
        let r = resolve(&d);
        assert_eq!(parent_of(&r, "lbl").parent, Parent::Container("b".into()));
    }

    #[test]
    fn test_bounds_are_half_open() {
        let card = spec("card", "CardView", 0.0, 0.0, 100.0, 100.0);
        assert!(contains_anchor(&card, 0.0, 0.0));
        assert!(contains_anchor(&card, 99.0, 99.0));
        assert!(!contains_anchor(&card, 100.0, 50.0));
        assert!(!contains_anchor(&card, 50.0, 100.0));
    }

    #[test]
    fn test_containers_are_resolved_first() {
        let d = doc(vec![
            spec("btn", "Button", 10.0, 10.0, 50.0, 20.0),
            spec("card", "CardView", 0.0, 0.0, 100.0, 100.0),
        ]);
        let r = resolve(&d);
        let order: Vec<_> = r.iter().map(|r| r.spec.id.as_str()).collect();
        assert_eq!(order, vec!["card", "btn"]);
        assert_eq!(parent_of(&r, "btn").parent, Parent::Container("card".into()));
    }

    #[test]
    fn test_nested_container_stays_on_root() {
        let d = doc(vec![
            spec("outer", "Panel", 0.0, 0.0, 300.0, 300.0),
            spec("inner", "CardView", 10.0, 10.0, 100.0, 100.0),
            spec("chk", "Checkbox", 20.0, 20.0, 50.0, 20.0),
        ]);
        let r = resolve(&d);
        assert_eq!(parent_of(&r, "inner").parent, Parent::Root);
        // document order decides, not the tightest fit
        assert_eq!(parent_of(&r, "chk").parent, Parent::Container("outer".into()));
    }

    #[test]
    fn test_radio_group_is_not_a_container() {
        let d = doc(vec![
            spec("radios", "RadioGroup", 0.0, 0.0, 200.0, 200.0),
            spec("lbl", "Label", 10.0, 10.0, 50.0, 20.0),
        ]);
        let r = resolve(&d);
        assert_eq!(parent_of(&r, "lbl").parent, Parent::Root);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let d = doc(vec![
            spec("x", "Button", 0.0, 0.0, 10.0, 10.0),
            spec("x", "Label", 5.0, 5.0, 10.0, 10.0),
        ]);
        let r = resolve(&d);
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].spec.type_name, "Button");
    }

    #[test]
    fn test_unsupported_component_does_not_claim_its_id() {
        let d = doc(vec![
            spec("x", "Carousel", 0.0, 0.0, 10.0, 10.0),
            spec("x", "Button", 5.0, 5.0, 10.0, 10.0),
            spec("x", "Label", 5.0, 5.0, 10.0, 10.0),
        ]);
        let r = resolve(&d);
        let kinds: Vec<_> = r.iter().map(|r| r.spec.type_name.as_str()).collect();
        assert_eq!(kinds, vec!["Carousel", "Button"]);
    }

    #[test]
    fn test_components_without_id_are_dropped() {
        let d = doc(vec![
            spec("", "Button", 0.0, 0.0, 10.0, 10.0),
            spec("ok", "Button", 5.0, 5.0, 10.0, 10.0),
        ]);
        let r = resolve(&d);
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].spec.id, "ok");
    }
}
