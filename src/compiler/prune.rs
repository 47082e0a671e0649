//! Removal of a course's references to itself.
//!
//! Catalog text sometimes names the course being described, for instance in
//! a cross-listing note. A course cannot require itself, so such leaves are
//! removed. Groups left empty disappear, and OR minimums are clamped to the
//! children that survive.

use nonempty::NonEmpty;

use crate::domain::{CourseId, Requirement};

/// Removes every leaf equal to `self_id` from the tree.
///
/// Returns `None` if nothing survives. The input is left untouched; a new
/// tree is built for the result.
#[must_use]
pub fn prune(node: Option<&Requirement>, self_id: &CourseId) -> Option<Requirement> {
    node.and_then(|node| strip(node, self_id))
}

fn strip(node: &Requirement, self_id: &CourseId) -> Option<Requirement> {
    match node {
        Requirement::Course(id) if id == self_id => None,
        Requirement::Course(_) => Some(node.clone()),
        Requirement::Group(group) => {
            let survivors: Vec<Requirement> = group
                .children()
                .iter()
                .filter_map(|child| strip(child, self_id))
                .collect();
            NonEmpty::from_vec(survivors)
                .map(|children| Requirement::from(group.with_children(children)))
        }
    }
}
