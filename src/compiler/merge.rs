//! Folding per-clause trees into one tree per course.

use nonempty::NonEmpty;

use crate::domain::{Group, Operator, Requirement, Tag};

/// Conjoins two optional trees.
///
/// `None` is the identity. When both are present the result is one AND
/// group: the children of an AND operand are spliced in, any other operand
/// becomes a single child. A corequisite tag on a spliced AND is carried onto
/// its child groups; a bare course leaf carries no tag.
#[must_use]
pub fn merge(a: Option<Requirement>, b: Option<Requirement>) -> Option<Requirement> {
    match (a, b) {
        (None, b) => b,
        (a, None) => a,
        (Some(a), Some(b)) => {
            let mut children = conjuncts(a);
            children.tail.extend(conjuncts(b));
            Some(Requirement::from(Group::all(children)))
        }
    }
}

/// Merges a sequence of trees left to right.
#[must_use]
pub fn merge_all<I>(nodes: I) -> Option<Requirement>
where
    I: IntoIterator<Item = Option<Requirement>>,
{
    nodes.into_iter().fold(None, merge)
}

fn conjuncts(node: Requirement) -> NonEmpty<Requirement> {
    match node {
        Requirement::Group(group) if group.operator() == Operator::And => {
            let tag = group.tag();
            group.into_children().map(|child| carry_tag(child, tag))
        }
        Requirement::Group(_) | Requirement::Course(_) => NonEmpty::new(node),
    }
}

fn carry_tag(node: Requirement, tag: Option<Tag>) -> Requirement {
    match (tag, node) {
        (Some(tag), Requirement::Group(group)) if group.tag().is_none() => {
            Requirement::from(group.with_tag(tag))
        }
        (_, node) => node,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str) -> Requirement {
        Requirement::Course(id.parse().unwrap())
    }

    fn and(children: Vec<Requirement>) -> Requirement {
        Requirement::from(Group::all(NonEmpty::from_vec(children).unwrap()))
    }

    fn or(children: Vec<Requirement>) -> Requirement {
        Requirement::from(Group::any(NonEmpty::from_vec(children).unwrap()))
    }

    fn leaves(node: &Requirement) -> Vec<String> {
        let mut ids: Vec<String> = node.courses().iter().map(ToString::to_string).collect();
        ids.sort();
        ids
    }

    #[test]
    fn none_is_identity() {
        assert_eq!(merge(None, None), None);
        assert_eq!(merge(None, Some(course("MATH 100"))), Some(course("MATH 100")));
        assert_eq!(merge(Some(course("MATH 100")), None), Some(course("MATH 100")));
    }

    #[test]
    fn two_leaves_are_wrapped() {
        let merged = merge(Some(course("MATH 100")), Some(course("MATH 101")));
        assert_eq!(merged, Some(and(vec![course("MATH 100"), course("MATH 101")])));
    }

    #[test]
    fn conjunctions_are_concatenated() {
        let a = and(vec![course("MATH 100"), course("MATH 101")]);
        let b = and(vec![course("PHYS 101"), course("PHYS 102")]);
        let merged = merge(Some(a), Some(b));
        assert_eq!(
            merged,
            Some(and(vec![
                course("MATH 100"),
                course("MATH 101"),
                course("PHYS 101"),
                course("PHYS 102"),
            ]))
        );
    }

    #[test]
    fn appends_to_left_conjunction() {
        let a = and(vec![course("MATH 100"), course("MATH 101")]);
        let b = or(vec![course("PHYS 101"), course("PHYS 102")]);
        let merged = merge(Some(a), Some(b.clone()));
        assert_eq!(
            merged,
            Some(and(vec![course("MATH 100"), course("MATH 101"), b]))
        );
    }

    #[test]
    fn prepends_to_right_conjunction() {
        let a = or(vec![course("PHYS 101"), course("PHYS 102")]);
        let b = and(vec![course("MATH 100"), course("MATH 101")]);
        let merged = merge(Some(a.clone()), Some(b));
        assert_eq!(
            merged,
            Some(and(vec![a, course("MATH 100"), course("MATH 101")]))
        );
    }

    #[test]
    fn tagged_conjunction_is_spliced() {
        let coreq = Requirement::from(
            Group::all(NonEmpty::from_vec(vec![course("MATH 255"), course("MATH 256")]).unwrap())
                .with_tag(Tag::CoReq),
        );
        let merged = merge(Some(course("MATH 101")), Some(coreq.clone()));
        assert_eq!(
            merged,
            Some(and(vec![course("MATH 101"), course("MATH 255"), course("MATH 256")]))
        );

        let merged = merge(Some(coreq), Some(course("MATH 101")));
        assert_eq!(
            merged,
            Some(and(vec![course("MATH 255"), course("MATH 256"), course("MATH 101")]))
        );
    }

    #[test]
    fn spliced_groups_inherit_corequisite_tag() {
        let choice = or(vec![course("MATH 255"), course("MATH 256")]);
        let coreq = Requirement::from(
            Group::all(NonEmpty::from_vec(vec![course("PHYS 158"), choice]).unwrap())
                .with_tag(Tag::CoReq),
        );
        let merged = merge(Some(course("PHYS 157")), Some(coreq)).unwrap();
        let Requirement::Group(group) = &merged else {
            panic!("expected a group");
        };
        assert_eq!(group.operator(), Operator::And);
        assert_eq!(group.tag(), None);
        assert_eq!(group.children().len(), 3);
        assert_eq!(group.children().tail[0], course("PHYS 158"));
        let Requirement::Group(inner) = &group.children().tail[1] else {
            panic!("expected the choice group");
        };
        assert_eq!(inner.operator(), Operator::Or);
        assert_eq!(inner.tag(), Some(Tag::CoReq));
    }

    #[test]
    fn merge_is_associative_over_leaves() {
        let a = and(vec![course("MATH 100"), course("MATH 101")]);
        let b = or(vec![course("PHYS 101"), course("PHYS 102")]);
        let c = course("CHEM 121");

        let left = merge(merge(Some(a.clone()), Some(b.clone())), Some(c.clone())).unwrap();
        let right = merge(Some(a), merge(Some(b), Some(c))).unwrap();
        assert_eq!(leaves(&left), leaves(&right));
    }

    #[test]
    fn merge_all_skips_nothing() {
        let merged = merge_all([None, Some(course("MATH 100")), None, Some(course("MATH 101"))]);
        assert_eq!(merged, Some(and(vec![course("MATH 100"), course("MATH 101")])));
        assert_eq!(merge_all(Vec::new()), None);
    }
}
