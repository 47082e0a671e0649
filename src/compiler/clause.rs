//! Compilation of a single clause into a partial requirement tree.
//!
//! Catalog prose overwhelmingly follows the shape "X and one of Y, Z". The
//! phrase "one of" is treated as a pivot: courses before it are required
//! outright, courses after it form a choice. Without a pivot, a clause that
//! says "or" but never "and" is a choice; anything else is a conjunction.

use nonempty::NonEmpty;

use crate::{
    compiler::cues,
    domain::{CourseId, Group, Requirement, Tag},
};

/// Compiles one requirement clause.
///
/// Returns `None` if the clause names no course. Exclusion clauses must be
/// filtered out before calling this.
///
/// Each "one of" occurrence opens a new choice group covering the courses up
/// to the next occurrence. Courses mentioned before the first pivot are
/// required outright unless they reappear in a choice. Corequisite language
/// tags the resulting group with [`Tag::CoReq`]; a lone course is returned
/// bare.
#[must_use]
pub fn compile(clause: &str) -> Option<Requirement> {
    let courses = CourseId::find_all(clause);
    if courses.is_empty() {
        return None;
    }

    let is_coreq = cues::mentions_corequisite(clause);
    let (leading, choices) = partition(clause, courses);

    let mut children: Vec<Requirement> = leading.into_iter().map(Requirement::Course).collect();
    children.extend(
        choices
            .into_iter()
            .filter_map(NonEmpty::from_vec)
            .map(|members| Requirement::from(Group::any(members.map(Requirement::Course)))),
    );

    let children = NonEmpty::from_vec(children)?;
    let node = if children.tail.is_empty() {
        tag_choice(children.head, is_coreq)
    } else {
        let group = Group::all(children);
        Requirement::from(if is_coreq {
            group.with_tag(Tag::CoReq)
        } else {
            group
        })
    };

    tracing::debug!(clause, ?node, "compiled clause");
    Some(node)
}

/// Tags a lone group as corequisite. A bare course carries no tag.
fn tag_choice(node: Requirement, is_coreq: bool) -> Requirement {
    match node {
        Requirement::Group(group) if is_coreq => Requirement::from(group.with_tag(Tag::CoReq)),
        Requirement::Group(_) | Requirement::Course(_) => node,
    }
}

/// Splits the clause's courses into outright requirements and choice groups.
fn partition(clause: &str, courses: Vec<CourseId>) -> (Vec<CourseId>, Vec<Vec<CourseId>>) {
    let pivots: Vec<usize> = cues::ONE_OF.find_iter(clause).map(|m| m.start()).collect();

    let Some(&first) = pivots.first() else {
        return if cues::has_or(clause) && !cues::has_and(clause) {
            (Vec::new(), vec![courses])
        } else {
            (courses, Vec::new())
        };
    };

    let choices: Vec<Vec<CourseId>> = pivots
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = pivots.get(i + 1).copied().unwrap_or(clause.len());
            CourseId::find_all(&clause[start..end])
        })
        .filter(|members| !members.is_empty())
        .collect();

    let leading = CourseId::find_all(&clause[..first])
        .into_iter()
        .filter(|course| !choices.iter().any(|members| members.contains(course)))
        .collect();

    (leading, choices)
}
