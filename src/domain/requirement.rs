//! The requirement tree.
//!
//! A [`Requirement`] is either a single course or an AND/OR [`Group`] of
//! further requirements. Trees are immutable values: every transformation
//! returns a new tree, so a tree handed to a caller can be freely aliased.

use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};

use crate::domain::CourseId;

/// A node of a compiled requirement tree.
///
/// Serializes to the JSON shape downstream consumers rely on:
///
/// ```json
/// {"type": "course", "id": "MATH 101"}
/// {"op": "OR", "min": 1, "children": [...], "meta": {"kind": "CO_REQ"}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Wire", try_from = "Wire")]
pub enum Requirement {
    /// A leaf requiring the named course.
    Course(CourseId),
    /// A conjunction or disjunction of requirements.
    Group(Box<Group>),
}

/// How the children of a [`Group`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    /// Every child is required.
    And,
    /// At least `min` children are required.
    Or,
}

/// Provenance marker for a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    /// The subtree came from corequisite language.
    #[serde(rename = "CO_REQ")]
    CoReq,
}

/// A group of requirements combined by an [`Operator`].
///
/// Children are never empty. For OR groups with a minimum,
/// `1 <= min <= children.len()` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    operator: Operator,
    min: Option<usize>,
    children: NonEmpty<Requirement>,
    tag: Option<Tag>,
}

impl Group {
    /// A conjunction: every child is required.
    #[must_use]
    pub const fn all(children: NonEmpty<Requirement>) -> Self {
        Self {
            operator: Operator::And,
            min: None,
            children,
            tag: None,
        }
    }

    /// A disjunction requiring any one of the children.
    #[must_use]
    pub const fn any(children: NonEmpty<Requirement>) -> Self {
        Self {
            operator: Operator::Or,
            min: Some(1),
            children,
            tag: None,
        }
    }

    /// A disjunction requiring at least `min` of the children.
    ///
    /// `min` is clamped into `1..=children.len()`.
    #[must_use]
    pub fn at_least(min: usize, children: NonEmpty<Requirement>) -> Self {
        let min = clamp_min(min, children.len());
        Self {
            operator: Operator::Or,
            min: Some(min),
            children,
            tag: None,
        }
    }

    /// Returns this group with the given provenance tag.
    #[must_use]
    pub const fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Returns the group's operator.
    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the minimum number of children required, for OR groups.
    #[must_use]
    pub const fn min(&self) -> Option<usize> {
        self.min
    }

    /// Returns the group's children.
    #[must_use]
    pub const fn children(&self) -> &NonEmpty<Requirement> {
        &self.children
    }

    /// Returns the group's provenance tag, if any.
    #[must_use]
    pub const fn tag(&self) -> Option<Tag> {
        self.tag
    }

    /// Rebuilds the group around a new set of children, keeping the operator
    /// and tag and reclamping any OR minimum.
    #[must_use]
    pub fn with_children(&self, children: NonEmpty<Requirement>) -> Self {
        let min = match (self.operator, self.min) {
            (Operator::Or, Some(min)) => Some(clamp_min(min, children.len())),
            (_, min) => min,
        };
        Self {
            operator: self.operator,
            min,
            children,
            tag: self.tag,
        }
    }

    /// Consumes the group, returning its children.
    #[must_use]
    pub fn into_children(self) -> NonEmpty<Requirement> {
        self.children
    }
}

const fn clamp_min(min: usize, len: usize) -> usize {
    let min = if min < len { min } else { len };
    if min < 1 { 1 } else { min }
}

impl Requirement {
    /// Lists every course leaf in the tree, depth first, in order.
    #[must_use]
    pub fn courses(&self) -> Vec<&CourseId> {
        let mut out = Vec::new();
        self.collect_courses(&mut out);
        out
    }

    fn collect_courses<'a>(&'a self, out: &mut Vec<&'a CourseId>) {
        match self {
            Self::Course(id) => out.push(id),
            Self::Group(group) => group
                .children
                .iter()
                .for_each(|child| child.collect_courses(out)),
        }
    }

    /// Returns `true` if any leaf of the tree is `id`.
    #[must_use]
    pub fn mentions(&self, id: &CourseId) -> bool {
        match self {
            Self::Course(course) => course == id,
            Self::Group(group) => group.children.iter().any(|child| child.mentions(id)),
        }
    }
}

impl From<CourseId> for Requirement {
    fn from(id: CourseId) -> Self {
        Self::Course(id)
    }
}

impl From<Group> for Requirement {
    fn from(group: Group) -> Self {
        Self::Group(Box::new(group))
    }
}

/// Errors raised when decoding a requirement tree from its serialized form.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    /// A group with no children.
    #[error("group has no children")]
    EmptyGroup,

    /// An OR minimum outside `1..=children`.
    #[error("OR group minimum {min} is outside 1..={children}")]
    MinOutOfRange {
        /// The declared minimum.
        min: usize,
        /// The number of children.
        children: usize,
    },

    /// A leaf whose identifier does not parse.
    #[error(transparent)]
    Course(#[from] crate::domain::course_id::Error),
}

/// The serialized representation of a [`Requirement`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Wire {
    Course {
        #[serde(rename = "type")]
        kind: LeafKind,
        id: String,
    },
    Group {
        op: Operator,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        children: Vec<Wire>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        meta: Option<Meta>,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum LeafKind {
    Course,
}

#[derive(Debug, Serialize, Deserialize)]
struct Meta {
    kind: Tag,
}

impl From<Requirement> for Wire {
    fn from(requirement: Requirement) -> Self {
        match requirement {
            Requirement::Course(id) => Self::Course {
                kind: LeafKind::Course,
                id: id.to_string(),
            },
            Requirement::Group(group) => {
                let Group {
                    operator,
                    min,
                    children,
                    tag,
                } = *group;
                Self::Group {
                    op: operator,
                    min,
                    children: children.into_iter().map(Self::from).collect(),
                    meta: tag.map(|kind| Meta { kind }),
                }
            }
        }
    }
}

impl TryFrom<Wire> for Requirement {
    type Error = TreeError;

    fn try_from(wire: Wire) -> Result<Self, Self::Error> {
        match wire {
            Wire::Course { kind: _, id } => Ok(Self::Course(id.parse()?)),
            Wire::Group {
                op,
                min,
                children,
                meta,
            } => {
                let children = children
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                let children = NonEmpty::from_vec(children).ok_or(TreeError::EmptyGroup)?;
                let min = match (op, min) {
                    (Operator::Or, Some(min)) if min == 0 || min > children.len() => {
                        return Err(TreeError::MinOutOfRange {
                            min,
                            children: children.len(),
                        });
                    }
                    (Operator::Or, min) => min,
                    (Operator::And, _) => None,
                };
                Ok(Self::from(Group {
                    operator: op,
                    min,
                    children,
                    tag: meta.map(|meta| meta.kind),
                }))
            }
        }
    }
}
