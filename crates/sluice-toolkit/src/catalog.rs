//! Object catalog: counts, identifiers and bounds-checked resolution.

use sluice_core::{ObjectKind, ToolkitError};
use sluice_engine::{Link, Node, Project, Subcatchment};

use crate::guard::require_open;

/// A bounds-checked reference to one object.
///
/// Only [`resolve`] creates these, so holding one means the index was
/// within `[0, count(kind))` when it was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectRef {
    kind: ObjectKind,
    index: usize,
}

impl ObjectRef {
    /// Kind of the referenced object.
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Zero-based index within its kind.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Number of objects of the kind with code `kind`.
///
/// Valid in every phase; a closed project has no objects.
pub fn count_objects(project: &Project, kind: i32) -> Result<usize, ToolkitError> {
    let kind = ObjectKind::from_code(kind)?;
    Ok(project.count(kind))
}

/// Stable identifier of object `index` of kind `kind`.
///
/// Kinds without a published identifier table fail with
/// [`ToolkitError::UnknownKind`] before the index is considered.
pub fn object_id(project: &Project, kind: i32, index: i32) -> Result<&str, ToolkitError> {
    require_open(project)?;
    let code = kind;
    let kind = ObjectKind::from_code(code)?;
    if !kind.has_identifier() {
        return Err(ToolkitError::UnknownKind { code });
    }
    let r = resolve(project, kind, index)?;
    project
        .registry()
        .id(kind, r.index)
        .ok_or_else(|| out_of_range(project, kind, index))
}

/// Bounds-check `index` against the count of `kind`.
pub fn resolve(project: &Project, kind: ObjectKind, index: i32) -> Result<ObjectRef, ToolkitError> {
    let count = project.count(kind);
    match usize::try_from(index) {
        Ok(i) if i < count => Ok(ObjectRef { kind, index: i }),
        _ => {
            tracing::trace!(%kind, index, count, "rejected: index out of range");
            Err(ToolkitError::IndexOutOfRange { kind, index, count })
        }
    }
}

pub(crate) fn out_of_range(project: &Project, kind: ObjectKind, index: i32) -> ToolkitError {
    ToolkitError::IndexOutOfRange {
        kind,
        index,
        count: project.count(kind),
    }
}

fn lookup<'p, T>(
    project: &Project,
    kind: ObjectKind,
    items: &'p [T],
    index: i32,
) -> Result<&'p T, ToolkitError> {
    let r = resolve(project, kind, index)?;
    items
        .get(r.index)
        .ok_or_else(|| out_of_range(project, kind, index))
}

pub(crate) fn node(project: &Project, index: i32) -> Result<&Node, ToolkitError> {
    lookup(project, ObjectKind::Node, project.nodes(), index)
}

pub(crate) fn link(project: &Project, index: i32) -> Result<&Link, ToolkitError> {
    lookup(project, ObjectKind::Link, project.links(), index)
}

pub(crate) fn subcatchment(project: &Project, index: i32) -> Result<&Subcatchment, ToolkitError> {
    lookup(project, ObjectKind::Subcatchment, project.subcatchments(), index)
}
