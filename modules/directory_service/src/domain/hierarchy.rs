//! Bounded-depth activity taxonomy
//!
//! Activities form a forest where every node stores only its parent id.
//! Depth is counted from the root (root = 1) and may never exceed
//! [`MAX_ACTIVITY_DEPTH`]. The same bound limits descendant traversal, so a
//! query can never observe a node deeper than an insert would have allowed.

use super::repository::ActivityRepository;
use crate::contract::{ActivityId, DirectoryError};
use std::collections::HashSet;

/// Maximum depth of the activity tree, root included
pub const MAX_ACTIVITY_DEPTH: usize = 3;

/// Error type for hierarchy operations
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error("Parent activity not found: {0}")]
    ParentNotFound(ActivityId),

    #[error("Activity not found: {0}")]
    ActivityNotFound(ActivityId),

    #[error("Max nesting exceeded: depth {depth} is over the limit of {MAX_ACTIVITY_DEPTH}")]
    MaxDepthExceeded { depth: usize },

    #[error("Activity store unavailable: {0}")]
    Store(#[from] anyhow::Error),
}

impl From<HierarchyError> for DirectoryError {
    fn from(err: HierarchyError) -> Self {
        match err {
            HierarchyError::ParentNotFound(id) => DirectoryError::not_found("parent activity", id),
            HierarchyError::ActivityNotFound(id) => DirectoryError::not_found("activity", id),
            HierarchyError::MaxDepthExceeded { .. } => DirectoryError::validation(err.to_string()),
            HierarchyError::Store(e) => {
                tracing::error!(error = ?e, "activity hierarchy lookup failed");
                DirectoryError::Internal
            }
        }
    }
}

/// Depth a new activity would get under `parent_id`
///
/// Walks the parent chain upwards. Fails as soon as the depth passes the
/// limit, which also bounds the walk if the stored chain were ever cyclic.
pub async fn depth_for_new(
    repo: &dyn ActivityRepository,
    parent_id: Option<ActivityId>,
) -> Result<usize, HierarchyError> {
    let mut depth = 1;
    let mut next = parent_id;

    while let Some(id) = next {
        let parent = repo
            .find_by_id(id)
            .await?
            .ok_or(HierarchyError::ParentNotFound(id))?;

        depth += 1;
        if depth > MAX_ACTIVITY_DEPTH {
            return Err(HierarchyError::MaxDepthExceeded { depth });
        }
        next = parent.parent_id;
    }

    Ok(depth)
}

/// The root id plus every descendant within [`MAX_ACTIVITY_DEPTH`] generations
pub async fn collect_descendants(
    repo: &dyn ActivityRepository,
    root_id: ActivityId,
) -> Result<HashSet<ActivityId>, HierarchyError> {
    let root = repo
        .find_by_id(root_id)
        .await?
        .ok_or(HierarchyError::ActivityNotFound(root_id))?;

    let mut collected = HashSet::from([root.id]);
    let mut frontier = vec![root.id];

    for _ in 0..MAX_ACTIVITY_DEPTH {
        if frontier.is_empty() {
            break;
        }
        frontier = repo
            .find_children(&frontier)
            .await?
            .into_iter()
            .map(|child| child.id)
            .filter(|id| collected.insert(*id))
            .collect();
    }

    Ok(collected)
}
