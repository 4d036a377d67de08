//! Split-point discovery for merges
//!
//! The split point is the common ancestor used as the base of the three-way
//! comparison. It is found in two breadth-first walks over the commit graph,
//! each following the first parent and, for merge commits, the second:
//!
//! 1. Mark every commit reachable from the given branch tip (tip included)
//! 2. Walk from the current head and stop at the first marked commit
//!
//! This is a nearest-common-ancestor heuristic. On near-linear histories it
//! yields the lowest common ancestor; with several merges between the two
//! lines it can return an older common ancestor, because breadth-first order
//! favours whichever route from the head is shortest in edges.
//!
//! Both walks run over an explicit frontier queue and record a visit state
//! per commit, so the input references are never mutated.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, VecDeque};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const FROM_GIVEN = 0b01;
        const FROM_CURRENT = 0b10;
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::FROM_GIVEN) {
            flags.push("GIVEN");
        }
        if self.contains(VisitState::FROM_CURRENT) {
            flags.push("CURRENT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// Finds the split point between the current head and a given branch tip
///
/// # Type Parameters
///
/// * `CommitLoaderFn` - loads the parents of a commit; root commits have none
pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// # Returns
    ///
    /// `None` only when the two commits share no history at all
    pub fn find_split_point(
        &self,
        current: &ObjectId,
        given: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut states = HashMap::<ObjectId, VisitState>::new();

        self.walk(given, VisitState::FROM_GIVEN, &mut states, |_| false)?;
        tracing::debug!(ancestors = states.len(), tip = %given, "marked ancestors of given branch");

        let split_point = self.walk(current, VisitState::FROM_CURRENT, &mut states, |state| {
            state.contains(VisitState::FROM_GIVEN)
        })?;
        tracing::debug!(
            current = %current,
            given = %given,
            split_point = ?split_point.as_ref().map(ObjectId::to_short_oid),
            "split point search finished"
        );

        Ok(split_point)
    }

    /// Breadth-first walk from `start`, tagging visited commits with `flag`
    ///
    /// Returns the first commit whose prior state satisfies `stop`.
    fn walk(
        &self,
        start: &ObjectId,
        flag: VisitState,
        states: &mut HashMap<ObjectId, VisitState>,
        stop: impl Fn(VisitState) -> bool,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut frontier = VecDeque::from([start.clone()]);

        while let Some(oid) = frontier.pop_front() {
            let state = states.entry(oid.clone()).or_insert(VisitState::empty());
            if state.contains(flag) {
                continue;
            }

            let found = stop(*state);
            state.insert(flag);
            tracing::trace!(oid = %oid.to_short_oid(), state = ?*state, "visited commit");

            if found {
                return Ok(Some(oid));
            }

            let commit = (self.commit_loader)(&oid)?;
            frontier.extend(commit.parents);
        }

        Ok(None)
    }
}
