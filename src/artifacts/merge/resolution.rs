//! Three-way classification of one path
//!
//! Each path is looked up in the split point, the current head and the given
//! branch tip. Comparing the three blob IDs (or their absence) decides what
//! the merge does with it:
//!
//! | current vs given | current vs split | given vs split | outcome       |
//! |------------------|------------------|----------------|---------------|
//! | equal            | any              | any            | `Unchanged`   |
//! | differ           | equal            | differ         | `TakeGiven` / `Delete` when given is absent |
//! | differ           | differ           | equal          | `KeepCurrent` |
//! | differ           | differ           | differ         | `Conflict`    |
//!
//! The rows are disjoint and cover every combination.

use crate::artifacts::objects::object_id::ObjectId;

/// What a merge does with a single path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Both sides agree (including both absent): nothing to do
    Unchanged,
    /// Only the given branch changed the file: check it out and stage it
    TakeGiven(ObjectId),
    /// Only the current branch changed the file: leave it alone
    KeepCurrent,
    /// The given branch deleted a file the current branch left untouched
    Delete,
    /// Both sides changed the file differently
    Conflict,
}

pub fn classify(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    given: Option<&ObjectId>,
) -> Resolution {
    if current == given {
        return Resolution::Unchanged;
    }

    if current == split {
        return match given {
            Some(given) => Resolution::TakeGiven(given.clone()),
            None => Resolution::Delete,
        };
    }

    if given == split {
        return Resolution::KeepCurrent;
    }

    Resolution::Conflict
}
