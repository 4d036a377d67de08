//! Commit object
//!
//! Commits are immutable nodes of the history graph. Each one records:
//! - Up to two parent commit IDs (the second only for merge commits)
//! - A timestamp with second precision
//! - The commit message
//! - The full manifest of tracked files (path to blob ID), not a delta
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! merge <merged-in-sha>
//! date <rfc3339 timestamp>
//! blob <blob-sha> <path>
//! ...
//!
//! <commit message>
//! ```
//!
//! ## Identity
//!
//! The ID hashes parent, merge parent, readable timestamp, message and every
//! manifest entry, so two commits with equal metadata but different trees
//! never share an ID.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, SecondsFormat, SubsecRound};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Complete set of files tracked by a commit: path to blob ID, ordered by path
pub type Manifest = BTreeMap<String, ObjectId>;

/// Environment variable overriding the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "GITLET_DATE";

/// Accepted format of [`COMMIT_DATE_ENV`]
pub const COMMIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Message of the root commit created by `init`
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

const READABLE_TIMESTAMP_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// Timestamp for a commit being created now
///
/// Reads `GITLET_DATE` when set; otherwise uses the local clock truncated to seconds.
pub fn load_timestamp_from_env() -> DateTime<FixedOffset> {
    let from_env = std::env::var(COMMIT_DATE_ENV).ok().and_then(|date_str| {
        match DateTime::parse_from_str(&date_str, COMMIT_DATE_FORMAT) {
            Ok(timestamp) => Some(timestamp),
            Err(err) => {
                tracing::warn!(value = %date_str, %err, "ignoring invalid {COMMIT_DATE_ENV}");
                None
            }
        }
    });

    from_env.unwrap_or_else(|| chrono::Local::now().fixed_offset().trunc_subsecs(0))
}

/// Slim representation of a commit
///
/// Only what the split-point search needs: the ID and the parent IDs
/// (first parent first).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// First parent, `None` only for the root commit
    parent: Option<ObjectId>,
    /// Tip of the branch merged in, set only on merge commits
    merge_parent: Option<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    message: String,
    manifest: Manifest,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        merge_parent: Option<ObjectId>,
        timestamp: DateTime<FixedOffset>,
        message: String,
        manifest: Manifest,
    ) -> Self {
        Commit {
            parent,
            merge_parent,
            timestamp: timestamp.trunc_subsecs(0),
            message,
            manifest,
        }
    }

    /// The parentless commit every repository starts from
    pub fn initial(timestamp: DateTime<FixedOffset>) -> Self {
        Self::new(
            None,
            None,
            timestamp,
            INITIAL_COMMIT_MESSAGE.to_string(),
            Manifest::new(),
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    pub fn parents(&self) -> Vec<ObjectId> {
        self.parent
            .iter()
            .chain(self.merge_parent.iter())
            .cloned()
            .collect()
    }

    pub fn is_merge(&self) -> bool {
        self.merge_parent.is_some()
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Blob ID tracked for `path`, if any
    pub fn blob_id(&self, path: &str) -> Option<&ObjectId> {
        self.manifest.get(path)
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format(READABLE_TIMESTAMP_FORMAT)
            .to_string()
    }

    pub fn to_slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents(),
        }
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        if let Some(parent) = &self.parent {
            object_content.push(format!("parent {parent}"));
        }
        if let Some(merge_parent) = &self.merge_parent {
            object_content.push(format!("merge {merge_parent}"));
        }
        object_content.push(format!(
            "date {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)
        ));
        for (path, blob_id) in &self.manifest {
            object_content.push(format!("blob {blob_id} {path}"));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        frame(self.object_type(), object_content.join("\n").as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (headers, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parent = None;
        let mut merge_parent = None;
        let mut timestamp = None;
        let mut manifest = Manifest::new();

        for line in headers.lines() {
            let (key, value) = line
                .split_once(' ')
                .context(format!("Invalid commit object: malformed line {line:?}"))?;

            match key {
                "parent" => parent = Some(ObjectId::try_parse(value.to_string())?),
                "merge" => merge_parent = Some(ObjectId::try_parse(value.to_string())?),
                "date" => {
                    timestamp = Some(
                        DateTime::parse_from_rfc3339(value)
                            .context("Invalid commit object: invalid date line")?,
                    )
                }
                "blob" => {
                    let (blob_id, path) = value
                        .split_once(' ')
                        .context("Invalid commit object: invalid blob line")?;
                    manifest.insert(path.to_string(), ObjectId::try_parse(blob_id.to_string())?);
                }
                _ => anyhow::bail!("Invalid commit object: unknown header {key:?}"),
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing date line")?;

        Ok(Self::new(
            parent,
            merge_parent,
            timestamp,
            message.to_string(),
            manifest,
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn identity(&self) -> Bytes {
        let mut identity = String::new();

        for parent in [&self.parent, &self.merge_parent].into_iter().flatten() {
            identity.push_str(parent.as_ref());
        }
        identity.push_str(&self.readable_timestamp());
        identity.push_str(&self.message);
        for (path, blob_id) in &self.manifest {
            identity.push_str(path);
            identity.push('\0');
            identity.push_str(blob_id.as_ref());
            identity.push('\n');
        }

        Bytes::from(identity)
    }
}
