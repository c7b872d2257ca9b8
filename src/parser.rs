//! Snapshot JSON decoding.
//!
//! The wire format mirrors the server's waterfall payload: versions as a map
//! of parallel per-commit lists, rows with builds keyed by version id.
//! Structural JSON errors fail the load; shape problems inside a valid
//! document (unequal lists, bad timestamps, unknown statuses) are logged and
//! normalized.

use crate::model::{Build, BuildVariant, Commit, Row, Snapshot, Task, Version, VersionKind};
use chrono::{DateTime, NaiveDateTime, Utc};
use color_eyre::eyre::{Result, WrapErr};
use std::collections::HashMap;

#[derive(Debug, Default, serde::Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    project: String,
    #[serde(default)]
    current_skip: i64,
    #[serde(default)]
    previous_page_count: i64,
    #[serde(default)]
    total_versions: i64,
    #[serde(default)]
    versions: HashMap<String, RawVersion>,
    #[serde(default)]
    rows: Vec<RawRow>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct RawVersion {
    #[serde(default)]
    ids: Vec<String>,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(default)]
    messages: Vec<String>,
    #[serde(default)]
    revisions: Vec<String>,
    #[serde(default)]
    create_times: Vec<String>,
    #[serde(default)]
    revision_order: i64,
    #[serde(default)]
    rolled_up: bool,
}

#[derive(Debug, serde::Deserialize)]
struct RawRow {
    #[serde(default)]
    build_variant: BuildVariant,
    #[serde(default)]
    builds: HashMap<String, RawBuild>,
}

/// `taskStatusCount` may be present on the wire; counts are recomputed
/// from `tasks` instead.
#[derive(Debug, serde::Deserialize)]
struct RawBuild {
    #[serde(default)]
    id: String,
    #[serde(default)]
    tasks: Vec<Task>,
}

pub fn parse_snapshot(json: &str) -> Result<Snapshot> {
    let raw: RawSnapshot =
        serde_json::from_str(json).wrap_err("snapshot is not valid waterfall JSON")?;
    Ok(normalize(raw))
}

fn normalize(raw: RawSnapshot) -> Snapshot {
    let mut versions: Vec<Version> = raw
        .versions
        .into_iter()
        .map(|(id, v)| normalize_version(id, v))
        .collect();
    // Map iteration order is arbitrary; break revision_order ties by id.
    versions.sort_by(|a, b| {
        b.revision_order
            .cmp(&a.revision_order)
            .then_with(|| a.id.cmp(&b.id))
    });

    let rows = raw.rows.into_iter().map(normalize_row).collect();

    Snapshot {
        project: raw.project,
        current_skip: raw.current_skip,
        previous_page_count: raw.previous_page_count,
        total_versions: raw.total_versions,
        versions,
        rows,
    }
}

fn normalize_version(id: String, raw: RawVersion) -> Version {
    let lens = [
        raw.ids.len(),
        raw.authors.len(),
        raw.messages.len(),
        raw.revisions.len(),
        raw.create_times.len(),
    ];
    let authors = raw.authors.len();
    let n = lens.iter().copied().max().unwrap_or(0);
    if lens.iter().any(|&l| l != n) {
        tracing::warn!(version = %id, ?lens, "version has unequal commit lists");
    }

    let commits: Vec<Commit> = (0..n)
        .map(|i| Commit {
            id: raw.ids.get(i).cloned().unwrap_or_else(|| id.clone()),
            author: raw.authors.get(i).cloned().unwrap_or_default(),
            message: raw.messages.get(i).cloned().unwrap_or_default(),
            revision: raw.revisions.get(i).cloned().unwrap_or_default(),
            created_at: raw.create_times.get(i).and_then(|t| {
                let parsed = parse_time(t);
                if parsed.is_none() {
                    tracing::warn!(version = %id, time = %t, "unparsable create time");
                }
                parsed
            }),
        })
        .collect();

    let kind = if raw.rolled_up {
        VersionKind::RolledUp(commits)
    } else {
        let commit = commits.into_iter().next().unwrap_or_else(|| Commit {
            id: id.clone(),
            ..Commit::default()
        });
        VersionKind::Active(commit)
    };

    Version {
        id,
        revision_order: raw.revision_order,
        kind,
        authors,
    }
}

fn normalize_row(raw: RawRow) -> Row {
    let variant = raw.build_variant;
    let builds = raw
        .builds
        .into_iter()
        .map(|(version_id, b)| {
            let build = Build::new(b.id, b.tasks);
            if build.status_count.unknown > 0 {
                tracing::warn!(
                    variant = %variant.id,
                    version = %version_id,
                    unknown = build.status_count.unknown,
                    "build has tasks with unknown status"
                );
            }
            (version_id, build)
        })
        .collect();
    Row { variant, builds }
}

/// RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS[.fff]` taken as UTC.
fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|t| t.and_utc())
}
