use std::{cmp::Reverse, collections::HashMap};

use serde::Serialize;

use crate::domain::{Tag, Target, TargetId};

/// One row of the ranking: a target and its running total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// The ranked target.
    pub target: TargetId,
    /// The target's display name.
    pub name: String,
    /// Sum of the target's tag values in the current period.
    pub total: i64,
}

/// Aggregates the current-period ranking.
///
/// `tags_by_target` holds, per target, the non-deleted tags
/// attributable to it since the last snapshot; targets missing from
/// the map rank with a total of zero. Rows are sorted by total
/// descending; exact ties are broken by registration instant (the
/// earliest-registered target ranks higher) and finally by target id,
/// so identical inputs always produce byte-identical orderings.
#[must_use]
pub fn aggregate_ranking(
    targets: &[Target],
    tags_by_target: &HashMap<TargetId, Vec<Tag>>,
) -> Vec<Standing> {
    let mut rows: Vec<(Standing, chrono::DateTime<chrono::Utc>)> = targets
        .iter()
        .map(|target| {
            let total = tags_by_target
                .get(&target.id())
                .map_or(0, |tags| tags.iter().map(Tag::value).sum());
            (
                Standing {
                    target: target.id(),
                    name: target.name().to_string(),
                    total,
                },
                target.registered(),
            )
        })
        .collect();

    rows.sort_by_key(|(standing, registered)| {
        (Reverse(standing.total), *registered, standing.target)
    });

    rows.into_iter().map(|(standing, _)| standing).collect()
}
