use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::MatchOptions;
use crate::engine::match_clusters;
use crate::error::ReconError;
use crate::model::{Partition, Side};

/// A JSON item identifier: a string or an integer. Anything else is
/// rejected as an invalid partition value rather than skipped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    Int(i64),
    Text(String),
}

/// Reconcile two JSON-shaped partitions `{clusterKey: [itemId, ...], ...}`.
///
/// Returns `{"matched": [[before, after], ...], "added": [...],
/// "removed": [...]}`. Cluster keys are JSON object keys (strings); items
/// may be strings or integers.
pub fn match_partitions_json(
    before: &Value,
    after: &Value,
    options: &MatchOptions,
) -> Result<Value, ReconError> {
    let before = parse_partition(Side::Before, before)?;
    let after = parse_partition(Side::After, after)?;

    let result = match_clusters(&before, &after, options)?;

    Ok(json!({
        "matched": result.matched,
        "added": result.added,
        "removed": result.removed,
    }))
}

/// Parse one side of the request, validating the partition shape.
fn parse_partition(side: Side, value: &Value) -> Result<Partition<String, ItemValue>, ReconError> {
    let object = value.as_object().ok_or_else(|| ReconError::InvalidPartitionValue {
        side,
        key: "<root>".into(),
        reason: "expected an object mapping cluster keys to item arrays".into(),
    })?;

    let mut partition: Partition<String, ItemValue> = BTreeMap::new();

    for (key, cluster) in object {
        let array = cluster.as_array().ok_or_else(|| ReconError::InvalidPartitionValue {
            side,
            key: key.clone(),
            reason: format!("cluster value {cluster} is not an array of item ids"),
        })?;

        let mut items = Vec::with_capacity(array.len());
        for element in array {
            items.push(parse_item(side, key, element)?);
        }
        partition.insert(key.clone(), items);
    }

    Ok(partition)
}

fn parse_item(side: Side, key: &str, element: &Value) -> Result<ItemValue, ReconError> {
    match element {
        Value::String(text) => Ok(ItemValue::Text(text.clone())),
        Value::Number(number) => {
            number
                .as_i64()
                .map(ItemValue::Int)
                .ok_or_else(|| ReconError::InvalidPartitionValue {
                    side,
                    key: key.into(),
                    reason: format!("item {number} is not an integer"),
                })
        }
        other => Err(ReconError::InvalidPartitionValue {
            side,
            key: key.into(),
            reason: format!("item {other} is not a string or integer"),
        }),
    }
}
