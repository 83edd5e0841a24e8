use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use super::{Table, Value};
use crate::timeseries::series::TimestampSeries;
use crate::types::HorizonError;

/// Key of one group: the values of the key columns, in key order.
///
/// Floats compare by value with `-0.0 == 0.0`; keys never contain NaN because
/// rows with a null or NaN key are not grouped.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupKey(pub Vec<Value>);

impl Eq for GroupKey {}

impl Hash for GroupKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in &self.0 {
            std::mem::discriminant(v).hash(state);
            match v {
                Value::Null => {}
                Value::Bool(b) => b.hash(state),
                Value::Int64(i) => i.hash(state),
                Value::Float64(f) => {
                    let f = if *f == 0.0 { 0.0 } else { *f };
                    f.to_bits().hash(state);
                }
                Value::Utf8(s) => s.hash(state),
                Value::Timestamp(t) => t.hash(state),
            }
        }
    }
}

impl GroupKey {
    /// Values of the key columns.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    fn is_groupable(&self) -> bool {
        self.0
            .iter()
            .all(|v| !v.is_null() && !matches!(v, Value::Float64(f) if f.is_nan()))
    }
}

/// Rows sharing one key.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Key values.
    pub key: GroupKey,
    /// Row indices into the source table, ascending.
    pub rows: Vec<usize>,
}

/// A table partitioned by one or more key columns.
///
/// Groups are ordered by first appearance of their key. Rows whose key holds a
/// null are left out of every group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedTable {
    table: Table,
    keys: Vec<String>,
    groups: Vec<Group>,
}

impl GroupedTable {
    /// Partition `table` by `keys`.
    ///
    /// # Errors
    /// - `HorizonError::InvalidArg` when `keys` is empty or repeats a name.
    /// - `HorizonError::MissingColumn` when a key column does not exist.
    pub fn new<S: AsRef<str>>(table: Table, keys: &[S]) -> Result<Self, HorizonError> {
        if keys.is_empty() {
            return Err(HorizonError::InvalidArg(
                "at least one group key is required".into(),
            ));
        }
        let keys: Vec<String> = keys.iter().map(|k| k.as_ref().to_string()).collect();
        for (i, k) in keys.iter().enumerate() {
            if keys[..i].contains(k) {
                return Err(HorizonError::InvalidArg(format!("duplicate group key '{k}'")));
            }
        }
        let key_columns = keys
            .iter()
            .map(|k| table.try_column(k))
            .collect::<Result<Vec<_>, _>>()?;

        let mut index: HashMap<GroupKey, usize> = HashMap::new();
        let mut groups: Vec<Group> = Vec::new();
        for row in 0..table.height() {
            let key = GroupKey(key_columns.iter().map(|c| c.data().get(row)).collect());
            if !key.is_groupable() {
                continue;
            }
            if let Some(&g) = index.get(&key) {
                groups[g].rows.push(row);
            } else {
                index.insert(key.clone(), groups.len());
                groups.push(Group {
                    key,
                    rows: vec![row],
                });
            }
        }
        Ok(Self {
            table,
            keys,
            groups,
        })
    }

    /// Source table.
    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }

    /// Key column names.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Groups in first-appearance order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Number of groups.
    #[must_use]
    pub fn n_groups(&self) -> usize {
        self.groups.len()
    }

    /// Non-null timestamps of one group.
    ///
    /// # Errors
    /// Returns `MissingColumn`/`ColumnType` when `date_column` is not a
    /// timestamp column.
    pub fn group_series(
        &self,
        group: &Group,
        date_column: &str,
    ) -> Result<TimestampSeries, HorizonError> {
        self.table
            .try_column(date_column)?
            .timestamp_series(Some(&group.rows))
    }

    /// Render a key as `[id=H10, store=2]`.
    #[must_use]
    pub fn describe(&self, key: &GroupKey) -> String {
        let parts: Vec<String> = self
            .keys
            .iter()
            .zip(key.values())
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        format!("[{}]", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    #[test]
    fn groups_follow_first_appearance_and_drop_null_keys() {
        let t = Table::new(vec![
            Column::utf8("id", vec![Some("b"), Some("a"), None, Some("b")]),
            Column::int64("v", vec![Some(1), Some(2), Some(3), Some(4)]),
        ])
        .unwrap();
        let g = t.group_by(&["id"]).unwrap();
        assert_eq!(g.n_groups(), 2);
        assert_eq!(g.groups()[0].key, GroupKey(vec![Value::Utf8("b".into())]));
        assert_eq!(g.groups()[0].rows, [0, 3]);
        assert_eq!(g.groups()[1].rows, [1]);
        assert_eq!(g.describe(&g.groups()[1].key), "[id=a]");
    }

    #[test]
    fn float_keys_treat_signed_zero_as_equal() {
        let t = Table::new(vec![Column::float64(
            "k",
            vec![Some(0.0), Some(-0.0), Some(f64::NAN)],
        )])
        .unwrap();
        let g = t.group_by(&["k"]).unwrap();
        assert_eq!(g.n_groups(), 1);
        assert_eq!(g.groups()[0].rows, [0, 1]);
    }

    #[test]
    fn rejects_missing_and_repeated_keys() {
        let t = Table::new(vec![Column::int64("k", vec![Some(1)])]).unwrap();
        assert!(matches!(
            t.group_by(&["nope"]),
            Err(HorizonError::MissingColumn { .. })
        ));
        assert!(matches!(
            t.group_by(&["k", "k"]),
            Err(HorizonError::InvalidArg(_))
        ));
        assert!(matches!(
            t.group_by::<&str>(&[]),
            Err(HorizonError::InvalidArg(_))
        ));
    }
}
