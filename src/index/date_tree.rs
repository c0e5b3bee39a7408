use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

use crate::types::identifiers::ArticleId;

/// Publication-date hierarchy: year → month → day → ids.
///
/// Every level is an ordered map, so descending chronological traversal is a
/// direct reverse iteration instead of a key sort per query. Empty buckets
/// are pruned on removal at every level.
#[derive(Debug, Clone, Default)]
pub struct DateTree {
    years: BTreeMap<i32, BTreeMap<u32, BTreeMap<u32, BTreeSet<ArticleId>>>>,
}

impl DateTree {
    pub fn insert(&mut self, date: NaiveDate, id: ArticleId) {
        self.years
            .entry(date.year())
            .or_default()
            .entry(date.month())
            .or_default()
            .entry(date.day())
            .or_default()
            .insert(id);
    }

    pub fn remove(&mut self, date: NaiveDate, id: &ArticleId) {
        let Some(months) = self.years.get_mut(&date.year()) else {
            return;
        };
        let Some(days) = months.get_mut(&date.month()) else {
            return;
        };
        let Some(ids) = days.get_mut(&date.day()) else {
            return;
        };
        ids.remove(id);
        if ids.is_empty() {
            days.remove(&date.day());
        }
        if days.is_empty() {
            months.remove(&date.month());
        }
        if months.is_empty() {
            self.years.remove(&date.year());
        }
    }

    /// Day buckets in descending chronological order.
    pub fn buckets_desc(&self) -> impl Iterator<Item = &BTreeSet<ArticleId>> {
        self.years.values().rev().flat_map(|months| {
            months
                .values()
                .rev()
                .flat_map(|days| days.values().rev())
        })
    }
}
