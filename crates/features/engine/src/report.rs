use crate::error::SyncError;
use std::borrow::Cow;

/// What happened to one entry of a bulk verb.
#[derive(Debug)]
pub enum ItemOutcome {
    Synced,
    Skipped { reason: Cow<'static, str> },
    Failed(SyncError),
}

#[derive(Debug)]
pub struct ItemReport {
    pub name: String,
    pub outcome: ItemOutcome,
}

/// Ordered per-item outcomes of `dump` or `restore`.
///
/// The verb itself only fails for errors that stop it before the first item; everything after
/// that is recorded here.
#[derive(Debug, Default)]
pub struct BulkReport {
    items: Vec<ItemReport>,
}

impl BulkReport {
    pub(crate) fn synced(&mut self, name: impl Into<String>) {
        self.items.push(ItemReport { name: name.into(), outcome: ItemOutcome::Synced });
    }

    pub(crate) fn skipped(&mut self, name: impl Into<String>, reason: impl Into<Cow<'static, str>>) {
        self.items.push(ItemReport {
            name: name.into(),
            outcome: ItemOutcome::Skipped { reason: reason.into() },
        });
    }

    pub(crate) fn failed(&mut self, name: impl Into<String>, error: SyncError) {
        self.items.push(ItemReport { name: name.into(), outcome: ItemOutcome::Failed(error) });
    }

    #[must_use]
    pub fn items(&self) -> &[ItemReport] {
        &self.items
    }

    #[must_use]
    pub fn synced_count(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Synced))
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Skipped { .. }))
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Failed(_)))
    }

    /// `true` when no item failed. Skips do not count as failures.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed_count() == 0
    }

    /// Names of the items that were synced, in processing order.
    pub fn synced_names(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, ItemOutcome::Synced))
            .map(|i| i.name.as_str())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &SyncError)> {
        self.items.iter().filter_map(|i| match &i.outcome {
            ItemOutcome::Failed(err) => Some((i.name.as_str(), err)),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&ItemOutcome) -> bool) -> usize {
        self.items.iter().filter(|i| pred(&i.outcome)).count()
    }
}

impl IntoIterator for BulkReport {
    type Item = ItemReport;
    type IntoIter = std::vec::IntoIter<ItemReport>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
