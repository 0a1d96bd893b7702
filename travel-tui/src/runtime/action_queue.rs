use crate::app::Page;
use crate::types::{ReportDataset, ReportFormat};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Action {
    /// Fetch what `page` shows. `force` bypasses and rewrites the session cache.
    LoadPage { page: Page, force: bool },
    SubmitForm,
    ConfirmDelete,
    DownloadReport {
        format: ReportFormat,
        dataset: ReportDataset,
    },
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
