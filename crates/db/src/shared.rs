use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::DbClient;

static GLOBAL: ClientSlot = ClientSlot::new();

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotError {
    #[error("a database client has already been installed")]
    AlreadyInstalled,
}

/// Holds at most one client for the lifetime of the slot.
///
/// Prefer passing [`DbClient`] clones to call sites; the slot is for code
/// that has no way to receive one.
#[derive(Debug, Default)]
pub struct ClientSlot {
    cell: OnceCell<DbClient>,
}

impl ClientSlot {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Store the client. A second install is rejected and the first client stays.
    pub fn install(&self, client: DbClient) -> Result<(), SlotError> {
        self.cell
            .set(client)
            .map_err(|_| SlotError::AlreadyInstalled)
    }

    pub fn get(&self) -> Option<&DbClient> {
        self.cell.get()
    }
}

/// Process-wide slot.
pub fn global() -> &'static ClientSlot {
    &GLOBAL
}
