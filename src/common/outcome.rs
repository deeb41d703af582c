use crate::common::money::Money;
use crate::domain::account::Account;

/// The explicit result of running one command against the store.
///
/// Recoverable conditions (not found, insufficient funds, PIN mismatch,
/// blocked deletion) are outcomes rather than errors: the operation does not
/// mutate state and the session continues. Only backing-store I/O failures
/// surface as `AppError`.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Created { account_number: u32 },
    Balance { balance: Money },
    Deposited { balance: Money },
    Withdrawn { balance: Money },
    InsufficientFunds { balance: Money },
    PinChanged,
    PinMismatch,
    Details(Account),
    Deleted,
    DeleteBlocked { balance: Money },
    NotFound,
}

impl CommandOutcome {
    /// True when the store changed and the caller must persist it.
    pub fn mutated(&self) -> bool {
        matches!(
            self,
            CommandOutcome::Created { .. }
                | CommandOutcome::Deposited { .. }
                | CommandOutcome::Withdrawn { .. }
                | CommandOutcome::PinChanged
                | CommandOutcome::Deleted
        )
    }
}
