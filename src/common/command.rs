use crate::common::money::Money;
use crate::domain::account::NewAccount;

/// Represents one parsed menu action that is sent from the shell to the
/// processor for execution against the store.
///
/// Mutating commands carry the session's account number and PIN because the
/// store predicates match on both together.
#[derive(Debug)]
pub enum SessionCommand {
    Create(NewAccount),
    CheckBalance {
        account_number: u32,
    },
    Deposit {
        account_number: u32,
        pin: String,
        amount: Money,
    },
    Withdraw {
        account_number: u32,
        pin: String,
        amount: Money,
    },
    ChangePin {
        account_number: u32,
        current_pin: String,
        new_pin: String,
    },
    ViewDetails {
        account_number: u32,
    },
    Delete {
        account_number: u32,
        pin: String,
    },
}
