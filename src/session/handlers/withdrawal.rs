use crate::common::money::Money;
use crate::common::outcome::CommandOutcome;
use crate::domain::store::{AccountStore, BalanceOutcome};

pub fn handle(
    store: &mut AccountStore,
    account_number: u32,
    pin: &str,
    amount: Money,
) -> CommandOutcome {
    // The deduction is applied exactly once per successful withdrawal; PIN
    // re-confirmation for large amounts happens in the shell before the
    // command is issued.
    let outcome = store.update_balance(
        |a| a.account_number == account_number && a.pin == pin,
        -amount,
    );

    match outcome {
        BalanceOutcome::Updated { balance } => CommandOutcome::Withdrawn { balance },
        BalanceOutcome::InsufficientFunds { balance } => {
            CommandOutcome::InsufficientFunds { balance }
        }
        BalanceOutcome::NotFound => CommandOutcome::NotFound,
    }
}
