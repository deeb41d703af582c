use crate::common::outcome::CommandOutcome;
use crate::domain::store::{AccountStore, DeleteOutcome};

pub fn handle(store: &mut AccountStore, account_number: u32, pin: &str) -> CommandOutcome {
    match store.find_by_number(account_number) {
        None => return CommandOutcome::NotFound,
        Some(account) if account.pin != pin => return CommandOutcome::PinMismatch,
        Some(_) => {}
    }

    match store.delete(|a| a.account_number == account_number && a.pin == pin) {
        DeleteOutcome::Deleted => CommandOutcome::Deleted,
        DeleteOutcome::BalanceRemaining { balance } => CommandOutcome::DeleteBlocked { balance },
        DeleteOutcome::NotFound => CommandOutcome::NotFound,
    }
}
