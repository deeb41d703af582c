use crate::common::outcome::CommandOutcome;
use crate::domain::store::{AccountStore, PinOutcome};

pub fn handle(
    store: &mut AccountStore,
    account_number: u32,
    current_pin: &str,
    new_pin: &str,
) -> CommandOutcome {
    match store.find_by_number(account_number) {
        None => return CommandOutcome::NotFound,
        Some(account) if account.pin != current_pin => return CommandOutcome::PinMismatch,
        Some(_) => {}
    }

    match store.update_pin(
        |a| a.account_number == account_number && a.pin == current_pin,
        new_pin,
    ) {
        PinOutcome::Updated => CommandOutcome::PinChanged,
        PinOutcome::NotFound => CommandOutcome::NotFound,
    }
}
