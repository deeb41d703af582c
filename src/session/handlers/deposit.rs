use crate::common::money::Money;
use crate::common::outcome::CommandOutcome;
use crate::domain::store::{AccountStore, BalanceOutcome};

pub fn handle(
    store: &mut AccountStore,
    account_number: u32,
    pin: &str,
    amount: Money,
) -> CommandOutcome {
    let outcome = store.update_balance(
        |a| a.account_number == account_number && a.pin == pin,
        amount,
    );

    match outcome {
        BalanceOutcome::Updated { balance } => CommandOutcome::Deposited { balance },
        // Reachable for a negative typed amount; amounts are not validated
        // beyond conversion, so the balance guard does the rejecting.
        BalanceOutcome::InsufficientFunds { balance } => {
            CommandOutcome::InsufficientFunds { balance }
        }
        BalanceOutcome::NotFound => CommandOutcome::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::NewAccount;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn seeded_store() -> AccountStore {
        let mut store = AccountStore::new();
        store.create(
            NewAccount {
                name: "bob".to_string(),
                country: "Norway".to_string(),
                state: "Oslo".to_string(),
                city: "Oslo".to_string(),
                street: "Storgata".to_string(),
                house_number: "12".to_string(),
                phone: "99887766".to_string(),
                pin: "1234".to_string(),
                balance: money("50"),
                security_question: None,
                security_answer: None,
            },
            10000001,
        );
        store
    }

    #[test]
    fn deposit_applies_credit_to_the_matched_account() {
        let mut store = seeded_store();

        let outcome = handle(&mut store, 10000001, "1234", money("25"));

        assert_eq!(
            outcome,
            CommandOutcome::Deposited {
                balance: money("75")
            }
        );
        assert_eq!(store.find_by_number(10000001).unwrap().balance, money("75"));
    }

    #[test]
    fn deposit_with_wrong_pin_does_not_match() {
        let mut store = seeded_store();

        let outcome = handle(&mut store, 10000001, "0000", money("25"));

        assert_eq!(outcome, CommandOutcome::NotFound);
        assert_eq!(store.find_by_number(10000001).unwrap().balance, money("50"));
    }

    #[test]
    fn deposit_to_unknown_account_reports_not_found() {
        let mut store = seeded_store();

        let outcome = handle(&mut store, 99999999, "1234", money("25"));

        assert_eq!(outcome, CommandOutcome::NotFound);
    }
}
