use rand::Rng;

use crate::common::outcome::CommandOutcome;
use crate::domain::account::NewAccount;
use crate::domain::account_number;
use crate::domain::store::AccountStore;

pub fn handle<R: Rng + ?Sized>(
    store: &mut AccountStore,
    rng: &mut R,
    new: NewAccount,
) -> CommandOutcome {
    // Seed the generator with every number already in use so the fresh one
    // cannot collide with an existing account.
    let existing = store.account_numbers();
    let number = account_number::next(rng, &existing);

    let account = store.create(new, number);
    CommandOutcome::Created {
        account_number: account.account_number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::money::Money;
    use crate::domain::account_number::{ACCOUNT_NUMBER_MAX, ACCOUNT_NUMBER_MIN};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::str::FromStr;

    fn new_account(name: &str, balance: &str) -> NewAccount {
        NewAccount {
            name: name.to_string(),
            country: "Norway".to_string(),
            state: "Oslo".to_string(),
            city: "Oslo".to_string(),
            street: "Storgata".to_string(),
            house_number: "12".to_string(),
            phone: "99887766".to_string(),
            pin: "1234".to_string(),
            balance: Money::from_str(balance).unwrap(),
            security_question: None,
            security_answer: None,
        }
    }

    #[test]
    fn creates_one_account_with_a_fresh_8_digit_number() {
        let mut store = AccountStore::new();
        let mut rng = StdRng::seed_from_u64(42);

        let outcome = handle(&mut store, &mut rng, new_account("bob", "100"));

        let CommandOutcome::Created { account_number } = outcome else {
            panic!("unexpected outcome: {outcome:?}");
        };
        assert!((ACCOUNT_NUMBER_MIN..=ACCOUNT_NUMBER_MAX).contains(&account_number));
        assert_eq!(store.len(), 1);

        let account = store.find_by_number(account_number).unwrap();
        assert_eq!(account.balance, Money::from_str("100").unwrap());
        assert_eq!(account.name, "bob");
    }

    #[test]
    fn assigned_numbers_never_collide_with_existing_accounts() {
        let mut store = AccountStore::new();
        let mut rng = StdRng::seed_from_u64(7);

        for i in 0..50 {
            let before = store.account_numbers();
            let outcome = handle(&mut store, &mut rng, new_account(&format!("holder{i}"), "0"));
            let CommandOutcome::Created { account_number } = outcome else {
                panic!("unexpected outcome: {outcome:?}");
            };
            assert!(!before.contains(&account_number));
        }
        assert_eq!(store.account_numbers().len(), 50);
    }
}
