use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::common::money::Money;
use crate::domain::account::{Account, NewAccount};

/// Result of an in-place balance adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceOutcome {
    Updated { balance: Money },
    InsufficientFunds { balance: Money },
    NotFound,
}

/// Result of an in-place PIN replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOutcome {
    Updated,
    NotFound,
}

/// Result of removing an account from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    BalanceRemaining { balance: Money },
    NotFound,
}

/// The full collection of accounts, in insertion order.
///
/// The store itself is the persisted object: serializing it yields
/// `{"accounts": [...]}` with the array in the order accounts were created.
/// Lookups are linear scans and the first match wins; that ordering guarantee
/// is relied on nowhere else, but duplicate identifiers are representable
/// (see `create`) so it is part of the contract.
///
/// The store never touches the filesystem. Callers persist it through
/// `io::store_file` after every mutating operation.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AccountStore {
    accounts: Vec<Account>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Linear scan; returns the first account satisfying the predicate.
    pub fn find<P>(&self, predicate: P) -> Option<&Account>
    where
        P: Fn(&Account) -> bool,
    {
        self.accounts.iter().find(|account| predicate(account))
    }

    fn find_mut<P>(&mut self, predicate: P) -> Option<&mut Account>
    where
        P: Fn(&Account) -> bool,
    {
        self.accounts.iter_mut().find(|account| predicate(account))
    }

    pub fn find_by_number(&self, account_number: u32) -> Option<&Account> {
        self.find(|account| account.account_number == account_number)
    }

    /// The session predicate: account number and PIN must match together.
    pub fn find_session(&self, account_number: u32, pin: &str) -> Option<&Account> {
        self.find(|account| account.account_number == account_number && account.pin == pin)
    }

    /// Every identifier currently in the store; seeds the account number
    /// generator so freshly drawn numbers cannot collide.
    pub fn account_numbers(&self) -> HashSet<u32> {
        self.accounts
            .iter()
            .map(|account| account.account_number)
            .collect()
    }

    /// Appends a new account. No uniqueness check happens here: generated
    /// numbers are collision-free by construction, and caller-supplied ones
    /// are taken as-is (duplicates are representable).
    pub fn create(&mut self, new: NewAccount, account_number: u32) -> &Account {
        self.accounts.push(Account::open(new, account_number));
        self.accounts.last().expect("account was just appended")
    }

    /// Adjusts the matched account's balance by `delta` in place. A negative
    /// delta whose magnitude exceeds the current balance is rejected without
    /// mutating; the deduction is applied exactly once otherwise.
    pub fn update_balance<P>(&mut self, predicate: P, delta: Money) -> BalanceOutcome
    where
        P: Fn(&Account) -> bool,
    {
        let Some(account) = self.find_mut(predicate) else {
            return BalanceOutcome::NotFound;
        };

        if delta < Money::zero() && account.balance < -delta {
            return BalanceOutcome::InsufficientFunds {
                balance: account.balance,
            };
        }

        account.balance += delta;
        BalanceOutcome::Updated {
            balance: account.balance,
        }
    }

    /// Replaces the matched account's PIN in place.
    pub fn update_pin<P>(&mut self, predicate: P, new_pin: &str) -> PinOutcome
    where
        P: Fn(&Account) -> bool,
    {
        let Some(account) = self.find_mut(predicate) else {
            return PinOutcome::NotFound;
        };

        account.pin = new_pin.to_string();
        PinOutcome::Updated
    }

    /// Removes the matched account(s) by rebuilding the collection from every
    /// account the predicate does not match, then replacing it wholesale.
    /// Refuses when the first matching account still has a positive balance.
    pub fn delete<P>(&mut self, predicate: P) -> DeleteOutcome
    where
        P: Fn(&Account) -> bool,
    {
        let Some(matched) = self.find(&predicate) else {
            return DeleteOutcome::NotFound;
        };
        if matched.balance.is_positive() {
            return DeleteOutcome::BalanceRemaining {
                balance: matched.balance,
            };
        }

        let accounts = std::mem::take(&mut self.accounts);
        self.accounts = accounts
            .into_iter()
            .filter(|account| !predicate(account))
            .collect();
        DeleteOutcome::Deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn new_account(name: &str, pin: &str, balance: &str) -> NewAccount {
        NewAccount {
            name: name.to_string(),
            country: "Norway".to_string(),
            state: "Oslo".to_string(),
            city: "Oslo".to_string(),
            street: "Storgata".to_string(),
            house_number: "12".to_string(),
            phone: "99887766".to_string(),
            pin: pin.to_string(),
            balance: money(balance),
            security_question: None,
            security_answer: None,
        }
    }

    fn seeded_store() -> AccountStore {
        let mut store = AccountStore::new();
        store.create(new_account("bob", "1234", "50"), 10000001);
        store.create(new_account("alice", "9999", "200"), 10000002);
        store
    }

    #[test]
    fn find_returns_first_match_in_insertion_order() {
        let mut store = AccountStore::new();
        store.create(new_account("bob", "1111", "10"), 10000001);
        store.create(new_account("bob-clone", "2222", "20"), 10000001); // same identifier, see create docs

        let found = store.find_by_number(10000001).unwrap();
        assert_eq!(found.name, "bob");
        assert_eq!(found.pin, "1111");
    }

    #[test]
    fn find_is_idempotent_without_intervening_mutation() {
        let store = seeded_store();

        let first = store.find_session(10000001, "1234").cloned();
        let second = store.find_session(10000001, "1234").cloned();
        assert_eq!(first, second);

        assert!(store.find_session(10000001, "0000").is_none());
        assert!(store.find_session(10000001, "0000").is_none());
    }

    #[test]
    fn session_predicate_requires_number_and_pin_together() {
        let store = seeded_store();

        assert!(store.find_session(10000001, "1234").is_some());
        assert!(store.find_session(10000001, "9999").is_none());
        assert!(store.find_session(99999999, "1234").is_none());
    }

    #[test]
    fn create_appends_and_preserves_order() {
        let store = seeded_store();

        assert_eq!(store.len(), 2);
        assert_eq!(store.accounts()[0].name, "bob");
        assert_eq!(store.accounts()[1].name, "alice");
    }

    #[test]
    fn create_performs_no_uniqueness_check() {
        let mut store = AccountStore::new();
        store.create(new_account("a", "1", "0"), 10000001);
        store.create(new_account("b", "2", "0"), 10000001);

        assert_eq!(store.len(), 2, "duplicate identifiers are representable");
    }

    #[test]
    fn deposit_increases_balance() {
        let mut store = seeded_store();

        let outcome = store.update_balance(|a| a.account_number == 10000001, money("25"));
        assert_eq!(
            outcome,
            BalanceOutcome::Updated {
                balance: money("75")
            }
        );
        assert_eq!(store.find_by_number(10000001).unwrap().balance, money("75"));
    }

    #[test]
    fn over_balance_withdrawal_is_rejected_without_mutation() {
        let mut store = seeded_store();

        let outcome = store.update_balance(|a| a.account_number == 10000001, -money("100"));
        assert_eq!(
            outcome,
            BalanceOutcome::InsufficientFunds {
                balance: money("50")
            }
        );
        assert_eq!(store.find_by_number(10000001).unwrap().balance, money("50"));
    }

    #[test]
    fn withdrawal_of_exact_balance_reaches_zero() {
        let mut store = seeded_store();

        let outcome = store.update_balance(|a| a.account_number == 10000001, -money("50"));
        assert_eq!(
            outcome,
            BalanceOutcome::Updated {
                balance: Money::zero()
            }
        );
    }

    #[test]
    fn update_balance_reports_missing_account() {
        let mut store = seeded_store();

        let outcome = store.update_balance(|a| a.account_number == 12345678, money("10"));
        assert_eq!(outcome, BalanceOutcome::NotFound);
    }

    #[test]
    fn update_pin_replaces_in_place() {
        let mut store = seeded_store();

        let outcome = store.update_pin(|a| a.account_number == 10000001, "4321");
        assert_eq!(outcome, PinOutcome::Updated);
        assert_eq!(store.find_by_number(10000001).unwrap().pin, "4321");
        assert!(store.find_session(10000001, "1234").is_none());
    }

    #[test]
    fn update_pin_reports_missing_account() {
        let mut store = seeded_store();

        assert_eq!(
            store.update_pin(|a| a.account_number == 12345678, "0000"),
            PinOutcome::NotFound
        );
    }

    #[test]
    fn delete_refuses_while_balance_is_positive() {
        let mut store = seeded_store();

        let outcome = store.delete(|a| a.account_number == 10000001);
        assert_eq!(
            outcome,
            DeleteOutcome::BalanceRemaining {
                balance: money("50")
            }
        );
        assert_eq!(store.len(), 2, "blocked delete must not change the store");
    }

    #[test]
    fn delete_removes_drained_account_and_keeps_the_rest() {
        let mut store = seeded_store();
        store.update_balance(|a| a.account_number == 10000001, -money("50"));

        let outcome = store.delete(|a| a.account_number == 10000001);
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(store.len(), 1);
        assert!(store.find_by_number(10000001).is_none());
        assert!(store.find_by_number(10000002).is_some());
    }

    #[test]
    fn delete_reports_missing_account() {
        let mut store = seeded_store();

        assert_eq!(
            store.delete(|a| a.account_number == 12345678),
            DeleteOutcome::NotFound
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn account_numbers_collects_every_identifier() {
        let store = seeded_store();

        let numbers = store.account_numbers();
        assert_eq!(numbers.len(), 2);
        assert!(numbers.contains(&10000001));
        assert!(numbers.contains(&10000002));
    }
}
