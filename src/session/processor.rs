use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::common::command::SessionCommand;
use crate::common::outcome::CommandOutcome;
use crate::domain::store::AccountStore;
use crate::session::handlers::{change_pin, create, delete, deposit, withdrawal};

/// Executes parsed commands against the store. Owns the RNG that feeds the
/// account number generator; tests construct it from a fixed seed.
#[derive(Debug)]
pub struct Processor {
    rng: StdRng,
}

impl Processor {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn process(&mut self, store: &mut AccountStore, command: SessionCommand) -> CommandOutcome {
        match command {
            SessionCommand::Create(new) => create::handle(store, &mut self.rng, new),
            SessionCommand::CheckBalance { account_number } => {
                match store.find_by_number(account_number) {
                    Some(account) => CommandOutcome::Balance {
                        balance: account.balance,
                    },
                    None => CommandOutcome::NotFound,
                }
            }
            SessionCommand::Deposit {
                account_number,
                pin,
                amount,
            } => deposit::handle(store, account_number, &pin, amount),
            SessionCommand::Withdraw {
                account_number,
                pin,
                amount,
            } => withdrawal::handle(store, account_number, &pin, amount),
            SessionCommand::ChangePin {
                account_number,
                current_pin,
                new_pin,
            } => change_pin::handle(store, account_number, &current_pin, &new_pin),
            SessionCommand::ViewDetails { account_number } => {
                match store.find_by_number(account_number) {
                    Some(account) => CommandOutcome::Details(account.clone()),
                    None => CommandOutcome::NotFound,
                }
            }
            SessionCommand::Delete {
                account_number,
                pin,
            } => delete::handle(store, account_number, &pin),
        }
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}
