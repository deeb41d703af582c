use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use log::debug;

use crate::common::command::SessionCommand;
use crate::common::error::AppError;
use crate::common::money::Money;
use crate::common::outcome::CommandOutcome;
use crate::domain::account::NewAccount;
use crate::domain::store::AccountStore;
use crate::io::store_file;
use crate::session::auth::{self, AuthOutcome, RecoveryOutcome};
use crate::session::processor::Processor;

/// Withdrawals above this amount require the PIN to be re-entered before the
/// command is issued.
const CONFIRM_THRESHOLD: Money = Money::new(100_000);

/// Credentials of the logged-in holder, kept for the session predicates.
#[derive(Debug)]
struct SessionUser {
    account_number: u32,
    pin: String,
}

/// Where the session is between commands. Login and menu failures loop back
/// through these states; nothing re-enters itself recursively.
#[derive(Debug)]
enum SessionState {
    Unauthenticated,
    Authenticated(SessionUser),
    Exiting,
}

/// The interactive front end: prompts on `output`, whitespace-delimited
/// tokens from `input`, like a teller terminal. Generic over the streams so
/// tests can drive a whole session from a string.
pub struct Shell<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
    store_path: PathBuf,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, store_path: PathBuf) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
            store_path,
        }
    }

    /// Runs the session to completion. Only backing-store and terminal I/O
    /// failures escape; everything else is an outcome printed to the
    /// operator. End of input is a clean exit.
    pub fn run(
        &mut self,
        store: &mut AccountStore,
        processor: &mut Processor,
    ) -> Result<(), AppError> {
        writeln!(self.output, "Welcome to the bank")?;

        let mut state = SessionState::Unauthenticated;
        loop {
            state = match state {
                SessionState::Unauthenticated => self.login_screen(store, processor)?,
                SessionState::Authenticated(user) => self.menu_screen(store, processor, user)?,
                SessionState::Exiting => break,
            };
        }

        writeln!(self.output, "Goodbye")?;
        Ok(())
    }

    /// Next whitespace-delimited token, across line boundaries. `None` means
    /// end of input.
    fn next_token(&mut self) -> Result<Option<String>, AppError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.next_token()
    }

    /// Prompts until the operator types something that parses as an amount.
    fn prompt_money(&mut self, text: &str) -> Result<Option<Money>, AppError> {
        loop {
            let Some(token) = self.prompt(text)? else {
                return Ok(None);
            };
            match Money::from_str(&token) {
                Ok(amount) => return Ok(Some(amount)),
                Err(_) => writeln!(self.output, "Invalid amount")?,
            }
        }
    }

    /// Runs one command and, when it mutated the store, immediately rewrites
    /// the backing file. Persistence is a post-condition of every mutating
    /// command, not something an individual flow may skip.
    fn dispatch(
        &mut self,
        store: &mut AccountStore,
        processor: &mut Processor,
        command: SessionCommand,
    ) -> Result<CommandOutcome, AppError> {
        let outcome = processor.process(store, command);
        if outcome.mutated() {
            store_file::persist(&self.store_path, store)?;
        }
        Ok(outcome)
    }

    fn login_screen(
        &mut self,
        store: &mut AccountStore,
        processor: &mut Processor,
    ) -> Result<SessionState, AppError> {
        let Some(token) =
            self.prompt("Enter your account number ('new' to open an account, 'exit' to quit): ")?
        else {
            return Ok(SessionState::Exiting);
        };

        match token.as_str() {
            "exit" => return Ok(SessionState::Exiting),
            "new" => {
                self.create_account(store, processor)?;
                return Ok(SessionState::Unauthenticated);
            }
            _ => {}
        }

        let Ok(account_number) = token.parse::<u32>() else {
            writeln!(self.output, "Invalid account number")?;
            return Ok(SessionState::Unauthenticated);
        };

        let Some(secret) = self.prompt("Enter your pin ('forgot' to recover it): ")? else {
            return Ok(SessionState::Exiting);
        };

        if secret == auth::RECOVERY_SENTINEL {
            self.recover_pin(store, account_number)?;
            return Ok(SessionState::Unauthenticated);
        }

        match auth::authenticate(store, account_number, &secret) {
            AuthOutcome::Authenticated {
                account_number,
                pin,
            } => {
                writeln!(self.output, "Login successful")?;
                Ok(SessionState::Authenticated(SessionUser {
                    account_number,
                    pin,
                }))
            }
            AuthOutcome::PinMismatch => {
                writeln!(self.output, "Incorrect pin")?;
                Ok(SessionState::Unauthenticated)
            }
            AuthOutcome::NotFound => {
                writeln!(self.output, "Account not found")?;
                Ok(SessionState::Unauthenticated)
            }
        }
    }

    fn recover_pin(&mut self, store: &AccountStore, account_number: u32) -> Result<(), AppError> {
        let question = match store.find_by_number(account_number) {
            None => {
                writeln!(self.output, "Account not found")?;
                return Ok(());
            }
            Some(account) => match account.security_question.clone() {
                None => {
                    writeln!(self.output, "No security question on file")?;
                    return Ok(());
                }
                Some(question) => question,
            },
        };

        writeln!(self.output, "Security question: {question}")?;
        let Some(answer) = self.prompt("Answer: ")? else {
            return Ok(());
        };

        match auth::recover(store, account_number, &answer) {
            RecoveryOutcome::Recovered { pin } => writeln!(self.output, "Your pin is: {pin}")?,
            RecoveryOutcome::AnswerMismatch => writeln!(self.output, "Incorrect answer")?,
            RecoveryOutcome::Unavailable | RecoveryOutcome::NotFound => {
                writeln!(self.output, "No security question on file")?
            }
        }
        Ok(())
    }

    /// Collects the new-account fields and issues the create command. End of
    /// input anywhere abandons the creation without touching the store.
    fn create_account(
        &mut self,
        store: &mut AccountStore,
        processor: &mut Processor,
    ) -> Result<(), AppError> {
        let Some(name) = self.prompt("Enter your name: ")? else {
            return Ok(());
        };
        let Some(country) = self.prompt("Enter your country: ")? else {
            return Ok(());
        };
        let Some(state) = self.prompt("Enter your state: ")? else {
            return Ok(());
        };
        let Some(city) = self.prompt("Enter your city: ")? else {
            return Ok(());
        };
        let Some(street) = self.prompt("Enter your street: ")? else {
            return Ok(());
        };
        let Some(house_number) = self.prompt("Enter your house number (without spaces): ")? else {
            return Ok(());
        };
        let Some(phone) = self.prompt("Enter your phone number: ")? else {
            return Ok(());
        };
        let Some(pin) = self.prompt("Enter a pin for your account: ")? else {
            return Ok(());
        };
        let Some(balance) = self.prompt_money("Enter your balance: ")? else {
            return Ok(());
        };

        let Some(wants_question) =
            self.prompt("Set a security question for pin recovery? (yes or no): ")?
        else {
            return Ok(());
        };
        let (security_question, security_answer) = if wants_question == "yes" {
            let Some(question) = self.prompt("Enter a security question (one word): ")? else {
                return Ok(());
            };
            let Some(answer) = self.prompt("Enter the answer: ")? else {
                return Ok(());
            };
            (Some(question), Some(answer))
        } else {
            (None, None)
        };

        let outcome = self.dispatch(
            store,
            processor,
            SessionCommand::Create(NewAccount {
                name,
                country,
                state,
                city,
                street,
                house_number,
                phone,
                pin,
                balance,
                security_question,
                security_answer,
            }),
        )?;

        if let CommandOutcome::Created { account_number } = outcome {
            writeln!(self.output, "Your account number is: {account_number}")?;
            writeln!(self.output, "Account created successfully")?;
        }
        Ok(())
    }

    fn menu_screen(
        &mut self,
        store: &mut AccountStore,
        processor: &mut Processor,
        user: SessionUser,
    ) -> Result<SessionState, AppError> {
        let mut user = user;

        writeln!(self.output)?;
        writeln!(self.output, "-------------------")?;
        writeln!(self.output, "1. Create new account")?;
        writeln!(self.output, "2. Check balance")?;
        writeln!(self.output, "3. Deposit")?;
        writeln!(self.output, "4. Withdraw")?;
        writeln!(self.output, "5. Change pin")?;
        writeln!(self.output, "6. Logout")?;
        writeln!(self.output, "7. View details")?;
        writeln!(self.output, "8. Delete account")?;
        writeln!(self.output, "9. Exit")?;
        writeln!(self.output, "-------------------")?;

        let Some(choice) = self.prompt("Enter your choice: ")? else {
            return Ok(SessionState::Exiting);
        };

        match choice.as_str() {
            "1" => {
                self.create_account(store, processor)?;
            }
            "2" => {
                let outcome = self.dispatch(
                    store,
                    processor,
                    SessionCommand::CheckBalance {
                        account_number: user.account_number,
                    },
                )?;
                match outcome {
                    CommandOutcome::Balance { balance } => {
                        writeln!(self.output, "Your balance is {balance}")?
                    }
                    _ => writeln!(self.output, "Account not found")?,
                }
            }
            "3" => {
                let Some(amount) =
                    self.prompt_money("Enter the amount you want to deposit: ")?
                else {
                    return Ok(SessionState::Exiting);
                };
                let outcome = self.dispatch(
                    store,
                    processor,
                    SessionCommand::Deposit {
                        account_number: user.account_number,
                        pin: user.pin.clone(),
                        amount,
                    },
                )?;
                match outcome {
                    CommandOutcome::Deposited { .. } => {
                        writeln!(self.output, "Amount deposited successfully")?
                    }
                    CommandOutcome::InsufficientFunds { .. } => {
                        writeln!(self.output, "Insufficient balance")?
                    }
                    _ => writeln!(self.output, "Account not found")?,
                }
            }
            "4" => {
                let Some(amount) =
                    self.prompt_money("Enter the amount you want to withdraw: ")?
                else {
                    return Ok(SessionState::Exiting);
                };

                if amount > CONFIRM_THRESHOLD {
                    let Some(confirm) = self.prompt("Enter pin to continue: ")? else {
                        return Ok(SessionState::Exiting);
                    };
                    if confirm != user.pin {
                        writeln!(self.output, "Incorrect pin")?;
                        return Ok(SessionState::Authenticated(user));
                    }
                }

                let outcome = self.dispatch(
                    store,
                    processor,
                    SessionCommand::Withdraw {
                        account_number: user.account_number,
                        pin: user.pin.clone(),
                        amount,
                    },
                )?;
                match outcome {
                    CommandOutcome::Withdrawn { .. } => {
                        writeln!(self.output, "Amount withdrawn successfully")?
                    }
                    CommandOutcome::InsufficientFunds { .. } => {
                        writeln!(self.output, "Insufficient balance")?
                    }
                    _ => writeln!(self.output, "Account not found")?,
                }
            }
            "5" => {
                let Some(new_pin) = self.prompt("Enter your new pin: ")? else {
                    return Ok(SessionState::Exiting);
                };
                let Some(old_pin) = self.prompt("Enter old pin to continue: ")? else {
                    return Ok(SessionState::Exiting);
                };
                let outcome = self.dispatch(
                    store,
                    processor,
                    SessionCommand::ChangePin {
                        account_number: user.account_number,
                        current_pin: old_pin,
                        new_pin: new_pin.clone(),
                    },
                )?;
                match outcome {
                    CommandOutcome::PinChanged => {
                        // Keep the session credentials in step with the store,
                        // otherwise every later command would miss its match.
                        user.pin = new_pin;
                        writeln!(self.output, "Pin changed successfully")?;
                    }
                    CommandOutcome::PinMismatch => writeln!(self.output, "Incorrect pin")?,
                    _ => writeln!(self.output, "Account not found")?,
                }
            }
            "6" => {
                writeln!(self.output, "Logged out successfully")?;
                debug!("session for account {} logged out", user.account_number);
                return Ok(SessionState::Unauthenticated);
            }
            "7" => {
                let outcome = self.dispatch(
                    store,
                    processor,
                    SessionCommand::ViewDetails {
                        account_number: user.account_number,
                    },
                )?;
                match outcome {
                    CommandOutcome::Details(account) => {
                        writeln!(self.output, "Name: {}", account.name)?;
                        writeln!(self.output, "Address:")?;
                        writeln!(self.output, "Country: {}", account.country)?;
                        writeln!(self.output, "State: {}", account.state)?;
                        writeln!(self.output, "City: {}", account.city)?;
                        writeln!(self.output, "Street: {}", account.street)?;
                        writeln!(self.output, "House number: {}", account.house_number)?;
                        writeln!(self.output, "Phone number: {}", account.phone)?;
                        writeln!(self.output, "Pin: {}", account.pin)?;
                        writeln!(self.output, "Account number: {}", account.account_number)?;
                        writeln!(self.output, "Balance: {}", account.balance)?;
                    }
                    _ => writeln!(self.output, "Account not found")?,
                }
            }
            "8" => {
                let Some(confirm) = self.prompt("Enter your pin to continue: ")? else {
                    return Ok(SessionState::Exiting);
                };
                let outcome = self.dispatch(
                    store,
                    processor,
                    SessionCommand::Delete {
                        account_number: user.account_number,
                        pin: confirm,
                    },
                )?;
                match outcome {
                    CommandOutcome::Deleted => {
                        writeln!(self.output, "Account deleted successfully")?
                    }
                    CommandOutcome::DeleteBlocked { balance } => {
                        writeln!(
                            self.output,
                            "You have a balance of {balance} in your account. Please withdraw the amount to continue"
                        )?;
                        writeln!(self.output, "You were logged out for security reasons.")?;
                    }
                    CommandOutcome::PinMismatch => writeln!(self.output, "Incorrect pin")?,
                    _ => writeln!(self.output, "Account not found")?,
                }
                // Every delete attempt ends the session; the holder logs in
                // again if the account still exists.
                return Ok(SessionState::Unauthenticated);
            }
            "9" => return Ok(SessionState::Exiting),
            _ => writeln!(self.output, "Invalid choice")?,
        }

        Ok(SessionState::Authenticated(user))
    }
}
