use log::debug;

use crate::domain::store::AccountStore;

/// Reserved secret that routes a login attempt into PIN recovery instead of
/// a normal PIN check.
pub const RECOVERY_SENTINEL: &str = "forgot";

/// Result of a login check. The matching policy is: account number and PIN
/// must match the same account together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated { account_number: u32, pin: String },
    PinMismatch,
    NotFound,
}

/// Result of answering the security question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryOutcome {
    /// Answer matched; the stored PIN is revealed to the operator.
    Recovered { pin: String },
    AnswerMismatch,
    /// The account never set a security question.
    Unavailable,
    NotFound,
}

pub fn authenticate(store: &AccountStore, account_number: u32, secret: &str) -> AuthOutcome {
    let Some(account) = store.find_by_number(account_number) else {
        debug!("login failed: account {account_number} not found");
        return AuthOutcome::NotFound;
    };

    if account.pin != secret {
        debug!("login failed: pin mismatch for account {account_number}");
        return AuthOutcome::PinMismatch;
    }

    debug!("login ok for account {account_number}");
    AuthOutcome::Authenticated {
        account_number: account.account_number,
        pin: account.pin.clone(),
    }
}

/// Checks the supplied answer against the account's security answer.
/// Comparison is plaintext byte equality, like the PIN itself.
pub fn recover(store: &AccountStore, account_number: u32, answer: &str) -> RecoveryOutcome {
    let Some(account) = store.find_by_number(account_number) else {
        return RecoveryOutcome::NotFound;
    };

    let Some(expected) = account.security_answer.as_deref() else {
        return RecoveryOutcome::Unavailable;
    };

    if expected != answer {
        debug!("pin recovery failed for account {account_number}");
        return RecoveryOutcome::AnswerMismatch;
    }

    debug!("pin recovered for account {account_number}");
    RecoveryOutcome::Recovered {
        pin: account.pin.clone(),
    }
}
