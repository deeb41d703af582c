use serde::{Deserialize, Serialize};

use crate::common::money::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub name: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
    pub phone: String,
    /// Short secret compared by exact equality; stored in plaintext.
    pub pin: String,
    /// 8-digit lookup key, unique within the store when generator-assigned.
    pub account_number: u32,
    pub balance: Money,
    /// PIN-recovery prompt; present only when the holder opted in at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_answer: Option<String>,
}

/// Caller-supplied fields for opening an account. The account number is not
/// among them: it is assigned from the identifier generator at creation time.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
    pub phone: String,
    pub pin: String,
    pub balance: Money,
    pub security_question: Option<String>,
    pub security_answer: Option<String>,
}

impl Account {
    pub fn open(new: NewAccount, account_number: u32) -> Self {
        Self {
            name: new.name,
            country: new.country,
            state: new.state,
            city: new.city,
            street: new.street,
            house_number: new.house_number,
            phone: new.phone,
            pin: new.pin,
            account_number,
            balance: new.balance,
            security_question: new.security_question,
            security_answer: new.security_answer,
        }
    }
}
