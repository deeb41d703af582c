pub mod change_pin;
pub mod create;
pub mod delete;
pub mod deposit;
pub mod withdrawal;
