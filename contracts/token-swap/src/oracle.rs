//! Balance/allowance preflight.
//!
//! A passing preflight is advisory only: balances and allowances are read from
//! the token contract and can still differ by the time the transfer runs, in
//! which case the transfer itself fails and the whole invocation is rolled back.

use soroban_sdk::{log, token, Address, Env};

use crate::types::Error;

/// Checks that `holder` has approved at least `amount` of `token` to this
/// contract and holds at least `amount` of it. Allowance is checked first.
pub fn check_funding(env: &Env, token: &Address, holder: &Address, amount: i128) -> Result<(), Error> {
    let client = token::Client::new(env, token);

    let allowance = client.allowance(holder, &env.current_contract_address());
    if allowance < amount {
        log!(env, "Insufficient allowance. Required: {}, Available: {}", amount, allowance);
        return Err(Error::LowAllowance);
    }

    let balance = client.balance(holder);
    if balance < amount {
        log!(env, "Insufficient balance. Required: {}, Available: {}", amount, balance);
        return Err(Error::LowBalance);
    }

    Ok(())
}
