//! Two-leg settlement of a fulfilled trade.
//!
//! Both legs are pulls: the contract spends allowances the buyer and seller
//! granted it, so it never holds either party's tokens. Legs always run buyer
//! to seller first, then seller to buyer. If either leg fails the error is
//! returned to the entry point, and the host discards every effect of the
//! invocation, including a leg that already went through.

use soroban_sdk::{log, token, Address, Env};

use crate::oracle;
use crate::types::{Error, Trade};

/// Preflights both parties and moves both legs of `trade` with `buyer` as counterparty.
pub fn settle(env: &Env, trade: &Trade, buyer: &Address) -> Result<(), Error> {
    // Seller's funding may have changed since the trade was requested
    oracle::check_funding(env, &trade.sell_token, &trade.seller, trade.sell_amount)?;
    oracle::check_funding(env, &trade.buy_token, buyer, trade.buy_amount)?;

    pull(env, &trade.buy_token, buyer, &trade.seller, trade.buy_amount)?;
    pull(env, &trade.sell_token, &trade.seller, buyer, trade.sell_amount)?;

    Ok(())
}

/// Moves `amount` of `token` from `from` to `to` using the allowance `from`
/// granted this contract.
fn pull(env: &Env, token: &Address, from: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    let client = token::Client::new(env, token);

    match client.try_transfer_from(&env.current_contract_address(), from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "Token transfer failed for amount: {}", amount);
            Err(Error::TransferFailed)
        }
    }
}
