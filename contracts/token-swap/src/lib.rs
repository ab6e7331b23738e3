/*!
 * Token Swap Smart Contract
 *
 * This contract lets a seller post a fixed-terms offer to swap one token for another,
 * which any buyer can fulfill atomically, or which the seller can cancel before it is filled.
 * Key features:
 * - No custody: offered tokens stay in the seller's account, authorized through an allowance
 * - Atomic two-leg settlement: both transfers happen in one invocation or neither does
 * - Hard deadlines: a trade can no longer be fulfilled once the ledger reaches its deadline
 * - Event logging for every trade request, fulfillment and cancellation
 *
 * Business Logic:
 * 1. Seller approves the contract to spend the offered tokens and requests a trade
 * 2. Buyer approves the contract to spend the wanted tokens and fulfills the trade
 * 3. Contract pulls the buyer's payment to the seller, then the seller's tokens to the buyer
 * 4. Seller may cancel any trade that has not been fulfilled yet
 */

#![no_std]

mod escrow;
mod ledger;
mod oracle;
mod types;


use soroban_sdk::{contract, contractimpl, log, Address, Env, Vec};

pub use types::{Error, Stage, Trade, TRADE_CANCELED, TRADE_FULFILLED, TRADE_REQUESTED};

#[contract]
pub struct TokenSwapContract;

#[contractimpl]
impl TokenSwapContract {
    /// Requests a new trade offering `sell_amount` of `sell_token` for `buy_amount` of `buy_token`.
    /// The seller must approve the contract to spend the offered tokens before calling this function.
    ///
    /// # Business Flow
    /// 1. Verifies seller authorization
    /// 2. Rejects negative amounts
    /// 3. Verifies seller allowance and balance for the offered tokens
    /// 4. Allocates the next trade id and stores the trade as `Requested`
    /// 5. Emits an event carrying the offer terms
    ///
    /// Zero amounts, same-token swaps and deadlines already in the past are accepted.
    /// A trade whose deadline has passed simply can never be fulfilled.
    ///
    /// # Arguments
    /// * `seller` - The address creating the trade (must sign transaction)
    /// * `buy_token` - Token contract the seller wants to receive
    /// * `buy_amount` - Amount of `buy_token` wanted
    /// * `sell_token` - Token contract the seller is offering
    /// * `sell_amount` - Amount of `sell_token` offered
    /// * `deadline` - Ledger timestamp at which the trade stops being fulfillable
    ///
    /// # Returns
    /// The id of the new trade. Ids start at 1 and are never reused.
    ///
    /// # Errors
    /// - InvalidAmount: If either amount is negative
    /// - LowAllowance: If seller hasn't approved enough of `sell_token`
    /// - LowBalance: If seller doesn't hold enough of `sell_token`
    pub fn request_trade(
        env: Env,
        seller: Address,
        buy_token: Address,
        buy_amount: i128,
        sell_token: Address,
        sell_amount: i128,
        deadline: u64,
    ) -> Result<u64, Error> {
        seller.require_auth();

        if buy_amount < 0 || sell_amount < 0 {
            return Err(Error::InvalidAmount);
        }

        oracle::check_funding(&env, &sell_token, &seller, sell_amount)?;

        let trade = Trade {
            seller: seller.clone(),
            buy_token: buy_token.clone(),
            buy_amount,
            sell_token: sell_token.clone(),
            sell_amount,
            deadline,
            stage: Stage::Requested,
        };
        let trade_id = ledger::allocate(&env, &trade);

        env.events().publish(
            (TRADE_REQUESTED, seller),
            (trade_id, buy_token, buy_amount, sell_token, sell_amount, deadline),
        );

        Ok(trade_id)
    }

    /// Fulfills a requested trade: `buyer` pays `buy_amount` of `buy_token` to the seller
    /// and receives `sell_amount` of `sell_token` in the same invocation.
    ///
    /// # Business Flow
    /// 1. Verifies buyer authorization
    /// 2. Checks the trade exists and is still `Requested`
    /// 3. Checks the ledger timestamp is before the deadline
    /// 4. Re-verifies seller funding, then verifies buyer funding
    /// 5. Transfers buyer → seller, then seller → buyer
    /// 6. Marks the trade `Fulfilled` and emits an event
    ///
    /// The stage is committed only after both transfers have returned. If anything fails
    /// the invocation returns an error and none of its effects are kept, so the trade stays
    /// `Requested` and can be fulfilled again later.
    ///
    /// # Errors
    /// - InvalidStage: If the trade doesn't exist or was already fulfilled or canceled
    /// - TradeExpired: If the ledger timestamp is at or past the deadline
    /// - LowAllowance / LowBalance: If seller or buyer funding is short
    /// - TransferFailed: If a token contract rejects either leg
    pub fn fulfill_trade(env: Env, buyer: Address, trade_id: u64) -> Result<(), Error> {
        buyer.require_auth();

        let mut trade = ledger::get(&env, trade_id).ok_or(Error::InvalidStage)?;

        if trade.stage != Stage::Requested {
            log!(&env, "Trade {} is not open for fulfillment", trade_id);
            return Err(Error::InvalidStage);
        }

        if env.ledger().timestamp() >= trade.deadline {
            log!(&env, "Trade {} expired at {}", trade_id, trade.deadline);
            return Err(Error::TradeExpired);
        }

        escrow::settle(&env, &trade, &buyer)?;

        ledger::set_stage(&env, trade_id, &mut trade, Stage::Fulfilled);

        env.events().publish(
            (TRADE_FULFILLED, trade.seller.clone(), buyer),
            trade_id,
        );

        Ok(())
    }

    /// Cancels a requested trade. Only the seller who requested it may cancel.
    ///
    /// # Errors
    /// - InvalidStage: If the trade doesn't exist or was already fulfilled or canceled
    /// - NotAuthorized: If `seller` is not the trade's seller
    pub fn cancel_trade(env: Env, seller: Address, trade_id: u64) -> Result<(), Error> {
        seller.require_auth();

        let mut trade = ledger::get(&env, trade_id).ok_or(Error::InvalidStage)?;

        if seller != trade.seller {
            return Err(Error::NotAuthorized);
        }

        if trade.stage != Stage::Requested {
            log!(&env, "Trade {} cannot be canceled", trade_id);
            return Err(Error::InvalidStage);
        }

        ledger::set_stage(&env, trade_id, &mut trade, Stage::Canceled);

        env.events().publish((TRADE_CANCELED, seller), trade_id);

        Ok(())
    }

    /// Lists, in id order, trades that are not canceled and whose deadline is still ahead.
    ///
    /// Reads every trade ever requested. Once the ledger is larger than a single
    /// transaction's read budget, use [`Self::list_active_trades_page`] instead.
    pub fn list_active_trades(env: Env) -> Vec<Trade> {
        Self::list_active_trades_page(env, 1, u32::MAX)
    }

    /// Lists, in id order, trades that are not canceled and whose deadline has passed.
    pub fn list_expired_trades(env: Env) -> Vec<Trade> {
        Self::list_expired_trades_page(env, 1, u32::MAX)
    }

    /// Same as `list_active_trades`, restricted to ids `start_id..start_id + limit`.
    /// At most `limit` records are read, so callers can walk the ledger in bounded pages.
    pub fn list_active_trades_page(env: Env, start_id: u64, limit: u32) -> Vec<Trade> {
        let now = env.ledger().timestamp();
        scan_trades(&env, start_id, limit, |trade| {
            trade.stage != Stage::Canceled && now < trade.deadline
        })
    }

    /// Same as `list_expired_trades`, restricted to ids `start_id..start_id + limit`.
    pub fn list_expired_trades_page(env: Env, start_id: u64, limit: u32) -> Vec<Trade> {
        let now = env.ledger().timestamp();
        scan_trades(&env, start_id, limit, |trade| {
            trade.stage != Stage::Canceled && now >= trade.deadline
        })
    }

    /// Get a trade by id, `None` if the id was never allocated
    pub fn get_trade(env: Env, trade_id: u64) -> Option<Trade> {
        ledger::get(&env, trade_id)
    }

    /// Get the stage of a trade; unknown ids read as `Inactive`
    pub fn get_stage(env: Env, trade_id: u64) -> Stage {
        ledger::stage_of(&env, trade_id)
    }

    /// Get the number of trades ever requested
    pub fn get_trade_count(env: Env) -> u64 {
        ledger::count(&env)
    }
}

/// Pass over at most `limit` ids starting at `start_id`, keeping matching trades in
/// ascending id order. Trade state is never changed.
fn scan_trades(env: &Env, start_id: u64, limit: u32, keep: impl Fn(&Trade) -> bool) -> Vec<Trade> {
    let mut trades = Vec::new(env);
    let first = start_id.max(1);
    let last = ledger::count(env).min(first.saturating_add(limit as u64).saturating_sub(1));
    for trade_id in first..=last {
        if let Some(trade) = ledger::get(env, trade_id) {
            if keep(&trade) {
                trades.push_back(trade);
            }
        }
    }
    trades
}
