//! Trade ledger: id allocation and record storage.
//!
//! Ids are handed out from a counter that starts at 0 and only ever grows, so
//! the first trade is id 1 and an id is never reused. Records are never deleted;
//! after creation the stage is the only field that changes, and only via
//! [`set_stage`], which the state machine in `lib.rs` calls.
//!
//! A requested trade must stay readable until its deadline, so its record and
//! the contract instance are extended to cover the deadline at allocation time.

use soroban_sdk::Env;

use crate::types::{
    DataKey, Stage, Trade, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD,
    LEDGER_CLOSE_SECONDS, TRADE_BUMP_AMOUNT, TRADE_LIFETIME_THRESHOLD,
};

/// Number of trades allocated so far, which is also the highest valid id.
pub(crate) fn count(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::TradeCount).unwrap_or(0)
}

/// Stores `draft` under the next id and returns that id.
pub(crate) fn allocate(env: &Env, draft: &Trade) -> u64 {
    let trade_id = count(env) + 1;

    let key = DataKey::Trade(trade_id);
    env.storage().persistent().set(&key, draft);
    let live_until = ledgers_past_deadline(env, draft.deadline, TRADE_BUMP_AMOUNT);
    env.storage().persistent().extend_ttl(&key, live_until, live_until);

    env.storage().instance().set(&DataKey::TradeCount, &trade_id);
    let instance_until = ledgers_past_deadline(env, draft.deadline, INSTANCE_BUMP_AMOUNT);
    env.storage().instance().extend_ttl(instance_until, instance_until);

    trade_id
}

/// Returns the record for `trade_id`, or `None` if the id was never allocated.
/// Reading a record keeps it alive for another bump period.
pub(crate) fn get(env: &Env, trade_id: u64) -> Option<Trade> {
    if trade_id == 0 || trade_id > count(env) {
        return None;
    }
    let key = DataKey::Trade(trade_id);
    let trade = env.storage().persistent().get(&key)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, TRADE_LIFETIME_THRESHOLD, TRADE_BUMP_AMOUNT);
    Some(trade)
}

/// Stage of `trade_id`, reading unknown ids as `Inactive`.
pub(crate) fn stage_of(env: &Env, trade_id: u64) -> Stage {
    get(env, trade_id).map_or(Stage::Inactive, |trade| trade.stage)
}

/// Moves an existing trade to `stage`. The caller has already validated the transition.
pub(crate) fn set_stage(env: &Env, trade_id: u64, trade: &mut Trade, stage: Stage) {
    trade.stage = stage;

    let key = DataKey::Trade(trade_id);
    env.storage().persistent().set(&key, &*trade);
    env.storage()
        .persistent()
        .extend_ttl(&key, TRADE_LIFETIME_THRESHOLD, TRADE_BUMP_AMOUNT);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Ledgers from now until `margin` ledgers after `deadline`, capped at the network maximum.
fn ledgers_past_deadline(env: &Env, deadline: u64, margin: u32) -> u32 {
    let until_deadline = deadline.saturating_sub(env.ledger().timestamp()) / LEDGER_CLOSE_SECONDS;
    let wanted = until_deadline.saturating_add(margin as u64);
    wanted.min(env.storage().max_ttl() as u64) as u32
}
