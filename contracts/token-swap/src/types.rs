/*!
 * Type Definitions for the Token Swap Contract
 *
 * Data structures, storage keys, errors, events and storage lifetime constants
 * shared by the ledger, escrow and state machine modules.
 */

use soroban_sdk::{contracterror, contracttype, symbol_short, Address, Symbol};

// ================================================================================================
// CORE DATA STRUCTURES
// ================================================================================================

/// A fixed-terms offer to swap `sell_amount` of `sell_token` for `buy_amount` of `buy_token`.
///
/// The offered tokens never leave the seller's account until fulfillment. The seller
/// authorizes the contract through a token allowance instead of depositing into custody,
/// so both parties' funding is re-verified when a buyer fulfills.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Trade {
    /// The address that requested the trade. Set once, never changed.
    pub seller: Address,

    /// Token contract the seller wants to receive
    pub buy_token: Address,

    /// Quantity of `buy_token` the buyer pays
    pub buy_amount: i128,

    /// Token contract the seller is offering
    pub sell_token: Address,

    /// Quantity of `sell_token` the buyer receives
    pub sell_amount: i128,

    /// Ledger timestamp (seconds) at which the trade stops being fulfillable.
    /// Fulfillment must happen strictly before this instant.
    pub deadline: u64,

    /// Lifecycle stage
    pub stage: Stage,
}

// ================================================================================================
// ENUMERATIONS
// ================================================================================================

/// Lifecycle stage of a trade.
///
/// # State Transition Rules
/// - Requested → Fulfilled (buyer completes both transfer legs)
/// - Requested → Canceled (seller withdraws the offer)
///
/// `Inactive` is never stored: it is what an unallocated id reads as.
/// `Fulfilled` and `Canceled` are final.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    Inactive,
    Requested,
    Fulfilled,
    Canceled,
}

/// Storage keys.
///
/// The trade counter lives in instance storage next to the contract code;
/// each trade record gets its own persistent entry so the ledger grows without
/// rewriting a single large map on every request.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Number of trades ever requested, also the highest allocated id
    TradeCount,
    /// Trade record by id, ids start at 1
    Trade(u64),
}

// ================================================================================================
// ERROR DEFINITIONS
// ================================================================================================

/// Failure kinds surfaced to callers. Every one of them aborts the invocation
/// and discards all of its effects.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Trade is not in the stage the operation requires (includes unknown ids)
    InvalidStage = 1,

    /// Fulfillment attempted at or after the trade deadline
    TradeExpired = 2,

    /// Paying party holds less than the required amount
    LowBalance = 3,

    /// Paying party has approved less than the required amount to this contract
    LowAllowance = 4,

    /// Only the seller may cancel a trade
    NotAuthorized = 5,

    /// A token contract rejected one of the transfer legs
    TransferFailed = 6,

    /// Negative trade amount
    InvalidAmount = 7,
}

// ================================================================================================
// EVENT CONSTANTS
// ================================================================================================

/// Event emitted when a trade is requested
/// Topics: (TRADE_REQUESTED, seller)
/// Data: (trade_id, buy_token, buy_amount, sell_token, sell_amount, deadline)
pub const TRADE_REQUESTED: Symbol = symbol_short!("trd_req");

/// Event emitted when a trade is fulfilled
/// Topics: (TRADE_FULFILLED, seller, buyer)
/// Data: trade_id
pub const TRADE_FULFILLED: Symbol = symbol_short!("trd_ful");

/// Event emitted when the seller cancels a trade
/// Topics: (TRADE_CANCELED, seller)
/// Data: trade_id
pub const TRADE_CANCELED: Symbol = symbol_short!("trd_can");

// ================================================================================================
// STORAGE LIFETIME
// ================================================================================================

/// Average ledger close time
pub const LEDGER_CLOSE_SECONDS: u64 = 5;
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// Contract instance (code + trade counter) is extended to a week whenever it drops below six days
pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Trade records are kept for thirty days past their last write or read, and an open
/// trade additionally lives until thirty days past its deadline
pub const TRADE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const TRADE_LIFETIME_THRESHOLD: u32 = TRADE_BUMP_AMOUNT - DAY_IN_LEDGERS;
