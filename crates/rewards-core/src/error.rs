//! Error types for the trader rewards ledger.
use thiserror::Error;

use crate::types::Amount;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidArgument {
    #[error("token address is zero")] ZeroToken,
    #[error("router address is zero")] ZeroRecorder,
    #[error("divisor out of range")] DivisorOutOfRange,
    #[error("initialRewardTokens out of range")] InitialRewardOutOfRange,
    #[error("trader address is zero")] ZeroTrader,
    #[error("new owner is the zero address")] ZeroNewOwner,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unauthorized {
    #[error("caller is not the router")] NotRecorder,
    #[error("caller is not the owner")] NotOwner,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("insufficient balance: have {have}, need {need}")] InsufficientBalance { have: Amount, need: Amount },
    #[error("transfer rejected: {0}")] Rejected(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RewardsError {
    #[error("invalid argument: {0}")] InvalidArgument(#[from] InvalidArgument),
    #[error("unauthorized: {0}")] Unauthorized(#[from] Unauthorized),
    #[error("no rewards available for withdrawal")] NothingToWithdraw,
    #[error("no tokens available to reward")] NoLiquidity,
    #[error("token transfer failed: {0}")] TransferFailed(String),
    #[error("arithmetic overflow")] ArithmeticOverflow,
}

impl From<TokenError> for RewardsError {
    fn from(e: TokenError) -> Self {
        RewardsError::TransferFailed(e.to_string())
    }
}
