//! Input rejection.
//!
//! Any operation returning `Err(ActionError)` has left the run untouched.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("there is no battle in progress")]
    NoActiveBattle,

    #[error("the battle is not accepting input right now")]
    NotAcceptingInput,

    #[error("no turn is being resolved")]
    NoTurnInFlight,

    #[error("unknown move `{0}`")]
    UnknownMove(String),

    #[error("{0} has no PP left")]
    NoPpLeft(String),

    #[error("no item `{0}` in the bag")]
    UnknownItem(String),

    #[error("unknown map node `{0}`")]
    UnknownNode(String),

    #[error("node `{0}` cannot be reached from the current node")]
    NodeNotSelectable(String),

    #[error("action not allowed while the run is in {0} status")]
    WrongStatus(&'static str),

    #[error("there is no reward waiting to be claimed")]
    NoPendingReward,
}
