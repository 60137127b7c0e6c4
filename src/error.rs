// Library error type

use thiserror::Error;

use crate::exec::ExecError;
use crate::validate::ValidationError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Rejected request input; maps to 400 at the HTTP layer.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("timer listing is not valid JSON: {0}")]
    TimerJson(#[source] serde_json::Error),
}
