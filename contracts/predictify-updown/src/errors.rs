use soroban_sdk::contracterror;

/// Error codes for the Predictify up/down settlement contract.
///
/// Every public entrypoint returns `Result<T, Error>`. A returned error aborts
/// the whole invocation, so no partial state survives a rejected call.
///
/// # Error Categories
///
/// **User Operation Errors (100-199):**
/// - Authorization failures for privileged calls
/// - Unknown markets or positions
/// - Entry window, resolution and claim state violations
///
/// **Validation Errors (300-399):**
/// - Malformed creation, resolution or governance arguments
///
/// **System Errors (400-499):**
/// - Missing or duplicated initialization
/// - Arithmetic and reentrancy protection
///
/// # Example Usage
///
/// ```rust
/// # use predictify_updown::errors::Error;
/// let error = Error::MarketClosed;
/// assert_eq!(error.code(), "MARKET_CLOSED");
/// assert_eq!(error as u32, 103);
/// ```
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ===== USER OPERATION ERRORS =====
    /// Caller is not the owner or oracle required by the operation
    Unauthorized = 100,
    /// Market or position does not exist
    NotFound = 101,
    /// Stake below minimum, side switch, or claim from the losing side
    InvalidPrediction = 102,
    /// Outside the entry window, already resolved, or not yet resolvable
    MarketClosed = 103,
    /// Position has already been paid out
    AlreadyClaimed = 104,
    /// Caller or treasury balance cannot cover the amount
    InsufficientBalance = 105,

    // ===== VALIDATION ERRORS =====
    /// Malformed price, block range, stake limit or fee rate
    InvalidParameter = 300,

    // ===== SYSTEM ERRORS =====
    /// Contract has not been initialized
    NotInitialized = 400,
    /// Contract has already been initialized
    AlreadyInitialized = 401,
    /// Checked arithmetic overflowed
    ArithmeticOverflow = 402,
    /// An outbound transfer is already in flight
    ReentrancyGuardActive = 403,
}

impl Error {
    /// Human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            Error::Unauthorized => "Caller is not authorized to perform this action",
            Error::NotFound => "Market or position not found",
            Error::InvalidPrediction => "Invalid prediction",
            Error::MarketClosed => "Market is closed for this operation",
            Error::AlreadyClaimed => "Winnings have already been claimed",
            Error::InsufficientBalance => "Insufficient balance",
            Error::InvalidParameter => "Invalid parameter",
            Error::NotInitialized => "Contract is not initialized",
            Error::AlreadyInitialized => "Contract is already initialized",
            Error::ArithmeticOverflow => "Arithmetic overflow",
            Error::ReentrancyGuardActive => "Reentrancy guard is active",
        }
    }

    /// Standardized UPPER_SNAKE_CASE identifier, for structured logs and clients.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Unauthorized => "UNAUTHORIZED",
            Error::NotFound => "NOT_FOUND",
            Error::InvalidPrediction => "INVALID_PREDICTION",
            Error::MarketClosed => "MARKET_CLOSED",
            Error::AlreadyClaimed => "ALREADY_CLAIMED",
            Error::InsufficientBalance => "INSUFFICIENT_BALANCE",
            Error::InvalidParameter => "INVALID_PARAMETER",
            Error::NotInitialized => "NOT_INITIALIZED",
            Error::AlreadyInitialized => "ALREADY_INITIALIZED",
            Error::ArithmeticOverflow => "ARITHMETIC_OVERFLOW",
            Error::ReentrancyGuardActive => "REENTRANCY_GUARD_ACTIVE",
        }
    }
}
