use crate::errors::Error;

/// Argument validation shared by the lifecycle entrypoints.
///
/// Pure checks only: nothing here touches storage, so every function can be
/// called before any state is read or written.
pub struct InputValidator;

impl InputValidator {
    /// Creation arguments: positive reference price and a non-empty window.
    pub fn validate_market_params(
        start_price: i128,
        start_block: u32,
        end_block: u32,
    ) -> Result<(), Error> {
        Self::validate_price(start_price)?;
        if end_block <= start_block {
            return Err(Error::InvalidParameter);
        }
        Ok(())
    }

    pub fn validate_price(price: i128) -> Result<(), Error> {
        if price <= 0 {
            return Err(Error::InvalidParameter);
        }
        Ok(())
    }

    /// Stakes below the configured minimum are rejected as an invalid
    /// prediction, independent of the caller's balance.
    pub fn validate_stake(stake: i128, minimum_stake: i128) -> Result<(), Error> {
        if stake <= 0 || stake < minimum_stake {
            return Err(Error::InvalidPrediction);
        }
        Ok(())
    }
}
