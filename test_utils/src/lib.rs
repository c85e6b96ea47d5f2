/* Numeric checks used when validating solver output against a test case */
use failure::Fail;
use log::trace;

#[derive(Debug, Fail, PartialEq)]
pub enum ToleranceError {
    #[fail(display = "cannot take a percent difference from an expected value of zero (result was {})", _0)]
    ZeroExpected(f64),
}

/// Signed percent difference of `result` from `expected`; negative when
/// `result` is below `expected`
pub fn percent_diff(result: f64, expected: f64) -> Result<f64, ToleranceError> {
    if expected == 0.0 {
        return Err(ToleranceError::ZeroExpected(result));
    }

    let diff = (result - expected) / expected * 100.0;
    trace!("{} vs expected {}: {:.4}%", result, expected, diff);

    Ok(diff)
}

/// Check that `result` is within `tolerance` percent of `expected`.
/// The edge is inclusive, so a difference of exactly `tolerance` passes.
pub fn validate_near(result: f64, expected: f64, tolerance: f64) -> Result<bool, ToleranceError> {
    let diff = percent_diff(result, expected)?;

    // NaN never compares as within tolerance
    Ok(diff.abs() <= tolerance)
}
