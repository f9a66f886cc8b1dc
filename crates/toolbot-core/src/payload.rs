//! Well-known payload constants.

/// Payload delivered when a user taps the Get Started button.
///
/// The framework's `on_get_started` registrant matches against exactly this
/// value.
pub const GET_STARTED: &str = "__GET_STARTED__";
