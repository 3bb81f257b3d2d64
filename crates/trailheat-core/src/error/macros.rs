//! Error macros for trailheat

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::TrailheatError::invalid_value(
            $context, $value,
        ))
    };
}

/// Macro for creating usage errors
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::TrailheatError::UsageError($msg.to_string()))
    };
}
