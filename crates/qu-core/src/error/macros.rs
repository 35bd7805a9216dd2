//! Error macros for qu

/// Return an invalid value error
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr $(,)?) => {
        return Err($crate::error::QuError::invalid_value($context, $value))
    };
}

/// Return a usage error
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::QuError::UsageError($msg.to_string()))
    };
}

/// Map an IO error onto a path-qualified failure
#[macro_export]
macro_rules! map_io_err {
    ($op:expr, $path:expr) => {
        |e| $crate::error::QuError::io_operation($op, $path.display(), e)
    };
}
