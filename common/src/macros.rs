/// Target for events that are printed verbatim, without a level symbol.
pub const PRINT_TARGET: &str = "knock::print";

/// Target for events that report a completed operation.
pub const SUCCESS_TARGET: &str = "knock::success";

/// Prints a raw line through the installed subscriber.
#[macro_export]
macro_rules! kprint {
    () => {
        $crate::tracing::info!(target: "knock::print", "")
    };
    ($($arg:tt)+) => {
        $crate::tracing::info!(target: "knock::print", $($arg)+)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        $crate::tracing::info!(target: "knock::success", $($arg)+)
    };
}
