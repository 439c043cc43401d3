#[doc(hidden)]
#[macro_export]
macro_rules! raygun_debug {
    ($client:expr, $($arg:tt)*) => {
        if $client.options().debug {
            eprint!("[raygun] ");
            eprintln!($($arg)*);
        }
    };
}
