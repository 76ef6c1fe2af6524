use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! config_error {
    ($msg:expr) => {
        crate::Error::Configuration {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Configuration {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Input Errors
/// - [`Error::Malformed`] - A model document or an explicit list entry has an invalid shape
/// - [`Error::Configuration`] - The policy document is invalid (bad mode, bad rename, unknown keys)
/// - [`Error::Json`] - A model document could not be (de)serialized
/// - [`Error::FileError`] - Filesystem I/O errors
///
/// ## Resolution Errors
/// - [`Error::TypeNotFound`] - A type reference could not be resolved
/// - [`Error::AssemblyNotFound`] - An input or referenced assembly is not in any search root
/// - [`Error::FrameworkNotFound`] - No installed shared framework satisfies the requested version
/// - [`Error::RecursionLimit`] - A base-type chain exceeded the walk limit
///
/// # Examples
///
/// ```rust,no_run
/// use dotprune::{config::Configuration, Error};
/// use std::path::Path;
///
/// match Configuration::from_file(Path::new("config.json")) {
///     Ok(config) => println!("{} assemblies configured", config.assemblies.len()),
///     Err(Error::Configuration { message, .. }) => eprintln!("Invalid policy: {}", message),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// An input could not be interpreted.
    ///
    /// Raised for malformed model documents and for explicit list entries that cannot
    /// be split into a type and a member name. The error includes the source location
    /// where the malformation was detected.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The policy document is invalid.
    ///
    /// Detected when the configuration is loaded, before any assembly is touched.
    #[error("Configuration - {file}:{line}: {message}")]
    Configuration {
        /// Description of the invalid setting
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// A model document failed to (de)serialize.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),

    /// A type reference could not be resolved.
    ///
    /// Resolution failures are not recovered from; the assembly being processed is aborted.
    #[error("Failed to resolve type - {0}")]
    TypeNotFound(String),

    /// An assembly could not be located in any search root.
    #[error("Failed to locate assembly - {0}")]
    AssemblyNotFound(String),

    /// The requested runtime shared framework is not installed.
    #[error("Framework {framework} {version} is not installed")]
    FrameworkNotFound {
        /// Shared framework family, e.g. `Microsoft.NETCore.App`
        framework: String,
        /// The requested version
        version: String,
    },

    /// Recursion limit reached.
    ///
    /// The associated value shows the recursion limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// Failed to lock target.
    #[error("Failed to lock target")]
    LockError,
}
