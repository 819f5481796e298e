///
/// Runtime error types.
///
/// Every fallible operation in the knox runtime crates returns `KnoxError`:
/// allocation exhaustion, rejected numeric ranges, strings that cannot cross
/// the C boundary and configuration problems.
///

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KnoxError {
    #[error("Failed to allocate {requested} bytes")]
    AllocationFailed { requested: usize },

    #[error("Invalid range [{min}, {max}]")]
    InvalidRange { min: String, max: String },

    #[error("Interior NUL byte at position {position}")]
    InteriorNul { position: usize },

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl KnoxError {
    pub fn invalid_range<T: std::fmt::Display>(min: T, max: T) -> Self {
        KnoxError::InvalidRange {
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KnoxError>;

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_error_display_messages() {
        let err = KnoxError::AllocationFailed { requested: 1024 };
        assert_snapshot!(err.to_string(), @"Failed to allocate 1024 bytes");

        let err = KnoxError::invalid_range(10, 2);
        assert_snapshot!(err.to_string(), @"Invalid range [10, 2]");

        let err = KnoxError::invalid_range(f64::NAN, 1.5);
        assert_snapshot!(err.to_string(), @"Invalid range [NaN, 1.5]");

        let err = KnoxError::InteriorNul { position: 3 };
        assert_snapshot!(err.to_string(), @"Interior NUL byte at position 3");

        let err = KnoxError::Config {
            reason: "KNOX_SEED is not a number".to_string(),
        };
        assert!(err.to_string().contains("Invalid configuration"));
        assert!(err.to_string().contains("KNOX_SEED"));
    }

    #[test]
    fn test_io_error_converts() {
        fn open_missing() -> Result<()> {
            std::fs::File::open("/definitely/not/here/knox.toml")?;
            Ok(())
        }
        assert!(matches!(open_missing(), Err(KnoxError::Io(_))));
    }
}
