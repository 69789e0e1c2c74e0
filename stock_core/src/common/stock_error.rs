use strum_macros::{Display, EnumString};

/// Error codes for the indicator core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    // Argument errors (0-99)
    #[strum(serialize = "_ARG_ERR_BEGIN")]
    ArgErrBegin = 0,
    #[strum(serialize = "INVALID_ARGUMENT")]
    InvalidArgument = 2,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 3,
    #[strum(serialize = "CONFIG_NOT_FOUND")]
    ConfigNotFound = 4,
    #[strum(serialize = "_ARG_ERR_END")]
    ArgErrEnd = 99,

    // Source data errors (200-299)
    #[strum(serialize = "_DATA_ERR_BEGIN")]
    DataErrBegin = 200,
    #[strum(serialize = "SRC_DATA_NOT_FOUND")]
    SrcDataNotFound = 201,
    #[strum(serialize = "SRC_DATA_FORMAT_ERROR")]
    SrcDataFormatError = 202,
    #[strum(serialize = "_DATA_ERR_END")]
    DataErrEnd = 299,
}

impl ErrCode {
    pub fn is_data_err(&self) -> bool {
        let code = *self as i32;
        code > Self::DataErrBegin as i32 && code < Self::DataErrEnd as i32
    }

    pub fn is_arg_err(&self) -> bool {
        let code = *self as i32;
        code > Self::ArgErrBegin as i32 && code < Self::ArgErrEnd as i32
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{errcode}: {msg}")]
pub struct StockError {
    pub errcode: ErrCode,
    pub msg: String,
}

impl StockError {
    pub fn new(message: impl Into<String>, code: ErrCode) -> Self {
        Self {
            errcode: code,
            msg: message.into(),
        }
    }

    pub fn is_data_err(&self) -> bool {
        self.errcode.is_data_err()
    }

    pub fn is_arg_err(&self) -> bool {
        self.errcode.is_arg_err()
    }
}

/// Reject a zero-length indicator window.
pub fn check_period(period: usize, name: &str) -> Result<(), StockError> {
    if period == 0 {
        return Err(StockError::new(
            format!("{} must be a positive integer, got 0", name),
            ErrCode::InvalidArgument,
        ));
    }
    Ok(())
}
