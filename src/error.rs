use std::error::Error as StdError;
use std::fmt;
use std::io;

use rusoto_core::RusotoError;

#[derive(Debug)]
pub struct StringError(String);
impl fmt::Display for StringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl StdError for StringError {}
impl From<String> for StringError {
    fn from(s: String) -> StringError {
        StringError(s)
    }
}

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Csv(csv::Error),
    Rusoto(RusotoError<StringError>),
    MissingVar(&'static str),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVar(var) => write!(f, "required variable {} is not set", var),
            Self::Io(e) => write!(f, "{}", e),
            Self::Csv(e) => write!(f, "{}", e),
            Self::Rusoto(e) => write!(f, "{}", e),
        }
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            &Self::Io(ref e) => Some(e),
            &Self::Csv(ref e) => Some(e),
            &Self::Rusoto(ref e) => Some(e),
            &Self::MissingVar(_) => None,
        }
    }
}
impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}
impl<E> From<RusotoError<E>> for Error
where
    E: fmt::Display,
{
    fn from(e: RusotoError<E>) -> Self {
        // Collapse the per-operation service error types into one string-typed
        // variant so one enum covers every S3 call.
        Self::Rusoto(match e {
            RusotoError::Service(e) => RusotoError::Service(format!("{}", e).into()),
            RusotoError::HttpDispatch(e) => RusotoError::HttpDispatch(e),
            RusotoError::Credentials(e) => RusotoError::Credentials(e),
            RusotoError::Validation(e) => RusotoError::Validation(e),
            RusotoError::ParseError(e) => RusotoError::ParseError(e),
            RusotoError::Unknown(e) => RusotoError::Unknown(e),
        })
    }
}
