use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

#[cfg(feature = "backtrace")]
use std::backtrace::Backtrace;

pub type NeatResult<T> = Result<T, NeatError>;

/// Taxonomy used to separate programmer-fault conditions (fail fast, no
/// recovery attempted) from conditions a caller might reasonably want to
/// branch on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidConfig,
    InvalidParameter,
    Constraint,
    Selection,
    Trait,
    Innovation,
    Multiple,
    Context,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrString(Cow<'static, str>);

impl AsRef<str> for ErrString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ErrString {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T: Into<Cow<'static, str>>> From<T> for ErrString {
    fn from(v: T) -> Self {
        Self(v.into())
    }
}

/// Errors raised by the NEAT core. Most variants correspond to the
/// programmer-fault class described in the error handling design: they are
/// raised when a precondition the core relies on (a non-empty species, at
/// least one evaluated individual, matching trait types) does not hold, and
/// the core makes no attempt to recover from them.
#[derive(Debug)]
pub enum NeatError {
    InvalidConfig {
        message: ErrString,
    },
    InvalidParameter {
        message: ErrString,
    },
    /// A genome failed a structural constraint (`FailsConstraints`) in a
    /// context where the retry budget that normally absorbs this was
    /// already exhausted.
    Constraint {
        message: ErrString,
    },
    /// `GetIndividual`/`GetRandomIndividual` preconditions violated: an
    /// empty species, or no evaluated members to choose from.
    Selection {
        message: ErrString,
    },
    /// Trait type mismatch during mate/distance, or an empty categorical
    /// set during `InitTraits`.
    Trait {
        message: ErrString,
    },
    Innovation {
        message: ErrString,
    },

    Multiple(MultiDisplay),

    Context {
        context: ErrorContext,
        source: Box<NeatError>,
        #[cfg(feature = "backtrace")]
        backtrace: Backtrace,
    },
}

impl NeatError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            Self::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            Self::Constraint { .. } => ErrorCode::Constraint,
            Self::Selection { .. } => ErrorCode::Selection,
            Self::Trait { .. } => ErrorCode::Trait,
            Self::Innovation { .. } => ErrorCode::Innovation,
            Self::Multiple(_) => ErrorCode::Multiple,
            Self::Context { .. } => ErrorCode::Context,
        }
    }

    pub fn with_context(self, msg: impl Into<String>) -> Self {
        NeatError::Context {
            context: ErrorContext::new(msg),
            source: Box::new(self),
            #[cfg(feature = "backtrace")]
            backtrace: Backtrace::capture(),
        }
    }
}

impl Display for NeatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { message } => write!(f, "invalid configuration: {}", message),
            Self::InvalidParameter { message } => write!(f, "invalid parameter: {}", message),
            Self::Constraint { message } => write!(f, "constraint violated: {}", message),
            Self::Selection { message } => write!(f, "selection error: {}", message),
            Self::Trait { message } => write!(f, "trait error: {}", message),
            Self::Innovation { message } => write!(f, "innovation database error: {}", message),
            Self::Multiple(m) => write!(f, "multiple errors:\n{}", m),
            Self::Context {
                context, source, ..
            } => write!(f, "{}\ncaused by: {}", context, source),
        }
    }
}

impl std::error::Error for NeatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Context { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ErrorContext {
    message: String,
}

impl ErrorContext {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ErrorContext {}

#[derive(Debug)]
pub struct MultiDisplay(Vec<NeatError>);

impl Display for MultiDisplay {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[{}] {} (code: {:?})", i, e, e.code())?;
        }
        Ok(())
    }
}

impl From<Vec<NeatError>> for MultiDisplay {
    fn from(v: Vec<NeatError>) -> Self {
        Self(v)
    }
}

pub trait ResultExt<T> {
    fn context(self, msg: impl Into<String>) -> NeatResult<T>;
    fn with_context<F: FnOnce() -> String>(self, f: F) -> NeatResult<T>;
}

impl<T, E: Into<NeatError>> ResultExt<T> for Result<T, E> {
    fn context(self, msg: impl Into<String>) -> NeatResult<T> {
        self.map_err(|e| e.into().with_context(msg))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> NeatResult<T> {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[doc(hidden)]
pub mod __private {
    #[inline]
    #[cold]
    #[must_use]
    pub fn must_use<E>(e: E) -> E {
        e
    }
}

#[macro_export]
macro_rules! neat_err {
    (InvalidConfig: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::NeatError::InvalidConfig { message: format!($fmt, $($arg),*).into() })
    };
    (InvalidParameter: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::NeatError::InvalidParameter { message: format!($fmt, $($arg),*).into() })
    };
    (Constraint: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::NeatError::Constraint { message: format!($fmt, $($arg),*).into() })
    };
    (Selection: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::NeatError::Selection { message: format!($fmt, $($arg),*).into() })
    };
    (Trait: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::NeatError::Trait { message: format!($fmt, $($arg),*).into() })
    };
    (Innovation: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::NeatError::Innovation { message: format!($fmt, $($arg),*).into() })
    };
}

#[macro_export]
macro_rules! neat_bail {
    ($($tt:tt)+) => { return Err($crate::neat_err!($($tt)+)) };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($tt:tt)+) => {
        if !$cond { $crate::neat_bail!($($tt)+); }
    };
}
