//! Command definitions
//!
//! A command is a name plus an ordered list of typed arguments.

use std::fmt;

/// A single typed command argument
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Signed decimal integer
    Integer(i64),

    /// Float formatted at 32-bit precision
    Float32(f32),

    /// Float formatted at 64-bit precision
    Float64(f64),

    /// Text, quoted on the wire when it contains whitespace
    Text(String),
}

impl Argument {
    /// Build an argument from a command-line word.
    ///
    /// Words that parse as `i64` become integers, words with a `.` that parse
    /// as `f64` become floats, everything else stays text.
    pub fn infer(word: &str) -> Self {
        if let Ok(n) = word.parse::<i64>() {
            return Argument::Integer(n);
        }
        if word.contains('.') {
            if let Ok(f) = word.parse::<f64>() {
                if f.is_finite() {
                    return Argument::Float64(f);
                }
            }
        }
        Argument::Text(word.to_string())
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Integer(n) => write!(f, "{}", n),
            Argument::Float32(v) => write!(f, "{}", v),
            Argument::Float64(v) => write!(f, "{}", v),
            Argument::Text(s) => write!(f, "{:?}", s),
        }
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Argument {
                fn from(n: $t) -> Self {
                    Argument::Integer(i64::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Argument {
    fn from(v: f32) -> Self {
        Argument::Float32(v)
    }
}

impl From<f64> for Argument {
    fn from(v: f64) -> Self {
        Argument::Float64(v)
    }
}

impl From<&str> for Argument {
    fn from(s: &str) -> Self {
        Argument::Text(s.to_string())
    }
}

impl From<String> for Argument {
    fn from(s: String) -> Self {
        Argument::Text(s)
    }
}

impl From<&String> for Argument {
    fn from(s: &String) -> Self {
        Argument::Text(s.clone())
    }
}

/// A command ready to be encoded
///
/// Built once, then only read. No validation of the name is done here.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: String,
    args: Vec<Argument>,
}

impl Command {
    /// Create a command with no arguments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Create a command from a name and any iterable of arguments
    pub fn with_args<I, A>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Argument>,
    {
        Self::new(name).args(args)
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<Argument>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments, keeping their order
    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Argument>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.args
    }
}
