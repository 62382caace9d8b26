use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Null;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Boolean(pub bool);

impl Boolean {
    pub fn get(self) -> bool {
        self.0
    }
}

impl From<bool> for Boolean {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

/// Number kept in its lexical form
///
/// Values are never converted to a binary float, so whatever was written in the source is
/// what gets serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number(String);

impl Default for Number {
    fn default() -> Self {
        Self("0".to_string())
    }
}

impl Number {
    pub fn new(lexical: impl Into<String>) -> Self {
        Self(lexical.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer value of the leading integer in the lexical form.
    ///
    /// Anything after the integer (a fraction, an exponent, garbage) is dropped with a
    /// warning. Returns `None` when there is no leading integer or it overflows.
    pub fn to_i64(&self) -> Option<i64> {
        let text = self.0.trim_start();
        let sign_len = usize::from(text.starts_with(|c: char| c == '+' || c == '-'));
        let digits_len = text[sign_len..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len() - sign_len);
        if digits_len == 0 {
            return None;
        }

        let (integer, trailing) = text.split_at(sign_len + digits_len);
        let value = integer.parse::<i64>().ok()?;
        if !trailing.is_empty() {
            tracing::warn!(
                number = %self.0,
                "dropped trailing `{}` while converting number to integer",
                trailing
            );
        }
        Some(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Number {
    fn from(lexical: &str) -> Self {
        Self::new(lexical)
    }
}

impl From<String> for Number {
    fn from(lexical: String) -> Self {
        Self(lexical)
    }
}

macro_rules! number_from {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )+
    };
}

number_from!(i32, i64, u32, u64, usize, f64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Str(String);

impl Str {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Str {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Str {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Reference to a named type, resolved through the registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ref {
    symbol: String,
}

impl Ref {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}
