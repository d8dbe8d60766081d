use std::fmt;

/// Ordered argument list for one CLI call.
///
/// ```ignore
/// let inv = Invocation::new(["ledger", "latest"])
///     .flag("--network", "testnet")
///     .flag("--output", "json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    args: Vec<String>,
}

impl Invocation {
    /// Start an invocation with its subcommand path (e.g. `["contract", "invoke"]`).
    pub fn new<I, S>(subcommand: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: subcommand.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a bare argument.
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Append a `name value` pair.
    pub fn flag(mut self, name: &str, value: impl Into<String>) -> Self {
        self.args.push(name.to_string());
        self.args.push(value.into());
        self
    }

    /// Append several arguments at once.
    pub fn extend<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Value following the first occurrence of `name`, if any.
    pub fn flag_value(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == name)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args.join(" "))
    }
}
