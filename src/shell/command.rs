// src/shell/command.rs

//! Command representation and canonical command lines.

use std::fmt;

use super::{Invocation, Target};

/// A program name plus its ordered arguments.
///
/// Commands are plain data; attach a [`Target`] with [`Command::on`] to
/// actually start one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The single-line rendering used as the matching key.
    pub fn canonical_line(&self) -> String {
        canonicalize(&self.name, &self.args)
    }

    /// Bind this command to the target that will run it.
    pub fn on<'t>(self, target: &'t dyn Target) -> Invocation<'t> {
        Invocation::new(self, target)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_line())
    }
}

/// Render `name` followed by `args` as one line, the way it would be typed
/// at a shell prompt.
///
/// Arguments containing whitespace (and empty arguments) are wrapped in
/// double quotes. Nothing is escaped inside the quotes.
pub fn canonicalize<S: AsRef<str>>(name: &str, args: &[S]) -> String {
    let mut line = String::from(name);
    for arg in args {
        let arg = arg.as_ref();
        line.push(' ');
        if needs_quotes(arg) {
            line.push('"');
            line.push_str(arg);
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }
    line
}

fn needs_quotes(arg: &str) -> bool {
    arg.is_empty() || arg.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_args_are_space_separated() {
        let cmd = Command::new("git").args(["rev-parse", "--abbrev-ref", "HEAD"]);
        assert_eq!(cmd.canonical_line(), "git rev-parse --abbrev-ref HEAD");
    }

    #[test]
    fn args_with_spaces_are_quoted() {
        let cmd = Command::new("echo").arg("Hello from the shell");
        assert_eq!(cmd.canonical_line(), r#"echo "Hello from the shell""#);
        assert_eq!(cmd.to_string(), cmd.canonical_line());
    }

    #[test]
    fn tabs_and_empty_args_are_quoted() {
        assert_eq!(canonicalize("printf", &["a\tb", ""]), "printf \"a\tb\" \"\"");
    }

    #[test]
    fn no_args_is_just_the_name() {
        assert_eq!(canonicalize::<&str>("true", &[]), "true");
    }

    #[test]
    fn grouping_is_visible_in_the_line() {
        let joined = canonicalize("echo", &["a b"]);
        let split = canonicalize("echo", &["a", "b"]);
        assert_ne!(joined, split);
    }
}
