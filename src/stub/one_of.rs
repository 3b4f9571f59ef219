// src/stub/one_of.rs

use tracing::{debug, trace};

use crate::shell::Command;

use super::matcher::Matcher;
use super::response::Response;

/// An ordered list of rules; the first rule that matches wins.
///
/// There is no specificity ranking. A broad rule declared early shadows any
/// narrower rule after it, so put exact rules first and `Echo` last.
#[derive(Debug, Clone, Default)]
pub struct OneOf {
    matchers: Vec<Matcher>,
}

impl OneOf {
    pub fn new(matchers: Vec<Matcher>) -> Self {
        Self { matchers }
    }

    /// Append a rule after the existing ones.
    pub fn push(mut self, matcher: Matcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Find the response for `cmd`, or `None` if no rule matches.
    pub fn resolve(&self, cmd: &Command) -> Option<Response> {
        let line = cmd.canonical_line();
        for (index, matcher) in self.matchers.iter().enumerate() {
            trace!(command = %line, index, rule = %matcher.describe(), "trying rule");
            if let Some(response) = matcher.match_line(cmd, &line) {
                debug!(command = %line, index, rule = %matcher.describe(), "rule matched");
                return Some(response);
            }
        }
        debug!(command = %line, rules = self.matchers.len(), "no rule matched");
        None
    }
}

/// Build a dispatcher from rules in declaration order.
pub fn one_of<I>(matchers: I) -> OneOf
where
    I: IntoIterator<Item = Matcher>,
{
    OneOf::new(matchers.into_iter().collect())
}

impl FromIterator<Matcher> for OneOf {
    fn from_iter<I: IntoIterator<Item = Matcher>>(iter: I) -> Self {
        one_of(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::command;
    use crate::stub::matcher::{echo, regex, respond_to};

    #[test]
    fn first_match_wins_even_when_a_later_rule_is_more_specific() {
        let rules = one_of([
            regex("Hello", "from regex").unwrap(),
            respond_to("echo Hello", "from exact"),
        ]);
        let r = rules.resolve(&command("echo", ["Hello"])).unwrap();
        assert_eq!(r.output, "from regex");
    }

    #[test]
    fn falls_through_to_echo() {
        let rules = one_of([respond_to("echo Hello", "Hi there"), echo()]);
        assert_eq!(rules.resolve(&command("echo", ["Hello"])).unwrap().output, "Hi there");
        assert_eq!(rules.resolve(&command("echo", ["Bye"])).unwrap().output, "Bye");
    }

    #[test]
    fn no_match_without_fallback() {
        let rules = OneOf::default().push(respond_to("echo Hello", "Hi"));
        assert!(rules.resolve(&command("echo", ["Bye"])).is_none());
        assert!(OneOf::default().resolve(&command("true", Vec::<String>::new())).is_none());
    }
}
