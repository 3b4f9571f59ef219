// src/config/validate.rs

use tracing::warn;

use crate::config::model::{RawRuleFile, RuleConfig};
use crate::errors::{Failure, Result, StubError};
use crate::stub::{Matcher, OneOf, Response};

impl TryFrom<RawRuleFile> for OneOf {
    type Error = StubError;

    fn try_from(raw: RawRuleFile) -> std::result::Result<Self, Self::Error> {
        ensure_has_rules(&raw)?;

        let mut matchers = Vec::with_capacity(raw.rule.len());
        for (index, rule) in raw.rule.iter().enumerate() {
            matchers.push(compile_rule(index, rule)?);
        }

        warn_unreachable(&matchers);
        Ok(OneOf::new(matchers))
    }
}

fn ensure_has_rules(raw: &RawRuleFile) -> Result<()> {
    if raw.rule.is_empty() {
        return Err(StubError::ConfigError(
            "rule file must contain at least one [[rule]] table".to_string(),
        ));
    }
    Ok(())
}

fn compile_rule(index: usize, rule: &RuleConfig) -> Result<Matcher> {
    match (&rule.exact, &rule.regex, rule.echo) {
        (Some(pattern), None, false) => Ok(Matcher::exact(pattern.clone(), response_for(rule))),
        (None, Some(pattern), false) => Matcher::regex(pattern, response_for(rule)),
        (None, None, true) => {
            if rule.output.is_some() || rule.start_error.is_some() || rule.wait_error.is_some() {
                return Err(StubError::ConfigError(format!(
                    "rule #{} is an echo rule and cannot set `output`, `start_error` or `wait_error`",
                    index + 1
                )));
            }
            Ok(Matcher::Echo)
        }
        (exact, regex, echo) => Err(StubError::ConfigError(format!(
            "rule #{} must set exactly one of `exact`, `regex` or `echo = true` (got {})",
            index + 1,
            exact.is_some() as usize + regex.is_some() as usize + echo as usize
        ))),
    }
}

fn response_for(rule: &RuleConfig) -> Response {
    let mut response = Response::with_output(rule.output.clone().unwrap_or_default());
    if let Some(msg) = &rule.start_error {
        response = response.start_err(Failure::msg(msg.clone()));
    }
    if let Some(msg) = &rule.wait_error {
        response = response.wait_err(Failure::msg(msg.clone()));
    }
    response
}

/// First-match-wins is kept as declared, but rules after a catch-all can
/// never fire; say so.
fn warn_unreachable(matchers: &[Matcher]) {
    if let Some(pos) = matchers.iter().position(|m| matches!(m, Matcher::Echo)) {
        for (index, shadowed) in matchers.iter().enumerate().skip(pos + 1) {
            warn!(
                rule = index + 1,
                shadowed_by = pos + 1,
                matcher = %shadowed.describe(),
                "rule is unreachable: an earlier echo rule matches every command"
            );
        }
    }
}
