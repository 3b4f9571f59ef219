#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

/// Builder for TOML rule files, written to a temp file on `build`.
pub struct RuleFileBuilder {
    body: String,
}

impl RuleFileBuilder {
    pub fn new() -> Self {
        Self { body: String::new() }
    }

    pub fn exact(self, pattern: &str, output: &str) -> Self {
        self.rule(&[("exact", pattern), ("output", output)])
    }

    pub fn regex(self, pattern: &str, output: &str) -> Self {
        self.rule(&[("regex", pattern), ("output", output)])
    }

    pub fn exact_start_error(self, pattern: &str, message: &str) -> Self {
        self.rule(&[("exact", pattern), ("start_error", message)])
    }

    pub fn exact_wait_error(self, pattern: &str, message: &str) -> Self {
        self.rule(&[("exact", pattern), ("wait_error", message)])
    }

    pub fn echo(mut self) -> Self {
        self.body.push_str("[[rule]]\necho = true\n\n");
        self
    }

    /// Append a `[[rule]]` table with the given string keys.
    pub fn rule(mut self, fields: &[(&str, &str)]) -> Self {
        self.body.push_str("[[rule]]\n");
        for (key, value) in fields {
            self.body.push_str(&format!("{key} = '{value}'\n"));
        }
        self.body.push('\n');
        self
    }

    pub fn contents(&self) -> &str {
        &self.body
    }

    pub fn build(self) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("creating temp rule file");
        file.write_all(self.body.as_bytes())
            .expect("writing temp rule file");
        file
    }
}

impl Default for RuleFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
