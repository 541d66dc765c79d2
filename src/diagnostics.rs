// This file is part of the azurerm-frontdoor project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{borrow::Cow, fmt::Display};

use crate::{attribute_path::AttributePath, ids::IdError, translate::TranslateError};

/// List of Errors and Warnings to send back to Terraform
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Diagnostics {
    /// List of errors
    pub errors: Vec<Diagnostic>,
    /// List of warnings
    pub warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Add an error diagnostic
    pub fn add_error(&mut self, diag: Diagnostic) {
        self.errors.push(diag)
    }
    /// Add a warning diagnostic
    pub fn add_warning(&mut self, diag: Diagnostic) {
        self.warnings.push(diag)
    }
    /// Add an error
    pub fn error<S: Into<Cow<'static, str>>, D: Into<Cow<'static, str>>>(
        &mut self,
        summary: S,
        detail: D,
        attribute: AttributePath,
    ) {
        self.add_error(Diagnostic::new(summary, detail, attribute))
    }
    /// Add an error without AttributePath
    pub fn root_error<S: Into<Cow<'static, str>>, D: Into<Cow<'static, str>>>(
        &mut self,
        summary: S,
        detail: D,
    ) {
        self.add_error(Diagnostic::root(summary, detail))
    }
    /// Add an error without details
    pub fn error_short<S: Into<Cow<'static, str>>>(
        &mut self,
        summary: S,
        attribute: AttributePath,
    ) {
        self.add_error(Diagnostic::short(summary, attribute))
    }
    /// Add an error without AttributePath nor details
    pub fn root_error_short<S: Into<Cow<'static, str>>>(&mut self, summary: S) {
        self.add_error(Diagnostic::root_short(summary))
    }

    /// Add a warning
    pub fn warning<S: Into<Cow<'static, str>>, D: Into<Cow<'static, str>>>(
        &mut self,
        summary: S,
        detail: D,
        attribute: AttributePath,
    ) {
        self.add_warning(Diagnostic::new(summary, detail, attribute))
    }
    /// Add a warning without details
    pub fn warning_short<S: Into<Cow<'static, str>>>(
        &mut self,
        summary: S,
        attribute: AttributePath,
    ) {
        self.add_warning(Diagnostic::short(summary, attribute))
    }
    /// Add all the diagnostics of `diags`
    pub fn add_diagnostics(&mut self, mut diags: Diagnostics) {
        self.errors.append(&mut diags.errors);
        self.warnings.append(&mut diags.warnings);
    }

    /// Check if any error has been recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Prefix every summary with the operation and the resource being processed
    ///
    /// ```
    /// # use azurerm_frontdoor::{AttributePath, Diagnostics};
    /// let mut diags = Diagnostics::default();
    /// diags.error_short("`name` cannot be empty", AttributePath::new("name"));
    /// let diags = diags.prefixed("create", "azurerm_frontdoor.example");
    /// assert_eq!(
    ///     diags.errors[0].summary,
    ///     "create azurerm_frontdoor.example: `name` cannot be empty"
    /// );
    /// ```
    pub fn prefixed(self, operation: impl Display, resource: impl Display) -> Self {
        let prefix = |diag: Diagnostic| Diagnostic {
            summary: format!("{} {}: {}", operation, resource, diag.summary).into(),
            ..diag
        };
        Self {
            errors: self.errors.into_iter().map(prefix).collect(),
            warnings: self.warnings.into_iter().map(prefix).collect(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Diagnostic {
    pub summary: Cow<'static, str>,
    pub detail: Cow<'static, str>,
    pub attribute: AttributePath,
}

/// Diagnostic
impl Diagnostic {
    /// Create a diagnostic
    pub fn new<S: Into<Cow<'static, str>>, D: Into<Cow<'static, str>>>(
        summary: S,
        detail: D,
        attribute: AttributePath,
    ) -> Self {
        Self {
            summary: summary.into(),
            detail: detail.into(),
            attribute,
        }
    }
    /// Create a diagnostic without AttributePath
    pub fn root<S: Into<Cow<'static, str>>, D: Into<Cow<'static, str>>>(
        summary: S,
        detail: D,
    ) -> Self {
        Self::new(summary, detail, Default::default())
    }
    /// Create a diagnostic without details
    pub fn short<S: Into<Cow<'static, str>>>(summary: S, attribute: AttributePath) -> Self {
        Self::new(summary, String::default(), attribute)
    }
    /// Create a diagnostic AttributePath nor details
    pub fn root_short<S: Into<Cow<'static, str>>>(summary: S) -> Self {
        Self::new(summary, String::default(), Default::default())
    }
}

impl From<TranslateError> for Diagnostic {
    fn from(err: TranslateError) -> Self {
        let attribute = err.path().cloned().unwrap_or_default();
        Self::new(err.title(), err.to_string(), attribute)
    }
}

impl From<IdError> for Diagnostic {
    fn from(err: IdError) -> Self {
        Self::root("Invalid resource id", err.to_string())
    }
}

impl From<TranslateError> for Diagnostics {
    fn from(err: TranslateError) -> Self {
        let mut diags = Diagnostics::default();
        diags.add_error(err.into());
        diags
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.attribute.is_root() {
            f.write_str(&self.summary)?;
        } else {
            write!(f, "{}: {}", self.attribute, self.summary)?;
        }
        if !self.detail.is_empty() {
            write!(f, " ({})", self.detail)?;
        }
        Ok(())
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut sep = "";
        for diag in &self.errors {
            write!(f, "{}error: {}", sep, diag)?;
            sep = "\n";
        }
        for diag in &self.warnings {
            write!(f, "{}warning: {}", sep, diag)?;
            sep = "\n";
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_errors_keep_their_path() {
        let path = AttributePath::new("routing_rule").index(0).attribute("accepted_protocols");
        let diag = Diagnostic::from(TranslateError::InvalidEnumValue {
            path: path.clone(),
            value: "Ftp".to_owned(),
            expected: &["Http", "Https"],
        });
        assert_eq!(diag.attribute, path);
        assert!(diag.detail.contains("Ftp"));
    }

    #[test]
    fn display_lists_errors_before_warnings() {
        let mut diags = Diagnostics::default();
        diags.warning_short("deprecated", AttributePath::new("a"));
        diags.root_error("broken", "details");
        assert_eq!(
            diags.to_string(),
            "error: broken (details)\nwarning: a: deprecated"
        );
        assert!(diags.has_errors());
    }

    #[test]
    fn prefix_applies_to_warnings() {
        let mut diags = Diagnostics::default();
        diags.warning_short("deprecated", AttributePath::new("a"));
        let diags = diags.prefixed("read", "fd");
        assert_eq!(diags.warnings[0].summary, "read fd: deprecated");
        assert!(!diags.has_errors());
    }
}
