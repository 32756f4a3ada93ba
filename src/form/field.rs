//! Field descriptors and form schemas.
//!
//! # Responsibilities
//! - Describe how one form value maps onto one struct field
//! - Validate the raw value against an optional regex before coercion
//! - Bind every described field in declaration order
//!
//! # Design Decisions
//! - Descriptors are plain values built once per type and shared as statics
//! - Setters are closures over field accessors, so a typo is a compile error
//! - Patterns are compiled when the descriptor is built, never per request
//! - Binding stops at the first failing field; earlier fields stay assigned

use regex::Regex;
use std::fmt;
use thiserror::Error;

use crate::form::scan::{FromFormValue, ScanError};
use crate::form::values::FormValues;

/// Errors raised while binding form values onto a struct.
#[derive(Debug, Error, Clone)]
pub enum BindError {
    /// The field's validation pattern is not a valid regex.
    #[error("invalid validation pattern for field {field:?}: {source}")]
    Pattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },

    /// The value did not match the field's pattern. Displays the configured message.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The value could not be converted to the field's type.
    #[error("{source}")]
    Scan {
        field: &'static str,
        #[source]
        source: ScanError,
    },
}

impl BindError {
    /// Form name of the field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            BindError::Pattern { field, .. }
            | BindError::Validation { field, .. }
            | BindError::Scan { field, .. } => field,
        }
    }
}

/// A validation pattern and the message reported when it does not match.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: String,
    compiled: Result<Regex, regex::Error>,
    message: String,
}

impl Rule {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let compiled = Regex::new(&pattern);
        Self {
            pattern,
            compiled,
            message: String::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check `value` against the pattern (unanchored search).
    pub fn check(&self, field: &'static str, value: &str) -> Result<(), BindError> {
        let regex = self
            .compiled
            .as_ref()
            .map_err(|source| BindError::Pattern {
                field,
                source: source.clone(),
            })?;

        if regex.is_match(value) {
            Ok(())
        } else {
            Err(BindError::Validation {
                field,
                message: self.message.clone(),
            })
        }
    }
}

type Setter<T> = Box<dyn Fn(&mut T, &str) -> Result<(), ScanError> + Send + Sync>;

/// Describes one bound field: form name, optional rule, and how to assign it.
pub struct Field<T> {
    name: &'static str,
    rule: Option<Rule>,
    message: Option<String>,
    setter: Setter<T>,
}

impl<T> Field<T> {
    /// Bind the form value `name` into the field returned by `accessor`.
    pub fn new<V, F>(name: &'static str, accessor: F) -> Self
    where
        V: FromFormValue,
        F: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        Self {
            name,
            rule: None,
            message: None,
            setter: Box::new(move |target, raw| {
                *accessor(target) = V::from_form_value(raw)?;
                Ok(())
            }),
        }
    }

    /// Require the raw value to match `pattern`. An empty pattern disables validation.
    pub fn valid(mut self, pattern: &str) -> Self {
        self.rule = if pattern.is_empty() {
            None
        } else {
            let rule = Rule::new(pattern);
            Some(match &self.message {
                Some(message) => rule.with_message(message.clone()),
                None => rule,
            })
        };
        self
    }

    /// Message reported when the pattern does not match.
    pub fn msg(mut self, message: &str) -> Self {
        self.rule = self.rule.map(|rule| rule.with_message(message));
        self.message = Some(message.to_string());
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rule(&self) -> Option<&Rule> {
        self.rule.as_ref()
    }

    /// Validate `raw` and assign it to `target`.
    pub fn bind(&self, target: &mut T, raw: &str) -> Result<(), BindError> {
        if let Some(rule) = &self.rule {
            rule.check(self.name, raw)?;
        }
        (self.setter)(target, raw).map_err(|source| BindError::Scan {
            field: self.name,
            source,
        })
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("rule", &self.rule)
            .finish_non_exhaustive()
    }
}

/// Ordered descriptor list for one bindable type.
pub struct FormSchema<T> {
    fields: Vec<Field<T>>,
}

impl<T> FormSchema<T> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn with(mut self, field: Field<T>) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    /// Bind `values` into `target`, field by field, stopping at the first error.
    pub fn bind(&self, target: &mut T, values: &FormValues) -> Result<(), BindError> {
        for field in &self.fields {
            let raw = values.value(field.name);
            if let Err(err) = field.bind(target, raw) {
                tracing::debug!(field = field.name, error = %err, "Form field rejected");
                return Err(err);
            }
        }
        Ok(())
    }
}

impl<T> Default for FormSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FormSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

/// Types that can be populated from submitted form values.
///
/// Implement by hand with a `OnceLock`-backed schema, or declare with
/// [`bind_form!`](crate::bind_form).
pub trait BindForm: Sized + 'static {
    fn schema() -> &'static FormSchema<Self>;

    /// Bind `values` into `self` in place.
    fn bind_from(&mut self, values: &FormValues) -> Result<(), BindError> {
        Self::schema().bind(self, values)
    }
}

/// Declare a [`BindForm`] impl from a field list.
///
/// ```
/// #[derive(Default)]
/// struct Login {
///     user: String,
///     remember: bool,
/// }
///
/// zen::bind_form! {
///     Login {
///         user => "username", valid = r"^\w{3,}$", msg = "username too short";
///         remember => "remember";
///     }
/// }
/// ```
#[macro_export]
macro_rules! bind_form {
    ($ty:ty {
        $( $field:ident => $name:literal $(, valid = $pattern:literal)? $(, msg = $msg:literal)? ; )*
    }) => {
        impl $crate::form::BindForm for $ty {
            fn schema() -> &'static $crate::form::FormSchema<Self> {
                static SCHEMA: ::std::sync::OnceLock<$crate::form::FormSchema<$ty>> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    $crate::form::FormSchema::new()
                        $(
                            .with(
                                $crate::form::Field::new($name, |target: &mut $ty| &mut target.$field)
                                    $(.valid($pattern))?
                                    $(.msg($msg))?
                            )
                        )*
                })
            }
        }
    };
}
