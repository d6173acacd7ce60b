//! Command specification types.
//!
//! This module defines the data model that operators write in the
//! `commands` configuration document and that callers supply per
//! invocation. The field names of [`CommandSpec`] and [`ParameterSpec`] are
//! fixed by the configuration format and are preserved through `serde`
//! renames.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Declared type of a tool parameter.
///
/// This is a closed set: the configuration loader rejects any other `type`
/// tag, so argument-building code can match exhaustively.
///
/// # Examples
///
/// ```
/// use cli_mcp_mapper_core::ParamKind;
///
/// let kind: ParamKind = serde_json::from_str("\"boolean\"").unwrap();
/// assert_eq!(kind, ParamKind::Boolean);
/// assert_eq!(kind.as_str(), "boolean");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Free-form text value.
    String,
    /// Numeric value (integer or float).
    Number,
    /// Boolean switch, emitted as a flag only when exactly `true`.
    Boolean,
}

impl ParamKind {
    /// Returns the JSON Schema type name for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema for one tool parameter.
///
/// A parameter is either positional (has a `position`) or named (emitted
/// after its `argName` flag token). See [`ParameterSpec::placement`].
///
/// # Examples
///
/// ```
/// use cli_mcp_mapper_core::{ParamKind, ParameterSpec, Placement};
///
/// let message = ParameterSpec::new(ParamKind::String, "Commit message")
///     .with_arg_name("-m")
///     .required();
/// assert!(message.required);
/// assert_eq!(
///     message.placement(),
///     Placement::Named { arg_name: Some("-m"), arg_value: None }
/// );
///
/// let path = ParameterSpec::new(ParamKind::String, "Path").at_position(0);
/// assert_eq!(path.placement(), Placement::Positional(0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Declared value type.
    #[serde(rename = "type")]
    pub kind: ParamKind,
    /// Human-readable description, surfaced verbatim in the input schema.
    #[serde(default)]
    pub description: String,
    /// Whether callers must supply this parameter.
    #[serde(default)]
    pub required: bool,
    /// Allowed values, advertised in the input schema.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Advertised default. Presence is decided by `Some`, so `0`, `false`
    /// and `""` survive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Ordinal slot for positional parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    /// Flag token emitted before the value (e.g. `-m`).
    #[serde(rename = "argName", default, skip_serializing_if = "Option::is_none")]
    pub arg_name: Option<String>,
    /// Literal emitted after a boolean flag.
    #[serde(rename = "argValue", default, skip_serializing_if = "Option::is_none")]
    pub arg_value: Option<String>,
}

/// How a parameter is laid out in the argument vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement<'a> {
    /// Bare value at an ordinal slot.
    Positional(i64),
    /// Flag token, optionally followed by a value.
    Named {
        arg_name: Option<&'a str>,
        arg_value: Option<&'a str>,
    },
}

impl ParameterSpec {
    /// Creates an optional, named parameter with no flag token yet.
    pub fn new(kind: ParamKind, description: &str) -> Self {
        Self {
            kind,
            description: description.to_string(),
            required: false,
            enum_values: None,
            default: None,
            position: None,
            arg_name: None,
            arg_value: None,
        }
    }

    /// Marks the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Makes the parameter positional at `position`.
    pub fn at_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the flag token.
    pub fn with_arg_name(mut self, arg_name: &str) -> Self {
        self.arg_name = Some(arg_name.to_string());
        self
    }

    /// Sets the literal emitted after a boolean flag.
    pub fn with_arg_value(mut self, arg_value: &str) -> Self {
        self.arg_value = Some(arg_value.to_string());
        self
    }

    /// Restricts the advertised values.
    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the advertised default.
    pub fn with_default(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Returns the placement of this parameter.
    ///
    /// A defined `position` wins: `argName` and `argValue` are ignored for
    /// positional parameters.
    pub fn placement(&self) -> Placement<'_> {
        match self.position {
            Some(position) => Placement::Positional(position),
            None => Placement::Named {
                arg_name: self.arg_name.as_deref(),
                arg_value: self.arg_value.as_deref(),
            },
        }
    }

    /// Returns `true` if this parameter is positional.
    pub fn is_positional(&self) -> bool {
        self.position.is_some()
    }
}

/// Specification of one operator-defined command exposed as a tool.
///
/// Parameter declaration order is significant: named arguments are emitted
/// in this order and the input schema lists required names in it.
///
/// # Examples
///
/// ```
/// use cli_mcp_mapper_core::{CommandSpec, ParamKind, ParameterSpec};
///
/// let spec = CommandSpec::new("git", "Show the working tree status")
///     .with_base_args(["status"])
///     .with_parameter("short", ParameterSpec::new(ParamKind::Boolean, "Short format").with_arg_name("-s"));
///
/// assert_eq!(spec.command, "git");
/// assert_eq!(spec.base_args, vec!["status"]);
/// assert!(spec.parameter("short").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Executable name or path. Looked up on `PATH` by the OS, never by a shell.
    pub command: String,
    /// Arguments always emitted right after the executable.
    #[serde(rename = "baseArgs", default, deserialize_with = "null_as_default")]
    pub base_args: Vec<String>,
    /// Tool description shown to protocol callers.
    pub description: String,
    /// Declared parameters, in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: IndexMap<String, ParameterSpec>,
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl CommandSpec {
    /// Creates a command with no base arguments and no parameters.
    pub fn new(command: &str, description: &str) -> Self {
        Self {
            command: command.to_string(),
            base_args: Vec::new(),
            description: description.to_string(),
            parameters: IndexMap::new(),
        }
    }

    /// Replaces the base arguments.
    pub fn with_base_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a parameter, keeping declaration order.
    pub fn with_parameter(mut self, name: &str, param: ParameterSpec) -> Self {
        self.parameters.insert(name.to_string(), param);
        self
    }

    /// Looks up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.get(name)
    }
}

/// A caller-supplied argument value.
///
/// # Examples
///
/// ```
/// use cli_mcp_mapper_core::ArgValue;
///
/// assert_eq!(ArgValue::from(3.0).to_arg_string(), "3");
/// assert_eq!(ArgValue::from(2.5).to_arg_string(), "2.5");
/// assert_eq!(ArgValue::from(-7).to_arg_string(), "-7");
/// assert_eq!(ArgValue::from(false).to_arg_string(), "false");
/// assert_eq!(ArgValue::from("$(whoami)").to_arg_string(), "$(whoami)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Number(serde_json::Number),
    Boolean(bool),
}

impl ArgValue {
    /// Returns the literal argv word for this value.
    ///
    /// Strings are returned verbatim. Numbers with an integral value print
    /// without a fractional part.
    pub fn to_arg_string(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Boolean(b) => b.to_string(),
            Self::Number(n) => format_number(n),
        }
    }

    /// Returns `true` only for `Boolean(true)`.
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Boolean(true))
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        // 2^53: above this, f64 cannot represent every integer.
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => {
            (f as i64).to_string()
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

/// Finite values become [`ArgValue::Number`]. JSON has no NaN or infinity,
/// so those fall back to [`ArgValue::String`] holding Rust's rendering
/// (`"NaN"`, `"inf"`, `"-inf"`).
impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Self::Number)
            .unwrap_or_else(|| Self::String(value.to_string()))
    }
}

/// Errors raised while converting protocol arguments into an [`ArgumentMap`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// Arrays and objects have no single argv representation.
    #[error("unsupported value for argument '{name}': expected string, number, or boolean, got {found}")]
    UnsupportedValue { name: String, found: &'static str },
}

/// Caller-supplied arguments for one invocation.
///
/// A name that is absent from the map is "not supplied". Values are never
/// shared across invocations.
///
/// # Examples
///
/// ```
/// use cli_mcp_mapper_core::{ArgValue, ArgumentMap};
///
/// let args = ArgumentMap::new().with("message", "hi there").with("count", 3);
/// assert_eq!(args.get("message"), Some(&ArgValue::from("hi there")));
/// assert!(args.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentMap {
    values: IndexMap<String, ArgValue>,
}

impl ArgumentMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, builder style.
    pub fn with(mut self, name: &str, value: impl Into<ArgValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, name: &str, value: impl Into<ArgValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Returns the supplied value for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Converts a protocol argument object.
    ///
    /// `null` entries count as not supplied. Arrays and objects are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::UnsupportedValue`] for array or object values.
    ///
    /// # Examples
    ///
    /// ```
    /// use cli_mcp_mapper_core::{ArgValue, ArgumentMap};
    ///
    /// let json = serde_json::json!({"all": true, "path": null});
    /// let args = ArgumentMap::from_json(json.as_object().unwrap()).unwrap();
    /// assert_eq!(args.get("all"), Some(&ArgValue::Boolean(true)));
    /// assert!(args.get("path").is_none());
    ///
    /// let bad = serde_json::json!({"files": ["a", "b"]});
    /// assert!(ArgumentMap::from_json(bad.as_object().unwrap()).is_err());
    /// ```
    pub fn from_json(
        object: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, ArgumentError> {
        use serde_json::Value;

        let mut values = IndexMap::with_capacity(object.len());
        for (name, value) in object {
            let converted = match value {
                Value::Null => continue,
                Value::String(s) => ArgValue::String(s.clone()),
                Value::Number(n) => ArgValue::Number(n.clone()),
                Value::Bool(b) => ArgValue::Boolean(*b),
                Value::Array(_) => {
                    return Err(ArgumentError::UnsupportedValue {
                        name: name.clone(),
                        found: "array",
                    });
                }
                Value::Object(_) => {
                    return Err(ArgumentError::UnsupportedValue {
                        name: name.clone(),
                        found: "object",
                    });
                }
            };
            values.insert(name.clone(), converted);
        }
        Ok(Self { values })
    }
}

/// The literal words of one process invocation.
///
/// Element 0 is the program; the rest are passed to it as-is. Built by
/// [`compile_command`](crate::compile_command) and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentVector(Vec<String>);

impl ArgumentVector {
    pub(crate) fn from_words(words: Vec<String>) -> Self {
        Self(words)
    }

    /// Returns the program word, or `None` for an empty vector.
    pub fn program(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Returns everything after the program word.
    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ArgumentVector {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl PartialEq<[&str]> for ArgumentVector {
    fn eq(&self, other: &[&str]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for ArgumentVector {
    fn eq(&self, other: &[&str; N]) -> bool {
        self == &other[..]
    }
}

impl fmt::Display for ArgumentVector {
    /// Debug-quoted words, for logs only. Never fed to a shell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
