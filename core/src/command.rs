//! Argument-vector compilation.
//!
//! Builds the literal argv words for one invocation from a [`CommandSpec`]
//! and the caller's [`ArgumentMap`]. Safety is structural: every supplied
//! value becomes exactly one argv element, byte-for-byte, and the vector is
//! never joined into a string for a shell to re-parse.
//!
//! # Ordering
//!
//! ```text
//! [command, ...baseArgs, ...positional (ascending position), ...named (declaration order)]
//! ```

use crate::{ArgumentMap, ArgumentVector, CommandSpec, ParamKind, ParameterSpec, Placement};

/// Compiles a command and its arguments into an argument vector.
///
/// Parameters without a supplied value are omitted; declared defaults are not
/// substituted here. Positional parameters are sorted by `position` with a
/// stable sort, so equal positions keep declaration order. A boolean named
/// parameter emits its flag (and `argValue`, if declared) only when the
/// supplied value is exactly `true`.
///
/// This function is pure: identical inputs yield identical vectors.
///
/// # Examples
///
/// ```
/// use cli_mcp_mapper_core::*;
///
/// let spec = CommandSpec::new("git", "Commit staged changes")
///     .with_base_args(["commit"])
///     .with_parameter("message", ParameterSpec::new(ParamKind::String, "Message").with_arg_name("-m"))
///     .with_parameter("all", ParameterSpec::new(ParamKind::Boolean, "Stage all").with_arg_name("-a"));
///
/// let args = ArgumentMap::new().with("message", "fix; rm -rf /").with("all", true);
/// let argv = compile_command(&spec, &args);
/// assert_eq!(argv, ["git", "commit", "-m", "fix; rm -rf /", "-a"]);
///
/// let args = ArgumentMap::new().with("all", "true");
/// assert_eq!(compile_command(&spec, &args), ["git", "commit"]);
/// ```
pub fn compile_command(spec: &CommandSpec, args: &ArgumentMap) -> ArgumentVector {
    let mut words = Vec::with_capacity(1 + spec.base_args.len() + spec.parameters.len() * 2);
    words.push(spec.command.clone());
    words.extend(spec.base_args.iter().cloned());

    let mut positional: Vec<(i64, &str)> = spec
        .parameters
        .iter()
        .filter_map(|(name, param)| match param.placement() {
            Placement::Positional(position) => Some((position, name.as_str())),
            Placement::Named { .. } => None,
        })
        .collect();
    positional.sort_by_key(|(position, _)| *position);

    for (_, name) in positional {
        if let Some(value) = args.get(name) {
            words.push(value.to_arg_string());
        }
    }

    for (name, param) in &spec.parameters {
        let Placement::Named {
            arg_name,
            arg_value,
        } = param.placement()
        else {
            continue;
        };
        let Some(value) = args.get(name) else {
            continue;
        };

        match param.kind {
            ParamKind::Boolean => {
                if value.is_true() {
                    words.extend(arg_name.map(String::from));
                    words.extend(arg_value.map(String::from));
                }
            }
            ParamKind::String | ParamKind::Number => {
                words.extend(arg_name.map(String::from));
                words.push(value.to_arg_string());
            }
        }
    }

    ArgumentVector::from_words(words)
}

/// Returns positional parameters in emission order.
///
/// Useful for diagnostics; [`compile_command`] applies the same ordering.
pub fn positional_order(spec: &CommandSpec) -> Vec<(&str, &ParameterSpec)> {
    let mut positional: Vec<(&str, &ParameterSpec)> = spec
        .parameters
        .iter()
        .filter(|(_, param)| param.is_positional())
        .map(|(name, param)| (name.as_str(), param))
        .collect();
    positional.sort_by_key(|(_, param)| param.position);
    positional
}
