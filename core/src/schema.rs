//! Input-schema compilation for tool discovery.
//!
//! Turns a command's declared parameters into the JSON Schema object that
//! protocol callers see in a "list tools" response. The compiler is pure and
//! performs no type validation; that belongs to configuration loading.

use indexmap::IndexMap;
use serde::Serialize;

use crate::ParameterSpec;

/// JSON Schema description of one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: String,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

/// Object schema describing a tool's input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: IndexMap<String, PropertyDescriptor>,
    pub required: Vec<String>,
}

impl InputSchema {
    /// Returns the schema as a JSON object map, as protocol layers expect.
    pub fn to_json_object(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(object)) => object,
            // Only string keys and plain values; serialization cannot fail.
            _ => serde_json::Map::new(),
        }
    }
}

/// Compiles declared parameters into an input schema.
///
/// Absent or empty parameters yield `{type: "object", properties: {},
/// required: []}`. `enum` and `default` are included exactly when the
/// parameter declares them, so falsy defaults such as `0` or `false` are kept.
/// `required` lists names in declaration order.
///
/// # Examples
///
/// ```
/// use cli_mcp_mapper_core::{ParamKind, ParameterSpec, compile_schema};
/// use indexmap::IndexMap;
///
/// let mut params = IndexMap::new();
/// params.insert(
///     "format".to_string(),
///     ParameterSpec::new(ParamKind::String, "Output format")
///         .with_enum(["json", "yaml"])
///         .required(),
/// );
///
/// let schema = compile_schema(Some(&params));
/// assert_eq!(schema.kind, "object");
/// assert_eq!(schema.required, vec!["format"]);
/// assert_eq!(
///     schema.properties["format"].enum_values.as_deref(),
///     Some(&["json".to_string(), "yaml".to_string()][..])
/// );
///
/// let empty = compile_schema(None);
/// assert!(empty.properties.is_empty());
/// assert!(empty.required.is_empty());
/// ```
pub fn compile_schema(parameters: Option<&IndexMap<String, ParameterSpec>>) -> InputSchema {
    let mut properties = IndexMap::new();
    let mut required = Vec::new();

    for (name, param) in parameters.into_iter().flatten() {
        properties.insert(
            name.clone(),
            PropertyDescriptor {
                kind: param.kind.as_str(),
                description: param.description.clone(),
                enum_values: param.enum_values.clone(),
                default: param.default.clone(),
            },
        );
        if param.required {
            required.push(name.clone());
        }
    }

    InputSchema {
        kind: "object",
        properties,
        required,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ParamKind;

    fn params(entries: Vec<(&str, ParameterSpec)>) -> IndexMap<String, ParameterSpec> {
        entries
            .into_iter()
            .map(|(name, spec)| (name.to_string(), spec))
            .collect()
    }

    #[test]
    fn test_string_parameter() {
        let params = params(vec![(
            "message",
            ParameterSpec::new(ParamKind::String, "Message to echo").required(),
        )]);
        let schema = compile_schema(Some(&params));
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({
                "type": "object",
                "properties": {
                    "message": {"type": "string", "description": "Message to echo"}
                },
                "required": ["message"]
            })
        );
    }

    #[test]
    fn test_boolean_parameter_not_required() {
        let params = params(vec![(
            "all",
            ParameterSpec::new(ParamKind::Boolean, "Show all").with_arg_name("-a"),
        )]);
        let schema = compile_schema(Some(&params));
        assert_eq!(schema.properties["all"].kind, "boolean");
        assert!(schema.required.is_empty());
    }

    #[test]
    fn test_number_parameter_with_default() {
        let params = params(vec![(
            "depth",
            ParameterSpec::new(ParamKind::Number, "Max depth").with_default(3),
        )]);
        let schema = compile_schema(Some(&params));
        assert_eq!(schema.properties["depth"].kind, "number");
        assert_eq!(schema.properties["depth"].default, Some(json!(3)));
    }

    #[test]
    fn test_falsy_defaults_are_kept() {
        let params = params(vec![
            ("zero", ParameterSpec::new(ParamKind::Number, "z").with_default(0)),
            ("off", ParameterSpec::new(ParamKind::Boolean, "o").with_default(false)),
            ("blank", ParameterSpec::new(ParamKind::String, "b").with_default("")),
        ]);
        let value = serde_json::to_value(compile_schema(Some(&params))).unwrap();
        assert_eq!(value["properties"]["zero"]["default"], json!(0));
        assert_eq!(value["properties"]["off"]["default"], json!(false));
        assert_eq!(value["properties"]["blank"]["default"], json!(""));
    }

    #[test]
    fn test_enum_is_emitted_only_when_declared() {
        let params = params(vec![
            (
                "format",
                ParameterSpec::new(ParamKind::String, "Format").with_enum(["json", "text"]),
            ),
            ("name", ParameterSpec::new(ParamKind::String, "Name")),
        ]);
        let value = serde_json::to_value(compile_schema(Some(&params))).unwrap();
        assert_eq!(value["properties"]["format"]["enum"], json!(["json", "text"]));
        assert!(value["properties"]["name"].get("enum").is_none());
        assert!(value["properties"]["name"].get("default").is_none());
    }

    #[test]
    fn test_required_follows_declaration_order() {
        let params = params(vec![
            ("b", ParameterSpec::new(ParamKind::String, "b").required()),
            ("skip", ParameterSpec::new(ParamKind::String, "s")),
            ("a", ParameterSpec::new(ParamKind::String, "a").required()),
        ]);
        let schema = compile_schema(Some(&params));
        assert_eq!(schema.required, vec!["b", "a"]);
    }

    #[test]
    fn test_empty_and_absent_parameters() {
        let expected = json!({"type": "object", "properties": {}, "required": []});
        let empty = IndexMap::new();
        assert_eq!(serde_json::to_value(compile_schema(Some(&empty))).unwrap(), expected);
        assert_eq!(serde_json::to_value(compile_schema(None)).unwrap(), expected);
    }

    #[test]
    fn test_json_object_keeps_key_order() {
        let params = params(vec![
            ("second", ParameterSpec::new(ParamKind::String, "s")),
            ("first", ParameterSpec::new(ParamKind::Number, "f").with_default(0)),
        ]);
        let object = compile_schema(Some(&params)).to_json_object();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["type", "properties", "required"]);

        let properties = object["properties"].as_object().unwrap();
        let names: Vec<&str> = properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["second", "first"]);
    }
}
