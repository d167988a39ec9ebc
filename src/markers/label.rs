use serde_json::{Map, Value};

use super::field_format::MarkerFieldFormat;
use super::schema::MarkerSchema;
use crate::format::format_field_value;

#[derive(Debug, Clone, PartialEq)]
enum LabelPart {
    Text(String),
    MarkerName,
    Field { key: String, format: MarkerFieldFormat },
}

/// A compiled label template, such as a schema's `tooltipLabel`.
///
/// Templates contain `{marker.name}`, `{marker.data.key}` or `{key}` placeholders.
/// Field values are formatted with the format declared for them in the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMaker {
    parts: Vec<LabelPart>,
}

impl LabelMaker {
    /// Compiles `template` against `schema`. Returns `None` if the template refers
    /// to a key which the schema doesn't declare.
    pub fn compile(template: &str, schema: &MarkerSchema) -> Option<Self> {
        let mut parts = Vec::new();
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|close| open + close) else {
                break;
            };
            if open > 0 {
                parts.push(LabelPart::Text(rest[..open].to_owned()));
            }
            let token = rest[open + 1..close].trim();
            let part = if token == "marker.name" {
                LabelPart::MarkerName
            } else {
                let key = token.strip_prefix("marker.data.").unwrap_or(token);
                match schema.dynamic_field(key) {
                    Some(field) => LabelPart::Field {
                        key: key.to_owned(),
                        format: field.format.clone(),
                    },
                    None => {
                        log::debug!(
                            "Label template {template:?} of schema {:?} refers to undeclared field {key:?}",
                            schema.name
                        );
                        return None;
                    }
                }
            };
            parts.push(part);
            rest = &rest[close + 1..];
        }
        if !rest.is_empty() {
            parts.push(LabelPart::Text(rest.to_owned()));
        }
        Some(Self { parts })
    }

    /// Fills in the template. Returns `None` if a referenced field is missing
    /// from `data`.
    pub fn evaluate(&self, marker_name: &str, data: &Map<String, Value>) -> Option<String> {
        let mut label = String::new();
        for part in &self.parts {
            match part {
                LabelPart::Text(text) => label.push_str(text),
                LabelPart::MarkerName => label.push_str(marker_name),
                LabelPart::Field { key, format } => match data.get(key) {
                    None | Some(Value::Null) => return None,
                    Some(value) => label.push_str(&format_field_value(format, value)),
                },
            }
        }
        Some(label)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::markers::{MarkerLocations, MarkerNumberFieldFormat, MarkerStringFieldFormat};

    fn schema() -> MarkerSchema {
        MarkerSchema::new("UserTiming", MarkerLocations::MARKER_CHART)
            .with_field("name", "Name", MarkerStringFieldFormat::String)
            .with_field("size", "Size", MarkerNumberFieldFormat::Bytes)
    }

    #[test]
    fn placeholders_are_substituted() {
        let maker = LabelMaker::compile("{marker.name}: {marker.data.name} ({size})", &schema())
            .unwrap();
        let data = json!({ "name": "measure-1", "size": 2048 });
        assert_eq!(
            maker.evaluate("UserTiming", data.as_object().unwrap()),
            Some("UserTiming: measure-1 (2KB)".to_owned())
        );
    }

    #[test]
    fn undeclared_fields_fail_to_compile() {
        assert_eq!(LabelMaker::compile("{marker.data.entryType}", &schema()), None);
    }

    #[test]
    fn missing_values_fail_to_evaluate() {
        let maker = LabelMaker::compile("Size {size}", &schema()).unwrap();
        let data = json!({ "name": "measure-1" });
        assert_eq!(maker.evaluate("UserTiming", data.as_object().unwrap()), None);
    }

    #[test]
    fn unterminated_braces_are_text() {
        let maker = LabelMaker::compile("{marker.name} {oops", &schema()).unwrap();
        assert_eq!(
            maker.evaluate("A", &Map::new()),
            Some("A {oops".to_owned())
        );
    }
}
