use serde_derive::{Deserialize, Serialize};

use super::field_format::MarkerFieldFormat;
use super::types::MarkerLocations;

/// Describes a marker type: where its markers are shown, how they are labeled,
/// and which payload fields are displayed in which format.
///
/// This is the shape of an entry in the `meta.markerSchema` array of a processed profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSchema {
    /// The marker type name, i.e. the payload's `type` field.
    pub name: String,

    /// Set of marker display locations.
    #[serde(default)]
    pub display: MarkerLocations,

    /// A template string defining the label shown within each marker's box in the marker chart.
    ///
    /// Usable template literals are `{marker.name}` and `{marker.data.fieldkey}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_label: Option<String>,

    /// A template string defining the label shown in the first row of the marker's tooltip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip_label: Option<String>,

    /// A template string defining the label shown in the marker table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_label: Option<String>,

    /// An optional description string. Applies to all markers of this type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The displayed fields, in display order.
    #[serde(default, alias = "fields")]
    pub data: Vec<MarkerSchemaField>,
}

/// One entry of [`MarkerSchema::data`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerSchemaField {
    /// A field whose value is read from the marker payload.
    Dynamic(MarkerDynamicField),
    /// A row with the same value for every marker of this type.
    Static(MarkerStaticField),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerDynamicField {
    /// The payload key.
    pub key: String,

    /// The user-visible label of this field. Defaults to the key.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,

    pub format: MarkerFieldFormat,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub searchable: bool,
}

impl MarkerDynamicField {
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.key
        } else {
            &self.label
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStaticField {
    pub label: String,
    pub value: String,
}

impl MarkerSchema {
    pub fn new(name: &str, display: MarkerLocations) -> Self {
        Self {
            name: name.to_owned(),
            display,
            chart_label: None,
            tooltip_label: None,
            table_label: None,
            description: None,
            data: Vec::new(),
        }
    }

    pub fn with_tooltip_label(mut self, template: &str) -> Self {
        self.tooltip_label = Some(template.to_owned());
        self
    }

    pub fn with_chart_label(mut self, template: &str) -> Self {
        self.chart_label = Some(template.to_owned());
        self
    }

    pub fn with_table_label(mut self, template: &str) -> Self {
        self.table_label = Some(template.to_owned());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    pub fn with_field(
        mut self,
        key: &str,
        label: &str,
        format: impl Into<MarkerFieldFormat>,
    ) -> Self {
        self.data.push(MarkerSchemaField::Dynamic(MarkerDynamicField {
            key: key.to_owned(),
            label: label.to_owned(),
            format: format.into(),
            searchable: false,
        }));
        self
    }

    pub fn with_searchable_field(
        mut self,
        key: &str,
        label: &str,
        format: impl Into<MarkerFieldFormat>,
    ) -> Self {
        self.data.push(MarkerSchemaField::Dynamic(MarkerDynamicField {
            key: key.to_owned(),
            label: label.to_owned(),
            format: format.into(),
            searchable: true,
        }));
        self
    }

    pub fn with_static_field(mut self, label: &str, value: &str) -> Self {
        self.data.push(MarkerSchemaField::Static(MarkerStaticField {
            label: label.to_owned(),
            value: value.to_owned(),
        }));
        self
    }

    /// The declared dynamic field with this key, if any.
    pub fn dynamic_field(&self, key: &str) -> Option<&MarkerDynamicField> {
        self.data.iter().find_map(|field| match field {
            MarkerSchemaField::Dynamic(field) if field.key == key => Some(field),
            _ => None,
        })
    }

    pub fn has_static_field(&self, label: &str) -> bool {
        self.data
            .iter()
            .any(|field| matches!(field, MarkerSchemaField::Static(field) if field.label == label))
    }
}
