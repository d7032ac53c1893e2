use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

// =============================================================================
// Tool Types
// =============================================================================

/// JSON Schema fragment describing one tool argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySchema {
    /// JSON type name (`string`, `number`).
    #[serde(rename = "type")]
    pub kind: &'static str,

    /// Human-readable description.
    pub description: String,

    /// Allowed values, if the argument is enumerated.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,

    /// Inclusive lower bound for numeric arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<u32>,

    /// Inclusive upper bound for numeric arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<u32>,
}

impl PropertySchema {
    /// A free-form string argument.
    pub fn string(description: impl Into<String>) -> Self {
        Self {
            kind: "string",
            description: description.into(),
            allowed: None,
            minimum: None,
            maximum: None,
        }
    }

    /// A numeric argument bounded to `[minimum, maximum]`.
    pub fn bounded_number(description: impl Into<String>, minimum: u32, maximum: u32) -> Self {
        Self {
            kind: "number",
            description: description.into(),
            allowed: None,
            minimum: Some(minimum),
            maximum: Some(maximum),
        }
    }

    /// Restrict the argument to an enumerated set.
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// Object schema for a tool's argument bag. Properties keep insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputSchema {
    /// Argument name and schema pairs.
    pub properties: Vec<(String, PropertySchema)>,

    /// Names of required arguments.
    pub required: Vec<String>,
}

impl InputSchema {
    /// Schema for a tool that takes no arguments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a required argument.
    pub fn require(mut self, name: &str, schema: PropertySchema) -> Self {
        self.properties.push((name.to_string(), schema));
        self.required.push(name.to_string());
        self
    }

    /// Add an optional argument.
    pub fn optional(mut self, name: &str, schema: PropertySchema) -> Self {
        self.properties.push((name.to_string(), schema));
        self
    }

    /// Look up an argument's schema by name.
    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, schema)| schema)
    }
}

impl Serialize for InputSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Properties<'a>(&'a [(String, PropertySchema)]);

        impl Serialize for Properties<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (name, schema) in self.0 {
                    map.serialize_entry(name, schema)?;
                }
                map.end()
            }
        }

        let entries = if self.required.is_empty() { 2 } else { 3 };
        let mut map = serializer.serialize_map(Some(entries))?;
        map.serialize_entry("type", "object")?;
        map.serialize_entry("properties", &Properties(&self.properties))?;
        if !self.required.is_empty() {
            map.serialize_entry("required", &self.required)?;
        }
        map.end()
    }
}

/// An invocable tool advertised to the calling agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Unique tool name.
    pub name: String,

    /// Human-readable description.
    pub description: String,

    /// Schema for the tool's arguments.
    pub input_schema: InputSchema,
}

/// Container returned by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCatalog {
    pub tools: Vec<ToolDescriptor>,
}

impl ToolCatalog {
    /// Find a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    /// Tool names in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name.as_str()).collect()
    }
}
