use crate::Collection;
use crate::Element;
use crate::Error;
use serde::Deserialize;
use serde::Serialize;

/// Processed view of a HID: device ids, the top-level usage, and the flattened
/// elements and collections of its report descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Descriptor {
    pub vendor_id: u32,
    pub product_id: u32,
    pub usage: u32,
    pub usage_page: u32,
    /// Largest input report in bytes.
    pub input_report_size: u32,
    pub output_report_size: u32,
    pub feature_report_size: u32,
    pub elements: Vec<Element>,
    pub collections: Vec<Collection>,
}

impl Descriptor {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|element| element.is_input())
    }

    pub fn top_level_collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.iter().filter(|collection| collection.is_root())
    }
}
