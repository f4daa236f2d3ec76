use crate::hat::HatEncoding;
use crate::Error;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageUsage {
    pub usage_page: u32,
    pub usage: u32,
}

/// Hat encoding for one device that does not report up as its minimum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HatSwitchOverride {
    pub vendor_id: u32,
    pub product_id: u32,
    pub encoding: HatEncoding,
}

/// Tuning for [`LayoutAssembler`](crate::LayoutAssembler), usually loaded from
/// a JSON file:
///
/// ```json
/// {
///     "supportedUsages": [{ "usagePage": 1, "usage": 4 }, { "usagePage": 1, "usage": 5 }],
///     "hatSwitchOverrides": [
///         { "vendorId": 1133, "productId": 49686, "encoding": { "start": "right", "clockwise": true } }
///     ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SynthesisOptions {
    /// Top-level usages synthesis accepts. Empty accepts every usage.
    pub supported_usages: Vec<PageUsage>,
    pub hat_switch_overrides: Vec<HatSwitchOverride>,
}

impl SynthesisOptions {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn is_supported(&self, usage_page: u32, usage: u32) -> bool {
        self.supported_usages.is_empty()
            || self.supported_usages.contains(&PageUsage { usage_page, usage })
    }

    pub fn hat_encoding(&self, vendor_id: u32, product_id: u32) -> HatEncoding {
        self.hat_switch_overrides
            .iter()
            .find(|o| o.vendor_id == vendor_id && o.product_id == product_id)
            .map(|o| o.encoding)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use crate::hat::Direction;
    use crate::hat::HatEncoding;
    use crate::options::SynthesisOptions;

    const OPTIONS: &str = r#"{
        "supportedUsages": [{ "usagePage": 1, "usage": 4 }, { "usagePage": 1, "usage": 5 }],
        "hatSwitchOverrides": [
            { "vendorId": 1133, "productId": 49686, "encoding": { "start": "right", "clockwise": false } },
            { "vendorId": 1133, "productId": 49687, "encoding": { "start": "left" } }
        ]
    }"#;

    #[test]
    fn defaults_accept_everything() {
        let options = SynthesisOptions::from_json("{}").unwrap();
        assert_eq!(options, SynthesisOptions::default());
        assert!(options.is_supported(0xFF00, 1));
        assert_eq!(options.hat_encoding(1, 2), HatEncoding::default());
    }

    #[test]
    fn loads_gate_and_overrides() {
        let options = SynthesisOptions::from_json(OPTIONS).unwrap();

        assert!(options.is_supported(1, 4));
        assert!(options.is_supported(1, 5));
        assert!(!options.is_supported(1, 2));

        assert_eq!(
            options.hat_encoding(1133, 49686),
            HatEncoding {
                start: Direction::Right,
                clockwise: false
            }
        );
        assert_eq!(
            options.hat_encoding(1133, 49687),
            HatEncoding {
                start: Direction::Left,
                clockwise: true
            }
        );
        assert_eq!(options.hat_encoding(1133, 1), HatEncoding::default());
    }

    #[test]
    fn rejects_unknown_direction() {
        let json = r#"{ "hatSwitchOverrides": [{ "vendorId": 1, "productId": 2, "encoding": { "start": "north" } }] }"#;
        assert!(SynthesisOptions::from_json(json).is_err());
    }
}
