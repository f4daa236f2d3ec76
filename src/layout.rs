//! Synthesized control layouts: the output of the assembler.

use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// Semantic tags attached to controls.
pub mod usages {
    pub const PRIMARY_TRIGGER: &str = "PrimaryTrigger";
    pub const PRIMARY_ACTION: &str = "PrimaryAction";
    pub const SECONDARY_TRIGGER: &str = "SecondaryTrigger";
    pub const SECONDARY_ACTION: &str = "SecondaryAction";
    pub const TWIST: &str = "Twist";
    pub const PRIMARY_2D_MOTION: &str = "Primary2DMotion";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum LayoutKind {
    Button,
    Axis,
    Dpad,
    Stick,
    DiscreteButton,
}

/// In-memory format of a control's bits, named by the FourCC the runtime uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum FormatCode {
    #[serde(rename = "BIT")]
    #[strum(serialize = "BIT")]
    Bit,
    #[serde(rename = "SBYT")]
    #[strum(serialize = "SBYT")]
    SignedByte,
    #[serde(rename = "BYTE")]
    #[strum(serialize = "BYTE")]
    Byte,
    #[serde(rename = "SHRT")]
    #[strum(serialize = "SHRT")]
    SignedShort,
    #[serde(rename = "USHT")]
    #[strum(serialize = "USHT")]
    UShort,
    #[serde(rename = "INT")]
    #[strum(serialize = "INT")]
    SignedInt,
    #[serde(rename = "UINT")]
    #[strum(serialize = "UINT")]
    UInt,
}

/// Untagged on the wire, so non-negative values are always `UInt` and only
/// negative ones are `Int`. Build values with `From<i64>` to keep that form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimitiveValue {
    UInt(u64),
    Int(i64),
}

impl From<i64> for PrimitiveValue {
    fn from(value: i64) -> Self {
        match u64::try_from(value) {
            Ok(value) => PrimitiveValue::UInt(value),
            Err(_) => PrimitiveValue::Int(value),
        }
    }
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveValue::Int(value) => write!(f, "{value}"),
            PrimitiveValue::UInt(value) => write!(f, "{value}"),
        }
    }
}

/// A single control. Offsets of top-level controls are relative to the start
/// of the report; offsets of children are relative to their parent's byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub layout_kind: LayoutKind,
    pub byte_offset: u32,
    /// 0..=7
    pub bit_offset_within_byte: u32,
    pub size_in_bits: u32,
    pub format: FormatCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_state: Option<PrimitiveValue>,
    /// Comma separated `key=value` directives, empty when there are none.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub parameters: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processors: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub usages: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<ControlNode>,
}

impl ControlNode {
    pub fn new(name: impl Into<String>, layout_kind: LayoutKind) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            layout_kind,
            byte_offset: 0,
            bit_offset_within_byte: 0,
            size_in_bits: 0,
            format: FormatCode::Bit,
            default_state: None,
            parameters: String::new(),
            processors: None,
            usages: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Places the control at an absolute bit position, relative to `base_byte`.
    pub fn at_bits(mut self, bit_offset: u32, size_in_bits: u32, base_byte: u32) -> Self {
        self.byte_offset = bit_offset / 8 - base_byte;
        self.bit_offset_within_byte = bit_offset % 8;
        self.size_in_bits = size_in_bits;
        self
    }

    pub fn child(&self, name: &str) -> Option<&ControlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Iterates over `key=value` (or bare `key`) parameter directives.
    pub fn parameter_pairs(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.parameters
            .split(',')
            .filter(|directive| !directive.is_empty())
            .map(|directive| match directive.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (directive, None),
            })
    }

    /// Last value given for `key`; later directives override earlier ones.
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameter_pairs()
            .filter(|(k, _)| *k == key)
            .last()
            .map(|(_, value)| value.unwrap_or("true"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlLayoutTree {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub controls: Vec<ControlNode>,
}

impl ControlLayoutTree {
    /// Looks a control up by its slash separated path, e.g. `stick/up`.
    pub fn control(&self, path: &str) -> Option<&ControlNode> {
        let mut names = path.split('/');
        let first = names.next()?;
        let root = self.controls.iter().find(|control| control.name == first)?;
        names.try_fold(root, |node, name| node.child(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum BaseLayout {
    #[serde(rename = "HID")]
    #[strum(serialize = "HID")]
    Hid,
    Joystick,
}

/// What the registry matches future device descriptions against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum DeviceMatchKey {
    Ids {
        vendor_id: u32,
        product_id: u32,
        usage: u32,
        usage_page: u32,
    },
    /// Patterns are the literal strings reported by the device; an empty
    /// manufacturer pattern matches any manufacturer.
    Strings {
        manufacturer_pattern: String,
        product_pattern: String,
        usage: u32,
        usage_page: u32,
    },
}

impl DeviceMatchKey {
    pub fn usage(&self) -> u32 {
        match self {
            DeviceMatchKey::Ids { usage, .. } | DeviceMatchKey::Strings { usage, .. } => *usage,
        }
    }

    pub fn usage_page(&self) -> u32 {
        match self {
            DeviceMatchKey::Ids { usage_page, .. }
            | DeviceMatchKey::Strings { usage_page, .. } => *usage_page,
        }
    }
}

/// Result of a successful synthesis, handed to the registry as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedLayout {
    pub name: String,
    pub base_layout: BaseLayout,
    pub match_key: DeviceMatchKey,
    pub tree: ControlLayoutTree,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parameter_lookup_prefers_last_directive() {
        let mut node = ControlNode::new("down", LayoutKind::Button);
        node.parameters = "invert,normalize,normalizeMin=-1,invert=false".to_string();

        assert_eq!(node.parameter("invert"), Some("false"));
        assert_eq!(node.parameter("normalize"), Some("true"));
        assert_eq!(node.parameter("normalizeMin"), Some("-1"));
        assert_eq!(node.parameter("clamp"), None);
    }

    #[test]
    fn placement_relative_to_base() {
        let node = ControlNode::new("y", LayoutKind::Axis).at_bits(44, 12, 4);

        assert_eq!(node.byte_offset, 1);
        assert_eq!(node.bit_offset_within_byte, 4);
        assert_eq!(node.size_in_bits, 12);
    }

    #[test]
    fn path_lookup() {
        let mut stick = ControlNode::new("stick", LayoutKind::Stick);
        stick.children.push(ControlNode::new("up", LayoutKind::Button));
        let tree = ControlLayoutTree {
            display_name: None,
            controls: vec![stick, ControlNode::new("trigger", LayoutKind::Button)],
        };

        assert!(tree.control("stick/up").is_some());
        assert!(tree.control("trigger").is_some());
        assert!(tree.control("stick/left").is_none());
        assert!(tree.control("hat").is_none());
    }

    #[test]
    fn serialized_names() {
        assert_eq!(FormatCode::SignedShort.to_string(), "SHRT");
        assert_eq!(BaseLayout::Hid.to_string(), "HID");
        assert_eq!(LayoutKind::DiscreteButton.to_string(), "DiscreteButton");

        let key = DeviceMatchKey::Ids {
            vendor_id: 1,
            product_id: 2,
            usage: 5,
            usage_page: 1,
        };
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(
            json,
            r#"{"vendorId":1,"productId":2,"usage":5,"usagePage":1}"#
        );
        assert_eq!(serde_json::to_string(&PrimitiveValue::UInt(8)).unwrap(), "8");
    }

    #[test]
    fn primitive_values_survive_json() {
        for value in [8, -1, 0, i64::MIN, i64::MAX] {
            let value = PrimitiveValue::from(value);
            let json = serde_json::to_string(&value).unwrap();
            assert_eq!(serde_json::from_str::<PrimitiveValue>(&json).unwrap(), value);
        }
        assert_eq!(PrimitiveValue::from(8), PrimitiveValue::UInt(8));
        assert_eq!(PrimitiveValue::from(-1), PrimitiveValue::Int(-1));
        assert_eq!(
            serde_json::from_str::<PrimitiveValue>("18446744073709551615").unwrap(),
            PrimitiveValue::UInt(u64::MAX)
        );

        let mut node = ControlNode::new("hat", LayoutKind::Dpad);
        node.default_state = Some(PrimitiveValue::from(8));
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(serde_json::from_str::<ControlNode>(&json).unwrap(), node);
    }
}
