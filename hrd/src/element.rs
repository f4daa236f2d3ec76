use crate::usage::GenericDesktop;
use crate::usage::UsagePage;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReportType {
    #[default]
    Unknown,
    Input,
    Output,
    Feature,
}

/// Main item data bits of an `Input`, `Output` or `Feature` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementFlags(u32);

bitflags::bitflags! {
    impl ElementFlags: u32 {
        const CONSTANT = 1 << 0;
        const VARIABLE = 1 << 1;
        const RELATIVE = 1 << 2;
        const WRAP = 1 << 3;
        const NON_LINEAR = 1 << 4;
        const NO_PREFERRED = 1 << 5;
        const NULL_STATE = 1 << 6;
        const VOLATILE = 1 << 7;
        const BUFFERED_BYTES = 1 << 8;
    }
}

/// One field of an input, output or feature report.
///
/// Field names follow the capability JSON schema so that persisted descriptors
/// keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Element {
    pub usage: u32,
    pub usage_page: u32,
    pub unit: u32,
    pub unit_exponent: i32,
    pub logical_min: i32,
    pub logical_max: i32,
    pub physical_min: i32,
    pub physical_max: i32,
    pub report_type: ReportType,
    pub collection_index: i32,
    pub report_id: u32,
    #[serde(rename = "reportSizeInBits")]
    pub bit_size: u32,
    /// Counted from the first bit after the report id byte.
    #[serde(rename = "reportOffsetInBits")]
    pub bit_offset: u32,
    pub flags: ElementFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_max: Option<u32>,
}

impl Element {
    pub fn is(&self, usage_page: UsagePage, usage: u32) -> bool {
        self.usage_page == usage_page as u32 && self.usage == usage
    }

    pub fn is_generic_desktop(&self, usage: GenericDesktop) -> bool {
        self.is(UsagePage::GenericDesktop, usage as u32)
    }

    pub fn generic_desktop_usage(&self) -> Option<GenericDesktop> {
        if self.usage_page != UsagePage::GenericDesktop as u32 {
            return None;
        }
        GenericDesktop::from_repr(self.usage)
    }

    pub fn is_input(&self) -> bool {
        self.report_type == ReportType::Input
    }

    pub fn is_signed(&self) -> bool {
        self.logical_min < 0
    }

    pub fn has_null_state(&self) -> bool {
        self.flags.contains(ElementFlags::NULL_STATE)
    }

    pub fn is_array(&self) -> bool {
        !self.flags.contains(ElementFlags::VARIABLE)
    }

    pub fn is_constant(&self) -> bool {
        self.flags.contains(ElementFlags::CONSTANT)
    }

    /// First bit past the end of the element.
    pub fn bit_end(&self) -> u64 {
        self.bit_offset as u64 + self.bit_size as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollectionType {
    #[default]
    Physical,
    Application,
    Logical,
    Report,
    NamedArray,
    UsageSwitch,
    UsageModifier,
    #[serde(other)]
    VendorDefined,
}

impl CollectionType {
    pub fn from_item_data(value: u32) -> Self {
        match value {
            0x00 => Self::Physical,
            0x01 => Self::Application,
            0x02 => Self::Logical,
            0x03 => Self::Report,
            0x04 => Self::NamedArray,
            0x05 => Self::UsageSwitch,
            0x06 => Self::UsageModifier,
            _ => Self::VendorDefined,
        }
    }
}

/// A collection in flattened form; children are the element range
/// `first_child_index..first_child_index + child_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Collection {
    pub r#type: CollectionType,
    pub usage: u32,
    pub usage_page: u32,
    /// -1 for top-level collections.
    #[serde(rename = "parent")]
    pub parent_index: i32,
    #[serde(rename = "firstChild")]
    pub first_child_index: u32,
    pub child_count: u32,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            r#type: CollectionType::default(),
            usage: 0,
            usage_page: 0,
            parent_index: -1,
            first_child_index: 0,
            child_count: 0,
        }
    }
}

impl Collection {
    pub fn is_root(&self) -> bool {
        self.parent_index < 0
    }
}
