use crate::Collection;
use crate::CollectionType;
use crate::Descriptor;
use crate::Element;
use crate::ElementFlags;
use crate::Error;
use crate::ReportType;

/// Item data as read from the descriptor, kept in both interpretations
/// because the signedness of a maximum depends on its minimum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ItemData {
    pub signed: i32,
    pub unsigned: u32,
}

impl ItemData {
    fn from_bytes(bytes: &[u8]) -> Self {
        let unsigned = bytes
            .iter()
            .rev()
            .fold(0u32, |value, &byte| (value << 8) | byte as u32);

        let signed = match bytes.len() {
            0 => 0,
            1 => unsigned as u8 as i8 as i32,
            2 => unsigned as u16 as i16 as i32,
            _ => unsigned as i32,
        };

        Self { signed, unsigned }
    }
}

#[derive(Clone, Default)]
pub(crate) struct ParserGlobalState {
    pub usage_page: Option<u32>,
    pub report_size: Option<u32>,
    pub report_id: Option<u32>,
    pub report_count: Option<u32>,
    pub logical_minimum: Option<i32>,
    pub logical_maximum: Option<ItemData>,
    pub physical_minimum: Option<i32>,
    pub physical_maximum: Option<ItemData>,
    pub unit: Option<u32>,
    pub unit_exponent: Option<i32>,
}

impl ParserGlobalState {
    fn logical_min(&self) -> i32 {
        self.logical_minimum.unwrap_or(0)
    }

    fn logical_max(&self) -> i32 {
        resolve_maximum(self.logical_min(), self.logical_maximum)
    }

    // Physical bounds fall back to the logical ones when absent or both zero.
    fn physical_bounds(&self) -> (i32, i32) {
        match (self.physical_minimum, self.physical_maximum) {
            (Some(min), Some(max)) => {
                let max = resolve_maximum(min, Some(max));
                if min == 0 && max == 0 {
                    (self.logical_min(), self.logical_max())
                } else {
                    (min, max)
                }
            }
            _ => (self.logical_min(), self.logical_max()),
        }
    }
}

fn resolve_maximum(minimum: i32, maximum: Option<ItemData>) -> i32 {
    let Some(maximum) = maximum else {
        return 0;
    };

    if minimum < 0 {
        maximum.signed
    } else {
        maximum.unsigned as i32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Usage {
    pub page: Option<u32>,
    pub id: u32,
}

impl Usage {
    fn from_item(data: &[u8], value: ItemData) -> Self {
        // A four byte usage carries its own usage page.
        if data.len() == 4 {
            Usage {
                page: Some(value.unsigned >> 16),
                id: value.unsigned & 0xFFFF,
            }
        } else {
            Usage {
                page: None,
                id: value.unsigned,
            }
        }
    }
}

#[derive(Clone, Default)]
pub(crate) struct ParserLocalState {
    pub usages: Vec<Usage>,
    pub usage_minimum: Option<Usage>,
    pub usage_maximum: Option<Usage>,
}

impl ParserLocalState {
    /// Usage of the `index`th element generated by the next main item.
    fn usage(&self, index: u32) -> Option<Usage> {
        if let (Some(min), Some(max)) = (self.usage_minimum, self.usage_maximum) {
            if max.id < min.id {
                return None;
            }
            let id = min.id.saturating_add(index).min(max.id);
            return Some(Usage { page: min.page, id });
        }

        self.usages
            .get(index as usize)
            .or(self.usages.last())
            .copied()
    }
}

struct ParserReport {
    id: u32,
    r#type: ReportType,
    bit_offset: u32,
}

const LEN_MASK: u8 = 0x3;

const TAG_MASK: u8 = 0xFC;

/// Largest report the kernel accepts, in bits (`HID_MAX_BUFFER_SIZE` bytes).
pub const MAX_REPORT_BITS: u64 = 16384 * 8;

const TAG_INPUT: u8 = 0x80;
const TAG_OUTPUT: u8 = 0x90;
const TAG_COLLECTION: u8 = 0xA0;
const TAG_FEATURE: u8 = 0xB0;
const TAG_COLLECTION_END: u8 = 0xC0;

const TAG_USAGE_PAGE: u8 = 0x04;
const TAG_LOGICAL_MINIMUM: u8 = 0x14;
const TAG_LOGICAL_MAXIMUM: u8 = 0x24;
const TAG_PHYSICAL_MINIMUM: u8 = 0x34;
const TAG_PHYSICAL_MAXIMUM: u8 = 0x44;
const TAG_UNIT_EXPONENT: u8 = 0x54;
const TAG_UNIT: u8 = 0x64;
const TAG_REPORT_SIZE: u8 = 0x74;
const TAG_REPORT_ID: u8 = 0x84;
const TAG_REPORT_COUNT: u8 = 0x94;
const TAG_PUSH: u8 = 0xA4;
const TAG_POP: u8 = 0xB4;

const TAG_USAGE: u8 = 0x08;
const TAG_USAGE_MINIMUM: u8 = 0x18;
const TAG_USAGE_MAXIMUM: u8 = 0x28;

const TAG_EXTENDED: u8 = 0xFC;

enum Tag {
    Long(u8),
    Short(u8),
}

/// Single pass parser turning a binary report descriptor into a [`Descriptor`].
#[derive(Default)]
pub struct Parser {
    stack_global: Vec<ParserGlobalState>,
    global: ParserGlobalState,
    local: ParserLocalState,
    collections: Vec<Collection>,
    current_collection: Option<usize>,
    elements: Vec<Element>,
    reports: Vec<ParserReport>,
}

impl Parser {
    pub fn parse(mut self, data: &[u8]) -> Result<Descriptor, super::Error> {
        let mut it = data.iter().copied();

        self.inner_parse(&mut it)?;

        if self.current_collection.is_some() {
            return Err(Error::MissingEndCollection);
        }

        if !self.stack_global.is_empty() {
            return Err(Error::MissingPop);
        }

        Ok(self.finish())
    }

    fn inner_parse(&mut self, it: &mut dyn Iterator<Item = u8>) -> Result<(), super::Error> {
        while let Some(byte) = it.next() {
            let (len, tag) = if byte & TAG_MASK == TAG_EXTENDED {
                let len = it.next().ok_or(Error::UnexpectedEndOfReportDescriptor)?;
                let tag = it.next().ok_or(Error::UnexpectedEndOfReportDescriptor)?;

                (len, Tag::Long(tag))
            } else {
                let mut len = byte & LEN_MASK;
                let tag = byte & TAG_MASK;
                if len == 3 {
                    len = 4;
                }

                (len, Tag::Short(tag))
            };

            let data = Vec::from_iter(it.take(len as usize));
            if data.len() != len as usize {
                return Err(Error::UnexpectedEndOfReportDescriptor);
            }
            let value = ItemData::from_bytes(&data);

            match tag {
                Tag::Short(TAG_USAGE_PAGE) => self.global.usage_page = Some(value.unsigned),
                Tag::Short(TAG_USAGE) => self.local.usages.push(Usage::from_item(&data, value)),
                Tag::Short(TAG_USAGE_MINIMUM) => {
                    self.local.usage_minimum = Some(Usage::from_item(&data, value))
                }
                Tag::Short(TAG_USAGE_MAXIMUM) => {
                    self.local.usage_maximum = Some(Usage::from_item(&data, value))
                }
                Tag::Short(TAG_COLLECTION) => self.open_collection(value.unsigned),
                Tag::Short(TAG_COLLECTION_END) => self.close_collection()?,
                Tag::Short(TAG_REPORT_SIZE) => self.global.report_size = Some(value.unsigned),
                Tag::Short(TAG_REPORT_ID) => self.global.report_id = Some(value.unsigned),
                Tag::Short(TAG_REPORT_COUNT) => self.global.report_count = Some(value.unsigned),
                Tag::Short(TAG_LOGICAL_MINIMUM) => self.global.logical_minimum = Some(value.signed),
                Tag::Short(TAG_LOGICAL_MAXIMUM) => self.global.logical_maximum = Some(value),
                Tag::Short(TAG_PHYSICAL_MINIMUM) => {
                    self.global.physical_minimum = Some(value.signed)
                }
                Tag::Short(TAG_PHYSICAL_MAXIMUM) => self.global.physical_maximum = Some(value),
                Tag::Short(TAG_UNIT) => self.global.unit = Some(value.unsigned),
                Tag::Short(TAG_UNIT_EXPONENT) => self.global.unit_exponent = Some(value.signed),
                Tag::Short(TAG_INPUT) => self.add_elements(ReportType::Input, value.unsigned)?,
                Tag::Short(TAG_OUTPUT) => self.add_elements(ReportType::Output, value.unsigned)?,
                Tag::Short(TAG_FEATURE) => self.add_elements(ReportType::Feature, value.unsigned)?,
                Tag::Short(TAG_PUSH) => self.stack_global.push(self.global.clone()),
                Tag::Short(TAG_POP) => {
                    self.global = self.stack_global.pop().ok_or(Error::PopWithoutPush)?
                }

                Tag::Short(x) | Tag::Long(x) => {
                    log::warn!("skipping unknown or unsupported tag {x:#x} with data {data:?}")
                }
            }
        }

        Ok(())
    }

    fn open_collection(&mut self, r#type: u32) {
        let usage = self.local.usage(0);
        let parent_index = self.current_collection.map_or(-1, |index| index as i32);

        self.current_collection = Some(self.collections.len());
        self.collections.push(Collection {
            r#type: CollectionType::from_item_data(r#type),
            usage: usage.map_or(0, |usage| usage.id),
            usage_page: self.usage_page(usage),
            parent_index,
            first_child_index: self.elements.len() as u32,
            child_count: 0,
        });

        self.local = ParserLocalState::default();
    }

    fn close_collection(&mut self) -> Result<(), Error> {
        let index = self
            .current_collection
            .ok_or(Error::UnexpectedEndCollection)?;

        let element_count = self.elements.len() as u32;
        let collection = &mut self.collections[index];
        collection.child_count = element_count - collection.first_child_index;

        self.current_collection = usize::try_from(collection.parent_index).ok();
        self.local = ParserLocalState::default();

        Ok(())
    }

    fn add_elements(&mut self, r#type: ReportType, flags: u32) -> Result<(), Error> {
        let report_id = self.global.report_id.unwrap_or(1);
        let report_index = match self
            .reports
            .iter()
            .position(|report| report.id == report_id && report.r#type == r#type)
        {
            Some(index) => index,
            None => {
                self.reports.push(ParserReport {
                    id: report_id,
                    r#type,
                    bit_offset: 0,
                });
                self.reports.len() - 1
            }
        };

        let bit_size = self.global.report_size.unwrap_or(8);
        let count = self.global.report_count.unwrap_or(1);
        let start = self.reports[report_index].bit_offset;
        let end = (bit_size as u64)
            .checked_mul(count as u64)
            .and_then(|bits| bits.checked_add(start as u64))
            .filter(|end| *end <= MAX_REPORT_BITS && count as u64 <= MAX_REPORT_BITS)
            .ok_or(Error::ReportTooLarge { report_id })?;
        let (physical_min, physical_max) = self.global.physical_bounds();
        let collection_index = self.current_collection.map_or(-1, |index| index as i32);

        for i in 0..count {
            let usage = self.local.usage(i);
            let bit_offset = start + i * bit_size;

            self.elements.push(Element {
                usage: usage.map_or(0, |usage| usage.id),
                usage_page: self.usage_page(usage),
                unit: self.global.unit.unwrap_or(0),
                unit_exponent: self.global.unit_exponent.unwrap_or(0),
                logical_min: self.global.logical_min(),
                logical_max: self.global.logical_max(),
                physical_min,
                physical_max,
                report_type: r#type,
                collection_index,
                report_id,
                bit_size,
                bit_offset,
                flags: ElementFlags::from_bits_retain(flags),
                usage_min: self.local.usage_minimum.map(|usage| usage.id),
                usage_max: self.local.usage_maximum.map(|usage| usage.id),
            });
        }

        self.reports[report_index].bit_offset = end as u32;
        self.local = ParserLocalState::default();
        Ok(())
    }

    fn usage_page(&self, usage: Option<Usage>) -> u32 {
        usage
            .and_then(|usage| usage.page)
            .or(self.global.usage_page)
            .unwrap_or(0)
    }

    fn report_size(&self, r#type: ReportType) -> u32 {
        self.reports
            .iter()
            .filter(|report| report.r#type == r#type)
            .map(|report| report.bit_offset.div_ceil(8))
            .max()
            .unwrap_or(0)
    }

    fn finish(self) -> Descriptor {
        let (usage, usage_page) = self
            .collections
            .iter()
            .find(|c| c.is_root() && c.r#type == CollectionType::Application)
            .map_or((0, 0), |c| (c.usage, c.usage_page));

        Descriptor {
            vendor_id: 0,
            product_id: 0,
            usage,
            usage_page,
            input_report_size: self.report_size(ReportType::Input),
            output_report_size: self.report_size(ReportType::Output),
            feature_report_size: self.report_size(ReportType::Feature),
            elements: self.elements,
            collections: self.collections,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{CollectionType, Element, ElementFlags, Error, Parser, ReportType};

    const REPORT_DESCRIPTOR1: &[u8] = &[
        0x05, 0x01, 0x09, 0x06, 0xa1, 0x01, 0x85, 0x01, 0x05, 0x07, 0x19, 0xe0, 0x29, 0xe7, 0x15,
        0x00, 0x25, 0x01, 0x75, 0x01, 0x95, 0x08, 0x81, 0x02, 0x05, 0x07, 0x19, 0x00, 0x29, 0x97,
        0x15, 0x00, 0x25, 0x01, 0x75, 0x01, 0x96, 0x98, 0x00, 0x81, 0x02, 0xc0, 0x05, 0x01, 0x09,
        0x80, 0xa1, 0x01, 0x85, 0x02, 0x19, 0x00, 0x29, 0xb7, 0x15, 0x00, 0x26, 0xb7, 0x00, 0x95,
        0x01, 0x75, 0x08, 0x81, 0x00, 0xc0, 0x05, 0x0c, 0x09, 0x01, 0xa1, 0x01, 0x85, 0x03, 0x1a,
        0x00, 0x00, 0x2a, 0x3c, 0x02, 0x15, 0x00, 0x26, 0x3c, 0x02, 0x75, 0x10, 0x95, 0x01, 0x81,
        0x00, 0xc0, 0x06, 0x52, 0xff, 0x0a, 0x10, 0x02, 0xa1, 0x01, 0x85, 0x07, 0x19, 0x01, 0x29,
        0x3f, 0x15, 0x00, 0x26, 0xff, 0x00, 0x75, 0x08, 0x95, 0x3f, 0x81, 0x00, 0x19, 0x01, 0x29,
        0x3f, 0x15, 0x00, 0x26, 0xff, 0x00, 0x75, 0x08, 0x95, 0x3f, 0xb1, 0x02, 0xc0,
    ];

    // Gamepad with a report id: four byte axes, a hat with a null state,
    // fourteen buttons, vendor padding and an output report.
    const GAMEPAD_DESCRIPTOR: &[u8] = &[
        0x05, 0x01, 0x09, 0x05, 0xA1, 0x01, 0x85, 0x01, 0x09, 0x30, 0x09, 0x31, 0x09, 0x32, 0x09,
        0x35, 0x15, 0x00, 0x26, 0xFF, 0x00, 0x75, 0x08, 0x95, 0x04, 0x81, 0x02, 0x09, 0x39, 0x15,
        0x00, 0x25, 0x07, 0x35, 0x00, 0x46, 0x3B, 0x01, 0x65, 0x14, 0x75, 0x04, 0x95, 0x01, 0x81,
        0x42, 0x65, 0x00, 0x05, 0x09, 0x19, 0x01, 0x29, 0x0E, 0x15, 0x00, 0x25, 0x01, 0x75, 0x01,
        0x95, 0x0E, 0x81, 0x02, 0x06, 0x00, 0xFF, 0x09, 0x21, 0x95, 0x36, 0x81, 0x02, 0x85, 0x05,
        0x09, 0x22, 0x95, 0x1F, 0x91, 0x02, 0xC0,
    ];

    #[test]
    fn test1() {
        let descriptor = Parser::default().parse(REPORT_DESCRIPTOR1).unwrap();

        assert_eq!(descriptor.usage_page, 0x01);
        assert_eq!(descriptor.usage, 0x06);
        assert_eq!(descriptor.elements.len(), 160 + 1 + 1 + 63 + 63);
        assert_eq!(descriptor.collections.len(), 4);
        assert_eq!(descriptor.input_report_size, 63);
        assert_eq!(descriptor.output_report_size, 0);
        assert_eq!(descriptor.feature_report_size, 63);

        let collections = &descriptor.collections;
        assert!(collections.iter().all(|c| c.is_root()));
        assert!(collections.iter().all(|c| c.r#type == CollectionType::Application));
        assert_eq!(collections[0].child_count, 160);
        assert_eq!(collections[1].first_child_index, 160);
        assert_eq!(collections[1].usage, 0x80);
        assert_eq!(collections[2].usage_page, 0x0C);
        assert_eq!(collections[3].usage_page, 0xFF52);
        assert_eq!(collections[3].usage, 0x0210);
        assert_eq!(collections[3].child_count, 126);

        assert_eq!(
            descriptor.elements[0],
            Element {
                usage: 0xE0,
                usage_page: 0x07,
                unit: 0,
                unit_exponent: 0,
                logical_min: 0,
                logical_max: 1,
                physical_min: 0,
                physical_max: 1,
                report_type: ReportType::Input,
                collection_index: 0,
                report_id: 1,
                bit_size: 1,
                bit_offset: 0,
                flags: ElementFlags::VARIABLE,
                usage_min: Some(0xE0),
                usage_max: Some(0xE7),
            }
        );

        let last_key = &descriptor.elements[159];
        assert_eq!(last_key.usage, 0x97);
        assert_eq!(last_key.bit_offset, 159);

        let system = &descriptor.elements[160];
        assert_eq!(system.report_id, 2);
        assert_eq!(system.bit_offset, 0);
        assert_eq!(system.logical_max, 183);
        assert!(system.is_array());
        assert_eq!(system.collection_index, 1);

        let consumer = &descriptor.elements[161];
        assert_eq!(consumer.usage_page, 0x0C);
        assert_eq!(consumer.bit_size, 16);
        assert_eq!(consumer.logical_max, 0x023C);
        assert_eq!(consumer.usage_max, Some(0x023C));

        let vendor_input = &descriptor.elements[224];
        assert_eq!(vendor_input.report_type, ReportType::Input);
        assert_eq!(vendor_input.usage, 0x3F);
        assert_eq!(vendor_input.bit_offset, 62 * 8);
        assert_eq!(vendor_input.logical_max, 255);

        let vendor_feature = &descriptor.elements[225];
        assert_eq!(vendor_feature.report_type, ReportType::Feature);
        assert_eq!(vendor_feature.usage, 0x01);
        assert_eq!(vendor_feature.bit_offset, 0);
    }

    #[test]
    fn gamepad_offsets_and_ranges() {
        let descriptor = Parser::default().parse(GAMEPAD_DESCRIPTOR).unwrap();

        assert_eq!(descriptor.usage_page, 0x01);
        assert_eq!(descriptor.usage, 0x05);
        assert_eq!(descriptor.elements.len(), 4 + 1 + 14 + 54 + 31);
        assert_eq!(descriptor.input_report_size, 13);
        assert_eq!(descriptor.output_report_size, 4);

        let elements = &descriptor.elements;
        let usages: Vec<u32> = elements[..4].iter().map(|e| e.usage).collect();
        assert_eq!(usages, [0x30, 0x31, 0x32, 0x35]);
        assert_eq!(elements[0].report_id, 1);
        assert_eq!(elements[0].bit_offset, 0);
        assert_eq!(elements[1].bit_offset, 8);
        assert_eq!(elements[1].logical_max, 255);
        assert_eq!(elements[1].physical_max, 255);

        let hat = &elements[4];
        assert_eq!(hat.usage, 0x39);
        assert_eq!(hat.bit_offset, 32);
        assert_eq!(hat.bit_size, 4);
        assert!(hat.has_null_state());
        assert_eq!(hat.physical_min, 0);
        assert_eq!(hat.physical_max, 315);
        assert_eq!(hat.unit, 0x14);

        let first_button = &elements[5];
        assert_eq!(first_button.unit, 0);
        assert_eq!(first_button.usage_page, 0x09);
        assert_eq!(first_button.usage, 1);
        assert_eq!(first_button.bit_offset, 4 * 8 + 4);
        assert_eq!(elements[18].usage, 14);

        let output = elements.last().unwrap();
        assert_eq!(output.report_type, ReportType::Output);
        assert_eq!(output.report_id, 5);
        assert_eq!(output.usage_page, 0xFF00);
        assert_eq!(output.bit_offset, 30);
    }

    #[test]
    fn signed_bounds() {
        let descriptor = Parser::default()
            .parse(&[
                0x05, 0x01, 0x09, 0x04, 0xA1, 0x01, 0x09, 0x30, 0x15, 0x81, 0x25, 0x7F, 0x75, 0x08,
                0x95, 0x01, 0x81, 0x02, 0x09, 0x31, 0x16, 0x00, 0x80, 0x26, 0xFF, 0x7F, 0x75, 0x10,
                0x81, 0x02, 0x09, 0x32, 0x15, 0x00, 0x25, 0xFF, 0x75, 0x08, 0x81, 0x02, 0xC0,
            ])
            .unwrap();

        let elements = &descriptor.elements;
        assert_eq!((elements[0].logical_min, elements[0].logical_max), (-127, 127));
        assert_eq!((elements[1].logical_min, elements[1].logical_max), (-32768, 32767));
        assert_eq!(elements[1].bit_offset, 8);
        // Unsigned minimum keeps a one byte 0xFF maximum unsigned.
        assert_eq!((elements[2].logical_min, elements[2].logical_max), (0, 255));
    }

    #[test]
    fn extended_usage_carries_page() {
        let descriptor = Parser::default()
            .parse(&[
                0x05, 0x01, 0x09, 0x05, 0xA1, 0x01, 0x0B, 0x01, 0x00, 0x09, 0x00, 0x25, 0x01, 0x75,
                0x01, 0x95, 0x01, 0x81, 0x02, 0xC0,
            ])
            .unwrap();

        assert_eq!(descriptor.elements[0].usage_page, 0x09);
        assert_eq!(descriptor.elements[0].usage, 0x01);
    }

    #[test]
    fn push_pop() {
        let descriptor = Parser::default()
            .parse(&[
                0x05, 0x01, 0x09, 0x05, 0xA1, 0x01, 0x75, 0x08, 0xA4, 0x75, 0x10, 0x09, 0x30, 0x81,
                0x02, 0xB4, 0x09, 0x31, 0x81, 0x02, 0xC0,
            ])
            .unwrap();

        assert_eq!(descriptor.elements[0].bit_size, 16);
        assert_eq!(descriptor.elements[1].bit_size, 8);
        assert_eq!(descriptor.elements[1].bit_offset, 16);
    }

    #[test]
    fn nested_collections() {
        let descriptor = Parser::default()
            .parse(&[
                0x05, 0x01, 0x09, 0x04, 0xA1, 0x01, 0x09, 0x01, 0xA1, 0x00, 0x09, 0x30, 0x09, 0x31,
                0x75, 0x08, 0x95, 0x02, 0x81, 0x02, 0xC0, 0x05, 0x09, 0x09, 0x01, 0x75, 0x01, 0x95,
                0x01, 0x81, 0x02, 0xC0,
            ])
            .unwrap();

        let collections = &descriptor.collections;
        assert_eq!(collections.len(), 2);
        assert_eq!(collections[0].child_count, 3);
        assert_eq!(collections[1].r#type, CollectionType::Physical);
        assert_eq!(collections[1].parent_index, 0);
        assert_eq!(collections[1].usage, 0x01);
        assert_eq!(collections[1].child_count, 2);
        assert_eq!(descriptor.elements[0].collection_index, 1);
        assert_eq!(descriptor.elements[2].collection_index, 0);
        assert_eq!(descriptor.usage, 0x04);
    }

    #[test]
    fn malformed() {
        assert!(matches!(
            Parser::default().parse(&[0x05, 0x01, 0xA1, 0x01]),
            Err(Error::MissingEndCollection)
        ));
        assert!(matches!(
            Parser::default().parse(&[0xC0]),
            Err(Error::UnexpectedEndCollection)
        ));
        assert!(matches!(
            Parser::default().parse(&[0x26, 0xFF]),
            Err(Error::UnexpectedEndOfReportDescriptor)
        ));
        assert!(matches!(
            Parser::default().parse(&[0xB4]),
            Err(Error::PopWithoutPush)
        ));
        assert!(matches!(
            Parser::default().parse(&[0xA4]),
            Err(Error::MissingPop)
        ));
    }

    #[test]
    fn oversized_reports() {
        // Report Count (0x100000), Input
        assert!(matches!(
            Parser::default().parse(&[0x97, 0x00, 0x00, 0x10, 0x00, 0x81, 0x02]),
            Err(Error::ReportTooLarge { report_id: 1 })
        ));
        // Report Size (0xFFFFFFFF), Report Count (0xFFFFFFFF), Input
        assert!(matches!(
            Parser::default().parse(&[
                0x77, 0xFF, 0xFF, 0xFF, 0xFF, 0x97, 0xFF, 0xFF, 0xFF, 0xFF, 0x81, 0x02
            ]),
            Err(Error::ReportTooLarge { report_id: 1 })
        ));
        // Report Size (0), Report Count (0xFFFFFFFF), Input
        assert!(matches!(
            Parser::default().parse(&[0x75, 0x00, 0x97, 0xFF, 0xFF, 0xFF, 0xFF, 0x81, 0x02]),
            Err(Error::ReportTooLarge { report_id: 1 })
        ));
        // Report Size (8), Report Count (0x4000) fills the largest report exactly,
        // one more byte in the same report does not fit.
        let full = [0x75, 0x08, 0x96, 0x00, 0x40, 0x81, 0x02];
        let descriptor = Parser::default().parse(&full).unwrap();
        assert_eq!(descriptor.elements.len(), 0x4000);
        assert_eq!(descriptor.input_report_size, 16384);

        let mut overflowing = full.to_vec();
        overflowing.extend([0x95, 0x01, 0x81, 0x02]);
        assert!(matches!(
            Parser::default().parse(&overflowing),
            Err(Error::ReportTooLarge { report_id: 1 })
        ));
    }
}
