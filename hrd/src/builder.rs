use crate::usage::GenericDesktop;
use crate::usage::UsagePage;
use crate::Descriptor;
use crate::Element;
use crate::ElementFlags;
use crate::Error;
use crate::ReportType;

/// Fluent helper for assembling descriptors by hand, laying elements out back
/// to back within the current report.
///
/// ```
/// use hrd::{DescriptorBuilder, GenericDesktop, ReportType, UsagePage};
///
/// let descriptor = DescriptorBuilder::generic_desktop(GenericDesktop::Gamepad)
///     .start_report(ReportType::Input, 1)
///     .add_generic_desktop(GenericDesktop::X, 16)
///     .with_logical_min_max(-32768, 32767)
///     .add_element(UsagePage::Button, 1, 1)
///     .finish()
///     .unwrap();
///
/// assert_eq!(descriptor.elements[1].bit_offset, 16);
/// ```
#[derive(Debug, Default)]
pub struct DescriptorBuilder {
    usage_page: u32,
    usage: u32,
    vendor_id: u32,
    product_id: u32,
    report_id: u32,
    report_type: ReportType,
    bit_offset: u32,
    elements: Vec<Element>,
    error: Option<Error>,
}

impl DescriptorBuilder {
    pub fn new(usage_page: UsagePage, usage: u32) -> Self {
        Self {
            usage_page: usage_page as u32,
            usage,
            ..Default::default()
        }
    }

    pub fn generic_desktop(usage: GenericDesktop) -> Self {
        Self::new(UsagePage::GenericDesktop, usage as u32)
    }

    pub fn with_ids(mut self, vendor_id: u32, product_id: u32) -> Self {
        self.vendor_id = vendor_id;
        self.product_id = product_id;
        self
    }

    pub fn start_report(mut self, report_type: ReportType, report_id: u32) -> Self {
        self.report_type = report_type;
        self.report_id = report_id;
        self.bit_offset = 0;
        self
    }

    pub fn add_element(mut self, usage_page: UsagePage, usage: u32, bit_size: u32) -> Self {
        let usage_page = usage_page as u32;
        let duplicate = self.elements.iter().any(|element| {
            element.report_id == self.report_id
                && element.report_type == self.report_type
                && element.usage_page == usage_page
                && element.usage == usage
        });
        if duplicate && self.error.is_none() {
            self.error = Some(Error::DuplicateElement { usage_page, usage });
        }

        self.elements.push(Element {
            usage,
            usage_page,
            report_type: self.report_type,
            report_id: self.report_id,
            collection_index: -1,
            bit_size,
            bit_offset: self.bit_offset,
            flags: ElementFlags::VARIABLE,
            ..Default::default()
        });
        self.bit_offset += bit_size;
        self
    }

    pub fn add_generic_desktop(self, usage: GenericDesktop, bit_size: u32) -> Self {
        self.add_element(UsagePage::GenericDesktop, usage as u32, bit_size)
    }

    pub fn with_logical_min_max(self, min: i32, max: i32) -> Self {
        self.last_element(|element| {
            element.logical_min = min;
            element.logical_max = max;
        })
    }

    pub fn with_physical_min_max(self, min: i32, max: i32) -> Self {
        self.last_element(|element| {
            element.physical_min = min;
            element.physical_max = max;
        })
    }

    pub fn with_flags(self, flags: ElementFlags) -> Self {
        self.last_element(|element| element.flags = flags)
    }

    fn last_element(mut self, f: impl FnOnce(&mut Element)) -> Self {
        match self.elements.last_mut() {
            Some(element) => f(element),
            None => {
                self.error.get_or_insert(Error::NoElement);
            }
        }
        self
    }

    pub fn finish(self) -> Result<Descriptor, Error> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let report_bytes = |report_type: ReportType| {
            self.elements
                .iter()
                .filter(|element| element.report_type == report_type)
                .map(|element| element.bit_end().div_ceil(8) as u32)
                .max()
                .unwrap_or(0)
        };

        Ok(Descriptor {
            vendor_id: self.vendor_id,
            product_id: self.product_id,
            usage: self.usage,
            usage_page: self.usage_page,
            input_report_size: report_bytes(ReportType::Input),
            output_report_size: report_bytes(ReportType::Output),
            feature_report_size: report_bytes(ReportType::Feature),
            elements: self.elements,
            collections: Vec::new(),
        })
    }
}
