//! Turns a descriptor into a complete, named layout with its match key.

use crate::classify::ElementClassifier;
use crate::hat;
use crate::layout::BaseLayout;
use crate::layout::ControlLayoutTree;
use crate::layout::ControlNode;
use crate::layout::DeviceMatchKey;
use crate::layout::LayoutKind;
use crate::layout::SynthesizedLayout;
use crate::names::uniquify;
use crate::options::SynthesisOptions;
use crate::stick;
use crate::Error;
use crate::Malformed;
use hrd::usage::usage_name;
use hrd::usage::PageName;
use hrd::Descriptor;
use hrd::Element;
use hrd::GenericDesktop;
use hrd::ReportType;
use hrd::UsagePage;

/// Strings the device reports about itself. Empty strings count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    pub manufacturer: Option<String>,
    pub product: Option<String>,
}

impl DeviceInfo {
    pub fn new(manufacturer: Option<&str>, product: Option<&str>) -> Self {
        Self {
            manufacturer: manufacturer.map(str::to_string),
            product: product.map(str::to_string),
        }
    }

    fn manufacturer(&self) -> Option<&str> {
        self.manufacturer.as_deref().filter(|s| !s.is_empty())
    }

    fn product(&self) -> Option<&str> {
        self.product.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Default)]
pub struct LayoutAssembler {
    options: SynthesisOptions,
}

/// Synthesizes a layout with default options.
pub fn synthesize(descriptor: &Descriptor, info: &DeviceInfo) -> Result<SynthesizedLayout, Error> {
    LayoutAssembler::default().assemble(descriptor, info)
}

impl LayoutAssembler {
    pub fn new(options: SynthesisOptions) -> Self {
        Self { options }
    }

    pub fn assemble(
        &self,
        descriptor: &Descriptor,
        info: &DeviceInfo,
    ) -> Result<SynthesizedLayout, Error> {
        if !self
            .options
            .is_supported(descriptor.usage_page, descriptor.usage)
        {
            return Err(Error::UnsupportedUsage {
                usage_page: descriptor.usage_page,
                usage: descriptor.usage,
            });
        }

        validate(descriptor)?;

        let Some(report_id) = descriptor
            .inputs()
            .find(|e| e.is_usable())
            .map(|e| e.report_id)
        else {
            return Err(Error::NoUsableElements);
        };

        let base_layout = base_layout(descriptor);
        let (name, match_key) = identity(descriptor, info, base_layout)?;

        let mut elements = Vec::new();
        for element in descriptor.inputs() {
            if element.report_id == report_id {
                elements.push(element);
            } else {
                log::warn!(
                    "{name}: skipping {} in input report {}, only report {report_id} is mapped",
                    element.determine_name(),
                    element.report_id,
                );
            }
        }

        let mut controls = Vec::new();
        let stick = stick::synthesize(&elements);
        let consumed = stick.as_ref().map(|s| [s.x, s.y]);
        if let Some(stick) = stick {
            controls.push(stick.control);
        }

        for (position, element) in elements.iter().enumerate() {
            if consumed.is_some_and(|c| c.contains(&position)) {
                continue;
            }

            match self.control(element, descriptor) {
                Some(mut control) => {
                    let taken = controls
                        .iter()
                        .map(|c: &ControlNode| c.name.as_str())
                        .collect::<Vec<_>>();
                    control.name = uniquify(&control.name, &taken);
                    controls.push(control);
                }
                None => log::debug!(
                    "{name}: no control for usage page {:#x} usage {:#x}",
                    element.usage_page,
                    element.usage,
                ),
            }
        }

        log::info!("{name}: synthesized {} controls on {base_layout}", controls.len());

        Ok(SynthesizedLayout {
            tree: ControlLayoutTree {
                display_name: info.product().map(str::to_string),
                controls,
            },
            name,
            base_layout,
            match_key,
        })
    }

    fn control(&self, element: &Element, descriptor: &Descriptor) -> Option<ControlNode> {
        let layout_kind = element.determine_layout()?;

        let mut control = ControlNode::new(element.determine_name(), layout_kind).at_bits(
            element.bit_offset,
            element.bit_size,
            0,
        );
        control.display_name = element.determine_display_name();
        control.format = element.determine_format();
        control.default_state = element.determine_default_state();
        control.parameters = element.determine_parameters().unwrap_or_default();
        control.processors = element.determine_processors();
        control.usages = element.determine_usages();

        if layout_kind == LayoutKind::Dpad {
            let encoding = self
                .options
                .hat_encoding(descriptor.vendor_id, descriptor.product_id);
            control.children = hat::decompose(element, encoding);
        }

        Some(control)
    }
}

fn validate(descriptor: &Descriptor) -> Result<(), Malformed> {
    for (index, element) in descriptor.iter().enumerate() {
        if element.bit_size == 0 {
            return Err(Malformed::ZeroSizedElement { index });
        }

        let report_bytes = match element.report_type {
            ReportType::Input => descriptor.input_report_size,
            ReportType::Output => descriptor.output_report_size,
            ReportType::Feature => descriptor.feature_report_size,
            ReportType::Unknown => 0,
        };
        // Unknown sizes are not checked.
        let report_bits = report_bytes as u64 * 8;
        if report_bits != 0 && element.bit_end() > report_bits {
            return Err(Malformed::ElementOutOfBounds {
                index,
                bit_end: element.bit_end(),
                report_bits,
            });
        }
    }
    Ok(())
}

fn base_layout(descriptor: &Descriptor) -> BaseLayout {
    let is = |usage: GenericDesktop| {
        descriptor.usage_page == UsagePage::GenericDesktop as u32 && descriptor.usage == usage as u32
    };
    if is(GenericDesktop::Joystick) || is(GenericDesktop::Gamepad) {
        BaseLayout::Joystick
    } else {
        BaseLayout::Hid
    }
}

/// Suffix that tells apart layouts of different top-level collections of the
/// same device. Joysticks get none.
fn usage_suffix(descriptor: &Descriptor, base_layout: BaseLayout) -> String {
    if base_layout == BaseLayout::Joystick {
        return String::new();
    }

    match usage_name(descriptor.usage_page, descriptor.usage) {
        Some(name) => format!(" {name}"),
        None => format!(" {}-{}", PageName(descriptor.usage_page), descriptor.usage),
    }
}

fn identity(
    descriptor: &Descriptor,
    info: &DeviceInfo,
    base_layout: BaseLayout,
) -> Result<(String, DeviceMatchKey), Error> {
    let suffix = usage_suffix(descriptor, base_layout);

    let Some(product) = info.product() else {
        if descriptor.vendor_id == 0 {
            return Err(Error::AmbiguousIdentity);
        }
        let name = format!(
            "{:X}-{:X}{suffix}",
            descriptor.vendor_id, descriptor.product_id
        );
        let key = DeviceMatchKey::Ids {
            vendor_id: descriptor.vendor_id,
            product_id: descriptor.product_id,
            usage: descriptor.usage,
            usage_page: descriptor.usage_page,
        };
        return Ok((name, key));
    };

    let name = match info.manufacturer() {
        Some(manufacturer) => format!("{manufacturer} {product}{suffix}"),
        None => format!("{product}{suffix}"),
    };
    let key = DeviceMatchKey::Strings {
        manufacturer_pattern: info.manufacturer().unwrap_or_default().to_string(),
        product_pattern: product.to_string(),
        usage: descriptor.usage,
        usage_page: descriptor.usage_page,
    };
    Ok((name, key))
}
