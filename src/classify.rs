//! Per-element classification: which control an element becomes and how its
//! bits are read.

use crate::layout::usages;
use crate::layout::FormatCode;
use crate::layout::LayoutKind;
use crate::layout::PrimitiveValue;
use hrd::Element;
use hrd::GenericDesktop;
use hrd::UsagePage;

pub const AXIS_DEADZONE: &str = "axisDeadzone";

/// Axes read top to bottom by HID are flipped so that up is positive.
const INVERTED_AXES: [GenericDesktop; 4] = [
    GenericDesktop::Y,
    GenericDesktop::Ry,
    GenericDesktop::Vy,
    GenericDesktop::Vbry,
];

pub fn is_axis(usage: GenericDesktop) -> bool {
    use GenericDesktop::*;
    matches!(
        usage,
        X | Y | Z | Rx | Ry | Rz | Vx | Vy | Vz | Vbrx | Vbry | Vbrz | Slider | Dial | Wheel
    )
}

/// Generic desktop usages that behave as plain buttons.
pub fn is_button(usage: GenericDesktop) -> bool {
    use GenericDesktop::*;
    matches!(usage, Select | Start | DpadUp | DpadDown | DpadLeft | DpadRight)
}

pub trait ElementClassifier {
    /// Input, variable, non constant element: the only kind that becomes a control.
    fn carries_input_data(&self) -> bool;
    fn is_usable(&self) -> bool;
    fn determine_layout(&self) -> Option<LayoutKind>;
    fn determine_format(&self) -> FormatCode;
    fn determine_default_state(&self) -> Option<PrimitiveValue>;
    fn determine_parameters(&self) -> Option<String>;
    fn determine_processors(&self) -> Option<String>;
    fn determine_usages(&self) -> Vec<String>;
    fn determine_name(&self) -> String;
    fn determine_display_name(&self) -> Option<String>;
}

impl ElementClassifier for Element {
    fn carries_input_data(&self) -> bool {
        self.is_input() && !self.is_array() && !self.is_constant()
    }

    // X and Y count even when nothing else does; they are merged into a stick.
    fn is_usable(&self) -> bool {
        self.is_generic_desktop(GenericDesktop::X)
            || self.is_generic_desktop(GenericDesktop::Y)
            || self.determine_layout().is_some()
    }

    fn determine_layout(&self) -> Option<LayoutKind> {
        if !self.carries_input_data() {
            return None;
        }

        if self.usage_page == UsagePage::Button as u32 {
            return Some(LayoutKind::Button);
        }

        match self.generic_desktop_usage()? {
            usage if is_axis(usage) => Some(LayoutKind::Axis),
            usage if is_button(usage) => Some(LayoutKind::Button),
            GenericDesktop::HatSwitch => hat_range_fits(self).then_some(LayoutKind::Dpad),
            _ => None,
        }
    }

    fn determine_format(&self) -> FormatCode {
        let signed = self.is_signed();
        match (self.bit_size, signed) {
            (8, true) => FormatCode::SignedByte,
            (8, false) => FormatCode::Byte,
            (16, true) => FormatCode::SignedShort,
            (16, false) => FormatCode::UShort,
            (32, true) => FormatCode::SignedInt,
            (32, false) => FormatCode::UInt,
            _ => FormatCode::Bit,
        }
    }

    fn determine_default_state(&self) -> Option<PrimitiveValue> {
        let usage = self.generic_desktop_usage()?;

        if usage == GenericDesktop::HatSwitch {
            if !self.has_null_state() {
                return None;
            }
            let min = self.logical_min as i64;
            let max = self.logical_max as i64;
            let null = if min >= 1 {
                min - 1
            } else if max < max_unsigned(self.bit_size) {
                max + 1
            } else {
                return None;
            };
            return Some(PrimitiveValue::from(null));
        }

        if is_axis(usage) && !self.is_signed() {
            let min = self.logical_min as i64;
            let max = self.logical_max as i64;
            let midpoint = min + (max - min) / 2;
            if midpoint != 0 {
                return Some(PrimitiveValue::from(midpoint));
            }
        }

        None
    }

    fn determine_parameters(&self) -> Option<String> {
        let usage = self.generic_desktop_usage()?;
        if !is_axis(usage) {
            return None;
        }

        let invert = INVERTED_AXES.contains(&usage).then(|| "invert".to_string());
        join_parameters([invert, normalization_parameters(self)])
    }

    fn determine_processors(&self) -> Option<String> {
        self.generic_desktop_usage()
            .filter(|usage| is_axis(*usage))
            .map(|_| AXIS_DEADZONE.to_string())
    }

    fn determine_usages(&self) -> Vec<String> {
        let tags: &[&str] = if self.usage_page == UsagePage::Button as u32 {
            match self.usage {
                1 => &[usages::PRIMARY_TRIGGER, usages::PRIMARY_ACTION],
                2 => &[usages::SECONDARY_TRIGGER, usages::SECONDARY_ACTION],
                _ => &[],
            }
        } else if self.is_generic_desktop(GenericDesktop::Rz) {
            &[usages::TWIST]
        } else {
            &[]
        };
        tags.iter().map(|tag| tag.to_string()).collect()
    }

    fn determine_name(&self) -> String {
        if self.usage_page == UsagePage::Button as u32 {
            return match self.usage {
                1 => "trigger".to_string(),
                n => format!("button{n}"),
            };
        }

        match self.generic_desktop_usage() {
            Some(GenericDesktop::HatSwitch) => "hat".to_string(),
            Some(usage) => lower_camel(&usage.to_string()),
            None => format!("usagepage({:x})usage({:x})", self.usage_page, self.usage),
        }
    }

    fn determine_display_name(&self) -> Option<String> {
        if self.usage_page == UsagePage::Button as u32 {
            return Some(match self.usage {
                1 => "Trigger".to_string(),
                n => format!("Button {n}"),
            });
        }

        match self.generic_desktop_usage()? {
            GenericDesktop::HatSwitch => Some("Hat".to_string()),
            usage => Some(usage.to_string()),
        }
    }
}

/// A hat needs eight consecutive logical values, one per direction.
fn hat_range_fits(element: &Element) -> bool {
    element.logical_max as i64 - element.logical_min as i64 == 7
}

fn max_unsigned(bit_size: u32) -> i64 {
    (1i64 << bit_size.min(32)) - 1
}

fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Joins directives with commas, dropping missing and empty parts.
pub fn join_parameters<I>(parts: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let joined = parts
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(",");
    (!joined.is_empty()).then_some(joined)
}

/// Maps the logical range onto the normalized range of the element's raw
/// storage: [-1, 1] for signed elements and [0, 1] for unsigned ones.
pub fn normalized_bounds(element: &Element) -> (f32, f32) {
    let bits = element.bit_size.clamp(1, 32);
    let min = element.logical_min as i64;
    let max = element.logical_max as i64;

    if element.is_signed() {
        let lower = -(1i64 << (bits - 1));
        let upper = (1i64 << (bits - 1)) - 1;
        let signed = |v| unit_interval(v, lower, upper) * 2.0 - 1.0;
        (signed(min), signed(max))
    } else {
        let upper = max_unsigned(bits);
        (unit_interval(min, 0, upper), unit_interval(max, 0, upper))
    }
}

fn unit_interval(value: i64, lower: i64, upper: i64) -> f32 {
    if value <= lower {
        0.0
    } else if value >= upper {
        1.0
    } else {
        ((value - lower) as f64 / (upper - lower) as f64) as f32
    }
}

fn approximately(a: f32, b: f32) -> bool {
    (b - a).abs() < (1e-6 * a.abs().max(b.abs())).max(f32::MIN_POSITIVE)
}

/// `normalize` directives that stretch the logical range to the full axis, or
/// `None` when both bounds already sit at zero.
pub fn normalization_parameters(element: &Element) -> Option<String> {
    if element.logical_min == 0 && element.logical_max == 0 {
        return Some("normalize,normalizeMin=0,normalizeMax=1,normalizeZero=0.5".to_string());
    }

    let (min, max) = normalized_bounds(element);
    if approximately(min, 0.0) && approximately(max, 0.0) {
        return None;
    }

    let zero = min + (max - min) / 2.0;
    Some(format!(
        "normalize,normalizeMin={min},normalizeMax={max},normalizeZero={zero}"
    ))
}
