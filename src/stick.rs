//! Merges the first X and Y axes into one two-dimensional stick control.
//!
//! The stick's children read the same bits as the axes they come from. The
//! directional buttons carry directives for the runtime, applied to the
//! normalized axis value in order: `normalize`, then `clamp` to one half of the
//! axis, then `invert`. A later directive overrides an earlier one with the
//! same key, so the trailing `invert` of a button wins over a leading
//! `invert` inherited from the axis. Every button reads positive when pressed.

use crate::classify::join_parameters;
use crate::classify::ElementClassifier;
use crate::layout::usages;
use crate::layout::ControlNode;
use crate::layout::FormatCode;
use crate::layout::LayoutKind;
use hrd::Element;
use hrd::GenericDesktop;

const NEGATIVE_HALF: &str = "clamp=2,clampMin=-1,clampMax=0,invert=true";
const POSITIVE_HALF: &str = "clamp=2,clampMin=0,clampMax=1,invert=false";

pub struct Stick {
    pub control: ControlNode,
    /// Position of the consumed X element in the slice given to [`synthesize`].
    pub x: usize,
    /// Position of the consumed Y element.
    pub y: usize,
}

/// Builds a stick from the first X and first Y element carrying input data.
pub fn synthesize(elements: &[&Element]) -> Option<Stick> {
    let find = |usage| {
        elements
            .iter()
            .position(|e| e.carries_input_data() && e.is_generic_desktop(usage))
    };
    let x = find(GenericDesktop::X)?;
    let y = find(GenericDesktop::Y)?;
    let (x_element, y_element) = (elements[x], elements[y]);

    let start = x_element.bit_offset.min(y_element.bit_offset);
    let end = x_element.bit_end().max(y_element.bit_end());
    let base_byte = start / 8;

    log::trace!("stick spans bits {start}..{end} from x and y");

    let mut control = ControlNode::new("stick", LayoutKind::Stick).at_bits(
        start,
        (end - start as u64) as u32,
        0,
    );
    control.display_name = Some("Stick".to_string());
    control.format = FormatCode::Bit;
    control.usages = vec![usages::PRIMARY_2D_MOTION.to_string()];

    let x_axis = axis_child(x_element, "x", "X", base_byte);
    let y_axis = axis_child(y_element, "y", "Y", base_byte);

    control.children = vec![
        half_axis_button(&y_axis, "up", "Up", NEGATIVE_HALF),
        half_axis_button(&y_axis, "down", "Down", POSITIVE_HALF),
        half_axis_button(&x_axis, "left", "Left", NEGATIVE_HALF),
        half_axis_button(&x_axis, "right", "Right", POSITIVE_HALF),
    ];
    control.children.insert(0, y_axis);
    control.children.insert(0, x_axis);

    Some(Stick { control, x, y })
}

fn axis_child(element: &Element, name: &str, display_name: &str, base_byte: u32) -> ControlNode {
    let mut axis = ControlNode::new(name, LayoutKind::Axis).at_bits(
        element.bit_offset,
        element.bit_size,
        base_byte,
    );
    axis.display_name = Some(display_name.to_string());
    axis.format = element.determine_format();
    axis.default_state = element.determine_default_state();
    axis.parameters = element.determine_parameters().unwrap_or_default();
    axis.processors = element.determine_processors();
    axis
}

fn half_axis_button(axis: &ControlNode, name: &str, display_name: &str, half: &str) -> ControlNode {
    let parameters = join_parameters([Some(axis.parameters.clone()), Some(half.to_string())]);

    ControlNode {
        name: name.to_string(),
        display_name: Some(display_name.to_string()),
        layout_kind: LayoutKind::Button,
        parameters: parameters.unwrap_or_default(),
        processors: None,
        usages: Vec::new(),
        children: Vec::new(),
        ..axis.clone()
    }
}
