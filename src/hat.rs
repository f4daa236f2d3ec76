//! Splits an eight-way hat switch into four directional buttons.
//!
//! A hat reports one of eight consecutive logical values, each a compass
//! direction 45 degrees from the next. A direction button is pressed for its
//! own value and the two diagonals next to it, so each window spans three
//! values. The window around the first value also contains the last one and
//! wraps.

use crate::classify::ElementClassifier;
use crate::layout::ControlNode;
use crate::layout::FormatCode;
use crate::layout::LayoutKind;
use hrd::Element;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Children are emitted in this order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn quarter_turns(self) -> i64 {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Right => "Right",
            Direction::Down => "Down",
            Direction::Left => "Left",
        }
    }
}

/// Which direction the minimum logical value stands for, and which way the
/// values turn from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HatEncoding {
    pub start: Direction,
    pub clockwise: bool,
}

impl Default for HatEncoding {
    fn default() -> Self {
        Self {
            start: Direction::Up,
            clockwise: true,
        }
    }
}

/// Inclusive range of logical values for which a direction is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub min: i64,
    pub max: i64,
}

impl Window {
    pub fn wraps(&self) -> bool {
        self.min > self.max
    }

    pub fn contains(&self, value: i64) -> bool {
        if self.wraps() {
            value >= self.min || value <= self.max
        } else {
            (self.min..=self.max).contains(&value)
        }
    }
}

impl HatEncoding {
    /// Window for `direction` on a hat whose values start at `logical_min`.
    pub fn window(&self, direction: Direction, logical_min: i64) -> Window {
        let turns = direction.quarter_turns() - self.start.quarter_turns();
        let steps = if self.clockwise { 2 * turns } else { -2 * turns };
        let center = steps.rem_euclid(8);

        Window {
            min: logical_min + (center + 7) % 8,
            max: logical_min + (center + 1) % 8,
        }
    }
}

/// Directional children of a Dpad built from `element`. Offsets are relative to
/// the hat's own byte.
pub fn decompose(element: &Element, encoding: HatEncoding) -> Vec<ControlNode> {
    let logical_min = element.logical_min as i64;
    let logical_max = element.logical_max as i64;
    let null_value = element.determine_default_state();

    Direction::ALL
        .into_iter()
        .map(|direction| {
            let window = encoding.window(direction, logical_min);

            let mut parameters = format!("minValue={},maxValue={}", window.min, window.max);
            if window.wraps() {
                if let Some(null_value) = null_value {
                    parameters.push_str(&format!(",nullValue={null_value}"));
                }
                parameters.push_str(&format!(",wrapAtValue={logical_max}"));
            }

            let mut button = ControlNode::new(direction.to_string(), LayoutKind::DiscreteButton)
                .at_bits(element.bit_offset % 8, element.bit_size, 0);
            button.display_name = Some(direction.display_name().to_string());
            button.format = FormatCode::Bit;
            button.parameters = parameters;
            button
        })
        .collect()
}
