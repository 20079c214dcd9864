//! Options - the typed configuration surface
//!
//! Options arrive as attribute-style strings (`data-hotline-step="5"`).
//! Raw strings are coerced into a [`Value`], then handed to the setter
//! registered for the option name. Names without a setter are refused,
//! and `events` can never be changed from outside.

use std::fmt;
use std::time::Duration;

use crate::ATTRIBUTE_PREFIX;
use crate::error::{HotlineError, Result};
use crate::host::Axis;

use super::state::Zone;

/// Option name that stays under the engine's control
pub const PROTECTED_OPTION: &str = "events";

/// Coerced attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Coerce a raw attribute string. Never fails: anything that is not a
    /// boolean word or a number stays text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" => return Self::Bool(true),
            "false" | "off" | "no" => return Self::Bool(false),
            _ => {}
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::Text(raw.to_string()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Number(n) => Some(*n != 0.0),
            Self::Text(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Time between loop ticks
    pub interval: Duration,
    /// Passive distance per tick; positive scrolls toward the leading edge
    pub step: f64,
    pub axis: Axis,
    /// Dragging with mouse or touch
    pub movable: bool,
    /// Wheel scrolling
    pub wheel: bool,
    /// Fixed wheel distance; `None` moves by the size of `step`
    pub delta: Option<f64>,
    /// Mouse button that starts a drag
    pub button: u16,
    /// Freeze while the pointer is inside the container
    pub hover: bool,
    /// Keep the freeze after a gesture ends
    pub sticky: bool,
    /// Zone released items snap into
    pub magnetic: Option<Zone>,
    /// Acceleration per motion step
    pub magnet: f64,
    /// Recycle items across the strip ends
    pub transfer: bool,
    /// Follow container attribute changes while running
    pub observe: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(10),
            step: 1.0,
            axis: Axis::Horizontal,
            movable: true,
            wheel: true,
            delta: None,
            button: 0,
            hover: true,
            sticky: false,
            magnetic: None,
            magnet: 1.0,
            transfer: true,
            observe: false,
        }
    }
}

type Setter = fn(&mut Options, &Value) -> Option<()>;

fn set_interval(o: &mut Options, v: &Value) -> Option<()> {
    let ms = v.as_number().filter(|n| *n >= 1.0)?;
    o.interval = Duration::from_millis(ms as u64);
    Some(())
}

fn set_step(o: &mut Options, v: &Value) -> Option<()> {
    o.step = v.as_number()?;
    Some(())
}

fn set_axis(o: &mut Options, v: &Value) -> Option<()> {
    o.axis = Axis::parse(v.as_text()?)?;
    Some(())
}

fn set_movable(o: &mut Options, v: &Value) -> Option<()> {
    o.movable = v.as_bool()?;
    Some(())
}

fn set_wheel(o: &mut Options, v: &Value) -> Option<()> {
    o.wheel = v.as_bool()?;
    Some(())
}

fn set_delta(o: &mut Options, v: &Value) -> Option<()> {
    o.delta = match v {
        Value::Number(n) if *n != 0.0 => Some(n.abs()),
        Value::Number(_) | Value::Bool(false) => None,
        _ => return None,
    };
    Some(())
}

fn set_button(o: &mut Options, v: &Value) -> Option<()> {
    let n = v.as_number().filter(|n| *n >= 0.0 && n.fract() == 0.0)?;
    o.button = n as u16;
    Some(())
}

fn set_hover(o: &mut Options, v: &Value) -> Option<()> {
    o.hover = v.as_bool()?;
    Some(())
}

fn set_sticky(o: &mut Options, v: &Value) -> Option<()> {
    o.sticky = v.as_bool()?;
    Some(())
}

fn set_magnetic(o: &mut Options, v: &Value) -> Option<()> {
    o.magnetic = match v {
        Value::Bool(false) => None,
        Value::Bool(true) => Some(Zone::Center),
        Value::Text(name) => Some(Zone::parse(name)?),
        Value::Number(_) => return None,
    };
    Some(())
}

fn set_magnet(o: &mut Options, v: &Value) -> Option<()> {
    o.magnet = v.as_number().filter(|n| *n > 0.0)?;
    Some(())
}

fn set_transfer(o: &mut Options, v: &Value) -> Option<()> {
    o.transfer = v.as_bool()?;
    Some(())
}

fn set_observe(o: &mut Options, v: &Value) -> Option<()> {
    o.observe = v.as_bool()?;
    Some(())
}

const SETTERS: &[(&str, Setter)] = &[
    ("interval", set_interval),
    ("step", set_step),
    ("axis", set_axis),
    ("movable", set_movable),
    ("wheel", set_wheel),
    ("delta", set_delta),
    ("button", set_button),
    ("hover", set_hover),
    ("sticky", set_sticky),
    ("magnetic", set_magnetic),
    ("magnet", set_magnet),
    ("transfer", set_transfer),
    ("observe", set_observe),
];

/// Strip the attribute prefix and normalise case
pub fn option_name(raw: &str) -> String {
    let lower = raw.trim().to_ascii_lowercase();
    match lower.strip_prefix(ATTRIBUTE_PREFIX) {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}

/// Whether an attribute name addresses this engine
pub fn is_option_attribute(raw: &str) -> bool {
    raw.trim().to_ascii_lowercase().starts_with(ATTRIBUTE_PREFIX)
}

impl Options {
    /// Every option name that accepts a value
    pub fn names() -> impl Iterator<Item = &'static str> {
        SETTERS.iter().map(|(name, _)| *name)
    }

    /// Apply one option. Returns the normalised name and coerced value.
    pub fn apply(&mut self, name: &str, raw: &str) -> Result<(String, Value)> {
        let name = option_name(name);
        if name == PROTECTED_OPTION {
            return Err(HotlineError::ProtectedOption(name));
        }
        let Some((_, setter)) = SETTERS.iter().find(|(n, _)| *n == name) else {
            return Err(HotlineError::UnknownOption(name));
        };

        let value = Value::parse(raw);
        let mut next = self.clone();
        match setter(&mut next, &value) {
            Some(()) => {
                *self = next;
                Ok((name, value))
            }
            None => Err(HotlineError::InvalidValue {
                name,
                value: raw.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_coercion() {
        assert_eq!(Value::parse("yes"), Value::Bool(true));
        assert_eq!(Value::parse("ON"), Value::Bool(true));
        assert_eq!(Value::parse("off"), Value::Bool(false));
        assert_eq!(Value::parse(" 5 "), Value::Number(5.0));
        assert_eq!(Value::parse("-0.5"), Value::Number(-0.5));
        assert_eq!(Value::parse("center"), Value::Text("center".into()));
        assert_eq!(Value::parse("NaN"), Value::Text("NaN".into()));
    }

    #[test]
    fn step_becomes_a_number() {
        let mut options = Options::default();
        let (name, value) = options.apply("data-hotline-step", "5").unwrap();
        assert_eq!(name, "step");
        assert_eq!(value, Value::Number(5.0));
        assert_eq!(options.step, 5.0);
    }

    #[test]
    fn booleans_and_zones() {
        let mut options = Options::default();
        options.apply("hover", "no").unwrap();
        options.apply("sticky", "true").unwrap();
        options.apply("magnetic", "center").unwrap();
        options.apply("axis", "vertical").unwrap();
        assert!(!options.hover);
        assert!(options.sticky);
        assert_eq!(options.magnetic, Some(Zone::Center));
        assert_eq!(options.axis, Axis::Vertical);

        options.apply("magnetic", "off").unwrap();
        assert_eq!(options.magnetic, None);
    }

    #[test]
    fn interval_and_delta() {
        let mut options = Options::default();
        options.apply("interval", "25").unwrap();
        options.apply("delta", "-40").unwrap();
        assert_eq!(options.interval, Duration::from_millis(25));
        assert_eq!(options.delta, Some(40.0));

        options.apply("delta", "0").unwrap();
        assert_eq!(options.delta, None);
    }

    #[test]
    fn events_is_protected() {
        let mut options = Options::default();
        let err = options.apply("data-hotline-events", "none").unwrap_err();
        assert_eq!(err, HotlineError::ProtectedOption("events".into()));
    }

    #[test]
    fn unknown_names_are_refused() {
        let mut options = Options::default();
        let err = options.apply("colour", "red").unwrap_err();
        assert_eq!(err, HotlineError::UnknownOption("colour".into()));
    }

    #[test]
    fn mismatched_values_leave_option_untouched() {
        let mut options = Options::default();
        let err = options.apply("step", "fast").unwrap_err();
        assert!(matches!(err, HotlineError::InvalidValue { .. }));
        assert_eq!(options.step, 1.0);

        assert!(options.apply("magnet", "0").is_err());
        assert!(options.apply("button", "1.5").is_err());
        assert_eq!(options, Options::default());
    }

    #[test]
    fn names_cover_every_setter() {
        let names: Vec<_> = Options::names().collect();
        assert_eq!(names.len(), 13);
        assert!(names.contains(&"magnetic"));
        assert!(!names.contains(&PROTECTED_OPTION));
    }
}
