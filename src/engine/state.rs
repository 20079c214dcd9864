//! Engine state - lifecycle phase, gesture bookkeeping and position

use std::fmt;

use super::config::Options;

/// Zone of the container an item can be snapped into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Leading,
    Center,
    Trailing,
}

impl Zone {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Leading => "leading",
            Self::Center => "center",
            Self::Trailing => "trailing",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "leading" | "start" | "left" | "top" => Some(Self::Leading),
            "center" | "centre" | "middle" => Some(Self::Center),
            "trailing" | "end" | "right" | "bottom" => Some(Self::Trailing),
            _ => None,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of pointer driving a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    Mouse,
    Touch,
}

/// Pointer sample delivered by the host, in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub input: Input,
    /// Mouse button index (0 primary); ignored for touch
    pub button: u16,
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            input: Input::Mouse,
            button: 0,
            x,
            y,
        }
    }

    pub fn touch(x: f64, y: f64) -> Self {
        Self {
            input: Input::Touch,
            button: 0,
            x,
            y,
        }
    }

    pub fn with_button(mut self, button: u16) -> Self {
        self.button = button;
        self
    }
}

/// A press or drag in progress.
///
/// `recycled` sums the signed size+gap of every item transferred since
/// the press, keeping the drag formula continuous while the lead changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub input: Input,
    pub origin: f64,
    pub origin_position: f64,
    pub recycled: f64,
}

impl Gesture {
    /// Lead position for a pointer coordinate on the axis
    pub fn position_at(&self, coordinate: f64) -> f64 {
        coordinate - (self.origin + self.recycled - self.origin_position)
    }
}

/// Why passive movement is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hold {
    /// Pointer rests inside the container
    Hover,
    /// Sticky release or an explicit freeze
    Pinned,
}

/// Lifecycle of an engine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Phase {
    #[default]
    Stopped,
    /// Running and advancing passively
    Idle,
    Frozen(Hold),
    /// Pointer is down, no movement yet
    Pressed(Gesture),
    Dragging(Gesture),
}

impl Phase {
    pub fn is_started(&self) -> bool {
        !matches!(self, Self::Stopped)
    }

    /// Passive movement is suspended
    pub fn is_frozen(&self) -> bool {
        matches!(self, Self::Frozen(_) | Self::Pressed(_) | Self::Dragging(_))
    }

    /// A drag is actively repositioning the lead item
    pub fn is_moving(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        match self {
            Self::Pressed(g) | Self::Dragging(g) => Some(g),
            _ => None,
        }
    }

    pub fn gesture_mut(&mut self) -> Option<&mut Gesture> {
        match self {
            Self::Pressed(g) | Self::Dragging(g) => Some(g),
            _ => None,
        }
    }
}

/// Mutable record shared by the loop and interaction paths
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    pub options: Options,
    pub phase: Phase,
    /// Leading margin of the lead item
    pub position: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_parse_aliases() {
        assert_eq!(Zone::parse("center"), Some(Zone::Center));
        assert_eq!(Zone::parse("Start"), Some(Zone::Leading));
        assert_eq!(Zone::parse("bottom"), Some(Zone::Trailing));
        assert_eq!(Zone::parse("sideways"), None);
        assert_eq!(Zone::Center.to_string(), "center");
    }

    #[test]
    fn phase_flags() {
        let gesture = Gesture {
            input: Input::Mouse,
            origin: 0.0,
            origin_position: 0.0,
            recycled: 0.0,
        };
        assert!(!Phase::Stopped.is_started());
        assert!(!Phase::Idle.is_frozen());
        assert!(Phase::Frozen(Hold::Hover).is_frozen());
        assert!(Phase::Pressed(gesture).is_frozen());
        assert!(!Phase::Pressed(gesture).is_moving());
        assert!(Phase::Dragging(gesture).is_moving());
        assert!(Phase::Idle.gesture().is_none());
    }

    #[test]
    fn gesture_accounts_for_recycles() {
        let mut gesture = Gesture {
            input: Input::Touch,
            origin: 200.0,
            origin_position: -30.0,
            recycled: 0.0,
        };
        assert_eq!(gesture.position_at(180.0), -50.0);

        gesture.recycled = -110.0;
        assert_eq!(gesture.position_at(180.0), 60.0);
    }
}
