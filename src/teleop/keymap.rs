/**
 * Key Bindings
 * 
 * One table for both thruster units: key -> (side, kind, delta).
 * 
 *   Left        Right
 *   e  +thrust  i  +thrust
 *   d  -thrust  k  -thrust
 *   s  -angle   u  -angle
 *   f  +angle   o  +angle
 * 
 * Ctrl-C quits, any other key stops both thrusters.
 */

use super::command::Side;

/// Interrupt character, delivered as data while the terminal is raw
pub const QUIT_KEY: u8 = 0x03;

pub const THRUST_STEP: f64 = 140.0;
pub const ANGLE_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Thrust,
    Angle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding {
    pub key: u8,
    pub side: Side,
    pub kind: BindingKind,
    pub delta: f64,
}

const fn bind(key: u8, side: Side, kind: BindingKind, delta: f64) -> Binding {
    Binding { key, side, kind, delta }
}

pub const BINDINGS: [Binding; 8] = [
    bind(b'u', Side::Right, BindingKind::Angle, -ANGLE_STEP),
    bind(b'o', Side::Right, BindingKind::Angle, ANGLE_STEP),
    bind(b'i', Side::Right, BindingKind::Thrust, THRUST_STEP),
    bind(b'k', Side::Right, BindingKind::Thrust, -THRUST_STEP),
    bind(b's', Side::Left, BindingKind::Angle, -ANGLE_STEP),
    bind(b'f', Side::Left, BindingKind::Angle, ANGLE_STEP),
    bind(b'e', Side::Left, BindingKind::Thrust, THRUST_STEP),
    bind(b'd', Side::Left, BindingKind::Thrust, -THRUST_STEP),
];

pub fn lookup(key: u8) -> Option<&'static Binding> {
    BINDINGS.iter().find(|b| b.key == key)
}

/// Key legend printed when a session starts
pub fn legend() -> String {
    let mut out = String::from("Keys (left / right thruster):\n");
    for (kind, label) in [(BindingKind::Thrust, "thrust"), (BindingKind::Angle, "angle")] {
        for sign in [1.0, -1.0] {
            let keys: Vec<String> = [Side::Left, Side::Right]
                .iter()
                .filter_map(|&side| {
                    BINDINGS
                        .iter()
                        .find(|b| b.side == side && b.kind == kind && b.delta.signum() == sign)
                        .map(|b| (b.key as char).to_string())
                })
                .collect();
            let delta = if kind == BindingKind::Thrust { THRUST_STEP } else { ANGLE_STEP };
            let sign_char = if sign > 0.0 { '+' } else { '-' };
            out.push_str(&format!("  {}  {}{} {}\n", keys.join(" / "), sign_char, delta, label));
        }
    }
    out.push_str("  anything else  stop\n");
    out.push_str("  CTRL-C  quit\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<u8> = BINDINGS.iter().map(|b| b.key).collect();
        assert_eq!(keys.len(), BINDINGS.len());
        assert!(lookup(QUIT_KEY).is_none());
    }

    #[test]
    fn test_sides_are_symmetric() {
        for kind in [BindingKind::Thrust, BindingKind::Angle] {
            let mut left: Vec<f64> = BINDINGS.iter().filter(|b| b.side == Side::Left && b.kind == kind).map(|b| b.delta).collect();
            let mut right: Vec<f64> = BINDINGS.iter().filter(|b| b.side == Side::Right && b.kind == kind).map(|b| b.delta).collect();
            left.sort_by(|a, b| a.total_cmp(b));
            right.sort_by(|a, b| a.total_cmp(b));
            assert_eq!(left, right);
        }
    }

    #[test]
    fn test_lookup() {
        let b = lookup(b'o').unwrap();
        assert_eq!((b.side, b.kind, b.delta), (Side::Right, BindingKind::Angle, 0.1));
        let b = lookup(b'd').unwrap();
        assert_eq!((b.side, b.kind, b.delta), (Side::Left, BindingKind::Thrust, -140.0));
        assert!(lookup(b'x').is_none());
        assert!(lookup(b'j').is_none());
        assert!(lookup(b'I').is_none());
    }

    #[test]
    fn test_legend_lists_every_key() {
        let legend = legend();
        assert!(legend.contains("e / i  +140 thrust"));
        assert!(legend.contains("s / u  -0.1 angle"));
        assert!(legend.contains("CTRL-C"));
    }
}
