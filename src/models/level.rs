use std::str::FromStr;

use crate::error::AppError;

pub const MAX_STATE_VALUE: i64 = 255;

/// Dim percentage (0-100) for a raw 0-255 state value.
pub fn level_from_statevalue(statevalue: i64) -> i64 {
    let level = (statevalue as f64 / MAX_STATE_VALUE as f64 * 100.0).floor() as i64;
    level.clamp(0, 100)
}

/// Raw 0-255 value sent to `/device/dim` for a requested percentage.
/// Out-of-range percentages are clamped rather than rejected.
pub fn wire_level(level: i64) -> u8 {
    let raw = ((level as f64 / 100.0) * MAX_STATE_VALUE as f64).floor();
    raw.clamp(0.0, MAX_STATE_VALUE as f64) as u8
}

/// The `amount` argument of `dim`: an absolute level or a relative step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelChange {
    Set(i64),
    Increase(i64),
    Decrease(i64),
}

impl LevelChange {
    /// The level to request given the device's current one.
    pub fn apply(&self, current: i64) -> i64 {
        match *self {
            LevelChange::Set(amount) => amount,
            LevelChange::Increase(amount) => current.saturating_add(amount),
            LevelChange::Decrease(amount) => current.saturating_sub(amount),
        }
    }
}

impl FromStr for LevelChange {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidInput(format!("Could not parse new level: {}", s));

        let (sign, digits) = match s.as_bytes().first() {
            Some(b'+') | Some(b'-') => s.split_at(1),
            _ => ("", s),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        // Too many digits for an i64 still means "as far as it goes"; the
        // wire value is clamped later.
        let amount: i64 = digits.parse().unwrap_or(i64::MAX);

        Ok(match sign {
            "+" => LevelChange::Increase(amount),
            "-" => LevelChange::Decrease(amount),
            _ => LevelChange::Set(amount),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_statevalue() {
        assert_eq!(level_from_statevalue(0), 0);
        assert_eq!(level_from_statevalue(128), 50);
        assert_eq!(level_from_statevalue(140), 54);
        assert_eq!(level_from_statevalue(255), 100);
    }

    #[test]
    fn test_level_from_statevalue_stays_in_range() {
        for raw in 0..=255 {
            let level = level_from_statevalue(raw);
            assert!((0..=100).contains(&level), "{} -> {}", raw, level);
        }
        assert_eq!(level_from_statevalue(400), 100);
        assert_eq!(level_from_statevalue(-3), 0);
    }

    #[test]
    fn test_wire_level() {
        assert_eq!(wire_level(0), 0);
        assert_eq!(wire_level(40), 102);
        assert_eq!(wire_level(50), 127);
        assert_eq!(wire_level(55), 140);
        assert_eq!(wire_level(100), 255);
    }

    #[test]
    fn test_wire_level_clamps() {
        assert_eq!(wire_level(150), 255);
        assert_eq!(wire_level(-5), 0);
        assert_eq!(wire_level(i64::MAX), 255);
    }

    #[test]
    fn test_parse_level_change() {
        assert_eq!("70".parse::<LevelChange>().unwrap(), LevelChange::Set(70));
        assert_eq!("+5".parse::<LevelChange>().unwrap(), LevelChange::Increase(5));
        assert_eq!("-10".parse::<LevelChange>().unwrap(), LevelChange::Decrease(10));
        assert_eq!("007".parse::<LevelChange>().unwrap(), LevelChange::Set(7));
    }

    #[test]
    fn test_parse_level_change_rejects_garbage() {
        for input in ["abc", "", "+", "-", "5%", "+-5", " 5", "1.5", "++1"] {
            let err = input.parse::<LevelChange>().unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)), "{:?}", input);
        }
    }

    #[test]
    fn test_parse_level_change_saturates_long_amounts() {
        let huge = "99999999999999999999";
        assert_eq!(huge.parse::<LevelChange>().unwrap(), LevelChange::Set(i64::MAX));
        assert_eq!(
            format!("+{}", huge).parse::<LevelChange>().unwrap(),
            LevelChange::Increase(i64::MAX)
        );
        assert_eq!(wire_level(LevelChange::Set(i64::MAX).apply(50)), 255);
        assert_eq!(wire_level(LevelChange::Decrease(i64::MAX).apply(50)), 0);
    }

    #[test]
    fn test_apply() {
        assert_eq!(LevelChange::Increase(5).apply(50), 55);
        assert_eq!(LevelChange::Decrease(10).apply(50), 40);
        assert_eq!(LevelChange::Set(30).apply(50), 30);
        assert_eq!(LevelChange::Decrease(10).apply(5), -5);
    }
}
