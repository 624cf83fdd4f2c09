// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Invalid argument to [`ZoomEngine::try_rotate`](crate::ZoomEngine::try_rotate).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RotationError {
    /// Rotation was negative.
    #[error("rotation must be greater than or equal to 0: {0}")]
    Negative(i32),
    /// Rotation was not a multiple of 90 degrees.
    #[error("rotation must be in multiples of 90: {0}")]
    NotMultipleOf90(i32),
}

impl RotationError {
    /// Validates a rotation in degrees, returning it normalized into `0..360`.
    pub(crate) fn check(degrees: i32) -> Result<u32, Self> {
        if degrees < 0 {
            return Err(Self::Negative(degrees));
        }
        if degrees % 90 != 0 {
            return Err(Self::NotMultipleOf90(degrees));
        }
        Ok(degrees.unsigned_abs() % 360)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::RotationError;

    #[test]
    fn check_normalizes_valid_rotations() {
        assert_eq!(RotationError::check(0), Ok(0));
        assert_eq!(RotationError::check(270), Ok(270));
        assert_eq!(RotationError::check(450), Ok(90));
    }

    #[test]
    fn check_rejects_invalid_rotations() {
        assert_eq!(RotationError::check(-90), Err(RotationError::Negative(-90)));
        assert_eq!(
            RotationError::check(45),
            Err(RotationError::NotMultipleOf90(45))
        );
        assert_eq!(
            RotationError::NotMultipleOf90(45).to_string(),
            "rotation must be in multiples of 90: 45"
        );
    }
}
