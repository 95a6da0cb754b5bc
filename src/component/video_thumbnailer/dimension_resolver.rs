use crate::error::ThumbnailError;
use std::fmt;

/// 呼叫端指定的縮圖尺寸限制
///
/// 寬高可以都不給、只給一個或兩個都給。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SizeConstraint {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl SizeConstraint {
    #[must_use]
    pub const fn new(width: Option<f64>, height: Option<f64>) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn width(width: f64) -> Self {
        Self::new(Some(width), None)
    }

    #[must_use]
    pub const fn height(height: f64) -> Self {
        Self::new(None, Some(height))
    }

    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }

    /// 確認所有給定的值皆為有限正數
    pub fn validate(&self) -> Result<(), ThumbnailError> {
        for (name, value) in [("寬度", self.width), ("高度", self.height)] {
            match value {
                Some(v) if !(v.is_finite() && v > 0.0) => {
                    return Err(ThumbnailError::InvalidConstraint(format!(
                        "{name}必須為正數: {v}"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// 最終縮圖尺寸，寬高皆至少為 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedSize {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for ResolvedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// 依來源尺寸與限制計算縮圖尺寸
///
/// 1. 寬高皆指定：直接採用（無條件進位），不維持比例
/// 2. 只指定寬：依比例推算高
/// 3. 只指定高：依比例推算寬
/// 4. 皆未指定：沿用來源尺寸
///
/// 限制值需先經過 [`SizeConstraint::validate`]。
#[must_use]
pub fn resolve_dimensions(
    source_width: u32,
    source_height: u32,
    constraint: &SizeConstraint,
) -> ResolvedSize {
    let sw = f64::from(source_width);
    let sh = f64::from(source_height);

    let (width, height) = match (constraint.width, constraint.height) {
        (Some(w), Some(h)) => (ceil_dimension(w), ceil_dimension(h)),
        (Some(w), None) => (ceil_dimension(w), ceil_dimension(w * sh / sw)),
        (None, Some(h)) => (ceil_dimension(h * sw / sh), ceil_dimension(h)),
        (None, None) => (source_width.max(1), source_height.max(1)),
    };

    ResolvedSize { width, height }
}

/// 無條件進位，結果至少為 1
fn ceil_dimension(value: f64) -> u32 {
    // `as` 對超出範圍的值會飽和
    (value.ceil() as u32).max(1)
}
