use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;

/// 小于该尺寸的记录视为损坏
pub const MIN_RESTORE_WIDTH: f64 = 400.0;
pub const MIN_RESTORE_HEIGHT: f64 = 300.0;

/// 主窗口几何信息（逻辑像素）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

impl WindowGeometry {
    /// 校验尺寸，不合法时回退到默认尺寸（保留位置与最大化状态）
    pub fn sanitized(self) -> Self {
        let size_ok = self.width.is_finite()
            && self.height.is_finite()
            && self.width >= MIN_RESTORE_WIDTH
            && self.height >= MIN_RESTORE_HEIGHT;

        if size_ok {
            self
        } else {
            Self {
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
                ..self
            }
        }
    }

    /// 仅当 x、y 都存在时返回位置
    pub fn position(&self) -> Option<(i32, i32)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }

    /// 保存的位置是否与任一显示器有重叠
    pub fn overlaps_any(&self, displays: &[DisplayBounds]) -> bool {
        let Some((x, y)) = self.position() else {
            return false;
        };
        let (left, top) = (f64::from(x), f64::from(y));
        let (right, bottom) = (left + self.width, top + self.height);

        displays.iter().any(|display| {
            left < display.x + display.width
                && right > display.x
                && top < display.y + display.height
                && bottom > display.y
        })
    }

    /// 保存的位置落在所有显示器之外时丢弃位置（窗口改为居中）
    ///
    /// 显示器列表为空时无法判断，保留原位置。
    pub fn placed_on(self, displays: &[DisplayBounds]) -> Self {
        if self.position().is_none() || displays.is_empty() || self.overlaps_any(displays) {
            self
        } else {
            Self {
                x: None,
                y: None,
                ..self
            }
        }
    }
}

/// 显示器可用区域（逻辑像素）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}
