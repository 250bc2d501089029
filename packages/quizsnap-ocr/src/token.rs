use serde::{Deserialize, Serialize};

/// Pixel box of a recognized word, in full-screen (multi-monitor canvas) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Vertical midpoint, rounded down.
    pub fn center_y(&self) -> i32 {
        self.top.saturating_add(self.height / 2)
    }

    /// Moves the box by `(dx, dy)`, e.g. from capture-canvas to desktop coordinates.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left.saturating_add(dx),
            top: self.top.saturating_add(dy),
            ..*self
        }
    }
}

/// One recognized word or fragment from an OCR pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrToken {
    pub text: String,
    #[serde(flatten)]
    pub bounding_box: BoundingBox,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl OcrToken {
    pub fn new(text: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bounding_box,
            confidence: None,
        }
    }

    /// Tokens with only whitespace never take part in matching.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_y_rounds_down() {
        let bbox = BoundingBox::new(10, 100, 40, 15);
        assert_eq!(bbox.center_y(), 107);
    }

    #[test]
    fn test_center_y_saturates() {
        let bbox = BoundingBox::new(0, i32::MAX - 2, 10, 40);
        assert_eq!(bbox.center_y(), i32::MAX);
    }

    #[test]
    fn test_translate() {
        let bbox = BoundingBox::new(10, 20, 30, 40);
        assert_eq!(bbox.translate(-1920, 5), BoundingBox::new(-1910, 25, 30, 40));
        assert_eq!(bbox.translate(i32::MIN, 0).left, i32::MIN);
    }

    #[test]
    fn test_blank_tokens() {
        assert!(OcrToken::new("   ", BoundingBox::default()).is_blank());
        assert!(OcrToken::new("", BoundingBox::default()).is_blank());
        assert!(!OcrToken::new(" Paris ", BoundingBox::default()).is_blank());
    }

    #[test]
    fn test_flat_json_shape() {
        let json = r#"{"text":"Nucleus","left":5,"top":6,"width":7,"height":8}"#;
        let token: OcrToken = serde_json::from_str(json).unwrap();
        assert_eq!(token.text, "Nucleus");
        assert_eq!(token.bounding_box, BoundingBox::new(5, 6, 7, 8));
        assert_eq!(token.confidence, None);
    }
}
