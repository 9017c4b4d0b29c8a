use super::CaptureBuffer;

/// Text recognized from a capture together with the pixels it came from.
/// An empty `recognized_text` means the engine found no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResult {
    pub recognized_text: String,
    pub image: CaptureBuffer,
}

impl CaptureResult {
    pub fn new(recognized_text: String, image: CaptureBuffer) -> Self {
        Self {
            recognized_text,
            image,
        }
    }

    pub fn has_text(&self) -> bool {
        !self.recognized_text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_text_ignores_whitespace() {
        let result = CaptureResult::new(" \n\t".to_string(), CaptureBuffer::empty());

        assert!(!result.has_text());
    }

    #[test]
    fn test_has_text_with_content() {
        let result = CaptureResult::new("Invoice 42\n".to_string(), CaptureBuffer::empty());

        assert!(result.has_text());
    }
}
