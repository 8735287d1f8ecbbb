use crate::tuning::NOTICE_DURATION_MS;

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub expires_at_ms: f64,
}

/// Single-slot banner; a new notice replaces whatever is showing.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, text: impl Into<String>, now_ms: f64) {
        self.current = Some(Notice {
            text: text.into(),
            expires_at_ms: now_ms + NOTICE_DURATION_MS,
        });
    }

    pub fn current(&self, now_ms: f64) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|notice| now_ms < notice.expires_at_ms)
            .map(|notice| notice.text.as_str())
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
