//! Plain-text conversation export.

use std::fmt::Write as _;

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};

use super::Message;

/// Alert text when there is nothing to save.
pub const NOTHING_TO_SAVE: &str = "저장할 대화 내용이 없습니다.";

const FILE_STEM: &str = "청년이음_대화기록";

/// A transcript ready to be handed to the user as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptFile {
    pub filename: String,
    pub contents: String,
}

impl TranscriptFile {
    pub const CONTENT_TYPE: &'static str = "text/plain; charset=utf-8";

    /// Write out `messages`, stamped with `saved_at`.
    ///
    /// Returns `None` when there are no messages.
    #[must_use]
    pub fn render(messages: &[Message], saved_at: &DateTime<FixedOffset>) -> Option<Self> {
        if messages.is_empty() {
            return None;
        }

        let mut contents = String::from("=== 청년이음 대화 기록 ===\n");
        let _ = writeln!(contents, "저장 시간: {}", korean_timestamp(saved_at));
        contents.push_str("========================\n\n");

        for message in messages {
            let _ = write!(
                contents,
                "{}:\n{}\n\n",
                message.sender.transcript_label(),
                message.plain_text()
            );
        }

        Some(Self {
            filename: filename_for(saved_at),
            contents,
        })
    }
}

/// `청년이음_대화기록_<UTC date>.txt`
#[must_use]
pub fn filename_for(saved_at: &DateTime<FixedOffset>) -> String {
    format!(
        "{FILE_STEM}_{}.txt",
        saved_at.with_timezone(&Utc).format("%Y-%m-%d")
    )
}

/// Local time in the `2026. 10. 17. 오후 3:04:05` form Korean readers expect.
#[must_use]
pub fn korean_timestamp(at: &DateTime<FixedOffset>) -> String {
    let (is_pm, hour) = at.hour12();
    format!(
        "{}. {}. {}. {} {}:{:02}:{:02}",
        at.year(),
        at.month(),
        at.day(),
        if is_pm { "오후" } else { "오전" },
        hour,
        at.minute(),
        at.second()
    )
}
