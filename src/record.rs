//! Records as delivered by the issue tracker.

/// One tracked content item, e.g. a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Tracker-assigned number.
    pub id: u64,
    pub title: String,
    /// Raw body; `None` when the ticket was opened without one.
    pub body: Option<String>,
    /// Label names in tracker order. The first one routes the record.
    pub labels: Vec<String>,
    /// Creation time, epoch seconds.
    pub created_at: i64,
    pub comment_count: u64,
    /// Timeline in chronological order.
    pub events: Vec<RecordEvent>,
}

/// Timeline entries the pipeline cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordEvent {
    Pinned,
    Unpinned,
    Other,
}

impl RecordEvent {
    pub fn from_name(name: &str) -> Self {
        match name {
            "pinned" => Self::Pinned,
            "unpinned" => Self::Unpinned,
            _ => Self::Other,
        }
    }
}

impl Record {
    /// Snapshot key shared by both collections.
    pub fn key(&self) -> String {
        format!("P{}", self.id)
    }

    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// First label, which decides the destination collection.
    pub fn primary_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }

    /// Pin state after replaying the whole timeline. Last pin event wins.
    pub fn pinned(&self) -> bool {
        self.events
            .iter()
            .rev()
            .find_map(|event| match event {
                RecordEvent::Pinned => Some(true),
                RecordEvent::Unpinned => Some(false),
                RecordEvent::Other => None,
            })
            .unwrap_or(false)
    }

    /// Body length in characters.
    pub fn word_count(&self) -> u64 {
        self.body_text().chars().count() as u64
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(id: u64, title: &str, labels: &[&str], created_at: i64) -> Record {
        Record {
            id,
            title: title.to_string(),
            body: Some(format!("Body of {title}. More text.")),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            created_at,
            comment_count: 0,
            events: vec![],
        }
    }

    #[test]
    fn test_key() {
        assert_eq!(record(7, "t", &["a"], 0).key(), "P7");
    }

    #[test]
    fn test_pinned_without_events() {
        assert!(!record(1, "t", &["a"], 0).pinned());
    }

    #[test]
    fn test_pinned_last_event_wins() {
        let mut r = record(1, "t", &["a"], 0);
        r.events = vec![RecordEvent::Pinned, RecordEvent::Other];
        assert!(r.pinned());

        r.events.push(RecordEvent::Unpinned);
        assert!(!r.pinned());

        r.events.extend([RecordEvent::Pinned, RecordEvent::Other]);
        assert!(r.pinned());
    }

    #[test]
    fn test_event_from_name() {
        assert_eq!(RecordEvent::from_name("pinned"), RecordEvent::Pinned);
        assert_eq!(RecordEvent::from_name("unpinned"), RecordEvent::Unpinned);
        assert_eq!(RecordEvent::from_name("labeled"), RecordEvent::Other);
    }

    #[test]
    fn test_word_count_counts_chars() {
        let mut r = record(1, "t", &["a"], 0);
        r.body = Some("你好 ab".into());
        assert_eq!(r.word_count(), 5);

        r.body = None;
        assert_eq!(r.word_count(), 0);
        assert_eq!(r.body_text(), "");
    }
}
