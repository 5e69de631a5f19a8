//! Progress notifications
//!
//! Fire-and-forget messages emitted at run start, per topic, at the end and
//! on failure. Sinks receive plain text; any `Fn(&str)` closure is a sink.

use std::fmt;
use std::sync::Arc;

use super::topic::Topic;
use crate::types::capitalize_first;

/// Receiver of progress messages
pub trait ProgressSink: Send + Sync {
    fn notify(&self, message: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn notify(&self, message: &str) {
        self(message)
    }
}

pub type SharedProgress = Arc<dyn ProgressSink>;

/// Progress event types
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Run started with this many topics
    Started { company: String, topics: usize },
    TopicCompleted { topic: Topic },
    TopicFailed { topic: Topic, error: String },
    /// All topics settled; summary generation begins
    Summarizing,
    Finished { failed_topics: usize },
    Failed { error: String },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { company, topics } => {
                write!(f, "Starting research on {} ({} topics)", company, topics)
            }
            Self::TopicCompleted { topic } => {
                write!(f, "{} research complete", capitalize_first(topic.label()))
            }
            Self::TopicFailed { topic, error } => write!(
                f,
                "{} research failed: {}",
                capitalize_first(topic.label()),
                error
            ),
            Self::Summarizing => write!(f, "Writing executive summary"),
            Self::Finished { failed_topics: 0 } => write!(f, "Research complete"),
            Self::Finished { failed_topics } => write!(
                f,
                "Research complete ({} topics failed)",
                failed_topics
            ),
            Self::Failed { error } => write!(f, "Research failed: {}", error),
        }
    }
}

/// Optional sink wrapper used by the pipeline
#[derive(Clone, Default)]
pub struct Progress {
    sink: Option<SharedProgress>,
}

impl Progress {
    pub fn new(sink: SharedProgress) -> Self {
        Self { sink: Some(sink) }
    }

    pub fn emit(&self, event: ProgressEvent) {
        if let Some(sink) = &self.sink {
            sink.notify(&event.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_sink_receives_messages() {
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let captured = seen.clone();
        let progress = Progress::new(Arc::new(move |m: &str| {
            captured.lock().unwrap().push(m.to_string())
        }));

        progress.emit(ProgressEvent::Started {
            company: "Myer".to_string(),
            topics: 6,
        });
        progress.emit(ProgressEvent::TopicCompleted {
            topic: Topic::Financial,
        });
        progress.emit(ProgressEvent::Finished { failed_topics: 0 });

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                "Starting research on Myer (6 topics)",
                "Financial research complete",
                "Research complete",
            ]
        );
    }

    #[test]
    fn test_no_sink_is_silent() {
        Progress::default().emit(ProgressEvent::Summarizing);
    }

    #[test]
    fn test_error_events() {
        let failed = ProgressEvent::TopicFailed {
            topic: Topic::Esg,
            error: "boom".to_string(),
        };
        assert_eq!(failed.to_string(), "ESG research failed: boom");
    }
}
