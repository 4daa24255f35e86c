//! Log aggregation funnel for concurrent workers
//!
//! Every component in the pipeline logs by enqueueing structured records onto
//! one shared channel. A single consumer task drains the channel and writes
//! each record to the sink as one line. With many workers writing diagnostics
//! concurrently, funneling through one consumer is what keeps the output free
//! of interleaved fragments; record order is arrival order at the channel,
//! not a global wall-clock order.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::io::Write;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Uppercase name used in rendered output
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured diagnostic record produced by any pipeline component
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Severity of the record
    pub level: LogLevel,

    /// Time the record was produced
    pub timestamp: DateTime<Utc>,

    /// Identity of the producing worker or component
    pub producer: String,

    /// Human-readable message
    pub message: String,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} - {} - {}",
            self.level,
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.producer,
            self.message
        )
    }
}

/// Messages carried on the aggregator channel
enum Message {
    Record(LogRecord),
    Shutdown,
}

/// Cloneable producer handle onto the shared log channel
///
/// Each clone carries its own producer id so records can be traced back to
/// the worker that emitted them. Sends never block; records emitted after
/// the aggregator has stopped are discarded.
#[derive(Clone)]
pub struct LogSender {
    tx: mpsc::UnboundedSender<Message>,
    producer: String,
}

impl LogSender {
    /// Returns a sender that stamps records with a different producer id
    pub fn for_producer(&self, producer: impl Into<String>) -> LogSender {
        LogSender {
            tx: self.tx.clone(),
            producer: producer.into(),
        }
    }

    /// The producer id this sender stamps onto records
    pub fn producer(&self) -> &str {
        &self.producer
    }

    /// Enqueues a record at the given level
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        let record = LogRecord {
            level,
            timestamp: Utc::now(),
            producer: self.producer.clone(),
            message: message.into(),
        };
        // The consumer being gone means we are past shutdown; the record
        // has nowhere to go.
        let _ = self.tx.send(Message::Record(record));
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }
}

/// Handle to the single consumer task draining the log channel
pub struct LogAggregator {
    tx: mpsc::UnboundedSender<Message>,
    handle: JoinHandle<()>,
}

impl LogAggregator {
    /// Starts the aggregator consumer and returns it with the root sender
    ///
    /// Records below `min_level` are dropped at the consumer, so producers
    /// never pay a filtering cost. The sink is owned by the consumer task;
    /// it is the only writer for the lifetime of the aggregator.
    pub fn start(sink: Box<dyn Write + Send>, min_level: LogLevel) -> (LogAggregator, LogSender) {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            let mut sink = sink;
            while let Some(message) = rx.recv().await {
                match message {
                    Message::Record(record) => {
                        if record.level >= min_level {
                            let _ = writeln!(sink, "{}", record);
                        }
                    }
                    Message::Shutdown => break,
                }
            }
            let _ = sink.flush();
        });

        let sender = LogSender {
            tx: tx.clone(),
            producer: "main".to_string(),
        };

        (LogAggregator { tx, handle }, sender)
    }

    /// Drains records enqueued so far and terminates the consumer
    ///
    /// Callers must close the job intake first: the shutdown marker is
    /// ordered behind every record already on the channel, so records sent
    /// before this call are rendered, records sent after it are lost.
    pub async fn stop(self) {
        let _ = self.tx.send(Message::Shutdown);
        let _ = self.handle.await;
    }
}
