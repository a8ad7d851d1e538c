//! Operator feedback for identity block operations
//!
//! Structured messages that a shell can print or a TUI can display. The store
//! records one entry per device access, rejected input and env update.

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

/// Feedback message with severity level
#[derive(Debug, Clone)]
pub struct FeedbackMessage {
    pub level: FeedbackLevel,
    pub category: FeedbackCategory,
    pub message: String,
}

/// Message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackLevel {
    Info,      // Normal operation info
    Success,   // Operation succeeded
    Warning,   // Non-critical issue
    Error,     // Operation failed
    Debug,     // Detailed debug info
}

/// Message category for filtering/display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackCategory {
    Storage,       // Device reads and writes
    Integrity,     // CRC checks
    Provisioning,  // Field setters
    Environment,   // Env mirroring
}

impl FeedbackMessage {
    pub fn new(level: FeedbackLevel, category: FeedbackCategory, message: impl Into<String>) -> Self {
        Self {
            level,
            category,
            message: message.into(),
        }
    }

    /// Format for display with prefix
    pub fn format_line(&self) -> String {
        use alloc::format;
        let prefix = match self.level {
            FeedbackLevel::Info => "[INFO]",
            FeedbackLevel::Success => "[OK]",
            FeedbackLevel::Warning => "[WARN]",
            FeedbackLevel::Error => "[ERR]",
            FeedbackLevel::Debug => "[DBG]",
        };
        format!("{} {}", prefix, self.message)
    }
}

/// Feedback collector - bounded, oldest message dropped first
#[derive(Debug, Clone)]
pub struct FeedbackCollector {
    messages: Vec<FeedbackMessage>,
    max_messages: usize,
}

impl FeedbackCollector {
    pub fn new(max_messages: usize) -> Self {
        Self {
            messages: Vec::with_capacity(max_messages),
            max_messages,
        }
    }

    /// Add a message
    pub fn add(&mut self, msg: FeedbackMessage) {
        if self.max_messages == 0 {
            return;
        }
        if self.messages.len() >= self.max_messages {
            self.messages.remove(0);
        }
        self.messages.push(msg);
    }

    pub fn info(&mut self, category: FeedbackCategory, message: impl Into<String>) {
        self.add(FeedbackMessage::new(FeedbackLevel::Info, category, message));
    }

    pub fn success(&mut self, category: FeedbackCategory, message: impl Into<String>) {
        self.add(FeedbackMessage::new(FeedbackLevel::Success, category, message));
    }

    pub fn warning(&mut self, category: FeedbackCategory, message: impl Into<String>) {
        self.add(FeedbackMessage::new(FeedbackLevel::Warning, category, message));
    }

    pub fn error(&mut self, category: FeedbackCategory, message: impl Into<String>) {
        self.add(FeedbackMessage::new(FeedbackLevel::Error, category, message));
    }

    pub fn debug(&mut self, category: FeedbackCategory, message: impl Into<String>) {
        self.add(FeedbackMessage::new(FeedbackLevel::Debug, category, message));
    }

    /// Get all messages
    pub fn messages(&self) -> &[FeedbackMessage] {
        &self.messages
    }

    /// Get messages filtered by level
    pub fn messages_by_level(&self, level: FeedbackLevel) -> Vec<&FeedbackMessage> {
        self.messages.iter().filter(|m| m.level == level).collect()
    }

    /// Get messages filtered by category
    pub fn messages_by_category(&self, category: FeedbackCategory) -> Vec<&FeedbackMessage> {
        self.messages.iter().filter(|m| m.category == category).collect()
    }

    /// Formatted lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.messages.iter().map(FeedbackMessage::format_line).collect()
    }

    /// Check if any errors
    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == FeedbackLevel::Error)
    }
}
