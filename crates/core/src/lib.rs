pub mod config;
pub mod engine;
pub mod errors;
pub mod intent;
pub mod schedule;
pub mod slots;
pub mod temporal;

pub use config::{AppConfig, EngineConfig};
pub use engine::{process, MeetingEngine, ProcessResult};
pub use errors::TemporalParseError;
pub use intent::{classify, IntentClassifier, IntentDecision};
pub use schedule::{plan_meeting, MeetingWindow, SchedulingPolicy, StartSource};
pub use slots::{suggest, SlotSuggester};
pub use temporal::{extract, TemporalExtractor, TimeBlock};
