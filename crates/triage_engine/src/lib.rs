//! Deterministic triage engine for citizen complaints.
//!
//! Turns a free-text complaint (plus optional images, location and reporter
//! trust) into a structured classification used for routing and
//! prioritization. The engine is a rule table over lowercase substrings,
//! not a statistical classifier: identical input always yields an identical
//! result, and every decision can be explained.
//!
//! ```
//! use triage_engine::{classify, ClassificationInput, Priority};
//!
//! let result = classify(&ClassificationInput::new("Pothole on Main St"));
//! assert_eq!(result.category, "infrastructure");
//! assert_eq!(result.priority, Priority::High);
//! ```

pub mod agent;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod escalation;
pub mod evidence;
pub mod input;
pub mod location;
pub mod matcher;
pub mod priority;
pub mod resolver;
pub mod result;
pub mod rules;
pub mod trace;

pub use agent::Agent;
pub use config::TriageConfig;
pub use engine::{classify, Explanation, TriageEngine};
pub use error::TriageError;
pub use input::{ClassificationInput, ReporterTrust};
pub use priority::Priority;
pub use result::ClassificationResult;
pub use rules::{CategoryRule, RuleTable};
pub use trace::{Adjustment, ConfidenceStep, TriageTrace};
