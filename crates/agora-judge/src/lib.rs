//! # Agora Judge
//!
//! Scores contest turns with a model and aggregates a final verdict.
//!
//! One [`Judge`] type serves both contest kinds; everything that differs
//! between a debate and a rap battle lives in its [`Rubric`].
//!
//! ```rust
//! use std::sync::Arc;
//! use agora_core::Side;
//! use agora_judge::{Judge, Rubric};
//! use agora_llm::MockModel;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     // A response without JSON falls back to 6.0 per criterion
//!     let mut judge = Judge::new(Rubric::debate(), Arc::new(MockModel::constant("no comment")));
//!     let score = judge.evaluate_turn("Opening", 1, Side::A, "Progressive", &[]).await;
//!     assert_eq!(score.total(), 48.0);
//!
//!     let verdict = judge.finalize();
//!     assert_eq!(verdict.total_a, 48.0);
//! }
//! ```

pub mod evaluation;
pub mod judge;
pub mod rubric;
pub mod verdict;

pub use evaluation::{context_line, parse_evaluation, Evaluation, EvaluationError};
pub use judge::{Judge, Scoreboard, JUDGE_TEMPERATURE};
pub use rubric::{
    ContestKind, Rubric, BATTLE_TIE_THRESHOLD, CATEGORY_TIE_THRESHOLD, DEBATE_TIE_THRESHOLD,
    FALLBACK_CRITERION_SCORE,
};
pub use verdict::{aggregate, decide, SideNames};
