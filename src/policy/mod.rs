//! Qualifying policy definitions.

pub mod v1;

pub use v1::{
    contains_question, is_qualifying, text_length, QualifyingPolicy, MIN_UNENDORSED_CHARS,
    QUESTION_MARK,
};
