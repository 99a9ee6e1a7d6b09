//! # study-core
//!
//! Core types for the daily learning tasks: the three record streams fetched per time window,
//! the [`ConversationDocument`] built from them, the comprehension snapshot, and the
//! time window / task-day helpers. Also owns tracing initialization for the binaries.
//!
//! Nothing here performs I/O except [`init_tracing`]; fetching and persistence live in `storage`.

pub mod comprehension;
pub mod conversation;
pub mod logger;
pub mod records;
pub mod window;

pub use comprehension::{assemble_comprehension, FieldComprehension, SubjectComprehension};
pub use conversation::{
    reconstruct, ConversationDocument, PostConversation, RoomEntry, ThreadEntry, USER_ROLE,
};
pub use logger::init_tracing;
pub use records::{
    ComprehensionUpdateSuggestion, FieldRecord, Message, Post, PostReply, Quiz, SubjectRecord,
    WindowRecords,
};
pub use window::{jst, TaskDay, TimeWindow};
