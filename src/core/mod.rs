pub mod call;
pub mod chat;

// Re-export commonly used types for convenience
pub use call::{
    CallError, CallFields, DynamicVariables, ElevenLabsCallClient, OutboundCallProvider,
    OutboundCallRequest, build_outbound_call, extract_call_id,
};
pub use chat::{
    ChatCompletionProvider, ChatError, ChatMessage, ChatRole, HistoryRole, HistoryTurn,
    OpenAIChatClient, SYSTEM_PROMPT, build_messages,
};
