pub mod chatbot;
pub mod completion;
pub mod dispatcher;
pub mod persona;
