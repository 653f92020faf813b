pub mod completion;
pub mod conversation;
pub mod message;
pub mod settings;

pub use completion::*;
pub use conversation::*;
pub use message::*;
pub use settings::*;
