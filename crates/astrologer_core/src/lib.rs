pub mod domain;
pub mod engine;
pub mod ports;
pub mod prompt;
pub mod reading;
pub mod resolver;
pub mod session;
pub mod signs;

pub use domain::{
    AstrologyContext, BirthDetails, Element, QuestionResponse, Quality, Reading, Sign, SignName,
    UnknownSign, ValidationError,
};
pub use engine::{AstrologyEngine, EngineError};
pub use ports::{
    AnswerProvider, Clock, FixedClock, PortError, PortResult, ProviderTag, SystemClock,
    UnconfiguredProvider,
};
pub use session::ReadingSession;
