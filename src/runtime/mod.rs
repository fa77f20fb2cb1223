pub mod class;
pub mod compare;
pub mod config;
pub mod context;
pub mod environment;
pub mod error;
pub mod executable;
pub mod stack;
pub mod value;

pub use class::{Class, Instance, Method};
pub use config::RuntimeConfig;
pub use context::{CaptureOutput, Context};
pub use environment::Closure;
pub use error::{RuntimeError, RuntimeResult};
pub use executable::{Eval, Executable, FlowSignal};
pub use value::Value;
