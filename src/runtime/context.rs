use crate::runtime::{
    config::RuntimeConfig,
    error::{RuntimeError, RuntimeResult},
};
use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

/// State threaded through every `execute` call: the output sink used by
/// `print`, the runtime configuration and the current method call depth.
pub struct Context {
    output: Box<dyn Write>,
    config: RuntimeConfig,
    depth: usize,
}

impl Context {
    pub fn new(output: impl Write + 'static) -> Self {
        Self::with_config(output, RuntimeConfig::default())
    }

    pub fn with_config(output: impl Write + 'static, config: RuntimeConfig) -> Self {
        Self {
            output: Box::new(output),
            config,
            depth: 0,
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Context writing into an in-memory buffer that the caller can read back.
    pub fn capture() -> (Self, CaptureOutput) {
        let output = CaptureOutput::default();
        (Self::new(output.clone()), output)
    }

    pub fn output(&mut self) -> &mut dyn Write {
        self.output.as_mut()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn enter_call(&mut self) -> RuntimeResult<()> {
        if self.depth >= self.config.max_call_depth {
            return Err(RuntimeError::RecursionLimit {
                limit: self.config.max_call_depth,
            });
        }
        self.depth += 1;
        if self.config.trace_calls {
            tracing::trace!(depth = self.depth, "enter method frame");
        }
        Ok(())
    }

    pub fn exit_call(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaptureOutput {
    into: Rc<RefCell<Vec<u8>>>,
}

impl CaptureOutput {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.into.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.into.borrow_mut().clear();
    }
}

impl Write for CaptureOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.into.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Display for CaptureOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.contents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_shares_buffer_with_context() {
        let (mut context, output) = Context::capture();
        write!(context.output(), "hello").unwrap();
        assert_eq!(output.contents(), "hello");

        output.clear();
        assert_eq!(output.to_string(), "");
    }

    #[test]
    fn call_depth_is_bounded() {
        let config = RuntimeConfig {
            max_call_depth: 2,
            ..RuntimeConfig::default()
        };
        let mut context = Context::with_config(io::sink(), config);

        context.enter_call().unwrap();
        context.enter_call().unwrap();
        let err = context.enter_call().unwrap_err();
        assert!(matches!(err, RuntimeError::RecursionLimit { limit: 2 }));

        context.exit_call();
        assert_eq!(context.depth(), 1);
        context.enter_call().unwrap();
    }
}
