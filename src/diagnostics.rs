use crate::runtime::{config::ConfigError, error::RuntimeError};
use miette::{Diagnostic, Report};

/// Renders any engine diagnostic with its code and help text.
pub fn render_diagnostic<E>(error: E) -> String
where
    E: Diagnostic + Send + Sync + 'static,
{
    format!("{:?}", Report::new(error))
}

pub fn render_runtime_error(error: RuntimeError) -> String {
    render_diagnostic(error)
}

pub fn report_runtime_error(error: RuntimeError) {
    eprintln!("Runtime error: {}", render_runtime_error(error));
}

pub fn report_config_error(error: ConfigError) {
    eprintln!("Config error: {}", render_diagnostic(error));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::config::RuntimeConfig;

    #[test]
    fn rendered_report_carries_message() {
        let rendered = render_runtime_error(RuntimeError::UnknownSymbol { name: "x".into() });
        assert!(rendered.contains("Unknown symbol `x`"), "{rendered}");
    }

    #[test]
    fn config_errors_render_through_the_same_path() {
        let err = RuntimeConfig::from_toml("[runtime]\nmax_call_depth = \"deep\"\n").unwrap_err();
        let rendered = render_diagnostic(err);
        assert!(rendered.contains("invalid runtime config"), "{rendered}");
    }
}
