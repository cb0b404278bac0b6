use crate::adapters::outbound::formatters::{JsonFormatter, TextTreeFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::TreeFormatter;

/// Factory for creating report formatters
///
/// Selects the formatter adapter for an output format; the CLI never
/// names adapter types directly.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Arguments
    /// * `format` - The output format to create a formatter for
    /// * `colored` - Whether the text tree may use ANSI colors (ignored for JSON)
    ///
    /// # Examples
    /// ```
    /// use polyscan::application::dto::OutputFormat;
    /// use polyscan::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json, false);
    /// ```
    pub fn create(format: OutputFormat, colored: bool) -> Box<dyn TreeFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextTreeFormatter::new(colored)),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use polyscan::application::dto::OutputFormat;
    /// use polyscan::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json);
    /// assert_eq!(message, "📝 Generating JSON report...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Text => "📝 Rendering dependency trees...",
            OutputFormat::Json => "📝 Generating JSON report...",
        }
    }
}
