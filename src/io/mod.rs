pub mod output;

pub use output::{
    create_writer, recommendations, JsonWriter, MarkdownWriter, ReportWriter, TerminalWriter,
};
