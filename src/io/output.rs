use crate::codec::{trace::join_scores, DecodeTrace, EncodeTrace, TraceMode};
use crate::formatting::{formatter_for, FormattingConfig, OutputFormatter};
use crate::risk::render_score_table;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Result line, preceded by the field breakdown with --explain
    #[default]
    Text,
    /// Pretty-printed JSON with scores, value and binary fields
    Json,
    /// Labeled risk table (unpack only; pack falls back to text)
    Table,
}

pub trait ReportWriter {
    fn write_pack(&mut self, trace: &EncodeTrace, mode: TraceMode) -> anyhow::Result<()>;
    fn write_unpack(&mut self, trace: &DecodeTrace, mode: TraceMode) -> anyhow::Result<()>;
}

pub struct TextWriter<W: Write> {
    writer: W,
    formatter: Box<dyn OutputFormatter>,
}

impl<W: Write> TextWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self {
            writer,
            formatter: formatter_for(formatting),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_trace(&mut self, rendered: &str, mode: TraceMode) -> anyhow::Result<()> {
        if mode == TraceMode::Verbose {
            for line in rendered.lines() {
                writeln!(self.writer, "{}", self.formatter.dim(line))?;
            }
        }
        Ok(())
    }
}

impl<W: Write> ReportWriter for TextWriter<W> {
    fn write_pack(&mut self, trace: &EncodeTrace, mode: TraceMode) -> anyhow::Result<()> {
        self.write_trace(&trace.render(mode), mode)?;
        writeln!(
            self.writer,
            "{} {}",
            self.formatter.label("Decimal Score:"),
            trace.render(TraceMode::Short)
        )?;
        Ok(())
    }

    fn write_unpack(&mut self, trace: &DecodeTrace, mode: TraceMode) -> anyhow::Result<()> {
        self.write_trace(&trace.render(mode), mode)?;
        writeln!(
            self.writer,
            "{} {}",
            self.formatter.label("Scores:"),
            join_scores(&trace.scores)
        )?;
        Ok(())
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_pack(&mut self, trace: &EncodeTrace, _mode: TraceMode) -> anyhow::Result<()> {
        self.write_json(trace)
    }

    fn write_unpack(&mut self, trace: &DecodeTrace, _mode: TraceMode) -> anyhow::Result<()> {
        self.write_json(trace)
    }
}

pub struct TableWriter<W: Write> {
    text: TextWriter<W>,
    plain: bool,
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self {
            text: TextWriter::new(writer, formatting),
            plain: formatting.is_plain(),
        }
    }

    pub fn into_inner(self) -> W {
        self.text.into_inner()
    }
}

impl<W: Write> ReportWriter for TableWriter<W> {
    fn write_pack(&mut self, trace: &EncodeTrace, mode: TraceMode) -> anyhow::Result<()> {
        self.text.write_pack(trace, mode)
    }

    fn write_unpack(&mut self, trace: &DecodeTrace, mode: TraceMode) -> anyhow::Result<()> {
        self.text.write_trace(&trace.render(mode), mode)?;
        let table = render_score_table(
            &trace.scores,
            trace.bits_per_score,
            trace.value,
            self.plain,
        );
        writeln!(self.text.writer, "{table}")?;
        Ok(())
    }
}

pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
    formatting: FormattingConfig,
) -> Box<dyn ReportWriter + 'a> {
    match format {
        OutputFormat::Text => Box::new(TextWriter::new(writer, formatting)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Table => Box::new(TableWriter::new(writer, formatting)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: [u64; 7] = [3, 4, 5, 4, 3, 4, 2];

    fn plain() -> FormattingConfig {
        FormattingConfig::plain()
    }

    #[test]
    fn test_text_pack_short() {
        let mut writer = TextWriter::new(Vec::new(), plain());
        let trace = EncodeTrace::new(&SAMPLE, 5, 3_360_820_354);
        writer.write_pack(&trace, TraceMode::Short).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "Decimal Score: 3360820354\n");
    }

    #[test]
    fn test_text_pack_verbose_prints_trace_first() {
        let mut writer = TextWriter::new(Vec::new(), plain());
        let trace = EncodeTrace::new(&SAMPLE, 5, 3_360_820_354);
        writer.write_pack(&trace, TraceMode::Verbose).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("1. Decimal notations:"));
        assert_eq!(lines[3], "Decimal Score: 3360820354");
    }

    #[test]
    fn test_text_unpack_short() {
        let mut writer = TextWriter::new(Vec::new(), plain());
        let trace = DecodeTrace::new(3_360_820_354, 7, 5, &SAMPLE).unwrap();
        writer.write_unpack(&trace, TraceMode::Short).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "Scores: 3,4,5,4,3,4,2\n");
    }

    #[test]
    fn test_json_unpack() {
        let mut writer = JsonWriter::new(Vec::new());
        let trace = DecodeTrace::new(3_360_820_354, 7, 5, &SAMPLE).unwrap();
        writer.write_unpack(&trace, TraceMode::Short).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&writer.into_inner()).unwrap();
        assert_eq!(json["value"], "3360820354");
        assert_eq!(json["scores"], serde_json::json!([3, 4, 5, 4, 3, 4, 2]));
        assert_eq!(json["fields"][2], "00101");
    }

    #[test]
    fn test_table_pack_falls_back_to_text() {
        let mut writer = TableWriter::new(Vec::new(), plain());
        let trace = EncodeTrace::new(&SAMPLE, 5, 3_360_820_354);
        writer.write_pack(&trace, TraceMode::Short).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "Decimal Score: 3360820354\n");
    }

    #[test]
    fn test_table_unpack_renders_dimensions() {
        let mut writer = TableWriter::new(Vec::new(), plain());
        let trace = DecodeTrace::new(3_360_820_354, 7, 5, &SAMPLE).unwrap();
        writer.write_unpack(&trace, TraceMode::Short).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert!(out.contains("Code Review"));
        assert!(out.contains("Decimal Risk Score: 3360820354"));
    }

    #[test]
    fn test_output_format_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: OutputFormat,
        }
        let wrapper: Wrapper = toml::from_str("format = \"table\"").unwrap();
        assert_eq!(wrapper.format, OutputFormat::Table);
    }
}
