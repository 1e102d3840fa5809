mod block;
mod config;
pub mod html;
pub mod logging;
mod parser;
pub mod search;
mod typst;

pub use block::{Block, List, SourceBlock};
pub use config::{Config, ConfigError, HtmlConfig, PageConfig, SearchConfig, TextConfig};
pub use parser::Mode;
pub use search::{FaqEntry, Highlighter, MatchMode, Segment, highlight};

use thiserror::Error;
use tracing::debug;
use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Errors from exporting an answer through Typst.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Typst compilation failed: {0}")]
    Compile(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// Parse answer text into a vector of blocks, classifying lists and titles.
pub fn parse(text: &str) -> Vec<Block> {
    parse_with_mode(Some(text), Mode::Markdown)
        .into_iter()
        .map(|b| b.block)
        .collect()
}

/// Parse answer text in the given mode, keeping each block's source line.
pub fn parse_with_mode(text: Option<&str>, mode: Mode) -> Vec<SourceBlock> {
    parser::parse(text, mode)
}

fn blocks_for(text: &str, config: &Config) -> Vec<Block> {
    parse_with_mode(Some(text), config.text.mode())
        .into_iter()
        .map(|b| b.block)
        .collect()
}

/// Convert answer text to an HTML fragment using default config.
pub fn answer_to_html(text: &str) -> String {
    answer_to_html_with_config(text, &Config::compiled_default())
}

/// Convert answer text to an HTML fragment with custom config.
pub fn answer_to_html_with_config(text: &str, config: &Config) -> String {
    let blocks = blocks_for(text, config);
    debug!(blocks = blocks.len(), "rendering html");
    html::render(&blocks, &config.html)
}

/// Convert answer text to Typst markup using default config.
pub fn answer_to_typst(text: &str) -> String {
    answer_to_typst_with_config(text, &Config::compiled_default())
}

/// Convert answer text to Typst markup with custom config.
pub fn answer_to_typst_with_config(text: &str, config: &Config) -> String {
    let blocks = blocks_for(text, config);
    debug!(blocks = blocks.len(), "rendering typst");
    typst::blocks_to_typst(&blocks, config)
}

/// Convert highlight segments to Typst markup.
pub fn segments_to_typst(segments: &[Segment]) -> String {
    typst::segments_to_typst(segments)
}

/// Convert answer text to PDF bytes using default config.
pub fn answer_to_pdf(text: &str) -> Result<Vec<u8>, RenderError> {
    answer_to_pdf_with_config(text, &Config::compiled_default())
}

/// Convert answer text to PDF bytes with custom config.
pub fn answer_to_pdf_with_config(text: &str, config: &Config) -> Result<Vec<u8>, RenderError> {
    use typst_library::layout::PagedDocument;

    let typst_content = answer_to_typst_with_config(text, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    debug!("compiling typst document");
    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| RenderError::Compile(format!("{:?}", e)))?;

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| RenderError::Pdf(format!("{:?}", e)))
}
